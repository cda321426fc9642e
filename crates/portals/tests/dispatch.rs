#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use portal_bridge_core::{CapabilityDescriptor, CapabilityRegistry, Outcome, Severity};
    use portal_bridge_portals::*;
    use tokio::time::Duration;

    // Fake handlers standing in for the desktop-facing implementations.

    struct StaticPortal {
        id: &'static str,
        probe: Probe,
        outcome: Outcome,
        invocations: AtomicUsize,
    }

    impl StaticPortal {
        fn new(id: &'static str, probe: Probe, outcome: Outcome) -> Arc<Self> {
            Arc::new(Self {
                id,
                probe,
                outcome,
                invocations: AtomicUsize::new(0),
            })
        }

        fn invocations(&self) -> usize {
            self.invocations.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Portal for StaticPortal {
        fn id(&self) -> &'static str {
            self.id
        }

        async fn probe(&self) -> Probe {
            self.probe.clone()
        }

        async fn invoke(&self, _ctx: &PortalContext) -> PortalResult<Outcome> {
            self.invocations.fetch_add(1, Ordering::SeqCst);
            Ok(self.outcome.clone())
        }
    }

    struct FailingPortal {
        id: &'static str,
        denied: bool,
    }

    #[async_trait]
    impl Portal for FailingPortal {
        fn id(&self) -> &'static str {
            self.id
        }

        async fn probe(&self) -> Probe {
            Probe::Available
        }

        async fn invoke(&self, _ctx: &PortalContext) -> PortalResult<Outcome> {
            if self.denied {
                Err(PortalError::PermissionDenied("refused by user".into()))
            } else {
                Err(PortalError::OperationFailed("boom".into()))
            }
        }
    }

    /// Callback-shaped fake: fires the error path first and then tries the
    /// success path, like a misbehaving platform source firing both
    /// callbacks. The adapter must deliver only the first.
    struct CallbackGeoPortal;

    #[async_trait]
    impl Portal for CallbackGeoPortal {
        fn id(&self) -> &'static str {
            "location"
        }

        async fn probe(&self) -> Probe {
            Probe::Available
        }

        async fn invoke(&self, _ctx: &PortalContext) -> PortalResult<Outcome> {
            let (resolver, fix) = single_resolution::<Result<(f64, f64), String>>();
            let resolver = Arc::new(resolver);
            let double_firing = Arc::clone(&resolver);
            tokio::spawn(async move {
                assert!(double_firing.resolve(Err("User denied Geolocation".to_string())));
                assert!(!double_firing.resolve(Ok((1.0, 2.0))));
            });

            match fix.await {
                Ok(Ok((lat, lon))) => Ok(Outcome::Success(format!(
                    "Location bridged: {lat:.4}, {lon:.4}"
                ))),
                Ok(Err(message)) => Ok(Outcome::Denied(format!("Location error: {message}"))),
                Err(_) => Ok(Outcome::Failed("Location error: source dropped".into())),
            }
        }
    }

    struct SlowPortal {
        id: &'static str,
    }

    #[async_trait]
    impl Portal for SlowPortal {
        fn id(&self) -> &'static str {
            self.id
        }

        async fn probe(&self) -> Probe {
            Probe::Available
        }

        async fn invoke(&self, _ctx: &PortalContext) -> PortalResult<Outcome> {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(Outcome::Success(format!("{} settled", self.id)))
        }
    }

    fn dispatcher_with(handlers: Vec<Arc<dyn Portal>>) -> (Arc<PortalDispatcher>, Arc<DiagnosticsLog>, Arc<MediaLink>) {
        let mut table = PortalTable::new();
        for handler in handlers {
            table.register(handler);
        }
        let log = Arc::new(DiagnosticsLog::new());
        let media = Arc::new(MediaLink::new());
        let dispatcher = Arc::new(PortalDispatcher::new(
            Arc::new(table),
            Arc::clone(&log),
            Arc::clone(&media),
        ));
        (dispatcher, log, media)
    }

    fn registry_of(ids: &[&str]) -> Arc<CapabilityRegistry> {
        let entries = ids
            .iter()
            .map(|id| CapabilityDescriptor::new(id, id, "", "", ""))
            .collect();
        Arc::new(CapabilityRegistry::from_entries(entries).unwrap())
    }

    #[tokio::test]
    async fn clipboard_dispatch_succeeds_and_logs() {
        let portal = StaticPortal::new(
            "clipboard",
            Probe::Available,
            Outcome::Success("Clipboard updated system-wide.".into()),
        );
        let (dispatcher, log, _) = dispatcher_with(vec![portal.clone()]);

        let outcome = dispatcher.dispatch("clipboard").await;
        assert!(outcome.is_success());
        assert_eq!(dispatcher.active_portal().as_deref(), Some("clipboard"));
        assert!(log.newest().unwrap().text.contains("Clipboard"));
        assert_eq!(portal.invocations(), 1);
    }

    #[tokio::test]
    async fn unsupported_probe_short_circuits_invocation() {
        let portal = StaticPortal::new(
            "fonts",
            Probe::Unsupported("Local fonts unsupported.".into()),
            Outcome::Success("should never appear".into()),
        );
        let (dispatcher, log, _) = dispatcher_with(vec![portal.clone()]);

        let outcome = dispatcher.dispatch("fonts").await;
        assert_eq!(outcome, Outcome::Unsupported("Local fonts unsupported.".into()));
        assert_eq!(portal.invocations(), 0);

        let newest = log.newest().unwrap();
        assert_eq!(newest.text, "Local fonts unsupported.");
        assert_eq!(newest.severity(), Severity::Error);
    }

    #[tokio::test]
    async fn unknown_id_degrades_to_noop_success() {
        let (dispatcher, log, _) = dispatcher_with(vec![]);

        let outcome = dispatcher.dispatch("nonexistent").await;
        match outcome {
            Outcome::Success(message) => assert!(message.contains("triggered (no-op)")),
            other => panic!("expected placeholder success, got {other:?}"),
        }
        assert!(log.newest().unwrap().text.contains("triggered (no-op)"));
        assert_eq!(dispatcher.active_portal().as_deref(), Some("nonexistent"));
    }

    #[tokio::test]
    async fn handler_error_maps_to_failed_with_reason_name() {
        let (dispatcher, log, _) = dispatcher_with(vec![Arc::new(FailingPortal {
            id: "usb",
            denied: false,
        })]);

        let outcome = dispatcher.dispatch("usb").await;
        assert_eq!(
            outcome,
            Outcome::Failed("Portal error (usb): OperationFailed".into())
        );
        let newest = log.newest().unwrap();
        assert_eq!(newest.text, "Portal error (usb): OperationFailed");
        assert_eq!(newest.severity(), Severity::Error);
    }

    #[tokio::test]
    async fn permission_error_maps_to_denied() {
        let (dispatcher, _, _) = dispatcher_with(vec![Arc::new(FailingPortal {
            id: "camera",
            denied: true,
        })]);

        let outcome = dispatcher.dispatch("camera").await;
        assert_eq!(
            outcome,
            Outcome::Denied("Portal error (camera): PermissionDenied".into())
        );
    }

    #[tokio::test]
    async fn cancelled_dispatch_still_leaves_a_trigger_entry() {
        let portal = StaticPortal::new("file", Probe::Available, Outcome::Cancelled);
        let (dispatcher, log, _) = dispatcher_with(vec![portal]);

        let outcome = dispatcher.dispatch("file").await;
        assert_eq!(outcome, Outcome::Cancelled);
        // No forced selection entry, but the dispatch itself is on record.
        assert_eq!(log.len(), 1);
        assert!(log.newest().unwrap().text.contains("Initiating file portal trigger"));
    }

    #[tokio::test]
    async fn geolocation_error_callback_yields_one_denied_entry() {
        let (dispatcher, log, _) = dispatcher_with(vec![Arc::new(CallbackGeoPortal)]);

        let outcome = dispatcher.dispatch("location").await;
        assert_eq!(
            outcome,
            Outcome::Denied("Location error: User denied Geolocation".into())
        );

        let matching = log
            .entries()
            .iter()
            .filter(|entry| entry.text.contains("User denied Geolocation"))
            .count();
        assert_eq!(matching, 1, "error callback must log exactly once");
    }

    #[tokio::test]
    async fn sequencer_brackets_run_in_order() {
        let (dispatcher, log, _) = dispatcher_with(vec![
            StaticPortal::new("a", Probe::Available, Outcome::Success("alpha settled".into())),
            StaticPortal::new("b", Probe::Available, Outcome::Success("beta settled".into())),
            StaticPortal::new("c", Probe::Available, Outcome::Success("gamma settled".into())),
        ]);
        let sequencer = DiagnosticSequencer::with_step_delay(
            dispatcher,
            registry_of(&["a", "b", "c"]),
            Arc::clone(&log),
            Duration::ZERO,
        );

        sequencer.run_all().await;
        assert!(!sequencer.is_running());

        let entries = log.entries();
        let texts: Vec<&str> = entries.iter().map(|entry| entry.text.as_str()).collect();

        let starts = texts.iter().filter(|t| t.contains("STARTING")).count();
        let completes = texts.iter().filter(|t| t.contains("COMPLETE")).count();
        assert_eq!(starts, 1);
        assert_eq!(completes, 1);

        // Newest-first storage: the complete marker leads, the start marker
        // trails, and the per-item outcomes sit between in reverse catalog
        // order.
        assert!(texts[0].contains("COMPLETE"));
        assert!(texts[texts.len() - 1].contains("STARTING"));
        let position = |needle: &str| texts.iter().position(|t| t.contains(needle)).unwrap();
        assert!(position("gamma settled") < position("beta settled"));
        assert!(position("beta settled") < position("alpha settled"));
    }

    #[tokio::test]
    async fn sequencer_concurrent_run_is_noop() {
        let (dispatcher, log, _) = dispatcher_with(vec![
            Arc::new(SlowPortal { id: "a" }),
            Arc::new(SlowPortal { id: "b" }),
        ]);
        let sequencer = Arc::new(DiagnosticSequencer::with_step_delay(
            dispatcher,
            registry_of(&["a", "b"]),
            Arc::clone(&log),
            Duration::ZERO,
        ));

        let background = {
            let sequencer = Arc::clone(&sequencer);
            tokio::spawn(async move { sequencer.run_all().await })
        };
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(sequencer.is_running());

        // Second call while running must change nothing.
        sequencer.run_all().await;
        background.await.unwrap();
        assert!(!sequencer.is_running());

        let start_markers = log
            .entries()
            .iter()
            .filter(|entry| entry.text.contains("STARTING"))
            .count();
        assert_eq!(start_markers, 1);

        // A fresh run after completion executes fully.
        sequencer.run_all().await;
        let start_markers = log
            .entries()
            .iter()
            .filter(|entry| entry.text.contains("STARTING"))
            .count();
        assert_eq!(start_markers, 2);
    }

    #[tokio::test]
    async fn media_teardown_logs_termination() {
        let (dispatcher, log, media) = dispatcher_with(vec![]);
        media.install(CaptureSession::detached(CaptureKind::Camera));

        assert_eq!(dispatcher.release_media(), Some(CaptureKind::Camera));
        assert_eq!(log.newest().unwrap().text, "Camera Portal terminated.");

        // Releasing again is a no-op with no extra entry.
        let before = log.len();
        assert_eq!(dispatcher.release_media(), None);
        assert_eq!(log.len(), before);
    }
}

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use portal_bridge_core::CapabilityRegistry;
use tokio::time::{sleep, Duration};
use tracing::{debug, info};

use crate::diag_log::DiagnosticsLog;
use crate::dispatcher::PortalDispatcher;

pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(800);

const RUN_START_MARKER: &str = "--- STARTING FULL SYSTEM DIAGNOSTIC ---";
const RUN_COMPLETE_MARKER: &str = "--- DIAGNOSTIC COMPLETE ---";

/// Sequential smoke test over the whole catalog.
///
/// Walks the registry in order, dispatching each capability with a fixed
/// inter-step delay. Step failures are recorded by the dispatcher like any
/// other outcome; they never halt the run.
pub struct DiagnosticSequencer {
    dispatcher: Arc<PortalDispatcher>,
    registry: Arc<CapabilityRegistry>,
    log: Arc<DiagnosticsLog>,
    step_delay: Duration,
    running: AtomicBool,
}

impl DiagnosticSequencer {
    pub fn new(
        dispatcher: Arc<PortalDispatcher>,
        registry: Arc<CapabilityRegistry>,
        log: Arc<DiagnosticsLog>,
    ) -> Self {
        Self::with_step_delay(dispatcher, registry, log, DEFAULT_STEP_DELAY)
    }

    pub fn with_step_delay(
        dispatcher: Arc<PortalDispatcher>,
        registry: Arc<CapabilityRegistry>,
        log: Arc<DiagnosticsLog>,
        step_delay: Duration,
    ) -> Self {
        Self {
            dispatcher,
            registry,
            log,
            step_delay,
            running: AtomicBool::new(false),
        }
    }

    /// Run every catalog capability in registry order. A call while a run
    /// is already in flight is a no-op.
    pub async fn run_all(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            debug!("diagnostic run already in progress; ignoring");
            return;
        }

        self.log.append(RUN_START_MARKER);
        for capability in self.registry.list() {
            info!(portal = %capability.id, name = %capability.name, "sequencing capability");
            self.dispatcher.dispatch(&capability.id).await;
            sleep(self.step_delay).await;
        }
        self.log.append(RUN_COMPLETE_MARKER);

        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

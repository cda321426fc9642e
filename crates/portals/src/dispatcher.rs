use std::sync::Arc;

use parking_lot::Mutex;
use portal_bridge_core::Outcome;
use tracing::{info, warn};

use crate::diag_log::DiagnosticsLog;
use crate::error::PortalError;
use crate::media::{CaptureKind, MediaLink};
use crate::table::PortalTable;
use crate::traits::{PortalContext, Probe};

/// Registry-driven command dispatcher.
///
/// Looks up the handler for a capability id, feature-detects, invokes, and
/// normalizes whatever comes back into the outcome taxonomy. Never lets a
/// handler error escape to the caller. Within one call the ordering is:
/// active-portal update, then log append(s), then the returned outcome.
pub struct PortalDispatcher {
    table: Arc<PortalTable>,
    log: Arc<DiagnosticsLog>,
    media: Arc<MediaLink>,
    active: Mutex<Option<String>>,
}

impl PortalDispatcher {
    pub fn new(table: Arc<PortalTable>, log: Arc<DiagnosticsLog>, media: Arc<MediaLink>) -> Self {
        Self {
            table,
            log,
            media,
            active: Mutex::new(None),
        }
    }

    /// Trigger one capability and record the result.
    pub async fn dispatch(&self, id: &str) -> Outcome {
        *self.active.lock() = Some(id.to_string());
        self.log.append(format!("Initiating {id} portal trigger..."));

        let Some(handler) = self.table.get(id) else {
            // Permissive by policy: an unknown id degrades to a no-op
            // trigger instead of raising. The warn keeps catalog typos
            // visible without changing observable behavior.
            warn!(portal = id, "no handler registered; treating as no-op trigger");
            let message = format!("{id} triggered (no-op).");
            self.log.append(message.clone());
            return Outcome::Success(message);
        };

        if let Probe::Unsupported(message) = handler.probe().await {
            self.log.append(message.clone());
            return Outcome::Unsupported(message);
        }

        let ctx = PortalContext {
            log: Arc::clone(&self.log),
            media: Arc::clone(&self.media),
        };
        let outcome = match handler.invoke(&ctx).await {
            Ok(outcome) => outcome,
            Err(err) => {
                let message = format!("Portal error ({id}): {}", err.reason());
                match err {
                    PortalError::PermissionDenied(_) => Outcome::Denied(message),
                    _ => Outcome::Failed(message),
                }
            }
        };
        if let Some(message) = outcome.message() {
            self.log.append(message.to_string());
        }
        info!(portal = id, outcome = outcome.label(), "portal dispatch settled");
        outcome
    }

    /// Id of the most recently dispatched capability, if any.
    pub fn active_portal(&self) -> Option<String> {
        self.active.lock().clone()
    }

    /// Explicit teardown for the long-lived capture link ("kill link").
    /// Releases the held hardware and records the termination.
    pub fn release_media(&self) -> Option<CaptureKind> {
        let released = self.media.release();
        if let Some(kind) = released {
            self.log.append(format!("{} Portal terminated.", kind.portal_name()));
        }
        released
    }
}

//! REPL command implementations.

pub mod diagnostics;
pub mod inspect;
pub mod status;
pub mod trigger;

use std::sync::Arc;

use portal_bridge_core::CapabilityRegistry;
use portal_bridge_inspector::ExplanationClient;
use portal_bridge_monitor::StatusMonitor;
use portal_bridge_portals::{DiagnosticSequencer, DiagnosticsLog, PortalDispatcher};

/// Shared handles the commands operate on. Each command touches only the
/// slices it needs.
pub struct AppContext {
    pub registry: Arc<CapabilityRegistry>,
    pub log: Arc<DiagnosticsLog>,
    pub dispatcher: Arc<PortalDispatcher>,
    pub sequencer: Arc<DiagnosticSequencer>,
    pub monitor: Arc<StatusMonitor>,
    pub inspector: Arc<ExplanationClient>,
}

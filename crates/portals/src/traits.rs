use std::sync::Arc;

use async_trait::async_trait;
use portal_bridge_core::Outcome;

use crate::diag_log::DiagnosticsLog;
use crate::error::PortalResult;
use crate::media::MediaLink;

/// Feature-detection result for a portal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    Available,
    Unsupported(String),
}

impl Probe {
    pub fn is_available(&self) -> bool {
        matches!(self, Probe::Available)
    }
}

/// The state slices a handler may touch during invocation: the diagnostics
/// log, for the handlers that record intermediate phases, and the media
/// link slot, for the handlers that park a long-lived capture session.
#[derive(Clone)]
pub struct PortalContext {
    pub log: Arc<DiagnosticsLog>,
    pub media: Arc<MediaLink>,
}

/// One capability handler.
///
/// Implementations feature-detect in `probe` and perform the platform
/// invocation in `invoke`. The dispatcher never calls `invoke` when `probe`
/// reported the feature absent, and catches every error `invoke` returns.
#[async_trait]
pub trait Portal: Send + Sync {
    fn id(&self) -> &'static str;

    async fn probe(&self) -> Probe;

    async fn invoke(&self, ctx: &PortalContext) -> PortalResult<Outcome>;
}

use parking_lot::Mutex;
use tokio::process::Child;
use tracing::debug;

/// Which hardware link a capture session holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureKind {
    Camera,
    Screen,
}

impl CaptureKind {
    pub fn portal_name(&self) -> &'static str {
        match self {
            CaptureKind::Camera => "Camera",
            CaptureKind::Screen => "Screen Capture",
        }
    }
}

/// A long-lived capture process holding a camera or screen grab.
pub struct CaptureSession {
    kind: CaptureKind,
    child: Option<Child>,
}

impl CaptureSession {
    pub fn new(kind: CaptureKind, child: Child) -> Self {
        Self {
            kind,
            child: Some(child),
        }
    }

    /// A session with no backing process, for tests.
    pub fn detached(kind: CaptureKind) -> Self {
        Self { kind, child: None }
    }

    pub fn kind(&self) -> CaptureKind {
        self.kind
    }

    fn terminate(mut self) -> CaptureKind {
        if let Some(mut child) = self.child.take() {
            let _ = child.start_kill();
        }
        self.kind
    }
}

/// Single shared slot for the one live capture session.
///
/// At most one hardware link is held at a time: installing a new session
/// releases the previous one first, so camera and screen locks never stack.
pub struct MediaLink {
    slot: Mutex<Option<CaptureSession>>,
}

impl MediaLink {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Park a new session, terminating whatever was held. Returns the kind
    /// of the replaced session, if any.
    pub fn install(&self, session: CaptureSession) -> Option<CaptureKind> {
        let previous = self.slot.lock().replace(session);
        previous.map(|session| {
            let kind = session.terminate();
            debug!(link = kind.portal_name(), "previous capture link released");
            kind
        })
    }

    /// Explicit teardown. Returns the kind that was terminated, if a link
    /// was held.
    pub fn release(&self) -> Option<CaptureKind> {
        self.slot.lock().take().map(CaptureSession::terminate)
    }

    pub fn active(&self) -> Option<CaptureKind> {
        self.slot.lock().as_ref().map(CaptureSession::kind)
    }
}

impl Default for MediaLink {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_replaces_previous_link() {
        let link = MediaLink::new();
        assert_eq!(link.install(CaptureSession::detached(CaptureKind::Camera)), None);
        assert_eq!(link.active(), Some(CaptureKind::Camera));

        let replaced = link.install(CaptureSession::detached(CaptureKind::Screen));
        assert_eq!(replaced, Some(CaptureKind::Camera));
        assert_eq!(link.active(), Some(CaptureKind::Screen));
    }

    #[test]
    fn release_empties_the_slot() {
        let link = MediaLink::new();
        link.install(CaptureSession::detached(CaptureKind::Camera));
        assert_eq!(link.release(), Some(CaptureKind::Camera));
        assert_eq!(link.active(), None);
        assert_eq!(link.release(), None);
    }
}

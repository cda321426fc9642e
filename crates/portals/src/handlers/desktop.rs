//! Desktop-surface portals: share sheet, wake lock, fullscreen, clipboard,
//! eyedropper, print queue, and local fonts.

use async_trait::async_trait;
use parking_lot::Mutex;
use portal_bridge_core::Outcome;
use tokio::process::Child;

use crate::error::PortalResult;
use crate::os::dialogs::DialogChoice;
use crate::os::{self, desktop, dialogs};
use crate::traits::{Portal, PortalContext, Probe};

const SHARE_URL: &str = "mailto:?subject=Portal%20Explorer&body=Testing%20Web-to-System%20Portals";

async fn tool_probe(tool: &str, unsupported: &str) -> Probe {
    if os::command_exists(tool).await {
        Probe::Available
    } else {
        Probe::Unsupported(unsupported.to_string())
    }
}

pub struct SharePortal;

#[async_trait]
impl Portal for SharePortal {
    fn id(&self) -> &'static str {
        "share"
    }

    async fn probe(&self) -> Probe {
        tool_probe("xdg-open", "Web Share API not supported.").await
    }

    async fn invoke(&self, _ctx: &PortalContext) -> PortalResult<Outcome> {
        desktop::open_url(SHARE_URL).await?;
        Ok(Outcome::Success("System share sheet closed.".to_string()))
    }
}

/// Idle inhibitor held for the lifetime of the process (or until replaced
/// by a newer request). Re-triggering swaps the inhibitor rather than
/// stacking a second one.
pub struct WakeLockPortal {
    inhibitor: Mutex<Option<Child>>,
}

impl WakeLockPortal {
    pub fn new() -> Self {
        Self {
            inhibitor: Mutex::new(None),
        }
    }
}

impl Default for WakeLockPortal {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Portal for WakeLockPortal {
    fn id(&self) -> &'static str {
        "wakelock"
    }

    async fn probe(&self) -> Probe {
        tool_probe("systemd-inhibit", "Wake Lock API unsupported.").await
    }

    async fn invoke(&self, _ctx: &PortalContext) -> PortalResult<Outcome> {
        let child = desktop::spawn_idle_inhibitor("Screen Wake Lock requested").await?;
        if let Some(mut previous) = self.inhibitor.lock().replace(child) {
            let _ = previous.start_kill();
        }
        Ok(Outcome::Success("Screen Wake Lock active.".to_string()))
    }
}

pub struct FullscreenPortal;

#[async_trait]
impl Portal for FullscreenPortal {
    fn id(&self) -> &'static str {
        "fullscreen"
    }

    async fn probe(&self) -> Probe {
        tool_probe("wmctrl", "Fullscreen toggle unsupported: wmctrl not installed.").await
    }

    async fn invoke(&self, _ctx: &PortalContext) -> PortalResult<Outcome> {
        desktop::toggle_fullscreen().await?;
        Ok(Outcome::Success("Toggled Fullscreen Mode.".to_string()))
    }
}

pub struct ClipboardPortal;

#[async_trait]
impl Portal for ClipboardPortal {
    fn id(&self) -> &'static str {
        "clipboard"
    }

    async fn probe(&self) -> Probe {
        tool_probe("wl-copy", "Clipboard access unsupported: wl-copy not installed.").await
    }

    async fn invoke(&self, _ctx: &PortalContext) -> PortalResult<Outcome> {
        let stamp = chrono::Local::now().format("%H:%M:%S");
        os::clipboard::copy_text(&format!("Portal data copied: {stamp}")).await?;
        Ok(Outcome::Success("Clipboard updated system-wide.".to_string()))
    }
}

pub struct EyeDropperPortal;

#[async_trait]
impl Portal for EyeDropperPortal {
    fn id(&self) -> &'static str {
        "eyedropper"
    }

    async fn probe(&self) -> Probe {
        tool_probe("zenity", "EyeDropper API unsupported.").await
    }

    async fn invoke(&self, _ctx: &PortalContext) -> PortalResult<Outcome> {
        match dialogs::pick_color().await? {
            DialogChoice::Selected(color) => {
                let hex = dialogs::rgb_to_hex(&color).unwrap_or(color);
                Ok(Outcome::Success(format!("Color picked from system: {hex}")))
            }
            DialogChoice::Dismissed => Ok(Outcome::Cancelled),
        }
    }
}

pub struct PrintPortal;

#[async_trait]
impl Portal for PrintPortal {
    fn id(&self) -> &'static str {
        "print"
    }

    async fn probe(&self) -> Probe {
        tool_probe("lpstat", "Print system unsupported: CUPS tools not installed.").await
    }

    async fn invoke(&self, _ctx: &PortalContext) -> PortalResult<Outcome> {
        match desktop::printer_destination().await? {
            Some(destination) => Ok(Outcome::Success(format!(
                "Print queue ready on {destination}."
            ))),
            None => Ok(Outcome::Success(
                "Print queue ready: no default destination configured.".to_string(),
            )),
        }
    }
}

pub struct FontsPortal;

#[async_trait]
impl Portal for FontsPortal {
    fn id(&self) -> &'static str {
        "fonts"
    }

    async fn probe(&self) -> Probe {
        tool_probe(
            "fc-list",
            "Local font enumeration unsupported: fontconfig not installed.",
        )
        .await
    }

    async fn invoke(&self, _ctx: &PortalContext) -> PortalResult<Outcome> {
        let count = desktop::count_fonts().await?;
        Ok(Outcome::Success(format!("Found {count} local system fonts.")))
    }
}

//! Notification, badge, and haptic portals.

use async_trait::async_trait;
use portal_bridge_core::Outcome;
use rand::Rng;

use crate::error::PortalResult;
use crate::os::{self, desktop};
use crate::traits::{Portal, PortalContext, Probe};

const NOTIFICATION_TITLE: &str = "System Portal Explorer";
const NOTIFICATION_BODY: &str = "Portal trigger successful!";

pub struct NotificationPortal;

#[async_trait]
impl Portal for NotificationPortal {
    fn id(&self) -> &'static str {
        "notification"
    }

    async fn probe(&self) -> Probe {
        if os::command_exists("notify-send").await {
            Probe::Available
        } else {
            Probe::Unsupported("Desktop notifications unsupported.".to_string())
        }
    }

    async fn invoke(&self, _ctx: &PortalContext) -> PortalResult<Outcome> {
        match os::run_checked("notify-send", &[NOTIFICATION_TITLE, NOTIFICATION_BODY]).await {
            Ok(()) => Ok(Outcome::Success("System notification triggered.".to_string())),
            // The notification daemon refusing us is the permission-denied
            // path, not an internal failure.
            Err(_) => Ok(Outcome::Denied("Notification permission denied.".to_string())),
        }
    }
}

pub struct BadgePortal;

#[async_trait]
impl Portal for BadgePortal {
    fn id(&self) -> &'static str {
        "badge"
    }

    async fn probe(&self) -> Probe {
        Probe::Available
    }

    async fn invoke(&self, _ctx: &PortalContext) -> PortalResult<Outcome> {
        let count = rand::thread_rng().gen_range(1..=10);
        desktop::set_badge(count).await?;
        Ok(Outcome::Success(format!("App Badge set to {count}.")))
    }
}

pub struct VibrationPortal;

#[async_trait]
impl Portal for VibrationPortal {
    fn id(&self) -> &'static str {
        "vibration"
    }

    async fn probe(&self) -> Probe {
        // Bell-based haptics need an interactive terminal on stdout.
        if unsafe { libc::isatty(libc::STDOUT_FILENO) } == 1 {
            Probe::Available
        } else {
            Probe::Unsupported("Vibration not supported.".to_string())
        }
    }

    async fn invoke(&self, _ctx: &PortalContext) -> PortalResult<Outcome> {
        desktop::haptic_pulse(&[100, 30, 100]).await?;
        Ok(Outcome::Success("Haptic pulse triggered.".to_string()))
    }
}

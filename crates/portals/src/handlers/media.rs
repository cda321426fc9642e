//! Long-lived capture portals: camera and screen.
//!
//! Dispatch resolves once the capture is established, not when it ends.
//! The acquired session is parked in the shared media link; releasing it is
//! the separate "kill link" operation on the dispatcher.

use async_trait::async_trait;
use portal_bridge_core::Outcome;

use crate::error::PortalResult;
use crate::media::{CaptureKind, CaptureSession};
use crate::os::{self, capture};
use crate::traits::{Portal, PortalContext, Probe};

pub struct CameraPortal;

#[async_trait]
impl Portal for CameraPortal {
    fn id(&self) -> &'static str {
        "camera"
    }

    async fn probe(&self) -> Probe {
        if !capture::has_video_device() {
            return Probe::Unsupported(
                "Media devices unsupported: no video device present.".to_string(),
            );
        }
        if !os::command_exists("ffmpeg").await {
            return Probe::Unsupported(
                "Media capture unsupported: ffmpeg not installed.".to_string(),
            );
        }
        Probe::Available
    }

    async fn invoke(&self, ctx: &PortalContext) -> PortalResult<Outcome> {
        let child = capture::spawn_camera().await?;
        ctx.media
            .install(CaptureSession::new(CaptureKind::Camera, child));
        Ok(Outcome::Success("System media stream established.".to_string()))
    }
}

pub struct ScreenPortal;

#[async_trait]
impl Portal for ScreenPortal {
    fn id(&self) -> &'static str {
        "screen"
    }

    async fn probe(&self) -> Probe {
        if os::command_exists("wf-recorder").await {
            Probe::Available
        } else {
            Probe::Unsupported(
                "Display capture unsupported: wf-recorder not installed.".to_string(),
            )
        }
    }

    async fn invoke(&self, ctx: &PortalContext) -> PortalResult<Outcome> {
        let child = capture::spawn_screen_recorder().await?;
        ctx.media
            .install(CaptureSession::new(CaptureKind::Screen, child));
        Ok(Outcome::Success("Screen capture session requested.".to_string()))
    }
}

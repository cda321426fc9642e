//! Long-lived media capture processes.
//!
//! A capture is "established" once its process survives a short startup
//! window; an immediate exit means the device was busy or access was
//! refused. The returned child is parked in the media link slot and killed
//! on release.

use std::path::Path;
use std::process::Stdio;

use tokio::process::{Child, Command};
use tokio::time::{sleep, Duration};

use crate::error::{PortalError, PortalResult};

pub const VIDEO_DEVICE: &str = "/dev/video0";

const STARTUP_WINDOW: Duration = Duration::from_millis(300);

pub fn has_video_device() -> bool {
    Path::new(VIDEO_DEVICE).exists()
}

/// Hold the default video device open through a null-sink ffmpeg pipeline.
pub async fn spawn_camera() -> PortalResult<Child> {
    let child = Command::new("ffmpeg")
        .args([
            "-loglevel",
            "quiet",
            "-f",
            "v4l2",
            "-i",
            VIDEO_DEVICE,
            "-f",
            "null",
            "-",
        ])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    settle(child, "camera").await
}

/// Start a screen grab through wf-recorder.
pub async fn spawn_screen_recorder() -> PortalResult<Child> {
    let target = std::env::temp_dir().join("portal-bridge-screen.mkv");
    let child = Command::new("wf-recorder")
        .arg("--overwrite")
        .arg("-f")
        .arg(&target)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    settle(child, "screen capture").await
}

async fn settle(mut child: Child, what: &str) -> PortalResult<Child> {
    sleep(STARTUP_WINDOW).await;
    match child.try_wait()? {
        None => Ok(child),
        Some(status) => Err(PortalError::PermissionDenied(format!(
            "{what} process exited during startup ({status})"
        ))),
    }
}

//! Thin wrappers over the external desktop tooling the portals shell out
//! to: dialog tools, clipboard utilities, capture pipelines, the GeoClue
//! helper, and device catalogs.
//!
//! Feature probes follow the `which` idiom: a portal is supported when its
//! backing tool is reachable on PATH (or its device node exists).

pub mod capture;
pub mod clipboard;
pub mod desktop;
pub mod devices;
pub mod dialogs;
pub mod geo;

use tokio::process::Command;

use crate::error::{PortalError, PortalResult};

pub async fn command_exists(command: &str) -> bool {
    Command::new("which")
        .arg(command)
        .output()
        .await
        .map(|output| output.status.success())
        .unwrap_or(false)
}

pub async fn run_checked(command: &str, args: &[&str]) -> PortalResult<()> {
    let output = Command::new(command).args(args).output().await?;
    if output.status.success() {
        return Ok(());
    }
    Err(PortalError::OperationFailed(
        String::from_utf8_lossy(&output.stderr).to_string(),
    ))
}

pub async fn run_output(command: &str, args: &[&str]) -> PortalResult<String> {
    let output = Command::new(command).args(args).output().await?;
    if output.status.success() {
        return Ok(String::from_utf8_lossy(&output.stdout).to_string());
    }
    Err(PortalError::OperationFailed(
        String::from_utf8_lossy(&output.stderr).to_string(),
    ))
}

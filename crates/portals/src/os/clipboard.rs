//! System clipboard writes via wl-copy.

use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::{PortalError, PortalResult};

pub async fn copy_text(text: &str) -> PortalResult<()> {
    let mut child = Command::new("wl-copy")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes()).await?;
        stdin.shutdown().await?;
    }

    let status = child.wait().await?;
    if !status.success() {
        return Err(PortalError::OperationFailed(
            "wl-copy exited with failure".to_string(),
        ));
    }
    Ok(())
}

//! Desktop-level facilities: URL handoff, idle inhibitors, fullscreen
//! toggling, the print queue, font enumeration, haptics, and the app badge
//! hint file.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::{Child, Command};
use tokio::time::{sleep, Duration};

use super::{run_checked, run_output};
use crate::error::{PortalError, PortalResult};

fn validate_url(url: &str) -> PortalResult<()> {
    if url.trim().is_empty() {
        return Err(PortalError::InvalidArgument("url cannot be empty".to_string()));
    }
    let lower = url.to_lowercase();
    if !(lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("mailto:")
        || lower.starts_with("file://"))
    {
        return Err(PortalError::InvalidArgument(
            "url must start with http://, https://, mailto:, or file://".to_string(),
        ));
    }
    Ok(())
}

/// Hand a URL to the desktop's opener.
pub async fn open_url(url: &str) -> PortalResult<()> {
    validate_url(url)?;
    Command::new("xdg-open")
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(())
}

/// Hold a systemd idle inhibitor until the returned child is killed.
pub async fn spawn_idle_inhibitor(why: &str) -> PortalResult<Child> {
    let child = Command::new("systemd-inhibit")
        .args(["--what=idle", "--who=portal-bridge"])
        .arg(format!("--why={why}"))
        .args(["sleep", "infinity"])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(child)
}

/// Toggle fullscreen on the currently active window.
pub async fn toggle_fullscreen() -> PortalResult<()> {
    run_checked("wmctrl", &["-r", ":ACTIVE:", "-b", "toggle,fullscreen"]).await
}

/// The configured default print destination, if any.
pub async fn printer_destination() -> PortalResult<Option<String>> {
    let output = run_output("lpstat", &["-d"]).await?;
    Ok(parse_printer_destination(&output))
}

pub fn parse_printer_destination(output: &str) -> Option<String> {
    for line in output.lines() {
        if let Some(dest) = line.trim().strip_prefix("system default destination:") {
            let dest = dest.trim();
            if !dest.is_empty() {
                return Some(dest.to_string());
            }
        }
    }
    None
}

/// Count installed font faces through fontconfig.
pub async fn count_fonts() -> PortalResult<usize> {
    let output = run_output("fc-list", &[]).await?;
    Ok(output.lines().filter(|line| !line.trim().is_empty()).count())
}

/// Terminal-bell haptic: one bell per active phase of the pattern, paused
/// through the rest phases in between.
pub async fn haptic_pulse(pattern_ms: &[u64]) -> PortalResult<()> {
    use std::io::Write;

    for (index, duration) in pattern_ms.iter().enumerate() {
        if index % 2 == 0 {
            let mut stdout = std::io::stdout();
            stdout.write_all(b"\x07")?;
            stdout.flush()?;
        }
        sleep(Duration::from_millis(*duration)).await;
    }
    Ok(())
}

/// Where the unread-count badge hint lives for the desktop shell to read.
pub fn badge_path() -> PathBuf {
    std::env::var_os("XDG_RUNTIME_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
        .join("portal-bridge.badge")
}

pub async fn set_badge(count: u32) -> PortalResult<()> {
    tokio::fs::write(badge_path(), count.to_string()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printer_destination_parses_lpstat_output() {
        assert_eq!(
            parse_printer_destination("system default destination: Office_Laser\n"),
            Some("Office_Laser".to_string())
        );
        assert_eq!(
            parse_printer_destination("no system default destination\n"),
            None
        );
        assert_eq!(parse_printer_destination(""), None);
    }

    #[tokio::test]
    async fn open_url_rejects_unknown_schemes() {
        let err = open_url("javascript:alert(1)").await.unwrap_err();
        assert!(matches!(err, PortalError::InvalidArgument(_)));
        let err = open_url("").await.unwrap_err();
        assert!(matches!(err, PortalError::InvalidArgument(_)));
    }
}

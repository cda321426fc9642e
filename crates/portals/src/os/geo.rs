//! GeoClue bridge.
//!
//! The location daemon is reached through its `where-am-i` demo helper,
//! whose line-oriented output is the closest thing to the callback pair a
//! geolocation API exposes. The handler adapts it into the awaited outcome
//! contract via the single-resolution adapter.

use std::path::{Path, PathBuf};

use tokio::process::Command;

/// Install locations of the GeoClue helper across distributions.
const HELPER_PATHS: [&str; 2] = [
    "/usr/lib/geoclue-2.0/demos/where-am-i",
    "/usr/libexec/geoclue-2.0/demos/where-am-i",
];

const FIX_TIMEOUT_SECS: &str = "10";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoFix {
    pub latitude: f64,
    pub longitude: f64,
}

pub fn helper_path() -> Option<PathBuf> {
    HELPER_PATHS
        .iter()
        .map(Path::new)
        .find(|path| path.exists())
        .map(Path::to_path_buf)
}

/// Parse the helper's output into a fix. Returns None until both
/// coordinates have been seen.
pub fn parse_fix(output: &str) -> Option<GeoFix> {
    let mut latitude = None;
    let mut longitude = None;
    for line in output.lines() {
        let line = line.trim();
        if let Some(value) = line.strip_prefix("Latitude:") {
            latitude = parse_coordinate(value);
        } else if let Some(value) = line.strip_prefix("Longitude:") {
            longitude = parse_coordinate(value);
        }
    }
    Some(GeoFix {
        latitude: latitude?,
        longitude: longitude?,
    })
}

fn parse_coordinate(value: &str) -> Option<f64> {
    value.trim().trim_end_matches('°').trim().parse().ok()
}

/// Whether the helper's stderr describes a user or agent denial rather
/// than a transient failure.
pub fn is_denial(stderr: &str) -> bool {
    let lower = stderr.to_lowercase();
    lower.contains("denied") || lower.contains("not authorized") || lower.contains("agent")
}

/// Run the helper once. The error side carries the platform's own message,
/// mirroring a geolocation error callback.
pub async fn query_fix(helper: &Path) -> Result<GeoFix, String> {
    let output = Command::new(helper)
        .args(["-t", FIX_TIMEOUT_SECS, "-a", "8"])
        .output()
        .await
        .map_err(|err| err.to_string())?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    if let Some(fix) = parse_fix(&stdout) {
        return Ok(fix);
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let message = stderr.trim();
    if message.is_empty() {
        Err("no position fix received".to_string())
    } else {
        Err(message.to_string())
    }
}

//! Ambient signal sources: battery from sysfs, memory via sysinfo, and
//! connectivity from the kernel routing table.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use portal_bridge_core::BatteryStatus;
use sysinfo::System;
use tokio::fs;
use tokio::task;
use tracing::debug;

/// Signal source behind the monitor, substitutable with a fake in tests.
#[async_trait]
pub trait StatusProbe: Send + Sync {
    async fn battery(&self) -> Option<BatteryStatus>;

    async fn online(&self) -> bool;

    /// Static signal; the monitor samples it once at start.
    async fn memory_gb(&self) -> Option<f64>;
}

/// The real probe, reading the Linux surfaces directly.
pub struct SysfsProbe {
    power_supply_root: PathBuf,
    route_table: PathBuf,
}

impl SysfsProbe {
    pub fn new() -> Self {
        Self {
            power_supply_root: PathBuf::from("/sys/class/power_supply"),
            route_table: PathBuf::from("/proc/net/route"),
        }
    }
}

impl Default for SysfsProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatusProbe for SysfsProbe {
    async fn battery(&self) -> Option<BatteryStatus> {
        match read_battery(&self.power_supply_root).await {
            Ok(battery) => battery,
            Err(err) => {
                debug!(error = %err, "battery read failed");
                None
            }
        }
    }

    async fn online(&self) -> bool {
        match fs::read_to_string(&self.route_table).await {
            Ok(routes) => has_default_route(&routes),
            Err(_) => false,
        }
    }

    async fn memory_gb(&self) -> Option<f64> {
        task::spawn_blocking(|| {
            let mut system = System::new();
            system.refresh_memory();
            let total = system.total_memory();
            if total == 0 {
                None
            } else {
                Some(round_gb(total))
            }
        })
        .await
        .ok()
        .flatten()
    }
}

async fn read_battery(root: &Path) -> std::io::Result<Option<BatteryStatus>> {
    let mut entries = fs::read_dir(root).await?;
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().to_string();
        if !name.starts_with("BAT") {
            continue;
        }
        let Ok(raw_capacity) = fs::read_to_string(entry.path().join("capacity")).await else {
            continue;
        };
        let Some(level) = parse_capacity(&raw_capacity) else {
            continue;
        };
        let charging = fs::read_to_string(entry.path().join("status"))
            .await
            .map(|raw| parse_charging(&raw))
            .unwrap_or(false);
        return Ok(Some(BatteryStatus { level, charging }));
    }
    Ok(None)
}

pub(crate) fn parse_capacity(raw: &str) -> Option<u8> {
    raw.trim().parse::<u8>().ok().map(|level| level.min(100))
}

/// sysfs reports Charging/Discharging/Full/Not charging/Unknown. Full on
/// wall power counts as charging for the readout.
pub(crate) fn parse_charging(raw: &str) -> bool {
    matches!(raw.trim(), "Charging" | "Full")
}

/// A default route (destination 00000000) in /proc/net/route means some
/// interface can reach beyond the local machine.
pub(crate) fn has_default_route(route_table: &str) -> bool {
    route_table.lines().skip(1).any(|line| {
        let mut fields = line.split_whitespace();
        let _interface = fields.next();
        matches!(fields.next(), Some("00000000"))
    })
}

fn round_gb(bytes: u64) -> f64 {
    let gb = bytes as f64 / (1024.0 * 1024.0 * 1024.0);
    (gb * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_parses_and_clamps() {
        assert_eq!(parse_capacity("87\n"), Some(87));
        assert_eq!(parse_capacity("120"), Some(100));
        assert_eq!(parse_capacity("garbage"), None);
    }

    #[test]
    fn charging_states() {
        assert!(parse_charging("Charging\n"));
        assert!(parse_charging("Full"));
        assert!(!parse_charging("Discharging"));
        assert!(!parse_charging("Not charging"));
    }

    #[test]
    fn default_route_detection() {
        let table = "Iface\tDestination\tGateway\n\
                     wlan0\t00000000\t0102A8C0\n\
                     wlan0\t0002A8C0\t00000000\n";
        assert!(has_default_route(table));

        let local_only = "Iface\tDestination\tGateway\n\
                          wlan0\t0002A8C0\t00000000\n";
        assert!(!has_default_route(local_only));
        assert!(!has_default_route(""));
    }

    #[tokio::test]
    async fn battery_reads_sysfs_layout() {
        let dir = tempfile::tempdir().unwrap();
        let bat = dir.path().join("BAT0");
        tokio::fs::create_dir(&bat).await.unwrap();
        tokio::fs::write(bat.join("capacity"), "73\n").await.unwrap();
        tokio::fs::write(bat.join("status"), "Charging\n").await.unwrap();
        // An AC adapter entry must be skipped.
        tokio::fs::create_dir(dir.path().join("AC")).await.unwrap();

        let battery = read_battery(dir.path()).await.unwrap().unwrap();
        assert_eq!(battery.level, 73);
        assert!(battery.charging);
    }

    #[tokio::test]
    async fn no_battery_directory_means_absent() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_battery(dir.path()).await.unwrap(), None);
    }
}

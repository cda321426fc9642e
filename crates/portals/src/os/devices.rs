//! Device catalogs for the picker portals: USB from sysfs, Bluetooth from
//! bluetoothctl, contacts from the local address book.

use std::path::{Path, PathBuf};

use tokio::fs;

use super::{run_checked, run_output};
use crate::error::{PortalError, PortalResult};

pub const USB_SYSFS_ROOT: &str = "/sys/bus/usb/devices";

const BLUETOOTH_SCAN_SECS: &str = "5";

/// USB devices with a vendor id, labelled for the picker. Interfaces and
/// root hubs without an `idVendor` file are skipped.
pub async fn usb_devices(root: &Path) -> PortalResult<Vec<String>> {
    let mut devices = Vec::new();
    let mut entries = fs::read_dir(root).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let vendor = match fs::read_to_string(path.join("idVendor")).await {
            Ok(raw) => raw.trim().to_string(),
            Err(_) => continue,
        };
        let product_id = fs::read_to_string(path.join("idProduct"))
            .await
            .map(|raw| raw.trim().to_string())
            .unwrap_or_default();
        let label = match fs::read_to_string(path.join("product")).await {
            Ok(name) => format!("{} [{vendor}:{product_id}]", name.trim()),
            Err(_) => format!("USB device [{vendor}:{product_id}]"),
        };
        devices.push(label);
    }
    devices.sort();
    Ok(devices)
}

pub async fn bluetooth_adapter_present() -> bool {
    match run_output("bluetoothctl", &["list"]).await {
        Ok(output) => !output.trim().is_empty(),
        Err(_) => false,
    }
}

/// Known and freshly visible devices. A short scan window runs first so
/// nearby devices show up in the listing.
pub async fn bluetooth_devices() -> PortalResult<Vec<String>> {
    let _ = run_checked("bluetoothctl", &["--timeout", BLUETOOTH_SCAN_SECS, "scan", "on"]).await;
    let output = run_output("bluetoothctl", &["devices"]).await?;
    Ok(parse_bluetooth_devices(&output))
}

/// Parse `bluetoothctl devices` lines ("Device <addr> <name>").
pub fn parse_bluetooth_devices(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| {
            let rest = line.trim().strip_prefix("Device ")?;
            let (address, name) = rest.split_once(' ')?;
            Some(format!("{name} ({address})"))
        })
        .collect()
}

/// The local address book: one contact per line, `#` comments allowed.
pub fn contacts_book_path() -> PathBuf {
    std::env::var_os("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".local/share"))
        })
        .unwrap_or_else(|| PathBuf::from("."))
        .join("portal-bridge/contacts")
}

pub async fn load_contacts(path: &Path) -> PortalResult<Vec<String>> {
    let raw = fs::read_to_string(path)
        .await
        .map_err(|_| PortalError::NotFound(format!("no address book at {}", path.display())))?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bluetooth_listing_parses() {
        let output = "Device AA:BB:CC:DD:EE:FF Keyboard K380\nDevice 11:22:33:44:55:66 Buds\n";
        let devices = parse_bluetooth_devices(output);
        assert_eq!(
            devices,
            vec![
                "Keyboard K380 (AA:BB:CC:DD:EE:FF)".to_string(),
                "Buds (11:22:33:44:55:66)".to_string(),
            ]
        );
    }

    #[test]
    fn bluetooth_listing_ignores_noise() {
        assert!(parse_bluetooth_devices("No default controller available\n").is_empty());
        assert!(parse_bluetooth_devices("").is_empty());
    }

    #[tokio::test]
    async fn contacts_skip_comments_and_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let book = dir.path().join("contacts");
        tokio::fs::write(&book, "# address book\nAda <ada@example.org>\n\nGrace <grace@example.org>\n")
            .await
            .unwrap();
        let contacts = load_contacts(&book).await.unwrap();
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0], "Ada <ada@example.org>");
    }

    #[tokio::test]
    async fn usb_enumeration_reads_sysfs_layout() {
        let dir = tempfile::tempdir().unwrap();
        let dev = dir.path().join("1-1");
        tokio::fs::create_dir(&dev).await.unwrap();
        tokio::fs::write(dev.join("idVendor"), "046d\n").await.unwrap();
        tokio::fs::write(dev.join("idProduct"), "c52b\n").await.unwrap();
        tokio::fs::write(dev.join("product"), "USB Receiver\n").await.unwrap();
        // An interface directory without idVendor must be skipped.
        tokio::fs::create_dir(dir.path().join("1-1:1.0")).await.unwrap();

        let devices = usb_devices(dir.path()).await.unwrap();
        assert_eq!(devices, vec!["USB Receiver [046d:c52b]".to_string()]);
    }
}

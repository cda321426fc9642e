//! Device picker portals: contacts, Bluetooth, USB.
//!
//! These are the multi-phase handlers: each records an "awaiting" entry
//! before the system selector opens, then reports the selection (or the
//! dismissal non-event).

use std::path::Path;

use async_trait::async_trait;
use portal_bridge_core::Outcome;

use crate::error::{PortalError, PortalResult};
use crate::os::dialogs::DialogChoice;
use crate::os::{self, devices, dialogs};
use crate::traits::{Portal, PortalContext, Probe};

pub struct ContactPortal;

#[async_trait]
impl Portal for ContactPortal {
    fn id(&self) -> &'static str {
        "contact"
    }

    async fn probe(&self) -> Probe {
        if !os::command_exists("zenity").await {
            return Probe::Unsupported("Contact Picker API unsupported.".to_string());
        }
        if !devices::contacts_book_path().exists() {
            return Probe::Unsupported(
                "Contact Picker API unsupported: no local address book.".to_string(),
            );
        }
        Probe::Available
    }

    async fn invoke(&self, _ctx: &PortalContext) -> PortalResult<Outcome> {
        let contacts = devices::load_contacts(&devices::contacts_book_path()).await?;
        if contacts.is_empty() {
            return Err(PortalError::NotFound("address book is empty".to_string()));
        }
        match dialogs::pick_from_list("Contact Picker", "Contact", &contacts).await? {
            DialogChoice::Selected(_) => Ok(Outcome::Success("Contacts selected: 1".to_string())),
            DialogChoice::Dismissed => Ok(Outcome::Cancelled),
        }
    }
}

pub struct BluetoothPortal;

#[async_trait]
impl Portal for BluetoothPortal {
    fn id(&self) -> &'static str {
        "bluetooth"
    }

    async fn probe(&self) -> Probe {
        if !os::command_exists("bluetoothctl").await {
            return Probe::Unsupported("Web Bluetooth API unsupported.".to_string());
        }
        if !devices::bluetooth_adapter_present().await {
            return Probe::Unsupported(
                "Web Bluetooth API unsupported: no adapter available.".to_string(),
            );
        }
        Probe::Available
    }

    async fn invoke(&self, ctx: &PortalContext) -> PortalResult<Outcome> {
        ctx.log.append("Awaiting Bluetooth system dialog...");
        let visible = devices::bluetooth_devices().await?;
        if visible.is_empty() {
            return Err(PortalError::NotFound("no bluetooth devices visible".to_string()));
        }
        match dialogs::pick_from_list("Bluetooth Bridge", "Device", &visible).await? {
            DialogChoice::Selected(device) => Ok(Outcome::Success(format!(
                "Bluetooth device paired: {device}."
            ))),
            DialogChoice::Dismissed => Ok(Outcome::Cancelled),
        }
    }
}

pub struct UsbPortal;

#[async_trait]
impl Portal for UsbPortal {
    fn id(&self) -> &'static str {
        "usb"
    }

    async fn probe(&self) -> Probe {
        if !Path::new(devices::USB_SYSFS_ROOT).exists() {
            return Probe::Unsupported("Web USB API unsupported.".to_string());
        }
        if !os::command_exists("zenity").await {
            return Probe::Unsupported(
                "Web USB API unsupported: no device selector available.".to_string(),
            );
        }
        Probe::Available
    }

    async fn invoke(&self, ctx: &PortalContext) -> PortalResult<Outcome> {
        ctx.log.append("Awaiting USB device selector...");
        let attached = devices::usb_devices(Path::new(devices::USB_SYSFS_ROOT)).await?;
        if attached.is_empty() {
            return Err(PortalError::NotFound("no usb devices attached".to_string()));
        }
        match dialogs::pick_from_list("USB Portal", "Device", &attached).await? {
            DialogChoice::Selected(device) => {
                Ok(Outcome::Success(format!("USB device linked: {device}.")))
            }
            DialogChoice::Dismissed => Ok(Outcome::Cancelled),
        }
    }
}

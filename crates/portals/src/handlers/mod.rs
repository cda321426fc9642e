//! Builtin portal handlers, one per catalog capability.

pub mod desktop;
pub mod devices;
pub mod files;
pub mod geo;
pub mod media;
pub mod notify;

use std::sync::Arc;

use crate::traits::Portal;

/// The full builtin handler set, in catalog order.
pub fn builtin() -> Vec<Arc<dyn Portal>> {
    vec![
        Arc::new(files::FilePortal),
        Arc::new(files::FsOpenPortal),
        Arc::new(files::FolderPortal),
        Arc::new(files::FolderLegacyPortal),
        Arc::new(files::SavePortal),
        Arc::new(media::CameraPortal),
        Arc::new(notify::NotificationPortal),
        Arc::new(geo::LocationPortal),
        Arc::new(desktop::SharePortal),
        Arc::new(desktop::WakeLockPortal::new()),
        Arc::new(desktop::FullscreenPortal),
        Arc::new(notify::BadgePortal),
        Arc::new(desktop::ClipboardPortal),
        Arc::new(media::ScreenPortal),
        Arc::new(notify::VibrationPortal),
        Arc::new(devices::ContactPortal),
        Arc::new(devices::BluetoothPortal),
        Arc::new(devices::UsbPortal),
        Arc::new(desktop::EyeDropperPortal),
        Arc::new(desktop::PrintPortal),
        Arc::new(desktop::FontsPortal),
    ]
}

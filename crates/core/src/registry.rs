use std::collections::HashSet;

use thiserror::Error;

use crate::types::CapabilityDescriptor;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("duplicate capability id: {0}")]
    DuplicateId(String),
}

/// Ordered, immutable capability catalog. Insertion order defines both the
/// display order and the iteration order used by the diagnostic sequencer.
#[derive(Debug)]
pub struct CapabilityRegistry {
    entries: Vec<CapabilityDescriptor>,
}

impl CapabilityRegistry {
    /// Build a registry, rejecting duplicate ids up front so a catalog typo
    /// surfaces at startup rather than at dispatch time.
    pub fn from_entries(entries: Vec<CapabilityDescriptor>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.id.clone()) {
                return Err(RegistryError::DuplicateId(entry.id.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// The full stock catalog of bridge portals.
    pub fn builtin() -> Self {
        let entries = vec![
            CapabilityDescriptor::new("file", "File Portal", "Trigger the system file selection dialog.", "fa-solid fa-folder-open", "bg-blue-500"),
            CapabilityDescriptor::new("fs_open", "File Access API", "Modern fs-access file picker.", "fa-regular fa-folder-open", "bg-blue-400"),
            CapabilityDescriptor::new("folder", "Folder Portal", "Access local directory structure.", "fa-solid fa-folder-tree", "bg-emerald-600"),
            CapabilityDescriptor::new("folder_legacy", "Legacy Folder", "Standard input directory picker.", "fa-regular fa-folder", "bg-emerald-700"),
            CapabilityDescriptor::new("save", "Save Portal", "Trigger system save file dialog.", "fa-solid fa-floppy-disk", "bg-teal-500"),
            CapabilityDescriptor::new("camera", "Media Portal", "Request access to camera/microphone systems.", "fa-solid fa-camera", "bg-emerald-500"),
            CapabilityDescriptor::new("notification", "Notification Portal", "Trigger a system-level desktop notification.", "fa-solid fa-bell", "bg-amber-500"),
            CapabilityDescriptor::new("location", "Geo Portal", "Bridge to the system GPS/location daemon.", "fa-solid fa-location-dot", "bg-rose-500"),
            CapabilityDescriptor::new("share", "Web Share", "Trigger the OS-native sharing sheet.", "fa-solid fa-share-nodes", "bg-indigo-500"),
            CapabilityDescriptor::new("wakelock", "Wake Lock", "Prevent system display sleep.", "fa-solid fa-lightbulb", "bg-yellow-400"),
            CapabilityDescriptor::new("fullscreen", "Fullscreen", "Toggle system fullscreen mode.", "fa-solid fa-expand", "bg-gray-600"),
            CapabilityDescriptor::new("badge", "Badge Portal", "Set application icon badge.", "fa-solid fa-certificate", "bg-red-600"),
            CapabilityDescriptor::new("clipboard", "Clipboard Portal", "Intervene with the system clipboard.", "fa-solid fa-clipboard", "bg-cyan-500"),
            CapabilityDescriptor::new("screen", "Display Capture", "Request permission to capture system windows.", "fa-solid fa-display", "bg-purple-500"),
            CapabilityDescriptor::new("vibration", "Haptic Portal", "Trigger hardware vibration feedback.", "fa-solid fa-mobile-screen", "bg-orange-500"),
            CapabilityDescriptor::new("contact", "Contact Picker", "Access the native system contact list.", "fa-solid fa-address-book", "bg-yellow-600"),
            CapabilityDescriptor::new("bluetooth", "Bluetooth Bridge", "Trigger the system device pairing dialog.", "fa-brands fa-bluetooth-b", "bg-blue-600"),
            CapabilityDescriptor::new("usb", "USB Portal", "Request access to system USB hardware.", "fa-solid fa-usb", "bg-slate-500"),
            CapabilityDescriptor::new("eyedropper", "Eye Dropper", "Trigger system-level color magnifier/picker.", "fa-solid fa-eye-dropper", "bg-pink-500"),
            CapabilityDescriptor::new("print", "Print Dialog", "Open the native OS print settings.", "fa-solid fa-print", "bg-gray-400"),
            CapabilityDescriptor::new("fonts", "Local Fonts", "Request permission for local system fonts.", "fa-solid fa-font", "bg-lime-500"),
        ];
        // The stock catalog has no duplicates; a panic here would mean the
        // catalog itself was edited into an invalid state.
        match Self::from_entries(entries) {
            Ok(registry) => registry,
            Err(RegistryError::DuplicateId(id)) => {
                unreachable!("builtin catalog contains duplicate id {id}")
            }
        }
    }

    pub fn list(&self) -> &[CapabilityDescriptor] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&CapabilityDescriptor> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid_and_ordered() {
        let registry = CapabilityRegistry::builtin();
        assert_eq!(registry.len(), 21);
        assert_eq!(registry.list()[0].id, "file");
        assert_eq!(registry.list()[20].id, "fonts");
        assert!(registry.get("clipboard").is_some());
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn duplicate_ids_rejected_at_construction() {
        let entries = vec![
            CapabilityDescriptor::new("a", "A", "", "", ""),
            CapabilityDescriptor::new("b", "B", "", "", ""),
            CapabilityDescriptor::new("a", "A again", "", "", ""),
        ];
        let err = CapabilityRegistry::from_entries(entries).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn order_is_preserved() {
        let entries = vec![
            CapabilityDescriptor::new("z", "Z", "", "", ""),
            CapabilityDescriptor::new("a", "A", "", "", ""),
        ];
        let registry = CapabilityRegistry::from_entries(entries).unwrap();
        let ids: Vec<&str> = registry.list().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a"]);
    }
}

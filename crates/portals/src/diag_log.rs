use std::collections::VecDeque;

use parking_lot::Mutex;
use portal_bridge_core::LogEntry;

/// Hard bound on retained entries. Fixed, not configurable.
pub const LOG_CAPACITY: usize = 50;

/// Append-only, size-bounded diagnostics console.
///
/// Entries are stored newest-first; appending past the bound silently
/// evicts the oldest entry. Entries are plain text only; severity is
/// derived on inspection, never stored.
pub struct DiagnosticsLog {
    entries: Mutex<VecDeque<LogEntry>>,
}

impl DiagnosticsLog {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(LOG_CAPACITY + 1)),
        }
    }

    pub fn append(&self, text: impl Into<String>) {
        let mut entries = self.entries.lock();
        entries.push_front(LogEntry::new(text.into()));
        entries.truncate(LOG_CAPACITY);
    }

    /// Empty the log wholesale. There is no undo.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Snapshot of the current entries, newest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().iter().cloned().collect()
    }

    pub fn newest(&self) -> Option<LogEntry> {
        self.entries.lock().front().cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Default for DiagnosticsLog {
    fn default() -> Self {
        Self::new()
    }
}

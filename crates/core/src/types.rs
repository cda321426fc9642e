use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry in the capability catalog. Immutable after startup; the `icon`
/// and `color` fields are presentation tokens carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityDescriptor {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
}

impl CapabilityDescriptor {
    pub fn new(id: &str, name: &str, description: &str, icon: &str, color: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
        }
    }
}

/// Normalized result of a portal invocation.
///
/// `Cancelled` is the dismissed-picker case: a non-event that carries no
/// message and forces no diagnostics entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Success(String),
    Unsupported(String),
    Denied(String),
    Failed(String),
    Cancelled,
}

impl Outcome {
    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Success(msg)
            | Outcome::Unsupported(msg)
            | Outcome::Denied(msg)
            | Outcome::Failed(msg) => Some(msg),
            Outcome::Cancelled => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Success(_) => "success",
            Outcome::Unsupported(_) => "unsupported",
            Outcome::Denied(_) => "denied",
            Outcome::Failed(_) => "failed",
            Outcome::Cancelled => "cancelled",
        }
    }
}

/// Battery readout, percent level plus charging flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatteryStatus {
    pub level: u8,
    pub charging: bool,
}

/// Ambient platform snapshot published by the status monitor.
///
/// Fields are `None` when the underlying signal is unavailable on this
/// system. They are never defaulted to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub online: bool,
    pub battery: Option<BatteryStatus>,
    pub memory_gb: Option<f64>,
}

impl Default for SystemStatus {
    fn default() -> Self {
        Self {
            online: false,
            battery: None,
            memory_gb: None,
        }
    }
}

/// Styling class derived from an entry's text. The log stores plain text
/// only; severity is a presentation concern recomputed on inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Error,
    Marker,
}

/// A single timestamped diagnostics line. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub text: String,
}

impl LogEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            text: text.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        let lower = self.text.to_lowercase();
        if lower.contains("error") || lower.contains("unsupported") {
            Severity::Error
        } else if self.text.contains("---") {
            Severity::Marker
        } else {
            Severity::Normal
        }
    }
}

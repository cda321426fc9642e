//! Core data model for the portal bridge: capability descriptors, the
//! capability registry, the outcome taxonomy, status snapshots, and
//! diagnostics log entries.
//!
//! This crate is pure data. No I/O, no async, no platform calls.

pub mod registry;
pub mod types;

pub use registry::{CapabilityRegistry, RegistryError};
pub use types::{BatteryStatus, CapabilityDescriptor, LogEntry, Outcome, Severity, SystemStatus};

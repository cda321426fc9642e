//! Passive system status monitor.
//!
//! Observes ambient platform signals (connectivity, battery, device
//! memory) and republishes them as immutable snapshots on a watch channel,
//! only when something actually changed. Signals the platform does not
//! expose stay absent in the snapshot; nothing is ever fabricated.

pub mod monitor;
pub mod probe;

pub use monitor::{StatusMonitor, DEFAULT_SAMPLE_INTERVAL};
pub use probe::{StatusProbe, SysfsProbe};

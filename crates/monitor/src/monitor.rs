use std::sync::Arc;

use parking_lot::Mutex;
use portal_bridge_core::SystemStatus;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::debug;

use crate::probe::StatusProbe;

pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_secs(5);

/// Process-wide status observer with an explicit start/stop lifecycle.
///
/// `start` spawns the sampling task and takes the one-shot reading of the
/// static signals; `stop` aborts it so no listener leaks across the owner's
/// lifetime. Snapshots go out over a watch channel, and only when they
/// differ from the previous one.
pub struct StatusMonitor {
    probe: Arc<dyn StatusProbe>,
    interval: Duration,
    tx: watch::Sender<SystemStatus>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl StatusMonitor {
    pub fn new(probe: Arc<dyn StatusProbe>) -> Self {
        Self::with_interval(probe, DEFAULT_SAMPLE_INTERVAL)
    }

    pub fn with_interval(probe: Arc<dyn StatusProbe>, interval: Duration) -> Self {
        let (tx, _rx) = watch::channel(SystemStatus::default());
        Self {
            probe,
            interval,
            tx,
            task: Mutex::new(None),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SystemStatus> {
        self.tx.subscribe()
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> SystemStatus {
        self.tx.borrow().clone()
    }

    /// Begin sampling. Calling start on a running monitor restarts it.
    pub fn start(&self) {
        self.stop();
        let probe = Arc::clone(&self.probe);
        let tx = self.tx.clone();
        let interval = self.interval;
        let handle = tokio::spawn(async move {
            let memory_gb = probe.memory_gb().await;
            let mut last = tx.borrow().clone();
            loop {
                let status = SystemStatus {
                    online: probe.online().await,
                    battery: probe.battery().await,
                    memory_gb,
                };
                if status != last {
                    debug!(?status, "system status changed");
                    last = status.clone();
                    tx.send_replace(status);
                }
                sleep(interval).await;
            }
        });
        *self.task.lock() = Some(handle);
    }

    /// Stop sampling and unsubscribe from the platform.
    pub fn stop(&self) {
        if let Some(handle) = self.task.lock().take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.lock().is_some()
    }
}

impl Drop for StatusMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use portal_bridge_core::BatteryStatus;
    use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
    use tokio::time::timeout;

    /// Battery drains by one percent per sample; memory readings change on
    /// every call so single-sampling is observable.
    struct DrainingProbe {
        level: AtomicU8,
        memory_reads: AtomicUsize,
    }

    impl DrainingProbe {
        fn new() -> Self {
            Self {
                level: AtomicU8::new(90),
                memory_reads: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl StatusProbe for DrainingProbe {
        async fn battery(&self) -> Option<BatteryStatus> {
            let level = self.level.fetch_sub(1, Ordering::SeqCst);
            Some(BatteryStatus {
                level,
                charging: false,
            })
        }

        async fn online(&self) -> bool {
            true
        }

        async fn memory_gb(&self) -> Option<f64> {
            let reads = self.memory_reads.fetch_add(1, Ordering::SeqCst);
            Some(8.0 + reads as f64)
        }
    }

    struct SteadyProbe;

    #[async_trait]
    impl StatusProbe for SteadyProbe {
        async fn battery(&self) -> Option<BatteryStatus> {
            None
        }

        async fn online(&self) -> bool {
            false
        }

        async fn memory_gb(&self) -> Option<f64> {
            None
        }
    }

    #[tokio::test]
    async fn publishes_changed_snapshots_and_samples_memory_once() {
        let monitor = StatusMonitor::with_interval(
            Arc::new(DrainingProbe::new()),
            Duration::from_millis(5),
        );
        let mut rx = monitor.subscribe();
        monitor.start();

        rx.changed().await.unwrap();
        let first = rx.borrow_and_update().clone();
        rx.changed().await.unwrap();
        let second = rx.borrow_and_update().clone();
        monitor.stop();

        assert_ne!(first.battery, second.battery);
        // Device memory is a static signal: read once at start, carried
        // through every later snapshot.
        assert_eq!(first.memory_gb, Some(8.0));
        assert_eq!(second.memory_gb, Some(8.0));
        assert!(first.online && second.online);
    }

    #[tokio::test]
    async fn unchanged_snapshots_are_not_republished() {
        let monitor =
            StatusMonitor::with_interval(Arc::new(SteadyProbe), Duration::from_millis(5));
        let mut rx = monitor.subscribe();
        monitor.start();

        // SteadyProbe matches the channel's initial default snapshot, so no
        // change notification may ever arrive.
        let result = timeout(Duration::from_millis(50), rx.changed()).await;
        assert!(result.is_err(), "steady signals must not be republished");
        monitor.stop();
        assert!(!monitor.is_running());
    }

    #[tokio::test]
    async fn stop_halts_sampling() {
        let monitor = StatusMonitor::with_interval(
            Arc::new(DrainingProbe::new()),
            Duration::from_millis(5),
        );
        let mut rx = monitor.subscribe();
        monitor.start();
        rx.changed().await.unwrap();
        rx.borrow_and_update();
        monitor.stop();

        let result = timeout(Duration::from_millis(50), rx.changed()).await;
        assert!(result.is_err(), "no snapshots after stop");
    }
}

//! Single-resolution adapter for callback-shaped platform sources.
//!
//! Geolocation-style facilities report through success/error callbacks that
//! may, in pathological cases, fire more than once. The adapter folds both
//! paths into one awaited value: the first resolution wins, later ones are
//! dropped, so the caller observes exactly one result.

use parking_lot::Mutex;
use tokio::sync::oneshot;

pub struct Resolver<T> {
    tx: Mutex<Option<oneshot::Sender<T>>>,
}

impl<T> Resolver<T> {
    /// Deliver a value. Returns false when a resolution already happened or
    /// the awaiting side went away.
    pub fn resolve(&self, value: T) -> bool {
        match self.tx.lock().take() {
            Some(tx) => tx.send(value).is_ok(),
            None => false,
        }
    }
}

/// Build a resolver plus the receiver the caller awaits.
pub fn single_resolution<T>() -> (Resolver<T>, oneshot::Receiver<T>) {
    let (tx, rx) = oneshot::channel();
    (
        Resolver {
            tx: Mutex::new(Some(tx)),
        },
        rx,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_resolution_wins() {
        let (resolver, rx) = single_resolution::<Result<u32, String>>();
        assert!(resolver.resolve(Ok(7)));
        assert!(!resolver.resolve(Err("late error".into())));
        assert_eq!(rx.await.unwrap(), Ok(7));
    }

    #[tokio::test]
    async fn resolve_after_receiver_dropped_is_rejected() {
        let (resolver, rx) = single_resolution::<u32>();
        drop(rx);
        assert!(!resolver.resolve(1));
    }
}

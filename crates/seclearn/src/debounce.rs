//! Trailing-edge debouncing for search input.
//!
//! Each [`Debouncer::trigger`] cancels the pending delivery, if any, and
//! schedules a new one. Only the last value of a burst reaches the
//! receiver, `delay` after the burst ends.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

/// Default quiet period before a search is applied.
pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(220);

/// Delivers the last of a burst of values after a quiet period.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    tx: mpsc::Sender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer and the receiver its values arrive on.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(delay: Duration) -> (Self, mpsc::Receiver<T>) {
        let (tx, rx) = mpsc::channel(16);
        (
            Self {
                delay,
                tx,
                pending: None,
            },
            rx,
        )
    }

    /// The configured quiet period.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `value`, replacing any value still waiting.
    pub fn trigger(&mut self, value: T) {
        if self.cancel() {
            trace!("Superseded pending debounced value");
        }
        let tx = self.tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // A closed receiver just means nobody is listening any more.
            let _ = tx.send(value).await;
        }));
    }

    /// Drop the waiting value, if any. Returns whether one was cancelled.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    /// Whether a value is still waiting to be delivered.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_only_last_value_delivered() {
        let (mut debouncer, mut rx) = Debouncer::new(DEFAULT_SEARCH_DELAY);
        debouncer.trigger("l");
        debouncer.trigger("lo");
        debouncer.trigger("log");
        assert!(debouncer.is_pending());

        let value = rx.recv().await.unwrap();
        assert_eq!(value, "log");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_quiet_period() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(100));
        debouncer.trigger(1);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(rx.try_recv().is_err());
        debouncer.trigger(2);

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(rx.try_recv().unwrap(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(10));
        debouncer.trigger("x");
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(rx.try_recv().is_err());
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_each_deliver() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(10));
        debouncer.trigger("a");
        assert_eq!(rx.recv().await.unwrap(), "a");
        debouncer.trigger("b");
        assert_eq!(rx.recv().await.unwrap(), "b");
        assert_eq!(debouncer.delay(), Duration::from_millis(10));
    }
}

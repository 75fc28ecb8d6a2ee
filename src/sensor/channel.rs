//! Bounded channels between the samplers and the transmitter
//!
//! Every operation carries a timeout. A send that cannot find room in time
//! drops the value; a receive that finds nothing in time leaves the caller's
//! previous value in place.

use log::{debug, warn};
use tokio::sync::mpsc::{self, error::SendTimeoutError};
use tokio::time::{timeout, Duration};

/// Slots per channel
pub const CHANNEL_CAPACITY: usize = 20;

/// Create a named bounded channel carrying scalar readings
pub fn bounded(name: &'static str, capacity: usize) -> (ReadingSender, ReadingReceiver) {
    let (tx, rx) = mpsc::channel(capacity);
    (ReadingSender { name, tx }, ReadingReceiver { name, rx })
}

#[derive(Debug, Clone)]
pub struct ReadingSender {
    name: &'static str,
    tx: mpsc::Sender<f32>,
}

impl ReadingSender {
    /// Enqueue `value`, waiting at most `wait` for a free slot
    ///
    /// Returns false when the value was dropped.
    pub async fn offer(&self, value: f32, wait: Duration) -> bool {
        match self.tx.send_timeout(value, wait).await {
            Ok(()) => true,
            Err(SendTimeoutError::Timeout(dropped)) => {
                warn!(
                    "{} channel full for {:?}, dropping {:.2}",
                    self.name, wait, dropped
                );
                false
            }
            Err(SendTimeoutError::Closed(dropped)) => {
                warn!("{} channel closed, dropping {:.2}", self.name, dropped);
                false
            }
        }
    }
}

#[derive(Debug)]
pub struct ReadingReceiver {
    name: &'static str,
    rx: mpsc::Receiver<f32>,
}

impl ReadingReceiver {
    /// Store the newest queued value into `slot`
    ///
    /// Waits at most `wait` for the first value, then drains whatever else is
    /// already queued so `slot` ends up with the most recent one. On timeout
    /// `slot` keeps its previous contents and false is returned.
    pub async fn receive_latest(&mut self, slot: &mut f32, wait: Duration) -> bool {
        match timeout(wait, self.rx.recv()).await {
            Ok(Some(mut value)) => {
                let mut drained = 0;
                while let Ok(newer) = self.rx.try_recv() {
                    value = newer;
                    drained += 1;
                }
                if drained > 0 {
                    debug!("{} channel: skipped {} older values", self.name, drained);
                }
                *slot = value;
                true
            }
            Ok(None) => {
                warn!("{} channel closed, keeping {:.2}", self.name, slot);
                false
            }
            Err(_) => {
                debug!("{} channel empty for {:?}, keeping {:.2}", self.name, wait, slot);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WAIT: Duration = Duration::from_millis(100);

    #[tokio::test(start_paused = true)]
    async fn send_to_full_channel_drops_after_timeout() {
        let (tx, mut rx) = bounded("test", 2);
        assert!(tx.offer(1.0, WAIT).await);
        assert!(tx.offer(2.0, WAIT).await);
        assert!(!tx.offer(3.0, WAIT).await);

        let mut slot = 0.0;
        assert!(rx.receive_latest(&mut slot, WAIT).await);
        // The dropped value never made it into the queue
        assert_eq!(slot, 2.0);
    }

    #[tokio::test(start_paused = true)]
    async fn receive_timeout_keeps_previous_value() {
        let (_tx, mut rx) = bounded("test", 4);
        let mut slot = 41.5;
        assert!(!rx.receive_latest(&mut slot, WAIT).await);
        assert_eq!(slot, 41.5);
    }

    #[tokio::test(start_paused = true)]
    async fn receive_takes_newest_in_send_order() {
        let (tx, mut rx) = bounded("test", CHANNEL_CAPACITY);
        for value in [1.0, 2.0, 3.0] {
            assert!(tx.offer(value, WAIT).await);
        }

        let mut slot = 0.0;
        assert!(rx.receive_latest(&mut slot, WAIT).await);
        assert_eq!(slot, 3.0);

        assert!(!rx.receive_latest(&mut slot, WAIT).await);
        assert_eq!(slot, 3.0);
    }

    #[tokio::test(start_paused = true)]
    async fn closed_channel_is_not_fatal() {
        let (tx, mut rx) = bounded("test", 1);
        drop(tx);
        let mut slot = 7.0;
        assert!(!rx.receive_latest(&mut slot, WAIT).await);
        assert_eq!(slot, 7.0);

        let (tx, rx) = bounded("test", 1);
        drop(rx);
        assert!(!tx.offer(1.0, WAIT).await);
    }
}

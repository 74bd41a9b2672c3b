//! Connection-scoped pause flag.
//!
//! [`PauseGate`] is owned by the session supervisor and flipped by
//! `pauseSort` / `resumeSort`.  Each job holds a [`PauseWaiter`] and parks in
//! [`PauseWaiter::wait_resumed`] while the flag is set.  The flag lives in a
//! `tokio::sync::watch` channel, so a resume wakes the waiter without any
//! resolver bookkeeping, and dropping the gate releases it.

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use super::error::Halt;

/// Owner side of the pause flag.
#[derive(Debug)]
pub struct PauseGate {
    tx: watch::Sender<bool>,
}

impl Default for PauseGate {
    fn default() -> Self {
        Self::new()
    }
}

impl PauseGate {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Sets the pause request.
    pub fn request_pause(&self) {
        self.tx.send_replace(true);
    }

    /// Clears a pending pause.  Returns `false` (and does nothing) when no
    /// pause was pending.
    pub fn resume(&self) -> bool {
        self.tx.send_if_modified(|paused| std::mem::replace(paused, false))
    }

    /// Drops any pending pause; used when a new job starts.
    pub fn clear(&self) {
        self.tx.send_if_modified(|paused| std::mem::replace(paused, false));
    }

    #[cfg(test)]
    pub(crate) fn is_paused(&self) -> bool {
        *self.tx.borrow()
    }

    /// Creates a waiter for a job.
    pub fn subscribe(&self) -> PauseWaiter {
        PauseWaiter {
            rx: self.tx.subscribe(),
        }
    }
}

/// Job side of the pause flag.
#[derive(Debug)]
pub struct PauseWaiter {
    rx: watch::Receiver<bool>,
}

impl PauseWaiter {
    /// Returns once no pause is pending.
    ///
    /// # Errors
    ///
    /// [`Halt::Cancelled`] if `cancel` fires first, [`Halt::Disconnected`] if
    /// the owning [`PauseGate`] is dropped.
    pub async fn wait_resumed(&mut self, cancel: &CancellationToken) -> Result<(), Halt> {
        loop {
            if cancel.is_cancelled() {
                return Err(Halt::Cancelled);
            }
            let paused = *self.rx.borrow_and_update();
            if !paused {
                return Ok(());
            }
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Halt::Cancelled),
                changed = self.rx.changed() => {
                    if changed.is_err() {
                        return Err(Halt::Disconnected);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_not_paused_returns_immediately() {
        let gate = PauseGate::new();
        let mut waiter = gate.subscribe();
        assert_eq!(waiter.wait_resumed(&CancellationToken::new()).await, Ok(()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_until_resume() {
        // Arrange
        let gate = PauseGate::new();
        let mut waiter = gate.subscribe();
        let cancel = CancellationToken::new();
        gate.request_pause();

        // Act: still parked after a long time
        let parked = timeout(Duration::from_secs(30), waiter.wait_resumed(&cancel)).await;
        assert!(parked.is_err(), "waiter must stay parked while paused");

        // Act: resume releases it
        assert!(gate.resume());

        // Assert
        assert_eq!(waiter.wait_resumed(&cancel).await, Ok(()));
    }

    #[tokio::test]
    async fn test_resume_without_pause_is_a_noop() {
        let gate = PauseGate::new();
        assert!(!gate.resume());
        assert!(!gate.is_paused());
    }

    #[tokio::test]
    async fn test_cancel_releases_waiter() {
        let gate = PauseGate::new();
        let mut waiter = gate.subscribe();
        let cancel = CancellationToken::new();
        gate.request_pause();

        let handle = tokio::spawn({
            let cancel = cancel.clone();
            async move { waiter.wait_resumed(&cancel).await }
        });
        cancel.cancel();

        assert_eq!(handle.await.unwrap(), Err(Halt::Cancelled));
    }

    #[tokio::test]
    async fn test_dropping_gate_releases_waiter() {
        let gate = PauseGate::new();
        let mut waiter = gate.subscribe();
        gate.request_pause();
        drop(gate);

        let result = waiter.wait_resumed(&CancellationToken::new()).await;

        assert_eq!(result, Err(Halt::Disconnected));
    }

    #[test]
    fn test_clear_drops_pending_pause() {
        let gate = PauseGate::new();
        gate.request_pause();
        gate.clear();
        assert!(!gate.is_paused());
    }
}

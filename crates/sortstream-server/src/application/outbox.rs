//! The session's single outbound path.
//!
//! Every event for the browser goes through an [`Outbox`], which wraps the
//! bounded channel drained by the connection's writer task.  The outbox also
//! remembers which job currently owns the session: a job can only enqueue
//! while it is the active one, and the check and the enqueue happen under the
//! same lock.  Once [`Outbox::deactivate`] returns, a superseded job cannot
//! slip another step in behind the new job's first one.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::error::Halt;
use crate::domain::ServerMsg;

struct OutboxState {
    tx: mpsc::Sender<ServerMsg>,
    active_job: Option<Uuid>,
}

/// Shared handle to a session's outbound channel.
#[derive(Clone)]
pub struct Outbox {
    inner: Arc<Mutex<OutboxState>>,
}

impl Outbox {
    pub fn new(tx: mpsc::Sender<ServerMsg>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(OutboxState {
                tx,
                active_job: None,
            })),
        }
    }

    /// Sends a session-level event (a rejection).
    ///
    /// # Errors
    ///
    /// [`Halt::Disconnected`] if the writer task has gone away.
    pub async fn send(&self, msg: ServerMsg) -> Result<(), Halt> {
        let state = self.inner.lock().await;
        state.tx.send(msg).await.map_err(|_| Halt::Disconnected)
    }

    /// Sends an event on behalf of `job`.
    ///
    /// Waiting for channel capacity races against `cancel`, so a cancelled job
    /// never holds the lock indefinitely.
    ///
    /// # Errors
    ///
    /// [`Halt::Superseded`] if `job` is no longer active, [`Halt::Cancelled`]
    /// if `cancel` fires while waiting, [`Halt::Disconnected`] if the writer
    /// task has gone away.
    pub async fn send_for_job(
        &self,
        job: Uuid,
        msg: ServerMsg,
        cancel: &CancellationToken,
    ) -> Result<(), Halt> {
        // The lock is held across the send so `deactivate` cannot slip in
        // between the ownership check and the enqueue.
        let state = self.inner.lock().await;
        if state.active_job != Some(job) {
            return Err(Halt::Superseded);
        }
        // Cancellation first: a superseded job must not win a free slot.
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Halt::Cancelled),
            sent = state.tx.send(msg) => sent.map_err(|_| Halt::Disconnected),
        }
    }

    /// Makes `job` the session's active job.
    pub async fn activate(&self, job: Uuid) {
        self.inner.lock().await.active_job = Some(job);
    }

    /// Revokes the active job's right to send.
    pub async fn deactivate(&self) {
        self.inner.lock().await.active_job = None;
    }

    /// Clears the active job if it is still `job`.
    pub async fn finish(&self, job: Uuid) {
        let mut state = self.inner.lock().await;
        if state.active_job == Some(job) {
            state.active_job = None;
        }
    }

    #[cfg(test)]
    pub(crate) async fn active_job(&self) -> Option<Uuid> {
        self.inner.lock().await.active_job
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(message: &str) -> ServerMsg {
        ServerMsg::SortError {
            message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn test_active_job_can_send() {
        // Arrange
        let (tx, mut rx) = mpsc::channel(4);
        let outbox = Outbox::new(tx);
        let job = Uuid::new_v4();
        outbox.activate(job).await;

        // Act
        let result = outbox.send_for_job(job, error("a"), &CancellationToken::new()).await;

        // Assert
        assert_eq!(result, Ok(()));
        assert_eq!(rx.recv().await, Some(error("a")));
    }

    #[tokio::test]
    async fn test_inactive_job_is_superseded() {
        let (tx, mut rx) = mpsc::channel(4);
        let outbox = Outbox::new(tx);
        let old = Uuid::new_v4();
        outbox.activate(old).await;
        outbox.activate(Uuid::new_v4()).await;

        let result = outbox.send_for_job(old, error("stale"), &CancellationToken::new()).await;

        assert_eq!(result, Err(Halt::Superseded));
        assert!(rx.try_recv().is_err(), "nothing may be enqueued");
    }

    #[tokio::test]
    async fn test_finish_only_clears_own_job() {
        let (tx, _rx) = mpsc::channel(4);
        let outbox = Outbox::new(tx);
        let (old, new) = (Uuid::new_v4(), Uuid::new_v4());
        outbox.activate(new).await;

        outbox.finish(old).await;
        assert_eq!(outbox.active_job().await, Some(new));

        outbox.finish(new).await;
        assert_eq!(outbox.active_job().await, None);
    }

    #[tokio::test]
    async fn test_cancel_unblocks_full_channel() {
        // Arrange: a channel with no free capacity
        let (tx, _rx) = mpsc::channel(1);
        let outbox = Outbox::new(tx);
        let job = Uuid::new_v4();
        outbox.activate(job).await;
        outbox.send(error("fill")).await.unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        // Act
        let result = outbox.send_for_job(job, error("blocked"), &cancel).await;

        // Assert
        assert_eq!(result, Err(Halt::Cancelled));
    }

    #[tokio::test]
    async fn test_closed_channel_reports_disconnect() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let outbox = Outbox::new(tx);
        assert_eq!(outbox.send(error("x")).await, Err(Halt::Disconnected));
    }
}

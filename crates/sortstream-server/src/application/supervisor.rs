//! Per-connection sort job supervisor.
//!
//! A [`SessionSupervisor`] is owned by its connection's task and receives
//! every parsed [`ClientMsg`].  It keeps the connection's state in plain
//! fields: the rate-limit window, the pause gate and the one active job.
//!
//! # Start request pipeline
//!
//! ```text
//! startSort
//!   → rate limit          (refused: "Rate limit exceeded…", nothing else changes)
//!   → supersede           (cancel + deactivate the running job, clear pause)
//!   → validate array      ("Invalid array input" / "Array too large …")
//!   → look up algorithm   ("Algorithm <id> not supported")
//!   → algorithm.steps()   (counting / radix domain errors)
//!   → activate outbox, spawn SortJob
//! ```
//!
//! A request that passes the limiter supersedes the running job even when it
//! then fails validation; only refused requests leave it untouched.

use std::sync::Arc;

use serde_json::Value;
use sortstream_core::AlgorithmRegistry;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::error::{Halt, SortRejection};
use super::job::SortJob;
use super::outbox::Outbox;
use super::pause::PauseGate;
use super::rate_limit::FixedWindow;
use crate::domain::{ClientMsg, ServerMsg, SessionLimits, StartSortRequest};

struct ActiveJob {
    id: Uuid,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Session state and event handling for one connection.
pub struct SessionSupervisor {
    session_id: Uuid,
    registry: Arc<AlgorithmRegistry>,
    limits: SessionLimits,
    outbox: Outbox,
    rate: FixedWindow,
    pause: PauseGate,
    active: Option<ActiveJob>,
}

impl SessionSupervisor {
    pub fn new(
        session_id: Uuid,
        registry: Arc<AlgorithmRegistry>,
        limits: SessionLimits,
        outbox: Outbox,
    ) -> Self {
        let rate = FixedWindow::new(
            limits.rate_limit_window,
            limits.rate_limit_max_requests,
            Instant::now(),
        );
        Self {
            session_id,
            registry,
            limits,
            outbox,
            rate,
            pause: PauseGate::new(),
            active: None,
        }
    }

    /// Handles one inbound event.
    ///
    /// # Errors
    ///
    /// [`Halt::Disconnected`] once the connection's writer is gone; the caller
    /// should end the session.
    pub async fn handle(&mut self, msg: ClientMsg) -> Result<(), Halt> {
        match msg {
            ClientMsg::StartSort(request) => self.start_sort(request).await,
            ClientMsg::PauseSort => {
                debug!(session = %self.session_id, "pause requested");
                self.pause.request_pause();
                Ok(())
            }
            ClientMsg::ResumeSort => {
                if self.pause.resume() {
                    debug!(session = %self.session_id, "resumed");
                }
                Ok(())
            }
        }
    }

    /// Runs the start pipeline and reports a rejection to the client.
    pub async fn start_sort(&mut self, request: StartSortRequest) -> Result<(), Halt> {
        match self.try_start(request).await {
            Ok(()) => Ok(()),
            Err(rejection) => {
                warn!(session = %self.session_id, "sort request rejected: {rejection}");
                self.outbox
                    .send(ServerMsg::SortError {
                        message: rejection.to_string(),
                    })
                    .await
            }
        }
    }

    async fn try_start(&mut self, request: StartSortRequest) -> Result<(), SortRejection> {
        if !self.rate.try_acquire(Instant::now()) {
            return Err(SortRejection::RateLimited);
        }

        self.cancel_active().await;

        let input = validate_array(&request.array, self.limits.max_array_len)?;
        let key = request.algorithm_key();
        let algorithm = self
            .registry
            .get(&key)
            .ok_or_else(|| SortRejection::UnsupportedAlgorithm(key.to_string()))?;
        let steps = algorithm.steps(&input)?;

        info!(
            session = %self.session_id,
            "Starting {key} sort on array of length {}",
            input.len()
        );
        debug!(
            session = %self.session_id,
            "{} start requests left in this window",
            self.rate.remaining()
        );

        let id = Uuid::new_v4();
        let cancel = CancellationToken::new();
        self.outbox.activate(id).await;

        let job = SortJob {
            id,
            algorithm: key.into_owned(),
            input,
            steps,
            delay: request.speed().delay(),
            cancel: cancel.clone(),
            pause: self.pause.subscribe(),
            outbox: self.outbox.clone(),
        };
        let handle = tokio::spawn(job.run());
        self.active = Some(ActiveJob { id, cancel, handle });
        Ok(())
    }

    /// Cancels the running job, if any, and clears pause state.
    ///
    /// After this returns the old job can no longer enqueue events.
    async fn cancel_active(&mut self) {
        if let Some(job) = self.active.take() {
            // Cancel before taking the outbox lock: the old job may be holding
            // it while it waits for channel capacity.
            job.cancel.cancel();
            self.outbox.deactivate().await;
            debug!(session = %self.session_id, job = %job.id, "job superseded");
        }
        self.pause.clear();
    }

    /// Connection closed: cancel the job and release any pause wait.
    pub async fn disconnect(&mut self) {
        if self.has_active_job() {
            debug!(session = %self.session_id, "disconnected with a job running");
        }
        self.cancel_active().await;
    }

    /// Whether a job is still running.
    pub fn has_active_job(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|job| !job.handle.is_finished())
    }
}

/// Checks that `array` is a non-empty JSON array of at most `max_len`
/// numbers and converts it.
pub fn validate_array(array: &Value, max_len: usize) -> Result<Vec<f64>, SortRejection> {
    let items = array.as_array().ok_or(SortRejection::InvalidArray)?;
    if items.is_empty() {
        return Err(SortRejection::InvalidArray);
    }
    if items.len() > max_len {
        return Err(SortRejection::ArrayTooLarge { max: max_len });
    }
    items
        .iter()
        .map(|item| item.as_f64().ok_or(SortRejection::InvalidArray))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

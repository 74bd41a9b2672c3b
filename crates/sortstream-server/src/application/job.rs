//! One sort job: a step stream played back to one connection.
//!
//! A [`SortJob`] runs in its own Tokio task.  Its [`JobEmitter`] adapts the
//! step emitter contract to the session:
//!
//! 1. stop if the job was cancelled;
//! 2. enqueue the step through the [`Outbox`] (refused once superseded);
//! 3. wait out the pacing delay;
//! 4. park while a pause is pending.
//!
//! When the stream ends normally the job sorts its own copy of the input and
//! sends that as `sortComplete`, whatever the algorithm's last record held.
//! A panic inside the algorithm is caught here and reported as an internal
//! error unless the job had already been cancelled.  Halts are silent.

use std::panic::AssertUnwindSafe;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::FutureExt;
use sortstream_core::{StepRecord, StepStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use uuid::Uuid;

use super::driver::{drive, StepEmitter};
use super::error::{Halt, SortRejection};
use super::outbox::Outbox;
use super::pause::PauseWaiter;
use crate::domain::ServerMsg;

/// Everything a spawned job needs.
pub struct SortJob {
    pub id: Uuid,
    pub algorithm: String,
    pub input: Vec<f64>,
    pub steps: StepStream,
    pub delay: Duration,
    pub cancel: CancellationToken,
    pub pause: PauseWaiter,
    pub outbox: Outbox,
}

/// Adapts the outbox, pacing and pause state to [`StepEmitter`].
struct JobEmitter {
    id: Uuid,
    delay: Duration,
    cancel: CancellationToken,
    pause: PauseWaiter,
    outbox: Outbox,
}

#[async_trait]
impl StepEmitter for JobEmitter {
    async fn emit(&mut self, step: StepRecord) -> Result<(), Halt> {
        if self.cancel.is_cancelled() {
            return Err(Halt::Cancelled);
        }
        self.outbox
            .send_for_job(self.id, ServerMsg::SortStep(step), &self.cancel)
            .await?;
        // Polled in order, so a cancel that lands with the timer still wins.
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(Halt::Cancelled),
            _ = tokio::time::sleep(self.delay) => {}
        }
        self.pause.wait_resumed(&self.cancel).await
    }
}

/// Reference result: the input sorted ascending.
pub fn reference_sort(input: &[f64]) -> Vec<f64> {
    let mut sorted = input.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

impl SortJob {
    /// Plays the job to completion, halt or failure.
    pub async fn run(self) {
        let SortJob {
            id,
            algorithm,
            input,
            steps,
            delay,
            cancel,
            pause,
            outbox,
        } = self;

        let mut emitter = JobEmitter {
            id,
            delay,
            cancel: cancel.clone(),
            pause,
            outbox: outbox.clone(),
        };

        let outcome = AssertUnwindSafe(drive(steps, &mut emitter))
            .catch_unwind()
            .await;

        let last = match outcome {
            Ok(Ok(_)) => {
                let array = reference_sort(&input);
                info!(job = %id, "{algorithm} sort complete ({} elements)", array.len());
                outbox
                    .send_for_job(id, ServerMsg::SortComplete { array }, &cancel)
                    .await
            }
            Ok(Err(halt)) => {
                debug!(job = %id, "{algorithm} sort stopped: {halt}");
                Ok(())
            }
            // Whatever the aborted algorithm did after cancellation is moot.
            Err(_) if cancel.is_cancelled() => {
                debug!(job = %id, "{algorithm} sort panicked after cancellation");
                Ok(())
            }
            Err(panic) => {
                error!(job = %id, "{algorithm} sort panicked: {}", panic_message(&*panic));
                let message = SortRejection::Internal.to_string();
                outbox
                    .send_for_job(id, ServerMsg::SortError { message }, &cancel)
                    .await
            }
        };
        if let Err(halt) = last {
            debug!(job = %id, "final event dropped: {halt}");
        }

        outbox.finish(id).await;
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

//! Async form of the step emitter contract.
//!
//! [`drive`] pulls records from a [`StepStream`] one at a time and awaits
//! [`StepEmitter::emit`] for each before pulling the next.  The emitter is
//! where pacing, pause and cancellation live; it may suspend for as long as it
//! likes.  The first `Err` it returns stops the stream on the spot and is
//! handed back unchanged.

use async_trait::async_trait;
use sortstream_core::{StepRecord, StepStream};

use super::error::Halt;

/// Receives step records, possibly suspending between them.
#[async_trait]
pub trait StepEmitter: Send {
    /// Accepts the next record.  An error aborts the stream.
    async fn emit(&mut self, step: StepRecord) -> Result<(), Halt>;
}

/// Feeds every record of `steps` to `emitter`, in order.
///
/// Returns the terminal record's array, or the emitter's first error.
pub async fn drive<E>(steps: StepStream, emitter: &mut E) -> Result<Vec<f64>, Halt>
where
    E: StepEmitter + ?Sized,
{
    let mut sorted = Vec::new();
    for step in steps {
        if step.is_terminal() {
            sorted.clone_from(&step.array);
        }
        emitter.emit(step).await?;
    }
    Ok(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortstream_core::algorithms::InsertionSort;
    use sortstream_core::SortAlgorithm;

    // ── Test doubles ──────────────────────────────────────────────────────────

    #[derive(Default)]
    struct RecordingEmitter {
        seen: Vec<StepRecord>,
        fail_at: Option<usize>,
    }

    #[async_trait]
    impl StepEmitter for RecordingEmitter {
        async fn emit(&mut self, step: StepRecord) -> Result<(), Halt> {
            if self.fail_at == Some(self.seen.len()) {
                return Err(Halt::Cancelled);
            }
            self.seen.push(step);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_drive_forwards_every_record_in_order() {
        // Arrange
        let expected: Vec<StepRecord> = InsertionSort.steps(&[3.0, 2.0, 1.0]).unwrap().collect();
        let mut emitter = RecordingEmitter::default();

        // Act
        let sorted = drive(InsertionSort.steps(&[3.0, 2.0, 1.0]).unwrap(), &mut emitter)
            .await
            .unwrap();

        // Assert
        assert_eq!(emitter.seen, expected);
        assert_eq!(sorted, vec![1.0, 2.0, 3.0]);
    }

    #[tokio::test]
    async fn test_emitter_error_stops_the_stream() {
        let mut emitter = RecordingEmitter {
            fail_at: Some(2),
            ..Default::default()
        };

        let result = drive(InsertionSort.steps(&[4.0, 3.0, 2.0, 1.0]).unwrap(), &mut emitter).await;

        assert_eq!(result, Err(Halt::Cancelled));
        assert_eq!(emitter.seen.len(), 2);
    }
}

//! The synchronous step emitter contract.
//!
//! A [`StepSink`] receives every record of a stream, in order, one at a time.
//! Returning an error from [`StepSink::emit`] aborts the sort on the spot:
//! [`emit_all`] stops pulling records and hands the error back to its caller
//! unchanged.  There is no retry.
//!
//! Async consumers (pacing, pause, network send) use the same contract through
//! the server's `StepEmitter` trait.

use crate::step::StepRecord;

/// Receives step records one at a time.
///
/// Implemented for closures, so a quick consumer can be written inline:
///
/// ```rust
/// use sortstream_core::algorithms::BubbleSort;
/// use sortstream_core::{emit_all, SortAlgorithm, StepRecord};
///
/// let mut seen = 0;
/// let sorted = emit_all(
///     BubbleSort.steps(&[3.0, 1.0, 2.0]).unwrap(),
///     &mut |_step: StepRecord| -> Result<(), ()> {
///         seen += 1;
///         Ok(())
///     },
/// )
/// .unwrap();
/// assert_eq!(sorted, vec![1.0, 2.0, 3.0]);
/// assert!(seen > 1);
/// ```
pub trait StepSink {
    type Error;

    /// Accepts the next record.  An error aborts the stream.
    fn emit(&mut self, step: StepRecord) -> Result<(), Self::Error>;
}

impl<F, E> StepSink for F
where
    F: FnMut(StepRecord) -> Result<(), E>,
{
    type Error = E;

    fn emit(&mut self, step: StepRecord) -> Result<(), E> {
        self(step)
    }
}

/// Feeds every record of `steps` to `sink`.
///
/// Returns the array carried by the terminal record, or the sink's first
/// error.  A stream without a terminal record yields an empty vector.
pub fn emit_all<I, S>(steps: I, sink: &mut S) -> Result<Vec<f64>, S::Error>
where
    I: IntoIterator<Item = StepRecord>,
    S: StepSink + ?Sized,
{
    let mut sorted = Vec::new();
    for step in steps {
        if step.is_terminal() {
            sorted.clone_from(&step.array);
        }
        sink.emit(step)?;
    }
    Ok(sorted)
}

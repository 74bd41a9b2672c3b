//! The nine instrumented sorting algorithms.
//!
//! Each algorithm is a small state machine (a [`Stepper`]) that performs one
//! unit of work per call to `advance`: one comparison, one shift, one
//! placement.  [`Steps`] wraps a stepper in an [`Iterator`], so a whole sort
//! becomes a lazy, finite, non-restartable stream of [`StepRecord`]s.
//!
//! # Why state machines instead of loops?
//!
//! A plain `for` loop cannot stop half way and hand a record to its caller.
//! Keeping the loop counters in a struct lets the consumer pull one record at
//! a time, wait as long as it likes between records (pacing, pause), or just
//! drop the stream to cancel.  Nothing in here knows about time or sockets.
//!
//! # Step conventions
//!
//! - A comparison record is taken *before* the comparison has any effect and
//!   has `swap: None`.
//! - A mutation record is taken *after* the write and has `swap` set.
//! - The stream ends with exactly one record that has neither.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use crate::error::InputError;
use crate::step::{IndexPair, StepRecord, MAX_SAFE_INTEGER};

pub mod bubble;
pub mod counting;
pub mod heap;
pub mod insertion;
pub mod merge;
pub mod quick;
pub mod radix;
pub mod selection;
pub mod shell;

pub use bubble::BubbleSort;
pub use counting::{CountingSort, DEFAULT_MAX_COUNTING_RANGE};
pub use heap::HeapSort;
pub use insertion::InsertionSort;
pub use merge::MergeSort;
pub use quick::QuickSort;
pub use radix::RadixSort;
pub use selection::SelectionSort;
pub use shell::ShellSort;

// ── Public API ────────────────────────────────────────────────────────────────

/// Stable identifiers of the built-in algorithms.
///
/// [`AlgorithmId::as_str`] gives the camelCase key (`"bubbleSort"`,
/// `"quickSort"`, ...) the browser sends in `startSort`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmId {
    BubbleSort,
    QuickSort,
    MergeSort,
    InsertionSort,
    SelectionSort,
    HeapSort,
    ShellSort,
    CountingSort,
    RadixSort,
}

impl AlgorithmId {
    /// Every built-in algorithm, in the order the browser lists them.
    pub const ALL: [AlgorithmId; 9] = [
        AlgorithmId::BubbleSort,
        AlgorithmId::QuickSort,
        AlgorithmId::MergeSort,
        AlgorithmId::InsertionSort,
        AlgorithmId::SelectionSort,
        AlgorithmId::HeapSort,
        AlgorithmId::ShellSort,
        AlgorithmId::CountingSort,
        AlgorithmId::RadixSort,
    ];

    /// The wire key for this algorithm.
    pub fn as_str(self) -> &'static str {
        match self {
            AlgorithmId::BubbleSort => "bubbleSort",
            AlgorithmId::QuickSort => "quickSort",
            AlgorithmId::MergeSort => "mergeSort",
            AlgorithmId::InsertionSort => "insertionSort",
            AlgorithmId::SelectionSort => "selectionSort",
            AlgorithmId::HeapSort => "heapSort",
            AlgorithmId::ShellSort => "shellSort",
            AlgorithmId::CountingSort => "countingSort",
            AlgorithmId::RadixSort => "radixSort",
        }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AlgorithmId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or(())
    }
}

/// A sorting algorithm that can describe its own progress.
///
/// `steps` copies `input` and returns the stream of records for sorting that
/// copy.  The caller's slice is never touched.
///
/// # Errors
///
/// Returns [`InputError`] when `input` lies outside the algorithm's domain
/// (only counting and radix sort have a restricted domain).  The check runs
/// before any record is produced, so a returned stream never fails.
pub trait SortAlgorithm: Send + Sync {
    fn steps(&self, input: &[f64]) -> Result<StepStream, InputError>;
}

/// A lazy, finite stream of step records.
///
/// Dropping the stream abandons the sort; there is nothing to clean up.
pub struct StepStream {
    inner: Box<dyn Iterator<Item = StepRecord> + Send>,
}

impl StepStream {
    /// Wraps any sendable iterator of records.
    pub fn new<I>(records: I) -> Self
    where
        I: Iterator<Item = StepRecord> + Send + 'static,
    {
        Self {
            inner: Box::new(records),
        }
    }
}

impl Iterator for StepStream {
    type Item = StepRecord;

    fn next(&mut self) -> Option<StepRecord> {
        self.inner.next()
    }
}

impl fmt::Debug for StepStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepStream").finish_non_exhaustive()
    }
}

// ── Stepping machinery ────────────────────────────────────────────────────────

/// The working copy of the array plus the records not yet handed out.
///
/// Algorithms mutate the array only through the recording methods, so every
/// write is paired with exactly one record.
pub(crate) struct Tracer {
    values: Vec<f64>,
    pending: VecDeque<StepRecord>,
}

impl Tracer {
    fn new(input: &[f64]) -> Self {
        Self {
            values: input.to_vec(),
            pending: VecDeque::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn get(&self, index: usize) -> f64 {
        self.values[index]
    }

    /// Records a comparison of `a` and `b`.
    pub(crate) fn compare(&mut self, a: usize, b: usize) {
        self.pending
            .push_back(StepRecord::comparison(self.values.clone(), a, b));
    }

    /// Swaps two slots and records the result.
    pub(crate) fn swap(&mut self, a: usize, b: usize, highlight: Option<IndexPair>) {
        self.values.swap(a, b);
        self.pending
            .push_back(StepRecord::mutation(self.values.clone(), (a, b), highlight));
    }

    /// Writes one slot and records the result as `swap: (index, index)`.
    pub(crate) fn write(&mut self, index: usize, value: f64, highlight: Option<IndexPair>) {
        self.write_marked(index, value, (index, index), highlight);
    }

    /// Writes one slot and records the result with an explicit `swap` pair.
    ///
    /// Used for shifts, where the viewer should see both the source and the
    /// destination slot.
    pub(crate) fn write_marked(
        &mut self,
        index: usize,
        value: f64,
        swap: IndexPair,
        highlight: Option<IndexPair>,
    ) {
        self.values[index] = value;
        self.pending
            .push_back(StepRecord::mutation(self.values.clone(), swap, highlight));
    }

    /// Records a snapshot of an auxiliary buffer instead of the working array.
    ///
    /// Counting and radix sort show their output buffer while placing.
    pub(crate) fn record_buffer(&mut self, buffer: &[f64], swap: IndexPair, highlight: IndexPair) {
        self.pending
            .push_back(StepRecord::mutation(buffer.to_vec(), swap, Some(highlight)));
    }

    fn finish(&mut self) {
        self.pending
            .push_back(StepRecord::terminal(self.values.clone()));
    }
}

/// One instrumented algorithm, resumable between units of work.
pub(crate) trait Stepper: Send {
    /// Performs one unit of work, recording its steps on `tracer`.
    ///
    /// Returns `false` once the array is sorted.  A call that returns `true`
    /// may record nothing (for example when moving on to the next pass), but
    /// every stepper reaches `false` after finitely many calls.
    fn advance(&mut self, tracer: &mut Tracer) -> bool;
}

/// Adapts a [`Stepper`] into an iterator of records.
pub(crate) struct Steps<S> {
    tracer: Tracer,
    stepper: S,
    finished: bool,
}

impl<S: Stepper + 'static> Steps<S> {
    pub(crate) fn stream(input: &[f64], stepper: S) -> StepStream {
        StepStream::new(Self {
            tracer: Tracer::new(input),
            stepper,
            finished: false,
        })
    }
}

impl<S: Stepper> Iterator for Steps<S> {
    type Item = StepRecord;

    fn next(&mut self) -> Option<StepRecord> {
        loop {
            if let Some(record) = self.tracer.pending.pop_front() {
                return Some(record);
            }
            if self.finished {
                return None;
            }
            if !self.stepper.advance(&mut self.tracer) {
                self.tracer.finish();
                self.finished = true;
            }
        }
    }
}

/// Converts `input` to whole-number keys for counting and radix sort.
///
/// Accepts finite, non-negative, integral values up to 2^53.  `-0.0` is
/// accepted as zero.
pub(crate) fn non_negative_keys(
    algorithm: AlgorithmId,
    input: &[f64],
) -> Result<Vec<u64>, InputError> {
    input
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= MAX_SAFE_INTEGER
            {
                Ok(value as u64)
            } else {
                Err(InputError::NotNonNegativeInteger {
                    algorithm: algorithm.as_str(),
                    index,
                    value,
                })
            }
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Runs `algorithm` to completion and returns every record.
    pub(crate) fn collect(algorithm: &dyn SortAlgorithm, input: &[f64]) -> Vec<StepRecord> {
        algorithm
            .steps(input)
            .expect("input must be accepted")
            .collect()
    }

    #[test]
    fn test_algorithm_id_round_trips_through_str() {
        for id in AlgorithmId::ALL {
            assert_eq!(id.as_str().parse::<AlgorithmId>(), Ok(id));
        }
    }

    #[test]
    fn test_unknown_algorithm_id_does_not_parse() {
        assert!("bogoSort".parse::<AlgorithmId>().is_err());
    }

    #[test]
    fn test_non_negative_keys_accepts_negative_zero() {
        let keys = non_negative_keys(AlgorithmId::CountingSort, &[-0.0, 3.0]).unwrap();
        assert_eq!(keys, vec![0, 3]);
    }

    #[test]
    fn test_non_negative_keys_rejects_fraction() {
        let err = non_negative_keys(AlgorithmId::RadixSort, &[1.0, 2.5]).unwrap_err();
        assert_eq!(
            err,
            InputError::NotNonNegativeInteger {
                algorithm: "radixSort",
                index: 1,
                value: 2.5,
            }
        );
    }

    #[test]
    fn test_non_negative_keys_rejects_negative() {
        assert!(non_negative_keys(AlgorithmId::CountingSort, &[-1.0]).is_err());
    }

    #[test]
    fn test_steps_finishes_with_single_terminal_record() {
        struct Noop;
        impl Stepper for Noop {
            fn advance(&mut self, _: &mut Tracer) -> bool {
                false
            }
        }

        let records: Vec<_> = Steps::stream(&[2.0, 1.0], Noop).collect();

        assert_eq!(records, vec![StepRecord::terminal(vec![2.0, 1.0])]);
    }
}

//! Counting sort for non-negative integers.
//!
//! Three phases, each visible to the viewer:
//!
//! 1. **Count** – scan every slot (`compare: (i, i)`) and tally its value.
//! 2. **Place** – walk the input backwards and drop each value into its final
//!    position in an output buffer (`compare: (i, position)`,
//!    `swap: (position, position)`); the snapshot shows the output buffer.
//!    Walking backwards keeps equal values in input order.
//! 3. **Copy** – write the output buffer back over the array (`swap: (i, i)`).
//!
//! The count buffer has `max - min + 1` slots, so the value range is capped
//! (see [`DEFAULT_MAX_COUNTING_RANGE`]).

use super::{non_negative_keys, AlgorithmId, SortAlgorithm, StepStream, Stepper, Steps, Tracer};
use crate::error::InputError;

/// Largest `max - min + 1` counting sort will allocate a count buffer for.
pub const DEFAULT_MAX_COUNTING_RANGE: u64 = 100_000;

/// Stable counting sort.
#[derive(Debug, Clone, Copy)]
pub struct CountingSort {
    max_range: u64,
}

impl CountingSort {
    /// Creates a counting sort that rejects value ranges above `max_range`.
    pub fn new(max_range: u64) -> Self {
        Self { max_range }
    }
}

impl Default for CountingSort {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_COUNTING_RANGE)
    }
}

impl SortAlgorithm for CountingSort {
    fn steps(&self, input: &[f64]) -> Result<StepStream, InputError> {
        let keys = non_negative_keys(AlgorithmId::CountingSort, input)?;
        let min = keys.iter().copied().min().unwrap_or(0);
        let max = keys.iter().copied().max().unwrap_or(0);
        let range = max - min + 1;
        if range > self.max_range {
            return Err(InputError::RangeTooLarge {
                algorithm: AlgorithmId::CountingSort.as_str(),
                range,
                max: self.max_range,
            });
        }

        let slots = keys.iter().map(|&k| (k - min) as usize).collect();
        Ok(Steps::stream(
            input,
            Counting {
                slots,
                counts: vec![0; range as usize],
                output: vec![0.0; input.len()],
                phase: Phase::Count { index: 0 },
            },
        ))
    }
}

enum Phase {
    Count { index: usize },
    /// Slots `0..remaining` of the input are still to be placed.
    Place { remaining: usize },
    Copy { index: usize },
}

struct Counting {
    /// Count-buffer slot of each input element (`value - min`).
    slots: Vec<usize>,
    counts: Vec<usize>,
    output: Vec<f64>,
    phase: Phase,
}

impl Stepper for Counting {
    fn advance(&mut self, t: &mut Tracer) -> bool {
        let n = t.len();
        match self.phase {
            Phase::Count { index } if index < n => {
                self.counts[self.slots[index]] += 1;
                t.compare(index, index);
                self.phase = Phase::Count { index: index + 1 };
            }
            Phase::Count { .. } => {
                for i in 1..self.counts.len() {
                    self.counts[i] += self.counts[i - 1];
                }
                self.phase = Phase::Place { remaining: n };
            }
            Phase::Place { remaining: 0 } => {
                self.phase = Phase::Copy { index: 0 };
            }
            Phase::Place { remaining } => {
                let index = remaining - 1;
                let slot = self.slots[index];
                self.counts[slot] -= 1;
                let position = self.counts[slot];
                self.output[position] = t.get(index);
                t.record_buffer(&self.output, (position, position), (index, position));
                self.phase = Phase::Place { remaining: index };
            }
            Phase::Copy { index } if index < n => {
                t.write(index, self.output[index], None);
                self.phase = Phase::Copy { index: index + 1 };
            }
            Phase::Copy { .. } => return false,
        }
        true
    }
}

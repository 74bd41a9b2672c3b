//! LSD radix sort, base 10, for non-negative integers.
//!
//! One stable counting pass per decimal digit of the largest value, using the
//! same count / place / copy step convention as counting sort.  An input whose
//! maximum is 0 needs no pass at all.

use super::{non_negative_keys, AlgorithmId, SortAlgorithm, StepStream, Stepper, Steps, Tracer};
use crate::error::InputError;

const BASE: u64 = 10;

/// Stable base-10 radix sort.
#[derive(Debug, Clone, Copy, Default)]
pub struct RadixSort;

impl SortAlgorithm for RadixSort {
    fn steps(&self, input: &[f64]) -> Result<StepStream, InputError> {
        let keys = non_negative_keys(AlgorithmId::RadixSort, input)?;
        let max = keys.iter().copied().max().unwrap_or(0);
        Ok(Steps::stream(
            input,
            Radix {
                max,
                exp: 1,
                counts: [0; BASE as usize],
                output: vec![0.0; input.len()],
                phase: Phase::NextPass,
            },
        ))
    }
}

enum Phase {
    NextPass,
    Count { index: usize },
    Place { remaining: usize },
    Copy { index: usize },
}

struct Radix {
    max: u64,
    /// Place value of the current digit (1, 10, 100, ...).
    exp: u64,
    counts: [usize; BASE as usize],
    output: Vec<f64>,
    phase: Phase,
}

impl Radix {
    fn digit(&self, value: f64) -> usize {
        ((value as u64 / self.exp) % BASE) as usize
    }
}

impl Stepper for Radix {
    fn advance(&mut self, t: &mut Tracer) -> bool {
        let n = t.len();
        match self.phase {
            Phase::NextPass => {
                if self.max / self.exp == 0 {
                    return false;
                }
                self.counts = [0; BASE as usize];
                self.output.fill(0.0);
                self.phase = Phase::Count { index: 0 };
            }
            Phase::Count { index } if index < n => {
                let digit = self.digit(t.get(index));
                self.counts[digit] += 1;
                t.compare(index, index);
                self.phase = Phase::Count { index: index + 1 };
            }
            Phase::Count { .. } => {
                for d in 1..self.counts.len() {
                    self.counts[d] += self.counts[d - 1];
                }
                self.phase = Phase::Place { remaining: n };
            }
            Phase::Place { remaining: 0 } => {
                self.phase = Phase::Copy { index: 0 };
            }
            Phase::Place { remaining } => {
                let index = remaining - 1;
                let value = t.get(index);
                let digit = self.digit(value);
                self.counts[digit] -= 1;
                let position = self.counts[digit];
                self.output[position] = value;
                t.record_buffer(&self.output, (position, position), (index, position));
                self.phase = Phase::Place { remaining: index };
            }
            Phase::Copy { index } if index < n => {
                t.write(index, self.output[index], None);
                self.phase = Phase::Copy { index: index + 1 };
            }
            Phase::Copy { .. } => {
                let Some(exp) = self.exp.checked_mul(BASE) else {
                    return false;
                };
                self.exp = exp;
                self.phase = Phase::NextPass;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::tests::collect;

    #[test]
    fn test_sorts_multi_digit_values() {
        let input = [170.0, 45.0, 75.0, 90.0, 802.0, 24.0, 2.0, 66.0];
        let records = collect(&RadixSort, &input);
        assert_eq!(
            records.last().unwrap().array,
            vec![2.0, 24.0, 45.0, 66.0, 75.0, 90.0, 170.0, 802.0]
        );
    }

    #[test]
    fn test_one_pass_per_digit_of_maximum() {
        // Arrange: max = 42 -> two passes of 3 records per element
        let records = collect(&RadixSort, &[42.0, 7.0]);

        // Assert
        assert_eq!(records.len(), 2 * (2 * 3) + 1);
    }

    #[test]
    fn test_all_zero_input_needs_no_pass() {
        let records = collect(&RadixSort, &[0.0, 0.0]);
        assert_eq!(records.len(), 1);
        assert!(records[0].is_terminal());
    }

    #[test]
    fn test_rejects_fractional_values() {
        assert!(RadixSort.steps(&[1.5]).is_err());
    }
}

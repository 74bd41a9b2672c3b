//! Shell sort with the halving gap sequence `n/2, n/4, ..., 1`.
//!
//! Each gap runs a gapped insertion sort; the final gap of 1 is a plain
//! insertion sort over an almost sorted array.

use super::{SortAlgorithm, StepStream, Stepper, Steps, Tracer};
use crate::error::InputError;

/// Shell sort.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellSort;

impl SortAlgorithm for ShellSort {
    fn steps(&self, input: &[f64]) -> Result<StepStream, InputError> {
        let gap = input.len() / 2;
        Ok(Steps::stream(
            input,
            Shell {
                gap,
                index: gap,
                carry: None,
            },
        ))
    }
}

struct Shell {
    gap: usize,
    index: usize,
    /// `(value taken from index, current hole)` while shifting.
    carry: Option<(f64, usize)>,
}

impl Stepper for Shell {
    fn advance(&mut self, t: &mut Tracer) -> bool {
        if self.gap == 0 {
            return false;
        }
        let gap = self.gap;

        let Some((temp, hole)) = self.carry else {
            if self.index >= t.len() {
                self.gap /= 2;
                self.index = self.gap;
            } else {
                self.carry = Some((t.get(self.index), self.index));
            }
            return true;
        };

        if hole >= gap {
            let from = hole - gap;
            t.compare(from, self.index);
            if t.get(from) > temp {
                t.write_marked(hole, t.get(from), (hole, from), Some((from, hole)));
                self.carry = Some((temp, from));
                return true;
            }
        }

        if hole != self.index {
            t.write(hole, temp, None);
        }
        self.carry = None;
        self.index += 1;
        true
    }
}

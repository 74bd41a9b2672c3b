//! Bubble sort.
//!
//! Each pass compares neighbours left to right and swaps any pair that is out
//! of order, so the largest remaining value "bubbles" to the end.  A pass
//! without a single swap means the array is sorted and the sort stops early.

use super::{SortAlgorithm, StepStream, Stepper, Steps, Tracer};
use crate::error::InputError;

/// Bubble sort with early exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct BubbleSort;

impl SortAlgorithm for BubbleSort {
    fn steps(&self, input: &[f64]) -> Result<StepStream, InputError> {
        Ok(Steps::stream(input, Bubble::default()))
    }
}

#[derive(Default)]
struct Bubble {
    /// Completed passes; the last `pass` slots are already in place.
    pass: usize,
    /// Left index of the next neighbour pair.
    index: usize,
    swapped: bool,
}

impl Stepper for Bubble {
    fn advance(&mut self, t: &mut Tracer) -> bool {
        let n = t.len();
        if n < 2 || self.pass >= n - 1 {
            return false;
        }

        if self.index < n - 1 - self.pass {
            let j = self.index;
            t.compare(j, j + 1);
            if t.get(j) > t.get(j + 1) {
                t.swap(j, j + 1, Some((j, j + 1)));
                self.swapped = true;
            }
            self.index += 1;
            return true;
        }

        if !self.swapped {
            return false;
        }
        self.pass += 1;
        self.index = 0;
        self.swapped = false;
        true
    }
}

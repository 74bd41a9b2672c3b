//! Selection sort.
//!
//! For each position, scans the unsorted remainder for its minimum and swaps
//! it into place.  No swap is recorded when the minimum is already there.

use super::{SortAlgorithm, StepStream, Stepper, Steps, Tracer};
use crate::error::InputError;

/// Selection sort.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionSort;

impl SortAlgorithm for SelectionSort {
    fn steps(&self, input: &[f64]) -> Result<StepStream, InputError> {
        Ok(Steps::stream(
            input,
            Selection {
                position: 0,
                min: 0,
                scan: 1,
            },
        ))
    }
}

struct Selection {
    position: usize,
    min: usize,
    scan: usize,
}

impl Stepper for Selection {
    fn advance(&mut self, t: &mut Tracer) -> bool {
        let n = t.len();
        if n < 2 || self.position >= n - 1 {
            return false;
        }

        if self.scan < n {
            t.compare(self.min, self.scan);
            if t.get(self.scan) < t.get(self.min) {
                self.min = self.scan;
            }
            self.scan += 1;
            return true;
        }

        if self.min != self.position {
            t.swap(self.position, self.min, Some((self.position, self.min)));
        }
        self.position += 1;
        self.min = self.position;
        self.scan = self.position + 1;
        true
    }
}

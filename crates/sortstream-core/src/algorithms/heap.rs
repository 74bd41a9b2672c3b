//! Heap sort.
//!
//! Builds a max-heap bottom-up, then repeatedly swaps the root with the last
//! unsorted slot and sifts the new root down.  One sift-down level (up to two
//! child comparisons and one swap) is performed per unit of work.

use super::{SortAlgorithm, StepStream, Stepper, Steps, Tracer};
use crate::error::InputError;

/// In-place heap sort on a max-heap.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapSort;

impl SortAlgorithm for HeapSort {
    fn steps(&self, input: &[f64]) -> Result<StepStream, InputError> {
        Ok(Steps::stream(
            input,
            Heap {
                phase: Phase::Build {
                    remaining: input.len() / 2,
                },
                sift: None,
            },
        ))
    }
}

enum Phase {
    /// Heapifying nodes `remaining - 1` down to 0.
    Build { remaining: usize },
    /// Slots `end + 1..` are sorted; `0..=end` is a heap.
    Extract { end: usize },
}

struct Heap {
    phase: Phase,
    /// `(node, heap size)` of a sift-down in progress.
    sift: Option<(usize, usize)>,
}

impl Heap {
    /// Sifts `node` down one level and returns where to continue, if anywhere.
    fn sift_level(t: &mut Tracer, node: usize, size: usize) -> Option<(usize, usize)> {
        let mut largest = node;
        let left = 2 * node + 1;
        let right = 2 * node + 2;

        if left < size {
            t.compare(largest, left);
            if t.get(left) > t.get(largest) {
                largest = left;
            }
        }
        if right < size {
            t.compare(largest, right);
            if t.get(right) > t.get(largest) {
                largest = right;
            }
        }

        if largest == node {
            return None;
        }
        t.swap(node, largest, Some((node, largest)));
        Some((largest, size))
    }
}

impl Stepper for Heap {
    fn advance(&mut self, t: &mut Tracer) -> bool {
        let n = t.len();
        if n < 2 {
            return false;
        }

        if let Some((node, size)) = self.sift {
            self.sift = Self::sift_level(t, node, size);
            return true;
        }

        match self.phase {
            Phase::Build { remaining: 0 } => {
                self.phase = Phase::Extract { end: n - 1 };
                true
            }
            Phase::Build { remaining } => {
                self.sift = Some((remaining - 1, n));
                self.phase = Phase::Build {
                    remaining: remaining - 1,
                };
                true
            }
            Phase::Extract { end: 0 } => false,
            Phase::Extract { end } => {
                t.swap(0, end, Some((0, end)));
                self.sift = Some((0, end));
                self.phase = Phase::Extract { end: end - 1 };
                true
            }
        }
    }
}

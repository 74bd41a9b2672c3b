//! Insertion sort.
//!
//! Takes each element in turn and shifts larger predecessors one slot to the
//! right until the hole reaches the element's insertion point.

use super::{SortAlgorithm, StepStream, Stepper, Steps, Tracer};
use crate::error::InputError;

/// Insertion sort by shifting.
///
/// The check that ends a shift run (hole at 0, or predecessor not larger
/// than the key) produces no compare record; the run ends with the
/// placement write instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionSort;

impl SortAlgorithm for InsertionSort {
    fn steps(&self, input: &[f64]) -> Result<StepStream, InputError> {
        Ok(Steps::stream(input, Insertion::Next { index: 1 }))
    }
}

enum Insertion {
    /// About to pick up the element at `index`.
    Next { index: usize },
    /// Carrying `key` (taken from `index`); `hole` is where it would land now.
    Shifting { index: usize, key: f64, hole: usize },
}

impl Stepper for Insertion {
    fn advance(&mut self, t: &mut Tracer) -> bool {
        match *self {
            Insertion::Next { index } => {
                if index >= t.len() {
                    return false;
                }
                t.compare(index, index - 1);
                *self = Insertion::Shifting {
                    index,
                    key: t.get(index),
                    hole: index,
                };
                true
            }
            Insertion::Shifting { index, key, hole } => {
                if hole > 0 && t.get(hole - 1) > key {
                    let from = hole - 1;
                    t.compare(from, hole);
                    t.write_marked(hole, t.get(from), (from, hole), Some((from, hole)));
                    *self = Insertion::Shifting {
                        index,
                        key,
                        hole: from,
                    };
                } else {
                    t.write(hole, key, None);
                    *self = Insertion::Next { index: index + 1 };
                }
                true
            }
        }
    }
}

//! Top-down merge sort.
//!
//! The recursion (split at the midpoint, sort the left half, sort the right
//! half, merge) is replayed from an explicit work stack so that a merge can be
//! suspended between any two placements.
//!
//! The merge is stable: on a tie (`L[i] <= R[j]`) the element from the left
//! run is placed first.

use super::{SortAlgorithm, StepStream, Stepper, Steps, Tracer};
use crate::error::InputError;

/// Stable top-down merge sort.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeSort;

impl SortAlgorithm for MergeSort {
    fn steps(&self, input: &[f64]) -> Result<StepStream, InputError> {
        let mut work = Vec::new();
        if input.len() > 1 {
            work.push(Work::Sort {
                left: 0,
                right: input.len() - 1,
            });
        }
        Ok(Steps::stream(input, Merge { work, active: None }))
    }
}

/// A pending call of the recursive formulation.
enum Work {
    Sort { left: usize, right: usize },
    Merge { left: usize, mid: usize, right: usize },
}

/// A merge in progress: copies of both runs and the three cursors.
struct Run {
    left: usize,
    mid: usize,
    lhs: Vec<f64>,
    rhs: Vec<f64>,
    i: usize,
    j: usize,
    k: usize,
}

struct Merge {
    work: Vec<Work>,
    active: Option<Run>,
}

impl Stepper for Merge {
    fn advance(&mut self, t: &mut Tracer) -> bool {
        if let Some(run) = self.active.as_mut() {
            if run.i < run.lhs.len() && run.j < run.rhs.len() {
                t.compare(run.left + run.i, run.mid + 1 + run.j);
                let value = if run.lhs[run.i] <= run.rhs[run.j] {
                    run.i += 1;
                    run.lhs[run.i - 1]
                } else {
                    run.j += 1;
                    run.rhs[run.j - 1]
                };
                t.write(run.k, value, None);
                run.k += 1;
            } else if run.i < run.lhs.len() {
                t.write(run.k, run.lhs[run.i], None);
                run.i += 1;
                run.k += 1;
            } else if run.j < run.rhs.len() {
                t.write(run.k, run.rhs[run.j], None);
                run.j += 1;
                run.k += 1;
            } else {
                self.active = None;
            }
            return true;
        }

        match self.work.pop() {
            None => false,
            Some(Work::Sort { left, right }) => {
                if left < right {
                    let mid = left + (right - left) / 2;
                    // Pushed in reverse so the left half is sorted first.
                    self.work.push(Work::Merge { left, mid, right });
                    self.work.push(Work::Sort {
                        left: mid + 1,
                        right,
                    });
                    self.work.push(Work::Sort { left, right: mid });
                }
                true
            }
            Some(Work::Merge { left, mid, right }) => {
                self.active = Some(Run {
                    left,
                    mid,
                    lhs: (left..=mid).map(|i| t.get(i)).collect(),
                    rhs: (mid + 1..=right).map(|i| t.get(i)).collect(),
                    i: 0,
                    j: 0,
                    k: left,
                });
                true
            }
        }
    }
}

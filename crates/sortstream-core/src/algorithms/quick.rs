//! Quick sort with the Lomuto partition scheme.
//!
//! The last element of each range is the pivot.  Every scanned element is
//! compared with it; elements `<=` the pivot are swapped into the low
//! partition, and the pivot is finally swapped into the slot between the two
//! partitions.  Pending ranges live on an explicit stack, left range first.

use super::{SortAlgorithm, StepStream, Stepper, Steps, Tracer};
use crate::error::InputError;

/// Lomuto quick sort.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickSort;

impl SortAlgorithm for QuickSort {
    fn steps(&self, input: &[f64]) -> Result<StepStream, InputError> {
        let mut ranges = Vec::new();
        if input.len() > 1 {
            ranges.push((0, input.len() - 1));
        }
        Ok(Steps::stream(
            input,
            Quick {
                ranges,
                partition: None,
            },
        ))
    }
}

struct Partition {
    low: usize,
    high: usize,
    /// Next free slot of the low partition.
    store: usize,
    scan: usize,
}

struct Quick {
    /// Inclusive ranges still to sort; every range has `low < high`.
    ranges: Vec<(usize, usize)>,
    partition: Option<Partition>,
}

impl Stepper for Quick {
    fn advance(&mut self, t: &mut Tracer) -> bool {
        let Some(p) = self.partition.as_mut() else {
            return match self.ranges.pop() {
                Some((low, high)) => {
                    self.partition = Some(Partition {
                        low,
                        high,
                        store: low,
                        scan: low,
                    });
                    true
                }
                None => false,
            };
        };

        if p.scan < p.high {
            t.compare(p.scan, p.high);
            if t.get(p.scan) <= t.get(p.high) {
                t.swap(p.store, p.scan, Some((p.scan, p.high)));
                p.store += 1;
            }
            p.scan += 1;
            return true;
        }

        let (low, high, pivot) = (p.low, p.high, p.store);
        t.swap(pivot, high, Some((pivot, high)));
        self.partition = None;

        // Right range pushed first so the left one is popped first.
        if pivot + 1 < high {
            self.ranges.push((pivot + 1, high));
        }
        if pivot > low + 1 {
            self.ranges.push((low, pivot - 1));
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::tests::collect;

    #[test]
    fn test_partition_ends_with_pivot_swap() {
        // Arrange: pivot 2, one element below it
        let records = collect(&QuickSort, &[3.0, 1.0, 2.0]);

        // Assert: compare(0,2) no move, compare(1,2) move into slot 0,
        // pivot swap into slot 1
        assert_eq!(records[0].compare, Some((0, 2)));
        assert_eq!(records[1].compare, Some((1, 2)));
        assert_eq!(records[2].swap, Some((0, 1)));
        assert_eq!(records[2].array, vec![1.0, 3.0, 2.0]);
        assert_eq!(records[3].swap, Some((1, 2)));
        assert_eq!(records[3].array, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_sorts_input_with_duplicates() {
        let records = collect(&QuickSort, &[3.0, 3.0, 1.0, 2.0, 3.0, 0.0]);
        assert_eq!(
            records.last().unwrap().array,
            vec![0.0, 1.0, 2.0, 3.0, 3.0, 3.0]
        );
    }

    #[test]
    fn test_two_elements_already_sorted() {
        let records = collect(&QuickSort, &[1.0, 2.0]);
        // compare(0,1), self-swap into the low partition, pivot self-swap, terminal
        assert_eq!(records.len(), 4);
        assert_eq!(records.last().unwrap().array, vec![1.0, 2.0]);
    }
}

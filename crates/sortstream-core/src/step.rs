//! The step record: one frame of sorting state.
//!
//! A [`StepRecord`] is a full snapshot of the array being sorted plus two
//! optional index pairs that tell the viewer what just happened:
//!
//! - `compare` – the two indices being compared (or, for counting-style
//!   algorithms, the index being scanned, as `(i, i)`).
//! - `swap` – the indices that were just written.  A swap of two slots is
//!   `(i, j)`; a single-slot write is `(i, i)`.
//!
//! # JSON representation
//!
//! ```json
//! {"array":[3,5,8,1],"compare":[0,1],"swap":[0,1]}
//! {"array":[1,3,5,8],"compare":null,"swap":null}
//! ```
//!
//! Values that are whole numbers are written without a fractional part so
//! that `3.0` reaches the browser as `3`.

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

/// A pair of array indices, serialized as a two-element JSON array.
pub type IndexPair = (usize, usize);

/// Largest integer magnitude that survives a round trip through an `f64`.
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// One frame of an algorithm's progress.
///
/// Records are produced in strict temporal order and must be delivered to the
/// viewer in that order.  Every record except the last has `compare`, `swap`
/// or both set; the last record of a stream has neither and carries the fully
/// sorted array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    /// Snapshot of the whole sequence at this point.
    #[serde(serialize_with = "serialize_values")]
    pub array: Vec<f64>,
    /// Indices being compared, if this step is a comparison.
    pub compare: Option<IndexPair>,
    /// Indices just written, if this step is a mutation.
    pub swap: Option<IndexPair>,
}

impl StepRecord {
    /// A comparison of `a` and `b`, taken before the comparison has any effect.
    pub fn comparison(array: Vec<f64>, a: usize, b: usize) -> Self {
        Self {
            array,
            compare: Some((a, b)),
            swap: None,
        }
    }

    /// A mutation of the slots in `swap`, taken after the write.
    ///
    /// `compare` is an optional highlight of the comparison that caused it.
    pub fn mutation(array: Vec<f64>, swap: IndexPair, compare: Option<IndexPair>) -> Self {
        Self {
            array,
            compare,
            swap: Some(swap),
        }
    }

    /// The final record of a stream.
    pub fn terminal(array: Vec<f64>) -> Self {
        Self {
            array,
            compare: None,
            swap: None,
        }
    }

    /// Returns `true` for the record that ends a stream.
    pub fn is_terminal(&self) -> bool {
        self.compare.is_none() && self.swap.is_none()
    }
}

/// Serializes a slice of numbers, writing whole numbers as JSON integers.
///
/// Used with `#[serde(serialize_with = "serialize_values")]` on any field that
/// carries an array snapshot.
pub fn serialize_values<S>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut seq = serializer.serialize_seq(Some(values.len()))?;
    for &value in values {
        if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
            seq.serialize_element(&(value as i64))?;
        } else {
            seq.serialize_element(&value)?;
        }
    }
    seq.end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_record_has_no_swap() {
        let step = StepRecord::comparison(vec![5.0, 3.0], 0, 1);
        assert_eq!(step.compare, Some((0, 1)));
        assert_eq!(step.swap, None);
        assert!(!step.is_terminal());
    }

    #[test]
    fn test_terminal_record_is_terminal() {
        let step = StepRecord::terminal(vec![1.0]);
        assert!(step.is_terminal());
    }

    #[test]
    fn test_mutation_record_keeps_highlight() {
        let step = StepRecord::mutation(vec![3.0, 5.0], (0, 1), Some((0, 1)));
        assert_eq!(step.swap, Some((0, 1)));
        assert_eq!(step.compare, Some((0, 1)));
    }

    #[test]
    fn test_whole_numbers_serialize_as_integers() {
        // Arrange
        let step = StepRecord::mutation(vec![3.0, 5.0, 8.0, 1.0], (0, 1), Some((0, 1)));

        // Act
        let json = serde_json::to_string(&step).unwrap();

        // Assert
        assert_eq!(json, r#"{"array":[3,5,8,1],"compare":[0,1],"swap":[0,1]}"#);
    }

    #[test]
    fn test_fractional_numbers_keep_their_fraction() {
        let step = StepRecord::terminal(vec![1.5, -2.0]);
        let json = serde_json::to_string(&step).unwrap();
        assert_eq!(json, r#"{"array":[1.5,-2],"compare":null,"swap":null}"#);
    }
}

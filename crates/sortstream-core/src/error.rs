//! Errors for inputs an algorithm cannot sort.
//!
//! Comparison sorts accept any numbers.  Counting and radix sort index count
//! buffers by value, so they only accept non-negative whole numbers, and
//! counting sort additionally caps the value range it will allocate for.

use thiserror::Error;

/// An input that lies outside an algorithm's domain.
///
/// The `Display` text is shown to the user as-is.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    /// A value is negative, fractional, non-finite or too large to index by.
    #[error("{algorithm} requires non-negative integers (found {value} at index {index})")]
    NotNonNegativeInteger {
        algorithm: &'static str,
        index: usize,
        value: f64,
    },

    /// `max - min + 1` is larger than the configured count buffer limit.
    #[error("{algorithm} value range {range} exceeds the maximum of {max}")]
    RangeTooLarge {
        algorithm: &'static str,
        range: u64,
        max: u64,
    },
}

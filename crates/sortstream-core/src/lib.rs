//! # sortstream-core
//!
//! Instrumented sorting algorithms for step-by-step visualization.
//!
//! Instead of silently returning a sorted vector, every algorithm in this
//! crate produces a [`StepStream`]: a lazy iterator of [`StepRecord`]s, one
//! per comparison, swap or placement, followed by exactly one terminal record
//! that carries the sorted array.
//!
//! The crate has no async runtime, socket or timer dependencies.  Pacing,
//! pause/resume and cancellation are the consumer's business: a consumer
//! simply stops pulling records (or returns an error from a [`StepSink`]) and
//! the algorithm is abandoned at that point.
//!
//! # Modules
//!
//! - **`step`** – The [`StepRecord`] model and its JSON representation.
//! - **`algorithms`** – The nine instrumented algorithms and the
//!   [`SortAlgorithm`] trait they implement.
//! - **`registry`** – [`AlgorithmRegistry`], the id → algorithm mapping handed
//!   to consumers at construction time.
//! - **`emitter`** – The synchronous step emitter contract ([`StepSink`],
//!   [`emit_all`]).
//! - **`error`** – [`InputError`] for inputs outside an algorithm's domain.

pub mod algorithms;
pub mod emitter;
pub mod error;
pub mod registry;
pub mod step;

pub use algorithms::{AlgorithmId, SortAlgorithm, StepStream};
pub use emitter::{emit_all, StepSink};
pub use error::InputError;
pub use registry::AlgorithmRegistry;
pub use step::{IndexPair, StepRecord};

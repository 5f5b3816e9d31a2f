//! Corruption Index Pipeline
//!
//! Pure transform from `(observations, events, configuration)` to a
//! date-ordered `CorruptionIndexSeries`:
//!
//! ```text
//! raw observations -> daily aggregates -> rolling statistics
//!                  -> event attribution -> composite score
//! ```
//!
//! The event-study engine consumes the same normalized per-asset series
//! independently, keyed by a single anchor event's date.
//!
//! # Design Principles
//!
//! 1. **Stateless**: no caching, no shared mutable state; identical inputs
//!    always produce identical output.
//! 2. **Trailing windows only**: rolling statistics never look ahead.
//! 3. **Guarded arithmetic**: every division by a series-wide maximum or a
//!    rolling standard deviation is guarded; a zero denominator yields a zero
//!    signal, never NaN.
//! 4. **Bounded output**: the composite score is clamped to the configured
//!    scale bounds on every row.

pub mod attribution;
pub mod composite;
pub mod config;
pub mod error;
pub mod event_study;
pub mod normalize;
pub mod rolling;

pub use composite::calculate_corruption_index;
pub use config::{EventStudyConfig, IndexConfig, IndexWeights};
pub use error::IndexError;
pub use event_study::run_event_study;

#[cfg(test)]
mod composite_tests;

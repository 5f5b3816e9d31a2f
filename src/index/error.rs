use thiserror::Error;

/// Errors surfaced by the index pipeline.
///
/// `EmptyInput` is the only condition callers are expected to recover from:
/// a live fetch may legitimately return nothing, and the API layer maps it to
/// an empty series rather than a failure. The remaining variants reject a
/// misconfigured pipeline before any computation runs.
///
/// Division guards (zero component maximum, zero rolling std) never surface
/// here; they degrade to a zero signal inside the pipeline. A missing
/// event-study anchor is reported per asset on `AssetStudy`, not as an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndexError {
    #[error("no observations to index")]
    EmptyInput,

    #[error("component weights must be non-negative and sum to 1.0 (sum = {sum})")]
    InvalidWeights { sum: f64 },

    #[error("{name} must be at least 1 day (got {value})")]
    InvalidWindow { name: &'static str, value: usize },

    #[error("scale_min {min} must be below scale_max {max}")]
    InvalidScale { min: f64, max: f64 },
}

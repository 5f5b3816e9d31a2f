use serde::{Deserialize, Serialize};

use super::error::IndexError;

/// Tolerance for the weights-sum-to-one check.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Relative weight of each component signal in the composite score.
///
/// Must be non-negative and sum to 1.0; `IndexConfig::validate` rejects
/// anything else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexWeights {
    pub volatility: f64,
    pub volume_surge: f64,
    pub event_intensity: f64,
}

impl IndexWeights {
    pub fn sum(&self) -> f64 {
        self.volatility + self.volume_surge + self.event_intensity
    }
}

impl Default for IndexWeights {
    fn default() -> Self {
        Self {
            volatility: 0.30,
            volume_surge: 0.30,
            event_intensity: 0.40,
        }
    }
}

/// Parameters for the corruption index calculation.
///
/// Injected into the pipeline and never mutated by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexConfig {
    pub weights: IndexWeights,
    /// Rolling window for price volatility (days)
    pub volatility_window_days: usize,
    /// Rolling window for the volume z-score baseline (days)
    pub volume_window_days: usize,
    /// Forward window over which an event's severity is attributed (days)
    pub event_window_days: usize,
    pub scale_min: f64,
    pub scale_max: f64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            weights: IndexWeights::default(),
            volatility_window_days: 30,
            volume_window_days: 90,
            event_window_days: 7,
            scale_min: 0.0,
            scale_max: 100.0,
        }
    }
}

impl IndexConfig {
    /// Reject misconfigured parameters before any computation runs.
    pub fn validate(&self) -> Result<(), IndexError> {
        let w = &self.weights;
        let negative = w.volatility < 0.0 || w.volume_surge < 0.0 || w.event_intensity < 0.0;
        if negative || (w.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(IndexError::InvalidWeights { sum: w.sum() });
        }

        for (name, value) in [
            ("volatility_window_days", self.volatility_window_days),
            ("volume_window_days", self.volume_window_days),
            ("event_window_days", self.event_window_days),
        ] {
            if value == 0 {
                return Err(IndexError::InvalidWindow { name, value });
            }
        }

        if self.scale_min >= self.scale_max {
            return Err(IndexError::InvalidScale {
                min: self.scale_min,
                max: self.scale_max,
            });
        }

        Ok(())
    }
}

/// Window parameters for the event-study engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventStudyConfig {
    /// Days before the anchor date to include
    pub window_before_days: i64,
    /// Days after the anchor date to include
    pub window_after_days: i64,
    /// Post-event window for the crisis-response summary
    pub crisis_window_days: i64,
}

impl Default for EventStudyConfig {
    fn default() -> Self {
        Self {
            window_before_days: 30,
            window_after_days: 30,
            crisis_window_days: 7,
        }
    }
}

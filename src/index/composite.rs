//! Composite index calculation: the full pipeline from raw observations to a
//! bounded corruption/friction score.

use crate::models::{CorruptionIndexSeries, DailyMetric, Observation, PolicyEvent};

use super::attribution::event_intensity;
use super::config::IndexConfig;
use super::error::IndexError;
use super::normalize::aggregate_daily;
use super::rolling::{rolling_std, rolling_zscore, ZSCORE_CLIP};

/// Compute the corruption index series for a set of observations and events.
///
/// This is a pure function of its inputs: no hidden caching, no shared state,
/// idempotent across invocations. Each component signal is normalized against
/// its own series-wide maximum (the z-score against its fixed clip range),
/// weighted, scaled to `[scale_min, scale_max]` and clamped.
///
/// Rolling statistics that are not yet computable (the first `window - 1`
/// rows) enter the blend as 0. A component whose series-wide maximum is 0
/// (e.g. no events anywhere in the span) contributes 0, never NaN.
pub fn calculate_corruption_index(
    observations: &[Observation],
    events: &[PolicyEvent],
    config: &IndexConfig,
) -> Result<CorruptionIndexSeries, IndexError> {
    config.validate()?;

    let daily = aggregate_daily(observations)?;

    let prices: Vec<f64> = daily.iter().map(|d| d.mean_price).collect();
    let volumes: Vec<f64> = daily.iter().map(|d| d.total_volume).collect();
    let dates: Vec<chrono::NaiveDate> = daily.iter().map(|d| d.date).collect();

    let volatility = rolling_std(&prices, config.volatility_window_days);
    let volume_zscore = rolling_zscore(&volumes, config.volume_window_days);
    let intensity = event_intensity(&dates, events, config.event_window_days);

    let max_volatility = volatility
        .iter()
        .flatten()
        .fold(0.0_f64, |acc, v| acc.max(*v));
    let max_intensity = intensity.iter().fold(0.0_f64, |acc, v| acc.max(*v));

    let weights = &config.weights;
    let span = config.scale_max - config.scale_min;

    let metrics = daily
        .into_iter()
        .enumerate()
        .map(|(i, day)| {
            let vol = volatility[i];
            let zscore = volume_zscore[i];
            let ev = intensity[i];

            let vol_share = if max_volatility > 0.0 {
                weights.volatility * vol.unwrap_or(0.0) / max_volatility
            } else {
                0.0
            };
            // The clipped z-score lives in [-CLIP, CLIP]; its full range maps
            // onto the component's weight share, so surges and droughts pull
            // the score symmetrically.
            let surge_share = weights.volume_surge * zscore.unwrap_or(0.0) / (2.0 * ZSCORE_CLIP);
            let event_share = if max_intensity > 0.0 {
                weights.event_intensity * ev / max_intensity
            } else {
                0.0
            };

            let raw = config.scale_min + span * (vol_share + surge_share + event_share);

            DailyMetric {
                date: day.date,
                mean_price: day.mean_price,
                total_volume: day.total_volume,
                volatility: vol,
                volume_zscore: zscore,
                event_intensity: ev,
                corruption_index: raw.clamp(config.scale_min, config.scale_max),
            }
        })
        .collect();

    Ok(CorruptionIndexSeries { metrics })
}

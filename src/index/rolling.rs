//! Trailing rolling statistics.
//!
//! Windows are strictly trailing (inclusive of the current row, no
//! look-ahead). A statistic is `None` until the window has filled, i.e. for
//! exactly the first `window - 1` rows.

use statrs::statistics::Statistics;

/// Z-scores are clipped to this magnitude so extreme surges cannot dominate
/// the composite score.
pub const ZSCORE_CLIP: f64 = 3.0;

/// Trailing mean over `window` rows.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| w.iter().mean())
}

/// Trailing sample standard deviation (Bessel-corrected) over `window` rows.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| w.iter().std_dev())
}

/// Trailing z-score of each value against its own `window`-row baseline,
/// clipped to `[-ZSCORE_CLIP, ZSCORE_CLIP]`.
///
/// A zero rolling standard deviation means no surge signal, so the z-score is
/// 0 rather than a division error.
pub fn rolling_zscore(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| {
        let mean = w.iter().mean();
        let std = w.iter().std_dev();
        if std > 0.0 {
            let last = w[w.len() - 1];
            ((last - mean) / std).clamp(-ZSCORE_CLIP, ZSCORE_CLIP)
        } else {
            0.0
        }
    })
}

fn rolling<F>(values: &[f64], window: usize, stat: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> f64,
{
    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        if i + 1 < window {
            out.push(None);
        } else {
            out.push(Some(stat(&values[i + 1 - window..=i])));
        }
    }
    out
}

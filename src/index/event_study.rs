//! Event study: per-asset price behavior in a symmetric window around a
//! single anchor event.

use chrono::Duration;

use crate::models::{AssetStudy, EventStudyResult, Observation, PolicyEvent, StudyPoint, StudySummary};

use super::config::EventStudyConfig;
use super::error::IndexError;
use super::normalize::per_asset_prices;

/// Align every asset's daily prices around the anchor event's date.
///
/// Day 0 is the anchor day; offsets run over
/// `[-window_before_days, window_after_days]`. Cumulative returns are
/// relative to the day-0 price. An asset with no observation on day 0 (or a
/// zero day-0 price, which cannot anchor a return) is reported with
/// `anchor_missing = true` and undefined cumulative returns; other assets
/// compute normally.
pub fn run_event_study(
    observations: &[Observation],
    anchor: &PolicyEvent,
    config: &EventStudyConfig,
) -> Result<EventStudyResult, IndexError> {
    if observations.is_empty() {
        return Err(IndexError::EmptyInput);
    }

    let window_start = anchor.date - Duration::days(config.window_before_days);
    let window_end = anchor.date + Duration::days(config.window_after_days);

    let assets = per_asset_prices(observations)
        .into_iter()
        .map(|(asset_id, series)| {
            let anchor_price = series.get(&anchor.date).copied().filter(|p| *p > 0.0);

            let points: Vec<StudyPoint> = series
                .range(window_start..=window_end)
                .map(|(date, price)| {
                    let offset_days = (*date - anchor.date).num_days();
                    StudyPoint {
                        offset_days,
                        price: *price,
                        cumulative_return: anchor_price.map(|p0| (price / p0 - 1.0) * 100.0),
                    }
                })
                .collect();

            let summary = summarize(&points, config.crisis_window_days);

            AssetStudy {
                asset_id,
                anchor_missing: anchor_price.is_none(),
                points,
                summary,
            }
        })
        .collect();

    Ok(EventStudyResult {
        anchor: anchor.clone(),
        assets,
    })
}

/// Pre-event mean price vs post-event mean over `[0, crisis_window_days]`.
fn summarize(points: &[StudyPoint], crisis_window_days: i64) -> Option<StudySummary> {
    let pre: Vec<f64> = points
        .iter()
        .filter(|p| p.offset_days < 0)
        .map(|p| p.price)
        .collect();
    let post: Vec<f64> = points
        .iter()
        .filter(|p| p.offset_days >= 0 && p.offset_days <= crisis_window_days)
        .map(|p| p.price)
        .collect();

    if pre.is_empty() || post.is_empty() {
        return None;
    }

    let pre_event_mean = pre.iter().sum::<f64>() / pre.len() as f64;
    let post_event_mean = post.iter().sum::<f64>() / post.len() as f64;

    let change_pct = if pre_event_mean > 0.0 {
        Some((post_event_mean / pre_event_mean - 1.0) * 100.0)
    } else {
        None
    };

    Some(StudySummary {
        pre_event_mean,
        post_event_mean,
        change_pct,
    })
}

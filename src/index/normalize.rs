//! Time series normalization: raw per-asset observations onto a common
//! daily calendar.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::Observation;

use super::error::IndexError;

/// One calendar day aggregated across every observed asset.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    /// Arithmetic mean of all observed prices for the date
    pub mean_price: f64,
    /// Sum of all observed volumes for the date
    pub total_volume: f64,
}

/// Aggregate raw observations into one record per unique date, ordered by
/// date.
///
/// Duplicate `(date, asset_id)` pairs collapse last-write-wins, so the result
/// is deterministic regardless of input order. Dates with no observations are
/// simply absent; there is no synthetic zero-fill.
pub fn aggregate_daily(observations: &[Observation]) -> Result<Vec<DailyAggregate>, IndexError> {
    if observations.is_empty() {
        return Err(IndexError::EmptyInput);
    }

    // Collapse duplicates first; the later observation in input order wins.
    let mut deduped: BTreeMap<(NaiveDate, &str), &Observation> = BTreeMap::new();
    for obs in observations {
        deduped.insert((obs.date, obs.asset_id.as_str()), obs);
    }

    let mut by_date: BTreeMap<NaiveDate, (f64, f64, u32)> = BTreeMap::new();
    for ((date, _), obs) in &deduped {
        let entry = by_date.entry(*date).or_insert((0.0, 0.0, 0));
        entry.0 += obs.price;
        entry.1 += obs.volume;
        entry.2 += 1;
    }

    Ok(by_date
        .into_iter()
        .map(|(date, (price_sum, volume_sum, count))| DailyAggregate {
            date,
            mean_price: price_sum / count as f64,
            total_volume: volume_sum,
        })
        .collect())
}

/// Per-asset daily price series, same dedup policy as `aggregate_daily`.
///
/// Used by the event-study engine, which aligns each asset independently
/// around an anchor date.
pub fn per_asset_prices(
    observations: &[Observation],
) -> BTreeMap<String, BTreeMap<NaiveDate, f64>> {
    let mut by_asset: BTreeMap<String, BTreeMap<NaiveDate, f64>> = BTreeMap::new();
    for obs in observations {
        by_asset
            .entry(obs.asset_id.clone())
            .or_default()
            .insert(obs.date, obs.price);
    }
    by_asset
}

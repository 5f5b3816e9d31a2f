//! Event attribution: mapping discrete policy events onto the daily calendar.

use chrono::{Duration, NaiveDate};

use crate::models::PolicyEvent;

/// Accumulated event severity per calendar day.
///
/// Each event contributes its full severity to every day in the half-open
/// window `[event.date, event.date + window_days)`. Overlapping windows add;
/// two events on the same date intentionally compound. Events dated outside
/// the series still contribute to any in-range day their window touches.
pub fn event_intensity(
    dates: &[NaiveDate],
    events: &[PolicyEvent],
    window_days: usize,
) -> Vec<f64> {
    let mut intensity = vec![0.0; dates.len()];
    let window = Duration::days(window_days as i64);

    for event in events {
        let start = event.date;
        let end = start + window;
        for (i, date) in dates.iter().enumerate() {
            if *date >= start && *date < end {
                intensity[i] += event.severity as f64;
            }
        }
    }

    intensity
}

//! Tests for the composite index calculator.
//!
//! These tests verify:
//! 1. Configuration rejection (weights, windows, scale bounds)
//! 2. The bounded-output invariant under varied weight configurations
//! 3. Division guards: zero component maxima contribute 0, never NaN
//! 4. Missing rolling statistics enter the blend as 0
//! 5. Idempotence: identical inputs produce identical series

use chrono::{Duration, NaiveDate};

use crate::index::composite::calculate_corruption_index;
use crate::index::config::{IndexConfig, IndexWeights};
use crate::index::error::IndexError;
use crate::models::{EventType, Observation, PolicyEvent};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
}

/// Single-asset series with mildly varying price and volume.
fn observations(days: i64) -> Vec<Observation> {
    (0..days)
        .map(|i| {
            Observation::new(
                start() + Duration::days(i),
                "bitcoin",
                100.0 + (i % 7) as f64 * 3.0,
                1_000.0 + (i % 11) as f64 * 50.0,
            )
        })
        .collect()
}

fn event(offset_days: i64, severity: u8) -> PolicyEvent {
    PolicyEvent::new(
        start() + Duration::days(offset_days),
        "Testland",
        EventType::CapitalControls,
        "withdrawal limits",
        severity,
    )
}

fn small_config() -> IndexConfig {
    IndexConfig {
        volatility_window_days: 5,
        volume_window_days: 5,
        ..IndexConfig::default()
    }
}

#[test]
fn rejects_weights_not_summing_to_one() {
    let config = IndexConfig {
        weights: IndexWeights {
            volatility: 0.5,
            volume_surge: 0.5,
            event_intensity: 0.5,
        },
        ..IndexConfig::default()
    };

    let err = calculate_corruption_index(&observations(10), &[], &config).unwrap_err();
    assert!(matches!(err, IndexError::InvalidWeights { .. }));
}

#[test]
fn rejects_negative_weights_even_when_summing_to_one() {
    let config = IndexConfig {
        weights: IndexWeights {
            volatility: -0.5,
            volume_surge: 0.5,
            event_intensity: 1.0,
        },
        ..IndexConfig::default()
    };

    assert!(matches!(
        calculate_corruption_index(&observations(10), &[], &config),
        Err(IndexError::InvalidWeights { .. })
    ));
}

#[test]
fn rejects_zero_windows_and_inverted_scale() {
    let zero_window = IndexConfig {
        event_window_days: 0,
        ..IndexConfig::default()
    };
    assert!(matches!(
        calculate_corruption_index(&observations(10), &[], &zero_window),
        Err(IndexError::InvalidWindow { .. })
    ));

    let inverted = IndexConfig {
        scale_min: 100.0,
        scale_max: 0.0,
        ..IndexConfig::default()
    };
    assert!(matches!(
        calculate_corruption_index(&observations(10), &[], &inverted),
        Err(IndexError::InvalidScale { .. })
    ));
}

#[test]
fn index_stays_within_scale_bounds_for_valid_weightings() {
    let weightings = [
        (0.30, 0.30, 0.40),
        (1.0, 0.0, 0.0),
        (0.0, 1.0, 0.0),
        (0.0, 0.0, 1.0),
        (0.25, 0.5, 0.25),
    ];
    let events = vec![event(3, 9), event(3, 9), event(20, 2)];

    for (volatility, volume_surge, event_intensity) in weightings {
        let config = IndexConfig {
            weights: IndexWeights {
                volatility,
                volume_surge,
                event_intensity,
            },
            ..small_config()
        };

        let series = calculate_corruption_index(&observations(40), &events, &config).unwrap();
        assert_eq!(series.len(), 40);
        for metric in &series.metrics {
            assert!(
                metric.corruption_index >= config.scale_min
                    && metric.corruption_index <= config.scale_max,
                "index {} out of bounds on {}",
                metric.corruption_index,
                metric.date
            );
            assert!(metric.corruption_index.is_finite());
        }
    }
}

#[test]
fn custom_scale_bounds_are_honored() {
    let config = IndexConfig {
        scale_min: 10.0,
        scale_max: 50.0,
        ..small_config()
    };

    let series = calculate_corruption_index(&observations(30), &[event(5, 10)], &config).unwrap();
    for metric in &series.metrics {
        assert!(metric.corruption_index >= 10.0 && metric.corruption_index <= 50.0);
    }
}

#[test]
fn no_events_means_zero_event_component_not_nan() {
    let series = calculate_corruption_index(&observations(30), &[], &small_config()).unwrap();

    for metric in &series.metrics {
        assert_eq!(metric.event_intensity, 0.0);
        assert!(metric.corruption_index.is_finite());
    }
}

#[test]
fn series_shorter_than_windows_scores_from_events_alone() {
    // 3 rows against 5-day windows: every rolling statistic is undefined and
    // must enter the blend as 0.
    let series = calculate_corruption_index(&observations(3), &[event(1, 8)], &small_config())
        .unwrap();

    assert_eq!(series.len(), 3);
    assert!(series.metrics.iter().all(|m| m.volatility.is_none()));
    assert!(series.metrics.iter().all(|m| m.volume_zscore.is_none()));

    // Default weights: the event day carries exactly the event share of the
    // scale (0.40 * 100), the day before carries nothing.
    assert_eq!(series.metrics[0].corruption_index, 0.0);
    assert!((series.metrics[1].corruption_index - 40.0).abs() < 1e-9);
    assert!((series.metrics[2].corruption_index - 40.0).abs() < 1e-9);
}

#[test]
fn negative_volume_surge_clamps_at_scale_min() {
    // Volume collapses on the last day; with all weight on the surge
    // component the raw blend goes negative and must clamp to scale_min.
    let mut obs = observations(20);
    for (i, o) in obs.iter_mut().enumerate() {
        o.volume = 1_000.0 + (i % 3) as f64;
    }
    obs.last_mut().unwrap().volume = 0.0;

    let config = IndexConfig {
        weights: IndexWeights {
            volatility: 0.0,
            volume_surge: 1.0,
            event_intensity: 0.0,
        },
        ..small_config()
    };

    let series = calculate_corruption_index(&obs, &[], &config).unwrap();
    let last = series.latest().unwrap();
    assert!(last.volume_zscore.unwrap() < 0.0);
    assert_eq!(last.corruption_index, config.scale_min);
}

#[test]
fn identical_inputs_produce_identical_output() {
    let obs = observations(60);
    let events = vec![event(10, 6), event(30, 9)];
    let config = IndexConfig::default();

    let first = calculate_corruption_index(&obs, &events, &config).unwrap();
    let second = calculate_corruption_index(&obs, &events, &config).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn empty_observations_surface_the_recoverable_empty_input() {
    assert_eq!(
        calculate_corruption_index(&[], &[event(0, 5)], &IndexConfig::default()),
        Err(IndexError::EmptyInput)
    );
}

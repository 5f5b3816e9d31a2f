//! Curated catalog of policy friction events.
//!
//! These are the known sanctions, capital-control, banking, regulatory and
//! market events the index attributes severity from. The catalog is static
//! and read-only to the pipeline; callers can append their own events before
//! handing the collection to the index calculation.

use chrono::NaiveDate;
use lazy_static::lazy_static;

use crate::models::{EventType, PolicyEvent};

lazy_static! {
    static ref CATALOG: Vec<PolicyEvent> = build_catalog();
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid catalog date")
}

fn build_catalog() -> Vec<PolicyEvent> {
    vec![
        PolicyEvent::new(
            date(2021, 9, 24),
            "China",
            EventType::Regulatory,
            "China declares all crypto transactions illegal",
            9,
        ),
        PolicyEvent::new(
            date(2022, 2, 24),
            "Russia",
            EventType::Sanctions,
            "Russia-Ukraine war sanctions begin",
            9,
        ),
        PolicyEvent::new(
            date(2022, 3, 9),
            "Russia",
            EventType::Banking,
            "Russia removed from SWIFT",
            10,
        ),
        PolicyEvent::new(
            date(2022, 5, 9),
            "Global",
            EventType::Market,
            "Terra/LUNA collapse",
            9,
        ),
        PolicyEvent::new(
            date(2022, 6, 15),
            "Lebanon",
            EventType::Banking,
            "Lebanon banking crisis deepens, deposit withdrawals restricted",
            8,
        ),
        PolicyEvent::new(
            date(2022, 11, 8),
            "Global",
            EventType::Regulatory,
            "FTX collapse triggers regulatory scrutiny",
            7,
        ),
        PolicyEvent::new(
            date(2023, 2, 28),
            "Nigeria",
            EventType::CapitalControls,
            "Nigeria naira devaluation and cash withdrawal limits",
            7,
        ),
        PolicyEvent::new(
            date(2023, 3, 10),
            "USA",
            EventType::Banking,
            "Silicon Valley Bank collapse",
            8,
        ),
        PolicyEvent::new(
            date(2023, 6, 5),
            "USA",
            EventType::Regulatory,
            "SEC sues Binance and Coinbase",
            6,
        ),
        PolicyEvent::new(
            date(2023, 8, 9),
            "Argentina",
            EventType::CapitalControls,
            "Peso devaluation accelerates, capital flight",
            8,
        ),
    ]
}

/// The built-in event catalog, ordered by date.
pub fn policy_events() -> &'static [PolicyEvent] {
    &CATALOG
}

/// Catalog slice matching the optional filters.
pub fn filter_events(
    event_type: Option<EventType>,
    country: Option<&str>,
) -> Vec<&'static PolicyEvent> {
    CATALOG
        .iter()
        .filter(|e| event_type.map_or(true, |t| e.event_type == t))
        .filter(|e| country.map_or(true, |c| e.country.eq_ignore_ascii_case(c)))
        .collect()
}

/// Find an anchor event by its exact date, optionally narrowed by country.
///
/// Dates are the unambiguous identifier for event-study anchors; when two
/// catalog events share a date the country narrows the match.
pub fn find_event(target: NaiveDate, country: Option<&str>) -> Option<&'static PolicyEvent> {
    CATALOG
        .iter()
        .filter(|e| e.date == target)
        .find(|e| country.map_or(true, |c| e.country.eq_ignore_ascii_case(c)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_date_ordered_and_bounded() {
        let events = policy_events();
        assert!(!events.is_empty());
        assert!(events.windows(2).all(|w| w[0].date <= w[1].date));
        assert!(events.iter().all(|e| (1..=10).contains(&e.severity)));
    }

    #[test]
    fn filters_by_type_and_country() {
        let banking = filter_events(Some(EventType::Banking), None);
        assert!(banking.iter().all(|e| e.event_type == EventType::Banking));
        assert_eq!(banking.len(), 3);

        let russia = filter_events(None, Some("russia"));
        assert_eq!(russia.len(), 2);

        let russia_banking = filter_events(Some(EventType::Banking), Some("Russia"));
        assert_eq!(russia_banking.len(), 1);
        assert_eq!(russia_banking[0].severity, 10);
    }

    #[test]
    fn finds_anchor_by_date() {
        let svb = find_event(date(2023, 3, 10), None).expect("SVB event");
        assert_eq!(svb.country, "USA");
        assert!(find_event(date(2020, 1, 1), None).is_none());
        assert!(find_event(date(2023, 3, 10), Some("France")).is_none());
    }
}

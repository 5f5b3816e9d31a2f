use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single raw market observation for one asset on one calendar day.
///
/// Produced by a data source (CoinGecko, fixtures); the pipeline never
/// creates these itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub asset_id: String,
    pub price: f64,
    pub volume: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, asset_id: impl Into<String>, price: f64, volume: f64) -> Self {
        Self {
            date,
            asset_id: asset_id.into(),
            price,
            volume,
        }
    }
}

/// Policy friction event categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Sanctions,
    CapitalControls,
    Banking,
    Regulatory,
    Market,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Sanctions => "sanctions",
            EventType::CapitalControls => "capital_controls",
            EventType::Banking => "banking",
            EventType::Regulatory => "regulatory",
            EventType::Market => "market",
        }
    }

    /// What falls under this category.
    pub fn description(&self) -> &'static str {
        match self {
            EventType::Sanctions => "International sanctions, SWIFT removal, asset freezes",
            EventType::CapitalControls => {
                "Forex restrictions, withdrawal limits, currency devaluation"
            }
            EventType::Banking => "Bank runs, deposit restrictions, banking sector stress",
            EventType::Regulatory => "Crypto bans, KYC enforcement, exchange crackdowns",
            EventType::Market => "Exchange collapses, depegs, protocol failures",
        }
    }

    /// Typical severity range observed for this category (inclusive).
    pub fn typical_severity(&self) -> (u8, u8) {
        match self {
            EventType::Sanctions => (7, 10),
            EventType::CapitalControls => (5, 9),
            EventType::Banking => (6, 9),
            EventType::Regulatory => (4, 8),
            EventType::Market => (5, 9),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sanctions" => Some(EventType::Sanctions),
            "capital_controls" | "capital controls" => Some(EventType::CapitalControls),
            "banking" => Some(EventType::Banking),
            "regulatory" => Some(EventType::Regulatory),
            "market" => Some(EventType::Market),
            _ => None,
        }
    }
}

/// A dated policy friction event with a 1-10 severity score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyEvent {
    pub date: NaiveDate,
    pub country: String,
    pub event_type: EventType,
    pub description: String,
    /// Severity score, 1 (minor) to 10 (extreme)
    pub severity: u8,
}

impl PolicyEvent {
    pub fn new(
        date: NaiveDate,
        country: impl Into<String>,
        event_type: EventType,
        description: impl Into<String>,
        severity: u8,
    ) -> Self {
        Self {
            date,
            country: country.into(),
            event_type,
            description: description.into(),
            severity,
        }
    }
}

/// Per-day aggregate carrying the normalized metrics and the composite score.
///
/// `volatility` and `volume_zscore` are `None` for the first `window - 1` days
/// of the series; that is expected, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetric {
    pub date: NaiveDate,
    pub mean_price: f64,
    pub total_volume: f64,
    pub volatility: Option<f64>,
    /// Rolling volume z-score, clipped to [-3, 3]
    pub volume_zscore: Option<f64>,
    /// Summed severity of events whose attribution window covers this day
    pub event_intensity: f64,
    /// Composite score, always within the configured scale bounds
    pub corruption_index: f64,
}

/// Date-ordered corruption index series covering the observed calendar span.
///
/// Dates with no observations are absent; every row carries its own date so
/// gaps are explicit rather than silently re-indexed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CorruptionIndexSeries {
    pub metrics: Vec<DailyMetric>,
}

impl CorruptionIndexSeries {
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn latest(&self) -> Option<&DailyMetric> {
        self.metrics.last()
    }

    /// First and last date covered by the series.
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.metrics.first(), self.metrics.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        }
    }
}

/// One aligned event-study row for a single asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyPoint {
    /// Signed day offset from the anchor date (0 = anchor day)
    pub offset_days: i64,
    pub price: f64,
    /// `(price / price(0) - 1) * 100`; `None` when the asset has no
    /// observation on the anchor day
    pub cumulative_return: Option<f64>,
}

/// Pre/post summary for one asset around the anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudySummary {
    /// Mean price over offsets < 0
    pub pre_event_mean: f64,
    /// Mean price over offsets in [0, crisis_window]
    pub post_event_mean: f64,
    /// Percent change post vs pre; `None` if the pre-event mean is 0 or there
    /// is no pre-event data
    pub change_pct: Option<f64>,
}

/// Event-study outcome for a single asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetStudy {
    pub asset_id: String,
    /// True when the asset has no observation on the anchor day; cumulative
    /// returns are undefined for the whole window in that case
    pub anchor_missing: bool,
    pub points: Vec<StudyPoint>,
    pub summary: Option<StudySummary>,
}

/// Full event-study result around one anchor event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventStudyResult {
    pub anchor: PolicyEvent,
    pub assets: Vec<AssetStudy>,
}

impl EventStudyResult {
    /// Asset ids that could not be anchored (no day-0 observation).
    pub fn unanchored_assets(&self) -> Vec<&str> {
        self.assets
            .iter()
            .filter(|a| a.anchor_missing)
            .map(|a| a.asset_id.as_str())
            .collect()
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub coingecko_base_url: String,
    pub cache_ttl_secs: u64,
    pub default_assets: Vec<String>,
    pub default_days: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080);

        let coingecko_base_url = std::env::var("COINGECKO_BASE_URL")
            .unwrap_or_else(|_| "https://api.coingecko.com/api/v3".to_string());

        let cache_ttl_secs = std::env::var("FETCH_CACHE_TTL_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .unwrap_or(3600);

        let default_assets = std::env::var("TRACKED_ASSETS")
            .unwrap_or_else(|_| "bitcoin,ethereum,tether,monero".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let default_days = std::env::var("DEFAULT_DAY_SPAN")
            .unwrap_or_else(|_| "365".to_string())
            .parse()
            .unwrap_or(365);

        Ok(Self {
            port,
            coingecko_base_url,
            cache_ttl_secs,
            default_assets,
            default_days,
        })
    }
}

/// UTC timestamp string used in API response envelopes.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

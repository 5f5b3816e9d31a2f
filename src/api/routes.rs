use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::events;
use crate::index::{
    calculate_corruption_index, run_event_study, EventStudyConfig, IndexConfig, IndexError,
};
use crate::models::{
    now_rfc3339, AssetStudy, Config, DailyMetric, EventType, Observation, PolicyEvent,
};
use crate::portfolio::{self, Allocation, LeverageSettings, PortfolioProjection};
use crate::sources::{FetchCache, FetchReport, PriceHistorySource};
use crate::sources::stablecoin::{simulated_stablecoin_supply, StablecoinSupply};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub index_config: IndexConfig,
    pub study_config: EventStudyConfig,
    pub source: Arc<dyn PriceHistorySource>,
    pub cache: Arc<FetchCache>,
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/index", get(get_index))
        .route("/api/market-data", get(get_market_data))
        .route("/api/events", get(get_events))
        .route("/api/event-study", get(get_event_study))
        .route("/api/stablecoins", get(get_stablecoins))
        .route("/api/portfolio", post(post_portfolio))
        .with_state(state)
}

// ===== Route Handlers =====

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Corruption index series for the requested asset set and day span
async fn get_index(
    State(state): State<AppState>,
    Query(params): Query<MarketQuery>,
) -> Result<Json<IndexResponse>, ApiError> {
    let (assets, days) = params.resolve(&state.config);
    let report = fetch_cached(&state, &assets, days).await?;

    let series = match calculate_corruption_index(
        &report.observations,
        events::policy_events(),
        &state.index_config,
    ) {
        Ok(series) => series,
        Err(IndexError::EmptyInput) => Default::default(),
        Err(err) => return Err(ApiError::Internal(err.into())),
    };

    Ok(Json(IndexResponse {
        count: series.len(),
        empty_input: series.is_empty(),
        failed_assets: report.failures.iter().map(|f| f.asset_id.clone()).collect(),
        metrics: series.metrics,
        timestamp: now_rfc3339(),
    }))
}

/// Raw daily observations, with per-asset fetch failures reported
async fn get_market_data(
    State(state): State<AppState>,
    Query(params): Query<MarketQuery>,
) -> Result<Json<MarketDataResponse>, ApiError> {
    let (assets, days) = params.resolve(&state.config);
    let report = fetch_cached(&state, &assets, days).await?;

    Ok(Json(MarketDataResponse {
        count: report.observations.len(),
        failed_assets: report.failures.iter().map(|f| f.asset_id.clone()).collect(),
        observations: report.observations,
        timestamp: now_rfc3339(),
    }))
}

/// Policy event catalog with optional type/country filters
async fn get_events(
    Query(params): Query<EventQuery>,
) -> Result<Json<EventsResponse>, ApiError> {
    let event_type = params
        .event_type
        .as_deref()
        .map(|s| {
            EventType::parse(s)
                .ok_or_else(|| ApiError::BadRequest(format!("Unknown event type: {}", s)))
        })
        .transpose()?;

    let events: Vec<PolicyEvent> = events::filter_events(event_type, params.country.as_deref())
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(EventsResponse {
        count: events.len(),
        events,
        timestamp: now_rfc3339(),
    }))
}

/// Event study around the catalog event anchored at the given date
async fn get_event_study(
    State(state): State<AppState>,
    Query(params): Query<EventStudyQuery>,
) -> Result<Json<EventStudyResponse>, ApiError> {
    let anchor = events::find_event(params.date, params.country.as_deref())
        .ok_or_else(|| ApiError::NotFound(format!("No catalog event on {}", params.date)))?;

    let assets = params
        .assets
        .map(|list| parse_asset_list(&list))
        .unwrap_or_else(|| state.config.default_assets.clone());
    let days = params.days.unwrap_or(state.config.default_days);
    let report = fetch_cached(&state, &assets, days).await?;

    let result = match run_event_study(&report.observations, anchor, &state.study_config) {
        Ok(result) => result,
        Err(IndexError::EmptyInput) => {
            return Ok(Json(EventStudyResponse {
                anchor: anchor.clone(),
                empty_input: true,
                unanchored_assets: Vec::new(),
                assets: Vec::new(),
                timestamp: now_rfc3339(),
            }))
        }
        Err(err) => return Err(ApiError::Internal(err.into())),
    };

    Ok(Json(EventStudyResponse {
        anchor: result.anchor.clone(),
        empty_input: false,
        unanchored_assets: result
            .unanchored_assets()
            .into_iter()
            .map(str::to_string)
            .collect(),
        assets: result.assets,
        timestamp: now_rfc3339(),
    }))
}

/// Simulated stablecoin supply series (capital-flight proxy)
async fn get_stablecoins(
    State(state): State<AppState>,
    Query(params): Query<StablecoinQuery>,
) -> Json<StablecoinResponse> {
    let days = params.days.unwrap_or(state.config.default_days);
    let supply = simulated_stablecoin_supply(Utc::now().date_naive(), days);

    Json(StablecoinResponse {
        count: supply.len(),
        supply,
        timestamp: now_rfc3339(),
    })
}

/// Portfolio projection for an allocation + leverage choice
async fn post_portfolio(
    Json(request): Json<PortfolioRequest>,
) -> Result<Json<PortfolioResponse>, ApiError> {
    let allocation = request.allocation.unwrap_or_default();
    let leverage = request.leverage.unwrap_or_default();

    let projection = portfolio::project(&allocation, &leverage).ok_or_else(|| {
        ApiError::BadRequest(format!(
            "Allocation must total 100% (currently {}%)",
            allocation.total_pct()
        ))
    })?;

    Ok(Json(PortfolioResponse {
        allocation,
        leverage,
        projection,
        timestamp: now_rfc3339(),
    }))
}

// ===== Fetch plumbing =====

/// Cache-aware fetch keyed by the exact request parameters.
async fn fetch_cached(
    state: &AppState,
    assets: &[String],
    days: u32,
) -> Result<FetchReport, ApiError> {
    if let Some(report) = state.cache.get(assets, days) {
        return Ok(report);
    }

    let report = state.source.fetch(assets, days).await?;
    state.cache.put(assets, days, report.clone());
    Ok(report)
}

fn parse_asset_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// ===== Request/Response Types =====

#[derive(Debug, Deserialize)]
struct MarketQuery {
    /// Comma-separated asset ids; defaults to the tracked set
    assets: Option<String>,
    /// Days of history; defaults to the configured span
    days: Option<u32>,
}

impl MarketQuery {
    fn resolve(&self, config: &Config) -> (Vec<String>, u32) {
        let assets = self
            .assets
            .as_deref()
            .map(parse_asset_list)
            .filter(|list| !list.is_empty())
            .unwrap_or_else(|| config.default_assets.clone());
        (assets, self.days.unwrap_or(config.default_days))
    }
}

#[derive(Debug, Deserialize)]
struct EventQuery {
    event_type: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventStudyQuery {
    /// Anchor date (YYYY-MM-DD); must match a catalog event
    date: NaiveDate,
    /// Narrows the anchor when two events share a date
    country: Option<String>,
    assets: Option<String>,
    days: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct StablecoinQuery {
    days: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct PortfolioRequest {
    allocation: Option<Allocation>,
    leverage: Option<LeverageSettings>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Serialize)]
struct IndexResponse {
    count: usize,
    /// True when the fetch produced no observations at all
    empty_input: bool,
    failed_assets: Vec<String>,
    metrics: Vec<DailyMetric>,
    timestamp: String,
}

#[derive(Serialize)]
struct MarketDataResponse {
    count: usize,
    failed_assets: Vec<String>,
    observations: Vec<Observation>,
    timestamp: String,
}

#[derive(Serialize)]
struct EventsResponse {
    count: usize,
    events: Vec<PolicyEvent>,
    timestamp: String,
}

#[derive(Serialize)]
struct EventStudyResponse {
    anchor: PolicyEvent,
    empty_input: bool,
    /// Assets with no observation on the anchor day
    unanchored_assets: Vec<String>,
    assets: Vec<AssetStudy>,
    timestamp: String,
}

#[derive(Serialize)]
struct StablecoinResponse {
    count: usize,
    supply: Vec<StablecoinSupply>,
    timestamp: String,
}

#[derive(Serialize)]
struct PortfolioResponse {
    allocation: Allocation,
    leverage: LeverageSettings,
    projection: PortfolioProjection,
    timestamp: String,
}

// ===== Error Handling =====

#[derive(Debug)]
enum ApiError {
    Internal(anyhow::Error),
    NotFound(String),
    BadRequest(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Internal(err) => {
                tracing::error!("Internal error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

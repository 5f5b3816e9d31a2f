//! CoinGecko REST client for daily price/volume history.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::models::Observation;

use super::{FetchFailure, FetchReport, PriceHistorySource};

pub const COINGECKO_API_BASE: &str = "https://api.coingecko.com/api/v3";

#[derive(Clone)]
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
}

/// Raw `/coins/{id}/market_chart` payload: `[timestamp_ms, value]` pairs.
#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Vec<[f64; 2]>,
    #[serde(default)]
    total_volumes: Vec<[f64; 2]>,
}

impl CoinGeckoClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build CoinGecko client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch daily history for one asset.
    pub async fn market_chart(&self, asset_id: &str, days: u32) -> Result<Vec<Observation>> {
        let url = self.url(&format!("/coins/{}/market_chart", asset_id));
        let qp = [
            ("vs_currency", "usd".to_string()),
            ("days", days.to_string()),
            ("interval", "daily".to_string()),
        ];

        let resp = self
            .client
            .get(url)
            .query(&qp)
            .send()
            .await
            .with_context(|| format!("GET market_chart for {} failed", asset_id))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "GET market_chart for {} {}: {}",
                asset_id,
                status,
                text
            ));
        }

        let chart = resp
            .json::<MarketChartResponse>()
            .await
            .context("Failed to parse market_chart response")?;

        Ok(to_observations(asset_id, &chart))
    }
}

/// Pair price and volume samples by row; volume defaults to 0 when the volume
/// stream is shorter than the price stream.
fn to_observations(asset_id: &str, chart: &MarketChartResponse) -> Vec<Observation> {
    chart
        .prices
        .iter()
        .enumerate()
        .filter_map(|(i, [ts_ms, price])| {
            let ts = DateTime::from_timestamp_millis(*ts_ms as i64)?;
            let volume = chart.total_volumes.get(i).map(|[_, v]| *v).unwrap_or(0.0);
            Some(Observation::new(ts.date_naive(), asset_id, *price, volume))
        })
        .collect()
}

#[async_trait]
impl PriceHistorySource for CoinGeckoClient {
    /// Fetch all requested assets, reporting per-asset failures instead of
    /// aborting the whole call.
    async fn fetch(&self, asset_ids: &[String], days: u32) -> Result<FetchReport> {
        let mut report = FetchReport::default();

        for asset_id in asset_ids {
            match self.market_chart(asset_id, days).await {
                Ok(observations) => report.observations.extend(observations),
                Err(err) => {
                    warn!(asset = asset_id.as_str(), "Could not fetch market data: {err:#}");
                    report.failures.push(FetchFailure {
                        asset_id: asset_id.clone(),
                        reason: format!("{err:#}"),
                    });
                }
            }
        }

        Ok(report)
    }
}

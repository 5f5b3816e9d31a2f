//! Data source collaborators.
//!
//! The pipeline never issues network calls itself; it consumes
//! already-materialized `Observation` collections produced here. Sources may
//! partially fail (some assets missing) without aborting the whole fetch;
//! per-asset failures are reported alongside the data.

pub mod cache;
pub mod coingecko;
pub mod stablecoin;

pub use cache::FetchCache;
pub use coingecko::CoinGeckoClient;
pub use stablecoin::{simulated_stablecoin_supply, StablecoinSupply};

use async_trait::async_trait;

use crate::models::Observation;

/// One asset that could not be fetched, with the reason.
#[derive(Debug, Clone)]
pub struct FetchFailure {
    pub asset_id: String,
    pub reason: String,
}

/// Outcome of a (possibly partial) price-history fetch.
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    pub observations: Vec<Observation>,
    pub failures: Vec<FetchFailure>,
}

impl FetchReport {
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Contract for price/volume history providers.
///
/// Implementations must tolerate individual asset failures and report them in
/// the `FetchReport` rather than failing the whole call.
#[async_trait]
pub trait PriceHistorySource: Send + Sync {
    async fn fetch(&self, asset_ids: &[String], days: u32) -> anyhow::Result<FetchReport>;
}

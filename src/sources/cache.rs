//! TTL cache for price-history fetches.
//!
//! Caching belongs to the data-source layer, never to the pipeline itself.
//! Entries are keyed by the exact request parameters (asset set + day span)
//! and expire after a configurable time-to-live.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use super::FetchReport;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    assets: Vec<String>,
    days: u32,
}

impl CacheKey {
    /// Asset order must not matter: sort so `[btc, eth]` and `[eth, btc]`
    /// share an entry.
    fn new(asset_ids: &[String], days: u32) -> Self {
        let mut assets: Vec<String> = asset_ids.to_vec();
        assets.sort();
        Self { assets, days }
    }
}

struct CacheEntry {
    report: FetchReport,
    fetched_at: Instant,
}

pub struct FetchCache {
    ttl: Duration,
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl FetchCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Cached report for the request, if present and not expired.
    pub fn get(&self, asset_ids: &[String], days: u32) -> Option<FetchReport> {
        let key = CacheKey::new(asset_ids, days);
        let entries = self.entries.read();
        entries
            .get(&key)
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.report.clone())
    }

    pub fn put(&self, asset_ids: &[String], days: u32, report: FetchReport) {
        let key = CacheKey::new(asset_ids, days);
        let mut entries = self.entries.write();
        // Drop expired entries opportunistically so the map stays bounded by
        // the distinct request shapes seen within one TTL.
        entries.retain(|_, entry| entry.fetched_at.elapsed() < self.ttl);
        entries.insert(
            key,
            CacheEntry {
                report,
                fetched_at: Instant::now(),
            },
        );
    }
}

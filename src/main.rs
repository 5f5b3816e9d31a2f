//! Crypto Corruption Index Backend
//! Mission: Read policy friction off the crypto tape
//! Serves the composite corruption index, policy event timeline, event
//! studies and portfolio projections to the dashboard frontend.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use corruption_index_backend::api::{create_router, AppState};
use corruption_index_backend::events;
use corruption_index_backend::index::{EventStudyConfig, IndexConfig};
use corruption_index_backend::models::Config;
use corruption_index_backend::sources::{CoinGeckoClient, FetchCache};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing();

    info!("🚀 Corruption Index Backend starting");

    let index_config = IndexConfig::default();
    index_config
        .validate()
        .context("Invalid index configuration")?;

    let source = Arc::new(
        CoinGeckoClient::new(&config.coingecko_base_url)
            .context("Failed to build market data client")?,
    );
    let cache = Arc::new(FetchCache::new(Duration::from_secs(config.cache_ttl_secs)));

    info!(
        "📊 Tracking {} assets over {} days (fetch cache TTL: {}s)",
        config.default_assets.len(),
        config.default_days,
        config.cache_ttl_secs
    );
    info!(
        "⚖️ Policy event catalog loaded: {} events",
        events::policy_events().len()
    );

    let addr = format!("0.0.0.0:{}", config.port);

    let state = AppState {
        config,
        index_config,
        study_config: EventStudyConfig::default(),
        source,
        cache,
    };

    let app = create_router(state).layer(CorsLayer::permissive());

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("🌐 API listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Initialize tracing with env-filtered fmt output
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "corruption_index_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

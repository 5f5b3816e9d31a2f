//! Index Report Tool
//!
//! CLI to fetch market data, compute the corruption index and print the
//! latest values without running the server.
//!
//! Usage:
//!   cargo run --bin index-report -- --days 365
//!   cargo run --bin index-report -- --assets bitcoin,monero --json
//!   cargo run --bin index-report -- --event-date 2023-03-10

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;

use corruption_index_backend::events;
use corruption_index_backend::index::{
    calculate_corruption_index, run_event_study, EventStudyConfig, IndexConfig, IndexError,
};
use corruption_index_backend::models::Config;
use corruption_index_backend::sources::{CoinGeckoClient, PriceHistorySource};

/// Compute the corruption index from live market data
#[derive(Parser, Debug)]
#[command(name = "index-report")]
#[command(about = "Compute the corruption index and print a report")]
struct Cli {
    /// Days of history to fetch
    #[arg(long)]
    days: Option<u32>,

    /// Comma-separated CoinGecko asset ids (defaults to the tracked set)
    #[arg(long)]
    assets: Option<String>,

    /// Emit the full series as JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Also run an event study anchored on this catalog date (YYYY-MM-DD)
    #[arg(long)]
    event_date: Option<NaiveDate>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    let assets: Vec<String> = cli
        .assets
        .map(|list| {
            list.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_else(|| config.default_assets.clone());
    let days = cli.days.unwrap_or(config.default_days);

    let client = CoinGeckoClient::new(&config.coingecko_base_url)?;
    let report = client.fetch(&assets, days).await?;

    for failure in &report.failures {
        eprintln!("warning: {}: {}", failure.asset_id, failure.reason);
    }

    let series = match calculate_corruption_index(
        &report.observations,
        events::policy_events(),
        &IndexConfig::default(),
    ) {
        Ok(series) => series,
        Err(IndexError::EmptyInput) => {
            println!("No data: the fetch returned no observations.");
            return Ok(());
        }
        Err(err) => return Err(err).context("Index calculation failed"),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&series)?);
    } else {
        print_summary(&series);
    }

    if let Some(date) = cli.event_date {
        let anchor = events::find_event(date, None)
            .with_context(|| format!("No catalog event on {}", date))?;
        let study = run_event_study(&report.observations, anchor, &EventStudyConfig::default())?;

        println!("\nEvent study: {} ({})", anchor.description, anchor.date);
        for asset in &study.assets {
            match (&asset.summary, asset.anchor_missing) {
                (_, true) => println!("  {:<12} no observation on the anchor day", asset.asset_id),
                (Some(summary), false) => match summary.change_pct {
                    Some(pct) => println!("  {:<12} 7-day response: {:+.2}%", asset.asset_id, pct),
                    None => println!("  {:<12} pre-event baseline unavailable", asset.asset_id),
                },
                (None, false) => println!("  {:<12} insufficient window data", asset.asset_id),
            }
        }
    }

    Ok(())
}

fn print_summary(series: &corruption_index_backend::models::CorruptionIndexSeries) {
    let Some(latest) = series.latest() else {
        println!("No data: the fetch returned no observations.");
        return;
    };

    println!("Corruption index: {} days", series.len());
    if let Some((first, last)) = series.span() {
        println!("Span: {} .. {}", first, last);
    }
    println!("Latest ({}): {:.1}", latest.date, latest.corruption_index);

    if let Some(peak) = series
        .metrics
        .iter()
        .max_by(|a, b| a.corruption_index.total_cmp(&b.corruption_index))
    {
        println!("Peak   ({}): {:.1}", peak.date, peak.corruption_index);
    }
}

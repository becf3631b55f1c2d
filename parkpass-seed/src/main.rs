use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use parkpass_core::Ride;
use reqwest::StatusCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod rides;

/// Loads the built-in ride catalog into a running Park FastPass API.
#[derive(Debug, Parser)]
#[command(name = "parkpass-seed", version)]
struct Args {
    /// Base URL of the API, including the `/api` prefix.
    #[arg(long, env = "PARKPASS_API_URL", default_value = "http://localhost:8765/api")]
    api_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 5)]
    timeout_secs: u64,
}

#[derive(Debug, Default)]
struct SeedSummary {
    added: usize,
    failed: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parkpass_seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;

    let summary = seed_rides(&client, &args.api_url).await?;
    tracing::info!(
        "Results: {} rides added, {} failed",
        summary.added,
        summary.failed
    );
    Ok(())
}

async fn seed_rides(client: &reqwest::Client, api_url: &str) -> anyhow::Result<SeedSummary> {
    let url = format!("{}/rides", api_url.trim_end_matches('/'));
    tracing::info!("Adding {} rides via {}", rides::RIDES.len(), url);

    let mut summary = SeedSummary::default();
    for ride in rides::RIDES {
        let response = match client.post(&url).json(&ride.to_new_ride()).send().await {
            Ok(response) => response,
            Err(err) if err.is_connect() => {
                bail!("Unable to connect to API at {api_url}, is the server running?");
            }
            Err(err) => {
                tracing::error!("Error adding {}: {}", ride.name, err);
                summary.failed += 1;
                continue;
            }
        };

        if response.status() != StatusCode::CREATED {
            tracing::warn!("Failed to add {}: {}", ride.name, response.status());
            summary.failed += 1;
            continue;
        }

        match response.json::<Ride>().await {
            Ok(created) => {
                tracing::info!("Added: {} (ID: {})", ride.name, created.id);
                summary.added += 1;
            }
            Err(err) => {
                tracing::error!("Unreadable response for {}: {}", ride.name, err);
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

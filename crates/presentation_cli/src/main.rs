//! AgriQnet CLI
//!
//! Command-line client for a running `agriqnet-server`.

#![allow(clippy::print_stdout)]

mod render;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use domain::{AdvisoryCategory, OverlayLayer};
use infrastructure::{LoggingConfig, init_tracing};
use serde_json::Value;
use tracing::debug;

/// AgriQnet CLI
#[derive(Parser)]
#[command(name = "agriqnet-cli")]
#[command(author, version, about = "AgriQnet agricultural weather CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard summary for the resolved location
    Dashboard {
        /// Look-ahead in hours
        #[arg(long, default_value_t = 0)]
        hours: u32,

        /// Re-request the location and reload before showing
        #[arg(long)]
        refresh: bool,

        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },

    /// Show the weather snapshot
    Snapshot {
        /// Look-ahead in hours (0, 3, 6, 12, 24, 36, 48, 72, 96)
        #[arg(long, default_value_t = 0)]
        hours: u32,

        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },

    /// Show the daily forecast
    Forecast {
        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },

    /// Request a farm advisory
    ///
    /// Example: agriqnet-cli advise --category spray-safety --hours 24
    Advise {
        /// sowing-window, irrigation, spray-safety or crop-health
        #[arg(short, long, value_parser = parse_category)]
        category: AdvisoryCategory,

        /// Look-ahead in hours
        #[arg(long, default_value_t = 0)]
        hours: u32,

        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },

    /// Search places by name
    Search {
        /// Place name
        query: String,

        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },

    /// Print the weather map tile URL template
    TileUrl {
        /// Layer code or name, e.g. TA2 or rainfall
        #[arg(short, long, value_parser = parse_layer)]
        layer: Option<OverlayLayer>,

        /// Look-ahead in hours
        #[arg(long)]
        hours: Option<u32>,

        /// Overlay opacity (0.0 - 1.0)
        #[arg(long)]
        opacity: Option<f32>,

        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },

    /// Check server readiness
    Health {
        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },
}

fn parse_category(value: &str) -> Result<AdvisoryCategory, String> {
    value.parse().map_err(|e: domain::DomainError| e.to_string())
}

fn parse_layer(value: &str) -> Result<OverlayLayer, String> {
    value.parse().map_err(|e: domain::DomainError| e.to_string())
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Format endpoint URL
fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

/// Send a request and decode the JSON body, surfacing the server's error message
async fn fetch(request: reqwest::RequestBuilder) -> anyhow::Result<Value> {
    let response = request.send().await.context("server unreachable")?;
    let status = response.status();
    let body: Value = response
        .json()
        .await
        .with_context(|| format!("unreadable response (HTTP {status})"))?;

    if !status.is_success() {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("request failed");
        bail!("HTTP {status}: {message}");
    }
    Ok(body)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&LoggingConfig {
        level: log_filter_from_verbosity(cli.verbose).to_string(),
        json: false,
    })?;

    let client = reqwest::Client::new();

    match cli.command {
        Commands::Dashboard {
            hours,
            refresh,
            url,
        } => {
            if refresh {
                debug!("Refreshing dashboard");
                fetch(client.post(endpoint_url(&url, "/v1/dashboard/refresh"))).await?;
            }
            let body = fetch(
                client
                    .get(endpoint_url(&url, "/v1/dashboard"))
                    .query(&[("hours", hours)]),
            )
            .await?;
            print!("{}", render::dashboard(&body));
        },

        Commands::Snapshot { hours, url } => {
            let body = fetch(
                client
                    .get(endpoint_url(&url, "/v1/snapshot"))
                    .query(&[("hours", hours)]),
            )
            .await?;
            print!("{}", render::snapshot(&body));
        },

        Commands::Forecast { url } => {
            let body = fetch(client.get(endpoint_url(&url, "/v1/forecast/daily"))).await?;
            print!("{}", render::daily(&body));
        },

        Commands::Advise {
            category,
            hours,
            url,
        } => {
            println!("🧑‍🌾 Requesting {} advisory...", category.label());
            let body = fetch(
                client
                    .post(endpoint_url(&url, "/v1/advisory"))
                    .json(&serde_json::json!({ "category": category.slug(), "hours": hours })),
            )
            .await?;
            print!("{}", render::advisory(&body));
        },

        Commands::Search { query, url } => {
            let body = fetch(
                client
                    .get(endpoint_url(&url, "/v1/locations/search"))
                    .query(&[("q", query.as_str())]),
            )
            .await?;
            print!("{}", render::places(&body));
        },

        Commands::TileUrl {
            layer,
            hours,
            opacity,
            url,
        } => {
            let mut params: Vec<(&str, String)> = Vec::new();
            if let Some(layer) = layer {
                params.push(("layer", layer.code().to_string()));
            }
            if let Some(hours) = hours {
                params.push(("hours", hours.to_string()));
            }
            if let Some(opacity) = opacity {
                params.push(("opacity", opacity.to_string()));
            }

            let body = fetch(
                client
                    .get(endpoint_url(&url, "/v1/map/overlay"))
                    .query(&params),
            )
            .await?;
            let tile = &body["tile"];
            println!(
                "🗺️  {} (+{}h, opacity {})",
                tile["layer_name"].as_str().unwrap_or("-"),
                tile["hour_offset"],
                tile["opacity"]
            );
            println!("{}", tile["url_template"].as_str().unwrap_or("-"));
        },

        Commands::Health { url } => {
            match client.get(endpoint_url(&url, "/ready")).send().await {
                Ok(resp) if resp.status().is_success() => {
                    println!("✅ Healthy");
                },
                Ok(resp) => {
                    println!("❌ Unhealthy: HTTP {}", resp.status());
                    std::process::exit(1);
                },
                Err(e) => {
                    println!("❌ Unhealthy: {e}");
                    std::process::exit(1);
                },
            }
        },
    }

    Ok(())
}

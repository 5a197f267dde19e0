//! Family Activity Finder CLI
//!
//! Command-line client for the recommendation server.

#![allow(clippy::print_stdout)]

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use domain::{ActivityQuery, ActivityRecommendation, FieldError, RecommendationResult};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_SERVER_URL: &str = "http://localhost:3001";

/// Family Activity Finder CLI
#[derive(Debug, Parser)]
#[command(name = "activity-finder-cli")]
#[command(author, version, about = "Find family activities from the command line", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Server URL
    #[arg(
        short,
        long,
        global = true,
        env = "ACTIVITY_FINDER_URL",
        default_value = DEFAULT_SERVER_URL
    )]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Ask the server for activity recommendations
    ///
    /// Example: activity-finder-cli recommend --city Austin --ages 5,8
    ///          --availability "Saturday morning" --max-distance 10
    Recommend(RecommendArgs),

    /// Check server health
    Health,
}

#[derive(Debug, Args)]
struct RecommendArgs {
    /// City to search in
    #[arg(long)]
    city: String,

    /// Children's ages, comma separated (e.g. "5,8")
    #[arg(long)]
    ages: String,

    /// When the family is free (e.g. "Saturday morning")
    #[arg(long)]
    availability: String,

    /// Maximum travel distance in miles
    #[arg(long, default_value_t = 10)]
    max_distance: u32,

    /// Free-form preferences
    #[arg(long)]
    preferences: Option<String>,

    /// Print the raw JSON response
    #[arg(long)]
    raw: bool,
}

impl RecommendArgs {
    /// Request body in the server's wire format
    fn payload(&self) -> Value {
        let mut body = Map::new();
        body.insert("city".to_string(), json!(self.city));
        body.insert("kidsAges".to_string(), json!(self.ages));
        body.insert("availability".to_string(), json!(self.availability));
        body.insert("maxDistance".to_string(), json!(self.max_distance));
        if let Some(preferences) = &self.preferences {
            body.insert("preferences".to_string(), json!(preferences));
        }
        Value::Object(body)
    }
}

/// Successful recommendation response
#[derive(Debug, Deserialize)]
struct RecommendationsResponse {
    data: RecommendationResult,
}

/// Validation failure body
#[derive(Debug, Deserialize)]
struct ValidationResponse {
    details: Vec<FieldError>,
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

/// Join a base URL and a path without doubling the slash
fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

/// Render one recommendation as a text block
fn format_recommendation(index: usize, rec: &ActivityRecommendation) -> String {
    let mut out = format!("{}. {} {}\n", index + 1, rec.emoji, rec.plain_title());
    out.push_str(&format!("   {}\n", rec.description));
    for (label, value) in [
        ("Distance", &rec.distance_label),
        ("Ages", &rec.age_range_label),
        ("When", &rec.availability_label),
        ("Link", &rec.url),
    ] {
        if !value.is_empty() {
            out.push_str(&format!("   {label}: {value}\n"));
        }
    }
    out
}

fn print_field_errors(errors: &[FieldError]) {
    println!("❌ Invalid request:");
    for error in errors {
        println!("   - {error}");
    }
}

async fn recommend(client: &reqwest::Client, url: &str, args: &RecommendArgs) -> anyhow::Result<ExitCode> {
    let payload = args.payload();

    // Catch obvious mistakes before the round trip
    if let Err(errors) = ActivityQuery::from_untyped(&payload) {
        print_field_errors(&errors);
        return Ok(ExitCode::from(2));
    }

    debug!(%url, "Requesting recommendations");
    let resp = client
        .post(endpoint_url(url, "/api/recommendations"))
        .json(&payload)
        .send()
        .await?;

    let status = resp.status();
    let body: Value = resp.json().await?;

    if args.raw {
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(if status.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    if status.is_success() {
        let RecommendationsResponse { data } = serde_json::from_value(body)?;
        let meta = &data.metadata;
        println!(
            "🔎 {} activities in {} for kids aged {} ({}, within {} miles)",
            data.len(),
            meta.city,
            meta.kids_ages,
            meta.availability,
            meta.max_distance
        );
        if data.is_degraded() {
            println!("⚠️  Live results were unavailable; showing general suggestions");
        }
        println!();
        for (index, rec) in data.recommendations.iter().enumerate() {
            println!("{}", format_recommendation(index, rec));
        }
        return Ok(ExitCode::SUCCESS);
    }

    match serde_json::from_value::<ValidationResponse>(body.clone()) {
        Ok(validation) => print_field_errors(&validation.details),
        Err(_) => {
            println!("❌ Server returned HTTP {status}");
            println!("{}", serde_json::to_string_pretty(&body)?);
        },
    }
    Ok(ExitCode::FAILURE)
}

async fn health(client: &reqwest::Client, url: &str) -> ExitCode {
    match client.get(endpoint_url(url, "/health")).send().await {
        Ok(resp) if resp.status().is_success() => {
            println!("✅ Healthy");
            ExitCode::SUCCESS
        },
        Ok(resp) => {
            println!("❌ Unhealthy: HTTP {}", resp.status());
            ExitCode::FAILURE
        },
        Err(e) => {
            println!("❌ Unhealthy: {e}");
            ExitCode::FAILURE
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_filter_from_verbosity(
            cli.verbose,
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = reqwest::Client::new();

    match &cli.command {
        Commands::Recommend(args) => recommend(&client, &cli.url, args).await,
        Commands::Health => Ok(health(&client, &cli.url).await),
    }
}

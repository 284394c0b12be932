mod store;
mod telemetry;
mod web;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::fs;
use std::process::ExitCode;

use crate::telemetry::{ReadingInput, TelemetryService};
use crate::web::Config;

#[derive(Parser)]
#[command(name = "sat-telemetry")]
#[command(about = "Satellite fleet telemetry store and query service")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, global = true, default_value = "config.yaml")]
    config: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve,
    /// Store a JSON batch of readings
    Ingest { batch: String },
    /// Print the latest status of every satellite
    Summary,
    /// Print anomalies detected after the given instant
    Anomalies {
        #[arg(long)]
        since: DateTime<Utc>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match Config::from_file(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config {}: {}", cli.config, e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Serve => serve(config),
        Commands::Ingest { batch } => with_service(&config, |service| ingest(service, &batch)),
        Commands::Summary => with_service(&config, summary),
        Commands::Anomalies { since } => with_service(&config, |service| anomalies(service, since)),
    }
}

fn serve(config: Config) -> ExitCode {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(web::run_server(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn with_service<F>(config: &Config, op: F) -> ExitCode
where
    F: FnOnce(&TelemetryService) -> Result<(), String>,
{
    let store = match config.storage.open() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error opening reading store: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match op(&TelemetryService::new(store)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn ingest(service: &TelemetryService, path: &str) -> Result<(), String> {
    let content = fs::read_to_string(path).map_err(|e| format!("Error reading file: {}", e))?;
    let batch: Vec<ReadingInput> =
        serde_json::from_str(&content).map_err(|e| format!("Parse error: {}", e))?;

    let stored = service
        .ingest(batch)
        .map_err(|e| format!("Ingest failed: {}", e))?;
    println!("Stored {} readings", stored);
    Ok(())
}

fn summary(service: &TelemetryService) -> Result<(), String> {
    let summaries = service
        .list_summaries()
        .map_err(|e| format!("Query failed: {}", e))?;

    println!("{} satellites", summaries.len());
    for s in summaries {
        println!(
            "  {}: {} @ {}",
            s.satellite_id,
            s.last_status,
            s.last_contact.to_rfc3339()
        );
    }
    Ok(())
}

fn anomalies(service: &TelemetryService, since: DateTime<Utc>) -> Result<(), String> {
    let anomalies = service
        .get_anomalies(since)
        .map_err(|e| format!("Query failed: {}", e))?;

    println!("{} anomalies since {}", anomalies.len(), since.to_rfc3339());
    for a in anomalies {
        let battery = a
            .battery_level
            .map(|b| format!(" battery={}", b))
            .unwrap_or_default();
        let temperature = a
            .temperature
            .map(|t| format!(" temperature={}", t))
            .unwrap_or_default();
        println!(
            "  {} {} @ {}{}{}",
            a.satellite_id,
            a.kind,
            a.timestamp.to_rfc3339(),
            battery,
            temperature
        );
    }
    Ok(())
}

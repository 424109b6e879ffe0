//! mariadb-bq-extract CLI - MariaDB to BigQuery extract-and-load.

use clap::{Parser, Subcommand};
use mariadb_bq_extract::{declarations, query, Config, ExtractError, ExtractLoadOrchestrator};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "mariadb-bq-extract")]
#[command(about = "MariaDB to BigQuery extract-and-load")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one extraction: query, coerce, dedup, load
    Run,

    /// Test the source connection and the warehouse credentials file
    HealthCheck,

    /// Print the effective configuration (passwords redacted)
    ShowConfig,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ExtractError> {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(&cli.verbosity, &cli.log_format)
        .map_err(|e| ExtractError::Config(e.to_string()))?;

    let config = Config::load(&cli.config)?;
    info!("Loaded configuration from {:?}", cli.config);

    match cli.command {
        Commands::Run => {
            let orchestrator = ExtractLoadOrchestrator::new(config, declarations::registry());
            let result = orchestrator.run(query::QUERY).await?;

            if cli.output_json {
                println!("{}", result.to_json()?);
            } else {
                println!("\nExtraction completed!");
                println!("  Run ID: {}", result.run_id);
                println!("  Duration: {:.2}s", result.duration_seconds);
                println!("  Rows extracted: {}", result.rows_extracted);
                println!("  Duplicates removed: {}", result.duplicates_removed);
                if result.load_skipped {
                    println!("  Load skipped: result table was empty");
                } else {
                    println!("  Rows loaded: {}", result.rows_loaded);
                }
            }
        }

        Commands::HealthCheck => {
            let orchestrator = ExtractLoadOrchestrator::new(config, declarations::registry());
            let result = orchestrator.health_check().await?;

            if cli.output_json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("Health Check Results:");
                println!(
                    "  Source (MariaDB): {} ({}ms)",
                    if result.source_connected { "OK" } else { "FAILED" },
                    result.source_latency_ms
                );
                if let Some(ref err) = result.source_error {
                    println!("    Error: {}", err);
                }
                println!(
                    "  Credentials file: {}",
                    if result.credentials_file_found { "OK" } else { "MISSING" }
                );
                println!(
                    "\n  Overall: {}",
                    if result.healthy { "HEALTHY" } else { "UNHEALTHY" }
                );
            }

            if !result.healthy {
                return Err(ExtractError::Config("Health check failed".to_string()));
            }
        }

        Commands::ShowConfig => {
            // Debug formatting redacts passwords.
            println!("{:#?}", config);
        }
    }

    Ok(())
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    Ok(())
}

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use station_data::pipeline::{RunConfig, run};

/// Build stationData.json from OpenStreetMap and the station index PDF.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to the station index PDF
    document: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = RunConfig::new(args.document);

    match run(&config).await {
        Ok(mapping) => {
            tracing::info!(stations = mapping.len(), "Done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

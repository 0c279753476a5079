use oceanlens::config::Config;
use oceanlens::services::ocean_service::OceanDataService;
use std::env;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_help() {
    eprintln!(
        "\
Usage: summarize [OPTIONS]

Loads the occurrence CSV, builds the ocean grids and prints a report as JSON.

Options:
  --csv=PATH            Occurrence CSV (default: $BIODIVERSITY_CSV or biodiversity.csv)
  --seed=N              Seed for the ocean grid noise (default: $GRID_SEED or random)
  --report=KIND         region | summary | correlations (default: region)
  --help                Show this help message"
    );
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Report {
    Region,
    Summary,
    Correlations,
}

impl Report {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "region" => Some(Report::Region),
            "summary" => Some(Report::Summary),
            "correlations" => Some(Report::Correlations),
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing (less verbose for the CLI)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "oceanlens=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI args
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help") {
        print_help();
        return Ok(());
    }

    let mut config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    if let Some(path) = args.iter().find_map(|a| a.strip_prefix("--csv=")) {
        config.biodiversity_csv = PathBuf::from(path);
    }
    if let Some(seed) = args.iter().find_map(|a| a.strip_prefix("--seed=")) {
        config.grid_seed = Some(
            seed.parse()
                .map_err(|_| format!("Invalid --seed value: {}", seed))?,
        );
    }
    let report = match args.iter().find_map(|a| a.strip_prefix("--report=")) {
        Some(kind) => Report::parse(kind).ok_or_else(|| format!("Unknown report: {}", kind))?,
        None => Report::Region,
    };

    let ocean = OceanDataService::from_config(&config);
    eprintln!(
        "Loaded {} occurrence records from {}",
        ocean.store().len(),
        config.biodiversity_csv.display()
    );

    let json = match report {
        Report::Region => serde_json::to_string_pretty(&ocean.region_statistics().await?)?,
        Report::Summary => serde_json::to_string_pretty(&ocean.statistical_summary().await?)?,
        Report::Correlations => serde_json::to_string_pretty(&ocean.correlations().await?)?,
    };
    println!("{}", json);

    Ok(())
}

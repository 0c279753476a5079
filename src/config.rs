use crate::constants::*;
use crate::models::BoundingBox;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub biodiversity_csv: PathBuf,
    /// Single analysis region used for occurrence filtering, grid generation
    /// and the hotspot density grid.
    pub region: BoundingBox,
    /// Seed for the synthetic grid noise. `None` draws fresh entropy at startup.
    pub grid_seed: Option<u64>,
    pub grid_cache_max_entries: u64,
}

fn parse_f64_var(name: &str, default: f64) -> Result<f64, String> {
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| format!("Invalid {}", name))
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let region = BoundingBox::new(
            parse_f64_var("REGION_LAT_MIN", DEFAULT_REGION_LAT_MIN)?,
            parse_f64_var("REGION_LAT_MAX", DEFAULT_REGION_LAT_MAX)?,
            parse_f64_var("REGION_LON_MIN", DEFAULT_REGION_LON_MIN)?,
            parse_f64_var("REGION_LON_MAX", DEFAULT_REGION_LON_MAX)?,
        )?;

        let grid_seed = match env::var("GRID_SEED") {
            Ok(raw) => Some(raw.parse().map_err(|_| "Invalid GRID_SEED")?),
            Err(_) => None,
        };

        let grid_cache_max_entries: u64 = env::var("GRID_CACHE_MAX_ENTRIES")
            .unwrap_or_else(|_| DEFAULT_GRID_CACHE_MAX_ENTRIES.to_string())
            .parse()
            .map_err(|_| "Invalid GRID_CACHE_MAX_ENTRIES")?;
        // One region needs a grid per variable resident at once
        if grid_cache_max_entries < MIN_GRID_CACHE_ENTRIES {
            return Err(format!(
                "GRID_CACHE_MAX_ENTRIES must be at least {}",
                MIN_GRID_CACHE_ENTRIES
            ));
        }

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            biodiversity_csv: env::var("BIODIVERSITY_CSV")
                .unwrap_or_else(|_| DEFAULT_BIODIVERSITY_CSV.to_string())
                .into(),
            region,
            grid_seed,
            grid_cache_max_entries,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

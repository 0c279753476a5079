//! Stable application-wide constants.
//!
//! Values here are structural invariants of the analysis pipeline and default
//! fallbacks for env-var-based configuration. They should rarely change.
//! For per-deployment knobs (region bounds, grid seed, cache size) see
//! [`Config`](crate::config::Config) instead.

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "5000";
/// Default location of the occurrence dataset. Overridden by `BIODIVERSITY_CSV`.
pub const DEFAULT_BIODIVERSITY_CSV: &str = "biodiversity.csv";

// --- Region defaults (Indian Ocean, used when REGION_* env vars are absent) ---

pub const DEFAULT_REGION_LAT_MIN: f64 = 5.0;
pub const DEFAULT_REGION_LAT_MAX: f64 = 25.0;
pub const DEFAULT_REGION_LON_MIN: f64 = 65.0;
pub const DEFAULT_REGION_LON_MAX: f64 = 95.0;

// --- Grid structure ---

/// Number of evenly spaced points on each axis of a synthetic ocean grid.
pub const GRID_AXIS_POINTS: usize = 50;

/// Maximum number of (variable, region) grids held by the in-memory cache.
/// Overridden by `GRID_CACHE_MAX_ENTRIES`.
pub const DEFAULT_GRID_CACHE_MAX_ENTRIES: u64 = 64;
/// Smallest cache that holds every variable's grid for one region.
pub const MIN_GRID_CACHE_ENTRIES: u64 = 3;

// --- Hotspot density grid ---

/// Cells per axis of the species-density grid laid over the region.
pub const DENSITY_GRID_CELLS: usize = 20;
/// Half-width (degrees, per axis) of the window counted around each cell center.
/// Comparison is strict: a record exactly 1 degree away is outside the window.
pub const HOTSPOT_RADIUS_DEG: f64 = 1.0;

// --- Correlation analysis ---

/// Two-tailed p-value threshold below which a correlation is flagged significant.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;
/// Minimum points a species needs before per-species correlation is attempted.
pub const MIN_CORRELATION_SAMPLES: usize = 3;
/// Minimum points for the single-species detail report and chart payloads.
pub const MIN_SPECIES_ANALYSIS_SAMPLES: usize = 2;

// --- Ranking cut-offs for cross-domain payloads ---

pub const CORRELATION_MATRIX_TOP_SPECIES: usize = 50;
pub const SCATTER_MATRIX_TOP_SPECIES: usize = 30;
pub const SPECIES_ENVIRONMENT_TOP_SPECIES: usize = 15;
/// Significant findings reported in the statistical summary, in discovery order.
pub const TOP_SIGNIFICANT_FINDINGS: usize = 10;

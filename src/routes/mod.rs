pub mod analysis;
pub mod biodiversity;
pub mod meta;
pub mod ocean;

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::AppState;

/// Public endpoints, as listed in health and not-found responses.
pub const ENDPOINTS: [&str; 9] = [
    "/api/health",
    "/api/datasets",
    "/api/ocean-data/{layer}",
    "/api/biodiversity-data",
    "/api/map-visualization",
    "/api/correlations",
    "/api/species-analysis/{species}",
    "/api/region-stats",
    "/api/cross-domain-analysis",
];

pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/health", get(meta::health_check))
        .route("/datasets", get(meta::datasets))
        .route("/ocean-data/{layer}", get(ocean::ocean_layer))
        .route("/map-visualization", get(ocean::map_visualization))
        .route("/biodiversity-data", get(biodiversity::biodiversity_data))
        .route("/correlations", get(analysis::correlations))
        .route("/species-analysis/{species}", get(analysis::species_analysis))
        .route("/region-stats", get(analysis::region_stats))
        .route("/cross-domain-analysis", get(analysis::cross_domain_analysis));

    Router::new()
        .nest("/api", api)
        .fallback(meta::not_found)
        .with_state(state)
}

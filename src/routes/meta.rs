use crate::models::ocean::DatasetInfo;
use crate::models::OceanVariable;
use crate::routes::ENDPOINTS;
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /health - Service status, record count and grid cache statistics
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let records = state.ocean.store().len();

    let mut status = json!({
        "status": "healthy",
        "message": "Ocean analysis API is running",
        "checks": {},
        "available_endpoints": ENDPOINTS,
    });

    // Check occurrence data
    if records > 0 {
        status["checks"]["biodiversity"] = json!(format!("{} points available", records));
    } else {
        status["checks"]["biodiversity"] = json!({"error": "no biodiversity data loaded"});
        status["status"] = json!("degraded");
    }

    // Grid cache
    status["checks"]["grid_cache"] = json!(state.ocean.cache_stats());

    Json(status)
}

/// GET /datasets - Ocean variable metadata and the occurrence dataset schema
pub async fn datasets(State(state): State<Arc<AppState>>) -> Json<Value> {
    let ocean_datasets: serde_json::Map<String, Value> = OceanVariable::ALL
        .iter()
        .map(|&v| (v.as_str().to_string(), json!(DatasetInfo::from(v))))
        .collect();

    Json(json!({
        "ocean_datasets": ocean_datasets,
        "biodiversity_dataset": {
            "name": "Marine Biodiversity",
            "description": "Species occurrence and abundance records",
            "coverage_area": state.ocean.region().to_string(),
            "required_columns": [
                "decimalLatitude",
                "decimalLongitude",
                "scientificName",
                "individualCount"
            ],
        },
    }))
}

/// Fallback for unknown paths
pub async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Endpoint not found",
            "available_endpoints": ENDPOINTS,
        })),
    )
}

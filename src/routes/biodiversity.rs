use crate::error::{AppError, Result};
use crate::models::occurrence::CoordinateRange;
use crate::models::BiodiversityData;
use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct BiodiversitySummary {
    pub total_points: usize,
    pub unique_species: usize,
    pub coordinate_range: CoordinateRange,
}

#[derive(Debug, Serialize)]
pub struct BiodiversityResponse {
    pub data: BiodiversityData,
    pub summary: BiodiversitySummary,
}

/// GET /biodiversity-data
pub async fn biodiversity_data(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BiodiversityResponse>> {
    let data = state.ocean.biodiversity();
    if data.is_empty() {
        return Err(AppError::DataUnavailable(
            "No biodiversity data available. Check that the occurrence CSV is present and valid"
                .to_string(),
        ));
    }

    let summary = BiodiversitySummary {
        total_points: data.points.len(),
        unique_species: data.unique_species.len(),
        coordinate_range: data.coordinate_range(),
    };

    Ok(Json(BiodiversityResponse { data, summary }))
}

use crate::error::Result;
use crate::models::ocean::DatasetInfo;
use crate::models::analysis::MapVisualization;
use crate::models::{OceanLayer, OceanVariable};
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct OceanLayerResponse {
    pub data: OceanLayer,
    pub metadata: DatasetInfo,
    pub region: String,
}

/// GET /ocean-data/{layer}
pub async fn ocean_layer(
    State(state): State<Arc<AppState>>,
    Path(layer): Path<String>,
) -> Result<Json<OceanLayerResponse>> {
    let variable: OceanVariable = layer.parse()?;
    let grid = state.ocean.layer(variable).await?;

    tracing::debug!("Serving {} layer over {}", variable, grid.bbox);

    Ok(Json(OceanLayerResponse {
        data: grid.to_layer(),
        metadata: DatasetInfo::from(variable),
        region: grid.bbox.to_string(),
    }))
}

/// GET /map-visualization
/// All ocean layers with the occurrence points overlaid
pub async fn map_visualization(State(state): State<Arc<AppState>>) -> Json<MapVisualization> {
    let map = state.ocean.map_visualization().await;
    tracing::info!(
        "Map visualization: {} points, {} layers, {} failed",
        map.metadata.biodiversity_count,
        map.metadata.ocean_layers.len(),
        map.metadata.failed_layers.len()
    );
    Json(map)
}

use crate::constants::SIGNIFICANCE_LEVEL;
use crate::error::Result;
use crate::models::analysis::{CrossDomainAnalysis, RegionStatistics, SpeciesAnalysis};
use crate::models::{CorrelationReport, OceanVariable};
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct CorrelationMetadata {
    pub analysis_type: &'static str,
    pub ocean_variables: Vec<OceanVariable>,
    pub species_analyzed: usize,
    pub significance_level: f64,
}

#[derive(Debug, Serialize)]
pub struct CorrelationResponse {
    pub correlations: CorrelationReport,
    pub metadata: CorrelationMetadata,
}

/// GET /correlations
pub async fn correlations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CorrelationResponse>> {
    let correlations = state.ocean.correlations().await?;
    tracing::info!("Correlation analysis: {} species", correlations.len());

    Ok(Json(CorrelationResponse {
        metadata: CorrelationMetadata {
            analysis_type: "Pearson correlation",
            ocean_variables: OceanVariable::ALL.to_vec(),
            species_analyzed: correlations.len(),
            significance_level: SIGNIFICANCE_LEVEL,
        },
        correlations,
    }))
}

/// GET /species-analysis/{species}
pub async fn species_analysis(
    State(state): State<Arc<AppState>>,
    Path(species): Path<String>,
) -> Result<Json<SpeciesAnalysis>> {
    let analysis = state.ocean.species_analysis(&species).await?;
    Ok(Json(analysis))
}

/// GET /region-stats
pub async fn region_stats(State(state): State<Arc<AppState>>) -> Result<Json<RegionStatistics>> {
    Ok(Json(state.ocean.region_statistics().await?))
}

/// GET /cross-domain-analysis
pub async fn cross_domain_analysis(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CrossDomainAnalysis>> {
    let analysis = state.ocean.cross_domain_analysis().await?;
    tracing::info!(
        "Cross-domain analysis: {} species in heatmap, {} significant findings",
        analysis.correlation_heatmap.species.len(),
        analysis.statistical_summary.correlation_insights.len()
    );
    Ok(Json(analysis))
}

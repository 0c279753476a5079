use crate::cache::{CacheStats, GridCache};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::analysis::{
    CoordinateBounds, CrossDomainAnalysis, MapMetadata, MapVisualization, RegionStatistics,
    SpeciesAnalysis, StatisticalSummary,
};
use crate::models::{
    BiodiversityData, BoundingBox, CorrelationReport, EnvironmentalGrid, OccurrenceRecord,
    OceanVariable,
};
use crate::services::aggregator;
use crate::services::grid_generator::GridGenerator;
use crate::services::occurrence_store::OccurrenceStore;
use indexmap::IndexMap;
use std::sync::Arc;

/// Entry point for every analysis the API serves.
///
/// Owns the read-only occurrence store and the grid cache for a single
/// configured region.
pub struct OceanDataService {
    store: Arc<OccurrenceStore>,
    grids: GridCache,
    region: BoundingBox,
}

impl OceanDataService {
    pub fn new(store: Arc<OccurrenceStore>, grids: GridCache, region: BoundingBox) -> Self {
        OceanDataService {
            store,
            grids,
            region,
        }
    }

    /// Load the occurrence CSV and set up the grid cache described by
    /// `config`. A missing CSV leaves the store empty.
    pub fn from_config(config: &Config) -> Self {
        let store = OccurrenceStore::load(&config.biodiversity_csv, &config.region);
        let generator = GridGenerator::new(config.grid_seed);
        if generator.seed().is_none() {
            tracing::info!("No GRID_SEED set; ocean grids use fresh noise each run");
        }

        OceanDataService::new(
            Arc::new(store),
            GridCache::new(generator, config.grid_cache_max_entries),
            config.region,
        )
    }

    pub fn region(&self) -> &BoundingBox {
        &self.region
    }

    pub fn store(&self) -> &OccurrenceStore {
        &self.store
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.grids.stats()
    }

    pub async fn layer(&self, variable: OceanVariable) -> Result<Arc<EnvironmentalGrid>> {
        self.grids.get_or_generate(variable, &self.region).await
    }

    pub async fn layers(&self) -> Result<Vec<Arc<EnvironmentalGrid>>> {
        self.grids.all_layers(&self.region).await
    }

    pub fn biodiversity(&self) -> BiodiversityData {
        self.store.query()
    }

    /// The store's records, or `DataUnavailable` when nothing was loaded.
    pub fn require_records(&self) -> Result<&[OccurrenceRecord]> {
        if self.store.is_empty() {
            return Err(AppError::DataUnavailable(
                "No biodiversity data available".to_string(),
            ));
        }
        Ok(self.store.records())
    }

    pub async fn region_statistics(&self) -> Result<RegionStatistics> {
        let grids = self.layers().await?;
        Ok(aggregator::region_statistics(
            self.store.records(),
            &grids,
            &self.region,
        ))
    }

    pub async fn correlations(&self) -> Result<CorrelationReport> {
        let records = self.require_records()?;
        let grids = self.layers().await?;
        Ok(aggregator::analyze_correlations(records, &grids))
    }

    pub async fn species_analysis(&self, species: &str) -> Result<SpeciesAnalysis> {
        let grids = self.layers().await?;
        aggregator::species_analysis(self.store.records(), &grids, species)
    }

    pub async fn statistical_summary(&self) -> Result<StatisticalSummary> {
        let grids = self.layers().await?;
        Ok(aggregator::statistical_summary(self.store.records(), &grids))
    }

    pub async fn cross_domain_analysis(&self) -> Result<CrossDomainAnalysis> {
        let records = self.require_records()?;
        let grids = self.layers().await?;
        Ok(aggregator::cross_domain_analysis(
            records,
            &grids,
            &self.region,
        ))
    }

    /// Map payload. A layer that fails to generate is reported in
    /// `failed_layers` instead of failing the whole request.
    pub async fn map_visualization(&self) -> MapVisualization {
        let biodiversity = self.biodiversity();
        let mut layers = IndexMap::new();
        let mut failed_layers = Vec::new();

        for variable in OceanVariable::ALL {
            match self.layer(variable).await {
                Ok(grid) => {
                    layers.insert(variable, grid.to_layer());
                }
                Err(e) => {
                    tracing::warn!("{} layer failed to load: {}", variable, e);
                    failed_layers.push(variable);
                }
            }
        }

        MapVisualization {
            metadata: MapMetadata {
                biodiversity_count: biodiversity.points.len(),
                species_count: biodiversity.unique_species.len(),
                ocean_layers: layers.keys().copied().collect(),
                failed_layers,
                coordinate_bounds: CoordinateBounds {
                    lat_range: self.region.lat_range(),
                    lon_range: self.region.lon_range(),
                },
            },
            layers,
            biodiversity,
        }
    }
}

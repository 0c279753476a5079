use crate::constants::MIN_GRID_CACHE_ENTRIES;
use crate::error::{AppError, Result};
use crate::models::{BoundingBox, EnvironmentalGrid, OceanVariable};
use crate::services::grid_generator::GridGenerator;
use moka::future::Cache;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Cache key: the variable and the exact region the grid was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridKey {
    variable: OceanVariable,
    bbox: [u64; 4],
}

impl GridKey {
    pub fn new(variable: OceanVariable, bbox: &BoundingBox) -> Self {
        GridKey {
            variable,
            bbox: bbox.key_bits(),
        }
    }
}

/// Process-lifetime cache of generated ocean grids, backed by moka.
///
/// Entries never expire. Concurrent misses on the same key are coalesced so
/// each grid is generated exactly once.
pub struct GridCache {
    grids: Cache<GridKey, Arc<EnvironmentalGrid>>,
    generator: GridGenerator,
    requests: AtomicU64,
    generations: Arc<AtomicU64>,
}

impl GridCache {
    /// `max_capacity` is raised to `MIN_GRID_CACHE_ENTRIES` so a full set of
    /// layers for one region is never evicted.
    pub fn new(generator: GridGenerator, max_capacity: u64) -> Self {
        GridCache {
            grids: Cache::builder()
                .max_capacity(max_capacity.max(MIN_GRID_CACHE_ENTRIES))
                .build(),
            generator,
            requests: AtomicU64::new(0),
            generations: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Cached grid for `variable` over `bbox`, generating it on first use.
    pub async fn get_or_generate(
        &self,
        variable: OceanVariable,
        bbox: &BoundingBox,
    ) -> Result<Arc<EnvironmentalGrid>> {
        self.requests.fetch_add(1, Ordering::Relaxed);

        let key = GridKey::new(variable, bbox);
        let generator = self.generator;
        let generations = Arc::clone(&self.generations);
        let region = *bbox;

        let grid = self
            .grids
            .try_get_with(key, async move {
                generations.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("Grid cache miss: generating {} over {}", variable, region);
                generator.generate(variable, &region).map(Arc::new)
            })
            .await
            .map_err(|e: Arc<AppError>| (*e).clone())?;

        Ok(grid)
    }

    /// One grid per variable, in `OceanVariable::ALL` order.
    pub async fn all_layers(&self, bbox: &BoundingBox) -> Result<Vec<Arc<EnvironmentalGrid>>> {
        let mut grids = Vec::with_capacity(OceanVariable::ALL.len());
        for variable in OceanVariable::ALL {
            grids.push(self.get_or_generate(variable, bbox).await?);
        }
        Ok(grids)
    }

    pub fn stats(&self) -> CacheStats {
        let requests = self.requests.load(Ordering::Relaxed);
        let misses = self.generations.load(Ordering::Relaxed).min(requests);
        let hits = requests - misses;
        let hit_rate = if requests > 0 {
            (hits as f64 / requests as f64) * 100.0
        } else {
            0.0
        };

        CacheStats {
            hits,
            misses,
            hit_rate,
            entries: self.grids.entry_count(),
        }
    }
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    /// Approximate; moka updates counts lazily.
    pub entries: u64,
}

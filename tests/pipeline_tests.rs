use oceanlens::cache::GridCache;
use oceanlens::models::OceanVariable;
use oceanlens::services::grid_generator::GridGenerator;
use oceanlens::services::occurrence_store::OccurrenceStore;
use oceanlens::services::ocean_service::OceanDataService;
use oceanlens::AppError;
use std::sync::Arc;

mod common;

fn service_for(rows: &[&str], seed: u64) -> OceanDataService {
    let csv = common::write_test_csv(rows);
    let region = common::test_region();
    let store = OccurrenceStore::try_load(&csv, &region).unwrap();
    std::fs::remove_file(&csv).unwrap();

    OceanDataService::new(
        Arc::new(store),
        GridCache::new(GridGenerator::seeded(seed), 16),
        region,
    )
}

#[test]
fn test_missing_csv_is_data_unavailable() {
    let path = std::env::temp_dir().join("oceanlens-no-such-file.csv");
    let err = OccurrenceStore::try_load(&path, &common::test_region()).unwrap_err();
    assert!(matches!(err, AppError::DataUnavailable(_)));

    // The lenient loader degrades to an empty store
    assert!(OccurrenceStore::load(&path, &common::test_region()).is_empty());
}

#[tokio::test]
async fn test_same_seed_gives_identical_reports() {
    let rows = common::sample_rows();
    let a = service_for(&rows, 11);
    let b = service_for(&rows, 11);

    let report_a = serde_json::to_string(&a.correlations().await.unwrap()).unwrap();
    let report_b = serde_json::to_string(&b.correlations().await.unwrap()).unwrap();
    assert_eq!(report_a, report_b);

    let grid_a = a.layer(OceanVariable::Salinity).await.unwrap();
    let grid_b = b.layer(OceanVariable::Salinity).await.unwrap();
    assert_eq!(grid_a.values, grid_b.values);
}

#[tokio::test]
async fn test_different_seeds_change_noise_only() {
    let rows = common::sample_rows();
    let a = service_for(&rows, 1);
    let b = service_for(&rows, 2);

    let grid_a = a.layer(OceanVariable::Temperature).await.unwrap();
    let grid_b = b.layer(OceanVariable::Temperature).await.unwrap();
    assert_ne!(grid_a.values, grid_b.values);
    assert_eq!(grid_a.latitudes, grid_b.latitudes);

    // Occurrence-side statistics do not depend on the grids
    let stats_a = a.statistical_summary().await.unwrap();
    let stats_b = b.statistical_summary().await.unwrap();
    assert_eq!(stats_a.biodiversity_summary, stats_b.biodiversity_summary);
}

#[tokio::test]
async fn test_grids_are_generated_once_per_service() {
    let service = service_for(&common::sample_rows(), 5);

    service.region_statistics().await.unwrap();
    service.correlations().await.unwrap();
    service.cross_domain_analysis().await.unwrap();

    let stats = service.cache_stats();
    assert_eq!(stats.misses, 3);
    assert_eq!(stats.hits, 6);
}

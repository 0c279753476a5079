use oceanlens::cache::GridCache;
use oceanlens::models::BoundingBox;
use oceanlens::services::grid_generator::GridGenerator;
use oceanlens::services::occurrence_store::OccurrenceStore;
use oceanlens::services::ocean_service::OceanDataService;
use oceanlens::AppState;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

pub const CSV_HEADER: &str =
    "decimalLatitude,decimalLongitude,scientificName,individualCount,waterBody,locality,habitat";

/// Test region matching the production defaults
#[allow(dead_code)]
pub fn test_region() -> BoundingBox {
    BoundingBox::new(5.0, 25.0, 65.0, 95.0).expect("valid test region")
}

/// Write CSV rows (without header) to a uniquely named temp file
#[allow(dead_code)]
pub fn write_test_csv(rows: &[&str]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("oceanlens-test-{}.csv", Uuid::new_v4()));
    let mut contents = String::from(CSV_HEADER);
    for row in rows {
        contents.push('\n');
        contents.push_str(row);
    }
    contents.push('\n');
    std::fs::write(&path, contents).expect("Failed to write test CSV");
    path
}

/// Build app state from a CSV file with a fixed grid seed
#[allow(dead_code)]
pub fn create_test_state(csv: &Path) -> Arc<AppState> {
    let region = test_region();
    let store = OccurrenceStore::load(csv, &region);
    let ocean = OceanDataService::new(
        Arc::new(store),
        GridCache::new(GridGenerator::seeded(7), 16),
        region,
    );
    Arc::new(AppState { ocean })
}

/// Router over the given CSV rows
#[allow(dead_code)]
pub fn create_test_app(rows: &[&str]) -> axum::Router {
    let csv = write_test_csv(rows);
    let app = oceanlens::routes::create_router(create_test_state(&csv));
    let _ = std::fs::remove_file(&csv);
    app
}

/// A small dataset: two species with enough points for correlation and one
/// singleton, plus rows that must be dropped.
#[allow(dead_code)]
pub fn sample_rows() -> Vec<&'static str> {
    vec![
        "10.0,70.0,Thunnus albacares,5,Arabian Sea,Lakshadweep,pelagic",
        "12.0,72.0,Thunnus albacares,8,,,",
        "15.0,80.0,Thunnus albacares,2,,,",
        "18.0,85.0,Thunnus albacares,11,,,",
        "10.0,70.0,Thunnus albacares,3,,,",
        "8.0,77.0,Sardinella longiceps,40,Laccadive Sea,,coastal",
        "9.0,76.0,Sardinella longiceps,25,,,",
        "11.0,75.0,Sardinella longiceps,,,,",
        "20.0,90.0,Chelonia mydas,1,Bay of Bengal,,",
        // outside the region
        "40.0,10.0,Thunnus albacares,9,,,",
        // missing species and unparseable latitude
        "14.0,82.0,,4,,,",
        "abc,82.0,Chelonia mydas,4,,,",
    ]
}

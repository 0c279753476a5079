pub mod analysis;
pub mod occurrence;
pub mod ocean;
pub mod region;

pub use analysis::{CorrelationReport, CorrelationResult, SummaryStats};
pub use occurrence::{BiodiversityData, OccurrenceRecord};
pub use ocean::{EnvironmentalGrid, OceanLayer, OceanVariable};
pub use region::BoundingBox;

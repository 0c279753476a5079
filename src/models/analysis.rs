//! Result and report types produced by the analysis pipeline.
//!
//! Everything here is plain data that serializes to the JSON contracts served
//! by the routes. Numeric fields are always finite; undefined statistics are
//! either omitted or carried as `Option` so they serialize to `null`.

use crate::models::{BiodiversityData, OceanLayer, OceanVariable};
use indexmap::IndexMap;
use serde::Serialize;

/// Pearson correlation between one environmental variable and abundance.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct CorrelationResult {
    pub variable: OceanVariable,
    pub correlation: f64,
    pub p_value: f64,
    pub significant: bool,
    pub sample_size: usize,
}

/// Per-variable entry of the correlations payload.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct CorrelationEntry {
    pub correlation: f64,
    pub p_value: f64,
    pub significant: bool,
}

impl From<&CorrelationResult> for CorrelationEntry {
    fn from(result: &CorrelationResult) -> Self {
        CorrelationEntry {
            correlation: result.correlation,
            p_value: result.p_value,
            significant: result.significant,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SpeciesCorrelations {
    pub sample_size: usize,
    pub correlations: IndexMap<OceanVariable, CorrelationEntry>,
}

/// Species name -> correlations, in species discovery order.
pub type CorrelationReport = IndexMap<String, SpeciesCorrelations>;

/// Population mean/std/min/max of a series.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Default)]
pub struct SummaryStats {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl SummaryStats {
    /// Population statistics (std with divisor `n`). An empty series reports
    /// all zeros.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let values: Vec<f64> = values.into_iter().collect();
        if values.is_empty() {
            return SummaryStats::default();
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        SummaryStats {
            mean,
            std: variance.sqrt(),
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OceanConditionStats {
    #[serde(flatten)]
    pub stats: SummaryStats,
    pub unit: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BiodiversityOverview {
    pub total_species: usize,
    pub total_observations: usize,
    pub coverage_area: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegionStatistics {
    pub biodiversity: BiodiversityOverview,
    pub ocean_conditions: IndexMap<OceanVariable, OceanConditionStats>,
    /// Reserved for narrative insights; currently always empty.
    pub cross_domain_insights: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SpeciesAbundance {
    pub species: String,
    pub total_abundance: f64,
}

/// Dense species x variable matrix of correlation coefficients.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CorrelationMatrix {
    pub species: Vec<String>,
    pub variables: Vec<OceanVariable>,
    pub matrix: Vec<Vec<f64>>,
}

/// Distinct-species counts over a regular grid of cell centers.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DensityGrid {
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    /// `density[i][j]` is the count around (`lat[i]`, `lon[j]`).
    pub density: Vec<Vec<usize>>,
    pub max_density: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SignificantFinding {
    pub species: String,
    pub variable: OceanVariable,
    pub correlation: f64,
    pub p_value: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BiodiversitySummary {
    pub total_species: usize,
    pub total_observations: usize,
    pub abundance_stats: SummaryStats,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatisticalSummary {
    pub biodiversity_summary: BiodiversitySummary,
    pub ocean_conditions_summary: IndexMap<OceanVariable, OceanConditionStats>,
    pub correlation_insights: Vec<SignificantFinding>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LocationStats {
    pub lat_range: [f64; 2],
    pub lon_range: [f64; 2],
}

/// Paired samples for a single species/variable scatter chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScatterSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub x_label: String,
    pub y_label: String,
    pub correlation: f64,
    pub p_value: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SpeciesAnalysis {
    pub species: String,
    pub sample_size: usize,
    pub abundance_stats: SummaryStats,
    pub location_stats: LocationStats,
    pub correlations: IndexMap<OceanVariable, CorrelationEntry>,
    pub scatter_plots: IndexMap<OceanVariable, ScatterSeries>,
}

/// One off-diagonal panel of the variable-vs-variable scatter matrix.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScatterMatrixPanel {
    pub x_variable: OceanVariable,
    pub y_variable: OceanVariable,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SpeciesEnvironmentSeries {
    pub species: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub correlation: Option<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GradientLayer {
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    pub data: Vec<Vec<f64>>,
    pub min: f64,
    pub max: f64,
    pub unit: &'static str,
}

/// Occurrence points overlaid on every gradient, abundance scaled to [0, 1].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GradientPoints {
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    pub species: Vec<String>,
    pub abundance: Vec<f64>,
    pub normalized_abundance: Vec<f64>,
    pub max_abundance: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EnvironmentalGradients {
    pub layers: IndexMap<OceanVariable, GradientLayer>,
    pub points: GradientPoints,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CrossDomainAnalysis {
    pub correlation_heatmap: CorrelationMatrix,
    /// `None` when fewer than two variables are available.
    pub scatter_matrix: Option<Vec<ScatterMatrixPanel>>,
    pub species_environment: IndexMap<OceanVariable, Vec<SpeciesEnvironmentSeries>>,
    pub environmental_gradients: EnvironmentalGradients,
    pub biodiversity_hotspots: DensityGrid,
    pub statistical_summary: StatisticalSummary,
}

/// Lat/lon extent of the served region.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct CoordinateBounds {
    pub lat_range: [f64; 2],
    pub lon_range: [f64; 2],
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MapMetadata {
    pub biodiversity_count: usize,
    pub species_count: usize,
    pub ocean_layers: Vec<OceanVariable>,
    pub failed_layers: Vec<OceanVariable>,
    pub coordinate_bounds: CoordinateBounds,
}

/// Every ocean layer that could be produced plus the occurrence points.
#[derive(Debug, Clone, Serialize)]
pub struct MapVisualization {
    pub layers: IndexMap<OceanVariable, OceanLayer>,
    pub biodiversity: BiodiversityData,
    pub metadata: MapMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_map_preserves_insertion_order() {
        let mut map = IndexMap::new();
        map.insert("zeta".to_string(), 1);
        map.insert("alpha".to_string(), 2);
        map.insert("zeta".to_string(), 3);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("zeta"), Some(&3));
        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"{"zeta":3,"alpha":2}"#
        );
    }

    #[test]
    fn test_variable_keys_serialize_lowercase() {
        let map: IndexMap<OceanVariable, f64> = [
            (OceanVariable::Oxygen, 1.5),
            (OceanVariable::Temperature, 2.5),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"{"oxygen":1.5,"temperature":2.5}"#
        );
    }

    #[test]
    fn test_summary_stats() {
        let stats = SummaryStats::from_values(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.std, 2.0);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);

        assert_eq!(SummaryStats::from_values(Vec::new()), SummaryStats::default());
    }

    #[test]
    fn test_condition_stats_flatten() {
        let stats = OceanConditionStats {
            stats: SummaryStats {
                mean: 1.0,
                std: 0.5,
                min: 0.0,
                max: 2.0,
            },
            unit: "PSU",
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["mean"], 1.0);
        assert_eq!(json["unit"], "PSU");
    }
}

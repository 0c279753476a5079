//! Cross-cutting summaries over occurrence records and ocean grids.
//!
//! Every function here is stateless: it takes the store's records and the
//! grids for the current request and recomputes from scratch. Species are
//! always visited in first-seen order and variables in `OceanVariable::ALL`
//! order, so every report has a stable, discovery-ordered layout.

use crate::constants::*;
use crate::error::{AppError, Result};
use crate::models::analysis::*;
use crate::models::{BoundingBox, EnvironmentalGrid, OccurrenceRecord, OceanVariable};
use crate::services::correlation::{correlate, pearson};
use crate::services::sampler::sample_records;
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Records of one species, in store order.
#[derive(Debug, Clone)]
pub struct SpeciesGroup<'a> {
    pub species: &'a str,
    pub records: Vec<&'a OccurrenceRecord>,
}

impl SpeciesGroup<'_> {
    pub fn abundances(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.abundance).collect()
    }

    pub fn total_abundance(&self) -> f64 {
        self.records.iter().map(|r| r.abundance).sum()
    }

    /// Grid values at each of this species' locations.
    pub fn environment(&self, grid: &EnvironmentalGrid) -> Vec<f64> {
        sample_records(grid, self.records.iter().copied())
    }
}

/// Records grouped by species with name lookup.
#[derive(Debug, Clone)]
pub struct SpeciesIndex<'a> {
    groups: Vec<SpeciesGroup<'a>>,
    by_name: HashMap<&'a str, usize>,
}

impl<'a> SpeciesIndex<'a> {
    pub fn new(records: &'a [OccurrenceRecord]) -> Self {
        let mut groups: Vec<SpeciesGroup<'a>> = Vec::new();
        let mut by_name: HashMap<&'a str, usize> = HashMap::new();

        for record in records {
            let name = record.species_name.as_str();
            let idx = *by_name.entry(name).or_insert_with(|| {
                groups.push(SpeciesGroup {
                    species: name,
                    records: Vec::new(),
                });
                groups.len() - 1
            });
            groups[idx].records.push(record);
        }

        SpeciesIndex { groups, by_name }
    }

    pub fn groups(&self) -> &[SpeciesGroup<'a>] {
        &self.groups
    }

    pub fn get(&self, species: &str) -> Option<&SpeciesGroup<'a>> {
        self.by_name.get(species).map(|&i| &self.groups[i])
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Species ranked by total abundance, descending. Equal totals keep
    /// first-seen order.
    pub fn ranked(&self) -> Vec<&SpeciesGroup<'a>> {
        let mut ranked: Vec<(&SpeciesGroup<'a>, f64)> =
            self.groups.iter().map(|g| (g, g.total_abundance())).collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked.into_iter().map(|(g, _)| g).collect()
    }
}

fn ocean_conditions(
    grids: &[Arc<EnvironmentalGrid>],
) -> IndexMap<OceanVariable, OceanConditionStats> {
    grids
        .iter()
        .map(|grid| {
            (
                grid.variable,
                OceanConditionStats {
                    stats: SummaryStats::from_values(grid.cells()),
                    unit: grid.unit(),
                },
            )
        })
        .collect()
}

/// Grid statistics per variable plus species/observation totals.
pub fn region_statistics(
    records: &[OccurrenceRecord],
    grids: &[Arc<EnvironmentalGrid>],
    region: &BoundingBox,
) -> RegionStatistics {
    RegionStatistics {
        biodiversity: BiodiversityOverview {
            total_species: SpeciesIndex::new(records).len(),
            total_observations: records.len(),
            coverage_area: region.to_string(),
        },
        ocean_conditions: ocean_conditions(grids),
        cross_domain_insights: Vec::new(),
    }
}

/// The `n` most abundant species by summed abundance.
pub fn top_species_by_abundance(records: &[OccurrenceRecord], n: usize) -> Vec<SpeciesAbundance> {
    SpeciesIndex::new(records)
        .ranked()
        .into_iter()
        .take(n)
        .map(|g| SpeciesAbundance {
            species: g.species.to_string(),
            total_abundance: g.total_abundance(),
        })
        .collect()
}

/// Per-species correlation of each variable with abundance.
///
/// Species with fewer than `MIN_CORRELATION_SAMPLES` records are skipped, as
/// are variables whose correlation is undefined. A species left with no
/// defined correlation is omitted.
pub fn analyze_correlations(
    records: &[OccurrenceRecord],
    grids: &[Arc<EnvironmentalGrid>],
) -> CorrelationReport {
    let index = SpeciesIndex::new(records);
    let mut report = CorrelationReport::new();

    for group in index.groups() {
        if group.records.len() < MIN_CORRELATION_SAMPLES {
            continue;
        }

        let abundance = group.abundances();
        let mut correlations = IndexMap::new();
        for grid in grids {
            match correlate(grid.variable, &group.environment(grid), &abundance) {
                Ok(result) => {
                    correlations.insert(grid.variable, CorrelationEntry::from(&result));
                }
                Err(e) => tracing::debug!(
                    species = group.species,
                    variable = %grid.variable,
                    "Skipping correlation: {}",
                    e
                ),
            }
        }

        if !correlations.is_empty() {
            report.insert(
                group.species.to_string(),
                SpeciesCorrelations {
                    sample_size: group.records.len(),
                    correlations,
                },
            );
        }
    }

    tracing::debug!("Correlation analysis covered {} species", report.len());
    report
}

/// Species x variable correlation matrix for the top species by abundance.
///
/// Species with fewer than `MIN_CORRELATION_SAMPLES` records get a row of
/// zeros; undefined correlations are also written as zero.
pub fn correlation_matrix(
    records: &[OccurrenceRecord],
    grids: &[Arc<EnvironmentalGrid>],
) -> CorrelationMatrix {
    let index = SpeciesIndex::new(records);
    let top: Vec<&SpeciesGroup> = index
        .ranked()
        .into_iter()
        .take(CORRELATION_MATRIX_TOP_SPECIES)
        .collect();

    let matrix = top
        .iter()
        .map(|group| {
            if group.records.len() < MIN_CORRELATION_SAMPLES {
                return vec![0.0; grids.len()];
            }
            let abundance = group.abundances();
            grids
                .iter()
                .map(|grid| {
                    pearson(&group.environment(grid), &abundance)
                        .map(|p| p.correlation)
                        .unwrap_or(0.0)
                })
                .collect()
        })
        .collect();

    CorrelationMatrix {
        species: top.iter().map(|g| g.species.to_string()).collect(),
        variables: grids.iter().map(|g| g.variable).collect(),
        matrix,
    }
}

/// Distinct-species counts on a `resolution` x `resolution` grid of cell
/// centers spanning `region`. A record counts toward a center when it lies
/// strictly within `HOTSPOT_RADIUS_DEG` on both axes.
pub fn density_grid(
    records: &[OccurrenceRecord],
    region: &BoundingBox,
    resolution: usize,
) -> DensityGrid {
    let lat = region.lat_axis(resolution);
    let lon = region.lon_axis(resolution);

    let density: Vec<Vec<usize>> = lat
        .iter()
        .map(|&center_lat| {
            lon.iter()
                .map(|&center_lon| {
                    records
                        .iter()
                        .filter(|r| {
                            (r.latitude - center_lat).abs() < HOTSPOT_RADIUS_DEG
                                && (r.longitude - center_lon).abs() < HOTSPOT_RADIUS_DEG
                        })
                        .map(|r| r.species_name.as_str())
                        .collect::<HashSet<_>>()
                        .len()
                })
                .collect()
        })
        .collect();

    let max_density = density.iter().flatten().copied().max().unwrap_or(0);

    DensityGrid {
        lat,
        lon,
        density,
        max_density,
    }
}

/// Abundance and grid statistics plus the first significant correlations in
/// discovery order (species order, then variable order).
pub fn statistical_summary(
    records: &[OccurrenceRecord],
    grids: &[Arc<EnvironmentalGrid>],
) -> StatisticalSummary {
    let correlations = analyze_correlations(records, grids);
    let correlation_insights = correlations
        .iter()
        .flat_map(|(species, entry)| {
            entry
                .correlations
                .iter()
                .filter(|(_, c)| c.significant)
                .map(move |(variable, c)| SignificantFinding {
                    species: species.clone(),
                    variable: *variable,
                    correlation: c.correlation,
                    p_value: c.p_value,
                })
        })
        .take(TOP_SIGNIFICANT_FINDINGS)
        .collect();

    StatisticalSummary {
        biodiversity_summary: BiodiversitySummary {
            total_species: SpeciesIndex::new(records).len(),
            total_observations: records.len(),
            abundance_stats: SummaryStats::from_values(records.iter().map(|r| r.abundance)),
        },
        ocean_conditions_summary: ocean_conditions(grids),
        correlation_insights,
    }
}

/// Detailed report for one species: abundance and location spread plus the
/// correlation and paired samples for every variable where it is defined.
pub fn species_analysis(
    records: &[OccurrenceRecord],
    grids: &[Arc<EnvironmentalGrid>],
    species: &str,
) -> Result<SpeciesAnalysis> {
    let index = SpeciesIndex::new(records);
    let group = index
        .get(species)
        .ok_or_else(|| AppError::NotFound(format!("No records for species '{}'", species)))?;

    let sample_size = group.records.len();
    if sample_size < MIN_SPECIES_ANALYSIS_SAMPLES {
        return Err(AppError::InsufficientSamples {
            required: MIN_SPECIES_ANALYSIS_SAMPLES,
            actual: sample_size,
        });
    }

    let abundance = group.abundances();
    let lats = SummaryStats::from_values(group.records.iter().map(|r| r.latitude));
    let lons = SummaryStats::from_values(group.records.iter().map(|r| r.longitude));

    let mut correlations = IndexMap::new();
    let mut scatter_plots = IndexMap::new();
    for grid in grids {
        let environment = group.environment(grid);
        match correlate(grid.variable, &environment, &abundance) {
            Ok(result) => {
                correlations.insert(grid.variable, CorrelationEntry::from(&result));
                scatter_plots.insert(
                    grid.variable,
                    ScatterSeries {
                        x: environment,
                        y: abundance.clone(),
                        x_label: grid.variable.axis_label(),
                        y_label: "Abundance".to_string(),
                        correlation: result.correlation,
                        p_value: result.p_value,
                    },
                );
            }
            Err(e) => tracing::debug!(species, variable = %grid.variable, "Skipping: {}", e),
        }
    }

    Ok(SpeciesAnalysis {
        species: species.to_string(),
        sample_size,
        abundance_stats: SummaryStats::from_values(abundance),
        location_stats: LocationStats {
            lat_range: [lats.min, lats.max],
            lon_range: [lons.min, lons.max],
        },
        correlations,
        scatter_plots,
    })
}

/// Variable-vs-variable samples pooled over the top species' locations, one
/// panel per ordered pair of distinct variables.
pub fn scatter_matrix(
    records: &[OccurrenceRecord],
    grids: &[Arc<EnvironmentalGrid>],
) -> Option<Vec<ScatterMatrixPanel>> {
    if grids.len() < 2 {
        return None;
    }

    let index = SpeciesIndex::new(records);
    let top: Vec<&SpeciesGroup> = index
        .ranked()
        .into_iter()
        .take(SCATTER_MATRIX_TOP_SPECIES)
        .filter(|g| g.records.len() >= MIN_SPECIES_ANALYSIS_SAMPLES)
        .collect();

    let mut panels = Vec::new();
    for x_grid in grids {
        for y_grid in grids {
            if x_grid.variable == y_grid.variable {
                continue;
            }
            let mut panel = ScatterMatrixPanel {
                x_variable: x_grid.variable,
                y_variable: y_grid.variable,
                x: Vec::new(),
                y: Vec::new(),
            };
            for group in &top {
                panel.x.extend(group.environment(x_grid));
                panel.y.extend(group.environment(y_grid));
            }
            panels.push(panel);
        }
    }
    Some(panels)
}

/// Per variable, the paired environment/abundance samples of the top
/// species that have at least two records.
pub fn species_environment(
    records: &[OccurrenceRecord],
    grids: &[Arc<EnvironmentalGrid>],
) -> IndexMap<OceanVariable, Vec<SpeciesEnvironmentSeries>> {
    let index = SpeciesIndex::new(records);
    let top: Vec<&SpeciesGroup> = index
        .ranked()
        .into_iter()
        .take(SPECIES_ENVIRONMENT_TOP_SPECIES)
        .filter(|g| g.records.len() >= MIN_SPECIES_ANALYSIS_SAMPLES)
        .collect();

    grids
        .iter()
        .map(|grid| {
            let series = top
                .iter()
                .map(|group| {
                    let x = group.environment(grid);
                    let y = group.abundances();
                    let correlation = pearson(&x, &y).ok().map(|p| p.correlation);
                    SpeciesEnvironmentSeries {
                        species: group.species.to_string(),
                        x,
                        y,
                        correlation,
                    }
                })
                .collect();
            (grid.variable, series)
        })
        .collect()
}

/// Each grid with its value range, and the occurrence points with abundance
/// scaled by the maximum abundance.
pub fn environmental_gradients(
    records: &[OccurrenceRecord],
    grids: &[Arc<EnvironmentalGrid>],
) -> EnvironmentalGradients {
    let layers = grids
        .iter()
        .map(|grid| {
            let stats = SummaryStats::from_values(grid.cells());
            (
                grid.variable,
                GradientLayer {
                    lat: grid.latitudes.clone(),
                    lon: grid.longitudes.clone(),
                    data: grid.values.clone(),
                    min: stats.min,
                    max: stats.max,
                    unit: grid.unit(),
                },
            )
        })
        .collect();

    let abundance: Vec<f64> = records.iter().map(|r| r.abundance).collect();
    let max_abundance = abundance
        .iter()
        .copied()
        .fold(0.0_f64, f64::max);
    let scale = if max_abundance > 0.0 { max_abundance } else { 1.0 };

    EnvironmentalGradients {
        layers,
        points: GradientPoints {
            lat: records.iter().map(|r| r.latitude).collect(),
            lon: records.iter().map(|r| r.longitude).collect(),
            species: records.iter().map(|r| r.species_name.clone()).collect(),
            normalized_abundance: abundance.iter().map(|a| a / scale).collect(),
            abundance,
            max_abundance,
        },
    }
}

/// Every cross-domain payload for one request.
pub fn cross_domain_analysis(
    records: &[OccurrenceRecord],
    grids: &[Arc<EnvironmentalGrid>],
    region: &BoundingBox,
) -> CrossDomainAnalysis {
    CrossDomainAnalysis {
        correlation_heatmap: correlation_matrix(records, grids),
        scatter_matrix: scatter_matrix(records, grids),
        species_environment: species_environment(records, grids),
        environmental_gradients: environmental_gradients(records, grids),
        biodiversity_hotspots: density_grid(records, region, DENSITY_GRID_CELLS),
        statistical_summary: statistical_summary(records, grids),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> BoundingBox {
        BoundingBox::new(5.0, 25.0, 65.0, 95.0).unwrap()
    }

    fn record(lat: f64, lon: f64, species: &str, abundance: f64) -> OccurrenceRecord {
        OccurrenceRecord {
            latitude: lat,
            longitude: lon,
            species_name: species.to_string(),
            abundance,
            water_body: None,
            locality: None,
            habitat: None,
        }
    }

    /// Grid whose value equals the row latitude, so sampled values are exact.
    fn latitude_grid(variable: OceanVariable) -> Arc<EnvironmentalGrid> {
        let bbox = region();
        let latitudes = bbox.lat_axis(21);
        let longitudes = bbox.lon_axis(31);
        let values = latitudes
            .iter()
            .map(|&lat| vec![lat; longitudes.len()])
            .collect();
        Arc::new(EnvironmentalGrid {
            variable,
            bbox,
            latitudes,
            longitudes,
            values,
        })
    }

    /// Grid whose value equals the column longitude.
    fn longitude_grid(variable: OceanVariable) -> Arc<EnvironmentalGrid> {
        let bbox = region();
        let latitudes = bbox.lat_axis(21);
        let longitudes = bbox.lon_axis(31);
        let values = latitudes.iter().map(|_| longitudes.clone()).collect();
        Arc::new(EnvironmentalGrid {
            variable,
            bbox,
            latitudes,
            longitudes,
            values,
        })
    }

    fn constant_grid(variable: OceanVariable, value: f64) -> Arc<EnvironmentalGrid> {
        let bbox = region();
        Arc::new(EnvironmentalGrid {
            variable,
            bbox,
            latitudes: bbox.lat_axis(5),
            longitudes: bbox.lon_axis(5),
            values: vec![vec![value; 5]; 5],
        })
    }

    fn grids() -> Vec<Arc<EnvironmentalGrid>> {
        vec![
            latitude_grid(OceanVariable::Temperature),
            longitude_grid(OceanVariable::Salinity),
            constant_grid(OceanVariable::Oxygen, 5.0),
        ]
    }

    /// Species "Rising" grows with latitude; "Pair" has only two records.
    fn records() -> Vec<OccurrenceRecord> {
        vec![
            record(6.0, 70.0, "Rising", 1.0),
            record(10.0, 75.0, "Pair", 50.0),
            record(8.0, 72.0, "Rising", 2.0),
            record(10.0, 71.0, "Rising", 3.0),
            record(12.0, 74.0, "Rising", 4.0),
            record(11.0, 80.0, "Pair", 10.0),
        ]
    }

    #[test]
    fn test_top_species_stable_ties() {
        let records = vec![
            record(6.0, 70.0, "A", 10.0),
            record(7.0, 70.0, "B", 5.0),
            record(8.0, 70.0, "C", 5.0),
        ];
        let top = top_species_by_abundance(&records, 2);
        let names: Vec<&str> = top.iter().map(|s| s.species.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);

        let reordered = vec![
            record(8.0, 70.0, "C", 5.0),
            record(6.0, 70.0, "A", 10.0),
            record(7.0, 70.0, "B", 5.0),
        ];
        let top = top_species_by_abundance(&reordered, 2);
        assert_eq!(top[1].species, "C");
    }

    #[test]
    fn test_top_species_sums_across_records() {
        let top = top_species_by_abundance(&records(), 5);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].species, "Pair");
        assert_eq!(top[0].total_abundance, 60.0);
        assert_eq!(top[1].total_abundance, 10.0);
    }

    #[test]
    fn test_region_statistics() {
        let stats = region_statistics(&records(), &grids(), &region());

        assert_eq!(stats.biodiversity.total_species, 2);
        assert_eq!(stats.biodiversity.total_observations, 6);
        assert!(stats.cross_domain_insights.is_empty());

        let oxygen = stats.ocean_conditions.get(&OceanVariable::Oxygen).unwrap();
        assert_eq!(oxygen.stats.mean, 5.0);
        assert_eq!(oxygen.stats.std, 0.0);
        assert_eq!(oxygen.unit, "ml/l");

        let temperature = stats
            .ocean_conditions
            .get(&OceanVariable::Temperature)
            .unwrap();
        assert_eq!(temperature.stats.min, 5.0);
        assert_eq!(temperature.stats.max, 25.0);
    }

    #[test]
    fn test_analyze_correlations() {
        let report = analyze_correlations(&records(), &grids());

        // "Pair" has fewer than three records and is skipped entirely
        assert_eq!(report.len(), 1);
        let rising = report.get(&"Rising".to_string()).unwrap();
        assert_eq!(rising.sample_size, 4);

        let temperature = rising
            .correlations
            .get(&OceanVariable::Temperature)
            .unwrap();
        assert!((temperature.correlation - 1.0).abs() < 1e-9);
        assert!(temperature.significant);

        // Constant oxygen grid has zero variance and is left out
        assert!(rising.correlations.get(&OceanVariable::Oxygen).is_none());
        assert!(rising.correlations.get(&OceanVariable::Salinity).is_some());
    }

    #[test]
    fn test_analyze_correlations_many_species() {
        let species: Vec<String> = (0..5_000).map(|i| format!("Species {:05}", 4_999 - i)).collect();
        let records: Vec<OccurrenceRecord> = species
            .iter()
            .flat_map(|name| {
                [(6.0, 1.0), (8.0, 2.0), (11.0, 4.0)]
                    .into_iter()
                    .map(move |(lat, abundance)| record(lat, 70.0, name, abundance))
            })
            .collect();

        let report = analyze_correlations(&records, &grids()[..1]);

        assert_eq!(report.len(), species.len());
        assert!(report.keys().eq(species.iter()));
        assert_eq!(report.get("Species 00000").unwrap().sample_size, 3);
    }

    #[test]
    fn test_correlation_matrix_dense() {
        let matrix = correlation_matrix(&records(), &grids());

        assert_eq!(matrix.species, vec!["Pair", "Rising"]);
        assert_eq!(
            matrix.variables,
            vec![
                OceanVariable::Temperature,
                OceanVariable::Salinity,
                OceanVariable::Oxygen
            ]
        );
        assert_eq!(matrix.matrix[0], vec![0.0, 0.0, 0.0]);
        assert!((matrix.matrix[1][0] - 1.0).abs() < 1e-9);
        assert_eq!(matrix.matrix[1][2], 0.0);
        assert!(matrix.matrix.iter().all(|row| row.len() == 3));
    }

    #[test]
    fn test_density_grid_counts_distinct_species() {
        let records = vec![
            record(5.0, 65.0, "A", 1.0),
            record(5.5, 65.5, "A", 1.0),
            record(5.2, 65.2, "B", 1.0),
            record(25.0, 95.0, "C", 1.0),
            // exactly one degree away on latitude: outside the window
            record(6.0, 65.0, "D", 1.0),
        ];
        let grid = density_grid(&records, &region(), DENSITY_GRID_CELLS);

        assert_eq!(grid.lat.len(), DENSITY_GRID_CELLS);
        assert_eq!(grid.lon.len(), DENSITY_GRID_CELLS);
        assert_eq!(grid.density[0][0], 2);
        assert_eq!(grid.density[19][19], 1);
        assert_eq!(grid.max_density, 3);

        let coarse = density_grid(&records, &region(), 2);
        assert_eq!(coarse.lat, vec![5.0, 25.0]);
        assert_eq!(coarse.density, vec![vec![2, 0], vec![0, 1]]);
    }

    #[test]
    fn test_statistical_summary_discovery_order() {
        let mut records = records();
        // A second qualifying species, seen after "Rising", with a weaker fit
        records.extend(vec![
            record(6.0, 66.0, "Later", 9.0),
            record(9.0, 90.0, "Later", 1.0),
            record(14.0, 67.0, "Later", 8.0),
            record(20.0, 93.0, "Later", 2.0),
        ]);

        let summary = statistical_summary(&records, &grids());

        assert_eq!(summary.biodiversity_summary.total_species, 3);
        assert_eq!(summary.biodiversity_summary.total_observations, 10);
        assert_eq!(summary.biodiversity_summary.abundance_stats.max, 50.0);
        assert!(!summary.correlation_insights.is_empty());
        assert!(summary.correlation_insights.len() <= TOP_SIGNIFICANT_FINDINGS);
        assert_eq!(summary.correlation_insights[0].species, "Rising");
        assert_eq!(
            summary.correlation_insights[0].variable,
            OceanVariable::Temperature
        );
        assert!(summary.correlation_insights.iter().all(|f| f.p_value < 0.05));
    }

    #[test]
    fn test_species_analysis() {
        let analysis = species_analysis(&records(), &grids(), "Pair").unwrap();

        assert_eq!(analysis.sample_size, 2);
        assert_eq!(analysis.abundance_stats.mean, 30.0);
        assert_eq!(analysis.location_stats.lat_range, [10.0, 11.0]);
        assert_eq!(analysis.location_stats.lon_range, [75.0, 80.0]);

        let scatter = analysis
            .scatter_plots
            .get(&OceanVariable::Temperature)
            .unwrap();
        assert_eq!(scatter.x, vec![10.0, 11.0]);
        assert_eq!(scatter.y, vec![50.0, 10.0]);
        assert_eq!(scatter.x_label, "Temperature (°C)");
        assert!(analysis.correlations.get(&OceanVariable::Oxygen).is_none());
    }

    #[test]
    fn test_species_analysis_errors() {
        let mut records = records();
        records.push(record(15.0, 85.0, "Single", 1.0));

        assert!(matches!(
            species_analysis(&records, &grids(), "Unknown").unwrap_err(),
            AppError::NotFound(_)
        ));
        assert_eq!(
            species_analysis(&records, &grids(), "Single").unwrap_err(),
            AppError::InsufficientSamples {
                required: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_scatter_matrix_pairs() {
        let panels = scatter_matrix(&records(), &grids()).unwrap();
        assert_eq!(panels.len(), 6);

        let first = &panels[0];
        assert_eq!(first.x_variable, OceanVariable::Temperature);
        assert_eq!(first.y_variable, OceanVariable::Salinity);
        // Pair (2 records) + Rising (4 records)
        assert_eq!(first.x.len(), 6);
        assert_eq!(first.x.len(), first.y.len());

        assert!(scatter_matrix(&records(), &grids()[..1]).is_none());
    }

    #[test]
    fn test_species_environment_series() {
        let series = species_environment(&records(), &grids());
        let temperature = series.get(&OceanVariable::Temperature).unwrap();

        assert_eq!(temperature.len(), 2);
        assert_eq!(temperature[0].species, "Pair");
        assert_eq!(temperature[1].y, vec![1.0, 2.0, 3.0, 4.0]);
        assert!(temperature[1].correlation.is_some());

        let oxygen = series.get(&OceanVariable::Oxygen).unwrap();
        assert!(oxygen.iter().all(|s| s.correlation.is_none()));
    }

    #[test]
    fn test_environmental_gradients_normalization() {
        let gradients = environmental_gradients(&records(), &grids());

        assert_eq!(gradients.points.max_abundance, 50.0);
        assert_eq!(gradients.points.normalized_abundance[1], 1.0);
        assert_eq!(gradients.points.normalized_abundance[0], 0.02);

        let salinity = gradients.layers.get(&OceanVariable::Salinity).unwrap();
        assert_eq!(salinity.min, 65.0);
        assert_eq!(salinity.max, 95.0);

        let empty = environmental_gradients(&[], &grids());
        assert!(empty.points.normalized_abundance.is_empty());
        assert_eq!(empty.points.max_abundance, 0.0);
    }

    #[test]
    fn test_cross_domain_analysis_serializes() {
        let analysis = cross_domain_analysis(&records(), &grids(), &region());
        let json = serde_json::to_value(&analysis).unwrap();

        assert!(json["correlation_heatmap"]["matrix"].is_array());
        assert_eq!(json["biodiversity_hotspots"]["density"].as_array().unwrap().len(), 20);
        assert!(json["statistical_summary"]["correlation_insights"].is_array());
        assert!(json["species_environment"]["oxygen"].is_array());
    }
}

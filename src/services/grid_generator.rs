use crate::constants::GRID_AXIS_POINTS;
use crate::error::{AppError, Result};
use crate::models::{BoundingBox, EnvironmentalGrid, OceanVariable};
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Per-variable multiplier mixed into the base seed so each variable draws an
/// independent noise stream.
const VARIABLE_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Builds synthetic ocean-condition grids.
///
/// A seeded generator produces the same grid for the same variable and region
/// on every call; an unseeded one draws fresh noise each time.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridGenerator {
    seed: Option<u64>,
}

impl GridGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        GridGenerator { seed }
    }

    pub fn seeded(seed: u64) -> Self {
        GridGenerator { seed: Some(seed) }
    }

    pub fn from_entropy() -> Self {
        GridGenerator { seed: None }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn rng_for(&self, variable: OceanVariable) -> StdRng {
        let seed = match self.seed {
            Some(seed) => seed.wrapping_add((variable as u64 + 1).wrapping_mul(VARIABLE_SEED_STRIDE)),
            None => rand::random(),
        };
        StdRng::seed_from_u64(seed)
    }

    pub fn generate(&self, variable: OceanVariable, bbox: &BoundingBox) -> Result<EnvironmentalGrid> {
        let mut rng = self.rng_for(variable);
        generate_with_rng(variable, bbox, &mut rng)
    }
}

/// Deterministic trend for a cell before noise is added. Temperature and
/// oxygen vary along the row latitude, salinity along the column longitude.
fn base_value(variable: OceanVariable, bbox: &BoundingBox, lat: f64, lon: f64) -> f64 {
    match variable {
        // warmer toward the equator
        OceanVariable::Temperature => 28.0 - 0.5 * (lat - bbox.lat_min),
        // saltier toward the east
        OceanVariable::Salinity => 35.0 + 0.1 * (lon - bbox.lon_min),
        // less oxygen further north
        OceanVariable::Oxygen => 5.0 - 0.1 * (lat - bbox.lat_min),
    }
}

fn noise_std_dev(variable: OceanVariable) -> f64 {
    match variable {
        OceanVariable::Temperature => 1.0,
        OceanVariable::Salinity => 0.5,
        OceanVariable::Oxygen => 0.3,
    }
}

/// Generate a `GRID_AXIS_POINTS` x `GRID_AXIS_POINTS` grid drawing Gaussian
/// noise from `rng`, clipped to the variable's physical range.
pub fn generate_with_rng(
    variable: OceanVariable,
    bbox: &BoundingBox,
    rng: &mut StdRng,
) -> Result<EnvironmentalGrid> {
    let noise = Normal::new(0.0, noise_std_dev(variable))
        .map_err(|e| AppError::Internal(format!("Invalid noise distribution: {}", e)))?;
    let (low, high) = variable.clip_range();

    let latitudes = bbox.lat_axis(GRID_AXIS_POINTS);
    let longitudes = bbox.lon_axis(GRID_AXIS_POINTS);

    let values: Vec<Vec<f64>> = latitudes
        .iter()
        .map(|&lat| {
            longitudes
                .iter()
                .map(|&lon| {
                    let value = base_value(variable, bbox, lat, lon) + noise.sample(rng);
                    value.clamp(low, high)
                })
                .collect()
        })
        .collect();

    tracing::debug!(
        variable = %variable,
        "Generated {}x{} synthetic {} grid over {}",
        latitudes.len(),
        longitudes.len(),
        variable,
        bbox
    );

    Ok(EnvironmentalGrid {
        variable,
        bbox: *bbox,
        latitudes,
        longitudes,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> BoundingBox {
        BoundingBox::new(5.0, 25.0, 65.0, 95.0).unwrap()
    }

    #[test]
    fn test_axes_span_region() {
        let grid = GridGenerator::seeded(7)
            .generate(OceanVariable::Temperature, &region())
            .unwrap();

        assert_eq!(grid.latitudes.len(), GRID_AXIS_POINTS);
        assert_eq!(grid.longitudes.len(), GRID_AXIS_POINTS);
        assert_eq!(grid.latitudes[0], 5.0);
        assert_eq!(grid.latitudes[GRID_AXIS_POINTS - 1], 25.0);
        assert_eq!(grid.longitudes[0], 65.0);
        assert_eq!(grid.longitudes[GRID_AXIS_POINTS - 1], 95.0);
        assert!(grid.latitudes.windows(2).all(|w| w[0] < w[1]));
        assert!(grid.longitudes.windows(2).all(|w| w[0] < w[1]));

        assert_eq!(grid.values.len(), GRID_AXIS_POINTS);
        assert!(grid.values.iter().all(|row| row.len() == GRID_AXIS_POINTS));
    }

    #[test]
    fn test_values_within_clip_range() {
        let regions = [
            region(),
            BoundingBox::new(-60.0, 60.0, -170.0, 170.0).unwrap(),
            BoundingBox::new(0.0, 0.5, 10.0, 10.5).unwrap(),
        ];

        for (seed, bbox) in regions.iter().enumerate() {
            let generator = GridGenerator::seeded(seed as u64);
            for variable in OceanVariable::ALL {
                let grid = generator.generate(variable, bbox).unwrap();
                let (low, high) = variable.clip_range();
                assert!(
                    grid.cells().all(|v| (low..=high).contains(&v)),
                    "{} out of range over {}",
                    variable,
                    bbox
                );
            }
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = GridGenerator::seeded(42)
            .generate(OceanVariable::Salinity, &region())
            .unwrap();
        let b = GridGenerator::seeded(42)
            .generate(OceanVariable::Salinity, &region())
            .unwrap();
        let c = GridGenerator::seeded(43)
            .generate(OceanVariable::Salinity, &region())
            .unwrap();

        assert_eq!(a, b);
        assert_ne!(a.values, c.values);
    }

    #[test]
    fn test_variables_use_independent_streams() {
        let generator = GridGenerator::seeded(42);
        let temperature = generator
            .generate(OceanVariable::Temperature, &region())
            .unwrap();
        let oxygen = generator.generate(OceanVariable::Oxygen, &region()).unwrap();

        // Same trend shape but different noise draws
        let t_noise = temperature.values[0][0] - 28.0;
        let o_noise = (oxygen.values[0][0] - 5.0) / 0.3;
        assert_ne!(t_noise, o_noise);
    }

    #[test]
    fn test_trends_follow_gradients() {
        let generator = GridGenerator::seeded(1);
        let temperature = generator
            .generate(OceanVariable::Temperature, &region())
            .unwrap();
        let salinity = generator.generate(OceanVariable::Salinity, &region()).unwrap();

        let row_mean = |row: &Vec<f64>| row.iter().sum::<f64>() / row.len() as f64;
        // Temperature drops ~10 degrees from the southern to the northern row
        assert!(row_mean(&temperature.values[0]) > row_mean(&temperature.values[49]) + 5.0);

        // Salinity rises ~3 PSU from west to east
        let column_mean =
            |grid: &EnvironmentalGrid, j: usize| grid.values.iter().map(|r| r[j]).sum::<f64>() / 50.0;
        assert!(column_mean(&salinity, 49) > column_mean(&salinity, 0) + 1.5);
    }

    #[test]
    fn test_unseeded_generator_still_valid() {
        let grid = GridGenerator::from_entropy()
            .generate(OceanVariable::Oxygen, &region())
            .unwrap();
        assert!(grid.cells().all(|v| (2.0..=8.0).contains(&v)));
    }
}

use crate::models::{EnvironmentalGrid, OccurrenceRecord};

/// Index of the axis value closest to `target`. Ties resolve to the first
/// (lowest) index. Returns `None` only for an empty axis.
pub fn nearest_index(axis: &[f64], target: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &value) in axis.iter().enumerate() {
        let distance = (value - target).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((i, distance)),
        }
    }
    best.map(|(i, _)| i)
}

/// Nearest-grid-point value at (`lat`, `lon`). Points outside the grid snap
/// to the closest edge cell.
pub fn sample(grid: &EnvironmentalGrid, lat: f64, lon: f64) -> Option<f64> {
    let i = nearest_index(&grid.latitudes, lat)?;
    let j = nearest_index(&grid.longitudes, lon)?;
    grid.values.get(i)?.get(j).copied()
}

/// Sample the grid at every record location, keeping record order.
pub fn sample_records<'a, I>(grid: &EnvironmentalGrid, records: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a OccurrenceRecord>,
{
    records
        .into_iter()
        .filter_map(|r| sample(grid, r.latitude, r.longitude))
        .collect()
}

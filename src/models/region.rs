use serde::{Deserialize, Serialize};
use std::fmt;

/// Rectangular lat/lon region used to filter occurrences and bound grids.
/// Bounds are inclusive on every side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    pub fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&lat_min) || !(-90.0..=90.0).contains(&lat_max) {
            return Err(format!(
                "Invalid latitude bounds: {}..{} (must be between -90 and 90)",
                lat_min, lat_max
            ));
        }
        if !(-180.0..=180.0).contains(&lon_min) || !(-180.0..=180.0).contains(&lon_max) {
            return Err(format!(
                "Invalid longitude bounds: {}..{} (must be between -180 and 180)",
                lon_min, lon_max
            ));
        }
        if lat_min >= lat_max || lon_min >= lon_max {
            return Err(format!(
                "Empty bounding box: lat {}..{}, lon {}..{}",
                lat_min, lat_max, lon_min, lon_max
            ));
        }
        Ok(BoundingBox {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        })
    }

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.lat_min..=self.lat_max).contains(&lat) && (self.lon_min..=self.lon_max).contains(&lon)
    }

    /// `points` evenly spaced latitudes from `lat_min` to `lat_max` inclusive.
    pub fn lat_axis(&self, points: usize) -> Vec<f64> {
        linspace(self.lat_min, self.lat_max, points)
    }

    /// `points` evenly spaced longitudes from `lon_min` to `lon_max` inclusive.
    pub fn lon_axis(&self, points: usize) -> Vec<f64> {
        linspace(self.lon_min, self.lon_max, points)
    }

    pub fn lat_range(&self) -> [f64; 2] {
        [self.lat_min, self.lat_max]
    }

    pub fn lon_range(&self) -> [f64; 2] {
        [self.lon_min, self.lon_max]
    }

    /// Bit-exact identity, usable as a hash key.
    pub fn key_bits(&self) -> [u64; 4] {
        [
            self.lat_min.to_bits(),
            self.lat_max.to_bits(),
            self.lon_min.to_bits(),
            self.lon_max.to_bits(),
        ]
    }
}

fn hemisphere(value: f64, positive: char, negative: char) -> String {
    if value < 0.0 {
        format!("{}°{}", -value, negative)
    } else {
        format!("{}°{}", value, positive)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}, {}-{}",
            hemisphere(self.lat_min, 'N', 'S'),
            hemisphere(self.lat_max, 'N', 'S'),
            hemisphere(self.lon_min, 'E', 'W'),
            hemisphere(self.lon_max, 'E', 'W'),
        )
    }
}

/// Evenly spaced values over `[start, end]`; the last value is exactly `end`.
pub fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (points - 1) as f64;
            let mut values: Vec<f64> = (0..points).map(|i| start + step * i as f64).collect();
            values[points - 1] = end;
            values
        }
    }
}

use crate::error::AppError;
use crate::models::BoundingBox;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Environmental variable with a synthetic ocean-condition grid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum OceanVariable {
    Temperature,
    Salinity,
    Oxygen,
}

impl OceanVariable {
    /// Iteration order used by every per-variable report.
    pub const ALL: [OceanVariable; 3] = [
        OceanVariable::Temperature,
        OceanVariable::Salinity,
        OceanVariable::Oxygen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OceanVariable::Temperature => "temperature",
            OceanVariable::Salinity => "salinity",
            OceanVariable::Oxygen => "oxygen",
        }
    }

    pub fn long_name(&self) -> &'static str {
        match self {
            OceanVariable::Temperature => "Sea Surface Temperature",
            OceanVariable::Salinity => "Sea Surface Salinity",
            OceanVariable::Oxygen => "Dissolved Oxygen",
        }
    }

    /// Capitalized label used in axis titles.
    pub fn title(&self) -> &'static str {
        match self {
            OceanVariable::Temperature => "Temperature",
            OceanVariable::Salinity => "Salinity",
            OceanVariable::Oxygen => "Oxygen",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            OceanVariable::Temperature => "°C",
            OceanVariable::Salinity => "PSU",
            OceanVariable::Oxygen => "ml/l",
        }
    }

    pub fn colorscale(&self) -> &'static str {
        match self {
            OceanVariable::Temperature => "RdBu_r",
            OceanVariable::Salinity => "Blues",
            OceanVariable::Oxygen => "Viridis",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            OceanVariable::Temperature => "Ocean temperature field, warmer toward the equator",
            OceanVariable::Salinity => "Ocean salinity field, rising eastward across the region",
            OceanVariable::Oxygen => "Dissolved oxygen concentration, decreasing northward",
        }
    }

    /// Inclusive physical range every generated cell is clipped to.
    pub fn clip_range(&self) -> (f64, f64) {
        match self {
            OceanVariable::Temperature => (20.0, 32.0),
            OceanVariable::Salinity => (32.0, 38.0),
            OceanVariable::Oxygen => (2.0, 8.0),
        }
    }

    pub fn axis_label(&self) -> String {
        format!("{} ({})", self.title(), self.unit())
    }
}

impl fmt::Display for OceanVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OceanVariable {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "temperature" => Ok(OceanVariable::Temperature),
            "salinity" => Ok(OceanVariable::Salinity),
            "oxygen" => Ok(OceanVariable::Oxygen),
            _ => Err(AppError::InvalidVariable(s.to_string())),
        }
    }
}

/// Gridded scalar field for one variable over a bounding box.
///
/// `values[i][j]` is the value at `latitudes[i]`, `longitudes[j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentalGrid {
    pub variable: OceanVariable,
    pub bbox: BoundingBox,
    pub latitudes: Vec<f64>,
    pub longitudes: Vec<f64>,
    pub values: Vec<Vec<f64>>,
}

impl EnvironmentalGrid {
    pub fn unit(&self) -> &'static str {
        self.variable.unit()
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().flat_map(|row| row.iter().copied())
    }

    /// Chart-ready payload including the 2-D coordinate meshes.
    pub fn to_layer(&self) -> OceanLayer {
        let rows = self.latitudes.len();
        OceanLayer {
            lat: self.latitudes.clone(),
            lon: self.longitudes.clone(),
            data: self.values.clone(),
            unit: self.unit().to_string(),
            colorscale: self.variable.colorscale().to_string(),
            lat_grid: self
                .latitudes
                .iter()
                .map(|&lat| vec![lat; self.longitudes.len()])
                .collect(),
            lon_grid: vec![self.longitudes.clone(); rows],
        }
    }
}

/// "Ocean layer" payload consumed by the map and layer endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OceanLayer {
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    pub data: Vec<Vec<f64>>,
    pub unit: String,
    pub colorscale: String,
    pub lat_grid: Vec<Vec<f64>>,
    pub lon_grid: Vec<Vec<f64>>,
}

/// Dataset description served by `/datasets`.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetInfo {
    pub variable: OceanVariable,
    pub long_name: &'static str,
    pub unit: &'static str,
    pub colorscale: &'static str,
    pub description: &'static str,
    pub valid_range: [f64; 2],
}

impl From<OceanVariable> for DatasetInfo {
    fn from(variable: OceanVariable) -> Self {
        let (low, high) = variable.clip_range();
        DatasetInfo {
            variable,
            long_name: variable.long_name(),
            unit: variable.unit(),
            colorscale: variable.colorscale(),
            description: variable.description(),
            valid_range: [low, high],
        }
    }
}

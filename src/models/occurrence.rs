use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One unique (location, species) occurrence after grouping raw rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OccurrenceRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub species_name: String,
    /// Summed individual count of every raw row in the group.
    pub abundance: f64,
    pub water_body: Option<String>,
    pub locality: Option<String>,
    pub habitat: Option<String>,
}

/// Point-based "biodiversity" payload. Every array is index-aligned with the
/// store's record order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BiodiversityData {
    pub points: Vec<[f64; 2]>,
    pub species: Vec<String>,
    pub abundance: Vec<f64>,
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    #[serde(rename = "waterBody")]
    pub water_body: Vec<Option<String>>,
    pub locality: Vec<Option<String>>,
    pub habitat: Vec<Option<String>>,
    pub species_color_map: BTreeMap<String, usize>,
    /// Species names in first-seen order; `species_color_map` indexes into it.
    pub unique_species: Vec<String>,
}

impl BiodiversityData {
    pub fn from_records(records: &[OccurrenceRecord]) -> Self {
        let mut data = BiodiversityData::default();

        for record in records {
            if !data.species_color_map.contains_key(&record.species_name) {
                data.species_color_map
                    .insert(record.species_name.clone(), data.unique_species.len());
                data.unique_species.push(record.species_name.clone());
            }

            data.points.push([record.latitude, record.longitude]);
            data.species.push(record.species_name.clone());
            data.abundance.push(record.abundance);
            data.lat.push(record.latitude);
            data.lon.push(record.longitude);
            data.water_body.push(record.water_body.clone());
            data.locality.push(record.locality.clone());
            data.habitat.push(record.habitat.clone());
        }

        data
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn coordinate_range(&self) -> CoordinateRange {
        CoordinateRange {
            lat_min: self.lat.iter().copied().reduce(f64::min),
            lat_max: self.lat.iter().copied().reduce(f64::max),
            lon_min: self.lon.iter().copied().reduce(f64::min),
            lon_max: self.lon.iter().copied().reduce(f64::max),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CoordinateRange {
    pub lat_min: Option<f64>,
    pub lat_max: Option<f64>,
    pub lon_min: Option<f64>,
    pub lon_max: Option<f64>,
}

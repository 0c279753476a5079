use crate::error::{AppError, Result};
use crate::models::{BiodiversityData, BoundingBox, OccurrenceRecord};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One raw row of the occurrence CSV. Unparseable numbers read as missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOccurrence {
    #[serde(
        rename = "decimalLatitude",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub latitude: Option<f64>,
    #[serde(
        rename = "decimalLongitude",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub longitude: Option<f64>,
    #[serde(rename = "scientificName", default)]
    pub scientific_name: Option<String>,
    #[serde(
        rename = "individualCount",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub individual_count: Option<f64>,
    #[serde(rename = "waterBody", default)]
    pub water_body: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub habitat: Option<String>,
}

/// Grouping key: exact coordinates plus species name.
type GroupKey = (u64, u64, String);

fn group_key(lat: f64, lon: f64, species: &str) -> GroupKey {
    // `+ 0.0` folds -0.0 into 0.0 so both land in the same group
    ((lat + 0.0).to_bits(), (lon + 0.0).to_bits(), species.to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Cleaned, grouped species occurrences. Built once and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct OccurrenceStore {
    records: Vec<OccurrenceRecord>,
}

impl OccurrenceStore {
    /// Load from a CSV file. A missing or unreadable file yields an empty
    /// store rather than an error.
    pub fn load(path: &Path, region: &BoundingBox) -> Self {
        match Self::try_load(path, region) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!("{}. Continuing with an empty occurrence store.", e);
                OccurrenceStore::default()
            }
        }
    }

    pub fn try_load(path: &Path, region: &BoundingBox) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            AppError::DataUnavailable(format!("Cannot open {}: {}", path.display(), e))
        })?;
        tracing::info!("Loading occurrence data from {}", path.display());
        Self::from_reader(file, region)
    }

    /// Parse CSV with a header row. Rows that fail to parse are skipped.
    pub fn from_reader<R: Read>(reader: R, region: &BoundingBox) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        rdr.headers()
            .map_err(|e| AppError::DataUnavailable(format!("Unreadable CSV header: {}", e)))?;

        let mut rows = Vec::new();
        let mut malformed = 0usize;
        for result in rdr.deserialize::<RawOccurrence>() {
            match result {
                Ok(row) => rows.push(row),
                Err(e) => {
                    malformed += 1;
                    tracing::debug!("Skipping malformed occurrence row: {}", e);
                }
            }
        }
        if malformed > 0 {
            tracing::warn!("Skipped {} malformed occurrence rows", malformed);
        }

        Ok(Self::from_rows(rows, region))
    }

    /// Clean, filter to `region` and group raw rows.
    ///
    /// Rows missing latitude, longitude or species are dropped. Rows sharing
    /// (latitude, longitude, species) collapse into one record whose abundance
    /// is the sum of the rows' counts (a missing count counts as 1, a negative
    /// count drops the row) and whose
    /// text fields are the first non-empty value seen. Records keep the order
    /// in which their group first appeared.
    pub fn from_rows<I>(rows: I, region: &BoundingBox) -> Self
    where
        I: IntoIterator<Item = RawOccurrence>,
    {
        let mut records: Vec<OccurrenceRecord> = Vec::new();
        let mut index: HashMap<GroupKey, usize> = HashMap::new();
        let mut raw_count = 0usize;
        let mut complete_count = 0usize;
        let mut in_region_count = 0usize;
        let mut negative_count = 0usize;

        for row in rows {
            raw_count += 1;

            let (lat, lon, species) = match (
                row.latitude.filter(|v| v.is_finite()),
                row.longitude.filter(|v| v.is_finite()),
                non_empty(row.scientific_name),
            ) {
                (Some(lat), Some(lon), Some(species)) => (lat, lon, species),
                _ => continue,
            };
            complete_count += 1;

            if !region.contains(lat, lon) {
                continue;
            }
            in_region_count += 1;

            let abundance = match row.individual_count.filter(|v| v.is_finite()) {
                Some(count) if count < 0.0 => {
                    negative_count += 1;
                    continue;
                }
                Some(count) => count,
                None => 1.0,
            };
            let water_body = non_empty(row.water_body);
            let locality = non_empty(row.locality);
            let habitat = non_empty(row.habitat);

            match index.get(&group_key(lat, lon, &species)) {
                Some(&i) => {
                    let record = &mut records[i];
                    record.abundance += abundance;
                    if record.water_body.is_none() {
                        record.water_body = water_body;
                    }
                    if record.locality.is_none() {
                        record.locality = locality;
                    }
                    if record.habitat.is_none() {
                        record.habitat = habitat;
                    }
                }
                None => {
                    index.insert(group_key(lat, lon, &species), records.len());
                    records.push(OccurrenceRecord {
                        latitude: lat,
                        longitude: lon,
                        species_name: species,
                        abundance,
                        water_body,
                        locality,
                        habitat,
                    });
                }
            }
        }

        if negative_count > 0 {
            tracing::warn!("Dropped {} rows with a negative individual count", negative_count);
        }
        tracing::info!(
            raw = raw_count,
            complete = complete_count,
            in_region = in_region_count,
            records = records.len(),
            "Occurrence data loaded: {} raw rows -> {} grouped records",
            raw_count,
            records.len()
        );

        OccurrenceStore { records }
    }

    pub fn records(&self) -> &[OccurrenceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Full record set as index-aligned parallel arrays. Empty store gives an
    /// empty payload.
    pub fn query(&self) -> BiodiversityData {
        BiodiversityData::from_records(&self.records)
    }
}

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::EnergyError;

/// A single normalised meter reading taken from one source file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeterReading {
    /// Time-zone-naive instant of the reading.
    #[serde(with = "crate::time_utils::naive_datetime_format")]
    pub timestamp: NaiveDateTime,
    /// Consumption in kilowatt-hours. Sign is not enforced.
    pub kwh: f64,
    /// Building identifier derived from the source file's base name.
    pub building: String,
}

/// Chronologically ordered readings from every successfully read source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedDataset {
    readings: Vec<MeterReading>,
}

impl MergedDataset {
    /// Build a dataset from unsorted readings.
    ///
    /// Readings are stably sorted by `(timestamp, building)`, so rows sharing
    /// both keep the order in which they were supplied.
    pub fn from_readings(mut readings: Vec<MeterReading>) -> Self {
        readings.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.building.cmp(&b.building))
        });
        Self { readings }
    }

    pub fn readings(&self) -> &[MeterReading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Sorted, de-duplicated building identifiers present in the dataset.
    pub fn buildings(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.readings.iter().map(|r| r.building.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

/// A file-level ingestion failure paired with its cause.
#[derive(Debug)]
pub struct IngestFailure {
    /// File name of the failed source (e.g. `"library.csv"`).
    pub source_name: String,
    pub reason: EnergyError,
}

impl std::fmt::Display for IngestFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.source_name, self.reason)
    }
}

/// Sum of consumption for one building over one time window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    pub building: String,
    /// First day of the window (the day itself, or the Monday of the week).
    pub period_start: NaiveDate,
    pub kwh: f64,
}

/// Whole-history statistics for one building.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildingSummary {
    pub building: String,
    pub total_kwh: f64,
    pub mean_kwh: f64,
    pub min_kwh: f64,
    pub max_kwh: f64,
    /// Number of readings behind the statistics. Not exported.
    #[serde(skip)]
    pub readings: usize,
}

/// Object-style per-building view projected from a [`BuildingSummary`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildingReport {
    pub building: String,
    pub total_kwh: f64,
    pub num_readings: usize,
}

impl From<&BuildingSummary> for BuildingReport {
    fn from(summary: &BuildingSummary) -> Self {
        Self {
            building: summary.building.clone(),
            total_kwh: summary.total_kwh,
            num_readings: summary.readings,
        }
    }
}

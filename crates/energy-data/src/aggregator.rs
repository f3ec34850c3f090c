//! Consumption aggregation over daily and weekly windows and whole history.
//!
//! Every function here is a pure map over a [`MergedDataset`]. Output rows
//! are ordered by building name and then by window start.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use energy_core::models::{AggregateRow, BuildingReport, BuildingSummary, MergedDataset};
use energy_core::time_utils::{day_start, week_start};

// ── ConsumptionStats ──────────────────────────────────────────────────────────

/// Running sum / min / max / count over a set of readings.
#[derive(Debug, Clone)]
pub struct ConsumptionStats {
    pub total: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl Default for ConsumptionStats {
    fn default() -> Self {
        Self {
            total: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            count: 0,
        }
    }
}

impl ConsumptionStats {
    /// Fold one reading's consumption into the running totals.
    pub fn add(&mut self, kwh: f64) {
        self.total += kwh;
        self.min = self.min.min(kwh);
        self.max = self.max.max(kwh);
        self.count += 1;
    }

    /// Arithmetic mean, or `0.0` when nothing has been added.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total / self.count as f64
        }
    }
}

// ── EnergyAggregator ──────────────────────────────────────────────────────────

/// Stateless helper that groups readings by building and time window.
pub struct EnergyAggregator;

impl EnergyAggregator {
    /// Per-building totals for each calendar day that has readings.
    ///
    /// Days without readings produce no row.
    pub fn daily_totals(dataset: &MergedDataset) -> Vec<AggregateRow> {
        Self::aggregate_by_period(dataset, day_start)
    }

    /// Per-building totals for each ISO week (Monday to Sunday) that has
    /// readings. Rows are labelled with the Monday opening the week.
    pub fn weekly_totals(dataset: &MergedDataset) -> Vec<AggregateRow> {
        Self::aggregate_by_period(dataset, week_start)
    }

    /// Sum, mean, min and max of consumption for every building present.
    ///
    /// Returns rows sorted by building name.
    pub fn building_summary(dataset: &MergedDataset) -> Vec<BuildingSummary> {
        let mut map: BTreeMap<&str, ConsumptionStats> = BTreeMap::new();

        for reading in dataset.readings() {
            map.entry(reading.building.as_str())
                .or_default()
                .add(reading.kwh);
        }

        map.into_iter()
            .map(|(building, stats)| BuildingSummary {
                building: building.to_string(),
                total_kwh: stats.total,
                mean_kwh: stats.mean(),
                min_kwh: stats.min,
                max_kwh: stats.max,
                readings: stats.count,
            })
            .collect()
    }

    /// Object-style per-building view derived from a summary table.
    pub fn building_reports(summary: &[BuildingSummary]) -> Vec<BuildingReport> {
        summary.iter().map(BuildingReport::from).collect()
    }

    /// Total consumption across every reading in the dataset.
    pub fn total_consumption(dataset: &MergedDataset) -> f64 {
        dataset.readings().iter().map(|r| r.kwh).sum()
    }

    /// The building with the largest total, or `None` for an empty summary.
    ///
    /// Equal totals resolve to the building whose name sorts first. Totals
    /// are compared with [`f64::total_cmp`], so the winner never depends on
    /// the order of `summary`.
    pub fn highest_consumer(summary: &[BuildingSummary]) -> Option<&BuildingSummary> {
        summary.iter().max_by(|a, b| {
            a.total_kwh
                .total_cmp(&b.total_kwh)
                .then_with(|| b.building.cmp(&a.building))
        })
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Generic aggregation driver.
    ///
    /// `window_fn` maps a reading's timestamp to the first day of its window.
    fn aggregate_by_period(
        dataset: &MergedDataset,
        window_fn: impl Fn(NaiveDateTime) -> NaiveDate,
    ) -> Vec<AggregateRow> {
        // BTreeMap keeps (building, window) keys sorted.
        let mut map: BTreeMap<(&str, NaiveDate), f64> = BTreeMap::new();

        for reading in dataset.readings() {
            let key = (reading.building.as_str(), window_fn(reading.timestamp));
            *map.entry(key).or_insert(0.0) += reading.kwh;
        }

        map.into_iter()
            .map(|((building, period_start), kwh)| AggregateRow {
                building: building.to_string(),
                period_start,
                kwh,
            })
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Flat-file export of an analysis run.
//!
//! Writes the cleaned dataset, the aggregate tables, the per-building JSON
//! view and the plain-text summary into one output directory. Output is a
//! pure function of the [`AnalysisResult`], so re-running on unchanged input
//! produces byte-identical files.

use std::fs::File;
use std::path::{Path, PathBuf};

use energy_core::error::{EnergyError, Result};
use energy_data::aggregator::EnergyAggregator;
use energy_data::analysis::AnalysisResult;
use serde::Serialize;
use tracing::debug;

use crate::summary::render_summary;

pub const CLEANED_DATA_FILE: &str = "cleaned_energy_data.csv";
pub const BUILDING_SUMMARY_FILE: &str = "building_summary.csv";
pub const DAILY_TOTALS_FILE: &str = "daily_totals.csv";
pub const WEEKLY_TOTALS_FILE: &str = "weekly_totals.csv";
pub const BUILDING_REPORTS_FILE: &str = "building_reports.json";
pub const SUMMARY_TEXT_FILE: &str = "summary.txt";

const READING_HEADER: &[&str] = &["timestamp", "kwh", "building"];
const SUMMARY_HEADER: &[&str] = &["building", "total_kwh", "mean_kwh", "min_kwh", "max_kwh"];
const AGGREGATE_HEADER: &[&str] = &["building", "period_start", "kwh"];

/// Paths of every file written by [`export_all`], in write order.
#[derive(Debug, Clone)]
pub struct ExportPaths {
    pub cleaned_data: PathBuf,
    pub building_summary: PathBuf,
    pub daily_totals: PathBuf,
    pub weekly_totals: PathBuf,
    pub building_reports: PathBuf,
    pub summary_text: PathBuf,
}

impl ExportPaths {
    fn new(output_dir: &Path) -> Self {
        Self {
            cleaned_data: output_dir.join(CLEANED_DATA_FILE),
            building_summary: output_dir.join(BUILDING_SUMMARY_FILE),
            daily_totals: output_dir.join(DAILY_TOTALS_FILE),
            weekly_totals: output_dir.join(WEEKLY_TOTALS_FILE),
            building_reports: output_dir.join(BUILDING_REPORTS_FILE),
            summary_text: output_dir.join(SUMMARY_TEXT_FILE),
        }
    }

    pub fn all(&self) -> [&Path; 6] {
        [
            &self.cleaned_data,
            &self.building_summary,
            &self.daily_totals,
            &self.weekly_totals,
            &self.building_reports,
            &self.summary_text,
        ]
    }
}

/// Write every export artifact into `output_dir`, creating it if needed.
pub fn export_all(result: &AnalysisResult, output_dir: &Path) -> Result<ExportPaths> {
    std::fs::create_dir_all(output_dir).map_err(|source| EnergyError::Export {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let paths = ExportPaths::new(output_dir);

    write_table(&paths.cleaned_data, READING_HEADER, result.dataset.readings())?;
    write_table(&paths.building_summary, SUMMARY_HEADER, &result.summary)?;
    write_table(&paths.daily_totals, AGGREGATE_HEADER, &result.daily)?;
    write_table(&paths.weekly_totals, AGGREGATE_HEADER, &result.weekly)?;

    let reports = EnergyAggregator::building_reports(&result.summary);
    let mut json = serde_json::to_string_pretty(&reports)?;
    json.push('\n');
    write_text(&paths.building_reports, &json)?;

    write_text(&paths.summary_text, &render_summary(result))?;

    debug!("Wrote export files to {}", output_dir.display());
    Ok(paths)
}

/// Write `rows` as CSV under an explicit header.
///
/// The header is written even when `rows` is empty.
pub fn write_table<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> Result<()> {
    let file = File::create(path).map_err(|source| EnergyError::Export {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(|source| EnergyError::Export {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

fn write_text(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|source| EnergyError::Export {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Main analysis pipeline for the campus energy data.
//!
//! Runs discovery and merging, then every aggregation, returning an
//! [`AnalysisResult`] ready for the reporting layer.

use std::path::Path;

use energy_core::error::Result;
use energy_core::models::{AggregateRow, BuildingSummary, IngestFailure, MergedDataset};
use tracing::info;

use crate::aggregator::EnergyAggregator;
use crate::merger::merge_directory;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone)]
pub struct AnalysisMetadata {
    /// Candidate files found in the data directory.
    pub files_seen: usize,
    /// Files that contributed no rows because they failed.
    pub files_failed: usize,
    /// Readings in the merged dataset.
    pub readings: usize,
    /// Distinct buildings with at least one reading.
    pub buildings: usize,
    /// Wall-clock seconds spent discovering and reading files.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent aggregating.
    pub aggregate_time_seconds: f64,
}

/// The complete output of [`analyze_directory`].
#[derive(Debug)]
pub struct AnalysisResult {
    /// All readings, sorted ascending by timestamp.
    pub dataset: MergedDataset,
    /// One entry per file that failed to load.
    pub errors: Vec<IngestFailure>,
    pub daily: Vec<AggregateRow>,
    pub weekly: Vec<AggregateRow>,
    pub summary: Vec<BuildingSummary>,
    pub metadata: AnalysisMetadata,
}

impl AnalysisResult {
    /// Total consumption across every reading.
    pub fn total_consumption(&self) -> f64 {
        EnergyAggregator::total_consumption(&self.dataset)
    }

    /// Summary row of the highest-consuming building, if any.
    pub fn highest_consumer(&self) -> Option<&BuildingSummary> {
        EnergyAggregator::highest_consumer(&self.summary)
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full pipeline over `data_dir`.
///
/// 1. Discover and merge every `.{extension}` file.
/// 2. Compute daily and weekly totals and the building summary.
/// 3. Return an [`AnalysisResult`].
///
/// The only error is a missing or non-directory `data_dir`; per-file failures
/// are reported in [`AnalysisResult::errors`].
pub fn analyze_directory(data_dir: &Path, extension: &str) -> Result<AnalysisResult> {
    // ── Step 1: Load ──────────────────────────────────────────────────────────
    let load_start = std::time::Instant::now();
    let outcome = merge_directory(data_dir, extension)?;
    let load_time = load_start.elapsed().as_secs_f64();

    // ── Step 2: Aggregate ─────────────────────────────────────────────────────
    let aggregate_start = std::time::Instant::now();
    let daily = EnergyAggregator::daily_totals(&outcome.dataset);
    let weekly = EnergyAggregator::weekly_totals(&outcome.dataset);
    let summary = EnergyAggregator::building_summary(&outcome.dataset);
    let aggregate_time = aggregate_start.elapsed().as_secs_f64();

    // ── Step 3: Build result ──────────────────────────────────────────────────
    let metadata = AnalysisMetadata {
        files_seen: outcome.files_seen,
        files_failed: outcome.errors.len(),
        readings: outcome.dataset.len(),
        buildings: summary.len(),
        load_time_seconds: load_time,
        aggregate_time_seconds: aggregate_time,
    };

    info!(
        "Loaded {} readings for {} buildings from {} files ({} failed)",
        metadata.readings, metadata.buildings, metadata.files_seen, metadata.files_failed
    );

    Ok(AnalysisResult {
        dataset: outcome.dataset,
        errors: outcome.errors,
        daily,
        weekly,
        summary,
        metadata,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

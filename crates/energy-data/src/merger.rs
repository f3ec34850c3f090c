//! Source discovery and merging for the campus energy pipeline.
//!
//! Lists the per-building files of a data directory, runs the
//! [`reader`](crate::reader) over each one, and folds the per-file results
//! into a single [`MergedDataset`] plus an error log.

use std::path::{Path, PathBuf};

use energy_core::error::{EnergyError, Result};
use energy_core::models::{IngestFailure, MergedDataset, MeterReading};
use tracing::{debug, warn};

use crate::reader::{read_source, source_name};

// ── Public types ──────────────────────────────────────────────────────────────

/// Everything produced by one merge: the dataset and the per-file failures.
#[derive(Debug, Default)]
pub struct MergeOutcome {
    pub dataset: MergedDataset,
    /// One entry per file that contributed no rows because it failed.
    pub errors: Vec<IngestFailure>,
    /// Number of candidate files that were attempted.
    pub files_seen: usize,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all files with `extension` directly inside `dir`, sorted by path.
///
/// The match on extension ignores ASCII case. Subdirectories are not entered.
/// An entry with a matching name that cannot be inspected, such as a dangling
/// symlink, is still returned so that reading it records a failure. An error
/// listing `dir` itself is fatal.
pub fn discover_sources(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();

    for entry in walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && has_extension(entry.path(), extension) {
                    files.push(entry.into_path());
                }
            }
            Err(err) => {
                let inside = err.depth() > 0 && err.path().is_some_and(|path| path != dir);
                if !inside {
                    return Err(EnergyError::DataDirUnreadable {
                        path: dir.to_path_buf(),
                        source: std::io::Error::from(err),
                    });
                }
                if let Some(path) = err.path().filter(|path| has_extension(path, extension)) {
                    debug!("Keeping uninspectable source {}: {}", path.display(), err);
                    files.push(path.to_path_buf());
                } else {
                    debug!("Ignoring uninspectable entry: {}", err);
                }
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Discover and merge every source file in `dir`.
///
/// Fails only when `dir` is missing, is not a directory, or cannot be listed;
/// every per-file problem ends up in [`MergeOutcome::errors`] instead.
pub fn merge_directory(dir: &Path, extension: &str) -> Result<MergeOutcome> {
    if !dir.exists() {
        return Err(EnergyError::DataDirNotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(EnergyError::NotADirectory(dir.to_path_buf()));
    }

    let sources = discover_sources(dir, extension)?;
    if sources.is_empty() {
        warn!("No .{} files found in {}", extension, dir.display());
    }

    Ok(merge_sources(&sources))
}

/// Read every path in `sources` and combine the results.
///
/// The returned dataset is sorted by timestamp regardless of the order of
/// `sources`.
pub fn merge_sources(sources: &[PathBuf]) -> MergeOutcome {
    let mut readings: Vec<MeterReading> = Vec::new();
    let mut errors: Vec<IngestFailure> = Vec::new();

    for path in sources {
        match read_source(path) {
            Ok(source) => {
                debug!(
                    "Loaded {} readings for building {}",
                    source.readings.len(),
                    source.building
                );
                readings.extend(source.readings);
            }
            Err(reason) => {
                warn!("Skipping {}: {}", path.display(), reason);
                errors.push(IngestFailure {
                    source_name: source_name(path),
                    reason,
                });
            }
        }
    }

    let dataset = MergedDataset::from_readings(readings);

    debug!(
        "Merged {} readings from {} files ({} failed)",
        dataset.len(),
        sources.len(),
        errors.len()
    );

    MergeOutcome {
        dataset,
        errors,
        files_seen: sources.len(),
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

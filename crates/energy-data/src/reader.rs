//! Single-file CSV loading for the campus energy pipeline.
//!
//! Reads one per-building meter file, checks that the timestamp and
//! consumption columns exist, and converts every usable row into a
//! [`MeterReading`] tagged with the building name taken from the file name.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::StringRecord;
use energy_core::error::{EnergyError, Result};
use energy_core::models::MeterReading;
use energy_core::time_utils::parse_timestamp;
use tracing::debug;

/// Header of the column holding the reading instant.
pub const TIMESTAMP_COLUMN: &str = "timestamp";

/// Header of the column holding consumption in kWh.
pub const KWH_COLUMN: &str = "kwh";

// ── Public types ──────────────────────────────────────────────────────────────

/// Normalised readings from one source file plus row-level bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct SourceReadings {
    /// Building identifier shared by every reading.
    pub building: String,
    pub readings: Vec<MeterReading>,
    /// Data lines that tabulated into a record.
    pub rows_read: usize,
    /// Data lines that could not be tabulated and were skipped.
    pub rows_skipped: usize,
    /// Records dropped for an unparseable timestamp or consumption value.
    pub rows_dropped: usize,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Read one CSV file into a [`SourceReadings`].
///
/// File-level problems (unreadable file, no header row, a missing required
/// column) are returned as errors. Row-level problems never are:
/// * lines that do not tabulate, or carry more fields than the header, are
///   skipped;
/// * rows whose timestamp or consumption does not parse are dropped.
pub fn read_source(path: &Path) -> Result<SourceReadings> {
    let building = building_name(path);

    let file = File::open(path).map_err(|source| EnergyError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(EnergyError::EmptySource);
    }

    let ts_idx = find_column(&headers, TIMESTAMP_COLUMN)?;
    let kwh_idx = find_column(&headers, KWH_COLUMN)?;
    let width = headers.len();

    let mut out = SourceReadings {
        building,
        ..SourceReadings::default()
    };

    for result in reader.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) if e.is_io_error() => return Err(EnergyError::Csv(e)),
            Err(e) => {
                debug!("Skipping malformed line in {}: {}", path.display(), e);
                out.rows_skipped += 1;
                continue;
            }
        };

        if record.len() > width {
            debug!(
                "Skipping line {} in {}: {} fields, header has {}",
                line_number(&record),
                path.display(),
                record.len(),
                width
            );
            out.rows_skipped += 1;
            continue;
        }

        out.rows_read += 1;

        match normalize_record(&record, ts_idx, kwh_idx, &out.building) {
            Some(reading) => out.readings.push(reading),
            None => {
                debug!(
                    "Dropping line {} in {}: unparseable timestamp or kwh",
                    line_number(&record),
                    path.display()
                );
                out.rows_dropped += 1;
            }
        }
    }

    debug!(
        "File {}: {} read, {} skipped, {} dropped, {} kept",
        path.display(),
        out.rows_read,
        out.rows_skipped,
        out.rows_dropped,
        out.readings.len(),
    );

    Ok(out)
}

/// Building identifier for a source path: the file name without extension.
pub fn building_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Display name for a source path: the file name with extension.
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Locate `name` among the headers, ignoring surrounding whitespace and case.
fn find_column(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| EnergyError::MissingColumn {
            column: name.to_string(),
        })
}

/// Build a [`MeterReading`] from one record, or `None` if either required cell
/// is empty or unparseable. Missing trailing cells count as empty.
fn normalize_record(
    record: &StringRecord,
    ts_idx: usize,
    kwh_idx: usize,
    building: &str,
) -> Option<MeterReading> {
    let timestamp = parse_timestamp(record.get(ts_idx).unwrap_or(""))?;
    let kwh = parse_kwh(record.get(kwh_idx).unwrap_or(""))?;
    Some(MeterReading {
        timestamp,
        kwh,
        building: building.to_string(),
    })
}

/// Parse a consumption cell. `NaN` and infinities are rejected.
fn parse_kwh(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn line_number(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    // ── read_source ───────────────────────────────────────────────────────────

    #[test]
    fn test_read_source_basic() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "A.csv",
            &["timestamp,kwh", "2024-01-01T00:00,10", "2024-01-01T12:00,5"],
        );

        let out = read_source(&path).unwrap();
        assert_eq!(out.building, "A");
        assert_eq!(out.readings.len(), 2);
        assert!(out.readings.iter().all(|r| r.building == "A"));
        assert_eq!(out.readings[0].kwh, 10.0);
        assert_eq!(out.readings[1].kwh, 5.0);
        assert_eq!(out.rows_read, 2);
        assert_eq!(out.rows_dropped, 0);
    }

    #[test]
    fn test_read_source_extra_columns_ignored() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "Library.csv",
            &["meter_id,timestamp,voltage,kwh", "m1,2024-01-01 06:00:00,230,7.25"],
        );

        let out = read_source(&path).unwrap();
        assert_eq!(out.readings.len(), 1);
        assert!((out.readings[0].kwh - 7.25).abs() < 1e-9);
    }

    #[test]
    fn test_read_source_header_case_and_whitespace() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "Gym.csv", &[" Timestamp , KWH ", "2024-01-01,3"]);

        let out = read_source(&path).unwrap();
        assert_eq!(out.readings.len(), 1);
    }

    #[test]
    fn test_read_source_missing_kwh_column() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "Bad.csv", &["timestamp,power", "2024-01-01,3"]);

        match read_source(&path) {
            Err(EnergyError::MissingColumn { column }) => assert_eq!(column, "kwh"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_read_source_missing_timestamp_column() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "Bad.csv", &["time,kwh", "2024-01-01,3"]);

        match read_source(&path) {
            Err(EnergyError::MissingColumn { column }) => assert_eq!(column, "timestamp"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_read_source_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Empty.csv");
        std::fs::File::create(&path).unwrap();

        assert!(matches!(read_source(&path), Err(EnergyError::EmptySource)));
    }

    #[test]
    fn test_read_source_header_only() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "Quiet.csv", &["timestamp,kwh"]);

        let out = read_source(&path).unwrap();
        assert!(out.readings.is_empty());
        assert_eq!(out.building, "Quiet");
    }

    #[test]
    fn test_read_source_nonexistent_file() {
        let err = read_source(Path::new("/tmp/does-not-exist-energy-test-xyz.csv")).unwrap_err();
        assert!(matches!(err, EnergyError::FileRead { .. }));
    }

    #[test]
    fn test_read_source_drops_unparseable_timestamps() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "B.csv",
            &["timestamp,kwh", "2024-01-01T06:00,7", ",4", "yesterday,2"],
        );

        let out = read_source(&path).unwrap();
        assert_eq!(out.readings.len(), 1);
        assert_eq!(out.rows_read, 3);
        assert_eq!(out.rows_dropped, 2);
    }

    #[test]
    fn test_read_source_drops_unparseable_kwh() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "C.csv",
            &["timestamp,kwh", "2024-01-01,abc", "2024-01-02,", "2024-01-03,nan", "2024-01-04,-1.5"],
        );

        let out = read_source(&path).unwrap();
        assert_eq!(out.readings.len(), 1);
        assert_eq!(out.readings[0].kwh, -1.5);
        assert_eq!(out.rows_dropped, 3);
    }

    #[test]
    fn test_read_source_drops_infinite_kwh() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "Plant.csv",
            &["timestamp,kwh", "2024-01-01,inf", "2024-01-02,-inf", "2024-01-03,Infinity", "2024-01-04,2"],
        );

        let out = read_source(&path).unwrap();
        assert_eq!(out.readings.len(), 1);
        assert_eq!(out.readings[0].kwh, 2.0);
        assert_eq!(out.rows_dropped, 3);
    }

    #[test]
    fn test_read_source_skips_overlong_lines() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "D.csv",
            &["timestamp,kwh", "2024-01-01,1", "2024-01-02,2,extra,cells", "2024-01-03,3"],
        );

        let out = read_source(&path).unwrap();
        assert_eq!(out.readings.len(), 2);
        assert_eq!(out.rows_skipped, 1);
    }

    #[test]
    fn test_read_source_short_line_treated_as_missing_cells() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "E.csv", &["timestamp,kwh", "2024-01-01", "2024-01-02,2"]);

        let out = read_source(&path).unwrap();
        assert_eq!(out.readings.len(), 1);
        assert_eq!(out.rows_dropped, 1);
    }

    #[test]
    fn test_read_source_skips_invalid_utf8_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("F.csv");
        let mut bytes = b"timestamp,kwh\n2024-01-01,1\n".to_vec();
        bytes.extend_from_slice(b"2024-01-02,\xff\xfe\n");
        bytes.extend_from_slice(b"2024-01-03,3\n");
        std::fs::write(&path, bytes).unwrap();

        let out = read_source(&path).unwrap();
        assert_eq!(out.readings.len(), 2);
        assert_eq!(out.rows_skipped, 1);
    }

    // ── naming ────────────────────────────────────────────────────────────────

    #[test]
    fn test_building_name_strips_extension() {
        assert_eq!(building_name(Path::new("/data/Science Block.csv")), "Science Block");
        assert_eq!(building_name(Path::new("hall.v2.csv")), "hall.v2");
    }

    #[test]
    fn test_source_name_keeps_extension() {
        assert_eq!(source_name(Path::new("/data/A.csv")), "A.csv");
    }
}

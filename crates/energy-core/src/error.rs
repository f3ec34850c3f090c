use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the campus energy pipeline.
#[derive(Error, Debug)]
pub enum EnergyError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV header could not be decoded.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is structurally absent from a source file.
    #[error("Missing column '{column}'")]
    MissingColumn { column: String },

    /// A source file has no header row at all.
    #[error("Source has no header row")]
    EmptySource,

    /// The input data directory does not exist.
    #[error("Data path not found: {0}")]
    DataDirNotFound(PathBuf),

    /// The input data path exists but is not a directory.
    #[error("Data path is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The input data directory exists but its entries cannot be listed.
    #[error("Cannot list data directory {path}: {source}")]
    DataDirUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An export artifact could not be written.
    #[error("Failed to write {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be serialised.
    #[error("Failed to serialise JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl EnergyError {
    /// `true` for errors that abort the whole run rather than a single file.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::DataDirNotFound(_) | Self::NotADirectory(_) | Self::DataDirUnreadable { .. }
        )
    }
}

/// Convenience alias used throughout the energy crates.
pub type Result<T> = std::result::Result<T, EnergyError>;

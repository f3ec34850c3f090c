use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Merge per-building meter CSVs and report daily, weekly and building totals
#[derive(Parser, Debug, Clone)]
#[command(
    name = "campus-energy",
    about = "Merge per-building meter CSVs and report daily, weekly and building totals",
    version
)]
pub struct Settings {
    /// Directory containing one CSV file per building
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Directory the export files are written to
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// File extension of the input files
    #[arg(long, default_value = "csv")]
    pub extension: String,

    /// Skip writing export files; only print the summary
    #[arg(long)]
    pub no_export: bool,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments.
    pub fn load() -> Self {
        Settings::parse()
    }

    /// Parse an explicit argument list (first element is the binary name).
    pub fn parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Settings::try_parse_from(args)
    }

    /// The log level actually in effect; `--debug` overrides `--log-level`.
    pub fn effective_log_level(&self) -> &str {
        if self.debug {
            "DEBUG"
        } else {
            self.log_level.as_str()
        }
    }

    /// Extension without a leading dot, so `.csv` and `csv` are equivalent.
    pub fn normalized_extension(&self) -> &str {
        self.extension.trim_start_matches('.')
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

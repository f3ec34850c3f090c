//! Reporting layer for the campus energy pipeline.
//!
//! Turns an [`energy_data::analysis::AnalysisResult`] into the plain-text
//! summary, the console summary table and the flat export files.

pub mod export;
pub mod summary;
pub mod table_view;

pub use energy_core as core;
pub use energy_data as data;

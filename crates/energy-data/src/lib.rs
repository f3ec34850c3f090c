//! Data ingestion and aggregation for the campus energy pipeline.
//!
//! Responsible for reading per-building meter CSV files, merging them into
//! one chronologically ordered dataset, and computing daily, weekly and
//! per-building aggregates.

pub mod aggregator;
pub mod analysis;
pub mod merger;
pub mod reader;

pub use energy_core as core;

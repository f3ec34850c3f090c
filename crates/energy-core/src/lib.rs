//! Shared types for the campus energy pipeline.
//!
//! Holds the normalised reading and aggregate models, the error type,
//! timestamp parsing and window helpers, number formatting and the CLI
//! settings used by the other crates.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{EnergyError, Result};

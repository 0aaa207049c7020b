//! Error types for the Termination Settlement Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that aborts a settlement calculation or a
//! configuration load.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Termination Settlement Engine.
///
/// All validation failures are raised before any line item is produced, so a
/// caller never receives a partial settlement.
///
/// # Example
///
/// ```
/// use settlement_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds values the engine cannot use.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the offending value.
        message: String,
    },

    /// A date range ends before it starts.
    #[error("Invalid date range: end {end} is before start {start}")]
    InvalidDateRange {
        /// The start of the range.
        start: NaiveDate,
        /// The end of the range.
        end: NaiveDate,
    },

    /// A monetary amount or count was outside its permitted range.
    #[error("Invalid amount for '{field}': {message}")]
    InvalidAmount {
        /// The scenario field that was invalid.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// The notice disposition (or notice override) cannot be combined with
    /// the termination category.
    #[error("Unsupported notice '{disposition}' for category '{category}': {message}")]
    UnsupportedCategoryNoticeCombination {
        /// The termination category.
        category: String,
        /// The notice disposition.
        disposition: String,
        /// A description of the inconsistency.
        message: String,
    },
}

impl EngineError {
    /// Returns true if the error was caused by the scenario rather than the
    /// engine's configuration.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidDateRange { .. }
                | EngineError::InvalidAmount { .. }
                | EngineError::UnsupportedCategoryNoticeCombination { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

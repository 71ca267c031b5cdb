//! Error types for the labor cost engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while resolving calendars and
//! pricing line items.

use thiserror::Error;

use crate::models::Phase;

/// The main error type for the labor cost engine.
///
/// All fallible operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use labor_engine::error::EngineError;
///
/// let error = EngineError::Validation {
///     field: "base_rate".to_string(),
///     message: "must not be negative".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid value for 'base_rate': must not be negative");
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

    /// An input value was negative or not a finite number.
    ///
    /// Inputs are rejected rather than clamped so that a zeroed rate can never
    /// silently understate a budget.
    #[error("Invalid value for '{field}': {message}")]
    Validation {
        /// The name of the offending input.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// The calendar cascade could not produce a usable phase configuration.
    ///
    /// This indicates a malformed configuration rather than a runtime condition.
    #[error("Calendar resolution failed for phase '{phase}': {message}")]
    ConfigResolution {
        /// The phase being resolved.
        phase: Phase,
        /// A description of the resolution failure.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for building a [`EngineError::Validation`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for building a [`EngineError::ConfigResolution`].
    pub fn resolution(phase: Phase, message: impl Into<String>) -> Self {
        EngineError::ConfigResolution {
            phase,
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

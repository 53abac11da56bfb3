//! Error types for the Payroll Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all caller-input and configuration failures. Inconsistent records inside
//! a payroll batch are not errors; they surface as audit warnings instead.

use thiserror::Error;

/// The main error type for the Payroll Engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/settings.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/settings.yaml");
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

    /// A settings value is outside its permitted range.
    #[error("Invalid setting '{field}': {message}")]
    InvalidSettings {
        /// The offending settings field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// The requested payroll period could not be constructed.
    #[error("Invalid period: {message}")]
    InvalidPeriod {
        /// A description of what made the period invalid.
        message: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An attendance, overtime or advance entry was rejected at capture time.
    #[error("Invalid entry '{entry_id}': {message}")]
    InvalidEntry {
        /// The ID of the rejected entry.
        entry_id: String,
        /// A description of what made the entry invalid.
        message: String,
    },

    /// The requested employee is not part of the supplied snapshot.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The employee ID that was looked up.
        employee_id: String,
    },

    /// A figure did not fit in a `Decimal` while being calculated.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// A `CalculationError` for a figure that overflowed.
    pub fn out_of_range(figure: &str) -> Self {
        EngineError::CalculationError {
            message: format!("{} is out of range", figure),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

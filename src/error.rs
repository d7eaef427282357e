//! Error types for the Salary Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while resolving salary structures,
//! aggregating leave balances, and processing earned wage access requests.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Salary Engine.
///
/// All fallible operations in the engine return this error type.
///
/// # Example
///
/// ```
/// use salary_engine::error::EngineError;
///
/// let error = EngineError::ComponentNotFound {
///     code: "LTA".to_string(),
/// };
/// assert_eq!(error.to_string(), "Salary component not found: LTA");
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

    /// A component code was not present in the catalog.
    #[error("Salary component not found: {code}")]
    ComponentNotFound {
        /// The component code that was not found.
        code: String,
    },

    /// Percentage components reference each other in a loop.
    #[error("Circular component reference: {}", path.join(" -> "))]
    CircularReference {
        /// The chain of component codes forming the cycle.
        path: Vec<String>,
    },

    /// An amount was outside its permitted range.
    #[error("Invalid amount for '{field}': {message}")]
    InvalidAmount {
        /// The field holding the amount.
        field: String,
        /// A description of what made the amount invalid.
        message: String,
    },

    /// A year and month that do not name a calendar month.
    #[error("Invalid pay period: {year}-{month:02}")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },

    /// An EWA request asked for more than the available balance.
    #[error("Withdrawal amount {requested} exceeds available balance {available}")]
    WithdrawalExceedsBalance {
        /// The amount requested.
        requested: Decimal,
        /// The amount available at the time of the request.
        available: Decimal,
    },

    /// No withdrawal exists with the given ID.
    #[error("Withdrawal not found: {id}")]
    WithdrawalNotFound {
        /// The ID that was not found.
        id: String,
    },

    /// A status change was requested that the current status does not allow.
    #[error("Cannot {action} {entity} in status '{status}'")]
    InvalidTransition {
        /// The kind of record (e.g. "withdrawal", "leave application").
        entity: String,
        /// The current status.
        status: String,
        /// The attempted action.
        action: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Arithmetic on `field` left the range a decimal can hold.
    pub fn overflow(field: &str, quantity: &str) -> Self {
        EngineError::InvalidAmount {
            field: field.to_string(),
            message: format!("{} exceeds the supported decimal range", quantity),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

//! Core error types for the price check.
//!
//! Input and configuration problems are fatal to a whole run: a run either
//! ends with a complete report (rows possibly marked NA) or aborts with a
//! clear description of the record or configuration that caused the abort.
//! Per-record data gaps are not errors at this level; the engine recovers
//! them as NA rows.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

use pricecheck_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the price check.
#[derive(Error, Debug)]
pub enum Error {
    /// A record id did not split into exactly `<ticker>.<suffix>`.
    #[error("Malformed record id: '{0}' (expected <ticker>.<suffix>)")]
    MalformedRecordId(String),

    /// The batch file carried a layout code that is neither known format.
    #[error("Unrecognized record format: '{0}'")]
    UnrecognizedRecordFormat(String),

    /// The resolved price column is absent from the row.
    #[error("Record '{record_id}' has no '{field}' column")]
    MissingPriceField {
        /// The record whose row is incomplete
        record_id: String,
        /// The column the resolver selected
        field: String,
    },

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    /// CSV parsing or rendering failed.
    #[error("CSV error: {0}")]
    Csv(String),

    /// The file-fetch collaborator failed.
    #[error("File feed error: {0}")]
    Feed(String),

    /// The notification collaborator failed to deliver the report.
    #[error("Notification error: {0}")]
    Notify(String),
}

/// Validation errors for input data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date: {0}")]
    DateParse(#[from] ChronoParseError),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateParse(err))
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err.to_string())
    }
}

//! Error types and retry classification for external price sources.
//!
//! This module provides:
//! - [`MarketDataError`]: The error enum for all price source operations
//! - [`RetryClass`]: Classification for determining retry behavior

mod retry_class;

pub use retry_class::RetryClass;

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while fetching or querying external price data.
///
/// Each variant is classified into a [`RetryClass`] via the
/// [`retry_class`](Self::retry_class) method, which determines whether the
/// retry policy should re-attempt the operation.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    /// This is a terminal error - retrying won't help.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The symbol has no configured parent database.
    /// Quandl lookups need a `<database>/<ticker>` pair; a symbol missing
    /// from the database table indicates misconfiguration, not a data gap.
    #[error("No parent database configured for symbol: {0}")]
    UnknownDatabase(String),

    /// The loaded history has no row for the requested date.
    /// The symbol exists but the provider published nothing for that day.
    #[error("No price for {symbol} on {date}")]
    PriceNotAvailable {
        /// The symbol whose history was queried
        symbol: String,
        /// The date absent from the loaded history
        date: NaiveDate,
    },

    /// The operation is not supported by this provider.
    /// For example, the adjusted close on a source that only publishes
    /// a single price column.
    #[error("Operation '{operation}' not supported by provider: {provider}")]
    NotSupported {
        /// The unsupported operation
        operation: String,
        /// The provider that does not support it
        provider: String,
    },

    /// The provider rate limited the request (HTTP 429 or an API note).
    /// Transient - the retry policy may re-attempt.
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    /// Transient - the retry policy may re-attempt.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider dropped or refused the connection mid-request.
    /// Transient - the retry policy may re-attempt.
    #[error("Transient failure from {provider}: {message}")]
    Transient {
        /// The provider that failed
        provider: String,
        /// Description of the failure
        message: String,
    },

    /// A provider-specific error that is not expected to clear on retry,
    /// such as a malformed response body.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Returns the retry classification for this error.
    ///
    /// - [`RetryClass::Never`]: Don't retry, the error is terminal
    /// - [`RetryClass::Retry`]: Transient, re-attempt the operation
    ///
    /// # Examples
    ///
    /// ```
    /// use pricecheck_market_data::errors::{MarketDataError, RetryClass};
    ///
    /// let error = MarketDataError::RateLimited { provider: "ALPHA_VANTAGE".to_string() };
    /// assert_eq!(error.retry_class(), RetryClass::Retry);
    ///
    /// let error = MarketDataError::SymbolNotFound("INVALID".to_string());
    /// assert_eq!(error.retry_class(), RetryClass::Never);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            // Terminal errors - never retry
            Self::SymbolNotFound(_)
            | Self::UnknownDatabase(_)
            | Self::PriceNotAvailable { .. }
            | Self::NotSupported { .. }
            | Self::ProviderError { .. } => RetryClass::Never,

            // Transient errors - re-attempt
            Self::RateLimited { .. }
            | Self::Timeout { .. }
            | Self::Transient { .. }
            | Self::Network(_) => RetryClass::Retry,
        }
    }
}

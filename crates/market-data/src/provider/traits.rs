//! Price source trait definition.
//!
//! This module defines the `PriceSource` trait that all external data
//! sources implement.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::MarketDataError;

/// Trait for external price sources.
///
/// Implement this trait to add support for a new data source. A source
/// owns a resident price history for at most one symbol at a time:
/// [`load`](Self::load) fetches and caches the full history for a symbol,
/// replacing whatever was resident before, and the price queries read from
/// the resident history without further network traffic.
///
/// The reconciliation engine checks [`loaded_symbol`](Self::loaded_symbol)
/// before loading, so consecutive records for the same symbol reuse the
/// resident history.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Unique identifier for this source.
    ///
    /// Should be a constant string like "ALPHA_VANTAGE" or "QUANDL".
    /// Used for logging and error messages.
    fn id(&self) -> &'static str;

    /// The symbol whose history is currently resident, if any.
    fn loaded_symbol(&self) -> Option<&str>;

    /// Fetch and cache the full price history for `symbol`.
    ///
    /// Replaces any previously resident history. Transient connectivity
    /// failures are the source's concern: a source backed by a flaky API
    /// retries internally and only surfaces terminal errors.
    async fn load(&mut self, symbol: &str) -> Result<(), MarketDataError>;

    /// Close price for `date` from the resident history.
    ///
    /// # Errors
    ///
    /// [`MarketDataError::PriceNotAvailable`] if the resident history has
    /// no row for `date`, or if no history is resident at all.
    fn price_on(&self, date: NaiveDate) -> Result<Decimal, MarketDataError>;

    /// Adjusted close price for `date` from the resident history.
    ///
    /// Default implementation returns [`MarketDataError::NotSupported`];
    /// sources that publish an adjusted series override it.
    fn adjusted_price_on(&self, date: NaiveDate) -> Result<Decimal, MarketDataError> {
        let _ = date;
        Err(MarketDataError::NotSupported {
            operation: "adjusted close".to_string(),
            provider: self.id().to_string(),
        })
    }
}

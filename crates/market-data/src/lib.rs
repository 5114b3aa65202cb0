//! External price data access for the daily tracker price check.
//!
//! This crate fetches and caches historical close prices from third-party
//! financial data APIs. It exposes:
//!
//! - [`provider::PriceSource`] - the capability set shared by all sources
//!   (load a symbol's history, query the close for a date, report which
//!   symbol is resident)
//! - [`provider::AlphaVantageSource`] - primary source, daily adjusted
//!   time series
//! - [`provider::QuandlSource`] - secondary source for symbols only
//!   published through Quandl datasets
//! - [`retry::RetryPolicy`] - the transient-failure retry primitive used
//!   by the primary source
//!
//! Sources hold a single symbol's history at a time (see
//! [`provider::SingleSlot`]); the reconciliation run processes symbols
//! sequentially, so one resident history per source is enough.

pub mod errors;
pub mod models;
pub mod provider;
pub mod retry;

pub use errors::{MarketDataError, RetryClass};
pub use models::{DailyQuote, PriceHistory};
pub use provider::{AlphaVantageSource, HistoryCache, PriceSource, QuandlSource, SingleSlot};
pub use retry::RetryPolicy;

//! Price source implementations.
//!
//! - [`traits`] - the `PriceSource` trait all sources implement
//! - [`cache`] - the resident-history cache (single slot by default)
//! - [`alpha_vantage`] - primary source (daily adjusted time series)
//! - [`quandl`] - secondary source (dataset lookups via a parent database)

pub mod alpha_vantage;
pub mod cache;
pub mod quandl;
pub mod traits;

pub use alpha_vantage::AlphaVantageSource;
pub use cache::{HistoryCache, SingleSlot};
pub use quandl::QuandlSource;
pub use traits::PriceSource;

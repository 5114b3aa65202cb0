//! Domain models for external price data.

mod history;

pub use history::{DailyQuote, PriceHistory};

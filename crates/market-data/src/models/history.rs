use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One day of canonical price data for a symbol.
///
/// Providers label their price columns differently ("4. close", "Price",
/// ...); by the time data lands here the labels have been normalized to
/// this shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyQuote {
    /// Closing price (required)
    pub close: Decimal,

    /// Dividend/split adjusted close, where the provider publishes one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted_close: Option<Decimal>,
}

impl DailyQuote {
    /// Create a quote with only a close price.
    pub fn new(close: Decimal) -> Self {
        Self {
            close,
            adjusted_close: None,
        }
    }

    /// Create a quote with both close and adjusted close.
    pub fn adjusted(close: Decimal, adjusted_close: Decimal) -> Self {
        Self {
            close,
            adjusted_close: Some(adjusted_close),
        }
    }
}

/// Full daily price history for one symbol, keyed by calendar date.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PriceHistory {
    /// The provider lookup key this history was fetched for
    pub symbol: String,

    /// Per-day quotes, ordered by date
    pub days: BTreeMap<NaiveDate, DailyQuote>,
}

impl PriceHistory {
    /// Create an empty history for a symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            days: BTreeMap::new(),
        }
    }

    /// Insert a quote for a date, replacing any existing quote.
    pub fn insert(&mut self, date: NaiveDate, quote: DailyQuote) {
        self.days.insert(date, quote);
    }

    /// Look up the quote for a date.
    pub fn get(&self, date: NaiveDate) -> Option<&DailyQuote> {
        self.days.get(&date)
    }

    /// Number of days in the history.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether the history holds no days at all.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

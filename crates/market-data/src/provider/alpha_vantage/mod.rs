//! Alpha Vantage price source implementation.
//!
//! Primary source for the daily price check. Fetches the full daily
//! adjusted time series for a symbol via the TIME_SERIES_DAILY_ADJUSTED
//! endpoint and keeps it resident in a single-slot cache.
//!
//! The Alpha Vantage API drops connections often enough that a fetch may
//! take several tries to go through; `load` runs the fetch under a
//! [`RetryPolicy`] so transient failures never surface to the caller.
//!
//! Note: Alpha Vantage free tier is limited to 5 API calls per minute.

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::{DailyQuote, PriceHistory};
use crate::provider::cache::{HistoryCache, SingleSlot};
use crate::provider::traits::PriceSource;
use crate::retry::RetryPolicy;

const BASE_URL: &str = "https://www.alphavantage.co/query";
const PROVIDER_ID: &str = "ALPHA_VANTAGE";

/// Alpha Vantage price source.
///
/// Holds the most recently loaded symbol's daily history; loading a
/// different symbol evicts it.
pub struct AlphaVantageSource {
    client: Client,
    api_key: String,
    retry: RetryPolicy,
    cache: SingleSlot,
}

// ============================================================================
// Response structures for the Alpha Vantage API
// ============================================================================

/// TIME_SERIES_DAILY_ADJUSTED response envelope.
#[derive(Debug, Deserialize)]
struct TimeSeriesResponse {
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<HashMap<String, DailyBar>>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

/// One day of the time series.
///
/// Alpha Vantage prefixes every field label with an ordinal ("4. close");
/// the serde renames strip that provider formatting down to the canonical
/// close / adjusted close pair.
#[derive(Debug, Deserialize)]
struct DailyBar {
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. adjusted close")]
    adjusted_close: Option<String>,
}

// ============================================================================
// AlphaVantageSource implementation
// ============================================================================

impl AlphaVantageSource {
    /// Create a source with the given API key and the default (unbounded)
    /// retry policy.
    pub fn new(api_key: String) -> Self {
        Self::with_retry(api_key, RetryPolicy::default())
    }

    /// Create a source with an explicit retry policy. Tests use a bounded
    /// policy so a dead endpoint cannot hang the suite.
    pub fn with_retry(api_key: String, retry: RetryPolicy) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            retry,
            cache: SingleSlot::new(),
        }
    }

    /// Check for API-level errors reported inside a 200 response body.
    fn check_api_error(
        error_message: &Option<String>,
        note: &Option<String>,
        information: &Option<String>,
    ) -> Result<(), MarketDataError> {
        if let Some(ref msg) = error_message {
            if msg.contains("Invalid API call") || msg.contains("not found") {
                return Err(MarketDataError::SymbolNotFound(msg.clone()));
            }
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: msg.clone(),
            });
        }

        // "Note" usually indicates rate limiting
        if let Some(ref msg) = note {
            if msg.contains("API call frequency") || msg.contains("rate limit") {
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                });
            }
            warn!("Alpha Vantage note: {}", msg);
        }

        // "Information" can indicate various issues
        if let Some(ref msg) = information {
            if msg.contains("API call frequency") || msg.contains("rate limit") {
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                });
            }
            warn!("Alpha Vantage info: {}", msg);
        }

        Ok(())
    }

    /// Parse a response body into a price history for `symbol`.
    fn parse_time_series(symbol: &str, text: &str) -> Result<PriceHistory, MarketDataError> {
        let response: TimeSeriesResponse =
            serde_json::from_str(text).map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to parse response: {}", e),
            })?;

        Self::check_api_error(
            &response.error_message,
            &response.note,
            &response.information,
        )?;

        let time_series = response.time_series.ok_or_else(|| {
            MarketDataError::SymbolNotFound(format!("No data for symbol: {}", symbol))
        })?;

        let mut history = PriceHistory::new(symbol);
        for (date_str, bar) in time_series {
            let Ok(date) = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d") else {
                continue;
            };
            let Ok(close) = Decimal::from_str(&bar.close) else {
                continue;
            };
            let adjusted_close = bar
                .adjusted_close
                .as_deref()
                .and_then(|s| Decimal::from_str(s).ok());
            history.insert(
                date,
                DailyQuote {
                    close,
                    adjusted_close,
                },
            );
        }

        Ok(history)
    }

    fn resident_quote(&self, date: NaiveDate) -> Result<&DailyQuote, MarketDataError> {
        let history = self
            .cache
            .resident()
            .ok_or_else(|| MarketDataError::PriceNotAvailable {
                symbol: String::new(),
                date,
            })?;
        history
            .get(date)
            .ok_or_else(|| MarketDataError::PriceNotAvailable {
                symbol: history.symbol.clone(),
                date,
            })
    }
}

/// One fetch attempt against the daily adjusted endpoint.
async fn fetch_daily_adjusted(
    client: &Client,
    api_key: &str,
    symbol: &str,
) -> Result<PriceHistory, MarketDataError> {
    let params = [
        ("function", "TIME_SERIES_DAILY_ADJUSTED"),
        ("symbol", symbol),
        ("outputsize", "compact"),
        ("apikey", api_key),
    ];

    let url = reqwest::Url::parse_with_params(BASE_URL, &params).map_err(|e| {
        MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to build URL: {}", e),
        }
    })?;

    debug!(
        "Alpha Vantage request: {}",
        url.as_str().replace(api_key, "***")
    );

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            MarketDataError::Timeout {
                provider: PROVIDER_ID.to_string(),
            }
        } else if e.is_connect() {
            MarketDataError::Transient {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            }
        } else {
            MarketDataError::Network(e)
        }
    })?;

    let status = response.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(MarketDataError::RateLimited {
            provider: PROVIDER_ID.to_string(),
        });
    }

    if !status.is_success() {
        return Err(MarketDataError::Transient {
            provider: PROVIDER_ID.to_string(),
            message: format!("HTTP {}", status),
        });
    }

    let text = response
        .text()
        .await
        .map_err(|e| MarketDataError::Transient {
            provider: PROVIDER_ID.to_string(),
            message: e.to_string(),
        })?;

    AlphaVantageSource::parse_time_series(symbol, &text)
}

// ============================================================================
// PriceSource trait implementation
// ============================================================================

#[async_trait]
impl PriceSource for AlphaVantageSource {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn loaded_symbol(&self) -> Option<&str> {
        self.cache.loaded_symbol()
    }

    async fn load(&mut self, symbol: &str) -> Result<(), MarketDataError> {
        let client = &self.client;
        let api_key = self.api_key.as_str();
        let history = self
            .retry
            .run(|| fetch_daily_adjusted(client, api_key, symbol))
            .await?;

        debug!(
            "Alpha Vantage: loaded {} days of history for {}",
            history.len(),
            symbol
        );
        self.cache.put(history);
        Ok(())
    }

    fn price_on(&self, date: NaiveDate) -> Result<Decimal, MarketDataError> {
        self.resident_quote(date).map(|q| q.close)
    }

    fn adjusted_price_on(&self, date: NaiveDate) -> Result<Decimal, MarketDataError> {
        let quote = self.resident_quote(date)?;
        quote
            .adjusted_close
            .ok_or_else(|| MarketDataError::NotSupported {
                operation: "adjusted close".to_string(),
                provider: PROVIDER_ID.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = r#"{
        "Meta Data": {
            "1. Information": "Daily Time Series with Splits and Dividend Events",
            "2. Symbol": "AAA"
        },
        "Time Series (Daily)": {
            "2024-01-15": {
                "1. open": "99.50",
                "2. high": "101.00",
                "3. low": "99.00",
                "4. close": "100.00",
                "5. adjusted close": "99.75",
                "6. volume": "1000000"
            },
            "2024-01-16": {
                "1. open": "100.10",
                "2. high": "102.00",
                "3. low": "100.00",
                "4. close": "101.50",
                "5. adjusted close": "101.25",
                "6. volume": "900000"
            }
        }
    }"#;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_time_series_normalizes_labels() {
        let history = AlphaVantageSource::parse_time_series("AAA", SAMPLE).unwrap();

        assert_eq!(history.symbol, "AAA");
        assert_eq!(history.len(), 2);

        let quote = history.get(day(2024, 1, 15)).unwrap();
        assert_eq!(quote.close, dec!(100.00));
        assert_eq!(quote.adjusted_close, Some(dec!(99.75)));
    }

    #[test]
    fn test_parse_error_message_maps_to_symbol_not_found() {
        let body = r#"{"Error Message": "Invalid API call. Please retry or visit the documentation."}"#;
        let err = AlphaVantageSource::parse_time_series("NOPE", body).unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound(_)));
    }

    #[test]
    fn test_parse_rate_limit_note() {
        let body = r#"{"Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."}"#;
        let err = AlphaVantageSource::parse_time_series("AAA", body).unwrap_err();
        assert!(matches!(err, MarketDataError::RateLimited { .. }));
    }

    #[test]
    fn test_parse_missing_series_is_symbol_not_found() {
        let body = r#"{"Meta Data": {"2. Symbol": "AAA"}}"#;
        let err = AlphaVantageSource::parse_time_series("AAA", body).unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound(_)));
    }

    #[test]
    fn test_source_id() {
        let source = AlphaVantageSource::new("test_key".to_string());
        assert_eq!(source.id(), "ALPHA_VANTAGE");
        assert_eq!(source.loaded_symbol(), None);
    }

    #[test]
    fn test_price_queries_on_resident_history() {
        let mut source = AlphaVantageSource::new("test_key".to_string());
        let history = AlphaVantageSource::parse_time_series("AAA", SAMPLE).unwrap();
        source.cache.put(history);

        assert_eq!(source.loaded_symbol(), Some("AAA"));
        assert_eq!(source.price_on(day(2024, 1, 16)).unwrap(), dec!(101.50));
        assert_eq!(
            source.adjusted_price_on(day(2024, 1, 16)).unwrap(),
            dec!(101.25)
        );

        let err = source.price_on(day(2024, 1, 17)).unwrap_err();
        assert!(matches!(err, MarketDataError::PriceNotAvailable { .. }));
    }
}

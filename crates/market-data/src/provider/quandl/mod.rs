//! Quandl price source implementation.
//!
//! Secondary source for the handful of symbols whose history is only
//! published through Quandl datasets. A dataset is addressed as
//! `<database>/<ticker>`, so loading a symbol needs a secondary lookup
//! first: the bare ticker is mapped through a configured table to its
//! parent database code. A symbol missing from that table is a
//! configuration error, not a data gap.
//!
//! Quandl publishes a single price column per dataset; there is no
//! adjusted variant.

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::{DailyQuote, PriceHistory};
use crate::provider::cache::{HistoryCache, SingleSlot};
use crate::provider::traits::PriceSource;

const BASE_URL: &str = "https://www.quandl.com/api/v3/datasets";
const PROVIDER_ID: &str = "QUANDL";

/// Columns recognized as the close price, in preference order.
const PRICE_COLUMNS: [&str; 2] = ["Price", "Close"];

/// Quandl price source.
pub struct QuandlSource {
    client: Client,
    api_key: Option<String>,
    /// Bare ticker to parent database code (e.g. "IGLT" -> "LSE").
    databases: HashMap<String, String>,
    cache: SingleSlot,
}

// ============================================================================
// Response structures for the Quandl API
// ============================================================================

#[derive(Debug, Deserialize)]
struct DatasetResponse {
    dataset_data: Option<DatasetData>,
    quandl_error: Option<QuandlError>,
}

#[derive(Debug, Deserialize)]
struct DatasetData {
    column_names: Vec<String>,
    data: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct QuandlError {
    code: Option<String>,
    message: Option<String>,
}

// ============================================================================
// QuandlSource implementation
// ============================================================================

impl QuandlSource {
    /// Create a source with the default database table.
    pub fn new(api_key: Option<String>) -> Self {
        let databases = HashMap::from([("IGLT".to_string(), "LSE".to_string())]);
        Self::with_databases(api_key, databases)
    }

    /// Create a source with an explicit ticker-to-database table.
    pub fn with_databases(api_key: Option<String>, databases: HashMap<String, String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            databases,
            cache: SingleSlot::new(),
        }
    }

    /// Parse a dataset response body into a price history for `symbol`.
    fn parse_dataset(symbol: &str, text: &str) -> Result<PriceHistory, MarketDataError> {
        let response: DatasetResponse =
            serde_json::from_str(text).map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to parse response: {}", e),
            })?;

        if let Some(err) = response.quandl_error {
            let message = err.message.unwrap_or_default();
            // QECx02 is Quandl's "dataset does not exist" code
            if err.code.as_deref() == Some("QECx02") || message.contains("not exist") {
                return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
            }
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message,
            });
        }

        let data = response.dataset_data.ok_or_else(|| {
            MarketDataError::SymbolNotFound(format!("No dataset for symbol: {}", symbol))
        })?;

        let date_idx = data
            .column_names
            .iter()
            .position(|c| c == "Date")
            .unwrap_or(0);
        let price_idx = PRICE_COLUMNS
            .iter()
            .find_map(|name| data.column_names.iter().position(|c| c == name))
            .ok_or_else(|| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!(
                    "No price column in dataset for {} (columns: {:?})",
                    symbol, data.column_names
                ),
            })?;

        let mut history = PriceHistory::new(symbol);
        for row in data.data {
            let Some(date) = row
                .get(date_idx)
                .and_then(|v| v.as_str())
                .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            else {
                continue;
            };
            let Some(close) = row.get(price_idx).and_then(decimal_from_value) else {
                continue;
            };
            history.insert(date, DailyQuote::new(close));
        }

        Ok(history)
    }
}

/// Convert a JSON cell into a decimal, preserving the source's precision
/// by going through the number's string form.
fn decimal_from_value(value: &serde_json::Value) -> Option<Decimal> {
    match value {
        serde_json::Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        serde_json::Value::String(s) => Decimal::from_str(s).ok(),
        _ => None,
    }
}

// ============================================================================
// PriceSource trait implementation
// ============================================================================

#[async_trait]
impl PriceSource for QuandlSource {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn loaded_symbol(&self) -> Option<&str> {
        self.cache.loaded_symbol()
    }

    async fn load(&mut self, symbol: &str) -> Result<(), MarketDataError> {
        // The lookup key may carry a market suffix; the database table and
        // the dataset code both use the bare ticker.
        let ticker = symbol.split('.').next().unwrap_or(symbol);
        let database = self
            .databases
            .get(ticker)
            .ok_or_else(|| MarketDataError::UnknownDatabase(ticker.to_string()))?;

        let mut url = format!("{}/{}/{}/data.json", BASE_URL, database, ticker);
        if let Some(ref key) = self.api_key {
            url.push_str("?api_key=");
            url.push_str(key);
        }

        debug!("Quandl request: {}/{}", database, ticker);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::Network(e)
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
        }
        if !status.is_success() {
            return Err(MarketDataError::ProviderError {
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

        let history = Self::parse_dataset(symbol, &text)?;
        debug!(
            "Quandl: loaded {} days of history for {}",
            history.len(),
            symbol
        );
        self.cache.put(history);
        Ok(())
    }

    fn price_on(&self, date: NaiveDate) -> Result<Decimal, MarketDataError> {
        let history = self
            .cache
            .resident()
            .ok_or_else(|| MarketDataError::PriceNotAvailable {
                symbol: String::new(),
                date,
            })?;
        history
            .get(date)
            .map(|q| q.close)
            .ok_or_else(|| MarketDataError::PriceNotAvailable {
                symbol: history.symbol.clone(),
                date,
            })
    }
}

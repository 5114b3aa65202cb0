//! Record id resolution.
//!
//! Maps an internal record id plus its layout onto everything the engine
//! needs to fetch the comparison price: the external lookup key, which
//! source publishes it, and which column of the internal row holds the
//! authoritative price.
//!
//! RICs follow `<ticker>.<suffix>` formatting. In the primary source's
//! identifier space, indices provided by a local (domestic) exchange are
//! looked up by bare ticker; international listings keep their suffix.
//! A fixed allow-list of tickers is only published through the secondary
//! source and keeps the full record id as its lookup key.

use crate::errors::{Error, Result};
use crate::records::RecordFormat;

/// Market suffixes denoting local exchanges; these are stripped from the
/// RIC to produce the primary source's lookup key.
pub const LOCAL_MARKET_SUFFIXES: [&str; 2] = ["OQ", "P"];

/// Tickers whose data is strictly available from the secondary source.
pub const SECONDARY_TICKERS: [&str; 1] = ["IGLT"];

/// Price column for SNA rows, independent of suffix.
const SNA_PRICE_FIELD: &str = "CURRENT PRICE";

/// Default price column for SNC rows with an unmapped suffix.
const SNC_DEFAULT_PRICE_FIELD: &str = "INDEX PRICE";

/// Which external source a resolved record is priced against.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProviderKind {
    /// The default source (Alpha Vantage).
    Primary,
    /// The allow-listed secondary source (Quandl).
    Secondary,
}

/// Everything the engine needs to price one record externally.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Resolution {
    /// Bare ticker, suffix stripped; this is what the report shows.
    pub ticker: String,
    /// External lookup key (bare ticker or full record id, see module
    /// docs).
    pub symbol: String,
    /// Source that publishes this symbol.
    pub provider: ProviderKind,
    /// Internal row column holding the authoritative price.
    pub price_field: &'static str,
}

/// Resolve a record id and layout.
///
/// Pure and deterministic: identical inputs always produce the identical
/// resolution.
///
/// # Errors
///
/// [`Error::MalformedRecordId`] when `ric` does not split into exactly
/// `<ticker>.<suffix>` with both parts non-empty.
pub fn resolve(ric: &str, format: RecordFormat) -> Result<Resolution> {
    let (ticker, suffix) = split_ric(ric)?;

    // Provider selection happens on the bare ticker, not the full RIC.
    let provider = if SECONDARY_TICKERS.contains(&ticker) {
        ProviderKind::Secondary
    } else {
        ProviderKind::Primary
    };

    // Secondary tickers and international listings keep the full record
    // id; local listings are looked up unsuffixed.
    let symbol = if provider == ProviderKind::Secondary
        || !LOCAL_MARKET_SUFFIXES.contains(&suffix)
    {
        ric.to_string()
    } else {
        ticker.to_string()
    };

    let price_field = match format {
        RecordFormat::Sna => SNA_PRICE_FIELD,
        RecordFormat::Snc => snc_price_field(suffix),
    };

    Ok(Resolution {
        ticker: ticker.to_string(),
        symbol,
        provider,
        price_field,
    })
}

/// Price column for an SNC row, by market suffix.
///
/// The primary source's data on international funds varies in whether it
/// refers to index or local price data, depending on the region.
fn snc_price_field(suffix: &str) -> &'static str {
    match suffix {
        "DE" => "LOCAL PRICE",
        "L" => "INDEX PRICE",
        _ => SNC_DEFAULT_PRICE_FIELD,
    }
}

fn split_ric(ric: &str) -> Result<(&str, &str)> {
    match ric.split_once('.') {
        Some((ticker, suffix))
            if !ticker.is_empty() && !suffix.is_empty() && !suffix.contains('.') =>
        {
            Ok((ticker, suffix))
        }
        _ => Err(Error::MalformedRecordId(ric.to_string())),
    }
}

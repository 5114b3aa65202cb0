//! Internal daily price records.
//!
//! One batch file holds one day of tracker index rows. The file name
//! carries the metadata: an 8-digit `YYYYMMDD` prefix gives the as-of
//! date, and the 3 characters before the `.csv` extension name the row
//! layout (`SNA` or `SNC`). Rows themselves are keyed by a RIC-style
//! `<ticker>.<suffix>` identifier.

mod csv_parser;

pub use csv_parser::parse_batch;

use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::{Error, Result};

/// Row layout of a batch file, named by the 3-character code in the file
/// name.
///
/// The layout determines which column holds the authoritative price:
/// `Sna` files store it under `CURRENT PRICE`, `Snc` files under a
/// suffix-dependent column (see [`crate::resolver`]).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RecordFormat {
    /// `SNA` layout - price under `CURRENT PRICE` for every row.
    Sna,
    /// `SNC` layout - price column depends on the market suffix.
    Snc,
}

impl RecordFormat {
    /// Parse a 3-character layout code from a file name.
    ///
    /// # Errors
    ///
    /// [`Error::UnrecognizedRecordFormat`] for anything but `SNA`/`SNC` -
    /// an unknown code means the file is not ours to interpret.
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "SNA" => Ok(Self::Sna),
            "SNC" => Ok(Self::Snc),
            other => Err(Error::UnrecognizedRecordFormat(other.to_string())),
        }
    }

    /// The layout code as it appears in file names.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sna => "SNA",
            Self::Snc => "SNC",
        }
    }
}

/// One parsed row of internal daily price data.
///
/// Immutable after construction; owned by the batch being reconciled and
/// discarded afterwards.
#[derive(Clone, Debug)]
pub struct InternalRecord {
    /// RIC-style identifier, `<ticker>.<suffix>`.
    pub ric: String,
    /// Layout of the originating file.
    pub format: RecordFormat,
    /// Business day the prices were published for.
    pub as_of: NaiveDate,
    /// Raw column values, keyed by header name.
    fields: HashMap<String, String>,
}

impl InternalRecord {
    /// Construct a record from a parsed row.
    pub fn new(
        ric: impl Into<String>,
        format: RecordFormat,
        as_of: NaiveDate,
        fields: HashMap<String, String>,
    ) -> Self {
        Self {
            ric: ric.into(),
            format,
            as_of,
            fields,
        }
    }

    /// Raw value of a column, if present.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// The row's price from the given column, as a decimal.
    ///
    /// # Errors
    ///
    /// [`Error::MissingPriceField`] if the column is absent,
    /// [`crate::errors::ValidationError::DecimalParse`] if its value is
    /// not a number.
    pub fn price(&self, field: &str) -> Result<Decimal> {
        let raw = self.field(field).ok_or_else(|| Error::MissingPriceField {
            record_id: self.ric.clone(),
            field: field.to_string(),
        })?;
        Ok(Decimal::from_str(raw.trim())?)
    }
}

/// Metadata carried by a batch file name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BatchFileName {
    /// As-of date from the 8-digit prefix.
    pub as_of: NaiveDate,
    /// Layout from the 3-character code before the extension.
    pub format: RecordFormat,
}

impl BatchFileName {
    /// Parse `<YYYYMMDD>...<CODE>.csv` file name metadata.
    pub fn parse(name: &str) -> Result<Self> {
        let date_part = name.get(..8).ok_or_else(|| {
            Error::Validation(crate::errors::ValidationError::InvalidInput(format!(
                "File name too short for a date prefix: '{}'",
                name
            )))
        })?;
        let as_of = NaiveDate::parse_from_str(date_part, "%Y%m%d")?;

        let stem = name.strip_suffix(".csv").ok_or_else(|| {
            Error::Validation(crate::errors::ValidationError::InvalidInput(format!(
                "Batch file name missing .csv extension: '{}'",
                name
            )))
        })?;
        let code = stem
            .get(stem.len().saturating_sub(3)..)
            .filter(|c| c.len() == 3)
            .ok_or_else(|| Error::UnrecognizedRecordFormat(stem.to_string()))?;
        let format = RecordFormat::from_code(code)?;

        Ok(Self { as_of, format })
    }
}

//! CSV batch file parsing.
//!
//! Turns the bytes of one downloaded batch file into a sequence of
//! [`InternalRecord`]s, preserving row order. The file name supplies the
//! as-of date and layout; the header row supplies the column names.

use std::collections::HashMap;

use csv::ReaderBuilder;
use log::debug;

use super::{BatchFileName, InternalRecord};
use crate::errors::{Error, Result};

/// Column holding the per-row record identifier.
const RIC_COLUMN: &str = "RIC";

/// Parse a batch file into records.
///
/// Rows with an empty `RIC` cell are skipped - the feed pads files with
/// trailing blank rows. A file without a `RIC` column at all is rejected.
pub fn parse_batch(filename: &str, bytes: &[u8]) -> Result<Vec<InternalRecord>> {
    let meta = BatchFileName::parse(filename)?;

    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    if !headers.iter().any(|h| h == RIC_COLUMN) {
        return Err(Error::Csv(format!(
            "Batch file '{}' has no '{}' column",
            filename, RIC_COLUMN
        )));
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let mut fields: HashMap<String, String> = HashMap::with_capacity(headers.len());
        for (header, value) in headers.iter().zip(row.iter()) {
            fields.insert(header.to_string(), value.to_string());
        }

        let ric = match fields.get(RIC_COLUMN) {
            Some(ric) if !ric.is_empty() => ric.clone(),
            _ => continue,
        };
        records.push(InternalRecord::new(ric, meta.format, meta.as_of, fields));
    }

    debug!("Loaded {} records from {}", records.len(), filename);
    Ok(records)
}

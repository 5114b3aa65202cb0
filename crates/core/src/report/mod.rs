//! Discrepancy report assembly and rendering.
//!
//! The report is a stable tabular shape: one row per reconciled record,
//! columns `Ticker, CSV Price, API Price, Difference` in that order.
//! Rows with no external data render the literal string `NA` rather than
//! a blank cell, so a gap reads as a deliberate statement in the mailed
//! file.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::reconcile::ComparisonResult;

/// Rendering for absent external prices and differences.
const NA: &str = "NA";

/// Report column headers, in output order.
const HEADERS: [&str; 4] = ["Ticker", "CSV Price", "API Price", "Difference"];

/// The assembled discrepancy report for one business day.
///
/// Immutable once built.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Report {
    /// Business day the report covers.
    pub as_of: NaiveDate,
    rows: Vec<ComparisonResult>,
}

impl Report {
    /// The reconciled rows, in input order.
    pub fn rows(&self) -> &[ComparisonResult] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the report has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Dated file name for the serialized report.
    pub fn file_name(&self) -> String {
        format!("BEST20T_{}.csv", self.as_of.format("%Y%m%d"))
    }

    /// Render the report as CSV.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(HEADERS)?;
        for row in &self.rows {
            writer.write_record([
                row.ticker.clone(),
                row.internal_price.to_string(),
                render_optional(&row.external_price),
                render_optional(&row.difference),
            ])?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| Error::Csv(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| Error::Csv(e.to_string()))
    }
}

fn render_optional(value: &Option<rust_decimal::Decimal>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => NA.to_string(),
    }
}

/// Builds a [`Report`] from the engine's result set.
///
/// Pure transform; an empty result set produces an empty report, not an
/// error.
pub struct ReportBuilder;

impl ReportBuilder {
    /// Assemble the report for a business day.
    pub fn build(results: Vec<ComparisonResult>, as_of: NaiveDate) -> Report {
        Report {
            as_of,
            rows: results,
        }
    }
}

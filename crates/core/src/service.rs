//! End-to-end orchestration of one daily run.
//!
//! Pulls the day's batch files from the feed, reconciles every row, and
//! hands the rendered report to the notifier. A run either ends with a
//! complete report (rows possibly marked NA) or aborts on the first fatal
//! error; no partial report is ever emitted.

use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use log::info;

use crate::errors::Result;
use crate::feed::{fetch_matching, FileFeed};
use crate::notify::{ReportAttachment, ReportNotifier};
use crate::reconcile::ReconciliationEngine;
use crate::records;
use crate::report::{Report, ReportBuilder};

/// File name patterns selecting the batch files worth reconciling.
pub const INCLUDE_PATTERNS: [&str; 2] = ["SNA", "CLS.SNC"];

/// Orchestrates one daily price check run.
pub struct PriceCheckService {
    feed: Arc<dyn FileFeed>,
    engine: ReconciliationEngine,
    notifier: Option<Arc<dyn ReportNotifier>>,
}

impl PriceCheckService {
    /// Create a service over a feed and a configured engine.
    pub fn new(feed: Arc<dyn FileFeed>, engine: ReconciliationEngine) -> Self {
        Self {
            feed,
            engine,
            notifier: None,
        }
    }

    /// Attach a notifier; without one the run stops after building the
    /// report.
    pub fn with_notifier(mut self, notifier: Arc<dyn ReportNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// The business day before `today`: Monday maps back to Friday,
    /// every other day to the previous calendar day.
    pub fn previous_business_day(today: NaiveDate) -> NaiveDate {
        let offset = if today.weekday() == Weekday::Mon { 3 } else { 1 };
        today - Duration::days(offset)
    }

    /// Run the price check for one business day.
    ///
    /// Returns `Ok(None)` when the feed has no matching files for the
    /// date - an empty inbox is an expected state, not an error.
    pub async fn run_for(&mut self, as_of: NaiveDate, recipient: &str) -> Result<Option<Report>> {
        let prefix = as_of.format("%Y%m%d").to_string();
        let files = fetch_matching(self.feed.as_ref(), &prefix, &INCLUDE_PATTERNS).await?;
        if files.is_empty() {
            info!("No data available for {}", as_of);
            return Ok(None);
        }

        let mut results = Vec::new();
        for file in &files {
            let batch = records::parse_batch(&file.name, &file.contents)?;
            results.extend(self.engine.reconcile(&batch).await?);
        }
        info!("Reconciled {} records for {}", results.len(), as_of);

        let report = ReportBuilder::build(results, as_of);

        if let Some(ref notifier) = self.notifier {
            let attachment = ReportAttachment {
                file_name: report.file_name(),
                contents: report.to_csv()?,
            };
            notifier.send(&attachment, recipient).await?;
            info!("{} sent to {}", attachment.file_name, recipient);
        }

        Ok(Some(report))
    }
}

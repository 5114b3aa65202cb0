//! Daily tracker price check - core business logic.
//!
//! This crate reconciles the internally produced tracker index prices
//! (dated CSV batches) against close prices from external financial data
//! APIs and assembles the discrepancy report:
//!
//! - [`records`] - parsed input rows and batch file naming conventions
//! - [`resolver`] - maps an internal record id to its external lookup key,
//!   source, and price column
//! - [`reconcile`] - the reconciliation engine and its per-row results
//! - [`report`] - the final tabular report and its CSV rendering
//! - [`feed`] - the file-fetch collaborator interface (transport lives
//!   elsewhere)
//! - [`notify`] - the outbound-notification collaborator interface
//! - [`service`] - end-to-end orchestration of one daily run

pub mod errors;
pub mod feed;
pub mod notify;
pub mod reconcile;
pub mod records;
pub mod report;
pub mod resolver;
pub mod service;


// Re-export error types
pub use errors::{Error, Result, ValidationError};

// Re-export commonly used types for convenience
pub use feed::{fetch_matching, FetchedFile, FileFeed};
pub use notify::{ReportAttachment, ReportNotifier};
pub use reconcile::{ComparisonResult, ReconciliationEngine};
pub use records::{BatchFileName, InternalRecord, RecordFormat};
pub use report::{Report, ReportBuilder};
pub use resolver::{resolve, ProviderKind, Resolution};
pub use service::PriceCheckService;

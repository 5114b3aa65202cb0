//! Price reconciliation.
//!
//! - [`model`] - the per-record comparison result
//! - [`engine`] - the engine orchestrating resolution, source selection,
//!   and comparison

pub mod engine;
pub mod model;


pub use engine::ReconciliationEngine;
pub use model::ComparisonResult;

//! The reconciliation engine.
//!
//! Walks a batch of internal records in order and produces one
//! [`ComparisonResult`] per record. One long-lived source session exists
//! per provider variant and is shared across the batch, so consecutive
//! records for the same symbol reuse the resident history instead of
//! re-fetching.
//!
//! Failure semantics: a malformed record id, an unrecognized layout, a
//! missing price column, or a missing provider database aborts the whole
//! batch - these indicate bad input or misconfiguration. A date absent
//! from an otherwise valid history is a data gap, recovered locally as an
//! NA row with a logged warning.

use std::time::Instant;

use log::{debug, warn};

use pricecheck_market_data::{MarketDataError, PriceSource};

use super::model::ComparisonResult;
use crate::errors::Result;
use crate::records::InternalRecord;
use crate::resolver::{self, ProviderKind};

/// Reconciles internal records against external close prices.
pub struct ReconciliationEngine {
    primary: Box<dyn PriceSource>,
    secondary: Box<dyn PriceSource>,
}

impl ReconciliationEngine {
    /// Create an engine over one session per provider variant.
    pub fn new(primary: Box<dyn PriceSource>, secondary: Box<dyn PriceSource>) -> Self {
        Self { primary, secondary }
    }

    /// Reconcile a batch, preserving input order.
    ///
    /// Returns the full result set or the first fatal error; no partial
    /// result set is ever returned.
    pub async fn reconcile(&mut self, batch: &[InternalRecord]) -> Result<Vec<ComparisonResult>> {
        let mut results = Vec::with_capacity(batch.len());
        for record in batch {
            results.push(self.reconcile_record(record).await?);
        }
        Ok(results)
    }

    async fn reconcile_record(&mut self, record: &InternalRecord) -> Result<ComparisonResult> {
        let resolution = resolver::resolve(&record.ric, record.format)?;
        let internal = record.price(resolution.price_field)?;

        let source = match resolution.provider {
            ProviderKind::Primary => &mut self.primary,
            ProviderKind::Secondary => &mut self.secondary,
        };

        if source.loaded_symbol() != Some(resolution.symbol.as_str()) {
            let started = Instant::now();
            source.load(&resolution.symbol).await?;
            debug!(
                "{}: loaded {} in {:.2?}",
                source.id(),
                resolution.symbol,
                started.elapsed()
            );
        }

        match source.price_on(record.as_of) {
            Ok(external) => Ok(ComparisonResult::matched(
                resolution.ticker,
                internal,
                external,
            )),
            Err(MarketDataError::PriceNotAvailable { .. }) => {
                warn!(
                    "{} data not provided for {} on {}",
                    source.id(),
                    resolution.ticker,
                    record.as_of
                );
                Ok(ComparisonResult::unpriced(resolution.ticker, internal))
            }
            Err(err) => Err(err.into()),
        }
    }
}

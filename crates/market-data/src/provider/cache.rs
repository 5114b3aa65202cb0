//! Resident-history cache for price sources.
//!
//! Each source keeps the history of the symbol it most recently loaded so
//! that repeated price queries for that symbol cost nothing. The
//! reconciliation run processes symbols one at a time, so a single resident
//! slot is enough; the [`HistoryCache`] trait keeps that assumption
//! swappable should the engine ever process symbols in parallel.

use crate::models::PriceHistory;

/// Cache of fetched price histories, keyed by symbol.
pub trait HistoryCache: Send + Sync {
    /// The symbol of the most recently stored history, if any.
    fn loaded_symbol(&self) -> Option<&str>;

    /// Look up a resident history by symbol.
    fn get(&self, symbol: &str) -> Option<&PriceHistory>;

    /// Store a history, evicting per the cache's policy.
    fn put(&mut self, history: PriceHistory);
}

/// Single-slot cache: at most one symbol's history is resident.
///
/// Storing a different symbol's history evicts the previous one.
#[derive(Debug, Default)]
pub struct SingleSlot {
    slot: Option<PriceHistory>,
}

impl SingleSlot {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The resident history, regardless of symbol.
    pub fn resident(&self) -> Option<&PriceHistory> {
        self.slot.as_ref()
    }
}

impl HistoryCache for SingleSlot {
    fn loaded_symbol(&self) -> Option<&str> {
        self.slot.as_ref().map(|h| h.symbol.as_str())
    }

    fn get(&self, symbol: &str) -> Option<&PriceHistory> {
        self.slot.as_ref().filter(|h| h.symbol == symbol)
    }

    fn put(&mut self, history: PriceHistory) {
        self.slot = Some(history);
    }
}

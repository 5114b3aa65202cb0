//! Comparison result model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One reconciled row: the internal price next to the external one.
///
/// An absent external price is an explicit state, never a zero sentinel:
/// a legitimately-zero close must not be mistaken for "no data". The
/// constructors keep the invariant that `difference` is present exactly
/// when `external_price` is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Bare ticker, as shown in the report.
    pub ticker: String,

    /// Price from the internal batch file.
    pub internal_price: Decimal,

    /// Close price from the external source; `None` means the source
    /// published nothing for the as-of date.
    pub external_price: Option<Decimal>,

    /// `internal_price - external_price`; absent iff the external price
    /// is absent.
    pub difference: Option<Decimal>,
}

impl ComparisonResult {
    /// Row with both prices present.
    pub fn matched(ticker: impl Into<String>, internal: Decimal, external: Decimal) -> Self {
        Self {
            ticker: ticker.into(),
            internal_price: internal,
            external_price: Some(external),
            difference: Some(internal - external),
        }
    }

    /// Row with no external data for the as-of date.
    pub fn unpriced(ticker: impl Into<String>, internal: Decimal) -> Self {
        Self {
            ticker: ticker.into(),
            internal_price: internal,
            external_price: None,
            difference: None,
        }
    }

    /// Whether the external source had data for this row.
    pub fn has_external(&self) -> bool {
        self.external_price.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_matched_difference() {
        let row = ComparisonResult::matched("AAA", dec!(101.5), dec!(100.0));
        assert_eq!(row.external_price, Some(dec!(100.0)));
        assert_eq!(row.difference, Some(dec!(1.5)));
        assert!(row.has_external());
    }

    #[test]
    fn test_unpriced_has_no_difference() {
        let row = ComparisonResult::unpriced("ZZZ", dec!(50.0));
        assert_eq!(row.external_price, None);
        assert_eq!(row.difference, None);
        assert!(!row.has_external());
    }

    #[test]
    fn test_zero_external_price_is_still_present() {
        // Zero is a legitimate price, not a missing one.
        let row = ComparisonResult::matched("AAA", dec!(1.0), dec!(0.0));
        assert_eq!(row.external_price, Some(dec!(0.0)));
        assert_eq!(row.difference, Some(dec!(1.0)));
    }

    #[test]
    fn test_difference_is_exact_decimal() {
        let row = ComparisonResult::matched("AAA", dec!(0.3), dec!(0.1));
        assert_eq!(row.difference, Some(dec!(0.2)));
    }
}

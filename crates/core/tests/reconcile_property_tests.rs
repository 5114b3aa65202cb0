//! Property-based integration tests for record resolution, comparison
//! results, and report rendering, using the `proptest` crate for random
//! test case generation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use pricecheck_core::records::RecordFormat;
use pricecheck_core::reconcile::ComparisonResult;
use pricecheck_core::report::ReportBuilder;
use pricecheck_core::resolver::{
    resolve, ProviderKind, LOCAL_MARKET_SUFFIXES, SECONDARY_TICKERS,
};

// =============================================================================
// Generators
// =============================================================================

/// Generates a bare ticker, occasionally one from the secondary
/// allow-list.
fn arb_ticker() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[A-Z]{2,5}",
        1 => Just("IGLT".to_string()),
    ]
}

/// Generates a market suffix, weighted toward the mapped ones.
fn arb_suffix() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("OQ".to_string()),
        Just("P".to_string()),
        Just("DE".to_string()),
        Just("L".to_string()),
        "[A-Z]{2,3}",
    ]
}

fn arb_format() -> impl Strategy<Value = RecordFormat> {
    prop_oneof![Just(RecordFormat::Sna), Just(RecordFormat::Snc)]
}

/// Generates an exact decimal price with up to four fraction digits.
fn arb_price() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000, 0u32..4).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

/// Generates a comparison row; `None` external prices are as common as
/// present ones so the NA path is exercised heavily.
fn arb_result() -> impl Strategy<Value = ComparisonResult> {
    ("[A-Z]{2,5}", arb_price(), proptest::option::of(arb_price())).prop_map(
        |(ticker, internal, external)| match external {
            Some(external) => ComparisonResult::matched(ticker, internal, external),
            None => ComparisonResult::unpriced(ticker, internal),
        },
    )
}

fn arb_results(max_count: usize) -> impl Strategy<Value = Vec<ComparisonResult>> {
    proptest::collection::vec(arb_result(), 0..=max_count)
}

fn as_of() -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Resolving the same record id twice gives the identical resolution.
    #[test]
    fn prop_resolution_is_deterministic(
        ticker in arb_ticker(),
        suffix in arb_suffix(),
        format in arb_format(),
    ) {
        let ric = format!("{}.{}", ticker, suffix);
        let first = resolve(&ric, format).unwrap();
        let second = resolve(&ric, format).unwrap();
        prop_assert_eq!(first, second);
    }

    /// The suffix is stripped from the lookup key exactly when the record
    /// trades on a local market and is not allow-listed to the secondary
    /// source; the report ticker is always bare.
    #[test]
    fn prop_suffix_stripping_law(
        ticker in arb_ticker(),
        suffix in arb_suffix(),
        format in arb_format(),
    ) {
        let ric = format!("{}.{}", ticker, suffix);
        let resolution = resolve(&ric, format).unwrap();

        prop_assert_eq!(&resolution.ticker, &ticker);

        let secondary = SECONDARY_TICKERS.contains(&ticker.as_str());
        let local = LOCAL_MARKET_SUFFIXES.contains(&suffix.as_str());
        let expected_symbol = if !secondary && local { ticker.clone() } else { ric.clone() };
        prop_assert_eq!(
            &resolution.symbol,
            &expected_symbol,
            "lookup key for {} should be {}",
            ric,
            expected_symbol
        );

        let expected_provider = if secondary {
            ProviderKind::Secondary
        } else {
            ProviderKind::Primary
        };
        prop_assert_eq!(resolution.provider, expected_provider);
    }

    /// SNA rows are always priced from CURRENT PRICE; SNC rows pick the
    /// column by suffix, with INDEX PRICE as the fallback.
    #[test]
    fn prop_price_field_selection_law(
        ticker in arb_ticker(),
        suffix in arb_suffix(),
    ) {
        let ric = format!("{}.{}", ticker, suffix);

        let sna = resolve(&ric, RecordFormat::Sna).unwrap();
        prop_assert_eq!(sna.price_field, "CURRENT PRICE");

        let snc = resolve(&ric, RecordFormat::Snc).unwrap();
        let expected = match suffix.as_str() {
            "DE" => "LOCAL PRICE",
            _ => "INDEX PRICE",
        };
        prop_assert_eq!(snc.price_field, expected);
    }

    /// A difference is present exactly when the external price is, and
    /// when present it is the exact decimal subtraction.
    #[test]
    fn prop_difference_invariant(result in arb_result()) {
        prop_assert_eq!(result.difference.is_some(), result.external_price.is_some());
        if let (Some(external), Some(difference)) = (result.external_price, result.difference) {
            prop_assert_eq!(difference, result.internal_price - external);
        }
    }

    /// The rendered CSV has the fixed header, one line per row in input
    /// order, and `NA` in both trailing cells exactly for unpriced rows.
    #[test]
    fn prop_csv_rendering(results in arb_results(30)) {
        let report = ReportBuilder::build(results.clone(), as_of());
        let csv = report.to_csv().unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        prop_assert_eq!(lines.len(), results.len() + 1);
        prop_assert_eq!(lines[0], "Ticker,CSV Price,API Price,Difference");

        for (line, row) in lines[1..].iter().zip(&results) {
            prop_assert!(line.starts_with(&row.ticker));
            prop_assert_eq!(
                line.ends_with(",NA,NA"),
                !row.has_external(),
                "row for {} rendered as {:?}",
                row.ticker,
                line
            );
        }
    }

    /// Building a report never reorders, drops, or invents rows.
    #[test]
    fn prop_report_preserves_rows(results in arb_results(30)) {
        let report = ReportBuilder::build(results.clone(), as_of());
        prop_assert_eq!(report.len(), results.len());
        prop_assert_eq!(report.rows(), results.as_slice());
    }
}

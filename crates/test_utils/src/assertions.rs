//! Custom Test Assertions
//!
//! Assertion helpers for domain types with more meaningful failure
//! messages than the standard macros.

use core_kernel::Money;
use domain_shipping::Quote;
use rust_decimal::Decimal;

/// Asserts that two Money values are equal, reporting both sides
pub fn assert_money_eq(actual: &Money, expected: &Money) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );
    assert_eq!(
        actual.amount(),
        expected.amount(),
        "Amounts differ: actual={}, expected={}",
        actual,
        expected
    );
}

/// Asserts that a quote's total equals a raw decimal amount
pub fn assert_quote_total(quote: &Quote, expected: Decimal) {
    assert_eq!(
        quote.total_price.amount(),
        expected,
        "Quote total mismatch: {quote}"
    );
}

/// Asserts the internal consistency of a quote: components sum to total
pub fn assert_quote_consistent(quote: &Quote) {
    let summed = quote.base_price + quote.extra_weight_surcharge + quote.cod_fee;
    assert_eq!(
        summed.amount(),
        quote.total_price.amount(),
        "Quote components do not sum to total: {quote}"
    );
}

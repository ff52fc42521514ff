//! Property-Based Test Generators
//!
//! Proptest strategies for generating request data that stays inside (or
//! deliberately outside) the standard fixture snapshot's tabulated ranges.

use core_kernel::{Grams, Money, Currency};
use proptest::prelude::*;

/// Strategy for weights within the standard fixture's tabulated tiers
/// (0–5000g)
pub fn tabulated_weight_strategy() -> impl Strategy<Value = Grams> {
    (0u32..=5000u32).prop_map(Grams::new)
}

/// Strategy for weights above the standard fixture's bounded top tier
pub fn over_threshold_weight_strategy() -> impl Strategy<Value = Grams> {
    (5001u32..100_000u32).prop_map(Grams::new)
}

/// Strategy for any plausible parcel weight
pub fn weight_strategy() -> impl Strategy<Value = Grams> {
    (0u32..100_000u32).prop_map(Grams::new)
}

/// Strategy for valid 5-digit Greek postal codes in the Athens prefix
pub fn athens_postal_code_strategy() -> impl Strategy<Value = String> {
    (0u32..100u32).prop_map(|suffix| format!("104{suffix:02}"))
}

/// Strategy for 5-digit postal codes with arbitrary prefixes, mapped or not
pub fn any_postal_code_strategy() -> impl Strategy<Value = String> {
    (0u32..100_000u32).prop_map(|code| format!("{code:05}"))
}

/// Strategy for non-negative EUR amounts in cents
pub fn eur_amount_strategy() -> impl Strategy<Value = Money> {
    (0i64..100_000i64).prop_map(|cents| Money::from_minor(cents, Currency::EUR))
}

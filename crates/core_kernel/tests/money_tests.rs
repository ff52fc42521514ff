//! Unit tests for the Money module
//!
//! Tests cover money creation, arithmetic operations, rounding,
//! currency handling, and the percentage Rate type.

use core_kernel::{Currency, Money, MoneyError, Rate};
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_creates_money_with_correct_amount() {
        let m = Money::new(dec!(3.50), Currency::EUR);
        assert_eq!(m.amount(), dec!(3.50));
        assert_eq!(m.currency(), Currency::EUR);
    }

    #[test]
    fn test_new_rounds_to_four_decimal_places() {
        let m = Money::new(dec!(3.123456789), Currency::EUR);
        assert_eq!(m.amount(), dec!(3.1235));
    }

    #[test]
    fn test_from_minor_converts_cents_correctly() {
        let m = Money::from_minor(350, Currency::EUR);
        assert_eq!(m.amount(), dec!(3.50));
    }

    #[test]
    fn test_zero_creates_zero_amount() {
        let m = Money::zero(Currency::EUR);
        assert!(m.is_zero());
        assert_eq!(m.currency(), Currency::EUR);
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_addition_of_same_currency() {
        let base = Money::new(dec!(4.50), Currency::EUR);
        let surcharge = Money::new(dec!(1.00), Currency::EUR);
        assert_eq!((base + surcharge).amount(), dec!(5.50));
    }

    #[test]
    fn test_subtraction_of_same_currency() {
        let a = Money::new(dec!(5.00), Currency::EUR);
        let b = Money::new(dec!(1.50), Currency::EUR);
        assert_eq!((a - b).amount(), dec!(3.50));
    }

    #[test]
    fn test_checked_add_rejects_currency_mismatch() {
        let eur = Money::new(dec!(1.00), Currency::EUR);
        let gbp = Money::new(dec!(1.00), Currency::GBP);
        assert!(matches!(
            eur.checked_add(&gbp),
            Err(MoneyError::CurrencyMismatch(_, _))
        ));
    }

    #[test]
    fn test_multiply_keeps_precision() {
        // 1.00 EUR/kg * 1.5 kg
        let per_kg = Money::new(dec!(1.00), Currency::EUR);
        assert_eq!(per_kg.multiply(dec!(1.5)).amount(), dec!(1.50));
    }

    #[test]
    fn test_divide_by_zero_is_rejected() {
        let m = Money::new(dec!(10.00), Currency::EUR);
        assert_eq!(m.divide(dec!(0)), Err(MoneyError::DivisionByZero));
    }
}

mod rounding {
    use super::*;

    #[test]
    fn test_round_to_currency_uses_two_places_for_eur() {
        let m = Money::new(dec!(5.5049), Currency::EUR);
        assert_eq!(m.round_to_currency().amount(), dec!(5.50));
    }

    #[test]
    fn test_bankers_rounding_half_to_even() {
        let m = Money::new(dec!(2.125), Currency::EUR);
        assert_eq!(m.round_bankers(2).amount(), dec!(2.12));

        let m = Money::new(dec!(2.135), Currency::EUR);
        assert_eq!(m.round_bankers(2).amount(), dec!(2.14));
    }
}

mod rate {
    use super::*;

    #[test]
    fn test_percentage_rate_applies_to_amount() {
        let cod = Rate::from_percentage(dec!(2.0));
        let order = Money::new(dec!(75.00), Currency::EUR);
        assert_eq!(cod.apply(&order).amount(), dec!(1.50));
    }

    #[test]
    fn test_rate_display_shows_percentage() {
        let rate = Rate::from_percentage(dec!(2.5));
        assert_eq!(rate.to_string(), "2.5%");
    }
}

mod display {
    use super::*;

    #[test]
    fn test_display_uses_currency_symbol() {
        let m = Money::new(dec!(3.50), Currency::EUR);
        assert_eq!(m.to_string(), "€ 3.50");
    }
}

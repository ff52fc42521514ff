//! Quote resolution tests
//!
//! Covers the full pricing pipeline against the standard fixture snapshot:
//! the concrete pricing scenarios, the failure taxonomy, and surcharge and
//! COD composition.

use core_kernel::{ProducerId, WeightTierId, ZoneId};
use domain_shipping::{
    MethodRejection, RateEntry, RateResolver, ShippingError, SnapshotStore,
};
use rust_decimal_macros::dec;
use std::sync::Arc;
use test_utils::{
    assert_quote_consistent, assert_quote_total, init_test_tracing, MethodFixtures,
    MoneyFixtures, QuoteRequestBuilder, SnapshotFixtures,
};

fn resolver() -> RateResolver {
    init_test_tracing();
    RateResolver::new(Arc::new(SnapshotStore::new(SnapshotFixtures::standard())))
}

mod pricing_scenarios {
    use super::*;

    /// Light parcel, home delivery, prepaid: the bare base rate
    #[test]
    fn test_base_rate_for_light_parcel() {
        let quote = resolver()
            .quote(&QuoteRequestBuilder::new().build())
            .unwrap();

        assert_quote_total(&quote, dec!(3.50));
        assert_eq!(quote.zone_id, ZoneId::new(1));
        assert_eq!(quote.weight_tier_id, WeightTierId::new(1));
        assert!(quote.extra_weight_surcharge.is_zero());
        assert!(quote.cod_fee.is_zero());
        assert_quote_consistent(&quote);
    }

    /// 6000g is 1kg above the bounded top tier: medium base 4.50 € plus
    /// 1.00 €/kg surcharge
    #[test]
    fn test_over_threshold_weight_is_surcharged() {
        let quote = resolver()
            .quote(&QuoteRequestBuilder::new().with_weight(6000).build())
            .unwrap();

        assert_eq!(quote.base_price.amount(), dec!(4.50));
        assert_eq!(quote.extra_weight_surcharge.amount(), dec!(1.00));
        assert_quote_total(&quote, dec!(5.50));
        assert_eq!(quote.weight_tier_id, WeightTierId::new(2));
        assert_quote_consistent(&quote);
    }

    /// Fractional excess is priced linearly, not per started kilogram
    #[test]
    fn test_fractional_excess_is_linear() {
        let quote = resolver()
            .quote(&QuoteRequestBuilder::new().with_weight(6500).build())
            .unwrap();

        assert_eq!(quote.extra_weight_surcharge.amount(), dec!(1.50));
        assert_quote_total(&quote, dec!(6.00));
    }

    /// COD adds the flat 1.50 € fee on top of the base rate
    #[test]
    fn test_cod_adds_flat_fee() {
        let quote = resolver()
            .quote(&QuoteRequestBuilder::new().with_cod().build())
            .unwrap();

        assert_eq!(quote.cod_fee.amount(), dec!(1.50));
        assert_quote_total(&quote, dec!(5.00));
        assert_quote_consistent(&quote);
    }

    /// A producer-specific override beats the global entry for the same
    /// lane; without the producer scope the global rate applies
    #[test]
    fn test_producer_override_and_global_fallback() {
        init_test_tracing();
        let mut snapshot = SnapshotFixtures::standard();
        snapshot.rates.upsert(RateEntry::for_producer(
            ZoneId::new(1),
            WeightTierId::new(1),
            MethodFixtures::home_code(),
            ProducerId::new(7),
            MoneyFixtures::eur_producer_rate(),
        ));
        let resolver = RateResolver::new(Arc::new(SnapshotStore::new(snapshot)));

        let overridden = resolver
            .quote(&QuoteRequestBuilder::new().with_producer(7).build())
            .unwrap();
        assert_quote_total(&overridden, dec!(2.00));

        let global = resolver.quote(&QuoteRequestBuilder::new().build()).unwrap();
        assert_quote_total(&global, dec!(3.50));

        // A producer with no override inherits the platform default
        let inherited = resolver
            .quote(&QuoteRequestBuilder::new().with_producer(99).build())
            .unwrap();
        assert_quote_total(&inherited, dec!(3.50));
    }

    /// Surcharge and COD combine: base 4.50 + 1.00 excess + 1.50 COD
    #[test]
    fn test_surcharge_and_cod_combine() {
        let quote = resolver()
            .quote(
                &QuoteRequestBuilder::new()
                    .with_weight(6000)
                    .with_cod()
                    .build(),
            )
            .unwrap();

        assert_quote_total(&quote, dec!(7.00));
        assert_quote_consistent(&quote);
    }
}

mod failure_taxonomy {
    use super::*;

    #[test]
    fn test_unmapped_prefix_is_unknown_zone() {
        let err = resolver()
            .quote(&QuoteRequestBuilder::new().with_postal_code("99999").build())
            .unwrap_err();
        assert!(matches!(err, ShippingError::UnknownZone { .. }));
    }

    #[test]
    fn test_empty_postal_code_is_invalid_input() {
        let err = resolver()
            .quote(&QuoteRequestBuilder::new().with_postal_code("").build())
            .unwrap_err();
        assert!(matches!(err, ShippingError::InvalidInput(_)));
    }

    #[test]
    fn test_short_postal_code_is_invalid_input() {
        let err = resolver()
            .quote(&QuoteRequestBuilder::new().with_postal_code("10").build())
            .unwrap_err();
        assert!(matches!(err, ShippingError::InvalidInput(_)));
    }

    /// 15kg to a locker limited to 10kg is rejected even though a locker
    /// rate exists for the zone
    #[test]
    fn test_method_weight_limit_beats_existing_rate() {
        let err = resolver()
            .quote(
                &QuoteRequestBuilder::new()
                    .with_method(MethodFixtures::locker_code())
                    .with_weight(15_000)
                    .build(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            ShippingError::MethodRejected(MethodRejection::WeightExceedsLimit { .. })
        ));
    }

    #[test]
    fn test_oversize_parcel_is_rejected_with_axis() {
        let err = resolver()
            .quote(
                &QuoteRequestBuilder::new()
                    .with_method(MethodFixtures::locker_code())
                    .with_dimensions(70, 30, 20)
                    .build(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            ShippingError::MethodRejected(MethodRejection::DimensionExceedsLimit { .. })
        ));
    }

    #[test]
    fn test_inactive_method_is_rejected() {
        let err = resolver()
            .quote(
                &QuoteRequestBuilder::new()
                    .with_method(MethodFixtures::pickup_code())
                    .build(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            ShippingError::MethodRejected(MethodRejection::MethodInactive { .. })
        ));
    }

    /// Thessaloniki is mapped but has no rates in the fixture
    #[test]
    fn test_unpriced_lane_is_no_rate_configured() {
        let err = resolver()
            .quote(&QuoteRequestBuilder::new().with_postal_code("54622").build())
            .unwrap_err();
        assert!(matches!(err, ShippingError::NoRateConfigured { .. }));
    }
}

mod quote_shape {
    use super::*;

    #[test]
    fn test_quote_serializes_for_checkout() {
        let quote = resolver()
            .quote(&QuoteRequestBuilder::new().with_cod().build())
            .unwrap();

        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["method"], "HOME");
        assert_eq!(json["zone_id"], 1);
    }

    #[test]
    fn test_display_shows_breakdown() {
        let quote = resolver()
            .quote(&QuoteRequestBuilder::new().with_cod().build())
            .unwrap();
        let rendered = quote.to_string();
        assert!(rendered.contains("HOME"), "got {rendered}");
        assert!(rendered.contains("base"), "got {rendered}");
    }
}

//! Snapshot build validation and store publication tests

use core_kernel::{PostalPrefix, WeightTierId, ZoneId};
use domain_shipping::{
    PrefixMapping, RateEntry, RateResolver, Snapshot, SnapshotBuildError, SnapshotStore,
    WeightTier, Zone,
};
use rust_decimal_macros::dec;
use std::sync::Arc;
use test_utils::{
    init_test_tracing, MethodFixtures, MoneyFixtures, QuoteRequestBuilder, SnapshotFixtures,
    TierFixtures, ZoneFixtures,
};

mod build_validation {
    use super::*;

    #[test]
    fn test_standard_fixture_builds() {
        let snapshot = SnapshotFixtures::standard();
        assert!(snapshot.zones.has_active_zone());
        assert_eq!(snapshot.zones.prefix_count(), 5);
    }

    #[test]
    fn test_no_active_zone_is_rejected() {
        let result = Snapshot::builder()
            .zone(ZoneFixtures::athens().deactivated())
            .tier(TierFixtures::light())
            .build();
        assert_eq!(result.unwrap_err(), SnapshotBuildError::NoActiveZone);
    }

    #[test]
    fn test_empty_tier_table_is_rejected() {
        let result = Snapshot::builder().zone(ZoneFixtures::athens()).build();
        assert_eq!(result.unwrap_err(), SnapshotBuildError::EmptyTierTable);
    }

    #[test]
    fn test_overlapping_tiers_are_rejected() {
        let result = Snapshot::builder()
            .zone(ZoneFixtures::athens())
            .tier(WeightTier::bounded(WeightTierId::new(1), "A", 0, 2000))
            .tier(WeightTier::bounded(WeightTierId::new(2), "B", 1500, 5000))
            .build();
        assert!(matches!(
            result.unwrap_err(),
            SnapshotBuildError::OverlappingTiers { .. }
        ));
    }

    #[test]
    fn test_tier_gap_is_rejected() {
        let result = Snapshot::builder()
            .zone(ZoneFixtures::athens())
            .tier(WeightTier::bounded(WeightTierId::new(1), "A", 0, 2000))
            .tier(WeightTier::bounded(WeightTierId::new(2), "B", 3000, 5000))
            .build();
        assert!(matches!(
            result.unwrap_err(),
            SnapshotBuildError::NonContiguousTiers { .. }
        ));
    }

    #[test]
    fn test_two_unbounded_tiers_are_rejected() {
        let result = Snapshot::builder()
            .zone(ZoneFixtures::athens())
            .tier(WeightTier::unbounded(WeightTierId::new(1), "A", 0))
            .tier(WeightTier::unbounded(WeightTierId::new(2), "B", 5001))
            .build();
        assert!(matches!(
            result.unwrap_err(),
            SnapshotBuildError::MultipleUnboundedTiers { .. }
        ));
    }

    #[test]
    fn test_unbounded_tier_below_bounded_one_is_rejected() {
        let result = Snapshot::builder()
            .zone(ZoneFixtures::athens())
            .tier(WeightTier::unbounded(WeightTierId::new(1), "A", 0))
            .tier(WeightTier::bounded(WeightTierId::new(2), "B", 5001, 9000))
            .build();
        assert!(matches!(
            result.unwrap_err(),
            SnapshotBuildError::UnboundedTierNotLast { .. }
        ));
    }

    #[test]
    fn test_duplicate_zone_id_is_rejected() {
        let result = Snapshot::builder()
            .zone(ZoneFixtures::athens())
            .zone(Zone::new(ZoneId::new(1), "Αθήνα ξανά", ""))
            .tier(TierFixtures::light())
            .build();
        assert!(matches!(
            result.unwrap_err(),
            SnapshotBuildError::DuplicateZone { .. }
        ));
    }

    #[test]
    fn test_rate_for_unknown_zone_is_rejected() {
        let result = Snapshot::builder()
            .zone(ZoneFixtures::athens())
            .tier(TierFixtures::light())
            .method(MethodFixtures::home())
            .rate(RateEntry::global(
                ZoneId::new(42),
                WeightTierId::new(1),
                MethodFixtures::home_code(),
                MoneyFixtures::eur_base_rate(),
            ))
            .build();
        assert!(matches!(
            result.unwrap_err(),
            SnapshotBuildError::RateForUnknownZone { .. }
        ));
    }

    #[test]
    fn test_prefix_for_unknown_zone_is_rejected() {
        let result = Snapshot::builder()
            .zone(ZoneFixtures::athens())
            .tier(TierFixtures::light())
            .prefix_mapping(PrefixMapping::new(
                PostalPrefix::new("546").unwrap(),
                ZoneId::new(42),
            ))
            .build();
        assert!(matches!(
            result.unwrap_err(),
            SnapshotBuildError::PrefixForUnknownZone { .. }
        ));
    }

    /// A lane priced in a currency other than the pricing currency would
    /// make surcharge addition unrepresentable at quote time, so the
    /// builder refuses it up front
    #[test]
    fn test_foreign_currency_rate_is_rejected() {
        let result = Snapshot::builder()
            .zone(ZoneFixtures::athens())
            .tier(TierFixtures::light())
            .method(MethodFixtures::home())
            .rate(RateEntry::global(
                ZoneId::new(1),
                WeightTierId::new(1),
                MethodFixtures::home_code(),
                core_kernel::Money::new(dec!(3.50), core_kernel::Currency::USD),
            ))
            .build();
        assert_eq!(
            result.unwrap_err(),
            SnapshotBuildError::RateCurrencyMismatch {
                zone_id: ZoneId::new(1),
                expected: core_kernel::Currency::EUR,
                actual: core_kernel::Currency::USD,
            }
        );
    }

    /// A table whose lowest tier starts above zero leaves light parcels
    /// unplaceable; that is a configuration defect, not a runtime failure
    #[test]
    fn test_tier_table_starting_above_zero_is_rejected() {
        let result = Snapshot::builder()
            .zone(ZoneFixtures::athens())
            .tier(WeightTier::bounded(WeightTierId::new(1), "A", 100, 2000))
            .build();
        assert!(matches!(
            result.unwrap_err(),
            SnapshotBuildError::TierTableGapAtZero { .. }
        ));
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let result = Snapshot::builder()
            .zone(ZoneFixtures::athens())
            .tier(TierFixtures::light())
            .method(MethodFixtures::home())
            .rate(RateEntry::global(
                ZoneId::new(1),
                WeightTierId::new(1),
                MethodFixtures::home_code(),
                core_kernel::Money::new(dec!(-1.00), core_kernel::Currency::EUR),
            ))
            .build();
        assert!(matches!(
            result.unwrap_err(),
            SnapshotBuildError::NegativePrice { .. }
        ));
    }
}

mod store_publication {
    use super::*;

    #[test]
    fn test_publish_swaps_served_snapshot() {
        init_test_tracing();
        let store = SnapshotStore::new(SnapshotFixtures::standard());
        let before = store.current().id;

        store.publish(SnapshotFixtures::standard());
        assert_ne!(store.current().id, before);
    }

    #[test]
    fn test_readers_keep_their_snapshot_across_publish() {
        let store = SnapshotStore::new(SnapshotFixtures::standard());
        let held = store.current();

        store.publish(SnapshotFixtures::standard());

        // The old Arc stays valid and unchanged for in-flight requests
        assert_ne!(held.id, store.current().id);
        assert_eq!(held.zones.prefix_count(), 5);
    }

    #[test]
    fn test_reload_prefixes_applies_last_wins_and_revalidates() {
        init_test_tracing();
        let store = SnapshotStore::new(SnapshotFixtures::standard());

        // Remap 104 to Thessaloniki; the reload entry wins over the
        // fixture mapping
        let loaded = store
            .reload_prefixes([PrefixMapping::new(
                PostalPrefix::new("104").unwrap(),
                ZoneId::new(2),
            )])
            .unwrap();
        assert_eq!(loaded, 1);
        assert_eq!(
            store.current().zones.resolve_zone("10431").unwrap(),
            ZoneId::new(2)
        );
    }

    #[test]
    fn test_invalid_reload_keeps_previous_snapshot() {
        let store = SnapshotStore::new(SnapshotFixtures::standard());
        let before = store.current().id;

        let result = store.reload_prefixes([PrefixMapping::new(
            PostalPrefix::new("104").unwrap(),
            ZoneId::new(404),
        )]);

        assert!(matches!(
            result.unwrap_err(),
            SnapshotBuildError::PrefixForUnknownZone { .. }
        ));
        assert_eq!(store.current().id, before);
        assert_eq!(
            store.current().zones.resolve_zone("10431").unwrap(),
            ZoneId::new(1)
        );
    }

    #[test]
    fn test_upsert_rate_changes_future_quotes() {
        let store = Arc::new(SnapshotStore::new(SnapshotFixtures::standard()));
        let resolver = RateResolver::new(store.clone());

        store
            .upsert_rate(RateEntry::global(
                ZoneId::new(1),
                WeightTierId::new(1),
                MethodFixtures::home_code(),
                core_kernel::Money::new(dec!(3.90), core_kernel::Currency::EUR),
            ))
            .unwrap();

        let quote = resolver.quote(&QuoteRequestBuilder::new().build()).unwrap();
        assert_eq!(quote.total_price.amount(), dec!(3.90));
    }

    /// Concurrent administrative upserts serialize: no writer bases its
    /// rebuild on a snapshot another writer is replacing, so every change
    /// survives into the final snapshot
    #[test]
    fn test_concurrent_upserts_are_all_applied() {
        let store = Arc::new(SnapshotStore::new(SnapshotFixtures::standard()));
        let base_rates = store.current().rates.len();

        let writers: Vec<_> = (1..=8i64)
            .map(|producer| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store
                        .upsert_rate(RateEntry::for_producer(
                            ZoneId::new(1),
                            WeightTierId::new(1),
                            MethodFixtures::home_code(),
                            core_kernel::ProducerId::new(producer),
                            core_kernel::Money::new(dec!(2.00), core_kernel::Currency::EUR),
                        ))
                        .unwrap();
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        let snapshot = store.current();
        assert_eq!(snapshot.rates.len(), base_rates + 8);
        for producer in 1..=8i64 {
            let price = snapshot.rates.lookup(
                ZoneId::new(1),
                WeightTierId::new(1),
                &MethodFixtures::home_code(),
                Some(core_kernel::ProducerId::new(producer)),
            );
            assert_eq!(
                price,
                Some(core_kernel::Money::new(dec!(2.00), core_kernel::Currency::EUR)),
                "producer {producer} override was lost"
            );
        }
    }

    /// Many readers quoting while a writer republishes: every quote sees a
    /// complete snapshot and prices to one of the two valid totals
    #[test]
    fn test_concurrent_reads_during_publish_see_complete_snapshots() {
        let store = Arc::new(SnapshotStore::new(SnapshotFixtures::standard()));
        let resolver = RateResolver::new(store.clone());

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let resolver = resolver.clone();
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        let quote = resolver
                            .quote(&QuoteRequestBuilder::new().build())
                            .expect("quote must succeed against any published snapshot");
                        let total = quote.total_price.amount();
                        assert!(
                            total == dec!(3.50) || total == dec!(3.90),
                            "unexpected total {total}"
                        );
                    }
                })
            })
            .collect();

        for _ in 0..20 {
            store
                .upsert_rate(RateEntry::global(
                    ZoneId::new(1),
                    WeightTierId::new(1),
                    MethodFixtures::home_code(),
                    core_kernel::Money::new(dec!(3.90), core_kernel::Currency::EUR),
                ))
                .unwrap();
        }

        for reader in readers {
            reader.join().unwrap();
        }
    }
}

mod rebuild_roundtrip {
    use super::*;

    #[test]
    fn test_to_builder_preserves_reference_data() {
        let original = SnapshotFixtures::standard();
        let rebuilt = original.to_builder().build().unwrap();

        assert_eq!(rebuilt.zones.prefix_count(), original.zones.prefix_count());
        assert_eq!(rebuilt.tiers.tiers(), original.tiers.tiers());
        assert_eq!(rebuilt.rates.len(), original.rates.len());
        assert_eq!(rebuilt.pricing, original.pricing);

        // Identical requests price identically on the rebuilt snapshot
        let request = QuoteRequestBuilder::new().with_weight(6000).build();
        assert_eq!(
            RateResolver::price(&original, &request).unwrap().total_price,
            RateResolver::price(&rebuilt, &request).unwrap().total_price,
        );
    }

    #[test]
    fn test_weight_zero_still_resolves() {
        let snapshot = SnapshotFixtures::standard();
        let request = QuoteRequestBuilder::new().with_weight(0).build();
        let quote = RateResolver::price(&snapshot, &request).unwrap();
        assert_eq!(quote.weight_tier_id, WeightTierId::new(1));
        assert!(quote.extra_weight_surcharge.is_zero());
    }
}

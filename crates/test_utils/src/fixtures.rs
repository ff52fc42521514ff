//! Pre-built Test Fixtures
//!
//! Ready-to-use reference data for the shipping engine test suite. The
//! zone table here is the single canonical one: five Greek zones with
//! stable ids, used consistently across every test.

use core_kernel::{Currency, MethodCode, Money, PostalPrefix, WeightTierId, ZoneId};
use domain_shipping::{
    DeliveryMethod, PrefixMapping, PricingConfig, RateEntry, Snapshot, WeightTier, Zone,
};
use once_cell::sync::Lazy;
use rust_decimal_macros::dec;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// The standard Athens home-delivery base rate
    pub fn eur_base_rate() -> Money {
        Money::new(dec!(3.50), Currency::EUR)
    }

    /// The heavier-tier base rate
    pub fn eur_heavy_rate() -> Money {
        Money::new(dec!(4.50), Currency::EUR)
    }

    /// A producer-negotiated override rate
    pub fn eur_producer_rate() -> Money {
        Money::new(dec!(2.00), Currency::EUR)
    }

    /// A zero EUR amount
    pub fn eur_zero() -> Money {
        Money::zero(Currency::EUR)
    }
}

/// Fixture for the canonical Greek zone table
pub struct ZoneFixtures;

impl ZoneFixtures {
    pub fn athens() -> Zone {
        Zone::new(ZoneId::new(1), "Αθήνα", "Athens metro area")
    }

    pub fn thessaloniki() -> Zone {
        Zone::new(ZoneId::new(2), "Θεσσαλονίκη", "Thessaloniki metro area")
    }

    pub fn mainland() -> Zone {
        Zone::new(ZoneId::new(3), "Ηπειρωτική Ελλάδα", "Rest of the mainland")
    }

    pub fn islands() -> Zone {
        Zone::new(ZoneId::new(4), "Νησιά", "Islands with daily ferry links")
    }

    pub fn remote_islands() -> Zone {
        Zone::new(ZoneId::new(5), "Απομακρυσμένα νησιά", "Remote islands")
    }

    pub fn all() -> Vec<Zone> {
        vec![
            Self::athens(),
            Self::thessaloniki(),
            Self::mainland(),
            Self::islands(),
            Self::remote_islands(),
        ]
    }

    /// Prefix mappings covering one sample prefix per zone
    pub fn prefix_mappings() -> Vec<PrefixMapping> {
        vec![
            PrefixMapping::new(Self::prefix("104"), ZoneId::new(1)),
            PrefixMapping::new(Self::prefix("546"), ZoneId::new(2)),
            PrefixMapping::new(Self::prefix("262"), ZoneId::new(3)),
            PrefixMapping::new(Self::prefix("841"), ZoneId::new(4)),
            PrefixMapping::new(Self::prefix("859"), ZoneId::new(5)),
        ]
    }

    pub fn prefix(s: &str) -> PostalPrefix {
        PostalPrefix::new(s).expect("fixture prefix must be valid")
    }
}

/// Fixture for the weight tier table
pub struct TierFixtures;

impl TierFixtures {
    /// 0–2000g
    pub fn light() -> WeightTier {
        WeightTier::bounded(WeightTierId::new(1), "0-2KG", 0, 2000)
    }

    /// 2001–5000g, the bounded top tier
    pub fn medium() -> WeightTier {
        WeightTier::bounded(WeightTierId::new(2), "2-5KG", 2001, 5000)
    }

    /// 5001g and up, unbounded
    pub fn heavy_unbounded() -> WeightTier {
        WeightTier::unbounded(WeightTierId::new(3), "5KG+", 5001)
    }

    /// The standard two-tier table with a bounded top, so over-threshold
    /// surcharging is exercised
    pub fn bounded_table() -> Vec<WeightTier> {
        vec![Self::light(), Self::medium()]
    }
}

/// Fixture for delivery methods
pub struct MethodFixtures;

impl MethodFixtures {
    pub fn home_code() -> MethodCode {
        MethodCode::new("HOME").expect("fixture code must be valid")
    }

    pub fn locker_code() -> MethodCode {
        MethodCode::new("LOCKER").expect("fixture code must be valid")
    }

    pub fn pickup_code() -> MethodCode {
        MethodCode::new("PICKUP").expect("fixture code must be valid")
    }

    /// Unconstrained home delivery
    pub fn home() -> DeliveryMethod {
        DeliveryMethod::new(Self::home_code(), "Home delivery")
    }

    /// Parcel locker with weight and size limits
    pub fn locker() -> DeliveryMethod {
        DeliveryMethod::new(Self::locker_code(), "Parcel locker")
            .with_max_weight(10_000)
            .with_max_dimensions(60, 40, 30)
    }

    /// Inactive pickup-point method
    pub fn pickup_inactive() -> DeliveryMethod {
        DeliveryMethod::new(Self::pickup_code(), "Pickup point").deactivated()
    }
}

/// Fixture for complete snapshots
pub struct SnapshotFixtures;

impl SnapshotFixtures {
    /// The standard snapshot used across the suite
    ///
    /// Athens zone 1 (prefix 104), two bounded tiers, HOME unconstrained,
    /// LOCKER limited, inactive PICKUP, and global HOME rates of 3.50 €
    /// (light) and 4.50 € (medium). Over-threshold surcharge is 1.00 €/kg;
    /// COD is a flat 1.50 €.
    pub fn standard() -> Snapshot {
        let mut builder = Snapshot::builder().pricing(PricingConfig::default());
        for zone in ZoneFixtures::all() {
            builder = builder.zone(zone);
        }
        builder = builder.prefix_mappings(ZoneFixtures::prefix_mappings());
        for tier in TierFixtures::bounded_table() {
            builder = builder.tier(tier);
        }
        builder
            .method(MethodFixtures::home())
            .method(MethodFixtures::locker())
            .method(MethodFixtures::pickup_inactive())
            .rate(RateEntry::global(
                ZoneId::new(1),
                WeightTierId::new(1),
                MethodFixtures::home_code(),
                MoneyFixtures::eur_base_rate(),
            ))
            .rate(RateEntry::global(
                ZoneId::new(1),
                WeightTierId::new(2),
                MethodFixtures::home_code(),
                MoneyFixtures::eur_heavy_rate(),
            ))
            .rate(RateEntry::global(
                ZoneId::new(1),
                WeightTierId::new(1),
                MethodFixtures::locker_code(),
                MoneyFixtures::eur_base_rate(),
            ))
            .build()
            .expect("standard fixture snapshot must be valid")
    }
}

/// A lazily-built shared copy of the standard snapshot, for tests that
/// only read it
pub static STANDARD_SNAPSHOT: Lazy<Snapshot> = Lazy::new(SnapshotFixtures::standard);

//! Shipping domain errors
//!
//! Every quote failure is a typed, non-retryable business result. The
//! checkout layer matches on these variants to show an accurate message
//! ("no courier serves this postal code" vs "select a different delivery
//! method") instead of a generic error.

use core_kernel::{Currency, Grams, MethodCode, PostalPrefix, WeightTierId, ZoneId};
use thiserror::Error;

use crate::method::MethodRejection;

/// Errors that can occur while resolving a quote
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShippingError {
    /// Malformed request: empty or too-short postal code, unparsable
    /// method code, or an otherwise unusable input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The postal code prefix has no zone mapping
    #[error("No shipping zone serves postal prefix {prefix}")]
    UnknownZone { prefix: PostalPrefix },

    /// The weight tier table is empty or cannot place this weight
    #[error("No weight tier configured for {weight}")]
    NoTierConfigured { weight: Grams },

    /// The requested delivery method cannot take this parcel
    #[error("Delivery method rejected: {0}")]
    MethodRejected(#[from] MethodRejection),

    /// No rate exists for the resolved lane, even after global fallback
    #[error("No rate configured for zone {zone_id}, tier {weight_tier_id}, method {method}")]
    NoRateConfigured {
        zone_id: ZoneId,
        weight_tier_id: WeightTierId,
        method: MethodCode,
    },
}

impl ShippingError {
    /// Creates an invalid-input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ShippingError::InvalidInput(message.into())
    }
}

/// Errors that make a reference-data snapshot unpublishable
///
/// These are configuration-shape defects: the builder refuses to produce a
/// snapshot rather than letting requests run against a broken table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotBuildError {
    #[error("Snapshot has no active zone")]
    NoActiveZone,

    #[error("Weight tier table is empty")]
    EmptyTierTable,

    #[error("Weight tiers {first} and {second} overlap")]
    OverlappingTiers {
        first: WeightTierId,
        second: WeightTierId,
    },

    #[error("Gap between weight tiers {below} and {above}")]
    NonContiguousTiers {
        below: WeightTierId,
        above: WeightTierId,
    },

    #[error("More than one unbounded weight tier ({first} and {second})")]
    MultipleUnboundedTiers {
        first: WeightTierId,
        second: WeightTierId,
    },

    #[error("Unbounded weight tier {tier} is not the top tier")]
    UnboundedTierNotLast { tier: WeightTierId },

    #[error("Weight tier {tier} has max below min")]
    InvertedTierRange { tier: WeightTierId },

    #[error("Duplicate zone id {zone_id}")]
    DuplicateZone { zone_id: ZoneId },

    #[error("Duplicate weight tier id {tier}")]
    DuplicateTier { tier: WeightTierId },

    #[error("Duplicate delivery method {method}")]
    DuplicateMethod { method: MethodCode },

    #[error("Rate entry references unknown zone {zone_id}")]
    RateForUnknownZone { zone_id: ZoneId },

    #[error("Rate entry references unknown weight tier {tier}")]
    RateForUnknownTier { tier: WeightTierId },

    #[error("Rate entry references unknown delivery method {method}")]
    RateForUnknownMethod { method: MethodCode },

    #[error("Rate entry for zone {zone_id} has a negative price")]
    NegativePrice { zone_id: ZoneId },

    #[error("Rate entry for zone {zone_id} is priced in {actual}, pricing currency is {expected}")]
    RateCurrencyMismatch {
        zone_id: ZoneId,
        expected: Currency,
        actual: Currency,
    },

    #[error("Lowest weight tier {tier} starts at {min}, leaving lighter parcels unplaceable")]
    TierTableGapAtZero { tier: WeightTierId, min: Grams },

    #[error("Prefix mapping {prefix} references unknown zone {zone_id}")]
    PrefixForUnknownZone {
        prefix: PostalPrefix,
        zone_id: ZoneId,
    },
}

//! Core Kernel - Foundational types for the shipping rate engine
//!
//! This crate provides the fundamental building blocks used across the
//! shipping domain:
//! - Money types with precise decimal arithmetic
//! - Strongly-typed identifiers for reference data
//! - Physical units (weight in grams, parcel dimensions)

pub mod error;
pub mod identifiers;
pub mod money;
pub mod units;

pub use error::CoreError;
pub use identifiers::{
    IdentifierError, MethodCode, PostalPrefix, ProducerId, SnapshotId, WeightTierId, ZoneId,
};
pub use money::{Currency, Money, MoneyError, Rate};
pub use units::{DimensionAxis, Dimensions, Grams};

//! Physical units for parcels
//!
//! Weight is always integer grams inside the engine; callers converting
//! from kilograms do so before building a request, which removes any
//! fractional-unit ambiguity between upstream kg and g inputs.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parcel weight in grams
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Grams(u32);

impl Grams {
    /// Creates a weight from a gram count
    pub fn new(grams: u32) -> Self {
        Self(grams)
    }

    /// Returns the raw gram count
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Saturating difference, used for excess-over-threshold weight
    pub fn saturating_sub(&self, other: Grams) -> Grams {
        Grams(self.0.saturating_sub(other.0))
    }

    /// Converts to a decimal kilogram value for surcharge arithmetic
    pub fn as_kilograms(&self) -> Decimal {
        Decimal::from(self.0) / dec!(1000)
    }

    /// Returns true for a zero weight
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Grams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}g", self.0)
    }
}

impl From<u32> for Grams {
    fn from(grams: u32) -> Self {
        Self(grams)
    }
}

impl From<Grams> for u32 {
    fn from(grams: Grams) -> u32 {
        grams.0
    }
}

/// The axis of a parcel dimension, used in constraint rejections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionAxis {
    Length,
    Width,
    Height,
}

impl fmt::Display for DimensionAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionAxis::Length => write!(f, "length"),
            DimensionAxis::Width => write!(f, "width"),
            DimensionAxis::Height => write!(f, "height"),
        }
    }
}

/// Parcel dimensions in centimetres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length_cm: u32,
    pub width_cm: u32,
    pub height_cm: u32,
}

impl Dimensions {
    /// Creates a dimension triple
    pub fn new(length_cm: u32, width_cm: u32, height_cm: u32) -> Self {
        Self {
            length_cm,
            width_cm,
            height_cm,
        }
    }

    /// Returns the extent along one axis
    pub fn along(&self, axis: DimensionAxis) -> u32 {
        match axis {
            DimensionAxis::Length => self.length_cm,
            DimensionAxis::Width => self.width_cm,
            DimensionAxis::Height => self.height_cm,
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}x{}cm",
            self.length_cm, self.width_cm, self.height_cm
        )
    }
}

//! Strongly-typed identifiers for reference data
//!
//! Zones, weight tiers, and producers are integer-keyed rows maintained by
//! external administration tools; newtype wrappers prevent accidental mixing
//! of the different axes of the rate matrix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

macro_rules! define_numeric_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an identifier from its raw database value
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw value
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_numeric_id!(ZoneId);
define_numeric_id!(WeightTierId);
define_numeric_id!(ProducerId);

/// Errors raised when parsing identifier strings
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("Method code must be non-empty uppercase alphanumeric, got {0:?}")]
    InvalidMethodCode(String),

    #[error("Postal prefix must be exactly 3 ASCII digits, got {0:?}")]
    InvalidPostalPrefix(String),
}

/// A delivery method code such as `HOME`, `PICKUP`, or `LOCKER`
///
/// Codes are uppercase alphanumeric (underscores allowed) and act as the
/// stable key of the delivery-method axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodCode(String);

impl MethodCode {
    /// Parses and validates a method code
    pub fn new(code: impl Into<String>) -> Result<Self, IdentifierError> {
        let code = code.into();
        let valid = !code.is_empty()
            && code
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
        if !valid {
            return Err(IdentifierError::InvalidMethodCode(code));
        }
        Ok(Self(code))
    }

    /// Returns the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MethodCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MethodCode {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// The first three digits of a postal code, the key of the zone index
///
/// Prefixes are always exactly three ASCII digits; shorter numeric inputs
/// are zero-padded on the left during ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostalPrefix(String);

impl PostalPrefix {
    /// Parses an exact 3-digit prefix
    pub fn new(prefix: impl Into<String>) -> Result<Self, IdentifierError> {
        let prefix = prefix.into();
        if prefix.len() != 3 || !prefix.chars().all(|c| c.is_ascii_digit()) {
            return Err(IdentifierError::InvalidPostalPrefix(prefix));
        }
        Ok(Self(prefix))
    }

    /// Returns the prefix as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PostalPrefix {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Identifier of a published reference-data snapshot
///
/// Time-ordered (UUID v7) so snapshot publications sort chronologically in
/// logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotId(Uuid);

impl SnapshotId {
    /// Creates a new time-ordered identifier
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SnapshotId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "snap-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id_roundtrip() {
        let zone = ZoneId::new(6);
        assert_eq!(zone.value(), 6);
        assert_eq!(i64::from(zone), 6);
        assert_eq!(ZoneId::from(6), zone);
    }

    #[test]
    fn test_method_code_accepts_uppercase() {
        assert!(MethodCode::new("HOME").is_ok());
        assert!(MethodCode::new("BOX_NOW").is_ok());
        assert!(MethodCode::new("LOCKER2").is_ok());
    }

    #[test]
    fn test_method_code_rejects_invalid() {
        assert!(MethodCode::new("").is_err());
        assert!(MethodCode::new("home").is_err());
        assert!(MethodCode::new("HOME DELIVERY").is_err());
    }

    #[test]
    fn test_postal_prefix_requires_three_digits() {
        assert!(PostalPrefix::new("104").is_ok());
        assert!(PostalPrefix::new("10").is_err());
        assert!(PostalPrefix::new("1043").is_err());
        assert!(PostalPrefix::new("1O4").is_err());
    }

    #[test]
    fn test_snapshot_ids_are_unique() {
        assert_ne!(SnapshotId::new(), SnapshotId::new());
    }
}

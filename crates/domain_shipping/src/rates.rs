//! The rate matrix
//!
//! Prices are keyed by (zone, weight tier, delivery method) with an
//! optional producer scope. Producer-specific entries override the global
//! entry for the same lane; the global entry (no producer) is the platform
//! default every producer inherits.

use std::collections::HashMap;

use core_kernel::{MethodCode, Money, ProducerId, WeightTierId, ZoneId};
use serde::{Deserialize, Serialize};

/// Full key of one rate matrix cell
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RateKey {
    pub zone_id: ZoneId,
    pub weight_tier_id: WeightTierId,
    pub method: MethodCode,
    pub producer_id: Option<ProducerId>,
}

impl RateKey {
    pub fn global(zone_id: ZoneId, weight_tier_id: WeightTierId, method: MethodCode) -> Self {
        Self {
            zone_id,
            weight_tier_id,
            method,
            producer_id: None,
        }
    }

    pub fn for_producer(
        zone_id: ZoneId,
        weight_tier_id: WeightTierId,
        method: MethodCode,
        producer_id: ProducerId,
    ) -> Self {
        Self {
            zone_id,
            weight_tier_id,
            method,
            producer_id: Some(producer_id),
        }
    }
}

/// One priced cell of the matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateEntry {
    pub zone_id: ZoneId,
    pub weight_tier_id: WeightTierId,
    pub method: MethodCode,
    pub producer_id: Option<ProducerId>,
    pub price: Money,
}

impl RateEntry {
    /// Creates a global (platform default) entry
    pub fn global(
        zone_id: ZoneId,
        weight_tier_id: WeightTierId,
        method: MethodCode,
        price: Money,
    ) -> Self {
        Self {
            zone_id,
            weight_tier_id,
            method,
            producer_id: None,
            price,
        }
    }

    /// Creates a producer-specific override
    pub fn for_producer(
        zone_id: ZoneId,
        weight_tier_id: WeightTierId,
        method: MethodCode,
        producer_id: ProducerId,
        price: Money,
    ) -> Self {
        Self {
            zone_id,
            weight_tier_id,
            method,
            producer_id: Some(producer_id),
            price,
        }
    }

    fn key(&self) -> RateKey {
        RateKey {
            zone_id: self.zone_id,
            weight_tier_id: self.weight_tier_id,
            method: self.method.clone(),
            producer_id: self.producer_id,
        }
    }
}

/// The cartesian-indexed price table
///
/// Serializes as a flat list of entries; the composite-key index is an
/// in-memory detail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<RateEntry>", from = "Vec<RateEntry>")]
pub struct RateMatrix {
    entries: HashMap<RateKey, Money>,
}

impl From<RateMatrix> for Vec<RateEntry> {
    fn from(matrix: RateMatrix) -> Self {
        matrix
            .entries
            .into_iter()
            .map(|(key, price)| RateEntry {
                zone_id: key.zone_id,
                weight_tier_id: key.weight_tier_id,
                method: key.method,
                producer_id: key.producer_id,
                price,
            })
            .collect()
    }
}

impl From<Vec<RateEntry>> for RateMatrix {
    fn from(entries: Vec<RateEntry>) -> Self {
        let mut matrix = RateMatrix::new();
        for entry in entries {
            matrix.upsert(entry);
        }
        matrix
    }
}

impl RateMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent insert-or-replace keyed by the full (zone, tier, method,
    /// producer) tuple
    pub fn upsert(&mut self, entry: RateEntry) {
        self.entries.insert(entry.key(), entry.price);
    }

    /// Number of priced cells
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates all entries as (key, price) pairs
    pub fn entries(&self) -> impl Iterator<Item = (&RateKey, &Money)> {
        self.entries.iter()
    }

    /// Looks up the base price for a lane
    ///
    /// The producer-specific entry is preferred; the global entry is the
    /// fallback. `None` means the lane is unpriced even after fallback.
    pub fn lookup(
        &self,
        zone_id: ZoneId,
        weight_tier_id: WeightTierId,
        method: &MethodCode,
        producer_id: Option<ProducerId>,
    ) -> Option<Money> {
        if let Some(producer_id) = producer_id {
            let key = RateKey::for_producer(zone_id, weight_tier_id, method.clone(), producer_id);
            if let Some(price) = self.entries.get(&key) {
                return Some(*price);
            }
        }
        let key = RateKey::global(zone_id, weight_tier_id, method.clone());
        self.entries.get(&key).copied()
    }
}

//! Weight tiers
//!
//! Tiers bucket parcel weight into contiguous, non-overlapping ranges that
//! form the second axis of the rate matrix. Exactly one top tier may be
//! unbounded; when the top tier is bounded, heavier parcels still resolve
//! to it, tagged over-threshold, so the resolver can price them with a
//! per-kilogram surcharge instead of failing the quote.

use core_kernel::{Grams, WeightTierId};
use serde::{Deserialize, Serialize};

use crate::error::ShippingError;

/// A contiguous weight bucket, inclusive on both ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightTier {
    pub id: WeightTierId,
    /// Short operator-facing code, e.g. "0-2KG"
    pub code: String,
    pub min_grams: Grams,
    /// `None` marks the single unbounded top tier
    pub max_grams: Option<Grams>,
}

impl WeightTier {
    /// Creates a bounded tier
    pub fn bounded(id: WeightTierId, code: impl Into<String>, min: u32, max: u32) -> Self {
        Self {
            id,
            code: code.into(),
            min_grams: Grams::new(min),
            max_grams: Some(Grams::new(max)),
        }
    }

    /// Creates the unbounded top tier
    pub fn unbounded(id: WeightTierId, code: impl Into<String>, min: u32) -> Self {
        Self {
            id,
            code: code.into(),
            min_grams: Grams::new(min),
            max_grams: None,
        }
    }

    /// Returns true if the weight falls inside this tier's range
    pub fn contains(&self, weight: Grams) -> bool {
        weight >= self.min_grams && self.max_grams.map_or(true, |max| weight <= max)
    }
}

/// Outcome of tier resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierMatch {
    /// The weight falls inside a tabulated range
    Within(WeightTierId),
    /// The weight exceeds the bounded top tier; the excess portion is
    /// priced by surcharge
    OverThreshold {
        tier_id: WeightTierId,
        excess: Grams,
    },
}

impl TierMatch {
    /// The tier the rate lookup uses, threshold or not
    pub fn tier_id(&self) -> WeightTierId {
        match self {
            TierMatch::Within(id) => *id,
            TierMatch::OverThreshold { tier_id, .. } => *tier_id,
        }
    }

    /// Excess weight above the top tier, zero when within range
    pub fn excess(&self) -> Grams {
        match self {
            TierMatch::Within(_) => Grams::new(0),
            TierMatch::OverThreshold { excess, .. } => *excess,
        }
    }
}

/// Ordered table of weight tiers
///
/// Construction keeps the tiers sorted by `min_grams`; contiguity and
/// overlap are validated when a snapshot is built, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightTierTable {
    tiers: Vec<WeightTier>,
}

impl WeightTierTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tier, keeping the table ordered by range start
    pub fn add_tier(&mut self, tier: WeightTier) {
        let at = self
            .tiers
            .partition_point(|t| t.min_grams <= tier.min_grams);
        self.tiers.insert(at, tier);
    }

    /// Returns the tiers in ascending range order
    pub fn tiers(&self) -> &[WeightTier] {
        &self.tiers
    }

    /// Returns a tier by id
    pub fn tier(&self, id: WeightTierId) -> Option<&WeightTier> {
        self.tiers.iter().find(|t| t.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Maps a weight to its tier
    ///
    /// Weights above a bounded top tier resolve to the top tier tagged
    /// [`TierMatch::OverThreshold`] with the excess portion, so heavy
    /// shipments are surcharged rather than rejected.
    pub fn resolve_tier(&self, weight: Grams) -> Result<TierMatch, ShippingError> {
        if let Some(tier) = self.tiers.iter().find(|t| t.contains(weight)) {
            return Ok(TierMatch::Within(tier.id));
        }

        // Above every tabulated range: fall into the top tier if bounded.
        match self.tiers.last() {
            Some(top) => match top.max_grams {
                Some(max) if weight > max => Ok(TierMatch::OverThreshold {
                    tier_id: top.id,
                    excess: weight.saturating_sub(max),
                }),
                _ => Err(ShippingError::NoTierConfigured { weight }),
            },
            None => Err(ShippingError::NoTierConfigured { weight }),
        }
    }
}

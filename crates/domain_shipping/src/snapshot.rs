//! Immutable reference-data snapshots
//!
//! All four reference tables plus the pricing configuration are bundled
//! into a `Snapshot` that is validated once, at build time, and never
//! mutated afterwards. Request processing reads a shared snapshot without
//! locking; administrative reloads build a complete replacement and
//! publish it atomically through the [`SnapshotStore`].

use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};
use core_kernel::SnapshotId;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::SnapshotBuildError;
use crate::method::{DeliveryMethod, DeliveryMethodRegistry};
use crate::pricing::PricingConfig;
use crate::rates::{RateEntry, RateMatrix};
use crate::tier::{WeightTier, WeightTierTable};
use crate::zone::{PrefixMapping, Zone, ZoneDirectory};

/// An immutable bundle of reference data serving quote requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: SnapshotId,
    pub built_at: DateTime<Utc>,
    pub zones: ZoneDirectory,
    pub tiers: WeightTierTable,
    pub methods: DeliveryMethodRegistry,
    pub rates: RateMatrix,
    pub pricing: PricingConfig,
}

impl Snapshot {
    /// Starts a builder with default pricing
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::new()
    }

    /// Reconstructs a builder holding this snapshot's data, the starting
    /// point of an administrative reload
    pub fn to_builder(&self) -> SnapshotBuilder {
        let mut builder = SnapshotBuilder::new().pricing(self.pricing.clone());
        for zone in self.zones.zones() {
            builder = builder.zone(zone.clone());
        }
        for (prefix, zone_id) in self.zones.prefix_mappings() {
            builder = builder.prefix_mapping(PrefixMapping::new(prefix.clone(), *zone_id));
        }
        for tier in self.tiers.tiers() {
            builder = builder.tier(tier.clone());
        }
        for method in self.methods.methods() {
            builder = builder.method(method.clone());
        }
        for (key, price) in self.rates.entries() {
            builder = builder.rate(RateEntry {
                zone_id: key.zone_id,
                weight_tier_id: key.weight_tier_id,
                method: key.method.clone(),
                producer_id: key.producer_id,
                price: *price,
            });
        }
        builder
    }
}

/// Collects reference data and validates the configuration shape
///
/// `build` refuses to produce a snapshot from a broken configuration: no
/// active zone, a malformed tier table, or rate entries pointing at rows
/// that do not exist.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    zones: Vec<Zone>,
    prefixes: Vec<PrefixMapping>,
    tiers: Vec<WeightTier>,
    methods: Vec<DeliveryMethod>,
    rates: Vec<RateEntry>,
    pricing: PricingConfig,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zone(mut self, zone: Zone) -> Self {
        self.zones.push(zone);
        self
    }

    pub fn prefix_mapping(mut self, mapping: PrefixMapping) -> Self {
        self.prefixes.push(mapping);
        self
    }

    /// Appends raw prefix mappings; the last occurrence of a prefix wins
    /// when the directory index is built
    pub fn prefix_mappings(mut self, mappings: impl IntoIterator<Item = PrefixMapping>) -> Self {
        self.prefixes.extend(mappings);
        self
    }

    pub fn tier(mut self, tier: WeightTier) -> Self {
        self.tiers.push(tier);
        self
    }

    pub fn method(mut self, method: DeliveryMethod) -> Self {
        self.methods.push(method);
        self
    }

    pub fn rate(mut self, entry: RateEntry) -> Self {
        self.rates.push(entry);
        self
    }

    pub fn pricing(mut self, pricing: PricingConfig) -> Self {
        self.pricing = pricing;
        self
    }

    /// Validates the configuration and produces an immutable snapshot
    pub fn build(self) -> Result<Snapshot, SnapshotBuildError> {
        self.validate_zones()?;
        self.validate_tiers()?;
        self.validate_methods()?;
        self.validate_rates()?;
        self.validate_prefixes()?;

        let mut zones = ZoneDirectory::new();
        for zone in self.zones {
            zones.add_zone(zone);
        }
        zones.load_prefix_mappings(self.prefixes);

        let mut tiers = WeightTierTable::new();
        for tier in self.tiers {
            tiers.add_tier(tier);
        }

        let mut methods = DeliveryMethodRegistry::new();
        for method in self.methods {
            methods.add_method(method);
        }

        let mut rates = RateMatrix::new();
        for entry in self.rates {
            rates.upsert(entry);
        }

        Ok(Snapshot {
            id: SnapshotId::new(),
            built_at: Utc::now(),
            zones,
            tiers,
            methods,
            rates,
            pricing: self.pricing,
        })
    }

    fn validate_zones(&self) -> Result<(), SnapshotBuildError> {
        if !self.zones.iter().any(|z| z.active) {
            return Err(SnapshotBuildError::NoActiveZone);
        }
        for (i, zone) in self.zones.iter().enumerate() {
            if self.zones[..i].iter().any(|z| z.id == zone.id) {
                return Err(SnapshotBuildError::DuplicateZone { zone_id: zone.id });
            }
        }
        Ok(())
    }

    fn validate_tiers(&self) -> Result<(), SnapshotBuildError> {
        if self.tiers.is_empty() {
            return Err(SnapshotBuildError::EmptyTierTable);
        }

        for (i, tier) in self.tiers.iter().enumerate() {
            if self.tiers[..i].iter().any(|t| t.id == tier.id) {
                return Err(SnapshotBuildError::DuplicateTier { tier: tier.id });
            }
            if let Some(max) = tier.max_grams {
                if max < tier.min_grams {
                    return Err(SnapshotBuildError::InvertedTierRange { tier: tier.id });
                }
            }
        }

        let mut ordered: Vec<&WeightTier> = self.tiers.iter().collect();
        ordered.sort_by_key(|t| t.min_grams);

        // Every non-negative weight must be placeable: the table starts at 0
        let lowest = ordered[0];
        if !lowest.min_grams.is_zero() {
            return Err(SnapshotBuildError::TierTableGapAtZero {
                tier: lowest.id,
                min: lowest.min_grams,
            });
        }

        for pair in ordered.windows(2) {
            let (below, above) = (pair[0], pair[1]);
            match below.max_grams {
                None => {
                    // Only the last tier may be unbounded
                    return if above.max_grams.is_none() {
                        Err(SnapshotBuildError::MultipleUnboundedTiers {
                            first: below.id,
                            second: above.id,
                        })
                    } else {
                        Err(SnapshotBuildError::UnboundedTierNotLast { tier: below.id })
                    };
                }
                Some(max) => {
                    if above.min_grams <= max {
                        return Err(SnapshotBuildError::OverlappingTiers {
                            first: below.id,
                            second: above.id,
                        });
                    }
                    if above.min_grams.value() != max.value() + 1 {
                        return Err(SnapshotBuildError::NonContiguousTiers {
                            below: below.id,
                            above: above.id,
                        });
                    }
                }
            }
        }

        Ok(())
    }

    fn validate_methods(&self) -> Result<(), SnapshotBuildError> {
        for (i, method) in self.methods.iter().enumerate() {
            if self.methods[..i].iter().any(|m| m.code == method.code) {
                return Err(SnapshotBuildError::DuplicateMethod {
                    method: method.code.clone(),
                });
            }
        }
        Ok(())
    }

    fn validate_rates(&self) -> Result<(), SnapshotBuildError> {
        for entry in &self.rates {
            if !self.zones.iter().any(|z| z.id == entry.zone_id) {
                return Err(SnapshotBuildError::RateForUnknownZone {
                    zone_id: entry.zone_id,
                });
            }
            if !self.tiers.iter().any(|t| t.id == entry.weight_tier_id) {
                return Err(SnapshotBuildError::RateForUnknownTier {
                    tier: entry.weight_tier_id,
                });
            }
            if !self.methods.iter().any(|m| m.code == entry.method) {
                return Err(SnapshotBuildError::RateForUnknownMethod {
                    method: entry.method.clone(),
                });
            }
            if entry.price.is_negative() {
                return Err(SnapshotBuildError::NegativePrice {
                    zone_id: entry.zone_id,
                });
            }
            if entry.price.currency() != self.pricing.currency {
                return Err(SnapshotBuildError::RateCurrencyMismatch {
                    zone_id: entry.zone_id,
                    expected: self.pricing.currency,
                    actual: entry.price.currency(),
                });
            }
        }
        Ok(())
    }

    fn validate_prefixes(&self) -> Result<(), SnapshotBuildError> {
        for mapping in &self.prefixes {
            if !self.zones.iter().any(|z| z.id == mapping.zone_id) {
                return Err(SnapshotBuildError::PrefixForUnknownZone {
                    prefix: mapping.prefix.clone(),
                    zone_id: mapping.zone_id,
                });
            }
        }
        Ok(())
    }
}

/// Publishes snapshots to concurrent readers
///
/// The read path clones an `Arc` under a short shared lock; the write path
/// is a single exclusive section that swaps the pointer, so readers never
/// observe a partially-rebuilt index. Administrative rebuilds additionally
/// hold the writer mutex across read-rebuild-publish, so concurrent admin
/// calls serialize instead of losing each other's changes.
#[derive(Debug)]
pub struct SnapshotStore {
    current: RwLock<Arc<Snapshot>>,
    /// Serializes administrative rebuilds; readers never take this
    writer: Mutex<()>,
}

impl SnapshotStore {
    /// Creates a store serving an initial snapshot
    pub fn new(initial: Snapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
            writer: Mutex::new(()),
        }
    }

    /// Returns the snapshot serving requests right now
    pub fn current(&self) -> Arc<Snapshot> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Atomically replaces the served snapshot
    pub fn publish(&self, snapshot: Snapshot) {
        info!(
            snapshot = %snapshot.id,
            prefixes = snapshot.zones.prefix_count(),
            rates = snapshot.rates.len(),
            "publishing reference data snapshot"
        );
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(snapshot);
    }

    /// Administrative bulk prefix reload: rebuild, revalidate, publish
    ///
    /// Later entries win over both earlier entries and previously loaded
    /// mappings for the same prefix. Runs under the writer mutex, so a
    /// concurrent reload or upsert cannot base itself on a snapshot this
    /// call is about to replace.
    pub fn reload_prefixes(
        &self,
        mappings: impl IntoIterator<Item = PrefixMapping>,
    ) -> Result<usize, SnapshotBuildError> {
        let _writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mappings: Vec<PrefixMapping> = mappings.into_iter().collect();
        let count = mappings.len();
        let rebuilt = self.current().to_builder().prefix_mappings(mappings).build();
        match rebuilt {
            Ok(snapshot) => {
                self.publish(snapshot);
                Ok(count)
            }
            Err(err) => {
                warn!(error = %err, "prefix reload rejected, keeping previous snapshot");
                Err(err)
            }
        }
    }

    /// Administrative rate upsert: rebuild, revalidate, publish
    ///
    /// Serialized against other administrative writes by the writer mutex.
    pub fn upsert_rate(&self, entry: RateEntry) -> Result<(), SnapshotBuildError> {
        let _writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let rebuilt = self.current().to_builder().rate(entry).build();
        match rebuilt {
            Ok(snapshot) => {
                self.publish(snapshot);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "rate upsert rejected, keeping previous snapshot");
                Err(err)
            }
        }
    }
}

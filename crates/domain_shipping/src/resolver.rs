//! Quote resolution
//!
//! The resolver composes the four reference tables into a priced quote:
//! postal code → zone, weight → tier, method validation, rate lookup with
//! producer fallback, then over-threshold and COD surcharges. It performs
//! no I/O and never retries; every failure is a typed business result the
//! checkout layer can present verbatim.

use std::fmt;
use std::sync::Arc;

use core_kernel::{Dimensions, Grams, MethodCode, Money, ProducerId, WeightTierId, ZoneId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ShippingError;
use crate::snapshot::{Snapshot, SnapshotStore};

/// A single shipping quote request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub postal_code: String,
    pub weight: Grams,
    pub method: MethodCode,
    pub cod: bool,
    pub producer_id: Option<ProducerId>,
    pub dimensions: Option<Dimensions>,
}

impl QuoteRequest {
    /// Creates a prepaid request with no producer scope
    pub fn new(postal_code: impl Into<String>, weight: Grams, method: MethodCode) -> Self {
        Self {
            postal_code: postal_code.into(),
            weight,
            method,
            cod: false,
            producer_id: None,
            dimensions: None,
        }
    }

    /// Requests cash on delivery
    pub fn with_cod(mut self) -> Self {
        self.cod = true;
        self
    }

    /// Scopes the request to one producer's rates
    pub fn with_producer(mut self, producer_id: ProducerId) -> Self {
        self.producer_id = Some(producer_id);
        self
    }

    /// Supplies parcel dimensions for method feasibility checks
    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = Some(dimensions);
        self
    }
}

/// A fully priced quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub base_price: Money,
    pub extra_weight_surcharge: Money,
    pub cod_fee: Money,
    pub total_price: Money,
    pub zone_id: ZoneId,
    pub weight_tier_id: WeightTierId,
    pub method: MethodCode,
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} via {} (base {}, surcharge {}, cod {})",
            self.total_price, self.method, self.base_price, self.extra_weight_surcharge,
            self.cod_fee
        )
    }
}

/// Resolves quote requests against the currently published snapshot
#[derive(Debug, Clone)]
pub struct RateResolver {
    store: Arc<SnapshotStore>,
}

impl RateResolver {
    /// Creates a resolver reading from a shared snapshot store
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self { store }
    }

    /// Prices a request against the current snapshot
    pub fn quote(&self, request: &QuoteRequest) -> Result<Quote, ShippingError> {
        let snapshot = self.store.current();
        Self::price(&snapshot, request)
    }

    /// Prices a request against an explicit snapshot
    ///
    /// Pure with respect to its arguments: identical snapshot and request
    /// always produce the identical quote.
    pub fn price(snapshot: &Snapshot, request: &QuoteRequest) -> Result<Quote, ShippingError> {
        if request.postal_code.trim().is_empty() {
            return Err(ShippingError::invalid_input("postal code is empty"));
        }

        let zone_id = snapshot.zones.resolve_zone(&request.postal_code)?;
        debug!(postal = %request.postal_code, zone = %zone_id, "zone resolved");

        let tier_match = snapshot.tiers.resolve_tier(request.weight)?;
        debug!(
            weight = %request.weight,
            tier = %tier_match.tier_id(),
            excess = %tier_match.excess(),
            "weight tier resolved"
        );

        snapshot
            .methods
            .validate(&request.method, request.weight, request.dimensions.as_ref())?;
        debug!(method = %request.method, "delivery method validated");

        let weight_tier_id = tier_match.tier_id();
        let base_price = snapshot
            .rates
            .lookup(zone_id, weight_tier_id, &request.method, request.producer_id)
            .ok_or_else(|| ShippingError::NoRateConfigured {
                zone_id,
                weight_tier_id,
                method: request.method.clone(),
            })?;
        debug!(base = %base_price, "base rate resolved");

        let extra_weight_surcharge = snapshot
            .pricing
            .excess_surcharge(zone_id, tier_match.excess());

        let subtotal = base_price + extra_weight_surcharge;
        let cod_fee = if request.cod {
            snapshot.pricing.cod_fee_for(&subtotal)
        } else {
            Money::zero(snapshot.pricing.currency)
        };

        // Full decimal precision is kept so total stays strictly monotonic
        // in weight; presentation rounding belongs to checkout.
        let total_price = subtotal + cod_fee;

        Ok(Quote {
            base_price,
            extra_weight_surcharge,
            cod_fee,
            total_price,
            zone_id,
            weight_tier_id,
            method: request.method.clone(),
        })
    }
}

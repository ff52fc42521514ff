//! Pricing configuration
//!
//! The per-kilogram over-threshold surcharge and the COD fee are supplied
//! by configuration, not derived by the engine. Defaults match the
//! market-typical Greek courier fees; deployments override them through
//! `SHIPPING_*` environment variables.

use std::collections::HashMap;

use core_kernel::{Currency, Grams, Money, Rate, ZoneId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// How the COD fee is charged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CodFeePolicy {
    /// Flat fee per shipment
    Flat { amount: Decimal },
    /// Percentage of the shipping subtotal (base + surcharge)
    Percentage { percent: Decimal },
}

/// Surcharge and fee constants applied on top of the base rate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Currency all rates and fees are expressed in
    pub currency: Currency,
    /// Surcharge per kilogram of weight above the top tier
    pub excess_per_kg: Decimal,
    /// Per-zone surcharge overrides; zones absent here use `excess_per_kg`
    pub zone_excess_per_kg: HashMap<ZoneId, Decimal>,
    /// COD fee policy
    pub cod_fee: CodFeePolicy,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: Currency::EUR,
            excess_per_kg: dec!(1.00),
            zone_excess_per_kg: HashMap::new(),
            cod_fee: CodFeePolicy::Flat { amount: dec!(1.50) },
        }
    }
}

/// Flat shape used for environment loading
#[derive(Debug, Deserialize)]
struct RawPricingConfig {
    excess_per_kg: Option<Decimal>,
    cod_fee_flat: Option<Decimal>,
    cod_fee_percent: Option<Decimal>,
}

impl PricingConfig {
    /// Loads overrides from `SHIPPING_*` environment variables
    ///
    /// Recognised keys: `SHIPPING_EXCESS_PER_KG`, `SHIPPING_COD_FEE_FLAT`,
    /// `SHIPPING_COD_FEE_PERCENT`. A percent fee takes precedence over a
    /// flat one when both are set.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let raw: RawPricingConfig = config::Config::builder()
            .add_source(config::Environment::with_prefix("SHIPPING"))
            .build()?
            .try_deserialize()?;

        let defaults = Self::default();
        let cod_fee = match (raw.cod_fee_percent, raw.cod_fee_flat) {
            (Some(percent), _) => CodFeePolicy::Percentage { percent },
            (None, Some(amount)) => CodFeePolicy::Flat { amount },
            (None, None) => defaults.cod_fee,
        };

        Ok(Self {
            currency: defaults.currency,
            excess_per_kg: raw.excess_per_kg.unwrap_or(defaults.excess_per_kg),
            zone_excess_per_kg: HashMap::new(),
            cod_fee,
        })
    }

    /// Sets a per-zone surcharge override
    pub fn with_zone_excess(mut self, zone_id: ZoneId, per_kg: Decimal) -> Self {
        self.zone_excess_per_kg.insert(zone_id, per_kg);
        self
    }

    /// Sets the COD fee policy
    pub fn with_cod_fee(mut self, policy: CodFeePolicy) -> Self {
        self.cod_fee = policy;
        self
    }

    /// Surcharge for weight above the top tier, linear in the excess
    pub fn excess_surcharge(&self, zone_id: ZoneId, excess: Grams) -> Money {
        if excess.is_zero() {
            return Money::zero(self.currency);
        }
        let per_kg = self
            .zone_excess_per_kg
            .get(&zone_id)
            .copied()
            .unwrap_or(self.excess_per_kg);
        Money::new(per_kg * excess.as_kilograms(), self.currency)
    }

    /// COD fee for a shipping subtotal
    pub fn cod_fee_for(&self, subtotal: &Money) -> Money {
        match self.cod_fee {
            CodFeePolicy::Flat { amount } => Money::new(amount, self.currency),
            CodFeePolicy::Percentage { percent } => {
                Rate::from_percentage(percent).apply(subtotal)
            }
        }
    }
}

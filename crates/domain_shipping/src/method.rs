//! Delivery methods and physical feasibility checks
//!
//! A delivery method is a fulfilment channel (home courier, pickup point,
//! parcel locker) with optional physical limits. Validation runs before any
//! rate lookup: a parcel that cannot physically use a method must never be
//! priced for it, even when a rate entry exists.

use std::collections::HashMap;

use core_kernel::{DimensionAxis, Dimensions, Grams, MethodCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A fulfilment channel with optional physical constraints
///
/// A `None` constraint means unconstrained for that dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryMethod {
    pub code: MethodCode,
    pub name: String,
    pub active: bool,
    pub max_weight: Option<Grams>,
    pub max_length_cm: Option<u32>,
    pub max_width_cm: Option<u32>,
    pub max_height_cm: Option<u32>,
}

impl DeliveryMethod {
    /// Creates an active, unconstrained method
    pub fn new(code: MethodCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
            active: true,
            max_weight: None,
            max_length_cm: None,
            max_width_cm: None,
            max_height_cm: None,
        }
    }

    /// Sets the weight limit
    pub fn with_max_weight(mut self, grams: u32) -> Self {
        self.max_weight = Some(Grams::new(grams));
        self
    }

    /// Sets the dimension limits
    pub fn with_max_dimensions(mut self, length_cm: u32, width_cm: u32, height_cm: u32) -> Self {
        self.max_length_cm = Some(length_cm);
        self.max_width_cm = Some(width_cm);
        self.max_height_cm = Some(height_cm);
        self
    }

    /// Marks the method inactive
    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }

    fn axis_limit(&self, axis: DimensionAxis) -> Option<u32> {
        match axis {
            DimensionAxis::Length => self.max_length_cm,
            DimensionAxis::Width => self.max_width_cm,
            DimensionAxis::Height => self.max_height_cm,
        }
    }
}

/// Why a delivery method refused a parcel
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MethodRejection {
    #[error("Delivery method {code} is unknown")]
    UnknownMethod { code: MethodCode },

    #[error("Delivery method {code} is inactive")]
    MethodInactive { code: MethodCode },

    #[error("Parcel weight {actual} exceeds {code} limit of {limit}")]
    WeightExceedsLimit {
        code: MethodCode,
        limit: Grams,
        actual: Grams,
    },

    #[error("Parcel {axis} of {actual_cm}cm exceeds {code} limit of {limit_cm}cm")]
    DimensionExceedsLimit {
        code: MethodCode,
        axis: DimensionAxis,
        limit_cm: u32,
        actual_cm: u32,
    },
}

/// Registry of delivery methods keyed by code
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryMethodRegistry {
    methods: HashMap<MethodCode, DeliveryMethod>,
}

impl DeliveryMethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a method
    pub fn add_method(&mut self, method: DeliveryMethod) {
        self.methods.insert(method.code.clone(), method);
    }

    /// Returns a method by code
    pub fn method(&self, code: &MethodCode) -> Option<&DeliveryMethod> {
        self.methods.get(code)
    }

    /// Iterates all methods
    pub fn methods(&self) -> impl Iterator<Item = &DeliveryMethod> {
        self.methods.values()
    }

    pub fn contains(&self, code: &MethodCode) -> bool {
        self.methods.contains_key(code)
    }

    /// Validates that a method can physically take the parcel
    ///
    /// Checks, in order: the method exists, it is active, the weight limit,
    /// then each dimension limit. A `None` constraint always passes.
    pub fn validate(
        &self,
        code: &MethodCode,
        weight: Grams,
        dims: Option<&Dimensions>,
    ) -> Result<(), MethodRejection> {
        let method = self
            .methods
            .get(code)
            .ok_or_else(|| MethodRejection::UnknownMethod { code: code.clone() })?;

        if !method.active {
            return Err(MethodRejection::MethodInactive { code: code.clone() });
        }

        if let Some(limit) = method.max_weight {
            if weight > limit {
                return Err(MethodRejection::WeightExceedsLimit {
                    code: code.clone(),
                    limit,
                    actual: weight,
                });
            }
        }

        if let Some(dims) = dims {
            for axis in [
                DimensionAxis::Length,
                DimensionAxis::Width,
                DimensionAxis::Height,
            ] {
                if let Some(limit_cm) = method.axis_limit(axis) {
                    let actual_cm = dims.along(axis);
                    if actual_cm > limit_cm {
                        return Err(MethodRejection::DimensionExceedsLimit {
                            code: code.clone(),
                            axis,
                            limit_cm,
                            actual_cm,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

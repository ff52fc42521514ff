//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults, so
//! tests specify only the fields they care about.

use core_kernel::{Dimensions, Grams, MethodCode, ProducerId};
use domain_shipping::QuoteRequest;

use crate::fixtures::MethodFixtures;

/// Builder for quote requests with suite-wide defaults
///
/// Defaults to a 1500g prepaid HOME delivery to central Athens ("10431"),
/// the base scenario every other test perturbs.
pub struct QuoteRequestBuilder {
    postal_code: String,
    weight: Grams,
    method: MethodCode,
    cod: bool,
    producer_id: Option<ProducerId>,
    dimensions: Option<Dimensions>,
}

impl Default for QuoteRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteRequestBuilder {
    /// Creates a builder with default values
    pub fn new() -> Self {
        Self {
            postal_code: "10431".to_string(),
            weight: Grams::new(1500),
            method: MethodFixtures::home_code(),
            cod: false,
            producer_id: None,
            dimensions: None,
        }
    }

    /// Sets the destination postal code
    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = postal_code.into();
        self
    }

    /// Sets the parcel weight in grams
    pub fn with_weight(mut self, grams: u32) -> Self {
        self.weight = Grams::new(grams);
        self
    }

    /// Sets the delivery method
    pub fn with_method(mut self, method: MethodCode) -> Self {
        self.method = method;
        self
    }

    /// Requests cash on delivery
    pub fn with_cod(mut self) -> Self {
        self.cod = true;
        self
    }

    /// Scopes the request to a producer
    pub fn with_producer(mut self, producer_id: i64) -> Self {
        self.producer_id = Some(ProducerId::new(producer_id));
        self
    }

    /// Supplies parcel dimensions
    pub fn with_dimensions(mut self, length_cm: u32, width_cm: u32, height_cm: u32) -> Self {
        self.dimensions = Some(Dimensions::new(length_cm, width_cm, height_cm));
        self
    }

    /// Builds the request
    pub fn build(self) -> QuoteRequest {
        let mut request = QuoteRequest::new(self.postal_code, self.weight, self.method);
        request.cod = self.cod;
        request.producer_id = self.producer_id;
        request.dimensions = self.dimensions;
        request
    }
}

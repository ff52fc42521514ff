//! Shipping Rate Resolution Domain
//!
//! This crate implements the marketplace's shipping rate engine: given a
//! destination postal code, a parcel weight, a delivery method, and an
//! optional cash-on-delivery flag, it deterministically resolves a priced
//! quote by composing four independently maintained reference tables:
//!
//! - **Zones** — geographic regions keyed by 3-digit postal prefixes
//! - **Weight tiers** — contiguous weight buckets
//! - **Delivery methods** — fulfilment channels with physical limits
//! - **Rate matrix** — (zone, tier, method) prices with per-producer
//!   overrides falling back to platform defaults
//!
//! Reference data lives in an immutable [`Snapshot`] published through a
//! [`SnapshotStore`]; the read path is lock-free and `quote` is a pure
//! function of the snapshot plus the request.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_shipping::{QuoteRequest, RateResolver, SnapshotStore};
//!
//! let store = Arc::new(SnapshotStore::new(snapshot));
//! let resolver = RateResolver::new(store);
//!
//! let request = QuoteRequest::new("10431", Grams::new(1500), home).with_cod();
//! let quote = resolver.quote(&request)?;
//! println!("{}", quote.total_price);
//! ```

pub mod error;
pub mod ingest;
pub mod method;
pub mod pricing;
pub mod rates;
pub mod resolver;
pub mod snapshot;
pub mod tier;
pub mod zone;

pub use error::{ShippingError, SnapshotBuildError};
pub use method::{DeliveryMethod, DeliveryMethodRegistry, MethodRejection};
pub use pricing::{CodFeePolicy, PricingConfig};
pub use rates::{RateEntry, RateKey, RateMatrix};
pub use resolver::{Quote, QuoteRequest, RateResolver};
pub use snapshot::{Snapshot, SnapshotBuilder, SnapshotStore};
pub use tier::{TierMatch, WeightTier, WeightTierTable};
pub use zone::{PrefixMapping, Zone, ZoneDirectory};

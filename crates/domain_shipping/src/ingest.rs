//! Postal code ingestion contract
//!
//! The ingestion collaborator supplies raw (postal_code, zone_id) pairs,
//! originally sourced from a courier CSV export. This module owns the two
//! documented rules of that contract:
//!
//! 1. The prefix is the first three digits of the postal code; purely
//!    numeric codes shorter than three digits are zero-padded on the left
//!    ("45" becomes "045").
//! 2. When several pairs produce the same prefix, the last occurrence in
//!    the input sequence wins, making re-ingestion of the same export
//!    idempotent.

use core_kernel::{PostalPrefix, ZoneId};

use crate::error::ShippingError;
use crate::zone::PrefixMapping;

/// Derives the 3-digit, zero-padded prefix from a raw postal code
pub fn derive_prefix(postal_code: &str) -> Result<PostalPrefix, ShippingError> {
    let trimmed = postal_code.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(ShippingError::invalid_input(format!(
            "postal code {trimmed:?} is not numeric"
        )));
    }

    let head: String = if trimmed.len() < 3 {
        format!("{trimmed:0>3}")
    } else {
        trimmed.chars().take(3).collect()
    };

    PostalPrefix::new(head).map_err(|e| ShippingError::invalid_input(e.to_string()))
}

/// Converts raw (postal_code, zone_id) pairs into prefix mappings
///
/// Malformed postal codes fail the whole batch rather than being silently
/// skipped; the ingestion job is expected to surface the offending row.
/// Duplicate prefixes are preserved in input order so that downstream
/// loading applies last-occurrence-wins.
pub fn mappings_from_pairs(
    pairs: impl IntoIterator<Item = (String, ZoneId)>,
) -> Result<Vec<PrefixMapping>, ShippingError> {
    pairs
        .into_iter()
        .map(|(postal_code, zone_id)| {
            let prefix = derive_prefix(&postal_code)?;
            Ok(PrefixMapping::new(prefix, zone_id))
        })
        .collect()
}

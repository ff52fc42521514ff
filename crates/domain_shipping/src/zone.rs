//! Geographic shipping zones and the postal prefix index
//!
//! A zone is one axis of the rate matrix. Postal codes resolve to zones
//! through their first three digits; the prefix index is bulk-loaded from
//! an external ingestion collaborator (see [`crate::ingest`]).

use std::collections::HashMap;

use core_kernel::{PostalPrefix, ZoneId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ShippingError;

/// A geographic shipping region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub description: String,
    pub active: bool,
}

impl Zone {
    /// Creates an active zone
    pub fn new(id: ZoneId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            active: true,
        }
    }

    /// Marks the zone inactive
    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }
}

/// One row of the prefix index: a 3-digit prefix pointing at a zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixMapping {
    pub prefix: PostalPrefix,
    pub zone_id: ZoneId,
}

impl PrefixMapping {
    pub fn new(prefix: PostalPrefix, zone_id: ZoneId) -> Self {
        Self { prefix, zone_id }
    }
}

/// Resolves postal codes to zone ids through the prefix index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneDirectory {
    zones: HashMap<ZoneId, Zone>,
    prefix_index: HashMap<PostalPrefix, ZoneId>,
}

impl ZoneDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a zone row
    pub fn add_zone(&mut self, zone: Zone) {
        self.zones.insert(zone.id, zone);
    }

    /// Returns a zone by id
    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.get(&id)
    }

    /// Iterates all zones
    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        self.zones.values()
    }

    /// Returns true if at least one zone is active
    pub fn has_active_zone(&self) -> bool {
        self.zones.values().any(|z| z.active)
    }

    /// Returns the number of indexed prefixes
    pub fn prefix_count(&self) -> usize {
        self.prefix_index.len()
    }

    /// Bulk-merges prefix mappings into the index
    ///
    /// When two entries share a prefix, the later one in the input sequence
    /// wins, so re-loading the same export is idempotent. Returns the
    /// number of entries applied.
    pub fn load_prefix_mappings(
        &mut self,
        entries: impl IntoIterator<Item = PrefixMapping>,
    ) -> usize {
        let mut loaded = 0;
        for entry in entries {
            self.prefix_index.insert(entry.prefix, entry.zone_id);
            loaded += 1;
        }
        debug!(loaded, total = self.prefix_index.len(), "prefix index merged");
        loaded
    }

    /// Iterates the prefix index
    pub fn prefix_mappings(&self) -> impl Iterator<Item = (&PostalPrefix, &ZoneId)> {
        self.prefix_index.iter()
    }

    /// Resolves a postal code to its zone id
    ///
    /// Takes the first three characters of the code as the prefix. Codes
    /// shorter than three characters, or with a non-numeric prefix, are
    /// rejected before lookup.
    pub fn resolve_zone(&self, postal_code: &str) -> Result<ZoneId, ShippingError> {
        let prefix = self.derive_prefix(postal_code)?;
        match self.prefix_index.get(&prefix) {
            Some(zone_id) => Ok(*zone_id),
            None => Err(ShippingError::UnknownZone { prefix }),
        }
    }

    fn derive_prefix(&self, postal_code: &str) -> Result<PostalPrefix, ShippingError> {
        let trimmed = postal_code.trim();
        if trimmed.chars().count() < 3 {
            return Err(ShippingError::invalid_input(format!(
                "postal code {trimmed:?} is shorter than 3 characters"
            )));
        }
        let head: String = trimmed.chars().take(3).collect();
        PostalPrefix::new(head).map_err(|e| ShippingError::invalid_input(e.to_string()))
    }
}

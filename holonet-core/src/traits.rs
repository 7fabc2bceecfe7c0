//! Common traits for Holonet.
//!
//! These traits give the access layer a typed view over raw upstream JSON
//! without resolving attributes by name at runtime.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{HolonetError, Result};
use crate::types::{parse_locator, EntityId, EntityKind};

// ═══════════════════════════════════════════════════════════════════════════════
// RECORD TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// A value decoded from one upstream item and stamped with its identifier.
///
/// The upstream never sends an `id` field; the identifier always comes from
/// the fetch target or from the item's own `url`.
pub trait Record: DeserializeOwned + Serialize + Clone + Send + Sync + 'static {
    /// Identifier of the entity this record was decoded from.
    fn id(&self) -> EntityId;

    /// Stamps the identifier.
    fn set_id(&mut self, id: EntityId);

    /// Decodes a record whose identifier is already known.
    fn from_raw(id: EntityId, raw: &Value) -> Result<Self> {
        let mut record: Self = serde_json::from_value(raw.clone())?;
        record.set_id(id);
        Ok(record)
    }

    /// Decodes a listing item, taking the identifier from its `url`.
    fn from_listing_item(raw: &Value) -> Result<Self> {
        let url = item_url(raw)?;
        Self::from_raw(parse_locator(url)?, raw)
    }
}

/// Returns the `url` field of a raw upstream item.
pub fn item_url(raw: &Value) -> Result<&str> {
    raw.get("url")
        .and_then(Value::as_str)
        .ok_or_else(|| HolonetError::InvalidReference("<item without url>".into()))
}

// ═══════════════════════════════════════════════════════════════════════════════
// RESOURCE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// A full entity of one upstream kind.
pub trait Resource: Record {
    /// Kind served by this type.
    const KIND: EntityKind;

    /// Reduced projection used in lists and cross references.
    type Summary: Record;

    /// Reference locators pointing at entities of `kind`, in upstream order.
    ///
    /// Kinds this entity has no relation to yield an empty list.
    fn references(&self, kind: EntityKind) -> Vec<&str>;
}

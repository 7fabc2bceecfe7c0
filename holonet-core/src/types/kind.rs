//! Entity kinds and reference locators.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HolonetError, Result};

/// Identifier of an entity, unique within its kind. Always positive.
pub type EntityId = u64;

/// The four categories of entity served by the upstream catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// People of the catalog (upstream resource `people`)
    Character,
    /// Planets
    Planet,
    /// Starships
    Starship,
    /// Films
    Film,
}

impl EntityKind {
    /// Every kind, in catalog order.
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Character,
        EntityKind::Planet,
        EntityKind::Starship,
        EntityKind::Film,
    ];

    /// Upstream resource path segment.
    pub fn path(self) -> &'static str {
        match self {
            EntityKind::Character => "people",
            EntityKind::Planet => "planets",
            EntityKind::Starship => "starships",
            EntityKind::Film => "films",
        }
    }

    /// Singular lowercase label, as used in messages.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Character => "character",
            EntityKind::Planet => "planet",
            EntityKind::Starship => "starship",
            EntityKind::Film => "film",
        }
    }

    /// Singular label with a leading capital.
    pub fn label_capitalized(self) -> &'static str {
        match self {
            EntityKind::Character => "Character",
            EntityKind::Planet => "Planet",
            EntityKind::Starship => "Starship",
            EntityKind::Film => "Film",
        }
    }

    /// Upstream path of a single entity, e.g. `/people/1/`.
    pub fn entity_path(self, id: EntityId) -> String {
        format!("/{}/{}/", self.path(), id)
    }

    /// Upstream path of the listing, e.g. `/people/`.
    pub fn listing_path(self) -> String {
        format!("/{}/", self.path())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntityKind {
    type Err = HolonetError;

    /// Accepts singular and plural labels as well as upstream paths.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "character" | "characters" | "people" | "person" => Ok(EntityKind::Character),
            "planet" | "planets" => Ok(EntityKind::Planet),
            "starship" | "starships" => Ok(EntityKind::Starship),
            "film" | "films" => Ok(EntityKind::Film),
            other => Err(HolonetError::Validation(format!("unknown entity kind: {other}"))),
        }
    }
}

/// Extracts the entity identifier from a reference locator.
///
/// The identifier is the trailing numeric path segment, with an optional
/// trailing slash: `https://swapi.dev/api/people/1/` and
/// `https://swapi.dev/api/films/6` both qualify.
pub fn parse_locator(locator: &str) -> Result<EntityId> {
    let trimmed = locator.trim();
    let path = trimmed.strip_suffix('/').unwrap_or(trimmed);

    let invalid = || HolonetError::InvalidReference(locator.to_string());

    let (_, segment) = path.rsplit_once('/').ok_or_else(invalid)?;
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    match segment.parse::<EntityId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(invalid()),
    }
}

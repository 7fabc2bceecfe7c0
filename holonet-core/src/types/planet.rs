//! Planets.

use serde::{Deserialize, Serialize};

use super::{EntityId, EntityKind};
use crate::traits::Resource;

/// A planet, as served by the upstream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    /// Identifier
    #[serde(default)]
    pub id: EntityId,
    /// Name
    pub name: String,
    /// Hours per day, as text
    pub rotation_period: String,
    /// Days per year, as text
    pub orbital_period: String,
    /// Diameter in kilometers, as text
    pub diameter: String,
    /// Climate, possibly several comma-separated
    pub climate: String,
    /// Gravity, e.g. "1 standard"
    pub gravity: String,
    /// Terrain, possibly several comma-separated
    pub terrain: String,
    /// Percentage of surface water, as text
    pub surface_water: String,
    /// Population, as text
    pub population: String,
    /// Locators of the planet's residents
    #[serde(default, rename(deserialize = "residents"))]
    pub resident_urls: Vec<String>,
    /// Locators of the films featuring the planet
    #[serde(default, rename(deserialize = "films"))]
    pub film_urls: Vec<String>,
}

/// Lightweight planet for lists and references.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanetSummary {
    /// Identifier
    #[serde(default)]
    pub id: EntityId,
    /// Name
    pub name: String,
    /// Climate
    pub climate: String,
    /// Terrain
    pub terrain: String,
    /// Population, as text
    #[serde(default)]
    pub population: String,
    /// Diameter, as text
    #[serde(default)]
    pub diameter: String,
}

impl_record!(Planet, PlanetSummary);

impl Resource for Planet {
    const KIND: EntityKind = EntityKind::Planet;
    type Summary = PlanetSummary;

    fn references(&self, kind: EntityKind) -> Vec<&str> {
        match kind {
            EntityKind::Character => self.resident_urls.iter().map(String::as_str).collect(),
            EntityKind::Film => self.film_urls.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

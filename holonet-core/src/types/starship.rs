//! Starships.

use serde::{Deserialize, Serialize};

use super::{EntityId, EntityKind};
use crate::traits::Resource;

/// A starship, as served by the upstream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Starship {
    /// Identifier
    #[serde(default)]
    pub id: EntityId,
    /// Name
    pub name: String,
    /// Model
    pub model: String,
    /// Manufacturer(s)
    pub manufacturer: String,
    /// Cost in galactic credits, as text
    pub cost_in_credits: String,
    /// Length in meters, as text
    pub length: String,
    /// Maximum atmospheric speed, as text
    pub max_atmosphering_speed: String,
    /// Crew size, as text
    pub crew: String,
    /// Passenger capacity, as text
    pub passengers: String,
    /// Cargo capacity in kilograms, as text
    pub cargo_capacity: String,
    /// Consumables duration, e.g. "2 months"
    pub consumables: String,
    /// Hyperdrive class, as text
    pub hyperdrive_rating: String,
    /// Megalights per hour
    #[serde(rename = "MGLT")]
    pub mglt: String,
    /// Class, e.g. "Light freighter"
    pub starship_class: String,
    /// Locators of the starship's pilots
    #[serde(default, rename(deserialize = "pilots"))]
    pub pilot_urls: Vec<String>,
    /// Locators of the films featuring the starship
    #[serde(default, rename(deserialize = "films"))]
    pub film_urls: Vec<String>,
}

/// Lightweight starship for lists and references.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarshipSummary {
    /// Identifier
    #[serde(default)]
    pub id: EntityId,
    /// Name
    pub name: String,
    /// Model
    pub model: String,
    /// Class
    pub starship_class: String,
    /// Manufacturer(s)
    #[serde(default)]
    pub manufacturer: String,
}

impl_record!(Starship, StarshipSummary);

impl Resource for Starship {
    const KIND: EntityKind = EntityKind::Starship;
    type Summary = StarshipSummary;

    fn references(&self, kind: EntityKind) -> Vec<&str> {
        match kind {
            EntityKind::Character => self.pilot_urls.iter().map(String::as_str).collect(),
            EntityKind::Film => self.film_urls.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

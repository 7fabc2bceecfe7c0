//! Films.

use serde::{Deserialize, Serialize};

use super::{EntityId, EntityKind};
use crate::traits::Resource;

/// A film, as served by the upstream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Film {
    /// Identifier
    #[serde(default)]
    pub id: EntityId,
    /// Title
    pub title: String,
    /// Episode number
    pub episode_id: u32,
    /// Opening crawl text
    pub opening_crawl: String,
    /// Director(s)
    pub director: String,
    /// Producer(s)
    pub producer: String,
    /// Release date, ISO 8601
    pub release_date: String,
    /// Locators of the characters in the film
    #[serde(default, rename(deserialize = "characters"))]
    pub character_urls: Vec<String>,
    /// Locators of the planets in the film
    #[serde(default, rename(deserialize = "planets"))]
    pub planet_urls: Vec<String>,
    /// Locators of the starships in the film
    #[serde(default, rename(deserialize = "starships"))]
    pub starship_urls: Vec<String>,
    /// Locators of the vehicles in the film
    #[serde(default, rename(deserialize = "vehicles"))]
    pub vehicle_urls: Vec<String>,
    /// Locators of the species in the film
    #[serde(default, rename(deserialize = "species"))]
    pub species_urls: Vec<String>,
}

/// Lightweight film for lists and references.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilmSummary {
    /// Identifier
    #[serde(default)]
    pub id: EntityId,
    /// Title
    pub title: String,
    /// Episode number
    pub episode_id: u32,
    /// Release date
    pub release_date: String,
    /// Director(s)
    #[serde(default)]
    pub director: String,
    /// Producer(s)
    #[serde(default)]
    pub producer: String,
}

impl_record!(Film, FilmSummary);

impl Resource for Film {
    const KIND: EntityKind = EntityKind::Film;
    type Summary = FilmSummary;

    fn references(&self, kind: EntityKind) -> Vec<&str> {
        let urls = match kind {
            EntityKind::Character => &self.character_urls,
            EntityKind::Planet => &self.planet_urls,
            EntityKind::Starship => &self.starship_urls,
            EntityKind::Film => return Vec::new(),
        };
        urls.iter().map(String::as_str).collect()
    }
}

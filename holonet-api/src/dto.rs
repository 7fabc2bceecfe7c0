//! DTOs for API requests and responses.

use serde::{Deserialize, Serialize};

use holonet_cache::CacheStats;
use holonet_core::types::EntityId;
use holonet_query::{CharacterFilter, FilmFilter, PlanetFilter, SortOrder, StarshipFilter};

/// Response for `GET /`.
#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    /// Greeting
    pub message: &'static str,
    /// Server version
    pub version: &'static str,
    /// Health endpoint
    pub health: &'static str,
}

/// Response for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "healthy" when the server answers
    pub status: &'static str,
    /// Server version
    pub version: &'static str,
    /// Seconds since startup
    pub uptime_seconds: u64,
    /// Current time, RFC 3339
    pub timestamp: String,
    /// Upstream response cache
    pub cache: CacheStats,
}

// ═══════════════════════════════════════════════════════════════════════════════
// LIST PARAMETERS
// ═══════════════════════════════════════════════════════════════════════════════

fn first_page() -> u32 {
    1
}

/// Paging, search and ordering shared by every listing.
#[derive(Debug, Deserialize)]
pub struct ListParams<S> {
    /// 1-based page
    #[serde(default = "first_page")]
    pub page: u32,
    /// Upstream search term
    #[serde(default)]
    pub search: Option<String>,
    /// Sort field
    #[serde(default)]
    pub sort_by: S,
    /// Sort direction
    #[serde(default)]
    pub order: SortOrder,
}

/// Kind-specific filters of a listing.
pub trait ListFilters {
    /// Filter field enum of the listed kind.
    type Field: Copy;

    /// Criteria in the form [`holonet_query::filter`] takes.
    fn criteria(&self) -> Vec<(Self::Field, Option<&str>)>;

    /// Film restricting the listing to its cast, sets or ships.
    fn film_id(&self) -> Option<EntityId> {
        None
    }
}

/// `GET /characters` filters.
#[derive(Debug, Default, Deserialize)]
pub struct CharacterFilters {
    /// Exact gender
    pub gender: Option<String>,
    /// Eye color substring
    pub eye_color: Option<String>,
    /// Hair color substring
    pub hair_color: Option<String>,
    /// Skin color substring
    pub skin_color: Option<String>,
    /// Only characters appearing in this film
    pub film_id: Option<EntityId>,
}

impl ListFilters for CharacterFilters {
    type Field = CharacterFilter;

    fn criteria(&self) -> Vec<(CharacterFilter, Option<&str>)> {
        vec![
            (CharacterFilter::Gender, self.gender.as_deref()),
            (CharacterFilter::EyeColor, self.eye_color.as_deref()),
            (CharacterFilter::HairColor, self.hair_color.as_deref()),
            (CharacterFilter::SkinColor, self.skin_color.as_deref()),
        ]
    }

    fn film_id(&self) -> Option<EntityId> {
        self.film_id.filter(|id| *id > 0)
    }
}

/// `GET /planets` filters.
#[derive(Debug, Default, Deserialize)]
pub struct PlanetFilters {
    /// Climate substring
    pub climate: Option<String>,
    /// Terrain substring
    pub terrain: Option<String>,
    /// Only planets appearing in this film
    pub film_id: Option<EntityId>,
}

impl ListFilters for PlanetFilters {
    type Field = PlanetFilter;

    fn criteria(&self) -> Vec<(PlanetFilter, Option<&str>)> {
        vec![
            (PlanetFilter::Climate, self.climate.as_deref()),
            (PlanetFilter::Terrain, self.terrain.as_deref()),
        ]
    }

    fn film_id(&self) -> Option<EntityId> {
        self.film_id.filter(|id| *id > 0)
    }
}

/// `GET /starships` filters.
#[derive(Debug, Default, Deserialize)]
pub struct StarshipFilters {
    /// Starship class substring
    pub starship_class: Option<String>,
    /// Manufacturer substring
    pub manufacturer: Option<String>,
    /// Only starships appearing in this film
    pub film_id: Option<EntityId>,
}

impl ListFilters for StarshipFilters {
    type Field = StarshipFilter;

    fn criteria(&self) -> Vec<(StarshipFilter, Option<&str>)> {
        vec![
            (StarshipFilter::StarshipClass, self.starship_class.as_deref()),
            (StarshipFilter::Manufacturer, self.manufacturer.as_deref()),
        ]
    }

    fn film_id(&self) -> Option<EntityId> {
        self.film_id.filter(|id| *id > 0)
    }
}

/// `GET /films` filters.
#[derive(Debug, Default, Deserialize)]
pub struct FilmFilters {
    /// Director substring
    pub director: Option<String>,
    /// Producer substring
    pub producer: Option<String>,
}

impl ListFilters for FilmFilters {
    type Field = FilmFilter;

    fn criteria(&self) -> Vec<(FilmFilter, Option<&str>)> {
        vec![
            (FilmFilter::Director, self.director.as_deref()),
            (FilmFilter::Producer, self.producer.as_deref()),
        ]
    }
}

/// `GET /characters/:id` options.
#[derive(Debug, Default, Deserialize)]
pub struct CharacterParams {
    /// Embed the full homeworld planet
    #[serde(default)]
    pub include_homeworld: bool,
}

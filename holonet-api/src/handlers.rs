//! API route handlers.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::debug;

use holonet_client::HolonetClient;
use holonet_core::constants::RESPONSE_PAGE_SIZE;
use holonet_core::traits::{Record, Resource};
use holonet_core::types::{
    Character, CharacterSummary, EntityId, Film, FilmSummary, Paginated, Planet, PlanetSummary,
    Starship, StarshipSummary,
};
use holonet_query::{
    filter, paginate, sort, CharacterField, FilmField, Filterable, PlanetField, Sortable,
    StarshipField,
};

use crate::dto::*;
use crate::error::ApiError;
use crate::extract::{ApiPath, ApiQuery};
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

// ═══════════════════════════════════════════════════════════════════════════════
// SHARED PIPELINES
// ═══════════════════════════════════════════════════════════════════════════════

/// Full collection → film restriction → filters → sort → one page.
async fn list_resource<T, F>(
    state: &AppState,
    params: ListParams<<T::Summary as Sortable>::Field>,
    filters: &F,
) -> Result<Json<Paginated<T::Summary>>>
where
    T: Resource,
    T::Summary: Filterable + Sortable,
    F: ListFilters<Field = <T::Summary as Filterable>::Field>,
{
    if params.page < 1 {
        return Err(ApiError::validation("page must be at least 1"));
    }

    let mut items = state.client.all::<T>(params.search.as_deref()).await?;

    if let Some(film_id) = filters.film_id() {
        let film: Film = state.client.get(film_id).await?;
        let members: HashSet<EntityId> = HolonetClient::referenced_ids::<Film, T>(&film)?
            .into_iter()
            .collect();
        items.retain(|item| members.contains(&item.id()));
        debug!(film_id, kept = items.len(), "Restricted listing to film");
    }

    let items = filter(items, &filters.criteria());
    let items = sort(items, params.sort_by, params.order);
    Ok(Json(paginate(items, params.page, RESPONSE_PAGE_SIZE)))
}

/// Entity `id` of kind `R`, then its `S` references as summaries.
async fn related<R: Resource, S: Resource>(
    state: &AppState,
    id: EntityId,
) -> Result<Json<Vec<S::Summary>>> {
    let entity: R = state.client.get(id).await?;
    Ok(Json(state.client.resolve_related::<R, S>(&entity).await?))
}

// ═══════════════════════════════════════════════════════════════════════════════
// SERVICE
// ═══════════════════════════════════════════════════════════════════════════════

/// GET /
pub async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the Holonet API",
        version: env!("CARGO_PKG_VERSION"),
        health: "/health",
    })
}

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        cache: state.client.cache_stats(),
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// CHARACTERS
// ═══════════════════════════════════════════════════════════════════════════════

/// GET /characters
pub async fn list_characters(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<ListParams<CharacterField>>,
    ApiQuery(filters): ApiQuery<CharacterFilters>,
) -> Result<Json<Paginated<CharacterSummary>>> {
    list_resource::<Character, _>(&state, params, &filters).await
}

/// GET /characters/:id
pub async fn get_character(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<EntityId>,
    ApiQuery(params): ApiQuery<CharacterParams>,
) -> Result<Json<Character>> {
    let mut character: Character = state.client.get(id).await?;
    if params.include_homeworld {
        let homeworld = state
            .client
            .resolve_full::<Character, Planet>(&character)
            .await?;
        character.homeworld = homeworld.into_iter().next().map(Box::new);
    }
    Ok(Json(character))
}

/// GET /characters/:id/films
pub async fn character_films(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<EntityId>,
) -> Result<Json<Vec<FilmSummary>>> {
    related::<Character, Film>(&state, id).await
}

// ═══════════════════════════════════════════════════════════════════════════════
// PLANETS
// ═══════════════════════════════════════════════════════════════════════════════

/// GET /planets
pub async fn list_planets(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<ListParams<PlanetField>>,
    ApiQuery(filters): ApiQuery<PlanetFilters>,
) -> Result<Json<Paginated<PlanetSummary>>> {
    list_resource::<Planet, _>(&state, params, &filters).await
}

/// GET /planets/:id
pub async fn get_planet(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<EntityId>,
) -> Result<Json<Planet>> {
    Ok(Json(state.client.get(id).await?))
}

/// GET /planets/:id/residents
pub async fn planet_residents(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<EntityId>,
) -> Result<Json<Vec<CharacterSummary>>> {
    related::<Planet, Character>(&state, id).await
}

/// GET /planets/:id/films
pub async fn planet_films(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<EntityId>,
) -> Result<Json<Vec<FilmSummary>>> {
    related::<Planet, Film>(&state, id).await
}

// ═══════════════════════════════════════════════════════════════════════════════
// STARSHIPS
// ═══════════════════════════════════════════════════════════════════════════════

/// GET /starships
pub async fn list_starships(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<ListParams<StarshipField>>,
    ApiQuery(filters): ApiQuery<StarshipFilters>,
) -> Result<Json<Paginated<StarshipSummary>>> {
    list_resource::<Starship, _>(&state, params, &filters).await
}

/// GET /starships/:id
pub async fn get_starship(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<EntityId>,
) -> Result<Json<Starship>> {
    Ok(Json(state.client.get(id).await?))
}

/// GET /starships/:id/pilots
pub async fn starship_pilots(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<EntityId>,
) -> Result<Json<Vec<CharacterSummary>>> {
    related::<Starship, Character>(&state, id).await
}

/// GET /starships/:id/films
pub async fn starship_films(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<EntityId>,
) -> Result<Json<Vec<FilmSummary>>> {
    related::<Starship, Film>(&state, id).await
}

// ═══════════════════════════════════════════════════════════════════════════════
// FILMS
// ═══════════════════════════════════════════════════════════════════════════════

/// GET /films
pub async fn list_films(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<ListParams<FilmField>>,
    ApiQuery(filters): ApiQuery<FilmFilters>,
) -> Result<Json<Paginated<FilmSummary>>> {
    list_resource::<Film, _>(&state, params, &filters).await
}

/// GET /films/:id
pub async fn get_film(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<EntityId>,
) -> Result<Json<Film>> {
    Ok(Json(state.client.get(id).await?))
}

/// GET /films/:id/characters
pub async fn film_characters(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<EntityId>,
) -> Result<Json<Vec<CharacterSummary>>> {
    related::<Film, Character>(&state, id).await
}

/// GET /films/:id/planets
pub async fn film_planets(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<EntityId>,
) -> Result<Json<Vec<PlanetSummary>>> {
    related::<Film, Planet>(&state, id).await
}

/// GET /films/:id/starships
pub async fn film_starships(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<EntityId>,
) -> Result<Json<Vec<StarshipSummary>>> {
    related::<Film, Starship>(&state, id).await
}

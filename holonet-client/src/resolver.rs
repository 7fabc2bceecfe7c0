//! Cross-reference resolution between entities.

use futures::future::try_join_all;
use tracing::{debug, instrument};

use holonet_core::error::Result;
use holonet_core::traits::{Record, Resource};
use holonet_core::types::{parse_locator, EntityId};

use crate::client::HolonetClient;

impl HolonetClient {
    /// Resolves the `S` entities referenced by `entity` into summaries.
    ///
    /// Fetches run concurrently; the result follows the order of the
    /// entity's locators. The first failure aborts the whole resolution.
    #[instrument(skip(self, entity), fields(from = %R::KIND, to = %S::KIND, id = entity.id()))]
    pub async fn resolve_related<R, S>(&self, entity: &R) -> Result<Vec<S::Summary>>
    where
        R: Resource,
        S: Resource,
    {
        let locators = entity.references(S::KIND);
        debug!(count = locators.len(), "Resolving references");

        try_join_all(locators.into_iter().map(|locator| async move {
            let id = parse_locator(locator)?;
            self.fetch_record::<S::Summary>(S::KIND, id).await
        }))
        .await
    }

    /// Fetches the full `S` entities referenced by `entity`, in locator order.
    pub async fn resolve_full<R, S>(&self, entity: &R) -> Result<Vec<S>>
    where
        R: Resource,
        S: Resource,
    {
        try_join_all(entity.references(S::KIND).into_iter().map(|locator| async move {
            let id = parse_locator(locator)?;
            self.get::<S>(id).await
        }))
        .await
    }

    /// Identifiers of the `S` entities referenced by `entity`.
    ///
    /// No fetching; only the locators are parsed.
    pub fn referenced_ids<R, S>(entity: &R) -> Result<Vec<EntityId>>
    where
        R: Resource,
        S: Resource,
    {
        entity
            .references(S::KIND)
            .into_iter()
            .map(parse_locator)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{character_json, film_json, test_config};

    use holonet_core::error::HolonetError;
    use holonet_core::types::{Character, Film, Planet};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_json(server: &MockServer, at: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(at))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_resolves_in_locator_order() {
        let server = MockServer::start().await;
        let base = server.uri();
        mount_json(&server, "/people/1/", character_json(&base, 1, "Luke", &[3, 1, 2])).await;
        for id in [1u64, 2, 3] {
            mount_json(&server, &format!("/films/{id}/"), film_json(&base, id)).await;
        }

        let client = HolonetClient::with_config(test_config(&server)).unwrap();
        let luke: Character = client.get(1).await.unwrap();
        let films = client.resolve_related::<Character, Film>(&luke).await.unwrap();

        let ids: Vec<u64> = films.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(films[0].title, "Film 3");
    }

    #[tokio::test]
    async fn test_empty_reference_list() {
        let server = MockServer::start().await;
        let base = server.uri();
        mount_json(&server, "/people/2/", character_json(&base, 2, "Nobody", &[])).await;

        let client = HolonetClient::with_config(test_config(&server)).unwrap();
        let nobody: Character = client.get(2).await.unwrap();
        let films = client.resolve_related::<Character, Film>(&nobody).await.unwrap();
        assert!(films.is_empty());
    }

    #[tokio::test]
    async fn test_first_failure_aborts() {
        let server = MockServer::start().await;
        let base = server.uri();
        mount_json(&server, "/people/1/", character_json(&base, 1, "Luke", &[1, 7])).await;
        mount_json(&server, "/films/1/", film_json(&base, 1)).await;
        Mock::given(method("GET"))
            .and(path("/films/7/"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = HolonetClient::with_config(test_config(&server)).unwrap();
        let luke: Character = client.get(1).await.unwrap();
        let err = client
            .resolve_related::<Character, Film>(&luke)
            .await
            .unwrap_err();
        assert!(matches!(err, HolonetError::NotFound { id: 7, .. }));
    }

    #[tokio::test]
    async fn test_bad_locator_is_invalid_reference() {
        let server = MockServer::start().await;
        let base = server.uri();
        let mut raw = character_json(&base, 1, "Luke", &[]);
        raw["films"] = json!(["https://swapi.dev/api/films/"]);
        mount_json(&server, "/people/1/", raw).await;

        let client = HolonetClient::with_config(test_config(&server)).unwrap();
        let luke: Character = client.get(1).await.unwrap();
        let err = client
            .resolve_related::<Character, Film>(&luke)
            .await
            .unwrap_err();
        assert!(matches!(err, HolonetError::InvalidReference(_)));
    }

    #[tokio::test]
    async fn test_resolve_full_homeworld() {
        let server = MockServer::start().await;
        let base = server.uri();
        mount_json(&server, "/people/1/", character_json(&base, 1, "Luke", &[])).await;
        mount_json(
            &server,
            "/planets/1/",
            json!({
                "name": "Tatooine",
                "rotation_period": "23",
                "orbital_period": "304",
                "diameter": "10465",
                "climate": "arid",
                "gravity": "1 standard",
                "terrain": "desert",
                "surface_water": "1",
                "population": "200000",
                "residents": [format!("{base}/people/1/")],
                "films": [],
                "url": format!("{base}/planets/1/")
            }),
        )
        .await;

        let client = HolonetClient::with_config(test_config(&server)).unwrap();
        let luke: Character = client.get(1).await.unwrap();
        let planets = client.resolve_full::<Character, Planet>(&luke).await.unwrap();
        assert_eq!(planets.len(), 1);
        assert_eq!(planets[0].id, 1);
        assert_eq!(planets[0].name, "Tatooine");

        let residents = HolonetClient::referenced_ids::<Planet, Character>(&planets[0]).unwrap();
        assert_eq!(residents, vec![1]);
    }
}

//! API route configuration.

use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use crate::handlers;
use crate::middleware::{request_id, require_api_key};
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        // Characters
        .route("/characters", get(handlers::list_characters))
        .route("/characters/:id", get(handlers::get_character))
        .route("/characters/:id/films", get(handlers::character_films))
        // Planets
        .route("/planets", get(handlers::list_planets))
        .route("/planets/:id", get(handlers::get_planet))
        .route("/planets/:id/residents", get(handlers::planet_residents))
        .route("/planets/:id/films", get(handlers::planet_films))
        // Starships
        .route("/starships", get(handlers::list_starships))
        .route("/starships/:id", get(handlers::get_starship))
        .route("/starships/:id/pilots", get(handlers::starship_pilots))
        .route("/starships/:id/films", get(handlers::starship_films))
        // Films
        .route("/films", get(handlers::list_films))
        .route("/films/:id", get(handlers::get_film))
        .route("/films/:id/characters", get(handlers::film_characters))
        .route("/films/:id/planets", get(handlers::film_planets))
        .route("/films/:id/starships", get(handlers::film_starships))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .merge(protected)
        .layer(middleware::from_fn(request_id))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use holonet_client::ClientConfig;

    use crate::state::ApiConfig;

    const KEY: &str = "test-key";

    fn test_app(server: &MockServer) -> Router {
        let config = ApiConfig {
            api_key: KEY.into(),
            cors_origins: vec![],
            client: ClientConfig::new(server.uri())
                .with_timeout_seconds(0.2)
                .with_backoff_ms(5)
                .with_max_retries(2)
                .with_requests_per_second(1000.0),
        };
        create_router(Arc::new(AppState::new(config).unwrap()))
    }

    async fn get_path(app: Router, uri: &str, key: Option<&str>) -> Response {
        let mut request = Request::builder().uri(uri);
        if let Some(key) = key {
            request = request.header("X-API-Key", key);
        }
        app.oneshot(request.body(Body::empty()).unwrap()).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn character(base: &str, id: u64, name: &str, gender: &str, height: &str) -> Value {
        json!({
            "name": name,
            "height": height,
            "mass": "77",
            "hair_color": "blond",
            "skin_color": "fair",
            "eye_color": "blue",
            "birth_year": "19BBY",
            "gender": gender,
            "homeworld": format!("{base}/planets/1/"),
            "films": [format!("{base}/films/1/")],
            "species": [],
            "vehicles": [],
            "starships": [],
            "url": format!("{base}/people/{id}/")
        })
    }

    fn film(base: &str, id: u64, characters: &[u64]) -> Value {
        json!({
            "title": format!("Film {id}"),
            "episode_id": id + 3,
            "opening_crawl": "...",
            "director": "George Lucas",
            "producer": "Gary Kurtz, Rick McCallum",
            "release_date": "1977-05-25",
            "characters": characters.iter().map(|c| format!("{base}/people/{c}/")).collect::<Vec<_>>(),
            "planets": [format!("{base}/planets/1/")],
            "starships": [],
            "vehicles": [],
            "species": [],
            "url": format!("{base}/films/{id}/")
        })
    }

    fn tatooine(base: &str) -> Value {
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
            "films": [format!("{base}/films/1/")],
            "url": format!("{base}/planets/1/")
        })
    }

    async fn mount(server: &MockServer, at: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(at))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    async fn mount_people_listing(server: &MockServer) {
        let base = server.uri();
        let results = vec![
            character(&base, 1, "Luke Skywalker", "male", "172"),
            character(&base, 2, "Leia Organa", "female", "150"),
            character(&base, 3, "R2-D2", "n/a", "96"),
            character(&base, 4, "Unknown Trooper", "male", "unknown"),
        ];
        Mock::given(method("GET"))
            .and(path("/people/"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 4,
                "next": null,
                "previous": null,
                "results": results
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_health_check_needs_no_key() {
        let server = MockServer::start().await;
        let response = get_path(test_app(&server), "/health", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let request_id = response.headers().get("x-request-id").unwrap();
        assert_eq!(request_id.len(), 8);

        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["cache"]["total_entries"], 0);
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let server = MockServer::start().await;
        let response = get_path(test_app(&server), "/characters/1", None).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key("x-request-id"));
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Missing X-API-Key header");
    }

    #[tokio::test]
    async fn test_invalid_api_key() {
        let server = MockServer::start().await;
        let response = get_path(test_app(&server), "/films", Some("wrong")).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
        assert_eq!(body["error"]["message"], "Invalid API key");
    }

    #[tokio::test]
    async fn test_get_character() {
        let server = MockServer::start().await;
        let base = server.uri();
        mount(&server, "/people/1/", character(&base, 1, "Luke Skywalker", "male", "172")).await;

        let response = get_path(test_app(&server), "/characters/1", Some(KEY)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["name"], "Luke Skywalker");
        assert_eq!(body["homeworld_url"], format!("{base}/planets/1/"));
        assert!(body.get("homeworld").is_none());
    }

    #[tokio::test]
    async fn test_get_character_with_homeworld() {
        let server = MockServer::start().await;
        let base = server.uri();
        mount(&server, "/people/1/", character(&base, 1, "Luke Skywalker", "male", "172")).await;
        mount(&server, "/planets/1/", tatooine(&base)).await;

        let response = get_path(
            test_app(&server),
            "/characters/1?include_homeworld=true",
            Some(KEY),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["homeworld"]["id"], 1);
        assert_eq!(body["homeworld"]["name"], "Tatooine");
    }

    #[tokio::test]
    async fn test_upstream_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/people/999/"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let response = get_path(test_app(&server), "/characters/999", Some(KEY)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "Character with id 999 not found");
        assert!(body["error"].get("request_id").is_none());
    }

    #[tokio::test]
    async fn test_upstream_failure_carries_request_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let response = get_path(test_app(&server), "/planets/1", Some(KEY)).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let header = response
            .headers()
            .get("x-request-id")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let body = body_json(response).await;
        assert_eq!(body["error"]["request_id"], header.as_str());
    }

    #[tokio::test]
    async fn test_upstream_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(600)))
            .mount(&server)
            .await;

        let response = get_path(test_app(&server), "/starships/9", Some(KEY)).await;
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "UPSTREAM_TIMEOUT");
        assert_eq!(
            body["error"]["message"],
            "Upstream request timed out after 2 attempts"
        );
    }

    #[tokio::test]
    async fn test_non_numeric_id() {
        let server = MockServer::start().await;
        let response = get_path(test_app(&server), "/films/abc", Some(KEY)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_characters_filter_and_sort() {
        let server = MockServer::start().await;
        mount_people_listing(&server).await;

        let response = get_path(
            test_app(&server),
            "/characters?gender=male&sort_by=height&order=desc",
            Some(KEY),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["count"], 2);
        assert_eq!(body["page"], 1);
        assert_eq!(body["total_pages"], 1);
        let names: Vec<&str> = body["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Luke Skywalker", "Unknown Trooper"]);
    }

    #[tokio::test]
    async fn test_list_page_out_of_range_is_empty() {
        let server = MockServer::start().await;
        mount_people_listing(&server).await;

        let response = get_path(test_app(&server), "/characters?page=999", Some(KEY)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["count"], 4);
        assert!(body["results"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_page_zero_is_rejected() {
        let server = MockServer::start().await;
        let response = get_path(test_app(&server), "/characters?page=0", Some(KEY)).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_unknown_sort_field_is_rejected() {
        let server = MockServer::start().await;
        let response =
            get_path(test_app(&server), "/characters?sort_by=gender", Some(KEY)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_list_characters_by_film() {
        let server = MockServer::start().await;
        let base = server.uri();
        mount_people_listing(&server).await;
        mount(&server, "/films/1/", film(&base, 1, &[3, 1])).await;

        let response = get_path(test_app(&server), "/characters?film_id=1", Some(KEY)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let ids: Vec<u64> = body["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_u64().unwrap())
            .collect();
        // Default sort is by name: "Luke Skywalker" < "R2-D2".
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_film_characters_in_locator_order() {
        let server = MockServer::start().await;
        let base = server.uri();
        mount(&server, "/films/1/", film(&base, 1, &[2, 1])).await;
        mount(&server, "/people/1/", character(&base, 1, "Luke Skywalker", "male", "172")).await;
        mount(&server, "/people/2/", character(&base, 2, "Leia Organa", "female", "150")).await;

        let response = get_path(test_app(&server), "/films/1/characters", Some(KEY)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Leia Organa", "Luke Skywalker"]);
    }

    #[tokio::test]
    async fn test_planet_residents() {
        let server = MockServer::start().await;
        let base = server.uri();
        mount(&server, "/planets/1/", tatooine(&base)).await;
        mount(&server, "/people/1/", character(&base, 1, "Luke Skywalker", "male", "172")).await;

        let response = get_path(test_app(&server), "/planets/1/residents", Some(KEY)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body[0]["id"], 1);
        assert_eq!(body[0]["gender"], "male");
    }
}

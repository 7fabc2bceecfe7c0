//! # Holonet API Server
//!
//! REST facade over the upstream Star Wars catalog: listings with search,
//! filters, sorting and pagination, single entities, and their relations.
//!
//! ## Endpoints
//!
//! - `GET /health` - Liveness and cache statistics (no API key)
//! - `GET /characters`, `/planets`, `/starships`, `/films` - Paginated listings
//! - `GET /characters/:id` - One character, optionally with its homeworld
//! - `GET /films/:id/characters` - Characters of a film (and the other relations)
//!
//! Everything except `/` and `/health` requires the `X-API-Key` header.
//!
//! ## Example
//!
//! ```rust,ignore
//! use holonet_api::{ApiConfig, ApiServer};
//!
//! let server = ApiServer::new(ApiConfig::from_env()?)?;
//! server.run(([0, 0, 0, 0], 8000)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod dto;
mod error;
mod extract;
mod handlers;
mod middleware;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{ApiConfig, AppState};

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use holonet_core::error::Result;

/// API server for Holonet.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server with the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self> {
        Ok(Self {
            state: Arc::new(AppState::new(config)?),
        })
    }

    /// Creates the router with all routes and layers configured.
    pub fn router(&self) -> Router {
        let origins: Vec<HeaderValue> = self
            .state
            .config
            .cors_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();

        // Credentials rule out wildcards, so methods and headers are mirrored.
        let cors = CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_credentials(true)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .expose_headers([HeaderName::from_static(middleware::REQUEST_ID_HEADER)]);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address until the process ends.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        self.run_until(addr, std::future::pending()).await
    }

    /// Runs the server until `shutdown` completes, then drains connections.
    pub async fn run_until(
        self,
        addr: impl Into<SocketAddr>,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!(
            %addr,
            upstream = %self.state.config.client.base_url,
            "Holonet API server listening"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Holonet API server stopped");
        Ok(())
    }
}

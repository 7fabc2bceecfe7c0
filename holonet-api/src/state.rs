//! App state and configuration.

use std::str::FromStr;
use std::time::Instant;

use holonet_client::{ClientConfig, HolonetClient};
use holonet_core::error::{HolonetError, Result};

/// Shared API key accepted when none is configured.
pub const DEFAULT_API_KEY: &str = "dev-key-change-me";

/// Browser origins allowed when none are configured.
pub const DEFAULT_CORS_ORIGINS: [&str; 3] = [
    "http://localhost:5173",
    "http://localhost:5175",
    "http://localhost:3000",
];

/// API server configuration.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Value every protected request must send in `X-API-Key`
    pub api_key: String,
    /// Allowed CORS origins
    pub cors_origins: Vec<String>,
    /// Upstream access settings
    pub client: ClientConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: DEFAULT_API_KEY.into(),
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
            client: ClientConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Loads `.env` if present, then reads the environment.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable source. Unset variables keep their
    /// defaults; set but unparsable ones are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = ApiConfig::default();
        let client = defaults.client;

        let client = ClientConfig {
            base_url: lookup("SWAPI_BASE_URL").unwrap_or(client.base_url),
            timeout_seconds: parse_var(&lookup, "SWAPI_TIMEOUT", client.timeout_seconds)?,
            max_retries: parse_var(&lookup, "SWAPI_MAX_RETRIES", client.max_retries)?,
            backoff_ms: parse_var(&lookup, "SWAPI_BACKOFF_MS", client.backoff_ms)?,
            cache_ttl_seconds: parse_var(&lookup, "CACHE_TTL_SECONDS", client.cache_ttl_seconds)?,
            requests_per_second: parse_var(
                &lookup,
                "RATE_LIMIT_REQUESTS_PER_SECOND",
                client.requests_per_second,
            )?,
            page_size: client.page_size,
        };
        client.validate()?;

        let cors_origins = match lookup("CORS_ORIGINS") {
            Some(raw) => parse_origins(&raw)?,
            None => defaults.cors_origins,
        };

        Ok(Self {
            api_key: lookup("API_KEY").unwrap_or(defaults.api_key),
            cors_origins,
            client,
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T> {
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| HolonetError::Config(format!("{name} has an invalid value: {raw}"))),
    }
}

/// Accepts a JSON array or a comma-separated list.
fn parse_origins(raw: &str) -> Result<Vec<String>> {
    let raw = raw.trim();
    if raw.starts_with('[') {
        return serde_json::from_str(raw)
            .map_err(|e| HolonetError::Config(format!("CORS_ORIGINS is not a JSON list: {e}")));
    }
    Ok(raw
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect())
}

/// State shared by every handler.
pub struct AppState {
    /// Configuration
    pub config: ApiConfig,
    /// The one upstream client: one cache, one rate limiter
    pub client: HolonetClient,
    /// Process start, for uptime
    pub started_at: Instant,
}

impl AppState {
    /// Builds the state and its upstream client.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = HolonetClient::with_config(config.client.clone())?;
        Ok(Self {
            config,
            client,
            started_at: Instant::now(),
        })
    }
}

//! Retrying upstream fetcher.
//!
//! Cache lookup, rate limiting, the HTTP call itself and the retry loop live
//! here. Higher-level operations in [`crate::HolonetClient`] only ever go
//! through [`Fetcher::fetch`].

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::{Position, Url};

use holonet_cache::TtlCache;
use holonet_core::error::{HolonetError, Result};
use holonet_core::types::{EntityId, EntityKind};

use crate::config::ClientConfig;
use crate::rate_limit::RateLimiter;

/// One upstream resource.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Endpoint<'a> {
    /// A single entity, e.g. `/people/1/`
    Entity { kind: EntityKind, id: EntityId },
    /// One page of a listing, e.g. `/people/?page=2&search=sky`
    Page {
        kind: EntityKind,
        page: u32,
        search: Option<&'a str>,
    },
}

impl Endpoint<'_> {
    /// Absolute upstream URL under `base`.
    fn url(&self, base: &str) -> Result<Url> {
        let path = match self {
            Endpoint::Entity { kind, id } => kind.entity_path(*id),
            Endpoint::Page { kind, .. } => kind.listing_path(),
        };
        let mut url = Url::parse(&format!("{}{}", base.trim_end_matches('/'), path))
            .map_err(|e| HolonetError::Config(format!("invalid upstream base URL {base}: {e}")))?;

        if let Endpoint::Page { page, search, .. } = self {
            let mut query = url.query_pairs_mut();
            query.append_pair("page", &page.to_string());
            if let Some(search) = search {
                query.append_pair("search", search);
            }
        }
        Ok(url)
    }

    /// Error for a 404 on this endpoint.
    fn not_found(&self) -> HolonetError {
        match *self {
            Endpoint::Entity { kind, id } => HolonetError::NotFound { kind, id },
            Endpoint::Page { kind, page, .. } => HolonetError::PageNotFound { kind, page },
        }
    }
}

/// Cache key of an upstream URL: its path and query.
fn cache_key(url: &Url) -> String {
    url[Position::BeforePath..].to_string()
}

/// Maps a transport failure to the retry taxonomy.
fn classify(url: &Url, err: reqwest::Error) -> HolonetError {
    if err.is_timeout() || err.is_connect() {
        HolonetError::ConnectionTimeout(format!("{url}: {err}"))
    } else {
        HolonetError::Upstream(format!("{url}: {err}"))
    }
}

/// Shared fetch machinery: HTTP client, cache and limiter.
pub(crate) struct Fetcher {
    pub(crate) config: ClientConfig,
    pub(crate) cache: TtlCache<Value>,
    http: reqwest::Client,
    limiter: RateLimiter,
}

impl Fetcher {
    pub(crate) fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        Url::parse(&config.base_url).map_err(|e| {
            HolonetError::Config(format!("invalid upstream base URL {}: {e}", config.base_url))
        })?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| HolonetError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            cache: TtlCache::new(Duration::from_secs(config.cache_ttl_seconds)),
            limiter: RateLimiter::new(config.requests_per_second),
            http,
            config,
        })
    }

    /// Fetches an endpoint and decodes its body with `decode`.
    ///
    /// Cache hits skip the network entirely. Timeouts and connection
    /// failures are retried with exponential backoff; 404, 429 and every
    /// other failure are final. A body that `decode` rejects is an upstream
    /// error. Only bodies that decoded are cached.
    #[instrument(skip(self, decode))]
    pub(crate) async fn fetch<T>(
        &self,
        endpoint: Endpoint<'_>,
        decode: impl Fn(&Value) -> Result<T>,
    ) -> Result<T> {
        let url = endpoint.url(&self.config.base_url)?;
        let key = cache_key(&url);
        let malformed =
            |err: HolonetError| HolonetError::Upstream(format!("malformed body from {url}: {err}"));

        if let Some(raw) = self.cache.get(&key) {
            debug!(key, "Cache hit");
            return decode(&raw).map_err(malformed);
        }
        debug!(key, "Cache miss, fetching");

        let max_attempts = self.config.max_retries.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            self.limiter.acquire().await;

            match self.request(&url, &endpoint).await {
                Ok(raw) => {
                    let value = decode(&raw).map_err(malformed)?;
                    self.cache.set(key, raw);
                    return Ok(value);
                }
                Err(err) if err.is_recoverable() => {
                    if attempt >= max_attempts {
                        warn!(%url, attempt, "Giving up on upstream");
                        return Err(HolonetError::TimedOut { attempts: attempt });
                    }
                    let delay = self.config.backoff_for(attempt);
                    warn!(
                        %url,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Upstream attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// One HTTP round trip, without retries.
    async fn request(&self, url: &Url, endpoint: &Endpoint<'_>) -> Result<Value> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(endpoint.not_found()),
            StatusCode::TOO_MANY_REQUESTS => return Err(HolonetError::RateLimited),
            status if !status.is_success() => {
                return Err(HolonetError::Upstream(format!(
                    "unexpected status {status} from {url}"
                )))
            }
            _ => {}
        }

        let body = response.bytes().await.map_err(|e| classify(url, e))?;
        serde_json::from_slice(&body)
            .map_err(|e| HolonetError::Upstream(format!("malformed body from {url}: {e}")))
    }
}

//! High-level upstream client.

use futures::future::try_join_all;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument};

use holonet_cache::CacheStats;
use holonet_core::error::{HolonetError, Result};
use holonet_core::traits::{Record, Resource};
use holonet_core::types::{EntityId, EntityKind, UpstreamPage};

use crate::config::ClientConfig;
use crate::fetcher::{Endpoint, Fetcher};

/// Cached, rate-limited client for the upstream catalog.
///
/// One instance owns the cache and the limiter; share it (behind an `Arc`)
/// between every task that talks to the upstream.
///
/// # Example
///
/// ```rust,ignore
/// let client = HolonetClient::new()?;
/// let luke: Character = client.get(1).await?;
/// let films = client.resolve_related::<Character, Film>(&luke).await?;
/// ```
pub struct HolonetClient {
    fetcher: Fetcher,
}

impl HolonetClient {
    /// Creates a client with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client with custom configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        info!(
            base_url = %config.base_url,
            rate = config.requests_per_second,
            ttl = config.cache_ttl_seconds,
            "Creating upstream client"
        );
        Ok(Self {
            fetcher: Fetcher::new(config)?,
        })
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &ClientConfig {
        &self.fetcher.config
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // RAW ACCESS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Fetches one entity as raw JSON. The body must be a JSON object.
    pub async fn fetch_one(&self, kind: EntityKind, id: EntityId) -> Result<Value> {
        self.fetcher
            .fetch(Endpoint::Entity { kind, id }, |raw| {
                if raw.is_object() {
                    Ok(raw.clone())
                } else {
                    Err(HolonetError::Upstream(format!("expected a {kind} object")))
                }
            })
            .await
    }

    /// Fetches one entity and decodes it as `T` before anything is cached.
    pub(crate) async fn fetch_record<T: Record>(
        &self,
        kind: EntityKind,
        id: EntityId,
    ) -> Result<T> {
        self.fetcher
            .fetch(Endpoint::Entity { kind, id }, |raw| T::from_raw(id, raw))
            .await
    }

    /// Fetches one page of a listing. An empty search counts as no search.
    pub async fn fetch_page(
        &self,
        kind: EntityKind,
        page: u32,
        search: Option<&str>,
    ) -> Result<UpstreamPage> {
        let search = search.filter(|s| !s.is_empty());
        self.fetcher
            .fetch(Endpoint::Page { kind, page, search }, |raw| {
                Ok(UpstreamPage::deserialize(raw)?)
            })
            .await
    }

    /// Fetches every item of a listing, in upstream order.
    ///
    /// Page 1 tells how many pages exist; the rest are fetched concurrently
    /// and appended in page order. Any failed page fails the whole call and
    /// nothing is cached.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self, kind: EntityKind, search: Option<&str>) -> Result<Vec<Value>> {
        let search = search.filter(|s| !s.is_empty());
        let key = format!("all_{}:{}", kind.path(), search.unwrap_or_default());

        if let Some(Value::Array(items)) = self.fetcher.cache.get(&key) {
            debug!(key, count = items.len(), "Collection cache hit");
            return Ok(items);
        }

        let first = self.fetch_page(kind, 1, search).await?;
        let page_size = self.config().page_size.max(1) as u64;
        let total_pages = first.count.div_ceil(page_size);
        let total_pages = u32::try_from(total_pages).map_err(|_| {
            HolonetError::Upstream(format!("implausible item count {} for {kind}", first.count))
        })?;

        let mut items = first.results;
        if total_pages > 1 {
            debug!(%kind, total_pages, "Fetching remaining pages");
            let rest = try_join_all(
                (2..=total_pages).map(|page| self.fetch_page(kind, page, search)),
            )
            .await?;
            for page in rest {
                items.extend(page.results);
            }
        }

        info!(%kind, count = items.len(), "Fetched full collection");
        self.fetcher.cache.set(key, Value::Array(items.clone()));
        Ok(items)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // TYPED ACCESS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Fetches and decodes one full entity.
    pub async fn get<T: Resource>(&self, id: EntityId) -> Result<T> {
        self.fetch_record(T::KIND, id).await
    }

    /// Fetches a full collection and projects it to summaries.
    pub async fn all<T: Resource>(&self, search: Option<&str>) -> Result<Vec<T::Summary>> {
        let items = self.fetch_all(T::KIND, search).await?;
        items
            .iter()
            .map(T::Summary::from_listing_item)
            .collect::<Result<_>>()
            .map_err(|e| {
                HolonetError::Upstream(format!("malformed {} listing item: {e}", T::KIND))
            })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CACHE
    // ═══════════════════════════════════════════════════════════════════════════

    /// Drops every cached response and collection.
    pub fn clear_cache(&self) {
        self.fetcher.cache.clear();
    }

    /// Cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.fetcher.cache.stats()
    }
}

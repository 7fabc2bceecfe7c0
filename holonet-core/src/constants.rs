//! Upstream defaults and sizes for Holonet.
//!
//! Every tunable here has a matching setting in the client or API config;
//! these are only the values used when nothing is configured.

// ═══════════════════════════════════════════════════════════════════════════════
// UPSTREAM
// ═══════════════════════════════════════════════════════════════════════════════

/// Default upstream base address.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://swapi.dev/api";

/// Number of items the upstream returns per listing page.
pub const UPSTREAM_PAGE_SIZE: usize = 10;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: f64 = 10.0;

/// Default number of attempts for a single upstream fetch.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default backoff unit in milliseconds (attempt n sleeps `2^(n-1)` units).
pub const DEFAULT_BACKOFF_MS: u64 = 1000;

/// Default outbound rate in requests per second.
/// The upstream allows 10k requests a day, so stay conservative.
pub const DEFAULT_REQUESTS_PER_SECOND: f64 = 5.0;

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE
// ═══════════════════════════════════════════════════════════════════════════════

/// Default cache time-to-live in seconds.
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;

// ═══════════════════════════════════════════════════════════════════════════════
// RESPONSES
// ═══════════════════════════════════════════════════════════════════════════════

/// Page size of the lists served to our own clients.
pub const RESPONSE_PAGE_SIZE: usize = 10;

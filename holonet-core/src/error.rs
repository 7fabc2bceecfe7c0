//! Error types for Holonet.
//!
//! One `thiserror` enum covers the whole access layer. Each variant carries
//! enough context (kind, id, attempt count) to build an actionable message.

use thiserror::Error;

use crate::types::EntityKind;

/// Result type alias using `HolonetError`.
pub type Result<T> = std::result::Result<T, HolonetError>;

/// Main error type for all Holonet operations.
#[derive(Debug, Error)]
pub enum HolonetError {
    // ═══════════════════════════════════════════════════════════════════════════
    // UPSTREAM OUTCOMES
    // ═══════════════════════════════════════════════════════════════════════════

    /// The upstream has no entity with this identifier.
    #[error("{} with id {id} not found", .kind.label_capitalized())]
    NotFound {
        /// Kind of the missing entity
        kind: EntityKind,
        /// Identifier that was requested
        id: u64,
    },

    /// The upstream listing has no such page.
    #[error("{} page {page} not found", .kind.label_capitalized())]
    PageNotFound {
        /// Kind of the listing
        kind: EntityKind,
        /// Page that was requested
        page: u32,
    },

    /// The upstream throttled us.
    #[error("Upstream rate limit exceeded. Please try again later.")]
    RateLimited,

    /// Every attempt timed out or could not connect.
    #[error("Upstream request timed out after {attempts} attempts")]
    TimedOut {
        /// Attempts made before giving up
        attempts: u32,
    },

    /// Unexpected upstream behavior (status, body).
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// A single attempt failed in a way worth retrying.
    ///
    /// Only lives inside the retry loop; callers see [`HolonetError::TimedOut`].
    #[error("Connection timeout: {0}")]
    ConnectionTimeout(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // DATA ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A reference locator has no trailing numeric identifier.
    #[error("Could not extract id from locator: {0}")]
    InvalidReference(String),

    /// JSON did not match the expected entity shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // VALIDATION & CONFIGURATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Input validation failed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl HolonetError {
    /// Returns true if a fresh attempt might succeed.
    ///
    /// Only timeouts and unreachable upstreams qualify; 404, 429 and
    /// unexpected statuses are final.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, HolonetError::ConnectionTimeout(_))
    }

    /// Returns true if the message is safe to show to API clients verbatim.
    pub fn is_client_visible(&self) -> bool {
        matches!(
            self,
            HolonetError::NotFound { .. }
                | HolonetError::PageNotFound { .. }
                | HolonetError::RateLimited
                | HolonetError::TimedOut { .. }
        )
    }
}

//! Token-bucket rate limiter for outbound upstream requests.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

/// Token bucket shared by every upstream request of one client.
///
/// Tokens refill continuously at `rate` per second, capped at `rate`.
/// Acquisitions are serialized: the caller holding the lock also does the
/// waiting, so N back-to-back acquisitions take at least `(N-1)/rate`.
pub(crate) struct RateLimiter {
    rate: f64,
    bucket: Mutex<Bucket>,
}

impl RateLimiter {
    /// Creates a limiter allowing `rate` requests per second.
    ///
    /// `rate` must be positive; [`crate::ClientConfig::validate`] checks it.
    pub(crate) fn new(rate: f64) -> Self {
        Self {
            rate,
            bucket: Mutex::new(Bucket {
                tokens: rate.min(1.0),
                last_refill: Instant::now(),
            }),
        }
    }

    /// Waits until one request may be sent, then reserves it.
    pub(crate) async fn acquire(&self) {
        let mut bucket = self.bucket.lock().await;

        let now = Instant::now();
        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.rate).min(self.rate);
        bucket.last_refill = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            return;
        }

        let wait = Duration::from_secs_f64((1.0 - bucket.tokens) / self.rate);
        debug!(wait_ms = wait.as_millis() as u64, "Rate limit reached, waiting");
        tokio::time::sleep(wait).await;

        // The token accrued during the wait is spent right away.
        bucket.tokens = 0.0;
        bucket.last_refill = Instant::now();
    }
}

//! Per-domain request spacing.
//!
//! Every outbound request to a host waits until at least `min_delay` plus a
//! random jitter of up to 40% has passed since the previous request to the
//! same host. Hosts are tracked independently.

use rand::Rng;
use sleuth_core::{domain_of, RateLimitConfig};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Upper bound of the additive jitter, as a fraction of the base delay.
const JITTER_FRACTION: f64 = 0.4;

/// Rate limiter per domain
#[derive(Debug)]
pub struct RateLimiter {
    /// Scheduled time of the latest request per lowercase host
    last_access: Mutex<HashMap<String, Instant>>,
    min_delay: Duration,
}

impl RateLimiter {
    /// Create a limiter with the given base delay.
    #[must_use]
    pub fn new(min_delay: Duration) -> Self {
        Self {
            last_access: Mutex::new(HashMap::new()),
            min_delay,
        }
    }

    /// Create a limiter from the `[rate_limit]` config section.
    #[must_use]
    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.min_delay())
    }

    /// Base delay between two requests to the same host.
    #[must_use]
    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    /// Wait until a request to `url`'s host is allowed.
    ///
    /// URLs without a parseable host are not rate limited. The lock is only
    /// held while reserving the host's next slot, so waits for different
    /// hosts never block each other and concurrent waits for the same host
    /// queue up one delay apart.
    pub async fn wait(&self, url: &str) {
        let Some(domain) = domain_of(url) else {
            tracing::debug!("No host in {url:?}, skipping rate limit");
            return;
        };

        let delay = self.jittered_delay();
        let ready_at = {
            let mut last_access = self.last_access.lock().await;
            let now = Instant::now();
            let ready_at = last_access
                .get(&domain)
                .map_or(now, |last| (*last + delay).max(now));
            last_access.insert(domain.clone(), ready_at);
            ready_at
        };

        let remaining = ready_at.saturating_duration_since(Instant::now());
        if !remaining.is_zero() {
            tracing::debug!("Rate limiting {domain}: waiting {remaining:?}");
            tokio::time::sleep_until(ready_at).await;
        }
    }

    /// Time of the latest request issued (or reserved) for a host.
    pub async fn last_request(&self, domain: &str) -> Option<Instant> {
        self.last_access
            .lock()
            .await
            .get(&domain.to_lowercase())
            .copied()
    }

    fn jittered_delay(&self) -> Duration {
        let factor = rand::thread_rng().gen_range(0.0..=JITTER_FRACTION);
        self.min_delay + self.min_delay.mul_f64(factor)
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::from_config(&RateLimitConfig::default())
    }
}

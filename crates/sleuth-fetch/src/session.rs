use crate::cache::TtlCache;
use crate::client::{fetch_cached, FetchResult, Fetcher, HttpFetcher, RequestOptions};
use crate::error::Result;
use crate::rate_limiter::RateLimiter;
use sleuth_core::AppConfig;
use std::sync::Arc;

/// The shared fetch state of one run.
///
/// Owns the single rate limiter and cache for the process; providers borrow
/// the session instead of building their own so spacing and caching stay
/// coherent across every query.
#[derive(Clone)]
pub struct FetchSession {
    fetcher: Arc<dyn Fetcher>,
    limiter: Option<Arc<RateLimiter>>,
    cache: Option<Arc<TtlCache>>,
    use_cache: bool,
    options: RequestOptions,
}

impl FetchSession {
    /// Session with no rate limiting and no cache.
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            limiter: None,
            cache: None,
            use_cache: true,
            options: RequestOptions::default(),
        }
    }

    /// Build the full session described by the configuration.
    ///
    /// The cache is opened only when `cache.enabled` is set.
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.fetch)?;
        let mut session = Self::new(Arc::new(fetcher))
            .with_rate_limiter(Arc::new(RateLimiter::from_config(&config.rate_limit)));

        if config.cache.enabled {
            session = session.with_cache(Arc::new(TtlCache::from_config(&config.cache).await));
        }

        Ok(session)
    }

    #[must_use]
    pub fn with_rate_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.limiter = Some(limiter);
        self
    }

    #[must_use]
    pub fn with_cache(mut self, cache: Arc<TtlCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Toggle cache lookups and writes without dropping the cache.
    #[must_use]
    pub fn use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    pub fn cache(&self) -> Option<&TtlCache> {
        self.cache.as_deref()
    }

    pub fn rate_limiter(&self) -> Option<&RateLimiter> {
        self.limiter.as_deref()
    }

    /// GET `url` through the session's limiter and cache.
    pub async fn get(&self, url: &str) -> FetchResult {
        fetch_cached(
            self.fetcher.as_ref(),
            url,
            self.limiter.as_deref(),
            self.cache.as_deref(),
            self.use_cache,
            &self.options,
        )
        .await
    }
}

impl std::fmt::Debug for FetchSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchSession")
            .field("limiter", &self.limiter)
            .field("cache", &self.cache.as_ref().map(|c| c.path().to_path_buf()))
            .field("use_cache", &self.use_cache)
            .finish_non_exhaustive()
    }
}

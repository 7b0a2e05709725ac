//! HTTP fetching and the rate-limited, cached fetch wrapper.

use crate::cache::TtlCache;
use crate::error::{FetchError, Result};
use crate::rate_limiter::RateLimiter;
use crate::user_agent::UserAgentPool;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sleuth_core::FetchConfig;
use std::collections::BTreeMap;
use std::time::Duration;

/// Outcome of a single GET as seen by the extraction stage.
///
/// Both fields absent means the request failed at the transport level.
/// Serializes to the cache value shape `{ "status_code": .., "text": .. }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResult {
    /// HTTP status code, absent on transport failure
    pub status_code: Option<u16>,
    /// Response body, absent on transport failure
    #[serde(rename = "text")]
    pub body: Option<String>,
}

impl FetchResult {
    /// The collapsed transport-failure marker.
    #[must_use]
    pub fn failed() -> Self {
        Self::default()
    }

    /// Whether this is the transport-failure marker.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.status_code.is_none()
    }

    /// Whether the server answered with a 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status_code.is_some_and(|code| (200..300).contains(&code))
    }

    /// Interpret a cached value, requiring a non-empty record with at least
    /// one of the response fields.
    fn from_cached(value: &Value) -> Option<Self> {
        let record = value.as_object().filter(|record| !record.is_empty())?;
        if !record.contains_key("status_code") && !record.contains_key("text") {
            return None;
        }

        Some(Self {
            status_code: record
                .get("status_code")
                .and_then(Value::as_u64)
                .and_then(|code| u16::try_from(code).ok()),
            body: record
                .get("text")
                .and_then(Value::as_str)
                .map(ToString::to_string),
        })
    }
}

/// A response that reached the client, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl From<RawResponse> for FetchResult {
    fn from(response: RawResponse) -> Self {
        Self {
            status_code: Some(response.status),
            body: Some(response.body),
        }
    }
}

/// Per-request overrides on top of the client configuration.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Overrides the client-wide timeout
    pub timeout: Option<Duration>,
    /// Extra headers; a `User-Agent` here replaces the rotated one
    pub headers: BTreeMap<String, String>,
}

/// Performs a single GET.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url`, distinguishing transport failures by kind.
    async fn fetch(&self, url: &str, options: &RequestOptions) -> Result<RawResponse>;

    /// Fetch `url`, collapsing every transport failure into `FetchResult::failed()`.
    async fn fetch_raw(&self, url: &str, options: &RequestOptions) -> FetchResult {
        match self.fetch(url, options).await {
            Ok(response) => response.into(),
            Err(e) => {
                tracing::warn!("Fetch failed for {url}: {e}");
                FetchResult::failed()
            }
        }
    }
}

/// `reqwest`-backed fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    user_agents: UserAgentPool,
}

impl HttpFetcher {
    /// Build a fetcher from the `[fetch]` config section.
    ///
    /// # Errors
    /// Returns error if a configured header or the proxy URL is invalid, or
    /// the TLS backend cannot be initialised.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout())
            .default_headers(header_map(&config.headers)?);

        if let Some(proxy) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy).map_err(|e| FetchError::InvalidProxy {
                proxy: proxy.clone(),
                reason: e.to_string(),
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            user_agents: UserAgentPool::from_config(config),
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, options: &RequestOptions) -> Result<RawResponse> {
        let extra = header_map(&options.headers)?;

        let mut request = self.client.get(url);
        if !extra.contains_key(USER_AGENT) {
            request = request.header(USER_AGENT, self.user_agents.pick());
        }
        request = request.headers(extra);
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!("GET {url} -> {status} ({} bytes)", body.len());

        Ok(RawResponse { status, body })
    }
}

fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| FetchError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| FetchError::InvalidHeader {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

/// Cache key for a GET of `url`.
#[must_use]
pub fn cache_key(url: &str) -> String {
    format!("GET:{url}")
}

/// Fetch `url` through the optional rate limiter and cache.
///
/// The limiter is consulted before the cache, so cache hits are spaced like
/// network requests. Only responses with a status code are cached; transport
/// failures are always retried on the next call. Cache write failures are
/// logged and otherwise ignored.
pub async fn fetch_cached(
    fetcher: &dyn Fetcher,
    url: &str,
    limiter: Option<&RateLimiter>,
    cache: Option<&TtlCache>,
    use_cache: bool,
    options: &RequestOptions,
) -> FetchResult {
    if let Some(limiter) = limiter {
        limiter.wait(url).await;
    }

    let key = cache_key(url);
    let cache = cache.filter(|_| use_cache);

    if let Some(cache) = cache {
        if let Some(hit) = cache
            .get(&key)
            .await
            .as_ref()
            .and_then(FetchResult::from_cached)
        {
            tracing::debug!("Cache hit for {key}");
            return hit;
        }
        tracing::debug!("Cache miss for {key}");
    }

    let result = fetcher.fetch_raw(url, options).await;

    if let Some(cache) = cache {
        if !result.is_failure() {
            if let Err(e) = cache.set(&key, &result).await {
                tracing::warn!("Failed to cache response for {url}: {e}");
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fetch_result_cache_shape() {
        let result = FetchResult {
            status_code: Some(200),
            body: Some("<html></html>".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&result).expect("serialize result"),
            json!({"status_code": 200, "text": "<html></html>"})
        );
    }

    #[test]
    fn test_from_cached_requires_structured_record() {
        assert_eq!(FetchResult::from_cached(&json!("plain string")), None);
        assert_eq!(FetchResult::from_cached(&json!({})), None);
        assert_eq!(FetchResult::from_cached(&json!({"other": 1})), None);
        assert_eq!(
            FetchResult::from_cached(&json!({"status_code": 404, "text": null})),
            Some(FetchResult {
                status_code: Some(404),
                body: None,
            })
        );
    }

    #[test]
    fn test_success_and_failure_markers() {
        assert!(FetchResult::failed().is_failure());
        assert!(!FetchResult::failed().is_success());

        let not_found: FetchResult = RawResponse {
            status: 404,
            body: String::new(),
        }
        .into();
        assert!(!not_found.is_failure());
        assert!(!not_found.is_success());
    }

    #[test]
    fn test_cache_key() {
        assert_eq!(cache_key("https://example.com/a"), "GET:https://example.com/a");
    }

    #[test]
    fn test_invalid_header_is_rejected() {
        let mut config = FetchConfig::default();
        config
            .headers
            .insert("Bad Header".to_string(), "value".to_string());

        let err = HttpFetcher::new(&config).expect_err("header with space is invalid");
        assert!(matches!(err, FetchError::InvalidHeader { .. }));
    }

    #[test]
    fn test_invalid_proxy_is_rejected() {
        let config = FetchConfig {
            proxy: Some("::not a proxy::".to_string()),
            ..FetchConfig::default()
        };

        let err = HttpFetcher::new(&config).expect_err("proxy URL is invalid");
        assert!(matches!(err, FetchError::InvalidProxy { .. }));
    }
}

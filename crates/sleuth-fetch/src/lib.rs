//! Sleuth Fetch - polite, cached HTTP fetching.
//!
//! This crate is the only stateful part of the pipeline. It provides:
//!
//! - [`RateLimiter`]: minimum spacing (plus jitter) between requests to the same host
//! - [`TtlCache`]: JSON-file cache with read-time expiry
//! - [`Fetcher`] / [`HttpFetcher`]: single GET returning status and body
//! - [`fetch_cached`] / [`FetchSession`]: the rate-limited, cached wrapper
//!
//! Transport failures are reported through [`FetchError`] by [`Fetcher::fetch`]
//! and collapsed to [`FetchResult::failed`] by everything above it, so one
//! unreachable host never aborts a batch.
//!
//! # Example
//!
//! ```rust,ignore
//! use sleuth_core::AppConfig;
//! use sleuth_fetch::FetchSession;
//!
//! let session = FetchSession::from_config(&AppConfig::default()).await?;
//! let result = session.get("https://example.com/").await;
//! if let Some(body) = result.body {
//!     println!("{} bytes", body.len());
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]

pub mod cache;
pub mod client;
pub mod error;
pub mod rate_limiter;
pub mod session;
pub mod user_agent;

// Re-export commonly used types
pub use cache::{CacheEntry, TtlCache};
pub use client::{
    cache_key, fetch_cached, FetchResult, Fetcher, HttpFetcher, RawResponse, RequestOptions,
};
pub use error::{CacheError, CacheResult, FetchError, Result};
pub use rate_limiter::RateLimiter;
pub use session::FetchSession;
pub use user_agent::UserAgentPool;

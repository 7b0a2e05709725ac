//! Sleuth Core - Foundation crate for the Sleuth OSINT toolkit.
//!
//! This crate provides shared types, error handling and configuration
//! management that the fetch, extraction and reporting crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared types (`OrderedSet`, `Platform`, `domain_of`)
//!
//! # Example
//!
//! ```rust
//! use sleuth_core::{AppConfig, OrderedSet};
//!
//! let config = AppConfig::default();
//! assert_eq!(config.cache.ttl_secs, 86_400);
//!
//! let mut seen = OrderedSet::new();
//! seen.insert("b");
//! seen.insert("a");
//! seen.insert("b");
//! assert_eq!(seen.as_slice(), &["b", "a"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{
    AppConfig, CacheConfig, FetchConfig, HitDedupPolicy, RateLimitConfig, ReportConfig,
};
pub use error::{ConfigError, ConfigResult, Result, SleuthError};
pub use types::{domain_of, OrderedSet, Platform};

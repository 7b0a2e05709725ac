//! Configuration management for Sleuth.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. Every component receives its own section
//! through its constructor; there is no process-wide default state.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default desktop user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Cache file used when no platform cache directory is available.
pub const FALLBACK_CACHE_FILE: &str = ".sleuth_cache.json";

/// Main application configuration.
///
/// This is loaded from `~/.config/sleuth/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP client settings
    pub fetch: FetchConfig,
    /// Per-domain rate limiting
    pub rate_limit: RateLimitConfig,
    /// Response cache settings
    pub cache: CacheConfig,
    /// Aggregation and report settings
    pub report: ReportConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, falling back to defaults if
    /// the file does not exist.
    pub fn load_from(config_path: &Path) -> ConfigResult<Self> {
        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(config_path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Reads `path` when given, otherwise the default location. A platform
    /// without a config directory falls back to defaults. `lookup` resolves
    /// the following variables (normally `std::env::var`):
    /// - `SLEUTH_TIMEOUT_SECS`: request timeout
    /// - `SLEUTH_MIN_DELAY_SECS`: minimum per-domain delay
    /// - `SLEUTH_CACHE_TTL_SECS`: cache entry time-to-live
    /// - `SLEUTH_CACHE_PATH`: cache file location
    /// - `SLEUTH_PROXY`: HTTP/HTTPS proxy URL
    pub fn load_with_env<F>(path: Option<&Path>, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => match Self::load() {
                Err(ConfigError::NoConfigDir) => {
                    tracing::warn!("No config directory available, using defaults");
                    Self::default()
                }
                loaded => loaded?,
            },
        };
        config.apply_env_overrides(lookup);
        Ok(config)
    }

    /// Apply overrides from a variable lookup (normally the process environment).
    ///
    /// Values that fail to parse are ignored and the configured value is kept.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(secs) = lookup("SLEUTH_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.fetch.timeout_secs = secs;
            tracing::debug!("Override fetch.timeout_secs from env: {}", secs);
        }

        if let Some(secs) = lookup("SLEUTH_MIN_DELAY_SECS").and_then(|v| v.parse::<f64>().ok()) {
            if secs.is_finite() && secs >= 0.0 {
                self.rate_limit.min_delay_secs = secs;
                tracing::debug!("Override rate_limit.min_delay_secs from env: {}", secs);
            }
        }

        if let Some(secs) = lookup("SLEUTH_CACHE_TTL_SECS").and_then(|v| v.parse().ok()) {
            self.cache.ttl_secs = secs;
            tracing::debug!("Override cache.ttl_secs from env: {}", secs);
        }

        if let Some(path) = lookup("SLEUTH_CACHE_PATH").filter(|v| !v.is_empty()) {
            tracing::debug!("Override cache.path from env: {}", path);
            self.cache.path = Some(PathBuf::from(path));
        }

        if let Some(proxy) = lookup("SLEUTH_PROXY").filter(|v| !v.is_empty()) {
            tracing::debug!("Override fetch.proxy from env");
            self.fetch.proxy = Some(proxy);
        }
    }

    /// Save configuration to an explicit path.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, config_path: &Path) -> ConfigResult<()> {
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/sleuth/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("com", "sleuth", "sleuth").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the cache directory path.
    ///
    /// Uses XDG base directories: `~/.cache/sleuth`
    pub fn cache_dir() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("com", "sleuth", "sleuth").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.cache_dir().to_path_buf())
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User agent string
    pub user_agent: String,
    /// Extra headers sent with every request
    pub headers: BTreeMap<String, String>,
    /// Optional HTTP/HTTPS proxy URL
    pub proxy: Option<String>,
    /// Optional file with one user agent per line to rotate through
    pub user_agents_file: Option<PathBuf>,
}

impl FetchConfig {
    /// Request timeout as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 12,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: BTreeMap::new(),
            proxy: None,
            user_agents_file: None,
        }
    }
}

/// Per-domain rate limiting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Minimum delay between two requests to the same domain, in seconds
    pub min_delay_secs: f64,
}

impl RateLimitConfig {
    /// Minimum delay as a `Duration`. Negative or non-finite values map to zero.
    #[must_use]
    pub fn min_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.min_delay_secs).unwrap_or(Duration::ZERO)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            min_delay_secs: 1.5,
        }
    }
}

/// Response cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether fetches consult and populate the cache
    pub enabled: bool,
    /// Cache file location (defaults to the platform cache directory)
    pub path: Option<PathBuf>,
    /// Entry time-to-live in seconds
    pub ttl_secs: u64,
}

impl CacheConfig {
    /// Time-to-live as a `Duration`.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Resolve the cache file path.
    ///
    /// Uses the explicit path when set, then `~/.cache/sleuth/http_cache.json`,
    /// and finally a file in the working directory.
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        if let Some(path) = &self.path {
            return path.clone();
        }
        AppConfig::cache_dir().map_or_else(
            |_| PathBuf::from(FALLBACK_CACHE_FILE),
            |dir| dir.join("http_cache.json"),
        )
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
            ttl_secs: 86_400,
        }
    }
}

/// What to do with identical hits returned for different query variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitDedupPolicy {
    /// Keep every hit, preserving which query variant produced it
    #[default]
    KeepAll,
    /// Keep only the first hit per `link|title|snippet` signature
    BySignature,
}

/// Aggregation and report settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Maximum results requested from each provider per query
    pub result_limit: usize,
    /// Number of hosts listed in the top-domains ranking
    pub top_domains: usize,
    /// Number of hits listed in the top-hits ranking
    pub top_hits: usize,
    /// Cross-query hit deduplication policy
    pub hit_dedup: HitDedupPolicy,
    /// Number of query variants processed at the same time
    pub max_concurrent_queries: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            result_limit: 6,
            top_domains: 20,
            top_hits: 30,
            hit_dedup: HitDedupPolicy::KeepAll,
            max_concurrent_queries: 1,
        }
    }
}

//! TTL cache persisted as a single JSON file.
//!
//! The file maps each cache key to `{ "value": <json>, "_fetched_at": <epoch seconds> }`.
//! Entries are aged at read time: a stale entry stays on disk until the next
//! `get` for that key evicts it. Loading never fails; a missing or corrupt
//! file yields an empty cache.

use crate::error::CacheResult;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sleuth_core::CacheConfig;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::Mutex;

/// A cached value and the time it was stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Stored value
    pub value: Value,
    /// Unix epoch seconds at which the value was stored
    #[serde(rename = "_fetched_at", default)]
    pub fetched_at: f64,
}

impl CacheEntry {
    fn is_expired(&self, now: f64, ttl: Duration) -> bool {
        now - self.fetched_at > ttl.as_secs_f64()
    }
}

/// Durable key-value store with per-entry expiry.
///
/// A single async mutex guards the in-memory map together with the
/// write-through persist, so one instance never interleaves two writes.
#[derive(Debug)]
pub struct TtlCache {
    path: PathBuf,
    ttl: Duration,
    entries: Mutex<BTreeMap<String, CacheEntry>>,
}

impl TtlCache {
    /// Open the cache backed by `path`, loading existing entries eagerly.
    pub async fn open(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        let path = path.into();
        let entries = load_entries(&path).await;
        tracing::debug!(
            "Opened cache at {} with {} entries",
            path.display(),
            entries.len()
        );

        Self {
            path,
            ttl,
            entries: Mutex::new(entries),
        }
    }

    /// Open the cache described by the `[cache]` config section.
    pub async fn from_config(config: &CacheConfig) -> Self {
        Self::open(config.resolved_path(), config.ttl()).await
    }

    /// Backing file location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Maximum entry age.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get a fresh value, evicting it if it has expired.
    pub async fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock().await;
        let entry = entries.get(key)?;

        if !entry.is_expired(now_secs(), self.ttl) {
            return Some(entry.value.clone());
        }

        tracing::debug!("Cache entry expired: {key}");
        entries.remove(key);
        if let Err(e) = self.persist(&entries).await {
            tracing::warn!("Failed to persist cache eviction: {e}");
        }
        None
    }

    /// Get a fresh value and deserialize it, treating shape mismatches as absent.
    pub async fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get(key).await?;
        serde_json::from_value(value).ok()
    }

    /// Store a value stamped with the current time and persist immediately.
    ///
    /// The in-memory entry takes effect even when persisting fails.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> CacheResult<()> {
        let entry = CacheEntry {
            value: serde_json::to_value(value)?,
            fetched_at: now_secs(),
        };

        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), entry);
        self.persist(&entries).await
    }

    /// Remove one entry, returning whether it existed.
    pub async fn remove(&self, key: &str) -> CacheResult<bool> {
        let mut entries = self.entries.lock().await;
        if entries.remove(key).is_none() {
            return Ok(false);
        }
        self.persist(&entries).await?;
        Ok(true)
    }

    /// Drop every entry and delete the backing file.
    pub async fn clear(&self) -> CacheResult<()> {
        let mut entries = self.entries.lock().await;
        entries.clear();

        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Number of entries held, including stale ones not yet evicted.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Whether the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    async fn persist(&self, entries: &BTreeMap<String, CacheEntry>) -> CacheResult<()> {
        let contents = serde_json::to_vec_pretty(entries)?;
        tokio::fs::write(&self.path, contents).await?;
        Ok(())
    }
}

/// Load entries from disk, skipping malformed records.
async fn load_entries(path: &Path) -> BTreeMap<String, CacheEntry> {
    let contents = match tokio::fs::read(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return BTreeMap::new(),
        Err(e) => {
            tracing::warn!("Cache file {} unreadable, starting empty: {e}", path.display());
            return BTreeMap::new();
        }
    };

    let raw: Map<String, Value> = match serde_json::from_slice(&contents) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("Cache file {} corrupt, starting empty: {e}", path.display());
            return BTreeMap::new();
        }
    };

    raw.into_iter()
        .filter_map(|(key, record)| {
            serde_json::from_value::<CacheEntry>(record)
                .ok()
                .map(|entry| (key, entry))
        })
        .collect()
}

/// Current time as fractional Unix epoch seconds.
#[allow(clippy::cast_precision_loss)]
fn now_secs() -> f64 {
    chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

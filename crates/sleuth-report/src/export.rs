//! Saving and loading reports as JSON files.

use crate::error::{ReportError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;

static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\w\-. ]").expect("Filename regex is hardcoded and valid")
});

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Whitespace regex is hardcoded and valid"));

const MAX_FILENAME_CHARS: usize = 240;

/// Write `value` as pretty JSON, creating parent directories.
///
/// Returns the written path. Write failures are returned to the caller.
pub async fn save_json<T>(value: &T, path: impl AsRef<Path>) -> Result<PathBuf>
where
    T: Serialize + ?Sized,
{
    let path = path.as_ref().to_path_buf();
    let io_error = |source: std::io::Error| ReportError::Io {
        path: path.clone(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(io_error)?;
    }

    let json = serde_json::to_string_pretty(value)?;
    fs::write(&path, json).await.map_err(io_error)?;

    tracing::info!("Saved report to {}", path.display());
    Ok(path)
}

/// Read a JSON file, returning `None` when it is missing or does not parse.
pub async fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Option<T> {
    let path = path.as_ref();
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("Cannot read {}: {e}", path.display());
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring malformed JSON in {}: {e}", path.display());
            None
        }
    }
}

/// Lowercase, filesystem-safe version of `name`.
pub fn sanitize_filename(name: &str) -> String {
    let lowered = name.to_lowercase();
    let safe = UNSAFE_CHARS.replace_all(&lowered, "_");
    WHITESPACE
        .replace_all(&safe, "_")
        .chars()
        .take(MAX_FILENAME_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Ana López"), "ana_lópez");
        assert_eq!(sanitize_filename("a@b.com"), "a_b.com");
        assert_eq!(sanitize_filename("+1 (415) 555"), "_1__415__555");
        assert_eq!(sanitize_filename(&"x".repeat(300)).len(), MAX_FILENAME_CHARS);
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("nested").join("report.json");

        let saved = save_json(&json!({"emails": ["a@b.com"]}), &path)
            .await
            .expect("save report");
        assert_eq!(saved, path);

        let loaded: serde_json::Value = load_json(&path).await.expect("load report");
        assert_eq!(loaded["emails"][0], "a@b.com");
    }

    #[tokio::test]
    async fn test_load_missing_or_malformed_is_none() {
        let tmp = TempDir::new().expect("create temp dir");
        let missing: Option<serde_json::Value> = load_json(tmp.path().join("nope.json")).await;
        assert!(missing.is_none());

        let bad = tmp.path().join("bad.json");
        std::fs::write(&bad, "{not json").expect("write bad file");
        let malformed: Option<serde_json::Value> = load_json(&bad).await;
        assert!(malformed.is_none());
    }

    #[tokio::test]
    async fn test_save_failure_propagates() {
        let tmp = TempDir::new().expect("create temp dir");
        let blocker = tmp.path().join("file");
        std::fs::write(&blocker, "x").expect("write blocker");

        // A regular file cannot be used as a directory
        let err = save_json(&json!({}), blocker.join("report.json"))
            .await
            .expect_err("parent is a file");
        assert!(matches!(err, ReportError::Io { .. }));
    }
}

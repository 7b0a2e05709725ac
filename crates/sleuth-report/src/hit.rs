use crate::classify::Category;
use serde::{Deserialize, Deserializer, Serialize};

/// Absent and `null` text fields both read as an empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One search result, enriched with category and score during aggregation.
///
/// Providers leave `category` and `score` unset. Missing text fields from a
/// provider deserialize as absent (or empty, for `engine` and `raw`) and are
/// treated as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub engine: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub raw: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub score: Option<i32>,
}

impl Hit {
    pub fn new(engine: impl Into<String>) -> Self {
        Self {
            engine: engine.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    #[must_use]
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }

    #[must_use]
    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = raw.into();
        self
    }

    /// Placeholder recorded when a provider fails for a query.
    pub fn provider_error(engine: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::new(engine).with_raw(format!("error: {message}"))
    }

    pub fn title_str(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn link_str(&self) -> &str {
        self.link.as_deref().unwrap_or_default()
    }

    pub fn snippet_str(&self) -> &str {
        self.snippet.as_deref().unwrap_or_default()
    }

    /// Identity of a hit across query variants: `link|title|snippet`.
    pub fn signature(&self) -> String {
        format!("{}|{}|{}", self.link_str(), self.title_str(), self.snippet_str())
    }

    /// Every text field joined for entity extraction.
    pub fn extraction_text(&self) -> String {
        [self.title_str(), self.snippet_str(), self.link_str(), &self.raw]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

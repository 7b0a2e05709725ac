use serde::{Deserialize, Serialize};
use sleuth_core::OrderedSet;
use std::fmt;

/// The subject of an investigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Target {
    Email(String),
    Phone(String),
    Name(String),
}

impl Target {
    pub fn kind(&self) -> &'static str {
        match self {
            Target::Email(_) => "email",
            Target::Phone(_) => "phone",
            Target::Name(_) => "name",
        }
    }

    /// The value as given, trimmed. This is the query hits are scored against.
    pub fn value(&self) -> &str {
        match self {
            Target::Email(value) | Target::Phone(value) | Target::Name(value) => value.trim(),
        }
    }

    /// Query variants to run, deduplicated and without empty entries.
    ///
    /// - email: the address, its local part, and the quoted address
    /// - phone: the number
    /// - name: the name and its lowercase form
    pub fn queries(&self) -> Vec<String> {
        let value = self.value();
        if value.is_empty() {
            return Vec::new();
        }

        let candidates = match self {
            Target::Email(_) => vec![
                value.to_string(),
                value.split('@').next().unwrap_or_default().to_string(),
                format!("\"{value}\""),
            ],
            Target::Phone(_) => vec![value.to_string()],
            Target::Name(_) => vec![value.to_string(), value.to_lowercase()],
        };

        candidates
            .into_iter()
            .map(|query| query.trim().to_string())
            .filter(|query| !query.is_empty())
            .collect::<OrderedSet<_>>()
            .into_vec()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.value())
    }
}

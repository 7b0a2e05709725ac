use rand::seq::SliceRandom;
use sleuth_core::FetchConfig;
use std::path::Path;

/// Pool of user agents rotated across requests.
///
/// Never empty: loading falls back to the configured user agent when the
/// file is missing, unreadable, or has no non-blank lines.
#[derive(Debug, Clone)]
pub struct UserAgentPool {
    agents: Vec<String>,
}

impl UserAgentPool {
    /// Pool with a single user agent.
    pub fn single(user_agent: impl Into<String>) -> Self {
        Self {
            agents: vec![user_agent.into()],
        }
    }

    /// Load one user agent per line from `path`.
    pub fn from_file(path: &Path, fallback: &str) -> Self {
        let agents: Vec<String> = match std::fs::read_to_string(path) {
            Ok(contents) => contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(ToString::to_string)
                .collect(),
            Err(e) => {
                tracing::warn!("User agent file {} unreadable: {e}", path.display());
                Vec::new()
            }
        };

        if agents.is_empty() {
            Self::single(fallback)
        } else {
            tracing::debug!("Loaded {} user agents from {}", agents.len(), path.display());
            Self { agents }
        }
    }

    /// Build the pool from the `[fetch]` config section.
    pub fn from_config(config: &FetchConfig) -> Self {
        match &config.user_agents_file {
            Some(path) => Self::from_file(path, &config.user_agent),
            None => Self::single(config.user_agent.clone()),
        }
    }

    /// Pick a user agent uniformly at random.
    pub fn pick(&self) -> &str {
        self.agents
            .choose(&mut rand::thread_rng())
            .map_or("", String::as_str)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

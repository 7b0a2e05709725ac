//! Investigation runs: query variants through providers into one report.

use crate::aggregate::{build_report, AggregatedReport, QueryBlock};
use crate::hit::Hit;
use crate::provider::SearchProvider;
use crate::target::Target;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use sleuth_core::ReportConfig;
use sleuth_extract::extract_all;
use sleuth_fetch::FetchSession;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Everything produced by one investigation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestigationReport {
    pub target: Target,
    pub queries: Vec<String>,
    pub generated_at: DateTime<Utc>,
    pub report: AggregatedReport,
    /// The best-scored hits, at most `top_hits` of them
    pub top_hits: Vec<Hit>,
    /// Raw per-query blocks in query order
    pub blocks: Vec<QueryBlock>,
}

/// Runs a target's query variants through every provider.
///
/// A failing provider never aborts the run; its failure is recorded as a
/// placeholder hit for that query.
pub struct Investigation {
    session: FetchSession,
    providers: Vec<Arc<dyn SearchProvider>>,
    config: ReportConfig,
}

impl Investigation {
    pub fn new(session: FetchSession, config: ReportConfig) -> Self {
        Self {
            session,
            providers: Vec::new(),
            config,
        }
    }

    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn SearchProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn providers(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|provider| provider.name())
    }

    pub async fn run(&self, target: &Target) -> InvestigationReport {
        let queries = target.queries();
        let concurrency = self.config.max_concurrent_queries.max(1);
        info!(
            "Investigating {target}: {} queries, {} providers, concurrency {concurrency}",
            queries.len(),
            self.providers.len()
        );

        let blocks: Vec<QueryBlock> = stream::iter(queries.iter().cloned())
            .map(|query| self.run_query(query))
            .buffered(concurrency)
            .collect()
            .await;

        let report = build_report(&blocks, target.value(), &self.config);
        let top_hits = report.hits.iter().take(self.config.top_hits).cloned().collect();

        info!(
            "Investigation of {target} complete: {} hits, {} emails, {} phones, {} links",
            report.hits.len(),
            report.emails.len(),
            report.phones.len(),
            report.links.len()
        );

        InvestigationReport {
            target: target.clone(),
            queries,
            generated_at: Utc::now(),
            report,
            top_hits,
            blocks,
        }
    }

    async fn run_query(&self, query: String) -> QueryBlock {
        let mut hits = Vec::new();

        for provider in &self.providers {
            match provider
                .search(&query, self.config.result_limit, &self.session)
                .await
            {
                Ok(found) => {
                    debug!("{} returned {} hits for {query}", provider.name(), found.len());
                    hits.extend(found);
                }
                Err(e) => {
                    warn!("{} failed for {query}: {e}", provider.name());
                    hits.push(Hit::provider_error(provider.name(), &e));
                }
            }
        }

        let text = hits
            .iter()
            .map(Hit::extraction_text)
            .collect::<Vec<_>>()
            .join("\n");
        let entities = extract_all(&text);

        QueryBlock {
            query,
            hits,
            entities,
        }
    }
}

impl std::fmt::Debug for Investigation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Investigation")
            .field("providers", &self.providers().collect::<Vec<_>>())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

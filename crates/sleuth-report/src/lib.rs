//! Sleuth Report - classification, scoring and aggregation of search hits.
//!
//! An [`Investigation`] expands a [`Target`] into query variants, runs each
//! through every [`SearchProvider`], extracts entities per query into a
//! [`QueryBlock`] and merges the blocks with [`build_report`].
//!
//! # Example
//!
//! ```rust,ignore
//! use sleuth_core::AppConfig;
//! use sleuth_fetch::FetchSession;
//! use sleuth_report::{Investigation, PageProvider, Target};
//! use std::sync::Arc;
//!
//! let config = AppConfig::default();
//! let session = FetchSession::from_config(&config).await?;
//! let investigation = Investigation::new(session, config.report.clone())
//!     .with_provider(Arc::new(PageProvider::new(["https://example.com/?q={query}"])));
//!
//! let result = investigation.run(&Target::Email("a@b.com".into())).await;
//! println!("{} hits", result.report.hits.len());
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod aggregate;
pub mod classify;
pub mod error;
pub mod export;
pub mod hit;
pub mod investigation;
pub mod provider;
pub mod scoring;
pub mod target;

// Re-export commonly used types
pub use aggregate::{build_report, consolidate, top_domains, AggregatedReport, Consolidated, QueryBlock};
pub use classify::{classify_url, Category};
pub use error::{ReportError, Result};
pub use export::{load_json, sanitize_filename, save_json};
pub use hit::Hit;
pub use investigation::{Investigation, InvestigationReport};
pub use provider::{PageProvider, SearchProvider, QUERY_PLACEHOLDER};
pub use scoring::{score_and_classify, score_hit};
pub use target::Target;

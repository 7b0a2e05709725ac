//! Sleuth command-line application shell.
//!
//! Wires configuration, the fetch session and an investigation together.
//! Business logic lives in the `crates/` directory.

pub mod cli;
pub mod output;

pub use cli::Cli;

use anyhow::Context;
use sleuth_core::{AppConfig, SleuthError};
use sleuth_fetch::FetchSession;
use sleuth_report::{save_json, Investigation, InvestigationReport, PageProvider};
use std::sync::Arc;
use tracing::{info, warn};

/// Initialize tracing subscriber for logging
///
/// Logs go to stderr so stdout stays clean for the report.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = if verbose {
        "info,sleuth=debug"
    } else {
        "warn,sleuth=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Configuration from the `--config` file or the default location, then the
/// environment, then command-line flags.
pub fn load_config(cli: &Cli) -> sleuth_core::Result<AppConfig> {
    let mut config = AppConfig::load_with_env(cli.config.as_deref(), |name| {
        std::env::var(name).ok()
    })?;
    cli.apply(&mut config);
    Ok(config)
}

/// Resolve the target and configuration, then run the investigation.
pub async fn investigate(cli: &Cli) -> sleuth_core::Result<InvestigationReport> {
    let target = cli.target().ok_or_else(|| {
        SleuthError::Validation("one of --email, --phone or --name is required".to_string())
    })?;
    let config = load_config(cli)?;

    let session = FetchSession::from_config(&config)
        .await?
        .use_cache(!cli.no_cache);

    if cli.clear_cache {
        if let Some(cache) = session.cache() {
            if let Err(e) = cache.clear().await {
                warn!("Failed to clear cache at {}: {e}", cache.path().display());
            }
        }
    }

    if cli.urls.is_empty() {
        warn!("No --url pages given; only the query variants will be reported");
    }

    let investigation = Investigation::new(session, config.report.clone())
        .with_provider(Arc::new(PageProvider::new(cli.urls.clone())));
    Ok(investigation.run(&target).await)
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    info!("Starting Sleuth v{}", env!("CARGO_PKG_VERSION"));

    let result = investigate(&cli).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", output::render_summary(&result));
    }

    if let Some(path) = &cli.out {
        let saved = save_json(&result, path)
            .await
            .map_err(SleuthError::from)
            .with_context(|| format!("failed to save report to {}", path.display()))?;
        eprintln!("Report saved to {}", saved.display());
    }

    Ok(())
}

//! Command-line arguments.

use clap::{ArgGroup, Parser};
use sleuth_core::{AppConfig, HitDedupPolicy};
use sleuth_report::Target;
use std::path::PathBuf;

/// Sleuth - collect emails, phones, links and social profiles about a target.
#[derive(Debug, Parser)]
#[command(name = "sleuth")]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("target").required(true).args(["email", "phone", "name"])))]
pub struct Cli {
    /// Email address to investigate
    #[arg(short, long)]
    pub email: Option<String>,

    /// Phone number to investigate
    #[arg(short, long)]
    pub phone: Option<String>,

    /// Full name to investigate
    #[arg(short, long)]
    pub name: Option<String>,

    /// Page fetched for every query; `{query}` is replaced by the encoded query
    #[arg(short, long = "url", value_name = "URL")]
    pub urls: Vec<String>,

    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,

    /// Also write the JSON report to this file
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Maximum results per provider and query
    #[arg(long)]
    pub limit: Option<usize>,

    /// Query variants processed at the same time
    #[arg(long)]
    pub workers: Option<usize>,

    /// HTTP/HTTPS proxy URL
    #[arg(long, env = "SLEUTH_PROXY")]
    pub proxy: Option<String>,

    /// Cache file location
    #[arg(long, value_name = "PATH")]
    pub cache: Option<PathBuf>,

    /// Cache entry time-to-live in seconds
    #[arg(long, value_name = "SECS")]
    pub cache_ttl: Option<u64>,

    /// Minimum delay between requests to the same host, in seconds
    #[arg(long, value_name = "SECS")]
    pub min_delay: Option<f64>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Skip cache lookups and writes
    #[arg(long)]
    pub no_cache: bool,

    /// Empty the cache before running
    #[arg(long)]
    pub clear_cache: bool,

    /// Keep only one hit per link/title/snippet across query variants
    #[arg(long)]
    pub dedup_hits: bool,

    /// Configuration file path
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The single target selected on the command line.
    pub fn target(&self) -> Option<Target> {
        if let Some(email) = &self.email {
            Some(Target::Email(email.clone()))
        } else if let Some(phone) = &self.phone {
            Some(Target::Phone(phone.clone()))
        } else {
            self.name.clone().map(Target::Name)
        }
    }

    /// Apply flag overrides on top of file and environment configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(limit) = self.limit {
            config.report.result_limit = limit;
        }
        if let Some(workers) = self.workers {
            config.report.max_concurrent_queries = workers.max(1);
        }
        if let Some(proxy) = self.proxy.as_ref().filter(|p| !p.is_empty()) {
            config.fetch.proxy = Some(proxy.clone());
        }
        if let Some(path) = &self.cache {
            config.cache.path = Some(path.clone());
        }
        if let Some(ttl) = self.cache_ttl {
            config.cache.ttl_secs = ttl;
        }
        if let Some(delay) = self.min_delay.filter(|d| d.is_finite() && *d >= 0.0) {
            config.rate_limit.min_delay_secs = delay;
        }
        if let Some(timeout) = self.timeout {
            config.fetch.timeout_secs = timeout;
        }
        if self.dedup_hits {
            config.report.hit_dedup = HitDedupPolicy::BySignature;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_is_required() {
        assert!(Cli::try_parse_from(["sleuth"]).is_err());
        assert!(Cli::try_parse_from(["sleuth", "-e", "a@b.com", "-n", "Ana"]).is_err());
    }

    #[test]
    fn test_target_selection() {
        let cli = Cli::try_parse_from(["sleuth", "--phone", "+1 415 555 0100"])
            .expect("parse phone target");
        assert_eq!(cli.target(), Some(Target::Phone("+1 415 555 0100".to_string())));
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "sleuth",
            "--name",
            "Ana López",
            "--url",
            "https://a.example/?q={query}",
            "-u",
            "https://b.example/",
            "--limit",
            "3",
            "--workers",
            "0",
            "--cache",
            "/tmp/sleuth.json",
            "--cache-ttl",
            "60",
            "--min-delay",
            "0.5",
            "--dedup-hits",
        ])
        .expect("parse flags");

        let mut config = AppConfig::default();
        cli.apply(&mut config);

        assert_eq!(cli.urls.len(), 2);
        assert_eq!(config.report.result_limit, 3);
        assert_eq!(config.report.max_concurrent_queries, 1);
        assert_eq!(config.cache.path, Some(PathBuf::from("/tmp/sleuth.json")));
        assert_eq!(config.cache.ttl_secs, 60);
        assert!((config.rate_limit.min_delay_secs - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.report.hit_dedup, HitDedupPolicy::BySignature);
    }

    #[test]
    fn test_negative_delay_is_ignored() {
        let cli = Cli::try_parse_from(["sleuth", "-e", "a@b.com", "--min-delay=-1"])
            .expect("parse flags");
        let mut config = AppConfig::default();
        cli.apply(&mut config);
        assert!((config.rate_limit.min_delay_secs - 1.5).abs() < f64::EPSILON);
    }
}

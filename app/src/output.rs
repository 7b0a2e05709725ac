//! Human-readable summary of an investigation.

use sleuth_report::{Hit, InvestigationReport};
use std::fmt::Write;

/// Entries printed per entity list before eliding the rest.
const LIST_PREVIEW: usize = 10;

fn section(out: &mut String, title: &str, items: &[String]) {
    let _ = writeln!(out, "{title} ({})", items.len());
    for item in items.iter().take(LIST_PREVIEW) {
        let _ = writeln!(out, "  - {item}");
    }
    if items.len() > LIST_PREVIEW {
        let _ = writeln!(out, "  ... {} more", items.len() - LIST_PREVIEW);
    }
}

fn hit_line(hit: &Hit) -> String {
    let category = hit.category.map_or("website", |c| c.as_str());
    let title = match hit.title_str() {
        "" => hit.link_str(),
        title => title,
    };
    format!(
        "[{:>3}] {category:<9} {title} ({})",
        hit.score.unwrap_or_default(),
        hit.engine
    )
}

/// Render counts, top domains and top hits.
pub fn render_summary(result: &InvestigationReport) -> String {
    let report = &result.report;
    let mut out = String::new();

    let _ = writeln!(out, "Target: {}", result.target);
    let _ = writeln!(out, "Queries: {}", result.queries.join(" | "));
    let _ = writeln!(out);

    section(&mut out, "Emails", &report.emails);
    section(&mut out, "Phones", &report.phones);
    section(&mut out, "Usernames", &report.usernames);
    section(&mut out, "Names", &report.names);
    section(&mut out, "Links", &report.links);

    let _ = writeln!(out, "Social profiles");
    if report.social_profiles.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (platform, links) in &report.social_profiles {
        let _ = writeln!(out, "  {platform}: {}", links.join(", "));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Top domains");
    for (host, count) in &report.top_domains {
        let _ = writeln!(out, "  {count:>4}  {host}");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Top hits ({} of {})", result.top_hits.len(), report.hits.len());
    for hit in &result.top_hits {
        let _ = writeln!(out, "  {}", hit_line(hit));
    }

    out
}

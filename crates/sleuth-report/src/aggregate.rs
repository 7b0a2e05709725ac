//! Merging per-query result blocks into one report.

use crate::hit::Hit;
use crate::scoring::score_and_classify;
use serde::{Deserialize, Serialize};
use sleuth_core::{domain_of, HitDedupPolicy, OrderedSet, Platform, ReportConfig};
use sleuth_extract::EntityBundle;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Hits and entities produced by one query variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryBlock {
    pub query: String,
    pub hits: Vec<Hit>,
    pub entities: EntityBundle,
}

/// Entities unioned across blocks (sorted) and hits concatenated in block order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Consolidated {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub links: Vec<String>,
    pub usernames: Vec<String>,
    pub social_profiles: BTreeMap<Platform, Vec<String>>,
    pub names: Vec<String>,
    pub hits: Vec<Hit>,
}

/// Final report: sorted entities, ranked hits and the busiest hosts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedReport {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub links: Vec<String>,
    pub usernames: Vec<String>,
    pub social_profiles: BTreeMap<Platform, Vec<String>>,
    pub names: Vec<String>,
    pub hits: Vec<Hit>,
    /// `(host, count)` pairs, most frequent first
    pub top_domains: Vec<(String, usize)>,
}

fn union_sorted<'a>(sets: impl Iterator<Item = &'a OrderedSet<String>>) -> Vec<String> {
    sets.flatten()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Merge blocks.
///
/// Every entity list becomes the sorted union over all blocks. Hits are
/// concatenated in block order; with [`HitDedupPolicy::BySignature`] only the
/// first hit per [`Hit::signature`] survives.
pub fn consolidate(blocks: &[QueryBlock], policy: HitDedupPolicy) -> Consolidated {
    let bundles = || blocks.iter().map(|block| &block.entities);

    let mut social: BTreeMap<Platform, BTreeSet<String>> = BTreeMap::new();
    for bundle in bundles() {
        for (platform, links) in &bundle.social_profiles {
            social
                .entry(*platform)
                .or_default()
                .extend(links.iter().cloned());
        }
    }

    let mut hits: Vec<Hit> = blocks.iter().flat_map(|block| block.hits.clone()).collect();
    if policy == HitDedupPolicy::BySignature {
        let before = hits.len();
        let mut seen = OrderedSet::new();
        hits.retain(|hit| seen.insert(hit.signature()));
        tracing::debug!("Signature dedup dropped {} hits", before - hits.len());
    }

    Consolidated {
        emails: union_sorted(bundles().map(|b| &b.emails)),
        phones: union_sorted(bundles().map(|b| &b.phones)),
        links: union_sorted(bundles().map(|b| &b.links)),
        usernames: union_sorted(bundles().map(|b| &b.usernames)),
        social_profiles: social
            .into_iter()
            .map(|(platform, links)| (platform, links.into_iter().collect()))
            .collect(),
        names: union_sorted(bundles().map(|b| &b.names)),
        hits,
    }
}

/// Most frequent hosts among `links`, at most `n` of them.
///
/// Links without a parseable host count under the raw link text. Equal
/// counts keep first-seen order.
pub fn top_domains<S: AsRef<str>>(links: &[S], n: usize) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for link in links {
        let link = link.as_ref();
        let host = domain_of(link).unwrap_or_else(|| link.to_string());
        match index.get(&host) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(host.clone(), counts.len());
                counts.push((host, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(n);
    counts
}

/// Consolidate, classify, score and rank.
///
/// Hits are scored against `query`, normally the investigation's primary
/// query.
pub fn build_report(blocks: &[QueryBlock], query: &str, config: &ReportConfig) -> AggregatedReport {
    let Consolidated {
        emails,
        phones,
        links,
        usernames,
        social_profiles,
        names,
        mut hits,
    } = consolidate(blocks, config.hit_dedup);

    score_and_classify(&mut hits, query);
    let top_domains = top_domains(&links, config.top_domains);

    AggregatedReport {
        emails,
        phones,
        links,
        usernames,
        social_profiles,
        names,
        hits,
        top_domains,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleuth_extract::extract_all;

    fn block(query: &str, text: &str, hits: Vec<Hit>) -> QueryBlock {
        QueryBlock {
            query: query.to_string(),
            hits,
            entities: extract_all(text),
        }
    }

    #[test]
    fn test_entities_are_unioned_and_sorted() {
        let blocks = vec![
            block("a", "zed@x.io and amy@x.io https://github.com/zed", vec![]),
            block("b", "amy@x.io bob@x.io https://github.com/amy", vec![]),
        ];

        let merged = consolidate(&blocks, HitDedupPolicy::KeepAll);

        assert_eq!(merged.emails, vec!["amy@x.io", "bob@x.io", "zed@x.io"]);
        assert_eq!(
            merged.social_profiles[&Platform::Github],
            vec!["https://github.com/amy", "https://github.com/zed"]
        );
    }

    #[test]
    fn test_hits_kept_across_blocks_by_default() {
        let hit = Hit::new("page").with_link("https://a.example").with_title("A");
        let blocks = vec![
            block("q1", "", vec![hit.clone()]),
            block("q2", "", vec![hit.clone()]),
        ];

        assert_eq!(consolidate(&blocks, HitDedupPolicy::KeepAll).hits.len(), 2);
        assert_eq!(
            consolidate(&blocks, HitDedupPolicy::BySignature).hits,
            vec![hit]
        );
    }

    #[test]
    fn test_top_domains_ties_keep_first_seen_order() {
        let links = [
            "https://b.example/1",
            "https://a.example/1",
            "https://a.example/2",
            "https://b.example/2",
            "https://c.example/",
            "garbage",
        ];

        assert_eq!(
            top_domains(&links, 3),
            vec![
                ("b.example".to_string(), 2),
                ("a.example".to_string(), 2),
                ("c.example".to_string(), 1),
            ]
        );
        assert_eq!(top_domains(&links, 10).last(), Some(&("garbage".to_string(), 1)));
    }

    #[test]
    fn test_build_report_ranks_hits() {
        let blocks = vec![block(
            "ana",
            "",
            vec![
                Hit::new("page").with_link("https://example.org/").with_raw("nothing"),
                Hit::new("page").with_link("https://github.com/ana").with_raw("ana here"),
            ],
        )];

        let report = build_report(&blocks, "ana", &ReportConfig::default());

        assert_eq!(report.hits[0].link_str(), "https://github.com/ana");
        assert_eq!(report.hits[0].score, Some(7));
        assert_eq!(report.hits[1].score, Some(0));
    }

    #[test]
    fn test_report_json_shape() {
        let blocks = vec![block("q", "a@b.com https://x.com/a", vec![])];
        let report = build_report(&blocks, "q", &ReportConfig::default());
        let json = serde_json::to_value(&report).expect("serialize report");

        assert_eq!(json["emails"], serde_json::json!(["a@b.com"]));
        assert_eq!(json["socialProfiles"]["twitter"], serde_json::json!(["https://x.com/a"]));
        assert_eq!(json["topDomains"], serde_json::json!([["x.com", 1]]));
    }
}

//! Relevance scoring of hits against the query that produced them.

use crate::classify::classify_url;
use crate::hit::Hit;

const RAW_MATCH: i32 = 3;
const LINK_MATCH: i32 = 4;
const ERROR_PENALTY: i32 = -2;

/// Query with every double quote removed, trimmed and case-folded.
fn normalize_query(query: &str) -> String {
    query.replace('"', "").trim().to_lowercase()
}

/// Score one hit.
///
/// `+3` when the query appears in the raw text, `+4` when it appears in the
/// link, `-2` when the raw text contains "error" anywhere, case-insensitively.
/// An empty query only
/// contributes the penalty.
pub fn score_hit(raw: &str, query: &str, link: &str) -> i32 {
    let query = normalize_query(query);
    let raw = raw.to_lowercase();
    let mut score = 0;

    if !query.is_empty() {
        if raw.contains(&query) {
            score += RAW_MATCH;
        }
        if link.to_lowercase().contains(&query) {
            score += LINK_MATCH;
        }
    }

    if raw.contains("error") {
        score += ERROR_PENALTY;
    }

    score
}

/// Set category and score on every hit, then order by descending score.
///
/// The sort is stable: equally scored hits keep their input order.
pub fn score_and_classify(hits: &mut [Hit], query: &str) {
    for hit in hits.iter_mut() {
        hit.category = Some(classify_url(hit.link_str()));
        hit.score = Some(score_hit(&hit.raw, query, hit.link_str()));
    }

    hits.sort_by_key(|hit| std::cmp::Reverse(hit.score.unwrap_or_default()));
}

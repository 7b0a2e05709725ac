//! The combined extraction result.

use crate::entities::{emails_in, links_in, names_in, phones_in, usernames_in};
use crate::html::visible_text;
use crate::social::extract_social_profiles;
use serde::{Deserialize, Serialize};
use sleuth_core::{OrderedSet, Platform};
use std::collections::BTreeMap;

/// Every entity found in one piece of text, each list in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityBundle {
    pub emails: OrderedSet<String>,
    pub phones: OrderedSet<String>,
    pub links: OrderedSet<String>,
    /// Lowercased
    pub usernames: OrderedSet<String>,
    /// Only platforms with at least one link
    pub social_profiles: BTreeMap<Platform, OrderedSet<String>>,
    pub names: OrderedSet<String>,
}

impl EntityBundle {
    /// Whether nothing at all was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
            && self.phones.is_empty()
            && self.links.is_empty()
            && self.usernames.is_empty()
            && self.social_profiles.is_empty()
            && self.names.is_empty()
    }

    /// Total number of entities across every category.
    #[must_use]
    pub fn total(&self) -> usize {
        self.emails.len()
            + self.phones.len()
            + self.links.len()
            + self.usernames.len()
            + self.social_profiles.values().map(OrderedSet::len).sum::<usize>()
            + self.names.len()
    }
}

/// Run every extractor over `text`.
///
/// The input is reduced to visible text once; links and social profiles are
/// taken from the original input.
#[must_use]
pub fn extract_all(text: &str) -> EntityBundle {
    if text.trim().is_empty() {
        return EntityBundle::default();
    }

    let plain = visible_text(text);
    let links = links_in(text);
    let social_profiles = extract_social_profiles(&links);

    let bundle = EntityBundle {
        emails: emails_in(&plain),
        phones: phones_in(&plain),
        usernames: usernames_in(&plain),
        names: names_in(&plain),
        social_profiles,
        links,
    };

    tracing::trace!(
        "Extracted {} emails, {} phones, {} links, {} usernames, {} names",
        bundle.emails.len(),
        bundle.phones.len(),
        bundle.links.len(),
        bundle.usernames.len(),
        bundle.names.len()
    );

    bundle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_all_contact_line() {
        let bundle = extract_all(
            "Contact: a@b.com, call +1 415-555-0100, see https://instagram.com/a_b",
        );

        assert_eq!(bundle.emails.as_slice(), &["a@b.com"]);
        assert_eq!(bundle.phones.as_slice(), &["+14155550100"]);
        assert_eq!(bundle.links.as_slice(), &["https://instagram.com/a_b"]);
        assert_eq!(bundle.social_profiles.len(), 1);
        assert_eq!(
            bundle.social_profiles[&Platform::Instagram].as_slice(),
            &["https://instagram.com/a_b"]
        );
    }

    #[test]
    fn test_facebook_profile_stays_in_links_only() {
        let bundle = extract_all("https://facebook.com/profile/123 https://youtu.be/abc");

        assert_eq!(
            bundle.links.as_slice(),
            &["https://facebook.com/profile/123", "https://youtu.be/abc"]
        );
        assert!(!bundle.social_profiles.contains_key(&Platform::Facebook));
        assert_eq!(
            bundle.social_profiles[&Platform::Youtube].as_slice(),
            &["https://youtu.be/abc"]
        );
    }

    #[test]
    fn test_empty_input_gives_empty_bundle() {
        assert!(extract_all("").is_empty());
        assert!(extract_all("   ").is_empty());
        assert_eq!(extract_all("").total(), 0);
    }

    #[test]
    fn test_bundle_json_shape() {
        let bundle = extract_all("see https://github.com/octo");
        let json = serde_json::to_value(&bundle).expect("serialize bundle");

        assert_eq!(
            json["socialProfiles"]["github"],
            serde_json::json!(["https://github.com/octo"])
        );
        assert_eq!(json["emails"], serde_json::json!([]));
    }
}

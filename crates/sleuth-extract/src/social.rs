//! Social profile classification.

use sleuth_core::{domain_of, OrderedSet, Platform};
use std::collections::BTreeMap;

/// Facebook URLs containing this fragment are noise, not profiles.
const FACEBOOK_NOISE: &str = "/profile";

/// Classify a URL into the first platform whose domain owns its host.
///
/// Returns `None` for unparseable URLs, hosts outside the platform set and
/// facebook `/profile` links.
#[must_use]
pub fn classify_social(url: &str) -> Option<Platform> {
    let host = domain_of(url)?;
    let platform = Platform::ALL
        .into_iter()
        .find(|platform| platform.matches_host(&host))?;

    if platform == Platform::Facebook && url.contains(FACEBOOK_NOISE) {
        return None;
    }

    Some(platform)
}

/// Group links by platform, keeping first-seen order inside each bucket.
///
/// Only platforms with at least one link appear in the result.
pub fn extract_social_profiles<'a, I>(links: I) -> BTreeMap<Platform, OrderedSet<String>>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut profiles: BTreeMap<Platform, OrderedSet<String>> = BTreeMap::new();
    for link in links {
        if let Some(platform) = classify_social(link) {
            profiles.entry(platform).or_default().insert(link.clone());
        }
    }
    profiles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_platforms() {
        assert_eq!(
            classify_social("https://www.instagram.com/a_b"),
            Some(Platform::Instagram)
        );
        assert_eq!(
            classify_social("https://x.com/someone"),
            Some(Platform::Twitter)
        );
        assert_eq!(
            classify_social("https://youtu.be/abc"),
            Some(Platform::Youtube)
        );
        assert_eq!(
            classify_social("https://m.facebook.com/juan.perez"),
            Some(Platform::Facebook)
        );
    }

    #[test]
    fn test_facebook_profile_links_are_dropped() {
        assert_eq!(classify_social("https://facebook.com/profile/123"), None);
        assert_eq!(
            classify_social("https://www.facebook.com/profile.php?id=4"),
            None
        );
    }

    #[test]
    fn test_lookalike_hosts_are_not_social() {
        assert_eq!(classify_social("https://dropbox.com/s/file"), None);
        assert_eq!(classify_social("https://notgithub.com/x"), None);
        assert_eq!(classify_social("not a url"), None);
    }

    #[test]
    fn test_profiles_grouped_in_first_seen_order() {
        let links = vec![
            "https://github.com/b".to_string(),
            "https://example.com/".to_string(),
            "https://github.com/a".to_string(),
            "https://github.com/b".to_string(),
            "https://tiktok.com/@c".to_string(),
        ];

        let profiles = extract_social_profiles(&links);

        assert_eq!(profiles.len(), 2);
        assert_eq!(
            profiles[&Platform::Github].as_slice(),
            &["https://github.com/b", "https://github.com/a"]
        );
        assert_eq!(
            profiles[&Platform::Tiktok].as_slice(),
            &["https://tiktok.com/@c"]
        );
    }
}

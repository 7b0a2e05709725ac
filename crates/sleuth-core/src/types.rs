//! Shared types used across the Sleuth crates.
//!
//! This module defines the insertion-ordered set used by every entity list,
//! the fixed set of social platforms, and host extraction for URLs.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

/// A set that remembers first-seen order.
///
/// Backed by a sequence for order and a hash set for membership. Inserting a
/// value that is already present is a no-op, so the first occurrence wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedSet<T: Eq + Hash + Clone> {
    items: Vec<T>,
    seen: HashSet<T>,
}

impl<T: Eq + Hash + Clone> OrderedSet<T> {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Insert a value, returning `true` if it was not present yet.
    pub fn insert(&mut self, value: T) -> bool {
        if self.seen.contains(&value) {
            return false;
        }
        self.seen.insert(value.clone());
        self.items.push(value);
        true
    }

    /// Check membership.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.seen.contains(value)
    }

    /// Number of distinct values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// View the values in first-seen order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Consume the set, returning values in first-seen order.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Eq + Hash + Clone> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Eq + Hash + Clone> IntoIterator for OrderedSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T: Eq + Hash + Clone> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Eq + Hash + Clone + Serialize> Serialize for OrderedSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.items)
    }
}

impl<'de, T: Eq + Hash + Clone + Deserialize<'de>> Deserialize<'de> for OrderedSet<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Vec::<T>::deserialize(deserializer)?.into_iter().collect())
    }
}

/// Social platforms recognised in extracted links.
///
/// The declaration order is the classification priority: the first platform
/// whose domain matches a link's host wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// facebook.com
    Facebook,
    /// instagram.com
    Instagram,
    /// twitter.com / x.com
    Twitter,
    /// tiktok.com
    Tiktok,
    /// linkedin.com
    Linkedin,
    /// github.com
    Github,
    /// youtube.com / youtu.be
    Youtube,
}

impl Platform {
    /// Every platform in classification order.
    pub const ALL: [Platform; 7] = [
        Platform::Facebook,
        Platform::Instagram,
        Platform::Twitter,
        Platform::Tiktok,
        Platform::Linkedin,
        Platform::Github,
        Platform::Youtube,
    ];

    /// Lowercase platform name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::Twitter => "twitter",
            Platform::Tiktok => "tiktok",
            Platform::Linkedin => "linkedin",
            Platform::Github => "github",
            Platform::Youtube => "youtube",
        }
    }

    /// Registered domains that identify the platform.
    #[must_use]
    pub fn domains(self) -> &'static [&'static str] {
        match self {
            Platform::Facebook => &["facebook.com"],
            Platform::Instagram => &["instagram.com"],
            Platform::Twitter => &["twitter.com", "x.com"],
            Platform::Tiktok => &["tiktok.com"],
            Platform::Linkedin => &["linkedin.com"],
            Platform::Github => &["github.com"],
            Platform::Youtube => &["youtube.com", "youtu.be"],
        }
    }

    /// Whether `host` is one of the platform's domains or a subdomain of one.
    ///
    /// This is not a substring test: `netflix.com` is not twitter.
    #[must_use]
    pub fn matches_host(self, host: &str) -> bool {
        self.domains()
            .iter()
            .any(|domain| host_matches(host, domain))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `host` equals `domain` or is a subdomain of it.
#[must_use]
pub fn host_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Lowercase host of a URL, or `None` if the URL has no parseable host.
#[must_use]
pub fn domain_of(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url.trim()).ok()?;
    parsed
        .host_str()
        .filter(|host| !host.is_empty())
        .map(str::to_lowercase)
}

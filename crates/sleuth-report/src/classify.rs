//! URL category classification for hits.

use serde::{Deserialize, Serialize};
use sleuth_core::types::host_matches;
use sleuth_core::{domain_of, Platform};
use std::fmt;

const PASTE_HOSTS: [&str; 7] = [
    "pastebin.com",
    "paste.ee",
    "ghostbin.com",
    "hastebin.com",
    "rentry.co",
    "justpaste.it",
    "controlc.com",
];

const FILE_HOSTS: [&str; 7] = [
    "mega.nz",
    "mediafire.com",
    "dropbox.com",
    "drive.google.com",
    "docs.google.com",
    "wetransfer.com",
    "anonfiles.com",
];

/// What kind of site a hit points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Facebook,
    Instagram,
    Twitter,
    Tiktok,
    Linkedin,
    Github,
    Youtube,
    /// Paste sites
    Paste,
    /// File hosting and shared documents
    File,
    /// Anything else
    Website,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Facebook => "facebook",
            Category::Instagram => "instagram",
            Category::Twitter => "twitter",
            Category::Tiktok => "tiktok",
            Category::Linkedin => "linkedin",
            Category::Github => "github",
            Category::Youtube => "youtube",
            Category::Paste => "paste",
            Category::File => "file",
            Category::Website => "website",
        }
    }

    pub fn is_social(self) -> bool {
        !matches!(self, Category::Paste | Category::File | Category::Website)
    }
}

impl From<Platform> for Category {
    fn from(platform: Platform) -> Self {
        match platform {
            Platform::Facebook => Category::Facebook,
            Platform::Instagram => Category::Instagram,
            Platform::Twitter => Category::Twitter,
            Platform::Tiktok => Category::Tiktok,
            Platform::Linkedin => Category::Linkedin,
            Platform::Github => Category::Github,
            Platform::Youtube => Category::Youtube,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a hit link.
///
/// Social platforms are checked first, in their fixed order, then paste and
/// file hosts. Unparseable or unknown links are websites. Unlike profile
/// extraction, facebook `/profile` links still count as facebook here.
pub fn classify_url(url: &str) -> Category {
    let Some(host) = domain_of(url) else {
        return Category::Website;
    };

    if let Some(platform) = Platform::ALL
        .into_iter()
        .find(|platform| platform.matches_host(&host))
    {
        return platform.into();
    }

    if PASTE_HOSTS.iter().any(|domain| host_matches(&host, domain)) {
        Category::Paste
    } else if FILE_HOSTS.iter().any(|domain| host_matches(&host, domain)) {
        Category::File
    } else {
        Category::Website
    }
}

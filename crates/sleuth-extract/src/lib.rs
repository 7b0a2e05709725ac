//! Sleuth Extract - entity extraction from raw text and HTML.
//!
//! Every extractor is a pure function: no I/O, no shared state, and no error
//! path. Malformed or empty input yields empty output.
//!
//! # Example
//!
//! ```rust
//! use sleuth_core::Platform;
//! use sleuth_extract::extract_all;
//!
//! let bundle = extract_all("Contact: a@b.com, see https://instagram.com/a_b");
//! assert_eq!(bundle.emails.as_slice(), &["a@b.com"]);
//! assert!(bundle.social_profiles.contains_key(&Platform::Instagram));
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod bundle;
pub mod entities;
pub mod html;
pub mod social;

// Re-export commonly used types
pub use bundle::{extract_all, EntityBundle};
pub use entities::{
    extract_emails, extract_links, extract_names, extract_phones, extract_usernames,
};
pub use html::{page_title, visible_text};
pub use social::{classify_social, extract_social_profiles};

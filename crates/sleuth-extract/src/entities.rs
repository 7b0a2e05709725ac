//! Per-entity extractors.
//!
//! Every public extractor takes raw text or HTML. All of them except
//! [`extract_links`] first reduce the input to visible text; links are read
//! from the original markup so URLs inside attributes survive.

use crate::html::visible_text;
use once_cell::sync::Lazy;
use regex::Regex;
use sleuth_core::OrderedSet;

/// Compiled regex patterns (initialized once at startup)
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}")
        .expect("Email regex is hardcoded and valid")
});

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?[0-9]{1,3}[\s\-.]?)?(?:\(?[0-9]{2,4}\)?[\s\-.]?)?[0-9]{3,4}[\s\-.]?[0-9]{3,4}")
        .expect("Phone regex is hardcoded and valid")
});

static LINK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)https?://[^\s"'<>]+"#).expect("Link regex is hardcoded and valid")
});

static USERNAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:@|user/|u/)([a-zA-Z0-9._\-]{3,32})")
        .expect("Username regex is hardcoded and valid")
});

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-ZÁÉÍÓÚÑ][a-záéíóúñ]+(?:\s[A-ZÁÉÍÓÚÑ][a-záéíóúñ]+)+")
        .expect("Name regex is hardcoded and valid")
});

/// Accepted phone length, counted in digits without the leading `+`.
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 7..=15;

/// Email addresses in first-seen order.
///
/// Duplicates are exact-match only; the first spelling wins.
#[must_use]
pub fn extract_emails(text: &str) -> Vec<String> {
    emails_in(&visible_text(text)).into_vec()
}

/// Phone numbers in first-seen order, normalised to digits with an optional
/// leading `+`.
#[must_use]
pub fn extract_phones(text: &str) -> Vec<String> {
    phones_in(&visible_text(text)).into_vec()
}

/// `http(s)` URLs in first-seen order, taken verbatim from the original input.
#[must_use]
pub fn extract_links(text: &str) -> Vec<String> {
    links_in(text).into_vec()
}

/// Lowercased handles following `@`, `user/` or `u/`.
#[must_use]
pub fn extract_usernames(text: &str) -> Vec<String> {
    usernames_in(&visible_text(text)).into_vec()
}

/// Runs of two or more capitalised words.
///
/// This is a heuristic: sentence-initial phrases and titles match too.
#[must_use]
pub fn extract_names(text: &str) -> Vec<String> {
    names_in(&visible_text(text)).into_vec()
}

pub(crate) fn emails_in(plain: &str) -> OrderedSet<String> {
    EMAIL_PATTERN
        .find_iter(plain)
        .map(|m| m.as_str().to_string())
        .collect()
}

pub(crate) fn links_in(text: &str) -> OrderedSet<String> {
    LINK_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

pub(crate) fn phones_in(plain: &str) -> OrderedSet<String> {
    let mut phones = OrderedSet::new();

    for m in PHONE_PATTERN.find_iter(plain) {
        // A match touching another digit is a slice of a longer number
        if touches_digit(plain, m.start(), m.end()) {
            continue;
        }
        if let Some(phone) = normalize_phone(m.as_str()) {
            phones.insert(phone);
        }
    }

    phones
}

pub(crate) fn usernames_in(plain: &str) -> OrderedSet<String> {
    USERNAME_PATTERN
        .captures_iter(plain)
        .filter_map(|caps| caps.get(1))
        .map(|handle| handle.as_str().to_lowercase())
        .collect()
}

pub(crate) fn names_in(plain: &str) -> OrderedSet<String> {
    NAME_PATTERN
        .find_iter(plain)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn touches_digit(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_digit());
    let after = text[end..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit());
    before || after
}

fn normalize_phone(candidate: &str) -> Option<String> {
    let digits: String = candidate.chars().filter(char::is_ascii_digit).collect();
    if !PHONE_DIGITS.contains(&digits.len()) {
        return None;
    }

    if candidate.starts_with('+') {
        Some(format!("+{digits}"))
    } else {
        Some(digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emails_dedup_is_case_sensitive_first_seen() {
        let text = "Write to Ana@Example.com or ana@example.com, again Ana@Example.com";
        assert_eq!(
            extract_emails(text),
            vec!["Ana@Example.com", "ana@example.com"]
        );
    }

    #[test]
    fn test_email_requires_two_letter_tld() {
        assert!(extract_emails("broken@host.c").is_empty());
        assert_eq!(extract_emails("ok@host.co"), vec!["ok@host.co"]);
    }

    #[test]
    fn test_email_inside_markup() {
        let html = "<div><span>mail:</span> <b>juan.perez+osint@mail.example.org</b></div>";
        assert_eq!(
            extract_emails(html),
            vec!["juan.perez+osint@mail.example.org"]
        );
    }

    #[test]
    fn test_phone_digit_boundaries() {
        assert!(extract_phones("code 555123 end").is_empty());
        assert_eq!(extract_phones("code 5551234 end"), vec!["5551234"]);
        assert_eq!(
            extract_phones("id 123456789012345 end"),
            vec!["123456789012345"]
        );
        assert!(extract_phones("card 1234567890123456 end").is_empty());
    }

    #[test]
    fn test_phone_normalization() {
        assert_eq!(
            extract_phones("Call +1 415-555-0100 or (55) 1234.5678"),
            vec!["+14155550100", "5512345678"]
        );
    }

    #[test]
    fn test_phone_separated_groups() {
        assert_eq!(extract_phones("Tel: 555-123-4567"), vec!["5551234567"]);
    }

    #[test]
    fn test_phones_deduplicated_after_normalization() {
        assert_eq!(
            extract_phones("555-123-4567 and 555.123.4567"),
            vec!["5551234567"]
        );
    }

    #[test]
    fn test_links_keep_trailing_punctuation() {
        assert_eq!(
            extract_links("see https://example.com/a, and http://b.example.org."),
            vec!["https://example.com/a,", "http://b.example.org."]
        );
    }

    #[test]
    fn test_links_read_from_attributes() {
        let html = r#"<a href="https://github.com/someone">profile</a>"#;
        assert_eq!(extract_links(html), vec!["https://github.com/someone"]);
        assert!(extract_emails(html).is_empty());
    }

    #[test]
    fn test_usernames_lowercased_and_deduplicated() {
        assert_eq!(
            extract_usernames("ping @User then @user and reddit u/Other_Guy"),
            vec!["user", "other_guy"]
        );
    }

    #[test]
    fn test_username_length_bounds() {
        assert!(extract_usernames("@ab").is_empty());
        assert_eq!(extract_usernames("user/abc"), vec!["abc"]);
    }

    #[test]
    fn test_names_with_accents() {
        assert_eq!(
            extract_names("Reunión con María José Núñez y Juan Pérez en la oficina"),
            vec!["María José Núñez", "Juan Pérez"]
        );
    }

    #[test]
    fn test_single_capitalized_word_is_not_a_name() {
        assert!(extract_names("Contact support today").is_empty());
    }

    #[test]
    fn test_extractors_are_idempotent() {
        let text = "Juan Pérez <juan@example.com> +52 55 1234 5678 https://x.com/juan @Juan";
        assert_eq!(extract_emails(text), extract_emails(text));
        assert_eq!(extract_phones(text), extract_phones(text));
        assert_eq!(extract_links(text), extract_links(text));
        assert_eq!(extract_usernames(text), extract_usernames(text));
        assert_eq!(extract_names(text), extract_names(text));
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(extract_emails("").is_empty());
        assert!(extract_phones("").is_empty());
        assert!(extract_links("").is_empty());
        assert!(extract_usernames("").is_empty());
        assert!(extract_names("").is_empty());
    }
}

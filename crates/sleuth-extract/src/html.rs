//! HTML to visible text.

use scraper::{Html, Node, Selector};

/// Elements whose text content is never rendered.
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Reduce HTML (or plain text) to its visible text.
///
/// Text nodes are joined with single spaces and every whitespace run is
/// collapsed. Entities are decoded by the parser. Plain text without markup
/// comes back with only its whitespace normalised.
#[must_use]
pub fn visible_text(input: &str) -> String {
    if input.trim().is_empty() {
        return String::new();
    }

    let document = Html::parse_document(input);
    let mut out = String::with_capacity(input.len());

    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .is_some_and(|element| HIDDEN_ELEMENTS.contains(&element.name()));
        if hidden {
            continue;
        }

        for word in text.split_whitespace() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(word);
        }
    }

    out
}

/// Text of the document's first `<title>`, whitespace collapsed.
#[must_use]
pub fn page_title(input: &str) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    let document = Html::parse_document(input);
    let title = document
        .select(&selector)
        .next()?
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ");

    (!title.is_empty()).then_some(title)
}

//! # Feature: Text Extraction
//!
//! Resolves command body text: URLs are fetched and reduced to the plain
//! text of the page, anything else passes through unchanged.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial implementation with scraper-based tag stripping

use anyhow::Result;
use regex::Regex;
use scraper::{Html, Node};

/// Resolve a command body into plain text.
///
/// If the input looks like a URL it is fetched and stripped of HTML;
/// fetch failures propagate with their underlying cause so the caller can
/// surface them to the user. Non-URL input (including an empty string) is
/// returned unchanged.
pub async fn resolve(input: &str) -> Result<String> {
    if !is_url(input) {
        return Ok(input.to_string());
    }

    let html = fetch(input).await?;
    Ok(strip_html(&html))
}

/// Anchored prefix match: `http://` or `https://` followed by at least
/// one non-whitespace character.
pub fn is_url(input: &str) -> bool {
    Regex::new(r"^https?://\S+").unwrap().is_match(input)
}

async fn fetch(url: &str) -> Result<String> {
    let response = reqwest::get(url).await?.error_for_status()?;
    Ok(response.text().await?)
}

/// Concatenate the visible text nodes of an HTML document.
///
/// Text inside `script`, `style`, and `noscript` subtrees is skipped; no
/// whitespace normalization beyond what tag removal naturally produces.
fn strip_html(html: &str) -> String {
    let hidden_tags = ["script", "style", "noscript"];

    let document = Html::parse_document(html);
    let mut text = String::new();

    for node in document.root_element().descendants() {
        if let Node::Text(t) = node.value() {
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .map(|el| hidden_tags.contains(&el.name.local.as_ref()))
                    .unwrap_or(false)
            });

            if !hidden {
                text.push_str(t);
            }
        }
    }

    text
}

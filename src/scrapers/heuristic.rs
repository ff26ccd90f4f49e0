//! Tier 3: structural and pattern rules over the rendered markup.

use crate::models::ListingFields;
use crate::scrapers::page::{non_empty, selector, stripped_text, Page};
use regex::Regex;
use scraper::ElementRef;
use std::sync::OnceLock;
use tracing::{debug, info};

fn price_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"£\d[\d,]*").expect("price regex is valid"))
}

fn service_charge_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)service\s*charge.*?(£\d[\d,]*)").expect("service charge regex is valid")
    })
}

/// Recover whatever fields the markup exposes. Returns `None` only when
/// nothing at all resolved.
pub fn try_heuristic(page: &Page<'_>) -> Option<ListingFields> {
    debug!("Attempting HTML fallback parsing");

    let (beds, bathrooms) = definition_counts(page);
    let fields = ListingFields {
        address: page
            .document
            .select(&selector("h1"))
            .next()
            .and_then(stripped_text),
        price: price_pattern()
            .find(page.body)
            .map(|m| m.as_str().to_string()),
        beds,
        bathrooms,
        summary: page
            .document
            .select(&selector(r#"meta[name="description"]"#))
            .next()
            .and_then(|meta| meta.value().attr("content"))
            .and_then(|content| non_empty(content.trim().to_string())),
        service_charge: service_charge_pattern()
            .captures(page.body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string()),
    };

    if fields.is_empty() {
        return None;
    }

    info!(
        "HTML fallback parsed: address={:?}, price={:?}, beds={:?}, bathrooms={:?}, summary={:?}, service_charge={:?}",
        fields.address, fields.price, fields.beds, fields.bathrooms, fields.summary, fields.service_charge
    );
    Some(fields)
}

/// Bedroom and bathroom counts from `<dt>label</dt><dd>value</dd>` pairs
fn definition_counts(page: &Page<'_>) -> (Option<String>, Option<String>) {
    let mut beds = None;
    let mut bathrooms = None;

    for term in page.document.select(&selector("dt")) {
        let Some(label) = stripped_text(term).map(|l| l.to_lowercase()) else {
            continue;
        };
        let Some(value) = next_definition(term).and_then(stripped_text) else {
            continue;
        };

        if label.contains("bedroom") {
            beds = Some(value);
        } else if label.contains("bathroom") {
            bathrooms = Some(value);
        }
    }

    (beds, bathrooms)
}

/// The element directly after `term`, if it is a `<dd>`
fn next_definition(term: ElementRef<'_>) -> Option<ElementRef<'_>> {
    term.next_siblings()
        .find_map(ElementRef::wrap)
        .filter(|sibling| sibling.value().name() == "dd")
}

//! Tier 1: schema.org `Offer` objects in `application/ld+json` blocks.

use crate::models::ListingFields;
use crate::scrapers::page::{selector, value_text, Page};
use serde_json::Value;
use tracing::debug;

const CURRENCY_SYMBOL: &str = "£";

/// Map the first JSON-LD object typed `Offer`. Blocks that fail to parse are
/// skipped; a matching object yields a record even if every field is empty.
pub fn try_structured(page: &Page<'_>) -> Option<ListingFields> {
    let scripts = selector(r#"script[type="application/ld+json"]"#);

    let offer = page
        .document
        .select(&scripts)
        .filter_map(|script| {
            let text: String = script.text().collect();
            match serde_json::from_str::<Value>(&text) {
                Ok(value) => Some(value),
                Err(e) => {
                    debug!("Skipping unparseable JSON-LD block: {}", e);
                    None
                }
            }
        })
        .flat_map(|value| match value {
            Value::Array(items) => items,
            other => vec![other],
        })
        .find(|value| value.get("@type").and_then(Value::as_str) == Some("Offer"));

    let Some(offer) = offer else {
        debug!("Found 0 usable JSON-LD scripts");
        return None;
    };

    debug!("Parsed JSON-LD Offer object");
    Some(ListingFields {
        address: offer
            .pointer("/itemOffered/address/streetAddress")
            .and_then(value_text),
        price: offer
            .get("price")
            .and_then(value_text)
            .filter(|p| !p.is_empty())
            .map(|p| format!("{CURRENCY_SYMBOL}{p}")),
        ..Default::default()
    })
}

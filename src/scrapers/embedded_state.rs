//! Tier 2: the Next.js `__NEXT_DATA__` state blob.

use crate::models::ListingFields;
use crate::scrapers::page::{selector, value_text, Page};
use serde_json::Value;
use tracing::{debug, warn};

const LISTING_PATH: &str = "/props/pageProps/initialReduxState/propertySummary/listing";

/// Where a listing description may live, highest priority first
const DESCRIPTION_PATHS: [&str; 3] = [
    "/props/pageProps/propertyDescription/description",
    "/props/propertyDescription/description",
    "/props/pageProps/initialReduxState/propertyDescription/description",
];

/// Map the listing out of the state blob. Succeeds whenever the block exists
/// and parses, however few fields resolve.
pub fn try_embedded_state(page: &Page<'_>) -> Option<ListingFields> {
    let block = selector(r#"script#__NEXT_DATA__[type="application/json"]"#);
    let script = page.document.select(&block).next()?;

    let text: String = script.text().collect();
    // An empty script is an empty state; whitespace alone is malformed
    let text = if text.is_empty() { "{}" } else { text.as_str() };

    let payload: Value = match serde_json::from_str(text) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Failed to parse __NEXT_DATA__: {}", e);
            return None;
        }
    };

    let listing = payload.pointer(LISTING_PATH);
    let field = |key: &str| listing.and_then(|l| l.get(key)).and_then(value_text);

    debug!("Parsed __NEXT_DATA__ model");
    Some(ListingFields {
        address: field("displayAddress"),
        price: field("formattedPrice"),
        beds: field("bedroomNumber"),
        bathrooms: field("bathroomNumber"),
        summary: description(&payload),
        service_charge: field("serviceCharge"),
    })
}

fn description(payload: &Value) -> Option<String> {
    DESCRIPTION_PATHS.iter().find_map(|path| {
        payload
            .pointer(path)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn next_data(payload: &Value) -> String {
        format!(
            "<html><script id='__NEXT_DATA__' type='application/json'>{}</script></html>",
            payload
        )
    }

    fn extract(html: &str) -> Option<ListingFields> {
        try_embedded_state(&Page::parse(html))
    }

    #[test]
    fn maps_listing_fields() {
        let html = next_data(&json!({
            "props": {"pageProps": {"initialReduxState": {
                "propertySummary": {"listing": {
                    "displayAddress": "123 Example St",
                    "formattedPrice": "£1,000,000",
                    "bedroomNumber": 3,
                    "bathroomNumber": 2,
                    "serviceCharge": "£1,200"
                }},
                "propertyDescription": {"description": "A beautiful property"}
            }}}
        }));

        let fields = extract(&html).unwrap();
        assert_eq!(fields.address.as_deref(), Some("123 Example St"));
        assert_eq!(fields.price.as_deref(), Some("£1,000,000"));
        assert_eq!(fields.beds.as_deref(), Some("3"));
        assert_eq!(fields.bathrooms.as_deref(), Some("2"));
        assert_eq!(fields.service_charge.as_deref(), Some("£1,200"));
        assert_eq!(fields.summary.as_deref(), Some("A beautiful property"));
    }

    #[test]
    fn page_props_description_takes_priority() {
        let html = next_data(&json!({
            "props": {
                "propertyDescription": {"description": "from props"},
                "pageProps": {
                    "propertyDescription": {"description": "from pageProps"},
                    "initialReduxState": {
                        "propertyDescription": {"description": "from redux"}
                    }
                }
            }
        }));

        let fields = extract(&html).unwrap();
        assert_eq!(fields.summary.as_deref(), Some("from pageProps"));
    }

    #[test]
    fn props_description_beats_redux_state() {
        let html = next_data(&json!({
            "props": {
                "propertyDescription": {"description": "from props"},
                "pageProps": {"initialReduxState": {
                    "propertyDescription": {"description": "from redux"}
                }}
            }
        }));

        assert_eq!(extract(&html).unwrap().summary.as_deref(), Some("from props"));
    }

    #[test]
    fn empty_description_falls_through_to_next_location() {
        let html = next_data(&json!({
            "props": {"pageProps": {
                "propertyDescription": {"description": ""},
                "initialReduxState": {"propertyDescription": {"description": "fallback"}}
            }}
        }));

        assert_eq!(extract(&html).unwrap().summary.as_deref(), Some("fallback"));
    }

    #[test]
    fn missing_listing_still_succeeds() {
        let html = next_data(&json!({
            "props": {"pageProps": {"initialReduxState": {"propertySummary": {"listing": {}}}}}
        }));
        assert!(extract(&html).unwrap().is_empty());

        let html = next_data(&json!({"props": null}));
        assert!(extract(&html).unwrap().is_empty());
    }

    #[test]
    fn malformed_blob_is_not_fatal() {
        let html = "<html><script id='__NEXT_DATA__' type='application/json'>Invalid JSON</script></html>";
        assert!(extract(html).is_none());
    }

    #[test]
    fn empty_block_parses_as_empty_state() {
        let html = "<html><script id='__NEXT_DATA__' type='application/json'></script></html>";
        assert!(extract(html).unwrap().is_empty());
    }

    #[test]
    fn whitespace_only_block_is_malformed() {
        let html = "<html><script id='__NEXT_DATA__' type='application/json'>  \n  </script></html>";
        assert!(extract(html).is_none());
    }

    #[test]
    fn absent_block_yields_nothing() {
        assert!(extract("<html><h1>Somewhere</h1></html>").is_none());
        assert!(extract("<html><script id='__NEXT_DATA__'>{}</script></html>").is_none());
    }
}

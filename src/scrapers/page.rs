use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

/// A fetched listing page, parsed once and shared by every extraction tier
pub struct Page<'a> {
    pub body: &'a str,
    pub document: Html,
}

impl<'a> Page<'a> {
    pub fn parse(body: &'a str) -> Self {
        Self {
            body,
            document: Html::parse_document(body),
        }
    }
}

pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

/// Concatenated text of an element with each fragment trimmed, or `None`
/// when nothing but whitespace remains
pub(crate) fn stripped_text(element: ElementRef<'_>) -> Option<String> {
    let text: String = element.text().map(str::trim).collect();
    non_empty(text)
}

pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Render a JSON scalar as text; null, arrays and objects count as absent
pub(crate) fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

use serde::{Deserialize, Serialize};

/// Message returned when a listing page answers 410 Gone
pub const GONE_MESSAGE: &str = "It seems the listing is gone or the property is sold.";

/// The six optional listing fields an extraction tier can recover
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFields {
    pub address: Option<String>,
    pub price: Option<String>,
    pub beds: Option<String>,
    pub bathrooms: Option<String>,
    pub summary: Option<String>,
    pub service_charge: Option<String>,
}

impl ListingFields {
    /// True when no field resolved to a value
    pub fn is_empty(&self) -> bool {
        self.address.is_none()
            && self.price.is_none()
            && self.beds.is_none()
            && self.bathrooms.is_none()
            && self.summary.is_none()
            && self.service_charge.is_none()
    }
}

/// Core listing data model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    /// Listing URL with any `#fragment` removed
    pub url: String,
    #[serde(flatten)]
    pub fields: ListingFields,
}

impl ListingRecord {
    pub fn new(url: impl Into<String>, fields: ListingFields) -> Self {
        Self {
            url: url.into(),
            fields,
        }
    }

    /// The canonical row handed to a sink: url, address, price, service charge
    pub fn sink_row(&self) -> SinkRow {
        SinkRow([
            Some(self.url.clone()),
            self.fields.address.clone(),
            self.fields.price.clone(),
            self.fields.service_charge.clone(),
        ])
    }
}

/// Four-column row appended to an external sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SinkRow(pub [Option<String>; 4]);

/// Result of a successful scrape call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Listing(ListingRecord),
    Gone { error: String },
}

impl Outcome {
    pub fn gone() -> Self {
        Outcome::Gone {
            error: GONE_MESSAGE.to_string(),
        }
    }

    pub fn listing(&self) -> Option<&ListingRecord> {
        match self {
            Outcome::Listing(record) => Some(record),
            Outcome::Gone { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_serializes_all_seven_fields() {
        let record = ListingRecord::new(
            "https://example.com/properties/1",
            ListingFields {
                address: Some("123 Example St".to_string()),
                price: Some("£1000000".to_string()),
                ..Default::default()
            },
        );

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "url": "https://example.com/properties/1",
                "address": "123 Example St",
                "price": "£1000000",
                "beds": null,
                "bathrooms": null,
                "summary": null,
                "service_charge": null,
            })
        );
    }

    #[test]
    fn gone_serializes_as_error_object() {
        let value = serde_json::to_value(Outcome::gone()).unwrap();
        assert_eq!(value, json!({ "error": GONE_MESSAGE }));
        assert!(Outcome::gone().listing().is_none());
    }

    #[test]
    fn sink_row_keeps_canonical_order() {
        let record = ListingRecord::new(
            "https://example.com/p",
            ListingFields {
                address: Some("1 High St".to_string()),
                price: Some("£250,000".to_string()),
                beds: Some("3".to_string()),
                service_charge: Some("£300".to_string()),
                ..Default::default()
            },
        );

        let row = serde_json::to_value(record.sink_row()).unwrap();
        assert_eq!(
            row,
            json!(["https://example.com/p", "1 High St", "£250,000", "£300"])
        );
    }

    #[test]
    fn empty_fields_report_empty() {
        assert!(ListingFields::default().is_empty());
        let fields = ListingFields {
            beds: Some("2".to_string()),
            ..Default::default()
        };
        assert!(!fields.is_empty());
    }
}

//! Order draft models filled by the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Canonical order fields, ready to pre-fill an order form.
///
/// Money fields are integer đồng; weight is integer grams. A `None` field
/// simply means the message did not state it — absence is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    /// Recipient name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Recipient phone number (digits, obfuscation characters kept as-is).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Cash-on-delivery amount in đồng.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cod: Option<i64>,

    /// Declared goods value in đồng, distinct from COD.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,

    /// Parcel weight in grams.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,

    /// Shipping address (truncated at the first comma when one is present).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Product description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
}

impl OrderDraft {
    /// Check whether any field was extracted at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.cod.is_none()
            && self.value.is_none()
            && self.weight.is_none()
            && self.address.is_none()
            && self.product.is_none()
    }
}

/// The raw matched substrings behind each [`OrderDraft`] field.
///
/// Kept for transparency: the host can re-highlight these spans in the
/// source message or show them next to the normalized values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraftRaw {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cod: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
}

/// Result pair returned by one extraction call: the canonical record and
/// its raw-text mirror.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedOrder {
    /// Canonical field values.
    pub order: OrderDraft,

    /// Raw matched substrings, one per field.
    pub raw: OrderDraftRaw,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_draft() {
        let draft = OrderDraft::default();
        assert!(draft.is_empty());

        let draft = OrderDraft {
            phone: Some("0922001100".to_string()),
            ..Default::default()
        };
        assert!(!draft.is_empty());
    }

    #[test]
    fn test_serialization_skips_missing_fields() {
        let parsed = ParsedOrder {
            order: OrderDraft {
                cod: Some(150_000),
                ..Default::default()
            },
            raw: OrderDraftRaw {
                cod: Some("150k".to_string()),
                ..Default::default()
            },
        };

        let json = serde_json::to_string(&parsed).unwrap();
        assert_eq!(json, r#"{"order":{"cod":150000},"raw":{"cod":"150k"}}"#);

        let back: ParsedOrder = serde_json::from_str(&json).unwrap();
        assert_eq!(back, parsed);
    }
}

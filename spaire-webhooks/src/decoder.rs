//! Payload decoding
//!
//! The body is parsed once, the `type` discriminator selects the variant, and
//! the variant's schema is applied to the whole envelope. Field paths in
//! [`DecodeError::SchemaViolation`] are tracked by `serde_path_to_error`;
//! unknown fields are collected by `serde_ignored` and only rejected in
//! [`DecodeMode::Strict`].

use crate::config::{DecodeMode, WebhookConfig};
use crate::error::DecodeError;
use crate::payload::{EventType, WebhookEvent, WebhookPayload};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Name of the discriminator field
const TYPE_FIELD: &str = "type";

/// Decodes webhook bodies into [`WebhookPayload`]s
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WebhookDecoder {
    mode: DecodeMode,
}

impl WebhookDecoder {
    /// Create a decoder with the given mode
    pub fn new(mode: DecodeMode) -> Self {
        Self { mode }
    }

    /// Create a decoder that rejects unknown fields
    pub fn strict() -> Self {
        Self::new(DecodeMode::Strict)
    }

    /// Create a decoder from a configuration
    pub fn from_config(config: &WebhookConfig) -> Self {
        Self::new(config.decode_mode)
    }

    /// The decode mode
    pub fn mode(&self) -> DecodeMode {
        self.mode
    }

    /// Decode a raw body
    pub fn decode(&self, body: &[u8]) -> Result<WebhookPayload, DecodeError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| DecodeError::MalformedBody(e.to_string()))?;

        let event_type = match value.as_object() {
            None => {
                return Err(DecodeError::MalformedBody(
                    "expected a JSON object".to_string(),
                ));
            }
            Some(object) => match object.get(TYPE_FIELD) {
                Some(Value::String(tag)) => EventType::from_tag(tag)
                    .ok_or_else(|| DecodeError::UnknownEventType(Some(tag.clone())))?,
                _ => return Err(DecodeError::UnknownEventType(None)),
            },
        };

        let payload = match event_type {
            EventType::CheckoutCreated => WebhookPayload::CheckoutCreated(self.event(value)?),
            EventType::CheckoutUpdated => WebhookPayload::CheckoutUpdated(self.event(value)?),
            EventType::CustomerCreated => WebhookPayload::CustomerCreated(self.event(value)?),
            EventType::CustomerUpdated => WebhookPayload::CustomerUpdated(self.event(value)?),
            EventType::CustomerDeleted => WebhookPayload::CustomerDeleted(self.event(value)?),
            EventType::OrderCreated => WebhookPayload::OrderCreated(self.event(value)?),
            EventType::OrderUpdated => WebhookPayload::OrderUpdated(self.event(value)?),
            EventType::OrderPaid => WebhookPayload::OrderPaid(self.event(value)?),
            EventType::OrderRefunded => WebhookPayload::OrderRefunded(self.event(value)?),
            EventType::SubscriptionCreated => {
                WebhookPayload::SubscriptionCreated(self.event(value)?)
            }
            EventType::SubscriptionUpdated => {
                WebhookPayload::SubscriptionUpdated(self.event(value)?)
            }
            EventType::SubscriptionActive => {
                WebhookPayload::SubscriptionActive(self.event(value)?)
            }
            EventType::SubscriptionCanceled => {
                WebhookPayload::SubscriptionCanceled(self.event(value)?)
            }
            EventType::SubscriptionUncanceled => {
                WebhookPayload::SubscriptionUncanceled(self.event(value)?)
            }
            EventType::SubscriptionRevoked => {
                WebhookPayload::SubscriptionRevoked(self.event(value)?)
            }
            EventType::RefundCreated => WebhookPayload::RefundCreated(self.event(value)?),
            EventType::RefundUpdated => WebhookPayload::RefundUpdated(self.event(value)?),
            EventType::ProductCreated => WebhookPayload::ProductCreated(self.event(value)?),
            EventType::ProductUpdated => WebhookPayload::ProductUpdated(self.event(value)?),
            EventType::BenefitCreated => WebhookPayload::BenefitCreated(self.event(value)?),
            EventType::BenefitUpdated => WebhookPayload::BenefitUpdated(self.event(value)?),
        };

        debug!(event_type = %event_type, "Decoded webhook payload");
        Ok(payload)
    }

    fn event<T: DeserializeOwned>(&self, value: Value) -> Result<WebhookEvent<T>, DecodeError> {
        let mut unknown = Vec::new();
        let mut on_ignored = |path: serde_ignored::Path<'_>| unknown.push(ignored_path(&path));

        let event: WebhookEvent<T> =
            serde_path_to_error::deserialize(serde_ignored::Deserializer::new(value, &mut on_ignored))
                .map_err(|err| {
                    let message = err.inner().to_string();
                    DecodeError::SchemaViolation {
                        path: violation_path(err.path().to_string(), &message),
                        message,
                    }
                })?;

        if self.mode == DecodeMode::Strict {
            // The discriminator is consumed by dispatch, not by the envelope
            if let Some(path) = unknown.into_iter().find(|path| path != TYPE_FIELD) {
                return Err(DecodeError::SchemaViolation {
                    path,
                    message: "unknown field".to_string(),
                });
            }
        }

        Ok(event)
    }
}

/// Path of the offending field.
///
/// A missing field is reported at its parent, so the field name is appended.
fn violation_path(parent: String, message: &str) -> String {
    let missing = message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split_once('`'))
        .map(|(field, _)| field);

    match missing {
        Some(field) if parent == "." => field.to_string(),
        Some(field) => format!("{}.{}", parent, field),
        None => parent,
    }
}

/// Render an ignored-field path in the same `a.b[0].c` form as schema errors
fn ignored_path(path: &serde_ignored::Path<'_>) -> String {
    use serde_ignored::Path;

    match path {
        Path::Root => String::new(),
        Path::Seq { parent, index } => format!("{}[{}]", ignored_path(parent), index),
        Path::Map { parent, key } => {
            let parent = ignored_path(parent);
            if parent.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", parent, key)
            }
        }
        Path::Some { parent }
        | Path::NewtypeStruct { parent }
        | Path::NewtypeVariant { parent } => ignored_path(parent),
    }
}

/// Decode a raw body, ignoring unknown fields
pub fn decode(body: &[u8]) -> Result<WebhookPayload, DecodeError> {
    WebhookDecoder::default().decode(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn customer_event(event_type: &str) -> Value {
        json!({
            "type": event_type,
            "timestamp": "2024-10-15T12:00:00Z",
            "data": {
                "id": "5b1d0e2a-9c4f-4a7e-8d3b-6f2c1a0e9d48",
                "created_at": "2024-10-15T11:59:00Z",
                "modified_at": null,
                "metadata": {"source": "import"},
                "external_id": null,
                "email": "jane@example.com",
                "email_verified": true,
                "name": "Jane",
                "billing_address": null,
                "tax_id": null,
                "organization_id": "0c7e4b1f-2a6d-4f3e-9b8a-5d1c7e2f3a90",
                "deleted_at": null,
                "avatar_url": "https://example.com/avatar.png"
            }
        })
    }

    fn bytes(value: &Value) -> Vec<u8> {
        serde_json::to_vec(value).unwrap()
    }

    #[test]
    fn test_decode_customer_event() {
        let payload = decode(&bytes(&customer_event("customer.created"))).unwrap();

        match payload {
            WebhookPayload::CustomerCreated(event) => {
                assert_eq!(event.data.email, "jane@example.com");
                assert!(event.data.email_verified);
                assert!(!event.data.is_deleted());
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn test_same_data_different_tag() {
        let payload = decode(&bytes(&customer_event("customer.deleted"))).unwrap();
        assert_eq!(payload.event_type(), EventType::CustomerDeleted);
    }

    #[test]
    fn test_malformed_body() {
        assert!(matches!(decode(b"not json"), Err(DecodeError::MalformedBody(_))));
        assert!(matches!(decode(b""), Err(DecodeError::MalformedBody(_))));
        assert!(matches!(decode(b"[1, 2]"), Err(DecodeError::MalformedBody(_))));
    }

    #[test]
    fn test_unknown_event_type() {
        assert_eq!(
            decode(br#"{"type": "unknown"}"#),
            Err(DecodeError::UnknownEventType(Some("unknown".to_string())))
        );
        assert_eq!(decode(br#"{}"#), Err(DecodeError::UnknownEventType(None)));
        assert_eq!(decode(br#"{"type": 7}"#), Err(DecodeError::UnknownEventType(None)));
    }

    #[test]
    fn test_tag_must_match_data_shape() {
        // Customer data under an order tag
        let result = decode(&bytes(&customer_event("order.paid")));
        assert!(matches!(result, Err(DecodeError::SchemaViolation { .. })));
    }

    #[test]
    fn test_missing_field_names_path() {
        let mut value = customer_event("customer.updated");
        value["data"].as_object_mut().unwrap().remove("email");

        match decode(&bytes(&value)) {
            Err(DecodeError::SchemaViolation { path, message }) => {
                assert_eq!(path, "data.email");
                assert_eq!(message, "missing field `email`");
            }
            other => panic!("expected schema violation, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_type_names_path() {
        let mut value = customer_event("customer.updated");
        value["data"]["email_verified"] = json!("yes");

        match decode(&bytes(&value)) {
            Err(DecodeError::SchemaViolation { path, .. }) => {
                assert_eq!(path, "data.email_verified");
            }
            other => panic!("expected schema violation, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_timestamp() {
        let mut value = customer_event("customer.created");
        value.as_object_mut().unwrap().remove("timestamp");

        match decode(&bytes(&value)) {
            Err(DecodeError::SchemaViolation { path, .. }) => assert_eq!(path, "timestamp"),
            other => panic!("expected schema violation, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_nested_field_names_path() {
        let mut value = customer_event("customer.created");
        value["data"]["billing_address"] = json!({"line1": "1 Main St"});

        match decode(&bytes(&value)) {
            Err(DecodeError::SchemaViolation { path, .. }) => {
                assert_eq!(path, "data.billing_address.country");
            }
            other => panic!("expected schema violation, got {:?}", other),
        }
    }

    #[test]
    fn test_violation_path() {
        assert_eq!(violation_path(".".to_string(), "missing field `data`"), "data");
        assert_eq!(
            violation_path("data.items[0]".to_string(), "missing field `label`"),
            "data.items[0].label"
        );
        assert_eq!(
            violation_path("data.email".to_string(), "invalid type: integer `7`, expected a string"),
            "data.email"
        );
    }

    #[test]
    fn test_unknown_fields_lenient_and_strict() {
        let mut value = customer_event("customer.created");
        value["data"]["loyalty_tier"] = json!("gold");

        assert!(decode(&bytes(&value)).is_ok());

        match WebhookDecoder::strict().decode(&bytes(&value)) {
            Err(DecodeError::SchemaViolation { path, message }) => {
                assert_eq!(path, "data.loyalty_tier");
                assert_eq!(message, "unknown field");
            }
            other => panic!("expected schema violation, got {:?}", other),
        }
    }

    #[test]
    fn test_strict_accepts_exact_payload() {
        let value = customer_event("customer.created");
        assert!(WebhookDecoder::strict().decode(&bytes(&value)).is_ok());
    }
}

//! Webhook request headers

use crate::error::VerificationFailure;
use std::collections::HashMap;
use std::hash::BuildHasher;

/// Message ID header
pub const WEBHOOK_ID: &str = "webhook-id";

/// Signature header, one or more space-separated `v1,<base64>` tokens
pub const WEBHOOK_SIGNATURE: &str = "webhook-signature";

/// Timestamp header, epoch seconds
pub const WEBHOOK_TIMESTAMP: &str = "webhook-timestamp";

/// The headers needed to verify a webhook
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebhookHeaders {
    id: Option<String>,
    signature: Option<String>,
    timestamp: Option<String>,
}

impl WebhookHeaders {
    /// Create headers from the three values
    pub fn new(
        id: impl Into<String>,
        signature: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            signature: Some(signature.into()),
            timestamp: Some(timestamp.into()),
        }
    }

    /// Pick the webhook headers out of arbitrary `(name, value)` pairs.
    ///
    /// Names match case-insensitively. Unrelated headers are ignored; a
    /// repeated header keeps its last value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut headers = Self::default();
        for (name, value) in pairs {
            let name = name.as_ref();
            let value = value.as_ref().to_string();
            if name.eq_ignore_ascii_case(WEBHOOK_ID) {
                headers.id = Some(value);
            } else if name.eq_ignore_ascii_case(WEBHOOK_SIGNATURE) {
                headers.signature = Some(value);
            } else if name.eq_ignore_ascii_case(WEBHOOK_TIMESTAMP) {
                headers.timestamp = Some(value);
            }
        }
        headers
    }

    /// Set the message ID
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the signature header
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// Set the timestamp header
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Message ID, if present
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Signature header, if present
    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    /// Timestamp header, if present
    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }

    pub(crate) fn require_id(&self) -> Result<&str, VerificationFailure> {
        require(self.id(), WEBHOOK_ID)
    }

    pub(crate) fn require_signature(&self) -> Result<&str, VerificationFailure> {
        require(self.signature(), WEBHOOK_SIGNATURE)
    }

    pub(crate) fn require_timestamp(&self) -> Result<&str, VerificationFailure> {
        require(self.timestamp(), WEBHOOK_TIMESTAMP)
    }
}

impl<S: BuildHasher> From<&HashMap<String, String, S>> for WebhookHeaders {
    fn from(map: &HashMap<String, String, S>) -> Self {
        Self::from_pairs(map)
    }
}

fn require<'a>(
    value: Option<&'a str>,
    name: &'static str,
) -> Result<&'a str, VerificationFailure> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(VerificationFailure::MissingHeader(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_is_case_insensitive() {
        let headers = WebhookHeaders::from_pairs([
            ("Webhook-Id", "msg_1"),
            ("WEBHOOK-SIGNATURE", "v1,abc"),
            ("webhook-timestamp", "1700000000"),
            ("content-type", "application/json"),
        ]);

        assert_eq!(headers.id(), Some("msg_1"));
        assert_eq!(headers.signature(), Some("v1,abc"));
        assert_eq!(headers.timestamp(), Some("1700000000"));
    }

    #[test]
    fn test_from_hash_map() {
        let mut map = HashMap::new();
        map.insert("webhook-id".to_string(), "msg_2".to_string());

        let headers = WebhookHeaders::from(&map);
        assert_eq!(headers.id(), Some("msg_2"));
        assert_eq!(headers.signature(), None);
    }

    #[test]
    fn test_require_rejects_missing_and_empty() {
        let headers = WebhookHeaders::default().with_id("");

        assert_eq!(
            headers.require_id(),
            Err(VerificationFailure::MissingHeader(WEBHOOK_ID))
        );
        assert_eq!(
            headers.require_timestamp(),
            Err(VerificationFailure::MissingHeader(WEBHOOK_TIMESTAMP))
        );
    }
}

//! Webhook receiver for handling incoming webhooks

use crate::config::{DecodeMode, WebhookConfig};
use crate::decoder::WebhookDecoder;
use crate::headers::WebhookHeaders;
use crate::payload::WebhookPayload;
use crate::secret::WebhookSecret;
use crate::signature::WebhookVerifier;
use crate::{Result, WebhookError};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Receiver for incoming webhooks.
///
/// Verifies first, then decodes. The secret is supplied on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebhookReceiver {
    verifier: WebhookVerifier,
    decoder: WebhookDecoder,
}

impl WebhookReceiver {
    /// Create a receiver from a configuration
    pub fn new(config: &WebhookConfig) -> Self {
        Self {
            verifier: WebhookVerifier::from_config(config),
            decoder: WebhookDecoder::from_config(config),
        }
    }

    /// Set the timestamp tolerance
    pub fn with_tolerance(mut self, tolerance: Duration) -> Self {
        self.verifier = WebhookVerifier::new(tolerance);
        self
    }

    /// Reject unknown payload fields
    pub fn strict(mut self) -> Self {
        self.decoder = WebhookDecoder::new(DecodeMode::Strict);
        self
    }

    /// The underlying verifier
    pub fn verifier(&self) -> &WebhookVerifier {
        &self.verifier
    }

    /// The underlying decoder
    pub fn decoder(&self) -> &WebhookDecoder {
        &self.decoder
    }

    /// Verify an incoming webhook signature without decoding it
    pub fn verify(
        &self,
        secret: &WebhookSecret,
        headers: &WebhookHeaders,
        body: &[u8],
    ) -> Result<()> {
        self.verifier.verify(secret, headers, body)?;
        Ok(())
    }

    /// Verify and decode an incoming webhook
    pub fn receive(
        &self,
        secret: &WebhookSecret,
        headers: &WebhookHeaders,
        body: &[u8],
    ) -> Result<WebhookPayload> {
        self.receive_at(secret, headers, body, Utc::now())
    }

    /// Verify against an explicit reference time, then decode
    pub fn receive_at(
        &self,
        secret: &WebhookSecret,
        headers: &WebhookHeaders,
        body: &[u8],
        now: DateTime<Utc>,
    ) -> Result<WebhookPayload> {
        // Never decode an unauthenticated body
        self.verifier.verify_at(secret, headers, body, now)?;
        self.decoder.decode(body).map_err(WebhookError::from)
    }
}

/// Verify and decode a webhook with the default configuration.
///
/// `secret` is the raw secret as shown in the platform dashboard. Use
/// [`WebhookReceiver`] with [`WebhookSecret::from_base64`] for the encoded form.
pub fn validate_event(body: &[u8], headers: &WebhookHeaders, secret: &str) -> Result<WebhookPayload> {
    let secret = WebhookSecret::from_raw(secret);
    WebhookReceiver::default().receive(&secret, headers, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DecodeError, VerificationFailure};

    const BODY: &[u8] = br#"{"type": "unknown"}"#;

    fn headers_for(secret: &str, body: &[u8], timestamp: i64) -> WebhookHeaders {
        let secret = WebhookSecret::from_raw(secret);
        let signature = WebhookVerifier::sign(&secret, "WEBHOOK_ID", timestamp, body).unwrap();
        WebhookHeaders::new("WEBHOOK_ID", signature, timestamp.to_string())
    }

    #[test]
    fn test_receiver_defaults() {
        let receiver = WebhookReceiver::default();
        assert_eq!(receiver.verifier().tolerance(), Duration::from_secs(300));
        assert_eq!(receiver.decoder().mode(), DecodeMode::Lenient);
    }

    #[test]
    fn test_receiver_builders() {
        let receiver = WebhookReceiver::default()
            .with_tolerance(Duration::from_secs(60))
            .strict();
        assert_eq!(receiver.verifier().tolerance(), Duration::from_secs(60));
        assert_eq!(receiver.decoder().mode(), DecodeMode::Strict);

        let config = WebhookConfig::builder().timestamp_tolerance_secs(30).strict(true).build();
        let receiver = WebhookReceiver::new(&config);
        assert_eq!(receiver.verifier().tolerance(), Duration::from_secs(30));
        assert_eq!(receiver.decoder().mode(), DecodeMode::Strict);
    }

    #[test]
    fn test_verification_precedes_decoding() {
        let headers = headers_for("AnotherSecret", b"not json", Utc::now().timestamp());

        let error = validate_event(b"not json", &headers, "TestSecret").unwrap_err();
        assert!(error.is_verification());
    }

    #[test]
    fn test_verified_but_unknown_type() {
        let headers = headers_for("TestSecret", BODY, Utc::now().timestamp());
        let receiver = WebhookReceiver::default();
        let secret = WebhookSecret::from_raw("TestSecret");

        assert!(receiver.verify(&secret, &headers, BODY).is_ok());
        assert_eq!(
            receiver.receive(&secret, &headers, BODY),
            Err(WebhookError::Decode(DecodeError::UnknownEventType(Some(
                "unknown".to_string()
            ))))
        );
    }

    #[test]
    fn test_receive_at_uses_reference_time() {
        let signed_at = 1_700_000_000;
        let headers = headers_for("TestSecret", BODY, signed_at);
        let secret = WebhookSecret::from_raw("TestSecret");
        let receiver = WebhookReceiver::default();

        let later = DateTime::from_timestamp(signed_at + 3600, 0).unwrap();
        match receiver.receive_at(&secret, &headers, BODY, later) {
            Err(WebhookError::Verification(error)) => assert_eq!(
                error.reason(),
                &VerificationFailure::TimestampOutOfTolerance { skew_secs: -3600 }
            ),
            other => panic!("expected verification failure, got {:?}", other),
        }

        let during = DateTime::from_timestamp(signed_at + 10, 0).unwrap();
        let error = receiver.receive_at(&secret, &headers, BODY, during).unwrap_err();
        assert!(error.is_decode());
    }
}

//! Webhook signature generation and verification
//!
//! Follows the Standard Webhooks signing scheme: the signed content is
//! `{webhook-id}.{webhook-timestamp}.{body}`, keyed with HMAC-SHA256, and the
//! signature header carries space-separated `v1,<base64>` tokens.

use crate::config::{DEFAULT_TOLERANCE, WebhookConfig};
use crate::error::{VerificationError, VerificationFailure};
use crate::headers::WebhookHeaders;
use crate::secret::WebhookSecret;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::Duration;
use tracing::{debug, warn};

type HmacSha256 = Hmac<Sha256>;

/// Version prefix of the signature tokens this verifier understands
const SIGNATURE_VERSION: &str = "v1";

/// Verifies webhook signatures.
///
/// Holds only the timestamp tolerance, so a single instance can be shared
/// across threads and requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebhookVerifier {
    tolerance: Duration,
}

impl Default for WebhookVerifier {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl WebhookVerifier {
    /// Create a verifier with the given timestamp tolerance
    pub fn new(tolerance: Duration) -> Self {
        Self { tolerance }
    }

    /// Create a verifier from a configuration
    pub fn from_config(config: &WebhookConfig) -> Self {
        Self::new(config.timestamp_tolerance)
    }

    /// The timestamp tolerance
    pub fn tolerance(&self) -> Duration {
        self.tolerance
    }

    /// Verify a webhook against the current time
    pub fn verify(
        &self,
        secret: &WebhookSecret,
        headers: &WebhookHeaders,
        body: &[u8],
    ) -> Result<(), VerificationError> {
        self.verify_at(secret, headers, body, Utc::now())
    }

    /// Verify a webhook against an explicit reference time
    pub fn verify_at(
        &self,
        secret: &WebhookSecret,
        headers: &WebhookHeaders,
        body: &[u8],
        now: DateTime<Utc>,
    ) -> Result<(), VerificationError> {
        match self.check(secret, headers, body, now) {
            Ok(()) => {
                debug!(msg_id = headers.id().unwrap_or_default(), "Webhook signature verified");
                Ok(())
            }
            Err(reason) => {
                warn!(
                    msg_id = headers.id().unwrap_or_default(),
                    reason = %reason,
                    "Webhook verification failed"
                );
                Err(reason.into())
            }
        }
    }

    fn check(
        &self,
        secret: &WebhookSecret,
        headers: &WebhookHeaders,
        body: &[u8],
        now: DateTime<Utc>,
    ) -> Result<(), VerificationFailure> {
        let msg_id = headers.require_id()?;
        let signature = headers.require_signature()?;
        let timestamp = parse_timestamp(headers.require_timestamp()?)?;

        self.check_tolerance(timestamp, now)?;

        if secret.is_empty() {
            return Err(VerificationFailure::MalformedSecret);
        }

        let mac = signed_content_mac(secret, msg_id, timestamp, body)?;

        let mut well_formed = false;
        for token in signature.split(' ').filter(|token| !token.is_empty()) {
            let Some(expected) = decode_token(token) else {
                continue;
            };
            well_formed = true;

            // verify_slice compares in constant time
            if mac.clone().verify_slice(&expected).is_ok() {
                return Ok(());
            }
        }

        if well_formed {
            Err(VerificationFailure::SignatureMismatch)
        } else {
            Err(VerificationFailure::MalformedSignature)
        }
    }

    fn check_tolerance(&self, timestamp: i64, now: DateTime<Utc>) -> Result<(), VerificationFailure> {
        let tolerance = i64::try_from(self.tolerance.as_secs()).unwrap_or(i64::MAX);
        let skew_secs = timestamp.saturating_sub(now.timestamp());

        if skew_secs.saturating_abs() > tolerance {
            return Err(VerificationFailure::TimestampOutOfTolerance { skew_secs });
        }
        Ok(())
    }

    /// Generate a `v1,<base64>` signature token
    pub fn sign(
        secret: &WebhookSecret,
        msg_id: &str,
        timestamp: i64,
        body: &[u8],
    ) -> Result<String, VerificationError> {
        let mac = signed_content_mac(secret, msg_id, timestamp, body)?;
        let signature = STANDARD.encode(mac.finalize().into_bytes());
        Ok(format!("{},{}", SIGNATURE_VERSION, signature))
    }
}

/// Verify a webhook with the default tolerance
pub fn verify(
    secret: &WebhookSecret,
    headers: &WebhookHeaders,
    body: &[u8],
) -> Result<(), VerificationError> {
    WebhookVerifier::default().verify(secret, headers, body)
}

/// HMAC over `{msg_id}.{timestamp}.{body}`, fed piecewise so the body bytes
/// are signed exactly as received
fn signed_content_mac(
    secret: &WebhookSecret,
    msg_id: &str,
    timestamp: i64,
    body: &[u8],
) -> Result<HmacSha256, VerificationFailure> {
    let mut mac = HmacSha256::new_from_slice(secret.expose())
        .map_err(|_| VerificationFailure::MalformedSecret)?;
    mac.update(msg_id.as_bytes());
    mac.update(b".");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(body);
    Ok(mac)
}

/// Parse epoch seconds, accepting fractional values.
///
/// Fractions are floored: the signed timestamp is always whole seconds.
fn parse_timestamp(raw: &str) -> Result<i64, VerificationFailure> {
    if let Ok(secs) = raw.parse::<i64>() {
        return Ok(secs);
    }

    let secs = raw
        .parse::<f64>()
        .map_err(|_| VerificationFailure::MalformedTimestamp)?;
    if !secs.is_finite() {
        return Err(VerificationFailure::MalformedTimestamp);
    }

    let floored = secs.floor();
    if floored < i64::MIN as f64 || floored >= i64::MAX as f64 {
        return Err(VerificationFailure::MalformedTimestamp);
    }
    Ok(floored as i64)
}

/// Decode a `v1,<base64>` token; other versions and malformed tokens yield `None`
fn decode_token(token: &str) -> Option<Vec<u8>> {
    let (version, signature) = token.split_once(',')?;
    if version != SIGNATURE_VERSION {
        return None;
    }
    STANDARD.decode(signature).ok().filter(|bytes| !bytes.is_empty())
}

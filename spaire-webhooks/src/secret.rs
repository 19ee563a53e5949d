//! Webhook signing secret

use crate::error::{VerificationError, VerificationFailure};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use secrecy::{ExposeSecret, SecretBox, SecretSlice};

/// Optional prefix on base64-encoded secrets
const SECRET_PREFIX: &str = "whsec_";

/// Shared secret used to key the webhook HMAC.
///
/// The bytes are zeroized on drop and redacted from `Debug`. A secret is
/// passed per call and never retained by the verifier.
#[derive(Debug)]
pub struct WebhookSecret {
    key: SecretSlice<u8>,
}

impl WebhookSecret {
    /// Decode a base64-encoded secret, with or without the `whsec_` prefix
    pub fn from_base64(encoded: &str) -> Result<Self, VerificationError> {
        let encoded = encoded.strip_prefix(SECRET_PREFIX).unwrap_or(encoded);
        let key = STANDARD
            .decode(encoded.trim())
            .map_err(|_| VerificationFailure::MalformedSecret)?;

        if key.is_empty() {
            return Err(VerificationFailure::MalformedSecret.into());
        }

        Ok(Self {
            key: SecretBox::new(key.into_boxed_slice()),
        })
    }

    /// Use raw secret bytes as the HMAC key
    ///
    /// This is the form shown in the platform dashboard.
    pub fn from_raw(secret: impl AsRef<[u8]>) -> Self {
        Self {
            key: SecretBox::new(secret.as_ref().to_vec().into_boxed_slice()),
        }
    }

    /// Base64 form of the secret
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.expose())
    }

    pub(crate) fn expose(&self) -> &[u8] {
        self.key.expose_secret()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.expose().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base64_matches_raw() {
        // "TestSecret"
        let decoded = WebhookSecret::from_base64("VGVzdFNlY3JldA==").unwrap();
        let raw = WebhookSecret::from_raw("TestSecret");

        assert_eq!(decoded.expose(), raw.expose());
        assert_eq!(raw.to_base64(), "VGVzdFNlY3JldA==");
    }

    #[test]
    fn test_from_base64_strips_prefix() {
        let secret = WebhookSecret::from_base64("whsec_VGVzdFNlY3JldA==").unwrap();
        assert_eq!(secret.expose(), b"TestSecret");
    }

    #[test]
    fn test_from_base64_rejects_garbage() {
        let error = WebhookSecret::from_base64("not base64!").unwrap_err();
        assert_eq!(error.reason(), &VerificationFailure::MalformedSecret);

        let error = WebhookSecret::from_base64("").unwrap_err();
        assert_eq!(error.reason(), &VerificationFailure::MalformedSecret);
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = WebhookSecret::from_raw("TestSecret");
        assert!(!format!("{:?}", secret).contains("TestSecret"));
    }
}

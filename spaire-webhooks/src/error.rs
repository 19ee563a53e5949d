//! Error types for webhook verification and decoding

use thiserror::Error;

/// Errors returned by [`WebhookReceiver::receive`](crate::WebhookReceiver::receive)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WebhookError {
    /// The request could not be authenticated
    #[error(transparent)]
    Verification(#[from] VerificationError),

    /// The request was authentic but its body is not a known payload
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl WebhookError {
    /// Conventional HTTP status for the failure
    ///
    /// Verification failures map to 403 and decode failures to 400.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Verification(_) => 403,
            Self::Decode(_) => 400,
        }
    }

    /// Whether the failure happened while verifying the signature
    pub fn is_verification(&self) -> bool {
        matches!(self, Self::Verification(_))
    }

    /// Whether the failure happened while decoding the body
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

/// Webhook authenticity could not be confirmed.
///
/// The display message never names the failed check and is safe to return to
/// the sender. Use [`reason`](Self::reason) for diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Webhook verification failed")]
pub struct VerificationError {
    reason: VerificationFailure,
}

impl VerificationError {
    /// The specific check that failed
    pub fn reason(&self) -> &VerificationFailure {
        &self.reason
    }
}

impl From<VerificationFailure> for VerificationError {
    fn from(reason: VerificationFailure) -> Self {
        Self { reason }
    }
}

/// Internal reason behind a [`VerificationError`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationFailure {
    /// A required header is absent or empty
    #[error("Missing header: {0}")]
    MissingHeader(&'static str),

    /// The timestamp header is not a numeric epoch time
    #[error("Malformed timestamp header")]
    MalformedTimestamp,

    /// The timestamp is too old or too far in the future
    #[error("Timestamp outside tolerance: {skew_secs} seconds from now")]
    TimestampOutOfTolerance { skew_secs: i64 },

    /// The signature header contains no well-formed `v1` token
    #[error("Malformed signature header")]
    MalformedSignature,

    /// The secret is empty or not valid base64
    #[error("Malformed webhook secret")]
    MalformedSecret,

    /// No signature token matched the computed signature
    #[error("No matching signature found")]
    SignatureMismatch,
}

/// The body could not be decoded into a known payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Not parseable as a JSON object
    #[error("Malformed webhook body: {0}")]
    MalformedBody(String),

    /// The `type` discriminator is absent or not a registered event type
    #[error("Unknown webhook event type: {}", .0.as_deref().unwrap_or("<missing>"))]
    UnknownEventType(Option<String>),

    /// A field is missing or has the wrong shape for the declared event type
    #[error("Schema violation at `{path}`: {message}")]
    SchemaViolation { path: String, message: String },
}

/// Configuration loading failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment value could not be parsed
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

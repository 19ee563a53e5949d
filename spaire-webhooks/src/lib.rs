//! Webhook Verification for Spaire
//!
//! This crate authenticates incoming Spaire webhooks and decodes their bodies
//! into typed event payloads.
//!
//! # Features
//!
//! - **Signature Verification**: HMAC-SHA256 over `{id}.{timestamp}.{body}`,
//!   constant-time comparison, multiple `v1` signatures for secret rotation
//! - **Replay Protection**: Configurable timestamp tolerance (5 minutes by default)
//! - **Typed Decoding**: A closed set of event variants selected by the `type` field
//! - **Schema Errors**: Field paths for every missing or mistyped field
//! - **Strict Mode**: Optionally reject fields the decoder does not know
//!
//! # Example: Receiving Webhooks
//!
//! ```rust,no_run
//! use spaire_webhooks::{WebhookHeaders, WebhookPayload, validate_event};
//! use std::collections::HashMap;
//!
//! let body = br#"{"type": "checkout.created", "timestamp": "...", "data": {}}"#;
//! let mut raw_headers = HashMap::new();
//! raw_headers.insert("webhook-id".to_string(), "msg_1".to_string());
//! raw_headers.insert("webhook-signature".to_string(), "v1,...".to_string());
//! raw_headers.insert("webhook-timestamp".to_string(), "1700000000".to_string());
//!
//! match validate_event(body, &WebhookHeaders::from(&raw_headers), "my-webhook-secret") {
//!     Ok(WebhookPayload::CheckoutCreated(event)) => println!("checkout {}", event.data.id),
//!     Ok(other) => println!("ignoring {}", other.event_type()),
//!     Err(e) if e.is_verification() => println!("rejected: {}", e),
//!     Err(e) => println!("bad payload: {}", e),
//! }
//! ```
//!
//! # Example: Configured Receiver
//!
//! ```rust
//! use spaire_webhooks::{WebhookConfig, WebhookHeaders, WebhookReceiver, WebhookSecret, WebhookVerifier};
//!
//! let config = WebhookConfig::builder().timestamp_tolerance_secs(60).build();
//! let receiver = WebhookReceiver::new(&config);
//! let secret = WebhookSecret::from_base64("whsec_VGVzdFNlY3JldA==").unwrap();
//!
//! let body = br#"{"type": "unknown"}"#;
//! let timestamp = chrono::Utc::now().timestamp();
//! let signature = WebhookVerifier::sign(&secret, "msg_1", timestamp, body).unwrap();
//! let headers = WebhookHeaders::new("msg_1", signature, timestamp.to_string());
//!
//! // Authentic, but not a registered event type
//! assert!(receiver.verify(&secret, &headers, body).is_ok());
//! assert!(receiver.receive(&secret, &headers, body).unwrap_err().is_decode());
//! ```

mod config;
mod decoder;
mod error;
pub mod headers;
mod payload;
mod receiver;
mod secret;
mod signature;

pub use config::{DEFAULT_TOLERANCE, DecodeMode, ENV_PREFIX, WebhookConfig, WebhookConfigBuilder};
pub use decoder::{WebhookDecoder, decode};
pub use error::{ConfigError, DecodeError, VerificationError, VerificationFailure, WebhookError};
pub use headers::WebhookHeaders;
pub use payload::{EventType, WebhookEvent, WebhookPayload};
pub use receiver::{WebhookReceiver, validate_event};
pub use secret::WebhookSecret;
pub use signature::{WebhookVerifier, verify};

/// Re-export of the data contracts carried by events
pub use spaire_models as models;

/// Result type for webhook operations
pub type Result<T> = std::result::Result<T, WebhookError>;

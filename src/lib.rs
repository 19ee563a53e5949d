// Spaire - Rust SDK for the Spaire commerce platform
//
// This library re-exports the data contracts carried by webhook events and,
// with the `webhooks` feature, the verifier and decoder for incoming webhooks.

// Re-export data contracts
pub use spaire_models as models;

// Re-export optional crates
#[cfg(feature = "webhooks")]
pub use spaire_webhooks as webhooks;

// Prelude for common imports
pub mod prelude {
    pub use spaire_models::{
        Benefit, Checkout, CheckoutStatus, Customer, Order, OrderStatus, Product, ProductPrice,
        Refund, Subscription, SubscriptionStatus,
    };

    #[cfg(feature = "webhooks")]
    pub use spaire_webhooks::{
        DecodeError, EventType, VerificationError, WebhookConfig, WebhookError, WebhookEvent,
        WebhookHeaders, WebhookPayload, WebhookReceiver, WebhookSecret, WebhookVerifier,
        validate_event,
    };
}

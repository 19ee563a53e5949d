//! Webhook payload types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use spaire_models::{Benefit, Checkout, Customer, Order, Product, Refund, Subscription};
use std::fmt;

/// Envelope shared by every event: when it happened and the record it concerns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent<T> {
    /// Timestamp when the event occurred
    pub timestamp: DateTime<Utc>,

    /// The record the event is about
    pub data: T,
}

impl<T> WebhookEvent<T> {
    /// Create an event
    pub fn new(timestamp: DateTime<Utc>, data: T) -> Self {
        Self { timestamp, data }
    }
}

/// Event type discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    CheckoutCreated,
    CheckoutUpdated,
    CustomerCreated,
    CustomerUpdated,
    CustomerDeleted,
    OrderCreated,
    OrderUpdated,
    OrderPaid,
    OrderRefunded,
    SubscriptionCreated,
    SubscriptionUpdated,
    SubscriptionActive,
    SubscriptionCanceled,
    SubscriptionUncanceled,
    SubscriptionRevoked,
    RefundCreated,
    RefundUpdated,
    ProductCreated,
    ProductUpdated,
    BenefitCreated,
    BenefitUpdated,
}

impl EventType {
    /// Every registered event type
    pub const ALL: [EventType; 21] = [
        Self::CheckoutCreated,
        Self::CheckoutUpdated,
        Self::CustomerCreated,
        Self::CustomerUpdated,
        Self::CustomerDeleted,
        Self::OrderCreated,
        Self::OrderUpdated,
        Self::OrderPaid,
        Self::OrderRefunded,
        Self::SubscriptionCreated,
        Self::SubscriptionUpdated,
        Self::SubscriptionActive,
        Self::SubscriptionCanceled,
        Self::SubscriptionUncanceled,
        Self::SubscriptionRevoked,
        Self::RefundCreated,
        Self::RefundUpdated,
        Self::ProductCreated,
        Self::ProductUpdated,
        Self::BenefitCreated,
        Self::BenefitUpdated,
    ];

    /// Wire value of the `type` field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CheckoutCreated => "checkout.created",
            Self::CheckoutUpdated => "checkout.updated",
            Self::CustomerCreated => "customer.created",
            Self::CustomerUpdated => "customer.updated",
            Self::CustomerDeleted => "customer.deleted",
            Self::OrderCreated => "order.created",
            Self::OrderUpdated => "order.updated",
            Self::OrderPaid => "order.paid",
            Self::OrderRefunded => "order.refunded",
            Self::SubscriptionCreated => "subscription.created",
            Self::SubscriptionUpdated => "subscription.updated",
            Self::SubscriptionActive => "subscription.active",
            Self::SubscriptionCanceled => "subscription.canceled",
            Self::SubscriptionUncanceled => "subscription.uncanceled",
            Self::SubscriptionRevoked => "subscription.revoked",
            Self::RefundCreated => "refund.created",
            Self::RefundUpdated => "refund.updated",
            Self::ProductCreated => "product.created",
            Self::ProductUpdated => "product.updated",
            Self::BenefitCreated => "benefit.created",
            Self::BenefitUpdated => "benefit.updated",
        }
    }

    /// Parse from the wire value; `None` for unregistered types
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|event_type| event_type.as_str() == tag)
    }

    /// Is a checkout event
    pub fn is_checkout_event(&self) -> bool {
        matches!(self, Self::CheckoutCreated | Self::CheckoutUpdated)
    }

    /// Is an order event
    pub fn is_order_event(&self) -> bool {
        matches!(
            self,
            Self::OrderCreated | Self::OrderUpdated | Self::OrderPaid | Self::OrderRefunded
        )
    }

    /// Is a subscription event
    pub fn is_subscription_event(&self) -> bool {
        matches!(
            self,
            Self::SubscriptionCreated
                | Self::SubscriptionUpdated
                | Self::SubscriptionActive
                | Self::SubscriptionCanceled
                | Self::SubscriptionUncanceled
                | Self::SubscriptionRevoked
        )
    }

    /// Is a customer event
    pub fn is_customer_event(&self) -> bool {
        matches!(
            self,
            Self::CustomerCreated | Self::CustomerUpdated | Self::CustomerDeleted
        )
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded webhook payload, discriminated by its `type` field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum WebhookPayload {
    #[serde(rename = "checkout.created")]
    CheckoutCreated(WebhookEvent<Checkout>),
    #[serde(rename = "checkout.updated")]
    CheckoutUpdated(WebhookEvent<Checkout>),
    #[serde(rename = "customer.created")]
    CustomerCreated(WebhookEvent<Customer>),
    #[serde(rename = "customer.updated")]
    CustomerUpdated(WebhookEvent<Customer>),
    #[serde(rename = "customer.deleted")]
    CustomerDeleted(WebhookEvent<Customer>),
    #[serde(rename = "order.created")]
    OrderCreated(WebhookEvent<Order>),
    #[serde(rename = "order.updated")]
    OrderUpdated(WebhookEvent<Order>),
    #[serde(rename = "order.paid")]
    OrderPaid(WebhookEvent<Order>),
    #[serde(rename = "order.refunded")]
    OrderRefunded(WebhookEvent<Order>),
    #[serde(rename = "subscription.created")]
    SubscriptionCreated(WebhookEvent<Subscription>),
    #[serde(rename = "subscription.updated")]
    SubscriptionUpdated(WebhookEvent<Subscription>),
    #[serde(rename = "subscription.active")]
    SubscriptionActive(WebhookEvent<Subscription>),
    #[serde(rename = "subscription.canceled")]
    SubscriptionCanceled(WebhookEvent<Subscription>),
    #[serde(rename = "subscription.uncanceled")]
    SubscriptionUncanceled(WebhookEvent<Subscription>),
    #[serde(rename = "subscription.revoked")]
    SubscriptionRevoked(WebhookEvent<Subscription>),
    #[serde(rename = "refund.created")]
    RefundCreated(WebhookEvent<Refund>),
    #[serde(rename = "refund.updated")]
    RefundUpdated(WebhookEvent<Refund>),
    #[serde(rename = "product.created")]
    ProductCreated(WebhookEvent<Product>),
    #[serde(rename = "product.updated")]
    ProductUpdated(WebhookEvent<Product>),
    #[serde(rename = "benefit.created")]
    BenefitCreated(WebhookEvent<Benefit>),
    #[serde(rename = "benefit.updated")]
    BenefitUpdated(WebhookEvent<Benefit>),
}

impl WebhookPayload {
    /// The event type of this payload
    pub fn event_type(&self) -> EventType {
        match self {
            Self::CheckoutCreated(_) => EventType::CheckoutCreated,
            Self::CheckoutUpdated(_) => EventType::CheckoutUpdated,
            Self::CustomerCreated(_) => EventType::CustomerCreated,
            Self::CustomerUpdated(_) => EventType::CustomerUpdated,
            Self::CustomerDeleted(_) => EventType::CustomerDeleted,
            Self::OrderCreated(_) => EventType::OrderCreated,
            Self::OrderUpdated(_) => EventType::OrderUpdated,
            Self::OrderPaid(_) => EventType::OrderPaid,
            Self::OrderRefunded(_) => EventType::OrderRefunded,
            Self::SubscriptionCreated(_) => EventType::SubscriptionCreated,
            Self::SubscriptionUpdated(_) => EventType::SubscriptionUpdated,
            Self::SubscriptionActive(_) => EventType::SubscriptionActive,
            Self::SubscriptionCanceled(_) => EventType::SubscriptionCanceled,
            Self::SubscriptionUncanceled(_) => EventType::SubscriptionUncanceled,
            Self::SubscriptionRevoked(_) => EventType::SubscriptionRevoked,
            Self::RefundCreated(_) => EventType::RefundCreated,
            Self::RefundUpdated(_) => EventType::RefundUpdated,
            Self::ProductCreated(_) => EventType::ProductCreated,
            Self::ProductUpdated(_) => EventType::ProductUpdated,
            Self::BenefitCreated(_) => EventType::BenefitCreated,
            Self::BenefitUpdated(_) => EventType::BenefitUpdated,
        }
    }

    /// Timestamp when the event occurred
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::CheckoutCreated(event) | Self::CheckoutUpdated(event) => event.timestamp,
            Self::CustomerCreated(event)
            | Self::CustomerUpdated(event)
            | Self::CustomerDeleted(event) => event.timestamp,
            Self::OrderCreated(event)
            | Self::OrderUpdated(event)
            | Self::OrderPaid(event)
            | Self::OrderRefunded(event) => event.timestamp,
            Self::SubscriptionCreated(event)
            | Self::SubscriptionUpdated(event)
            | Self::SubscriptionActive(event)
            | Self::SubscriptionCanceled(event)
            | Self::SubscriptionUncanceled(event)
            | Self::SubscriptionRevoked(event) => event.timestamp,
            Self::RefundCreated(event) | Self::RefundUpdated(event) => event.timestamp,
            Self::ProductCreated(event) | Self::ProductUpdated(event) => event.timestamp,
            Self::BenefitCreated(event) | Self::BenefitUpdated(event) => event.timestamp,
        }
    }

    /// Convert to JSON bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spaire_models::{RefundReason, RefundStatus};
    use uuid::Uuid;

    fn refund() -> Refund {
        Refund {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            modified_at: None,
            metadata: Default::default(),
            status: RefundStatus::Succeeded,
            reason: RefundReason::CustomerRequest,
            amount: 500,
            tax_amount: 0,
            currency: "usd".to_string(),
            organization_id: Uuid::new_v4(),
            order_id: Uuid::new_v4(),
            subscription_id: None,
            customer_id: Uuid::new_v4(),
            revoke_benefits: false,
        }
    }

    #[test]
    fn test_event_type_tags_round_trip() {
        for event_type in EventType::ALL {
            assert_eq!(EventType::from_tag(event_type.as_str()), Some(event_type));
        }
        assert_eq!(EventType::from_tag("unknown"), None);
        assert_eq!(EventType::from_tag("Checkout.Created"), None);
    }

    #[test]
    fn test_event_type_categories() {
        assert!(EventType::CheckoutCreated.is_checkout_event());
        assert!(!EventType::CheckoutCreated.is_order_event());
        assert!(EventType::OrderPaid.is_order_event());
        assert!(EventType::SubscriptionRevoked.is_subscription_event());
        assert!(EventType::CustomerDeleted.is_customer_event());
    }

    #[test]
    fn test_payload_serializes_type_tag() {
        let timestamp = Utc::now();
        let payload = WebhookPayload::RefundCreated(WebhookEvent::new(timestamp, refund()));

        let value: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
        assert_eq!(value["type"], "refund.created");
        assert_eq!(value["data"]["amount"], 500);
        assert_eq!(payload.event_type(), EventType::RefundCreated);
        assert_eq!(payload.timestamp(), timestamp);
    }
}

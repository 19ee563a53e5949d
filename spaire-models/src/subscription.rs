//! Subscriptions

use crate::common::{Metadata, RecurringInterval};
use crate::customer::Customer;
use crate::discount::Discount;
use crate::product::{Product, ProductPrice};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subscription record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// Subscription ID
    pub id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub modified_at: Option<DateTime<Utc>>,
    /// Amount billed per cycle
    pub amount: i64,
    pub currency: String,
    pub recurring_interval: RecurringInterval,
    pub recurring_interval_count: i64,
    pub status: SubscriptionStatus,

    pub current_period_start: DateTime<Utc>,
    pub current_period_end: Option<DateTime<Utc>>,
    pub trial_start: Option<DateTime<Utc>>,
    pub trial_end: Option<DateTime<Utc>>,
    /// Cancels at the end of the current period
    pub cancel_at_period_end: bool,
    pub canceled_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,

    pub customer_id: Uuid,
    pub product_id: Uuid,
    pub discount_id: Option<Uuid>,
    pub checkout_id: Option<Uuid>,
    pub customer_cancellation_reason: Option<CustomerCancellationReason>,
    pub customer_cancellation_comment: Option<String>,
    pub metadata: Metadata,

    pub customer: Customer,
    pub product: Product,
    pub discount: Option<Discount>,
    pub prices: Vec<ProductPrice>,
}

/// Subscription lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Incomplete,
    IncompleteExpired,
    Trialing,
    Active,
    PastDue,
    Canceled,
    Unpaid,
}

impl SubscriptionStatus {
    /// The customer currently has access to the subscribed benefits
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active | Self::Trialing)
    }

    /// The subscription can no longer become active
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Canceled | Self::IncompleteExpired | Self::Unpaid)
    }
}

/// Reason given by the customer when canceling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerCancellationReason {
    CustomerService,
    LowQuality,
    MissingFeatures,
    SwitchedService,
    TooComplex,
    TooExpensive,
    Unused,
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_status_helpers() {
        assert!(SubscriptionStatus::Active.is_active());
        assert!(SubscriptionStatus::Trialing.is_active());
        assert!(!SubscriptionStatus::PastDue.is_active());

        assert!(SubscriptionStatus::Canceled.is_terminal());
        assert!(!SubscriptionStatus::PastDue.is_terminal());
    }

    #[test]
    fn test_subscription_status_wire_names() {
        let status: SubscriptionStatus = serde_json::from_str("\"incomplete_expired\"").unwrap();
        assert_eq!(status, SubscriptionStatus::IncompleteExpired);

        let reason: CustomerCancellationReason =
            serde_json::from_str("\"too_expensive\"").unwrap();
        assert_eq!(reason, CustomerCancellationReason::TooExpensive);
    }
}

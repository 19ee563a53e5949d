//! Orders

use crate::common::{Address, Metadata};
use crate::customer::Customer;
use crate::discount::Discount;
use crate::product::Product;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Order record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Order ID
    pub id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub modified_at: Option<DateTime<Utc>>,
    /// Payment status
    pub status: OrderStatus,
    /// Whether the order has been paid
    pub paid: bool,

    /// Amount before discounts and taxes
    pub subtotal_amount: i64,
    pub discount_amount: i64,
    /// Amount after discounts, before taxes
    pub net_amount: i64,
    pub tax_amount: i64,
    pub total_amount: i64,
    pub refunded_amount: i64,
    pub refunded_tax_amount: i64,
    pub currency: String,

    pub billing_reason: OrderBillingReason,
    pub billing_name: Option<String>,
    pub billing_address: Option<Address>,
    pub invoice_number: String,
    pub is_invoice_generated: bool,

    pub customer_id: Uuid,
    pub product_id: Option<Uuid>,
    pub discount_id: Option<Uuid>,
    pub subscription_id: Option<Uuid>,
    pub checkout_id: Option<Uuid>,
    pub metadata: Metadata,

    pub customer: Customer,
    pub product: Option<Product>,
    pub discount: Option<Discount>,
    /// Line items
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Amount still refundable, taxes excluded
    pub fn refundable_amount(&self) -> i64 {
        self.net_amount.saturating_sub(self.refunded_amount).max(0)
    }
}

/// Order payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Paid,
    Refunded,
    PartiallyRefunded,
}

/// Why an order was created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderBillingReason {
    Purchase,
    SubscriptionCreate,
    SubscriptionCycle,
    SubscriptionUpdate,
}

/// Single line of an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub label: String,
    pub amount: i64,
    pub tax_amount: i64,
    /// Whether the line is a proration adjustment
    pub proration: bool,
    pub product_price_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(net_amount: i64, refunded_amount: i64) -> Order {
        let customer = Customer {
            id: Uuid::nil(),
            created_at: Utc::now(),
            modified_at: None,
            metadata: Metadata::new(),
            external_id: None,
            email: "jane@example.com".to_string(),
            email_verified: true,
            name: None,
            billing_address: None,
            tax_id: None,
            organization_id: Uuid::nil(),
            deleted_at: None,
            avatar_url: "https://example.com/avatar.png".to_string(),
        };

        Order {
            id: Uuid::nil(),
            created_at: Utc::now(),
            modified_at: None,
            status: OrderStatus::Paid,
            paid: true,
            subtotal_amount: net_amount,
            discount_amount: 0,
            net_amount,
            tax_amount: 0,
            total_amount: net_amount,
            refunded_amount,
            refunded_tax_amount: 0,
            currency: "usd".to_string(),
            billing_reason: OrderBillingReason::Purchase,
            billing_name: None,
            billing_address: None,
            invoice_number: "INV-1".to_string(),
            is_invoice_generated: false,
            customer_id: Uuid::nil(),
            product_id: None,
            discount_id: None,
            subscription_id: None,
            checkout_id: None,
            metadata: Metadata::new(),
            customer,
            product: None,
            discount: None,
            items: Vec::new(),
        }
    }

    #[test]
    fn test_refundable_amount() {
        assert_eq!(order(1000, 400).refundable_amount(), 600);
        assert_eq!(order(1000, 1200).refundable_amount(), 0);
        assert_eq!(order(i64::MAX, -1).refundable_amount(), i64::MAX);
        assert_eq!(order(i64::MIN, 1).refundable_amount(), 0);
    }

    #[test]
    fn test_order_status_wire_names() {
        let status: OrderStatus = serde_json::from_str("\"partially_refunded\"").unwrap();
        assert_eq!(status, OrderStatus::PartiallyRefunded);
    }

    #[test]
    fn test_billing_reason_wire_names() {
        let reason: OrderBillingReason = serde_json::from_str("\"subscription_cycle\"").unwrap();
        assert_eq!(reason, OrderBillingReason::SubscriptionCycle);
        assert!(serde_json::from_str::<OrderBillingReason>("\"gift\"").is_err());
    }
}

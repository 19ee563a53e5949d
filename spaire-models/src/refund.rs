//! Refunds

use crate::common::Metadata;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Refund record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Refund {
    /// Refund ID
    pub id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub modified_at: Option<DateTime<Utc>>,
    /// User-defined metadata
    pub metadata: Metadata,
    /// Status
    pub status: RefundStatus,
    /// Reason
    pub reason: RefundReason,
    /// Refunded amount, taxes excluded
    pub amount: i64,
    /// Refunded tax amount
    pub tax_amount: i64,
    pub currency: String,
    pub organization_id: Uuid,
    pub order_id: Uuid,
    pub subscription_id: Option<Uuid>,
    pub customer_id: Uuid,
    /// Whether the customer loses the granted benefits
    pub revoke_benefits: bool,
}

/// Refund status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundStatus {
    Pending,
    Succeeded,
    Failed,
    Canceled,
}

/// Refund reason
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundReason {
    Duplicate,
    Fraudulent,
    CustomerRequest,
    ServiceDisruption,
    SatisfactionGuarantee,
    DisputePrevention,
    Other,
}

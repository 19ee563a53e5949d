//! Customers

use crate::common::{Address, Metadata};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Customer record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Customer ID
    pub id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub modified_at: Option<DateTime<Utc>>,
    /// User-defined metadata
    pub metadata: Metadata,
    /// ID in the merchant's own system
    pub external_id: Option<String>,
    /// Email address
    pub email: String,
    /// Whether the email address was verified
    pub email_verified: bool,
    /// Display name
    pub name: Option<String>,
    /// Billing address
    pub billing_address: Option<Address>,
    /// Tax ID as `[value, format]`
    pub tax_id: Option<Vec<String>>,
    /// Owning organization
    pub organization_id: Uuid,
    /// Set once the customer is deleted
    pub deleted_at: Option<DateTime<Utc>>,
    /// Avatar URL
    pub avatar_url: String,
}

impl Customer {
    /// Whether the customer has been deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

//! Checkout sessions

use crate::common::{Address, Metadata, MetadataValue, PaymentProcessor, RecurringInterval};
use crate::discount::Discount;
use crate::product::{AttachedCustomField, CheckoutProduct, ProductPrice};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Checkout session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkout {
    /// Checkout ID
    pub id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub modified_at: Option<DateTime<Utc>>,
    /// Session status
    pub status: CheckoutStatus,
    /// Secret used by the client to access the session
    pub client_secret: String,
    /// Hosted checkout URL
    pub url: String,
    /// When the session expires
    pub expires_at: DateTime<Utc>,
    /// Redirect target after a successful payment
    pub success_url: String,
    pub return_url: Option<String>,
    pub embed_origin: Option<String>,

    // Amounts, in the currency's smallest unit
    pub amount: i64,
    pub discount_amount: i64,
    pub net_amount: i64,
    /// Unknown until the billing address is collected
    pub tax_amount: Option<i64>,
    pub total_amount: i64,
    pub currency: String,

    pub allow_trial: Option<bool>,
    pub active_trial_interval: Option<RecurringInterval>,
    pub active_trial_interval_count: Option<i64>,
    pub trial_end: Option<DateTime<Utc>>,
    pub trial_interval: Option<RecurringInterval>,
    pub trial_interval_count: Option<i64>,

    pub organization_id: Uuid,
    pub product_id: Option<Uuid>,
    pub product_price_id: Option<Uuid>,
    pub discount_id: Option<Uuid>,
    pub subscription_id: Option<Uuid>,

    pub allow_discount_codes: bool,
    pub require_billing_address: bool,
    pub is_discount_applicable: bool,
    pub is_free_product_price: bool,
    pub is_payment_required: bool,
    pub is_payment_setup_required: bool,
    pub is_payment_form_required: bool,
    pub is_business_customer: bool,

    pub customer_id: Option<Uuid>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_ip_address: Option<String>,
    pub customer_billing_name: Option<String>,
    pub customer_billing_address: Option<Address>,
    pub customer_tax_id: Option<String>,
    pub customer_metadata: Metadata,
    pub external_customer_id: Option<String>,
    pub customer_external_id: Option<String>,

    /// Which billing address fields the form collects
    pub billing_address_fields: CheckoutBillingAddressFields,
    pub payment_processor: PaymentProcessor,
    pub payment_processor_metadata: HashMap<String, String>,
    pub metadata: Metadata,

    /// Products offered in the session
    pub products: Vec<CheckoutProduct>,
    /// Currently selected product
    pub product: Option<CheckoutProduct>,
    /// Currently selected price
    pub product_price: Option<ProductPrice>,
    /// Prices keyed by product ID
    pub prices: Option<HashMap<String, Vec<ProductPrice>>>,
    pub discount: Option<Discount>,

    pub attached_custom_fields: Vec<AttachedCustomField>,
    pub custom_field_data: Option<HashMap<String, Option<MetadataValue>>>,
}

impl Checkout {
    /// Whether the session can still be completed
    pub fn is_open(&self) -> bool {
        self.status == CheckoutStatus::Open
    }
}

/// Checkout session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStatus {
    Open,
    Expired,
    Confirmed,
    Succeeded,
    Failed,
}

impl CheckoutStatus {
    /// No further transitions happen from this status
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Expired | Self::Succeeded | Self::Failed)
    }
}

/// Collection mode for a single billing address field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingAddressFieldMode {
    Required,
    Optional,
    Disabled,
}

/// Per-field billing address collection modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutBillingAddressFields {
    pub country: BillingAddressFieldMode,
    pub state: BillingAddressFieldMode,
    pub city: BillingAddressFieldMode,
    pub postal_code: BillingAddressFieldMode,
    pub line1: BillingAddressFieldMode,
    pub line2: BillingAddressFieldMode,
}

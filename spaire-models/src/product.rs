//! Products, prices and product media

use crate::benefit::BenefitPublic;
use crate::common::{Metadata, RecurringInterval};
use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product as embedded in a checkout session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutProduct {
    /// Product ID
    pub id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub modified_at: Option<DateTime<Utc>>,
    /// Trial interval, if the product offers one
    pub trial_interval: Option<RecurringInterval>,
    /// Number of trial intervals
    pub trial_interval_count: Option<i64>,
    /// Display name
    pub name: String,
    /// Description
    pub description: Option<String>,
    /// Billing interval for recurring products
    pub recurring_interval: Option<RecurringInterval>,
    /// Number of billing intervals per cycle
    pub recurring_interval_count: Option<i64>,
    /// Whether the product is a subscription
    pub is_recurring: bool,
    /// Whether the product is archived
    pub is_archived: bool,
    /// Owning organization
    pub organization_id: Uuid,
    /// Prices offered for the product
    pub prices: Vec<ProductPrice>,
    /// Benefits granted by the product
    pub benefits: Vec<BenefitPublic>,
    /// Media attached to the product
    pub medias: Vec<ProductMedia>,
}

/// Full product record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub trial_interval: Option<RecurringInterval>,
    pub trial_interval_count: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub recurring_interval: Option<RecurringInterval>,
    pub recurring_interval_count: Option<i64>,
    pub is_recurring: bool,
    pub is_archived: bool,
    pub organization_id: Uuid,
    pub metadata: Metadata,
    pub prices: Vec<ProductPrice>,
    pub benefits: Vec<BenefitPublic>,
    pub medias: Vec<ProductMedia>,
    pub attached_custom_fields: Vec<AttachedCustomField>,
}

/// A product price, discriminated by `amount_type`
///
/// Deserialization reads the price in a single pass rather than buffering it
/// like an internally tagged enum, so field errors and unknown fields are
/// reported at their position inside the price.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "amount_type", rename_all = "snake_case")]
pub enum ProductPrice {
    /// Fixed amount
    Fixed(ProductPriceFixed),
    /// Pay-what-you-want
    Custom(ProductPriceCustom),
    /// Free
    Free(ProductPriceFree),
}

impl ProductPrice {
    /// Price ID
    pub fn id(&self) -> Uuid {
        match self {
            Self::Fixed(price) => price.id,
            Self::Custom(price) => price.id,
            Self::Free(price) => price.id,
        }
    }

    /// Product the price belongs to
    pub fn product_id(&self) -> Uuid {
        match self {
            Self::Fixed(price) => price.product_id,
            Self::Custom(price) => price.product_id,
            Self::Free(price) => price.product_id,
        }
    }

    /// Whether the price is archived
    pub fn is_archived(&self) -> bool {
        match self {
            Self::Fixed(price) => price.is_archived,
            Self::Custom(price) => price.is_archived,
            Self::Free(price) => price.is_archived,
        }
    }

    /// Wire value of the `amount_type` discriminator
    pub fn amount_type(&self) -> &'static str {
        match self {
            Self::Fixed(_) => "fixed",
            Self::Custom(_) => "custom",
            Self::Free(_) => "free",
        }
    }
}

impl<'de> Deserialize<'de> for ProductPrice {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        ProductPriceWire::deserialize(deserializer)?.into_price()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum AmountType {
    Fixed,
    Custom,
    Free,
}

/// Union of the fields carried by every price variant
#[derive(Deserialize)]
struct ProductPriceWire {
    amount_type: AmountType,
    id: Uuid,
    created_at: DateTime<Utc>,
    modified_at: Option<DateTime<Utc>>,
    source: ProductPriceSource,
    is_archived: bool,
    product_id: Uuid,
    #[serde(rename = "type")]
    price_type: ProductPriceType,
    recurring_interval: Option<RecurringInterval>,
    price_currency: Option<String>,
    price_amount: Option<i64>,
    minimum_amount: Option<i64>,
    maximum_amount: Option<i64>,
    preset_amount: Option<i64>,
}

impl ProductPriceWire {
    fn into_price<E: de::Error>(self) -> Result<ProductPrice, E> {
        let price = match self.amount_type {
            AmountType::Fixed => ProductPrice::Fixed(ProductPriceFixed {
                id: self.id,
                created_at: self.created_at,
                modified_at: self.modified_at,
                source: self.source,
                is_archived: self.is_archived,
                product_id: self.product_id,
                price_type: self.price_type,
                recurring_interval: self.recurring_interval,
                price_currency: required(self.price_currency, "price_currency")?,
                price_amount: required(self.price_amount, "price_amount")?,
            }),
            AmountType::Custom => ProductPrice::Custom(ProductPriceCustom {
                id: self.id,
                created_at: self.created_at,
                modified_at: self.modified_at,
                source: self.source,
                is_archived: self.is_archived,
                product_id: self.product_id,
                price_type: self.price_type,
                recurring_interval: self.recurring_interval,
                price_currency: required(self.price_currency, "price_currency")?,
                minimum_amount: self.minimum_amount,
                maximum_amount: self.maximum_amount,
                preset_amount: self.preset_amount,
            }),
            AmountType::Free => ProductPrice::Free(ProductPriceFree {
                id: self.id,
                created_at: self.created_at,
                modified_at: self.modified_at,
                source: self.source,
                is_archived: self.is_archived,
                product_id: self.product_id,
                price_type: self.price_type,
                recurring_interval: self.recurring_interval,
            }),
        };
        Ok(price)
    }
}

fn required<T, E: de::Error>(value: Option<T>, field: &'static str) -> Result<T, E> {
    value.ok_or_else(|| E::missing_field(field))
}

/// Fixed-amount price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPriceFixed {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub source: ProductPriceSource,
    pub is_archived: bool,
    pub product_id: Uuid,
    #[serde(rename = "type")]
    pub price_type: ProductPriceType,
    pub recurring_interval: Option<RecurringInterval>,
    /// Lowercase ISO 4217 currency code
    pub price_currency: String,
    /// Amount in the currency's smallest unit
    pub price_amount: i64,
}

/// Customer-chosen price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPriceCustom {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub source: ProductPriceSource,
    pub is_archived: bool,
    pub product_id: Uuid,
    #[serde(rename = "type")]
    pub price_type: ProductPriceType,
    pub recurring_interval: Option<RecurringInterval>,
    pub price_currency: String,
    pub minimum_amount: Option<i64>,
    pub maximum_amount: Option<i64>,
    pub preset_amount: Option<i64>,
}

/// Free price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPriceFree {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub source: ProductPriceSource,
    pub is_archived: bool,
    pub product_id: Uuid,
    #[serde(rename = "type")]
    pub price_type: ProductPriceType,
    pub recurring_interval: Option<RecurringInterval>,
}

/// Where a price was defined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductPriceSource {
    /// Part of the product catalog
    Catalog,
    /// Created for a single checkout
    AdHoc,
}

/// Billing model of a price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductPriceType {
    OneTime,
    Recurring,
}

impl ProductPriceType {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneTime => "one_time",
            Self::Recurring => "recurring",
        }
    }
}

/// File attached to a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductMedia {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub path: String,
    pub mime_type: String,
    /// Size in bytes
    pub size: i64,
    pub is_uploaded: bool,
    pub created_at: DateTime<Utc>,
    pub public_url: String,
}

/// Custom field attached to a product or checkout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachedCustomField {
    pub custom_field_id: Uuid,
    /// Display position
    pub order: i64,
    pub required: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixed_price_json() -> serde_json::Value {
        json!({
            "amount_type": "fixed",
            "id": "0a5c1e6f-3f4a-4b8e-9c57-5d2f6a1b9e01",
            "created_at": "2024-10-15T12:00:00Z",
            "modified_at": null,
            "source": "catalog",
            "is_archived": false,
            "product_id": "6f0b2c7e-8d1a-4f6b-a3c2-1e9d8f7a6b50",
            "type": "one_time",
            "recurring_interval": null,
            "price_currency": "usd",
            "price_amount": 1000
        })
    }

    #[test]
    fn test_price_dispatches_on_amount_type() {
        let price: ProductPrice = serde_json::from_value(fixed_price_json()).unwrap();

        match &price {
            ProductPrice::Fixed(fixed) => {
                assert_eq!(fixed.price_amount, 1000);
                assert_eq!(fixed.price_type, ProductPriceType::OneTime);
                assert_eq!(fixed.source, ProductPriceSource::Catalog);
            }
            other => panic!("expected fixed price, got {:?}", other),
        }
        assert_eq!(price.amount_type(), "fixed");
        assert!(!price.is_archived());
    }

    #[test]
    fn test_price_rejects_unknown_amount_type() {
        let mut value = fixed_price_json();
        value["amount_type"] = json!("tiered");

        assert!(serde_json::from_value::<ProductPrice>(value).is_err());
    }

    #[test]
    fn test_fixed_price_requires_amount() {
        let mut value = fixed_price_json();
        value.as_object_mut().unwrap().remove("price_amount");

        assert!(serde_json::from_value::<ProductPrice>(value).is_err());
    }

    #[test]
    fn test_missing_variant_field_is_named() {
        let mut value = fixed_price_json();
        value.as_object_mut().unwrap().remove("price_currency");

        let error = serde_json::from_value::<ProductPrice>(value).unwrap_err();
        assert_eq!(error.to_string(), "missing field `price_currency`");
    }

    #[test]
    fn test_custom_and_free_prices() {
        let mut value = fixed_price_json();
        value["amount_type"] = json!("custom");
        value.as_object_mut().unwrap().remove("price_amount");
        value["minimum_amount"] = json!(500);
        value["preset_amount"] = json!(null);

        match serde_json::from_value::<ProductPrice>(value).unwrap() {
            ProductPrice::Custom(custom) => {
                assert_eq!(custom.minimum_amount, Some(500));
                assert_eq!(custom.maximum_amount, None);
                assert_eq!(custom.preset_amount, None);
            }
            other => panic!("expected custom price, got {:?}", other),
        }

        let mut value = fixed_price_json();
        value["amount_type"] = json!("free");
        let price: ProductPrice = serde_json::from_value(value).unwrap();
        assert_eq!(price.amount_type(), "free");
    }

    #[test]
    fn test_price_serializes_discriminator() {
        let price: ProductPrice = serde_json::from_value(fixed_price_json()).unwrap();
        let value = serde_json::to_value(&price).unwrap();

        assert_eq!(value["amount_type"], "fixed");
        assert_eq!(value["type"], "one_time");
        assert_eq!(serde_json::from_value::<ProductPrice>(value).unwrap(), price);
    }
}

//! Discounts applied to checkouts and subscriptions

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How the discount amount is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// Fixed amount off, see `amount` and `currency`
    Fixed,
    /// Percentage off, see `basis_points`
    Percentage,
}

/// How long a discount applies to a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountDuration {
    Once,
    Forever,
    Repeating,
}

/// Discount summary embedded in checkouts, orders and subscriptions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    pub id: Uuid,
    pub name: String,
    pub code: Option<String>,
    #[serde(rename = "type")]
    pub discount_type: DiscountType,
    pub duration: DiscountDuration,
    /// Only set for `repeating` discounts
    pub duration_in_months: Option<i64>,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    /// 1/100th of a percent
    pub basis_points: Option<i64>,
}

impl Discount {
    /// Apply the discount to an amount, never going below zero
    pub fn apply(&self, amount: i64) -> i64 {
        // Wide arithmetic: wire amounts and basis points are unbounded i64
        let amount = i128::from(amount);
        let reduction = match self.discount_type {
            DiscountType::Fixed => i128::from(self.amount.unwrap_or(0)),
            DiscountType::Percentage => amount * i128::from(self.basis_points.unwrap_or(0)) / 10_000,
        };
        i64::try_from((amount - reduction).max(0)).unwrap_or(i64::MAX)
    }
}

//! Data Contracts for Spaire Webhook Events
//!
//! Typed records carried in the `data` field of Spaire webhook payloads.
//! These are consumed as-is by `spaire-webhooks`; nothing here performs I/O.
//!
//! ## Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Webhook Payload                          │
//! │  { "type": "checkout.created", "timestamp": ..., "data": ... } │
//! │                             │                                 │
//! │     ┌──────────┬────────────┼────────────┬──────────┐         │
//! │     ▼          ▼            ▼            ▼          ▼         │
//! │ ┌────────┐ ┌────────┐ ┌──────────────┐ ┌──────┐ ┌─────────┐   │
//! │ │Checkout│ │ Order  │ │ Subscription │ │Refund│ │Customer │   │
//! │ └────────┘ └────────┘ └──────────────┘ └──────┘ └─────────┘   │
//! │     │          │            │                                 │
//! │     └──────────┴─────┬──────┘                                 │
//! │                      ▼                                        │
//! │          Product ── ProductPrice ── Benefit                   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Enumerated fields are closed enums; an unrecognized value is a decode
//! error, not a fallback. Nullable fields are `Option<T>`.
//!
//! ## Example
//!
//! ```rust
//! use spaire_models::{CheckoutStatus, ProductPriceType};
//!
//! let status: CheckoutStatus = serde_json::from_str("\"open\"").unwrap();
//! assert_eq!(status, CheckoutStatus::Open);
//! assert_eq!(ProductPriceType::OneTime.as_str(), "one_time");
//! ```

pub mod benefit;
pub mod checkout;
pub mod common;
pub mod customer;
pub mod discount;
pub mod order;
pub mod product;
pub mod refund;
pub mod subscription;

pub use benefit::*;
pub use checkout::*;
pub use common::*;
pub use customer::*;
pub use discount::*;
pub use order::*;
pub use product::*;
pub use refund::*;
pub use subscription::*;

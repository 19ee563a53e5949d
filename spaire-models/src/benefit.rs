//! Benefits granted by products

use crate::common::Metadata;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of benefit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenefitType {
    Custom,
    Discord,
    GithubRepository,
    Downloadables,
    LicenseKeys,
    MeterCredit,
}

/// Benefit as exposed on a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitPublic {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub benefit_type: BenefitType,
    pub description: String,
    pub selectable: bool,
    pub deletable: bool,
    pub organization_id: Uuid,
}

/// Full benefit record carried by `benefit.*` events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benefit {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub benefit_type: BenefitType,
    pub description: String,
    pub selectable: bool,
    pub deletable: bool,
    pub organization_id: Uuid,
    pub metadata: Metadata,
    /// Type-specific settings; shape depends on `benefit_type`
    pub properties: serde_json::Map<String, serde_json::Value>,
}

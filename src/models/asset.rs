//! Asset model and related types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::filter::Searchable;

/// Asset lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    Active,
    Maintenance,
    Retired,
    Pending,
}

impl AssetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Active => "active",
            AssetStatus::Maintenance => "maintenance",
            AssetStatus::Retired => "retired",
            AssetStatus::Pending => "pending",
        }
    }

    /// Capitalized label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            AssetStatus::Active => "Active",
            AssetStatus::Maintenance => "Maintenance",
            AssetStatus::Retired => "Retired",
            AssetStatus::Pending => "Pending",
        }
    }
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AssetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(AssetStatus::Active),
            "maintenance" => Ok(AssetStatus::Maintenance),
            "retired" => Ok(AssetStatus::Retired),
            "pending" => Ok(AssetStatus::Pending),
            _ => Err(format!("Invalid asset status: {}", s)),
        }
    }
}

/// Stored asset record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Asset {
    pub id: i32,
    /// Printed tag, also encoded in the asset's QR code (e.g. RH-TV-001)
    pub asset_tag: String,
    pub name: String,
    /// Open category set (Electronics, Furniture, HVAC Systems, ...)
    pub category: String,
    pub location: String,
    pub status: AssetStatus,
    pub purchase_date: NaiveDate,
    #[schema(value_type = f64)]
    pub value: Decimal,
    pub description: Option<String>,
    pub assigned_user_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Asset with references resolved for display
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssetDetails {
    #[serde(flatten)]
    pub asset: Asset,
    pub assigned_user_name: Option<String>,
}

impl Searchable for AssetDetails {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.asset.name.as_str(),
            self.asset.location.as_str(),
            self.asset.asset_tag.as_str(),
        ];
        if let Some(ref user) = self.assigned_user_name {
            fields.push(user.as_str());
        }
        fields
    }
}

/// Asset list query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct AssetQuery {
    /// Matches name, location, tag or assigned user
    pub search: Option<String>,
    /// Exact category, or "All"
    pub category: Option<String>,
    /// Status (any case), or "All"
    pub status: Option<String>,
}

/// Create asset request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAsset {
    #[validate(length(min = 1, message = "Asset tag is required"))]
    pub asset_tag: String,
    #[validate(length(min = 1, message = "Asset name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    pub status: Option<AssetStatus>,
    pub purchase_date: NaiveDate,
    #[schema(value_type = f64)]
    pub value: Decimal,
    pub description: Option<String>,
    pub assigned_user_id: Option<i32>,
}

/// Update asset request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAsset {
    #[validate(length(min = 1, message = "Asset tag is required"))]
    pub asset_tag: Option<String>,
    #[validate(length(min = 1, message = "Asset name is required"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: Option<String>,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: Option<String>,
    pub status: Option<AssetStatus>,
    pub purchase_date: Option<NaiveDate>,
    #[schema(value_type = Option<f64>)]
    pub value: Option<Decimal>,
    pub description: Option<String>,
    pub assigned_user_id: Option<i32>,
}

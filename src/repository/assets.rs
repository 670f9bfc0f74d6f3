//! Assets repository

use chrono::Utc;

use super::{shared_table, SharedTable};
use crate::{
    error::{AppError, AppResult},
    models::asset::{Asset, AssetStatus, CreateAsset, UpdateAsset},
};

#[derive(Clone)]
pub struct AssetsRepository {
    table: SharedTable<Asset>,
}

impl AssetsRepository {
    pub fn new() -> Self {
        Self {
            table: shared_table(),
        }
    }

    /// List all assets in insertion order
    pub async fn list(&self) -> AppResult<Vec<Asset>> {
        Ok(self.table.read().await.to_vec())
    }

    /// Get asset by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Asset> {
        self.table
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))
    }

    /// Find an asset by its tag (case-insensitive, as typed from a QR label)
    pub async fn find_by_tag(&self, tag: &str) -> AppResult<Option<Asset>> {
        let tag = tag.trim();
        Ok(self
            .table
            .read()
            .await
            .iter()
            .find(|a| a.asset_tag.eq_ignore_ascii_case(tag))
            .cloned())
    }

    /// Check if a tag is already used by another asset
    pub async fn tag_exists(&self, tag: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        Ok(self
            .table
            .read()
            .await
            .iter()
            .any(|a| a.asset_tag.eq_ignore_ascii_case(tag) && Some(a.id) != exclude_id))
    }

    /// Store a fully built asset under a fresh id
    pub async fn insert(&self, mut asset: Asset) -> AppResult<Asset> {
        let mut table = self.table.write().await;
        asset.id = table.allocate_id();
        table.push(asset.id, asset.clone());
        Ok(asset)
    }

    /// Create asset
    pub async fn create(&self, data: &CreateAsset) -> AppResult<Asset> {
        self.insert(Asset {
            id: 0,
            asset_tag: data.asset_tag.trim().to_string(),
            name: data.name.clone(),
            category: data.category.clone(),
            location: data.location.clone(),
            status: data.status.unwrap_or(AssetStatus::Active),
            purchase_date: data.purchase_date,
            value: data.value,
            description: data.description.clone(),
            assigned_user_id: data.assigned_user_id,
            created_at: Utc::now(),
            updated_at: None,
        })
        .await
    }

    /// Update asset, field by field
    pub async fn update(&self, id: i32, data: &UpdateAsset) -> AppResult<Asset> {
        let mut table = self.table.write().await;
        let asset = table
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))?;

        macro_rules! set_field {
            ($field:ident) => {
                if let Some(ref val) = data.$field {
                    asset.$field = val.clone();
                }
            };
        }

        set_field!(asset_tag);
        set_field!(name);
        set_field!(category);
        set_field!(location);
        set_field!(status);
        set_field!(purchase_date);
        set_field!(value);
        if data.description.is_some() {
            asset.description = data.description.clone();
        }
        if data.assigned_user_id.is_some() {
            asset.assigned_user_id = data.assigned_user_id;
        }
        asset.updated_at = Some(Utc::now());

        Ok(asset.clone())
    }

    /// Delete asset
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.table
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))
    }
}

impl Default for AssetsRepository {
    fn default() -> Self {
        Self::new()
    }
}

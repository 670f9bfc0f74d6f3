//! Asset service

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::{
    error::{AppError, AppResult},
    filter::RecordFilter,
    models::asset::{Asset, AssetDetails, AssetQuery, CreateAsset, UpdateAsset},
    repository::Repository,
};

#[derive(Clone)]
pub struct AssetsService {
    repository: Repository,
}

impl AssetsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Filtered asset list in insertion order
    pub async fn list(&self, query: &AssetQuery) -> AppResult<Vec<AssetDetails>> {
        let assets = self.details(self.repository.assets.list().await?).await?;
        Ok(RecordFilter::new(query.search.as_deref())
            .exact(query.category.as_deref(), |a: &AssetDetails| a.asset.category.as_str())
            .ignore_case(query.status.as_deref(), |a: &AssetDetails| a.asset.status.as_str())
            .apply(assets))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<AssetDetails> {
        let asset = self.repository.assets.get_by_id(id).await?;
        self.detail(asset).await
    }

    /// Look an asset up by its printed (QR) tag
    pub async fn get_by_tag(&self, tag: &str) -> AppResult<AssetDetails> {
        let asset = self
            .repository
            .assets
            .find_by_tag(tag)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No asset with tag {}", tag.trim())))?;
        self.detail(asset).await
    }

    pub async fn create(&self, data: &CreateAsset) -> AppResult<AssetDetails> {
        check_value(Some(data.value))?;
        if self.repository.assets.tag_exists(&data.asset_tag, None).await? {
            return Err(AppError::Conflict(format!(
                "Asset tag {} already exists",
                data.asset_tag.trim()
            )));
        }
        self.check_user(data.assigned_user_id).await?;

        let asset = self.repository.assets.create(data).await?;
        tracing::info!(asset_id = asset.id, tag = %asset.asset_tag, "Asset created");
        self.detail(asset).await
    }

    pub async fn update(&self, id: i32, data: &UpdateAsset) -> AppResult<AssetDetails> {
        check_value(data.value)?;
        if let Some(ref tag) = data.asset_tag {
            if self.repository.assets.tag_exists(tag, Some(id)).await? {
                return Err(AppError::Conflict(format!(
                    "Asset tag {} already exists",
                    tag.trim()
                )));
            }
        }
        self.check_user(data.assigned_user_id).await?;

        let asset = self.repository.assets.update(id, data).await?;
        tracing::info!(asset_id = id, "Asset updated");
        self.detail(asset).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.assets.delete(id).await?;
        tracing::info!(asset_id = id, "Asset deleted");
        Ok(())
    }

    async fn check_user(&self, user_id: Option<i32>) -> AppResult<()> {
        if let Some(user_id) = user_id {
            self.repository
                .users
                .get_by_id(user_id)
                .await
                .map_err(|_| AppError::Validation(format!("User {} does not exist", user_id)))?;
        }
        Ok(())
    }

    async fn detail(&self, asset: Asset) -> AppResult<AssetDetails> {
        Ok(self.details(vec![asset]).await?.remove(0))
    }

    async fn details(&self, assets: Vec<Asset>) -> AppResult<Vec<AssetDetails>> {
        let names: HashMap<i32, String> = self
            .repository
            .users
            .list()
            .await?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();

        Ok(assets
            .into_iter()
            .map(|asset| AssetDetails {
                assigned_user_name: asset
                    .assigned_user_id
                    .and_then(|id| names.get(&id).cloned()),
                asset,
            })
            .collect())
    }
}

fn check_value(value: Option<Decimal>) -> AppResult<()> {
    match value {
        Some(v) if v.is_sign_negative() && !v.is_zero() => Err(AppError::Validation(
            "Value must be zero or more".to_string(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::seed::seed_sample_data;

    async fn service() -> AssetsService {
        let repository = Repository::new();
        seed_sample_data(&repository, "hash").await.unwrap();
        AssetsService::new(repository)
    }

    fn query(search: &str, category: &str, status: &str) -> AssetQuery {
        AssetQuery {
            search: Some(search.to_string()),
            category: Some(category.to_string()),
            status: Some(status.to_string()),
        }
    }

    #[tokio::test]
    async fn test_filter_assets() {
        let service = service().await;

        let all = service.list(&query("", "All", "All")).await.unwrap();
        assert_eq!(all.len(), 9);

        let furniture = service.list(&query("", "Furniture", "All")).await.unwrap();
        let tags: Vec<_> = furniture.iter().map(|a| a.asset.asset_tag.as_str()).collect();
        assert_eq!(tags, vec!["RH-BED-003", "RH-DESK-005"]);

        let retired = service.list(&query("room", "All", "Retired")).await.unwrap();
        assert_eq!(retired.len(), 1);
        assert_eq!(retired[0].asset.asset_tag, "RH-REF-004");

        let none = service.list(&query("", "Spaceships", "All")).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_by_tag() {
        let service = service().await;
        let asset = service.get_by_tag(" rh-ac-002 ").await.unwrap();
        assert_eq!(asset.asset.name, "Daikin Split AC Unit");
        assert!(matches!(
            service.get_by_tag("RH-XXX-999").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_tag_rejected() {
        let service = service().await;
        let data = UpdateAsset {
            asset_tag: Some("RH-TV-001".to_string()),
            ..Default::default()
        };
        assert!(matches!(service.update(2, &data).await, Err(AppError::Conflict(_))));

        let data = UpdateAsset {
            value: Some(Decimal::from(-5)),
            ..Default::default()
        };
        assert!(matches!(service.update(2, &data).await, Err(AppError::Validation(_))));
    }
}

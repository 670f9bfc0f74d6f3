//! Hotel settings service

use crate::{
    error::AppResult,
    models::settings::{HotelSettings, UpdateSettings},
    repository::Repository,
};

#[derive(Clone)]
pub struct SettingsService {
    repository: Repository,
}

impl SettingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_settings(&self) -> AppResult<HotelSettings> {
        self.repository.settings.get().await
    }

    pub async fn update_settings(&self, data: &UpdateSettings) -> AppResult<HotelSettings> {
        let settings = self.repository.settings.update(data).await?;
        tracing::info!(hotel = %settings.hotel_name, "Settings updated");
        Ok(settings)
    }
}

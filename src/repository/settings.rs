//! Hotel settings repository (a single row)

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    error::AppResult,
    models::settings::{HotelSettings, UpdateSettings},
};

#[derive(Clone)]
pub struct SettingsRepository {
    settings: Arc<RwLock<HotelSettings>>,
}

impl SettingsRepository {
    pub fn new() -> Self {
        Self {
            settings: Arc::new(RwLock::new(HotelSettings::default())),
        }
    }

    pub async fn get(&self) -> AppResult<HotelSettings> {
        Ok(self.settings.read().await.clone())
    }

    pub async fn update(&self, data: &UpdateSettings) -> AppResult<HotelSettings> {
        let mut settings = self.settings.write().await;

        macro_rules! set_field {
            ($field:ident) => {
                if let Some(ref val) = data.$field {
                    settings.$field = val.clone();
                }
            };
        }

        set_field!(hotel_name);
        set_field!(hotel_address);
        set_field!(hotel_phone);
        set_field!(hotel_email);
        set_field!(email_notifications);
        set_field!(maintenance_alerts);
        set_field!(task_reminders);

        Ok(settings.clone())
    }
}

impl Default for SettingsRepository {
    fn default() -> Self {
        Self::new()
    }
}

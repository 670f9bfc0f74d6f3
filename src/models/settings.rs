//! Hotel settings model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Property details and notification preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HotelSettings {
    /// Printed as the organization name on PDF exports
    pub hotel_name: String,
    pub hotel_address: String,
    pub hotel_phone: String,
    pub hotel_email: String,
    pub email_notifications: bool,
    pub maintenance_alerts: bool,
    pub task_reminders: bool,
}

impl Default for HotelSettings {
    fn default() -> Self {
        Self {
            hotel_name: "Ramayana Hotel Makassar".to_string(),
            hotel_address: "Jl. Somba Opu No. 297, Makassar, South Sulawesi".to_string(),
            hotel_phone: "+62 411 872 2272".to_string(),
            hotel_email: "info@ramayanahotel.com".to_string(),
            email_notifications: true,
            maintenance_alerts: true,
            task_reminders: true,
        }
    }
}

/// Update settings request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSettings {
    #[validate(length(min = 1, message = "Hotel name is required"))]
    pub hotel_name: Option<String>,
    pub hotel_address: Option<String>,
    pub hotel_phone: Option<String>,
    #[validate(email(message = "Please enter a valid email address"))]
    pub hotel_email: Option<String>,
    pub email_notifications: Option<bool>,
    pub maintenance_alerts: Option<bool>,
    pub task_reminders: Option<bool>,
}

//! Ramayana Hotel Asset and Maintenance Management System
//!
//! A REST JSON API for the hotel's asset inventory, maintenance tasks and
//! schedules, staff job tasks, user management and exportable reports.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod reports;
pub mod repository;
pub mod services;
pub mod workflow;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

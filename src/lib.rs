//! Bookshelf record-keeping server
//!
//! A small REST JSON API that stores, filters, updates and deletes book
//! records held in process memory.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// State over a fresh, empty bookshelf
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            services: Arc::new(services::Services::new(repository::Repository::new())),
        }
    }
}

//! Local library catalog server
//!
//! Server-rendered pages for browsing and maintaining a library catalog of
//! books, authors, genres and the physical copies of each book.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod validation;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use routes::create_router;

use repository::CatalogStore;
use views::TemplateEngine;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub views: Arc<TemplateEngine>,
}

impl AppState {
    /// Build the state over a record store; compiles the page templates
    pub fn new(config: AppConfig, store: Arc<dyn CatalogStore>) -> AppResult<Self> {
        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services::Services::new(store)),
            views: Arc::new(TemplateEngine::new()?),
        })
    }
}

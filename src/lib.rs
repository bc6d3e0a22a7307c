//! Library desk
//!
//! A console catalogue and circulation manager for a single librarian:
//! books, patrons and the borrow ledger, kept in a local SQLite store.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod shell;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state handed to the shell
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Open the configured store and build the services on top of it
    pub async fn connect(config: AppConfig) -> AppResult<Self> {
        let pool = repository::connect(&config.database).await?;
        let repository = repository::Repository::new(pool);

        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services::Services::new(repository)),
        })
    }
}

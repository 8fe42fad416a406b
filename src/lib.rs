//! Bookstore catalog server
//!
//! A REST JSON API over a catalog of books. Reads are public; writes live
//! under `/admin` and require a bearer token obtained from `/login`.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

pub mod api;
pub mod config;
pub mod context;
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
    /// Root of every request context; cancelled on shutdown
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn repository::BookStore>) -> AppResult<Self> {
        let services = services::Services::new(store, &config)?;
        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services),
            shutdown: CancellationToken::new(),
        })
    }
}

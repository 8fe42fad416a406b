//! Business logic services

pub mod auth;
pub mod catalog;

use std::sync::Arc;

use crate::{config::AppConfig, error::AppResult, repository::BookStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Wire services around an already constructed store
    pub fn new(store: Arc<dyn BookStore>, config: &AppConfig) -> AppResult<Self> {
        let credentials = auth::StaticCredentials::from_config(&config.auth)?;
        Ok(Self {
            auth: auth::AuthService::new(
                auth::TokenService::from_config(&config.auth)?,
                Arc::new(credentials),
            ),
            catalog: catalog::CatalogService::new(store, config.catalog.clone()),
        })
    }
}

//! # Product Manager
//!
//! Application layer for the product catalog: services, authentication,
//! configuration and seeding.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          App::build(config)                             │
//! │                                                                         │
//! │  AppConfig ──► storage = in_memory ──► InMemory{Product,User}Repository │
//! │            └─► storage = sqlite    ──► Database ─► Sqlite*Repository    │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌───────────────────────────┐ │
//! │  │ ProductService │  │  UserService   │  │  JwtHandler               │ │
//! │  │ add / get      │  │ register       │  │ create / validate tokens  │ │
//! │  │ browse         │  │ login          │  │ Policy + authorize        │ │
//! │  │ update_*       │  │ get_account    │  │                           │ │
//! │  │ delete         │  │                │  │                           │ │
//! │  └────────────────┘  └────────────────┘  └───────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - Layered configuration
//! - [`auth`] - JWT, password hashing, role policies
//! - [`dto`] - JSON shapes exchanged with clients
//! - [`services`] - Product and user use cases
//! - [`bootstrap`] - Default roles, admin account and sample products
//! - [`error`] - Service error type and status mapping

pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod dto;
pub mod error;
pub mod services;

use std::sync::Arc;

use prodman_db::{
    Database, DbConfig, InMemoryProductRepository, InMemoryUserRepository, ProductRepository,
    UserRepository,
};
use tracing::info;

pub use crate::auth::JwtHandler;
pub use crate::bootstrap::SeedReport;
pub use crate::config::{AppConfig, StorageKind};
pub use crate::error::{ServiceError, ServiceResult};
pub use crate::services::{ProductService, UserService};

/// Wired-up services sharing one set of repositories.
pub struct App {
    pub config: AppConfig,
    pub products: ProductService,
    pub users: UserService,
    pub jwt: Arc<JwtHandler>,
    product_repo: Arc<dyn ProductRepository>,
    user_repo: Arc<dyn UserRepository>,
    database: Option<Database>,
}

impl App {
    /// Builds the repositories named by `config.storage` and the services
    /// on top of them. SQLite storage runs migrations on connect.
    pub async fn build(config: AppConfig) -> ServiceResult<Self> {
        config.validate()?;

        let (product_repo, user_repo, database): (
            Arc<dyn ProductRepository>,
            Arc<dyn UserRepository>,
            Option<Database>,
        ) = match config.storage {
            StorageKind::InMemory => (
                Arc::new(InMemoryProductRepository::new()),
                Arc::new(InMemoryUserRepository::new()),
                None,
            ),
            StorageKind::Sqlite => {
                let db_config = if config.database.path == ":memory:" {
                    DbConfig::in_memory()
                } else {
                    DbConfig::new(&config.database.path)
                        .max_connections(config.database.max_connections)
                };
                let db = Database::new(db_config).await?;
                (Arc::new(db.products()), Arc::new(db.users()), Some(db))
            }
        };

        let jwt = Arc::new(JwtHandler::new(config.jwt.clone()));
        info!(storage = ?config.storage, "Product manager ready");

        Ok(App {
            products: ProductService::new(product_repo.clone()),
            users: UserService::new(user_repo.clone(), jwt.clone()),
            jwt,
            product_repo,
            user_repo,
            database,
            config,
        })
    }

    /// Seeds roles, the admin account and `config.seed.product_count`
    /// sample products. Safe to call on every start.
    pub async fn seed(&self) -> ServiceResult<SeedReport> {
        bootstrap::seed_defaults(
            self.user_repo.as_ref(),
            self.product_repo.as_ref(),
            self.config.seed.product_count,
        )
        .await
    }

    /// The SQLite database, when that storage is in use.
    pub fn database(&self) -> Option<&Database> {
        self.database.as_ref()
    }

    pub async fn shutdown(&self) {
        if let Some(db) = &self.database {
            db.close().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{authorize, Policy};
    use crate::bootstrap::{ADMIN_EMAIL, ADMIN_PASSWORD};
    use prodman_core::user::{ADMIN, CATALOG_MANAGER};

    fn config(storage: &str) -> AppConfig {
        AppConfig::from_toml(&format!(
            r#"
            storage = "{storage}"

            [database]
            path = ":memory:"

            [seed]
            product_count = 5
            "#
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn test_in_memory_app_seeds_and_logs_in() {
        let app = App::build(config("in_memory")).await.unwrap();
        assert!(app.database().is_none());

        let report = app.seed().await.unwrap();
        assert_eq!(report.products_created, 5);
        assert_eq!(app.products.browse().await.unwrap().len(), 5);

        let jwt = app.users.login(ADMIN_EMAIL, ADMIN_PASSWORD, ADMIN).await.unwrap();
        let claims = app.jwt.validate_token(&jwt.token).unwrap();
        assert!(authorize(&claims, Policy::AccountById).is_ok());
    }

    #[tokio::test]
    async fn test_sqlite_app_seeds_once() {
        let app = App::build(config("sqlite")).await.unwrap();
        assert!(app.database().is_some());

        app.seed().await.unwrap();
        let second = app.seed().await.unwrap();
        assert_eq!(second, SeedReport::default());
        assert_eq!(app.products.get_all().await.unwrap().len(), 5);

        let jwt = app
            .users
            .login(ADMIN_EMAIL, ADMIN_PASSWORD, CATALOG_MANAGER)
            .await
            .unwrap();
        let claims = app.jwt.validate_token(&jwt.token).unwrap();
        assert!(authorize(&claims, Policy::UpdateCatalog).is_ok());
        assert!(authorize(&claims, Policy::UpdateSales).is_err());

        app.shutdown().await;
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let mut config = config("in_memory");
        config.jwt.key = String::new();

        assert!(matches!(
            App::build(config).await,
            Err(ServiceError::Config(_))
        ));
    }
}

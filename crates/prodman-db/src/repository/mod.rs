//! # Repository Module
//!
//! Storage abstractions for products and users, with two implementations.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ProductService / UserService                                          │
//! │       │                                                                 │
//! │       │  Arc<dyn ProductRepository>, Arc<dyn UserRepository>           │
//! │       ▼                                                                 │
//! │  ┌──────────────────────────┐      ┌──────────────────────────┐        │
//! │  │ in_memory                │      │ product / user (SQLite)  │        │
//! │  │ RwLock<BTreeMap<..>>     │      │ SqlitePool               │        │
//! │  │ tests, demos             │      │ persistent               │        │
//! │  └──────────────────────────┘      └──────────────────────────┘        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lookup Rules
//! - SKU lookups are exact
//! - Email and role-name lookups ignore ASCII case
//! - `get_*` returns `Ok(None)` for a missing entity; `update`/`delete` of a
//!   missing SKU return [`DbError::NotFound`](crate::DbError::NotFound)

use async_trait::async_trait;
use prodman_core::{Product, Role, User};
use uuid::Uuid;

use crate::error::DbResult;

pub mod in_memory;
pub mod product;
pub mod user;

/// Storage for the product aggregate.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get_product(&self, sku: &str) -> DbResult<Option<Product>>;

    /// Every complete product, ordered by SKU.
    async fn get_all(&self) -> DbResult<Vec<Product>>;

    async fn add(&self, product: &Product) -> DbResult<()>;

    /// Overwrites all three facets of an existing product, matched by SKU.
    async fn update(&self, product: &Product) -> DbResult<()>;

    async fn delete(&self, sku: &str) -> DbResult<()>;
}

/// Storage for users and roles.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_user_by_id(&self, id: Uuid) -> DbResult<Option<User>>;

    async fn get_user_by_email(&self, email: &str) -> DbResult<Option<User>>;

    /// Stores a user together with its role memberships. Roles that are not
    /// stored yet are added first.
    async fn add_user(&self, user: &User) -> DbResult<()>;

    async fn get_role_by_id(&self, id: Uuid) -> DbResult<Option<Role>>;

    async fn get_role_by_name(&self, name: &str) -> DbResult<Option<Role>>;

    async fn add_role(&self, role: &Role) -> DbResult<()>;
}

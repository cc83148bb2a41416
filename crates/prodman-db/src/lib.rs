//! # prodman-db: Persistence Layer for Product Manager
//!
//! Repository traits for products and users, with an in-memory and an
//! SQLite implementation of each.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Product Manager Data Flow                           │
//! │                                                                         │
//! │  ProductService::get(sku)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     prodman-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ Product trait │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ User trait    │    │ 0001_init    │  │   │
//! │  │   │               │    │ memory/sqlite │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository traits and implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use prodman_db::{Database, DbConfig, ProductRepository};
//!
//! let db = Database::new(DbConfig::new("product-manager.db")).await?;
//! let product = db.products().get_product("ABC123").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::in_memory::{InMemoryProductRepository, InMemoryUserRepository};
pub use repository::product::SqliteProductRepository;
pub use repository::user::SqliteUserRepository;
pub use repository::{ProductRepository, UserRepository};

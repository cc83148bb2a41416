//! # prodman-core: Pure Domain Logic for Product Manager
//!
//! Value objects, entities and business rules for the product catalog.
//! No I/O of any kind happens here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Product Manager Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               product-manager (services, auth, config)          │   │
//! │  │    UserService ──► login / register     ProductService ──► CRUD │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ prodman-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────────┐  ┌───────────┐  ┌───────────┐  ┌──────────┐  │   │
//! │  │   │value_objects│  │  product  │  │   user    │  │validation│  │   │
//! │  │   │ Sku, Price  │  │ 3 facets  │  │ User,Role │  │predicates│  │   │
//! │  │   └─────────────┘  └───────────┘  └───────────┘  └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                prodman-db (repositories)                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`value_objects`] - SKU, name, description, stock, weight, price
//! - [`product`] - Catalog/warehouse/sales facets and the `Product` aggregate
//! - [`user`] - `User`, `Role` and the well-known role names
//! - [`money`] - Integer money (cents)
//! - [`validation`] - Named validation predicates
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use prodman_core::{Money, Product};
//!
//! let product = Product::create(
//!     "ABC123",
//!     "Sparkling water",
//!     "Half litre bottle",
//!     12,
//!     0.5,
//!     Money::from_cents(100),
//!     Money::from_cents(150),
//!     8,
//! )
//! .unwrap();
//!
//! assert_eq!(product.sku().as_str(), "ABC123");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod product;
pub mod user;
pub mod validation;
pub mod value_objects;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ErrorCategory, ValidationError};
pub use money::Money;
pub use product::{CatalogProduct, Product, ProductParts, SalesProduct, WarehouseProduct};
pub use user::{Role, User};
pub use value_objects::{
    Price, ProductDescription, ProductName, ProductStock, ProductWeight, StockKeepingUnit,
};

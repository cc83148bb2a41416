//! # Data Transfer Objects
//!
//! The JSON shapes exchanged with the web client. All of them serialize in
//! camelCase, and `ts-rs` exports matching TypeScript types.
//!
//! ## Money
//! Amounts cross the boundary as integer cents (`costCents`,
//! `netPriceCents`), the same representation the domain and the database use.
//!
//! ## Mapping
//! ```text
//! Product ──► ProductDto          full view (all three facets, + gross price)
//!         ──► ProductBlockDto     browse listing
//!         ──► CatalogProductDto / WarehouseProductDto / SalesProductDto
//!
//! CreateProductDto ──► Product::create   (fresh ids)
//! Update*ProductDto ──► facet.with_*     (ids kept)
//! ```

use prodman_core::{CatalogProduct, Product, SalesProduct, User, WarehouseProduct};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

// =============================================================================
// Products
// =============================================================================

/// Everything about one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductDto {
    #[ts(type = "string")]
    pub catalog_id: Uuid,
    #[ts(type = "string")]
    pub warehouse_id: Uuid,
    #[ts(type = "string")]
    pub sales_id: Uuid,
    pub sku: String,
    pub name: String,
    pub description: String,
    pub cost_cents: i64,
    pub tax_percentage: i32,
    pub net_price_cents: i64,
    /// Net price with tax, derived
    pub gross_price_cents: i64,
    pub stock: i32,
    pub weight: f64,
}

impl From<&Product> for ProductDto {
    fn from(product: &Product) -> Self {
        let catalog = product.catalog();
        let warehouse = product.warehouse();
        let sales = product.sales();
        let price = sales.price();

        ProductDto {
            catalog_id: catalog.id(),
            warehouse_id: warehouse.id(),
            sales_id: sales.id(),
            sku: product.sku().to_string(),
            name: catalog.name().to_string(),
            description: catalog.description().as_str().to_string(),
            cost_cents: price.cost().cents(),
            tax_percentage: price.tax_percentage(),
            net_price_cents: price.net_price().cents(),
            gross_price_cents: price.gross_price().cents(),
            stock: warehouse.stock().value(),
            weight: warehouse.weight().value(),
        }
    }
}

/// One tile of the browse listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductBlockDto {
    pub name: String,
    pub sku: String,
    pub net_price_cents: i64,
    pub gross_price_cents: i64,
    pub stock: i32,
}

impl From<&Product> for ProductBlockDto {
    fn from(product: &Product) -> Self {
        ProductBlockDto {
            name: product.catalog().name().to_string(),
            sku: product.sku().to_string(),
            net_price_cents: product.sales().price().net_price().cents(),
            gross_price_cents: product.sales().price().gross_price().cents(),
            stock: product.warehouse().stock().value(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogProductDto {
    #[ts(type = "string")]
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub description: String,
}

impl From<&CatalogProduct> for CatalogProductDto {
    fn from(catalog: &CatalogProduct) -> Self {
        CatalogProductDto {
            id: catalog.id(),
            sku: catalog.sku().to_string(),
            name: catalog.name().to_string(),
            description: catalog.description().as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WarehouseProductDto {
    #[ts(type = "string")]
    pub id: Uuid,
    pub sku: String,
    pub stock: i32,
    pub weight: f64,
}

impl From<&WarehouseProduct> for WarehouseProductDto {
    fn from(warehouse: &WarehouseProduct) -> Self {
        WarehouseProductDto {
            id: warehouse.id(),
            sku: warehouse.sku().to_string(),
            stock: warehouse.stock().value(),
            weight: warehouse.weight().value(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SalesProductDto {
    #[ts(type = "string")]
    pub id: Uuid,
    pub sku: String,
    pub cost_cents: i64,
    pub tax_percentage: i32,
    pub net_price_cents: i64,
}

impl From<&SalesProduct> for SalesProductDto {
    fn from(sales: &SalesProduct) -> Self {
        let price = sales.price();
        SalesProductDto {
            id: sales.id(),
            sku: sales.sku().to_string(),
            cost_cents: price.cost().cents(),
            tax_percentage: price.tax_percentage(),
            net_price_cents: price.net_price().cents(),
        }
    }
}

/// New product. Ids are generated on creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateProductDto {
    pub sku: String,
    pub name: String,
    pub description: String,
    pub cost_cents: i64,
    pub tax_percentage: i32,
    pub net_price_cents: i64,
    pub stock: i32,
    pub weight: f64,
}

/// Catalog edit. `id` is accepted for compatibility and ignored; the
/// product is matched by SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateCatalogProductDto {
    #[serde(default)]
    #[ts(type = "string | null")]
    pub id: Option<Uuid>,
    pub sku: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateWarehouseProductDto {
    #[serde(default)]
    #[ts(type = "string | null")]
    pub id: Option<Uuid>,
    pub sku: String,
    pub stock: i32,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateSalesProductDto {
    #[serde(default)]
    #[ts(type = "string | null")]
    pub id: Option<Uuid>,
    pub sku: String,
    pub cost_cents: i64,
    pub tax_percentage: i32,
    pub net_price_cents: i64,
}

// =============================================================================
// Accounts
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AccountDto {
    #[ts(type = "string")]
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
}

impl From<&User> for AccountDto {
    fn from(user: &User) -> Self {
        AccountDto {
            id: user.id(),
            email: user.email().to_string(),
            name: user.name().to_string(),
            roles: user.role_names(),
        }
    }
}

/// Issued token. `expires` is the Unix timestamp of the `exp` claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct JwtDto {
    pub token: String,
    pub role: String,
    pub expires: i64,
}

/// Older name for [`JwtDto`].
pub type TokenDto = JwtDto;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Self-registration. `role` defaults to `user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    #[serde(default)]
    #[ts(optional)]
    pub role: Option<String>,
}

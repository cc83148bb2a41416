//! # Product Entities
//!
//! A product is split into three facets that share one SKU:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Product (aggregate)                             │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────┐      │
//! │  │ CatalogProduct   │  │ WarehouseProduct │  │ SalesProduct     │      │
//! │  │  id, sku         │  │  id, sku         │  │  id, sku         │      │
//! │  │  name            │  │  stock           │  │  price           │      │
//! │  │  description     │  │  weight          │  │                  │      │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────┘      │
//! │         ▲                      ▲                      ▲                 │
//! │  CatalogManager         WarehouseManager        SalesManager            │
//! │  edits this             edits this              edits this              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each facet has its own UUID. `new` assigns a fresh one, `with_id` is for
//! rehydrating from storage. Updates go through consuming `with_*` methods
//! that validate again, so a facet is never left half-updated.

use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationResult};
use crate::money::Money;
use crate::value_objects::{
    Price, ProductDescription, ProductName, ProductStock, ProductWeight, StockKeepingUnit,
};

// =============================================================================
// Catalog Facet
// =============================================================================

/// Name and description of a product.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogProduct {
    id: Uuid,
    sku: StockKeepingUnit,
    name: ProductName,
    description: ProductDescription,
}

impl CatalogProduct {
    pub fn new(sku: &str, name: &str, description: &str) -> ValidationResult<Self> {
        Self::with_id(Uuid::new_v4(), sku, name, description)
    }

    pub fn with_id(id: Uuid, sku: &str, name: &str, description: &str) -> ValidationResult<Self> {
        Ok(Self {
            id,
            sku: StockKeepingUnit::new(sku)?,
            name: ProductName::new(name)?,
            description: ProductDescription::new(description)?,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn sku(&self) -> &StockKeepingUnit {
        &self.sku
    }

    pub fn name(&self) -> &ProductName {
        &self.name
    }

    pub fn description(&self) -> &ProductDescription {
        &self.description
    }

    pub fn with_name(self, name: &str) -> ValidationResult<Self> {
        Ok(Self {
            name: ProductName::new(name)?,
            ..self
        })
    }

    pub fn with_description(self, description: &str) -> ValidationResult<Self> {
        Ok(Self {
            description: ProductDescription::new(description)?,
            ..self
        })
    }
}

// =============================================================================
// Warehouse Facet
// =============================================================================

/// Stock on hand and shipping weight.
#[derive(Debug, Clone, PartialEq)]
pub struct WarehouseProduct {
    id: Uuid,
    sku: StockKeepingUnit,
    stock: ProductStock,
    weight: ProductWeight,
}

impl WarehouseProduct {
    pub fn new(sku: &str, stock: i32, weight: f64) -> ValidationResult<Self> {
        Self::with_id(Uuid::new_v4(), sku, stock, weight)
    }

    pub fn with_id(id: Uuid, sku: &str, stock: i32, weight: f64) -> ValidationResult<Self> {
        Ok(Self {
            id,
            sku: StockKeepingUnit::new(sku)?,
            stock: ProductStock::new(stock)?,
            weight: ProductWeight::new(weight)?,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn sku(&self) -> &StockKeepingUnit {
        &self.sku
    }

    pub fn stock(&self) -> ProductStock {
        self.stock
    }

    pub fn weight(&self) -> ProductWeight {
        self.weight
    }

    pub fn with_stock(self, stock: i32) -> ValidationResult<Self> {
        Ok(Self {
            stock: ProductStock::new(stock)?,
            ..self
        })
    }

    pub fn with_weight(self, weight: f64) -> ValidationResult<Self> {
        Ok(Self {
            weight: ProductWeight::new(weight)?,
            ..self
        })
    }
}

// =============================================================================
// Sales Facet
// =============================================================================

/// Pricing of a product.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesProduct {
    id: Uuid,
    sku: StockKeepingUnit,
    price: Price,
}

impl SalesProduct {
    pub fn new(sku: &str, cost: Money, net_price: Money, tax_percentage: i32) -> ValidationResult<Self> {
        Self::with_id(Uuid::new_v4(), sku, cost, net_price, tax_percentage)
    }

    pub fn with_id(
        id: Uuid,
        sku: &str,
        cost: Money,
        net_price: Money,
        tax_percentage: i32,
    ) -> ValidationResult<Self> {
        Ok(Self {
            id,
            sku: StockKeepingUnit::new(sku)?,
            price: Price::new(cost, net_price, tax_percentage)?,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn sku(&self) -> &StockKeepingUnit {
        &self.sku
    }

    pub fn price(&self) -> Price {
        self.price
    }

    /// Replaces the whole price at once.
    ///
    /// Updating cost and net price one after the other could pass through an
    /// invalid intermediate state, so the three values are checked together.
    pub fn with_price(self, cost: Money, net_price: Money, tax_percentage: i32) -> ValidationResult<Self> {
        Ok(Self {
            price: Price::new(cost, net_price, tax_percentage)?,
            ..self
        })
    }
}

// =============================================================================
// Product Aggregate
// =============================================================================

/// The three facets of one product.
///
/// ## Invariant
/// All facets carry the same SKU. [`Product::new`] rejects anything else
/// with [`CoreError::MismatchedSku`].
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    catalog: CatalogProduct,
    warehouse: WarehouseProduct,
    sales: SalesProduct,
}

/// Raw stored values of a product, as read back from a store.
#[derive(Debug, Clone)]
pub struct ProductParts {
    pub catalog_id: Uuid,
    pub warehouse_id: Uuid,
    pub sales_id: Uuid,
    pub sku: String,
    pub name: String,
    pub description: String,
    pub stock: i32,
    pub weight: f64,
    pub cost: Money,
    pub net_price: Money,
    pub tax_percentage: i32,
}

impl Product {
    /// Assembles a product from existing facets.
    pub fn new(
        catalog: CatalogProduct,
        warehouse: WarehouseProduct,
        sales: SalesProduct,
    ) -> CoreResult<Self> {
        if warehouse.sku() != catalog.sku() {
            return Err(CoreError::MismatchedSku {
                catalog: catalog.sku().to_string(),
                facet: "warehouse",
                other: warehouse.sku().to_string(),
            });
        }
        if sales.sku() != catalog.sku() {
            return Err(CoreError::MismatchedSku {
                catalog: catalog.sku().to_string(),
                facet: "sales",
                other: sales.sku().to_string(),
            });
        }

        Ok(Self {
            catalog,
            warehouse,
            sales,
        })
    }

    /// Builds a brand-new product: every facet gets a fresh id.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        sku: &str,
        name: &str,
        description: &str,
        stock: i32,
        weight: f64,
        cost: Money,
        net_price: Money,
        tax_percentage: i32,
    ) -> CoreResult<Self> {
        Self::new(
            CatalogProduct::new(sku, name, description)?,
            WarehouseProduct::new(sku, stock, weight)?,
            SalesProduct::new(sku, cost, net_price, tax_percentage)?,
        )
    }

    /// Rehydrates a product from stored values, keeping the stored ids.
    pub fn from_parts(parts: ProductParts) -> CoreResult<Self> {
        Self::new(
            CatalogProduct::with_id(parts.catalog_id, &parts.sku, &parts.name, &parts.description)?,
            WarehouseProduct::with_id(parts.warehouse_id, &parts.sku, parts.stock, parts.weight)?,
            SalesProduct::with_id(
                parts.sales_id,
                &parts.sku,
                parts.cost,
                parts.net_price,
                parts.tax_percentage,
            )?,
        )
    }

    pub fn sku(&self) -> &StockKeepingUnit {
        self.catalog.sku()
    }

    pub fn catalog(&self) -> &CatalogProduct {
        &self.catalog
    }

    pub fn warehouse(&self) -> &WarehouseProduct {
        &self.warehouse
    }

    pub fn sales(&self) -> &SalesProduct {
        &self.sales
    }

    /// Replaces the catalog facet. The SKU must not change.
    pub fn with_catalog(self, catalog: CatalogProduct) -> CoreResult<Self> {
        Self::new(catalog, self.warehouse, self.sales)
    }

    pub fn with_warehouse(self, warehouse: WarehouseProduct) -> CoreResult<Self> {
        Self::new(self.catalog, warehouse, self.sales)
    }

    pub fn with_sales(self, sales: SalesProduct) -> CoreResult<Self> {
        Self::new(self.catalog, self.warehouse, sales)
    }

    /// Splits the aggregate back into its facets.
    pub fn into_parts(self) -> (CatalogProduct, WarehouseProduct, SalesProduct) {
        (self.catalog, self.warehouse, self.sales)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

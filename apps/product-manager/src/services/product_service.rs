//! Product service.
//!
//! Existence checks and DTO mapping around a [`ProductRepository`].
//! Every update touches one facet; the SKU and the other two facets are
//! carried over unchanged.

use std::sync::Arc;

use prodman_core::{CoreError, Money, Product};
use prodman_db::ProductRepository;
use tracing::info;

use crate::dto::{
    CatalogProductDto, CreateProductDto, ProductBlockDto, ProductDto, SalesProductDto,
    UpdateCatalogProductDto, UpdateSalesProductDto, UpdateWarehouseProductDto,
    WarehouseProductDto,
};
use crate::error::ServiceResult;

/// Product use cases.
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        ProductService { products }
    }

    /// Fetches a product or fails with `ProductNotFound`.
    async fn require(&self, sku: &str) -> ServiceResult<Product> {
        self.products
            .get_product(sku)
            .await?
            .ok_or_else(|| CoreError::ProductNotFound(sku.to_string()).into())
    }

    /// Creates a product. Fails with `ProductAlreadyExists` if the SKU is
    /// taken.
    pub async fn add(&self, dto: CreateProductDto) -> ServiceResult<ProductDto> {
        if self.products.get_product(&dto.sku).await?.is_some() {
            return Err(CoreError::ProductAlreadyExists(dto.sku).into());
        }

        let product = Product::create(
            &dto.sku,
            &dto.name,
            &dto.description,
            dto.stock,
            dto.weight,
            Money::from_cents(dto.cost_cents),
            Money::from_cents(dto.net_price_cents),
            dto.tax_percentage,
        )?;

        self.products.add(&product).await?;
        info!(sku = %product.sku(), "Product created");

        Ok(ProductDto::from(&product))
    }

    pub async fn get(&self, sku: &str) -> ServiceResult<ProductDto> {
        let product = self.require(sku).await?;
        Ok(ProductDto::from(&product))
    }

    pub async fn get_all(&self) -> ServiceResult<Vec<ProductDto>> {
        let products = self.products.get_all().await?;
        Ok(products.iter().map(ProductDto::from).collect())
    }

    /// Name, SKU, net price and stock of every product.
    pub async fn browse(&self) -> ServiceResult<Vec<ProductBlockDto>> {
        let products = self.products.get_all().await?;
        Ok(products.iter().map(ProductBlockDto::from).collect())
    }

    pub async fn delete(&self, sku: &str) -> ServiceResult<()> {
        self.require(sku).await?;
        self.products.delete(sku).await?;
        info!(sku = %sku, "Product deleted");
        Ok(())
    }

    /// Changes name and description.
    pub async fn update_catalog(&self, dto: UpdateCatalogProductDto) -> ServiceResult<CatalogProductDto> {
        let product = self.require(&dto.sku).await?;

        let catalog = product
            .catalog()
            .clone()
            .with_name(&dto.name)?
            .with_description(&dto.description)?;
        let product = product.with_catalog(catalog)?;

        self.products.update(&product).await?;
        info!(sku = %dto.sku, "Catalog facet updated");

        Ok(CatalogProductDto::from(product.catalog()))
    }

    /// Changes stock and weight.
    pub async fn update_warehouse(
        &self,
        dto: UpdateWarehouseProductDto,
    ) -> ServiceResult<WarehouseProductDto> {
        let product = self.require(&dto.sku).await?;

        let warehouse = product
            .warehouse()
            .clone()
            .with_stock(dto.stock)?
            .with_weight(dto.weight)?;
        let product = product.with_warehouse(warehouse)?;

        self.products.update(&product).await?;
        info!(sku = %dto.sku, stock = dto.stock, "Warehouse facet updated");

        Ok(WarehouseProductDto::from(product.warehouse()))
    }

    /// Changes cost, net price and tax together.
    pub async fn update_sales(&self, dto: UpdateSalesProductDto) -> ServiceResult<SalesProductDto> {
        let product = self.require(&dto.sku).await?;

        let sales = product.sales().clone().with_price(
            Money::from_cents(dto.cost_cents),
            Money::from_cents(dto.net_price_cents),
            dto.tax_percentage,
        )?;
        let product = product.with_sales(sales)?;

        self.products.update(&product).await?;
        info!(
            sku = %dto.sku,
            net_price = %product.sales().price().net_price(),
            "Sales facet updated"
        );

        Ok(SalesProductDto::from(product.sales()))
    }
}

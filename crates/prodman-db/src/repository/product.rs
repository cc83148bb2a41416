//! # Product Repository (SQLite)
//!
//! Each product facet lives in its own table, joined on SKU.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add(product)                                                           │
//! │    1. INSERT catalog_products    ─┐                                     │
//! │    2. INSERT warehouse_products   ├─ three separate statements,         │
//! │    3. INSERT sales_products      ─┘  NO transaction                     │
//! │                                                                         │
//! │  If step 3 fails, steps 1-2 stay applied. The product is then          │
//! │  invisible to reads (inner join) but its SKU is taken.                 │
//! │                                                                         │
//! │  delete(sku)                                                            │
//! │    DELETE catalog_products ──► ON DELETE CASCADE removes the others    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use prodman_core::{Money, Product, ProductParts};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::ProductRepository;
use crate::error::{DbError, DbResult};

const SELECT_PRODUCT: &str = r#"
    SELECT
        c.id AS catalog_id,
        w.id AS warehouse_id,
        s.id AS sales_id,
        c.sku,
        c.name,
        c.description,
        w.stock,
        w.weight,
        s.cost_cents,
        s.net_price_cents,
        s.tax_percentage
    FROM catalog_products c
    INNER JOIN warehouse_products w ON w.sku = c.sku
    INNER JOIN sales_products s ON s.sku = c.sku
"#;

/// One joined row of the three facet tables.
#[derive(Debug, FromRow)]
struct ProductRow {
    catalog_id: String,
    warehouse_id: String,
    sales_id: String,
    sku: String,
    name: String,
    description: String,
    stock: i64,
    weight: f64,
    cost_cents: i64,
    net_price_cents: i64,
    tax_percentage: i64,
}

fn parse_id(raw: &str) -> DbResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| DbError::corrupt("Product", e))
}

fn narrow(value: i64, column: &str) -> DbResult<i32> {
    i32::try_from(value).map_err(|_| DbError::corrupt("Product", format!("{column} out of range: {value}")))
}

impl TryFrom<ProductRow> for Product {
    type Error = DbError;

    fn try_from(row: ProductRow) -> DbResult<Self> {
        let parts = ProductParts {
            catalog_id: parse_id(&row.catalog_id)?,
            warehouse_id: parse_id(&row.warehouse_id)?,
            sales_id: parse_id(&row.sales_id)?,
            stock: narrow(row.stock, "stock")?,
            tax_percentage: narrow(row.tax_percentage, "tax_percentage")?,
            weight: row.weight,
            cost: Money::from_cents(row.cost_cents),
            net_price: Money::from_cents(row.net_price_cents),
            sku: row.sku,
            name: row.name,
            description: row.description,
        };

        Product::from_parts(parts).map_err(|e| DbError::corrupt("Product", e))
    }
}

/// SQLite-backed [`ProductRepository`].
#[derive(Debug, Clone)]
pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteProductRepository { pool }
    }
}

#[async_trait]
impl ProductRepository for SqliteProductRepository {
    async fn get_product(&self, sku: &str) -> DbResult<Option<Product>> {
        debug!(sku = %sku, "Fetching product");

        let row: Option<ProductRow> = sqlx::query_as(&format!("{SELECT_PRODUCT} WHERE c.sku = ?1"))
            .bind(sku)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    async fn get_all(&self) -> DbResult<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!("{SELECT_PRODUCT} ORDER BY c.sku"))
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Fetched all products");
        rows.into_iter().map(Product::try_from).collect()
    }

    async fn add(&self, product: &Product) -> DbResult<()> {
        let sku = product.sku().as_str();
        debug!(sku = %sku, "Inserting product");

        let catalog = product.catalog();
        let written = [
            ("catalog_products.sku", sku),
            ("catalog_products.name", catalog.name().as_str()),
        ];
        sqlx::query("INSERT INTO catalog_products (id, sku, name, description) VALUES (?1, ?2, ?3, ?4)")
            .bind(catalog.id().to_string())
            .bind(sku)
            .bind(catalog.name().as_str())
            .bind(catalog.description().as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::from(e).with_unique_value(&written))?;

        let warehouse = product.warehouse();
        sqlx::query("INSERT INTO warehouse_products (id, sku, stock, weight) VALUES (?1, ?2, ?3, ?4)")
            .bind(warehouse.id().to_string())
            .bind(sku)
            .bind(warehouse.stock().value())
            .bind(warehouse.weight().value())
            .execute(&self.pool)
            .await?;

        let sales = product.sales();
        let price = sales.price();
        sqlx::query(
            r#"
            INSERT INTO sales_products (id, sku, cost_cents, tax_percentage, net_price_cents)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(sales.id().to_string())
        .bind(sku)
        .bind(price.cost().cents())
        .bind(price.tax_percentage())
        .bind(price.net_price().cents())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, product: &Product) -> DbResult<()> {
        let sku = product.sku().as_str();
        debug!(sku = %sku, "Updating product");

        let catalog = product.catalog();
        let result = sqlx::query("UPDATE catalog_products SET name = ?2, description = ?3 WHERE sku = ?1")
            .bind(sku)
            .bind(catalog.name().as_str())
            .bind(catalog.description().as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DbError::from(e).with_unique_value(&[("catalog_products.name", catalog.name().as_str())])
            })?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", sku));
        }

        let warehouse = product.warehouse();
        sqlx::query("UPDATE warehouse_products SET stock = ?2, weight = ?3 WHERE sku = ?1")
            .bind(sku)
            .bind(warehouse.stock().value())
            .bind(warehouse.weight().value())
            .execute(&self.pool)
            .await?;

        let price = product.sales().price();
        sqlx::query(
            r#"
            UPDATE sales_products
            SET cost_cents = ?2, tax_percentage = ?3, net_price_cents = ?4
            WHERE sku = ?1
            "#,
        )
        .bind(sku)
        .bind(price.cost().cents())
        .bind(price.tax_percentage())
        .bind(price.net_price().cents())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, sku: &str) -> DbResult<()> {
        debug!(sku = %sku, "Deleting product");

        let result = sqlx::query("DELETE FROM catalog_products WHERE sku = ?1")
            .bind(sku)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", sku));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn repo() -> (Database, SqliteProductRepository) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();
        (db, repo)
    }

    fn product(sku: &str, name: &str) -> Product {
        Product::create(
            sku,
            name,
            "desc",
            12,
            2.5,
            Money::from_cents(1000),
            Money::from_cents(1500),
            23,
        )
        .unwrap()
    }

    async fn count_rows(db: &Database, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_add_and_get_round_trip() {
        let (_db, repo) = repo().await;
        let product = product("123", "product name");

        repo.add(&product).await.unwrap();

        let stored = repo.get_product("123").await.unwrap().unwrap();
        assert_eq!(stored, product);
        assert!(repo.get_product("456").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_sku_is_unique_violation() {
        let (_db, repo) = repo().await;
        repo.add(&product("123", "first")).await.unwrap();

        let err = repo.add(&product("123", "second")).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_name_is_unique_violation() {
        let (_db, repo) = repo().await;
        repo.add(&product("A1", "same name")).await.unwrap();

        let err = repo.add(&product("B2", "same name")).await.unwrap_err();
        assert_eq!(err.to_string(), "Duplicate catalog_products.name: 'same name' already exists");
    }

    #[tokio::test]
    async fn test_update_overwrites_facets() {
        let (_db, repo) = repo().await;
        let original = product("123", "product name");
        repo.add(&original).await.unwrap();

        let sales = original
            .sales()
            .clone()
            .with_price(Money::from_cents(2000), Money::from_cents(2600), 8)
            .unwrap();
        let updated = original.clone().with_sales(sales).unwrap();
        repo.update(&updated).await.unwrap();

        let stored = repo.get_product("123").await.unwrap().unwrap();
        assert_eq!(stored.sales().price().cost().cents(), 2000);
        assert_eq!(stored.sales().price().tax_percentage(), 8);
        assert_eq!(stored.catalog(), original.catalog());
        assert_eq!(stored.sales().id(), original.sales().id());
    }

    #[tokio::test]
    async fn test_update_to_taken_name_is_unique_violation() {
        let (_db, repo) = repo().await;
        let first = product("A1", "first");
        repo.add(&first).await.unwrap();
        repo.add(&product("B2", "second")).await.unwrap();

        let catalog = first.catalog().clone().with_name("second").unwrap();
        let renamed = first.clone().with_catalog(catalog).unwrap();
        let err = repo.update(&renamed).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::UniqueViolation { ref field, ref value }
                if field == "catalog_products.name" && value == "second"
        ));
        assert_eq!(repo.get_product("A1").await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (_db, repo) = repo().await;

        let err = repo.update(&product("123", "name")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_cascades_to_facets() {
        let (db, repo) = repo().await;
        repo.add(&product("123", "product name")).await.unwrap();

        repo.delete("123").await.unwrap();

        assert!(repo.get_product("123").await.unwrap().is_none());
        assert_eq!(count_rows(&db, "catalog_products").await, 0);
        assert_eq!(count_rows(&db, "warehouse_products").await, 0);
        assert_eq!(count_rows(&db, "sales_products").await, 0);

        assert!(repo.delete("123").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_get_all_ordered_by_sku() {
        let (_db, repo) = repo().await;
        repo.add(&product("B2", "second")).await.unwrap();
        repo.add(&product("A1", "first")).await.unwrap();

        let all = repo.get_all().await.unwrap();
        let skus: Vec<&str> = all.iter().map(|p| p.sku().as_str()).collect();
        assert_eq!(skus, vec!["A1", "B2"]);
    }

    #[tokio::test]
    async fn test_failed_sales_insert_leaves_earlier_facets() {
        let (db, repo) = repo().await;
        sqlx::query(
            r#"
            CREATE TRIGGER reject_sales BEFORE INSERT ON sales_products
            BEGIN
                SELECT RAISE(ABORT, 'sales write rejected');
            END;
            "#,
        )
        .execute(db.pool())
        .await
        .unwrap();

        let err = repo.add(&product("123", "product name")).await.unwrap_err();
        assert!(matches!(err, DbError::QueryFailed(_)));

        // No transaction: catalog and warehouse rows were kept
        assert_eq!(count_rows(&db, "catalog_products").await, 1);
        assert_eq!(count_rows(&db, "warehouse_products").await, 1);
        assert_eq!(count_rows(&db, "sales_products").await, 0);

        // The incomplete product is invisible to reads
        assert!(repo.get_product("123").await.unwrap().is_none());
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_row_reported() {
        let (db, repo) = repo().await;
        repo.add(&product("123", "product name")).await.unwrap();

        sqlx::query("UPDATE warehouse_products SET stock = -5 WHERE sku = '123'")
            .execute(db.pool())
            .await
            .unwrap();

        let err = repo.get_product("123").await.unwrap_err();
        assert!(matches!(err, DbError::CorruptRow { .. }));
    }
}

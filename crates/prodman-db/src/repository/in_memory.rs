//! # In-Memory Repositories
//!
//! Map-backed stores guarded by `tokio::sync::RwLock`. Nothing survives a
//! restart.

use async_trait::async_trait;
use prodman_core::{Product, Role, User};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{ProductRepository, UserRepository};
use crate::error::{DbError, DbResult};

// =============================================================================
// Products
// =============================================================================

/// Products keyed by SKU.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: RwLock<BTreeMap<String, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get_product(&self, sku: &str) -> DbResult<Option<Product>> {
        Ok(self.products.read().await.get(sku).cloned())
    }

    async fn get_all(&self) -> DbResult<Vec<Product>> {
        Ok(self.products.read().await.values().cloned().collect())
    }

    async fn add(&self, product: &Product) -> DbResult<()> {
        let sku = product.sku().as_str();
        debug!(sku = %sku, "Adding product (memory)");

        let mut products = self.products.write().await;
        if products.contains_key(sku) {
            return Err(DbError::duplicate("catalog_products.sku", sku));
        }
        check_name_free(&products, product)?;
        products.insert(sku.to_string(), product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> DbResult<()> {
        let sku = product.sku().as_str();
        debug!(sku = %sku, "Updating product (memory)");

        let mut products = self.products.write().await;
        if !products.contains_key(sku) {
            return Err(DbError::not_found("Product", sku));
        }
        check_name_free(&products, product)?;
        products.insert(sku.to_string(), product.clone());
        Ok(())
    }

    async fn delete(&self, sku: &str) -> DbResult<()> {
        debug!(sku = %sku, "Deleting product (memory)");

        self.products
            .write()
            .await
            .remove(sku)
            .map(|_| ())
            .ok_or_else(|| DbError::not_found("Product", sku))
    }
}

/// Product names are unique across SKUs, like `catalog_products.name`.
fn check_name_free(products: &BTreeMap<String, Product>, product: &Product) -> DbResult<()> {
    let name = product.catalog().name();
    let taken = products
        .values()
        .any(|other| other.sku() != product.sku() && other.catalog().name() == name);
    if taken {
        return Err(DbError::duplicate("catalog_products.name", name.as_str()));
    }
    Ok(())
}

// =============================================================================
// Users and Roles
// =============================================================================

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
    roles: RwLock<HashMap<Uuid, Role>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_user_by_id(&self, id: Uuid) -> DbResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> DbResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email().eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn add_user(&self, user: &User) -> DbResult<()> {
        debug!(user_id = %user.id(), "Adding user (memory)");

        // Lock order: roles, then users
        let mut roles = self.roles.write().await;
        let mut users = self.users.write().await;

        if users.contains_key(&user.id()) {
            return Err(DbError::duplicate("users.id", user.id().to_string()));
        }
        if users
            .values()
            .any(|existing| existing.email().eq_ignore_ascii_case(user.email()))
        {
            return Err(DbError::duplicate("users.email", user.email()));
        }
        if users.values().any(|existing| existing.name() == user.name()) {
            return Err(DbError::duplicate("users.name", user.name()));
        }

        for role in user.roles() {
            let known = roles
                .values()
                .any(|stored| stored.name().eq_ignore_ascii_case(role.name()));
            if !known {
                roles.insert(role.id(), role.clone());
            }
        }

        users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn get_role_by_id(&self, id: Uuid) -> DbResult<Option<Role>> {
        Ok(self.roles.read().await.get(&id).cloned())
    }

    async fn get_role_by_name(&self, name: &str) -> DbResult<Option<Role>> {
        Ok(self
            .roles
            .read()
            .await
            .values()
            .find(|role| role.name().eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn add_role(&self, role: &Role) -> DbResult<()> {
        let mut roles = self.roles.write().await;
        if roles
            .values()
            .any(|stored| stored.name().eq_ignore_ascii_case(role.name()))
        {
            return Err(DbError::duplicate("roles.name", role.name()));
        }
        roles.insert(role.id(), role.clone());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use prodman_core::user::{ADMIN, USER};
    use prodman_core::Money;
    use std::sync::Arc;

    fn product(sku: &str) -> Product {
        Product::create(
            sku,
            &format!("name {sku}"),
            "desc",
            12,
            2.5,
            Money::from_cents(1000),
            Money::from_cents(1500),
            23,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_add_and_get_product() {
        let repo = InMemoryProductRepository::new();
        let product = product("123");

        repo.add(&product).await.unwrap();

        assert_eq!(repo.get_product("123").await.unwrap(), Some(product));
        assert_eq!(repo.get_product("999").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_add_duplicate_sku_fails() {
        let repo = InMemoryProductRepository::new();
        repo.add(&product("123")).await.unwrap();

        let err = repo.add(&product("123")).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    fn named(sku: &str, name: &str) -> Product {
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

    #[tokio::test]
    async fn test_duplicate_product_name_rejected() {
        let repo = InMemoryProductRepository::new();
        repo.add(&named("A1", "same name")).await.unwrap();

        let err = repo.add(&named("B2", "same name")).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::UniqueViolation { ref field, ref value }
                if field == "catalog_products.name" && value == "same name"
        ));
        assert_eq!(repo.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_to_taken_name_rejected() {
        let repo = InMemoryProductRepository::new();
        let first = named("A1", "first");
        repo.add(&first).await.unwrap();
        repo.add(&named("B2", "second")).await.unwrap();

        // Keeping its own name is fine
        repo.update(&first).await.unwrap();

        let catalog = first.catalog().clone().with_name("second").unwrap();
        let renamed = first.clone().with_catalog(catalog).unwrap();
        let err = repo.update(&renamed).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
        assert_eq!(repo.get_product("A1").await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_sku() {
        let repo = InMemoryProductRepository::new();

        assert!(repo.update(&product("123")).await.unwrap_err().is_not_found());
        assert!(repo.delete("123").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_update_replaces_product() {
        let repo = InMemoryProductRepository::new();
        let original = product("123");
        repo.add(&original).await.unwrap();

        let warehouse = original.warehouse().clone().with_stock(99).unwrap();
        let updated = original.with_warehouse(warehouse).unwrap();
        repo.update(&updated).await.unwrap();

        let stored = repo.get_product("123").await.unwrap().unwrap();
        assert_eq!(stored.warehouse().stock().value(), 99);
    }

    #[tokio::test]
    async fn test_get_all_ordered_by_sku() {
        let repo = InMemoryProductRepository::new();
        for sku in ["B2", "A1", "C3"] {
            repo.add(&product(sku)).await.unwrap();
        }
        repo.delete("C3").await.unwrap();

        let skus: Vec<String> = repo
            .get_all()
            .await
            .unwrap()
            .iter()
            .map(|p| p.sku().to_string())
            .collect();
        assert_eq!(skus, vec!["A1", "B2"]);
    }

    #[tokio::test]
    async fn test_concurrent_adds() {
        let repo = Arc::new(InMemoryProductRepository::new());

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.add(&product(&format!("SKU{i}"))).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(repo.get_all().await.unwrap().len(), 20);
    }

    #[tokio::test]
    async fn test_user_lookup_ignores_email_case() {
        let repo = InMemoryUserRepository::new();
        let mut user = User::new(Uuid::new_v4(), "user@email.com", "Username", "hash").unwrap();
        user.add_role(Role::new(USER).unwrap()).unwrap();
        repo.add_user(&user).await.unwrap();

        let found = repo.get_user_by_email("USER@email.com").await.unwrap();
        assert_eq!(found, Some(user.clone()));
        assert_eq!(repo.get_user_by_id(user.id()).await.unwrap(), Some(user));

        // Role was stored along with the user
        assert!(repo.get_role_by_name("USER").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryUserRepository::new();
        let first = User::new(Uuid::new_v4(), "user@email.com", "First", "hash").unwrap();
        let second = User::new(Uuid::new_v4(), "user@email.com", "Second", "hash").unwrap();

        repo.add_user(&first).await.unwrap();
        let err = repo.add_user(&second).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_user_name_rejected() {
        let repo = InMemoryUserRepository::new();
        let first = User::new(Uuid::new_v4(), "first@email.com", "Alice", "hash").unwrap();
        let second = User::new(Uuid::new_v4(), "second@email.com", "Alice", "hash").unwrap();

        repo.add_user(&first).await.unwrap();
        let err = repo.add_user(&second).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::UniqueViolation { ref field, ref value } if field == "users.name" && value == "Alice"
        ));
        assert!(repo.get_user_by_id(second.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_roles() {
        let repo = InMemoryUserRepository::new();
        let admin = Role::new(ADMIN).unwrap();
        repo.add_role(&admin).await.unwrap();

        assert_eq!(repo.get_role_by_id(admin.id()).await.unwrap(), Some(admin.clone()));
        assert_eq!(repo.get_role_by_name("Admin").await.unwrap(), Some(admin));
        assert!(repo.get_role_by_name("missing").await.unwrap().is_none());

        let err = repo.add_role(&Role::new(ADMIN).unwrap()).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}

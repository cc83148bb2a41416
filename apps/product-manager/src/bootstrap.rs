//! # Bootstrap Seeding
//!
//! Puts a fresh store into a usable state.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  seed_defaults                                                          │
//! │    1. roles     CatalogManager, SalesManager, WarehouseManager,         │
//! │                 user, admin                  (only the missing ones)    │
//! │    2. admin     admin@admin.com holding every role  (if absent)         │
//! │    3. products  N sample products           (only if catalog is empty) │
//! │                                                                         │
//! │  Running it again changes nothing.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sample Products
//! Generated deterministically from their index, so every run produces the
//! same catalog:
//! - SKU `SKU{i:05}`, name `Prod{i}`, description `Desc{i}`
//! - cost 1.00 - 99.99, tax 8 - 29 %, net price = cost + tax
//! - stock 0 - 99, weight 1.00 - 99.99

use prodman_core::user::{ADMIN, WELL_KNOWN_ROLES};
use prodman_core::{Money, Product, Role, User};
use prodman_db::{ProductRepository, UserRepository};
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::hash_password;
use crate::error::ServiceResult;

/// Development administrator account.
pub const ADMIN_EMAIL: &str = "admin@admin.com";
pub const ADMIN_NAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "secret";

/// What a seeding run created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub roles_created: usize,
    pub admin_created: bool,
    pub products_created: usize,
}

/// Seeds roles, the admin account and sample products. Idempotent.
pub async fn seed_defaults(
    users: &dyn UserRepository,
    products: &dyn ProductRepository,
    product_count: u32,
) -> ServiceResult<SeedReport> {
    let mut report = SeedReport::default();

    let mut roles = Vec::with_capacity(WELL_KNOWN_ROLES.len());
    for name in WELL_KNOWN_ROLES {
        let role = match users.get_role_by_name(name).await? {
            Some(role) => role,
            None => {
                let role = Role::new(name)?;
                users.add_role(&role).await?;
                report.roles_created += 1;
                role
            }
        };
        roles.push(role);
    }

    if users.get_user_by_email(ADMIN_EMAIL).await?.is_none() {
        let hash = hash_password(ADMIN_PASSWORD)?;
        let mut admin = User::new(Uuid::new_v4(), ADMIN_EMAIL, ADMIN_NAME, &hash)?;
        for role in roles {
            admin.add_role(role)?;
        }
        users.add_user(&admin).await?;
        report.admin_created = true;
        info!(email = ADMIN_EMAIL, role = ADMIN, "Admin account created");
    }

    if products.get_all().await?.is_empty() {
        for index in 1..=product_count {
            let product = sample_product(index)?;
            products.add(&product).await?;
            debug!(sku = %product.sku(), "Sample product created");
        }
        report.products_created = product_count as usize;
    }

    info!(
        roles = report.roles_created,
        admin = report.admin_created,
        products = report.products_created,
        "Seeding complete"
    );
    Ok(report)
}

/// Builds the `index`-th sample product.
pub fn sample_product(index: u32) -> ServiceResult<Product> {
    let i = i64::from(index);

    let cost = Money::from_cents(100 + (i * 37) % 9900);
    let tax_percentage = 8 + ((i * 7) % 22) as i32;
    let net_price = cost.apply_tax_percentage(tax_percentage);
    let stock = ((i * 13) % 100) as i32;
    let weight = (100 + (i * 53) % 9900) as f64 / 100.0;

    Ok(Product::create(
        &format!("SKU{index:05}"),
        &format!("Prod{index}"),
        &format!("Desc{index}"),
        stock,
        weight,
        cost,
        net_price,
        tax_percentage,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_password;
    use prodman_db::{InMemoryProductRepository, InMemoryUserRepository};

    #[test]
    fn test_sample_products_are_valid_and_deterministic() {
        for index in 1..=200 {
            let product = sample_product(index).unwrap();
            let price = product.sales().price();

            assert!(price.net_price() > price.cost());
            assert!((8..30).contains(&price.tax_percentage()));
            assert!((0..100).contains(&product.warehouse().stock().value()));
            assert!(product.warehouse().weight().value() >= 1.0);
        }

        let a = sample_product(7).unwrap();
        let b = sample_product(7).unwrap();
        assert_eq!(a.sku(), b.sku());
        assert_eq!(a.sales().price(), b.sales().price());
        assert_eq!(a.catalog().name().as_str(), "Prod7");
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let users = InMemoryUserRepository::new();
        let products = InMemoryProductRepository::new();

        let first = seed_defaults(&users, &products, 30).await.unwrap();
        assert_eq!(
            first,
            SeedReport {
                roles_created: 5,
                admin_created: true,
                products_created: 30,
            }
        );

        let second = seed_defaults(&users, &products, 30).await.unwrap();
        assert_eq!(second, SeedReport::default());
        assert_eq!(products.get_all().await.unwrap().len(), 30);
    }

    #[tokio::test]
    async fn test_admin_holds_every_role() {
        let users = InMemoryUserRepository::new();
        let products = InMemoryProductRepository::new();
        seed_defaults(&users, &products, 0).await.unwrap();

        let admin = users.get_user_by_email(ADMIN_EMAIL).await.unwrap().unwrap();
        for role in WELL_KNOWN_ROLES {
            assert!(admin.has_role(role), "missing {role}");
        }
        assert!(verify_password(admin.password(), ADMIN_PASSWORD));
    }

    #[tokio::test]
    async fn test_existing_catalog_is_left_alone() {
        let users = InMemoryUserRepository::new();
        let products = InMemoryProductRepository::new();
        products.add(&sample_product(999).unwrap()).await.unwrap();

        let report = seed_defaults(&users, &products, 30).await.unwrap();
        assert_eq!(report.products_created, 0);
        assert_eq!(products.get_all().await.unwrap().len(), 1);
    }
}

//! # Seed
//!
//! Creates the schema (SQLite storage), the default roles, the admin
//! account and sample products.
//!
//! ## Usage
//! ```bash
//! # Seed the store described by product-manager.toml / PRODMAN__* env
//! cargo run -p product-manager --bin seed
//!
//! # Seed a specific SQLite file with 100 products
//! cargo run -p product-manager --bin seed -- --db ./data/products.db --count 100
//! ```

use std::env;

use anyhow::Context;
use product_manager::{App, AppConfig, StorageKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let mut config = AppConfig::load().context("loading configuration")?;

    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                let value = args.get(i + 1).context("--count needs a value")?;
                config.seed.product_count = value
                    .parse()
                    .with_context(|| format!("invalid --count: {value}"))?;
                i += 1;
            }
            "--db" | "-d" => {
                let value = args.get(i + 1).context("--db needs a value")?;
                config.storage = StorageKind::Sqlite;
                config.database.path = value.clone();
                i += 1;
            }
            "--help" | "-h" => {
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Sample products to create on an empty catalog");
                println!("  -d, --db <PATH>    Seed this SQLite file instead of the configured store");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => anyhow::bail!("unknown argument: {other}"),
        }
        i += 1;
    }

    info!(
        storage = ?config.storage,
        database = %config.database.path,
        products = config.seed.product_count,
        "Seeding"
    );

    let app = App::build(config).await?;
    let report = app.seed().await?;
    app.shutdown().await;

    info!(
        roles = report.roles_created,
        admin = report.admin_created,
        products = report.products_created,
        "Done"
    );
    Ok(())
}

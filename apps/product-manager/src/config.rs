//! Application configuration.
//!
//! Layered with the `config` crate:
//!
//! ```text
//! built-in defaults  ──►  product-manager.toml (optional)  ──►  PRODMAN__* env
//!     lowest                                                      highest
//! ```
//!
//! Nested keys use a double underscore in the environment, e.g.
//! `PRODMAN__JWT__KEY` or `PRODMAN__DATABASE__PATH`.

use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Base name of the optional config file (any format `config` understands).
pub const CONFIG_FILE: &str = "product-manager";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "PRODMAN";

/// Which repository implementation backs the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    InMemory,
    Sqlite,
}

/// SQLite settings. Ignored for in-memory storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Database file, or `:memory:`.
    pub path: String,
    pub max_connections: u32,
}

/// Token signing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtSettings {
    /// HMAC secret
    pub key: String,
    pub issuer: String,
    pub expiry_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedSettings {
    /// Sample products created when the catalog is empty
    pub product_count: u32,
}

/// Product Manager configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub storage: StorageKind,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub seed: SeedSettings,
}

impl AppConfig {
    /// Load configuration from defaults, the optional config file and the
    /// environment, then validate it.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::defaults()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<AppConfig>()?;

        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid with a TOML document. No file or environment lookup.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let config = Self::defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize::<AppConfig>()?;

        config.validate()?;
        Ok(config)
    }

    fn defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Ok(Config::builder()
            .set_default("storage", "in_memory")?
            .set_default("database.path", "product-manager.db")?
            .set_default("database.max_connections", 5)?
            // In production, this MUST be overridden via PRODMAN__JWT__KEY
            .set_default("jwt.key", "product-manager-dev-secret-change-in-production")?
            .set_default("jwt.issuer", "product-manager")?
            .set_default("jwt.expiry_minutes", 60)?
            .set_default("seed.product_count", 30)?)
    }

    /// Rejects settings the services can't run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.key.trim().is_empty() {
            return Err(ConfigError::MissingRequired("jwt.key".to_string()));
        }
        if self.jwt.issuer.trim().is_empty() {
            return Err(ConfigError::MissingRequired("jwt.issuer".to_string()));
        }
        if self.jwt.expiry_minutes == 0 {
            return Err(ConfigError::InvalidValue("jwt.expiry_minutes".to_string()));
        }
        if self.storage == StorageKind::Sqlite {
            if self.database.path.trim().is_empty() {
                return Err(ConfigError::MissingRequired("database.path".to_string()));
            }
            if self.database.max_connections == 0 {
                return Err(ConfigError::InvalidValue("database.max_connections".to_string()));
            }
        }
        Ok(())
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_toml("").unwrap();

        assert_eq!(config.storage, StorageKind::InMemory);
        assert_eq!(config.database.path, "product-manager.db");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.jwt.issuer, "product-manager");
        assert_eq!(config.jwt.expiry_minutes, 60);
        assert_eq!(config.seed.product_count, 30);
    }

    #[test]
    fn test_toml_overrides() {
        let config = AppConfig::from_toml(
            r#"
            storage = "sqlite"

            [database]
            path = "/tmp/products.db"

            [jwt]
            key = "another-secret"
            expiry_minutes = 15
            "#,
        )
        .unwrap();

        assert_eq!(config.storage, StorageKind::Sqlite);
        assert_eq!(config.database.path, "/tmp/products.db");
        // Untouched keys keep their defaults
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.jwt.key, "another-secret");
        assert_eq!(config.jwt.expiry_minutes, 15);
    }

    #[test]
    fn test_rejects_empty_key() {
        let err = AppConfig::from_toml("[jwt]\nkey = \"  \"").unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired(ref key) if key == "jwt.key"));
    }

    #[test]
    fn test_rejects_zero_expiry() {
        let err = AppConfig::from_toml("[jwt]\nexpiry_minutes = 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref key) if key == "jwt.expiry_minutes"));
    }

    #[test]
    fn test_rejects_unknown_storage() {
        let err = AppConfig::from_toml("storage = \"postgres\"").unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }
}

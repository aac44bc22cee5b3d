//! Seed the product collection with demo data.
//!
//! Products are read from a YAML list (the same shape as the
//! `POST /api/products` body), validated, then inserted into the store
//! selected by `DATABASE_URL`.

use std::path::Path;

use supermarket_api::config::{ApiConfig, ConfigError, StoreConfig};
use supermarket_api::db::{self, DocumentStore, RepositoryError};
use supermarket_api::models::{ProductIn, Validate, ValidationErrors};
use supermarket_api::services::RecordService;
use supermarket_core::{Collection, Product, RecordId};
use thiserror::Error;
use tracing::{info, warn};

/// Catalogue used when no file is given.
const BUILTIN_PRODUCTS: &str = include_str!("../../seed/products.yaml");

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// `DATABASE_URL` is unset.
    #[error("Missing environment variable: DATABASE_URL")]
    MissingDatabaseUrl,

    /// Invalid environment.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The products file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The products file is not a YAML list of products.
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// At least one product failed validation.
    #[error("Invalid products: {0}")]
    Validation(ValidationErrors),

    /// Store error.
    #[error("{0}")]
    Repository(#[from] RepositoryError),
}

/// Parse and validate a YAML list of products.
///
/// # Errors
///
/// Returns `SeedError::Yaml` for malformed input and `SeedError::Validation`
/// listing every invalid field.
pub fn parse_products(yaml: &str) -> Result<Vec<Product>, SeedError> {
    let raw: Vec<ProductIn> = serde_yaml::from_str(yaml)?;
    raw.validate().map_err(SeedError::Validation)
}

/// Insert products one by one, returning their identifiers.
///
/// # Errors
///
/// Stops at the first store error.
pub async fn insert_products(
    store: &dyn DocumentStore,
    products: &[Product],
) -> Result<Vec<RecordId>, RepositoryError> {
    let service = RecordService::new(store);
    let mut ids = Vec::with_capacity(products.len());
    for product in products {
        ids.push(service.create(Collection::Product, product).await?);
    }
    Ok(ids)
}

/// Seed products from `file`, or the built-in catalogue.
///
/// # Errors
///
/// Returns an error if the file is unreadable or invalid, `DATABASE_URL` is
/// missing, or an insert fails.
pub async fn run(file: Option<&Path>) -> Result<(), SeedError> {
    let yaml = match file {
        Some(path) => {
            info!(path = %path.display(), "Loading products from file");
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| SeedError::Io {
                    path: path.display().to_string(),
                    source,
                })?
        }
        None => BUILTIN_PRODUCTS.to_string(),
    };

    let products = parse_products(&yaml)?;
    info!(count = products.len(), "Products validated");

    let config = ApiConfig::from_env()?;
    let store_config = config.store.ok_or(SeedError::MissingDatabaseUrl)?;
    if matches!(store_config, StoreConfig::Memory) {
        warn!("DATABASE_URL selects the in-memory store; seeded products are lost on exit");
    }

    let store = db::connect(&store_config)?;
    let ids = insert_products(store.as_ref(), &products).await?;

    info!(inserted = ids.len(), "Seeding complete");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use supermarket_api::db::MemoryDocumentStore;

    use super::*;

    #[test]
    fn test_builtin_catalogue_is_valid() {
        let products = parse_products(BUILTIN_PRODUCTS).unwrap();
        assert_eq!(products.len(), 6);
        assert_eq!(products[0].title, "Whole Milk");
        assert!(products[0].in_stock);
        assert!(!products[5].in_stock);
    }

    #[test]
    fn test_invalid_product_reports_index() {
        let yaml = "
- title: Apples
  price: 1.0
  category: produce
- title: Pears
  price: -1.0
  category: produce
";
        let Err(SeedError::Validation(errors)) = parse_products(yaml) else {
            panic!("expected validation error");
        };
        assert_eq!(errors.errors()[0].field, "[1].price");
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            parse_products("title: [unclosed"),
            Err(SeedError::Yaml(_))
        ));
    }

    #[tokio::test]
    async fn test_insert_products() {
        let store = MemoryDocumentStore::new();
        let products = parse_products(BUILTIN_PRODUCTS).unwrap();

        let ids = insert_products(&store, &products).await.unwrap();
        assert_eq!(ids.len(), products.len());

        let listed = RecordService::new(&store)
            .list(Collection::Product, None)
            .await
            .unwrap();
        assert_eq!(listed.len(), products.len());
    }
}

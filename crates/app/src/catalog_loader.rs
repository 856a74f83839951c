use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use storefront_catalog::{Catalog, Product, ProductDraft};
use storefront_core::{DomainError, Money, ProductId};

/// One product as it appears in a catalog JSON file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Decimal dollars, e.g. `49.99`.
    pub price: f64,
    #[serde(default)]
    pub image: String,
    pub category: String,
    #[serde(default)]
    pub subcategory: Option<String>,
    pub in_stock: bool,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub num_reviews: u32,
    pub created_at: DateTime<Utc>,
}

impl ProductRecord {
    pub fn into_product(self) -> Result<Product, DomainError> {
        Product::list(ProductDraft {
            id: ProductId::new(self.id)?,
            name: self.name,
            description: self.description,
            price: Money::from_decimal(self.price)?,
            image: self.image,
            category: self.category,
            subcategory: self.subcategory,
            in_stock: self.in_stock,
            rating: self.rating,
            num_reviews: self.num_reviews,
            created_at: self.created_at,
        })
    }
}

/// Parse a JSON array of products into a catalog. Any invalid record fails the
/// whole load.
pub fn parse_catalog(json: &str) -> anyhow::Result<Catalog> {
    let records: Vec<ProductRecord> =
        serde_json::from_str(json).context("catalog is not a JSON array of products")?;

    let products = records
        .into_iter()
        .enumerate()
        .map(|(pos, record)| {
            let id = record.id.clone();
            record
                .into_product()
                .with_context(|| format!("invalid product #{pos} ('{id}')"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Catalog::from_products(products)?)
}

pub fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    let catalog =
        parse_catalog(&text).with_context(|| format!("failed to load catalog {}", path.display()))?;
    tracing::info!(path = %path.display(), products = catalog.len(), "catalog loaded");
    Ok(catalog)
}

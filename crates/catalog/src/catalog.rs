use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use storefront_core::{DomainError, ProductId};

use crate::filter::{self, FilterCriteria};
use crate::product::Product;

/// A category together with the subcategories its products use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub subcategories: Vec<String>,
}

/// Read-only product listing, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate product ids.
    pub fn from_products(products: Vec<Product>) -> Result<Self, DomainError> {
        let mut index = HashMap::with_capacity(products.len());
        for (pos, product) in products.iter().enumerate() {
            if index.insert(product.id_typed().clone(), pos).is_some() {
                return Err(DomainError::conflict(format!(
                    "duplicate product id '{}'",
                    product.id_typed()
                )));
            }
        }
        tracing::debug!(products = products.len(), "catalog loaded");
        Ok(Self { products, index })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).map(|&pos| &self.products[pos])
    }

    /// Matching products in criteria order.
    pub fn query(&self, criteria: &FilterCriteria) -> Vec<&Product> {
        filter::select(&self.products, criteria)
    }

    /// Categories in first-seen order, each with its sorted subcategories.
    pub fn categories(&self) -> Vec<CategorySummary> {
        let mut order: Vec<&str> = Vec::new();
        let mut subs: HashMap<&str, BTreeSet<&str>> = HashMap::new();
        for product in &self.products {
            let entry = subs.entry(product.category()).or_insert_with(|| {
                order.push(product.category());
                BTreeSet::new()
            });
            if let Some(sub) = product.subcategory() {
                entry.insert(sub);
            }
        }

        order
            .into_iter()
            .map(|name| CategorySummary {
                name: name.to_string(),
                subcategories: subs
                    .get(name)
                    .map(|s| s.iter().map(|s| s.to_string()).collect())
                    .unwrap_or_default(),
            })
            .collect()
    }

    /// The first `n` products in catalog order.
    pub fn featured(&self, n: usize) -> &[Product] {
        &self.products[..n.min(self.products.len())]
    }

    /// Up to `n` other products from the same category as `id`.
    pub fn related(&self, id: &ProductId, n: usize) -> Vec<&Product> {
        let Some(product) = self.get(id) else {
            return Vec::new();
        };
        self.products
            .iter()
            .filter(|p| p.category() == product.category() && p.id_typed() != id)
            .take(n)
            .collect()
    }
}

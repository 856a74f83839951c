use chrono::{DateTime, Utc};
use serde::Serialize;

use storefront_core::{DomainError, Money, ProductId, Sellable};

/// Average review score, always within `0.0..=5.0`.
#[derive(Debug, Copy, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Rating(f64);

impl Rating {
    pub const MAX: f64 = 5.0;

    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !(0.0..=Self::MAX).contains(&value) {
            // NaN fails the range check too.
            return Err(DomainError::validation(format!(
                "rating must be between 0 and 5, got {value}"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for Rating {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0).is_eq()
    }
}

impl Eq for Rating {}

impl PartialOrd for Rating {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rating {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Input for listing a product in the catalog.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub image: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub in_stock: bool,
    pub rating: f64,
    pub num_reviews: u32,
    pub created_at: DateTime<Utc>,
}

/// A listed product. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    price: Money,
    image: String,
    category: String,
    subcategory: Option<String>,
    in_stock: bool,
    rating: Rating,
    num_reviews: u32,
    created_at: DateTime<Utc>,
}

impl Product {
    /// Validate a draft and list it.
    pub fn list(draft: ProductDraft) -> Result<Self, DomainError> {
        if draft.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if draft.category.trim().is_empty() {
            return Err(DomainError::validation("category cannot be empty"));
        }
        let rating = Rating::new(draft.rating)?;

        Ok(Self {
            id: draft.id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            image: draft.image,
            category: draft.category,
            subcategory: draft.subcategory.filter(|s| !s.trim().is_empty()),
            in_stock: draft.in_stock,
            rating,
            num_reviews: draft.num_reviews,
            created_at: draft.created_at,
        })
    }

    pub fn id_typed(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn subcategory(&self) -> Option<&str> {
        self.subcategory.as_deref()
    }

    pub fn in_stock(&self) -> bool {
        self.in_stock
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn num_reviews(&self) -> u32 {
        self.num_reviews
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Sellable for Product {
    fn product_id(&self) -> &ProductId {
        &self.id
    }

    fn unit_price(&self) -> Money {
        self.price
    }
}

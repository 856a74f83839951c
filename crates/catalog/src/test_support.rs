use chrono::{DateTime, TimeZone, Utc};

use storefront_core::{Money, ProductId};

use crate::product::{Product, ProductDraft};

fn base_time() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

pub(crate) fn product(
    id: &str,
    category: &str,
    subcategory: Option<&str>,
    cents: u64,
    rating: f64,
) -> Product {
    Product::list(ProductDraft {
        id: ProductId::new(id).unwrap(),
        name: format!("Product {id}"),
        description: String::new(),
        price: Money::from_cents(cents),
        image: String::new(),
        category: category.to_string(),
        subcategory: subcategory.map(str::to_string),
        in_stock: true,
        rating,
        num_reviews: 0,
        created_at: base_time(),
    })
    .unwrap()
}

pub(crate) fn product_at(id: &str, unix_secs: i64) -> Product {
    Product::list(ProductDraft {
        id: ProductId::new(id).unwrap(),
        name: format!("Product {id}"),
        description: String::new(),
        price: Money::from_dollars(10),
        image: String::new(),
        category: "Home".to_string(),
        subcategory: None,
        in_stock: true,
        rating: 3.0,
        num_reviews: 0,
        created_at: Utc.timestamp_opt(unix_secs, 0).unwrap(),
    })
    .unwrap()
}

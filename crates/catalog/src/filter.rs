//! Catalog filter/sort engine.
//!
//! Filtering is conjunctive: a product is kept only if it satisfies every criterion
//! that is set. Unset, empty or non-finite criteria impose no constraint, so
//! [`apply`] is total and never fails. Sorting runs after filtering and is stable,
//! so ties keep catalog order.

use core::cmp::Ordering;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use storefront_core::Money;

use crate::product::Product;

/// Sort order requested by the shopper.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    #[serde(rename = "price-asc")]
    PriceAsc,
    #[serde(rename = "price-desc")]
    PriceDesc,
    #[serde(rename = "rating")]
    RatingDesc,
    #[serde(rename = "newest")]
    Newest,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::RatingDesc => "rating",
            SortKey::Newest => "newest",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::PriceAsc => a.price().cmp(&b.price()),
            SortKey::PriceDesc => b.price().cmp(&a.price()),
            SortKey::RatingDesc => b.rating().cmp(&a.rating()),
            SortKey::Newest => b.created_at().cmp(&a.created_at()),
        }
    }
}

impl core::fmt::Display for SortKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price-asc" => Ok(SortKey::PriceAsc),
            "price-desc" => Ok(SortKey::PriceDesc),
            "rating" => Ok(SortKey::RatingDesc),
            "newest" => Ok(SortKey::Newest),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

/// Filter/sort parameters for a catalog query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub category: Option<String>,
    /// Only honoured together with `category`.
    pub subcategory: Option<String>,
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
    pub min_rating: Option<f64>,
    pub sort_by: Option<SortKey>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    pub fn with_price_range(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn with_min_rating(mut self, rating: f64) -> Self {
        self.min_rating = Some(rating);
        self
    }

    pub fn sorted_by(mut self, key: SortKey) -> Self {
        self.sort_by = Some(key);
        self
    }

    /// Build criteria from URL-style query parameters.
    ///
    /// Recognised keys: `category`, `subcategory`, `minPrice`, `maxPrice`, `rating`,
    /// `sort`. Unknown keys and unparseable values are dropped; later values win.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut criteria = Self::default();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref().trim());
            if value.is_empty() {
                continue;
            }
            let accepted = match key {
                "category" => {
                    criteria.category = Some(value.to_string());
                    true
                }
                "subcategory" => {
                    criteria.subcategory = Some(value.to_string());
                    true
                }
                "minPrice" => value.parse::<Money>().map(|m| criteria.min_price = Some(m)).is_ok(),
                "maxPrice" => value.parse::<Money>().map(|m| criteria.max_price = Some(m)).is_ok(),
                "rating" => match value.parse::<f64>() {
                    Ok(r) if r.is_finite() => {
                        criteria.min_rating = Some(r);
                        true
                    }
                    _ => false,
                },
                "sort" => value.parse::<SortKey>().map(|k| criteria.sort_by = Some(k)).is_ok(),
                _ => false,
            };
            if !accepted {
                tracing::debug!(key, value, "ignoring catalog query parameter");
            }
        }
        criteria
    }

    /// Inverse of [`FilterCriteria::from_query_pairs`].
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(c) = &self.category {
            pairs.push(("category", c.clone()));
        }
        if let Some(s) = &self.subcategory {
            pairs.push(("subcategory", s.clone()));
        }
        if let Some(m) = self.min_price {
            pairs.push(("minPrice", m.to_decimal_string()));
        }
        if let Some(m) = self.max_price {
            pairs.push(("maxPrice", m.to_decimal_string()));
        }
        if let Some(r) = self.min_rating {
            pairs.push(("rating", r.to_string()));
        }
        if let Some(k) = self.sort_by {
            pairs.push(("sort", k.as_str().to_string()));
        }
        pairs
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Drop every filter and the sort key.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Select `category`, or deselect it if already selected. Always resets the
    /// subcategory.
    pub fn toggle_category(&mut self, category: &str) {
        self.category = match self.category.as_deref() {
            Some(current) if current == category => None,
            _ => Some(category.to_string()),
        };
        self.subcategory = None;
    }

    pub fn toggle_subcategory(&mut self, subcategory: &str) {
        self.subcategory = match self.subcategory.as_deref() {
            Some(current) if current == subcategory => None,
            _ => Some(subcategory.to_string()),
        };
    }

    pub fn toggle_rating(&mut self, rating: f64) {
        self.min_rating = match self.min_rating {
            Some(current) if current == rating => None,
            _ => Some(rating),
        };
    }

    fn active_category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    fn active_subcategory(&self) -> Option<&str> {
        self.active_category()?;
        self.subcategory.as_deref().filter(|s| !s.is_empty())
    }

    fn active_min_rating(&self) -> Option<f64> {
        self.min_rating.filter(|r| r.is_finite())
    }

    /// Whether `product` satisfies every criterion that is set.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = self.active_category() {
            if product.category() != category {
                return false;
            }
        }
        if let Some(subcategory) = self.active_subcategory() {
            if product.subcategory() != Some(subcategory) {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if product.price() < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if product.price() > max {
                return false;
            }
        }
        if let Some(threshold) = self.active_min_rating() {
            if product.rating().value() < threshold {
                return false;
            }
        }
        true
    }
}

/// Borrowing form of [`apply`]: the matching products, ordered, without cloning.
pub fn select<'a>(products: &'a [Product], criteria: &FilterCriteria) -> Vec<&'a Product> {
    let mut selected: Vec<&Product> = products.iter().filter(|p| criteria.matches(p)).collect();
    if let Some(key) = criteria.sort_by {
        // `sort_by` is stable: equal keys keep catalog order.
        selected.sort_by(|a, b| key.compare(a, b));
    }
    selected
}

/// Filter and sort `products` according to `criteria`.
pub fn apply(products: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
    select(products, criteria).into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{product, product_at};

    fn sample() -> Vec<Product> {
        vec![
            product("p1", "Electronics", Some("Audio"), 150_00, 4.5),
            product("p2", "Clothing", Some("Shirts"), 20_00, 3.9),
            product("p3", "Electronics", Some("Phones"), 80_00, 4.8),
            product("p4", "Home", None, 45_00, 4.1),
            product("p5", "Clothing", Some("Shoes"), 95_00, 2.5),
        ]
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id_typed().as_str()).collect()
    }

    #[test]
    fn empty_criteria_returns_catalog_order() {
        let products = sample();
        let result = apply(&products, &FilterCriteria::new());
        assert_eq!(ids(&result), vec!["p1", "p2", "p3", "p4", "p5"]);
    }

    #[test]
    fn category_with_price_sort_returns_matches_in_ascending_price() {
        let products = sample();
        let criteria = FilterCriteria::new()
            .with_category("Electronics")
            .sorted_by(SortKey::PriceAsc);
        let result = apply(&products, &criteria);
        assert_eq!(ids(&result), vec!["p3", "p1"]);
    }

    #[test]
    fn category_match_is_case_sensitive() {
        let products = sample();
        let result = apply(&products, &FilterCriteria::new().with_category("electronics"));
        assert!(result.is_empty());
    }

    #[test]
    fn subcategory_narrows_within_category() {
        let products = sample();
        let criteria = FilterCriteria::new().with_category("Clothing").with_subcategory("Shoes");
        assert_eq!(ids(&apply(&products, &criteria)), vec!["p5"]);
    }

    #[test]
    fn subcategory_without_category_is_ignored() {
        let products = sample();
        let criteria = FilterCriteria::new().with_subcategory("Shoes");
        assert_eq!(apply(&products, &criteria).len(), products.len());
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let products = sample();
        let criteria = FilterCriteria::new()
            .with_price_range(Some(Money::from_dollars(20)), Some(Money::from_dollars(80)));
        assert_eq!(ids(&apply(&products, &criteria)), vec!["p2", "p3", "p4"]);
    }

    #[test]
    fn rating_threshold_is_inclusive() {
        let products = sample();
        let criteria = FilterCriteria::new().with_min_rating(4.5);
        assert_eq!(ids(&apply(&products, &criteria)), vec!["p1", "p3"]);
    }

    #[test]
    fn non_finite_rating_imposes_no_constraint() {
        let products = sample();
        let criteria = FilterCriteria::new().with_min_rating(f64::NAN);
        assert_eq!(apply(&products, &criteria).len(), products.len());
    }

    #[test]
    fn empty_category_string_imposes_no_constraint() {
        let products = sample();
        let criteria = FilterCriteria::new().with_category("");
        assert_eq!(apply(&products, &criteria).len(), products.len());
    }

    #[test]
    fn rating_sort_is_descending_and_stable() {
        let products = vec![
            product("a", "Home", None, 10_00, 4.0),
            product("b", "Home", None, 10_00, 5.0),
            product("c", "Home", None, 10_00, 4.0),
        ];
        let result = apply(&products, &FilterCriteria::new().sorted_by(SortKey::RatingDesc));
        assert_eq!(ids(&result), vec!["b", "a", "c"]);
    }

    #[test]
    fn price_desc_sort() {
        let products = sample();
        let result = apply(&products, &FilterCriteria::new().sorted_by(SortKey::PriceDesc));
        assert_eq!(ids(&result), vec!["p1", "p5", "p3", "p4", "p2"]);
    }

    #[test]
    fn newest_sort_orders_by_creation_descending() {
        let products = vec![
            product_at("old", 1_600_000_000),
            product_at("new", 1_700_000_000),
            product_at("mid", 1_650_000_000),
        ];
        let result = apply(&products, &FilterCriteria::new().sorted_by(SortKey::Newest));
        assert_eq!(ids(&result), vec!["new", "mid", "old"]);
    }

    #[test]
    fn query_pairs_parse_known_keys_and_drop_garbage() {
        let criteria = FilterCriteria::from_query_pairs([
            ("category", "Electronics"),
            ("minPrice", "19.99"),
            ("maxPrice", "not-a-number"),
            ("rating", "4"),
            ("sort", "price-desc"),
            ("color", "red"),
            ("subcategory", ""),
        ]);
        assert_eq!(criteria.category.as_deref(), Some("Electronics"));
        assert_eq!(criteria.min_price, Some(Money::from_cents(1999)));
        assert_eq!(criteria.max_price, None);
        assert_eq!(criteria.min_rating, Some(4.0));
        assert_eq!(criteria.sort_by, Some(SortKey::PriceDesc));
        assert_eq!(criteria.subcategory, None);
    }

    #[test]
    fn unknown_sort_value_is_ignored() {
        let criteria = FilterCriteria::from_query_pairs([("sort", "popularity")]);
        assert!(criteria.is_empty());
    }

    #[test]
    fn query_pairs_round_trip() {
        let criteria = FilterCriteria::new()
            .with_category("Clothing")
            .with_subcategory("Shoes")
            .with_price_range(Some(Money::from_cents(1050)), Some(Money::from_dollars(200)))
            .with_min_rating(3.0)
            .sorted_by(SortKey::Newest);
        let parsed = FilterCriteria::from_query_pairs(criteria.to_query_pairs());
        assert_eq!(parsed, criteria);
    }

    #[test]
    fn toggling_category_resets_subcategory() {
        let mut criteria = FilterCriteria::new().with_category("Clothing").with_subcategory("Shoes");
        criteria.toggle_category("Electronics");
        assert_eq!(criteria.category.as_deref(), Some("Electronics"));
        assert_eq!(criteria.subcategory, None);

        criteria.toggle_category("Electronics");
        assert_eq!(criteria.category, None);
    }

    #[test]
    fn toggling_rating_twice_clears_it() {
        let mut criteria = FilterCriteria::new();
        criteria.toggle_rating(3.0);
        assert_eq!(criteria.min_rating, Some(3.0));
        criteria.toggle_rating(3.0);
        assert!(criteria.is_empty());
    }

    #[test]
    fn clear_resets_everything() {
        let mut criteria = FilterCriteria::new().with_category("Home").sorted_by(SortKey::Newest);
        criteria.clear();
        assert!(criteria.is_empty());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        const CATEGORIES: [&str; 3] = ["Electronics", "Clothing", "Home"];

        fn arb_products() -> impl Strategy<Value = Vec<Product>> {
            prop::collection::vec((0usize..3, 0u64..100_000, 0u32..=50), 0..40).prop_map(|rows| {
                rows.into_iter()
                    .enumerate()
                    .map(|(idx, (cat, cents, rating_tenths))| {
                        product(
                            &format!("p{idx}"),
                            CATEGORIES[cat],
                            None,
                            cents,
                            f64::from(rating_tenths) / 10.0,
                        )
                    })
                    .collect()
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: a category filter is sound and complete.
            #[test]
            fn category_filter_is_sound_and_complete(
                products in arb_products(),
                cat in 0usize..3,
            ) {
                let category = CATEGORIES[cat];
                let result = apply(&products, &FilterCriteria::new().with_category(category));

                prop_assert!(result.iter().all(|p| p.category() == category));
                let kept: Vec<_> = result.iter().map(|p| p.id_typed().clone()).collect();
                for p in &products {
                    if !kept.contains(p.id_typed()) {
                        prop_assert_ne!(p.category(), category);
                    }
                }
            }

            /// Property: every result lies within an inclusive price range.
            #[test]
            fn price_range_is_respected(
                products in arb_products(),
                a in 0u64..100_000,
                b in 0u64..100_000,
            ) {
                let (lo, hi) = (Money::from_cents(a.min(b)), Money::from_cents(a.max(b)));
                let result = apply(&products, &FilterCriteria::new().with_price_range(Some(lo), Some(hi)));
                prop_assert!(result.iter().all(|p| lo <= p.price() && p.price() <= hi));
                let expected = products.iter().filter(|p| lo <= p.price() && p.price() <= hi).count();
                prop_assert_eq!(result.len(), expected);
            }

            /// Property: price-ascending output is non-decreasing and idempotent.
            #[test]
            fn price_asc_is_sorted_and_idempotent(products in arb_products()) {
                let criteria = FilterCriteria::new().sorted_by(SortKey::PriceAsc);
                let once = apply(&products, &criteria);
                prop_assert!(once.windows(2).all(|w| w[0].price() <= w[1].price()));

                let twice = apply(&once, &criteria);
                prop_assert_eq!(once, twice);
            }

            /// Property: apply is referentially transparent.
            #[test]
            fn apply_is_deterministic(products in arb_products(), min_rating in 0.0f64..5.0) {
                let criteria = FilterCriteria::new()
                    .with_min_rating(min_rating)
                    .sorted_by(SortKey::RatingDesc);
                prop_assert_eq!(apply(&products, &criteria), apply(&products, &criteria));
            }
        }
    }
}

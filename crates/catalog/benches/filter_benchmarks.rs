use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::{TimeZone, Utc};
use storefront_catalog::{apply, FilterCriteria, Product, ProductDraft, SortKey};
use storefront_core::{Money, ProductId};

const CATEGORIES: [&str; 4] = ["Electronics", "Clothing", "Home", "Books"];

fn build_catalog(size: usize) -> Vec<Product> {
    (0..size)
        .map(|i| {
            Product::list(ProductDraft {
                id: ProductId::new(format!("p{i}")).unwrap(),
                name: format!("Product {i}"),
                description: String::new(),
                price: Money::from_cents(((i * 7919) % 100_000) as u64),
                image: String::new(),
                category: CATEGORIES[i % CATEGORIES.len()].to_string(),
                subcategory: None,
                in_stock: i % 5 != 0,
                rating: ((i * 31) % 51) as f64 / 10.0,
                num_reviews: (i % 300) as u32,
                created_at: Utc.timestamp_opt(1_600_000_000 + i as i64 * 60, 0).unwrap(),
            })
            .unwrap()
        })
        .collect()
}

fn bench_filter_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_apply");

    for size in [100usize, 1_000, 10_000] {
        let products = build_catalog(size);
        group.throughput(Throughput::Elements(size as u64));

        let unsorted = FilterCriteria::new()
            .with_category("Electronics")
            .with_price_range(Some(Money::from_dollars(10)), Some(Money::from_dollars(500)));
        group.bench_with_input(BenchmarkId::new("filter_only", size), &products, |b, products| {
            b.iter(|| apply(black_box(products), black_box(&unsorted)))
        });

        let sorted = unsorted.clone().with_min_rating(2.0).sorted_by(SortKey::RatingDesc);
        group.bench_with_input(BenchmarkId::new("filter_and_sort", size), &products, |b, products| {
            b.iter(|| apply(black_box(products), black_box(&sorted)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_filter_sort);
criterion_main!(benches);

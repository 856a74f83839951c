//! Product catalog domain module.
//!
//! A read-only product listing plus the filter/sort engine that turns a set of
//! [`FilterCriteria`] into an ordered subset of products. Pure domain logic: no IO,
//! no HTTP, no storage.

pub mod catalog;
pub mod filter;
pub mod product;

pub use catalog::{Catalog, CategorySummary};
pub use filter::{apply, select, FilterCriteria, SortKey};
pub use product::{Product, ProductDraft, Rating};

#[cfg(test)]
pub(crate) mod test_support;

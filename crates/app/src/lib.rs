//! Composition root: configuration, catalog loading and service wiring.

pub mod bootstrap;
pub mod catalog_loader;
pub mod config;

pub use bootstrap::Storefront;
pub use catalog_loader::{load_catalog, parse_catalog, ProductRecord};
pub use config::StorefrontConfig;

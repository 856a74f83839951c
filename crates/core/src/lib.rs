//! `storefront-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the catalog, cart and
//! checkout crates (no infrastructure concerns).

pub mod aggregate;
pub mod error;
pub mod event;
pub mod id;
pub mod money;
pub mod sellable;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use error::{DomainError, DomainResult};
pub use event::Event;
pub use id::{ProductId, SessionId, UserId};
pub use money::Money;
pub use sellable::Sellable;
pub use value_object::ValueObject;

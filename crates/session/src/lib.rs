//! `storefront-session`: per-shopper state.
//!
//! A [`SessionContext`] owns one shopper's identity, cart and checkout flow and is
//! passed explicitly to every operation. The [`SessionRegistry`] gives each
//! context its own lock so commands on one cart are serialised.

pub mod context;
pub mod error;
pub mod identity_store;
pub mod registry;

pub use context::SessionContext;
pub use error::SessionError;
pub use identity_store::{IdentityStore, InMemoryIdentityStore, JsonFileIdentityStore};
pub use registry::SessionRegistry;

//! `storefront-auth`: shopper authentication boundary.
//!
//! Credentials are checked by a [`CredentialVerifier`]; this crate ships only an
//! in-memory implementation that starts empty. Nothing here touches the network.

pub mod credentials;
pub mod error;
pub mod identity;

pub use credentials::{CredentialVerifier, InMemoryCredentialStore, Registration};
pub use error::AuthError;
pub use identity::Identity;

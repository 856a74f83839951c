use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use storefront_core::UserId;

use crate::error::AuthError;
use crate::identity::Identity;

/// Checks credentials and creates accounts.
///
/// The session layer depends only on this trait, so a real identity provider can
/// replace the in-memory store without touching session code.
pub trait CredentialVerifier: Send + Sync {
    /// Resolve an identity from an email/password pair.
    fn verify(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Create an account. Fails if the email is already registered.
    fn register(&self, registration: Registration) -> Result<Identity, AuthError>;
}

/// Sign-up form input.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl Registration {
    fn validate(&self) -> Result<(), AuthError> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AuthError::Validation("a valid email is required".to_string()));
        }
        if self.password.is_empty() {
            return Err(AuthError::Validation("password cannot be empty".to_string()));
        }
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(AuthError::Validation("first and last name are required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct StoredCredential {
    identity: Identity,
    salt: [u8; 16],
    digest: [u8; 32],
}

fn hash_password(salt: &[u8; 16], password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

/// Emails compare case-insensitively.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// In-memory credential store with salted SHA-256 password digests.
///
/// Starts empty; accounts exist only after [`CredentialVerifier::register`].
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    accounts: RwLock<HashMap<String, StoredCredential>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts.read().map(|a| a.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CredentialVerifier for InMemoryCredentialStore {
    fn verify(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| AuthError::Storage("lock poisoned".to_string()))?;

        let stored = accounts
            .get(&normalize_email(email))
            .ok_or(AuthError::InvalidCredentials)?;
        if hash_password(&stored.salt, password) != stored.digest {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(stored.identity.clone())
    }

    fn register(&self, registration: Registration) -> Result<Identity, AuthError> {
        registration.validate()?;
        let key = normalize_email(&registration.email);

        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| AuthError::Storage("lock poisoned".to_string()))?;
        if accounts.contains_key(&key) {
            return Err(AuthError::EmailTaken(registration.email.trim().to_string()));
        }

        let identity = Identity {
            id: UserId::new(),
            email: registration.email.trim().to_string(),
            first_name: registration.first_name.trim().to_string(),
            last_name: registration.last_name.trim().to_string(),
            is_admin: false,
            created_at: Utc::now(),
        };
        let salt: [u8; 16] = rand::random();
        let digest = hash_password(&salt, &registration.password);

        accounts.insert(
            key,
            StoredCredential {
                identity: identity.clone(),
                salt,
                digest,
            },
        );
        tracing::debug!(user_id = %identity.id, "account registered");
        Ok(identity)
    }
}

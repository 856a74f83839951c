use std::sync::Arc;

use anyhow::Context;

use storefront_auth::{CredentialVerifier, InMemoryCredentialStore};
use storefront_catalog::Catalog;
use storefront_core::SessionId;
use storefront_session::{
    IdentityStore, JsonFileIdentityStore, SessionContext, SessionError, SessionRegistry,
};

use crate::catalog_loader::load_catalog;
use crate::config::StorefrontConfig;

/// The wired storefront: catalog, credential check, identity persistence and live
/// sessions.
pub struct Storefront {
    pub catalog: Arc<Catalog>,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub identity_store: Arc<dyn IdentityStore>,
    pub sessions: SessionRegistry,
}

impl Storefront {
    pub fn build(config: &StorefrontConfig) -> anyhow::Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => load_catalog(path)?,
            None => {
                tracing::warn!("no catalog configured; starting with an empty catalog");
                Catalog::default()
            }
        };

        Ok(Self::from_parts(
            catalog,
            Arc::new(InMemoryCredentialStore::new()),
            Arc::new(JsonFileIdentityStore::new(&config.identity_dir)),
        ))
    }

    pub fn from_parts(
        catalog: Catalog,
        credentials: Arc<dyn CredentialVerifier>,
        identity_store: Arc<dyn IdentityStore>,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            credentials,
            identity_store,
            sessions: SessionRegistry::new(),
        }
    }

    /// Open a new, signed-out session.
    pub fn open_session(&self) -> Result<SessionId, SessionError> {
        self.sessions.open()
    }

    /// Reopen a session under its earlier id, restoring the identity that
    /// session persisted. Returns the live session if it is still open.
    pub fn resume_session(&self, id: SessionId) -> anyhow::Result<SessionId> {
        if self.sessions.contains(id) {
            return Ok(id);
        }
        let ctx = SessionContext::restore(id, self.identity_store.as_ref())
            .with_context(|| format!("failed to restore identity record for session {id}"))?;
        Ok(self.sessions.insert(ctx)?)
    }

    pub fn close_session(&self, id: SessionId) -> Result<bool, SessionError> {
        self.sessions.close(id)
    }
}

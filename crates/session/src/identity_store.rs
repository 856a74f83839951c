use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use storefront_auth::Identity;
use storefront_core::SessionId;

use crate::error::SessionError;

/// Persistence for authenticated-identity records, one per session.
///
/// A record is stored and restored verbatim. Sessions never see each other's
/// records: signing in or out in one session leaves every other session as it
/// was.
pub trait IdentityStore: Send + Sync {
    fn load(&self, session: SessionId) -> Result<Option<Identity>, SessionError>;

    fn save(&self, session: SessionId, identity: &Identity) -> Result<(), SessionError>;

    fn clear(&self, session: SessionId) -> Result<(), SessionError>;
}

#[derive(Debug, Default)]
pub struct InMemoryIdentityStore {
    records: RwLock<HashMap<SessionId, Identity>>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityStore for InMemoryIdentityStore {
    fn load(&self, session: SessionId) -> Result<Option<Identity>, SessionError> {
        let records = self.records.read().map_err(|_| SessionError::LockPoisoned)?;
        Ok(records.get(&session).cloned())
    }

    fn save(&self, session: SessionId, identity: &Identity) -> Result<(), SessionError> {
        let mut records = self.records.write().map_err(|_| SessionError::LockPoisoned)?;
        records.insert(session, identity.clone());
        Ok(())
    }

    fn clear(&self, session: SessionId) -> Result<(), SessionError> {
        let mut records = self.records.write().map_err(|_| SessionError::LockPoisoned)?;
        records.remove(&session);
        Ok(())
    }
}

/// Identity records kept as JSON files, `<dir>/<session id>.json`.
///
/// A missing file means nobody is signed in to that session. The directory is
/// created on first save.
#[derive(Debug, Clone)]
pub struct JsonFileIdentityStore {
    dir: PathBuf,
}

impl JsonFileIdentityStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn record_path(&self, session: SessionId) -> PathBuf {
        self.dir.join(format!("{session}.json"))
    }
}

impl IdentityStore for JsonFileIdentityStore {
    fn load(&self, session: SessionId) -> Result<Option<Identity>, SessionError> {
        let text = match fs::read_to_string(self.record_path(session)) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn save(&self, session: SessionId, identity: &Identity) -> Result<(), SessionError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.record_path(session);
        let text = serde_json::to_string_pretty(identity)?;
        fs::write(&path, text)?;
        tracing::debug!(%session, path = %path.display(), "identity record saved");
        Ok(())
    }

    fn clear(&self, session: SessionId) -> Result<(), SessionError> {
        match fs::remove_file(self.record_path(session)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

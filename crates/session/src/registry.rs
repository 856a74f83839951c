use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use storefront_core::SessionId;

use crate::context::SessionContext;
use crate::error::SessionError;

/// Live sessions, each behind its own lock.
///
/// The map lock is held only long enough to find a session; commands then run
/// under that session's mutex, so different shoppers never contend.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<SessionContext>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fresh, signed-out session.
    pub fn open(&self) -> Result<SessionId, SessionError> {
        self.insert(SessionContext::new(SessionId::new()))
    }

    /// Register an already-built context (e.g. one restored from an identity store).
    pub fn insert(&self, ctx: SessionContext) -> Result<SessionId, SessionError> {
        let id = ctx.session_id();
        let mut sessions = self.sessions.write().map_err(|_| SessionError::LockPoisoned)?;
        sessions.insert(id, Arc::new(Mutex::new(ctx)));
        tracing::info!(session_id = %id, "session opened");
        Ok(id)
    }

    /// Drop a session. Returns `false` if it was not open.
    pub fn close(&self, id: SessionId) -> Result<bool, SessionError> {
        let mut sessions = self.sessions.write().map_err(|_| SessionError::LockPoisoned)?;
        let removed = sessions.remove(&id).is_some();
        if removed {
            tracing::info!(session_id = %id, "session closed");
        }
        Ok(removed)
    }

    /// Run `f` with exclusive access to one session.
    pub fn with_session<T>(
        &self,
        id: SessionId,
        f: impl FnOnce(&mut SessionContext) -> T,
    ) -> Result<T, SessionError> {
        let session = {
            let sessions = self.sessions.read().map_err(|_| SessionError::LockPoisoned)?;
            sessions
                .get(&id)
                .cloned()
                .ok_or(SessionError::UnknownSession(id))?
        };
        let mut ctx = session.lock().map_err(|_| SessionError::LockPoisoned)?;
        Ok(f(&mut *ctx))
    }

    pub fn contains(&self, id: SessionId) -> bool {
        self.sessions
            .read()
            .map(|s| s.contains_key(&id))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

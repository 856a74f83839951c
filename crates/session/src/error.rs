use thiserror::Error;

use storefront_auth::AuthError;
use storefront_core::{DomainError, SessionId};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("identity record io: {0}")]
    Io(#[from] std::io::Error),

    #[error("identity record is malformed: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("unknown session {0}")]
    UnknownSession(SessionId),

    #[error("session lock poisoned")]
    LockPoisoned,
}

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("an account with email '{0}' already exists")]
    EmailTaken(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("credential store unavailable: {0}")]
    Storage(String),
}

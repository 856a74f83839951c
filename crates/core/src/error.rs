//! Errors raised by catalog, cart and checkout rules.

use thiserror::Error;

use crate::id::ProductId;

pub type DomainResult<T> = Result<T, DomainError>;

/// A shopper-facing rule was broken.
///
/// Every variant is deterministic: retrying the same operation on the same
/// state fails the same way. IO and persistence failures are reported by the
/// session layer instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Bad input from the shopper: a quantity below 1, a blank address field,
    /// a negative price in a catalog record.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The operation is not allowed in the current state, e.g. paying before a
    /// shipping address was entered or adding an out-of-stock product.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Names what was looked up, e.g. a cart line.
    #[error("not found: {0}")]
    NotFound(String),

    /// The checkout already reached a terminal step.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Checkout needs a signed-in shopper.
    #[error("sign-in required")]
    Unauthorized,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn out_of_stock(product_id: &ProductId) -> Self {
        Self::invariant(format!("product '{product_id}' is out of stock"))
    }

    pub fn not_in_cart(product_id: &ProductId) -> Self {
        Self::not_found(format!("cart line for product '{product_id}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_errors_name_the_product() {
        let id = ProductId::new("p-101").unwrap();

        let err = DomainError::out_of_stock(&id);
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert_eq!(err.to_string(), "invariant violated: product 'p-101' is out of stock");

        let err = DomainError::not_in_cart(&id);
        assert_eq!(err.to_string(), "not found: cart line for product 'p-101'");
    }

    #[test]
    fn unauthorized_reads_as_sign_in_prompt() {
        assert_eq!(DomainError::Unauthorized.to_string(), "sign-in required");
    }
}

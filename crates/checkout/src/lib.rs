//! Checkout domain module.
//!
//! The checkout flow is a small aggregate (`Shipping-Entry → Payment-Entry →
//! Submitted`) driven by commands and evolved by events. Placing an order snapshots
//! the cart into an [`OrderConfirmation`] and clears it.

pub mod address;
pub mod checkout;
pub mod order;

pub use address::{PaymentMethod, ShippingAddress};
pub use checkout::{
    BackNavigated, Checkout, CheckoutAbandoned, CheckoutCommand, CheckoutEvent, CheckoutId,
    CheckoutStep, GoBack, PaymentSubmitted, ShippingSubmitted, SubmitPayment, SubmitShipping,
};
pub use order::{place_order, OrderConfirmation, OrderLineSnapshot, OrderNumber};

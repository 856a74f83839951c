//! Cart ledger domain module.
//!
//! Per-session collection of (product, quantity) lines plus the derived order
//! totals (shipping, tax, grand total). Deterministic domain logic only (no IO,
//! no HTTP, no storage).

pub mod cart;
pub mod totals;

pub use cart::{Cart, CartLine};
pub use totals::{OrderTotals, FLAT_SHIPPING, FREE_SHIPPING_THRESHOLD, TAX_RATE_PERCENT};

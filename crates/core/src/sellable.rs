//! Seam between the catalog and the cart ledger.

use crate::id::ProductId;
use crate::money::Money;

/// Something that can be placed in a cart: it has a product identity and a unit
/// price. The catalog's `Product` implements this; the cart ledger only relies on
/// the trait, so neither crate depends on the other.
pub trait Sellable: Clone + core::fmt::Debug {
    fn product_id(&self) -> &ProductId;

    fn unit_price(&self) -> Money;
}

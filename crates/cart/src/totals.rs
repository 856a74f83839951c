use serde::{Deserialize, Serialize};

use storefront_core::{Money, ValueObject};

/// Orders with a subtotal strictly above this ship free.
pub const FREE_SHIPPING_THRESHOLD: Money = Money::from_dollars(100);

/// Shipping charged at or below the free-shipping threshold.
pub const FLAT_SHIPPING: Money = Money::from_dollars(10);

/// Sales tax, applied to the subtotal only.
pub const TAX_RATE_PERCENT: u64 = 7;

/// Derived totals for a cart at checkout.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
}

impl ValueObject for OrderTotals {}

impl OrderTotals {
    /// Tax is rounded half up to the cent.
    ///
    /// The subtotal must be one [`Cart`](crate::Cart) accepted; the cart rejects
    /// changes whose totals would not fit (see [`OrderTotals::checked_from_subtotal`]).
    pub fn from_subtotal(subtotal: Money) -> Self {
        let shipping = Self::shipping_for(subtotal);
        let tax = subtotal.scale(TAX_RATE_PERCENT, 100);

        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    /// Like [`OrderTotals::from_subtotal`], but `None` when the grand total
    /// overflows.
    pub fn checked_from_subtotal(subtotal: Money) -> Option<Self> {
        let shipping = Self::shipping_for(subtotal);
        let tax = subtotal.scale(TAX_RATE_PERCENT, 100);
        let total = subtotal.checked_add(shipping)?.checked_add(tax)?;

        Some(Self {
            subtotal,
            shipping,
            tax,
            total,
        })
    }

    fn shipping_for(subtotal: Money) -> Money {
        if subtotal > FREE_SHIPPING_THRESHOLD {
            Money::ZERO
        } else {
            FLAT_SHIPPING
        }
    }

    pub fn qualifies_for_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

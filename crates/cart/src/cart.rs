use serde::Serialize;

use storefront_core::{DomainError, DomainResult, Money, ProductId, Sellable};

use crate::totals::OrderTotals;

/// One product-and-quantity entry. `quantity` is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine<P> {
    product: P,
    quantity: u32,
}

impl<P: Sellable> CartLine<P> {
    pub fn product(&self) -> &P {
        &self.product
    }

    pub fn product_id(&self) -> &ProductId {
        self.product.product_id()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `unit price × quantity`.
    pub fn line_total(&self) -> Money {
        self.product.unit_price().times(self.quantity)
    }
}

/// The cart ledger for one session.
///
/// # Invariants
/// - At most one line per product id.
/// - Every line has `quantity >= 1`; a line is removed, never zeroed.
/// - Lines keep insertion order for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cart<P> {
    lines: Vec<CartLine<P>>,
}

impl<P> Default for Cart<P> {
    fn default() -> Self {
        Self { lines: Vec::new() }
    }
}

fn positive_quantity(quantity: i64) -> DomainResult<u32> {
    if quantity < 1 {
        return Err(DomainError::validation(format!(
            "quantity must be at least 1, got {quantity}"
        )));
    }
    u32::try_from(quantity)
        .map_err(|_| DomainError::validation(format!("quantity {quantity} is too large")))
}

impl<P: Sellable> Cart<P> {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.lines.iter().position(|l| l.product_id() == product_id)
    }

    /// Subtotal the cart would have if the line for `product_id` held `quantity`
    /// units at `unit_price`. `None` when that subtotal or its order totals
    /// overflow.
    fn projected_subtotal(
        &self,
        product_id: &ProductId,
        unit_price: Money,
        quantity: u32,
    ) -> Option<Money> {
        let others = self
            .lines
            .iter()
            .filter(|l| l.product_id() != product_id)
            .try_fold(Money::ZERO, |acc, l| {
                acc.checked_add(l.product.unit_price().checked_times(l.quantity)?)
            })?;
        let subtotal = others.checked_add(unit_price.checked_times(quantity)?)?;
        OrderTotals::checked_from_subtotal(subtotal).map(|_| subtotal)
    }

    fn ensure_totals_fit(
        &self,
        product_id: &ProductId,
        unit_price: Money,
        quantity: u32,
    ) -> DomainResult<()> {
        match self.projected_subtotal(product_id, unit_price, quantity) {
            Some(_) => Ok(()),
            None => Err(DomainError::validation(format!(
                "{quantity} units of '{product_id}' would overflow the cart total"
            ))),
        }
    }

    /// Add `quantity` units of `product`, merging into an existing line.
    ///
    /// Returns the line's new quantity. A quantity below 1, or one whose extended
    /// price would overflow the order total, is rejected and the cart is left
    /// unchanged.
    pub fn add(&mut self, product: P, quantity: i64) -> DomainResult<u32> {
        let pos = self.position(product.product_id());
        let checked = positive_quantity(quantity).and_then(|quantity| {
            let (unit_price, new_quantity) = match pos {
                Some(pos) => {
                    let line = &self.lines[pos];
                    let merged = line.quantity.checked_add(quantity).ok_or_else(|| {
                        DomainError::validation("line quantity overflow")
                    })?;
                    (line.product.unit_price(), merged)
                }
                None => (product.unit_price(), quantity),
            };
            self.ensure_totals_fit(product.product_id(), unit_price, new_quantity)?;
            Ok(new_quantity)
        });
        let new_quantity = checked.inspect_err(|e| {
            tracing::warn!(product_id = %product.product_id(), error = %e, "rejected cart add");
        })?;

        match pos {
            Some(pos) => self.lines[pos].quantity = new_quantity,
            None => self.lines.push(CartLine {
                product,
                quantity: new_quantity,
            }),
        }

        tracing::debug!(lines = self.lines.len(), new_quantity, "cart line added");
        Ok(new_quantity)
    }

    /// Set a line's quantity directly.
    ///
    /// Quantities below 1 are rejected (use [`Cart::remove`] to drop a line), as
    /// are quantities whose extended price would overflow the order total; an
    /// unknown product id is `NotFound`. The cart is unchanged on error.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> DomainResult<()> {
        let quantity = positive_quantity(quantity).inspect_err(|e| {
            tracing::warn!(%product_id, error = %e, "rejected cart quantity update");
        })?;
        let pos = self
            .position(product_id)
            .ok_or_else(|| DomainError::not_in_cart(product_id))?;
        let unit_price = self.lines[pos].product.unit_price();
        self.ensure_totals_fit(product_id, unit_price, quantity)
            .inspect_err(|e| {
                tracing::warn!(%product_id, error = %e, "rejected cart quantity update");
            })?;

        self.lines[pos].quantity = quantity;
        tracing::debug!(%product_id, quantity, "cart line quantity set");
        Ok(())
    }

    /// Remove a line; no-op when the product is not in the cart.
    pub fn remove(&mut self, product_id: &ProductId) -> Option<CartLine<P>> {
        let pos = self.position(product_id)?;
        tracing::debug!(%product_id, "cart line removed");
        Some(self.lines.remove(pos))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine<P>] {
        &self.lines
    }

    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine<P>> {
        self.position(product_id).map(|pos| &self.lines[pos])
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.position(product_id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct product lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all line quantities.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn totals(&self) -> OrderTotals {
        OrderTotals::from_subtotal(self.subtotal())
    }
}

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use storefront_cart::{Cart, OrderTotals};
use storefront_core::{
    Aggregate, AggregateRoot, DomainError, DomainResult, Money, ProductId, Sellable,
};

use crate::address::{PaymentMethod, ShippingAddress};
use crate::checkout::{Checkout, CheckoutCommand, SubmitPayment};

/// Human-facing order reference: `ORD-<8 digits>-<3 digits>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// The last eight digits of the millisecond timestamp plus a random
    /// three-digit suffix. Uniqueness is best-effort only.
    pub fn generate<R: Rng + ?Sized>(at: DateTime<Utc>, rng: &mut R) -> Self {
        let millis = at.timestamp_millis().rem_euclid(100_000_000);
        let suffix: u32 = rng.random_range(0..1000);
        Self(format!("ORD-{millis:08}-{suffix:03}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A cart line frozen at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineSnapshot {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_number: OrderNumber,
    pub lines: Vec<OrderLineSnapshot>,
    pub totals: OrderTotals,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub submitted_at: DateTime<Utc>,
}

/// Submit payment for `checkout` and turn `cart` into an order.
///
/// On success the checkout is `Submitted` and the cart is empty. On error
/// neither is touched.
pub fn place_order<P, R>(
    checkout: &mut Checkout,
    cart: &mut Cart<P>,
    method: PaymentMethod,
    now: DateTime<Utc>,
    rng: &mut R,
) -> DomainResult<OrderConfirmation>
where
    P: Sellable,
    R: Rng + ?Sized,
{
    let command = CheckoutCommand::SubmitPayment(SubmitPayment {
        method,
        occurred_at: now,
    });
    // Step checks come first so a finished checkout reports Conflict whatever
    // the cart holds.
    let events = checkout.handle(&command)?;
    if cart.is_empty() {
        return Err(DomainError::invariant("cannot place an order for an empty cart"));
    }
    for event in &events {
        checkout.apply(event);
    }

    let shipping_address = checkout
        .shipping_address()
        .cloned()
        .ok_or_else(|| DomainError::invariant("submitted checkout has no shipping address"))?;

    let lines = cart
        .lines()
        .iter()
        .map(|line| OrderLineSnapshot {
            product_id: line.product_id().clone(),
            quantity: line.quantity(),
            unit_price: line.product().unit_price(),
            line_total: line.line_total(),
        })
        .collect();

    let confirmation = OrderConfirmation {
        order_number: OrderNumber::generate(now, rng),
        lines,
        totals: cart.totals(),
        shipping_address,
        payment_method: method,
        submitted_at: now,
    };
    cart.clear();

    tracing::info!(
        checkout_id = %checkout.id(),
        order_number = %confirmation.order_number,
        total = %confirmation.totals.total,
        "order placed"
    );
    Ok(confirmation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::{CheckoutId, CheckoutStep, SubmitShipping};
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Item {
        id: ProductId,
        price: Money,
    }

    impl Sellable for Item {
        fn product_id(&self) -> &ProductId {
            &self.id
        }

        fn unit_price(&self) -> Money {
            self.price
        }
    }

    fn item(id: &str, dollars: u64) -> Item {
        Item {
            id: ProductId::new(id).unwrap(),
            price: Money::from_dollars(dollars),
        }
    }

    fn address() -> ShippingAddress {
        ShippingAddress {
            full_name: "Ada Lovelace".to_string(),
            address: "12 Analytical St".to_string(),
            city: "London".to_string(),
            postal_code: "N1 7AA".to_string(),
            country: "UK".to_string(),
            phone_number: "020 7946 0000".to_string(),
        }
    }

    fn test_time() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_718_000_123_456).unwrap()
    }

    fn cart_with_worked_example() -> Cart<Item> {
        let mut cart = Cart::new();
        cart.add(item("twenty", 20), 2).unwrap();
        cart.add(item("eighty", 80), 1).unwrap();
        cart
    }

    fn checkout_at_payment(cart: &Cart<Item>) -> Checkout {
        let mut checkout = Checkout::begin(CheckoutId::new(), cart).unwrap();
        checkout
            .execute(&CheckoutCommand::SubmitShipping(SubmitShipping {
                address: address(),
                occurred_at: test_time(),
            }))
            .unwrap();
        checkout
    }

    #[test]
    fn order_number_has_expected_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let number = OrderNumber::generate(test_time(), &mut rng);
        let s = number.as_str();

        assert!(s.starts_with("ORD-00123456-"), "got {s}");
        assert_eq!(s.len(), "ORD-00000000-000".len());
        assert!(s[13..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn place_order_snapshots_and_clears_cart() {
        let mut cart = cart_with_worked_example();
        let mut checkout = checkout_at_payment(&cart);
        let mut rng = StdRng::seed_from_u64(1);

        let confirmation = place_order(
            &mut checkout,
            &mut cart,
            PaymentMethod::CreditCard,
            test_time(),
            &mut rng,
        )
        .unwrap();

        assert!(cart.is_empty());
        assert_eq!(checkout.step(), CheckoutStep::Submitted);
        assert_eq!(confirmation.lines.len(), 2);
        assert_eq!(confirmation.lines[0].line_total, Money::from_dollars(40));
        assert_eq!(confirmation.totals.total.to_string(), "$128.40");
        assert_eq!(confirmation.shipping_address, address());
        assert_eq!(confirmation.payment_method, PaymentMethod::CreditCard);
    }

    #[test]
    fn place_order_before_shipping_leaves_cart_untouched() {
        let mut cart = cart_with_worked_example();
        let mut checkout = Checkout::begin(CheckoutId::new(), &cart).unwrap();
        let before = cart.clone();

        let err = place_order(
            &mut checkout,
            &mut cart,
            PaymentMethod::Paypal,
            test_time(),
            &mut StdRng::seed_from_u64(2),
        )
        .unwrap_err();

        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert_eq!(cart, before);
        assert_eq!(checkout.step(), CheckoutStep::ShippingEntry);
    }

    #[test]
    fn place_order_twice_is_conflict() {
        let mut cart = cart_with_worked_example();
        let mut checkout = checkout_at_payment(&cart);
        let mut rng = StdRng::seed_from_u64(3);
        place_order(&mut checkout, &mut cart, PaymentMethod::Paypal, test_time(), &mut rng)
            .unwrap();

        cart.add(item("again", 5), 1).unwrap();
        let err = place_order(&mut checkout, &mut cart, PaymentMethod::Paypal, test_time(), &mut rng)
            .unwrap_err();
        match err {
            DomainError::Conflict(_) => {}
            _ => panic!("Expected Conflict error for second submission"),
        }
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn second_submission_with_emptied_cart_is_conflict() {
        let mut cart = cart_with_worked_example();
        let mut checkout = checkout_at_payment(&cart);
        let mut rng = StdRng::seed_from_u64(4);
        place_order(&mut checkout, &mut cart, PaymentMethod::CreditCard, test_time(), &mut rng)
            .unwrap();
        assert!(cart.is_empty());
        let version = checkout.version();

        let err = place_order(&mut checkout, &mut cart, PaymentMethod::CreditCard, test_time(), &mut rng)
            .unwrap_err();
        match err {
            DomainError::Conflict(_) => {}
            _ => panic!("Expected Conflict error for resubmitting a placed order"),
        }
        assert_eq!(checkout.step(), CheckoutStep::Submitted);
        assert_eq!(checkout.version(), version);
    }

    #[test]
    fn empty_cart_at_payment_is_invariant_and_keeps_step() {
        let mut cart = cart_with_worked_example();
        let mut checkout = checkout_at_payment(&cart);
        cart.clear();

        let err = place_order(
            &mut checkout,
            &mut cart,
            PaymentMethod::CreditCard,
            test_time(),
            &mut StdRng::seed_from_u64(5),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert_eq!(checkout.step(), CheckoutStep::PaymentEntry);
    }

    #[test]
    fn confirmation_serializes_camel_case() {
        let mut cart = cart_with_worked_example();
        let mut checkout = checkout_at_payment(&cart);
        let confirmation = place_order(
            &mut checkout,
            &mut cart,
            PaymentMethod::Paypal,
            test_time(),
            &mut StdRng::seed_from_u64(4),
        )
        .unwrap();

        let json = serde_json::to_value(&confirmation).unwrap();
        assert_eq!(json["paymentMethod"], "paypal");
        assert_eq!(json["shippingAddress"]["postalCode"], "N1 7AA");
        assert!(json["orderNumber"].as_str().unwrap().starts_with("ORD-"));
    }
}

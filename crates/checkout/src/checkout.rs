use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_cart::Cart;
use storefront_core::{Aggregate, AggregateRoot, DomainError, Event, Sellable};

use crate::address::{PaymentMethod, ShippingAddress};

/// Checkout flow identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckoutId(Uuid);

impl CheckoutId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for CheckoutId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for CheckoutId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Checkout step lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    ShippingEntry,
    PaymentEntry,
    /// Terminal: the order was placed.
    Submitted,
    /// Terminal: the shopper backed out of the shipping step.
    Abandoned,
}

impl CheckoutStep {
    pub fn is_terminal(self) -> bool {
        matches!(self, CheckoutStep::Submitted | CheckoutStep::Abandoned)
    }
}

/// Aggregate root: Checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    id: CheckoutId,
    step: CheckoutStep,
    shipping_address: Option<ShippingAddress>,
    payment_method: Option<PaymentMethod>,
    version: u64,
}

impl Checkout {
    /// Begin a checkout for `cart`. An empty cart cannot be checked out.
    pub fn begin<P: Sellable>(id: CheckoutId, cart: &Cart<P>) -> Result<Self, DomainError> {
        if cart.is_empty() {
            return Err(DomainError::validation("cannot check out an empty cart"));
        }
        tracing::info!(checkout_id = %id, lines = cart.line_count(), "checkout started");
        Ok(Self {
            id,
            step: CheckoutStep::ShippingEntry,
            shipping_address: None,
            payment_method: None,
            version: 0,
        })
    }

    pub fn id_typed(&self) -> CheckoutId {
        self.id
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Address entered so far (kept across back-navigation).
    pub fn shipping_address(&self) -> Option<&ShippingAddress> {
        self.shipping_address.as_ref()
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    pub fn is_submitted(&self) -> bool {
        self.step == CheckoutStep::Submitted
    }
}

impl AggregateRoot for Checkout {
    type Id = CheckoutId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: SubmitShipping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitShipping {
    pub address: ShippingAddress,
    pub occurred_at: DateTime<Utc>,
}

/// Command: GoBack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoBack {
    pub occurred_at: DateTime<Utc>,
}

/// Command: SubmitPayment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitPayment {
    pub method: PaymentMethod,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutCommand {
    SubmitShipping(SubmitShipping),
    GoBack(GoBack),
    SubmitPayment(SubmitPayment),
}

/// Event: ShippingSubmitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingSubmitted {
    pub checkout_id: CheckoutId,
    pub address: ShippingAddress,
    pub occurred_at: DateTime<Utc>,
}

/// Event: BackNavigated (payment → shipping).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackNavigated {
    pub checkout_id: CheckoutId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CheckoutAbandoned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutAbandoned {
    pub checkout_id: CheckoutId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PaymentSubmitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSubmitted {
    pub checkout_id: CheckoutId,
    pub method: PaymentMethod,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutEvent {
    ShippingSubmitted(ShippingSubmitted),
    BackNavigated(BackNavigated),
    CheckoutAbandoned(CheckoutAbandoned),
    PaymentSubmitted(PaymentSubmitted),
}

impl Event for CheckoutEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CheckoutEvent::ShippingSubmitted(_) => "checkout.shipping.submitted",
            CheckoutEvent::BackNavigated(_) => "checkout.back_navigated",
            CheckoutEvent::CheckoutAbandoned(_) => "checkout.abandoned",
            CheckoutEvent::PaymentSubmitted(_) => "checkout.payment.submitted",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CheckoutEvent::ShippingSubmitted(e) => e.occurred_at,
            CheckoutEvent::BackNavigated(e) => e.occurred_at,
            CheckoutEvent::CheckoutAbandoned(e) => e.occurred_at,
            CheckoutEvent::PaymentSubmitted(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Checkout {
    type Command = CheckoutCommand;
    type Event = CheckoutEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CheckoutEvent::ShippingSubmitted(e) => {
                self.shipping_address = Some(e.address.clone());
                self.step = CheckoutStep::PaymentEntry;
            }
            CheckoutEvent::BackNavigated(_) => {
                self.step = CheckoutStep::ShippingEntry;
            }
            CheckoutEvent::CheckoutAbandoned(_) => {
                self.step = CheckoutStep::Abandoned;
            }
            CheckoutEvent::PaymentSubmitted(e) => {
                self.payment_method = Some(e.method);
                self.step = CheckoutStep::Submitted;
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        if self.step.is_terminal() {
            return Err(DomainError::conflict(format!(
                "checkout is already {:?}",
                self.step
            )));
        }

        match command {
            CheckoutCommand::SubmitShipping(cmd) => self.handle_submit_shipping(cmd),
            CheckoutCommand::GoBack(cmd) => self.handle_go_back(cmd),
            CheckoutCommand::SubmitPayment(cmd) => self.handle_submit_payment(cmd),
        }
    }
}

impl Checkout {
    fn handle_submit_shipping(
        &self,
        cmd: &SubmitShipping,
    ) -> Result<Vec<CheckoutEvent>, DomainError> {
        if self.step != CheckoutStep::ShippingEntry {
            return Err(DomainError::invariant(
                "shipping can only be submitted from the shipping step",
            ));
        }
        cmd.address.validate()?;

        Ok(vec![CheckoutEvent::ShippingSubmitted(ShippingSubmitted {
            checkout_id: self.id,
            address: cmd.address.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_go_back(&self, cmd: &GoBack) -> Result<Vec<CheckoutEvent>, DomainError> {
        let event = match self.step {
            CheckoutStep::PaymentEntry => CheckoutEvent::BackNavigated(BackNavigated {
                checkout_id: self.id,
                occurred_at: cmd.occurred_at,
            }),
            _ => CheckoutEvent::CheckoutAbandoned(CheckoutAbandoned {
                checkout_id: self.id,
                occurred_at: cmd.occurred_at,
            }),
        };
        Ok(vec![event])
    }

    fn handle_submit_payment(
        &self,
        cmd: &SubmitPayment,
    ) -> Result<Vec<CheckoutEvent>, DomainError> {
        if self.step != CheckoutStep::PaymentEntry {
            return Err(DomainError::invariant(
                "payment can only be submitted from the payment step",
            ));
        }

        Ok(vec![CheckoutEvent::PaymentSubmitted(PaymentSubmitted {
            checkout_id: self.id,
            method: cmd.method,
            occurred_at: cmd.occurred_at,
        })])
    }
}

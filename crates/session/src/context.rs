use chrono::{DateTime, Utc};
use rand::Rng;

use storefront_auth::{CredentialVerifier, Identity, Registration};
use storefront_cart::{Cart, OrderTotals};
use storefront_catalog::Product;
use storefront_checkout::{
    Checkout, CheckoutCommand, CheckoutId, CheckoutStep, GoBack, OrderConfirmation,
    PaymentMethod, ShippingAddress, SubmitShipping,
};
use storefront_core::{Aggregate, DomainError, DomainResult, ProductId, SessionId};

use crate::error::SessionError;
use crate::identity_store::IdentityStore;

/// One shopper's state: who they are, what is in the cart, and where they are in
/// checkout.
#[derive(Debug, Clone)]
pub struct SessionContext {
    session_id: SessionId,
    identity: Option<Identity>,
    cart: Cart<Product>,
    checkout: Option<Checkout>,
}

impl SessionContext {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            identity: None,
            cart: Cart::new(),
            checkout: None,
        }
    }

    /// Resume `session_id`, restoring the identity that session persisted, if any.
    pub fn restore(session_id: SessionId, store: &dyn IdentityStore) -> Result<Self, SessionError> {
        let mut ctx = Self::new(session_id);
        ctx.identity = store.load(session_id)?;
        if let Some(identity) = &ctx.identity {
            tracing::info!(%session_id, user_id = %identity.id, "identity restored");
        }
        Ok(ctx)
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.identity.as_ref().is_some_and(|i| i.is_admin)
    }

    pub fn cart(&self) -> &Cart<Product> {
        &self.cart
    }

    pub fn checkout(&self) -> Option<&Checkout> {
        self.checkout.as_ref()
    }

    // ---- authentication ----

    pub fn login(
        &mut self,
        verifier: &dyn CredentialVerifier,
        store: &dyn IdentityStore,
        email: &str,
        password: &str,
    ) -> Result<&Identity, SessionError> {
        let identity = verifier.verify(email, password).inspect_err(|e| {
            tracing::warn!(session_id = %self.session_id, error = %e, "login failed");
        })?;
        tracing::info!(session_id = %self.session_id, user_id = %identity.id, "logged in");
        self.sign_in(store, identity)
    }

    /// Create an account and sign in with it.
    ///
    /// Once the account exists the session is signed in even if persisting the
    /// record fails; that failure is still returned.
    pub fn register(
        &mut self,
        verifier: &dyn CredentialVerifier,
        store: &dyn IdentityStore,
        registration: Registration,
    ) -> Result<&Identity, SessionError> {
        let identity = verifier.register(registration).inspect_err(|e| {
            tracing::warn!(session_id = %self.session_id, error = %e, "registration failed");
        })?;
        tracing::info!(session_id = %self.session_id, user_id = %identity.id, "registered");
        self.sign_in(store, identity)
    }

    fn sign_in(
        &mut self,
        store: &dyn IdentityStore,
        identity: Identity,
    ) -> Result<&Identity, SessionError> {
        let session_id = self.session_id;
        let saved = store.save(session_id, &identity);
        let identity = self.identity.insert(identity);
        saved.inspect_err(|e| {
            tracing::warn!(%session_id, error = %e, "identity record not saved");
        })?;
        Ok(identity)
    }

    /// Forget the identity and drop any checkout in progress. The cart survives.
    pub fn logout(&mut self, store: &dyn IdentityStore) -> Result<(), SessionError> {
        store.clear(self.session_id)?;
        if let Some(identity) = self.identity.take() {
            tracing::info!(session_id = %self.session_id, user_id = %identity.id, "logged out");
        }
        self.checkout = None;
        Ok(())
    }

    // ---- cart ----

    /// Add a listed product to the cart. Out-of-stock products are refused.
    pub fn add_to_cart(&mut self, product: &Product, quantity: i64) -> DomainResult<u32> {
        if !product.in_stock() {
            tracing::warn!(session_id = %self.session_id, product_id = %product.id_typed(), "out of stock");
            return Err(DomainError::out_of_stock(product.id_typed()));
        }
        self.cart.add(product.clone(), quantity)
    }

    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) -> DomainResult<()> {
        self.cart.set_quantity(product_id, quantity)
    }

    pub fn remove_from_cart(&mut self, product_id: &ProductId) -> bool {
        self.cart.remove(product_id).is_some()
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    pub fn totals(&self) -> OrderTotals {
        self.cart.totals()
    }

    // ---- checkout ----

    /// Start a fresh checkout flow, replacing any earlier one.
    pub fn begin_checkout(&mut self) -> DomainResult<CheckoutId> {
        if self.identity.is_none() {
            return Err(DomainError::Unauthorized);
        }
        let checkout = Checkout::begin(CheckoutId::new(), &self.cart)?;
        let id = checkout.id_typed();
        self.checkout = Some(checkout);
        Ok(id)
    }

    fn active_checkout(&mut self) -> DomainResult<&mut Checkout> {
        self.checkout
            .as_mut()
            .ok_or_else(|| DomainError::invariant("no checkout in progress"))
    }

    pub fn submit_shipping(
        &mut self,
        address: ShippingAddress,
        now: DateTime<Utc>,
    ) -> DomainResult<CheckoutStep> {
        let checkout = self.active_checkout()?;
        checkout.execute(&CheckoutCommand::SubmitShipping(SubmitShipping {
            address,
            occurred_at: now,
        }))?;
        Ok(checkout.step())
    }

    /// Step back one screen. Leaving the shipping step abandons the flow.
    pub fn go_back(&mut self, now: DateTime<Utc>) -> DomainResult<CheckoutStep> {
        let checkout = self.active_checkout()?;
        checkout.execute(&CheckoutCommand::GoBack(GoBack { occurred_at: now }))?;
        let step = checkout.step();
        if step == CheckoutStep::Abandoned {
            tracing::info!(session_id = %self.session_id, "checkout abandoned");
            self.checkout = None;
        }
        Ok(step)
    }

    /// Submit payment, clear the cart, and return the confirmation.
    pub fn place_order<R: Rng + ?Sized>(
        &mut self,
        method: PaymentMethod,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> DomainResult<OrderConfirmation> {
        if self.identity.is_none() {
            return Err(DomainError::Unauthorized);
        }
        let checkout = self
            .checkout
            .as_mut()
            .ok_or_else(|| DomainError::invariant("no checkout in progress"))?;
        storefront_checkout::place_order(checkout, &mut self.cart, method, now, rng)
    }
}

use chrono::{DateTime, Utc};

/// A fact emitted by an aggregate's `handle` and consumed by its `apply`.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Dotted name such as `"checkout.payment.submitted"`.
    fn event_type(&self) -> &'static str;

    /// Payload schema version.
    fn version(&self) -> u32;

    fn occurred_at(&self) -> DateTime<Utc>;
}

//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: two instances with the same attribute
/// values are interchangeable (`Money`, a shipping address, order totals). They
/// are immutable; "changing" one means building a new value.
///
/// ```ignore
/// let a = Money::from_cents(1999);
/// let b = Money::from_cents(1999);
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity** - they are defined entirely by their attribute
//! values. Two prices of `R$ 8,90` are the same price, whichever product carries them.

/// Marker trait for value objects.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: no identity (`Money::from_centavos(890)` equals any other 890 centavos)
/// - **Entity**: has identity (two products with the same `ProductId` are the same product)
///
/// Value objects are immutable; "changing" one means building a new value. The trait
/// requires `Clone`, `PartialEq` and `Debug` so they behave like primitives in tests
/// and logs.
///
/// ```ignore
/// let a = Money::from_centavos(4590);
/// let b = Money::from_reais(45.90);
/// assert_eq!(a, b); // equal by value
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

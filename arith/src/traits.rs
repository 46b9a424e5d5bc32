//! Module for common traits.

/// Trait for getting the identity element of a point type.
pub trait Identity {
    /// Returns the identity element of the curve.
    /// Can be used as a constructor.
    fn identity() -> Self;
}

/// Equality that is allowed to take time dependent on its operands.
///
/// Never call `vartime_eq` on a secret scalar, point or key.  Use it only in
/// tests and on public values.
pub trait VartimeEq<Rhs: ?Sized = Self> {
    /// Returns true if `self` and `other` represent the same value.  Takes
    /// variable time.
    fn vartime_eq(&self, other: &Rhs) -> bool;
}

//! x-only arithmetic on Montgomery curves over \\( \mathbb F\_{p\^2} \\).
//!
//! A `ProjectivePoint` \\( (X : Z) \\) holds the x-coordinate \\( X/Z \\) of a
//! point and discards \\( y \\), so a point and its negative are the same
//! `ProjectivePoint`.  \\( Z = 0 \\) is the point at infinity.  Equality is
//! projective: \\( (X\_1 : Z\_1) = (X\_2 : Z\_2) \\) iff \\( X\_1 Z\_2 = X\_2 Z\_1 \\).
//!
//! Doubling and tripling follow Costello–Longa–Naehrig, _Efficient algorithms
//! for supersingular isogeny Diffie-Hellman_, and take the cached curve values
//! \\( A + 2C \\) and \\( 4C \\) rather than the curve itself.  Differential
//! addition is Algorithm 1 of Costello–Smith, _Montgomery curves and their
//! arithmetic_.
//!
//! Every function here except `vartime_eq` and the `Err` path of `to_affine`
//! is a fixed sequence of field operations with no branches on coordinate
//! values, including the ladder in `mul_bits_be`.

// Projective coordinates are traditionally capitalised.
#![allow(non_snake_case)]

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use zeroize::Zeroize;

use crate::curve::{CachedCurveConstants, ProjectiveCurveParameters};
use crate::errors::ArithmeticError;
use crate::extension::ExtensionFieldElement;
use crate::traits::Identity;
use crate::traits::VartimeEq;

/// A point on the Kummer line of a Montgomery curve, in coordinates \\( (X : Z) \\).
#[derive(Copy, Clone, Debug)]
pub struct ProjectivePoint {
    pub X: ExtensionFieldElement,
    pub Z: ExtensionFieldElement,
}

impl Identity for ProjectivePoint {
    fn identity() -> ProjectivePoint {
        ProjectivePoint {
            X: ExtensionFieldElement::one(),
            Z: ExtensionFieldElement::zero(),
        }
    }
}

impl Default for ProjectivePoint {
    fn default() -> ProjectivePoint {
        ProjectivePoint::identity()
    }
}

impl ConditionallySelectable for ProjectivePoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        ProjectivePoint {
            X: ExtensionFieldElement::conditional_select(&a.X, &b.X, choice),
            Z: ExtensionFieldElement::conditional_select(&a.Z, &b.Z, choice),
        }
    }
}

/// Projective equality, \\( X\_1 Z\_2 = X\_2 Z\_1 \\), in constant time.
impl ConstantTimeEq for ProjectivePoint {
    fn ct_eq(&self, other: &ProjectivePoint) -> Choice {
        let x1z2 = &self.X * &other.Z;
        let x2z1 = &other.X * &self.Z;
        x1z2.ct_eq(&x2z1)
    }
}

impl VartimeEq for ProjectivePoint {
    /// Returns true if both points have the same x-coordinate.  Takes variable time.
    fn vartime_eq(&self, other: &ProjectivePoint) -> bool {
        let x1z2 = &self.X * &other.Z;
        let x2z1 = &other.X * &self.Z;
        x1z2.vartime_eq(&x2z1)
    }
}

impl Zeroize for ProjectivePoint {
    fn zeroize(&mut self) {
        self.X.zeroize();
        self.Z.zeroize();
    }
}

impl ProjectivePoint {
    /// Construct \\( (X : Z) \\).  The pair must not be \\( (0 : 0) \\).
    pub fn new(X: ExtensionFieldElement, Z: ExtensionFieldElement) -> ProjectivePoint {
        ProjectivePoint { X, Z }
    }

    /// Construct \\( (x : 1) \\) from an affine x-coordinate.
    pub fn from_affine(x: &ExtensionFieldElement) -> ProjectivePoint {
        ProjectivePoint {
            X: *x,
            Z: ExtensionFieldElement::one(),
        }
    }

    /// Determine whether this is the point at infinity, \\( Z = 0 \\).
    pub fn is_infinity(&self) -> Choice {
        self.Z.is_zero()
    }

    /// Swap `a` and `b` if `choice == 1`, in constant time.
    pub fn conditional_swap(a: &mut ProjectivePoint, b: &mut ProjectivePoint, choice: Choice) {
        let t = ProjectivePoint::conditional_select(a, b, choice);
        *b = ProjectivePoint::conditional_select(b, a, choice);
        *a = t;
    }

    /// Return the affine x-coordinate \\( X/Z \\).
    ///
    /// # Return
    ///
    /// - `Ok(x)` if \\( Z \neq 0 \\);
    /// - `Err(PointAtInfinity)` if this is the point at infinity.
    ///
    /// Only the success or failure of the call depends on the input's value.
    pub fn to_affine(&self) -> Result<ExtensionFieldElement, ArithmeticError> {
        if self.is_infinity().unwrap_u8() == 1u8 {
            log::debug!("the point at infinity has no affine x-coordinate");
            return Err(ArithmeticError::PointAtInfinity);
        }
        Ok(&self.X * &self.Z.inv())
    }

    /// Given \\( x(P) \\), return \\( x([2]P) \\).
    pub fn double(&self, curve: &CachedCurveConstants) -> ProjectivePoint {
        let X = &self.X;
        let Z = &self.Z;

        let xz_minus = X - Z; // = X - Z
        let xz_plus = X + Z; // = X + Z
        let v1 = xz_plus.square(); // = (X + Z)^2
        let v2 = xz_minus.square(); // = (X - Z)^2
        let xz4 = &v1 - &v2; // = 4*X*Z

        let v2 = &v2 * &curve.c4; // = 4*C*(X - Z)^2
        let X2 = &v1 * &v2; // = 4*C*(X + Z)^2*(X - Z)^2

        let v3 = &xz4 * &curve.aplus2c; // = 4*X*Z*(A + 2*C)
        let v3 = &v3 + &v2; // = 4*X*Z*(A + 2*C) + 4*C*(X - Z)^2
        let Z2 = &v3 * &xz4; // = (4*X*Z*(A + 2*C) + 4*C*(X - Z)^2)*4*X*Z

        ProjectivePoint { X: X2, Z: Z2 }
    }

    /// Given \\( x(P) \\), return \\( x([3]P) \\).
    ///
    /// This is a direct tripling formula, cheaper than a doubling followed by
    /// a differential addition.
    pub fn triple(&self, curve: &CachedCurveConstants) -> ProjectivePoint {
        let X = &self.X;
        let Z = &self.Z;

        let aminus2c = &curve.aplus2c - &curve.c4; // = A - 2*C

        let xz_minus = X - Z; // = X - Z
        let xz_plus = X + Z; // = X + Z
        let v_minus = xz_minus.square(); // = (X - Z)^2
        let v_plus = xz_plus.square(); // = (X + Z)^2
        let x2 = &xz_plus + &xz_minus; // = 2*X
        let z2 = &xz_plus - &xz_minus; // = 2*Z

        let t = &x2.square() - &v_plus; // = 4*X^2 - (X + Z)^2
        let t = &t - &v_minus; // = 2*X^2 - 2*Z^2

        let p = &v_plus * &curve.aplus2c; // = (A + 2*C)*(X + Z)^2
        let pp = &p * &v_plus; // = (A + 2*C)*(X + Z)^4
        let m = &v_minus * &aminus2c; // = (A - 2*C)*(X - Z)^2
        let mm = &v_minus * &m; // = (A - 2*C)*(X - Z)^4

        let u = &mm - &pp; // = (A - 2*C)*(X - Z)^4 - (A + 2*C)*(X + Z)^4
        let w = &(&p - &m) * &t; // = ((A + 2*C)*(X + Z)^2 - (A - 2*C)*(X - Z)^2)*(2*X^2 - 2*Z^2)

        let X3 = &(&u + &w).square() * &x2;
        let Z3 = &(&u - &w).square() * &z2;

        ProjectivePoint { X: X3, Z: Z3 }
    }

    /// Given \\( x(P) \\), return \\( x([2\^k]P) \\).
    pub fn pow2k(&self, curve: &ProjectiveCurveParameters, k: u32) -> ProjectivePoint {
        self.pow2k_cached(&curve.cached_constants(), k)
    }

    /// Given \\( x(P) \\) and the cached curve values, return \\( x([2\^k]P) \\).
    pub fn pow2k_cached(&self, curve: &CachedCurveConstants, k: u32) -> ProjectivePoint {
        let mut Q = *self;
        for _ in 0..k {
            Q = Q.double(curve);
        }
        Q
    }

    /// Given \\( x(P) \\), return \\( x([3\^k]P) \\).
    pub fn pow3k(&self, curve: &ProjectiveCurveParameters, k: u32) -> ProjectivePoint {
        self.pow3k_cached(&curve.cached_constants(), k)
    }

    /// Given \\( x(P) \\) and the cached curve values, return \\( x([3\^k]P) \\).
    pub fn pow3k_cached(&self, curve: &CachedCurveConstants, k: u32) -> ProjectivePoint {
        let mut Q = *self;
        for _ in 0..k {
            Q = Q.triple(curve);
        }
        Q
    }

    /// Given \\( x(P) \\), \\( x(Q) \\) and \\( x(P - Q) \\), return \\( x(P + Q) \\).
    ///
    /// # Warning
    ///
    /// `P_minus_Q` must really be \\( x(P - Q) \\).  An x-coordinate alone does
    /// not determine \\( P + Q \\), and nothing here can check the difference
    /// cheaply: a wrong `P_minus_Q` silently yields a wrong result.
    pub fn add(P: &ProjectivePoint, Q: &ProjectivePoint, P_minus_Q: &ProjectivePoint) -> ProjectivePoint {
        let v0 = &P.X + &P.Z; // = X_P + Z_P
        let v1 = &(&Q.X - &Q.Z) * &v0; // = (X_Q - Z_Q)*(X_P + Z_P)
        let v0 = &P.X - &P.Z; // = X_P - Z_P
        let v2 = &(&Q.X + &Q.Z) * &v0; // = (X_Q + Z_Q)*(X_P - Z_P)
        let v3 = (&v1 + &v2).square(); // = 4*(X_Q*X_P - Z_Q*Z_P)^2
        let v4 = (&v1 - &v2).square(); // = 4*(X_Q*Z_P - Z_Q*X_P)^2

        ProjectivePoint {
            X: &P_minus_Q.Z * &v3, // = 4*Z_{P-Q}*(X_Q*X_P - Z_Q*Z_P)^2
            Z: &P_minus_Q.X * &v4, // = 4*X_{P-Q}*(X_Q*Z_P - Z_Q*X_P)^2
        }
    }

    /// Given `self` \\( = x(P) \\) and a big-endian bit representation of an
    /// integer \\( n \\), return \\( x([n]P) \\).
    ///
    /// This is the Montgomery ladder: each bit costs one conditional swap, one
    /// doubling and one differential addition whatever its value, so the
    /// running time depends only on the number of bits.
    pub fn mul_bits_be(
        &self,
        curve: &CachedCurveConstants,
        bits: impl Iterator<Item = bool>,
    ) -> ProjectivePoint {
        // Invariant: x1 - x0 = P.
        let mut x0 = ProjectivePoint::identity();
        let mut x1 = *self;

        let mut prev_bit = false;
        for cur_bit in bits {
            let choice: u8 = (prev_bit ^ cur_bit) as u8;
            ProjectivePoint::conditional_swap(&mut x0, &mut x1, choice.into());

            let sum = ProjectivePoint::add(&x0, &x1, self);
            x0 = x0.double(curve);
            x1 = sum;

            prev_bit = cur_bit;
        }
        ProjectivePoint::conditional_swap(&mut x0, &mut x1, Choice::from(prev_bit as u8));

        x1.zeroize();
        x0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::backend::serial::u64::constants::TOP_WORD_MASK;
    use crate::field::PrimeFieldElement;
    use proptest::prelude::*;

    fn prime_field_element() -> impl Strategy<Value = PrimeFieldElement> {
        prop::array::uniform12(any::<u64>()).prop_map(|mut words| {
            words[11] &= TOP_WORD_MASK;
            PrimeFieldElement::from_words(words)
        })
    }

    fn extension_field_element() -> impl Strategy<Value = ExtensionFieldElement> {
        (prime_field_element(), prime_field_element())
            .prop_map(|(a, b)| ExtensionFieldElement::new(a, b))
    }

    fn projective_point() -> impl Strategy<Value = ProjectivePoint> {
        (extension_field_element(), extension_field_element())
            .prop_map(|(X, Z)| ProjectivePoint::new(X, Z))
    }

    fn curve_parameters() -> impl Strategy<Value = ProjectiveCurveParameters> {
        (extension_field_element(), extension_field_element())
            .prop_map(|(A, C)| ProjectiveCurveParameters::new(A, C))
    }

    fn bits_be(n: u64) -> impl Iterator<Item = bool> {
        (0..64).rev().map(move |i| (n >> i) & 1 == 1)
    }

    #[test]
    fn identity_is_infinity() {
        let O = ProjectivePoint::identity();
        assert!(bool::from(O.is_infinity()));
        assert_eq!(O.to_affine(), Err(ArithmeticError::PointAtInfinity));
    }

    #[test]
    fn conditional_swap() {
        let one = ExtensionFieldElement::one();
        let P = ProjectivePoint::from_affine(&one);
        let mut a = P;
        let mut b = ProjectivePoint::identity();

        ProjectivePoint::conditional_swap(&mut a, &mut b, Choice::from(0));
        assert!(a.vartime_eq(&P));

        ProjectivePoint::conditional_swap(&mut a, &mut b, Choice::from(1));
        assert!(bool::from(a.is_infinity()));
        assert!(b.vartime_eq(&P));
    }

    proptest! {
        #[test]
        fn triple_equals_add_double(curve in curve_parameters(), P in projective_point()) {
            let consts = curve.cached_constants();

            let P2 = P.double(&consts); // = x([2]P)
            let P3 = P.triple(&consts); // = x([3]P)
            let P2plusP = ProjectivePoint::add(&P2, &P, &P); // = x([2]P + P)

            prop_assert!(P3.vartime_eq(&P2plusP));
        }

        #[test]
        fn scaled_point_is_equal(P in projective_point(), s in extension_field_element()) {
            prop_assume!(s.is_zero().unwrap_u8() == 0u8);
            let Q = ProjectivePoint::new(&P.X * &s, &P.Z * &s);
            prop_assert!(Q.vartime_eq(&P));
            prop_assert!(bool::from(Q.ct_eq(&P)));
        }

        #[test]
        fn pow2k_and_pow3k_iterate(curve in curve_parameters(), P in projective_point()) {
            let consts = CachedCurveConstants::from(&curve);

            let P4 = P.double(&consts).double(&consts);
            prop_assert!(P.pow2k(&curve, 2).vartime_eq(&P4));
            prop_assert!(P.pow2k(&curve, 0).vartime_eq(&P));

            let P9 = P.triple(&consts).triple(&consts);
            prop_assert!(P.pow3k(&curve, 2).vartime_eq(&P9));
        }

        #[test]
        fn ladder_matches_fixed_multiples(curve in curve_parameters(), P in projective_point()) {
            let consts = curve.cached_constants();

            prop_assert!(P.mul_bits_be(&consts, bits_be(1)).vartime_eq(&P));
            prop_assert!(P.mul_bits_be(&consts, bits_be(3)).vartime_eq(&P.triple(&consts)));
            prop_assert!(P.mul_bits_be(&consts, bits_be(8)).vartime_eq(&P.pow2k_cached(&consts, 3)));
            prop_assert!(P.mul_bits_be(&consts, bits_be(27)).vartime_eq(&P.pow3k_cached(&consts, 3)));

            // [6]P = [2]([3]P)
            let P6 = P.triple(&consts).double(&consts);
            prop_assert!(P.mul_bits_be(&consts, bits_be(6)).vartime_eq(&P6));
        }

        #[test]
        fn affine_point_round_trips(x in extension_field_element()) {
            let P = ProjectivePoint::from_affine(&x);
            let affine = P.to_affine();
            prop_assert!(affine.is_ok());
            prop_assert!(affine.unwrap_or_default().vartime_eq(&x));
        }
    }
}

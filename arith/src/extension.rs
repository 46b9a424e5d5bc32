//! Arithmetic on elements of the quadratic extension
//! \\( \mathbb F\_{p\^2} = \mathbb F\_p[i] / (i\^2 + 1) \\).
//!
//! Since \\( p \equiv 3 \pmod 4 \\), \\( -1 \\) is not a square in
//! \\( \mathbb F\_p \\) and \\( i\^2 = -1 \\) defines the extension.

use core::cmp::{Eq, PartialEq};
use core::fmt::Debug;
use core::ops::Neg;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::{Sub, SubAssign};

use rand_core::{CryptoRng, RngCore};

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use zeroize::Zeroize;

use crate::backend::serial::u64::fp751::*;
use crate::errors::ArithmeticError;
use crate::field::{PrimeFieldElement, PRIME_FIELD_ENCODED_LENGTH};
use crate::traits::VartimeEq;

/// The length of the encoding of an `ExtensionFieldElement`: the real part
/// followed by the imaginary part.
pub const EXTENSION_FIELD_ENCODED_LENGTH: usize = 2 * PRIME_FIELD_ENCODED_LENGTH;

/// Represents an element \\( a + bi \\) of the extension field \\( \mathbb F\_{p\^2} \\).
///
/// Both components are in Montgomery form.
#[derive(Copy, Clone, Default)]
pub struct ExtensionFieldElement {
    pub(crate) a: PrimeFieldElement,
    pub(crate) b: PrimeFieldElement,
}

impl Debug for ExtensionFieldElement {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "ExtensionFieldElement{{\n\ta: {:?},\n\tb: {:?}\n}}", &self.a, &self.b)
    }
}

impl Eq for ExtensionFieldElement {}

impl PartialEq for ExtensionFieldElement {
    fn eq(&self, other: &ExtensionFieldElement) -> bool {
        self.ct_eq(other).unwrap_u8() == 1u8
    }
}

impl ConstantTimeEq for ExtensionFieldElement {
    fn ct_eq(&self, other: &ExtensionFieldElement) -> Choice {
        self.a.ct_eq(&other.a) & self.b.ct_eq(&other.b)
    }
}

impl VartimeEq for ExtensionFieldElement {
    fn vartime_eq(&self, other: &ExtensionFieldElement) -> bool {
        self.a.vartime_eq(&other.a) && self.b.vartime_eq(&other.b)
    }
}

impl ConditionallySelectable for ExtensionFieldElement {
    fn conditional_select(x: &Self, y: &Self, choice: Choice) -> Self {
        ExtensionFieldElement {
            a: PrimeFieldElement::conditional_select(&x.a, &y.a, choice),
            b: PrimeFieldElement::conditional_select(&x.b, &y.b, choice),
        }
    }
}

impl Zeroize for ExtensionFieldElement {
    fn zeroize(&mut self) {
        self.a.zeroize();
        self.b.zeroize();
    }
}

impl<'a, 'b> Add<&'b ExtensionFieldElement> for &'a ExtensionFieldElement {
    type Output = ExtensionFieldElement;
    fn add(self, rhs: &'b ExtensionFieldElement) -> ExtensionFieldElement {
        ExtensionFieldElement::add(self, rhs)
    }
}

define_add_variants!(LHS = ExtensionFieldElement, RHS = ExtensionFieldElement, Output = ExtensionFieldElement);

impl<'b> AddAssign<&'b ExtensionFieldElement> for ExtensionFieldElement {
    fn add_assign(&mut self, rhs: &'b ExtensionFieldElement) {
        *self = ExtensionFieldElement::add(self, rhs);
    }
}

define_add_assign_variants!(LHS = ExtensionFieldElement, RHS = ExtensionFieldElement);

impl<'a, 'b> Sub<&'b ExtensionFieldElement> for &'a ExtensionFieldElement {
    type Output = ExtensionFieldElement;
    fn sub(self, rhs: &'b ExtensionFieldElement) -> ExtensionFieldElement {
        ExtensionFieldElement::sub(self, rhs)
    }
}

define_sub_variants!(LHS = ExtensionFieldElement, RHS = ExtensionFieldElement, Output = ExtensionFieldElement);

impl<'b> SubAssign<&'b ExtensionFieldElement> for ExtensionFieldElement {
    fn sub_assign(&mut self, rhs: &'b ExtensionFieldElement) {
        *self = ExtensionFieldElement::sub(self, rhs);
    }
}

define_sub_assign_variants!(LHS = ExtensionFieldElement, RHS = ExtensionFieldElement);

impl<'a, 'b> Mul<&'b ExtensionFieldElement> for &'a ExtensionFieldElement {
    type Output = ExtensionFieldElement;
    fn mul(self, rhs: &'b ExtensionFieldElement) -> ExtensionFieldElement {
        ExtensionFieldElement::mul(self, rhs)
    }
}

define_mul_variants!(LHS = ExtensionFieldElement, RHS = ExtensionFieldElement, Output = ExtensionFieldElement);

impl<'b> MulAssign<&'b ExtensionFieldElement> for ExtensionFieldElement {
    fn mul_assign(&mut self, rhs: &'b ExtensionFieldElement) {
        *self = ExtensionFieldElement::mul(self, rhs);
    }
}

define_mul_assign_variants!(LHS = ExtensionFieldElement, RHS = ExtensionFieldElement);

impl<'a> Neg for &'a ExtensionFieldElement {
    type Output = ExtensionFieldElement;
    fn neg(self) -> ExtensionFieldElement {
        ExtensionFieldElement {
            a: -&self.a,
            b: -&self.b,
        }
    }
}

impl Neg for ExtensionFieldElement {
    type Output = ExtensionFieldElement;
    fn neg(self) -> ExtensionFieldElement {
        -&self
    }
}

impl ExtensionFieldElement {
    /// Construct \\( a + bi \\) from its components.
    pub const fn new(a: PrimeFieldElement, b: PrimeFieldElement) -> ExtensionFieldElement {
        ExtensionFieldElement { a, b }
    }

    /// The real part \\( a \\).
    pub fn real(&self) -> &PrimeFieldElement {
        &self.a
    }

    /// The imaginary part \\( b \\).
    pub fn imag(&self) -> &PrimeFieldElement {
        &self.b
    }

    /// Construct zero.
    pub fn zero() -> ExtensionFieldElement {
        ExtensionFieldElement {
            a: PrimeFieldElement::zero(),
            b: PrimeFieldElement::zero(),
        }
    }

    /// Construct one.
    pub fn one() -> ExtensionFieldElement {
        ExtensionFieldElement {
            a: PrimeFieldElement::one(),
            b: PrimeFieldElement::zero(),
        }
    }

    /// Compute `self * rhs` with three base field multiplications.
    pub fn mul(&self, rhs: &ExtensionFieldElement) -> ExtensionFieldElement {
        // Let (a,b,c,d) = (lhs.a,lhs.b,rhs.a,rhs.b).
        let a = &self.a.0;
        let b = &self.b.0;
        let c = &rhs.a.0;
        let d = &rhs.b.0;

        // We want to compute
        //
        // (a + bi)*(c + di) = (a*c - b*d) + (a*d + b*c)i
        //
        // Use Karatsuba's trick: note that
        //
        // (b - a)*(c - d) = (b*c + a*d) - a*c - b*d
        //
        // so (a*d + b*c) = (b-a)*(c-d) + a*c + b*d.

        let ac = fp751_mul(a, c); // = a*c*R*R
        let bd = fp751_mul(b, d); // = b*d*R*R

        let b_minus_a = fp751_sub_reduced(b, a); // = (b-a)*R
        let c_minus_d = fp751_sub_reduced(c, d); // = (c-d)*R

        let mut ad_plus_bc = fp751_mul(&b_minus_a, &c_minus_d); // = (b-a)*(c-d)*R*R
        ad_plus_bc = fp751_x2_add_lazy(&ad_plus_bc, &ac); // = ((b-a)*(c-d) + a*c)*R*R
        ad_plus_bc = fp751_x2_add_lazy(&ad_plus_bc, &bd); // = ((b-a)*(c-d) + a*c + b*d)*R*R

        let imag = fp751_montgomery_reduce(&mut ad_plus_bc); // = (a*d + b*c)*R mod p

        let mut ac_minus_bd = fp751_x2_sub_lazy(&ac, &bd); // = (a*c - b*d)*R*R
        let real = fp751_montgomery_reduce(&mut ac_minus_bd); // = (a*c - b*d)*R mod p

        ExtensionFieldElement {
            a: PrimeFieldElement(real),
            b: PrimeFieldElement(imag),
        }
    }

    /// Compute `self^2` with two base field multiplications.
    pub fn square(&self) -> ExtensionFieldElement {
        let a = &self.a.0;
        let b = &self.b.0;

        // (a + bi)*(a + bi) = (a + b)*(a - b) + 2*a*b*i

        let a2 = fp751_add_lazy(a, a); // = 2*a*R
        let a_plus_b = fp751_add_lazy(a, b); // = (a+b)*R
        let a_minus_b = fp751_sub_reduced(a, b); // = (a-b)*R

        let mut asq_minus_bsq = fp751_mul(&a_plus_b, &a_minus_b); // = (a^2 - b^2)*R*R
        let mut ab2 = fp751_mul(&a2, b); // = 2*a*b*R*R

        ExtensionFieldElement {
            a: PrimeFieldElement(fp751_montgomery_reduce(&mut asq_minus_bsq)),
            b: PrimeFieldElement(fp751_montgomery_reduce(&mut ab2)),
        }
    }

    /// Compute `self + rhs`.
    pub fn add(&self, rhs: &ExtensionFieldElement) -> ExtensionFieldElement {
        ExtensionFieldElement {
            a: PrimeFieldElement(fp751_add_reduced(&self.a.0, &rhs.a.0)),
            b: PrimeFieldElement(fp751_add_reduced(&self.b.0, &rhs.b.0)),
        }
    }

    /// Compute `self - rhs`.
    pub fn sub(&self, rhs: &ExtensionFieldElement) -> ExtensionFieldElement {
        ExtensionFieldElement {
            a: PrimeFieldElement(fp751_sub_reduced(&self.a.0, &rhs.a.0)),
            b: PrimeFieldElement(fp751_sub_reduced(&self.b.0, &rhs.b.0)),
        }
    }

    /// Returns the multiplicative inverse of this element, or zero for zero.
    pub fn inv(&self) -> ExtensionFieldElement {
        // 1/(a + bi) = (a - bi)/(a^2 + b^2)
        let asq = self.a.square();
        let bsq = self.b.square();
        let norm_inv = (&asq + &bsq).inv();

        ExtensionFieldElement {
            a: &self.a * &norm_inv,
            b: -(&self.b * &norm_inv),
        }
    }

    /// Determine if this `ExtensionFieldElement` is zero.
    pub fn is_zero(&self) -> Choice {
        self.a.is_zero() & self.b.is_zero()
    }

    /// Encode this element as the real part followed by the imaginary part.
    pub fn to_bytes(&self) -> [u8; EXTENSION_FIELD_ENCODED_LENGTH] {
        let mut bytes = [0u8; EXTENSION_FIELD_ENCODED_LENGTH];
        bytes[..PRIME_FIELD_ENCODED_LENGTH].copy_from_slice(&self.a.to_bytes());
        bytes[PRIME_FIELD_ENCODED_LENGTH..].copy_from_slice(&self.b.to_bytes());
        bytes
    }

    /// Decode an element encoded by `to_bytes`.
    pub fn from_bytes(
        bytes: &[u8; EXTENSION_FIELD_ENCODED_LENGTH],
    ) -> Result<ExtensionFieldElement, ArithmeticError> {
        let mut a = [0u8; PRIME_FIELD_ENCODED_LENGTH];
        let mut b = [0u8; PRIME_FIELD_ENCODED_LENGTH];
        a.copy_from_slice(&bytes[..PRIME_FIELD_ENCODED_LENGTH]);
        b.copy_from_slice(&bytes[PRIME_FIELD_ENCODED_LENGTH..]);

        Ok(ExtensionFieldElement {
            a: PrimeFieldElement::from_bytes(&a)?,
            b: PrimeFieldElement::from_bytes(&b)?,
        })
    }

    /// Return a random extension field element sampled from the given `rng`.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> ExtensionFieldElement {
        ExtensionFieldElement {
            a: PrimeFieldElement::random(rng),
            b: PrimeFieldElement::random(rng),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::backend::serial::u64::constants::TOP_WORD_MASK;
    use proptest::prelude::*;
    use rand::rngs::OsRng;

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

    #[test]
    fn i_squared_is_minus_one() {
        let i = ExtensionFieldElement::new(PrimeFieldElement::zero(), PrimeFieldElement::one());
        assert_eq!(&i * &i, -ExtensionFieldElement::one());
        assert_eq!(i.square(), -ExtensionFieldElement::one());
    }

    #[test]
    fn small_complex_product() {
        // (2 + 3i)*(5 + 7i) = (10 - 21) + (14 + 15)i = -11 + 29i
        let u = ExtensionFieldElement::new(PrimeFieldElement::from_u64(2), PrimeFieldElement::from_u64(3));
        let v = ExtensionFieldElement::new(PrimeFieldElement::from_u64(5), PrimeFieldElement::from_u64(7));
        let expected = ExtensionFieldElement::new(
            -PrimeFieldElement::from_u64(11),
            PrimeFieldElement::from_u64(29),
        );
        assert_eq!(&u * &v, expected);
        assert_eq!(&v * &u, expected);
    }

    #[test]
    fn invert() {
        assert!(bool::from(ExtensionFieldElement::zero().inv().is_zero()));

        let x = ExtensionFieldElement::random(&mut OsRng);
        assert_eq!(&x * &x.inv(), ExtensionFieldElement::one());
    }

    #[test]
    fn bytes_round_trip() {
        let x = ExtensionFieldElement::random(&mut OsRng);
        assert_eq!(ExtensionFieldElement::from_bytes(&x.to_bytes()), Ok(x));
        assert_eq!(
            ExtensionFieldElement::from_bytes(&[0xff; EXTENSION_FIELD_ENCODED_LENGTH]),
            Err(ArithmeticError::NonCanonicalEncoding)
        );
    }

    proptest! {
        #[test]
        fn karatsuba_matches_schoolbook(u in extension_field_element(), v in extension_field_element()) {
            let (a, b) = (u.real(), u.imag());
            let (c, d) = (v.real(), v.imag());
            let expected = ExtensionFieldElement::new(
                &(a * c) - &(b * d),
                &(a * d) + &(b * c),
            );
            prop_assert!(u.mul(&v).vartime_eq(&expected));
        }

        #[test]
        fn square_matches_mul(u in extension_field_element()) {
            prop_assert!(u.square().vartime_eq(&u.mul(&u)));
        }

        #[test]
        fn one_is_multiplicative_identity(u in extension_field_element()) {
            let one = ExtensionFieldElement::one();
            prop_assert!(one.mul(&u).vartime_eq(&u));
            prop_assert!(u.mul(&one).vartime_eq(&u));
        }

        #[test]
        fn add_then_sub(u in extension_field_element(), v in extension_field_element()) {
            prop_assert!((&(&u + &v) - &v).vartime_eq(&u));
        }

        #[test]
        fn destination_may_be_an_operand(u in extension_field_element(), v in extension_field_element()) {
            let fresh = &u * &v;
            let mut dest = u;
            dest *= &v;
            prop_assert!(dest.vartime_eq(&fresh));

            let fresh = &u * &u;
            let mut dest = u;
            dest *= dest;
            prop_assert!(dest.vartime_eq(&fresh));

            let fresh = &u + &v;
            let mut dest = v;
            dest += &u;
            prop_assert!(dest.vartime_eq(&fresh));

            let fresh = &u - &v;
            let mut dest = u;
            dest -= &v;
            prop_assert!(dest.vartime_eq(&fresh));
        }
    }
}

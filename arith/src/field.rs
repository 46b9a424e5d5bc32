//! Arithmetic on elements of the base field \\( \mathbb F\_p \\), for
//! \\( p = 2\^{372} 3\^{239} - 1 \\).
//!
//! A `PrimeFieldElement` wraps a single `Fp751Element` held in Montgomery form:
//! the value \\( a \\) is represented by \\( aR \bmod p \\) with \\( R = 2\^{768} \\).
//! The representative itself may be any value in \\( [0, 2p) \\); only
//! `ConstantTimeEq`, `VartimeEq`, `is_zero` and `to_bytes` look at canonical form.

use core::cmp::{Eq, PartialEq};
use core::fmt::Debug;
use core::ops::Neg;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::{Sub, SubAssign};

use byteorder::{ByteOrder, LittleEndian};

use rand_core::{CryptoRng, RngCore};

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use zeroize::Zeroize;

use crate::backend::serial::u64::constants::{
    FP751_NUM_WORDS, MONTGOMERY_ONE, MONTGOMERY_RR, P751_MINUS_TWO,
};
use crate::backend::serial::u64::fp751::*;
use crate::errors::ArithmeticError;
use crate::traits::VartimeEq;

/// The length of the canonical little-endian encoding of a `PrimeFieldElement`.
pub const PRIME_FIELD_ENCODED_LENGTH: usize = 94;

/// Represents an element of the prime field \\( \mathbb F\_p \\).
#[derive(Copy, Clone, Default)]
pub struct PrimeFieldElement(pub(crate) Fp751Element);

impl Debug for PrimeFieldElement {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "PrimeFieldElement({:?})", &self.0)
    }
}

impl Eq for PrimeFieldElement {}

impl PartialEq for PrimeFieldElement {
    fn eq(&self, other: &PrimeFieldElement) -> bool {
        self.ct_eq(other).unwrap_u8() == 1u8
    }
}

impl ConstantTimeEq for PrimeFieldElement {
    /// Test equality between two `PrimeFieldElement`s.  Since the internal
    /// representation is not canonical, both sides are strong-reduced first.
    fn ct_eq(&self, other: &PrimeFieldElement) -> Choice {
        let mut x = self.0;
        let mut y = other.0;
        fp751_strong_reduce(&mut x);
        fp751_strong_reduce(&mut y);
        x.ct_eq(&y)
    }
}

impl VartimeEq for PrimeFieldElement {
    fn vartime_eq(&self, other: &PrimeFieldElement) -> bool {
        self.0.vartime_eq(&other.0)
    }
}

impl ConditionallySelectable for PrimeFieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        PrimeFieldElement(Fp751Element::conditional_select(&a.0, &b.0, choice))
    }
}

impl Zeroize for PrimeFieldElement {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<'a, 'b> Add<&'b PrimeFieldElement> for &'a PrimeFieldElement {
    type Output = PrimeFieldElement;
    fn add(self, rhs: &'b PrimeFieldElement) -> PrimeFieldElement {
        PrimeFieldElement::add(self, rhs)
    }
}

define_add_variants!(LHS = PrimeFieldElement, RHS = PrimeFieldElement, Output = PrimeFieldElement);

impl<'b> AddAssign<&'b PrimeFieldElement> for PrimeFieldElement {
    fn add_assign(&mut self, rhs: &'b PrimeFieldElement) {
        *self = PrimeFieldElement::add(self, rhs);
    }
}

define_add_assign_variants!(LHS = PrimeFieldElement, RHS = PrimeFieldElement);

impl<'a, 'b> Sub<&'b PrimeFieldElement> for &'a PrimeFieldElement {
    type Output = PrimeFieldElement;
    fn sub(self, rhs: &'b PrimeFieldElement) -> PrimeFieldElement {
        PrimeFieldElement::sub(self, rhs)
    }
}

define_sub_variants!(LHS = PrimeFieldElement, RHS = PrimeFieldElement, Output = PrimeFieldElement);

impl<'b> SubAssign<&'b PrimeFieldElement> for PrimeFieldElement {
    fn sub_assign(&mut self, rhs: &'b PrimeFieldElement) {
        *self = PrimeFieldElement::sub(self, rhs);
    }
}

define_sub_assign_variants!(LHS = PrimeFieldElement, RHS = PrimeFieldElement);

impl<'a, 'b> Mul<&'b PrimeFieldElement> for &'a PrimeFieldElement {
    type Output = PrimeFieldElement;
    fn mul(self, rhs: &'b PrimeFieldElement) -> PrimeFieldElement {
        PrimeFieldElement::mul(self, rhs)
    }
}

define_mul_variants!(LHS = PrimeFieldElement, RHS = PrimeFieldElement, Output = PrimeFieldElement);

impl<'b> MulAssign<&'b PrimeFieldElement> for PrimeFieldElement {
    fn mul_assign(&mut self, rhs: &'b PrimeFieldElement) {
        *self = PrimeFieldElement::mul(self, rhs);
    }
}

define_mul_assign_variants!(LHS = PrimeFieldElement, RHS = PrimeFieldElement);

impl<'a> Neg for &'a PrimeFieldElement {
    type Output = PrimeFieldElement;
    fn neg(self) -> PrimeFieldElement {
        PrimeFieldElement::sub(&PrimeFieldElement::zero(), self)
    }
}

impl Neg for PrimeFieldElement {
    type Output = PrimeFieldElement;
    fn neg(self) -> PrimeFieldElement {
        -&self
    }
}

impl PrimeFieldElement {
    /// Construct a `PrimeFieldElement` from words which are already in Montgomery
    /// form.  The words must encode a value below \\( 2p \\).
    pub const fn from_words(words: [u64; FP751_NUM_WORDS]) -> PrimeFieldElement {
        PrimeFieldElement(Fp751Element(words))
    }

    /// The raw Montgomery-form words of this element.
    pub fn as_words(&self) -> &[u64; FP751_NUM_WORDS] {
        &self.0 .0
    }

    /// Construct zero.
    pub fn zero() -> PrimeFieldElement {
        PrimeFieldElement(Fp751Element::default())
    }

    /// Construct one.
    pub fn one() -> PrimeFieldElement {
        PrimeFieldElement(MONTGOMERY_ONE)
    }

    /// Convert an integer into Montgomery form.
    pub fn from_u64(x: u64) -> PrimeFieldElement {
        let mut words = [0u64; FP751_NUM_WORDS];
        words[0] = x;
        // (x) * (R^2) * R^{-1} = x*R
        PrimeFieldElement(Fp751Element(words)).mul(&PrimeFieldElement(MONTGOMERY_RR))
    }

    /// Compute `self * rhs`.
    pub fn mul(&self, rhs: &PrimeFieldElement) -> PrimeFieldElement {
        let a = &self.0; // = a*R
        let b = &rhs.0; // = b*R

        let mut ab = fp751_mul(a, b); // = a*b*R*R
        PrimeFieldElement(fp751_montgomery_reduce(&mut ab)) // = a*b*R mod p
    }

    /// Compute `self + rhs`.
    pub fn add(&self, rhs: &PrimeFieldElement) -> PrimeFieldElement {
        PrimeFieldElement(fp751_add_reduced(&self.0, &rhs.0))
    }

    /// Compute `self - rhs`.
    pub fn sub(&self, rhs: &PrimeFieldElement) -> PrimeFieldElement {
        PrimeFieldElement(fp751_sub_reduced(&self.0, &rhs.0))
    }

    /// Returns the square of this field element.
    pub fn square(&self) -> PrimeFieldElement {
        self.mul(self)
    }

    /// Returns the multiplicative inverse of this element, or zero for zero.
    ///
    /// Computes \\( x\^{p-2} \\).  The exponent is a public constant and every
    /// bit costs one squaring, one multiplication and one constant-time select,
    /// so the running time does not depend on `self`.
    pub fn inv(&self) -> PrimeFieldElement {
        let mut acc = PrimeFieldElement::one();
        for word in P751_MINUS_TWO.iter().rev() {
            for bit in (0..64).rev() {
                acc = acc.square();
                let product = acc.mul(self);
                let choice = Choice::from(((word >> bit) & 1) as u8);
                acc = PrimeFieldElement::conditional_select(&acc, &product, choice);
            }
        }
        acc
    }

    /// Determine if this `PrimeFieldElement` is zero.
    ///
    /// # Return
    ///
    /// If zero, return `Choice(1)`.  Otherwise, return `Choice(0)`.
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&PrimeFieldElement::zero())
    }

    /// Returns the canonical integer value (not in Montgomery form).
    fn to_canonical(&self) -> Fp751Element {
        let mut wide = Fp751X2::default();
        wide.0[..FP751_NUM_WORDS].copy_from_slice(&self.0 .0);
        let mut value = fp751_montgomery_reduce(&mut wide); // = a*R*R^{-1}
        fp751_strong_reduce(&mut value);
        value
    }

    /// Encode the value of this element as 94 little-endian bytes.
    pub fn to_bytes(&self) -> [u8; PRIME_FIELD_ENCODED_LENGTH] {
        let value = self.to_canonical();

        let mut padded = [0u8; 8 * FP751_NUM_WORDS];
        LittleEndian::write_u64_into(&value.0, &mut padded);

        let mut bytes = [0u8; PRIME_FIELD_ENCODED_LENGTH];
        bytes.copy_from_slice(&padded[..PRIME_FIELD_ENCODED_LENGTH]);
        bytes
    }

    /// Decode an element from 94 little-endian bytes.
    ///
    /// # Return
    ///
    /// - `Ok(PrimeFieldElement)` if the bytes encode an integer below \\( p \\);
    /// - `Err(NonCanonicalEncoding)` otherwise.
    pub fn from_bytes(
        bytes: &[u8; PRIME_FIELD_ENCODED_LENGTH],
    ) -> Result<PrimeFieldElement, ArithmeticError> {
        let mut padded = [0u8; 8 * FP751_NUM_WORDS];
        padded[..PRIME_FIELD_ENCODED_LENGTH].copy_from_slice(bytes);

        let mut words = [0u64; FP751_NUM_WORDS];
        LittleEndian::read_u64_into(&padded, &mut words);
        let value = Fp751Element(words);

        if fp751_is_canonical(&value).unwrap_u8() == 0u8 {
            log::debug!("rejecting non-canonical prime field encoding");
            return Err(ArithmeticError::NonCanonicalEncoding);
        }

        Ok(PrimeFieldElement(value).mul(&PrimeFieldElement(MONTGOMERY_RR)))
    }

    /// Return a random field element sampled from the given `rng`.
    ///
    /// A 1518-bit random integer \\( T < pR \\) is Montgomery-reduced, which
    /// leaves a bias of about \\( 2\^{-767} \\).
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> PrimeFieldElement {
        let mut wide = Fp751X2::default();
        for word in wide.0.iter_mut() {
            *word = rng.next_u64();
        }
        wide.0[2 * FP751_NUM_WORDS - 1] &= (1u64 << (1518 - 64 * 23)) - 1;

        let mut value = fp751_montgomery_reduce(&mut wide);
        fp751_strong_reduce(&mut value);
        wide.zeroize();
        PrimeFieldElement(value)
    }
}

//! Modular arithmetic on 12 × 64-bit words, modulo \\( p = 2\^{372} 3\^{239} - 1 \\).
//!
//! No meaning is assigned to the words here: an `Fp751Element` may hold a value in
//! Montgomery form or not, and tracking that is left to the field types built on
//! top of this module.
//!
//! The functions in this module form the kernel contract:
//!
//! | function                     | inputs          | output          |
//! |------------------------------|-----------------|-----------------|
//! | `fp751_add_reduced`          | `[0, 2p)`       | `[0, 2p)`       |
//! | `fp751_sub_reduced`          | `[0, 2p)`       | `[0, 2p)`       |
//! | `fp751_add_lazy`             | `[0, 2p)`       | `[0, 4p)`       |
//! | `fp751_x2_add_lazy`          | sum `< p·2^768` | unreduced sum   |
//! | `fp751_x2_sub_lazy`          | each `< p·2^768`| `[0, p·2^768)`  |
//! | `fp751_mul`                  | `[0, 4p)`       | full product    |
//! | `fp751_montgomery_reduce`    | `< p·2^768`     | `[0, 2p)`       |
//! | `fp751_strong_reduce`        | `[0, 2p)`       | `[0, p)`        |
//!
//! Every function runs in time independent of the word values: loop bounds are
//! fixed and the only conditional behaviour is a masked add selected by a borrow.
//! All of them return a freshly built value (or write an explicit `&mut` target
//! after every read), so an output may replace any of its inputs.

use core::fmt::Debug;

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use zeroize::Zeroize;

use super::constants::{FP751_NUM_WORDS, P751, P751X2, P751_INV_NEG};
use crate::traits::VartimeEq;

const N: usize = FP751_NUM_WORDS;

/// A base field value held in 12 little-endian 64-bit words.
#[derive(Copy, Clone, Default)]
pub struct Fp751Element(pub [u64; FP751_NUM_WORDS]);

/// An unreduced product of two `Fp751Element`s, consumed by Montgomery reduction.
#[derive(Copy, Clone, Default)]
pub struct Fp751X2(pub [u64; 2 * FP751_NUM_WORDS]);

impl Debug for Fp751Element {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "Fp751Element({:#x?})", &self.0[..])
    }
}

impl Debug for Fp751X2 {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "Fp751X2({:#x?})", &self.0[..])
    }
}

impl ConditionallySelectable for Fp751Element {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut words = [0u64; N];
        for i in 0..N {
            words[i] = u64::conditional_select(&a.0[i], &b.0[i], choice);
        }
        Fp751Element(words)
    }
}

/// Compares the raw words. Two representatives of the same residue only compare
/// equal after both have been strong-reduced.
impl ConstantTimeEq for Fp751Element {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[..].ct_eq(&other.0[..])
    }
}

impl Zeroize for Fp751Element {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Zeroize for Fp751X2 {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl VartimeEq for Fp751Element {
    /// Strong-reduces both operands, then compares word by word.
    fn vartime_eq(&self, other: &Self) -> bool {
        let mut x = *self;
        let mut y = *other;
        fp751_strong_reduce(&mut x);
        fp751_strong_reduce(&mut y);

        let mut eq = true;
        for i in 0..N {
            eq = (x.0[i] == y.0[i]) && eq;
        }
        eq
    }
}

/// Computes `a + b + carry`, returning `(sum, carry_out)`.
#[inline(always)]
fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let t = (a as u128) + (b as u128) + (carry as u128);
    (t as u64, (t >> 64) as u64)
}

/// Computes `a - b - borrow`, returning `(difference, borrow_out)`.
#[inline(always)]
fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let t = (a as u128).wrapping_sub((b as u128) + (borrow as u128));
    (t as u64, (t >> 127) as u64)
}

/// Computes `a + b * c + carry`, returning `(low, high)`.
#[inline(always)]
fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let t = (a as u128) + (b as u128) * (c as u128) + (carry as u128);
    (t as u64, (t >> 64) as u64)
}

/// Adds `m & mask` into `z`, dropping the final carry.
#[inline(always)]
fn add_masked(z: &mut [u64], m: &[u64; N], mask: u64) {
    let mut carry = 0;
    for i in 0..N {
        let (w, c) = adc(z[i], m[i] & mask, carry);
        z[i] = w;
        carry = c;
    }
}

/// Returns true if `x < bound`. Only used to check kernel preconditions in debug builds.
#[inline]
fn is_below(x: &Fp751Element, bound: &Fp751Element) -> bool {
    let mut borrow = 0;
    for i in 0..N {
        let (_, b) = sbb(x.0[i], bound.0[i], borrow);
        borrow = b;
    }
    borrow == 1
}

/// Compute z = x + y (mod 2p).
pub fn fp751_add_reduced(x: &Fp751Element, y: &Fp751Element) -> Fp751Element {
    debug_assert!(is_below(x, &P751X2) && is_below(y, &P751X2));

    let mut z = [0u64; N];
    let mut carry = 0;
    for i in 0..N {
        let (w, c) = adc(x.0[i], y.0[i], carry);
        z[i] = w;
        carry = c;
    }
    // x + y < 4p < 2^768, so the carry out is zero.

    let mut borrow = 0;
    for i in 0..N {
        let (w, b) = sbb(z[i], P751X2.0[i], borrow);
        z[i] = w;
        borrow = b;
    }

    add_masked(&mut z, &P751X2.0, 0u64.wrapping_sub(borrow));
    Fp751Element(z)
}

/// Compute z = x - y (mod 2p).
pub fn fp751_sub_reduced(x: &Fp751Element, y: &Fp751Element) -> Fp751Element {
    debug_assert!(is_below(x, &P751X2) && is_below(y, &P751X2));

    let mut z = [0u64; N];
    let mut borrow = 0;
    for i in 0..N {
        let (w, b) = sbb(x.0[i], y.0[i], borrow);
        z[i] = w;
        borrow = b;
    }

    add_masked(&mut z, &P751X2.0, 0u64.wrapping_sub(borrow));
    Fp751Element(z)
}

/// Compute z = x + y, without reducing mod p.
pub fn fp751_add_lazy(x: &Fp751Element, y: &Fp751Element) -> Fp751Element {
    debug_assert!(is_below(x, &P751X2) && is_below(y, &P751X2));

    let mut z = [0u64; N];
    let mut carry = 0;
    for i in 0..N {
        let (w, c) = adc(x.0[i], y.0[i], carry);
        z[i] = w;
        carry = c;
    }
    Fp751Element(z)
}

/// Compute z = x + y, without reducing mod p.
pub fn fp751_x2_add_lazy(x: &Fp751X2, y: &Fp751X2) -> Fp751X2 {
    let mut z = [0u64; 2 * N];
    let mut carry = 0;
    for i in 0..2 * N {
        let (w, c) = adc(x.0[i], y.0[i], carry);
        z[i] = w;
        carry = c;
    }
    Fp751X2(z)
}

/// Compute z = x - y, adding p·2^768 back when the subtraction borrows.
///
/// The result is congruent to `x - y` modulo p and lies in `[0, p·2^768)`, so it
/// can be fed straight to `fp751_montgomery_reduce`.
pub fn fp751_x2_sub_lazy(x: &Fp751X2, y: &Fp751X2) -> Fp751X2 {
    let mut z = [0u64; 2 * N];
    let mut borrow = 0;
    for i in 0..2 * N {
        let (w, b) = sbb(x.0[i], y.0[i], borrow);
        z[i] = w;
        borrow = b;
    }

    add_masked(&mut z[N..], &P751.0, 0u64.wrapping_sub(borrow));
    Fp751X2(z)
}

/// Compute z = x * y.
pub fn fp751_mul(x: &Fp751Element, y: &Fp751Element) -> Fp751X2 {
    let mut z = [0u64; 2 * N];
    for i in 0..N {
        let mut carry = 0;
        for j in 0..N {
            let (w, c) = mac(z[i + j], x.0[i], y.0[j], carry);
            z[i + j] = w;
            carry = c;
        }
        z[i + N] = carry;
    }
    Fp751X2(z)
}

/// Perform Montgomery reduction: set z = x R^{-1} (mod p), with R = 2^768.
///
/// Destroys the input value, which is used as scratch space.
pub fn fp751_montgomery_reduce(x: &mut Fp751X2) -> Fp751Element {
    let t = &mut x.0;

    // Carry out of word i + N from round i, added into word i + N + 1 by round i + 1.
    let mut pending = 0u64;
    for i in 0..N {
        let m = t[i].wrapping_mul(P751_INV_NEG);
        let mut carry = 0;
        for j in 0..N {
            let (w, c) = mac(t[i + j], m, P751.0[j], carry);
            t[i + j] = w;
            carry = c;
        }
        let (w, c) = adc(t[i + N], carry, pending);
        t[i + N] = w;
        pending = c;
    }
    // The reduced value is below 2p < 2^768, so nothing spills past the top word.
    debug_assert_eq!(pending, 0);

    let mut z = [0u64; N];
    z.copy_from_slice(&t[N..]);
    Fp751Element(z)
}

/// Reduce a field element in [0, 2p) to one in [0, p).
pub fn fp751_strong_reduce(x: &mut Fp751Element) {
    debug_assert!(is_below(x, &P751X2));

    let mut borrow = 0;
    for i in 0..N {
        let (w, b) = sbb(x.0[i], P751.0[i], borrow);
        x.0[i] = w;
        borrow = b;
    }

    add_masked(&mut x.0, &P751.0, 0u64.wrapping_sub(borrow));
}

/// Returns `Choice(1)` if `x < p`, i.e. if `x` is the canonical representative.
pub fn fp751_is_canonical(x: &Fp751Element) -> Choice {
    let mut borrow = 0;
    for i in 0..N {
        let (_, b) = sbb(x.0[i], P751.0[i], borrow);
        borrow = b;
    }
    Choice::from(borrow as u8)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::backend::serial::u64::constants::{MONTGOMERY_ONE, MONTGOMERY_RR, TOP_WORD_MASK};

    use num_bigint::BigUint;
    use proptest::prelude::*;

    fn to_biguint(words: &[u64]) -> BigUint {
        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes().to_vec()).collect();
        BigUint::from_bytes_le(&bytes)
    }

    fn modulus() -> BigUint {
        to_biguint(&P751.0)
    }

    fn montgomery_r() -> BigUint {
        BigUint::from(1u8) << 768
    }

    fn below_2p() -> impl Strategy<Value = Fp751Element> {
        prop::array::uniform12(any::<u64>()).prop_map(|mut words| {
            words[N - 1] &= TOP_WORD_MASK;
            Fp751Element(words)
        })
    }

    #[test]
    fn modulus_matches_definition() {
        let p = (BigUint::from(1u8) << 372) * BigUint::from(3u8).pow(239) - BigUint::from(1u8);
        assert_eq!(modulus(), p);
        assert_eq!(to_biguint(&P751X2.0), &p + &p);
    }

    #[test]
    fn montgomery_constants() {
        let p = modulus();
        let r = montgomery_r();
        assert_eq!(to_biguint(&MONTGOMERY_ONE.0), &r % &p);
        assert_eq!(to_biguint(&MONTGOMERY_RR.0), (&r * &r) % &p);
    }

    #[test]
    fn reduce_of_r_squared_is_r() {
        let mut rr = Fp751X2::default();
        rr.0[..N].copy_from_slice(&MONTGOMERY_RR.0);
        let mut z = fp751_montgomery_reduce(&mut rr);
        fp751_strong_reduce(&mut z);
        assert!(z.ct_eq(&MONTGOMERY_ONE).unwrap_u8() == 1u8);
    }

    #[test]
    fn strong_reduce_of_p_is_zero() {
        let mut x = P751;
        fp751_strong_reduce(&mut x);
        assert_eq!(x.0, [0u64; N]);
    }

    #[test]
    fn is_canonical_rejects_p() {
        assert!(bool::from(fp751_is_canonical(&Fp751Element::default())));
        assert!(!bool::from(fp751_is_canonical(&P751)));

        let mut p_minus_one = P751;
        p_minus_one.0[0] -= 1;
        assert!(bool::from(fp751_is_canonical(&p_minus_one)));
        assert!(!bool::from(fp751_is_canonical(&Fp751Element([u64::max_value(); N]))));
    }

    #[test]
    fn sub_reduced_wraps_below_zero() {
        let zero = Fp751Element::default();
        let mut one = Fp751Element::default();
        one.0[0] = 1;
        let z = fp751_sub_reduced(&zero, &one);
        // 0 - 1 = 2p - 1
        let mut expected = P751X2;
        expected.0[0] -= 1;
        assert_eq!(z.0, expected.0);
    }

    #[test]
    fn x2_sub_lazy_adds_back_on_borrow() {
        let zero = Fp751X2::default();
        let mut one = Fp751X2::default();
        one.0[0] = 1;
        let mut z = fp751_x2_sub_lazy(&zero, &one);
        let r = fp751_montgomery_reduce(&mut z);

        let p = modulus();
        let r_inv = montgomery_r().modpow(&(&p - BigUint::from(2u8)), &p);
        // (0 - 1) R^-1 mod p
        let expected = (&p - BigUint::from(1u8)) * r_inv % &p;
        assert_eq!(to_biguint(&r.0) % &p, expected);
    }

    #[test]
    fn vartime_eq_identifies_representatives() {
        let mut one = Fp751Element::default();
        one.0[0] = 1;
        let p_plus_one = fp751_add_lazy(&P751, &one);
        assert!(one.vartime_eq(&p_plus_one));
        assert!(!one.vartime_eq(&Fp751Element::default()));
    }

    proptest! {
        #[test]
        fn montgomery_reduce_matches_bigint(x in below_2p(), y in below_2p()) {
            let p = modulus();
            let r_inv = montgomery_r().modpow(&(&p - BigUint::from(2u8)), &p);

            let mut xy = fp751_mul(&x, &y);
            prop_assert_eq!(to_biguint(&xy.0), to_biguint(&x.0) * to_biguint(&y.0));

            let z = fp751_montgomery_reduce(&mut xy);
            let z_int = to_biguint(&z.0);
            prop_assert!(z_int < &p + &p);

            let expected = to_biguint(&x.0) * to_biguint(&y.0) * r_inv % &p;
            prop_assert_eq!(z_int % &p, expected);
        }

        #[test]
        fn add_and_sub_reduced_match_bigint(x in below_2p(), y in below_2p()) {
            let p = modulus();
            let two_p = &p + &p;
            let (xi, yi) = (to_biguint(&x.0), to_biguint(&y.0));

            let sum = to_biguint(&fp751_add_reduced(&x, &y).0);
            prop_assert!(sum < two_p);
            prop_assert_eq!(sum, (&xi + &yi) % &two_p);

            let diff = to_biguint(&fp751_sub_reduced(&x, &y).0);
            prop_assert!(diff < two_p);
            prop_assert_eq!(diff, (&xi + &two_p - &yi) % &two_p);

            let lazy = to_biguint(&fp751_add_lazy(&x, &y).0);
            prop_assert_eq!(lazy, &xi + &yi);
        }

        #[test]
        fn strong_reduce_is_canonical(x in below_2p()) {
            let p = modulus();
            let mut z = x;
            fp751_strong_reduce(&mut z);
            prop_assert_eq!(to_biguint(&z.0), to_biguint(&x.0) % &p);
        }

        #[test]
        fn outputs_may_replace_inputs(x in below_2p(), y in below_2p()) {
            let fresh = fp751_add_reduced(&x, &y);
            let mut in_place = x;
            in_place = fp751_add_reduced(&in_place, &y);
            prop_assert_eq!(in_place.0, fresh.0);

            let fresh = fp751_sub_reduced(&x, &x);
            let mut in_place = x;
            in_place = fp751_sub_reduced(&in_place, &in_place);
            prop_assert_eq!(in_place.0, fresh.0);
        }
    }
}

//! This module contains backend-specific constant values, such as the 64-bit limbs of
//! the prime \\( p = 2\^{372} 3\^{239} - 1 \\) and its Montgomery constants.

use super::fp751::Fp751Element;

/// The number of 64-bit words in an `Fp751Element`.
pub const FP751_NUM_WORDS: usize = 12;

/// `P751` is the field modulus \\( p = 2\^{372} 3\^{239} - 1 \\).
pub const P751: Fp751Element = Fp751Element([
    0xffffffffffffffff,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0xeeafffffffffffff,
    0xe3ec968549f878a8,
    0xda959b1a13f7cc76,
    0x084e9867d6ebe876,
    0x8562b5045cb25748,
    0x0e12909f97badc66,
    0x00006fe5d541f71c,
]);

/// `P751X2` is \\( 2p \\), the exclusive upper bound of every lazily reduced element.
pub const P751X2: Fp751Element = Fp751Element([
    0xfffffffffffffffe,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0xdd5fffffffffffff,
    0xc7d92d0a93f0f151,
    0xb52b363427ef98ed,
    0x109d30cfadd7d0ed,
    0x0ac56a08b964ae90,
    0x1c25213f2f75b8cd,
    0x0000dfcbaa83ee38,
]);

/// `P751_MINUS_TWO` is \\( p - 2 \\), the Fermat inversion exponent.
pub(crate) const P751_MINUS_TWO: [u64; FP751_NUM_WORDS] = [
    0xfffffffffffffffd,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0xeeafffffffffffff,
    0xe3ec968549f878a8,
    0xda959b1a13f7cc76,
    0x084e9867d6ebe876,
    0x8562b5045cb25748,
    0x0e12909f97badc66,
    0x00006fe5d541f71c,
];

/// `P751` * `P751_INV_NEG` = -1 (mod 2^64).
///
/// The low 372 bits of \\( p \\) are all ones, so this is exactly one.
pub(crate) const P751_INV_NEG: u64 = 1;

/// `MONTGOMERY_ONE` = R % p where R = 2^768, the Montgomery form of one.
pub const MONTGOMERY_ONE: Fp751Element = Fp751Element([
    0x00000000000249ad,
    0x0000000000000000,
    0x0000000000000000,
    0x0000000000000000,
    0x0000000000000000,
    0x8310000000000000,
    0x5527b1e4375c6c66,
    0x697797bf3f4f24d0,
    0xc89db7b2ac5c4e2e,
    0x4ca4b439d2076956,
    0x10f7926c7512c7e9,
    0x00002d5b24bce5e2,
]);

/// `MONTGOMERY_RR` = (R^2) % p where R = 2^768
pub const MONTGOMERY_RR: Fp751Element = Fp751Element([
    0x233046449dad4058,
    0xdb010161a696452a,
    0x5e36941472e3fd8e,
    0xf40bfe2082a2e706,
    0x4932cca8904f8751,
    0x1f735f1f1ee7fc81,
    0xa24f4d80c1048e18,
    0xb56c383ccdb607c5,
    0x441dd47b735f9c90,
    0x5673ed2c6a6ac82a,
    0x06c905261132294b,
    0x000041ad830f1f35,
]);

/// Mask for the top word of a 751-bit value.
pub(crate) const TOP_WORD_MASK: u64 = (1u64 << (751 - 64 * 11)) - 1;

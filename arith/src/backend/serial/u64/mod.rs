//! The modular kernel over 12 × 64-bit limbs.

pub mod constants;
pub mod fp751;

//! Arithmetic for supersingular isogeny Diffie-Hellman over the prime
//! \\( p = 2\^{372} 3\^{239} - 1 \\): the base field \\( \mathbb F\_p \\), its
//! quadratic extension \\( \mathbb F\_{p\^2} \\), and x-only point arithmetic on
//! Montgomery curves over \\( \mathbb F\_{p\^2} \\).
//!
//! Everything reachable from secret data runs in constant time.  Comparisons
//! that do not are only available through [`traits::VartimeEq`].

#![cfg_attr(not(feature = "std"), no_std)]

// Internal macros. Must come first!
#[macro_use]
pub(crate) mod macros;

pub mod backend;
pub mod curve;
pub mod errors;
pub mod extension;
pub mod field;
pub mod montgomery;
pub mod traits;

pub use crate::curve::{CachedCurveConstants, ProjectiveCurveParameters};
pub use crate::errors::ArithmeticError;
pub use crate::extension::ExtensionFieldElement;
pub use crate::field::PrimeFieldElement;
pub use crate::montgomery::ProjectivePoint;

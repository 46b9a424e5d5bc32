//! Errors which may occur when validating curve parameters, converting points,
//! or decoding field elements.

use core::fmt;
use core::fmt::Display;

/// The precondition violations this crate reports explicitly.
///
/// Everything else about these types is total: arithmetic never fails, and
/// an inconsistent `P - Q` handed to differential addition cannot be detected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ArithmeticError {
    /// The curve parameters have `C = 0`.
    InvalidCurveParameters,
    /// The point at infinity (`z = 0`) has no affine x-coordinate.
    PointAtInfinity,
    /// An encoded field element was not below the modulus.
    NonCanonicalEncoding,
}

impl Display for ArithmeticError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ArithmeticError::InvalidCurveParameters => {
                write!(f, "Curve parameters must have C != 0")
            }
            ArithmeticError::PointAtInfinity => {
                write!(f, "The point at infinity has no affine coordinate")
            }
            ArithmeticError::NonCanonicalEncoding => {
                write!(f, "Field element encoding is not below the modulus")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ArithmeticError {}

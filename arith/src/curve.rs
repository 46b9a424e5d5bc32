//! Projective parameters of a Montgomery curve
//! \\( Cy\^2 = Cx\^3 + Ax\^2 + Cx \\) over \\( \mathbb F\_{p\^2} \\).
//!
//! The pair \\( (A : C) \\) is only defined up to a common nonzero factor.  The
//! point formulas in [`crate::montgomery`] never use \\( (A, C) \\) directly;
//! they take the derived values \\( A + 2C \\) and \\( 4C \\), which callers
//! compute once per curve with [`ProjectiveCurveParameters::cached_constants`]
//! and reuse for every doubling and tripling on that curve.

#![allow(non_snake_case)]

use subtle::ConditionallySelectable;
use subtle::Choice;

use zeroize::Zeroize;

use crate::errors::ArithmeticError;
use crate::extension::ExtensionFieldElement;

/// The parameters \\( (A : C) \\) of a Montgomery curve.
#[derive(Copy, Clone, Debug)]
pub struct ProjectiveCurveParameters {
    pub A: ExtensionFieldElement,
    pub C: ExtensionFieldElement,
}

/// The per-curve values consumed by x-only doubling and tripling.
#[derive(Copy, Clone, Debug)]
pub struct CachedCurveConstants {
    /// \\( A + 2C \\)
    pub aplus2c: ExtensionFieldElement,
    /// \\( 4C \\)
    pub c4: ExtensionFieldElement,
}

impl ProjectiveCurveParameters {
    /// Construct the curve \\( (A : C) \\).  The caller must ensure
    /// \\( C \neq 0 \\); see [`validate`](Self::validate).
    pub fn new(A: ExtensionFieldElement, C: ExtensionFieldElement) -> ProjectiveCurveParameters {
        ProjectiveCurveParameters { A, C }
    }

    /// Construct the curve \\( y\^2 = x\^3 + Ax\^2 + x \\), i.e. \\( (A : 1) \\).
    pub fn from_affine(A: ExtensionFieldElement) -> ProjectiveCurveParameters {
        ProjectiveCurveParameters { A, C: ExtensionFieldElement::one() }
    }

    /// Check, once at curve setup, that these parameters describe a curve.
    ///
    /// # Return
    ///
    /// - `Ok(())` if \\( C \neq 0 \\);
    /// - `Err(InvalidCurveParameters)` otherwise.
    pub fn validate(&self) -> Result<(), ArithmeticError> {
        if self.C.is_zero().unwrap_u8() == 1u8 {
            log::debug!("rejecting curve parameters with C = 0");
            return Err(ArithmeticError::InvalidCurveParameters);
        }
        Ok(())
    }

    /// Derive \\( A + 2C \\) and \\( 4C \\).
    pub fn cached_constants(&self) -> CachedCurveConstants {
        let c2 = &self.C + &self.C; // = 2*C
        let c4 = &c2 + &c2; // = 4*C
        let aplus2c = &c2 + &self.A; // = 2*C + A

        CachedCurveConstants { aplus2c, c4 }
    }
}

impl<'a> From<&'a ProjectiveCurveParameters> for CachedCurveConstants {
    fn from(curve: &'a ProjectiveCurveParameters) -> CachedCurveConstants {
        curve.cached_constants()
    }
}

impl ConditionallySelectable for ProjectiveCurveParameters {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        ProjectiveCurveParameters {
            A: ExtensionFieldElement::conditional_select(&a.A, &b.A, choice),
            C: ExtensionFieldElement::conditional_select(&a.C, &b.C, choice),
        }
    }
}

impl Zeroize for ProjectiveCurveParameters {
    fn zeroize(&mut self) {
        self.A.zeroize();
        self.C.zeroize();
    }
}

impl Zeroize for CachedCurveConstants {
    fn zeroize(&mut self) {
        self.aplus2c.zeroize();
        self.c4.zeroize();
    }
}

use crate::error::PolyError;
use crate::utils::{mod_inverse, modulo};

/// Coefficient arithmetic used by dense polynomial long division.
///
/// Long division only ever needs three things from the coefficient ring:
/// - bring a raw integer into canonical form
/// - form the next quotient digit from a leading coefficient
/// - subtract a scaled divisor coefficient from a running remainder
///
/// Implementations must keep every value they return reduced, so callers
/// never see an intermediate larger than the ring's representatives.
pub trait CoefficientRing {
    /// Canonical representative of `value`.
    fn reduce(&self, value: i64) -> i64;

    /// Quotient digit `d` with `d * normalizer == leading` in the ring.
    ///
    /// `normalizer` is already reduced and non-zero.
    fn quotient_digit(&self, leading: i64, normalizer: i64) -> Result<i64, PolyError>;

    /// Reduced `acc - digit * coeff`.
    fn mul_sub(&self, acc: i64, digit: i64, coeff: i64) -> Result<i64, PolyError>;

    /// The modulus reported in errors, 0 for exact integers.
    fn modulus(&self) -> i64;

    #[inline]
    fn is_zero(&self, value: i64) -> bool {
        self.reduce(value) == 0
    }
}

/// The integers, optionally reduced modulo `modulus`.
///
/// A modulus of 0 means exact arithmetic: subtraction is checked for
/// overflow and quotient digits must divide exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Integers {
    modulus: i64,
}

impl Integers {
    /// Exact integer arithmetic.
    pub const EXACT: Self = Self { modulus: 0 };

    /// Integers modulo `|modulus|`, or exact when `modulus == 0`.
    pub const fn new(modulus: i64) -> Self {
        Self {
            modulus: modulus.saturating_abs(),
        }
    }
}

impl CoefficientRing for Integers {
    #[inline]
    fn reduce(&self, value: i64) -> i64 {
        modulo(value, self.modulus)
    }

    fn quotient_digit(&self, leading: i64, normalizer: i64) -> Result<i64, PolyError> {
        if self.modulus == 0 {
            return match leading.checked_rem(normalizer) {
                Some(0) => leading.checked_div(normalizer).ok_or(PolyError::Overflow),
                Some(_) => Err(PolyError::InexactDivision {
                    numerator: leading,
                    denominator: normalizer,
                }),
                None => Err(PolyError::Overflow),
            };
        }

        let inv = mod_inverse(normalizer, self.modulus).ok_or(PolyError::NotInvertible {
            value: normalizer,
            modulus: self.modulus,
        })?;
        let digit = (leading as i128 * inv as i128).rem_euclid(self.modulus as i128);
        Ok(digit as i64)
    }

    fn mul_sub(&self, acc: i64, digit: i64, coeff: i64) -> Result<i64, PolyError> {
        if self.modulus == 0 {
            return digit
                .checked_mul(coeff)
                .and_then(|p| acc.checked_sub(p))
                .ok_or(PolyError::Overflow);
        }

        // Reduce before narrowing back to i64.
        let wide = acc as i128 - digit as i128 * coeff as i128;
        Ok(wide.rem_euclid(self.modulus as i128) as i64)
    }

    fn modulus(&self) -> i64 {
        self.modulus
    }
}

/// The two-element field: subtraction is XOR and every non-zero divisor
/// coefficient is 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gf2;

impl CoefficientRing for Gf2 {
    #[inline]
    fn reduce(&self, value: i64) -> i64 {
        value & 1
    }

    fn quotient_digit(&self, leading: i64, _normalizer: i64) -> Result<i64, PolyError> {
        Ok(leading & 1)
    }

    #[inline]
    fn mul_sub(&self, acc: i64, digit: i64, coeff: i64) -> Result<i64, PolyError> {
        Ok((acc ^ (digit & coeff)) & 1)
    }

    fn modulus(&self) -> i64 {
        2
    }
}

use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};
use core::str::FromStr;

use tracing::trace;

use crate::algebra::ring::{CoefficientRing, Integers};
use crate::error::{FormatError, PolyError};
use crate::structures::format::{
    exponents_to_coefficients, reformat, remove_leading_zeros, PolyInput, Representation,
};

/// Quotient and remainder of a polynomial division.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Division<P> {
    pub quotient: P,
    pub remainder: P,
}

/// Polynomial with integer coefficients.
///
/// Coefficients are stored highest degree first:
/// `coefficients()[0]` is the leading coefficient and the last entry is
/// the constant term. The zero polynomial is `[0]`.
///
/// Values are immutable; every operation returns a new polynomial.
/// Coefficient arithmetic is checked `i64`: an operation whose result does
/// not fit fails with [`PolyError::Overflow`].
///
/// # Panics
///
/// The `+`, `-`, `*` and unary `-` operators panic on coefficient
/// overflow, like the primitive integer operators in debug builds. The
/// inherent methods return the error instead.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Polynomial {
    repr: Representation,
}

impl Polynomial {
    /// Build a polynomial from any accepted input.
    ///
    /// # Example
    ///
    /// ```
    /// use polyfield::format::{PolyFormat, PolyInput};
    /// use polyfield::Polynomial;
    ///
    /// let p = Polynomial::new("8x^4 + 32x - 12").unwrap();
    /// assert_eq!(p.coefficients(), &[8, 0, 0, 32, -12]);
    ///
    /// let q = Polynomial::new(PolyInput::numeric(vec![8, 4, 0, 0], Some(PolyFormat::Exponents))).unwrap();
    /// assert_eq!(q.as_str(), "x^8 + x^4 + 2");
    /// ```
    pub fn new(input: impl Into<PolyInput>) -> Result<Self, FormatError> {
        Ok(Self {
            repr: reformat(input.into())?,
        })
    }

    /// Parse infix notation.
    pub fn parse(s: &str) -> Result<Self, FormatError> {
        Self::new(s)
    }

    /// Create a polynomial from coefficients, highest degree first.
    ///
    /// Leading zeros are removed and an empty vector is the zero polynomial.
    pub fn from_coefficients(coefficients: Vec<i64>) -> Result<Self, FormatError> {
        Ok(Self {
            repr: Representation::from_coefficients(&coefficients)?,
        })
    }

    /// Create a polynomial from a signed exponent multiset.
    pub fn from_exponents(exponents: Vec<i64>) -> Result<Self, FormatError> {
        let coefficients = exponents_to_coefficients(&exponents)?;
        Ok(Self::from_normalized(coefficients))
    }

    /// The zero polynomial.
    pub fn zero() -> Self {
        Self::from_normalized(vec![0])
    }

    /// The constant polynomial 1.
    pub fn one() -> Self {
        Self::from_normalized(vec![1])
    }

    /// Strip leading zeros without checking the degree ceiling.
    pub(crate) fn from_raw(coefficients: Vec<i64>) -> Self {
        Self::from_normalized(remove_leading_zeros(&coefficients))
    }

    fn from_normalized(coefficients: Vec<i64>) -> Self {
        Self {
            repr: Representation::from_normalized(coefficients),
        }
    }

    /// String view.
    pub fn as_str(&self) -> &str {
        self.repr.as_str()
    }

    /// Coefficient view, highest degree first.
    pub fn coefficients(&self) -> &[i64] {
        self.repr.coefficients()
    }

    /// Signed exponent multiset view.
    ///
    /// `None` when the polynomial has a negative constant term.
    pub fn exponents(&self) -> Option<&[i64]> {
        self.repr.exponents()
    }

    /// All three views.
    pub fn representation(&self) -> &Representation {
        &self.repr
    }

    /// Degree, taken as the coefficient vector length minus one.
    ///
    /// The zero polynomial has degree 0.
    pub fn degree(&self) -> usize {
        self.coefficients().len() - 1
    }

    pub fn leading_coefficient(&self) -> i64 {
        self.coefficients()[0]
    }

    /// Check whether every coefficient is zero.
    pub fn is_all_zero(&self) -> bool {
        self.coefficients().iter().all(|&c| c == 0)
    }

    /// Evaluate at `x` using Horner's method.
    ///
    /// # Example
    ///
    /// ```
    /// use polyfield::Polynomial;
    ///
    /// let p = Polynomial::parse("3x^2 + 2x + 1").unwrap();
    /// assert_eq!(p.evaluate(2), Ok(17));
    /// ```
    pub fn evaluate(&self, x: i64) -> Result<i64, PolyError> {
        self.coefficients().iter().try_fold(0i64, |acc, &c| {
            acc.checked_mul(x)
                .and_then(|v| v.checked_add(c))
                .ok_or(PolyError::Overflow)
        })
    }

    /// Sum of two polynomials.
    ///
    /// # Example
    ///
    /// ```
    /// use polyfield::Polynomial;
    ///
    /// let a = Polynomial::parse("8x^4 + 32x - 12").unwrap();
    /// let b = Polynomial::parse("- x^5 - 16x + 6").unwrap();
    /// assert_eq!(a.add(&b).unwrap().coefficients(), &[-1, 8, 0, 0, 16, -6]);
    /// ```
    ///
    /// # Errors
    ///
    /// [`PolyError::Overflow`] if a coefficient sum leaves `i64`.
    pub fn add(&self, other: &Self) -> Result<Self, PolyError> {
        align_with(self.coefficients(), other.coefficients(), i64::checked_add).map(Self::from_raw)
    }

    /// Difference `self - other`.
    pub fn sub(&self, other: &Self) -> Result<Self, PolyError> {
        align_with(self.coefficients(), other.coefficients(), i64::checked_sub).map(Self::from_raw)
    }

    /// Additive inverse.
    pub fn negate(&self) -> Result<Self, PolyError> {
        self.coefficients()
            .iter()
            .map(|&c| c.checked_neg().ok_or(PolyError::Overflow))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::from_normalized)
    }

    /// Product by full convolution.
    ///
    /// ```
    /// use polyfield::{PolyError, Polynomial};
    ///
    /// let big = Polynomial::from_coefficients(vec![i64::MAX, 1]).unwrap();
    /// let two = Polynomial::from_coefficients(vec![2]).unwrap();
    /// assert_eq!(big.multiply(&two), Err(PolyError::Overflow));
    /// ```
    pub fn multiply(&self, other: &Self) -> Result<Self, PolyError> {
        let a = self.coefficients();
        let b = other.coefficients();
        let mut coefficients = vec![0i64; a.len() + b.len() - 1];

        for (i, &ai) in a.iter().enumerate() {
            for (j, &bj) in b.iter().enumerate() {
                let term = ai.checked_mul(bj).ok_or(PolyError::Overflow)?;
                let slot = &mut coefficients[i + j];
                *slot = slot.checked_add(term).ok_or(PolyError::Overflow)?;
            }
        }

        Ok(Self::from_raw(coefficients))
    }

    /// Coefficients reduced into `[0, |modulus|)`; unchanged for modulus 0.
    pub fn reduce(&self, modulus: i64) -> Self {
        let ring = Integers::new(modulus);
        Self::from_raw(self.coefficients().iter().map(|&c| ring.reduce(c)).collect())
    }

    /// Schoolbook long division, optionally modulo `modulus`.
    ///
    /// With a non-zero modulus every subtraction is reduced on the spot and
    /// quotient digits use the inverse of the divisor's leading
    /// coefficient. With modulus 0 the arithmetic is exact.
    ///
    /// # Errors
    ///
    /// - [`PolyError::DivisionByZero`] for a zero divisor.
    /// - [`PolyError::DivisorLeadingZero`] if the divisor's leading
    ///   coefficient vanishes modulo `modulus`.
    /// - [`PolyError::DivisorDegreeTooLarge`] if a non-zero dividend has
    ///   lower degree than the divisor.
    /// - [`PolyError::InexactDivision`] / [`PolyError::NotInvertible`] when
    ///   a quotient digit does not exist.
    ///
    /// # Example
    ///
    /// ```
    /// use polyfield::Polynomial;
    ///
    /// let a = Polynomial::parse("32x^6 + 64x^4 - 24x^2").unwrap();
    /// let b = Polynomial::parse("8x^2").unwrap();
    /// let d = a.divide(&b, 0).unwrap();
    ///
    /// assert_eq!(d.quotient.coefficients(), &[4, 0, 8, 0, -3]);
    /// assert!(d.remainder.is_all_zero());
    /// ```
    pub fn divide(&self, divisor: &Self, modulus: i64) -> Result<Division<Self>, PolyError> {
        self.divide_over(divisor, &Integers::new(modulus))
    }

    /// Long division with coefficient arithmetic supplied by `ring`.
    pub fn divide_over<R: CoefficientRing>(
        &self,
        divisor: &Self,
        ring: &R,
    ) -> Result<Division<Self>, PolyError> {
        if divisor.is_all_zero() {
            return Err(PolyError::DivisionByZero);
        }
        let normalizer = ring.reduce(divisor.leading_coefficient());
        if normalizer == 0 {
            return Err(PolyError::DivisorLeadingZero {
                leading: divisor.leading_coefficient(),
                modulus: ring.modulus(),
            });
        }
        if self.is_all_zero() {
            return Ok(Division {
                quotient: Self::zero(),
                remainder: Self::zero(),
            });
        }
        if divisor.degree() > self.degree() {
            return Err(PolyError::DivisorDegreeTooLarge {
                divisor: divisor.degree(),
                dividend: self.degree(),
            });
        }

        let divisor_coeffs: Vec<i64> = divisor
            .coefficients()
            .iter()
            .map(|&c| ring.reduce(c))
            .collect();
        let mut output: Vec<i64> = self
            .coefficients()
            .iter()
            .map(|&c| ring.reduce(c))
            .collect();
        let steps = output.len() - divisor_coeffs.len() + 1;

        for i in 0..steps {
            let digit = ring.quotient_digit(output[i], normalizer)?;
            output[i] = digit;
            if digit == 0 {
                continue;
            }
            for (j, &d) in divisor_coeffs.iter().enumerate().skip(1) {
                output[i + j] = ring.mul_sub(output[i + j], digit, d)?;
            }
        }

        let remainder = output.split_off(steps);
        Ok(Division {
            quotient: Self::from_raw(output),
            remainder: Self::from_raw(remainder),
        })
    }

    /// Remainder of [`divide`](Self::divide).
    pub fn rem(&self, divisor: &Self, modulus: i64) -> Result<Self, PolyError> {
        self.divide(divisor, modulus).map(|d| d.remainder)
    }

    /// Formal derivative.
    ///
    /// # Example
    ///
    /// ```
    /// use polyfield::Polynomial;
    ///
    /// let p = Polynomial::parse("8x^4 + 32x - 12").unwrap();
    /// assert_eq!(p.derivative().unwrap().coefficients(), &[32, 0, 0, 32]);
    /// ```
    pub fn derivative(&self) -> Result<Self, PolyError> {
        let c = self.coefficients();
        let degree = c.len() - 1;
        c[..degree]
            .iter()
            .enumerate()
            .map(|(i, &ci)| {
                i64::try_from(degree - i)
                    .ok()
                    .and_then(|power| ci.checked_mul(power))
                    .ok_or(PolyError::Overflow)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::from_raw)
    }

    /// Greatest common divisor by the Euclidean algorithm.
    ///
    /// The result is whatever the last non-zero remainder is: it is not
    /// made monic. With a non-zero `modulus` both inputs are reduced first
    /// and every division runs modulo `modulus`.
    ///
    /// With `modulus == 0` every step is an exact division in `Z[x]`, so
    /// the remainder chain only exists when each leading coefficient
    /// divides the next. That is rare for inputs that are not monic, and
    /// `gcd(x^2 + 1, 2x)` already fails. Pass a prime modulus to compute
    /// the gcd over `Z/p` instead.
    ///
    /// # Errors
    ///
    /// Propagates division errors, e.g. [`PolyError::InexactDivision`] when
    /// a remainder sequence over the integers leaves `Z[x]`.
    ///
    /// ```
    /// use polyfield::{PolyError, Polynomial};
    ///
    /// let a = Polynomial::parse("x^2 + 1").unwrap();
    /// let b = Polynomial::parse("2x").unwrap();
    /// assert!(matches!(a.gcd(&b, 0), Err(PolyError::InexactDivision { .. })));
    /// assert_eq!(a.gcd(&b, 5).unwrap().degree(), 0);
    /// ```
    ///
    /// # Example
    ///
    /// ```
    /// use polyfield::Polynomial;
    ///
    /// let a = Polynomial::parse("32x^6 + 64x^4 - 24x^2").unwrap();
    /// let b = Polynomial::parse("4x^4 + 8x^2 - 3").unwrap();
    /// assert_eq!(a.gcd(&b, 0).unwrap(), b);
    /// ```
    pub fn gcd(&self, other: &Self, modulus: i64) -> Result<Self, PolyError> {
        let (a, b) = (self.reduce(modulus), other.reduce(modulus));
        let (mut p, mut q) = if a.degree() >= b.degree() { (a, b) } else { (b, a) };

        while !q.is_all_zero() {
            let remainder = p.rem(&q, modulus)?;
            trace!(degree = q.degree(), remainder = %remainder, "euclid step");
            p = q;
            q = remainder;
        }

        Ok(p)
    }
}

/// Combine two coefficient vectors aligned at their constant terms.
fn align_with(
    a: &[i64],
    b: &[i64],
    f: impl Fn(i64, i64) -> Option<i64>,
) -> Result<Vec<i64>, PolyError> {
    let len = a.len().max(b.len());
    let at = |v: &[i64], i: usize| if i < v.len() { v[v.len() - 1 - i] } else { 0 };

    let mut out = vec![0i64; len];
    for i in 0..len {
        out[len - 1 - i] = f(at(a, i), at(b, i)).ok_or(PolyError::Overflow)?;
    }
    Ok(out)
}

/// Unwrap an operator result, panicking the way primitive integer
/// arithmetic does on overflow.
fn or_overflow_panic(result: Result<Polynomial, PolyError>, op: &str) -> Polynomial {
    match result {
        Ok(p) => p,
        Err(e) => panic!("attempt to {op} polynomials: {e}"),
    }
}

impl FromStr for Polynomial {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Polynomial> for PolyInput {
    fn from(p: Polynomial) -> Self {
        PolyInput::Existing(p.repr)
    }
}

/* ---- Arithmetic operators ---- */

impl Add for Polynomial {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        or_overflow_panic(Polynomial::add(&self, &rhs), "add")
    }
}

impl Add<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Self::Output {
        or_overflow_panic(Polynomial::add(self, rhs), "add")
    }
}

impl Sub for Polynomial {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        or_overflow_panic(Polynomial::sub(&self, &rhs), "subtract")
    }
}

impl Sub<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Self::Output {
        or_overflow_panic(Polynomial::sub(self, rhs), "subtract")
    }
}

impl Mul for Polynomial {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        or_overflow_panic(self.multiply(&rhs), "multiply")
    }
}

impl Mul<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Self::Output {
        or_overflow_panic(self.multiply(rhs), "multiply")
    }
}

impl Neg for Polynomial {
    type Output = Self;

    fn neg(self) -> Self::Output {
        or_overflow_panic(self.negate(), "negate")
    }
}

impl fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Polynomial {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Serialize as the coefficient vector
        serde::Serialize::serialize(self.coefficients(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Polynomial {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let coefficients = <Vec<i64> as serde::Deserialize>::deserialize(deserializer)?;
        Self::from_coefficients(coefficients).map_err(serde::de::Error::custom)
    }
}

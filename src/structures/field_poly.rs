//! Polynomials over GF(2).
//!
//! A [`FieldPolynomial`] stores the set of degrees whose coefficient is 1,
//! highest first. Addition is a symmetric difference, multiplication is
//! carryless and long division toggles shifted copies of the divisor's
//! exponent set. On top of those sit Rabin's irreducibility test and a
//! primitivity test, the two checks behind maximal-length LFSR taps.

use alloc::collections::BTreeSet;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Add, Mul, Sub};
use core::str::FromStr;
use std::sync::OnceLock;

use tracing::{debug, trace};

use crate::error::{FormatError, PolyError};
use crate::structures::bits::PackedBits;
use crate::structures::exponents::{normalize, symmetric_difference, toggle_shifted};
use crate::structures::format::{
    coefficients_to_string, reformat, remove_leading_zeros, string_to_coefficients, PolyInput,
    Representation, MAX_DEGREE,
};
use crate::structures::poly::{Division, Polynomial};
use crate::utils::{array_gcd, prime_divisors};

/// Largest degree [`FieldPolynomial::is_primitive`] accepts.
///
/// The multiplicative group order `2^n - 1` is computed in `u64`.
pub const PRIMITIVE_MAX_DEGREE: usize = 63;

/// A polynomial over GF(2).
///
/// The exponent set is authoritative. The coefficient and string views are
/// derived on first access and cached.
///
/// # Example
///
/// ```
/// use polyfield::FieldPolynomial;
///
/// let f: FieldPolynomial = "x^4 + x + 1".parse().unwrap();
/// assert_eq!(f.exponents(), &[4, 1, 0]);
/// assert_eq!(f.coefficients(), &[1, 0, 0, 1, 1]);
/// assert!(f.is_irreducible());
/// assert_eq!(f.is_primitive(), Ok(true));
/// ```
#[derive(Clone)]
pub struct FieldPolynomial {
    exponents: Vec<usize>,
    coefficients: OnceLock<Vec<i64>>,
    string: OnceLock<String>,
}

impl FieldPolynomial {
    /// Build from any accepted input.
    ///
    /// Text and tagged exponent arrays are read with GF(2) arithmetic:
    /// repeated degrees cancel in pairs and text coefficients are taken
    /// modulo 2, so `"x^2 + x^2 + 1"` and `[2, 2, 0]` both give `1`.
    /// Coefficient arrays are not reduced and must already be in `{0, 1}`.
    ///
    /// ```
    /// use polyfield::FieldPolynomial;
    ///
    /// let f = FieldPolynomial::new("x^3 + x^2 + x^2 + 3x + 1").unwrap();
    /// assert_eq!(f.as_str(), "x^3 + x + 1");
    /// ```
    pub fn new(input: impl Into<PolyInput>) -> Result<Self, FormatError> {
        match input.into() {
            PolyInput::Exponents(values) => {
                let exponents = values
                    .into_iter()
                    .map(|value| {
                        usize::try_from(value).map_err(|_| FormatError::NegativeExponent { value })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Self::from_exponents(exponents)
            }
            PolyInput::Text(s) => {
                let reduced = string_to_coefficients(&s)?
                    .into_iter()
                    .map(|c| c.rem_euclid(2))
                    .collect();
                Self::from_coefficients(reduced)
            }
            other => Self::from_coefficients(reformat(other)?.coefficients().to_vec()),
        }
    }

    pub fn parse(s: &str) -> Result<Self, FormatError> {
        Self::new(s)
    }

    /// Build from coefficients, highest degree first.
    ///
    /// # Errors
    ///
    /// [`FormatError::NonBinaryCoefficient`] for any entry outside `{0, 1}`.
    pub fn from_coefficients(coefficients: Vec<i64>) -> Result<Self, FormatError> {
        if let Some(&value) = coefficients.iter().find(|&&c| c != 0 && c != 1) {
            return Err(FormatError::NonBinaryCoefficient { value });
        }
        let coefficients = remove_leading_zeros(&coefficients);
        let degree = coefficients.len() - 1;
        check_ceiling(degree)?;

        let exponents = coefficients
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == 1)
            .map(|(i, _)| degree - i)
            .collect();

        Ok(Self {
            exponents,
            coefficients: OnceLock::from(coefficients),
            string: OnceLock::new(),
        })
    }

    /// Build from exponents in any order. Repeated exponents cancel in pairs.
    ///
    /// ```
    /// use polyfield::FieldPolynomial;
    ///
    /// let f = FieldPolynomial::from_exponents(vec![0, 3, 1, 3, 3]).unwrap();
    /// assert_eq!(f.as_str(), "x^3 + x + 1");
    /// ```
    pub fn from_exponents(exponents: Vec<usize>) -> Result<Self, FormatError> {
        if let Some(&top) = exponents.iter().max() {
            check_ceiling(top)?;
        }
        Ok(Self::from_sorted(normalize(exponents)))
    }

    /// Fast path: take an exponent set that is already strictly descending.
    ///
    /// Nothing is sorted or derived up front.
    pub fn from_exponent_set(exponents: Vec<usize>) -> Result<Self, FormatError> {
        if exponents.windows(2).any(|w| w[0] <= w[1]) {
            return Err(FormatError::InvalidShape {
                values: exponents.iter().map(|&e| e as i64).collect(),
            });
        }
        if let Some(&top) = exponents.first() {
            check_ceiling(top)?;
        }
        Ok(Self::from_sorted(exponents))
    }

    /// Reinterpret an integer polynomial whose coefficients are all 0 or 1.
    pub fn from_polynomial(poly: &Polynomial) -> Result<Self, FormatError> {
        Self::from_coefficients(poly.coefficients().to_vec())
    }

    /// The same polynomial with integer coefficients.
    pub fn to_polynomial(&self) -> Polynomial {
        Polynomial::from_raw(self.coefficients().to_vec())
    }

    pub fn zero() -> Self {
        Self::from_sorted(Vec::new())
    }

    pub fn one() -> Self {
        Self::monomial(0)
    }

    pub fn x() -> Self {
        Self::monomial(1)
    }

    /// `x^n`.
    pub fn monomial(n: usize) -> Self {
        Self::from_sorted(vec![n])
    }

    fn from_sorted(exponents: Vec<usize>) -> Self {
        Self {
            exponents,
            coefficients: OnceLock::new(),
            string: OnceLock::new(),
        }
    }

    /// Degrees with coefficient 1, highest first.
    pub fn exponents(&self) -> &[usize] {
        &self.exponents
    }

    pub fn coefficients(&self) -> &[i64] {
        self.coefficients.get_or_init(|| match self.degree() {
            None => vec![0],
            Some(degree) => {
                let mut coefficients = vec![0i64; degree + 1];
                for &e in &self.exponents {
                    coefficients[degree - e] = 1;
                }
                coefficients
            }
        })
    }

    pub fn as_str(&self) -> &str {
        self.string
            .get_or_init(|| coefficients_to_string(self.coefficients()))
    }

    /// Degree, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.exponents.first().copied()
    }

    pub fn is_zero(&self) -> bool {
        self.exponents.is_empty()
    }

    /// Same as [`is_zero`](Self::is_zero).
    pub fn is_all_zero(&self) -> bool {
        self.is_zero()
    }

    fn packed(&self) -> PackedBits {
        PackedBits::from_exponents(&self.exponents)
    }

    fn from_packed(bits: &PackedBits) -> Self {
        Self::from_sorted(bits.to_exponents())
    }

    /// Sum over GF(2), computed as a packed XOR.
    pub fn add_gf(&self, other: &Self) -> Self {
        Self::from_packed(&self.packed().xor(&other.packed()))
    }

    /// Difference over GF(2). Identical to [`add_gf`](Self::add_gf).
    pub fn sub_gf(&self, other: &Self) -> Self {
        self.add_gf(other)
    }

    /// Carryless product.
    ///
    /// ```
    /// use polyfield::FieldPolynomial;
    ///
    /// let a = FieldPolynomial::parse("x^4 + x^3 + x^2 + x + 1").unwrap();
    /// let b = FieldPolynomial::parse("x^3 + x + 1").unwrap();
    /// assert_eq!(a.multiply_gf(&b).coefficients(), &[1, 1, 0, 1, 1, 0, 0, 1]);
    /// ```
    pub fn multiply_gf(&self, other: &Self) -> Self {
        Self::from_packed(&self.packed().clmul(&other.packed()))
    }

    /// Long division over GF(2).
    ///
    /// Each step takes the highest remaining degree, records
    /// `deg(rem) - deg(divisor)` in the quotient and toggles the divisor's
    /// exponents shifted by that amount.
    ///
    /// # Errors
    ///
    /// [`PolyError::DivisionByZero`] for a zero divisor and
    /// [`PolyError::DivisorDegreeTooLarge`] for a non-zero dividend of
    /// lower degree. A zero dividend gives zero quotient and remainder.
    pub fn divide_gf(&self, divisor: &Self) -> Result<Division<Self>, PolyError> {
        let Some(divisor_degree) = divisor.degree() else {
            return Err(PolyError::DivisionByZero);
        };
        if let Some(degree) = self.degree() {
            if divisor_degree > degree {
                return Err(PolyError::DivisorDegreeTooLarge {
                    divisor: divisor_degree,
                    dividend: degree,
                });
            }
        }

        let (quotient, remainder) = long_divide(&self.exponents, &divisor.exponents);
        Ok(Division {
            quotient: Self::from_sorted(quotient),
            remainder: Self::from_sorted(remainder),
        })
    }

    /// `self mod divisor`. A dividend of lower degree is its own remainder.
    pub fn rem_gf(&self, divisor: &Self) -> Result<Self, PolyError> {
        if divisor.is_zero() {
            return Err(PolyError::DivisionByZero);
        }
        Ok(Self::from_sorted(long_divide(&self.exponents, &divisor.exponents).1))
    }

    /// Greatest common divisor by the Euclidean algorithm.
    ///
    /// Over GF(2) the only unit is 1, so coprime inputs give exactly
    /// [`one`](Self::one).
    pub fn gcd_gf(&self, other: &Self) -> Self {
        let mut p = self.exponents.clone();
        let mut q = other.exponents.clone();

        while !q.is_empty() {
            let (_, remainder) = long_divide(&p, &q);
            trace!(degree = q[0], remainder = ?remainder, "gf2 euclid step");
            p = q;
            q = remainder;
        }

        Self::from_sorted(p)
    }

    /// `x^exp mod self`, by square-and-multiply.
    ///
    /// Squaring over GF(2) doubles every exponent and multiplying by `x`
    /// adds one, so no general product is needed.
    ///
    /// ```
    /// use polyfield::FieldPolynomial;
    ///
    /// let f = FieldPolynomial::parse("x^3 + x + 1").unwrap();
    /// assert_eq!(f.pow_x_mod(5).unwrap().as_str(), "x^2 + x + 1");
    /// assert_eq!(f.pow_x_mod(7).unwrap(), FieldPolynomial::one());
    /// ```
    pub fn pow_x_mod(&self, exp: u64) -> Result<Self, PolyError> {
        if self.is_zero() {
            return Err(PolyError::DivisionByZero);
        }

        let mut result = self.reduce(vec![0]);
        for bit in (0..u64::BITS - exp.leading_zeros()).rev() {
            result = self.reduce(result.iter().map(|&e| e * 2).collect());
            if exp >> bit & 1 == 1 {
                result = self.reduce(result.iter().map(|&e| e + 1).collect());
            }
        }

        Ok(Self::from_sorted(result))
    }

    /// Reduce a descending exponent set modulo `self`.
    fn reduce(&self, exponents: Vec<usize>) -> Vec<usize> {
        match (exponents.first(), self.degree()) {
            (Some(&top), Some(degree)) if top >= degree => {
                long_divide(&exponents, &self.exponents).1
            }
            _ => exponents,
        }
    }

    /// Rabin's irreducibility test.
    ///
    /// A polynomial `f` of degree `n` is irreducible over GF(2) if and only if
    /// 1. `x^(2^n) ≡ x (mod f)`
    /// 2. `gcd(f, x^(2^(n/q)) + x) = 1` for every prime `q` dividing `n`
    ///
    /// `x^(2^i)` is built by squaring `i` times, so the exponent never
    /// leaves the range of the divisor. Zero and constants are not
    /// irreducible; every linear polynomial is.
    ///
    /// ```
    /// use polyfield::FieldPolynomial;
    ///
    /// assert!(FieldPolynomial::parse("x^3 + x + 1").unwrap().is_irreducible());
    /// // (x^2 + x + 1)^2
    /// assert!(!FieldPolynomial::parse("x^4 + x^2 + 1").unwrap().is_irreducible());
    /// ```
    pub fn is_irreducible(&self) -> bool {
        let n = match self.degree() {
            None | Some(0) => return false,
            Some(1) => return true,
            Some(d) => d,
        };

        let checkpoints: Vec<usize> = prime_divisors(n as u64)
            .into_iter()
            .map(|q| n / q as usize)
            .collect();

        let mut h = vec![1usize];
        for i in 1..=n {
            h = self.reduce(h.iter().map(|&e| e * 2).collect());

            if checkpoints.contains(&i) {
                let h_plus_x = Self::from_sorted(symmetric_difference(&h, &[1]));
                if self.gcd_gf(&h_plus_x) != Self::one() {
                    debug!(degree = n, step = i, "reducible: shares a factor with x^(2^i) + x");
                    return false;
                }
            }
        }

        let irreducible = h == [1];
        if !irreducible {
            debug!(degree = n, "reducible: x^(2^n) is not x modulo f");
        }
        irreducible
    }

    /// Check whether `x` generates the multiplicative group of
    /// `GF(2)[x]/(f)`, i.e. has order exactly `2^n - 1`.
    ///
    /// Requires `x^(2^n - 1) ≡ 1` and, for every prime `d` dividing
    /// `2^n - 1`, `x^d ≢ 1` (when `d` is a proper divisor) and
    /// `x^((2^n - 1)/d) ≢ 1`. An element of that order only exists when
    /// `f` is irreducible, so no separate irreducibility test is run.
    ///
    /// # Errors
    ///
    /// [`PolyError::DegreeTooLarge`] above [`PRIMITIVE_MAX_DEGREE`].
    ///
    /// ```
    /// use polyfield::FieldPolynomial;
    ///
    /// // Irreducible, but x has order 9 instead of 63
    /// let f = FieldPolynomial::parse("x^6 + x^3 + 1").unwrap();
    /// assert!(f.is_irreducible());
    /// assert_eq!(f.is_primitive(), Ok(false));
    /// ```
    pub fn is_primitive(&self) -> Result<bool, PolyError> {
        let n = match self.degree() {
            None | Some(0) => return Ok(false),
            Some(d) if d > PRIMITIVE_MAX_DEGREE => {
                return Err(PolyError::DegreeTooLarge {
                    degree: d,
                    max: PRIMITIVE_MAX_DEGREE,
                })
            }
            Some(d) => d,
        };

        let order = (1u64 << n) - 1;
        self.x_has_order(order, &prime_divisors(order))
    }

    /// Check that `x` has multiplicative order exactly `order` modulo
    /// `self`, given the distinct primes dividing `order`.
    fn x_has_order(&self, order: u64, primes: &[u64]) -> Result<bool, PolyError> {
        let one = Self::one();

        for &d in primes {
            if d < order && self.pow_x_mod(d)? == one {
                debug!(order, prime = d, "not primitive: x has prime order");
                return Ok(false);
            }
            if self.pow_x_mod(order / d)? == one {
                debug!(order, cofactor = d, "not primitive: order of x is a proper divisor");
                return Ok(false);
            }
        }

        let primitive = self.pow_x_mod(order)? == one;
        if !primitive {
            debug!(order, "not primitive: x^(2^n - 1) is not 1");
        }
        Ok(primitive)
    }

    /// Check whether the gcd of all exponents is 1.
    ///
    /// ```
    /// use polyfield::FieldPolynomial;
    ///
    /// assert!(FieldPolynomial::from_exponents(vec![4, 3, 2, 1, 0]).unwrap().is_setwise_coprime());
    /// assert!(!FieldPolynomial::from_exponents(vec![6, 4, 2]).unwrap().is_setwise_coprime());
    /// ```
    pub fn is_setwise_coprime(&self) -> bool {
        let exponents: Vec<i64> = self.exponents.iter().map(|&e| e as i64).collect();
        array_gcd(&exponents) == 1
    }

    /// Formal derivative. Even powers vanish since `2 = 0`.
    pub fn derivative(&self) -> Self {
        Self::from_sorted(
            self.exponents
                .iter()
                .filter(|&&e| e % 2 == 1)
                .map(|&e| e - 1)
                .collect(),
        )
    }

    /// Generate a random irreducible polynomial of the given degree.
    ///
    /// Uses rejection sampling over polynomials with the leading term
    /// fixed.
    ///
    /// # Panics
    ///
    /// Panics if degree is 0.
    #[cfg(feature = "rand")]
    pub fn random_irreducible<R: rand::Rng>(rng: &mut R, degree: usize) -> Self {
        assert!(degree > 0, "degree must be positive");

        loop {
            let f = Self::random_with_degree(rng, degree);
            if f.is_irreducible() {
                return f;
            }
        }
    }

    /// Generate a random primitive polynomial of the given degree.
    ///
    /// The group order `2^degree - 1` is factored once and reused for every
    /// candidate.
    ///
    /// # Panics
    ///
    /// Panics if degree is 0 or above [`PRIMITIVE_MAX_DEGREE`].
    #[cfg(feature = "rand")]
    pub fn random_primitive<R: rand::Rng>(rng: &mut R, degree: usize) -> Self {
        assert!(degree > 0, "degree must be positive");
        assert!(
            degree <= PRIMITIVE_MAX_DEGREE,
            "degree must be at most {}",
            PRIMITIVE_MAX_DEGREE
        );

        let order = (1u64 << degree) - 1;
        let primes = prime_divisors(order);
        loop {
            let f = Self::random_with_degree(rng, degree);
            if f.x_has_order(order, &primes) == Ok(true) {
                return f;
            }
        }
    }

    #[cfg(feature = "rand")]
    fn random_with_degree<R: rand::Rng>(rng: &mut R, degree: usize) -> Self {
        let mut exponents = vec![degree];
        exponents.extend((0..degree).rev().filter(|_| rng.gen::<bool>()));
        Self::from_sorted(exponents)
    }
}

/// Sparse GF(2) long division on descending exponent sets.
///
/// Returns `(quotient, remainder)`, both descending. An empty divisor
/// leaves the dividend untouched.
fn long_divide(dividend: &[usize], divisor: &[usize]) -> (Vec<usize>, Vec<usize>) {
    let Some(&divisor_degree) = divisor.first() else {
        return (Vec::new(), dividend.to_vec());
    };

    let mut remainder: BTreeSet<usize> = dividend.iter().copied().collect();
    let mut quotient = Vec::new();

    while let Some(&top) = remainder.last() {
        if top < divisor_degree {
            break;
        }
        let shift = top - divisor_degree;
        quotient.push(shift);
        toggle_shifted(&mut remainder, divisor, shift);
    }

    (quotient, remainder.into_iter().rev().collect())
}

fn check_ceiling(degree: usize) -> Result<(), FormatError> {
    if degree > MAX_DEGREE {
        return Err(FormatError::DegreeTooLarge {
            degree: degree as u64,
            max: MAX_DEGREE,
        });
    }
    Ok(())
}

impl PartialEq for FieldPolynomial {
    fn eq(&self, other: &Self) -> bool {
        self.exponents == other.exponents
    }
}

impl Eq for FieldPolynomial {}

impl Hash for FieldPolynomial {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.exponents.hash(state);
    }
}

impl FromStr for FieldPolynomial {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<FieldPolynomial> for PolyInput {
    fn from(p: FieldPolynomial) -> Self {
        PolyInput::Existing(Representation::from_normalized(p.coefficients().to_vec()))
    }
}

impl Add<&FieldPolynomial> for &FieldPolynomial {
    type Output = FieldPolynomial;

    fn add(self, rhs: &FieldPolynomial) -> Self::Output {
        self.add_gf(rhs)
    }
}

impl Sub<&FieldPolynomial> for &FieldPolynomial {
    type Output = FieldPolynomial;

    fn sub(self, rhs: &FieldPolynomial) -> Self::Output {
        self.sub_gf(rhs)
    }
}

impl Mul<&FieldPolynomial> for &FieldPolynomial {
    type Output = FieldPolynomial;

    fn mul(self, rhs: &FieldPolynomial) -> Self::Output {
        self.multiply_gf(rhs)
    }
}

impl fmt::Debug for FieldPolynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (mod 2)", self.as_str())
    }
}

impl fmt::Display for FieldPolynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for FieldPolynomial {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Serialize as the exponent set
        serde::Serialize::serialize(&self.exponents, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for FieldPolynomial {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let exponents = <Vec<usize> as serde::Deserialize>::deserialize(deserializer)?;
        Self::from_exponents(exponents).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::format::PolyFormat;

    fn gf(s: &str) -> FieldPolynomial {
        FieldPolynomial::parse(s).unwrap()
    }

    const PRIMITIVE: &[&str] = &[
        "x^3 + x + 1",
        "x^3 + x^2 + 1",
        "x^4 + x + 1",
        "x^4 + x^3 + 1",
        "x^5 + x^2 + 1",
        "x^7 + x^6 + 1",
        "x^8 + x^4 + x^3 + x^2 + 1",
        "x^10 + x^3 + 1",
        "x^13 + x^4 + x^3 + x + 1",
        "x^16 + x^15 + x^13 + x^4 + 1",
    ];

    const IRREDUCIBLE_NOT_PRIMITIVE: &[&str] = &[
        "x^4 + x^3 + x^2 + x + 1",
        "x^6 + x^3 + 1",
        "x^8 + x^4 + x^3 + x + 1",
    ];

    const REDUCIBLE: &[&str] = &[
        "x^2 + 1",
        "x^4 + x^2 + 1",
        "x^4 + x^3 + x + 1",
        "x^4 + x^2 + x + 1",
        "x^5 + x^3 + x + 1",
    ];

    // ---- construction ----

    #[test]
    fn parse_builds_all_views() {
        let f = gf("x^9 + x^8 + x^7 + x^5 + x^4 + x + 1");
        assert_eq!(f.exponents(), &[9, 8, 7, 5, 4, 1, 0]);
        assert_eq!(f.coefficients(), &[1, 1, 1, 0, 1, 1, 0, 0, 1, 1]);
        assert_eq!(f.as_str(), "x^9 + x^8 + x^7 + x^5 + x^4 + x + 1");
        assert_eq!(f.degree(), Some(9));
    }

    #[test]
    fn zero_and_one() {
        let z = FieldPolynomial::zero();
        assert!(z.is_zero());
        assert!(z.is_all_zero());
        assert_eq!(z.degree(), None);
        assert_eq!(z.coefficients(), &[0]);
        assert_eq!(z.as_str(), "0");

        let one = FieldPolynomial::one();
        assert_eq!(one.exponents(), &[0]);
        assert_eq!(one.as_str(), "1");
        assert_eq!(FieldPolynomial::x().as_str(), "x");
        assert_eq!(FieldPolynomial::monomial(5).coefficients(), &[1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn rejects_non_binary_coefficients() {
        assert_eq!(
            FieldPolynomial::from_coefficients(vec![1, -1]),
            Err(FormatError::NonBinaryCoefficient { value: -1 })
        );
        assert_eq!(
            FieldPolynomial::new(PolyInput::Coefficients(vec![2, 1])),
            Err(FormatError::NonBinaryCoefficient { value: 2 })
        );
    }

    #[test]
    fn text_input_reduces_modulo_two() {
        assert_eq!(gf("x^2 + x^2 + 1"), FieldPolynomial::one());
        assert_eq!(
            gf("x^2 + x^2 + 1"),
            FieldPolynomial::from_exponents(vec![2, 2, 0]).unwrap()
        );
        assert_eq!(gf("2x + 1"), FieldPolynomial::one());
        assert_eq!(gf("-x^3 + 3x + 1").as_str(), "x^3 + x + 1");
        assert!(gf("x^4 + x^4").is_zero());
    }

    #[test]
    fn from_coefficients_strips_leading_zeros() {
        let f = FieldPolynomial::from_coefficients(vec![0, 0, 1, 0, 1]).unwrap();
        assert_eq!(f.exponents(), &[2, 0]);
        assert_eq!(f.coefficients(), &[1, 0, 1]);
    }

    #[test]
    fn tagged_exponents_cancel_in_pairs() {
        let f = FieldPolynomial::new(PolyInput::numeric(vec![8, 4, 0, 0], Some(PolyFormat::Exponents))).unwrap();
        assert_eq!(f.exponents(), &[8, 4]);
    }

    #[test]
    fn tagged_negative_exponent_fails() {
        assert_eq!(
            FieldPolynomial::new(PolyInput::Exponents(vec![3, -1])),
            Err(FormatError::NegativeExponent { value: -1 })
        );
    }

    #[test]
    fn untagged_ambiguous_fails() {
        assert!(matches!(
            FieldPolynomial::new(PolyInput::Untagged(vec![4, 1, 0])),
            Err(FormatError::AmbiguousFormat { .. })
        ));
        let f = FieldPolynomial::new(PolyInput::Untagged(vec![1, 0, 1, 1])).unwrap();
        assert_eq!(f.as_str(), "x^3 + x + 1");
    }

    #[test]
    fn fast_path_requires_descending_set() {
        let f = FieldPolynomial::from_exponent_set(vec![4, 1, 0]).unwrap();
        assert_eq!(f, gf("x^4 + x + 1"));
        assert_eq!(f.as_str(), "x^4 + x + 1");
        assert!(matches!(
            FieldPolynomial::from_exponent_set(vec![1, 4, 0]),
            Err(FormatError::InvalidShape { .. })
        ));
        assert!(matches!(
            FieldPolynomial::from_exponent_set(vec![4, 4]),
            Err(FormatError::InvalidShape { .. })
        ));
    }

    #[test]
    fn degree_ceiling() {
        assert!(matches!(
            FieldPolynomial::from_exponents(vec![MAX_DEGREE + 1, 0]),
            Err(FormatError::DegreeTooLarge { .. })
        ));
        assert!(matches!(
            FieldPolynomial::from_exponent_set(vec![MAX_DEGREE + 1]),
            Err(FormatError::DegreeTooLarge { .. })
        ));
    }

    #[test]
    fn polynomial_conversion() {
        let p = Polynomial::parse("x^4 + x + 1").unwrap();
        let f = FieldPolynomial::from_polynomial(&p).unwrap();
        assert_eq!(f.exponents(), &[4, 1, 0]);
        assert_eq!(f.to_polynomial(), p);
        assert!(FieldPolynomial::from_polynomial(&Polynomial::parse("3x").unwrap()).is_err());
    }

    #[test]
    fn existing_input_round_trips() {
        let f = gf("x^5 + x^2 + 1");
        assert_eq!(FieldPolynomial::new(f.clone()).unwrap(), f);
        assert_eq!(Polynomial::new(f.clone()).unwrap().as_str(), "x^5 + x^2 + 1");
    }

    #[test]
    fn display_and_debug() {
        let f = gf("x^2 + 1");
        assert_eq!(f.to_string(), "x^2 + 1");
        assert_eq!(format!("{:?}", f), "x^2 + 1 (mod 2)");
    }

    // ---- arithmetic ----

    #[test]
    fn add_gf_is_xor() {
        let sum = gf("x^4 + x^3 + x^2 + x + 1").add_gf(&gf("x^3 + x + 1"));
        assert_eq!(sum.coefficients(), &[1, 0, 1, 0, 0]);
        assert_eq!(&gf("x^2") - &gf("x^2 + 1"), FieldPolynomial::one());
    }

    #[test]
    fn add_gf_self_is_zero() {
        let f = gf("x^70 + x^3 + 1");
        assert!(f.add_gf(&f).is_zero());
        assert!(f.sub_gf(&f).is_zero());
    }

    #[test]
    fn multiply_gf_reference() {
        let product = gf("x^4 + x^3 + x^2 + x + 1").multiply_gf(&gf("x^3 + x + 1"));
        assert_eq!(product.coefficients(), &[1, 1, 0, 1, 1, 0, 0, 1]);
    }

    #[test]
    fn multiply_gf_wide() {
        // (x^64 + 1)(x^64 + 1) = x^128 + 1
        let f = FieldPolynomial::from_exponents(vec![64, 0]).unwrap();
        assert_eq!((&f * &f).exponents(), &[128, 0]);
        assert!(f.multiply_gf(&FieldPolynomial::zero()).is_zero());
    }

    #[test]
    fn divide_gf_reference() {
        let d = gf("x^9 + x^8 + x^7 + x^5 + x^4 + x + 1")
            .divide_gf(&gf("x^4 + x + 1"))
            .unwrap();
        assert_eq!(d.quotient.coefficients(), &[1, 1, 1, 1, 1, 1]);
        assert_eq!(d.remainder.coefficients(), &[1, 0]);
    }

    #[test]
    fn divide_gf_agrees_with_integer_division_mod_2() {
        let a = gf("x^9 + x^8 + x^7 + x^5 + x^4 + x + 1");
        let b = gf("x^4 + x + 1");
        let sparse = a.divide_gf(&b).unwrap();
        let dense = a.to_polynomial().divide(&b.to_polynomial(), 2).unwrap();
        assert_eq!(sparse.quotient.to_polynomial(), dense.quotient);
        assert_eq!(sparse.remainder.to_polynomial(), dense.remainder);
    }

    #[test]
    fn divide_gf_identity() {
        let a = gf("x^12 + x^7 + x^3 + x^2 + 1");
        let b = gf("x^5 + x^2 + 1");
        let d = a.divide_gf(&b).unwrap();
        assert_eq!(b.multiply_gf(&d.quotient).add_gf(&d.remainder), a);
        assert!(d.remainder.degree() < b.degree());
    }

    #[test]
    fn divide_gf_preconditions() {
        assert_eq!(
            gf("x + 1").divide_gf(&FieldPolynomial::zero()),
            Err(PolyError::DivisionByZero)
        );
        assert_eq!(
            gf("x + 1").divide_gf(&gf("x^3 + 1")),
            Err(PolyError::DivisorDegreeTooLarge {
                divisor: 3,
                dividend: 1
            })
        );
        let d = FieldPolynomial::zero().divide_gf(&gf("x + 1")).unwrap();
        assert!(d.quotient.is_zero());
        assert!(d.remainder.is_zero());
    }

    #[test]
    fn rem_gf_accepts_smaller_dividend() {
        let a = gf("x + 1");
        assert_eq!(a.rem_gf(&gf("x^3 + 1")).unwrap(), a);
        assert_eq!(gf("x^3 + 1").rem_gf(&gf("x + 1")).unwrap(), FieldPolynomial::zero());
        assert_eq!(a.rem_gf(&FieldPolynomial::zero()), Err(PolyError::DivisionByZero));
    }

    #[test]
    fn gcd_gf_common_factor() {
        // (x + 1)(x^2 + x + 1) and (x + 1)^2
        assert_eq!(gf("x^3 + 1").gcd_gf(&gf("x^2 + 1")), gf("x + 1"));
        assert_eq!(gf("x^2 + 1").gcd_gf(&gf("x^3 + 1")), gf("x + 1"));
    }

    #[test]
    fn gcd_gf_coprime_is_one() {
        assert_eq!(gf("x^3 + x + 1").gcd_gf(&gf("x^2 + x + 1")), FieldPolynomial::one());
    }

    #[test]
    fn gcd_gf_base_cases() {
        let f = gf("x^5 + x^3 + 1");
        assert_eq!(f.gcd_gf(&FieldPolynomial::zero()), f);
        assert_eq!(FieldPolynomial::zero().gcd_gf(&f), f);
        assert_eq!(f.gcd_gf(&f), f);
    }

    #[test]
    fn pow_x_mod_small_exponents() {
        let f = gf("x^3 + x + 1");
        assert_eq!(f.pow_x_mod(0).unwrap(), FieldPolynomial::one());
        assert_eq!(f.pow_x_mod(1).unwrap(), FieldPolynomial::x());
        assert_eq!(f.pow_x_mod(3).unwrap(), gf("x + 1"));
        assert_eq!(f.pow_x_mod(5).unwrap(), gf("x^2 + x + 1"));
        assert_eq!(f.pow_x_mod(7).unwrap(), FieldPolynomial::one());
        assert_eq!(f.pow_x_mod(7 * 1000 + 3).unwrap(), gf("x + 1"));
    }

    #[test]
    fn pow_x_mod_matches_long_division() {
        let f = gf("x^5 + x^2 + 1");
        for exp in 0..40usize {
            let direct = FieldPolynomial::monomial(exp).rem_gf(&f).unwrap();
            assert_eq!(f.pow_x_mod(exp as u64).unwrap(), direct, "x^{}", exp);
        }
    }

    #[test]
    fn pow_x_mod_edge_divisors() {
        assert_eq!(FieldPolynomial::zero().pow_x_mod(3), Err(PolyError::DivisionByZero));
        assert!(FieldPolynomial::one().pow_x_mod(9).unwrap().is_zero());
        assert!(FieldPolynomial::x().pow_x_mod(4).unwrap().is_zero());
    }

    #[test]
    fn derivative_drops_even_powers() {
        assert_eq!(gf("x^5 + x^2 + x + 1").derivative(), gf("x^4 + 1"));
        assert!(gf("x^4 + x^2 + 1").derivative().is_zero());
    }

    // ---- irreducibility and primitivity ----

    #[test]
    fn primitive_polynomials() {
        for s in PRIMITIVE {
            let f = gf(s);
            assert!(f.is_irreducible(), "{} should be irreducible", s);
            assert_eq!(f.is_primitive(), Ok(true), "{} should be primitive", s);
        }
    }

    #[test]
    fn irreducible_but_not_primitive() {
        for s in IRREDUCIBLE_NOT_PRIMITIVE {
            let f = gf(s);
            assert!(f.is_irreducible(), "{} should be irreducible", s);
            assert_eq!(f.is_primitive(), Ok(false), "{} should not be primitive", s);
        }
    }

    #[test]
    fn reducible_polynomials() {
        for s in REDUCIBLE {
            let f = gf(s);
            assert!(!f.is_irreducible(), "{} should be reducible", s);
            assert_eq!(f.is_primitive(), Ok(false), "{} should not be primitive", s);
        }
    }

    #[test]
    fn degenerate_degrees() {
        assert!(!FieldPolynomial::zero().is_irreducible());
        assert!(!FieldPolynomial::one().is_irreducible());
        assert_eq!(FieldPolynomial::zero().is_primitive(), Ok(false));
        assert_eq!(FieldPolynomial::one().is_primitive(), Ok(false));

        assert!(FieldPolynomial::x().is_irreducible());
        assert!(gf("x + 1").is_irreducible());
        assert_eq!(gf("x + 1").is_primitive(), Ok(true));
        assert_eq!(FieldPolynomial::x().is_primitive(), Ok(false));
    }

    #[test]
    fn no_constant_term_is_reducible() {
        assert!(!gf("x^3 + x").is_irreducible());
        assert_eq!(gf("x^4 + x^3 + x").is_primitive(), Ok(false));
    }

    #[test]
    fn primitive_degree_ceiling() {
        let f = FieldPolynomial::from_exponents(vec![64, 4, 3, 1, 0]).unwrap();
        assert_eq!(
            f.is_primitive(),
            Err(PolyError::DegreeTooLarge {
                degree: 64,
                max: PRIMITIVE_MAX_DEGREE
            })
        );
    }

    #[test]
    fn primitive_near_degree_ceiling() {
        // 2^61 - 1 is prime, 2^59 - 1 and 2^62 - 1 have large prime factors
        for exponents in [
            vec![59, 7, 4, 2, 0],
            vec![61, 5, 2, 1, 0],
            vec![62, 6, 5, 3, 0],
            vec![63, 1, 0],
        ] {
            let f = FieldPolynomial::from_exponents(exponents).unwrap();
            assert_eq!(f.is_primitive(), Ok(true), "{} should be primitive", f);
        }

        let reducible = FieldPolynomial::from_exponents(vec![61, 5, 2, 1, 0])
            .unwrap()
            .multiply_gf(&gf("x + 1"));
        assert_eq!(reducible.is_primitive(), Ok(false));
    }

    #[test]
    fn setwise_coprime() {
        assert!(FieldPolynomial::from_exponents(vec![4, 3, 2, 1, 0]).unwrap().is_setwise_coprime());
        assert!(!gf("x^9 + x^6 + x^3").is_setwise_coprime());
        assert!(!FieldPolynomial::zero().is_setwise_coprime());
    }

    #[test]
    fn equality_and_hash_follow_exponents() {
        use std::collections::HashSet;

        let a = gf("x^3 + x + 1");
        let b = FieldPolynomial::from_exponents(vec![0, 1, 3]).unwrap();
        let _ = a.as_str();
        assert_eq!(a, b);

        let set: HashSet<FieldPolynomial> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[cfg(feature = "rand")]
    #[test]
    fn random_irreducible_and_primitive() {
        use rand::SeedableRng;

        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for degree in 1..=12 {
            let f = FieldPolynomial::random_irreducible(&mut rng, degree);
            assert_eq!(f.degree(), Some(degree));
            assert!(f.is_irreducible());

            let g = FieldPolynomial::random_primitive(&mut rng, degree);
            assert_eq!(g.degree(), Some(degree));
            assert_eq!(g.is_primitive(), Ok(true));
        }
    }

    #[cfg(feature = "rand")]
    #[test]
    fn random_primitive_with_prime_order() {
        use rand::SeedableRng;

        let mut rng = rand::rngs::StdRng::seed_from_u64(61);
        let g = FieldPolynomial::random_primitive(&mut rng, 61);
        assert_eq!(g.degree(), Some(61));
        assert_eq!(g.is_primitive(), Ok(true));
    }
}

//! Conversions between the three polynomial views.
//!
//! - string: `"x^9 + x^8 + x^7 + x^5 + x^4 + x + 1"`
//! - coefficients: `[1, 1, 1, 0, 1, 1, 0, 0, 1, 1]`, highest degree first
//! - exponents: `[9, 8, 7, 5, 4, 1, 0]`, one entry per unit of coefficient,
//!   sign folded into the degree
//!
//! For GF(2) polynomials the exponent view is a plain set of degrees. For
//! integer polynomials a coefficient `k` repeats its degree `|k|` times,
//! so `2x^2 - x` has exponents `[2, 2, -1]`.

use core::fmt;
use core::str::FromStr;

use crate::error::FormatError;

/// Largest degree accepted from external input.
///
/// Every view is dense in at least one direction, so unbounded degrees
/// turn into unbounded allocations.
pub const MAX_DEGREE: usize = 1 << 20;

/// Explicit format of a bare numeric array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolyFormat {
    Coefficients,
    Exponents,
}

/// Any value a polynomial can be built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolyInput {
    /// Infix notation, e.g. `"8x^4 + 32x - 12"`.
    Text(String),
    /// Dense coefficients, highest degree first.
    Coefficients(Vec<i64>),
    /// Signed exponent multiset.
    Exponents(Vec<i64>),
    /// A numeric array without a format tag.
    ///
    /// Only accepted when it cannot be misread: entries in `{-1, 0, 1}`
    /// are taken as coefficients, anything with an entry above 1 needs an
    /// explicit tag.
    Untagged(Vec<i64>),
    /// An already normalized value, reused as is.
    Existing(Representation),
}

impl PolyInput {
    /// Wrap a numeric array, tagged when `format` is given.
    pub fn numeric(values: Vec<i64>, format: Option<PolyFormat>) -> Self {
        match format {
            Some(PolyFormat::Coefficients) => Self::Coefficients(values),
            Some(PolyFormat::Exponents) => Self::Exponents(values),
            None => Self::Untagged(values),
        }
    }
}

impl From<&str> for PolyInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for PolyInput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Representation> for PolyInput {
    fn from(repr: Representation) -> Self {
        Self::Existing(repr)
    }
}

/// The string, coefficient and exponent views of one polynomial.
///
/// Built only through [`reformat`] and the polynomial constructors, so the
/// three views always agree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Representation {
    string: String,
    coefficients: Vec<i64>,
    exponents: Option<Vec<i64>>,
}

impl Representation {
    /// Build all views from a coefficient vector.
    ///
    /// Leading zeros are stripped; an empty vector is the zero polynomial.
    pub fn from_coefficients(coefficients: &[i64]) -> Result<Self, FormatError> {
        let coefficients = remove_leading_zeros(coefficients);
        check_degree((coefficients.len() - 1) as u64)?;
        Ok(Self::from_normalized(coefficients))
    }

    /// `coefficients` must already be free of leading zeros.
    pub(crate) fn from_normalized(coefficients: Vec<i64>) -> Self {
        debug_assert!(coefficients.len() == 1 || coefficients[0] != 0);
        Self {
            string: coefficients_to_string(&coefficients),
            exponents: coefficients_to_exponents(&coefficients),
            coefficients,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.string
    }

    pub fn coefficients(&self) -> &[i64] {
        &self.coefficients
    }

    /// The signed exponent multiset.
    ///
    /// `None` when the polynomial has a negative constant term, which the
    /// multiset cannot express, or when the multiset would hold more than
    /// [`MAX_DEGREE`] entries.
    pub fn exponents(&self) -> Option<&[i64]> {
        self.exponents.as_deref()
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string)
    }
}

impl FromStr for Representation {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        reformat(PolyInput::from(s))
    }
}

/// Normalize any accepted input into all three views.
///
/// # Errors
///
/// - [`FormatError::AmbiguousFormat`] for an untagged array with an entry
///   above 1.
/// - [`FormatError::InvalidShape`] for an untagged array that is neither.
/// - Parse and degree errors from the individual conversions.
///
/// # Example
///
/// ```
/// use polyfield::format::{reformat, PolyFormat, PolyInput};
///
/// let repr = reformat(PolyInput::numeric(vec![8, 4, 0, 0], Some(PolyFormat::Exponents))).unwrap();
/// assert_eq!(repr.as_str(), "x^8 + x^4 + 2");
/// assert_eq!(repr.coefficients(), &[1, 0, 0, 0, 1, 0, 0, 0, 2]);
/// assert_eq!(repr.exponents(), Some(&[8, 4, 0, 0][..]));
///
/// // [2, 0, 1] could be 2x^2 + 1 or x^2 + 1, so it needs a tag.
/// assert!(reformat(PolyInput::Untagged(vec![2, 0, 1])).is_err());
/// ```
pub fn reformat(input: PolyInput) -> Result<Representation, FormatError> {
    match input {
        PolyInput::Existing(repr) => Ok(repr),
        PolyInput::Text(s) => {
            let coefficients = string_to_coefficients(&s)?;
            Ok(Representation::from_normalized(coefficients))
        }
        PolyInput::Coefficients(values) => Representation::from_coefficients(&values),
        PolyInput::Exponents(values) => {
            let coefficients = exponents_to_coefficients(&values)?;
            Ok(Representation::from_normalized(coefficients))
        }
        PolyInput::Untagged(values) => {
            if values.iter().any(|&v| v > 1) {
                Err(FormatError::AmbiguousFormat { values })
            } else if values.iter().all(|&v| (-1..=1).contains(&v)) {
                Representation::from_coefficients(&values)
            } else {
                Err(FormatError::InvalidShape { values })
            }
        }
    }
}

/// Render coefficients in infix notation.
///
/// # Example
///
/// ```
/// use polyfield::format::coefficients_to_string;
///
/// assert_eq!(coefficients_to_string(&[-4, 8, 0, 2]), "- 4x^3 + 8x^2 + 2");
/// assert_eq!(coefficients_to_string(&[1, 0]), "x");
/// assert_eq!(coefficients_to_string(&[0]), "0");
/// ```
pub fn coefficients_to_string(coefficients: &[i64]) -> String {
    let len = coefficients.len();
    let mut out = String::new();

    for (i, &c) in coefficients.iter().enumerate() {
        if c == 0 {
            continue;
        }
        let exp = len - i - 1;

        match (out.is_empty(), c < 0) {
            (true, true) => out.push_str("- "),
            (true, false) => {}
            (false, true) => out.push_str(" - "),
            (false, false) => out.push_str(" + "),
        }

        let magnitude = c.unsigned_abs();
        if magnitude != 1 || exp == 0 {
            out.push_str(&magnitude.to_string());
        }
        match exp {
            0 => {}
            1 => out.push('x'),
            _ => {
                out.push_str("x^");
                out.push_str(&exp.to_string());
            }
        }
    }

    if out.is_empty() {
        out.push('0');
    }
    out
}

/// Parse infix notation into coefficients.
///
/// Whitespace is ignored and terms may repeat a degree, in which case they
/// add up. A term is `[coef][*]x[^exp]` or a bare constant.
///
/// # Example
///
/// ```
/// use polyfield::format::string_to_coefficients;
///
/// assert_eq!(string_to_coefficients("-4x^2 + 2").unwrap(), vec![-4, 0, 2]);
/// assert_eq!(string_to_coefficients("x").unwrap(), vec![1, 0]);
/// assert_eq!(string_to_coefficients("").unwrap(), vec![0]);
/// ```
pub fn string_to_coefficients(s: &str) -> Result<Vec<i64>, FormatError> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Ok(vec![0]);
    }

    let terms = split_terms(&compact)
        .into_iter()
        .map(parse_term)
        .collect::<Result<Vec<_>, _>>()?;

    let highest = terms.iter().map(|&(exp, _)| exp).max().unwrap_or(0);
    let mut coefficients = vec![0i64; highest + 1];
    for (exp, coef) in terms {
        let slot = &mut coefficients[highest - exp];
        *slot = slot
            .checked_add(coef)
            .ok_or_else(|| FormatError::InvalidTerm {
                term: compact.clone(),
            })?;
    }

    Ok(remove_leading_zeros(&coefficients))
}

/// Split at every sign that starts a new term, keeping the sign.
fn split_terms(s: &str) -> Vec<&str> {
    let mut terms = Vec::new();
    let mut start = 0;
    for (i, ch) in s.char_indices() {
        if (ch == '+' || ch == '-') && i > start {
            terms.push(&s[start..i]);
            start = i;
        }
    }
    terms.push(&s[start..]);
    terms
}

/// Parse one signed term into `(exponent, coefficient)`.
fn parse_term(term: &str) -> Result<(usize, i64), FormatError> {
    let invalid = || FormatError::InvalidTerm {
        term: term.to_owned(),
    };

    let (negative, body) = match term.as_bytes().first() {
        Some(b'-') => (true, &term[1..]),
        Some(b'+') => (false, &term[1..]),
        _ => (false, term),
    };
    if body.is_empty() {
        return Err(invalid());
    }

    let (magnitude, exp) = match body.split_once('x') {
        Some((coef, power)) => {
            let coef = coef.strip_suffix('*').unwrap_or(coef);
            let magnitude = if coef.is_empty() {
                1
            } else {
                parse_digits::<i64>(coef).ok_or_else(invalid)?
            };
            let exp = match power {
                "" => 1,
                _ => power
                    .strip_prefix('^')
                    .and_then(parse_digits::<u64>)
                    .ok_or_else(invalid)?,
            };
            (magnitude, exp)
        }
        None => (parse_digits::<i64>(body).ok_or_else(invalid)?, 0),
    };

    let exp = check_degree(exp)?;
    Ok((exp, if negative { -magnitude } else { magnitude }))
}

fn parse_digits<T: FromStr>(s: &str) -> Option<T> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn check_degree(degree: u64) -> Result<usize, FormatError> {
    match usize::try_from(degree) {
        Ok(d) if d <= MAX_DEGREE => Ok(d),
        _ => Err(FormatError::DegreeTooLarge {
            degree,
            max: MAX_DEGREE,
        }),
    }
}

/// Expand a signed exponent multiset into coefficients.
///
/// Each exponent adds `sign(exp)` to the coefficient of `x^|exp|`; an
/// exponent of 0 always adds 1.
///
/// # Example
///
/// ```
/// use polyfield::format::exponents_to_coefficients;
///
/// assert_eq!(exponents_to_coefficients(&[5, 1, 1]).unwrap(), vec![1, 0, 0, 0, 2, 0]);
/// assert_eq!(exponents_to_coefficients(&[0, 0]).unwrap(), vec![2]);
/// ```
pub fn exponents_to_coefficients(exponents: &[i64]) -> Result<Vec<i64>, FormatError> {
    let highest = exponents.iter().map(|e| e.unsigned_abs()).max().unwrap_or(0);
    let highest = check_degree(highest)?;

    let mut coefficients = vec![0i64; highest + 1];
    for &exp in exponents {
        let slot = highest - exp.unsigned_abs() as usize;
        coefficients[slot] += if exp == 0 { 1 } else { exp.signum() };
    }

    Ok(remove_leading_zeros(&coefficients))
}

/// Fold coefficients into a signed exponent multiset, highest degree first.
///
/// A coefficient `k` contributes its degree `|k|` times. Returns `None` for
/// a negative constant term and for multisets with more than
/// [`MAX_DEGREE`] entries.
///
/// # Example
///
/// ```
/// use polyfield::format::coefficients_to_exponents;
///
/// assert_eq!(coefficients_to_exponents(&[1, 0, 0, 0, -2, 0]), Some(vec![5, -1, -1]));
/// assert_eq!(coefficients_to_exponents(&[2]), Some(vec![0, 0]));
/// assert_eq!(coefficients_to_exponents(&[1, -3]), None);
/// ```
pub fn coefficients_to_exponents(coefficients: &[i64]) -> Option<Vec<i64>> {
    let len = coefficients.len();
    let total = coefficients
        .iter()
        .try_fold(0u64, |acc, c| acc.checked_add(c.unsigned_abs()))?;
    if total > MAX_DEGREE as u64 {
        return None;
    }

    let mut exponents = Vec::with_capacity(total as usize);
    for (i, &c) in coefficients.iter().enumerate() {
        if c == 0 {
            continue;
        }
        let degree = (len - i - 1) as i64;
        if degree == 0 && c < 0 {
            return None;
        }
        let folded = if c < 0 { -degree } else { degree };
        exponents.extend(core::iter::repeat(folded).take(c.unsigned_abs() as usize));
    }
    Some(exponents)
}

/// Copy of `coefficients` without leading zeros, `[0]` at minimum.
pub fn remove_leading_zeros(coefficients: &[i64]) -> Vec<i64> {
    match coefficients.iter().position(|&c| c != 0) {
        Some(first) => coefficients[first..].to_vec(),
        None => vec![0],
    }
}

//! Error types for parsing and polynomial arithmetic.

/// Input that cannot be turned into a polynomial representation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// A term of an infix string could not be parsed.
    #[error("invalid polynomial term {term:?}")]
    InvalidTerm { term: String },
    /// A numeric array matches none of the accepted shapes.
    #[error("invalid polynomial format: {values:?}")]
    InvalidShape { values: Vec<i64> },
    /// A numeric array could be read both as coefficients and as exponents.
    #[error("ambiguous polynomial format {values:?}: an explicit format is required")]
    AmbiguousFormat { values: Vec<i64> },
    /// A GF(2) polynomial was given a coefficient outside {0, 1}.
    #[error("coefficient {value} is not in GF(2)")]
    NonBinaryCoefficient { value: i64 },
    /// A GF(2) exponent set contained a negative degree.
    #[error("negative exponent {value} in exponent set")]
    NegativeExponent { value: i64 },
    /// The requested degree is above the supported ceiling.
    #[error("degree {degree} exceeds the maximum supported degree {max}")]
    DegreeTooLarge { degree: u64, max: usize },
}

/// Failure of a polynomial operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolyError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("division by the zero polynomial")]
    DivisionByZero,
    /// The divisor's leading coefficient vanishes under the modulus.
    #[error("divisor leading coefficient {leading} is zero modulo {modulus}")]
    DivisorLeadingZero { leading: i64, modulus: i64 },
    #[error("divisor degree {divisor} exceeds dividend degree {dividend}")]
    DivisorDegreeTooLarge { divisor: usize, dividend: usize },
    /// Without a modulus, every quotient digit must be an integer.
    #[error("{numerator} is not divisible by {denominator}")]
    InexactDivision { numerator: i64, denominator: i64 },
    #[error("{value} has no inverse modulo {modulus}")]
    NotInvertible { value: i64, modulus: i64 },
    #[error("integer overflow in coefficient arithmetic")]
    Overflow,
    #[error("degree {degree} exceeds the maximum degree {max} for this operation")]
    DegreeTooLarge { degree: usize, max: usize },
}

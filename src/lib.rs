//! Polynomial arithmetic over the integers and over GF(2).
//!
//! [`Polynomial`] carries integer coefficients and supports long division
//! with an optional modulus. [`FieldPolynomial`] specializes to GF(2) with
//! sparse division, carryless multiplication and the irreducibility and
//! primitivity tests used to pick LFSR taps.

extern crate alloc;

pub mod algebra;
pub mod error;
pub mod structures;
pub mod utils;

pub use algebra::ring::{CoefficientRing, Gf2, Integers};
pub use error::{FormatError, PolyError};

pub use structures::bits::PackedBits;
pub use structures::exponents::{exponent_max, symmetric_difference};
pub use structures::field_poly::{FieldPolynomial, PRIMITIVE_MAX_DEGREE};
pub use structures::format;
pub use structures::format::{
    coefficients_to_exponents, coefficients_to_string, exponents_to_coefficients, reformat,
    remove_leading_zeros, string_to_coefficients, PolyFormat, PolyInput, Representation,
    MAX_DEGREE,
};
pub use structures::poly::{Division, Polynomial};
pub use utils::{
    array_gcd, extended_gcd, gcd, is_prime, lcm, mod_inverse, modulo, power_mod, prime_divisors,
};

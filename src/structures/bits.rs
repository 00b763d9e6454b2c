//! Bit-packed GF(2) polynomials for carryless arithmetic.
//!
//! Bit `i` holds the coefficient of `x^i`, stored little-endian in `u64`
//! limbs. The width grows with the degree, so packing never truncates.

use alloc::vec;
use alloc::vec::Vec;

const LIMB_BITS: usize = u64::BITS as usize;

/// A GF(2) polynomial packed into machine words.
///
/// Invariant: no trailing zero limbs, so the zero polynomial has no limbs
/// and equality is limb equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PackedBits {
    limbs: Vec<u64>,
}

impl PackedBits {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Pack a coefficient vector (highest degree first).
    ///
    /// Each entry contributes its low bit, so callers must have checked
    /// the entries are 0 or 1 if they want anything else rejected.
    pub fn from_coefficients(coefficients: &[i64]) -> Self {
        let len = coefficients.len();
        let mut limbs = vec![0u64; len.div_ceil(LIMB_BITS)];
        for (i, &c) in coefficients.iter().enumerate() {
            if c & 1 == 1 {
                let bit = len - i - 1;
                limbs[bit / LIMB_BITS] |= 1 << (bit % LIMB_BITS);
            }
        }
        let mut bits = Self { limbs };
        bits.normalize();
        bits
    }

    /// Pack an exponent set. Repeated exponents cancel.
    pub fn from_exponents(exponents: &[usize]) -> Self {
        let Some(&top) = exponents.iter().max() else {
            return Self::zero();
        };
        let mut limbs = vec![0u64; top / LIMB_BITS + 1];
        for &e in exponents {
            limbs[e / LIMB_BITS] ^= 1 << (e % LIMB_BITS);
        }
        let mut bits = Self { limbs };
        bits.normalize();
        bits
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    /// Position of the highest set bit.
    pub fn degree(&self) -> Option<usize> {
        let top = self.limbs.last()?;
        Some((self.limbs.len() - 1) * LIMB_BITS + (LIMB_BITS - 1 - top.leading_zeros() as usize))
    }

    /// Coefficient of `x^i`.
    pub fn bit(&self, i: usize) -> bool {
        self.limbs
            .get(i / LIMB_BITS)
            .is_some_and(|&limb| limb >> (i % LIMB_BITS) & 1 == 1)
    }

    /// Unpack into a coefficient vector, `[0]` for zero.
    pub fn to_coefficients(&self) -> Vec<i64> {
        match self.degree() {
            None => vec![0],
            Some(d) => (0..=d).rev().map(|i| self.bit(i) as i64).collect(),
        }
    }

    /// Unpack into an exponent set, highest first.
    pub fn to_exponents(&self) -> Vec<usize> {
        let mut exponents = Vec::new();
        for (k, &limb) in self.limbs.iter().enumerate().rev() {
            let mut word = limb;
            while word != 0 {
                let top = LIMB_BITS - 1 - word.leading_zeros() as usize;
                exponents.push(k * LIMB_BITS + top);
                word ^= 1 << top;
            }
        }
        exponents
    }

    /// GF(2) addition.
    pub fn xor(&self, other: &Self) -> Self {
        let (long, short) = if self.limbs.len() >= other.limbs.len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut limbs = long.limbs.clone();
        for (l, s) in limbs.iter_mut().zip(&short.limbs) {
            *l ^= s;
        }
        let mut bits = Self { limbs };
        bits.normalize();
        bits
    }

    /// Carryless multiplication.
    ///
    /// For every set bit `i` of the multiplier, the multiplicand shifted
    /// left by `i` is XORed into the product.
    pub fn clmul(&self, multiplier: &Self) -> Self {
        let (Some(da), Some(db)) = (self.degree(), multiplier.degree()) else {
            return Self::zero();
        };

        let mut product = Self {
            limbs: vec![0u64; (da + db) / LIMB_BITS + 1],
        };
        for (k, &limb) in multiplier.limbs.iter().enumerate() {
            let mut word = limb;
            while word != 0 {
                let low = word.trailing_zeros() as usize;
                product.xor_shifted(self, k * LIMB_BITS + low);
                word &= word - 1;
            }
        }
        product.normalize();
        product
    }

    /// `self ^= other << shift`. `self` must already be wide enough.
    fn xor_shifted(&mut self, other: &Self, shift: usize) {
        let limb_shift = shift / LIMB_BITS;
        let bit_shift = shift % LIMB_BITS;
        for (k, &w) in other.limbs.iter().enumerate() {
            self.limbs[k + limb_shift] ^= w << bit_shift;
            if bit_shift != 0 {
                let carry = w >> (LIMB_BITS - bit_shift);
                if carry != 0 {
                    self.limbs[k + limb_shift + 1] ^= carry;
                }
            }
        }
    }

    /// Remove trailing zero limbs.
    fn normalize(&mut self) {
        while self.limbs.last() == Some(&0) {
            self.limbs.pop();
        }
    }
}

//! Operations on GF(2) exponent sets.
//!
//! A GF(2) polynomial is fully described by the set of degrees with a
//! non-zero coefficient. Adding two polynomials is the symmetric difference
//! of their sets, which is what sparse long division is built on.

use alloc::collections::BTreeSet;

/// Largest exponent in the set, `None` when empty.
pub fn exponent_max(exponents: &[usize]) -> Option<usize> {
    exponents.iter().copied().max()
}

/// Degrees present in exactly one of the two sets, highest first.
///
/// This is GF(2) addition in exponent form.
///
/// # Example
///
/// ```
/// use polyfield::symmetric_difference;
///
/// // (x^3 + x^2 + x) + (x^3 + x^4 + 1) = x^4 + x^2 + x + 1
/// assert_eq!(symmetric_difference(&[3, 2, 1], &[3, 4, 0]), vec![4, 2, 1, 0]);
/// ```
pub fn symmetric_difference(a: &[usize], b: &[usize]) -> Vec<usize> {
    let left: BTreeSet<usize> = a.iter().copied().collect();
    let right: BTreeSet<usize> = b.iter().copied().collect();
    let mut out: Vec<usize> = left.symmetric_difference(&right).copied().collect();
    out.reverse();
    out
}

/// XOR `divisor` shifted up by `shift` into `remainder`.
pub(crate) fn toggle_shifted(remainder: &mut BTreeSet<usize>, divisor: &[usize], shift: usize) {
    for &e in divisor {
        let e = e + shift;
        if !remainder.remove(&e) {
            remainder.insert(e);
        }
    }
}

/// Sort descending and cancel repeated degrees in pairs.
pub(crate) fn normalize(mut exponents: Vec<usize>) -> Vec<usize> {
    exponents.sort_unstable_by(|a, b| b.cmp(a));
    let mut out: Vec<usize> = Vec::with_capacity(exponents.len());
    for e in exponents {
        if out.last() == Some(&e) {
            out.pop();
        } else {
            out.push(e);
        }
    }
    out
}

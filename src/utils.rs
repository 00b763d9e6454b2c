//! Integer helpers shared by the polynomial types.
//!
//! These are exposed at the crate root so callers building higher level
//! tools (tap search, sequence analysis) can reuse them directly.

/// Greatest common divisor of two integers.
///
/// The result is always non-negative and `gcd(a, 0) == |a|`.
///
/// # Example
///
/// ```
/// use polyfield::gcd;
///
/// assert_eq!(gcd(12, 18), 6);
/// assert_eq!(gcd(-4, 6), 2);
/// assert_eq!(gcd(7, 0), 7);
/// ```
pub const fn gcd(a: i64, b: i64) -> i64 {
    let mut r0 = a.unsigned_abs();
    let mut r1 = b.unsigned_abs();
    while r1 != 0 {
        let t = r0 % r1;
        r0 = r1;
        r1 = t;
    }
    r0 as i64
}

/// Least common multiple of two integers.
///
/// Returns `Some(0)` when either argument is 0 and `None` when the result
/// does not fit in `i64`.
///
/// # Example
///
/// ```
/// use polyfield::lcm;
///
/// assert_eq!(lcm(4, 6), Some(12));
/// assert_eq!(lcm(i64::MAX, 2), None);
/// ```
pub const fn lcm(a: i64, b: i64) -> Option<i64> {
    if a == 0 || b == 0 {
        return Some(0);
    }
    let g = gcd(a, b);
    if g <= 0 {
        // gcd wrapped: both arguments are i64::MIN
        return None;
    }
    match (a / g).checked_mul(b) {
        Some(m) => m.checked_abs(),
        None => None,
    }
}

/// GCD of every value in the slice.
///
/// Stops early once the running GCD reaches 1. An empty slice yields 0,
/// the identity of `gcd`.
///
/// # Example
///
/// ```
/// use polyfield::array_gcd;
///
/// assert_eq!(array_gcd(&[10, 5, 15]), 5);
/// assert_eq!(array_gcd(&[4, 3, 2, 1, 0]), 1);
/// ```
pub fn array_gcd(values: &[i64]) -> i64 {
    let mut result = 0;
    for &v in values {
        result = gcd(v, result);
        if result == 1 {
            break;
        }
    }
    result
}

/// Extended Euclidean algorithm.
///
/// Returns `(g, s, t)` such that `s*a + t*b == g` where `g = gcd(a, b) >= 0`.
pub fn extended_gcd(a: i64, b: i64) -> (i64, i64, i64) {
    let (mut old_r, mut r) = (a as i128, b as i128);
    let (mut old_s, mut s) = (1i128, 0i128);
    let (mut old_t, mut t) = (0i128, 1i128);

    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
        (old_t, t) = (t, old_t - q * t);
    }

    if old_r < 0 {
        (old_r, old_s, old_t) = (-old_r, -old_s, -old_t);
    }
    (old_r as i64, old_s as i64, old_t as i64)
}

/// Multiplicative inverse of `a` modulo `m`.
///
/// Returns `None` if `m == 0` or `a` and `m` are not coprime.
///
/// # Example
///
/// ```
/// use polyfield::mod_inverse;
///
/// assert_eq!(mod_inverse(3, 7), Some(5));
/// assert_eq!(mod_inverse(2, 4), None);
/// ```
pub fn mod_inverse(a: i64, m: i64) -> Option<i64> {
    if m == 0 {
        return None;
    }
    let (g, s, _) = extended_gcd(modulo(a, m), m);
    if g != 1 {
        return None;
    }
    Some(modulo(s, m))
}

/// Miller-Rabin bases that make the test deterministic for every `u64`.
const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Check if `n` is a prime number.
///
/// Deterministic Miller-Rabin over the first twelve primes, which is exact
/// for all of `u64`.
///
/// # Example
///
/// ```
/// use polyfield::is_prime;
///
/// assert!(is_prime(8191));
/// assert!(is_prime((1 << 61) - 1));
/// assert!(!is_prime((1 << 59) - 1));
/// ```
pub const fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }

    let mut i = 0;
    while i < WITNESSES.len() {
        let p = WITNESSES[i];
        if n == p {
            return true;
        }
        if n % p == 0 {
            return false;
        }
        i += 1;
    }

    // n - 1 = d * 2^s with d odd
    let mut d = n - 1;
    let mut s = 0;
    while d % 2 == 0 {
        d /= 2;
        s += 1;
    }

    let mut i = 0;
    'witness: while i < WITNESSES.len() {
        let mut x = power_mod(WITNESSES[i], d, n);
        i += 1;
        if x == 1 || x == n - 1 {
            continue;
        }
        let mut r = 1;
        while r < s {
            x = ((x as u128 * x as u128) % n as u128) as u64;
            if x == n - 1 {
                continue 'witness;
            }
            r += 1;
        }
        return false;
    }
    true
}

/// Compute `base^exp mod modulus` by binary exponentiation.
///
/// Intermediates are widened to `u128`, so any `u64` modulus is safe.
/// Returns 0 when `modulus == 1`.
///
/// # Panics
///
/// Panics if `modulus == 0`.
pub const fn power_mod(base: u64, exp: u64, modulus: u64) -> u64 {
    assert!(modulus != 0, "modulus must be non-zero");
    if modulus == 1 {
        return 0;
    }

    let m = modulus as u128;
    let mut result: u128 = 1;
    let mut b = (base as u128) % m;
    let mut e = exp;
    while e > 0 {
        if e & 1 == 1 {
            result = result * b % m;
        }
        b = b * b % m;
        e >>= 1;
    }
    result as u64
}

/// Sign-normalizing modulo: the result lies in `[0, |m|)`.
///
/// A modulus of 0 means "no reduction" and returns `n` unchanged.
///
/// # Example
///
/// ```
/// use polyfield::modulo;
///
/// assert_eq!(modulo(7, 3), 1);
/// assert_eq!(modulo(-1, 5), 4);
/// assert_eq!(modulo(-9, 0), -9);
/// ```
pub const fn modulo(n: i64, m: i64) -> i64 {
    if m == 0 {
        return n;
    }
    n.rem_euclid(m)
}

/// Trial division bound used by [`prime_divisors`] before switching to
/// Pollard's rho.
const TRIAL_LIMIT: u64 = 1 << 12;

/// Find all distinct prime divisors of `n`, in ascending order.
///
/// Small factors come from trial division. The cofactor left over is split
/// with Pollard's rho, and [`is_prime`] stops the recursion, so Mersenne
/// numbers like `2^61 - 1` factor immediately.
///
/// # Example
///
/// ```
/// use polyfield::prime_divisors;
///
/// assert_eq!(prime_divisors(255), vec![3, 5, 17]);
/// assert_eq!(prime_divisors((1 << 62) - 1), vec![3, 715827883, 2147483647]);
/// ```
pub fn prime_divisors(mut n: u64) -> Vec<u64> {
    let mut primes = Vec::new();
    let mut d: u64 = 2;

    while d < TRIAL_LIMIT && d <= n / d {
        if n % d == 0 {
            primes.push(d);
            while n % d == 0 {
                n /= d;
            }
        }
        d += if d == 2 { 1 } else { 2 };
    }

    if n > 1 {
        split_cofactor(n, &mut primes);
    }

    primes.sort_unstable();
    primes.dedup();
    primes
}

/// Push the prime factors of `n`, which has no factor below
/// [`TRIAL_LIMIT`] unless it is itself prime.
fn split_cofactor(n: u64, primes: &mut Vec<u64>) {
    if n == 1 {
        return;
    }
    if is_prime(n) {
        primes.push(n);
        return;
    }
    let factor = pollard_rho(n);
    split_cofactor(factor, primes);
    split_cofactor(n / factor, primes);
}

/// A non-trivial factor of the odd composite `n`.
///
/// Floyd cycle detection on `x -> x^2 + c`, retrying with the next `c`
/// when a cycle closes without splitting `n`.
fn pollard_rho(n: u64) -> u64 {
    let step = |x: u64, c: u64| ((x as u128 * x as u128 + c as u128) % n as u128) as u64;
    let mut c = 1;
    loop {
        let (mut x, mut y, mut d) = (2, 2, 1);
        while d == 1 {
            x = step(x, c);
            y = step(step(y, c), c);
            d = gcd_u64(x.abs_diff(y), n);
        }
        if d != n {
            return d;
        }
        c += 1;
    }
}

const fn gcd_u64(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

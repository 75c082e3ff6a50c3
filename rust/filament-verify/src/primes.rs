//! Prime generation: sieve of Eratosthenes for enumeration, trial division
//! for single-value queries.

use log::debug;
use num_integer::Roots;

/// Generate all primes up to `limit` (inclusive) using the sieve of Eratosthenes.
///
/// O(limit · log log limit) time, O(limit) space. Returns an empty vector for
/// `limit < 2`. Output is strictly ascending.
pub fn primes_up_to(limit: u64) -> Vec<u64> {
    if limit < 2 {
        return Vec::new();
    }
    let size = (limit + 1) as usize;
    let mut is_prime = vec![true; size];
    is_prime[0] = false;
    is_prime[1] = false;
    let mut i = 2usize;
    while i * i < size {
        if is_prime[i] {
            let mut j = i * i;
            while j < size {
                is_prime[j] = false;
                j += i;
            }
        }
        i += 1;
    }
    let primes: Vec<u64> = is_prime
        .iter()
        .enumerate()
        .filter(|(_, &p)| p)
        .map(|(i, _)| i as u64)
        .collect();
    debug!("sieve to {} produced {} primes", limit, primes.len());
    primes
}

/// Trial-division primality test.
///
/// Only for single values; enumerating a range with this is
/// O(n·√n) and should go through [`primes_up_to`] instead.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let bound = n.sqrt();
    let mut d = 3u64;
    while d <= bound {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

const SMALL_PRIMES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Witness set {2, 7, 61} is deterministic below this bound.
const SMALL_WITNESS_BOUND: u64 = 4_759_123_141;

/// Work lists whose span is at most this many times their length are checked
/// with a window sieve instead of per-value Miller-Rabin.
const DENSE_SPAN_FACTOR: u64 = 64;

fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    if m <= u64::from(u32::MAX) {
        a * b % m
    } else {
        (u128::from(a) * u128::from(b) % u128::from(m)) as u64
    }
}

fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut result = 1u64;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    result
}

/// Deterministic Miller-Rabin for the full `u64` range.
///
/// O(log n) per query; this is the primality gate used by the evaluator.
pub fn is_prime_miller_rabin(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for &p in &SMALL_PRIMES {
        if n == p {
            return true;
        }
        if n % p == 0 {
            return false;
        }
    }

    let n_minus_1 = n - 1;
    let r = n_minus_1.trailing_zeros();
    let d = n_minus_1 >> r;

    let witnesses: &[u64] = if n < SMALL_WITNESS_BOUND {
        &[2, 7, 61]
    } else {
        &SMALL_PRIMES
    };

    'witness: for &a in witnesses {
        let a = a % n;
        if a == 0 {
            continue;
        }
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n_minus_1 {
            continue 'witness;
        }
        for _ in 1..r {
            x = mul_mod(x, x, n);
            if x == n_minus_1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Primality mask for `[start, end]`: entry `i` is true iff `start + i` is prime.
///
/// Segmented sieve, O((end − start) · log log end + √end).
pub fn sieve_window(start: u64, end: u64) -> Vec<bool> {
    if start > end {
        return Vec::new();
    }
    let mut mask = vec![true; (end - start + 1) as usize];
    for n in start..=end.min(1) {
        mask[(n - start) as usize] = false;
    }
    for p in primes_up_to(end.sqrt()) {
        let mut j = (p * p).max(start.div_ceil(p).saturating_mul(p));
        while j <= end {
            mask[(j - start) as usize] = false;
            match j.checked_add(p) {
                Some(next) => j = next,
                None => break,
            }
        }
    }
    mask
}

/// First value in `values` that is not prime, if any.
///
/// Dense lists (the span of the values is small relative to their count) go
/// through one window sieve; sparse ones through Miller-Rabin per value.
pub fn first_composite(values: &[u64]) -> Option<u64> {
    let lo = *values.iter().min()?;
    let hi = *values.iter().max()?;
    let span = hi - lo + 1;
    if span <= (values.len() as u64).saturating_mul(DENSE_SPAN_FACTOR) {
        let mask = sieve_window(lo, hi);
        values.iter().copied().find(|&v| !mask[(v - lo) as usize])
    } else {
        values.iter().copied().find(|&v| !is_prime_miller_rabin(v))
    }
}

/// Slice of an ascending prime universe restricted to `[start, end]`.
pub fn primes_in_range(universe: &[u64], start: u64, end: u64) -> &[u64] {
    let lo = universe.partition_point(|&p| p < start);
    let hi = universe.partition_point(|&p| p <= end);
    if lo >= hi {
        &universe[0..0]
    } else {
        &universe[lo..hi]
    }
}

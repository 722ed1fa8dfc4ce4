//! Helpers for arithmetic in the prime field.

use dashu::integer::IBig;

use crate::bigint::random_bits;
use crate::errors::ElGamalError;

/// Canonical representative of x modulo p, always in [0, p).
pub fn mod_reduce(x: &IBig, p: &IBig) -> IBig {
    ((x % p) + p) % p
}

/// ### Modular inverse
///
/// The inverse of a modulo p by the iterative extended Euclidean
/// algorithm. A non-unit (gcd != 1) is a typed error, never a sentinel.
pub fn mod_inverse(a: &IBig, p: &IBig) -> Result<IBig, ElGamalError> {
    let mut r0 = mod_reduce(a, p);
    let mut r1 = p.clone();
    let mut s0 = IBig::ONE;
    let mut s1 = IBig::ZERO;
    while r1 != IBig::ZERO {
        let q = &r0 / &r1;
        let r = &r0 - &q * &r1;
        r0 = r1;
        r1 = r;
        let s = &s0 - &q * &s1;
        s0 = s1;
        s1 = s;
    }
    if r0 != IBig::ONE {
        return Err(ElGamalError::NonInvertible);
    }
    Ok(mod_reduce(&s0, p))
}

/// Scalar in [0, p): 256 fresh CSPRNG bits reduced mod p. The reduction
/// bias is negligible for a 256-bit p and tolerated by the scheme.
pub fn sample_scalar(p: &IBig) -> IBig {
    mod_reduce(&random_bits(256), p)
}

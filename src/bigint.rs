//! Number theory on top of dashu's arbitrary-precision integers.
//!
//! Plain arithmetic (exact signed add/sub/mul, truncated division,
//! sign-of-dividend remainder, comparisons, `{:x}`/`{:b}` formatting) comes
//! straight from [`IBig`]; this module adds the probabilistic and modular
//! routines the encryption pipeline needs.

use dashu::integer::{fast_div::ConstDivisor, IBig, UBig};
use rand::{rngs::OsRng, RngCore};

use crate::errors::ElGamalError;
use crate::field::mod_reduce;

/// ### Random
///
/// Uniform integer in [0, 2^n_bits), drawn from the system CSPRNG.
pub fn random_bits(n_bits: usize) -> IBig {
    let n_bytes = (n_bits + 7) / 8;
    let mut buf = vec![0u8; n_bytes];
    OsRng.fill_bytes(&mut buf);
    let excess = n_bytes * 8 - n_bits;
    if excess > 0 {
        buf[0] &= 0xff >> excess;
    }
    from_be_bytes(&buf)
}

/// Big-endian byte import, most significant byte first.
pub fn from_be_bytes(bytes: &[u8]) -> IBig {
    IBig::from(UBig::from_be_bytes(bytes))
}

/// Big-endian byte export. Leading zero bytes are omitted; zero exports as
/// the empty byte string.
pub fn to_be_bytes(n: &IBig) -> Vec<u8> {
    let mag = magnitude(n);
    if mag == UBig::ZERO {
        return Vec::new();
    }
    mag.to_be_bytes().to_vec()
}

/// ### Modular exponentiation
///
/// base^exp mod p, with the base reduced into [0, p) first.
pub fn mod_pow(base: &IBig, exp: &IBig, p: &IBig) -> IBig {
    let ring = ConstDivisor::new(magnitude(p));
    let base = ring.reduce(magnitude(&mod_reduce(base, p)));
    IBig::from(base.pow(&magnitude(exp)).residue())
}

/// ### Legendre symbol
///
/// (a/p) for odd prime p by Euler's criterion: +1 for a non-zero quadratic
/// residue, -1 for a non-residue, 0 when a is a multiple of p.
pub fn legendre(a: &IBig, p: &IBig) -> i32 {
    let a = mod_reduce(a, p);
    if a == IBig::ZERO {
        return 0;
    }
    let exp = (p - IBig::ONE) / IBig::from(2);
    if mod_pow(&a, &exp, p) == IBig::ONE {
        1
    } else {
        -1
    }
}

/// ### Modular square root
///
/// The smaller of the two square roots of n modulo odd prime p, by
/// Cipolla's algorithm. Fails with [`ElGamalError::NonResidue`] when n is a
/// quadratic non-residue.
pub fn sqrt_mod(n: &IBig, p: &IBig) -> Result<IBig, ElGamalError> {
    let n = mod_reduce(n, p);
    if n == IBig::ZERO {
        return Ok(IBig::ZERO);
    }
    if legendre(&n, p) != 1 {
        return Err(ElGamalError::NonResidue);
    }

    // Pick a until w^2 = a^2 - n is a non-residue, then work in the
    // quadratic extension F_p[w]/(w^2 - (a^2 - n)).
    let (a, w2) = loop {
        let a = mod_reduce(&random_bits(256), p);
        let w2 = mod_reduce(&(&a * &a - &n), p);
        if legendre(&w2, p) == -1 {
            break (a, w2);
        }
    };

    // (a + w)^((p+1)/2) by left-to-right binary exponentiation; the
    // w-component of the result vanishes and the scalar part is a root.
    let exp = (p + IBig::ONE) / IBig::from(2);
    let bits = format!("{:b}", exp);
    let mut rx = a.clone();
    let mut ry = IBig::ONE;
    for bit in bits.chars().skip(1) {
        let (sx, sy) = ext_mul(&rx, &ry, &rx, &ry, &w2, p);
        rx = sx;
        ry = sy;
        if bit == '1' {
            let (tx, ty) = ext_mul(&rx, &ry, &a, &IBig::ONE, &w2, p);
            rx = tx;
            ry = ty;
        }
    }
    debug_assert!(ry == IBig::ZERO, "w-component must vanish for a residue");

    let other = p - &rx;
    Ok(if rx <= other { rx } else { other })
}

// (x1 + y1*w)(x2 + y2*w) = (x1*x2 + y1*y2*w^2) + (x1*y2 + x2*y1)*w,
// each component canonicalized into [0, p).
fn ext_mul(
    x1: &IBig,
    y1: &IBig,
    x2: &IBig,
    y2: &IBig,
    w2: &IBig,
    p: &IBig,
) -> (IBig, IBig) {
    let x = mod_reduce(&(x1 * x2 + y1 * y2 * w2), p);
    let y = mod_reduce(&(x1 * y2 + x2 * y1), p);
    (x, y)
}

// Canonical values only; callers reduce into [0, p) first.
fn magnitude(n: &IBig) -> UBig {
    UBig::try_from(n.clone()).expect("magnitude of a negative integer")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_bits_stays_in_range() {
        for _ in 0..32 {
            let n = random_bits(8);
            assert!(n >= IBig::ZERO && n < IBig::from(256));
        }
        let wide = random_bits(256);
        assert!(wide < IBig::from(2).pow(256));
    }

    #[test]
    fn byte_io_round_trips() {
        let n = from_be_bytes(b"hello");
        assert_eq!(to_be_bytes(&n), b"hello".to_vec());
        assert_eq!(to_be_bytes(&IBig::ZERO), Vec::<u8>::new());
    }

    #[test]
    fn byte_import_matches_hex_parse() {
        let hex_str = "dc4f177f659f561f638d88ed9f1f60a7932bdcbb59fed59e460a7949d43547dc";
        let from_bytes = from_be_bytes(&hex::decode(hex_str).unwrap());
        let from_text = IBig::from_str_radix(hex_str, 16).unwrap();
        assert_eq!(from_bytes, from_text);
        assert_eq!(format!("{:x}", from_bytes), hex_str);
    }

    #[test]
    fn mod_pow_small_values() {
        let p = IBig::from(13);
        assert_eq!(mod_pow(&IBig::from(2), &IBig::from(6), &p), IBig::from(12));
        assert_eq!(mod_pow(&IBig::from(3), &IBig::from(6), &p), IBig::from(1));
    }

    #[test]
    fn legendre_mod_13() {
        let p = IBig::from(13);
        assert_eq!(legendre(&IBig::from(3), &p), 1);
        assert_eq!(legendre(&IBig::from(2), &p), -1);
        assert_eq!(legendre(&IBig::from(13), &p), 0);
        // Exactly (p - 1) / 2 non-zero residues.
        let residues = (1..13)
            .filter(|i| legendre(&IBig::from(*i), &p) == 1)
            .count();
        assert_eq!(residues, 6);
    }

    #[test]
    fn sqrt_mod_13_returns_smaller_root() {
        let p = IBig::from(13);
        assert_eq!(sqrt_mod(&IBig::from(10), &p).unwrap(), IBig::from(6));
        assert_eq!(sqrt_mod(&IBig::ZERO, &p).unwrap(), IBig::ZERO);
    }

    #[test]
    fn sqrt_mod_rejects_non_residue() {
        let p = IBig::from(13);
        assert_eq!(sqrt_mod(&IBig::from(2), &p), Err(ElGamalError::NonResidue));
    }

    #[test]
    fn sqrt_mod_squares_back_for_all_residues_mod_13() {
        let p = IBig::from(13);
        for i in 1..13 {
            let n = IBig::from(i);
            if legendre(&n, &p) != 1 {
                continue;
            }
            let root = sqrt_mod(&n, &p).unwrap();
            assert_eq!(mod_reduce(&(&root * &root), &p), n);
            assert!(&root <= &(&p - &root));
        }
    }

    #[test]
    fn sqrt_mod_full_width_square() {
        let p = crate::curve::Curve::p();
        let s = IBig::from_str_radix("123456789abcdef123456789abcdef", 16).unwrap();
        let n = mod_reduce(&(&s * &s), p);
        let root = sqrt_mod(&n, p).unwrap();
        assert_eq!(mod_reduce(&(&root * &root), p), n);
        assert!(&root <= &(p - &root));
    }
}

use std::fmt::{Debug, Formatter};

use dashu::integer::{IBig, UBig};
use once_cell::sync::Lazy;

use crate::errors::ElGamalError;
use crate::field::{mod_inverse, mod_reduce};

/// Affine point with both coordinates in [0, p). The point at infinity has
/// no representation; operations whose result would be it return
/// [`ElGamalError::SymmetricPoints`].
#[derive(Clone, PartialEq, Eq)]
pub struct Point {
    pub x: IBig,
    pub y: IBig,
}

impl Point {
    pub fn new(x: IBig, y: IBig) -> Self {
        Point { x, y }
    }

    /// The symmetric point (x, p - y), canonicalized into the field.
    pub fn negate(&self) -> Point {
        Point {
            x: self.x.clone(),
            y: mod_reduce(&-&self.y, Curve::p()),
        }
    }
}

impl Debug for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:x}, {:x})", self.x, self.y)
    }
}

pub struct Curve;

impl Curve {
    /// ### Field Prime Modulus 𝑃
    ///
    /// 0xfffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f
    ///
    /// The prime defining the finite field over which secp256k1 is defined.
    /// All coordinate arithmetic is performed modulo 𝑃.
    pub const P: [u8; 32] = [
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe, 0xff, 0xff,
        0xfc, 0x2f,
    ];

    /// ### Generator Point 𝐺
    ///
    /// 𝐺.𝑋: 0x79be667ef9dcbbac55a06295ce870b07
    /// 𝐺.𝑌: 0x029bfcdb2dce28d959f2815b16f81798
    ///
    /// Base point for key generation and the ephemeral half of every
    /// ciphertext block. Both coordinates are 128 bits wide: this is NOT
    /// the standard secp256k1 generator, and the point does not lie on
    /// y^2 = x^3 + 7. It is kept verbatim so keys and ciphertexts stay
    /// compatible. The group walk lands on the curve y^2 = x^3 + b' with
    /// b' = G.y^2 - G.x^3, where the chord-and-tangent law is still a
    /// group, which is all encryption and decryption need.
    pub const G_X: [u8; 16] = [
        0x79, 0xbe, 0x66, 0x7e, 0xf9, 0xdc, 0xbb, 0xac, 0x55, 0xa0, 0x62, 0x95, 0xce, 0x87, 0x0b,
        0x07,
    ];
    pub const G_Y: [u8; 16] = [
        0x02, 0x9b, 0xfc, 0xdb, 0x2d, 0xce, 0x28, 0xd9, 0x59, 0xf2, 0x81, 0x5b, 0x16, 0xf8, 0x17,
        0x98,
    ];

    /// ### Built-in private scalar
    ///
    /// 0xdc4f177f659f561f638d88ed9f1f60a7932bdcbb59fed59e460a7949d43547dc
    ///
    /// The private key used when no key file is supplied.
    pub const DEFAULT_D: [u8; 32] = [
        0xdc, 0x4f, 0x17, 0x7f, 0x65, 0x9f, 0x56, 0x1f, 0x63, 0x8d, 0x88, 0xed, 0x9f, 0x1f, 0x60,
        0xa7, 0x93, 0x2b, 0xdc, 0xbb, 0x59, 0xfe, 0xd5, 0x9e, 0x46, 0x0a, 0x79, 0x49, 0xd4, 0x35,
        0x47, 0xdc,
    ];

    pub fn p() -> &'static IBig {
        &FIELD_P
    }

    pub fn a() -> &'static IBig {
        &CURVE_A
    }

    pub fn b() -> &'static IBig {
        &CURVE_B
    }

    pub fn g() -> Point {
        GENERATOR.clone()
    }

    pub fn default_d() -> &'static IBig {
        &DEFAULT_SCALAR
    }

    /// ### Point addition
    ///
    /// Chord-and-tangent addition of two affine points. Symmetric inputs
    /// (x1 = x2, y1 = -y2 mod p) sum to the point at infinity, which has no
    /// affine representation and is reported as an error.
    pub fn add(p1: &Point, p2: &Point) -> Result<Point, ElGamalError> {
        let p = Curve::p();
        if p1.x == p2.x && p1.y == mod_reduce(&-&p2.y, p) {
            return Err(ElGamalError::SymmetricPoints);
        }
        let k = if p1 == p2 {
            // Tangent slope (3*x1^2 + a) / (2*y1).
            let num = IBig::from(3) * &p1.x * &p1.x + Curve::a();
            let den = mod_inverse(&(IBig::from(2) * &p1.y), p)?;
            mod_reduce(&(num * den), p)
        } else {
            // Chord slope (y2 - y1) / (x2 - x1).
            let num = &p2.y - &p1.y;
            let den = mod_inverse(&(&p2.x - &p1.x), p)?;
            mod_reduce(&(num * den), p)
        };
        let x3 = mod_reduce(&(&k * &k - &p1.x - &p2.x), p);
        let y3 = mod_reduce(&(&k * (&p1.x - &x3) - &p1.y), p);
        Ok(Point::new(x3, y3))
    }

    /// ### Scalar multiplication
    ///
    /// Left-to-right double-and-add over the stripped binary expansion of
    /// n. The accumulator starts at the point itself (there is no identity
    /// to start from), so n must be at least 1.
    pub fn scalar_mul(point: &Point, n: &IBig) -> Result<Point, ElGamalError> {
        let bits = format!("{:b}", n);
        let mut res = point.clone();
        for bit in bits.chars().skip(1) {
            let doubled = Curve::add(&res, &res)?;
            res = if bit == '1' {
                Curve::add(&doubled, point)?
            } else {
                doubled
            };
        }
        Ok(res)
    }
}

static FIELD_P: Lazy<IBig> = Lazy::new(|| IBig::from(UBig::from_be_bytes(&Curve::P)));
static CURVE_A: Lazy<IBig> = Lazy::new(|| IBig::ZERO);
static CURVE_B: Lazy<IBig> = Lazy::new(|| IBig::from(7u8));
static GENERATOR: Lazy<Point> = Lazy::new(|| {
    Point::new(
        IBig::from(UBig::from_be_bytes(&Curve::G_X)),
        IBig::from(UBig::from_be_bytes(&Curve::G_Y)),
    )
});
static DEFAULT_SCALAR: Lazy<IBig> =
    Lazy::new(|| IBig::from(UBig::from_be_bytes(&Curve::DEFAULT_D)));

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigint::{legendre, sqrt_mod};

    // Smallest-x point genuinely on y^2 = x^3 + 7 mod p.
    fn on_curve_point() -> Point {
        let p = Curve::p();
        let mut x = IBig::ONE;
        loop {
            let rhs = mod_reduce(&(x.pow(3) + Curve::b()), p);
            if legendre(&rhs, p) == 1 {
                let y = sqrt_mod(&rhs, p).unwrap();
                return Point::new(x, y);
            }
            x += IBig::ONE;
        }
    }

    fn assert_on_curve(point: &Point) {
        let p = Curve::p();
        let lhs = mod_reduce(&(&point.y * &point.y), p);
        let rhs = mod_reduce(&(point.x.pow(3) + Curve::b()), p);
        assert_eq!(lhs, rhs, "point left the curve: {:?}", point);
    }

    #[test]
    fn constants_match_their_hex_literals() {
        assert_eq!(
            format!("{:x}", Curve::p()),
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"
        );
        let g = Curve::g();
        assert_eq!(format!("{:x}", g.x), "79be667ef9dcbbac55a06295ce870b07");
        assert_eq!(format!("{:x}", g.y), "29bfcdb2dce28d959f2815b16f81798");
        assert_eq!(
            format!("{:x}", Curve::default_d()),
            "dc4f177f659f561f638d88ed9f1f60a7932bdcbb59fed59e460a7949d43547dc"
        );
    }

    #[test]
    fn scalar_multiples_stay_on_curve() {
        let base = on_curve_point();
        assert_on_curve(&base);
        for n in [2u32, 3, 5, 97, 1_000_003] {
            let mult = Curve::scalar_mul(&base, &IBig::from(n)).unwrap();
            assert_on_curve(&mult);
        }
    }

    #[test]
    fn scalar_mul_matches_repeated_addition() {
        let base = on_curve_point();
        let two = Curve::add(&base, &base).unwrap();
        let three = Curve::add(&two, &base).unwrap();
        assert_eq!(Curve::scalar_mul(&base, &IBig::from(2)).unwrap(), two);
        assert_eq!(Curve::scalar_mul(&base, &IBig::from(3)).unwrap(), three);
        assert_eq!(Curve::scalar_mul(&base, &IBig::ONE).unwrap(), base);
    }

    #[test]
    fn addition_is_commutative() {
        let base = on_curve_point();
        let other = Curve::scalar_mul(&base, &IBig::from(5)).unwrap();
        assert_eq!(
            Curve::add(&base, &other).unwrap(),
            Curve::add(&other, &base).unwrap()
        );
    }

    #[test]
    fn adding_a_point_to_its_negation_fails() {
        let base = on_curve_point();
        let neg = base.negate();
        assert_eq!(Curve::add(&base, &neg), Err(ElGamalError::SymmetricPoints));
    }

    #[test]
    fn negation_is_an_involution() {
        let base = on_curve_point();
        assert_eq!(base.negate().negate(), base);
    }

    #[test]
    fn default_public_key_is_deterministic() {
        let q1 = Curve::scalar_mul(&Curve::g(), Curve::default_d()).unwrap();
        let q2 = Curve::scalar_mul(&Curve::g(), Curve::default_d()).unwrap();
        assert_eq!(q1, q2);
    }
}

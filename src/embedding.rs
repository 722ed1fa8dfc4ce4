//! Koblitz's probabilistic embedding of byte chunks as curve points.
//!
//! A chunk is imported big-endian as an integer m, scaled to x = m*K + 1,
//! and the x-coordinate is nudged upward until the right-hand side of the
//! curve equation is a quadratic residue. Division by K recovers m, so the
//! nudging never leaks into the decoded bytes.

use dashu::integer::IBig;

use crate::bigint::{from_be_bytes, legendre, sqrt_mod, to_be_bytes};
use crate::curve::{Curve, Point};
use crate::errors::ElGamalError;
use crate::field::mod_reduce;

/// Number of plaintext bytes carried by one point.
pub const BLOCK_SIZE: usize = 30;

/// Candidate x-coordinates tried per chunk; also the scaling factor.
pub const K: u32 = 40;

/// Maps a chunk of at most [`BLOCK_SIZE`] bytes to a point. Each candidate
/// x fails with probability ~1/2, so exhausting all K of them has
/// probability ~2^-K.
pub fn encode_chunk(chunk: &[u8]) -> Result<Point, ElGamalError> {
    if chunk.len() > BLOCK_SIZE {
        return Err(ElGamalError::ChunkTooLong(chunk.len()));
    }
    let p = Curve::p();
    let k = IBig::from(K);
    let m = from_be_bytes(chunk);
    let mut x = &m * &k + IBig::ONE;
    for _ in 0..K {
        let rhs = mod_reduce(&(&k * (x.pow(3) + Curve::a() * &x + Curve::b())), p);
        if legendre(&rhs, p) == 1 {
            let y = sqrt_mod(&rhs, p)?;
            return Ok(Point::new(x, y));
        }
        x += IBig::ONE;
    }
    Err(ElGamalError::EmbeddingFailed)
}

/// Left inverse of [`encode_chunk`]: the chunk is x div K, exported
/// big-endian. Chunks beginning with a zero byte do not round-trip,
/// because byte export drops leading zeros.
pub fn decode_point(point: &Point) -> Vec<u8> {
    let m = &point.x / IBig::from(K);
    to_be_bytes(&m)
}

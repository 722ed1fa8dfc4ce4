//! Textual codecs for keys and ciphertexts, plus plaintext chunking.
//!
//! Every integer travels as lowercase hex without a prefix and without
//! leading-zero padding, so a decoded value that happened to start with a
//! zero byte comes back shorter than it went in.

use dashu::integer::IBig;

use crate::curve::Point;
use crate::elgamal::KeyPair;
use crate::embedding::BLOCK_SIZE;
use crate::errors::ElGamalError;

/// Lowercase hex, no prefix, no padding.
pub fn to_hex(n: &IBig) -> String {
    format!("{:x}", n)
}

fn parse_hex(field: &str, err: ElGamalError) -> Result<IBig, ElGamalError> {
    IBig::from_str_radix(field, 16).map_err(|_| err)
}

/// Parses `hex(d);hex(Qx);hex(Qy)`; exactly three fields.
pub fn parse_key(text: &str) -> Result<KeyPair, ElGamalError> {
    let fields: Vec<&str> = text.split(';').collect();
    if fields.len() != 3 {
        return Err(ElGamalError::InvalidKey);
    }
    let d = parse_hex(fields[0], ElGamalError::InvalidKey)?;
    let x = parse_hex(fields[1], ElGamalError::InvalidKey)?;
    let y = parse_hex(fields[2], ElGamalError::InvalidKey)?;
    Ok(KeyPair {
        d,
        q: Point::new(x, y),
    })
}

pub fn format_key(key: &KeyPair) -> String {
    format!(
        "{};{};{}",
        to_hex(&key.d),
        to_hex(&key.q.x),
        to_hex(&key.q.y)
    )
}

/// Parses one `hex(C1x),hex(C1y),hex(C2x),hex(C2y)` block; exactly four
/// fields.
pub fn parse_block(text: &str) -> Result<(Point, Point), ElGamalError> {
    let fields: Vec<&str> = text.split(',').collect();
    if fields.len() != 4 {
        return Err(ElGamalError::InvalidCiphertext);
    }
    let c1x = parse_hex(fields[0], ElGamalError::InvalidCiphertext)?;
    let c1y = parse_hex(fields[1], ElGamalError::InvalidCiphertext)?;
    let c2x = parse_hex(fields[2], ElGamalError::InvalidCiphertext)?;
    let c2y = parse_hex(fields[3], ElGamalError::InvalidCiphertext)?;
    Ok((Point::new(c1x, c1y), Point::new(c2x, c2y)))
}

pub fn format_block(c1: &Point, c2: &Point) -> String {
    format!(
        "{},{},{},{}",
        to_hex(&c1.x),
        to_hex(&c1.y),
        to_hex(&c2.x),
        to_hex(&c2.y)
    )
}

/// Consecutive [`BLOCK_SIZE`]-byte chunks; the final chunk may be shorter.
pub fn chunk_plaintext(bytes: &[u8]) -> std::slice::Chunks<'_, u8> {
    bytes.chunks(BLOCK_SIZE)
}

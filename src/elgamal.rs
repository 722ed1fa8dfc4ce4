//! ElGamal over the curve group, and the chunked text pipeline gluing the
//! codecs, the embedding and the point arithmetic together.

use dashu::integer::IBig;

use crate::codec;
use crate::curve::{Curve, Point};
use crate::embedding;
use crate::errors::ElGamalError;
use crate::field::sample_scalar;

/// Private scalar d together with its public point Q = d*G.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyPair {
    pub d: IBig,
    pub q: Point,
}

impl KeyPair {
    /// The built-in key.
    pub fn default_key() -> Result<KeyPair, ElGamalError> {
        let d = Curve::default_d().clone();
        let q = Curve::scalar_mul(&Curve::g(), &d)?;
        Ok(KeyPair { d, q })
    }

    /// A fresh key with d sampled from the system CSPRNG.
    pub fn random() -> Result<KeyPair, ElGamalError> {
        let d = sample_scalar(Curve::p());
        let q = Curve::scalar_mul(&Curve::g(), &d)?;
        Ok(KeyPair { d, q })
    }
}

/// Key generation. The textual key is `hex(d);hex(Qx);hex(Qy)`.
pub fn generate(use_default: bool) -> Result<String, ElGamalError> {
    let key = if use_default {
        KeyPair::default_key()?
    } else {
        KeyPair::random()?
    };
    Ok(codec::format_key(&key))
}

/// ### Encrypt one point
///
/// C2 = r*G and C1 = M + r*Q for a fresh ephemeral scalar r.
pub fn encrypt_point(m: &Point, q: &Point) -> Result<(Point, Point), ElGamalError> {
    let r = sample_scalar(Curve::p());
    let c2 = Curve::scalar_mul(&Curve::g(), &r)?;
    let c1 = Curve::add(m, &Curve::scalar_mul(q, &r)?)?;
    Ok((c1, c2))
}

/// ### Decrypt one point
///
/// M = C1 - d*C2, the inverse of [`encrypt_point`].
pub fn decrypt_point(c1: &Point, c2: &Point, d: &IBig) -> Result<Point, ElGamalError> {
    let shared = Curve::scalar_mul(c2, d)?;
    Curve::add(c1, &shared.negate())
}

/// Encrypts message under the textual key, one block per plaintext chunk.
pub fn encrypt(message: &str, key: &str) -> Result<String, ElGamalError> {
    let key = codec::parse_key(key)?;
    let mut blocks = Vec::new();
    for chunk in codec::chunk_plaintext(message.as_bytes()) {
        let m = embedding::encode_chunk(chunk)?;
        let (c1, c2) = encrypt_point(&m, &key.q)?;
        blocks.push(codec::format_block(&c1, &c2));
    }
    Ok(blocks.join(";"))
}

/// Decrypts the textual ciphertext, concatenating the recovered chunks.
pub fn decrypt(ciphertext: &str, key: &str) -> Result<String, ElGamalError> {
    let key = codec::parse_key(key)?;
    let mut plain = Vec::new();
    for block in ciphertext.split(';') {
        if block.is_empty() {
            continue;
        }
        let (c1, c2) = codec::parse_block(block)?;
        let m = decrypt_point(&c1, &c2, &key.d)?;
        plain.extend_from_slice(&embedding::decode_point(&m));
    }
    String::from_utf8(plain).map_err(|_| ElGamalError::InvalidPlaintext)
}

//! ElGamal public-key encryption over secp256k1, embedding plaintext bytes
//! as curve points with Koblitz's probabilistic method.
//!
//! Plaintext is split into 30-byte chunks, each chunk is lifted to a point
//! by scanning candidate x-coordinates for a quadratic residue, and every
//! point is encrypted as the pair (M + r*Q, r*G). Keys and ciphertexts
//! travel as ';'/','-delimited hex text.
//!
//! This is an educational construction: nothing here is constant-time,
//! authenticated, or interoperable with standardized ECIES formats.

pub mod bigint;
pub mod codec;
pub mod curve;
pub mod elgamal;
pub mod embedding;
pub mod errors;
pub mod field;

pub use bigint::*;
pub use codec::*;
pub use curve::*;
pub use elgamal::*;
pub use embedding::*;
pub use errors::*;
pub use field::*;

use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElGamalError {
    InvalidKey,
    InvalidCiphertext,
    InvalidPlaintext,
    ChunkTooLong(usize),
    SymmetricPoints,
    NonInvertible,
    NonResidue,
    EmbeddingFailed,
}

impl fmt::Display for ElGamalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElGamalError::InvalidKey => {
                write!(f, "invalid key: expected three ';'-separated hex fields")
            }
            ElGamalError::InvalidCiphertext => {
                write!(
                    f,
                    "invalid ciphertext block: expected four ','-separated hex fields"
                )
            }
            ElGamalError::InvalidPlaintext => {
                write!(f, "decrypted bytes are not valid UTF-8")
            }
            ElGamalError::ChunkTooLong(len) => {
                write!(f, "plaintext chunk of {len} bytes exceeds the embedding block")
            }
            ElGamalError::SymmetricPoints => {
                write!(f, "sum of symmetric points is the point at infinity")
            }
            ElGamalError::NonInvertible => {
                write!(f, "element has no modular inverse")
            }
            ElGamalError::NonResidue => {
                write!(f, "no square root: operand is a quadratic non-residue")
            }
            ElGamalError::EmbeddingFailed => {
                write!(f, "message embedding exhausted all candidate x-coordinates")
            }
        }
    }
}

impl Error for ElGamalError {}

//! Error types for cipher and cryptanalysis operations

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    #[error("Invalid key matrix (entries must be in 0..=25 and the determinant invertible mod 26)")]
    InvalidKey,

    #[error("Determinant {0} has no multiplicative inverse mod 26")]
    NoInverse(u8),

    #[error("Ciphertext length {0} is not a multiple of the block size")]
    OddLength(usize),

    #[error("Character {0:?} is not a lowercase letter")]
    InvalidSymbol(char),

    #[error("Keyword cannot be empty")]
    EmptyKeyword,

    #[error("Ciphertext length {ciphertext} does not match plaintext length {plaintext}")]
    LengthMismatch { ciphertext: usize, plaintext: usize },

    #[error("Malformed key matrix: {0}")]
    MalformedMatrix(String),
}

pub type Result<T> = std::result::Result<T, CipherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            CipherError::OddLength(5).to_string(),
            "Ciphertext length 5 is not a multiple of the block size"
        );
        assert_eq!(
            CipherError::InvalidSymbol('7').to_string(),
            "Character '7' is not a lowercase letter"
        );
        assert_eq!(
            CipherError::LengthMismatch { ciphertext: 4, plaintext: 6 }.to_string(),
            "Ciphertext length 4 does not match plaintext length 6"
        );
    }
}

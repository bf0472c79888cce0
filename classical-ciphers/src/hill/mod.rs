//! Hill cipher with a 2x2 key matrix
//!
//! Plaintext is split into blocks of two symbols, each multiplied by the key matrix mod 26.
//! Decryption multiplies by the inverse matrix. Keys are typed by direction so a forward key
//! can never be passed where the inverse is expected.

pub mod matrix;
pub mod search;

pub use matrix::{Block, DecryptionKey, EncryptionKey, KeyMatrix, BLOCK_SIZE};
pub use search::{
    brute_force, brute_force_with_cancel, par_brute_force, par_brute_force_with_cancel,
    SearchOutcome, SEARCH_SPACE,
};

use crate::cipher::Cipher;
use crate::error::{CipherError, Result};
use crate::utils;

/// Splits a symbol sequence into blocks, failing if it is not a whole number of blocks
pub(crate) fn to_blocks(text: &str) -> Result<Vec<Block>> {
    let symbols = utils::to_symbols(text)?;
    if symbols.len() % BLOCK_SIZE != 0 {
        return Err(CipherError::OddLength(symbols.len()));
    }
    Ok(symbols.chunks_exact(BLOCK_SIZE).map(|c| [c[0], c[1]]).collect())
}

fn from_blocks(blocks: impl Iterator<Item = Block>) -> String {
    blocks.flatten().map(utils::to_char).collect()
}

/// Encrypts a lowercase message, padding it with `'x'` to an even length first
pub fn encrypt(plaintext: &str, key: &EncryptionKey) -> Result<String> {
    let blocks = to_blocks(&utils::extend_text(plaintext, BLOCK_SIZE))?;
    Ok(from_blocks(blocks.into_iter().map(|b| key.encrypt_block(b))))
}

/// Decrypts an even-length ciphertext with the inverse key
pub fn decrypt(ciphertext: &str, key: &DecryptionKey) -> Result<String> {
    let blocks = to_blocks(ciphertext)?;
    Ok(from_blocks(blocks.into_iter().map(|b| key.decrypt_block(b))))
}

/// Hill cipher holding both directions of one key
#[derive(Debug, Clone)]
pub struct HillCipher {
    encryption_key: EncryptionKey,
    decryption_key: DecryptionKey,
}

impl HillCipher {
    pub fn new(encryption_key: EncryptionKey) -> Self {
        Self {
            decryption_key: encryption_key.inverse(),
            encryption_key,
        }
    }

    /// Builds a cipher from a raw matrix, refusing invalid keys
    pub fn from_matrix(matrix: KeyMatrix) -> Result<Self> {
        EncryptionKey::new(matrix).map(Self::new)
    }

    pub fn encryption_key(&self) -> &EncryptionKey {
        &self.encryption_key
    }

    pub fn decryption_key(&self) -> &DecryptionKey {
        &self.decryption_key
    }
}

impl Cipher for HillCipher {
    fn encrypt(&self, plaintext: &str) -> Result<String> {
        encrypt(plaintext, &self.encryption_key)
    }

    fn decrypt(&self, ciphertext: &str) -> Result<String> {
        decrypt(ciphertext, &self.decryption_key)
    }

    fn name(&self) -> &'static str {
        "Hill"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> EncryptionKey {
        EncryptionKey::new(KeyMatrix::new([[3, 3], [2, 5]])).unwrap()
    }

    #[test]
    fn test_encrypt_help() {
        assert_eq!(encrypt("help", &key()).unwrap(), "hiat");
        assert_eq!(decrypt("hiat", &key().inverse()).unwrap(), "help");
    }

    #[test]
    fn test_odd_length_is_padded() {
        let ciphertext = encrypt("abc", &key()).unwrap();
        assert_eq!(ciphertext.len(), 4);
        assert_eq!(decrypt(&ciphertext, &key().inverse()).unwrap(), "abcx");
    }

    #[test]
    fn test_decrypt_rejects_odd_length() {
        assert_eq!(decrypt("hia", &key().inverse()), Err(CipherError::OddLength(3)));
    }

    #[test]
    fn test_rejects_non_letters() {
        assert_eq!(encrypt("he lp", &key()), Err(CipherError::InvalidSymbol(' ')));
        assert_eq!(decrypt("HIAT", &key().inverse()), Err(CipherError::InvalidSymbol('H')));
    }

    #[test]
    fn test_empty_message() {
        assert_eq!(encrypt("", &key()).unwrap(), "");
        assert_eq!(decrypt("", &key().inverse()).unwrap(), "");
    }

    #[test]
    fn test_cipher_trait_round_trip() {
        let cipher = HillCipher::new(key());
        let plaintext = "thequickbrownfoxjumpsoverthelazydog";
        let ciphertext = cipher.encrypt(plaintext).unwrap();
        assert_ne!(ciphertext, plaintext);
        assert_eq!(cipher.decrypt(&ciphertext).unwrap(), utils::extend_text(plaintext, BLOCK_SIZE));
        assert_eq!(cipher.name(), "Hill");
    }

    #[test]
    fn test_from_matrix_refuses_invalid_key() {
        assert!(HillCipher::from_matrix(KeyMatrix::new([[1, 2], [2, 4]])).is_err());
    }
}

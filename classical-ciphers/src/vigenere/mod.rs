//! Vigenère cipher over the lowercase alphabet
//!
//! Each plaintext symbol at position `i` is shifted forward by the keyword symbol at position
//! `i mod len(keyword)`; decryption shifts backwards.

pub mod analysis;
pub mod recovery;

pub use analysis::{
    estimate_key_length, estimated_key_length, frequency_table, index_of_coincidence,
    kasiski_examination, FrequencyTable,
};
pub use recovery::{recover_key, RecoveredKey, FREQ_ORDER};

use std::fmt;
use std::str::FromStr;

use crate::cipher::Cipher;
use crate::error::{CipherError, Result};
use crate::modular::reduce_mod26;
use crate::utils;

/// A non-empty keyword, stored as symbols
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Keyword {
    symbols: Vec<u8>,
}

impl Keyword {
    pub fn new(keyword: &str) -> Result<Self> {
        let symbols = utils::to_symbols(keyword)?;
        if symbols.is_empty() {
            return Err(CipherError::EmptyKeyword);
        }
        Ok(Self { symbols })
    }

    /// A one-symbol keyword, i.e. a plain shift
    pub fn from_symbol(symbol: u8) -> Self {
        Self {
            symbols: vec![reduce_mod26(symbol as i64)],
        }
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl FromStr for Keyword {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self> {
        Keyword::new(s)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&utils::from_symbols(&self.symbols))
    }
}

/// Shifts one symbol forward: `(p + k) mod 26`
pub fn encrypt_symbol(plain: u8, key: u8) -> u8 {
    reduce_mod26(plain as i64 + key as i64)
}

/// Shifts one symbol backwards: `(c - k) mod 26`
pub fn decrypt_symbol(cipher: u8, key: u8) -> u8 {
    reduce_mod26(cipher as i64 - key as i64)
}

fn apply(text: &str, keyword: &Keyword, shift: fn(u8, u8) -> u8) -> Result<String> {
    let symbols = utils::to_symbols(text)?;
    let key_symbols = keyword.symbols();

    Ok(symbols
        .into_iter()
        .zip(key_symbols.iter().cycle())
        .map(|(symbol, &key)| utils::to_char(shift(symbol, key)))
        .collect())
}

/// Encrypts a lowercase message with a repeating keyword
pub fn encrypt(plaintext: &str, keyword: &Keyword) -> Result<String> {
    apply(plaintext, keyword, encrypt_symbol)
}

/// Decrypts a lowercase message with a repeating keyword
///
/// A one-letter keyword decrypts a single character the same way.
pub fn decrypt(ciphertext: &str, keyword: &Keyword) -> Result<String> {
    apply(ciphertext, keyword, decrypt_symbol)
}

/// Vigenère cipher bound to one keyword
#[derive(Debug, Clone)]
pub struct VigenereCipher {
    keyword: Keyword,
}

impl VigenereCipher {
    pub fn new(keyword: Keyword) -> Self {
        Self { keyword }
    }

    pub fn keyword(&self) -> &Keyword {
        &self.keyword
    }
}

impl Cipher for VigenereCipher {
    fn encrypt(&self, plaintext: &str) -> Result<String> {
        encrypt(plaintext, &self.keyword)
    }

    fn decrypt(&self, ciphertext: &str) -> Result<String> {
        decrypt(ciphertext, &self.keyword)
    }

    fn name(&self) -> &'static str {
        "Vigenère"
    }
}

//! Utility functions for alphabet symbols and message preparation

use crate::error::{CipherError, Result};
use crate::modular::NUM_LETTERS;

/// Character appended to messages whose length is not a multiple of the block size
pub const FILL_CHAR: char = 'x';

/// Converts a lowercase letter to its symbol value (a = 0, ..., z = 25)
pub fn to_symbol(c: char) -> Option<u8> {
    if c.is_ascii_lowercase() {
        Some(c as u8 - b'a')
    } else {
        None
    }
}

/// Converts a symbol value back to its lowercase letter
///
/// Values outside the alphabet are reduced mod 26 first.
pub fn to_char(symbol: u8) -> char {
    (b'a' + symbol % NUM_LETTERS as u8) as char
}

/// Converts a whole message to symbols, rejecting anything that is not `a-z`
pub fn to_symbols(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .map(|c| to_symbol(c).ok_or(CipherError::InvalidSymbol(c)))
        .collect()
}

/// Converts symbols back to a lowercase string
pub fn from_symbols(symbols: &[u8]) -> String {
    symbols.iter().map(|&s| to_char(s)).collect()
}

/// Lowercases a message and strips all whitespace
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Keeps only ASCII letters, lowercased
pub fn letters_only(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Pads a message with `FILL_CHAR` until its length is a multiple of `block_size`
pub fn extend_text(text: &str, block_size: usize) -> String {
    let mut extended = text.to_string();
    let remainder = text.chars().count() % block_size;

    if remainder != 0 {
        let fill_amount = block_size - remainder;
        extended.extend(std::iter::repeat(FILL_CHAR).take(fill_amount));
    }

    extended
}

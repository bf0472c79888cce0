//! Generic text cipher trait

use crate::error::Result;

/// Trait for a keyed cipher over the lowercase alphabet
pub trait Cipher {
    /// Encrypts a normalized lowercase message
    fn encrypt(&self, plaintext: &str) -> Result<String>;

    /// Decrypts a ciphertext produced by `encrypt`
    fn decrypt(&self, ciphertext: &str) -> Result<String>;

    /// Returns the display name of the cipher
    fn name(&self) -> &'static str;
}

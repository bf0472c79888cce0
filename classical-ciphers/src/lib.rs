//! # Classical Ciphers Library
//!
//! This library implements two classical ciphers together with known-plaintext attacks on them.
//!
//! ## Supported Ciphers
//!
//! - **Hill** (2x2 key matrix mod 26) - block cipher, broken by exhaustive key search
//! - **Vigenère** (repeating keyword) - stream cipher, broken with Kasiski examination,
//!   index of coincidence and column frequency analysis
//!
//! ## Usage
//!
//! ```rust
//! use classical_ciphers::hill::{self, EncryptionKey, KeyMatrix};
//! use classical_ciphers::vigenere::{self, Keyword};
//!
//! let key = EncryptionKey::new(KeyMatrix::new([[3, 3], [2, 5]]))?;
//! let ciphertext = hill::encrypt("help", &key)?;
//! assert_eq!(hill::decrypt(&ciphertext, &key.inverse())?, "help");
//!
//! let keyword = Keyword::new("lemon")?;
//! let ciphertext = vigenere::encrypt("attackatdawn", &keyword)?;
//! assert_eq!(ciphertext, "lxfopvefrnhr");
//! # Ok::<(), classical_ciphers::CipherError>(())
//! ```
//!
//! ## Input
//!
//! Cipher operations work on lowercase letters only. Use [`utils::normalize`] to lowercase a
//! message and strip its whitespace first. The statistics in [`vigenere::analysis`] ignore
//! non-alphabetic characters.

// Public modules
pub mod cipher;
pub mod error;
pub mod hill;
pub mod modular;
pub mod utils;
pub mod vigenere;

// Re-exports for easy access
pub use cipher::Cipher;
pub use error::{CipherError, Result};
pub use hill::HillCipher;
pub use vigenere::VigenereCipher;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Names of the supported ciphers
pub fn supported_ciphers() -> Vec<&'static str> {
    vec!["Hill", "Vigenère"]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hill::{EncryptionKey, KeyMatrix};
    use crate::vigenere::Keyword;

    #[test]
    fn test_ciphers_through_trait_objects() {
        let ciphers: Vec<Box<dyn Cipher>> = vec![
            Box::new(HillCipher::new(
                EncryptionKey::new(KeyMatrix::new([[3, 3], [2, 5]])).unwrap(),
            )),
            Box::new(VigenereCipher::new(Keyword::new("lemon").unwrap())),
        ];

        for cipher in &ciphers {
            let ciphertext = cipher.encrypt("attackatdawn").unwrap();
            assert_eq!(cipher.decrypt(&ciphertext).unwrap(), "attackatdawn", "{}", cipher.name());
        }

        let names: Vec<_> = ciphers.iter().map(|c| c.name()).collect();
        assert_eq!(names, supported_ciphers());
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}

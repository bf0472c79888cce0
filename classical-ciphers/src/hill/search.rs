//! Known-plaintext key search for the Hill cipher
//!
//! Every 2x2 matrix with entries in `0..26` is tried in row-major order
//! (`[[i, j], [k, l]]`, `l` varying fastest). The first valid candidate that decrypts the
//! ciphertext to the known plaintext wins.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use log::{debug, trace};
use rayon::prelude::*;

use super::matrix::{Block, DecryptionKey, KeyMatrix, BLOCK_SIZE};
use super::to_blocks;
use crate::error::{CipherError, Result};
use crate::modular::NUM_LETTERS;
use crate::utils;

/// Number of candidate matrices (26^4)
pub const SEARCH_SPACE: usize = NUM_LETTERS * NUM_LETTERS * NUM_LETTERS * NUM_LETTERS;

/// Candidates sharing the same top-left entry
const PARTITION_SIZE: usize = SEARCH_SPACE / NUM_LETTERS;

/// Result of a cancellable search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(DecryptionKey),
    Exhausted,
    Cancelled,
}

impl SearchOutcome {
    pub fn key(self) -> Option<DecryptionKey> {
        match self {
            SearchOutcome::Found(key) => Some(key),
            _ => None,
        }
    }
}

/// Decodes an enumeration index into its candidate matrix
fn candidate(index: usize) -> KeyMatrix {
    let n = NUM_LETTERS;
    KeyMatrix::new([
        [(index / (n * n * n)) as i32, (index / (n * n) % n) as i32],
        [(index / n % n) as i32, (index % n) as i32],
    ])
}

/// Symbol blocks of both texts, checked before any candidate is tried
struct KnownPair {
    ciphertext: Vec<Block>,
    plaintext: Vec<Block>,
}

impl KnownPair {
    fn new(ciphertext: &str, plaintext: &str) -> Result<Self> {
        let ciphertext = to_blocks(ciphertext)?;
        let plaintext = to_blocks(&utils::extend_text(plaintext, BLOCK_SIZE))?;
        if ciphertext.len() != plaintext.len() {
            return Err(CipherError::LengthMismatch {
                ciphertext: ciphertext.len() * BLOCK_SIZE,
                plaintext: plaintext.len() * BLOCK_SIZE,
            });
        }
        Ok(Self { ciphertext, plaintext })
    }

    /// Tries one candidate; `None` if it is invalid or decrypts to something else
    fn test(&self, index: usize) -> Option<DecryptionKey> {
        let key = DecryptionKey::new(candidate(index)).ok()?;
        self.ciphertext
            .iter()
            .zip(&self.plaintext)
            .all(|(&c, &p)| key.decrypt_block(c) == p)
            .then_some(key)
    }
}

/// Searches for the decryption key mapping `ciphertext` to `plaintext`
///
/// `plaintext` is padded the same way encryption pads it. Returns `Ok(None)` once all
/// candidates are exhausted.
pub fn brute_force(ciphertext: &str, plaintext: &str) -> Result<Option<DecryptionKey>> {
    let never = AtomicBool::new(false);
    brute_force_with_cancel(ciphertext, plaintext, &never).map(SearchOutcome::key)
}

/// Sequential search polling `cancel` between candidates
pub fn brute_force_with_cancel(
    ciphertext: &str,
    plaintext: &str,
    cancel: &AtomicBool,
) -> Result<SearchOutcome> {
    let pair = KnownPair::new(ciphertext, plaintext)?;
    debug!("Searching {} candidate keys for {} blocks", SEARCH_SPACE, pair.ciphertext.len());

    for index in 0..SEARCH_SPACE {
        if cancel.load(Ordering::Relaxed) {
            debug!("Search cancelled at candidate {}", index);
            return Ok(SearchOutcome::Cancelled);
        }
        if let Some(key) = pair.test(index) {
            debug!("Found decryption key {} at candidate {}", key.matrix(), index);
            return Ok(SearchOutcome::Found(key));
        }
    }

    debug!("Search exhausted without a match");
    Ok(SearchOutcome::Exhausted)
}

/// Parallel search; returns the same key as [`brute_force`]
pub fn par_brute_force(ciphertext: &str, plaintext: &str) -> Result<Option<DecryptionKey>> {
    let never = AtomicBool::new(false);
    par_brute_force_with_cancel(ciphertext, plaintext, &never).map(SearchOutcome::key)
}

/// Parallel search split on the top-left entry of the matrix.
///
/// Workers share the lowest matching index found so far and stop once their own position
/// passes it, so the reported key is always the first match in enumeration order.
pub fn par_brute_force_with_cancel(
    ciphertext: &str,
    plaintext: &str,
    cancel: &AtomicBool,
) -> Result<SearchOutcome> {
    let pair = KnownPair::new(ciphertext, plaintext)?;
    let lowest = AtomicUsize::new(usize::MAX);
    let interrupted = AtomicBool::new(false);
    debug!("Searching {} candidate keys in {} partitions", SEARCH_SPACE, NUM_LETTERS);

    let found = (0..NUM_LETTERS)
        .into_par_iter()
        .filter_map(|partition| {
            let start = partition * PARTITION_SIZE;
            for index in start..start + PARTITION_SIZE {
                if index >= lowest.load(Ordering::Acquire) {
                    trace!("Partition {} stopped at {}", partition, index);
                    return None;
                }
                if cancel.load(Ordering::Relaxed) {
                    interrupted.store(true, Ordering::Relaxed);
                    return None;
                }
                if let Some(key) = pair.test(index) {
                    lowest.fetch_min(index, Ordering::AcqRel);
                    return Some((index, key));
                }
            }
            None
        })
        .min_by_key(|&(index, _)| index);

    if interrupted.load(Ordering::Relaxed) {
        debug!("Parallel search cancelled");
        return Ok(SearchOutcome::Cancelled);
    }

    Ok(match found {
        Some((index, key)) => {
            debug!("Found decryption key {} at candidate {}", key.matrix(), index);
            SearchOutcome::Found(key)
        }
        None => {
            debug!("Search exhausted without a match");
            SearchOutcome::Exhausted
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hill::{decrypt, encrypt, EncryptionKey};

    fn key() -> EncryptionKey {
        EncryptionKey::new(KeyMatrix::new([[3, 3], [2, 5]])).unwrap()
    }

    #[test]
    fn test_candidate_order() {
        assert_eq!(candidate(0), KeyMatrix::new([[0, 0], [0, 0]]));
        assert_eq!(candidate(1), KeyMatrix::new([[0, 0], [0, 1]]));
        assert_eq!(candidate(26), KeyMatrix::new([[0, 0], [1, 0]]));
        assert_eq!(candidate(SEARCH_SPACE - 1), KeyMatrix::new([[25, 25], [25, 25]]));
    }

    #[test]
    fn test_recovers_unique_key() {
        // The plaintext blocks of "help" form an invertible matrix, so only one key fits
        let found = brute_force("hiat", "help").unwrap().unwrap();
        assert_eq!(found, key().inverse());
        assert_eq!(found.inverse(), key());
    }

    #[test]
    fn test_short_sample_may_match_another_key() {
        let ciphertext = encrypt("abcx", &key()).unwrap();
        let found = brute_force(&ciphertext, "abcx").unwrap().unwrap();
        assert_eq!(decrypt(&ciphertext, &found).unwrap(), "abcx");
    }

    #[test]
    fn test_plaintext_is_extended() {
        let ciphertext = encrypt("abc", &key()).unwrap();
        let found = brute_force(&ciphertext, "abc").unwrap().unwrap();
        assert_eq!(decrypt(&ciphertext, &found).unwrap(), "abcx");
    }

    #[test]
    fn test_exhausted() {
        // only a singular matrix maps "ab" back to "aa"
        assert_eq!(brute_force("ab", "aa").unwrap(), None);
    }

    #[test]
    fn test_input_errors() {
        assert_eq!(brute_force("abc", "abc"), Err(CipherError::OddLength(3)));
        assert_eq!(
            brute_force("abcd", "ab"),
            Err(CipherError::LengthMismatch { ciphertext: 4, plaintext: 2 })
        );
        assert_eq!(brute_force("ab d", "abcd"), Err(CipherError::InvalidSymbol(' ')));
    }

    #[test]
    fn test_cancelled_before_start() {
        let cancel = AtomicBool::new(true);
        assert_eq!(
            brute_force_with_cancel("hiat", "help", &cancel).unwrap(),
            SearchOutcome::Cancelled
        );
        assert_eq!(
            par_brute_force_with_cancel("hiat", "help", &cancel).unwrap(),
            SearchOutcome::Cancelled
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let ciphertext = encrypt("abcx", &key()).unwrap();
        assert_eq!(
            par_brute_force(&ciphertext, "abcx").unwrap(),
            brute_force(&ciphertext, "abcx").unwrap()
        );
        assert_eq!(par_brute_force("hiat", "help").unwrap(), Some(key().inverse()));
        assert_eq!(par_brute_force("ab", "aa").unwrap(), None);
    }
}

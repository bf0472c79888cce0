//! Known-plaintext keyword recovery for the Vigenère cipher
//!
//! Candidate keyword lengths come from the Kasiski examination, or from the IC estimate when
//! Kasiski finds nothing. For each length the ciphertext is split into columns and every
//! column proposes key letters by lining up one of its letters against the English frequency
//! ranking. A proposed letter is kept only if it decrypts the ciphertext at the current offset
//! to the known plaintext. This is a heuristic: it can miss the key even when one exists.

use log::{debug, trace};

use super::analysis::{
    estimated_key_length, frequency_table, index_of_coincidence, kasiski_examination,
};
use super::decrypt_symbol;
use crate::error::{CipherError, Result};
use crate::utils;

/// English letters by decreasing frequency
pub const FREQ_ORDER: &str = "etaoinshrdlcumwfgypbvkjxqz";

/// Key stream recovered by [`recover_key`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveredKey {
    key: String,
    key_length: usize,
    complete: bool,
}

impl RecoveredKey {
    /// Recovered key letters, one per ciphertext position starting at 0
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Candidate keyword length that produced this key
    pub fn key_length(&self) -> usize {
        self.key_length
    }

    /// True when a key letter was verified for every ciphertext position
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Shortest prefix whose repetition reproduces the whole key stream
    pub fn period(&self) -> &str {
        let bytes = self.key.as_bytes();
        let p = (1..=bytes.len())
            .find(|&p| bytes.iter().enumerate().all(|(i, &b)| b == bytes[i % p]))
            .unwrap_or(bytes.len());
        &self.key[..p]
    }
}

/// Splits symbols into `key_length` interleaved columns
fn split_by_key_length(symbols: &[u8], key_length: usize) -> Vec<Vec<u8>> {
    let mut columns = vec![Vec::new(); key_length];

    for (i, &s) in symbols.iter().enumerate() {
        columns[i % key_length].push(s);
    }

    columns
}

/// Second entry of the column sorted by ascending frequency (stable), or the only entry
fn frequency_anchor(column: &[u8]) -> Option<u8> {
    let frequencies = frequency_table(&utils::from_symbols(column));
    let mut sorted = column.to_vec();
    sorted.sort_by_key(|&s| frequencies[s as usize]);
    sorted.get(1).or_else(|| sorted.first()).copied()
}

fn recover_for_length(ciphertext: &[u8], plaintext: &[u8], key_length: usize) -> RecoveredKey {
    let mut key: Vec<u8> = Vec::new();
    let mut offset = 0;

    for (index, column) in split_by_key_length(ciphertext, key_length).iter().enumerate() {
        let Some(anchor) = frequency_anchor(column) else {
            continue;
        };
        trace!("Column {} anchored on {:?}", index, utils::to_char(anchor));

        for rank in FREQ_ORDER.bytes() {
            if offset == ciphertext.len() {
                break;
            }
            let candidate = decrypt_symbol(anchor, rank - b'a');
            if decrypt_symbol(ciphertext[offset], candidate) == plaintext[offset] {
                key.push(candidate);
                offset += 1;
            }
        }
    }

    RecoveredKey {
        complete: key.len() == ciphertext.len(),
        key: utils::from_symbols(&key),
        key_length,
    }
}

/// Recovers the key stream of a Vigenère ciphertext given its plaintext.
///
/// Returns `Ok(None)` when no candidate key length can be derived or no key letter could be
/// verified. An incomplete [`RecoveredKey`] is the longest partial result over all candidate
/// lengths and should be treated as unverified.
pub fn recover_key(ciphertext: &str, plaintext: &str) -> Result<Option<RecoveredKey>> {
    let ct = utils::to_symbols(ciphertext)?;
    let pt = utils::to_symbols(plaintext)?;
    if ct.len() != pt.len() {
        return Err(CipherError::LengthMismatch {
            ciphertext: ct.len(),
            plaintext: pt.len(),
        });
    }

    let key_lengths: Vec<usize> = match kasiski_examination(ciphertext) {
        Some(lengths) => lengths.into_iter().collect(),
        None => match estimated_key_length(ct.len(), index_of_coincidence(ciphertext)) {
            Some(length) => vec![length],
            None => {
                debug!("No candidate key length for {} letters", ct.len());
                return Ok(None);
            }
        },
    };
    debug!("Candidate key lengths: {:?}", key_lengths);

    let mut best: Option<RecoveredKey> = None;
    for key_length in key_lengths {
        let attempt = recover_for_length(&ct, &pt, key_length);
        trace!("Length {} recovered {} letters", key_length, attempt.key.len());

        if attempt.complete {
            debug!("Recovered complete key with length {}", key_length);
            return Ok(Some(attempt));
        }
        if best.as_ref().map_or(true, |b| attempt.key.len() > b.key.len()) {
            best = Some(attempt);
        }
    }

    Ok(best.filter(|b| !b.key.is_empty()))
}

//! Statistics used to estimate the keyword length of a Vigenère ciphertext

use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::trace;

use crate::modular::{gcd, NUM_LETTERS};
use crate::utils;

/// Occurrences of each letter, indexed by symbol
pub type FrequencyTable = [u32; NUM_LETTERS];

/// Shortest repeated substring considered by the Kasiski examination
pub const MIN_REPEAT_LEN: usize = 3;

/// Counts the frequency of each letter in the given text.
///
/// # Arguments
///
/// * `text` - The input text to analyze. Non-alphabetic characters are ignored.
///
/// # Returns
///
/// An array of 26 frequencies for letters a-z.
pub fn frequency_table(text: &str) -> FrequencyTable {
    let mut frequencies: FrequencyTable = [0; NUM_LETTERS];

    for c in text.chars() {
        if c.is_ascii_alphabetic() {
            let index: usize = (c.to_ascii_lowercase() as u8 - b'a') as usize;
            frequencies[index] += 1;
        }
    }

    frequencies
}

/// Calculates the Index of Coincidence (IC) for the given text.
///
/// `IC = sum(n_i * (n_i - 1)) / (N * (N - 1))` over the letter counts `n_i` and the number of
/// letters `N`. Returns 0.0 when the text has fewer than two letters.
pub fn index_of_coincidence(text: &str) -> f64 {
    let frequencies = frequency_table(text);
    let total: u64 = frequencies.iter().map(|&f| f as u64).sum();

    if total < 2 {
        return 0.0;
    }

    let numerator: f64 = frequencies
        .iter()
        .map(|&f| (f as u64 * (f as u64).saturating_sub(1)) as f64)
        .sum();

    numerator / (total * (total - 1)) as f64
}

/// Approximate keyword length from the text length and its IC:
///
/// ```text
///                0.027 * n
/// r ~= ----------------------------------
///      (n - 1) * IC - 0.038 * n + 0.065
/// ```
///
/// The result can be negative or unbounded for short or flat texts; see
/// [`estimated_key_length`].
pub fn estimate_key_length(n: usize, ic: f64) -> f64 {
    let n = n as f64;
    0.027 * n / ((n - 1.0) * ic - 0.038 * n + 0.065)
}

/// Floors the estimate, or `None` if it is not a usable length
pub fn estimated_key_length(n: usize, ic: f64) -> Option<usize> {
    let r = estimate_key_length(n, ic);
    (r.is_finite() && r >= 1.0).then(|| r.floor() as usize)
}

/// Kasiski examination: candidate key lengths from the spacing of repeated substrings.
///
/// Every substring of at least three letters that occurs more than once contributes the
/// distances between its successive occurrences. The gcd of every pair of distances greater
/// than 1 is a candidate. Returns `None` when no such gcd exists.
///
/// Enumerating all substrings is cubic in the text length, so this is meant for short texts.
pub fn kasiski_examination(ciphertext: &str) -> Option<BTreeSet<usize>> {
    let text = utils::letters_only(ciphertext);
    let bytes = text.as_bytes();

    let mut occurrences: HashMap<&[u8], Vec<usize>> = HashMap::new();
    for start in 0..bytes.len() {
        for end in start + MIN_REPEAT_LEN..=bytes.len() {
            occurrences.entry(&bytes[start..end]).or_default().push(start);
        }
    }

    // distance -> number of times it was seen
    let mut distances: BTreeMap<usize, usize> = BTreeMap::new();
    for positions in occurrences.values().filter(|p| p.len() > 1) {
        for pair in positions.windows(2) {
            *distances.entry(pair[1] - pair[0]).or_default() += 1;
        }
    }
    trace!("Kasiski: {} distinct distances", distances.len());

    let distinct: Vec<(usize, usize)> = distances.into_iter().collect();
    let mut gcds = BTreeSet::new();
    for (i, &(a, count)) in distinct.iter().enumerate() {
        // two equal distances pair with each other
        if count > 1 && a > 1 {
            gcds.insert(a);
        }
        for &(b, _) in &distinct[i + 1..] {
            let r = gcd(a, b);
            if r > 1 {
                gcds.insert(r);
            }
        }
    }

    if gcds.is_empty() {
        None
    } else {
        Some(gcds)
    }
}

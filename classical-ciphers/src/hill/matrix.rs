//! 2x2 key matrices over the integers modulo 26

use std::fmt;
use std::str::FromStr;

use crate::error::{CipherError, Result};
use crate::modular::{inverse_mod26, reduce_mod26, NUM_LETTERS};

/// Size of the N x N key matrix and of each text block
pub const BLOCK_SIZE: usize = 2;

/// A block of symbols, multiplied as a column vector
pub type Block = [u8; BLOCK_SIZE];

/// A raw 2x2 matrix as supplied by a caller.
///
/// Entries are kept as signed integers so out-of-range input can be represented and rejected
/// by [`KeyMatrix::is_valid`] instead of being silently truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyMatrix {
    entries: [[i32; BLOCK_SIZE]; BLOCK_SIZE],
}

impl KeyMatrix {
    pub const IDENTITY: KeyMatrix = KeyMatrix::new([[1, 0], [0, 1]]);

    pub const fn new(entries: [[i32; BLOCK_SIZE]; BLOCK_SIZE]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> [[i32; BLOCK_SIZE]; BLOCK_SIZE] {
        self.entries
    }

    /// Determinant `ad - bc`, not reduced
    pub fn determinant(&self) -> i64 {
        let [[a, b], [c, d]] = self.entries;
        a as i64 * d as i64 - b as i64 * c as i64
    }

    fn in_bounds(&self) -> bool {
        self.entries
            .iter()
            .flatten()
            .all(|&e| (0..NUM_LETTERS as i32).contains(&e))
    }

    /// A key is valid when every entry is in `0..=25` and the determinant is invertible mod 26
    pub fn is_valid(&self) -> bool {
        self.in_bounds() && inverse_mod26(reduce_mod26(self.determinant())).is_some()
    }

    /// Inverts the matrix mod 26: `det^-1 * [d, -b; -c, a]`
    ///
    /// Returns `None` if the determinant has no inverse.
    pub fn invert(&self) -> Option<KeyMatrix> {
        inverse_mod26(reduce_mod26(self.determinant())).map(|det_inv| self.scaled_adjugate(det_inv))
    }

    fn scaled_adjugate(&self, factor: u8) -> KeyMatrix {
        let [[a, b], [c, d]] = self.entries;
        let scale = |x: i32| reduce_mod26(factor as i64 * x as i64) as i32;
        KeyMatrix::new([[scale(d), scale(-b)], [scale(-c), scale(a)]])
    }

    /// Matrix-vector product mod 26, each component reduced independently
    pub fn apply(&self, block: Block) -> Block {
        let [[a, b], [c, d]] = self.entries;
        let [x, y] = block.map(i64::from);
        [
            reduce_mod26(a as i64 * x + b as i64 * y),
            reduce_mod26(c as i64 * x + d as i64 * y),
        ]
    }

    /// Matrix product mod 26
    pub fn multiply(&self, other: &KeyMatrix) -> KeyMatrix {
        let mut product = [[0i32; BLOCK_SIZE]; BLOCK_SIZE];
        for (i, row) in product.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                let sum: i64 = (0..BLOCK_SIZE)
                    .map(|k| self.entries[i][k] as i64 * other.entries[k][j] as i64)
                    .sum();
                *cell = reduce_mod26(sum) as i32;
            }
        }
        KeyMatrix::new(product)
    }
}

impl fmt::Display for KeyMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [[a, b], [c, d]] = self.entries;
        write!(f, "[[{a},{b}],[{c},{d}]]")
    }
}

/// Parses the `[[a,b],[c,d]]` literal used on the command line
impl FromStr for KeyMatrix {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let inner = compact
            .strip_prefix("[[")
            .and_then(|rest| rest.strip_suffix("]]"))
            .ok_or_else(|| CipherError::MalformedMatrix(format!("expected [[a,b],[c,d]], got {s:?}")))?;

        let rows: Vec<&str> = inner.split("],[").collect();
        if rows.len() != BLOCK_SIZE {
            return Err(CipherError::MalformedMatrix(format!(
                "expected {BLOCK_SIZE} rows, got {}",
                rows.len()
            )));
        }

        let mut entries = [[0i32; BLOCK_SIZE]; BLOCK_SIZE];
        for (row, text) in entries.iter_mut().zip(rows) {
            let cells: Vec<&str> = text.split(',').collect();
            if cells.len() != BLOCK_SIZE {
                return Err(CipherError::MalformedMatrix(format!(
                    "expected {BLOCK_SIZE} entries per row, got {}",
                    cells.len()
                )));
            }
            for (cell, value) in row.iter_mut().zip(cells) {
                *cell = value
                    .parse()
                    .map_err(|_| CipherError::MalformedMatrix(format!("{value:?} is not an integer")))?;
            }
        }

        Ok(KeyMatrix::new(entries))
    }
}

/// Checks bounds and invertibility, returning the determinant's inverse
fn checked(matrix: &KeyMatrix) -> Result<u8> {
    if !matrix.in_bounds() {
        return Err(CipherError::InvalidKey);
    }
    let det = reduce_mod26(matrix.determinant());
    inverse_mod26(det).ok_or(CipherError::NoInverse(det))
}

/// A validated key used in the forward (encrypting) direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncryptionKey {
    matrix: KeyMatrix,
    det_inv: u8,
}

impl EncryptionKey {
    pub fn new(matrix: KeyMatrix) -> Result<Self> {
        let det_inv = checked(&matrix)?;
        Ok(Self { matrix, det_inv })
    }

    pub fn matrix(&self) -> &KeyMatrix {
        &self.matrix
    }

    /// The matching decryption key
    pub fn inverse(&self) -> DecryptionKey {
        DecryptionKey {
            matrix: self.matrix.scaled_adjugate(self.det_inv),
            det_inv: reduce_mod26(self.matrix.determinant()),
        }
    }

    /// Encrypts one block: `c = K * p mod 26`
    pub fn encrypt_block(&self, block: Block) -> Block {
        self.matrix.apply(block)
    }
}

/// A validated key used in the reverse (decrypting) direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecryptionKey {
    matrix: KeyMatrix,
    det_inv: u8,
}

impl DecryptionKey {
    pub fn new(matrix: KeyMatrix) -> Result<Self> {
        let det_inv = checked(&matrix)?;
        Ok(Self { matrix, det_inv })
    }

    pub fn matrix(&self) -> &KeyMatrix {
        &self.matrix
    }

    /// The matching encryption key
    pub fn inverse(&self) -> EncryptionKey {
        EncryptionKey {
            matrix: self.matrix.scaled_adjugate(self.det_inv),
            det_inv: reduce_mod26(self.matrix.determinant()),
        }
    }

    /// Decrypts one block: `p = K^-1 * c mod 26`
    pub fn decrypt_block(&self, block: Block) -> Block {
        self.matrix.apply(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: KeyMatrix = KeyMatrix::new([[3, 3], [2, 5]]);

    #[test]
    fn test_valid_key() {
        assert!(KEY.is_valid());
        assert_eq!(KEY.determinant(), 9);
    }

    #[test]
    fn test_non_invertible_determinants() {
        // det = 0, 2, 4, 13 and 26
        for entries in [
            [[1, 2], [2, 4]],
            [[2, 0], [0, 1]],
            [[2, 0], [0, 2]],
            [[13, 0], [0, 1]],
            [[13, 0], [0, 2]],
        ] {
            assert!(!KeyMatrix::new(entries).is_valid(), "{entries:?}");
        }
    }

    #[test]
    fn test_negative_determinant_is_normalized() {
        // det = -1, which is 25 mod 26
        let m = KeyMatrix::new([[0, 1], [1, 0]]);
        assert!(m.is_valid());
        assert_eq!(m.invert(), Some(m));
    }

    #[test]
    fn test_out_of_range_entries() {
        assert!(!KeyMatrix::new([[26, 3], [2, 5]]).is_valid());
        assert!(!KeyMatrix::new([[3, -1], [2, 5]]).is_valid());
        assert_eq!(
            EncryptionKey::new(KeyMatrix::new([[3, 3], [2, 30]])),
            Err(CipherError::InvalidKey)
        );
        assert_eq!(
            EncryptionKey::new(KeyMatrix::new([[2, 0], [0, 1]])),
            Err(CipherError::NoInverse(2))
        );
    }

    #[test]
    fn test_invert() {
        let inv = KEY.invert().unwrap();
        assert_eq!(inv, KeyMatrix::new([[15, 17], [20, 9]]));
        assert_eq!(KEY.multiply(&inv), KeyMatrix::IDENTITY);
        assert_eq!(inv.invert(), Some(KEY));
        assert_eq!(KeyMatrix::new([[1, 2], [2, 4]]).invert(), None);
    }

    #[test]
    fn test_invert_all_valid_keys() {
        for index in (0..26usize.pow(4)).step_by(97) {
            let m = KeyMatrix::new([
                [(index / 17576) as i32, (index / 676 % 26) as i32],
                [(index / 26 % 26) as i32, (index % 26) as i32],
            ]);
            if let Some(inv) = m.invert() {
                assert_eq!(m.multiply(&inv), KeyMatrix::IDENTITY, "{m}");
                assert_eq!(inv.invert(), Some(m), "{m}");
            }
        }
    }

    #[test]
    fn test_key_direction_round_trip() {
        let enc = EncryptionKey::new(KEY).unwrap();
        let dec = enc.inverse();
        assert_eq!(dec.matrix(), &KeyMatrix::new([[15, 17], [20, 9]]));
        assert_eq!(dec.inverse(), enc);

        let block = enc.encrypt_block([7, 4]);
        assert_eq!(block, [7, 8]);
        assert_eq!(dec.decrypt_block(block), [7, 4]);
    }

    #[test]
    fn test_parse_and_display() {
        let m: KeyMatrix = "[[3,3],[2,5]]".parse().unwrap();
        assert_eq!(m, KEY);
        let spaced: KeyMatrix = " [[3, 3], [2, 5]] ".parse().unwrap();
        assert_eq!(spaced, KEY);
        assert_eq!(KEY.to_string(), "[[3,3],[2,5]]");

        let negative: KeyMatrix = "[[-1,3],[2,5]]".parse().unwrap();
        assert!(!negative.is_valid());
    }

    #[test]
    fn test_parse_errors() {
        for input in ["", "[3,3],[2,5]", "[[3,3]]", "[[3,3,1],[2,5]]", "[[a,3],[2,5]]"] {
            assert!(
                matches!(input.parse::<KeyMatrix>(), Err(CipherError::MalformedMatrix(_))),
                "{input:?}"
            );
        }
    }
}

//! Arithmetic in the integers modulo 26

/// Number of letters in the English alphabet
pub const NUM_LETTERS: usize = 26;

/// Multiplicative inverses mod 26, indexed by residue.
///
/// `None` marks residues sharing a factor with 26 (every even residue and 13).
pub const INV_MOD_26: [Option<u8>; NUM_LETTERS] = [
    None, Some(1), None, Some(9), None, Some(21), None, Some(15), None, Some(3),
    None, Some(19), None, None, None, Some(7), None, Some(23), None, Some(11),
    None, Some(5), None, Some(17), None, Some(25),
];

/// Reduces any integer into `0..26` (true modulo, so `-1` maps to `25`)
pub fn reduce_mod26(x: i64) -> u8 {
    x.rem_euclid(NUM_LETTERS as i64) as u8
}

/// Looks up the multiplicative inverse of a residue
pub fn inverse_mod26(r: u8) -> Option<u8> {
    INV_MOD_26.get(r as usize).copied().flatten()
}

/// Greatest common divisor (Euclid)
pub fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

//! Pluggable hash strategies for the probing tables.

/// Maps a key to its primary position within a backing store of the given
/// capacity.
///
/// This is the seam that lets a probing table swap in a domain-tuned hash
/// (see [`crate::DateHasher`]) without touching the probing logic itself.
pub trait KeyHasher {
    /// Returns a position in `[0, capacity)` for `key`.
    #[must_use]
    fn position(&self, key: &str, capacity: usize) -> usize;
}

/// Multiplier applied to the rolling coefficient after each character.
const HASH_BASE: usize = 31;
/// Initial rolling coefficient.
const HASH_SEED: usize = 31_415;

/// Left-to-right polynomial rolling hash over the key's characters.
///
/// The value is reduced modulo the capacity at every step; the coefficient
/// is reduced modulo `capacity - 1` so the two streams drift apart and
/// adjacent keys spread out.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolynomialHasher;

impl KeyHasher for PolynomialHasher {
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn position(&self, key: &str, capacity: usize) -> usize {
        if capacity < 2 {
            return 0;
        }
        let mut value = 0;
        let mut a = HASH_SEED;
        for ch in key.chars() {
            value = (u32::from(ch) as usize + a * value) % capacity;
            a = a * HASH_BASE % (capacity - 1);
        }
        value
    }
}

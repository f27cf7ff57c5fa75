//! The key-value contract shared by every table, and validated growth
//! sequences.

use crate::error::TableError;

/// Default growth sequence: an ascending ladder of primes. Prime capacities
/// keep any non-zero probe step coprime with the table size, so double
/// hashing gets full-cycle probe sequences without adjustment.
pub const PRIME_SIZES: &[usize] = &[
    5, 13, 29, 53, 97, 193, 389, 769, 1543, 3079, 6151, 12_289, 24_593, 49_157, 98_317, 196_613,
    393_241, 786_433, 1_572_869,
];

/// The operations every table in this crate provides, uniform across the
/// linear-probing and double-hashing implementations.
///
/// Keys are non-empty strings; values are caller-supplied. `keys` and
/// `values` walk the backing store in physical slot order, so both are
/// O(capacity).
pub trait HashTable<V: Clone> {
    /// Looks up the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::KeyNotFound`] when the key is absent after a
    /// full probe cycle.
    fn get(&self, key: &str) -> Result<&V, TableError>;

    /// Inserts `value` under `key`, overwriting any previous value. May grow
    /// the table as a side effect once occupancy crosses the load-factor
    /// threshold.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::TableFull`] when a full probe cycle finds no
    /// usable slot and the growth sequence is exhausted; the table is left
    /// unmodified in that case.
    fn set(&mut self, key: &str, value: V) -> Result<(), TableError>;

    /// Removes the live entry under `key` and returns its value.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::KeyNotFound`] when the key is absent.
    fn delete(&mut self, key: &str) -> Result<V, TableError>;

    /// Returns `true` when `key` holds a live entry. Never fails.
    #[must_use]
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_ok()
    }

    /// Number of live entries.
    #[must_use]
    fn len(&self) -> usize;

    /// Returns `true` when the table holds no live entries.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All live keys, in physical slot order.
    #[must_use]
    fn keys(&self) -> Vec<String>;

    /// All live values, in physical slot order.
    #[must_use]
    fn values(&self) -> Vec<V>;

    /// The primary hash position for `key`, in `[0, capacity)`.
    #[must_use]
    fn hash(&self, key: &str) -> usize;

    /// Current size of the backing store, always one element of the growth
    /// sequence.
    #[must_use]
    fn capacity(&self) -> usize;
}

/// An immutable ascending sequence of candidate capacities, captured at
/// construction and never shared between tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSizes {
    /// The candidate capacities, strictly ascending, each at least 2.
    sizes: Box<[usize]>,
}

impl TableSizes {
    /// Validates and captures a caller-supplied growth sequence.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidSizes`] when the sequence is empty, not
    /// strictly ascending, or contains a capacity below 2.
    pub fn new(sizes: &[usize]) -> Result<Self, TableError> {
        if sizes.is_empty() {
            return Err(TableError::InvalidSizes("sequence is empty"));
        }
        let mut previous = 0;
        for &size in sizes {
            if size < 2 {
                return Err(TableError::InvalidSizes("capacities must be at least 2"));
            }
            if size <= previous {
                return Err(TableError::InvalidSizes("sequence must be strictly ascending"));
            }
            previous = size;
        }
        Ok(Self { sizes: sizes.into() })
    }

    /// The default prime ladder.
    #[must_use]
    pub fn primes() -> Self {
        Self { sizes: PRIME_SIZES.into() }
    }

    /// Captures a sequence known to be valid, skipping validation.
    pub(crate) fn from_static(sizes: &[usize]) -> Self {
        Self { sizes: sizes.into() }
    }

    /// The capacity at `index`, or `None` past the end of the sequence.
    pub(crate) fn get(&self, index: usize) -> Option<usize> {
        self.sizes.get(index).copied()
    }

    /// The starting capacity. The sequence is validated non-empty, so the
    /// fallback is never taken.
    pub(crate) fn first(&self) -> usize {
        self.sizes.first().copied().unwrap_or(2)
    }
}

impl Default for TableSizes {
    fn default() -> Self {
        Self::primes()
    }
}

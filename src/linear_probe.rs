//! Open-addressing table using single-step linear probing.

use std::mem;

use crate::error::TableError;
use crate::hasher::{KeyHasher, PolynomialHasher};
use crate::slot::{Iter, Slot};
use crate::table::{HashTable, TableSizes};

/// A growable open-addressing hash table resolving collisions with linear
/// probing (step = 1).
///
/// The hash strategy is a type parameter, so a domain-tuned hash (such as
/// [`crate::DateHasher`]) plugs in without touching the probing logic.
/// Deletion compacts eagerly: the freed slot's trailing cluster is lifted
/// and re-placed, so this table never holds tombstones.
///
/// Growth follows a fixed ascending capacity sequence captured at
/// construction; once the sequence is exhausted the table stops growing and
/// fills toward its final capacity.
///
/// Not thread-safe; every table exclusively owns its backing store.
#[derive(Debug, Clone)]
pub struct LinearProbeTable<V, H = PolynomialHasher> {
    /// The backing store; its length always equals the current capacity.
    slots: Vec<Slot<V>>,
    /// Candidate capacities, ascending, fixed at construction.
    sizes: TableSizes,
    /// Position within `sizes`; never decreases.
    size_index: usize,
    /// Count of live entries.
    length: usize,
    /// Strategy mapping keys to primary positions.
    hasher: H,
}

impl<V: Clone> LinearProbeTable<V, PolynomialHasher> {
    /// Creates a table over the default prime growth sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(TableSizes::primes(), PolynomialHasher)
    }

    /// Creates a table over a caller-supplied growth sequence.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidSizes`] when the sequence is empty, not
    /// strictly ascending, or contains a capacity below 2.
    pub fn with_sizes(sizes: &[usize]) -> Result<Self, TableError> {
        Ok(Self::from_parts(TableSizes::new(sizes)?, PolynomialHasher))
    }
}

impl<V: Clone, H: KeyHasher> LinearProbeTable<V, H> {
    /// Creates a table over a caller-supplied growth sequence and hash
    /// strategy.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidSizes`] when the sequence fails
    /// validation.
    pub fn with_hasher(sizes: &[usize], hasher: H) -> Result<Self, TableError> {
        Ok(Self::from_parts(TableSizes::new(sizes)?, hasher))
    }

    /// Builds a table from an already-validated growth sequence.
    pub(crate) fn from_parts(sizes: TableSizes, hasher: H) -> Self {
        let capacity = sizes.first();
        Self { slots: vec![Slot::Empty; capacity], sizes, size_index: 0, length: 0, hasher }
    }

    /// Returns an iterator over the live entries in physical slot order.
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.slots)
    }

    /// Ratio of live entries to capacity.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.length as f64 / self.slots.len() as f64
    }

    /// Removes every entry, keeping the current capacity.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
        self.length = 0;
    }

    /// Walks the probe sequence for `key`, one slot at a time.
    ///
    /// For inserts, returns the matching live slot or the first empty slot.
    /// For lookups, an empty slot or a completed cycle means the key is
    /// absent.
    #[allow(clippy::arithmetic_side_effects)]
    fn probe(&self, key: &str, is_insert: bool) -> Result<usize, TableError> {
        let capacity = self.slots.len();
        let mut position = self.hasher.position(key, capacity);
        for _ in 0..capacity {
            match self.slots.get(position) {
                Some(Slot::Empty) | None => {
                    return if is_insert {
                        Ok(position)
                    } else {
                        Err(TableError::KeyNotFound(key.to_owned()))
                    };
                }
                Some(Slot::Occupied { key: held, .. }) if held == key => return Ok(position),
                Some(_) => {}
            }
            position = (position + 1) % capacity;
        }
        if is_insert {
            Err(TableError::TableFull)
        } else {
            Err(TableError::KeyNotFound(key.to_owned()))
        }
    }

    /// Grows to the next capacity in the sequence and re-places every live
    /// entry in old slot-traversal order, recomputing hashes against the new
    /// capacity. Growth is silently skipped once the sequence is exhausted.
    fn rehash(&mut self) {
        let next_index = self.size_index.saturating_add(1);
        let Some(next_capacity) = self.sizes.get(next_index) else {
            return;
        };
        self.size_index = next_index;
        let old_slots = mem::replace(&mut self.slots, vec![Slot::Empty; next_capacity]);
        self.length = 0;
        for slot in old_slots {
            if let Slot::Occupied { key, value } = slot {
                self.place(key, value);
            }
        }
    }

    /// Writes one entry into its probed slot, bypassing the growth check.
    /// Used by rehashing and compaction, where the entry is already known to
    /// fit.
    fn place(&mut self, key: String, value: V) {
        if let Ok(position) = self.probe(&key, true) {
            if let Some(slot) = self.slots.get_mut(position) {
                *slot = Slot::Occupied { key, value };
                self.length = self.length.saturating_add(1);
            }
        }
    }

    /// Lifts the contiguous occupied run that follows a freed slot and
    /// re-places each entry, so no live entry is left stranded behind the
    /// hole.
    #[allow(clippy::arithmetic_side_effects)]
    fn compact_cluster(&mut self, hole: usize) {
        let capacity = self.slots.len();
        let mut displaced = Vec::new();
        let mut position = (hole + 1) % capacity;
        for _ in 0..capacity {
            let Some(slot) = self.slots.get_mut(position) else {
                break;
            };
            if !slot.is_occupied() {
                break;
            }
            displaced.push(mem::replace(slot, Slot::Empty));
            position = (position + 1) % capacity;
        }
        for slot in displaced {
            if let Slot::Occupied { key, value } = slot {
                self.length = self.length.saturating_sub(1);
                self.place(key, value);
            }
        }
    }
}

impl<V: Clone> Default for LinearProbeTable<V, PolynomialHasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone, H: KeyHasher> Extend<(String, V)> for LinearProbeTable<V, H> {
    /// Inserts every pair, stopping at the first insert the table rejects.
    fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            if self.set(&key, value).is_err() {
                break;
            }
        }
    }
}

impl<V: Clone, H: KeyHasher> HashTable<V> for LinearProbeTable<V, H> {
    fn get(&self, key: &str) -> Result<&V, TableError> {
        let position = self.probe(key, false)?;
        match self.slots.get(position) {
            Some(Slot::Occupied { value, .. }) => Ok(value),
            _ => Err(TableError::KeyNotFound(key.to_owned())),
        }
    }

    fn set(&mut self, key: &str, value: V) -> Result<(), TableError> {
        let position = self.probe(key, true)?;
        match self.slots.get_mut(position) {
            Some(slot @ Slot::Empty) => {
                *slot = Slot::Occupied { key: key.to_owned(), value };
                self.length = self.length.saturating_add(1);
            }
            Some(Slot::Occupied { value: held, .. }) => *held = value,
            _ => {}
        }
        if self.length.saturating_mul(3) > self.slots.len().saturating_mul(2) {
            self.rehash();
        }
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<V, TableError> {
        let position = self.probe(key, false)?;
        let removed = match self.slots.get_mut(position) {
            Some(slot) => mem::replace(slot, Slot::Empty),
            None => return Err(TableError::KeyNotFound(key.to_owned())),
        };
        let Slot::Occupied { value, .. } = removed else {
            return Err(TableError::KeyNotFound(key.to_owned()));
        };
        self.length = self.length.saturating_sub(1);
        self.compact_cluster(position);
        Ok(value)
    }

    fn len(&self) -> usize {
        self.length
    }

    fn keys(&self) -> Vec<String> {
        self.iter().map(|(key, _)| key.to_owned()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, value)| value.clone()).collect()
    }

    fn hash(&self, key: &str) -> usize {
        self.hasher.position(key, self.slots.len())
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }
}

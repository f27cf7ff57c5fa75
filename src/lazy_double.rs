//! Open-addressing table using double hashing and lazy tombstone deletion.

use std::mem;

use crate::error::TableError;
use crate::hasher::{KeyHasher, PolynomialHasher};
use crate::slot::{Iter, Slot};
use crate::table::{HashTable, TableSizes};

/// Multiplier for the step-hash rolling coefficient.
const HASH_BASE2: usize = 37;
/// Initial step-hash rolling coefficient.
const HASH_SEED2: usize = 27_183;

/// Greatest common divisor by the Euclidean algorithm.
#[allow(clippy::arithmetic_side_effects)]
fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// A growable open-addressing hash table resolving collisions with double
/// hashing.
///
/// The probe step comes from a second hash and is adjusted until it is
/// coprime with the capacity, so every probe sequence visits all slots
/// before repeating. Deletion is lazy: a deleted slot becomes a tombstone
/// that probe sequences walk past, and tombstones are only dropped at the
/// next rehash.
///
/// Not thread-safe; every table exclusively owns its backing store.
#[derive(Debug, Clone)]
pub struct LazyDoubleTable<V> {
    /// The backing store; its length always equals the current capacity.
    slots: Vec<Slot<V>>,
    /// Candidate capacities, ascending, fixed at construction.
    sizes: TableSizes,
    /// Position within `sizes`; never decreases.
    size_index: usize,
    /// Count of live entries; tombstones are not counted.
    length: usize,
}

impl<V: Clone> LazyDoubleTable<V> {
    /// Creates a table over the default prime growth sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(TableSizes::primes())
    }

    /// Creates a table over a caller-supplied growth sequence. The
    /// capacities need not be prime: the step hash enforces coprimality at
    /// probe time.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidSizes`] when the sequence is empty, not
    /// strictly ascending, or contains a capacity below 2.
    pub fn with_sizes(sizes: &[usize]) -> Result<Self, TableError> {
        Ok(Self::from_parts(TableSizes::new(sizes)?))
    }

    /// Builds a table from an already-validated growth sequence.
    pub(crate) fn from_parts(sizes: TableSizes) -> Self {
        let capacity = sizes.first();
        Self { slots: vec![Slot::Empty; capacity], sizes, size_index: 0, length: 0 }
    }

    /// Returns an iterator over the live entries in physical slot order.
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.slots)
    }

    /// Ratio of live entries to capacity. Tombstones do not count.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.length as f64 / self.slots.len() as f64
    }

    /// The probe step for `key`, in `[1, capacity)` and always coprime with
    /// the capacity.
    ///
    /// Computed as a right-to-left polynomial rolling hash with its own seed
    /// and base, so it varies independently of the primary hash; the result
    /// is then nudged upward (wrapping) until `gcd(step, capacity) == 1`,
    /// which guarantees a full-cycle probe sequence even for non-prime
    /// capacities.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    pub fn hash2(&self, key: &str) -> usize {
        let capacity = self.slots.len();
        if capacity < 3 {
            return 1;
        }
        let mut value = 0;
        let mut a = HASH_SEED2;
        for ch in key.chars().rev() {
            value = (u32::from(ch) as usize + a * value) % capacity;
            a = a * HASH_BASE2 % (capacity - 1);
        }

        let mut step = value % (capacity - 1) + 1;
        while gcd(step, capacity) != 1 {
            step = (step + 1) % (capacity - 1);
            if step == 0 {
                step = 1;
            }
        }
        step
    }

    /// Walks the probe sequence for `key`, advancing by `hash2(key)` each
    /// time.
    ///
    /// For inserts, returns the matching live slot if one exists, otherwise
    /// the first tombstone seen, otherwise the empty slot that ended the
    /// walk. Lookups keep probing past tombstones and fail at the first
    /// empty slot or after a full cycle.
    #[allow(clippy::arithmetic_side_effects)]
    fn probe(&self, key: &str, is_insert: bool) -> Result<usize, TableError> {
        let capacity = self.slots.len();
        let mut position = self.hash(key);
        let step = self.hash2(key);
        let mut first_deleted = None;

        for _ in 0..capacity {
            match self.slots.get(position) {
                Some(Slot::Empty) | None => {
                    return if is_insert {
                        Ok(first_deleted.unwrap_or(position))
                    } else {
                        Err(TableError::KeyNotFound(key.to_owned()))
                    };
                }
                Some(Slot::Tombstone) => {
                    if first_deleted.is_none() {
                        first_deleted = Some(position);
                    }
                }
                Some(Slot::Occupied { key: held, .. }) if held == key => return Ok(position),
                Some(Slot::Occupied { .. }) => {}
            }
            position = (position + step) % capacity;
        }

        if is_insert {
            first_deleted.ok_or(TableError::TableFull)
        } else {
            Err(TableError::KeyNotFound(key.to_owned()))
        }
    }

    /// Grows to the next capacity and re-inserts every live entry through
    /// ordinary `set` calls, recomputing both hashes against the new
    /// capacity. Tombstones are dropped. Growth is silently skipped once
    /// the sequence is exhausted, after which inserts can start reporting
    /// the table as full.
    fn rehash(&mut self) {
        self.size_index = self.size_index.saturating_add(1);
        let Some(next_capacity) = self.sizes.get(self.size_index) else {
            return;
        };
        let old_slots = mem::replace(&mut self.slots, vec![Slot::Empty; next_capacity]);
        self.length = 0;
        for slot in old_slots {
            if let Slot::Occupied { key, value } = slot {
                // Cannot fail: the new store is strictly larger than the
                // live count.
                self.set(&key, value).ok();
            }
        }
    }
}

impl<V: Clone> Default for LazyDoubleTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Extend<(String, V)> for LazyDoubleTable<V> {
    /// Inserts every pair, stopping at the first insert the table rejects.
    fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            if self.set(&key, value).is_err() {
                break;
            }
        }
    }
}

impl<V: Clone> HashTable<V> for LazyDoubleTable<V> {
    fn get(&self, key: &str) -> Result<&V, TableError> {
        let position = self.probe(key, false)?;
        match self.slots.get(position) {
            Some(Slot::Occupied { value, .. }) => Ok(value),
            _ => Err(TableError::KeyNotFound(key.to_owned())),
        }
    }

    fn set(&mut self, key: &str, value: V) -> Result<(), TableError> {
        let position = self.probe(key, true)?;
        if let Some(slot) = self.slots.get_mut(position) {
            if !slot.is_occupied() {
                self.length = self.length.saturating_add(1);
            }
            *slot = Slot::Occupied { key: key.to_owned(), value };
        }
        if self.length.saturating_mul(3) > self.slots.len().saturating_mul(2) {
            self.rehash();
        }
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<V, TableError> {
        let position = self.probe(key, false)?;
        if let Some(slot) = self.slots.get_mut(position) {
            if slot.is_occupied() {
                let removed = mem::replace(slot, Slot::Tombstone);
                self.length = self.length.saturating_sub(1);
                if let Slot::Occupied { value, .. } = removed {
                    return Ok(value);
                }
            }
        }
        Err(TableError::KeyNotFound(key.to_owned()))
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
        PolynomialHasher.position(key, self.slots.len())
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// The key mix used by the original exercises: short, long, numeric.
    const SAMPLE_KEYS: [&str; 7] = ["key1", "key2", "A", "B", "123", "456", "SlightlyLongerKey"];

    /// Count of physically empty (never used or reclaimed) slots.
    fn empty_slots<V>(table: &LazyDoubleTable<V>) -> usize {
        table.slots.iter().filter(|slot| matches!(slot, Slot::Empty)).count()
    }

    #[test]
    fn test_starts_empty() {
        let table: LazyDoubleTable<u32> = LazyDoubleTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.capacity(), 5);
    }

    #[test]
    fn test_set_and_get() {
        let mut table = LazyDoubleTable::new();
        for (index, key) in SAMPLE_KEYS.iter().enumerate() {
            assert_eq!(table.set(key, index), Ok(()));
            assert_eq!(table.get(key), Ok(&index));
        }
        assert_eq!(table.len(), SAMPLE_KEYS.len());
    }

    #[test]
    fn test_delete_updates_length_and_visibility() {
        let mut table = LazyDoubleTable::new();
        for (index, key) in SAMPLE_KEYS.iter().enumerate() {
            assert_eq!(table.set(key, index), Ok(()));
        }

        for (removed, key) in SAMPLE_KEYS.iter().enumerate() {
            assert_eq!(table.delete(key), Ok(removed));
            assert_eq!(table.get(key), Err(TableError::KeyNotFound((*key).to_string())));
            assert!(!table.contains(key));
            assert_eq!(table.len(), SAMPLE_KEYS.len() - removed - 1);
        }
    }

    #[test]
    fn test_scenario_mixed_operations() {
        let mut table = LazyDoubleTable::new();
        assert_eq!(table.set("key1", 0), Ok(()));
        assert_eq!(table.set("key2", 1), Ok(()));
        assert_eq!(table.set("A", 2), Ok(()));

        assert_eq!(table.delete("key2"), Ok(1));
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("key1"), Ok(&0));
        assert_eq!(table.get("A"), Ok(&2));
        assert_eq!(table.get("key2"), Err(TableError::KeyNotFound("key2".to_string())));
    }

    #[test]
    fn test_lazy_deletion_leaves_tombstones() {
        // A single fixed size, so no rehash interferes.
        let mut table = LazyDoubleTable::from_parts(TableSizes::from_static(&[29]));
        for (index, key) in SAMPLE_KEYS.iter().enumerate() {
            assert_eq!(table.set(key, index), Ok(()));
        }

        let empties_before = empty_slots(&table);
        assert_eq!(table.delete("key1"), Ok(0));
        assert_eq!(table.delete("456"), Ok(5));

        // Deleting never reclaims slots eagerly; the vacated cells are
        // tombstones until the next rehash.
        assert_eq!(empty_slots(&table), empties_before);
        assert_eq!(table.len(), SAMPLE_KEYS.len() - 2);
    }

    #[test]
    fn test_tombstone_reused_on_insert() {
        let mut table = LazyDoubleTable::from_parts(TableSizes::from_static(&[5]));
        assert_eq!(table.set("key1", 1), Ok(()));
        assert_eq!(table.set("key2", 2), Ok(()));
        assert_eq!(table.delete("key1"), Ok(1));

        let empties_before = empty_slots(&table);
        assert_eq!(table.set("key1", 10), Ok(()));
        // The new entry claimed the tombstone, not a fresh empty slot.
        assert_eq!(empty_slots(&table), empties_before);
        assert_eq!(table.get("key1"), Ok(&10));
    }

    #[test]
    fn test_rehash_drops_tombstones_and_keeps_entries() {
        let mut table =
            LazyDoubleTable::from_parts(TableSizes::from_static(&[24_593, 49_157, 98_317]));
        for (index, key) in SAMPLE_KEYS.iter().enumerate() {
            assert_eq!(table.set(key, index), Ok(()));
        }
        assert_eq!(table.delete("B"), Ok(3));

        table.rehash();

        assert_eq!(table.capacity(), 49_157);
        assert_eq!(table.len(), SAMPLE_KEYS.len() - 1);
        assert!(table.slots.iter().all(|slot| !matches!(slot, Slot::Tombstone)));
        for (index, key) in SAMPLE_KEYS.iter().enumerate() {
            if *key != "B" {
                assert_eq!(table.get(key), Ok(&index));
            }
        }
    }

    #[test]
    fn test_with_sizes_validates() {
        assert!(LazyDoubleTable::<u32>::with_sizes(&[6000, 8000, 10_000]).is_ok());
        assert_eq!(
            LazyDoubleTable::<u32>::with_sizes(&[]).map(|_| ()),
            Err(TableError::InvalidSizes("sequence is empty"))
        );
    }

    #[test]
    fn test_growth_trigger_crossing_two_thirds() {
        let mut table = LazyDoubleTable::new();
        // Capacity 5 grows once length exceeds 3.
        assert_eq!(table.set("a", 1), Ok(()));
        assert_eq!(table.set("b", 2), Ok(()));
        assert_eq!(table.set("c", 3), Ok(()));
        assert_eq!(table.capacity(), 5);
        assert_eq!(table.set("d", 4), Ok(()));
        assert_eq!(table.capacity(), 13);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_exhausted_sequence_reports_full() {
        let mut table = LazyDoubleTable::from_parts(TableSizes::from_static(&[5]));
        for (index, key) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            assert_eq!(table.set(key, index), Ok(()));
        }

        assert_eq!(table.set("f", 5), Err(TableError::TableFull));
        assert_eq!(table.len(), 5);

        // Freeing one slot makes room again through the tombstone.
        assert_eq!(table.delete("c"), Ok(2));
        assert_eq!(table.set("f", 5), Ok(()));
        assert_eq!(table.get("f"), Ok(&5));
    }

    #[test]
    fn test_hash2_coprime_with_prime_capacities() {
        let table: LazyDoubleTable<u32> = LazyDoubleTable::new();
        for key in SAMPLE_KEYS {
            let step = table.hash2(key);
            assert!(step >= 1 && step < table.capacity());
            assert_eq!(gcd(step, table.capacity()), 1);
        }
    }

    #[test]
    fn test_hash2_coprime_with_non_prime_capacities() {
        for capacity in [6000, 8000, 10_000] {
            let table: LazyDoubleTable<u32> =
                LazyDoubleTable::from_parts(TableSizes::from_static(&[capacity]));
            for key in SAMPLE_KEYS {
                let step = table.hash2(key);
                assert!(step >= 1 && step < capacity);
                assert_eq!(gcd(step, capacity), 1);
            }
        }
    }

    #[test]
    fn test_keys_and_values_ignore_tombstones() {
        let mut table = LazyDoubleTable::new();
        for (index, key) in SAMPLE_KEYS.iter().enumerate() {
            assert_eq!(table.set(key, index), Ok(()));
        }
        assert_eq!(table.delete("A"), Ok(2));

        let keys = table.keys();
        let values = table.values();
        assert_eq!(keys.len(), SAMPLE_KEYS.len() - 1);
        assert_eq!(values.len(), SAMPLE_KEYS.len() - 1);
        assert!(!keys.iter().any(|key| key == "A"));
        assert!(!values.contains(&2));
    }

    proptest! {
        #[test]
        fn prop_round_trip(entries in proptest::collection::btree_map("[a-z]{1,8}", any::<u32>(), 1..60_usize)) {
            let mut table = LazyDoubleTable::new();
            for (key, value) in &entries {
                prop_assert_eq!(table.set(key, *value), Ok(()));
            }

            prop_assert_eq!(table.len(), entries.len());
            for (key, value) in &entries {
                prop_assert_eq!(table.get(key), Ok(value));
            }
        }

        #[test]
        fn prop_length_accounts_for_deletes(entries in proptest::collection::btree_map("[a-z]{1,6}", any::<u16>(), 1..40_usize)) {
            let mut table = LazyDoubleTable::new();
            for (key, value) in &entries {
                prop_assert_eq!(table.set(key, *value), Ok(()));
            }

            let mut remaining = entries.len();
            for (index, key) in entries.keys().enumerate() {
                if index % 2 == 0 {
                    prop_assert_eq!(table.delete(key).is_ok(), true);
                    remaining -= 1;
                    prop_assert_eq!(table.len(), remaining);
                }
            }
            for (index, (key, value)) in entries.iter().enumerate() {
                if index % 2 == 0 {
                    prop_assert_eq!(table.contains(key), false);
                } else {
                    prop_assert_eq!(table.get(key), Ok(value));
                }
            }
        }
    }
}

//! The physical representation of a single table cell.

/// One cell of a table's backing store.
///
/// The linear-probing table only ever holds `Empty` and `Occupied` cells;
/// `Tombstone` belongs to the lazy-deletion table, where a probe sequence
/// must keep walking past deleted cells instead of stopping at them.
#[derive(Debug, Clone, Default)]
pub enum Slot<V> {
    /// Never occupied, or reclaimed by eager compaction.
    #[default]
    Empty,
    /// Previously occupied, lazily deleted. Does not count toward the live
    /// length but still occupies the physical slot until the next rehash.
    Tombstone,
    /// A live entry.
    Occupied {
        /// The entry's key; non-empty and unique among live entries.
        key: String,
        /// The caller-supplied value.
        value: V,
    },
}

impl<V> Slot<V> {
    /// Returns `true` when the slot holds a live entry.
    pub(crate) fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied { .. })
    }
}

/// Iterator over the live entries of a backing store, in physical slot
/// order, skipping empty and tombstoned cells.
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// The slots being walked.
    slots: &'a [Slot<V>],
    /// Current position in the walk.
    index: usize,
}

impl<'a, V> Iter<'a, V> {
    /// Creates an iterator over `slots`.
    pub(crate) fn new(slots: &'a [Slot<V>]) -> Self {
        Self { slots, index: 0 }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.get(self.index) {
            self.index = self.index.saturating_add(1);
            if let Slot::Occupied { key, value } = slot {
                return Some((key.as_str(), value));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iter_skips_empty_and_tombstone() {
        let slots = vec![
            Slot::Empty,
            Slot::Occupied { key: "a".to_string(), value: 1 },
            Slot::Tombstone,
            Slot::Occupied { key: "b".to_string(), value: 2 },
            Slot::Empty,
        ];

        let entries: Vec<(&str, &i32)> = Iter::new(&slots).collect();
        assert_eq!(entries, vec![("a", &1), ("b", &2)]);
    }

    #[test]
    fn test_iter_empty_store() {
        let slots: Vec<Slot<i32>> = vec![Slot::Empty; 8];
        assert_eq!(Iter::new(&slots).count(), 0);
    }
}

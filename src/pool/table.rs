//! Keyed result containers for the pool mapper.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;

/// A result container addressed by source keys.
///
/// The pool mapper writes each key exactly once, at settlement time, and
/// calls [`SlotTable::finish`] only after every slot has been written.
/// Because writes are keyed, they commute: the container's final shape
/// matches the source regardless of the order completions arrive in.
pub trait SlotTable {
    /// The key addressing a slot.
    type Key;
    /// The value written into a slot.
    type Value;
    /// The finished container handed back to the caller.
    type Output;

    /// Create an empty table sized for `capacity` slots.
    fn with_capacity(capacity: usize) -> Self;

    /// Write the value for `key`. Called exactly once per key.
    fn write(&mut self, key: Self::Key, value: Self::Value);

    /// Consume the table into the finished container.
    fn finish(self) -> Self::Output;
}

/// Index-addressed slots producing a `Vec` in source order.
///
/// Unwritten slots are provisional `None` markers; out-of-order settlement
/// fills them by index.
pub struct IndexTable<V> {
    slots: Vec<Option<V>>,
}

impl<V> SlotTable for IndexTable<V> {
    type Key = usize;
    type Value = V;
    type Output = Vec<V>;

    fn with_capacity(capacity: usize) -> Self {
        IndexTable {
            slots: Vec::with_capacity(capacity),
        }
    }

    fn write(&mut self, key: usize, value: V) {
        if key >= self.slots.len() {
            self.slots.resize_with(key + 1, || None);
        }
        self.slots[key] = Some(value);
    }

    fn finish(self) -> Vec<V> {
        self.slots
            .into_iter()
            .map(|slot| slot.expect("every slot is written before the pool finishes"))
            .collect()
    }
}

impl<V> fmt::Debug for IndexTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexTable")
            .field("len", &self.slots.len())
            .finish()
    }
}

/// Hash-keyed slots producing a `HashMap`.
pub struct HashTable<K, V> {
    entries: HashMap<K, V>,
}

impl<K, V> SlotTable for HashTable<K, V>
where
    K: Eq + Hash,
{
    type Key = K;
    type Value = V;
    type Output = HashMap<K, V>;

    fn with_capacity(capacity: usize) -> Self {
        HashTable {
            entries: HashMap::with_capacity(capacity),
        }
    }

    fn write(&mut self, key: K, value: V) {
        self.entries.insert(key, value);
    }

    fn finish(self) -> HashMap<K, V> {
        self.entries
    }
}

impl<K, V> fmt::Debug for HashTable<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTable")
            .field("len", &self.entries.len())
            .finish()
    }
}

/// Ordered-keyed slots producing a `BTreeMap`.
pub struct OrderedTable<K, V> {
    entries: BTreeMap<K, V>,
}

impl<K, V> SlotTable for OrderedTable<K, V>
where
    K: Ord,
{
    type Key = K;
    type Value = V;
    type Output = BTreeMap<K, V>;

    fn with_capacity(_capacity: usize) -> Self {
        OrderedTable {
            entries: BTreeMap::new(),
        }
    }

    fn write(&mut self, key: K, value: V) {
        self.entries.insert(key, value);
    }

    fn finish(self) -> BTreeMap<K, V> {
        self.entries
    }
}

impl<K, V> fmt::Debug for OrderedTable<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedTable")
            .field("len", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_table_fills_out_of_order() {
        let mut table = IndexTable::with_capacity(3);
        table.write(2, "c");
        table.write(0, "a");
        table.write(1, "b");
        assert_eq!(table.finish(), vec!["a", "b", "c"]);
    }

    #[test]
    fn hash_table_keys_results() {
        let mut table = HashTable::with_capacity(2);
        table.write("x", 1);
        table.write("y", 2);
        let map = table.finish();
        assert_eq!(map["x"], 1);
        assert_eq!(map["y"], 2);
    }
}

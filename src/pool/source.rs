//! Abstract ordered key spaces consumed by the pool mapper.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::Hash;

use super::table::{HashTable, IndexTable, OrderedTable, SlotTable};

/// An ordered key space: the pool mapper's view of a collection.
///
/// The mapper never inspects a collection's runtime shape; a shape-dispatch
/// layer picks the concrete source and this trait supplies the two things
/// the scheduler actually needs - an ordered `(key, element)` iteration and
/// a [`SlotTable`] constructor for the matching result container.
///
/// Implementations are provided for `Vec` (sequential indices), `HashMap`
/// and `BTreeMap` (entry keys), and `HashSet` (members keying themselves).
pub trait KeyedSource {
    /// The key addressing each element and its result slot.
    type Key: Send + 'static;
    /// The element handed to the transform.
    type Item;
    /// The ordered `(key, element)` iteration.
    type Pairs: Iterator<Item = (Self::Key, Self::Item)>;
    /// The result container for transformed values of type `V`.
    type Table<V: Send + 'static>: SlotTable<Key = Self::Key, Value = V>;

    /// A capacity hint for the result container.
    fn len_hint(&self) -> usize;

    /// Consume the source into its key/element pairs.
    fn into_pairs(self) -> Self::Pairs;
}

impl<T> KeyedSource for Vec<T> {
    type Key = usize;
    type Item = T;
    type Pairs = std::iter::Enumerate<std::vec::IntoIter<T>>;
    type Table<V: Send + 'static> = IndexTable<V>;

    fn len_hint(&self) -> usize {
        self.len()
    }

    fn into_pairs(self) -> Self::Pairs {
        self.into_iter().enumerate()
    }
}

impl<K, V> KeyedSource for HashMap<K, V>
where
    K: Eq + Hash + Send + 'static,
{
    type Key = K;
    type Item = V;
    type Pairs = std::collections::hash_map::IntoIter<K, V>;
    type Table<V2: Send + 'static> = HashTable<K, V2>;

    fn len_hint(&self) -> usize {
        self.len()
    }

    fn into_pairs(self) -> Self::Pairs {
        self.into_iter()
    }
}

impl<T> KeyedSource for HashSet<T>
where
    T: Clone + Eq + Hash + Send + 'static,
{
    type Key = T;
    type Item = T;
    type Pairs = std::iter::Map<std::collections::hash_set::IntoIter<T>, fn(T) -> (T, T)>;
    type Table<V: Send + 'static> = HashTable<T, V>;

    fn len_hint(&self) -> usize {
        self.len()
    }

    fn into_pairs(self) -> Self::Pairs {
        fn keyed<T: Clone>(member: T) -> (T, T) {
            (member.clone(), member)
        }
        self.into_iter().map(keyed::<T> as fn(T) -> (T, T))
    }
}

impl<K, V> KeyedSource for BTreeMap<K, V>
where
    K: Ord + Send + 'static,
{
    type Key = K;
    type Item = V;
    type Pairs = std::collections::btree_map::IntoIter<K, V>;
    type Table<V2: Send + 'static> = OrderedTable<K, V2>;

    fn len_hint(&self) -> usize {
        self.len()
    }

    fn into_pairs(self) -> Self::Pairs {
        self.into_iter()
    }
}

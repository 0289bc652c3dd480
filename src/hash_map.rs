use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::iter::FusedIterator;
use core::ops::Index;

use crate::DefaultHashBuilder;
use crate::error::NotFound;
use crate::hash_table::Entry as TableEntry;
use crate::hash_table::HashTable;
use crate::hash_table::Position;

/// Equality predicate matching a stored pair against a borrowed key.
#[inline(always)]
fn equivalent_key<K, V, Q>(key: &Q) -> impl Fn(&(K, V)) -> bool + '_
where
    K: Borrow<Q>,
    Q: ?Sized + Eq,
{
    move |x| key.eq(x.0.borrow())
}

/// A hash map implemented using the separate-chaining HashTable as the
/// underlying storage.
///
/// `HashMap<K, V, S>` stores key-value pairs where keys implement `Hash + Eq`
/// and uses a hasher builder `S`, fixed at construction, to hash keys. The
/// underlying storage is a jagged array of chains whose size is kept between
/// a load factor of `1/20` and `1/3` by rebuilding at `1/5`.
///
/// # Iteration and cursors
///
/// Iteration order is bucket order and is not preserved by removals or by
/// inserts that rebuild the table. Cursors ([`Cursor`], [`CursorMut`]) and
/// iterators borrow the map, so the map cannot change while any of them is
/// alive.
///
/// # Performance Characteristics
///
/// - **Memory**: one `u64` hash per entry plus the size of `(K, V)`, and
///   five chain headers per entry right after a rebuild.
#[derive(Clone)]
pub struct HashMap<K, V, S = DefaultHashBuilder> {
    table: HashTable<(K, V)>,
    hash_builder: S,
}

impl<K, V, S> Debug for HashMap<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in self.iter() {
            map.entry(k, v);
        }
        map.finish()
    }
}

impl<K, V, S> PartialEq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, S> Eq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> HashMap<K, V, S> {
    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// assert_eq!(map.len(), 0);
    /// map.insert(1, "a");
    /// assert_eq!(map.len(), 1);
    /// # }
    /// ```
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of buckets.
    ///
    /// A new map has no buckets. After any rebuild the map holds exactly
    /// five buckets per entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// assert_eq!(map.capacity(), 0);
    /// map.insert(1, "a");
    /// assert_eq!(map.capacity(), 5);
    /// map.insert(2, "b");
    /// assert_eq!(map.capacity(), 10);
    /// # }
    /// ```
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns a reference to the map's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes all elements from the map and releases its buckets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert(1, "a");
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 0);
    /// # }
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Returns an iterator over the key-value pairs of the map.
    ///
    /// The iterator yields `(&K, &V)` pairs in bucket order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator over the entries of the map, with mutable
    /// references to the values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashMap;
    ///
    /// let mut map = HashMap::from([("a", 1), ("b", 2)]);
    /// for (_, value) in map.iter_mut() {
    ///     *value *= 10;
    /// }
    /// assert_eq!(map[&"a"], 10);
    /// assert_eq!(map[&"b"], 20);
    /// # }
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.table.iter_mut(),
        }
    }

    /// Returns an iterator over the keys of the map.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values of the map.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator over mutable references to the values of the map.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Returns an iterator that removes and yields all key-value pairs from the
    /// map.
    ///
    /// The map is empty once this returns, whether or not the iterator is
    /// consumed.
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        Drain {
            inner: self.table.drain(),
        }
    }

    /// Returns a cursor at the first entry in iteration order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashMap;
    ///
    /// let map = HashMap::from([(1, "a"), (2, "b"), (3, "c")]);
    ///
    /// let mut cursor = map.cursor_begin();
    /// let mut count = 0;
    /// while cursor != map.cursor_end() {
    ///     assert!(cursor.get().is_some());
    ///     cursor.move_next();
    ///     count += 1;
    /// }
    /// assert_eq!(count, 3);
    /// # }
    /// ```
    pub fn cursor_begin(&self) -> Cursor<'_, K, V> {
        Cursor {
            inner: self.table.cursor_begin(),
        }
    }

    /// Returns the end cursor. Every end cursor of a map compares equal.
    pub fn cursor_end(&self) -> Cursor<'_, K, V> {
        Cursor {
            inner: self.table.cursor_end(),
        }
    }

    /// Returns a mutable cursor at the first entry in iteration order.
    pub fn cursor_begin_mut(&mut self) -> CursorMut<'_, K, V> {
        CursorMut {
            inner: self.table.cursor_begin_mut(),
        }
    }

    /// Returns chain-length statistics for the map's table.
    ///
    /// Available with the `stats` feature.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> crate::hash_table::DebugStats {
        self.table.debug_stats()
    }

    /// Returns the chain-length histogram for the map's table.
    ///
    /// Available with the `stats` feature.
    #[cfg(any(test, feature = "stats"))]
    pub fn chain_histogram(&self) -> crate::hash_table::ChainHistogram {
        self.table.chain_histogram()
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates an empty map that hashes keys with `hash_builder`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "std")]
    /// # {
    /// use std::hash::RandomState;
    ///
    /// use chain_hash::HashMap;
    ///
    /// let map: HashMap<i32, String, _> = HashMap::with_hasher(RandomState::new());
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 0);
    /// # }
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            table: HashTable::new(),
            hash_builder,
        }
    }

    /// Builds a map from a sequence of pairs in one pass, hashing keys with
    /// `hash_builder`.
    ///
    /// The map gets five buckets per distinct key. If a key occurs more than
    /// once, the last pair wins.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "std")]
    /// # {
    /// use std::hash::RandomState;
    ///
    /// use chain_hash::HashMap;
    ///
    /// let pairs = vec![(1, "a"), (2, "b"), (3, "c")];
    /// let map = HashMap::from_iter_with_hasher(pairs, RandomState::new());
    /// assert_eq!(map.len(), 3);
    /// assert_eq!(map.capacity(), 15);
    /// # }
    /// ```
    pub fn from_iter_with_hasher<I>(iter: I, hash_builder: S) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let entries: Vec<(u64, (K, V))> = iter
            .into_iter()
            .map(|(key, value)| (hash_builder.hash_one(&key), (key, value)))
            .collect();
        Self {
            table: HashTable::bulk_load(entries, |(a, _), (b, _)| a == b),
            hash_builder,
        }
    }

    /// Builds a map from a fixed list of pairs, hashing keys with
    /// `hash_builder`.
    pub fn from_pairs_with_hasher<const N: usize>(pairs: [(K, V); N], hash_builder: S) -> Self {
        Self::from_iter_with_hasher(pairs, hash_builder)
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned. This
    /// may rebuild the map.
    /// If the map did have this key present, the value is updated, and the old
    /// value is returned. The map is never rebuilt in that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.insert(37, "b"), Some("a"));
    /// assert_eq!(map.get(&37), Some(&"b"));
    /// # }
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hash_builder.hash_one(&key);
        match self.table.entry(hash, |(k, _)| k == &key) {
            TableEntry::Occupied(mut entry) => {
                let old_value = core::mem::replace(&mut entry.get_mut().1, value);
                Some(old_value)
            }
            TableEntry::Vacant(entry) => {
                entry.insert((key, value));
                None
            }
        }
    }

    /// Inserts a key-value pair without checking whether the key is already
    /// present, and returns references to the stored pair.
    ///
    /// This skips the lookup [`insert`](Self::insert) performs. Inserting a
    /// key that is already present keeps both pairs: `len` counts both, and
    /// lookups, removals and [`get_or_default`](Self::get_or_default) only
    /// see the first one in its chain until it is removed. Memory safety is
    /// not affected.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// let (key, value) = map.insert_unique_unchecked(1, "a");
    /// assert_eq!((*key, *value), (1, "a"));
    /// # }
    /// ```
    pub fn insert_unique_unchecked(&mut self, key: K, value: V) -> (&K, &mut V) {
        let hash = self.hash_builder.hash_one(&key);
        let (k, v) = self.table.insert_unique(hash, (key, value));
        (&*k, v)
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// # }
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.hash_builder.hash_one(key);
        self.table.find(hash, equivalent_key(key)).map(|(_, v)| v)
    }

    /// Returns the stored key and value corresponding to the key.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.hash_builder.hash_one(key);
        self.table.find(hash, equivalent_key(key)).map(|(k, v)| (k, v))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.hash_builder.hash_one(key);
        self.table.find_mut(hash, equivalent_key(key)).map(|(_, v)| v)
    }

    /// Returns a reference to the value corresponding to the key, or
    /// [`NotFound`] if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashMap;
    /// use chain_hash::NotFound;
    ///
    /// let map = HashMap::from([(1, "a"), (2, "b"), (3, "c")]);
    /// assert_eq!(map.at(&2), Ok(&"b"));
    /// assert_eq!(map.at(&4), Err(NotFound));
    /// # }
    /// ```
    pub fn at<Q>(&self, key: &Q) -> Result<&V, NotFound>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(key).ok_or(NotFound)
    }

    /// Returns a mutable reference to the value for `key`, inserting
    /// `V::default()` first if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashMap;
    ///
    /// let mut map: HashMap<&str, u32> = HashMap::new();
    /// *map.get_or_default("apples") += 3;
    /// *map.get_or_default("apples") += 2;
    /// assert_eq!(map[&"apples"], 5);
    /// assert_eq!(map.get_or_default("pears"), &mut 0);
    /// assert_eq!(map.len(), 2);
    /// # }
    /// ```
    pub fn get_or_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.entry(key).or_default()
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(key).is_some()
    }

    /// Returns a cursor at the entry for `key`, or the end cursor if the key
    /// is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashMap;
    ///
    /// let map = HashMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.find(&1).get(), Some((&1, &"a")));
    /// assert_eq!(map.find(&5), map.cursor_end());
    /// # }
    /// ```
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.hash_builder.hash_one(key);
        Cursor {
            inner: self.table.find_cursor(hash, equivalent_key(key)),
        }
    }

    /// Returns a mutable cursor at the entry for `key`, or the end cursor if
    /// the key is absent.
    pub fn find_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.hash_builder.hash_one(key);
        CursorMut {
            inner: self.table.find_cursor_mut(hash, equivalent_key(key)),
        }
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map.
    ///
    /// Removing an absent key does nothing. A removal that leaves the map
    /// below a load factor of `1/20` rebuilds it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// # }
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was previously in the map.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.hash_builder.hash_one(key);
        self.table.remove(hash, equivalent_key(key))
    }

    /// Gets the given key's corresponding entry in the map for in-place
    /// manipulation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    ///
    /// map.entry(1).or_insert("a");
    /// map.entry(2).or_insert("b");
    ///
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), Some(&"b"));
    /// # }
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        let hash = self.hash_builder.hash_one(&key);
        match self.table.entry(hash, |(k, _)| k == &key) {
            TableEntry::Occupied(entry) => Entry::Occupied(OccupiedEntry { entry }),
            TableEntry::Vacant(entry) => Entry::Vacant(VacantEntry { entry, key }),
        }
    }
}

#[cfg(any(feature = "std", feature = "foldhash"))]
impl<K, V> HashMap<K, V, DefaultHashBuilder> {
    /// Creates an empty map using the default hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let map: HashMap<i32, String> = HashMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            table: HashTable::new(),
            hash_builder: DefaultHashBuilder::default(),
        }
    }
}

impl<K, V, S> Default for HashMap<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self {
            table: HashTable::new(),
            hash_builder: S::default(),
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_iter_with_hasher(iter, S::default())
    }
}

#[cfg(any(feature = "std", feature = "foldhash"))]
impl<K, V, const N: usize> From<[(K, V); N]> for HashMap<K, V, DefaultHashBuilder>
where
    K: Hash + Eq,
{
    fn from(pairs: [(K, V); N]) -> Self {
        Self::from_pairs_with_hasher(pairs, DefaultHashBuilder::default())
    }
}

impl<K, V, S> Extend<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V, S> Extend<(&'a K, &'a V)> for HashMap<K, V, S>
where
    K: Hash + Eq + Copy,
    V: Copy,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        for (&key, &value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, Q, V, S> Index<&Q> for HashMap<K, V, S>
where
    K: Hash + Eq + Borrow<Q>,
    Q: ?Sized + Hash + Eq,
    S: BuildHasher,
{
    type Output = V;

    /// Returns a reference to the value for `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present. Use [`HashMap::at`] to handle the
    /// absent case.
    fn index(&self, key: &Q) -> &V {
        match self.at(key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<K, V, S> IntoIterator for HashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut HashMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

/// A view into a single entry in the map, which may either be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashMap`].
///
/// [`entry`]: HashMap::entry
pub enum Entry<'a, K, V> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V>),
}

impl<'a, K, V> Entry<'a, K, V> {
    /// Inserts a default value if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts a value computed from a closure if the entry is vacant and
    /// returns a mutable reference.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns a reference to this entry's key.
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, K, V> Entry<'a, K, V>
where
    V: Default,
{
    /// Inserts the default value if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in the map.
pub struct VacantEntry<'a, K, V> {
    entry: crate::hash_table::VacantEntry<'a, (K, V)>,
    key: K,
}

impl<'a, K, V> VacantEntry<'a, K, V> {
    /// Gets a reference to the key that would be used when inserting a value.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Take ownership of the key.
    pub fn into_key(self) -> K {
        self.key
    }

    /// Inserts the value into the map and returns a mutable reference to it.
    pub fn insert(self, value: V) -> &'a mut V {
        &mut self.entry.insert((self.key, value)).1
    }
}

/// A view into an occupied entry in the map.
pub struct OccupiedEntry<'a, K, V> {
    entry: crate::hash_table::OccupiedEntry<'a, (K, V)>,
}

impl<'a, K, V> OccupiedEntry<'a, K, V> {
    /// Gets a reference to the key in the entry.
    pub fn key(&self) -> &K {
        &self.entry.get().0
    }

    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        &self.entry.get().1
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.entry.get_mut().1
    }

    /// Converts the entry into a mutable reference to the value.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.entry.into_mut().1
    }

    /// Inserts a value into the entry and returns the old value.
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(&mut self.entry.get_mut().1, value)
    }

    /// Removes the entry from the map and returns the value.
    pub fn remove(self) -> V {
        self.entry.remove().1
    }

    /// Removes the entry from the map and returns the key and value.
    pub fn remove_entry(self) -> (K, V) {
        self.entry.remove()
    }
}

/// A read-only cursor over the entries of a [`HashMap`].
///
/// Created by [`HashMap::find`], [`HashMap::cursor_begin`] and
/// [`HashMap::cursor_end`]. The cursor borrows the map, so it stays valid for
/// as long as it exists.
pub struct Cursor<'a, K, V> {
    inner: crate::hash_table::Cursor<'a, (K, V)>,
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Cursor<'_, K, V> {}

impl<K, V> PartialEq for Cursor<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<K, V> Eq for Cursor<'_, K, V> {}

impl<K: Debug, V: Debug> Debug for Cursor<'_, K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position())
            .field("entry", &self.get())
            .finish()
    }
}

impl<'a, K, V> Cursor<'a, K, V> {
    /// The entry under the cursor, or `None` at the end.
    pub fn get(&self) -> Option<(&'a K, &'a V)> {
        self.inner.get().map(|(k, v)| (k, v))
    }

    /// Steps to the next entry in iteration order. Does nothing at the end.
    pub fn move_next(&mut self) {
        self.inner.move_next();
    }

    /// Returns `true` if the cursor is past the last entry.
    pub fn is_end(&self) -> bool {
        self.inner.is_end()
    }

    /// The cursor's bucket and slot coordinates.
    pub fn position(&self) -> Position {
        self.inner.position()
    }
}

/// A cursor over the entries of a [`HashMap`] that can update values in
/// place.
///
/// Keys are only ever handed out by shared reference.
pub struct CursorMut<'a, K, V> {
    inner: crate::hash_table::CursorMut<'a, (K, V)>,
}

impl<'a, K, V> CursorMut<'a, K, V> {
    /// The entry under the cursor, or `None` at the end.
    pub fn get(&self) -> Option<(&K, &V)> {
        self.inner.get().map(|(k, v)| (k, v))
    }

    /// The entry under the cursor with a mutable value, or `None` at the end.
    pub fn get_mut(&mut self) -> Option<(&K, &mut V)> {
        self.inner.get_mut().map(|(k, v)| (&*k, v))
    }

    /// Converts the cursor into references to the entry under it, with the
    /// lifetime of the map borrow.
    pub fn into_mut(self) -> Option<(&'a K, &'a mut V)> {
        self.inner.into_mut().map(|(k, v)| (&*k, v))
    }

    /// Steps to the next entry in iteration order. Does nothing at the end.
    pub fn move_next(&mut self) {
        self.inner.move_next();
    }

    /// Returns `true` if the cursor is past the last entry.
    pub fn is_end(&self) -> bool {
        self.inner.is_end()
    }

    /// The cursor's bucket and slot coordinates.
    pub fn position(&self) -> Position {
        self.inner.position()
    }

    /// Reborrows as a read-only cursor at the same entry.
    pub fn as_cursor(&self) -> Cursor<'_, K, V> {
        Cursor {
            inner: self.inner.as_cursor(),
        }
    }
}

/// An iterator over the key-value pairs of a `HashMap`.
pub struct Iter<'a, K, V> {
    inner: crate::hash_table::Iter<'a, (K, V)>,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// A mutable iterator over the key-value pairs of a `HashMap`.
pub struct IterMut<'a, K, V> {
    inner: crate::hash_table::IterMut<'a, (K, V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (&*k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// An iterator over the keys of a `HashMap`.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of a `HashMap`.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

/// A mutable iterator over the values of a `HashMap`.
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

/// A draining iterator over the key-value pairs of a `HashMap`.
pub struct Drain<'a, K, V> {
    inner: crate::hash_table::Drain<'a, (K, V)>,
}

impl<K, V> Iterator for Drain<'_, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Drain<'_, K, V> {}

impl<K, V> FusedIterator for Drain<'_, K, V> {}

/// An owning iterator over the key-value pairs of a `HashMap`.
pub struct IntoIter<K, V> {
    inner: crate::hash_table::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

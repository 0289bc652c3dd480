use alloc::vec::Vec;
use core::fmt::Debug;
use core::iter::FusedIterator;
use core::marker::PhantomData;

/// Number of buckets allocated per live entry whenever the bucket array is
/// rebuilt. A rebuild therefore always lands on a load factor of `1/5`.
const BUCKETS_PER_ENTRY: usize = 5;

/// Inverse of the maximum load factor. An insert that would push the table
/// past `1/3` rebuilds it first.
const MAX_LOAD_INVERSE: usize = 3;

/// Inverse of the minimum load factor. A removal that leaves the table below
/// `1/20` rebuilds it.
const MIN_LOAD_INVERSE: usize = 20;

#[inline(always)]
fn rebuilt_capacity(len: usize) -> usize {
    len * BUCKETS_PER_ENTRY
}

#[inline(always)]
fn needs_growth(len: usize, capacity: usize) -> bool {
    (len + 1) * MAX_LOAD_INVERSE > capacity
}

#[inline(always)]
fn needs_shrink(len: usize, capacity: usize) -> bool {
    len * MIN_LOAD_INVERSE < capacity
}

/// Maps a hash onto one of `capacity` buckets.
///
/// `capacity` must be non-zero.
#[inline(always)]
fn bucket_index(hash: u64, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    (hash % capacity as u64) as usize
}

type Bucket<V> = Vec<(u64, V)>;

/// Coordinates of a slot in a [`HashTable`]: a bucket index and an index
/// within that bucket.
///
/// Positions handed out by the table are always normalized: they either
/// name an occupied slot, or they are the end sentinel `(capacity, 0)`.
/// A position is only meaningful for the table that produced it, and only
/// until that table is next mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    bucket: usize,
    slot: usize,
}

impl Position {
    /// The index of the bucket this position points into.
    pub fn bucket(self) -> usize {
        self.bucket
    }

    /// The index of the slot within its bucket.
    pub fn slot(self) -> usize {
        self.slot
    }
}

/// Chain length statistics for hash table analysis.
///
/// Available with the `stats` feature.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of elements currently in the table
    pub populated: usize,
    /// Number of buckets
    pub capacity: usize,
    /// Number of buckets holding no elements
    pub empty_buckets: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Load factor (populated / capacity)
    pub load_factor: f64,
    /// Bucket utilization (non-empty buckets / capacity)
    pub bucket_utilization: f64,
    /// Approximate bytes held by the bucket array and its chains
    pub total_bytes: usize,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Debug Statistics ===");
        println!(
            "Population: {}/{} buckets ({:.2}% load factor)",
            self.populated,
            self.capacity,
            self.load_factor * 100.0
        );
        println!(
            "Bucket Usage: {}/{} ({:.2}% utilization, {} empty)",
            self.capacity - self.empty_buckets,
            self.capacity,
            self.bucket_utilization * 100.0,
            self.empty_buckets
        );
        println!("Longest Chain: {}", self.longest_chain);
        println!("Total Allocated: {} bytes", self.total_bytes);
    }
}

/// A histogram of chain lengths: `counts()[n]` is the number of buckets
/// holding exactly `n` elements.
///
/// Available with the `stats` feature.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainHistogram {
    counts: Vec<usize>,
}

#[cfg(any(test, feature = "stats"))]
impl ChainHistogram {
    /// Bucket counts indexed by chain length.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Pretty-prints the histogram horizontally using stdout.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        let max = self.counts.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("chain histogram: empty");
            return;
        }

        let max_bar = 60usize;
        println!("chain histogram ({} buckets):", self.counts.iter().sum::<usize>());
        for (len, &count) in self.counts.iter().enumerate() {
            let width = (count * max_bar).div_ceil(max);
            println!("{:>3} | {} ({})", len, "█".repeat(width), count);
        }
    }
}

/// A hash table using separate chaining over a jagged bucket array.
///
/// `HashTable<V>` stores values of type `V` and provides insertion, lookup,
/// and removal in amortized O(1). Like a raw table, it does not hash values
/// itself: every operation takes the 64-bit hash of the value and an
/// equality predicate. The hash is stored next to the value so rebuilds
/// never call back into a hasher.
///
/// ## Capacity policy
///
/// The capacity is the number of buckets. It starts at zero and is only
/// ever set by a rebuild, which allocates `5 * len` buckets and re-buckets
/// every value in iteration order:
///
/// - inserting a new value when `(len + 1) * 3 > capacity` rebuilds with the
///   new value appended;
/// - removing a value so that `len * 20 < capacity` rebuilds with the
///   remaining values.
///
/// The gap between the two thresholds keeps a table whose size oscillates
/// around one point from rebuilding on every call.
///
/// ## Ordering
///
/// Iteration walks buckets in index order and each chain front to back.
/// Removal swaps the last value of a chain into the freed slot, so no order
/// is preserved across removals or rebuilds.
///
/// ## Example
///
/// ```rust
/// # use core::hash::Hash;
/// # use core::hash::Hasher;
/// #
/// # use chain_hash::hash_table::HashTable;
/// # use siphasher::sip::SipHasher;
/// #
/// # #[derive(Debug, PartialEq)]
/// # struct Person {
/// #     id: u64,
/// #     name: String,
/// # }
/// #
/// # fn hash_id(id: u64) -> u64 {
/// #     let mut hasher = SipHasher::new();
/// #     id.hash(&mut hasher);
/// #     hasher.finish()
/// # }
///
/// let mut table = HashTable::new();
/// let hash = hash_id(123);
///
/// match table.entry(hash, |p: &Person| p.id == 123) {
///     chain_hash::hash_table::Entry::Vacant(entry) => {
///         entry.insert(Person {
///             id: 123,
///             name: "Alice".to_string(),
///         });
///     }
///     chain_hash::hash_table::Entry::Occupied(_) => {
///         println!("Person already exists");
///     }
/// }
/// assert_eq!(table.capacity(), 5);
/// ```
#[derive(Clone)]
pub struct HashTable<V> {
    buckets: Vec<Bucket<V>>,
    populated: usize,
}

impl<V> Debug for HashTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.buckets.is_empty() {
            return f
                .debug_struct("HashTable")
                .field("chains", &"unallocated")
                .field("populated", &self.populated)
                .field("capacity", &0usize)
                .finish();
        }

        f.debug_struct("HashTable")
            .field(
                "chains",
                &self.buckets.iter().map(Vec::len).collect::<Vec<_>>(),
            )
            .field("populated", &self.populated)
            .field("capacity", &self.buckets.len())
            .finish()
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> HashTable<V> {
    /// Creates an empty hash table with no buckets.
    ///
    /// No memory is allocated until the first insertion.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let table: HashTable<String> = HashTable::new();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 0);
    /// ```
    pub const fn new() -> Self {
        Self {
            buckets: Vec::new(),
            populated: 0,
        }
    }

    /// Builds a table from pre-hashed values in one pass.
    ///
    /// The table gets `5 * n` buckets for `n` surviving values. Values are
    /// bucketed in input order. When `eq` reports two values with the same
    /// hash as equal, the later one replaces the earlier one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let table = HashTable::bulk_load(
    ///     vec![(1, (1, "a")), (2, (2, "b")), (1, (1, "c"))],
    ///     |a: &(u32, &str), b: &(u32, &str)| a.0 == b.0,
    /// );
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(table.capacity(), 10);
    /// assert_eq!(table.find(1, |(k, _)| *k == 1), Some(&(1, "c")));
    /// ```
    pub fn bulk_load(entries: Vec<(u64, V)>, eq: impl Fn(&V, &V) -> bool) -> Self {
        let mut table = Self::new();
        table.rebuild(entries);
        if table.dedup(eq) {
            let entries = table.take_entries(0);
            table.rebuild(entries);
        }
        table
    }

    /// Returns an iterator over all values in the table.
    ///
    /// The iterator yields `&V` references in bucket order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::new();
    /// table
    ///     .entry(hash_str("key1"), |s: &String| s == "key1")
    ///     .or_insert("key1".to_string());
    /// table
    ///     .entry(hash_str("key2"), |s: &String| s == "key2")
    ///     .or_insert("key2".to_string());
    ///
    /// assert_eq!(table.iter().count(), 2);
    /// ```
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            table: self,
            position: self.begin(),
            remaining: self.populated,
        }
    }

    /// Returns an iterator yielding mutable references to all values.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            remaining: self.populated,
            buckets: self.buckets.iter_mut(),
            chain: Default::default(),
        }
    }

    /// Returns an iterator that removes and yields all values from the table.
    ///
    /// The table is emptied and its bucket array released as soon as this
    /// is called, even if the iterator is dropped before it is exhausted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.entry(7, |&n: &u64| n == 7).or_insert(7);
    ///
    /// let values: Vec<u64> = table.drain().collect();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 0);
    /// assert_eq!(values, vec![7]);
    /// ```
    pub fn drain(&mut self) -> Drain<'_, V> {
        let remaining = core::mem::take(&mut self.populated);
        Drain {
            inner: core::mem::take(&mut self.buckets).into_iter().flatten(),
            remaining,
            _marker: PhantomData,
        }
    }

    /// Returns `true` if the table contains no elements.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the number of elements in the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// assert_eq!(table.len(), 0);
    ///
    /// table.entry(1, |&n: &u64| n == 1).or_insert(1);
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns the number of buckets.
    ///
    /// This is zero for a table that has never been inserted into, and
    /// `5 * len()` right after any rebuild.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Removes all elements from the table and releases the bucket array.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.entry(1, |&n: &u64| n == 1).or_insert(1);
    /// table.entry(2, |&n: &u64| n == 2).or_insert(2);
    /// assert_eq!(table.len(), 2);
    ///
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 0);
    /// ```
    pub fn clear(&mut self) {
        self.buckets = Vec::new();
        self.populated = 0;
    }

    /// Finds a value by hash and equality predicate.
    ///
    /// An empty table answers `None` without touching the bucket array,
    /// which may have no buckets at all.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// assert_eq!(table.find(42, |&n: &u64| n == 42), None);
    ///
    /// table.entry(42, |&n: &u64| n == 42).or_insert(42);
    /// assert_eq!(table.find(42, |&n| n == 42), Some(&42));
    /// ```
    pub fn find(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&V> {
        let position = self.find_position(hash, eq)?;
        Some(&self.buckets[position.bucket][position.slot].1)
    }

    /// Finds a value by hash and equality predicate, returning a mutable
    /// reference.
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&mut V> {
        let position = self.find_position(hash, eq)?;
        Some(&mut self.buckets[position.bucket][position.slot].1)
    }

    /// Finds the position of the first value in the chain for `hash` that
    /// satisfies `eq`.
    pub fn find_position(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<Position> {
        if self.populated == 0 {
            return None;
        }

        let bucket = bucket_index(hash, self.buckets.len());
        self.buckets[bucket]
            .iter()
            .position(|(stored, value)| *stored == hash && eq(value))
            .map(|slot| Position { bucket, slot })
    }

    /// Returns a cursor at the value matching `hash` and `eq`, or the end
    /// cursor if there is none.
    pub fn find_cursor(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Cursor<'_, V> {
        let position = self.find_position(hash, eq).unwrap_or_else(|| self.end());
        Cursor {
            table: self,
            position,
        }
    }

    /// Mutable counterpart of [`find_cursor`](Self::find_cursor).
    pub fn find_cursor_mut(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> CursorMut<'_, V> {
        let position = self.find_position(hash, eq).unwrap_or_else(|| self.end());
        CursorMut {
            table: self,
            position,
        }
    }

    /// Returns the value at `position`, or `None` for the end sentinel or a
    /// position that does not name an occupied slot.
    pub fn get_at(&self, position: Position) -> Option<&V> {
        self.buckets
            .get(position.bucket)?
            .get(position.slot)
            .map(|(_, value)| value)
    }

    /// Mutable counterpart of [`get_at`](Self::get_at).
    pub fn get_at_mut(&mut self, position: Position) -> Option<&mut V> {
        self.buckets
            .get_mut(position.bucket)?
            .get_mut(position.slot)
            .map(|(_, value)| value)
    }

    /// Position of the first value in iteration order, or [`end`](Self::end)
    /// for an empty table.
    pub fn begin(&self) -> Position {
        self.seek(Position { bucket: 0, slot: 0 })
    }

    /// The end sentinel. Every end position of a table compares equal, at
    /// `(capacity, 0)`.
    pub fn end(&self) -> Position {
        match self.buckets.last() {
            Some(last) if self.populated > 0 => self.seek(Position {
                bucket: self.buckets.len() - 1,
                slot: last.len(),
            }),
            _ => self.seek(Position { bucket: 0, slot: 0 }),
        }
    }

    /// Returns the position following `position` in iteration order.
    ///
    /// Advancing the end sentinel yields the end sentinel.
    pub fn advance(&self, position: Position) -> Position {
        if position.bucket >= self.buckets.len() {
            return self.end();
        }
        self.seek(Position {
            bucket: position.bucket,
            slot: position.slot + 1,
        })
    }

    /// Moves `position` forward until it names an occupied slot or reaches
    /// the end sentinel.
    ///
    /// Only positions one past the end of a chain are moved; a position
    /// strictly inside a chain is already normalized.
    fn seek(&self, mut position: Position) -> Position {
        while position.bucket < self.buckets.len()
            && position.slot == self.buckets[position.bucket].len()
        {
            position.bucket += 1;
            position.slot = 0;
        }
        position
    }

    /// Returns a cursor at the first value.
    pub fn cursor_begin(&self) -> Cursor<'_, V> {
        Cursor {
            table: self,
            position: self.begin(),
        }
    }

    /// Returns the end cursor.
    pub fn cursor_end(&self) -> Cursor<'_, V> {
        Cursor {
            table: self,
            position: self.end(),
        }
    }

    /// Returns a mutable cursor at the first value.
    pub fn cursor_begin_mut(&mut self) -> CursorMut<'_, V> {
        let position = self.begin();
        CursorMut {
            table: self,
            position,
        }
    }

    /// Inserts a value without checking for an equal value already present.
    ///
    /// Applies the growth policy first: if `(len + 1) * 3 > capacity`, every
    /// value is collected in iteration order, the new value is appended, and
    /// the table is rebuilt. Otherwise the value is appended to its chain.
    ///
    /// Inserting a value equal to one already present leaves both in the
    /// table; lookups then see whichever comes first in its chain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// *table.insert_unique(9, 1u32) += 1;
    /// assert_eq!(table.find(9, |_| true), Some(&2));
    /// assert_eq!(table.capacity(), 5);
    /// ```
    pub fn insert_unique(&mut self, hash: u64, value: V) -> &mut V {
        let position = self.insert_slot(hash, value);
        &mut self.buckets[position.bucket][position.slot].1
    }

    fn insert_slot(&mut self, hash: u64, value: V) -> Position {
        if needs_growth(self.populated, self.buckets.len()) {
            let mut entries = self.take_entries(1);
            entries.push((hash, value));
            self.rebuild(entries);
        } else {
            let bucket = bucket_index(hash, self.buckets.len());
            self.buckets[bucket].push((hash, value));
            self.populated += 1;
        }

        // Either path leaves the new value at the tail of its chain.
        let bucket = bucket_index(hash, self.buckets.len());
        Position {
            bucket,
            slot: self.buckets[bucket].len() - 1,
        }
    }

    /// Removes and returns a value from the table.
    ///
    /// The value is identified by its hash and an equality predicate. The
    /// last value of the chain takes its slot. If the table then falls below
    /// a load factor of `1/20`, it is rebuilt at `5 * len` buckets. Removing
    /// an absent value changes nothing and returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.entry(42, |&n: &u64| n == 42).or_insert(42);
    ///
    /// let removed = table.remove(42, |&n| n == 42);
    /// assert_eq!(removed, Some(42));
    /// assert!(table.is_empty());
    ///
    /// let not_found = table.remove(99, |&n| n == 99);
    /// assert_eq!(not_found, None);
    /// ```
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<V> {
        let position = self.find_position(hash, eq)?;
        Some(self.remove_at(position))
    }

    fn remove_at(&mut self, position: Position) -> V {
        let (_, value) = self.buckets[position.bucket].swap_remove(position.slot);
        self.populated -= 1;

        if needs_shrink(self.populated, self.buckets.len()) {
            let entries = self.take_entries(0);
            self.rebuild(entries);
        }

        value
    }

    /// Gets an entry for the given hash and equality predicate.
    ///
    /// Inserting through a vacant entry applies the growth policy and
    /// removing through an occupied entry applies the shrink policy, exactly
    /// as [`insert_unique`](Self::insert_unique) and [`remove`](Self::remove)
    /// do.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::new();
    /// let hash = hash_str("hello");
    ///
    /// match table.entry(hash, |s: &String| s == "hello") {
    ///     chain_hash::hash_table::Entry::Vacant(entry) => {
    ///         entry.insert("hello".to_string());
    ///     }
    ///     chain_hash::hash_table::Entry::Occupied(mut entry) => {
    ///         *entry.get_mut() = "updated".to_string();
    ///     }
    /// }
    ///
    /// table
    ///     .entry(hash, |s: &String| s == "hello")
    ///     .or_insert("other".to_string());
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Entry<'_, V> {
        match self.find_position(hash, eq) {
            Some(position) => Entry::Occupied(OccupiedEntry {
                table: self,
                position,
            }),
            None => Entry::Vacant(VacantEntry { table: self, hash }),
        }
    }

    /// Moves every value out in iteration order, leaving the table with no
    /// buckets. `extra` reserves room for values the caller will append.
    fn take_entries(&mut self, extra: usize) -> Vec<(u64, V)> {
        let mut entries = Vec::with_capacity(self.populated + extra);
        for bucket in core::mem::take(&mut self.buckets) {
            entries.extend(bucket);
        }
        self.populated = 0;
        entries
    }

    /// Discards the current bucket array and re-buckets `entries` into a
    /// fresh one of `5 * entries.len()` buckets, in input order.
    ///
    /// Construction, growth and shrink all go through here.
    fn rebuild(&mut self, entries: Vec<(u64, V)>) {
        let capacity = rebuilt_capacity(entries.len());
        let mut buckets: Vec<Bucket<V>> = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, Vec::new);

        self.populated = entries.len();
        for (hash, value) in entries {
            buckets[bucket_index(hash, capacity)].push((hash, value));
        }
        self.buckets = buckets;
    }

    /// Drops every value that has an equal value later in its chain.
    /// Returns whether anything was dropped.
    fn dedup(&mut self, eq: impl Fn(&V, &V) -> bool) -> bool {
        let mut removed = 0;
        for bucket in self.buckets.iter_mut() {
            let mut slot = 0;
            while slot < bucket.len() {
                let (hash, value) = &bucket[slot];
                let shadowed = bucket[slot + 1..]
                    .iter()
                    .any(|(later_hash, later)| later_hash == hash && eq(value, later));
                if shadowed {
                    bucket.remove(slot);
                    removed += 1;
                } else {
                    slot += 1;
                }
            }
        }
        self.populated -= removed;
        removed > 0
    }

    /// Computes a histogram of chain lengths for the current table state.
    ///
    /// Available with the `stats` feature.
    #[cfg(any(test, feature = "stats"))]
    pub fn chain_histogram(&self) -> ChainHistogram {
        if self.buckets.is_empty() {
            return ChainHistogram { counts: Vec::new() };
        }

        let longest = self.buckets.iter().map(Vec::len).max().unwrap_or(0);
        let mut counts = alloc::vec![0usize; longest + 1];
        for bucket in &self.buckets {
            counts[bucket.len()] += 1;
        }
        ChainHistogram { counts }
    }

    /// Returns utilization statistics for debugging.
    ///
    /// Available with the `stats` feature.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        let capacity = self.buckets.len();
        let empty_buckets = self.buckets.iter().filter(|b| b.is_empty()).count();
        let chain_bytes: usize = self
            .buckets
            .iter()
            .map(|b| b.capacity() * core::mem::size_of::<(u64, V)>())
            .sum();

        DebugStats {
            populated: self.populated,
            capacity,
            empty_buckets,
            longest_chain: self.buckets.iter().map(Vec::len).max().unwrap_or(0),
            load_factor: if capacity == 0 {
                0.0
            } else {
                self.populated as f64 / capacity as f64
            },
            bucket_utilization: if capacity == 0 {
                0.0
            } else {
                (capacity - empty_buckets) as f64 / capacity as f64
            },
            total_bytes: self.buckets.capacity() * core::mem::size_of::<Bucket<V>>() + chain_bytes,
        }
    }
}

impl<V> IntoIterator for HashTable<V> {
    type Item = V;
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> IntoIter<V> {
        IntoIter {
            inner: self.buckets.into_iter().flatten(),
            remaining: self.populated,
        }
    }
}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type Item = &'a V;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}

impl<'a, V> IntoIterator for &'a mut HashTable<V> {
    type Item = &'a mut V;
    type IntoIter = IterMut<'a, V>;

    fn into_iter(self) -> IterMut<'a, V> {
        self.iter_mut()
    }
}

/// A view into a single entry in the hash table, which may be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashTable`].
///
/// [`entry`]: HashTable::entry
pub enum Entry<'a, V> {
    /// A vacant entry - no matching value is present in the table
    Vacant(VacantEntry<'a, V>),
    /// An occupied entry - a matching value is present in the table
    Occupied(OccupiedEntry<'a, V>),
}

impl<'a, V> Entry<'a, V> {
    /// Inserts `default` if the entry is vacant and returns a mutable
    /// reference to the value in the entry.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts a value computed from a closure if the entry is vacant and
    /// returns a mutable reference.
    ///
    /// The closure is not called for an occupied entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// let value = table
    ///     .entry(3, |&n: &u64| n == 3)
    ///     .or_insert_with(|| 3);
    /// assert_eq!(*value, 3);
    ///
    /// let existing = table
    ///     .entry(3, |&n: &u64| n == 3)
    ///     .or_insert_with(|| panic!("Should not be called"));
    /// assert_eq!(*existing, 3);
    /// ```
    pub fn or_insert_with(self, default: impl FnOnce() -> V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Applies `f` to an occupied entry's value. Vacant entries are left
    /// alone and yield `None`.
    pub fn and_modify(self, f: impl FnOnce(&mut V)) -> Option<&'a mut V> {
        match self {
            Entry::Occupied(entry) => {
                let value = entry.into_mut();
                f(value);
                Some(value)
            }
            Entry::Vacant(_) => None,
        }
    }

    /// Inserts `V::default()` if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_default(self) -> &'a mut V
    where
        V: Default,
    {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in the hash table.
///
/// [`entry`]: HashTable::entry
pub struct VacantEntry<'a, V> {
    table: &'a mut HashTable<V>,
    hash: u64,
}

impl<'a, V> VacantEntry<'a, V> {
    /// Inserts a value into the vacant entry and returns a mutable reference
    /// to it.
    ///
    /// This may rebuild the table; see [`HashTable::insert_unique`].
    pub fn insert(self, value: V) -> &'a mut V {
        self.table.insert_unique(self.hash, value)
    }
}

/// A view into an occupied entry in the hash table.
pub struct OccupiedEntry<'a, V> {
    table: &'a mut HashTable<V>,
    position: Position,
}

impl<'a, V> OccupiedEntry<'a, V> {
    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        &self.table.buckets[self.position.bucket][self.position.slot].1
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.table.buckets[self.position.bucket][self.position.slot].1
    }

    /// Converts the entry into a mutable reference to the value with the
    /// lifetime of the entry.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.table.buckets[self.position.bucket][self.position.slot].1
    }

    /// The position of the entry's value.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Removes the entry from the table and returns the value.
    ///
    /// This may rebuild the table; see [`HashTable::remove`].
    pub fn remove(self) -> V {
        self.table.remove_at(self.position)
    }
}

/// A read-only cursor over a [`HashTable`].
///
/// A cursor is a normalized [`Position`] plus a shared borrow of the table,
/// so the table cannot be mutated while the cursor is alive. Two cursors are
/// equal when they borrow the same table and sit at the same position; all
/// end cursors of a table are equal.
pub struct Cursor<'a, V> {
    table: &'a HashTable<V>,
    position: Position,
}

impl<V> Clone for Cursor<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Cursor<'_, V> {}

impl<V> PartialEq for Cursor<'_, V> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.table, other.table) && self.position == other.position
    }
}

impl<V> Eq for Cursor<'_, V> {}

impl<V: Debug> Debug for Cursor<'_, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position)
            .field("value", &self.get())
            .finish()
    }
}

impl<'a, V> Cursor<'a, V> {
    /// The value under the cursor, or `None` at the end.
    pub fn get(&self) -> Option<&'a V> {
        self.table.get_at(self.position)
    }

    /// Steps to the next value in iteration order. Does nothing at the end.
    pub fn move_next(&mut self) {
        self.position = self.table.advance(self.position);
    }

    /// Returns `true` if the cursor is the end sentinel.
    pub fn is_end(&self) -> bool {
        self.position.bucket >= self.table.capacity()
    }

    /// The cursor's position.
    pub fn position(&self) -> Position {
        self.position
    }
}

/// A cursor over a [`HashTable`] that allows mutating values in place.
///
/// The cursor holds the table's unique borrow, so no insert or removal can
/// happen while it is alive.
pub struct CursorMut<'a, V> {
    table: &'a mut HashTable<V>,
    position: Position,
}

impl<'a, V> CursorMut<'a, V> {
    /// The value under the cursor, or `None` at the end.
    pub fn get(&self) -> Option<&V> {
        self.table.get_at(self.position)
    }

    /// Mutable access to the value under the cursor.
    pub fn get_mut(&mut self) -> Option<&mut V> {
        self.table.get_at_mut(self.position)
    }

    /// Converts the cursor into a mutable reference to the value under it,
    /// with the lifetime of the table borrow.
    pub fn into_mut(self) -> Option<&'a mut V> {
        self.table.get_at_mut(self.position)
    }

    /// Steps to the next value in iteration order. Does nothing at the end.
    pub fn move_next(&mut self) {
        self.position = self.table.advance(self.position);
    }

    /// Returns `true` if the cursor is the end sentinel.
    pub fn is_end(&self) -> bool {
        self.position.bucket >= self.table.capacity()
    }

    /// The cursor's position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Reborrows as a read-only cursor at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, V> {
        Cursor {
            table: &*self.table,
            position: self.position,
        }
    }
}

/// An iterator over the values in a [`HashTable`].
///
/// This struct is created by the [`iter`] method on [`HashTable`]. It walks
/// the same normalized positions a [`Cursor`] does.
///
/// [`iter`]: HashTable::iter
pub struct Iter<'a, V> {
    table: &'a HashTable<V>,
    position: Position,
    remaining: usize,
}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Iter {
            table: self.table,
            position: self.position,
            remaining: self.remaining,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.table.get_at(self.position)?;
        self.position = self.table.advance(self.position);
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

/// A mutable iterator over the values in a [`HashTable`].
///
/// Yields values in the same order as [`Iter`].
pub struct IterMut<'a, V> {
    buckets: core::slice::IterMut<'a, Bucket<V>>,
    chain: core::slice::IterMut<'a, (u64, V)>,
    remaining: usize,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((_, value)) = self.chain.next() {
                self.remaining -= 1;
                return Some(value);
            }
            self.chain = self.buckets.next()?.iter_mut();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}

impl<V> FusedIterator for IterMut<'_, V> {}

/// A draining iterator over the values in a [`HashTable`].
///
/// This struct is created by the [`drain`] method on [`HashTable`].
///
/// [`drain`]: HashTable::drain
pub struct Drain<'a, V> {
    inner: core::iter::Flatten<alloc::vec::IntoIter<Bucket<V>>>,
    remaining: usize,
    _marker: PhantomData<&'a mut HashTable<V>>,
}

impl<V> Iterator for Drain<'_, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        let (_, value) = self.inner.next()?;
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Drain<'_, V> {}

impl<V> FusedIterator for Drain<'_, V> {}

/// An owning iterator over the values of a [`HashTable`].
pub struct IntoIter<V> {
    inner: core::iter::Flatten<alloc::vec::IntoIter<Bucket<V>>>,
    remaining: usize,
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        let (_, value) = self.inner.next()?;
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

impl<V> FusedIterator for IntoIter<V> {}

//! ChainSet: the public container on top of `ChainTable`.

use crate::error::{check_load_factor, SetError};
use crate::iter::{IntoIter, Iter};
use crate::reentrancy::DebugReentrancy;
use crate::table::{ChainTable, NodeKey};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;
use std::io;

/// Minimum number of buckets of a `ChainSet` unless `N` says otherwise.
pub const DEFAULT_MIN_BUCKETS: usize = 7;

/// Largest `len / bucket_count` a set accepts after an insertion.
pub const DEFAULT_MAX_LOAD_FACTOR: f32 = 0.7;

/// Unordered set of unique keys, hashed into `bucket_count()` separate
/// chains. `N` is the minimum bucket count; it must be at least 1.
pub struct ChainSet<K, S = DefaultHashBuilder, const N: usize = { DEFAULT_MIN_BUCKETS }> {
    pub(crate) table: ChainTable<K, S, N>,
    reentrancy: DebugReentrancy,
}

impl<K> ChainSet<K>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<K, S, const N: usize> Default for ChainSet<K, S, N>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, S, const N: usize> ChainSet<K, S, N> {
    fn from_table(table: ChainTable<K, S, N>) -> Self {
        Self {
            table,
            reentrancy: DebugReentrancy::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// Current number of buckets; never below `N`.
    pub fn bucket_count(&self) -> usize {
        self.table.bucket_count()
    }

    pub fn load_factor(&self) -> f32 {
        self.table.len() as f32 / self.table.bucket_count() as f32
    }

    pub fn max_load_factor(&self) -> f32 {
        self.table.max_load_factor()
    }

    pub fn hasher(&self) -> &S {
        self.table.hasher()
    }

    /// Cursor on the first key, or `end()` for an empty set.
    pub fn begin(&self) -> Iter<'_, K> {
        Iter::begin(self.table.nodes(), self.table.buckets())
    }

    pub fn end(&self) -> Iter<'_, K> {
        Iter::end(self.table.nodes(), self.table.buckets())
    }

    pub fn iter(&self) -> Iter<'_, K> {
        self.begin()
    }

    /// Drops every key. The bucket count does not shrink.
    pub fn clear(&mut self) {
        let _g = self.reentrancy.enter();
        self.table.clear();
    }

    /// Exchanges contents, bucket arrays, hashers and load factors.
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.table, &mut other.table);
    }

    /// Writes the bucket layout. The header reports the minimum bucket
    /// count `N`, not the live one.
    pub fn dump<W>(&self, out: &mut W) -> io::Result<()>
    where
        W: io::Write,
        K: fmt::Display,
    {
        writeln!(
            out,
            "curr_size = {} table_size = {}",
            self.len(),
            ChainTable::<K, S, N>::min_buckets()
        )?;
        for bucket in 0..self.table.bucket_count() {
            write!(out, "{bucket}: ")?;
            for key in self.table.chain(bucket) {
                write!(out, " -> {key}")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

impl<K, S, const N: usize> ChainSet<K, S, N>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::from_table(ChainTable::with_buckets(hasher, DEFAULT_MAX_LOAD_FACTOR, 0))
    }

    pub fn with_hasher_and_load_factor(hasher: S, max_load_factor: f32) -> Result<Self, SetError> {
        let max_load_factor = check_load_factor(max_load_factor)?;
        Ok(Self::from_table(ChainTable::with_buckets(
            hasher,
            max_load_factor,
            0,
        )))
    }

    /// Replaces the load bound and grows if the current length exceeds it.
    pub fn set_max_load_factor(&mut self, max_load_factor: f32) -> Result<(), SetError> {
        let _g = self.reentrancy.enter();
        let max_load_factor = check_load_factor(max_load_factor)?;
        self.table.set_max_load_factor_unchecked(max_load_factor);
        self.table.try_reserve(self.table.len())
    }

    pub fn contains<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        self.table.find_node(q).is_some()
    }

    /// 1 if the set holds a key equal to `q`, else 0.
    pub fn count<Q>(&self, q: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        usize::from(self.table.find_node(q).is_some())
    }

    /// Cursor on the key equal to `q`, or `end()`.
    pub fn find<Q>(&self, q: &Q) -> Iter<'_, K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        match self.table.find_node(q) {
            Some((bucket, node)) => self.cursor(bucket, node),
            None => self.end(),
        }
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let (_, node) = self.table.find_node(q)?;
        self.table.nodes().get(node).map(|n| &n.key)
    }

    /// Inserts `key` unless an equal key is present. Returns a cursor on the
    /// stored key and whether the insertion happened. A duplicate leaves the
    /// set untouched, including its bucket count.
    pub fn insert(&mut self, key: K) -> (Iter<'_, K>, bool) {
        let _g = self.reentrancy.enter();
        let (bucket, node, inserted) = Self::insert_unique(&mut self.table, key);
        (self.cursor(bucket, node), inserted)
    }

    /// Removes the key equal to `q`; returns how many keys were removed.
    pub fn erase<Q>(&mut self, q: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        usize::from(self.table.unlink(q).is_some())
    }

    /// Removes and returns the key equal to `q`.
    pub fn take<Q>(&mut self, q: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        self.table.unlink(q)
    }

    /// Grows so that `additional` more keys fit under the load bound.
    ///
    /// # Panics
    ///
    /// Panics if the new bucket count overflows `usize`.
    pub fn reserve(&mut self, additional: usize) {
        let _g = self.reentrancy.enter();
        let requested = self
            .table
            .len()
            .checked_add(additional)
            .unwrap_or_else(|| panic!("{}", SetError::CapacityOverflow { requested: usize::MAX }));
        self.table.reserve(requested);
    }

    pub fn try_reserve(&mut self, additional: usize) -> Result<(), SetError> {
        let _g = self.reentrancy.enter();
        let requested = self
            .table
            .len()
            .checked_add(additional)
            .ok_or(SetError::CapacityOverflow {
                requested: usize::MAX,
            })?;
        self.table.try_reserve(requested)
    }

    /// Redistributes every key into a fresh bucket array of at least
    /// `bucket_count` buckets, never fewer than `N` or than the load bound
    /// requires.
    pub fn rehash(&mut self, bucket_count: usize) {
        let _g = self.reentrancy.enter();
        self.table.rehash(bucket_count);
    }

    /// Replaces the contents with `keys`. The hasher is kept; the load
    /// factor returns to the default.
    pub fn assign<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = K>,
        S: Clone,
    {
        let mut fresh = Self::with_hasher(self.hasher().clone());
        fresh.extend(keys);
        self.swap(&mut fresh);
    }

    fn cursor(&self, bucket: usize, node: NodeKey) -> Iter<'_, K> {
        Iter::at(self.table.nodes(), self.table.buckets(), bucket, node)
    }

    /// Duplicate check, growth for one more key, then link.
    fn insert_unique(table: &mut ChainTable<K, S, N>, key: K) -> (usize, NodeKey, bool) {
        if let Some((bucket, node)) = table.find_node(&key) {
            return (bucket, node, false);
        }
        table.reserve(table.len() + 1);
        let (bucket, node) = table.link(key);
        (bucket, node, true)
    }
}

/// Copies key by key in this set's iteration order, into a table of the
/// same bucket count. Chains of the copy may be ordered differently.
impl<K, S, const N: usize> Clone for ChainSet<K, S, N>
where
    K: Eq + Hash + Clone,
    S: BuildHasher + Clone,
{
    fn clone(&self) -> Self {
        let mut table = ChainTable::with_buckets(
            self.table.hasher().clone(),
            self.table.max_load_factor(),
            self.table.bucket_count(),
        );
        for key in self.iter() {
            table.link(key.clone());
        }
        Self::from_table(table)
    }

    fn clone_from(&mut self, source: &Self) {
        let mut fresh = source.clone();
        self.swap(&mut fresh);
    }
}

/// Set equality: same length and every key of `other` present in `self`.
impl<K, S1, S2, const N1: usize, const N2: usize> PartialEq<ChainSet<K, S2, N2>>
    for ChainSet<K, S1, N1>
where
    K: Eq + Hash,
    S1: BuildHasher,
    S2: BuildHasher,
{
    fn eq(&self, other: &ChainSet<K, S2, N2>) -> bool {
        self.len() == other.len() && other.iter().all(|k| self.count(k) >= 1)
    }
}

impl<K, S, const N: usize> Eq for ChainSet<K, S, N>
where
    K: Eq + Hash,
    S: BuildHasher,
{
}

impl<K: fmt::Debug, S, const N: usize> fmt::Debug for ChainSet<K, S, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Bulk insertion: each key is checked and room is reserved one key at a
/// time, so a large batch may rehash several times.
impl<K, S, const N: usize> Extend<K> for ChainSet<K, S, N>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, keys: I) {
        let _g = self.reentrancy.enter();
        for key in keys {
            Self::insert_unique(&mut self.table, key);
        }
    }
}

impl<'a, K, S, const N: usize> Extend<&'a K> for ChainSet<K, S, N>
where
    K: Eq + Hash + Copy + 'a,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = &'a K>>(&mut self, keys: I) {
        self.extend(keys.into_iter().copied());
    }
}

impl<K, S, const N: usize> FromIterator<K> for ChainSet<K, S, N>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut set = Self::with_hasher(S::default());
        set.extend(keys);
        set
    }
}

impl<K, const M: usize> From<[K; M]> for ChainSet<K>
where
    K: Eq + Hash,
{
    fn from(keys: [K; M]) -> Self {
        keys.into_iter().collect()
    }
}

impl<'a, K, S, const N: usize> IntoIterator for &'a ChainSet<K, S, N> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

impl<K, S, const N: usize> IntoIterator for ChainSet<K, S, N> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(self) -> IntoIter<K> {
        let (buckets, nodes) = self.table.into_parts();
        IntoIter::new(buckets, nodes)
    }
}

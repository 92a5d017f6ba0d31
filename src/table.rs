//! ChainTable: the bucket array, the node arena and the growth policy.
//!
//! Chains are singly linked through `Node::next`, newest node at the head.
//! Nodes live in a generational `SlotMap`, so unlinking a node and dropping
//! it are the same operation, and a stale `NodeKey` can never resolve to a
//! node created later in the same slot.
//!
//! The engine does no duplicate checking: `link` trusts its caller.

use crate::error::SetError;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Arena slot of one chain node.
    pub(crate) struct NodeKey;
}

pub(crate) type Bucket = Option<NodeKey>;

#[derive(Debug)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) next: Option<NodeKey>,
}

pub(crate) struct ChainTable<K, S, const N: usize> {
    hasher: S,
    buckets: Vec<Bucket>,
    nodes: SlotMap<NodeKey, Node<K>>,
    max_load_factor: f32,
}

impl<K, S, const N: usize> ChainTable<K, S, N> {
    const MIN_BUCKETS: usize = {
        assert!(N > 0, "a chain table needs at least one bucket");
        N
    };

    /// Empty table with exactly `max(N, bucket_count)` buckets.
    pub(crate) fn with_buckets(hasher: S, max_load_factor: f32, bucket_count: usize) -> Self {
        Self {
            hasher,
            buckets: vec![None; bucket_count.max(Self::MIN_BUCKETS)],
            nodes: SlotMap::with_key(),
            max_load_factor,
        }
    }

    pub(crate) fn min_buckets() -> usize {
        Self::MIN_BUCKETS
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub(crate) fn max_load_factor(&self) -> f32 {
        self.max_load_factor
    }

    pub(crate) fn set_max_load_factor_unchecked(&mut self, max_load_factor: f32) {
        self.max_load_factor = max_load_factor;
    }

    pub(crate) fn hasher(&self) -> &S {
        &self.hasher
    }

    pub(crate) fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub(crate) fn nodes(&self) -> &SlotMap<NodeKey, Node<K>> {
        &self.nodes
    }

    pub(crate) fn into_parts(self) -> (Vec<Bucket>, SlotMap<NodeKey, Node<K>>) {
        (self.buckets, self.nodes)
    }

    /// Keys of one chain, head first.
    pub(crate) fn chain(&self, bucket: usize) -> impl Iterator<Item = &K> + '_ {
        let mut cursor = self.buckets.get(bucket).copied().flatten();
        core::iter::from_fn(move || {
            let node = self.nodes.get(cursor?)?;
            cursor = node.next;
            Some(&node.key)
        })
    }

    /// Drops every node and empties every chain. The bucket count is kept.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.buckets.iter_mut().for_each(|head| *head = None);
    }

    fn fits(&self, keys: usize, bucket_count: usize) -> bool {
        keys as f64 <= bucket_count as f64 * f64::from(self.max_load_factor)
    }

    /// Bucket count `reserve` grows to, or `None` when the current one
    /// already holds `requested` keys. Growth is `n * 2 + 1` from the current
    /// count until the load bound is met.
    pub(crate) fn grown_bucket_count(&self, requested: usize) -> Result<Option<usize>, SetError> {
        if self.fits(requested, self.buckets.len()) {
            return Ok(None);
        }
        let mut next = self.buckets.len();
        loop {
            next = next
                .checked_mul(2)
                .and_then(|n| n.checked_add(1))
                .ok_or(SetError::CapacityOverflow { requested })?;
            if self.fits(requested, next) {
                return Ok(Some(next));
            }
        }
    }

    /// `max(N, requested, ceil(len / max_load_factor))`.
    fn rehash_target(&self, requested: usize) -> usize {
        let needed = (self.len() as f64 / f64::from(self.max_load_factor)).ceil() as usize;
        Self::MIN_BUCKETS.max(requested).max(needed)
    }
}

impl<K, S, const N: usize> ChainTable<K, S, N>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    pub(crate) fn bucket_of<Q>(&self, q: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        (self.hasher.hash_one(q) % self.buckets.len() as u64) as usize
    }

    /// Bucket index and node of the key equal to `q`, scanning one chain.
    pub(crate) fn find_node<Q>(&self, q: &Q) -> Option<(usize, NodeKey)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let bucket = self.bucket_of(q);
        let mut cursor = self.buckets[bucket];
        while let Some(k) = cursor {
            let node = &self.nodes[k];
            if node.key.borrow() == q {
                return Some((bucket, k));
            }
            cursor = node.next;
        }
        None
    }

    /// Prepends a new node for `key` to its chain. The caller guarantees no
    /// equal key is present.
    pub(crate) fn link(&mut self, key: K) -> (usize, NodeKey) {
        let bucket = self.bucket_of(&key);
        let next = self.buckets[bucket];
        let node = self.nodes.insert(Node { key, next });
        self.buckets[bucket] = Some(node);
        (bucket, node)
    }

    /// Removes the key equal to `q` from its chain and hands it back.
    pub(crate) fn unlink<Q>(&mut self, q: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let bucket = self.bucket_of(q);
        let mut prev: Option<NodeKey> = None;
        let mut cursor = self.buckets[bucket];
        while let Some(k) = cursor {
            let node = &self.nodes[k];
            let next = node.next;
            if node.key.borrow() == q {
                match prev {
                    None => self.buckets[bucket] = next,
                    Some(p) => self.nodes[p].next = next,
                }
                return self.nodes.remove(k).map(|n| n.key);
            }
            prev = Some(k);
            cursor = next;
        }
        None
    }

    /// Makes room for `requested` keys in total, rehashing at most once.
    pub(crate) fn reserve(&mut self, requested: usize) {
        match self.grown_bucket_count(requested) {
            Ok(Some(bucket_count)) => self.rehash(bucket_count),
            Ok(None) => {}
            Err(e) => panic!("{e}"),
        }
    }

    pub(crate) fn try_reserve(&mut self, requested: usize) -> Result<(), SetError> {
        if let Some(bucket_count) = self.grown_bucket_count(requested)? {
            self.try_rehash(bucket_count)?;
        }
        Ok(())
    }

    pub(crate) fn rehash(&mut self, requested: usize) {
        let target = self.rehash_target(requested);
        self.redistribute(vec![None; target]);
    }

    pub(crate) fn try_rehash(&mut self, requested: usize) -> Result<(), SetError> {
        let target = self.rehash_target(requested);
        let mut fresh = Vec::new();
        fresh
            .try_reserve_exact(target)
            .map_err(|_| SetError::AllocFailed { buckets: target })?;
        fresh.resize(target, None);
        self.redistribute(fresh);
        Ok(())
    }

    /// Moves every key into `fresh`. Each old node is dropped and the key is
    /// linked anew, so no `NodeKey` survives the call.
    fn redistribute(&mut self, fresh: Vec<Bucket>) {
        let old = core::mem::replace(&mut self.buckets, fresh);
        for head in old {
            let mut cursor = head;
            while let Some(k) = cursor {
                let Node { key, next } = self
                    .nodes
                    .remove(k)
                    .expect("chains only link live nodes");
                self.link(key);
                cursor = next;
            }
        }
    }
}

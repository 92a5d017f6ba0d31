//! Forward iterators over a `ChainSet`.
//!
//! Order is ascending bucket index and, within a bucket, newest key first.
//! That order is an artifact of the current layout and changes on rehash.

use crate::table::{Bucket, Node, NodeKey};
use core::fmt;
use core::iter::FusedIterator;
use slotmap::SlotMap;

/// Read-only cursor over one table: bucket position plus current node.
///
/// The end state has no current node and its position equals the bucket
/// count. Because an `Iter` borrows the set, it cannot outlive a mutation.
pub struct Iter<'a, K> {
    nodes: &'a SlotMap<NodeKey, Node<K>>,
    buckets: &'a [Bucket],
    bucket: usize,
    node: Option<NodeKey>,
}

impl<'a, K> Iter<'a, K> {
    /// Positioned at the head of the first non-empty chain, or at the end.
    pub(crate) fn begin(nodes: &'a SlotMap<NodeKey, Node<K>>, buckets: &'a [Bucket]) -> Self {
        let mut it = Self {
            nodes,
            buckets,
            bucket: 0,
            node: None,
        };
        it.seek_from(0);
        it
    }

    pub(crate) fn end(nodes: &'a SlotMap<NodeKey, Node<K>>, buckets: &'a [Bucket]) -> Self {
        Self {
            nodes,
            buckets,
            bucket: buckets.len(),
            node: None,
        }
    }

    pub(crate) fn at(
        nodes: &'a SlotMap<NodeKey, Node<K>>,
        buckets: &'a [Bucket],
        bucket: usize,
        node: NodeKey,
    ) -> Self {
        Self {
            nodes,
            buckets,
            bucket,
            node: Some(node),
        }
    }

    fn seek_from(&mut self, start: usize) {
        self.bucket = start;
        while self.bucket < self.buckets.len() {
            if let Some(head) = self.buckets[self.bucket] {
                self.node = Some(head);
                return;
            }
            self.bucket += 1;
        }
        self.node = None;
    }

    /// The key under the cursor; `None` at the end.
    pub fn get(&self) -> Option<&'a K> {
        self.nodes.get(self.node?).map(|n| &n.key)
    }

    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// Steps to the next key. A no-op at the end.
    pub fn advance(&mut self) {
        let Some(current) = self.node else {
            return;
        };
        match self.nodes.get(current).and_then(|n| n.next) {
            Some(next) => self.node = Some(next),
            None => self.seek_from(self.bucket + 1),
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let key = self.get()?;
        self.advance();
        Some(key)
    }
}

impl<K> FusedIterator for Iter<'_, K> {}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            buckets: self.buckets,
            bucket: self.bucket,
            node: self.node,
        }
    }
}

/// Equal only when both cursors walk the same bucket array and sit on the
/// same bucket and node.
impl<K> PartialEq for Iter<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.buckets, other.buckets)
            && self.bucket == other.bucket
            && self.node == other.node
    }
}

impl<K> Eq for Iter<'_, K> {}

impl<K: fmt::Debug> fmt::Debug for Iter<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("bucket", &self.bucket)
            .field("key", &self.get())
            .finish()
    }
}

/// Owning iterator; releases each node as it yields its key.
pub struct IntoIter<K> {
    nodes: SlotMap<NodeKey, Node<K>>,
    buckets: std::vec::IntoIter<Bucket>,
    node: Option<NodeKey>,
}

impl<K> IntoIter<K> {
    pub(crate) fn new(buckets: Vec<Bucket>, nodes: SlotMap<NodeKey, Node<K>>) -> Self {
        Self {
            nodes,
            buckets: buckets.into_iter(),
            node: None,
        }
    }
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        loop {
            if let Some(current) = self.node {
                let Node { key, next } = self.nodes.remove(current)?;
                self.node = next;
                return Some(key);
            }
            self.node = self.buckets.next()?;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.nodes.len(), Some(self.nodes.len()))
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {}
impl<K> FusedIterator for IntoIter<K> {}

impl<K: fmt::Debug> fmt::Debug for IntoIter<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("remaining", &self.nodes.len())
            .finish()
    }
}

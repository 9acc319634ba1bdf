//! Fixed-capacity children index.
//!
//! Maps action labels to child nodes by chaining over a bucket array
//! sized once at construction. The index never resizes or rehashes: once
//! the number of distinct actions at a node exceeds the bucket count,
//! lookup and insert degrade linearly along the chains. The capacity is
//! derived from the configured branching estimate, so a well-estimated
//! domain stays near O(1).

use thiserror::Error;

use crate::node::NodeId;

/// Insertion of a label that is already present.
///
/// The action enumerator contract guarantees unique labels per state, so
/// hitting this means the state backend violated its protocol.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("duplicate action label `{label}`")]
pub struct DuplicateAction {
    /// The repeated label.
    pub label: String,
}

struct Bucket {
    label: String,
    child: NodeId,
    next: Option<Box<Bucket>>,
}

/// Hash map from action label to child node, fixed capacity, chained.
pub struct ActionMap {
    buckets: Box<[Option<Box<Bucket>>]>,
    len: usize,
}

impl ActionMap {
    /// Create an index with a fixed bucket count. A capacity of zero is
    /// clamped to one so hashing always has a modulus.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut buckets = Vec::new();
        buckets.resize_with(capacity.max(1), || None);
        Self {
            buckets: buckets.into_boxed_slice(),
            len: 0,
        }
    }

    /// Polynomial rolling hash over the label's bytes, reduced to a
    /// bucket position.
    fn bucket_of(&self, label: &str) -> usize {
        let hash = label
            .bytes()
            .fold(0u64, |h, b| h.wrapping_mul(31).wrapping_add(u64::from(b)));
        (hash % self.buckets.len() as u64) as usize
    }

    /// Number of entries present.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a child under `label`. Rejects a label that is already
    /// present without touching the index.
    pub fn put(&mut self, label: String, child: NodeId) -> Result<(), DuplicateAction> {
        if self.get(&label).is_some() {
            return Err(DuplicateAction { label });
        }

        // Append at the chain tail so traversal within one bucket follows
        // insertion order.
        let idx = self.bucket_of(&label);
        let mut slot = &mut self.buckets[idx];
        while let Some(bucket) = slot {
            slot = &mut bucket.next;
        }
        *slot = Some(Box::new(Bucket {
            label,
            child,
            next: None,
        }));
        self.len += 1;
        Ok(())
    }

    /// Look up the child stored under `label`.
    pub fn get(&self, label: &str) -> Option<NodeId> {
        let mut slot = self.buckets[self.bucket_of(label)].as_deref();
        while let Some(bucket) = slot {
            if bucket.label == label {
                return Some(bucket.child);
            }
            slot = bucket.next.as_deref();
        }
        None
    }

    /// Traverse all present entries.
    ///
    /// Order is unspecified beyond one guarantee: entries sharing a
    /// bucket appear in insertion order. Calling `iter` again restarts
    /// the traversal from the beginning.
    pub fn iter(&self) -> Entries<'_> {
        Entries {
            buckets: &self.buckets,
            next_bucket: 0,
            chain: None,
        }
    }
}

/// Lazy traversal over an [`ActionMap`].
pub struct Entries<'a> {
    buckets: &'a [Option<Box<Bucket>>],
    next_bucket: usize,
    chain: Option<&'a Bucket>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (&'a str, NodeId);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(bucket) = self.chain.take() {
                self.chain = bucket.next.as_deref();
                return Some((bucket.label.as_str(), bucket.child));
            }
            if self.next_bucket == self.buckets.len() {
                return None;
            }
            self.chain = self.buckets[self.next_bucket].as_deref();
            self.next_bucket += 1;
        }
    }
}

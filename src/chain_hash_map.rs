//! ChainHashMap: a fixed bucket array over a slotmap node arena.

use crate::hash::{ByteHasher, WordFoldHasher};
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug)]
struct Node<V> {
    key: Box<[u8]>,
    value: V,
    next: Option<DefaultKey>,
}

/// A hash map from byte-string keys to owned values, with a capacity
/// fixed at creation and chained collision resolution.
///
/// Buckets hold the heads of singly-linked chains; the links are arena
/// keys into a [`SlotMap`], so unlinking a node and releasing its
/// storage is a single `remove` with no pointer pairing to get wrong.
/// Duplicate keys are not merged: inserting the same key twice yields
/// two entries in the same chain, oldest first.
///
/// Single-threaded by design; mutating operations take `&mut self`, so
/// callers wanting shared access must serialize externally.
pub struct ChainHashMap<V, S = WordFoldHasher> {
    hasher: S,
    buckets: Box<[Option<DefaultKey>]>,
    nodes: SlotMap<DefaultKey, Node<V>>,
}

impl<V> ChainHashMap<V> {
    /// Create a map with `capacity` buckets and the default word-fold
    /// hasher.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        Self::with_hasher(capacity, WordFoldHasher)
    }
}

impl<V, S> ChainHashMap<V, S>
where
    S: ByteHasher,
{
    /// Create a map with `capacity` buckets and a caller-supplied
    /// hasher. The hasher is bound for the map's whole lifetime.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_hasher(capacity: usize, hasher: S) -> Self {
        assert!(capacity > 0, "bucket capacity must be positive");
        Self {
            hasher,
            buckets: vec![None; capacity].into_boxed_slice(),
            nodes: SlotMap::with_key(),
        }
    }

    /// Number of buckets, fixed at creation.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Number of live entries across all chains.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn bucket_of(&self, key: &[u8]) -> usize {
        self.hasher.hash_bytes(key) as usize % self.buckets.len()
    }

    /// First node in `key`'s chain whose key matches exactly, if any.
    fn find_node(&self, key: &[u8]) -> Option<DefaultKey> {
        let mut cur = self.buckets[self.bucket_of(key)];
        while let Some(k) = cur {
            let node = &self.nodes[k];
            if &*node.key == key {
                return Some(k);
            }
            cur = node.next;
        }
        None
    }

    /// Insert a key/value pair, storing a private copy of `key`.
    ///
    /// The new entry is appended at the tail of its bucket's chain.
    /// Duplicates are not checked for: inserting a key that is already
    /// present adds a second entry behind the first.
    pub fn insert(&mut self, key: &[u8], value: V) {
        self.insert_owned(key.to_vec(), value);
    }

    /// Like [`insert`](Self::insert), but takes ownership of the
    /// caller's key buffer instead of copying it.
    pub fn insert_owned(&mut self, key: Vec<u8>, value: V) {
        let b = self.bucket_of(&key);
        let node = self.nodes.insert(Node {
            key: key.into_boxed_slice(),
            value,
            next: None,
        });
        match self.buckets[b] {
            None => self.buckets[b] = Some(node),
            Some(head) => {
                let mut tail = head;
                while let Some(next) = self.nodes[tail].next {
                    tail = next;
                }
                self.nodes[tail].next = Some(node);
            }
        }
    }

    /// Value of the oldest entry matching `key`, or `None`.
    ///
    /// Matching is full-length byte equality: a key is never treated as
    /// equal to its own prefix or extension.
    pub fn get(&self, key: &[u8]) -> Option<&V> {
        self.find_node(key).map(|k| &self.nodes[k].value)
    }

    /// Mutable access to the oldest entry matching `key`.
    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut V> {
        self.find_node(key).map(|k| &mut self.nodes[k].value)
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.find_node(key).is_some()
    }

    /// Values of every entry matching `key`, oldest first.
    pub fn get_all<'a>(&'a self, key: &'a [u8]) -> KeyValues<'a, V> {
        KeyValues {
            nodes: &self.nodes,
            cur: self.buckets[self.bucket_of(key)],
            key,
        }
    }

    /// Remove every entry matching `key` from its chain, returning the
    /// removed values oldest first. An empty vector means the key was
    /// not present.
    ///
    /// One pass over the chain suffices: the scan carries the key of
    /// the last node it kept, so each match is unlinked by relinking
    /// that predecessor (or the bucket head) to the match's successor.
    pub fn remove(&mut self, key: &[u8]) -> Vec<V> {
        let b = self.bucket_of(key);
        let mut removed = Vec::new();
        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.buckets[b];
        while let Some(k) = cur {
            let next = self.nodes[k].next;
            if &*self.nodes[k].key == key {
                match prev {
                    Some(p) => self.nodes[p].next = next,
                    None => self.buckets[b] = next,
                }
                let node = self.nodes.remove(k).unwrap();
                removed.push(node.value);
            } else {
                prev = Some(k);
            }
            cur = next;
        }
        removed
    }

    /// Remove only the oldest entry matching `key`, returning its
    /// value. Younger duplicates stay in place.
    pub fn remove_first(&mut self, key: &[u8]) -> Option<V> {
        let b = self.bucket_of(key);
        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.buckets[b];
        while let Some(k) = cur {
            let next = self.nodes[k].next;
            if &*self.nodes[k].key == key {
                match prev {
                    Some(p) => self.nodes[p].next = next,
                    None => self.buckets[b] = next,
                }
                return self.nodes.remove(k).map(|n| n.value);
            }
            prev = Some(k);
            cur = next;
        }
        None
    }

    /// Iterate over all entries in arbitrary order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            it: self.nodes.iter(),
        }
    }
}

/// Iterator over all `(key, value)` pairs of a map, in arbitrary order.
pub struct Iter<'a, V> {
    it: slotmap::basic::Iter<'a, DefaultKey, Node<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a [u8], &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_k, n)| (&*n.key, &n.value))
    }
}

/// Iterator over the values of one key's duplicates, oldest first.
pub struct KeyValues<'a, V> {
    nodes: &'a SlotMap<DefaultKey, Node<V>>,
    cur: Option<DefaultKey>,
    key: &'a [u8],
}

impl<'a, V> Iterator for KeyValues<'a, V> {
    type Item = &'a V;
    fn next(&mut self) -> Option<Self::Item> {
        while let Some(k) = self.cur {
            let node = &self.nodes[k];
            self.cur = node.next;
            if &*node.key == self.key {
                return Some(&node.value);
            }
        }
        None
    }
}

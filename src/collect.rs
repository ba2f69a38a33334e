// SPDX-License-Identifier: AGPL-3.0-or-later

//! Grouping of values under approximately equal keys.
//!
//! Floating-point keys that should be "the same point" rarely compare equal
//! bit for bit. The [`Collector`] buckets values under the first key seen
//! within the caller's matcher, preserving insertion order inside and across
//! buckets.

use itertools::Itertools;

/// One group of values sharing an approximately equal key.
#[derive(Clone, Debug)]
pub struct Bucket<K, V> {
    /// The first key inserted into this bucket.
    pub key: K,
    /// All values added under a matching key, in insertion order.
    pub values: Vec<V>,
}

/// Groups values under keys compared by a caller-supplied matcher.
pub struct Collector<K, V, M> {
    matcher: M,
    buckets: Vec<Bucket<K, V>>,
}

impl<K, V, M> Collector<K, V, M>
where
    M: Fn(&K, &K) -> bool,
{
    /// Create an empty collector with the given key matcher.
    pub fn new(matcher: M) -> Self {
        Collector {
            matcher,
            buckets: Vec::new(),
        }
    }

    /// Add a value. Returns the index of the bucket it landed in.
    pub fn add(&mut self, key: K, value: V) -> usize {
        if let Some((index, bucket)) = self
            .buckets
            .iter_mut()
            .find_position(|bucket| (self.matcher)(&bucket.key, &key))
        {
            bucket.values.push(value);
            return index;
        }
        self.buckets.push(Bucket {
            key,
            values: vec![value],
        });
        self.buckets.len() - 1
    }

    /// All buckets, in the order their first member arrived.
    pub fn buckets(&self) -> &[Bucket<K, V>] {
        &self.buckets
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Memoized builder output.

use alloc::string::String;
use core::cell::Cell;

use hashbrown::{Equivalent, HashMap};
use tracing::trace;

use crate::context::StyleContext;
use crate::definition::{StyleDefinition, StyleKey};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    key: StyleKey,
    input: String,
    context: StyleContext,
}

/// Borrowed form of [`CacheKey`]; hashes identically.
#[derive(Hash)]
struct CacheQuery<'a> {
    key: StyleKey,
    input: &'a str,
    context: &'a StyleContext,
}

impl Equivalent<CacheKey> for CacheQuery<'_> {
    fn equivalent(&self, other: &CacheKey) -> bool {
        self.key == other.key && self.input == other.input && *self.context == other.context
    }
}

/// Hit and miss counters of a [`StyleCache`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that found nothing.
    pub misses: u64,
}

/// Definitions keyed by `(style key, raw input, context)`.
///
/// Entries are never evicted: builders are pure and the key space is bounded
/// by the inputs an application actually uses. Replacing a builder drops its
/// entries with [`invalidate_key`](Self::invalidate_key).
///
/// # Example
///
/// ```rust
/// use understory_marshal::{StyleCache, StyleContext, StyleDefinition, StyleKey};
///
/// const ALIGN_SELF: StyleKey = StyleKey::new("flex-align-self");
///
/// let mut cache = StyleCache::new();
/// let cx = StyleContext::new();
/// assert!(cache.get(ALIGN_SELF, "end", &cx).is_none());
///
/// let styles = StyleDefinition::builder().set("align-self", "flex-end").build();
/// cache.put(ALIGN_SELF, "end", cx.clone(), styles.clone());
///
/// assert!(cache.get(ALIGN_SELF, "end", &cx).is_some_and(|hit| hit.ptr_eq(&styles)));
/// assert_eq!(cache.stats().hits, 1);
/// assert_eq!(cache.stats().misses, 1);
/// ```
#[derive(Debug, Default)]
pub struct StyleCache {
    entries: HashMap<CacheKey, StyleDefinition>,
    hits: Cell<u64>,
    misses: Cell<u64>,
}

impl StyleCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a memoized definition.
    #[must_use]
    pub fn get(&self, key: StyleKey, input: &str, context: &StyleContext) -> Option<StyleDefinition> {
        let query = CacheQuery {
            key,
            input,
            context,
        };
        let found = self.entries.get(&query).cloned();
        let counter = if found.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.set(counter.get() + 1);
        trace!(key = %key, input, hit = found.is_some(), "style cache lookup");
        found
    }

    /// Stores a definition, replacing any previous entry for the same key.
    pub fn put(
        &mut self,
        key: StyleKey,
        input: impl Into<String>,
        context: StyleContext,
        definition: StyleDefinition,
    ) {
        self.entries.insert(
            CacheKey {
                key,
                input: input.into(),
                context,
            },
            definition,
        );
    }

    /// Drops every entry built for `key`, returning how many were removed.
    pub fn invalidate_key(&mut self, key: StyleKey) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry, _| entry.key != key);
        before - self.entries.len()
    }

    /// Drops every entry. Statistics are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the cache holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookup statistics since creation.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.get(),
            misses: self.misses.get(),
        }
    }
}

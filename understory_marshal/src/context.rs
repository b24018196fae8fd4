// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contextual parameters passed to style builders.

use alloc::string::String;

use smallvec::SmallVec;

/// Named parameters that influence a builder besides its raw input.
///
/// A context is part of the cache key, so two bindings only share a cached
/// definition when their contexts are equal. Entries are kept sorted by name,
/// which makes equality and hashing independent of insertion order.
///
/// # Example
///
/// ```rust
/// use understory_marshal::StyleContext;
///
/// let a = StyleContext::new().with("display", "inline").with("layout", "row");
/// let b = StyleContext::new().with("layout", "row").with("display", "inline");
/// assert_eq!(a, b);
/// assert_eq!(a.get("layout"), Some("row"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StyleContext {
    entries: SmallVec<[(&'static str, String); 2]>,
}

impl StyleContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the context with `name` set to `value`.
    #[must_use]
    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets `name`, returning `true` if the context changed.
    pub fn set(&mut self, name: &'static str, value: impl Into<String>) -> bool {
        let value = value.into();
        match self.entries.binary_search_by(|(n, _)| (*n).cmp(name)) {
            Ok(index) if self.entries[index].1 == value => false,
            Ok(index) => {
                self.entries[index].1 = value;
                true
            }
            Err(index) => {
                self.entries.insert(index, (name, value));
                true
            }
        }
    }

    /// Removes `name`, returning `true` if it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.entries.binary_search_by(|(n, _)| (*n).cmp(name)) {
            Ok(index) => {
                self.entries.remove(index);
                true
            }
            Err(_) => false,
        }
    }

    /// The value of `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .binary_search_by(|(n, _)| (*n).cmp(name))
            .ok()
            .map(|index| self.entries[index].1.as_str())
    }

    /// Returns `true` if no parameter is set.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of parameters.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.entries.iter().map(|(n, v)| (*n, v.as_str()))
    }
}

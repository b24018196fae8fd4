// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Writing resolved styles onto elements.

use alloc::string::String;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::definition::StyleDefinition;

/// Receives the style changes the marshaller decides on.
///
/// Both operations must be idempotent: applying the same definition twice, or
/// clearing an unset property, leaves the element unchanged.
pub trait StyleApplicator<K> {
    /// Sets every property of `styles` on `element`.
    fn apply(&mut self, element: K, styles: &StyleDefinition);

    /// Resets the named properties of `element` to their unset state.
    fn clear(&mut self, element: K, properties: &[&str]);
}

type InlineEntries = SmallVec<[(String, String); 4]>;

/// An in-memory applicator holding each element's inline style.
///
/// Useful as the target for headless hosts and tests. Every property write
/// that changes state increments [`writes`](Self::writes).
///
/// # Example
///
/// ```rust
/// use understory_marshal::{InlineStyles, StyleApplicator, StyleDefinition};
///
/// let mut inline = InlineStyles::<u32>::new();
/// let styles = StyleDefinition::builder()
///     .set("display", "flex")
///     .set("max-height", "100%")
///     .build();
///
/// inline.apply(7, &styles);
/// inline.apply(7, &styles);
/// assert_eq!(inline.writes(), 2);
///
/// inline.clear(7, &["max-height"]);
/// assert_eq!(inline.get(7, "max-height"), None);
/// assert_eq!(inline.get(7, "display"), Some("flex"));
/// ```
#[derive(Clone, Debug)]
pub struct InlineStyles<K> {
    elements: HashMap<K, InlineEntries>,
    writes: u64,
}

impl<K> Default for InlineStyles<K> {
    fn default() -> Self {
        Self {
            elements: HashMap::default(),
            writes: 0,
        }
    }
}

impl<K: Copy + Eq + Hash> InlineStyles<K> {
    /// Creates an applicator with no styled elements.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The inline value of `property` on `element`.
    #[must_use]
    pub fn get(&self, element: K, property: &str) -> Option<&str> {
        let entries = self.elements.get(&element)?;
        entries
            .binary_search_by(|(p, _)| p.as_str().cmp(property))
            .ok()
            .map(|index| entries[index].1.as_str())
    }

    /// Iterates the inline `(property, value)` pairs of `element` in property
    /// order.
    pub fn styles(&self, element: K) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.elements
            .get(&element)
            .into_iter()
            .flatten()
            .map(|(p, v)| (p.as_str(), v.as_str()))
    }

    /// Forgets everything about `element`, returning `true` if it had styles.
    pub fn remove(&mut self, element: K) -> bool {
        self.elements.remove(&element).is_some()
    }

    /// Number of elements with at least one inline property.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if no element has inline properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of state-changing property writes so far.
    #[must_use]
    pub fn writes(&self) -> u64 {
        self.writes
    }
}

impl<K: Copy + Eq + Hash> StyleApplicator<K> for InlineStyles<K> {
    fn apply(&mut self, element: K, styles: &StyleDefinition) {
        if styles.is_empty() {
            return;
        }
        let entries = self.elements.entry(element).or_default();
        for (property, value) in styles.iter() {
            match entries.binary_search_by(|(p, _)| p.as_str().cmp(property)) {
                Ok(index) if entries[index].1 == value => {}
                Ok(index) => {
                    entries[index].1 = value.into();
                    self.writes += 1;
                }
                Err(index) => {
                    entries.insert(index, (property.into(), value.into()));
                    self.writes += 1;
                }
            }
        }
    }

    fn clear(&mut self, element: K, properties: &[&str]) {
        let Some(entries) = self.elements.get_mut(&element) else {
            return;
        };
        for property in properties {
            if let Ok(index) = entries.binary_search_by(|(p, _)| p.as_str().cmp(property)) {
                entries.remove(index);
                self.writes += 1;
            }
        }
        if entries.is_empty() {
            self.elements.remove(&element);
        }
    }
}

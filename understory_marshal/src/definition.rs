// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style keys and computed style definitions.

use alloc::borrow::Cow;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

/// Names one style concern, such as `layout` or `layout-align`.
///
/// Each key has at most one [`StyleBuilder`](crate::StyleBuilder) and every
/// element has at most one binding per key.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StyleKey(&'static str);

impl StyleKey {
    /// Creates a key.
    #[must_use]
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The key's name.
    #[must_use]
    #[inline]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Debug for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StyleKey").field(&self.0).finish()
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

type Entry = (Cow<'static, str>, Cow<'static, str>);

/// An immutable set of CSS-like `property: value` assignments.
///
/// Definitions are reference counted, so the copies handed out by the cache,
/// stored as resolved state and passed to subscribers all share one
/// allocation. Properties are kept sorted by name.
///
/// # Example
///
/// ```rust
/// use understory_marshal::StyleDefinition;
///
/// let row = StyleDefinition::builder()
///     .set("flex-direction", "row")
///     .set("display", "flex")
///     .set("max-height", "100%")
///     .build();
/// let column = StyleDefinition::builder()
///     .set("display", "flex")
///     .set("flex-direction", "column")
///     .build();
///
/// assert_eq!(row.get("display"), Some("flex"));
/// let dropped: Vec<_> = row.missing_from(&column).collect();
/// assert_eq!(dropped, ["max-height"]);
/// ```
#[derive(Clone, Default)]
pub struct StyleDefinition {
    inner: Rc<[Entry]>,
}

impl StyleDefinition {
    /// Starts building a definition.
    #[must_use]
    pub fn builder() -> StyleDefinitionBuilder {
        StyleDefinitionBuilder::new()
    }

    /// Returns `true` if no property is assigned.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Number of assigned properties.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// The value assigned to `property`.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.position(property)
            .ok()
            .map(|index| &*self.inner[index].1)
    }

    /// Returns `true` if `property` is assigned.
    #[must_use]
    pub fn contains(&self, property: &str) -> bool {
        self.position(property).is_ok()
    }

    /// Iterates `(property, value)` pairs in property order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.inner.iter().map(|(p, v)| (&**p, &**v))
    }

    /// Iterates property names in order.
    pub fn properties(&self) -> impl Iterator<Item = &str> + '_ {
        self.inner.iter().map(|(p, _)| &**p)
    }

    /// Properties assigned here that `other` does not assign.
    pub fn missing_from<'a>(&'a self, other: &'a Self) -> impl Iterator<Item = &'a str> + 'a {
        self.properties().filter(move |p| !other.contains(p))
    }

    /// Returns `true` if both values share storage.
    #[must_use]
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn position(&self, property: &str) -> Result<usize, usize> {
        self.inner.binary_search_by(|(p, _)| (**p).cmp(property))
    }
}

impl PartialEq for StyleDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.inner == other.inner
    }
}

impl Eq for StyleDefinition {}

impl fmt::Debug for StyleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Builder for [`StyleDefinition`].
#[derive(Clone, Debug, Default)]
pub struct StyleDefinitionBuilder {
    entries: Vec<Entry>,
}

impl StyleDefinitionBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a property, replacing any earlier assignment.
    #[must_use]
    pub fn set(
        mut self,
        property: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.insert(property, value);
        self
    }

    /// Assigns a property in place, replacing any earlier assignment.
    pub fn insert(
        &mut self,
        property: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) {
        let property = property.into();
        let value = value.into();
        match self
            .entries
            .binary_search_by(|(p, _)| (**p).cmp(&*property))
        {
            Ok(index) => self.entries[index].1 = value,
            Err(index) => self.entries.insert(index, (property, value)),
        }
    }

    /// Builds the definition.
    #[must_use]
    pub fn build(self) -> StyleDefinition {
        StyleDefinition {
            inner: self.entries.into(),
        }
    }
}

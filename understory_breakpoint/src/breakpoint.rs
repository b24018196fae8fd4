// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Breakpoint identification and definition types.

use core::fmt;
use std::borrow::Cow;

use crate::query::{MediaQueryList, Viewport};

/// A compact breakpoint identifier.
///
/// Identifiers are assigned in registration order by
/// [`BreakpointRegistry::register`](crate::BreakpointRegistry::register) and
/// are only meaningful for the registry that produced them.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BreakpointId(u16);

impl BreakpointId {
    /// Creates an identifier from a raw index.
    #[must_use]
    #[inline]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for BreakpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BreakpointId").field(&self.0).finish()
    }
}

/// An unvalidated breakpoint description, as supplied by configuration.
///
/// # Example
///
/// ```rust
/// use understory_breakpoint::BreakpointSpec;
///
/// let short = BreakpointSpec::new("short", "screen and (max-height: 600px)").priority(50);
/// assert_eq!(short.alias, "short");
/// assert!(!short.overlapping);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BreakpointSpec {
    /// Input suffix used to address the breakpoint, e.g. `gt-sm`.
    pub alias: Cow<'static, str>,
    /// Media query source, e.g. `screen and (min-width: 960px)`.
    pub media_query: Cow<'static, str>,
    /// Higher values are more specific and win resolution ties.
    pub priority: i32,
    /// Whether the breakpoint's range overlaps narrower breakpoints.
    pub overlapping: bool,
}

impl BreakpointSpec {
    /// Creates a non-overlapping spec with priority `0`.
    #[must_use]
    pub const fn new(alias: &'static str, media_query: &'static str) -> Self {
        Self {
            alias: Cow::Borrowed(alias),
            media_query: Cow::Borrowed(media_query),
            priority: 0,
            overlapping: false,
        }
    }

    /// Sets the priority.
    #[must_use]
    pub const fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Marks the breakpoint as overlapping.
    #[must_use]
    pub const fn overlapping(mut self, overlapping: bool) -> Self {
        self.overlapping = overlapping;
        self
    }
}

/// A registered breakpoint with its parsed media query.
///
/// Breakpoints are immutable once registered.
#[derive(Clone, Debug, PartialEq)]
pub struct Breakpoint {
    pub(crate) id: BreakpointId,
    pub(crate) alias: String,
    pub(crate) media_query: String,
    pub(crate) query: MediaQueryList,
    pub(crate) priority: i32,
    pub(crate) overlapping: bool,
}

impl Breakpoint {
    /// The identifier assigned at registration.
    #[must_use]
    #[inline]
    pub fn id(&self) -> BreakpointId {
        self.id
    }

    /// The alias, e.g. `md`.
    #[must_use]
    #[inline]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// The media query source string.
    #[must_use]
    #[inline]
    pub fn media_query(&self) -> &str {
        &self.media_query
    }

    /// The parsed media query.
    #[must_use]
    #[inline]
    pub fn query(&self) -> &MediaQueryList {
        &self.query
    }

    /// The resolution priority.
    #[must_use]
    #[inline]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Whether this breakpoint overlaps narrower ranges.
    #[must_use]
    #[inline]
    pub fn is_overlapping(&self) -> bool {
        self.overlapping
    }

    /// Evaluates the breakpoint's query against a viewport.
    #[must_use]
    pub fn matches(&self, viewport: &Viewport) -> bool {
        self.query.matches(viewport)
    }

    /// Returns `true` if this breakpoint's range contains all of `other`'s.
    #[must_use]
    pub fn covers(&self, other: &Self) -> bool {
        self.query.covers(&other.query)
    }
}

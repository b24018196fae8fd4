// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Append-only breakpoint registry.
//!
//! This module provides [`BreakpointRegistry`] for registering breakpoints and
//! looking them up by alias, identifier, or specificity order.

use hashbrown::HashMap;

use crate::breakpoint::{Breakpoint, BreakpointId, BreakpointSpec};
use crate::query::{MediaQueryError, MediaQueryList};

/// Error returned when a breakpoint cannot be registered.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BreakpointError {
    /// Another breakpoint already uses this alias.
    #[error("breakpoint alias `{0}` is already registered")]
    DuplicateAlias(String),
    /// The empty alias is reserved for unconditional default values.
    #[error("breakpoint alias must not be empty")]
    EmptyAlias,
    /// The media query could not be parsed.
    #[error(transparent)]
    InvalidMediaQuery(#[from] MediaQueryError),
    /// The registry is full.
    #[error("too many breakpoints registered (max {max})", max = u16::MAX)]
    TooMany,
}

/// The process-wide catalog of breakpoints.
///
/// Breakpoints are registered once at startup and never removed. The
/// registry keeps them in two orders: registration order (which assigns
/// [`BreakpointId`]s) and specificity order, which is descending priority with
/// ties broken by registration order. Specificity order is the fallback search
/// order used during style resolution.
///
/// # Example
///
/// ```rust
/// use understory_breakpoint::{BreakpointRegistry, BreakpointSpec};
///
/// let mut registry = BreakpointRegistry::new();
/// registry
///     .register(BreakpointSpec::new("gt-sm", "screen and (min-width: 960px)").priority(-850))
///     .unwrap();
/// let md = registry
///     .register(
///         BreakpointSpec::new("md", "screen and (min-width: 960px) and (max-width: 1279.98px)")
///             .priority(800),
///     )
///     .unwrap();
///
/// assert_eq!(registry.lookup("md").map(|bp| bp.id()), Some(md));
/// let ordered: Vec<_> = registry.ordered().map(|bp| bp.alias()).collect();
/// assert_eq!(ordered, ["md", "gt-sm"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct BreakpointRegistry {
    breakpoints: Vec<Breakpoint>,
    by_alias: HashMap<String, BreakpointId>,
    /// Identifiers sorted by descending priority, stable in registration order.
    ordered: Vec<BreakpointId>,
}

impl BreakpointRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry from a sequence of specs, registering them in order.
    ///
    /// # Errors
    ///
    /// Fails on the first spec that [`register`](Self::register) rejects.
    pub fn from_specs<'a>(
        specs: impl IntoIterator<Item = &'a BreakpointSpec>,
    ) -> Result<Self, BreakpointError> {
        let mut registry = Self::new();
        for spec in specs {
            registry.register(spec.clone())?;
        }
        Ok(registry)
    }

    /// Registers a breakpoint.
    ///
    /// # Errors
    ///
    /// - [`BreakpointError::DuplicateAlias`] if the alias is already present.
    /// - [`BreakpointError::EmptyAlias`] for an empty alias.
    /// - [`BreakpointError::InvalidMediaQuery`] if the query does not parse.
    /// - [`BreakpointError::TooMany`] once `u16::MAX` breakpoints exist.
    pub fn register(&mut self, spec: BreakpointSpec) -> Result<BreakpointId, BreakpointError> {
        if spec.alias.is_empty() {
            return Err(BreakpointError::EmptyAlias);
        }
        if self.by_alias.contains_key(&*spec.alias) {
            return Err(BreakpointError::DuplicateAlias(spec.alias.into_owned()));
        }
        let index = u16::try_from(self.breakpoints.len())
            .ok()
            .filter(|index| *index < u16::MAX)
            .ok_or(BreakpointError::TooMany)?;
        let query = MediaQueryList::parse(&spec.media_query)?;

        let id = BreakpointId::new(index);
        let priority = spec.priority;
        let alias = spec.alias.into_owned();
        self.by_alias.insert(alias.clone(), id);
        self.breakpoints.push(Breakpoint {
            id,
            alias,
            media_query: spec.media_query.into_owned(),
            query,
            priority,
            overlapping: spec.overlapping,
        });

        let position = self
            .ordered
            .partition_point(|other| self.breakpoints[other.index() as usize].priority >= priority);
        self.ordered.insert(position, id);

        Ok(id)
    }

    /// Returns the number of registered breakpoints.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.breakpoints.len()
    }

    /// Returns `true` if no breakpoints are registered.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }

    /// Returns the breakpoint with the given identifier.
    #[must_use]
    pub fn get(&self, id: BreakpointId) -> Option<&Breakpoint> {
        self.breakpoints.get(id.index() as usize)
    }

    /// Looks up a breakpoint by alias.
    #[must_use]
    pub fn lookup(&self, alias: &str) -> Option<&Breakpoint> {
        self.id_of(alias).and_then(|id| self.get(id))
    }

    /// Looks up a breakpoint identifier by alias.
    #[must_use]
    pub fn id_of(&self, alias: &str) -> Option<BreakpointId> {
        self.by_alias.get(alias).copied()
    }

    /// Iterates breakpoints in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Breakpoint> + '_ {
        self.breakpoints.iter()
    }

    /// Iterates breakpoints from most to least specific.
    pub fn ordered(&self) -> impl Iterator<Item = &Breakpoint> + '_ {
        self.ordered
            .iter()
            .map(|id| &self.breakpoints[id.index() as usize])
    }

    /// Identifiers from most to least specific.
    #[must_use]
    #[inline]
    pub fn ordered_ids(&self) -> &[BreakpointId] {
        &self.ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::DEFAULT_BREAKPOINTS;

    #[test]
    fn registry_new_is_empty() {
        let registry = BreakpointRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.lookup("md").is_none());
    }

    #[test]
    fn register_assigns_sequential_ids() {
        let mut registry = BreakpointRegistry::new();
        let a = registry
            .register(BreakpointSpec::new("a", "(min-width: 1px)"))
            .unwrap();
        let b = registry
            .register(BreakpointSpec::new("b", "(min-width: 2px)"))
            .unwrap();
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(registry.get(b).map(Breakpoint::alias), Some("b"));
    }

    #[test]
    fn duplicate_alias_rejected() {
        let mut registry = BreakpointRegistry::new();
        registry
            .register(BreakpointSpec::new("md", "(min-width: 960px)"))
            .unwrap();
        let err = registry
            .register(BreakpointSpec::new("md", "(min-width: 1000px)"))
            .unwrap_err();
        assert_eq!(err, BreakpointError::DuplicateAlias("md".into()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn empty_alias_rejected() {
        let mut registry = BreakpointRegistry::new();
        let err = registry
            .register(BreakpointSpec::new("", "screen"))
            .unwrap_err();
        assert_eq!(err, BreakpointError::EmptyAlias);
    }

    #[test]
    fn invalid_query_rejected_without_side_effects() {
        let mut registry = BreakpointRegistry::new();
        let err = registry
            .register(BreakpointSpec::new("bad", "screen and (colour: red)"))
            .unwrap_err();
        assert!(matches!(err, BreakpointError::InvalidMediaQuery(_)));
        assert!(registry.is_empty());
        assert!(registry.id_of("bad").is_none());
    }

    #[test]
    fn ordered_by_descending_priority() {
        let registry = BreakpointRegistry::from_specs(DEFAULT_BREAKPOINTS).unwrap();
        let aliases: Vec<_> = registry.ordered().map(Breakpoint::alias).collect();
        assert_eq!(
            aliases,
            [
                "xs", "lt-sm", "sm", "lt-md", "md", "lt-lg", "lg", "lt-xl", "xl", "gt-lg",
                "gt-md", "gt-sm", "gt-xs",
            ]
        );
    }

    #[test]
    fn equal_priority_keeps_registration_order() {
        let mut registry = BreakpointRegistry::new();
        for alias in ["first", "second", "third"] {
            let spec = BreakpointSpec {
                alias: alias.into(),
                media_query: "screen".into(),
                priority: 7,
                overlapping: false,
            };
            registry.register(spec).unwrap();
        }
        registry
            .register(BreakpointSpec::new("top", "screen").priority(8))
            .unwrap();
        let aliases: Vec<_> = registry.ordered().map(Breakpoint::alias).collect();
        assert_eq!(aliases, ["top", "first", "second", "third"]);
    }

    #[test]
    fn lookup_exposes_parsed_query() {
        let registry = BreakpointRegistry::from_specs(DEFAULT_BREAKPOINTS).unwrap();
        let gt_sm = registry.lookup("gt-sm").unwrap();
        assert!(gt_sm.is_overlapping());
        assert_eq!(gt_sm.media_query(), "screen and (min-width: 960px)");
        assert_eq!(gt_sm.query().queries().len(), 1);
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The media observer and its change notifications.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use smallvec::SmallVec;
use tracing::{debug, trace};
use understory_breakpoint::{
    Breakpoint, BreakpointError, BreakpointId, BreakpointRegistry, LayoutConfig, Viewport,
};

use crate::activation::ActivationSet;

/// Error returned by [`MediaObserver`] operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MediaError {
    /// No breakpoint is registered under the alias.
    #[error("no breakpoint is registered with alias `{0}`")]
    UnknownAlias(String),
    /// The breakpoint set could not be built.
    #[error(transparent)]
    Breakpoint(#[from] BreakpointError),
}

/// A single breakpoint transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MediaChange<'a> {
    /// The breakpoint that changed.
    pub breakpoint: BreakpointId,
    /// Its alias.
    pub alias: &'a str,
    /// `true` when the breakpoint became active.
    pub matches: bool,
}

/// A read-only view of the observer after a transition.
#[derive(Copy, Clone, Debug)]
pub struct MediaState<'a> {
    registry: &'a BreakpointRegistry,
    active: &'a ActivationSet,
    viewport: Option<Viewport>,
}

impl<'a> MediaState<'a> {
    /// The breakpoint catalog.
    #[must_use]
    pub fn registry(&self) -> &'a BreakpointRegistry {
        self.registry
    }

    /// The raw activation set.
    #[must_use]
    pub fn active_set(&self) -> &'a ActivationSet {
        self.active
    }

    /// The last viewport passed to [`MediaObserver::set_viewport`], if any.
    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Returns `true` if the breakpoint with this alias is active.
    ///
    /// Unknown aliases are never active.
    #[must_use]
    pub fn is_active(&self, alias: &str) -> bool {
        self.registry
            .id_of(alias)
            .is_some_and(|id| self.active.contains(id))
    }

    /// Returns `true` if the breakpoint is active.
    #[must_use]
    pub fn is_active_id(&self, id: BreakpointId) -> bool {
        self.active.contains(id)
    }

    /// Active breakpoints from most to least specific.
    pub fn active(self) -> impl Iterator<Item = &'a Breakpoint> + 'a {
        let Self {
            registry, active, ..
        } = self;
        registry
            .ordered()
            .filter(move |bp| active.contains(bp.id()))
    }
}

/// Handle returned by [`MediaObserver::subscribe`].
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

impl fmt::Debug for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SubscriptionId").field(&self.0).finish()
    }
}

type Listener = Box<dyn FnMut(&MediaChange<'_>)>;

/// Transitions planned for one operation, in delivery order.
type Plan = SmallVec<[(BreakpointId, bool); 8]>;

/// Tracks which breakpoints are active and notifies subscribers of changes.
///
/// Every operation applies its transitions one at a time. Each transition
/// updates the activation set and then synchronously notifies, before the
/// next transition is applied: first the optional sink passed to a `*_with`
/// method, then every subscriber in subscription order.
///
/// When one operation changes several breakpoints, deactivations are
/// delivered before activations, each group from most to least specific.
///
/// # Example
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use understory_breakpoint::LayoutConfig;
/// use understory_media::MediaObserver;
///
/// let mut media = MediaObserver::from_config(&LayoutConfig::default()).unwrap();
/// let log = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&log);
/// media.subscribe(move |change| {
///     sink.borrow_mut().push((change.alias.to_owned(), change.matches));
/// });
///
/// media.activate("md").unwrap();
/// media.activate_only("sm", false).unwrap();
///
/// assert!(media.is_active("sm"));
/// assert!(!media.is_active("md"));
/// assert_eq!(
///     *log.borrow(),
///     [
///         (String::from("md"), true),
///         (String::from("md"), false),
///         (String::from("sm"), true),
///     ]
/// );
/// ```
pub struct MediaObserver {
    registry: BreakpointRegistry,
    active: ActivationSet,
    viewport: Option<Viewport>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u32,
}

impl fmt::Debug for MediaObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaObserver")
            .field("registry", &self.registry)
            .field("active", &self.active)
            .field("viewport", &self.viewport)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl MediaObserver {
    /// Creates an observer with nothing active.
    #[must_use]
    pub fn new(registry: BreakpointRegistry) -> Self {
        Self {
            registry,
            active: ActivationSet::new(),
            viewport: None,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Creates an observer for the breakpoints a configuration describes.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::Breakpoint`] if the configuration is invalid.
    pub fn from_config(config: &LayoutConfig) -> Result<Self, MediaError> {
        Ok(Self::new(config.build_registry()?))
    }

    /// The breakpoint catalog.
    #[must_use]
    #[inline]
    pub fn registry(&self) -> &BreakpointRegistry {
        &self.registry
    }

    /// A snapshot of the current activation state.
    #[must_use]
    pub fn state(&self) -> MediaState<'_> {
        MediaState {
            registry: &self.registry,
            active: &self.active,
            viewport: self.viewport,
        }
    }

    /// Returns `true` if the breakpoint with this alias is active.
    #[must_use]
    pub fn is_active(&self, alias: &str) -> bool {
        self.state().is_active(alias)
    }

    /// Active breakpoints from most to least specific.
    pub fn active(&self) -> impl Iterator<Item = &Breakpoint> + '_ {
        self.state().active()
    }

    /// The last viewport passed to [`set_viewport`](Self::set_viewport).
    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Registers a callback for every future transition.
    pub fn subscribe(&mut self, callback: impl FnMut(&MediaChange<'_>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription = self.next_subscription.wrapping_add(1);
        self.listeners.push((id, Box::new(callback)));
        id
    }

    /// Removes a subscription, returning `true` if it existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(other, _)| *other != id);
        self.listeners.len() != before
    }

    /// Activates a breakpoint, returning `true` if it was inactive.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::UnknownAlias`] for an unregistered alias.
    pub fn activate(&mut self, alias: &str) -> Result<bool, MediaError> {
        self.activate_with(alias, |_, _| {})
    }

    /// Like [`activate`](Self::activate), delivering the transition to `sink`
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::UnknownAlias`] for an unregistered alias.
    pub fn activate_with(
        &mut self,
        alias: &str,
        mut sink: impl FnMut(&MediaChange<'_>, &MediaState<'_>),
    ) -> Result<bool, MediaError> {
        let id = self.resolve(alias)?;
        Ok(self.transition(id, true, &mut sink))
    }

    /// Deactivates a breakpoint, returning `true` if it was active.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::UnknownAlias`] for an unregistered alias.
    pub fn deactivate(&mut self, alias: &str) -> Result<bool, MediaError> {
        self.deactivate_with(alias, |_, _| {})
    }

    /// Like [`deactivate`](Self::deactivate), delivering the transition to
    /// `sink` first.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::UnknownAlias`] for an unregistered alias.
    pub fn deactivate_with(
        &mut self,
        alias: &str,
        mut sink: impl FnMut(&MediaChange<'_>, &MediaState<'_>),
    ) -> Result<bool, MediaError> {
        let id = self.resolve(alias)?;
        Ok(self.transition(id, false, &mut sink))
    }

    /// Makes `alias` the only active breakpoint.
    ///
    /// With `use_overlaps`, every overlapping breakpoint whose range covers
    /// `alias` is activated as well, so activating `lg` also activates
    /// `lt-xl`, `gt-md`, `gt-sm` and `gt-xs`. The overlapping breakpoints are
    /// activated before `alias` itself.
    ///
    /// Returns the number of transitions delivered.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::UnknownAlias`] for an unregistered alias, before
    /// any transition is applied.
    pub fn activate_only(&mut self, alias: &str, use_overlaps: bool) -> Result<usize, MediaError> {
        self.activate_only_with(alias, use_overlaps, |_, _| {})
    }

    /// Like [`activate_only`](Self::activate_only), delivering each
    /// transition to `sink` first.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::UnknownAlias`] for an unregistered alias.
    pub fn activate_only_with(
        &mut self,
        alias: &str,
        use_overlaps: bool,
        mut sink: impl FnMut(&MediaChange<'_>, &MediaState<'_>),
    ) -> Result<usize, MediaError> {
        let target = self.resolve(alias)?;
        let mut wanted = ActivationSet::new();
        wanted.insert(target);
        if use_overlaps {
            if let Some(target_bp) = self.registry.get(target) {
                for bp in self.registry.ordered() {
                    if bp.id() != target && bp.is_overlapping() && bp.covers(target_bp) {
                        wanted.insert(bp.id());
                    }
                }
            }
        }
        let plan = self.plan(&wanted, Some(target));
        Ok(self.run(&plan, &mut sink))
    }

    /// Evaluates every breakpoint against a viewport and applies the
    /// resulting transitions.
    ///
    /// Returns the number of transitions delivered.
    pub fn set_viewport(&mut self, viewport: Viewport) -> usize {
        self.set_viewport_with(viewport, |_, _| {})
    }

    /// Like [`set_viewport`](Self::set_viewport), delivering each transition
    /// to `sink` first.
    pub fn set_viewport_with(
        &mut self,
        viewport: Viewport,
        mut sink: impl FnMut(&MediaChange<'_>, &MediaState<'_>),
    ) -> usize {
        trace!(width = viewport.width, height = viewport.height, "viewport changed");
        self.viewport = Some(viewport);
        let wanted: ActivationSet = self
            .registry
            .iter()
            .filter(|bp| bp.matches(&viewport))
            .map(Breakpoint::id)
            .collect();
        let plan = self.plan(&wanted, None);
        self.run(&plan, &mut sink)
    }

    fn resolve(&self, alias: &str) -> Result<BreakpointId, MediaError> {
        self.registry
            .id_of(alias)
            .ok_or_else(|| MediaError::UnknownAlias(alias.into()))
    }

    /// Orders the transitions that turn the active set into `wanted`.
    ///
    /// `last`, when it needs activating, is delivered after every other
    /// activation.
    fn plan(&self, wanted: &ActivationSet, last: Option<BreakpointId>) -> Plan {
        let ordered = self.registry.ordered_ids();
        let mut plan: Plan = ordered
            .iter()
            .filter(|id| self.active.contains(**id) && !wanted.contains(**id))
            .map(|id| (*id, false))
            .collect();
        plan.extend(
            ordered
                .iter()
                .filter(|id| Some(**id) != last)
                .filter(|id| wanted.contains(**id) && !self.active.contains(**id))
                .map(|id| (*id, true)),
        );
        if let Some(last) = last.filter(|id| !self.active.contains(*id)) {
            plan.push((last, true));
        }
        plan
    }

    fn run(
        &mut self,
        plan: &[(BreakpointId, bool)],
        sink: &mut dyn FnMut(&MediaChange<'_>, &MediaState<'_>),
    ) -> usize {
        let mut delivered = 0;
        for &(id, matches) in plan {
            if self.transition(id, matches, sink) {
                delivered += 1;
            }
        }
        delivered
    }

    fn transition(
        &mut self,
        id: BreakpointId,
        matches: bool,
        sink: &mut dyn FnMut(&MediaChange<'_>, &MediaState<'_>),
    ) -> bool {
        let Self {
            registry,
            active,
            viewport,
            listeners,
            ..
        } = self;
        let Some(breakpoint) = registry.get(id) else {
            return false;
        };
        let changed = if matches {
            active.insert(id)
        } else {
            active.remove(id)
        };
        if !changed {
            return false;
        }

        debug!(alias = %breakpoint.alias(), matches, "breakpoint transition");
        let change = MediaChange {
            breakpoint: id,
            alias: breakpoint.alias(),
            matches,
        };
        let state = MediaState {
            registry,
            active,
            viewport: *viewport,
        };
        sink(&change, &state);
        for (_, listener) in listeners.iter_mut() {
            listener(&change);
        }
        true
    }
}

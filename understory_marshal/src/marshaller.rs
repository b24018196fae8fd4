// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The style marshaller.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;
use core::mem;

use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::{debug, trace};
use understory_breakpoint::{BreakpointId, LayoutConfig, Viewport};
use understory_media::{MediaChange, MediaError, MediaObserver, MediaState, SubscriptionId};

use crate::applicator::{InlineStyles, StyleApplicator};
use crate::builder::StyleBuilder;
use crate::cache::StyleCache;
use crate::context::StyleContext;
use crate::definition::{StyleDefinition, StyleKey};

/// Error returned by [`StyleMarshaller`] operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MarshalError {
    /// A binding named a breakpoint alias that is not registered.
    #[error("no breakpoint is registered with alias `{0}`")]
    UnknownBreakpoint(String),
    /// The media observer rejected the operation.
    #[error(transparent)]
    Media(#[from] MediaError),
}

/// Handle returned by [`StyleMarshaller::on_resolved`].
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

impl fmt::Debug for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ListenerId").field(&self.0).finish()
    }
}

type ResolvedCallback = Box<dyn FnMut(&StyleDefinition)>;

/// One element's values for one style key.
struct Binding {
    key: StyleKey,
    /// `None` holds the default value.
    values: SmallVec<[(Option<BreakpointId>, String); 4]>,
    context: StyleContext,
    /// The raw value that won the last resolution.
    input: Option<String>,
    /// The definition currently applied.
    resolved: StyleDefinition,
    listeners: Vec<(ListenerId, ResolvedCallback)>,
}

impl Binding {
    fn new(key: StyleKey) -> Self {
        Self {
            key,
            values: SmallVec::new(),
            context: StyleContext::new(),
            input: None,
            resolved: StyleDefinition::default(),
            listeners: Vec::new(),
        }
    }

    fn value(&self, slot: Option<BreakpointId>) -> Option<&str> {
        self.values
            .iter()
            .find(|(s, _)| *s == slot)
            .map(|(_, v)| v.as_str())
    }

    fn has_value(&self, id: BreakpointId) -> bool {
        self.values.iter().any(|(s, _)| *s == Some(id))
    }

    fn set_value(&mut self, slot: Option<BreakpointId>, value: String) {
        match self.values.iter_mut().find(|(s, _)| *s == slot) {
            Some((_, existing)) => *existing = value,
            None => self.values.push((slot, value)),
        }
    }

    fn remove_value(&mut self, slot: Option<BreakpointId>) -> bool {
        let before = self.values.len();
        self.values.retain(|(s, _)| *s != slot);
        self.values.len() != before
    }

    /// The value of the most specific active breakpoint, else the default.
    fn winner(&self, state: &MediaState<'_>) -> Option<&str> {
        state
            .active()
            .find_map(|bp| self.value(Some(bp.id())))
            .or_else(|| self.value(None))
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
struct Link {
    source: StyleKey,
    target: StyleKey,
    context_name: &'static str,
}

#[derive(Default)]
struct ElementState {
    bindings: SmallVec<[Binding; 2]>,
    links: SmallVec<[Link; 1]>,
}

impl ElementState {
    fn binding(&self, key: StyleKey) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.key == key)
    }

    fn binding_mut(&mut self, key: StyleKey) -> Option<&mut Binding> {
        self.bindings.iter_mut().find(|b| b.key == key)
    }

    fn binding_or_insert(&mut self, key: StyleKey) -> &mut Binding {
        let index = match self.bindings.iter().position(|b| b.key == key) {
            Some(index) => index,
            None => {
                self.bindings.push(Binding::new(key));
                self.bindings.len() - 1
            }
        };
        &mut self.bindings[index]
    }
}

#[derive(Copy, Clone)]
struct Job<K> {
    element: K,
    key: StyleKey,
    /// Rebuild even if the winning value is unchanged.
    force: bool,
}

type Queue<K> = VecDeque<Job<K>>;

struct Engine<K, A> {
    builders: HashMap<StyleKey, Box<dyn StyleBuilder>>,
    cache: StyleCache,
    applicator: A,
    elements: HashMap<K, ElementState>,
    /// Elements in registration order.
    order: Vec<K>,
    next_listener: u32,
}

impl<K, A> Engine<K, A>
where
    K: Copy + Eq + Hash + fmt::Debug,
    A: StyleApplicator<K>,
{
    fn entry(&mut self, element: K) -> &mut ElementState {
        if !self.elements.contains_key(&element) {
            self.order.push(element);
        }
        self.elements.entry(element).or_default()
    }

    fn jobs_for_key(&self, key: StyleKey) -> Queue<K> {
        self.order
            .iter()
            .filter(|element| {
                self.elements
                    .get(*element)
                    .is_some_and(|entry| entry.binding(key).is_some())
            })
            .map(|element| Job {
                element: *element,
                key,
                force: true,
            })
            .collect()
    }

    fn on_media_change(&mut self, change: &MediaChange<'_>, state: &MediaState<'_>) {
        let mut queue = Queue::new();
        for element in &self.order {
            let Some(entry) = self.elements.get(element) else {
                continue;
            };
            for binding in &entry.bindings {
                if binding.has_value(change.breakpoint) {
                    queue.push_back(Job {
                        element: *element,
                        key: binding.key,
                        force: false,
                    });
                }
            }
        }
        trace!(
            alias = %change.alias,
            matches = change.matches,
            affected = queue.len(),
            "resolving bindings for transition"
        );
        self.settle(state, queue);
    }

    fn settle(&mut self, state: &MediaState<'_>, mut queue: Queue<K>) {
        while let Some(job) = queue.pop_front() {
            self.resolve(state, job, &mut queue);
        }
    }

    fn resolve(&mut self, state: &MediaState<'_>, job: Job<K>, queue: &mut Queue<K>) {
        let Self {
            builders,
            cache,
            applicator,
            elements,
            ..
        } = self;
        let Some(entry) = elements.get_mut(&job.element) else {
            return;
        };
        let Some(index) = entry.bindings.iter().position(|b| b.key == job.key) else {
            return;
        };
        let binding = &mut entry.bindings[index];

        let winner = binding.winner(state);
        if !job.force && winner == binding.input.as_deref() {
            return;
        }
        let winner = winner.map(String::from);
        let next = match winner.as_deref() {
            Some(input) => build(builders, cache, job.key, input, &binding.context),
            None => StyleDefinition::default(),
        };
        trace!(
            element = ?job.element,
            key = %job.key,
            input = winner.as_deref(),
            "binding resolved"
        );
        let previous = mem::replace(&mut binding.resolved, next.clone());
        binding.input = winner;
        let source_input = binding.input.clone();

        if previous != next {
            // Properties dropped here but still set by a sibling binding keep
            // the sibling's value.
            let mut removed: SmallVec<[&str; 4]> = SmallVec::new();
            let mut restored = StyleDefinition::builder();
            let mut restoring = false;
            for property in previous.missing_from(&next) {
                let sibling = entry
                    .bindings
                    .iter()
                    .enumerate()
                    .filter(|(other, _)| *other != index)
                    .find_map(|(_, other)| other.resolved.get(property));
                match sibling {
                    Some(value) => {
                        restored.insert(String::from(property), String::from(value));
                        restoring = true;
                    }
                    None => removed.push(property),
                }
            }
            if !removed.is_empty() {
                applicator.clear(job.element, &removed);
            }
            applicator.apply(job.element, &next);
            if restoring {
                applicator.apply(job.element, &restored.build());
            }
            for (_, listener) in &mut entry.bindings[index].listeners {
                listener(&next);
            }
        }

        for link in entry.links.iter().filter(|link| link.source == job.key) {
            let Some(target) = entry.bindings.iter_mut().find(|b| b.key == link.target) else {
                continue;
            };
            let changed = match &source_input {
                Some(value) => target.context.set(link.context_name, value.as_str()),
                None => target.context.remove(link.context_name),
            };
            if changed {
                queue.push_back(Job {
                    element: job.element,
                    key: link.target,
                    force: true,
                });
            }
        }
    }
}

fn build(
    builders: &HashMap<StyleKey, Box<dyn StyleBuilder>>,
    cache: &mut StyleCache,
    key: StyleKey,
    input: &str,
    context: &StyleContext,
) -> StyleDefinition {
    let Some(builder) = builders.get(&key) else {
        trace!(key = %key, "no style builder registered");
        return StyleDefinition::default();
    };
    if !builder.should_cache() {
        return builder.build_styles(input, context);
    }
    if let Some(hit) = cache.get(key, input, context) {
        return hit;
    }
    let built = builder.build_styles(input, context);
    cache.put(key, input, context.clone(), built.clone());
    built
}

/// Resolves breakpoint-scoped style values and applies the winners.
///
/// A marshaller owns a [`MediaObserver`], one [`StyleBuilder`] per
/// [`StyleKey`], a [`StyleCache`], a [`StyleApplicator`] and every element's
/// bindings. A binding holds the raw values one element registered for one
/// key: one per breakpoint alias plus an optional default under the empty
/// alias `""`.
///
/// A binding resolves to the value of its most specific active breakpoint,
/// falling back to the default. When the winner changes, the key's builder
/// turns it into a [`StyleDefinition`]. Properties the previous definition
/// set and the new one does not are cleared before the new definition is
/// applied, unless another binding of the same element still sets them, in
/// which case its value is written back. A binding without any candidate
/// value is inert.
///
/// Breakpoint transitions are driven through the marshaller
/// ([`activate`](Self::activate), [`set_viewport`](Self::set_viewport), ...)
/// and every affected binding is settled before the call returns.
///
/// # Example
///
/// ```rust
/// use understory_breakpoint::LayoutConfig;
/// use understory_marshal::{
///     InlineStyles, StyleContext, StyleDefinition, StyleKey, StyleMarshaller,
/// };
///
/// const ORDER: StyleKey = StyleKey::new("order");
///
/// let mut marshaller =
///     StyleMarshaller::from_config(&LayoutConfig::default(), InlineStyles::new()).unwrap();
/// marshaller.register_builder(ORDER, |input: &str, _: &StyleContext| {
///     StyleDefinition::builder().set("order", input.to_owned()).build()
/// });
///
/// marshaller.register_binding(1_u32, ORDER, "", "0").unwrap();
/// marshaller.register_binding(1, ORDER, "gt-sm", "2").unwrap();
/// assert_eq!(marshaller.applicator().get(1, "order"), Some("0"));
///
/// marshaller.activate("gt-sm").unwrap();
/// assert_eq!(marshaller.applicator().get(1, "order"), Some("2"));
///
/// marshaller.deactivate("gt-sm").unwrap();
/// assert_eq!(marshaller.resolved_input(1, ORDER), Some("0"));
/// ```
pub struct StyleMarshaller<K, A = InlineStyles<K>> {
    media: MediaObserver,
    engine: Engine<K, A>,
}

impl<K, A> fmt::Debug for StyleMarshaller<K, A>
where
    K: fmt::Debug,
    A: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builders: Vec<_> = self.engine.builders.keys().collect();
        builders.sort();
        f.debug_struct("StyleMarshaller")
            .field("media", &self.media)
            .field("builders", &builders)
            .field("elements", &self.engine.order)
            .field("cache", &self.engine.cache)
            .field("applicator", &self.engine.applicator)
            .finish_non_exhaustive()
    }
}

impl<K, A> StyleMarshaller<K, A>
where
    K: Copy + Eq + Hash + fmt::Debug,
    A: StyleApplicator<K>,
{
    /// Creates a marshaller without builders or bindings.
    pub fn new(media: MediaObserver, applicator: A) -> Self {
        Self {
            media,
            engine: Engine {
                builders: HashMap::new(),
                cache: StyleCache::new(),
                applicator,
                elements: HashMap::new(),
                order: Vec::new(),
                next_listener: 0,
            },
        }
    }

    /// Creates a marshaller for the breakpoints a configuration describes.
    ///
    /// # Errors
    ///
    /// Returns [`MarshalError::Media`] if the configuration is invalid.
    pub fn from_config(config: &LayoutConfig, applicator: A) -> Result<Self, MarshalError> {
        Ok(Self::new(MediaObserver::from_config(config)?, applicator))
    }

    /// Installs the builder for `key`, returning `true` if one was replaced.
    ///
    /// Cached definitions for `key` are dropped and every binding for `key`
    /// is rebuilt.
    pub fn register_builder(&mut self, key: StyleKey, builder: impl StyleBuilder + 'static) -> bool {
        let replaced = self
            .engine
            .builders
            .insert(key, Box::new(builder))
            .is_some();
        let dropped = self.engine.cache.invalidate_key(key);
        debug!(key = %key, replaced, dropped, "style builder registered");
        let queue = self.engine.jobs_for_key(key);
        self.settle(queue);
        replaced
    }

    /// Sets the raw value `element` uses for `key` while `alias` is active.
    ///
    /// The empty alias sets the default value. Setting a value for an alias
    /// that already has one replaces it.
    ///
    /// # Errors
    ///
    /// Returns [`MarshalError::UnknownBreakpoint`] if `alias` is not
    /// registered.
    pub fn register_binding(
        &mut self,
        element: K,
        key: StyleKey,
        alias: &str,
        value: impl Into<String>,
    ) -> Result<(), MarshalError> {
        let slot = self.slot(alias)?;
        let value = value.into();
        debug!(element = ?element, key = %key, alias, value = %value, "binding value registered");
        self.engine
            .entry(element)
            .binding_or_insert(key)
            .set_value(slot, value);
        self.settle_one(element, key, false);
        Ok(())
    }

    /// Removes the value `element` uses for `key` under `alias`.
    ///
    /// Returns `true` if a value was removed.
    ///
    /// # Errors
    ///
    /// Returns [`MarshalError::UnknownBreakpoint`] if `alias` is not
    /// registered.
    pub fn remove_value(&mut self, element: K, key: StyleKey, alias: &str) -> Result<bool, MarshalError> {
        let slot = self.slot(alias)?;
        let removed = self
            .engine
            .elements
            .get_mut(&element)
            .and_then(|entry| entry.binding_mut(key))
            .is_some_and(|binding| binding.remove_value(slot));
        if removed {
            self.settle_one(element, key, false);
        }
        Ok(removed)
    }

    /// Removes every binding of `element` and clears the properties they
    /// applied.
    ///
    /// Resolution listeners receive an empty definition. Returns `false` for
    /// an unknown element.
    pub fn unregister_element(&mut self, element: K) -> bool {
        let Some(mut entry) = self.engine.elements.remove(&element) else {
            return false;
        };
        self.engine.order.retain(|other| *other != element);
        let empty = StyleDefinition::default();
        for binding in &mut entry.bindings {
            if binding.resolved.is_empty() {
                continue;
            }
            let properties: SmallVec<[&str; 4]> = binding.resolved.properties().collect();
            self.engine.applicator.clear(element, &properties);
            for (_, listener) in &mut binding.listeners {
                listener(&empty);
            }
        }
        debug!(element = ?element, "element unregistered");
        true
    }

    /// Replaces the context `element` builds `key` with.
    pub fn set_context(&mut self, element: K, key: StyleKey, context: StyleContext) {
        let binding = self.engine.entry(element).binding_or_insert(key);
        if binding.context == context {
            return;
        }
        binding.context = context;
        self.settle_one(element, key, true);
    }

    /// Sets one context parameter of `element`'s binding for `key`.
    pub fn set_context_value(
        &mut self,
        element: K,
        key: StyleKey,
        name: &'static str,
        value: impl Into<String>,
    ) {
        let changed = self
            .engine
            .entry(element)
            .binding_or_insert(key)
            .context
            .set(name, value);
        if changed {
            self.settle_one(element, key, true);
        }
    }

    /// Feeds the winning raw value of `source` into the context of `target`.
    ///
    /// Whenever `element`'s `source` binding resolves, its winning value is
    /// stored in the `target` binding's context under `context_name`, or
    /// removed when nothing wins, and `target` is rebuilt if that changed its
    /// context. Linking the same pair twice has no further effect.
    pub fn link(
        &mut self,
        element: K,
        source: StyleKey,
        target: StyleKey,
        context_name: &'static str,
    ) {
        let link = Link {
            source,
            target,
            context_name,
        };
        let entry = self.engine.entry(element);
        if entry.links.contains(&link) {
            return;
        }
        let source_input = entry.binding_or_insert(source).input.clone();
        let target_binding = entry.binding_or_insert(target);
        let changed = source_input
            .is_some_and(|value| target_binding.context.set(context_name, value));
        entry.links.push(link);
        debug!(element = ?element, source = %source, target = %target, context_name, "bindings linked");
        if changed {
            self.settle_one(element, target, true);
        }
    }

    /// Calls `callback` with the new definition whenever `element`'s binding
    /// for `key` resolves to a different one.
    pub fn on_resolved(
        &mut self,
        element: K,
        key: StyleKey,
        callback: impl FnMut(&StyleDefinition) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.engine.next_listener);
        self.engine.next_listener = self.engine.next_listener.wrapping_add(1);
        self.engine
            .entry(element)
            .binding_or_insert(key)
            .listeners
            .push((id, Box::new(callback)));
        id
    }

    /// Removes a resolution listener, returning `true` if it existed.
    pub fn off_resolved(&mut self, element: K, key: StyleKey, id: ListenerId) -> bool {
        let Some(binding) = self
            .engine
            .elements
            .get_mut(&element)
            .and_then(|entry| entry.binding_mut(key))
        else {
            return false;
        };
        let before = binding.listeners.len();
        binding.listeners.retain(|(other, _)| *other != id);
        binding.listeners.len() != before
    }

    /// The definition currently applied for `element`'s binding to `key`.
    ///
    /// `None` while the binding is inert or unknown.
    #[must_use]
    pub fn resolved(&self, element: K, key: StyleKey) -> Option<&StyleDefinition> {
        self.binding(element, key)
            .filter(|binding| binding.input.is_some())
            .map(|binding| &binding.resolved)
    }

    /// The raw value that currently wins for `element`'s binding to `key`.
    #[must_use]
    pub fn resolved_input(&self, element: K, key: StyleKey) -> Option<&str> {
        self.binding(element, key)
            .and_then(|binding| binding.input.as_deref())
    }

    /// The context of `element`'s binding to `key`.
    #[must_use]
    pub fn context(&self, element: K, key: StyleKey) -> Option<&StyleContext> {
        self.binding(element, key).map(|binding| &binding.context)
    }

    /// Registered elements in registration order.
    pub fn elements(&self) -> impl Iterator<Item = K> + '_ {
        self.engine.order.iter().copied()
    }

    /// The media observer.
    #[must_use]
    #[inline]
    pub fn media(&self) -> &MediaObserver {
        &self.media
    }

    /// The style cache.
    #[must_use]
    #[inline]
    pub fn cache(&self) -> &StyleCache {
        &self.engine.cache
    }

    /// The applicator.
    #[must_use]
    #[inline]
    pub fn applicator(&self) -> &A {
        &self.engine.applicator
    }

    /// Mutable access to the applicator.
    #[must_use]
    #[inline]
    pub fn applicator_mut(&mut self) -> &mut A {
        &mut self.engine.applicator
    }

    /// Activates a breakpoint and resolves every affected binding.
    ///
    /// # Errors
    ///
    /// Returns [`MarshalError::Media`] for an unknown alias.
    pub fn activate(&mut self, alias: &str) -> Result<bool, MarshalError> {
        let Self { media, engine } = self;
        Ok(media.activate_with(alias, |change, state| engine.on_media_change(change, state))?)
    }

    /// Deactivates a breakpoint and resolves every affected binding.
    ///
    /// # Errors
    ///
    /// Returns [`MarshalError::Media`] for an unknown alias.
    pub fn deactivate(&mut self, alias: &str) -> Result<bool, MarshalError> {
        let Self { media, engine } = self;
        Ok(media.deactivate_with(alias, |change, state| engine.on_media_change(change, state))?)
    }

    /// Makes `alias` the only active breakpoint, optionally along with the
    /// overlapping breakpoints that cover it.
    ///
    /// See [`MediaObserver::activate_only`].
    ///
    /// # Errors
    ///
    /// Returns [`MarshalError::Media`] for an unknown alias.
    pub fn activate_only(&mut self, alias: &str, use_overlaps: bool) -> Result<usize, MarshalError> {
        let Self { media, engine } = self;
        Ok(media.activate_only_with(alias, use_overlaps, |change, state| {
            engine.on_media_change(change, state);
        })?)
    }

    /// Evaluates every breakpoint against `viewport` and resolves every
    /// affected binding.
    pub fn set_viewport(&mut self, viewport: Viewport) -> usize {
        let Self { media, engine } = self;
        media.set_viewport_with(viewport, |change, state| engine.on_media_change(change, state))
    }

    /// Subscribes to the underlying breakpoint transitions.
    ///
    /// Subscribers run after the marshaller has settled each transition.
    pub fn subscribe_media(
        &mut self,
        callback: impl FnMut(&MediaChange<'_>) + 'static,
    ) -> SubscriptionId {
        self.media.subscribe(callback)
    }

    /// Removes a media subscription.
    pub fn unsubscribe_media(&mut self, id: SubscriptionId) -> bool {
        self.media.unsubscribe(id)
    }

    fn binding(&self, element: K, key: StyleKey) -> Option<&Binding> {
        self.engine
            .elements
            .get(&element)
            .and_then(|entry| entry.binding(key))
    }

    fn slot(&self, alias: &str) -> Result<Option<BreakpointId>, MarshalError> {
        if alias.is_empty() {
            return Ok(None);
        }
        self.media
            .registry()
            .id_of(alias)
            .map(Some)
            .ok_or_else(|| MarshalError::UnknownBreakpoint(alias.into()))
    }

    fn settle_one(&mut self, element: K, key: StyleKey, force: bool) {
        let mut queue = Queue::new();
        queue.push_back(Job {
            element,
            key,
            force,
        });
        self.settle(queue);
    }

    fn settle(&mut self, queue: Queue<K>) {
        let Self { media, engine } = self;
        engine.settle(&media.state(), queue);
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::{Cell, RefCell};

    use super::*;

    const ALIGN: StyleKey = StyleKey::new("align");
    const DIRECTION: StyleKey = StyleKey::new("direction");

    type Marshaller = StyleMarshaller<u32>;

    fn marshaller() -> Marshaller {
        let mut m = Marshaller::from_config(&LayoutConfig::default(), InlineStyles::new()).unwrap();
        m.register_builder(ALIGN, align_builder);
        m
    }

    /// `start` clamps the height, anything else does not.
    fn align_builder(input: &str, context: &StyleContext) -> StyleDefinition {
        let mut styles = StyleDefinition::builder().set("align-items", String::from(input));
        if input == "start" {
            styles = styles.set("max-height", "100%");
        }
        if let Some(direction) = context.get("direction") {
            styles = styles.set("flex-direction", String::from(direction));
        }
        styles.build()
    }

    #[test]
    fn binding_without_values_is_inert() {
        let mut m = marshaller();
        m.set_context_value(1, ALIGN, "direction", "row");
        assert_eq!(m.resolved(1, ALIGN), None);
        assert!(m.applicator().is_empty());
        assert_eq!(m.applicator().writes(), 0);
    }

    #[test]
    fn most_specific_active_value_wins() {
        let mut m = marshaller();
        m.register_binding(1, ALIGN, "", "default").unwrap();
        m.register_binding(1, ALIGN, "gt-sm", "wide").unwrap();
        m.register_binding(1, ALIGN, "md", "medium").unwrap();

        m.activate("gt-sm").unwrap();
        m.activate("md").unwrap();
        assert_eq!(m.resolved_input(1, ALIGN), Some("medium"));
        m.deactivate("md").unwrap();
        assert_eq!(m.resolved_input(1, ALIGN), Some("wide"));
        m.deactivate("gt-sm").unwrap();
        assert_eq!(m.resolved_input(1, ALIGN), Some("default"));
    }

    #[test]
    fn stale_properties_are_cleared() {
        let mut m = marshaller();
        m.register_binding(1, ALIGN, "", "start").unwrap();
        assert_eq!(m.applicator().get(1, "max-height"), Some("100%"));

        m.register_binding(1, ALIGN, "xs", "end").unwrap();
        m.activate("xs").unwrap();
        assert_eq!(m.applicator().get(1, "align-items"), Some("end"));
        assert_eq!(m.applicator().get(1, "max-height"), None);
    }

    #[test]
    fn unknown_alias_is_rejected() {
        let mut m = marshaller();
        assert_eq!(
            m.register_binding(1, ALIGN, "huge", "x"),
            Err(MarshalError::UnknownBreakpoint("huge".into()))
        );
        assert!(matches!(
            m.activate("huge"),
            Err(MarshalError::Media(MediaError::UnknownAlias(_)))
        ));
        assert_eq!(m.elements().count(), 0);
    }

    #[test]
    fn removing_the_winning_value_falls_back() {
        let mut m = marshaller();
        m.activate("lg").unwrap();
        m.register_binding(1, ALIGN, "", "start").unwrap();
        m.register_binding(1, ALIGN, "lg", "end").unwrap();
        assert_eq!(m.resolved_input(1, ALIGN), Some("end"));

        assert!(m.remove_value(1, ALIGN, "lg").unwrap());
        assert!(!m.remove_value(1, ALIGN, "lg").unwrap());
        assert_eq!(m.resolved_input(1, ALIGN), Some("start"));

        assert!(m.remove_value(1, ALIGN, "").unwrap());
        assert_eq!(m.resolved(1, ALIGN), None);
        assert!(m.applicator().is_empty());
    }

    #[test]
    fn unregister_clears_applied_properties() {
        let mut m = marshaller();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        m.on_resolved(4, ALIGN, move |styles| sink.borrow_mut().push(styles.len()));
        m.register_binding(4, ALIGN, "", "start").unwrap();
        m.register_binding(5, ALIGN, "", "end").unwrap();

        assert!(m.unregister_element(4));
        assert!(!m.unregister_element(4));
        assert!(m.applicator().styles(4).next().is_none());
        assert_eq!(m.applicator().get(5, "align-items"), Some("end"));
        assert_eq!(*seen.borrow(), vec![2, 0]);
        assert_eq!(m.elements().collect::<Vec<_>>(), [5]);

        // Late transitions for the removed element are ignored.
        m.activate("md").unwrap();
        assert_eq!(m.resolved(4, ALIGN), None);
    }

    #[test]
    fn context_change_rebuilds() {
        let mut m = marshaller();
        m.register_binding(1, ALIGN, "", "center").unwrap();
        m.set_context_value(1, ALIGN, "direction", "column");
        assert_eq!(m.applicator().get(1, "flex-direction"), Some("column"));

        m.set_context(1, ALIGN, StyleContext::new());
        assert_eq!(m.applicator().get(1, "flex-direction"), None);
        assert_eq!(m.cache().len(), 2);
    }

    #[test]
    fn links_feed_source_value_into_target_context() {
        let mut m = marshaller();
        m.register_builder(DIRECTION, |input: &str, _: &StyleContext| {
            StyleDefinition::builder()
                .set("display", "flex")
                .set("flex-direction", String::from(input))
                .build()
        });
        m.register_binding(1, DIRECTION, "", "row").unwrap();
        m.register_binding(1, DIRECTION, "xs", "column").unwrap();
        m.register_binding(1, ALIGN, "", "center").unwrap();
        m.link(1, DIRECTION, ALIGN, "direction");
        m.link(1, DIRECTION, ALIGN, "direction");

        assert_eq!(
            m.context(1, ALIGN).and_then(|cx| cx.get("direction")),
            Some("row")
        );
        assert_eq!(
            m.resolved(1, ALIGN).and_then(|s| s.get("flex-direction")),
            Some("row")
        );

        m.activate("xs").unwrap();
        assert_eq!(
            m.resolved(1, ALIGN).and_then(|s| s.get("flex-direction")),
            Some("column")
        );
    }

    #[test]
    fn dropped_properties_fall_back_to_sibling_bindings() {
        let mut m = marshaller();
        m.register_builder(DIRECTION, |input: &str, _: &StyleContext| {
            StyleDefinition::builder()
                .set("flex-direction", String::from(input))
                .build()
        });
        m.register_binding(1, DIRECTION, "", "column").unwrap();
        m.set_context_value(1, ALIGN, "direction", "row");
        m.register_binding(1, ALIGN, "md", "center").unwrap();

        m.activate("md").unwrap();
        assert_eq!(m.applicator().get(1, "flex-direction"), Some("row"));

        m.deactivate("md").unwrap();
        assert_eq!(m.resolved(1, ALIGN), None);
        assert_eq!(m.applicator().get(1, "flex-direction"), Some("column"));
        assert_eq!(m.applicator().get(1, "align-items"), None);
    }

    #[test]
    fn cyclic_links_settle() {
        let mut m = marshaller();
        m.register_builder(DIRECTION, align_builder);
        m.register_binding(1, ALIGN, "", "a").unwrap();
        m.register_binding(1, DIRECTION, "", "b").unwrap();
        m.link(1, ALIGN, DIRECTION, "direction");
        m.link(1, DIRECTION, ALIGN, "direction");
        m.register_binding(1, ALIGN, "", "c").unwrap();

        assert_eq!(
            m.context(1, DIRECTION).and_then(|cx| cx.get("direction")),
            Some("c")
        );
        assert_eq!(
            m.context(1, ALIGN).and_then(|cx| cx.get("direction")),
            Some("b")
        );
    }

    #[test]
    fn replacing_a_builder_rebuilds_and_drops_cache() {
        let mut m = marshaller();
        m.register_binding(1, ALIGN, "", "start").unwrap();
        assert_eq!(m.cache().len(), 1);

        let replaced = m.register_builder(ALIGN, |_: &str, _: &StyleContext| {
            StyleDefinition::builder().set("align-items", "baseline").build()
        });
        assert!(replaced);
        assert_eq!(m.applicator().get(1, "align-items"), Some("baseline"));
        assert_eq!(m.applicator().get(1, "max-height"), None);
        assert_eq!(m.cache().len(), 1);
    }

    #[test]
    fn uncached_builders_run_every_time() {
        struct Counting(Rc<Cell<usize>>);

        impl StyleBuilder for Counting {
            fn build_styles(&self, input: &str, _: &StyleContext) -> StyleDefinition {
                self.0.set(self.0.get() + 1);
                StyleDefinition::builder()
                    .set("order", String::from(input))
                    .build()
            }

            fn should_cache(&self) -> bool {
                false
            }
        }

        const ORDER: StyleKey = StyleKey::new("order");
        let calls = Rc::new(Cell::new(0));
        let mut m = marshaller();
        m.register_builder(ORDER, Counting(Rc::clone(&calls)));
        m.register_binding(1, ORDER, "", "1").unwrap();
        m.register_binding(2, ORDER, "", "1").unwrap();

        assert_eq!(calls.get(), 2);
        assert!(m.cache().is_empty());
    }

    #[test]
    fn listeners_fire_only_on_change_and_can_be_removed() {
        let mut m = marshaller();
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let id = m.on_resolved(1, ALIGN, move |_| counter.set(counter.get() + 1));

        m.register_binding(1, ALIGN, "", "end").unwrap();
        m.register_binding(1, ALIGN, "md", "end").unwrap();
        m.activate("md").unwrap();
        assert_eq!(count.get(), 1);

        assert!(m.off_resolved(1, ALIGN, id));
        assert!(!m.off_resolved(1, ALIGN, id));
        m.register_binding(1, ALIGN, "", "center").unwrap();
        m.deactivate("md").unwrap();
        assert_eq!(count.get(), 1);
        assert_eq!(m.resolved_input(1, ALIGN), Some("center"));
    }

    #[test]
    fn media_subscribers_see_settled_state() {
        let mut m = marshaller();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let id = m.subscribe_media(move |change| {
            sink.borrow_mut().push(String::from(change.alias));
        });
        m.set_viewport(Viewport::new(1000.0, 800.0));
        assert_eq!(log.borrow().len(), 5);
        assert!(m.unsubscribe_media(id));
        assert!(m.media().is_active("md"));
    }
}

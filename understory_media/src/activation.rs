// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Activation set: the breakpoints currently matching.

use core::fmt;

use smallvec::SmallVec;
use understory_breakpoint::BreakpointId;

const WORD_BITS: usize = 64;

/// A compact bitset of active breakpoints.
///
/// The set grows on demand; the first 64 breakpoints fit inline without an
/// allocation.
///
/// # Example
///
/// ```
/// use understory_breakpoint::BreakpointId;
/// use understory_media::ActivationSet;
///
/// let mut set = ActivationSet::new();
/// assert!(set.insert(BreakpointId::new(3)));
/// assert!(!set.insert(BreakpointId::new(3)));
/// assert!(set.insert(BreakpointId::new(70)));
///
/// assert!(set.contains(BreakpointId::new(70)));
/// assert_eq!(set.len(), 2);
/// let ids: Vec<_> = set.iter().map(BreakpointId::index).collect();
/// assert_eq!(ids, [3, 70]);
/// ```
#[derive(Clone, Default)]
pub struct ActivationSet {
    words: SmallVec<[u64; 1]>,
}

impl ActivationSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Words without trailing zero words.
    fn significant(&self) -> &[u64] {
        let len = self.words.iter().rposition(|w| *w != 0).map_or(0, |last| last + 1);
        &self.words[..len]
    }

    fn split(id: BreakpointId) -> (usize, u64) {
        let index = usize::from(id.index());
        (index / WORD_BITS, 1_u64 << (index % WORD_BITS))
    }

    /// Returns `true` if `id` is active.
    #[must_use]
    pub fn contains(&self, id: BreakpointId) -> bool {
        let (word, bit) = Self::split(id);
        self.words.get(word).is_some_and(|w| w & bit != 0)
    }

    /// Marks `id` active, returning `true` if it was inactive.
    pub fn insert(&mut self, id: BreakpointId) -> bool {
        let (word, bit) = Self::split(id);
        if self.words.len() <= word {
            self.words.resize(word + 1, 0);
        }
        let was_set = self.words[word] & bit != 0;
        self.words[word] |= bit;
        !was_set
    }

    /// Marks `id` inactive, returning `true` if it was active.
    pub fn remove(&mut self, id: BreakpointId) -> bool {
        let (word, bit) = Self::split(id);
        match self.words.get_mut(word) {
            Some(w) if *w & bit != 0 => {
                *w &= !bit;
                true
            }
            _ => false,
        }
    }

    /// Empties the set.
    pub fn clear(&mut self) {
        self.words.clear();
    }

    /// Number of active breakpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` if nothing is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Iterates active identifiers in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = BreakpointId> + '_ {
        self.words.iter().enumerate().flat_map(|(word, &bits)| {
            let mut bits = bits;
            core::iter::from_fn(move || {
                if bits == 0 {
                    return None;
                }
                let bit = bits.trailing_zeros() as usize;
                bits &= bits - 1;
                u16::try_from(word * WORD_BITS + bit)
                    .ok()
                    .map(BreakpointId::new)
            })
        })
    }
}

impl fmt::Debug for ActivationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl PartialEq for ActivationSet {
    fn eq(&self, other: &Self) -> bool {
        self.significant() == other.significant()
    }
}

impl Eq for ActivationSet {}

impl FromIterator<BreakpointId> for ActivationSet {
    fn from_iter<I: IntoIterator<Item = BreakpointId>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

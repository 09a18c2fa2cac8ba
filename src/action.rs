//! Canonical action identity: irrelevant-event masking and the first-seen
//! action registry.
//!
//! Two raw calendars are the same bandit action when they agree on every
//! *relevant* event; whatever fills the remaining slots is noise as far as
//! the reward model is concerned.  Masking noise events to a sentinel turns
//! that equivalence into plain equality on keys, which is what the registry
//! indexes by.

use std::collections::{BTreeMap, BTreeSet};

/// Calendar event identifier.  Signed so the sentinel below can never
/// collide with a real event.
pub type EventId = i64;

/// Sentinel written into a canonical key wherever an arrangement references
/// an event outside the relevant set.
pub const IRRELEVANT_EVENT: EventId = -1;

/// Canonical form of a candidate arrangement: one entry per slot, each
/// either a member of the relevant set or [`IRRELEVANT_EVENT`].
pub type ActionKey = Vec<EventId>;

/// Mask a single arrangement against the relevant set.
///
/// Pure and idempotent: the sentinel maps to itself, so masking a canonical
/// key reproduces it.
pub(crate) fn mask_arrangement(arrangement: &[EventId], relevant: &BTreeSet<EventId>) -> ActionKey {
    arrangement
        .iter()
        .map(|e| {
            if relevant.contains(e) {
                *e
            } else {
                IRRELEVANT_EVENT
            }
        })
        .collect()
}

/// Append-only registry of canonical arrangements in first-seen order.
///
/// Indices are assigned in discovery order and never reused or reassigned;
/// index `i` addresses the same action (and its statistics slot) for the
/// registry's whole lifetime.
#[derive(Debug, Clone, Default)]
pub(crate) struct ActionRegistry {
    index: BTreeMap<ActionKey, usize>,
    keys: Vec<ActionKey>,
}

impl ActionRegistry {
    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    /// Registered keys, in first-seen order.
    pub(crate) fn keys(&self) -> &[ActionKey] {
        &self.keys
    }

    pub(crate) fn get(&self, key: &[EventId]) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Look up `key`, registering it under the next free index if unseen.
    /// Returns `(index, freshly_registered)`.
    pub(crate) fn insert_or_get(&mut self, key: &ActionKey) -> (usize, bool) {
        if let Some(&i) = self.index.get(key) {
            return (i, false);
        }
        let i = self.keys.len();
        self.index.insert(key.clone(), i);
        self.keys.push(key.clone());
        (i, true)
    }
}

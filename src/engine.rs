//! LinUCB over candidate calendar arrangements.
//!
//! One policy value owns the whole belief state: the first-seen registry of
//! canonical arrangements and, per arrangement, the ridge-regression
//! sufficient statistics `(A, b)` with an identity prior.  Scoring inverts
//! `A` from scratch for every candidate — `O(d³)` per candidate per call,
//! a documented performance (not correctness) limitation that is irrelevant
//! at calendar-sized dimensions.
//!
//! Usage:
//! - call `select(candidates, features)` to get the chosen ORIGINAL
//!   candidate (real event identifiers, not sentinel-masked ones)
//! - call `update_from_reward(reward, candidates, features)` once the chosen
//!   arrangement has been rated

use std::collections::BTreeSet;

use crate::action::{mask_arrangement, ActionKey, ActionRegistry, EventId};
use crate::linalg::{add_outer, dot, identity, invert, mat_vec};
use crate::BanditError;

/// Confidence parameter behind the exploration bonus; fixed by design — the
/// engine is not a tuning surface.
const DELTA: f64 = 0.1;

/// Per-candidate score breakdown: `(ucb, mean, bonus)`.
pub type UcbScore = (f64, f64, f64);

/// Per-action ridge-regression sufficient statistics.
#[derive(Debug, Clone)]
struct ActionStats {
    /// Design matrix `A = I + Σ x xᵀ` (d × d, row-major).
    a: Vec<f64>,
    /// Reward-weighted feature sum `b = Σ r x` (d).
    b: Vec<f64>,
    /// Number of rewards folded into this action.
    uses: u64,
}

impl ActionStats {
    fn new(dim: usize) -> Self {
        Self {
            a: identity(dim),
            b: vec![0.0; dim],
            uses: 0,
        }
    }
}

/// A compact, log-ready record of one selection.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionRecord {
    /// Index of the winning candidate within the batch.
    pub chosen: usize,
    /// The winning candidate as supplied by the caller (unmasked).
    pub arrangement: Vec<EventId>,
    /// UCB score per candidate, batch order.
    pub ucbs: Vec<f64>,
    /// How many candidates were registered fresh by this call.
    pub newly_registered: usize,
}

/// Deterministic LinUCB policy over calendar arrangements.
///
/// Construction fixes the relevant-event set and the slot count, and with
/// them the feature dimensionality `d = |relevant| × slots` that every
/// feature vector must match.  All statistics are owned exclusively by this
/// value; callers interact only through the operations below.
#[derive(Debug, Clone)]
pub struct CalendarUcb {
    relevant: BTreeSet<EventId>,
    slots: usize,
    dim: usize,
    alpha: f64,
    registry: ActionRegistry,
    stats: Vec<ActionStats>,
    pending: Option<ActionKey>,
}

impl CalendarUcb {
    /// Create a new policy for the given relevant events and slot count.
    ///
    /// Rejects a zero slot count; an empty relevant set is permitted and
    /// yields `d = 0` (every score collapses to zero, selection still
    /// resolves to the first candidate).
    pub fn new(relevant_events: BTreeSet<EventId>, slot_count: usize) -> Result<Self, BanditError> {
        if slot_count == 0 {
            return Err(BanditError::InvalidSlotCount);
        }
        let dim = relevant_events.len() * slot_count;
        Ok(Self {
            relevant: relevant_events,
            slots: slot_count,
            dim,
            alpha: 1.0 + ((2.0 / DELTA).ln() / 2.0).sqrt(),
            registry: ActionRegistry::default(),
            stats: Vec::new(),
            pending: None,
        })
    }

    /// Feature dimensionality `d = |relevant events| × slot count`.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Slots per arrangement.
    pub fn slot_count(&self) -> usize {
        self.slots
    }

    /// The fixed exploration strength `1 + √(ln(2/δ)/2)`.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Number of arrangements discovered so far.
    pub fn num_actions(&self) -> usize {
        self.registry.len()
    }

    /// Canonical keys of all discovered arrangements, in first-seen order.
    pub fn action_keys(&self) -> &[ActionKey] {
        self.registry.keys()
    }

    /// How many rewards have been folded into the given action.
    pub fn uses(&self, action: usize) -> Option<u64> {
        self.stats.get(action).map(|s| s.uses)
    }

    /// Canonicalize a batch of candidate arrangements: events outside the
    /// relevant set become [`IRRELEVANT_EVENT`](crate::IRRELEVANT_EVENT).
    ///
    /// Pure, order-preserving, 1:1 with the input, and idempotent.
    pub fn canonicalize(&self, candidates: &[Vec<EventId>]) -> Vec<ActionKey> {
        candidates
            .iter()
            .map(|c| mask_arrangement(c, &self.relevant))
            .collect()
    }

    /// Select an arrangement, returning the ORIGINAL candidate at the
    /// winning index.
    ///
    /// Scores every candidate under its registered statistics (registering
    /// unseen canonical keys first) and takes a strict left-to-right
    /// arg-max, so equal scores keep the lowest index.  Also remembers the
    /// winner's canonical key as the pending selection for the next
    /// [`update_from_reward`](Self::update_from_reward).
    pub fn select<'a>(
        &mut self,
        candidates: &'a [Vec<EventId>],
        features: &[Vec<f64>],
    ) -> Result<&'a [EventId], BanditError> {
        let (best, _scores) = self.select_inner(candidates, features)?;
        Ok(&candidates[best])
    }

    /// Like [`select`](Self::select), but also returns the per-candidate
    /// `(ucb, mean, bonus)` breakdowns in batch order.
    pub fn select_with_scores<'a>(
        &mut self,
        candidates: &'a [Vec<EventId>],
        features: &[Vec<f64>],
    ) -> Result<(&'a [EventId], Vec<UcbScore>), BanditError> {
        let (best, scores) = self.select_inner(candidates, features)?;
        Ok((&candidates[best], scores))
    }

    /// Select and return a log-ready [`SelectionRecord`] instead of a borrow
    /// into the batch.
    pub fn decide(
        &mut self,
        candidates: &[Vec<EventId>],
        features: &[Vec<f64>],
    ) -> Result<SelectionRecord, BanditError> {
        let before = self.registry.len();
        let (best, scores) = self.select_inner(candidates, features)?;
        Ok(SelectionRecord {
            chosen: best,
            arrangement: candidates[best].clone(),
            ucbs: scores.iter().map(|s| s.0).collect(),
            newly_registered: self.registry.len() - before,
        })
    }

    /// Fold an observed reward into the pending selection's statistics:
    /// `A += x xᵀ`, `b += reward · x`, where `x` is the feature vector of
    /// the first candidate in this batch whose canonical key matches the
    /// pending key.
    ///
    /// The pending selection stays set afterwards; a caller that reports
    /// several rewards without re-selecting keeps updating the same action.
    pub fn update_from_reward(
        &mut self,
        reward: f64,
        candidates: &[Vec<EventId>],
        features: &[Vec<f64>],
    ) -> Result<(), BanditError> {
        let pending = self
            .pending
            .clone()
            .ok_or(BanditError::NoPendingSelection)?;
        self.check_batch(candidates, features)?;

        let keys = self.canonicalize(candidates);
        let slot = keys
            .iter()
            .position(|k| *k == pending)
            .ok_or(BanditError::ActionNotFound)?;
        let action = self
            .registry
            .get(&pending)
            .expect("pending selection key missing from registry");

        let x = &features[slot];
        let st = &mut self.stats[action];
        add_outer(&mut st.a, x);
        for (bi, xi) in st.b.iter_mut().zip(x.iter()) {
            *bi += reward * xi;
        }
        st.uses = st.uses.saturating_add(1);
        tracing::debug!(action, reward, uses = st.uses, "reward applied");
        Ok(())
    }

    /// Per-action ridge point estimates `θ̂ = A⁻¹ b`, in registry order.
    ///
    /// Each theta is the action's learned response function:
    /// `E[reward | features x] = θ̂ᵀ x`.
    pub fn theta_vectors(&self) -> Result<Vec<Vec<f64>>, BanditError> {
        self.stats
            .iter()
            .enumerate()
            .map(|(i, st)| {
                let a_inv = invert(&st.a, self.dim, i)?;
                Ok(mat_vec(&a_inv, self.dim, &st.b))
            })
            .collect()
    }

    fn check_batch(
        &self,
        candidates: &[Vec<EventId>],
        features: &[Vec<f64>],
    ) -> Result<(), BanditError> {
        if candidates.is_empty() || candidates.len() != features.len() {
            return Err(BanditError::BatchShape {
                candidates: candidates.len(),
                features: features.len(),
            });
        }
        for (index, c) in candidates.iter().enumerate() {
            if c.len() != self.slots {
                return Err(BanditError::SlotMismatch {
                    index,
                    expected: self.slots,
                    got: c.len(),
                });
            }
        }
        for (index, f) in features.iter().enumerate() {
            if f.len() != self.dim {
                return Err(BanditError::DimensionMismatch {
                    index,
                    expected: self.dim,
                    got: f.len(),
                });
            }
        }
        Ok(())
    }

    fn score(&self, st: &ActionStats, x: &[f64], action: usize) -> Result<UcbScore, BanditError> {
        let a_inv = invert(&st.a, self.dim, action)?;
        let theta = mat_vec(&a_inv, self.dim, &st.b);
        let mean = dot(&theta, x);

        let ax = mat_vec(&a_inv, self.dim, x);
        let var = dot(x, &ax).max(0.0);
        let bonus = self.alpha * var.sqrt();
        Ok((mean + bonus, mean, bonus))
    }

    fn select_inner(
        &mut self,
        candidates: &[Vec<EventId>],
        features: &[Vec<f64>],
    ) -> Result<(usize, Vec<UcbScore>), BanditError> {
        self.check_batch(candidates, features)?;
        let keys = self.canonicalize(candidates);

        // Register unseen arrangements. Re-encountering a known key never
        // resets its statistics.
        let mut fresh = 0usize;
        let mut actions = Vec::with_capacity(keys.len());
        for key in &keys {
            let (idx, newly) = self.registry.insert_or_get(key);
            if newly {
                self.stats.push(ActionStats::new(self.dim));
                fresh += 1;
            }
            actions.push(idx);
        }

        let mut scores = Vec::with_capacity(actions.len());
        for (i, &action) in actions.iter().enumerate() {
            scores.push(self.score(&self.stats[action], &features[i], action)?);
        }

        // Strict left-to-right arg-max: ties keep the lowest index.
        let mut best = 0usize;
        for (i, sc) in scores.iter().enumerate().skip(1) {
            if sc.0 > scores[best].0 {
                best = i;
            }
        }

        self.pending = Some(keys[best].clone());
        tracing::debug!(
            chosen = best,
            ucb = scores[best].0,
            fresh,
            actions = self.registry.len(),
            "arrangement selected"
        );
        Ok((best, scores))
    }
}

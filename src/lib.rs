//! `slotpick`: deterministic LinUCB selection over candidate calendar arrangements.
//!
//! Designed for "pick one arrangement" problems: a caller proposes a batch of
//! candidate calendars (each an assignment of event identifiers to a fixed
//! number of time slots), together with one feature vector per candidate, and
//! wants the policy to pick the arrangement a user is most likely to rate
//! highly — while still exploring arrangements it knows little about.  After
//! the user rates the chosen calendar, the caller reports the rating and the
//! policy tightens its belief about that arrangement.
//!
//! Each distinct *canonical* arrangement is one bandit action.  Canonical
//! means: events outside the relevant set supplied at construction are masked
//! to a sentinel, so two calendars that differ only in irrelevant events are
//! the same action.  The action space is discovered incrementally — the
//! policy registers every arrangement the first time it appears in a batch
//! and never forgets or reorders it.
//!
//! Per action the policy keeps ridge-regression sufficient statistics:
//!
//! ```text
//!   A = I + Σ x xᵀ        (design matrix, identity prior)
//!   b = Σ r x             (reward-weighted feature sum)
//!   θ̂ = A⁻¹ b             (point estimate)
//!   ucb(x) = θ̂ᵀx + α √(xᵀ A⁻¹ x)
//! ```
//!
//! with `α = 1 + √(ln(2/δ)/2)` at fixed `δ = 0.1`.  Selection is a strict
//! left-to-right arg-max over the UCB scores, so equal scores resolve to the
//! lowest index and the whole policy is reproducible bit-for-bit from its
//! call history.
//!
//! **Goals:**
//! - **Deterministic by default**: same history + same batches → same choice.
//!   No RNG anywhere.
//! - **Small action spaces**: designed for a handful of candidate calendars
//!   per batch and modest feature dimensions; the design-matrix inverse is
//!   recomputed from scratch per score (`O(d³)`), which is the simple and
//!   correct choice at this scale.
//! - **No I/O, no locking**: a single mutable value the caller owns.  Wrap it
//!   in your own synchronization if you share it across threads.
//!
//! **Non-goals:**
//! - No persistence of model state across process restarts.
//! - No feature construction — feature vectors are the caller's job.
//! - No hyperparameter surface: the confidence parameter is fixed.
//!
//! # Example
//!
//! ```rust
//! use slotpick::CalendarUcb;
//! use std::collections::BTreeSet;
//!
//! let relevant: BTreeSet<i64> = [1, 2].into_iter().collect();
//! let mut policy = CalendarUcb::new(relevant, 2).unwrap();
//!
//! // Two candidate calendars, one feature vector each (d = 2 events × 2 slots).
//! let candidates = vec![vec![1, 2], vec![1, 3]];
//! let features = vec![vec![1.0, 0.0, 0.0, 1.0], vec![0.0, 1.0, 1.0, 0.0]];
//!
//! let chosen = policy.select(&candidates, &features).unwrap();
//! assert_eq!(chosen, &[1, 2]);
//!
//! // The user rated the chosen calendar; fold the rating in.
//! policy.update_from_reward(1.0, &candidates, &features).unwrap();
//! ```

#![forbid(unsafe_code)]

mod action;
pub use action::*;

mod error;
pub use error::*;

mod linalg;

mod engine;
pub use engine::*;

//! End-to-end scenarios through the public API: a caller proposing candidate
//! calendars, the policy choosing one, the user's rating flowing back in.

use slotpick::{BanditError, CalendarUcb, IRRELEVANT_EVENT};
use std::collections::BTreeSet;

fn relevant(ids: &[i64]) -> BTreeSet<i64> {
    ids.iter().copied().collect()
}

/// Feature vector for a two-slot arrangement over relevant events {1, 2}:
/// one-hot of (event, slot) pairs, d = 4.
fn one_hot(arrangement: &[i64]) -> Vec<f64> {
    let events = [1i64, 2];
    let mut x = vec![0.0; 4];
    for (slot, e) in arrangement.iter().enumerate() {
        if let Some(row) = events.iter().position(|v| v == e) {
            x[row * 2 + slot] = 1.0;
        }
    }
    x
}

#[test]
fn a_morning_person_gets_their_preferred_arrangement() {
    // Event 1 = workout, event 2 = deep work; the simulated user only rates
    // calendars highly when the workout lands in slot 0.
    let mut policy = CalendarUcb::new(relevant(&[1, 2]), 2).unwrap();
    let candidates = vec![vec![1, 2], vec![2, 1]];
    let features: Vec<Vec<f64>> = candidates.iter().map(|c| one_hot(c)).collect();

    let mut last_20_correct = 0u64;
    for round in 0..100 {
        let chosen = policy.select(&candidates, &features).unwrap().to_vec();
        let reward = if chosen[0] == 1 { 1.0 } else { 0.1 };
        if round >= 80 && chosen[0] == 1 {
            last_20_correct += 1;
        }
        policy
            .update_from_reward(reward, &candidates, &features)
            .unwrap();
    }
    assert_eq!(last_20_correct, 20);
}

#[test]
fn irrelevant_events_do_not_split_the_action_space() {
    // Candidates 0 and 2 differ only in an irrelevant event, so they are the
    // same action and share statistics.
    let mut policy = CalendarUcb::new(relevant(&[1, 2]), 2).unwrap();
    let candidates = vec![vec![1, 3], vec![2, 1], vec![1, 9]];
    let features = vec![
        vec![1.0, 0.0, 0.0, 0.0],
        vec![0.0, 1.0, 1.0, 0.0],
        vec![1.0, 0.0, 0.0, 0.0],
    ];

    policy.select(&candidates, &features).unwrap();
    assert_eq!(policy.num_actions(), 2);
    assert_eq!(policy.action_keys()[0], vec![1, IRRELEVANT_EVENT]);
}

#[test]
fn the_chosen_calendar_keeps_its_real_event_identifiers() {
    let mut policy = CalendarUcb::new(relevant(&[1, 2]), 2).unwrap();
    // Only candidate: one relevant, one irrelevant event.
    let candidates = vec![vec![2, 42]];
    let features = vec![vec![0.0, 0.0, 1.0, 0.0]];

    let chosen = policy.select(&candidates, &features).unwrap();
    assert_eq!(chosen, &[2, 42]);
}

#[test]
fn replaying_a_session_reproduces_every_choice() {
    let rel = relevant(&[1, 2, 3]);
    let mut live = CalendarUcb::new(rel.clone(), 2).unwrap();
    let mut replay = CalendarUcb::new(rel, 2).unwrap();

    let candidates = vec![vec![1, 2], vec![2, 3], vec![3, 1]];
    let features = vec![
        vec![1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0, 0.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
    ];
    let rewards = [0.9, 0.2, 0.4, 0.9, 0.9, 0.1, 0.6, 0.9];

    let mut choices = Vec::new();
    for r in rewards {
        let c = live.select(&candidates, &features).unwrap().to_vec();
        live.update_from_reward(r, &candidates, &features).unwrap();
        choices.push(c);
    }
    for (i, r) in rewards.into_iter().enumerate() {
        let c = replay.select(&candidates, &features).unwrap().to_vec();
        replay.update_from_reward(r, &candidates, &features).unwrap();
        assert_eq!(c, choices[i], "choice diverged at round {i}");
    }
}

#[test]
fn reward_before_any_selection_is_an_integration_fault() {
    let mut policy = CalendarUcb::new(relevant(&[1, 2]), 2).unwrap();
    let candidates = vec![vec![1, 2]];
    let features = vec![vec![1.0, 0.0, 0.0, 1.0]];

    let err = policy
        .update_from_reward(1.0, &candidates, &features)
        .unwrap_err();
    assert!(matches!(err, BanditError::NoPendingSelection));
    assert_eq!(policy.num_actions(), 0);
}

#[test]
fn reward_batches_must_still_contain_the_chosen_arrangement() {
    let mut policy = CalendarUcb::new(relevant(&[1, 2]), 2).unwrap();
    let first = vec![vec![1, 2]];
    let first_features = vec![vec![1.0, 0.0, 0.0, 1.0]];
    policy.select(&first, &first_features).unwrap();

    let second = vec![vec![2, 1]];
    let second_features = vec![vec![0.0, 1.0, 1.0, 0.0]];
    let err = policy
        .update_from_reward(1.0, &second, &second_features)
        .unwrap_err();
    assert!(matches!(err, BanditError::ActionNotFound));
}

//! Quickstart — pick a calendar, learn from the rating, repeat.
//!
//! Three candidate calendars arrange a workout (1), deep work (2), and a
//! filler errand (other ids) into two slots.  The simulated user quietly
//! prefers the workout first and never looks at the errand.
//!
//! Run with:
//!   cargo run --example quickstart

use slotpick::CalendarUcb;
use std::collections::BTreeSet;

fn main() {
    // Events 1 and 2 matter for preference; everything else is noise.
    let relevant: BTreeSet<i64> = [1, 2].into_iter().collect();
    let mut policy = CalendarUcb::new(relevant, 2).unwrap();

    // Candidates 0 and 2 differ only in the irrelevant errand id, so the
    // policy treats them as the same action.
    let candidates = vec![vec![1, 2], vec![2, 1], vec![1, 7]];
    let features = vec![
        vec![1.0, 0.0, 0.0, 1.0],
        vec![0.0, 1.0, 1.0, 0.0],
        vec![1.0, 0.0, 0.0, 0.0],
    ];

    // The hidden preference: reward is high when event 1 leads.
    let rate = |calendar: &[i64]| -> f64 {
        if calendar[0] == 1 {
            0.9
        } else {
            0.2
        }
    };

    println!("alpha = {:.4}, d = {}", policy.alpha(), policy.dim());
    for round in 0..15 {
        let record = policy.decide(&candidates, &features).unwrap();
        let reward = rate(&record.arrangement);
        policy
            .update_from_reward(reward, &candidates, &features)
            .unwrap();

        println!(
            "round {round:2}: chose {:?} (candidate {}), ucbs = {:?}, reward = {reward}",
            record.arrangement,
            record.chosen,
            record
                .ucbs
                .iter()
                .map(|u| (u * 100.0).round() / 100.0)
                .collect::<Vec<_>>(),
        );
    }

    println!(
        "\ndiscovered {} distinct arrangements: {:?}",
        policy.num_actions(),
        policy.action_keys()
    );
}

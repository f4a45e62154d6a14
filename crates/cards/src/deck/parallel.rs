// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Parallel hand iteration and sampling.
use rand::prelude::*;
use std::thread;

use super::{Card, Deck};

impl Deck {
    /// Parallel for each, calls the `f` closure for each k-cards hand.
    ///
    /// The closure takes an usize that is the task identifier (0..num_tasks)
    /// and a slice of cards of length k. Task `t` visits the hands whose first
    /// card is at position `t`, `t + num_tasks`, `t + 2 * num_tasks`, ...
    ///
    /// Panics if k is not 2 <= k <= 7.
    pub fn par_for_each<F>(&self, num_tasks: usize, k: usize, f: F)
    where
        F: Fn(usize, &[Card]) + Send + Sync,
    {
        assert!((2..=7).contains(&k), "2 <= k <= 7");
        assert!(num_tasks > 0);

        if k > self.cards.len() {
            return;
        }

        let last_first = self.cards.len() - k;

        thread::scope(|s| {
            for task_id in 0..num_tasks {
                let f = &f;
                s.spawn(move || {
                    let mut hand = Vec::with_capacity(k);
                    let mut emit = |cards: &[Card]| f(task_id, cards);

                    for first in (task_id..=last_first).step_by(num_tasks) {
                        hand.push(self.cards[first]);
                        self.visit(first + 1, k, &mut hand, &mut emit);
                        hand.pop();
                    }
                });
            }
        });
    }

    /// Calls the given closure from `num_tasks` parallel tasks generating
    /// `num_samples` samples of k distinct cards in total.
    ///
    /// Task `t` generates `num_samples / num_tasks` samples plus one if
    /// `t < num_samples % num_tasks`. If a seed is given the task `t` random
    /// generator is seeded with `seed + t` so that the same seed and number of
    /// tasks always produce the same samples, otherwise each task is seeded
    /// from the OS.
    ///
    /// Panics if k is larger than the number of cards in the deck.
    pub fn par_sample<F>(
        &self,
        num_tasks: usize,
        num_samples: usize,
        k: usize,
        seed: Option<u64>,
        f: F,
    ) where
        F: Fn(usize, &[Card]) + Send + Sync,
    {
        assert!(k <= self.cards.len(), "k={k} > {}", self.cards.len());
        assert!(num_tasks > 0);

        thread::scope(|s| {
            for task_id in 0..num_tasks {
                let f = &f;
                let samples = task_samples(num_tasks, num_samples, task_id);
                s.spawn(move || {
                    let mut rng = match seed {
                        Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(task_id as u64)),
                        None => SmallRng::from_os_rng(),
                    };

                    // Shuffling a task local copy keeps it a permutation of the
                    // deck, so each partial shuffle is a uniform sample.
                    let mut cards = self.cards.clone();
                    for _ in 0..samples {
                        let (sample, _) = cards.partial_shuffle(&mut rng, k);
                        f(task_id, &sample[..]);
                    }
                });
            }
        });
    }
}

/// Number of samples drawn by the task `task_id`.
fn task_samples(num_tasks: usize, num_samples: usize, task_id: usize) -> usize {
    num_samples / num_tasks + usize::from(task_id < num_samples % num_tasks)
}

// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Fivecard cards types.
//!
//! This crate define types to create and parse cards:
//!
//! ```
//! # use fivecard_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let td = "TD".parse::<Card>().unwrap();
//! assert_eq!(ah.to_string(), "AH");
//! assert_eq!(td, Card::new(Rank::Ten, Suit::Diamonds));
//! ```
//!
//! and a [Deck] type for shuffling, sampling, and iterating cards in the deck.
//!
//! For example to iterate through all 5 cards hands:
//!
//! ```no_run
//! # use fivecard_cards::Deck;
//! let mut counter = 0;
//! Deck::default().for_each(5, |hand| {
//!     counter += 1;
//! });
//! assert_eq!(counter, 2_598_960);
//! ```
//!
//! to draw a random 5-cards hand:
//!
//! ```
//! # use fivecard_cards::Deck;
//! let hand = Deck::default().sample(&mut rand::rng(), 5);
//! assert_eq!(hand.len(), 5);
//! ```
//!
//! Parallel iteration and sampling use a given number of tasks, the closure
//! `task_id` can be used to store per task data to reduce contention. The
//! following uses 4 tasks to draw 10 reproducible 5-cards samples:
//!
//! ```
//! # use std::sync::atomic;
//! # use fivecard_cards::Deck;
//! let counter = atomic::AtomicU64::new(0);
//! Deck::default().par_sample(4, 10, 5, Some(42), |task_id, hand| {
//!     assert_eq!(hand.len(), 5);
//!     counter.fetch_add(1, atomic::Ordering::Relaxed);
//! });
//! assert_eq!(counter.load(atomic::Ordering::Relaxed), 10);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, InvalidCardCodeError, Rank, Suit, parse_cards};

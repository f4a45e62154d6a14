// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Fivecard hand classifier.
//!
//! Classifies the five cards hand made of the two dealer cards and the three
//! cards of a player into one of ten payout [Category]s. Only tens or higher
//! count for pairs, three and four of a kind, and flushes and straights win
//! over any pair hand:
//!
//! ```
//! # use fivecard_eval::*;
//! let dealer = parse_cards("AS TS").unwrap();
//! let player = parse_cards("AD AC TH").unwrap();
//! assert_eq!(score(&dealer, &player), Ok(Category::FullHouse));
//!
//! let dealer = parse_cards("7S 7D").unwrap();
//! let player = parse_cards("8C 8H 2D").unwrap();
//! assert_eq!(score(&dealer, &player), Ok(Category::NoPayout));
//! ```
//!
//! The category depends only on the combined cards, a [Hand] can also be
//! built directly from five cards and classified with [classify].
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod category;
pub use category::{Category, UnknownCategoryError};

pub mod classify;
pub use classify::{Hand, HighRankCounts, InvalidHandError, classify, score};

// Reexport cards types.
pub use fivecard_cards::{Card, Deck, InvalidCardCodeError, Rank, Suit, parse_cards};

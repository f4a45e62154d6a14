// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Five cards hand classifier.
//!
//! A hand is classified by computing all the predicates the categories are
//! built from, flush, straight, all high cards and the high ranks frequencies,
//! and then walking a precedence table from the strongest category to the
//! weakest, the first category whose predicate holds is the hand category.
//!
//! Only high ranks, ten to ace, count for pairs, three and four of a kind, and
//! the ace only ranks high, so that A-2-3-4-5 is not a straight.
use thiserror::Error;

use crate::{Card, Category, Rank, Suit};

/// Error returned for a malformed hand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidHandError {
    /// The hand doesn't have five cards.
    #[error("a hand must have {size} cards, got {0}", size = Hand::SIZE)]
    Size(usize),
    /// The hand contains the same card twice.
    #[error("duplicate card {0} in hand")]
    Duplicate(Card),
}

/// A five distinct cards hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hand {
    cards: [Card; Hand::SIZE],
}

impl Hand {
    /// The number of cards in a hand.
    pub const SIZE: usize = 5;

    /// Creates a hand from five distinct cards.
    pub fn new(cards: &[Card]) -> Result<Self, InvalidHandError> {
        let cards: [Card; Self::SIZE] = cards
            .try_into()
            .map_err(|_| InvalidHandError::Size(cards.len()))?;

        let mut seen = 0u64;
        for card in cards {
            if seen & card.mask() != 0 {
                return Err(InvalidHandError::Duplicate(card));
            }

            seen |= card.mask();
        }

        Ok(Self { cards })
    }

    /// Creates a hand combining the dealer and a player cards.
    pub fn from_parts(dealer: &[Card], player: &[Card]) -> Result<Self, InvalidHandError> {
        let len = dealer.len() + player.len();
        if len != Self::SIZE {
            return Err(InvalidHandError::Size(len));
        }

        let mut cards = [Card::new(Rank::Deuce, Suit::Clubs); Self::SIZE];
        for (slot, card) in cards.iter_mut().zip(dealer.iter().chain(player)) {
            *slot = *card;
        }

        Self::new(&cards)
    }

    /// The hand cards.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Checks if all cards have the same suit.
    pub fn is_flush(&self) -> bool {
        let suit = self.cards[0].suit();
        self.cards.iter().all(|c| c.suit() == suit)
    }

    /// Checks if the cards ranks are consecutive, the ace ranks high only.
    pub fn is_straight(&self) -> bool {
        let ranks = self
            .cards
            .iter()
            .fold(0u16, |bits, c| bits | (1u16 << c.rank().value()));

        // Five distinct ranks with no gaps.
        ranks.count_ones() == 5 && ranks >> ranks.trailing_zeros() == 0b11111
    }

    /// Checks if all cards are tens or higher.
    pub fn is_all_high_cards(&self) -> bool {
        self.cards.iter().all(|c| c.rank().is_high())
    }

    /// Counts the groups of same rank high cards.
    pub fn high_rank_counts(&self) -> HighRankCounts {
        HighRankCounts::new(&self.cards)
    }

    /// Returns the strongest category this hand qualifies for.
    pub fn category(&self) -> Category {
        let predicates = Predicates {
            flush: self.is_flush(),
            straight: self.is_straight(),
            all_high: self.is_all_high_cards(),
            counts: self.high_rank_counts(),
        };

        PRECEDENCE
            .iter()
            .find(|(_, matches)| matches(&predicates))
            .map_or(Category::NoPayout, |&(category, _)| category)
    }
}

/// How many high ranks appear two, three and four times in a hand.
///
/// Ranks below ten are ignored, so that a hand with two sevens and two eights
/// has no pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighRankCounts {
    pairs: u8,
    trips: u8,
    quads: u8,
}

impl HighRankCounts {
    /// Computes the high ranks frequencies for the given cards.
    pub fn new(cards: &[Card]) -> Self {
        let mut by_rank = [0u8; Rank::COUNT as usize];
        for card in cards.iter().filter(|c| c.rank().is_high()) {
            by_rank[card.rank().value() as usize] += 1;
        }

        by_rank
            .into_iter()
            .fold(Self::default(), |mut counts, n| {
                match n {
                    2 => counts.pairs += 1,
                    3 => counts.trips += 1,
                    4 => counts.quads += 1,
                    _ => {}
                }
                counts
            })
    }

    /// Number of high ranks that appear exactly twice.
    pub fn pairs(&self) -> u8 {
        self.pairs
    }

    /// Number of high ranks that appear exactly three times.
    pub fn trips(&self) -> u8 {
        self.trips
    }

    /// Number of high ranks that appear exactly four times.
    pub fn quads(&self) -> u8 {
        self.quads
    }
}

/// The predicates results for a hand.
#[derive(Debug)]
struct Predicates {
    flush: bool,
    straight: bool,
    all_high: bool,
    counts: HighRankCounts,
}

/// Categories from the strongest to the weakest with their predicate,
/// [Category::NoPayout] is the fallback when nothing matches.
const PRECEDENCE: [(Category, fn(&Predicates) -> bool); Category::COUNT - 1] = [
    (Category::RoyalFlush, |p| p.flush && p.all_high),
    (Category::StraightFlush, |p| p.flush && p.straight),
    (Category::Flush, |p| p.flush),
    (Category::Straight, |p| p.straight),
    (Category::FullHouse, |p| p.counts.trips > 0 && p.counts.pairs > 0),
    (Category::FourOfAKind, |p| p.counts.quads > 0),
    (Category::ThreeOfAKind, |p| p.counts.trips > 0),
    (Category::TwoPair, |p| p.counts.pairs == 2),
    (Category::Pair, |p| p.counts.pairs == 1),
];

/// Classifies a five cards hand.
///
/// ```
/// # use fivecard_eval::*;
/// let cards = parse_cards("TC JC QC KC AC").unwrap();
/// assert_eq!(classify(&cards), Ok(Category::RoyalFlush));
/// assert!(classify(&cards[..4]).is_err());
/// ```
pub fn classify(cards: &[Card]) -> Result<Category, InvalidHandError> {
    Hand::new(cards).map(|hand| hand.category())
}

/// Classifies the hand made of the dealer and a player cards.
///
/// ```
/// # use fivecard_eval::*;
/// let dealer = parse_cards("4C JH").unwrap();
/// let player = parse_cards("2H 3S JD").unwrap();
/// assert_eq!(score(&dealer, &player), Ok(Category::Pair));
/// ```
pub fn score(dealer: &[Card], player: &[Card]) -> Result<Category, InvalidHandError> {
    Hand::from_parts(dealer, player).map(|hand| hand.category())
}

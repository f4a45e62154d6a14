// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! The cards dealt in a simulated game.
use rand::Rng;

use fivecard_eval::{Card, Category, Deck, Hand, InvalidHandError};

/// The cards dealt in a game, two dealer cards shared by all players and three
/// cards for each player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    dealer: [Card; Deal::DEALER_CARDS],
    players: Vec<[Card; Deal::PLAYER_CARDS]>,
}

impl Deal {
    /// Number of dealer cards.
    pub const DEALER_CARDS: usize = 2;

    /// Number of cards for each player.
    pub const PLAYER_CARDS: usize = 3;

    /// Max number of players that can be dealt from one deck.
    pub const MAX_PLAYERS: usize = (Deck::SIZE - Self::DEALER_CARDS) / Self::PLAYER_CARDS;

    /// Creates a deal from the dealer and players cards.
    pub fn new(
        dealer: [Card; Self::DEALER_CARDS],
        players: Vec<[Card; Self::PLAYER_CARDS]>,
    ) -> Self {
        Self { dealer, players }
    }

    /// Number of cards needed to deal a game to `players` players.
    pub fn sample_size(players: usize) -> usize {
        Self::DEALER_CARDS + Self::PLAYER_CARDS * players
    }

    /// Splits sampled cards into a deal, the dealer gets the first two cards
    /// and each player the following three.
    ///
    /// Panics if the sample size doesn't match the number of players.
    pub fn from_sample(sample: &[Card], players: usize) -> Self {
        assert_eq!(sample.len(), Self::sample_size(players), "players={players}");

        let (dealer, rest) = sample.split_at(Self::DEALER_CARDS);
        let players = rest
            .chunks_exact(Self::PLAYER_CARDS)
            .map(|c| [c[0], c[1], c[2]])
            .collect();

        Self {
            dealer: [dealer[0], dealer[1]],
            players,
        }
    }

    /// Deals a game drawing cards from the given deck.
    pub fn sample<R: Rng>(deck: &Deck, rng: &mut R, players: usize) -> Self {
        let sample = deck.sample(rng, Self::sample_size(players));
        Self::from_sample(&sample, players)
    }

    /// The dealer cards.
    pub fn dealer(&self) -> &[Card] {
        &self.dealer
    }

    /// The players cards.
    pub fn players(&self) -> &[[Card; Self::PLAYER_CARDS]] {
        &self.players
    }

    /// The combined hand of each player.
    pub fn hands(&self) -> impl Iterator<Item = Result<Hand, InvalidHandError>> + '_ {
        self.players
            .iter()
            .map(|player| Hand::from_parts(&self.dealer, player))
    }

    /// Classifies each player combined hand.
    pub fn results(&self) -> Result<Vec<Category>, InvalidHandError> {
        self.hands()
            .map(|hand| hand.map(|hand| hand.category()))
            .collect()
    }
}

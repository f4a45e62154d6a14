// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cards and deck definitions.
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

mod parallel;

/// Error returned when parsing a malformed card code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidCardCodeError {
    /// The code is not made of exactly two characters.
    #[error("invalid card code {0:?}, expected a rank and a suit character")]
    Length(String),
    /// Unknown rank character.
    #[error("invalid rank character {0:?}")]
    Rank(char),
    /// Unknown suit character.
    #[error("invalid suit character {0:?}")]
    Suit(char),
}

/// A Poker card.
///
/// A card is stored as a dense index in `0..52` with the suit in the high part
/// and the rank in the low part:
///
/// ```text
///   id = suit * 13 + rank
///   rank = rank of card (deuce=0,trey=1,four=2,five=3,...,ace=12)
///   suit = suit of card (clubs=0,diamonds=1,hearts=2,spades=3)
/// ```
///
/// so that the cards in a [Deck::default] deck have the same id as their
/// position, and a set of cards fits in a `u64` bit mask.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Card(u8);

impl Card {
    /// Create a card given a rank and suit.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Self(suit as u8 * Rank::COUNT + rank as u8)
    }

    /// This card unique id in `0..52`.
    #[inline]
    pub fn id(&self) -> u8 {
        self.0
    }

    /// A bit mask with only this card bit set.
    #[inline]
    pub fn mask(&self) -> u64 {
        1 << self.0
    }

    /// Returns the card rank.
    #[inline]
    pub fn rank(&self) -> Rank {
        Rank::ALL[(self.0 % Rank::COUNT) as usize]
    }

    /// Returns the card suit.
    #[inline]
    pub fn suit(&self) -> Suit {
        Suit::ALL[(self.0 / Rank::COUNT) as usize]
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank(), self.suit())
    }
}

impl FromStr for Card {
    type Err = InvalidCardCodeError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let mut chars = code.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(rank), Some(suit), None) => {
                Ok(Card::new(Rank::try_from(rank)?, Suit::try_from(suit)?))
            }
            _ => Err(InvalidCardCodeError::Length(code.to_string())),
        }
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

impl TryFrom<String> for Card {
    type Error = InvalidCardCodeError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        code.parse()
    }
}

/// Parses a list of card codes separated by whitespace or commas.
///
/// ```
/// # use fivecard_cards::{parse_cards, Card, Rank, Suit};
/// assert!(parse_cards("AC, TD 2h").is_err());
///
/// let cards = parse_cards("AC, TD 2H").unwrap();
/// assert_eq!(cards[1], Card::new(Rank::Ten, Suit::Diamonds));
/// ```
pub fn parse_cards(codes: &str) -> Result<Vec<Card>, InvalidCardCodeError> {
    codes
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|code| !code.is_empty())
        .map(str::parse)
        .collect()
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    /// Deuce
    Deuce = 0,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    /// The number of ranks.
    pub const COUNT: u8 = 13;

    const ALL: [Rank; 13] = {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
    };

    /// Returns all ranks from deuce to ace.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        Self::ALL.into_iter()
    }

    /// The rank value, deuce is 0 and ace is 12.
    #[inline]
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Checks if this is a ten or a face card or an ace.
    #[inline]
    pub fn is_high(&self) -> bool {
        *self >= Rank::Ten
    }
}

impl TryFrom<char> for Rank {
    type Error = InvalidCardCodeError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let rank = match c {
            '2' => Rank::Deuce,
            '3' => Rank::Trey,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            _ => return Err(InvalidCardCodeError::Rank(c)),
        };

        Ok(rank)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
            Rank::Deuce => '2',
            Rank::Trey => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        };

        write!(f, "{rank}")
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    /// Clubs suit.
    Clubs = 0,
    /// Diamonds suit.
    Diamonds,
    /// Hearts suit.
    Hearts,
    /// Spades suit.
    Spades,
}

impl Suit {
    /// The number of suits.
    pub const COUNT: u8 = 4;

    const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        Self::ALL.into_iter()
    }
}

impl TryFrom<char> for Suit {
    type Error = InvalidCardCodeError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'C' => Ok(Suit::Clubs),
            'D' => Ok(Suit::Diamonds),
            'H' => Ok(Suit::Hearts),
            'S' => Ok(Suit::Spades),
            _ => Err(InvalidCardCodeError::Suit(c)),
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        };

        write!(f, "{suit}")
    }
}

/// A cards Deck
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// Creates a new shuffled deck.
    pub fn new_and_shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut deck = Self::default();
        deck.cards.shuffle(rng);
        deck
    }

    /// Deals a card from the deck.
    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards in the deck.
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// The cards left in the deck.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Removes a card from the deck.
    pub fn remove(&mut self, card: Card) {
        self.cards.retain(|c| c != &card);
    }

    /// Draws k distinct cards at random, the deck is left unchanged.
    ///
    /// Panics if k is larger than the number of cards in the deck.
    pub fn sample<R: Rng>(&self, rng: &mut R, k: usize) -> Vec<Card> {
        assert!(k <= self.cards.len(), "k={k} > {}", self.cards.len());

        let mut cards = self.cards.clone();
        let (sample, _) = cards.partial_shuffle(rng, k);
        sample.to_vec()
    }

    /// Calls the `f` closure for each k-cards hand.
    ///
    /// Panics if k is not 2 <= k <= 7.
    pub fn for_each<F>(&self, k: usize, mut f: F)
    where
        F: FnMut(&[Card]),
    {
        assert!((2..=7).contains(&k), "2 <= k <= 7");

        if k > self.cards.len() {
            return;
        }

        let mut hand = Vec::with_capacity(k);
        self.visit(0, k, &mut hand, &mut f);
    }

    /// Extends `hand` with every combination of cards from position `start`
    /// until it has k cards.
    fn visit<F>(&self, start: usize, k: usize, hand: &mut Vec<Card>, f: &mut F)
    where
        F: FnMut(&[Card]),
    {
        if hand.len() == k {
            f(&hand[..]);
            return;
        }

        let last = self.cards.len() - (k - hand.len());
        for pos in start..=last {
            hand.push(self.cards[pos]);
            self.visit(pos + 1, k, hand, f);
            hand.pop();
        }
    }
}

impl Default for Deck {
    fn default() -> Self {
        let cards = Suit::suits()
            .flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s)))
            .collect::<Vec<_>>();
        Self { cards }
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;

    #[test]
    fn card_encoding() {
        let mut ids = HashSet::default();
        let mut deck = Deck::new_and_shuffled(&mut rand::rng());

        while let Some(card) = deck.deal() {
            assert!(card.id() < Deck::SIZE as u8);
            assert_eq!(Card::new(card.rank(), card.suit()), card);
            ids.insert(card.id());
        }

        // Check uniqueness.
        assert_eq!(ids.len(), Deck::SIZE);

        // Default deck order matches ids.
        for (pos, card) in Deck::default().into_iter().enumerate() {
            assert_eq!(card.id() as usize, pos);
        }

        let kd = Card::new(Rank::King, Suit::Diamonds);
        assert_eq!(kd.rank(), Rank::King);
        assert_eq!(kd.suit(), Suit::Diamonds);
        assert_eq!(kd.mask(), 1 << 24);
    }

    #[test]
    fn card_to_string() {
        let c = Card::new(Rank::King, Suit::Diamonds);
        assert_eq!(c.to_string(), "KD");

        let c = Card::new(Rank::Five, Suit::Spades);
        assert_eq!(c.to_string(), "5S");

        let c = Card::new(Rank::Ten, Suit::Hearts);
        assert_eq!(c.to_string(), "TH");

        let c = Card::new(Rank::Ace, Suit::Clubs);
        assert_eq!(c.to_string(), "AC");
        assert_eq!(format!("{c:?}"), "Card(AC)");
    }

    #[test]
    fn card_from_string() {
        for card in Deck::default() {
            let code = card.to_string();
            assert_eq!(code.parse::<Card>(), Ok(card));
        }

        assert_eq!(
            "JC".parse::<Card>(),
            Ok(Card::new(Rank::Jack, Suit::Clubs))
        );
        assert_eq!("1C".parse::<Card>(), Err(InvalidCardCodeError::Rank('1')));
        assert_eq!("tc".parse::<Card>(), Err(InvalidCardCodeError::Rank('t')));
        assert_eq!("TX".parse::<Card>(), Err(InvalidCardCodeError::Suit('X')));
        assert_eq!("Th".parse::<Card>(), Err(InvalidCardCodeError::Suit('h')));
        assert!(matches!(
            "10C".parse::<Card>(),
            Err(InvalidCardCodeError::Length(_))
        ));
        assert!(matches!(
            "A".parse::<Card>(),
            Err(InvalidCardCodeError::Length(_))
        ));
        assert!(matches!(
            "".parse::<Card>(),
            Err(InvalidCardCodeError::Length(_))
        ));
    }

    #[test]
    fn parse_card_list() {
        let cards = parse_cards("TC JC,QC\tKC , AC").unwrap();
        assert_eq!(cards.len(), 5);
        assert!(cards.iter().all(|c| c.suit() == Suit::Clubs));
        assert_eq!(cards[4].rank(), Rank::Ace);

        assert!(parse_cards("").unwrap().is_empty());
        assert_eq!(parse_cards("AC ZZ"), Err(InvalidCardCodeError::Rank('Z')));
    }

    #[test]
    fn card_serde() {
        let card = Card::new(Rank::Queen, Suit::Hearts);
        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(json, "\"QH\"");
        assert_eq!(serde_json::from_str::<Card>(&json).unwrap(), card);
        assert!(serde_json::from_str::<Card>("\"QX\"").is_err());
    }

    #[test]
    fn rank_values() {
        let values = Rank::ranks().map(|r| r.value()).collect::<Vec<_>>();
        assert_eq!(values, (0..13).collect::<Vec<_>>());

        let high = Rank::ranks().filter(Rank::is_high).collect::<Vec<_>>();
        assert_eq!(
            high,
            [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace]
        );
    }

    #[test]
    fn deck_sample() {
        let deck = Deck::default();
        let mut rng = SmallRng::seed_from_u64(42);

        for _ in 0..1000 {
            let sample = deck.sample(&mut rng, 17);
            assert_eq!(sample.len(), 17);

            let unique = sample.iter().copied().collect::<HashSet<_>>();
            assert_eq!(unique.len(), 17);
        }

        assert_eq!(deck.count(), Deck::SIZE);

        // Same seed same sample.
        let s1 = deck.sample(&mut SmallRng::seed_from_u64(7), 5);
        let s2 = deck.sample(&mut SmallRng::seed_from_u64(7), 5);
        assert_eq!(s1, s2);

        // Whole deck.
        let all = deck.sample(&mut rng, Deck::SIZE);
        assert_eq!(all.into_iter().collect::<HashSet<_>>().len(), Deck::SIZE);
    }

    #[test]
    #[should_panic]
    fn deck_sample_too_many() {
        let mut deck = Deck::default();
        deck.remove(Card::new(Rank::Ace, Suit::Spades));
        deck.sample(&mut rand::rng(), Deck::SIZE);
    }

    #[test]
    fn deck_for_each() {
        let deck = Deck::default();
        assert_eq!(deck.count(), Deck::SIZE);

        let mut hands = HashSet::default();
        deck.for_each(5, |cards| {
            assert_eq!(cards.len(), 5);
            hands.insert(cards.to_owned());
        });
        assert_eq!(hands.len(), 2_598_960);

        hands.clear();
        deck.for_each(2, |cards| {
            assert_eq!(cards.len(), 2);
            hands.insert(cards.to_owned());
        });
        assert_eq!(hands.len(), 1_326);

        hands.clear();
        deck.for_each(3, |cards| {
            assert_eq!(cards.len(), 3);
            hands.insert(cards.to_owned());
        });
        assert_eq!(hands.len(), 22_100);
    }

    #[test]
    fn deck_for_each_remove() {
        let mut deck = Deck::default();
        deck.remove(Card::new(Rank::Ace, Suit::Diamonds));
        deck.remove(Card::new(Rank::King, Suit::Diamonds));

        let mut count = 0;
        deck.for_each(5, |cards| {
            assert!(!cards.contains(&Card::new(Rank::Ace, Suit::Diamonds)));
            count += 1;
        });
        assert_eq!(count, 2_118_760);

        // Not enough cards.
        let mut deck = Deck::default();
        while deck.count() > 4 {
            deck.deal();
        }

        let mut count = 0;
        deck.for_each(5, |_| count += 1);
        assert_eq!(count, 0);
    }
}

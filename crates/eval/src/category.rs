// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand payout categories.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Error returned when parsing an unknown category tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category {0:?}")]
pub struct UnknownCategoryError(String);

/// The payout category of a combined hand.
///
/// Categories are ordered from the weakest to the strongest, a classified hand
/// always gets the strongest category it qualifies for:
///
/// ```
/// # use fivecard_eval::Category;
/// assert!(Category::RoyalFlush > Category::StraightFlush);
/// assert!(Category::Straight > Category::FullHouse);
/// assert_eq!(Category::ALL.iter().max(), Some(&Category::RoyalFlush));
/// ```
///
/// Categories are serialized using their tag, see [Category::tag].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "&'static str", try_from = "String")]
pub enum Category {
    /// No winning combination.
    NoPayout = 0,
    /// One pair of high cards.
    Pair,
    /// Two pairs of high cards.
    TwoPair,
    /// Three high cards of the same rank.
    ThreeOfAKind,
    /// Four high cards of the same rank.
    FourOfAKind,
    /// Three and two high cards of the same rank.
    FullHouse,
    /// Five consecutive ranks.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Five consecutive ranks of the same suit.
    StraightFlush,
    /// Ten to ace of the same suit.
    RoyalFlush,
}

impl Category {
    /// The number of categories.
    pub const COUNT: usize = 10;

    /// All the categories from the weakest to the strongest.
    pub const ALL: [Category; Self::COUNT] = [
        Category::NoPayout,
        Category::Pair,
        Category::TwoPair,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::Straight,
        Category::Flush,
        Category::StraightFlush,
        Category::RoyalFlush,
    ];

    /// The position of this category in [Category::ALL].
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The canonical tag used to persist this category.
    pub fn tag(&self) -> &'static str {
        match self {
            Category::NoPayout => "no-payout",
            Category::Pair => "1-pair",
            Category::TwoPair => "2-pair",
            Category::ThreeOfAKind => "3-of-a-kind",
            Category::FourOfAKind => "4-of-a-kind",
            Category::FullHouse => "full-house",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::StraightFlush => "straight-flush",
            Category::RoyalFlush => "royal-flush",
        }
    }

    /// Checks if this category pays out.
    pub fn is_payout(&self) -> bool {
        *self != Category::NoPayout
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.tag())
    }
}

impl FromStr for Category {
    type Err = UnknownCategoryError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.tag() == tag)
            .ok_or_else(|| UnknownCategoryError(tag.to_string()))
    }
}

impl From<Category> for &'static str {
    fn from(category: Category) -> Self {
        category.tag()
    }
}

impl TryFrom<String> for Category {
    type Error = UnknownCategoryError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        tag.parse()
    }
}

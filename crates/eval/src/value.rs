// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand strength values.
use serde::{Deserialize, Serialize};

/// A poker hand category, from the weakest to the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum HandRank {
    /// No matching cards.
    HighCard = 1,
    /// Two cards of the same rank.
    OnePair,
    /// Two different pairs.
    TwoPair,
    /// Three cards of the same rank.
    ThreeOfAKind,
    /// Five ranks in a sequence.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of one rank and two of another.
    FullHouse,
    /// Four cards of the same rank.
    FourOfAKind,
    /// Five ranks in a sequence all of the same suit.
    StraightFlush,
}

impl HandRank {
    /// Returns all hand ranks from the weakest to the strongest.
    pub fn ranks() -> impl DoubleEndedIterator<Item = HandRank> {
        use HandRank::*;
        [
            HighCard,
            OnePair,
            TwoPair,
            ThreeOfAKind,
            Straight,
            Flush,
            FullHouse,
            FourOfAKind,
            StraightFlush,
        ]
        .into_iter()
    }
}

/// A hand strength value.
///
/// The high 6 bits store the [HandRank] and the low 26 bits a tiebreaker
/// specific to the rank, so that comparing two values compares the hands:
///
/// ```text
///   HighCard, Flush          5 ranks mask
///   OnePair                  (pair << 13) | 3 kickers mask
///   TwoPair                  (high pair << 8) | (low pair << 4) | kicker
///   ThreeOfAKind             (trips << 13) | 2 kickers mask
///   FullHouse                (trips << 13) | pair
///   FourOfAKind              (quads << 13) | kicker
///   Straight, StraightFlush  1 (five high) ..= 10 (ace high)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HandValue(u32);

impl HandValue {
    const RANK_SHIFT: u32 = 26;
    const TIEBREAK_MASK: u32 = (1 << Self::RANK_SHIFT) - 1;

    /// A value lower than any hand value, used for empty table slots.
    pub(crate) const NONE: HandValue = HandValue(0);

    /// Creates a value for a rank and a tiebreaker.
    #[inline]
    pub const fn new(rank: HandRank, tiebreak: u32) -> Self {
        debug_assert!(tiebreak <= Self::TIEBREAK_MASK);
        Self(((rank as u32) << Self::RANK_SHIFT) | tiebreak)
    }

    /// The hand rank.
    pub fn rank(&self) -> HandRank {
        match self.0 >> Self::RANK_SHIFT {
            1 => HandRank::HighCard,
            2 => HandRank::OnePair,
            3 => HandRank::TwoPair,
            4 => HandRank::ThreeOfAKind,
            5 => HandRank::Straight,
            6 => HandRank::Flush,
            7 => HandRank::FullHouse,
            8 => HandRank::FourOfAKind,
            9 => HandRank::StraightFlush,
            _ => panic!("Invalid hand value 0x{:x}", self.0),
        }
    }

    /// The tiebreaker within the hand rank.
    pub fn tiebreak(&self) -> u32 {
        self.0 & Self::TIEBREAK_MASK
    }

    /// The raw 32 bits value.
    pub fn value(&self) -> u32 {
        self.0
    }
}

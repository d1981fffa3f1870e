// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker cards definitions.
use anyhow::{Result, anyhow, bail};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Primes used to encode a card rank, `PRIMES[r]` is the prime for rank `r`.
///
/// The product of five of these identifies a multiset of five ranks, so
/// lookup tables keyed by products must be built with the same primes.
pub const PRIMES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

/// A Poker card.
///
/// A card is represented using the low half of the encoding in the
/// [Cactus Kev's][kevlink] Poker hand evaluator:
///
/// ```text
///   +--------+--------+
///   |cdhsrrrr|pppppppp|
///   +--------+--------+
///   p = prime number of rank (deuce=2,trey=3,four=5,five=7,...,ace=41)
///   r = rank of card (deuce=0,trey=1,four=2,five=3,...,ace=12)
///   cdhs = suit of card, exactly one bit set
/// ```
///
/// [kevlink]: http://suffe.cool/poker/evaluator.html
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card(u32);

/// Creates a card from a rank in `0..=12` and a one-hot suit in `{1, 2, 4, 8}`.
///
/// Inputs out of range produce a malformed card, they are only checked in
/// debug builds.
pub const fn make_card(rank: u32, suit: u32) -> Card {
    debug_assert!(rank < 13, "rank must be 0 <= rank <= 12");
    debug_assert!(suit.is_power_of_two() && suit <= 8, "suit must be one-hot");
    Card(PRIMES[rank as usize] | (rank << 8) | (suit << 12))
}

/// Returns all the 52 cards, clubs first then diamonds, hearts, and spades,
/// each suit from Deuce to Ace.
pub const fn make_deck() -> [Card; Deck::SIZE] {
    let mut cards = [Card(0); Deck::SIZE];
    let mut idx = 0;
    while idx < Deck::SIZE {
        cards[idx] = make_card((idx % 13) as u32, 8 >> (idx / 13));
        idx += 1;
    }

    cards
}

impl Card {
    /// Create a card given a suit and rank.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        make_card(rank as u32, suit as u32)
    }

    /// This card unique id.
    pub fn id(&self) -> u32 {
        self.0
    }

    /// Returns the rank prime.
    #[inline]
    pub fn prime(&self) -> u32 {
        self.0 & 0xff
    }

    /// Returns the rank bits.
    #[inline]
    pub fn rank_bits(&self) -> u8 {
        ((self.0 >> 8) & 0xf) as u8
    }

    /// Returns the suit bits.
    #[inline]
    pub fn suit_bits(&self) -> u8 {
        ((self.0 >> 12) & 0xf) as u8
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        match self.suit_bits() {
            0x8 => Suit::Clubs,
            0x4 => Suit::Diamonds,
            0x2 => Suit::Hearts,
            0x1 => Suit::Spades,
            _ => panic!("Invalid suit value 0x{:x}", self.0),
        }
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        Rank::ranks()
            .nth(self.rank_bits() as usize)
            .unwrap_or_else(|| panic!("Invalid rank 0x{:x}", self.0))
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
    type Err = anyhow::Error;

    /// Parses a card from its rank and suit characters, i.e. "AS" or "th".
    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        let (Some(rc), Some(sc), None) = (chars.next(), chars.next(), chars.next()) else {
            bail!("Invalid card {s:?}, expected rank and suit");
        };

        let rank = Rank::ranks()
            .find(|rank| rank.to_string().eq_ignore_ascii_case(&rc.to_string()))
            .ok_or_else(|| anyhow!("Invalid rank {rc:?}"))?;

        let suit = Suit::suits()
            .find(|suit| suit.to_string().eq_ignore_ascii_case(&sc.to_string()))
            .ok_or_else(|| anyhow!("Invalid suit {sc:?}"))?;

        Ok(Card::new(rank, suit))
    }
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
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
    /// Returns all ranks from Deuce to Ace.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
        .into_iter()
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const CHARS: &[u8; 13] = b"23456789TJQKA";
        write!(f, "{}", CHARS[*self as usize] as char)
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Suit {
    /// Clubs suit.
    Clubs = 8,
    /// Diamonds suit.
    Diamonds = 4,
    /// Hearts suit.
    Hearts = 2,
    /// Spades suit.
    Spades = 1,
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

impl Suit {
    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades].into_iter()
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

    /// Deals a card from the deck, returns `None` if the deck is empty.
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

    /// Removes a card from the deck.
    pub fn remove(&mut self, card: Card) {
        self.cards.retain(|c| c != &card);
    }

    /// Calls the `f` closure for each k-cards hand.
    ///
    /// Hands are generated in lexicographic order of the cards positions.
    ///
    /// Panics if k is not 1 <= k <= 7.
    pub fn for_each<F>(&self, k: usize, mut f: F)
    where
        F: FnMut(&[Card]),
    {
        assert!((1..=7).contains(&k), "1 <= k <= 7");

        let n = self.cards.len();
        if k > n {
            return;
        }

        let mut pos = [0, 1, 2, 3, 4, 5, 6];
        let mut hand = [self.cards[0]; 7];

        loop {
            for (c, &p) in hand.iter_mut().zip(&pos[..k]) {
                *c = self.cards[p];
            }

            f(&hand[..k]);

            // Find the rightmost position that can still move right.
            let mut i = k;
            loop {
                if i == 0 {
                    return;
                }

                i -= 1;
                if pos[i] < n - k + i {
                    break;
                }
            }

            pos[i] += 1;
            for j in (i + 1)..k {
                pos[j] = pos[j - 1] + 1;
            }
        }
    }

    /// Calls the `f` closure for `samples` random k-cards hands.
    ///
    /// Panics if k is not 1 <= k <= 7.
    pub fn sample<F>(&self, samples: usize, k: usize, mut f: F)
    where
        F: FnMut(&[Card]),
    {
        assert!((1..=7).contains(&k), "1 <= k <= 7");

        if k > self.cards.len() {
            return;
        }

        let mut rng = SmallRng::from_os_rng();
        let mut hand = Vec::with_capacity(k);

        for _ in 0..samples {
            hand.clear();
            hand.extend(self.cards.choose_multiple(&mut rng, k).copied());
            f(&hand);
        }
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self {
            cards: make_deck().to_vec(),
        }
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
        let mut cards = HashSet::default();
        let mut deck = Deck::new_and_shuffled(&mut rand::rng());

        while let Some(card) = deck.deal() {
            assert_eq!(card.prime(), PRIMES[card.rank() as usize]);
            assert_eq!(card.rank_bits() as u32, card.rank() as u32);
            assert_eq!(card.suit_bits() as u32, card.suit() as u32);
            assert_eq!(card.suit_bits().count_ones(), 1);
            assert_eq!(card.id() >> 16, 0);
            cards.insert(card.id());
        }

        // Check uniquness.
        assert_eq!(cards.len(), Deck::SIZE);

        // Low 16 bits of the Cactus Kev's website examples.
        let kd = Card::new(Rank::King, Suit::Diamonds);
        assert_eq!(kd.id(), 0x4b25);

        let fs = Card::new(Rank::Five, Suit::Spades);
        assert_eq!(fs.id(), 0x1307);

        let jc = Card::new(Rank::Jack, Suit::Clubs);
        assert_eq!(jc.id(), 0x891d);
    }

    #[test]
    fn make_card_matches_new() {
        for suit in Suit::suits() {
            for rank in Rank::ranks() {
                let card = make_card(rank as u32, suit as u32);
                assert_eq!(card, Card::new(rank, suit));
                assert_eq!(card.rank(), rank);
                assert_eq!(card.suit(), suit);
            }
        }
    }

    #[test]
    fn deck_order() {
        let deck = make_deck();
        assert_eq!(deck[0], Card::new(Rank::Deuce, Suit::Clubs));
        assert_eq!(deck[12], Card::new(Rank::Ace, Suit::Clubs));
        assert_eq!(deck[13], Card::new(Rank::Deuce, Suit::Diamonds));
        assert_eq!(deck[51], Card::new(Rank::Ace, Suit::Spades));

        let ids = deck.iter().map(|c| c.id()).collect::<HashSet<_>>();
        assert_eq!(ids.len(), Deck::SIZE);
    }

    #[test]
    fn card_to_string() {
        let c = Card::new(Rank::King, Suit::Diamonds);
        assert_eq!(c.to_string(), "KD");

        let c = Card::new(Rank::Five, Suit::Spades);
        assert_eq!(c.to_string(), "5S");

        let c = Card::new(Rank::Jack, Suit::Clubs);
        assert_eq!(c.to_string(), "JC");

        let c = Card::new(Rank::Ten, Suit::Hearts);
        assert_eq!(c.to_string(), "TH");

        let c = Card::new(Rank::Ace, Suit::Hearts);
        assert_eq!(c.to_string(), "AH");
    }

    #[test]
    fn card_from_string() {
        for card in make_deck() {
            assert_eq!(card.to_string().parse::<Card>().unwrap(), card);
            assert_eq!(
                card.to_string().to_lowercase().parse::<Card>().unwrap(),
                card
            );
        }

        assert!("".parse::<Card>().is_err());
        assert!("A".parse::<Card>().is_err());
        assert!("ASX".parse::<Card>().is_err());
        assert!("1S".parse::<Card>().is_err());
        assert!("AX".parse::<Card>().is_err());
    }

    #[test]
    fn deck_deal() {
        let mut deck = Deck::default();
        assert_eq!(deck.count(), Deck::SIZE);

        let mut dealt = HashSet::default();
        while let Some(card) = deck.deal() {
            dealt.insert(card);
        }

        assert!(deck.is_empty());
        assert!(deck.deal().is_none());
        assert_eq!(dealt.len(), Deck::SIZE);
    }

    #[test]
    fn deck_for_each() {
        let deck = Deck::default();

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

        let mut count = 0;
        deck.for_each(1, |_| count += 1);
        assert_eq!(count, Deck::SIZE);
    }

    #[test]
    fn deck_for_each_small_deck() {
        let mut deck = Deck::default();
        for card in make_deck().into_iter().skip(7) {
            deck.remove(card);
        }
        assert_eq!(deck.count(), 7);

        let mut hands = Vec::new();
        deck.for_each(5, |cards| hands.push(cards.to_owned()));
        assert_eq!(hands.len(), 21);

        // Distinct cards in each hand.
        for hand in &hands {
            assert_eq!(hand.iter().collect::<HashSet<_>>().len(), 5);
        }

        let mut count = 0;
        deck.for_each(7, |_| count += 1);
        assert_eq!(count, 1);

        deck.remove(make_deck()[0]);
        count = 0;
        deck.for_each(7, |_| count += 1);
        assert_eq!(count, 0);
    }

    // Goes through 133M hands, slow in debug mode.
    #[test]
    #[ignore]
    fn deck_for_each_7cards() {
        let mut deck = Deck::default();

        let mut count = 0;
        deck.for_each(7, |cards| {
            assert_eq!(cards.len(), 7);
            count += 1;
        });
        assert_eq!(count, 133_784_560);

        deck.remove(Card::new(Rank::Ace, Suit::Diamonds));
        deck.remove(Card::new(Rank::King, Suit::Diamonds));

        count = 0;
        deck.for_each(7, |_| count += 1);
        assert_eq!(count, 99_884_400);
    }

    #[test]
    fn deck_sample() {
        let deck = Deck::default();

        let mut count = 0;
        deck.sample(100, 7, |cards| {
            assert_eq!(cards.len(), 7);
            assert_eq!(cards.iter().collect::<HashSet<_>>().len(), 7);
            count += 1;
        });
        assert_eq!(count, 100);
    }
}

// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! A hand is evaluated in three steps:
//!
//! 1. If five or more cards share a suit the suit ranks mask indexes the
//!    flushes table, that holds the best flush or straight flush.
//! 2. Otherwise the hand ranks mask is checked against the straights masks.
//! 3. Otherwise each 5 cards subset is a pair, two pair, trips, full house,
//!    quads or high card, found in the products table by the product of its
//!    rank primes, the best subset value is the hand value.
use anyhow::Result;
use log::debug;
use std::{sync::LazyLock, time::Instant};

use crate::{
    HandRank, HandValue,
    generate::{self, STRAIGHTS},
    table::ProductTable,
};
use primeval_cards::Card;

/// Creates the positions of all 5 cards subsets of `n` cards.
const fn make_subsets<const K: usize>(n: usize) -> [[usize; 5]; K] {
    let mut out = [[0; 5]; K];
    let mut pos = [0, 1, 2, 3, 4];
    let mut count = 0;

    loop {
        out[count] = pos;
        count += 1;

        // Find the rightmost position that can still move right.
        let mut i = 5;
        loop {
            if i == 0 {
                assert!(count == K, "wrong number of subsets");
                return out;
            }

            i -= 1;
            if pos[i] < n - 5 + i {
                break;
            }
        }

        pos[i] += 1;
        let mut j = i + 1;
        while j < 5 {
            pos[j] = pos[j - 1] + 1;
            j += 1;
        }
    }
}

const SUBSETS_5: [[usize; 5]; 1] = make_subsets(5);
const SUBSETS_6: [[usize; 5]; 6] = make_subsets(6);
const SUBSETS_7: [[usize; 5]; 21] = make_subsets(7);

/// A hand evaluator.
///
/// The lookup tables are built once by [Evaluator::new] and are read only
/// after that, so an evaluator can be shared by multiple threads.
#[derive(Debug)]
pub struct Evaluator {
    flushes: Box<[HandValue]>,
    products: ProductTable,
}

impl Evaluator {
    /// Creates an evaluator building its lookup tables.
    ///
    /// Fails if the tables cannot be allocated or their content doesn't
    /// match the expected number of hands.
    pub fn new() -> Result<Self> {
        let now = Instant::now();

        let flushes = generate::build_flushes()?;
        let products = generate::build_products()?;

        debug!(
            "Hand tables built in {:.3}ms",
            now.elapsed().as_secs_f64() * 1000.0
        );

        Ok(Self { flushes, products })
    }

    /// Evaluates a 7 cards hand.
    #[inline]
    pub fn evaluate(&self, cards: &[Card; 7]) -> HandValue {
        self.eval_subsets(cards, &SUBSETS_7)
    }

    /// Evaluates a 5, 6, or 7 cards hand.
    ///
    /// Panics if the hand has less than 5 or more than 7 cards.
    pub fn eval(&self, cards: &[Card]) -> HandValue {
        if let Ok(hand) = <&[Card; 7]>::try_from(cards) {
            self.evaluate(hand)
        } else if let Ok(hand) = <&[Card; 6]>::try_from(cards) {
            self.eval_subsets(hand, &SUBSETS_6)
        } else if let Ok(hand) = <&[Card; 5]>::try_from(cards) {
            self.eval_subsets(hand, &SUBSETS_5)
        } else {
            panic!("Invalid hand with {} cards, expected 5 to 7", cards.len());
        }
    }

    /// Evaluates a 5, 6, or 7 cards hand and returns the best 5 cards.
    ///
    /// This is slower than [Evaluator::eval] as it evaluates each 5 cards
    /// subset separately.
    ///
    /// Panics if the hand has less than 5 or more than 7 cards.
    pub fn eval_with_best_hand(&self, cards: &[Card]) -> (HandValue, [Card; 5]) {
        let subsets: &[[usize; 5]] = match cards.len() {
            5 => &SUBSETS_5,
            6 => &SUBSETS_6,
            7 => &SUBSETS_7,
            n => panic!("Invalid hand with {n} cards, expected 5 to 7"),
        };

        let mut best_hand = [cards[0]; 5];
        let mut best_value = HandValue::NONE;

        for subset in subsets {
            let hand = subset.map(|pos| cards[pos]);
            let value = self.eval_subsets(&hand, &SUBSETS_5);
            if value > best_value {
                best_value = value;
                best_hand = hand;
            }
        }

        (best_value, best_hand)
    }

    #[inline(always)]
    fn eval_subsets<const N: usize>(&self, cards: &[Card; N], subsets: &[[usize; 5]]) -> HandValue {
        let mut ranks = 0u16;
        let mut suits = [0u16; 4];

        for card in cards {
            let bit = 1 << card.rank_bits();
            ranks |= bit;
            suits[card.suit_bits().trailing_zeros() as usize] |= bit;
        }

        // Distinct cards of the same suit have distinct ranks.
        if let Some(&mask) = suits.iter().find(|mask| mask.count_ones() >= 5) {
            return self.flushes[mask as usize];
        }

        if let Some(idx) = STRAIGHTS.iter().rposition(|&s| ranks & s == s) {
            return HandValue::new(HandRank::Straight, idx as u32 + 1);
        }

        let mut best = HandValue::NONE;
        for subset in subsets {
            let key = subset.iter().map(|&pos| cards[pos].prime()).product();
            let Some(value) = self.products.get(key) else {
                panic!("No hand value for prime product {key}, malformed cards");
            };

            best = best.max(value);
        }

        best
    }
}

static EVALUATOR: LazyLock<Evaluator> = LazyLock::new(|| match Evaluator::new() {
    Ok(evaluator) => evaluator,
    Err(e) => panic!("Hand tables construction failed: {e}"),
});

/// Returns the process wide evaluator, building its tables on first use.
pub fn evaluator() -> &'static Evaluator {
    &EVALUATOR
}

impl HandValue {
    /// Evaluates a 5, 6, or 7 cards hand with the process wide evaluator.
    ///
    /// Panics if the hand has less than 5 or more than 7 cards.
    pub fn eval(cards: &[Card]) -> HandValue {
        EVALUATOR.eval(cards)
    }

    /// Evaluates a 5, 6, or 7 cards hand with the process wide evaluator and
    /// returns the best 5 cards.
    ///
    /// Panics if the hand has less than 5 or more than 7 cards.
    pub fn eval_with_best_hand(cards: &[Card]) -> (HandValue, [Card; 5]) {
        EVALUATOR.eval_with_best_hand(cards)
    }
}

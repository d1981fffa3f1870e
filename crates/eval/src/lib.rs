// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Primeval Poker hand evaluator.
//!
//! Poker hand evaluator for 5, 6 and 7 cards hands based on the prime rank
//! encoding of the [Cactus Kev's][kevlink] evaluator: flushes are looked up by
//! the suit ranks mask, straights are matched against the ranks mask, and all
//! other hands are looked up by the product of their ranks primes in an open
//! addressing table.
//!
//! Hands are evaluated to a [HandValue], the higher value wins. To evaluate a
//! hand with the process wide evaluator:
//!
//! ```
//! # use primeval_eval::*;
//! // 2C, 3C, .., JC
//! let cards = Deck::default().into_iter().take(10).collect::<Vec<_>>();
//! let v1 = HandValue::eval(&cards[0..5]);
//! let v2 = HandValue::eval(&cards[5..]);
//! assert!(v2 > v1);
//! assert_eq!(v2.rank(), HandRank::StraightFlush);
//! ```
//!
//! or create an [Evaluator] and call [Evaluator::evaluate] on 7 cards hands:
//!
//! ```
//! # use primeval_eval::*;
//! # fn main() -> anyhow::Result<()> {
//! let evaluator = Evaluator::new()?;
//! let hand = ["AS", "KS", "QS", "JS", "TS", "2H", "3D"].map(|c| c.parse::<Card>().unwrap());
//! assert_eq!(evaluator.evaluate(&hand).rank(), HandRank::StraightFlush);
//! # Ok(())
//! # }
//! ```
//!
//! [kevlink]: http://suffe.cool/poker/evaluator.html
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod evaluator;
mod generate;
pub mod table;
mod value;

pub use evaluator::{Evaluator, evaluator};
pub use value::{HandRank, HandValue};

// Reexport cards types.
pub use primeval_cards::{Card, Deck, PRIMES, Rank, Suit, make_card, make_deck};

// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Primeval Poker cards types.
//!
//! This crate defines the cards encoding used by the hand evaluator, each card
//! packs its rank prime, rank, and suit in a single integer:
//!
//! ```
//! # use primeval_cards::{Card, Rank, Suit, PRIMES, make_card};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! assert_eq!(ah.prime(), PRIMES[Rank::Ace as usize]);
//! assert_eq!(ah, make_card(12, 2));
//! assert_eq!(ah, "AH".parse::<Card>().unwrap());
//! ```
//!
//! and a [Deck] type for shuffling, sampling, and iterating cards in the deck.
//!
//! For example to iterate through all 7 cards hands:
//!
//! ```no_run
//! # use primeval_cards::Deck;
//! // Iterate through all 7 cards hands (133M hands).
//! let mut counter = 0;
//! Deck::default().for_each(7, |hand| {
//!     counter += 1;
//! });
//! assert_eq!(counter, 133_784_560);
//! ```
//!
//! to sample 10 random 5-cards hands:
//!
//! ```
//! # use primeval_cards::Deck;
//! let mut counter = 0;
//! Deck::default().sample(10, 5, |hand| {
//!     assert_eq!(hand.len(), 5);
//!     counter += 1;
//! });
//! assert_eq!(counter, 10);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, PRIMES, Rank, Suit, make_card, make_deck};

// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Lookup tables generation.
//!
//! The flushes table is indexed by the ranks mask of the cards of one suit,
//! the products table maps the product of five cards rank primes to the value
//! of any non flush 5 cards hand. Each hand rank is generated by its own loop
//! that assigns the rank tiebreaker.
use anyhow::{Result, anyhow, bail};
use log::debug;

use crate::{HandRank, HandValue, table::ProductTable};
use primeval_cards::PRIMES;

/// The straights ranks masks, from the wheel (A2345) to the ace high straight.
pub const STRAIGHTS: [u16; 10] = [
    0x100f, 0x001f, 0x003e, 0x007c, 0x00f8, 0x01f0, 0x03e0, 0x07c0, 0x0f80, 0x1f00,
];

/// The flushes table size, one entry for each 13 bits ranks mask.
pub const FLUSHES_SIZE: usize = 1 << 13;

/// The products table size.
pub const PRODUCTS_SIZE: usize = 1 << 14;

const STRAIGHT_COUNT: usize = 10;
const QUADS_COUNT: usize = 13 * 12;
const FULL_HOUSE_COUNT: usize = 13 * 12;
const TRIPS_COUNT: usize = 13 * 66;
const TWO_PAIR_COUNT: usize = 78 * 11;
const PAIR_COUNT: usize = 13 * 220;
const HIGH_CARD_COUNT: usize = 1287 - STRAIGHT_COUNT;

/// The number of distinct 5 ranks multisets, one products table entry each.
pub const PRODUCTS_COUNT: usize = STRAIGHT_COUNT
    + QUADS_COUNT
    + FULL_HOUSE_COUNT
    + TRIPS_COUNT
    + TWO_PAIR_COUNT
    + PAIR_COUNT
    + HIGH_CARD_COUNT;

/// Returns the straight index for a 5 ranks mask.
fn straight(mask: u16) -> Option<u32> {
    STRAIGHTS
        .iter()
        .position(|&s| s == mask)
        .map(|idx| idx as u32 + 1)
}

/// The ranks in a mask.
fn ranks(mask: u16) -> impl Iterator<Item = usize> {
    (0..13).filter(move |r| mask & (1 << r) != 0)
}

/// The product of the primes for the ranks in a mask.
fn mask_product(mask: u16) -> u32 {
    ranks(mask).map(|r| PRIMES[r]).product()
}

/// Builds the flushes table.
///
/// Entries for 5 ranks masks hold a flush or straight flush value, entries for
/// 6 and 7 ranks masks hold the best value of their 5 ranks sub-masks, all
/// other entries are empty.
pub fn build_flushes() -> Result<Box<[HandValue]>> {
    let mut table = Vec::new();
    table
        .try_reserve_exact(FLUSHES_SIZE)
        .map_err(|e| anyhow!("Flushes table allocation failed: {e}"))?;
    table.resize(FLUSHES_SIZE, HandValue::NONE);

    let mut fives = 0;
    let mut straight_flushes = 0;

    // Sub-masks are smaller than their mask so they are already set.
    for mask in 0..FLUSHES_SIZE as u16 {
        let value = match mask.count_ones() {
            5 => {
                fives += 1;
                match straight(mask) {
                    Some(idx) => {
                        straight_flushes += 1;
                        HandValue::new(HandRank::StraightFlush, idx)
                    }
                    None => HandValue::new(HandRank::Flush, mask as u32),
                }
            }
            6 | 7 => ranks(mask)
                .map(|r| table[(mask & !(1 << r)) as usize])
                .max()
                .unwrap_or(HandValue::NONE),
            _ => continue,
        };

        table[mask as usize] = value;
    }

    if fives != 1287 || straight_flushes != STRAIGHT_COUNT {
        bail!("Flushes table has {fives} flushes and {straight_flushes} straight flushes");
    }

    debug!("Flushes table {fives} flushes, {} entries", table.len());

    Ok(table.into_boxed_slice())
}

/// Builds the products table.
pub fn build_products() -> Result<ProductTable> {
    let mut table = ProductTable::new(PRODUCTS_SIZE)?;
    let p = |r: usize| PRIMES[r];

    for (idx, &mask) in STRAIGHTS.iter().enumerate() {
        let value = HandValue::new(HandRank::Straight, idx as u32 + 1);
        table.insert(mask_product(mask), value)?;
    }

    for quads in 0..13 {
        for kicker in (0..13).filter(|&k| k != quads) {
            let key = p(quads).pow(4) * p(kicker);
            let tiebreak = (quads << 13) | kicker;
            table.insert(key, HandValue::new(HandRank::FourOfAKind, tiebreak as u32))?;
        }
    }

    for trips in 0..13 {
        for pair in (0..13).filter(|&r| r != trips) {
            let key = p(trips).pow(3) * p(pair).pow(2);
            let tiebreak = (trips << 13) | pair;
            table.insert(key, HandValue::new(HandRank::FullHouse, tiebreak as u32))?;
        }
    }

    for trips in 0..13 {
        for k1 in (0..13).filter(|&k| k != trips) {
            for k2 in (0..k1).filter(|&k| k != trips) {
                let key = p(trips).pow(3) * p(k1) * p(k2);
                let tiebreak = (trips << 13) | (1 << k1) | (1 << k2);
                table.insert(key, HandValue::new(HandRank::ThreeOfAKind, tiebreak as u32))?;
            }
        }
    }

    for high in 0..13 {
        for low in 0..high {
            for kicker in (0..13).filter(|&k| k != high && k != low) {
                let key = p(high).pow(2) * p(low).pow(2) * p(kicker);
                let tiebreak = (high << 8) | (low << 4) | kicker;
                table.insert(key, HandValue::new(HandRank::TwoPair, tiebreak as u32))?;
            }
        }
    }

    for pair in 0..13 {
        for k1 in (0..13).filter(|&k| k != pair) {
            for k2 in (0..k1).filter(|&k| k != pair) {
                for k3 in (0..k2).filter(|&k| k != pair) {
                    let key = p(pair).pow(2) * p(k1) * p(k2) * p(k3);
                    let tiebreak = (pair << 13) | (1 << k1) | (1 << k2) | (1 << k3);
                    table.insert(key, HandValue::new(HandRank::OnePair, tiebreak as u32))?;
                }
            }
        }
    }

    for mask in (0..FLUSHES_SIZE as u16).filter(|m| m.count_ones() == 5) {
        if straight(mask).is_none() {
            let value = HandValue::new(HandRank::HighCard, mask as u32);
            table.insert(mask_product(mask), value)?;
        }
    }

    if table.len() != PRODUCTS_COUNT {
        bail!(
            "Products table has {} entries, expected {PRODUCTS_COUNT}",
            table.len()
        );
    }

    debug!(
        "Products table {} entries, {} slots, load {:.3}, max probe {}",
        table.len(),
        table.capacity(),
        table.load_factor(),
        table.max_probe()
    );

    Ok(table)
}

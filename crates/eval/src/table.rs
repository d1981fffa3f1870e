// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Fixed size open addressing table keyed by prime products.
//!
//! The table has a power of two number of slots, a zero key marks an empty
//! slot (prime products are never zero), keys are scrambled with [mix] and
//! collisions are resolved by linear probing.
use anyhow::{Result, anyhow, bail};

use crate::HandValue;

/// Scrambles a 32 bits key so that multiplicative keys spread over the slots.
///
/// This is the murmur3 finalizer, changing it changes the table layout and the
/// probe lengths but not the lookup results.
#[inline(always)]
pub const fn mix(mut key: u32) -> u32 {
    key ^= key >> 16;
    key = key.wrapping_mul(0x85eb_ca6b);
    key ^= key >> 13;
    key = key.wrapping_mul(0xc2b2_ae35);
    key ^= key >> 16;
    key
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    key: u32,
    value: HandValue,
}

impl Slot {
    const EMPTY: Slot = Slot {
        key: 0,
        value: HandValue::NONE,
    };
}

/// An open addressing map from prime products to hand values.
#[derive(Debug)]
pub struct ProductTable {
    slots: Box<[Slot]>,
    mask: usize,
    len: usize,
}

impl ProductTable {
    /// Creates an empty table with `size` slots.
    ///
    /// Fails if `size` is not a power of two or the slots cannot be allocated.
    pub fn new(size: usize) -> Result<Self> {
        if !size.is_power_of_two() || size < 2 {
            bail!("Table size {size} must be a power of two >= 2");
        }

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(size)
            .map_err(|e| anyhow!("Table allocation of {size} slots failed: {e}"))?;
        slots.resize(size, Slot::EMPTY);

        Ok(Self {
            slots: slots.into_boxed_slice(),
            mask: size - 1,
            len: 0,
        })
    }

    /// Inserts a new key.
    ///
    /// At least one slot is always left empty so that a lookup for a missing
    /// key terminates, inserting into a table with one empty slot fails.
    pub fn insert(&mut self, key: u32, value: HandValue) -> Result<()> {
        if key == 0 {
            bail!("Invalid zero key");
        }

        if self.len + 1 >= self.slots.len() {
            bail!("Table full inserting key {key}, capacity {}", self.slots.len());
        }

        let mut idx = mix(key) as usize & self.mask;
        loop {
            let slot = &mut self.slots[idx];
            if slot.key == 0 {
                *slot = Slot { key, value };
                self.len += 1;
                return Ok(());
            }

            if slot.key == key {
                bail!("Duplicate key {key}");
            }

            idx = (idx + 1) & self.mask;
        }
    }

    /// Returns the value for the given key.
    #[inline]
    pub fn get(&self, key: u32) -> Option<HandValue> {
        let mut idx = mix(key) as usize & self.mask;
        loop {
            let slot = self.slots[idx];
            if slot.key == 0 {
                return None;
            }

            if slot.key == key {
                return Some(slot.value);
            }

            idx = (idx + 1) & self.mask;
        }
    }

    /// The number of keys in the table.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Checks if the table has no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The ratio of used slots.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.slots.len() as f64
    }

    /// The longest number of slots visited to find a key.
    pub fn max_probe(&self) -> usize {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.key != 0)
            .map(|(idx, slot)| {
                let home = mix(slot.key) as usize & self.mask;
                ((idx + self.slots.len() - home) & self.mask) + 1
            })
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HandRank;

    fn value(tiebreak: u32) -> HandValue {
        HandValue::new(HandRank::HighCard, tiebreak)
    }

    #[test]
    fn mix_is_deterministic() {
        assert_eq!(mix(0), 0);
        assert_eq!(mix(41 * 41 * 41 * 41 * 37), mix(41 * 41 * 41 * 41 * 37));
        assert_ne!(mix(2 * 3 * 5 * 7 * 11), mix(2 * 3 * 5 * 7 * 13));

        // Consecutive keys must not land in consecutive slots.
        let mask = (1 << 14) - 1;
        let slots = (1..1000).map(|k| mix(k) & mask).collect::<Vec<_>>();
        assert!(slots.windows(2).filter(|w| w[1] == w[0] + 1).count() < 10);
    }

    #[test]
    fn insert_and_get() {
        let mut table = ProductTable::new(16).unwrap();
        assert!(table.is_empty());

        for key in 1..=10 {
            table.insert(key * 7, value(key)).unwrap();
        }

        assert_eq!(table.len(), 10);
        for key in 1..=10 {
            assert_eq!(table.get(key * 7), Some(value(key)));
        }

        assert_eq!(table.get(8), None);
        assert_eq!(table.get(0), None);
        assert!(table.max_probe() >= 1);
    }

    #[test]
    fn colliding_keys() {
        // Keys that all hash to the same slot in a 4 slots table.
        let mut table = ProductTable::new(4).unwrap();
        let home = mix(1) & 3;
        let keys = (1..10_000)
            .filter(|&k| mix(k) & 3 == home)
            .take(3)
            .collect::<Vec<_>>();

        for (i, &key) in keys.iter().enumerate() {
            table.insert(key, value(i as u32)).unwrap();
        }

        for (i, &key) in keys.iter().enumerate() {
            assert_eq!(table.get(key), Some(value(i as u32)));
        }

        assert_eq!(table.max_probe(), 3);
    }

    #[test]
    fn insert_errors() {
        assert!(ProductTable::new(0).is_err());
        assert!(ProductTable::new(1).is_err());
        assert!(ProductTable::new(12).is_err());

        let mut table = ProductTable::new(8).unwrap();
        assert!(table.insert(0, value(1)).is_err());

        table.insert(3, value(1)).unwrap();
        assert!(table.insert(3, value(2)).is_err());
        assert_eq!(table.get(3), Some(value(1)));

        for key in 4..10 {
            table.insert(key, value(key)).unwrap();
        }

        // One slot left.
        assert_eq!(table.len(), 7);
        assert!(table.insert(10, value(10)).is_err());
        assert_eq!(table.get(10), None);
        assert!((table.load_factor() - 7.0 / 8.0).abs() < f64::EPSILON);
    }
}

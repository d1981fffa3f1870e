// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Primeval hand evaluator benchmark.
//!
//! Builds one [Evaluator] and measures how many 7 cards hands per second it
//! evaluates, either on random hands split across parallel tasks that share
//! the evaluator, or on all the 133M 7 cards hands.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Result, bail};
use log::{info, warn};
use rand::prelude::*;
use std::{fmt, panic, thread, time::Instant};

use primeval_cards::{Card, Deck, make_deck};
use primeval_eval::{Evaluator, HandRank};

/// The benchmark configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// The number of random hands to evaluate.
    pub hands: usize,
    /// The number of parallel tasks.
    pub tasks: usize,
    /// The seed for generating random hands, random if `None`.
    pub seed: Option<u64>,
    /// Evaluates all 7 cards hands instead of random hands.
    pub all: bool,
}

/// The benchmark results.
#[derive(Debug, Clone)]
pub struct Report {
    /// The number of hands evaluated for each hand rank.
    pub counts: [u64; 9],
    /// The evaluation time in seconds.
    pub elapsed: f64,
}

impl Report {
    /// The total number of hands evaluated.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// The number of hands evaluated for a rank.
    pub fn count(&self, rank: HandRank) -> u64 {
        self.counts[rank as usize - 1]
    }

    fn add(&mut self, rank: HandRank) {
        self.counts[rank as usize - 1] += 1;
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total();
        writeln!(f, "Total hands      {total}")?;
        writeln!(f, "Elapsed:         {:.3}s", self.elapsed)?;
        writeln!(f, "Hands/sec:       {:.0}\n", total as f64 / self.elapsed)?;

        let labels = [
            "High Card:      ",
            "One  Pair:      ",
            "Two Pairs:      ",
            "Three of a Kind:",
            "Straight:       ",
            "Flush:          ",
            "Full House:     ",
            "Four of a Kind: ",
            "Straight Flush: ",
        ];

        for (label, rank) in labels.iter().zip(HandRank::ranks()) {
            writeln!(f, "{label} {}", self.count(rank))?;
        }

        Ok(())
    }
}

/// Runs the benchmark.
pub fn run(config: &Config) -> Result<Report> {
    if config.tasks == 0 {
        bail!("The number of tasks must be positive");
    }

    let now = Instant::now();
    let evaluator = Evaluator::new()?;
    info!(
        "Built evaluator tables in {:.3}ms",
        now.elapsed().as_secs_f64() * 1000.0
    );

    if config.all {
        if config.tasks > 1 {
            warn!("Evaluating all hands with a single task");
        }

        Ok(eval_all(&evaluator))
    } else {
        let hands = random_hands(config.hands, config.seed);
        Ok(eval_random(&evaluator, &hands, config.tasks))
    }
}

/// Generates random 7 cards hands.
fn random_hands(count: usize, seed: Option<u64>) -> Vec<[Card; 7]> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    info!("Generating {count} random hands");

    let deck = make_deck();
    (0..count)
        .map(|_| {
            let mut hand = [deck[0]; 7];
            for (c, &card) in hand.iter_mut().zip(deck.choose_multiple(&mut rng, 7)) {
                *c = card;
            }
            hand
        })
        .collect()
}

/// Evaluates hands splitting them across parallel tasks.
fn eval_random(evaluator: &Evaluator, hands: &[[Card; 7]], tasks: usize) -> Report {
    let chunk_size = hands.len().div_ceil(tasks).max(1);
    info!("Evaluating {} hands with {tasks} tasks", hands.len());

    let now = Instant::now();

    // Per task reports to avoid contention.
    let reports = thread::scope(|s| {
        let handles = hands
            .chunks(chunk_size)
            .map(|chunk| {
                s.spawn(move || {
                    let mut report = Report {
                        counts: [0; 9],
                        elapsed: 0.0,
                    };

                    for hand in chunk {
                        report.add(evaluator.evaluate(hand).rank());
                    }

                    report
                })
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| panic::resume_unwind(e)))
            .collect::<Vec<_>>()
    });

    let mut report = Report {
        counts: [0; 9],
        elapsed: now.elapsed().as_secs_f64(),
    };

    for task_report in reports {
        for (total, count) in report.counts.iter_mut().zip(task_report.counts) {
            *total += count;
        }
    }

    report
}

/// Evaluates all 7 cards hands.
fn eval_all(evaluator: &Evaluator) -> Report {
    info!("Evaluating all 7 cards hands");

    let now = Instant::now();
    let mut report = Report {
        counts: [0; 9],
        elapsed: 0.0,
    };

    Deck::default().for_each(7, |hand| {
        report.add(evaluator.eval(hand).rank());
    });

    report.elapsed = now.elapsed().as_secs_f64();
    report
}

// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// ```bash
// $ cargo bench -p primeval-eval
// ```
use criterion::{Criterion, criterion_group, criterion_main};
use rand::prelude::*;
use std::hint::black_box;

use primeval_eval::*;

fn random_hands(count: usize) -> Vec<[Card; 7]> {
    let mut rng = SmallRng::seed_from_u64(0);
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

fn evaluate_seven(c: &mut Criterion) {
    let evaluator = Evaluator::new().unwrap();
    let hands = random_hands(1024);

    c.bench_function("Evaluate 1024 7 cards hands", |b| {
        b.iter(|| {
            hands
                .iter()
                .map(|hand| evaluator.evaluate(black_box(hand)))
                .max()
        })
    });
}

fn eval_five(c: &mut Criterion) {
    let evaluator = Evaluator::new().unwrap();
    let hands = random_hands(1024);

    c.bench_function("Evaluate 1024 5 cards hands", |b| {
        b.iter(|| {
            hands
                .iter()
                .map(|hand| evaluator.eval(black_box(&hand[..5])))
                .max()
        })
    });
}

fn build_tables(c: &mut Criterion) {
    c.bench_function("Build lookup tables", |b| b.iter(Evaluator::new));
}

criterion_group!(benches, evaluate_seven, eval_five, build_tables);
criterion_main!(benches);

//! Benchmarks for hand evaluation and equity.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use holdemle::cards::{Card, Hand, HandEvaluator};
use holdemle::equity::{EquityCalculator, MonteCarloEquity};
use holdemle::puzzle::{generate_four_hands, FamilyTable, FamilyWeights};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn hands() -> [Hand; 4] {
    ["AsKh", "QdQc", "JhJs", "9c9d"].map(|h| h.parse().expect("valid hand"))
}

fn evaluate_7_benchmark(c: &mut Criterion) {
    let evaluator = HandEvaluator::new();
    let cards: Vec<Card> = ["As", "Kh", "Qd", "Jc", "Ts", "4h", "2d"]
        .iter()
        .map(|c| c.parse().expect("valid card"))
        .collect();

    c.bench_function("evaluate_7_cards", |b| {
        b.iter(|| evaluator.evaluate_cards(black_box(&cards)))
    });
}

fn monte_carlo_benchmark(c: &mut Criterion) {
    let hands = hands();
    c.bench_function("monte_carlo_10k_boards", |b| {
        b.iter(|| {
            let mut calc = MonteCarloEquity::new(10_000, Some(42));
            calc.calculate(black_box(&hands))
        })
    });
}

fn family_table_benchmark(c: &mut Criterion) {
    c.bench_function("family_table_build", |b| b.iter(FamilyTable::build));
}

fn four_hand_generation_benchmark(c: &mut Criterion) {
    let table = FamilyTable::global();
    let weights = FamilyWeights::default();
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("generate_four_hands", |b| {
        b.iter(|| generate_four_hands(table, &weights, 100, &mut rng))
    });
}

criterion_group!(
    benches,
    evaluate_7_benchmark,
    monte_carlo_benchmark,
    family_table_benchmark,
    four_hand_generation_benchmark
);
criterion_main!(benches);

//! Four-way preflop odds calculator.
//!
//! ```text
//! calc_odds AsKh QdQc JhJs 9c9d
//! calc_odds AsKh QdQc JhJs 9c9d --method both --iterations 500000
//! ```

use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use holdemle::cards::Hand;
use holdemle::config::FairnessBounds;
use holdemle::equity::{EquityCalculator, Equities, ExhaustiveEquity, MonteCarloEquity, NUM_HANDS};
use holdemle::puzzle::{round_to_sum_100, Difficulty, FamilyTable};

#[derive(Parser)]
#[command(name = "calc_odds")]
#[command(about = "Compute raw and rounded win percentages for four hands")]
struct Cli {
    /// Four hands, e.g. AsKh QdQc JhJs 9c9d
    #[arg(num_args = 4, required = true)]
    hands: Vec<Hand>,

    /// Equity strategy to run.
    #[arg(short, long, default_value = "exhaustive")]
    method: Method,

    /// Monte Carlo boards.
    #[arg(short, long, default_value_t = 1_000_000)]
    iterations: u64,

    /// Monte Carlo seed.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum Method {
    Exhaustive,
    MonteCarlo,
    /// Run both and show the difference.
    Both,
}

fn run(calc: &mut dyn EquityCalculator, hands: &[Hand; NUM_HANDS]) -> Result<Equities, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let equities = calc.calculate(hands)?;
    let rounded = round_to_sum_100(&equities)?;

    println!("--- {} ({:.2}s) ---", calc.name(), start.elapsed().as_secs_f64());
    for (i, hand) in hands.iter().enumerate() {
        println!("  {}. {}  {:>8.4}%  -> {:>3}%", i + 1, hand, equities[i], rounded[i]);
    }

    let fair = FairnessBounds::default().admits(&equities);
    let difficulty = Difficulty::from_percentages(&rounded.map(|p| p.clamp(0, 100) as u8));
    println!("  fairness: {}  difficulty: {}\n", if fair { "pass" } else { "FAIL" }, difficulty);

    Ok(equities)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let hands: [Hand; NUM_HANDS] = match cli.hands.clone().try_into() {
        Ok(hands) => hands,
        Err(_) => {
            eprintln!("Error: expected exactly 4 hands");
            return ExitCode::from(2);
        }
    };

    let table = FamilyTable::global();
    println!("=== Hold'emle Odds ===\n");
    for (i, hand) in hands.iter().enumerate() {
        println!("  {}. {}  ({})", i + 1, hand, table.family_of(hand));
    }
    println!();

    let mut exact = None;
    let mut sampled = None;

    if cli.method != Method::MonteCarlo {
        match run(&mut ExhaustiveEquity::new(), &hands) {
            Ok(e) => exact = Some(e),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    if cli.method != Method::Exhaustive {
        match run(&mut MonteCarloEquity::new(cli.iterations, cli.seed), &hands) {
            Ok(e) => sampled = Some(e),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    if let (Some(exact), Some(sampled)) = (exact, sampled) {
        let max_error = exact
            .iter()
            .zip(sampled)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        println!("Max monte carlo error: {:.4} points", max_error);
    }

    ExitCode::SUCCESS
}

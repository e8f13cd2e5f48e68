//! Daily puzzle generator.
//!
//! Generates puzzles for a run of consecutive dates and appends them to a JSON
//! store. Dates that already have a puzzle are skipped, so the command is safe
//! to run from a scheduler. Exits non-zero if any date failed.
//!
//! ```text
//! generate_puzzles                          # tomorrow (UTC)
//! generate_puzzles --date 2025-03-01 --days 30
//! generate_puzzles --method monte-carlo --iterations 200000 --seed 7
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use holdemle::config::GeneratorConfig;
use holdemle::equity::EquityMethod;
use holdemle::puzzle::{generate_for_date, GenerationOutcome, JsonFileStore, PuzzleGenerator};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

#[derive(Parser)]
#[command(name = "generate_puzzles")]
#[command(about = "Generate daily Hold'emle puzzles")]
struct Cli {
    /// First date to generate (YYYY-MM-DD). Defaults to tomorrow, UTC.
    #[arg(long, value_parser = parse_date)]
    date: Option<Date>,

    /// Number of consecutive days to generate.
    #[arg(long, env = "PUZZLE_DAYS", default_value_t = 1)]
    days: u32,

    /// JSON file puzzles are stored in.
    #[arg(long, default_value = "puzzles.json")]
    store: PathBuf,

    /// JSON generator config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Equity strategy (overrides config).
    #[arg(long)]
    method: Option<Method>,

    /// Monte Carlo boards per hand set (overrides config).
    #[arg(long)]
    iterations: Option<u64>,

    /// Random seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Family weight overrides as a JSON object, e.g. '{"pocket_pairs":25}'.
    #[arg(long)]
    weights: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Method {
    Exhaustive,
    MonteCarlo,
}

fn parse_date(s: &str) -> Result<Date, String> {
    Date::parse(s, format_description!("[year]-[month]-[day]")).map_err(|e| format!("{}: {}", s, e))
}

fn build_config(cli: &Cli) -> Result<GeneratorConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::from_json_file(path)?,
        None => GeneratorConfig::default(),
    };
    config = config.apply_env();

    if let Some(json) = &cli.weights {
        config.family_weights = config.family_weights.merge_json(json)?;
    }

    match cli.method {
        Some(Method::Exhaustive) => config.equity = EquityMethod::Exhaustive,
        Some(Method::MonteCarlo) if config.equity == EquityMethod::Exhaustive => {
            config.equity = EquityMethod::monte_carlo();
        }
        _ => {}
    }
    if let (Some(n), EquityMethod::MonteCarlo { iterations }) = (cli.iterations, &mut config.equity) {
        *iterations = n;
    }

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    config.validate()?;
    Ok(config)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let start_date = match cli.date.or_else(|| OffsetDateTime::now_utc().date().next_day()) {
        Some(date) => date,
        None => {
            eprintln!("Error: no start date");
            return ExitCode::from(2);
        }
    };

    let mut store = match JsonFileStore::open(&cli.store) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("=== Hold'emle Puzzle Generator ===\n");
    println!("Start: {} | Days: {} | Store: {}", start_date, cli.days, cli.store.display());
    println!("Equity: {:?} | Seed: {:?}\n", config.equity, config.seed);

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut generator = PuzzleGenerator::new(config);

    let pb = ProgressBar::new(cli.days as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let timer = Instant::now();
    let (mut created, mut skipped, mut failed) = (0u32, 0u32, 0u32);
    let mut date = Some(start_date);

    for _ in 0..cli.days {
        let Some(d) = date else {
            pb.println("Error: ran past the last representable date");
            failed += 1;
            break;
        };
        pb.set_message(d.to_string());

        match generate_for_date(&mut store, &mut generator, d, &mut rng) {
            Ok(GenerationOutcome::Created(puzzle)) => {
                created += 1;
                let hands: Vec<String> = puzzle
                    .hands
                    .iter()
                    .map(|h| format!("{} {}%", h.cards, h.actual_percent))
                    .collect();
                pb.println(format!("{}  created  [{}]  {}", d, puzzle.difficulty, hands.join(" | ")));
            }
            Ok(GenerationOutcome::AlreadyExists) => {
                skipped += 1;
                pb.println(format!("{}  skipped  (already exists)", d));
            }
            Err(e) => {
                failed += 1;
                pb.println(format!("{}  FAILED   {}", d, e));
            }
        }

        pb.inc(1);
        date = d.next_day();
    }

    pb.finish_and_clear();

    println!("\n=== Complete ===");
    println!("Created: {} | Skipped: {} | Failed: {}", created, skipped, failed);
    println!("Total time: {:.2}s", timer.elapsed().as_secs_f64());

    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

//! Batch generator and clearing utility for the sudobank inventory.
//!
//! With no arguments the tool runs a `generate` pass: it loads the
//! persisted inventory (a malformed or missing file just means starting
//! empty), tops every tier up to its target with uniquely-solvable
//! puzzles, and writes the merged inventory back.
//!
//! `sudobank clear [hard|extreme|all]` removes matching records from the
//! persisted inventory; the default mode is `all`.

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};
use sudobank_core::Tier;
use sudobank_generator::{Budgets, entropy_rng, seeded_rng};
use sudobank_inventory::{ClearMode, Targets, replenish, wire};

const DEFAULT_INVENTORY: &str = "src/data/puzzles.ts";

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Top the persisted inventory up to its per-tier targets.
    Generate(GenerateArgs),
    /// Remove persisted records by tier.
    Clear(ClearArgs),
}

#[derive(Debug, clap::Args)]
struct GenerateArgs {
    /// Path of the persisted inventory module.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_INVENTORY)]
    inventory: PathBuf,

    /// Target number of banked hard puzzles.
    #[arg(long, value_name = "COUNT", default_value_t = 100)]
    hard: usize,

    /// Target number of banked extreme puzzles.
    #[arg(long, value_name = "COUNT", default_value_t = 50)]
    extreme: usize,

    /// Wall-clock budget for the whole run, in seconds.
    #[arg(long, value_name = "SECS", default_value_t = 3600)]
    run_budget_secs: u64,

    /// Wall-clock budget per puzzle, in seconds.
    #[arg(long, value_name = "SECS", default_value_t = 60)]
    puzzle_budget_secs: u64,

    /// Resident-set ceiling, in mebibytes.
    #[arg(long, value_name = "MIB", default_value_t = 1024)]
    memory_ceiling_mib: u64,

    /// Cooperative delay between carve attempts, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 5)]
    throttle_ms: u64,

    /// Maximum removal attempts per puzzle.
    #[arg(long, value_name = "COUNT", default_value_t = 300)]
    max_attempts: usize,

    /// Seed for a reproducible run (defaults to system entropy).
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            inventory: PathBuf::from(DEFAULT_INVENTORY),
            hard: 100,
            extreme: 50,
            run_budget_secs: 3600,
            puzzle_budget_secs: 60,
            memory_ceiling_mib: 1024,
            throttle_ms: 5,
            max_attempts: 300,
            seed: None,
        }
    }
}

#[derive(Debug, clap::Args)]
struct ClearArgs {
    /// Which records to remove: hard, extreme, or all.
    #[arg(value_name = "MODE", default_value = "all")]
    mode: String,

    /// Path of the persisted inventory module.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_INVENTORY)]
    inventory: PathBuf,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let code = match args.command {
        Some(Command::Generate(generate)) => run_generate(&generate),
        Some(Command::Clear(clear)) => run_clear(&clear),
        None => run_generate(&GenerateArgs::default()),
    };
    process::exit(code);
}

fn run_generate(args: &GenerateArgs) -> i32 {
    let budgets = Budgets {
        run_budget: Duration::from_secs(args.run_budget_secs),
        puzzle_budget: Duration::from_secs(args.puzzle_budget_secs),
        memory_ceiling: args.memory_ceiling_mib * 1024 * 1024,
        throttle_delay: Duration::from_millis(args.throttle_ms),
        max_carve_attempts: args.max_attempts,
    };
    let targets = Targets {
        hard: args.hard,
        extreme: args.extreme,
        ..Targets::empty()
    };

    let mut inventory = wire::load(&args.inventory);
    let mut rng = match args.seed {
        Some(seed) => seeded_rng(seed),
        None => entropy_rng(),
    };

    let report = replenish(&mut inventory, &targets, &budgets, &mut rng);

    if let Err(err) = wire::save(&args.inventory, &inventory) {
        eprintln!("cannot write {}: {err}", args.inventory.display());
        return 1;
    }

    println!(
        "{} new record(s), {} skipped, {} banked total ({} hard, {} extreme)",
        report.generated,
        report.skipped,
        inventory.len(),
        inventory.count(Tier::Hard),
        inventory.count(Tier::Extreme),
    );
    if let Some(abort) = report.aborted {
        // Early abort is a clean exit: everything committed was persisted.
        println!("run stopped early: {abort}");
    }
    0
}

fn run_clear(args: &ClearArgs) -> i32 {
    let mode = match args.mode.as_str() {
        "hard" => ClearMode::Tier(Tier::Hard),
        "extreme" => ClearMode::Tier(Tier::Extreme),
        "all" => ClearMode::All,
        other => {
            eprintln!("unknown mode {other:?}; expected hard, extreme, or all");
            return 1;
        }
    };

    let content = match std::fs::read_to_string(&args.inventory) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("cannot read {}: {err}", args.inventory.display());
            return 1;
        }
    };

    let mut inventory = wire::parse(&content);
    let removed = inventory.clear(mode);
    if let Err(err) = wire::save(&args.inventory, &inventory) {
        eprintln!("cannot write {}: {err}", args.inventory.display());
        return 1;
    }

    println!(
        "removed {removed} record(s), {} left in {}",
        inventory.len(),
        args.inventory.display()
    );
    0
}

//! Benchmark driver and correctness verifier for lazar-core.
//!
//! # Usage
//!
//! ```bash
//! # Full suite with defaults (writes results.csv)
//! cargo run --release -p lazar-bench
//!
//! # Custom sizes and implementations
//! cargo run --release -p lazar-bench -- --Ns 10k,1m,100m --reps 5 --impls block2,block4
//!
//! # Differential verification
//! cargo run --release -p lazar-bench -- verify block4 100000 7
//! ```

mod scenario;
mod stats;
mod verification;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::{Parser, Subcommand};

use crate::scenario::{run_scenario, run_scenario_direct, ImplKind, Scenario};
use crate::stats::{parse_size, RunRecord, CSV_HEADER};
use crate::verification::verify_impl;

#[derive(Parser, Debug)]
#[command(name = "lazar-bench")]
#[command(about = "Benchmark suite and differential verifier for constant-time-initializable arrays")]
struct Args {
    /// Array sizes to benchmark (comma-separated; k/m/g suffixes allowed)
    #[arg(
        long = "Ns",
        value_delimiter = ',',
        value_parser = parse_size,
        default_value = "10000,100000,1000000"
    )]
    ns: Vec<usize>,

    /// Repetitions per (implementation, scenario, N) point
    #[arg(long, default_value_t = 3)]
    reps: u32,

    /// Random seed for the operation streams
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Implementations to run (comma-separated)
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "flat,block2,block4,flat_direct"
    )]
    impls: Vec<String>,

    /// Output CSV path
    #[arg(long, default_value = "results.csv")]
    outfile: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drive random ops against an implementation and a shadow model
    Verify {
        /// Implementation to verify
        impl_name: String,
        /// Array size
        #[arg(default_value_t = 10_000)]
        n: usize,
        /// Random seed
        #[arg(default_value_t = 42)]
        seed: u64,
    },
}

fn run_suite(args: &Args) -> ExitCode {
    let mut impls = Vec::new();
    for name in &args.impls {
        match ImplKind::parse(name) {
            Ok(kind) => impls.push(kind),
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    let file = match File::create(&args.outfile) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: cannot open {}: {e}", args.outfile.display());
            return ExitCode::FAILURE;
        }
    };
    let mut csv = BufWriter::new(file);
    if let Err(e) = writeln!(csv, "{CSV_HEADER}") {
        eprintln!("Error: write failed: {e}");
        return ExitCode::FAILURE;
    }

    for &kind in &impls {
        for &n in &args.ns {
            if !kind.accepts(n) {
                continue;
            }
            for scenario in Scenario::default_suite() {
                for rep in 1..=args.reps {
                    println!(
                        "Running: {} {} N={} seed={} rep={}...",
                        kind.label(),
                        scenario.label(),
                        n,
                        args.seed,
                        rep
                    );

                    let timestamp_iso = Utc::now().to_rfc3339();
                    let (outcome, counters) = if kind == ImplKind::FlatDirect {
                        (
                            run_scenario_direct(scenario, n, args.seed),
                            lazar_core::Counters::default(),
                        )
                    } else {
                        let mut arr = match kind.build(n) {
                            Ok(Some(arr)) => arr,
                            Ok(None) => continue,
                            Err(e) => {
                                eprintln!("  ERROR: {e}. Skipping.");
                                continue;
                            }
                        };
                        let outcome = run_scenario(&mut arr, scenario, n, args.seed);
                        (outcome, lazar_core::InitArray::counters(&arr))
                    };

                    let record = RunRecord {
                        timestamp_iso,
                        impl_name: kind.label().to_string(),
                        scenario: scenario.label(),
                        n,
                        seed: args.seed,
                        rep_id: rep,
                        ops_in_run: outcome.ops_in_run,
                        total_time_ns: outcome.total_time_ns,
                        init_time_ns: outcome.init_time_ns,
                        counters,
                    };
                    if let Err(e) = writeln!(csv, "{}", record.to_csv()).and_then(|()| csv.flush())
                    {
                        eprintln!("Error: write failed: {e}");
                        return ExitCode::FAILURE;
                    }
                }
            }
        }
    }

    println!(
        "\nExperiment suite finished. Results saved to {}",
        args.outfile.display()
    );
    println!("To run the correctness checker: lazar-bench verify <block2|block4> [N] [seed]");
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(Command::Verify { impl_name, n, seed }) = &args.command {
        let kind = match ImplKind::parse(impl_name) {
            Ok(kind) => kind,
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        };
        return if verify_impl(kind, *n, *seed) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    run_suite(&args)
}

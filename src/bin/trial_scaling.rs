// src/bin/trial_scaling.rs - Watch count and moments converge as the trial budget grows

use boltzmatch::error::Result;
use boltzmatch::{logging, ConfigurationSampler, Preset};
use clap::Parser;
use csv::WriterBuilder;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::warn;

#[derive(Parser, Debug)]
struct Cli {
    /// Parameter set to scan
    #[arg(long, value_enum, default_value = "figure1")]
    preset: Preset,

    /// Smallest trial budget
    #[arg(long, default_value = "1000")]
    from: u64,

    /// Largest trial budget
    #[arg(long, default_value = "1000000")]
    to: u64,

    /// Ratio between consecutive budgets
    #[arg(long, default_value = "10")]
    factor: u64,

    /// Seed shared by every budget, so each run extends the previous one
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Output CSV
    #[arg(short, long, default_value = "trial_scaling.csv")]
    output: PathBuf,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn budgets(from: u64, to: u64, factor: u64) -> Vec<u64> {
    let mut out = Vec::new();
    let mut t = from.max(1);
    while t <= to {
        out.push(t);
        match t.checked_mul(factor.max(2)) {
            Some(next) => t = next,
            None => break,
        }
    }
    out
}

fn main() -> Result<()> {
    let args = Cli::parse();
    logging::setup_logging(args.verbose, false, None)?;

    let base = args.preset.config();
    let budgets = budgets(args.from, args.to, args.factor);
    println!("Preset {:?}: {} budgets from {} to {}", args.preset, budgets.len(), args.from, args.to);

    let bar = ProgressBar::new(budgets.len() as u64);
    if let Ok(style) = ProgressStyle::with_template(" {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}]") {
        bar.set_style(style);
    }

    let mut wtr = WriterBuilder::new().from_path(&args.output)?;
    wtr.write_record([
        "trials", "count", "acceptance_rate", "mean_total_energy",
        "mean_molecular_energy", "molecular_std", "kt", "r_squared",
    ])?;

    for &trials in &budgets {
        let mut config = base.clone();
        config.trials = trials;

        // Serial runs: the same seed replays the shorter budget as a prefix.
        let outcome = ConfigurationSampler::new(config)?.run_seeded(args.seed);

        let mut row = vec![
            trials.to_string(),
            outcome.count().to_string(),
            outcome.acceptance_rate().to_string(),
        ];
        match outcome.statistics() {
            Ok(stats) => {
                let fit = stats.boltzmann_fit(outcome.grid());
                row.push(stats.mean_total_energy.to_string());
                row.push(stats.mean_molecular_energy.to_string());
                row.push(stats.molecular_std.to_string());
                row.push(fit.and_then(|f| f.temperature()).map(|t| t.to_string()).unwrap_or_default());
                row.push(fit.map(|f| f.r_squared.to_string()).unwrap_or_default());
            }
            Err(e) => {
                warn!(trials, "No statistics: {}", e);
                row.extend(std::iter::repeat(String::new()).take(5));
            }
        }
        wtr.write_record(&row)?;
        bar.inc(1);
    }
    bar.finish();
    wtr.flush()?;

    println!("Scan complete → {}", args.output.display());
    Ok(())
}

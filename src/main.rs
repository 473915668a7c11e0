//! Simulate the spontaneous emergence of a Boltzmann-like distribution
//! among N distinguishable molecules sharing a fixed total energy.

use boltzmatch::config::PartialSamplerConfig;
use boltzmatch::error::Result;
use boltzmatch::utils::rng::entropy_seed;
use boltzmatch::{logging, report, ConfigurationSampler, Preset, SamplerConfig};
use clap::Parser;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::{debug, error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Monte Carlo demonstration of an emergent Boltzmann distribution under energy conservation."
)]
struct Cli {
    /// Start from a named parameter set instead of the default one
    #[arg(long, value_enum)]
    preset: Option<Preset>,

    /// TOML file with a [sampler] table; applied on top of the preset
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of trial configurations to generate
    #[arg(short, long)]
    trials: Option<u64>,

    /// Number of molecules N
    #[arg(short = 'n', long)]
    molecules: Option<usize>,

    /// Total energy of all molecules, in units of epsilon
    #[arg(long, allow_hyphen_values = true)]
    e_total: Option<i64>,

    /// Lowest energy level of a molecule
    #[arg(long, allow_hyphen_values = true)]
    e_min: Option<i64>,

    /// Highest energy level of a molecule
    #[arg(long, allow_hyphen_values = true)]
    e_max: Option<i64>,

    /// Master seed; drawn from the OS when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Run all trials on one thread from a single RNG stream
    #[arg(long)]
    serial: bool,

    /// Number of worker threads (defaults to the number of logical cores)
    #[arg(short = 'j', long, value_name = "NUM")]
    threads: Option<usize>,

    /// Write the population table to a CSV file
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Write logs to a file in addition to stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> PartialSamplerConfig {
        PartialSamplerConfig {
            trials: self.trials,
            molecules: self.molecules,
            e_total: self.e_total,
            e_min: self.e_min,
            e_max: self.e_max,
            seed: self.seed,
        }
    }

    /// Default → preset → config file → command-line flags.
    fn resolve_config(&self) -> Result<SamplerConfig> {
        let mut config = self.preset.map(Preset::config).unwrap_or_default();
        if let Some(path) = &self.config {
            config = PartialSamplerConfig::from_file(path)?.apply(config);
        }
        Ok(self.overrides().apply(config))
    }
}

fn progress_bar(len: u64, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::stderr());
    if let Ok(style) =
        ProgressStyle::with_template(" {bar:40.cyan/blue} {human_pos}/{human_len} trials [{elapsed_precise}, eta {eta}]")
    {
        bar.set_style(style);
    }
    bar
}

fn run(cli: Cli) -> Result<()> {
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;
    debug!("Full CLI arguments parsed: {:?}", &cli);

    if let Some(num_threads) = cli.threads {
        info!("Setting Rayon global thread pool to {} threads.", num_threads);
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()?;
    }

    let config = cli.resolve_config()?;
    let seed = config.seed.unwrap_or_else(entropy_seed);
    println!("Configuration:\n{}", config.to_toml_string()?);
    println!("Seed: {seed}");

    let sampler = ConfigurationSampler::new(config)?;
    let trials = sampler.config().trials;

    let outcome = if cli.serial {
        sampler.run_seeded(seed)
    } else {
        let bar = progress_bar(trials, cli.no_progress || cli.quiet);
        let outcome = sampler.run_parallel_with_progress(seed, |n| bar.inc(n))?;
        bar.finish_and_clear();
        outcome
    };

    let stats = outcome.statistics()?;
    println!();
    print!("{}", report::summary(&outcome, &stats));

    if let Some(path) = &cli.output {
        let file = File::create(path)?;
        report::write_population_csv(BufWriter::new(file), &outcome, &stats)?;
        info!("Population table written to {}", path.display());
        println!("Population table → {}", path.display());
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("Run failed: {}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

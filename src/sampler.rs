// sampler.rs - Energy-matched rejection sampling of molecular configurations

use crate::config::SamplerConfig;
use crate::error::SamplerError;
use crate::grid::EnergyGrid;
use crate::histogram::Histogram;
use crate::stats::Statistics;
use crate::utils::rng::chunk_rng;
use rand::distributions::{Distribution, Uniform};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Trials handled by one parallel work unit. Fixed so that a seeded run
/// gives the same histogram whatever the size of the thread pool.
pub const TRIALS_PER_CHUNK: u64 = 1 << 16;

/// Draws N−1 molecular energies uniformly from the grid and back-fills the
/// Nth so that the total is conserved; trials whose residual energy falls
/// off the grid are rejected.
#[derive(Debug, Clone)]
pub struct ConfigurationSampler {
    config: SamplerConfig,
    grid: EnergyGrid,
    level: Uniform<usize>,
}

impl ConfigurationSampler {
    pub fn new(config: SamplerConfig) -> Result<Self, SamplerError> {
        config.validate()?;
        let grid = config.grid()?;

        if !grid.can_reach(config.molecules, config.e_total) {
            warn!(
                e_total = config.e_total,
                molecules = config.molecules,
                "Total energy is outside the reachable range; no trial can be accepted"
            );
        }

        let level = Uniform::new(0, grid.len());
        debug!(?config, levels = grid.len(), "Configuration sampler ready");

        Ok(Self { config, grid, level })
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    pub fn grid(&self) -> &EnergyGrid {
        &self.grid
    }

    /// Run a single trial.
    ///
    /// Returns `true` when the configuration conserves energy; `configuration`
    /// then holds all N grid indices, the back-filled molecule last.
    #[inline]
    pub fn trial<R: Rng + ?Sized>(&self, rng: &mut R, configuration: &mut Vec<usize>) -> bool {
        configuration.clear();

        let mut drawn = 0i64;
        for _ in 1..self.config.molecules {
            let level = self.level.sample(rng);
            drawn += self.grid.energy(level);
            configuration.push(level);
        }

        let missing = self.config.e_total.checked_sub(drawn);
        match missing.and_then(|e| self.grid.index_of(e)) {
            Some(level) => {
                configuration.push(level);
                true
            }
            None => false,
        }
    }

    /// Run `trials` trials, recording accepted configurations into `histogram`.
    pub fn run_trials<R: Rng + ?Sized>(&self, trials: u64, rng: &mut R, histogram: &mut Histogram) {
        let mut configuration = Vec::with_capacity(self.config.molecules);
        for _ in 0..trials {
            if self.trial(rng, &mut configuration) {
                histogram.record(&configuration);
            }
        }
    }

    /// Sequential run of the full trial budget with a caller-supplied RNG.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> SampleOutcome {
        let mut histogram = Histogram::new(self.grid.len());
        self.run_trials(self.config.trials, rng, &mut histogram);
        info!(
            accepted = histogram.accepted(),
            trials = self.config.trials,
            "Sequential sampling finished"
        );
        self.outcome(histogram)
    }

    /// Sequential run on a ChaCha20 stream seeded with `seed`.
    ///
    /// A longer budget with the same seed replays the shorter run first.
    pub fn run_seeded(&self, seed: u64) -> SampleOutcome {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        self.run(&mut rng)
    }

    pub fn run_parallel(&self, seed: u64) -> Result<SampleOutcome, SamplerError> {
        self.run_parallel_with_progress(seed, |_| {})
    }

    /// Parallel run: the budget is cut into chunks of [`TRIALS_PER_CHUNK`],
    /// each with its own RNG derived from `seed`, and the partial histograms
    /// are summed. `progress` receives the trial count of every finished chunk.
    pub fn run_parallel_with_progress<F>(&self, seed: u64, progress: F) -> Result<SampleOutcome, SamplerError>
    where
        F: Fn(u64) + Sync,
    {
        let trials = self.config.trials;
        let levels = self.grid.len();
        let chunks = trials.div_ceil(TRIALS_PER_CHUNK);
        debug!(chunks, trials, "Starting parallel sampling");

        let histogram = (0..chunks)
            .into_par_iter()
            .map(|chunk| {
                let start = chunk * TRIALS_PER_CHUNK;
                let len = TRIALS_PER_CHUNK.min(trials - start);

                let mut rng = chunk_rng(seed, chunk);
                let mut partial = Histogram::new(levels);
                self.run_trials(len, &mut rng, &mut partial);
                progress(len);
                Ok::<_, SamplerError>(partial)
            })
            .try_reduce(
                || Histogram::new(levels),
                |mut acc, partial| {
                    acc.merge(&partial)?;
                    Ok(acc)
                },
            )?;

        info!(
            accepted = histogram.accepted(),
            trials,
            "Parallel sampling finished"
        );
        Ok(self.outcome(histogram))
    }

    fn outcome(&self, histogram: Histogram) -> SampleOutcome {
        SampleOutcome {
            histogram,
            trials: self.config.trials,
            molecules: self.config.molecules,
            e_total: self.config.e_total,
            grid: self.grid,
        }
    }
}

/// Histogram and success count of a finished run, together with the
/// parameters needed to interpret them.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleOutcome {
    histogram: Histogram,
    trials: u64,
    molecules: usize,
    e_total: i64,
    grid: EnergyGrid,
}

impl SampleOutcome {
    /// Number of accepted configurations.
    pub fn count(&self) -> u64 {
        self.histogram.accepted()
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    pub fn molecules(&self) -> usize {
        self.molecules
    }

    pub fn e_total(&self) -> i64 {
        self.e_total
    }

    pub fn acceptance_rate(&self) -> f64 {
        self.count() as f64 / self.trials as f64
    }

    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    pub fn grid(&self) -> &EnergyGrid {
        &self.grid
    }

    /// Normalised populations and energy moments.
    ///
    /// Fails with [`SamplerError::Unreachable`] when no configuration could
    /// ever conserve the total, and with
    /// [`SamplerError::NoAcceptedConfigurations`] when none happened to.
    pub fn statistics(&self) -> Result<Statistics, SamplerError> {
        if let Some((min, max)) = self.grid.reachable_range(self.molecules) {
            if !(min..=max).contains(&self.e_total) {
                return Err(SamplerError::Unreachable {
                    e_total: self.e_total,
                    molecules: self.molecules,
                    min,
                    max,
                });
            }
        }
        if self.count() == 0 {
            return Err(SamplerError::NoAcceptedConfigurations { trials: self.trials });
        }
        Statistics::compute(&self.histogram, &self.grid)
    }
}

// error.rs - Error types for sampling and for the command-line layer

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the sampler itself: bad parameters, or a run whose histogram
/// cannot be normalised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SamplerError {
    #[error("Invalid energy range: E_min ({e_min}) is greater than E_max ({e_max})")]
    InvalidRange { e_min: i64, e_max: i64 },

    #[error("At least 2 molecules are required, got {0}")]
    TooFewMolecules(usize),

    #[error("Trial budget must be at least 1")]
    NoTrials,

    #[error("Energy range {e_min}..={e_max} has more than {max} levels")]
    TooManyLevels { e_min: i64, e_max: i64, max: usize },

    #[error("Energy range {e_min}..={e_max} overflows for {molecules} molecules")]
    EnergyOverflow {
        molecules: usize,
        e_min: i64,
        e_max: i64,
    },

    #[error(
        "E_total = {e_total} is unreachable: {molecules} molecules span {min}..={max}"
    )]
    Unreachable {
        e_total: i64,
        molecules: usize,
        min: i64,
        max: i64,
    },

    #[error("No configuration was accepted in {trials} trials; increase the trial budget")]
    NoAcceptedConfigurations { trials: u64 },

    #[error("Histogram holds no accepted configurations; populations are undefined")]
    EmptyHistogram,

    #[error("Histogram has {histogram} buckets but the energy grid has {grid} levels")]
    GridMismatch { histogram: usize, grid: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Sampler(#[from] SamplerError),

    #[error("Failed to parse config file '{path}': {source}", path = path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to render configuration: {0}")]
    ConfigRender(#[from] toml::ser::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

//! Emergence of a Boltzmann-like energy distribution from uniform sampling
//! of molecular energy configurations under exact energy conservation.

pub mod config;
pub mod error;
pub mod grid;
pub mod histogram;
pub mod logging;
pub mod report;
pub mod sampler;
pub mod stats;
pub mod utils;

pub use config::{Preset, SamplerConfig};
pub use error::{Error, SamplerError};
pub use grid::EnergyGrid;
pub use histogram::Histogram;
pub use sampler::{ConfigurationSampler, SampleOutcome};
pub use stats::{BoltzmannFit, Statistics};

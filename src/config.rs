// config.rs - Run parameters, named presets and TOML loading

use crate::error::{Error, Result, SamplerError};
use crate::grid::EnergyGrid;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Run‑time configuration of one sampling run (energies in units of ε).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SamplerConfig {
    pub trials: u64,
    pub molecules: usize,
    pub e_total: i64,
    pub e_min: i64,
    pub e_max: i64,
    /// Master seed; `None` draws one from the OS at run time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Preset::Standard.config()
    }
}

impl SamplerConfig {
    /// Reject parameter sets that cannot describe a run.
    pub fn validate(&self) -> std::result::Result<(), SamplerError> {
        if self.trials < 1 {
            return Err(SamplerError::NoTrials);
        }
        if self.molecules < 2 {
            return Err(SamplerError::TooFewMolecules(self.molecules));
        }
        if self.e_min > self.e_max {
            return Err(SamplerError::InvalidRange {
                e_min: self.e_min,
                e_max: self.e_max,
            });
        }
        let fits = i64::try_from(self.molecules).is_ok_and(|n| {
            self.e_min.checked_mul(n).is_some() && self.e_max.checked_mul(n).is_some()
        });
        if !fits {
            return Err(SamplerError::EnergyOverflow {
                molecules: self.molecules,
                e_min: self.e_min,
                e_max: self.e_max,
            });
        }
        self.grid()?;
        Ok(())
    }

    pub fn grid(&self) -> std::result::Result<EnergyGrid, SamplerError> {
        EnergyGrid::uniform(self.e_min, self.e_max)
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.sampler.apply(Self::default()))
    }

    /// Render as a `[sampler]` table that [`SamplerConfig::from_toml_str`]
    /// reads back.
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string(&ConfigFileRef { sampler: self })
    }

    /// Load a `[sampler]` table; missing keys keep their default values.
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(PartialSamplerConfig::from_file(path)?.apply(Self::default()))
    }
}

/// Parameter sets worth trying out, including those behind the two
/// published figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    /// N = 4, E = 6 on levels 0..=6: small system, clearly exponential.
    Figure1,
    /// N = 30, E = 900 on levels 0..=100: close to the thermodynamic limit.
    Figure2,
    /// N = 10, E = 12 on levels 0..=6.
    Dilute,
    /// N = 15, E = 40 on levels 0..=10, with the default budget of 1e6
    /// trials; a 1e7 budget gives a smoother tail.
    Standard,
    /// N = 4, E = 18 on levels 0..=6: high-energy levels dominate.
    Inverted,
}

impl Preset {
    pub fn config(self) -> SamplerConfig {
        let (trials, molecules, e_total, e_min, e_max) = match self {
            Preset::Figure1 => (1_000_000, 4, 6, 0, 6),
            Preset::Figure2 => (100_000_000, 30, 900, 0, 100),
            Preset::Dilute => (10_000_000, 10, 12, 0, 6),
            Preset::Standard => (1_000_000, 15, 40, 0, 10),
            Preset::Inverted => (1_000_000, 4, 18, 0, 6),
        };
        SamplerConfig {
            trials,
            molecules,
            e_total,
            e_min,
            e_max,
            seed: None,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    sampler: PartialSamplerConfig,
}

#[derive(Serialize)]
struct ConfigFileRef<'a> {
    sampler: &'a SamplerConfig,
}

/// A set of overrides; unset fields leave the base configuration alone.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PartialSamplerConfig {
    pub trials: Option<u64>,
    pub molecules: Option<usize>,
    pub e_total: Option<i64>,
    pub e_min: Option<i64>,
    pub e_max: Option<i64>,
    pub seed: Option<u64>,
}

impl PartialSamplerConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(file.sampler)
    }

    pub fn apply(self, base: SamplerConfig) -> SamplerConfig {
        SamplerConfig {
            trials: self.trials.unwrap_or(base.trials),
            molecules: self.molecules.unwrap_or(base.molecules),
            e_total: self.e_total.unwrap_or(base.e_total),
            e_min: self.e_min.unwrap_or(base.e_min),
            e_max: self.e_max.unwrap_or(base.e_max),
            seed: self.seed.or(base.seed),
        }
    }
}

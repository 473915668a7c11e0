// histogram.rs - Occupation counts of accepted configurations

use crate::error::SamplerError;

/// Per-level occurrence counts plus the number of accepted configurations
/// that produced them.
///
/// Every accepted configuration adds one count per molecule, so
/// `total() == accepted() * N` for histograms filled through [`record`].
///
/// [`record`]: Histogram::record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: Vec<u64>,
    accepted: u64,
}

impl Histogram {
    pub fn new(levels: usize) -> Self {
        Self {
            counts: vec![0; levels],
            accepted: 0,
        }
    }

    /// Rebuild a histogram from previously accumulated counts.
    pub fn from_counts(counts: Vec<u64>, accepted: u64) -> Self {
        Self { counts, accepted }
    }

    /// Add one accepted configuration given as grid indices.
    #[inline]
    pub fn record(&mut self, configuration: &[usize]) {
        for &level in configuration {
            self.counts[level] += 1;
        }
        self.accepted += 1;
    }

    /// Fold another partial histogram into this one.
    pub fn merge(&mut self, other: &Histogram) -> Result<(), SamplerError> {
        if self.counts.len() != other.counts.len() {
            return Err(SamplerError::GridMismatch {
                histogram: other.counts.len(),
                grid: self.counts.len(),
            });
        }
        for (mine, theirs) in self.counts.iter_mut().zip(&other.counts) {
            *mine += theirs;
        }
        self.accepted += other.accepted;
        Ok(())
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

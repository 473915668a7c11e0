// stats.rs - Populations and energy moments derived from a finished histogram

use crate::error::SamplerError;
use crate::grid::EnergyGrid;
use crate::histogram::Histogram;

/// Summary of the single-molecule energy distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    /// Normalised population of each grid level; sums to one.
    pub population: Vec<f64>,
    pub accepted: u64,
    /// Average total energy of the accepted configurations.
    pub mean_total_energy: f64,
    pub mean_molecular_energy: f64,
    pub molecular_std: f64,
}

impl Statistics {
    pub fn compute(histogram: &Histogram, grid: &EnergyGrid) -> Result<Self, SamplerError> {
        if histogram.len() != grid.len() {
            return Err(SamplerError::GridMismatch {
                histogram: histogram.len(),
                grid: grid.len(),
            });
        }
        if histogram.accepted() == 0 {
            return Err(SamplerError::EmptyHistogram);
        }

        let population = population(histogram)?;
        let energies = || grid.levels().map(|e| e as f64);

        let weighted: f64 = histogram
            .counts()
            .iter()
            .zip(energies())
            .map(|(&c, e)| c as f64 * e)
            .sum();
        let mean_total_energy = weighted / histogram.accepted() as f64;

        let mean_molecular_energy: f64 = population.iter().zip(energies()).map(|(p, e)| p * e).sum();
        let second_moment: f64 = population.iter().zip(energies()).map(|(p, e)| p * e * e).sum();
        // Rounding can push a zero variance slightly negative.
        let variance = (second_moment - mean_molecular_energy.powi(2)).max(0.0);

        Ok(Self {
            population,
            accepted: histogram.accepted(),
            mean_total_energy,
            mean_molecular_energy,
            molecular_std: variance.sqrt(),
        })
    }

    pub fn boltzmann_fit(&self, grid: &EnergyGrid) -> Option<BoltzmannFit> {
        fit_boltzmann(&self.population, grid)
    }
}

/// Occurrence counts divided by their sum.
pub fn population(histogram: &Histogram) -> Result<Vec<f64>, SamplerError> {
    let total = histogram.total();
    if total == 0 {
        return Err(SamplerError::EmptyHistogram);
    }
    let total = total as f64;
    Ok(histogram.counts().iter().map(|&c| c as f64 / total).collect())
}

/// Least-squares line through `ln p(E)` versus `E`.
///
/// A Boltzmann distribution is a straight line of slope `-1/kT` on this
/// semilog scale; `r_squared` tells how close the sample gets to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoltzmannFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    /// Populated levels that entered the fit.
    pub levels_used: usize,
}

impl BoltzmannFit {
    /// Effective temperature `kT` in units of ε; `None` unless populations
    /// decay with energy.
    pub fn temperature(&self) -> Option<f64> {
        (self.slope < 0.0).then(|| -1.0 / self.slope)
    }
}

/// Fit the populated levels; needs at least two of them.
pub fn fit_boltzmann(population: &[f64], grid: &EnergyGrid) -> Option<BoltzmannFit> {
    let points: Vec<(f64, f64)> = grid
        .levels()
        .zip(population)
        .filter(|&(_, &p)| p > 0.0)
        .map(|(e, &p)| (e as f64, p.ln()))
        .collect();

    if points.len() < 2 {
        return None;
    }

    let (slope, intercept) = linear_regression(&points);

    let n = points.len() as f64;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;
    let ss_tot: f64 = points.iter().map(|(_, y)| (y - mean_y).powi(2)).sum();
    let ss_res: f64 = points
        .iter()
        .map(|(x, y)| (y - (slope * x + intercept)).powi(2))
        .sum();
    let r_squared = if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 1.0 };

    Some(BoltzmannFit {
        slope,
        intercept,
        r_squared,
        levels_used: points.len(),
    })
}

fn linear_regression(points: &[(f64, f64)]) -> (f64, f64) {
    let n = points.len() as f64;
    let sum_x: f64 = points.iter().map(|(x, _)| x).sum();
    let sum_y: f64 = points.iter().map(|(_, y)| y).sum();
    let sum_xx: f64 = points.iter().map(|(x, _)| x * x).sum();
    let sum_xy: f64 = points.iter().map(|(x, y)| x * y).sum();

    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_xx - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n;

    (slope, intercept)
}

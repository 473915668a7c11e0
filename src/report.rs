// report.rs - Console summary and CSV export of a finished run

use crate::sampler::SampleOutcome;
use crate::stats::Statistics;
use std::fmt;
use std::io;

/// Write one row per energy level: `energy,count,population,ln_population`.
///
/// Empty levels get an empty `ln_population` cell.
pub fn write_population_csv<W: io::Write>(
    writer: W,
    outcome: &SampleOutcome,
    stats: &Statistics,
) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["energy", "count", "population", "ln_population"])?;

    let counts = outcome.histogram().counts();
    for ((energy, &count), &pop) in outcome.grid().levels().zip(counts).zip(&stats.population) {
        let ln_pop = if pop > 0.0 { pop.ln().to_string() } else { String::new() };
        wtr.write_record(&[energy.to_string(), count.to_string(), pop.to_string(), ln_pop])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Human-readable run summary followed by the population table.
pub struct Summary<'a> {
    outcome: &'a SampleOutcome,
    stats: &'a Statistics,
}

impl<'a> Summary<'a> {
    pub fn new(outcome: &'a SampleOutcome, stats: &'a Statistics) -> Self {
        Self { outcome, stats }
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { outcome, stats } = *self;

        writeln!(f, "Number of successful trials: {} / {}", outcome.count(), outcome.trials())?;
        writeln!(f, "Acceptance rate:              {:.6}", outcome.acceptance_rate())?;
        writeln!(f, "Average total energy:         {:.4}", stats.mean_total_energy)?;
        writeln!(f, "Average molecular energy:     {:.4}", stats.mean_molecular_energy)?;
        writeln!(f, "Molecular energy std. dev.:   {:.4}", stats.molecular_std)?;

        match stats.boltzmann_fit(outcome.grid()) {
            Some(fit) => {
                match fit.temperature() {
                    Some(kt) => writeln!(f, "Effective kT (semilog fit):   {kt:.4}")?,
                    None => writeln!(f, "Effective kT (semilog fit):   n/a (slope {:+.4})", fit.slope)?,
                }
                writeln!(f, "Fit R² over {} levels:        {:.4}", fit.levels_used, fit.r_squared)?;
            }
            None => writeln!(f, "Effective kT (semilog fit):   n/a (fewer than two populated levels)")?,
        }

        writeln!(f)?;
        writeln!(f, "{:>8}  {:>12}  {:>10}", "E", "count", "p_i")?;
        for ((energy, &count), &pop) in outcome
            .grid()
            .levels()
            .zip(outcome.histogram().counts())
            .zip(&stats.population)
        {
            writeln!(f, "{energy:>8}  {count:>12}  {pop:>10.6}")?;
        }
        Ok(())
    }
}

pub fn summary(outcome: &SampleOutcome, stats: &Statistics) -> String {
    Summary::new(outcome, stats).to_string()
}

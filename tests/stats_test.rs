use boltzmatch::stats::{fit_boltzmann, population};
use boltzmatch::{EnergyGrid, Histogram, SamplerError, Statistics};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn test_moments_of_known_histogram() {
    // Two accepted configurations of three molecules on levels 0, 1, 2:
    // (0, 0, 2) and (0, 1, 1).
    let grid = EnergyGrid::uniform(0, 2).unwrap();
    let mut histogram = Histogram::new(3);
    histogram.record(&[0, 0, 2]);
    histogram.record(&[0, 1, 1]);
    assert_eq!(histogram.counts(), &[3, 2, 1]);

    let stats = Statistics::compute(&histogram, &grid).unwrap();

    assert_eq!(stats.accepted, 2);
    assert!(close(stats.population[0], 0.5));
    assert!(close(stats.population[1], 1.0 / 3.0));
    assert!(close(stats.population[2], 1.0 / 6.0));
    assert!(close(stats.mean_total_energy, 2.0));
    assert!(close(stats.mean_molecular_energy, 2.0 / 3.0));
    assert!(close(stats.molecular_std, (5.0f64 / 9.0).sqrt()));
}

#[test]
fn test_shifted_grid_moments() {
    let grid = EnergyGrid::uniform(-2, 1).unwrap();
    let histogram = Histogram::from_counts(vec![1, 0, 0, 1], 1);

    let stats = Statistics::compute(&histogram, &grid).unwrap();
    assert!(close(stats.mean_total_energy, -1.0));
    assert!(close(stats.mean_molecular_energy, -0.5));
    assert!(close(stats.molecular_std, 1.5));
}

#[test]
fn test_empty_histogram_is_an_error_not_nan() {
    let grid = EnergyGrid::uniform(0, 4).unwrap();
    let histogram = Histogram::new(5);

    assert_eq!(population(&histogram), Err(SamplerError::EmptyHistogram));
    assert_eq!(
        Statistics::compute(&histogram, &grid),
        Err(SamplerError::EmptyHistogram)
    );
}

#[test]
fn test_histogram_grid_mismatch() {
    let grid = EnergyGrid::uniform(0, 4).unwrap();
    let histogram = Histogram::from_counts(vec![2, 0], 1);

    assert_eq!(
        Statistics::compute(&histogram, &grid),
        Err(SamplerError::GridMismatch { histogram: 2, grid: 5 })
    );
}

#[test]
fn test_fit_recovers_temperature_of_exact_boltzmann() {
    let grid = EnergyGrid::uniform(0, 6).unwrap();
    let kt = 2.0;
    let weights: Vec<f64> = grid.levels().map(|e| (-(e as f64) / kt).exp()).collect();
    let z: f64 = weights.iter().sum();
    let pop: Vec<f64> = weights.iter().map(|w| w / z).collect();

    let fit = fit_boltzmann(&pop, &grid).unwrap();
    assert!((fit.slope + 0.5).abs() < 1e-9);
    assert!((fit.intercept + z.ln()).abs() < 1e-9);
    assert!((fit.temperature().unwrap() - kt).abs() < 1e-9);
    assert!(fit.r_squared > 0.999_999);
    assert_eq!(fit.levels_used, 7);
}

#[test]
fn test_fit_skips_empty_levels() {
    let grid = EnergyGrid::uniform(0, 3).unwrap();
    let pop = [0.7, 0.3, 0.0, 0.0];

    let fit = fit_boltzmann(&pop, &grid).unwrap();
    assert_eq!(fit.levels_used, 2);
    assert!(fit.temperature().is_some());

    assert!(fit_boltzmann(&[1.0, 0.0, 0.0, 0.0], &grid).is_none());
}

#[test]
fn test_rising_population_has_no_temperature() {
    let grid = EnergyGrid::uniform(0, 3).unwrap();
    let fit = fit_boltzmann(&[0.1, 0.2, 0.3, 0.4], &grid).unwrap();
    assert!(fit.slope > 0.0);
    assert!(fit.temperature().is_none());
    assert!(fit.r_squared < 1.0);
}

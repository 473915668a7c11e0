use boltzmatch::config::PartialSamplerConfig;
use boltzmatch::{ConfigurationSampler, Error, Preset, SamplerConfig, SamplerError};
use std::io::Write;

#[test]
fn test_default_matches_standard_preset() {
    let cfg = SamplerConfig::default();
    assert_eq!(cfg, Preset::Standard.config());
    assert_eq!((cfg.trials, cfg.molecules, cfg.e_total), (1_000_000, 15, 40));
    assert_eq!((cfg.e_min, cfg.e_max), (0, 10));
    assert_eq!(cfg.seed, None);
}

#[test]
fn test_every_preset_is_valid_and_reachable() {
    for preset in [
        Preset::Figure1,
        Preset::Figure2,
        Preset::Dilute,
        Preset::Standard,
        Preset::Inverted,
    ] {
        let cfg = preset.config();
        cfg.validate().unwrap();
        let grid = cfg.grid().unwrap();
        assert!(grid.can_reach(cfg.molecules, cfg.e_total), "{preset:?}");
    }
}

#[test]
fn test_toml_overrides_defaults() {
    let cfg = SamplerConfig::from_toml_str(
        r#"
        [sampler]
        trials = 5000
        molecules = 4
        e-total = 6
        e-max = 6
        seed = 17
        "#,
    )
    .unwrap();

    assert_eq!(cfg.trials, 5000);
    assert_eq!(cfg.molecules, 4);
    assert_eq!(cfg.e_total, 6);
    assert_eq!(cfg.e_min, 0);
    assert_eq!(cfg.e_max, 6);
    assert_eq!(cfg.seed, Some(17));
}

#[test]
fn test_empty_toml_gives_default() {
    assert_eq!(SamplerConfig::from_toml_str("").unwrap(), SamplerConfig::default());
}

#[test]
fn test_unknown_keys_rejected() {
    assert!(SamplerConfig::from_toml_str("[sampler]\ne_error = 1\n").is_err());
    assert!(SamplerConfig::from_toml_str("[plot]\nsemilog = true\n").is_err());
}

#[test]
fn test_partial_config_applies_on_top_of_preset() {
    let overrides = PartialSamplerConfig {
        trials: Some(10),
        seed: Some(3),
        ..Default::default()
    };
    let cfg = overrides.apply(Preset::Figure2.config());

    assert_eq!(cfg.trials, 10);
    assert_eq!(cfg.seed, Some(3));
    assert_eq!((cfg.molecules, cfg.e_total, cfg.e_max), (30, 900, 100));
}

#[test]
fn test_config_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[sampler]\nmolecules = 2\ne-total = 0\ne-max = 5\ntrials = 1000").unwrap();

    let cfg = SamplerConfig::from_file(file.path()).unwrap();
    assert_eq!((cfg.molecules, cfg.e_total, cfg.e_min, cfg.e_max), (2, 0, 0, 5));

    let outcome = ConfigurationSampler::new(cfg).unwrap().run_seeded(1);
    assert!(outcome.count() > 0);
}

#[test]
fn test_bad_config_file_reports_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[sampler]\nmolecules = \"four\"").unwrap();

    match SamplerConfig::from_file(file.path()) {
        Err(Error::ConfigParse { path, .. }) => assert_eq!(path, file.path()),
        other => panic!("expected ConfigParse, got {other:?}"),
    }

    let missing = file.path().with_extension("absent");
    assert!(matches!(SamplerConfig::from_file(&missing), Err(Error::Io(_))));
}

#[test]
fn test_validation_is_reported_through_app_error() {
    let cfg = SamplerConfig { molecules: 0, ..SamplerConfig::default() };
    let err: Error = cfg.validate().unwrap_err().into();
    assert!(matches!(err, Error::Sampler(SamplerError::TooFewMolecules(0))));
    assert_eq!(err.to_string(), "At least 2 molecules are required, got 0");
}

#[test]
fn test_rendered_config_reads_back() {
    let cfg = SamplerConfig { seed: Some(42), e_min: -3, ..Preset::Figure1.config() };
    let text = cfg.to_toml_string().unwrap();
    assert!(text.starts_with("[sampler]"));
    assert!(text.contains("e-total = 6"));
    assert_eq!(SamplerConfig::from_toml_str(&text).unwrap(), cfg);

    let unseeded = SamplerConfig::default().to_toml_string().unwrap();
    assert!(!unseeded.contains("seed"));
}

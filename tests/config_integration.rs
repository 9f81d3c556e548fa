//! Configuration integration tests
//!
//! Loads the shipped `config/` directory and a scratch directory built with
//! `tempfile`, including the plot definition files they point at.

use std::path::PathBuf;

use libra_viz::config::{ConfigLoader, LibraConfig, CONFIG_FILE};
use libra_viz::plot::DEFAULT_PALETTE;
use libra_viz::DimensionKind;
use pretty_assertions::assert_eq;

fn shipped_config_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config")
}

#[test]
fn test_shipped_config_matches_defaults() {
    let loader = ConfigLoader::new(shipped_config_dir().to_string_lossy());
    let config = loader.load().unwrap();

    let defaults = LibraConfig::default();
    assert_eq!(config.years, defaults.years);
    assert_eq!(config.labels, defaults.labels);
    assert_eq!(config.palette, DEFAULT_PALETTE.map(str::to_string).to_vec());
    assert_eq!(config.stack_alpha, defaults.stack_alpha);
}

#[test]
fn test_shipped_definitions_are_valid() {
    let loader = ConfigLoader::new(shipped_config_dir().to_string_lossy());
    let config = loader.load().unwrap();

    let lines = loader.load_line_definitions(&config).unwrap();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0].full_name(), "Battery Market.battery demand[US, BEV, LFP]");
    assert!(lines[2].is_exogenous_input());

    let stacks = loader.load_stack_definitions(&config).unwrap();
    let kinds: Vec<_> = stacks.iter().map(|s| s.stack_kind()).collect();
    assert_eq!(
        kinds,
        [
            DimensionKind::BatteryChemistry,
            DimensionKind::Mineral,
            DimensionKind::ProjectYear
        ]
    );
}

#[test]
fn test_scratch_config_with_bad_definitions() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE),
        "definitions:\n  line: lines.csv\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("lines.csv"),
        "module,variable,array_vals,title,y_label\nRIRA,NPV,\"US, BEV, LFP, Ni\",NPV,USD\n",
    )
    .unwrap();

    let loader = ConfigLoader::new(dir.path().to_string_lossy());
    let config = loader.load().unwrap();
    let err = loader.load_line_definitions(&config).unwrap_err();
    assert!(format!("{:#}", err).contains("row 1"));
}

#[test]
fn test_missing_definitions_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE), "definitions:\n  stack: nope.csv\n").unwrap();

    let loader = ConfigLoader::new(dir.path().to_string_lossy());
    let config = loader.load().unwrap();
    assert!(loader.load_stack_definitions(&config).is_err());
    assert!(loader.load_line_definitions(&config).unwrap().is_empty());
}

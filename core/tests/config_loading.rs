//! Reference config loading from the data/ directory.

use std::path::{Path, PathBuf};
use storecast_core::{
    labor_cost::OverheadMode, EngineConfig, EngineError,
};

fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../data")
}

/// Copy data/ into a scratch directory so one file can be broken.
fn scratch_copy(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("storecast-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    for entry in std::fs::read_dir(data_dir()).expect("read data dir") {
        let entry = entry.expect("dir entry");
        std::fs::copy(entry.path(), dir.join(entry.file_name())).expect("copy data file");
    }
    dir
}

#[test]
fn shipped_data_matches_canonical_defaults() {
    let loaded = EngineConfig::load(data_dir()).expect("load data/");
    let canonical = EngineConfig::default_test();

    for year in 1..=3 {
        for month in 1..=12 {
            let a = loaded.capture_rates.rate(year, month).unwrap();
            let b = canonical.capture_rates.rate(year, month).unwrap();
            assert!((a - b).abs() < 1e-12, "rate Y{year} M{month}: {a} vs {b}");
        }
    }
    assert!((loaded.weeks_per_month - 4.3).abs() < 1e-12);
    assert_eq!(loaded.distribution.day_types().len(), 6);
    assert_eq!(loaded.distribution.time_blocks(), canonical.distribution.time_blocks());
    assert_eq!(loaded.thresholds, canonical.thresholds);
    assert_eq!(loaded.roles, canonical.roles);
    assert_eq!(loaded.overhead.mode, OverheadMode::AggregateLevel);
    assert!(loaded.open_close.is_none());
}

#[test]
fn unbalanced_day_shares_are_configuration_errors() {
    let dir = scratch_copy("bad-shares");
    std::fs::write(
        dir.join("distribution.json"),
        r#"{
            "day_types": [
                { "day": "Mon", "share_of_week_sales": 0.5 },
                { "day": "Tue", "share_of_week_sales": 0.4 }
            ],
            "time_blocks": [
                { "label": "all day", "duration_hours": 8.0, "share_of_day_sales": 1.0 }
            ]
        }"#,
    )
    .unwrap();

    let err = EngineConfig::load(&dir).unwrap_err();
    assert!(matches!(err, EngineError::Configuration(_)), "{err}");
}

#[test]
fn unordered_thresholds_are_configuration_errors() {
    let dir = scratch_copy("bad-thresholds");
    std::fs::write(
        dir.join("staffing_thresholds.json"),
        r#"{
            "tiers": [
                { "up_to": 500.0, "headcount": 3 },
                { "up_to": 200.0, "headcount": 2 }
            ],
            "above_all": 5,
            "minimum_headcount": 2
        }"#,
    )
    .unwrap();

    let err = EngineConfig::load(&dir).unwrap_err();
    assert!(matches!(err, EngineError::Configuration(_)), "{err}");
}

#[test]
fn replacement_threshold_table_changes_staffing() {
    let dir = scratch_copy("alt-thresholds");
    std::fs::write(
        dir.join("staffing_thresholds.json"),
        r#"{ "tiers": [], "above_all": 3, "minimum_headcount": 3 }"#,
    )
    .unwrap();

    let config = EngineConfig::load(&dir).unwrap();
    assert_eq!(config.thresholds.required_headcount(0.0), 3);
    assert_eq!(config.thresholds.required_headcount(10_000.0), 3);
}

#[test]
fn malformed_json_is_configuration_error() {
    let dir = scratch_copy("bad-json");
    std::fs::write(dir.join("labor_policy.json"), "{ not json").unwrap();

    let err = EngineConfig::load(&dir).unwrap_err();
    assert!(matches!(err, EngineError::Configuration(_)), "{err}");
    assert!(err.to_string().contains("labor_policy.json"), "{err}");
}

#[test]
fn mistyped_threshold_table_is_configuration_error() {
    for (name, body) in [
        ("threshold-type", r#"{ "tiers": [{ "up_to": "200", "headcount": 2 }], "above_all": 5, "minimum_headcount": 2 }"#),
        ("threshold-negative", r#"{ "tiers": [{ "up_to": 200.0, "headcount": -1 }], "above_all": 5, "minimum_headcount": 2 }"#),
        ("threshold-missing", r#"{ "tiers": [], "minimum_headcount": 2 }"#),
        ("threshold-lone", r#"{ "tiers": [], "above_all": 3, "minimum_headcount": 1 }"#),
    ] {
        let dir = scratch_copy(name);
        std::fs::write(dir.join("staffing_thresholds.json"), body).unwrap();

        let err = EngineConfig::load(&dir).unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)), "{name}: {err}");
    }
}

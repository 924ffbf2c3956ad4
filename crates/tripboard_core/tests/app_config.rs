use std::collections::HashMap;
use std::path::PathBuf;
use tripboard_core::config::{
    DB_PATH_ENV, DRAG_ACTIVATION_DISTANCE_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV,
};
use tripboard_core::{default_log_level, AppConfig, ConfigError};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn defaults_apply_when_nothing_is_set() {
    let config = AppConfig::from_lookup(lookup(&[])).unwrap();

    assert_eq!(config.db_path, std::env::temp_dir().join("tripboard.sqlite3"));
    assert_eq!(config.log_level, default_log_level());
    assert_eq!(config.log_dir, None);
    assert_eq!(config.drag_activation_distance, 8.0);
    assert_eq!(config.activation_constraint().activation_distance, 8.0);
}

#[test]
fn environment_values_override_defaults_and_blanks_are_unset() {
    let config = AppConfig::from_lookup(lookup(&[
        (DB_PATH_ENV, "/data/trips.sqlite3"),
        (LOG_LEVEL_ENV, "warn"),
        (LOG_DIR_ENV, "   "),
        (DRAG_ACTIVATION_DISTANCE_ENV, " 12.5 "),
    ]))
    .unwrap();

    assert_eq!(config.db_path, PathBuf::from("/data/trips.sqlite3"));
    assert_eq!(config.log_level, "warn");
    assert_eq!(config.log_dir, None);
    assert_eq!(config.drag_activation_distance, 12.5);
}

#[test]
fn bad_distance_is_an_error() {
    assert!(matches!(
        AppConfig::from_lookup(lookup(&[(DRAG_ACTIVATION_DISTANCE_ENV, "far")])),
        Err(ConfigError::InvalidNumber { .. })
    ));
    assert!(matches!(
        AppConfig::from_lookup(lookup(&[(DRAG_ACTIVATION_DISTANCE_ENV, "-1")])),
        Err(ConfigError::NegativeDistance { .. })
    ));
}

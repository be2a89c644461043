//! End-to-end integration tests

use flowscan::config::{Config, LogFormat};

#[test]
fn test_full_config_parses() {
    let toml = r#"
        [provider]
        base_url = "https://query2.finance.yahoo.com"
        timeout_secs = 5
        user_agent = "flowscan-test"

        [scan]
        volume_threshold = 3.0
        oi_threshold = 2.5
        history_path = "last_ticker.txt"

        [telemetry]
        log_level = "debug"
        log_format = "json"
    "#;

    let config: Config = toml::from_str(toml).unwrap();
    assert_eq!(config.provider.timeout_secs, 5);
    assert_eq!(config.scan.volume_threshold, 3.0);
    assert_eq!(config.scan.oi_threshold, 2.5);
    assert_eq!(config.telemetry.log_format, LogFormat::Json);
}

#[test]
fn test_example_config_matches_defaults() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();

    assert_eq!(config.provider.base_url, "https://query2.finance.yahoo.com");
    assert_eq!(config.provider.timeout_secs, 10);
    assert_eq!(config.scan.volume_threshold, 2.0);
    assert_eq!(config.scan.oi_threshold, 2.0);
    assert_eq!(config.telemetry.log_level, "info");
    assert_eq!(config.telemetry.log_format, LogFormat::Pretty);
}

#[test]
fn test_minimal_config_uses_defaults() {
    let toml = r#"
        [telemetry]
        log_level = "info"
    "#;

    let config: Config = toml::from_str(toml).unwrap();
    assert_eq!(config.scan.volume_threshold, 2.0);
    assert_eq!(config.provider.timeout_secs, 10);
}

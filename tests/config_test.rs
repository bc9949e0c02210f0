// Test configuration loading
use scope_scout::config::Config;
use scope_scout::source::ImportEndpoint;
use std::path::Path;

#[test]
fn test_load_test_config() {
    let config_path = Path::new("tests/test_config.toml");
    let config = Config::from_file(config_path).expect("Failed to load test config");

    // Verify endpoint config
    assert_eq!(config.endpoint.base_url, "http://127.0.0.1:8000");
    assert_eq!(config.endpoint.import_path, "/hackerone/import");
    assert_eq!(config.endpoint.timeout_secs, Some(10));

    // Verify logging config
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_endpoint_from_config() {
    let config = Config::load(Some(Path::new("tests/test_config.toml"))).unwrap();

    let endpoint = ImportEndpoint::new(&config.endpoint).expect("Failed to create endpoint");

    assert_eq!(endpoint.url().as_str(), "http://127.0.0.1:8000/hackerone/import");
}

//! Integration tests for swarm-config

use std::io::Write;
use std::time::Duration;
use swarm_config::*;
use temp_env::with_vars;

#[test]
fn test_default_config_validation() {
    let config = SwarmConfig::default();
    assert!(config.validate_all().is_ok());
    assert_eq!(config.target.host, "http://localhost:3000");
}

#[test]
fn test_config_loader_from_env() {
    let vars = vec![
        ("SWARM_HOST", Some("http://api.internal:8080")),
        ("SWARM_HTTP_TIMEOUT", Some("5")),
        ("SWARM_USERS", Some("25")),
        ("SWARM_SPAWN_RATE", Some("2.5")),
        ("SWARM_RUN_TIME", Some("120")),
        ("SWARM_MAX_WAIT_MS", Some("750")),
        ("SWARM_SEED", Some("42")),
        ("SWARM_LOG_LEVEL", Some("debug")),
    ];

    with_vars(vars, || {
        let config = ConfigLoader::new().from_env().unwrap();

        assert_eq!(config.target.host, "http://api.internal:8080");
        assert_eq!(config.http.timeout, Duration::from_secs(5));
        assert_eq!(config.load.users, 25);
        assert_eq!(config.load.spawn_rate, 2.5);
        assert_eq!(config.load.run_time, Some(Duration::from_secs(120)));
        assert_eq!(config.load.max_wait, Duration::from_millis(750));
        assert_eq!(config.load.seed, Some(42));
        assert_eq!(config.logging.level, LogLevel::Debug);
    });
}

#[test]
fn test_invalid_env_values_are_reported() {
    with_vars(vec![("SWARM_USERS", Some("many"))], || {
        let err = ConfigLoader::new().from_env().unwrap_err();
        assert!(matches!(err, ConfigError::EnvError(_)));
        assert!(err.to_string().contains("SWARM_USERS"));
    });

    with_vars(vec![("SWARM_HOST", Some("localhost:3000"))], || {
        assert!(ConfigLoader::new().from_env().is_err());
    });
}

#[test]
fn test_custom_prefix() {
    with_vars(vec![("LOADTEST_USERS", Some("3"))], || {
        let config = ConfigLoader::with_prefix("LOADTEST").from_env().unwrap();
        assert_eq!(config.load.users, 3);
    });
}

#[test]
fn test_yaml_config_roundtrip() {
    let yaml = SwarmConfig::generate_sample();
    let parsed: SwarmConfig = serde_yaml::from_str(&yaml).unwrap();
    assert!(parsed.validate_all().is_ok());
}

#[test]
fn test_load_from_file_with_env_override() {
    let yaml = r#"
target:
  host: "https://staging.example.com"

http:
  timeout: 10
  user_agent: "swarm-test"

load:
  users: 50
  spawn_rate: 5
  run_time: 300
  min_wait_ms: 100
  max_wait_ms: 1000
  tasks:
    register: 1
    get_talks: 4

logging:
  level: warn
  format: json
"#;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    with_vars(vec![("SWARM_USERS", Some("10"))], || {
        let config = ConfigLoader::new().load(Some(file.path())).unwrap();

        assert_eq!(config.target.host, "https://staging.example.com");
        assert_eq!(config.http.timeout, Duration::from_secs(10));
        assert_eq!(config.http.user_agent, "swarm-test");
        assert_eq!(config.load.users, 10);
        assert_eq!(config.load.spawn_rate, 5.0);
        assert_eq!(config.load.min_wait, Duration::from_millis(100));
        assert_eq!(config.load.tasks.get("get_talks"), Some(&4));
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert_eq!(config.logging.format, LogFormat::Json);
    });
}

#[test]
fn test_missing_file_is_an_error() {
    let err = ConfigLoader::new()
        .from_file("/definitely/not/here.yaml")
        .unwrap_err();
    assert!(matches!(err, ConfigError::FileReadError(_)));
}

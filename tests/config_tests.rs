use nomad_backend::{Error, config};
use pretty_assertions::assert_eq;

mod common;
use common::test_utils::{
    INVALID_CONFIG_YAML, SAMPLE_CONFIG_YAML, create_test_config, create_test_config_file,
};

#[tokio::test]
async fn test_load_sample_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_test_config_file(&dir, SAMPLE_CONFIG_YAML).await;

    let config = config::load_from_path(&path).await.unwrap();

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.allowed_origins, vec!["https://nomad.example"]);
    assert_eq!(config.server.logs.level, "debug");
    assert_eq!(config.llm.model, "gemini-1.5-flash");
    assert_eq!(config.llm.timeout_secs, 10);
    assert_eq!(config.auth.token_ttl_secs, 600);
    assert_eq!(config.flights.timeout_secs, 30);
}

#[tokio::test]
async fn test_invalid_config_is_yaml_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_test_config_file(&dir, INVALID_CONFIG_YAML).await;

    let err = config::load_from_path(&path).await.unwrap_err();
    assert!(matches!(err, Error::Yaml(_)));
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = config::load_from_path(dir.path().join("absent.yaml"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_test_config_is_valid() {
    assert!(create_test_config().validate().is_ok());
}

mod types;

pub use types::*;

use crate::{Error, Result};
use axum::http::HeaderValue;
use std::{env, path::Path};
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    load_from_path(config_path).await
}

pub async fn load_from_path(path: impl AsRef<Path>) -> Result<Config> {
    debug!("Loading configuration from: {}", path.as_ref().display());

    let config_str = tokio::fs::read_to_string(path).await?;
    let mut config: Config = serde_yaml::from_str(&config_str)?;

    config.apply_overrides(|key| env::var(key).ok());
    config.validate()?;

    Ok(config)
}

impl Config {
    /// Replaces secrets with values from `lookup` (normally the process
    /// environment) when present and non-empty.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("LLM_API_KEY").or_else(|| get("GEMINI_API_KEY")) {
            self.llm.api_key = key;
        }
        if let Some(key) = get("UNSPLASH_ACCESS_KEY") {
            self.images.access_key = key;
        }
        if let Some(key) = get("UNSPLASH_SECRET_KEY") {
            self.images.secret_key = key;
        }
        if let Some(key) = get("FLIGHT_API_KEY") {
            self.flights.api_key = key;
        }
        if let Some(secret) = get("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.llm.model.trim().is_empty() {
            return Err(Error::config("llm.model must not be empty"));
        }
        if self.llm.api_key.trim().is_empty() {
            return Err(Error::config(
                "llm.api_key is not set (or provide LLM_API_KEY / GEMINI_API_KEY)",
            ));
        }
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(Error::config(
                "auth.jwt_secret is not set (or provide JWT_SECRET)",
            ));
        }
        if self.auth.token_ttl_secs == 0 || self.auth.token_ttl_secs > MAX_TOKEN_TTL_SECS {
            return Err(Error::config(format!(
                "auth.token_ttl_secs must be between 1 and {} (got {})",
                MAX_TOKEN_TTL_SECS, self.auth.token_ttl_secs
            )));
        }
        if self.auth.max_history_messages == 0 {
            return Err(Error::config("auth.max_history_messages must be positive"));
        }
        for origin in &self.server.allowed_origins {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| Error::config(format!("Invalid allowed origin: '{}'", origin)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    const MINIMAL_YAML: &str = r#"
llm:
  api_key: "yaml-key"
  model: "gemini-1.5-flash"
auth:
  jwt_secret: "yaml-secret"
"#;

    #[test]
    fn test_defaults_applied() {
        let config: Config = serde_yaml::from_str(MINIMAL_YAML).unwrap();

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.server.logs.level, "info");
        assert_eq!(config.images.base_url, "https://api.unsplash.com");
        assert_eq!(config.auth.max_history_messages, 20);
        assert_eq!(config.llm.timeout_secs, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides_secrets() {
        let mut config: Config = serde_yaml::from_str(MINIMAL_YAML).unwrap();
        let env: HashMap<&str, &str> = HashMap::from([
            ("GEMINI_API_KEY", "env-llm"),
            ("JWT_SECRET", "env-secret"),
            ("FLIGHT_API_KEY", "  "),
        ]);

        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.llm.api_key, "env-llm");
        assert_eq!(config.auth.jwt_secret, "env-secret");
        // blank values are ignored
        assert_eq!(config.flights.api_key, "");
    }

    #[test]
    fn test_missing_jwt_secret_rejected() {
        let mut config: Config = serde_yaml::from_str(MINIMAL_YAML).unwrap();
        config.auth.jwt_secret.clear();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("jwt_secret"));
    }

    #[test]
    fn test_token_ttl_out_of_range_rejected() {
        let mut config: Config = serde_yaml::from_str(MINIMAL_YAML).unwrap();

        for ttl in [0, MAX_TOKEN_TTL_SECS + 1, 100_000_000_000_000_000, u64::MAX] {
            config.auth.token_ttl_secs = ttl;
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("token_ttl_secs"), "ttl {}", ttl);
        }

        config.auth.token_ttl_secs = MAX_TOKEN_TTL_SECS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_origin_rejected() {
        let mut config: Config = serde_yaml::from_str(MINIMAL_YAML).unwrap();
        config.server.allowed_origins = vec!["http://bad\norigin".to_string()];

        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}

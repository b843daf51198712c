use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub llm: LlmConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub images: ImageSearchConfig,
    #[serde(default)]
    pub flights: FlightConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    pub model: String,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Unsplash credentials and endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSearchConfig {
    #[serde(default = "default_images_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub access_key: String,
    #[serde(default)]
    pub secret_key: String,
    #[serde(default = "default_images_timeout")]
    pub timeout_secs: u64,
}

/// Amadeus flight-offers endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightConfig {
    #[serde(default = "default_flights_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_flights_timeout")]
    pub timeout_secs: u64,
}

/// Longest accepted history-token lifetime (one year).
pub const MAX_TOKEN_TTL_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
    #[serde(default = "default_max_history")]
    pub max_history_messages: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: default_allowed_origins(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ImageSearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_images_base_url(),
            access_key: String::new(),
            secret_key: String::new(),
            timeout_secs: default_images_timeout(),
        }
    }
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            api_url: default_flights_api_url(),
            api_key: String::new(),
            timeout_secs: default_flights_timeout(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_secs: default_token_ttl(),
            max_history_messages: default_max_history(),
        }
    }
}

fn default_llm_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/openai".to_string()
}

fn default_llm_timeout() -> u64 {
    60
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_images_base_url() -> String {
    "https://api.unsplash.com".to_string()
}

fn default_images_timeout() -> u64 {
    15
}

fn default_flights_api_url() -> String {
    "https://test.api.amadeus.com/v2/shopping/flight-offers".to_string()
}

fn default_flights_timeout() -> u64 {
    30
}

fn default_token_ttl() -> u64 {
    24 * 60 * 60
}

fn default_max_history() -> usize {
    20
}

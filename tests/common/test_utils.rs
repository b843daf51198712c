use nomad_backend::{
    config::{
        AuthConfig, Config, FlightConfig, ImageSearchConfig, LlmConfig, LogsConfig, ServerConfig,
    },
    planner::TripInput,
};
use printpdf::image_crate;
use serde_json::Value;
use std::io::Cursor;
use tempfile::TempDir;
use tokio::fs;

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
            allowed_origins: vec!["http://localhost:3000".to_string()],
            logs: LogsConfig {
                level: "debug".to_string(),
            },
        },
        llm: LlmConfig {
            base_url: "https://api.openai.com".to_string(),
            api_key: "test-api-key".to_string(),
            model: "gemini-1.5-flash".to_string(),
            system_prompt: None,
            temperature: None,
            timeout_secs: 5,
        },
        images: ImageSearchConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            access_key: "access".to_string(),
            secret_key: "secret".to_string(),
            timeout_secs: 5,
        },
        flights: FlightConfig {
            api_url: "http://127.0.0.1:9/v2/shopping/flight-offers".to_string(),
            api_key: "flight-key".to_string(),
            timeout_secs: 5,
        },
        auth: AuthConfig {
            jwt_secret: "test-secret".to_string(),
            token_ttl_secs: 3600,
            max_history_messages: 20,
        },
    }
}

/// A small solid-colour JPEG.
pub fn jpeg_bytes() -> Vec<u8> {
    let pixels = image_crate::RgbImage::from_pixel(32, 24, image_crate::Rgb([30, 144, 255]));
    let mut out = Cursor::new(Vec::new());
    image_crate::DynamicImage::ImageRgb8(pixels)
        .write_to(&mut out, image_crate::ImageOutputFormat::Jpeg(85))
        .unwrap();
    out.into_inner()
}

/// Whether the PDF declares at least one image XObject.
pub fn has_image_xobject(pdf: &[u8]) -> bool {
    [&b"/Subtype/Image"[..], &b"/Subtype /Image"[..]]
        .iter()
        .any(|needle| pdf.windows(needle.len()).any(|w| w == *needle))
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> String {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await.unwrap();
    config_path.to_string_lossy().to_string()
}

pub fn trip_input(value: Value) -> TripInput {
    TripInput::from_map(value.as_object().expect("trip input must be an object"))
}

/// Model reply for a two-day Paris trip, wrapped in prose and a fence.
pub const PARIS_ITINERARY_REPLY: &str = r#"Sure! Here is your itinerary:

```json
{
  "summary": "A short cultural getaway in Paris.",
  "daily_itinerary": [
    {
      "day": 1,
      "activities": ["Eiffel Tower", "Seine cruise"],
      "meals": ["Cafe de Flore"],
      "transportation": ["Metro"]
    }
    {
      "day": 2,
      "activities": ["Louvre"],
      "meals": ["Le Comptoir"],
      "transportation": ["Walking",]
    }
  ],
  "accommodations": ["Hotel du Marais"],
  "tips": [
    "Book museum tickets in advance"
    "Carry a light jacket"
  ],
}
```

Enjoy your trip!"#;

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 9000
  allowed_origins:
    - "https://nomad.example"
  logs:
    level: "debug"

llm:
  api_key: "test-api-key"
  model: "gemini-1.5-flash"
  timeout_secs: 10

images:
  access_key: "access"
  secret_key: "secret"

auth:
  jwt_secret: "test-secret"
  token_ttl_secs: 600
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
server:
  port: "not-a-number"

llm:
  # missing required model
  api_key: "x"
"#;

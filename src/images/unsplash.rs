use super::{ImageHit, ImageSearch};
use crate::{Error, Result, config::ImageSearchConfig};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    urls: PhotoUrls,
    user: Photographer,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    small: String,
}

#[derive(Debug, Deserialize)]
struct Photographer {
    name: String,
}

/// Unsplash photo search, one result per query.
#[derive(Clone)]
pub struct UnsplashClient {
    client: reqwest::Client,
    base_url: String,
    access_key: String,
    secret_key: String,
}

impl UnsplashClient {
    pub fn new(config: ImageSearchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_key: config.access_key,
            secret_key: config.secret_key,
        })
    }
}

#[async_trait]
impl ImageSearch for UnsplashClient {
    async fn search(&self, query: &str) -> Result<Option<ImageHit>> {
        let url = format!("{}/search/photos", self.base_url);
        debug!("Searching Unsplash for '{}'", query);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("query", query),
                ("per_page", "1"),
                ("client_id", self.access_key.as_str()),
                ("client_secret", self.secret_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::upstream(
                Some(status.as_u16()),
                format!("Unsplash API returned status code {}", status.as_u16()),
            ));
        }

        let body: SearchResponse = response.json().await?;

        Ok(body.results.into_iter().next().map(|photo| ImageHit {
            url: photo.urls.small,
            attribution_name: photo.user.name,
        }))
    }
}

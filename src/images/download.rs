use crate::{Error, Result};
use std::time::Duration;
use tracing::debug;

/// Fetches image bytes by URL for embedding in exported documents.
#[derive(Clone)]
pub struct PhotoDownloader {
    client: reqwest::Client,
}

impl PhotoDownloader {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { client })
    }

    pub async fn download(&self, url: &str) -> Result<Vec<u8>> {
        debug!("Downloading image {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::upstream(
                Some(status.as_u16()),
                format!("Image download returned status code {}", status.as_u16()),
            ));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

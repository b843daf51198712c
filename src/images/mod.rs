mod download;
mod unsplash;

pub use download::PhotoDownloader;
pub use unsplash::UnsplashClient;

use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Best match for an image query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageHit {
    pub url: String,
    pub attribution_name: String,
}

impl ImageHit {
    pub fn attribution(&self) -> String {
        format!("Photo by {} on Unsplash", self.attribution_name)
    }
}

#[async_trait]
pub trait ImageSearch: Send + Sync {
    /// Returns at most one result; `Ok(None)` when nothing matched.
    async fn search(&self, query: &str) -> Result<Option<ImageHit>>;
}

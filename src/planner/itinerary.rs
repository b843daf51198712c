use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub daily_itinerary: Vec<DayPlan>,
    #[serde(default)]
    pub accommodations: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ImageResult>>,
    /// Keys the model emitted beyond the requested ones.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: u32,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub meals: Vec<String>,
    #[serde(default)]
    pub transportation: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageResult {
    pub url: String,
    pub attribution: String,
    pub search_term: String,
}

impl Itinerary {
    /// True when enrichment attached at least one image.
    pub fn has_images(&self) -> bool {
        self.images.as_ref().is_some_and(|images| !images.is_empty())
    }
}

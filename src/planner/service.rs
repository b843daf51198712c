use super::{ImageResult, Itinerary, TripInput, prompts, recovery};
use crate::{Result, images::ImageSearch, llm::LlmClient};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Turns trip preferences into an image-enriched itinerary.
///
/// External calls are awaited one after another: itinerary generation,
/// search-term generation, then one image lookup per term.
pub struct TripPlanner {
    llm: Arc<dyn LlmClient>,
    images: Arc<dyn ImageSearch>,
}

impl TripPlanner {
    pub fn new(llm: Arc<dyn LlmClient>, images: Arc<dyn ImageSearch>) -> Self {
        Self { llm, images }
    }

    /// Synthesis followed by enrichment. Only synthesis can fail.
    pub async fn plan(&self, input: &TripInput) -> Result<Itinerary> {
        let itinerary = self.synthesize(input).await?;
        Ok(self.enrich(itinerary).await)
    }

    pub async fn synthesize(&self, input: &TripInput) -> Result<Itinerary> {
        info!("Generating itinerary for location: {}", input.location_or_default());

        let prompt = prompts::itinerary_prompt(input);
        let text = self
            .llm
            .generate(&prompt)
            .await
            .inspect_err(|e| error!("Error generating itinerary: {}", e))?;

        info!(
            "Generated itinerary (first 100 chars): {}",
            text.chars().take(100).collect::<String>()
        );

        recovery::parse_object::<Itinerary>(&text)
    }

    /// Attaches images for the itinerary's landmarks. Never fails: every
    /// error along the way degrades to fewer (or no) images.
    pub async fn enrich(&self, mut itinerary: Itinerary) -> Itinerary {
        let terms = self.search_terms(&itinerary).await;
        if terms.is_empty() {
            warn!("No image search terms available. Skipping image enrichment.");
            return itinerary;
        }

        let images = self.fetch_images(&terms).await;
        info!("Fetched {} images for attractions", images.len());
        itinerary.images = Some(images);
        itinerary
    }

    /// Landmark names for image search, or an empty list on any failure.
    pub async fn search_terms(&self, itinerary: &Itinerary) -> Vec<String> {
        let prompt = prompts::image_search_prompt(&itinerary.summary);

        let result = match self.llm.generate(&prompt).await {
            Ok(text) => recovery::parse_array::<String>(&text),
            Err(e) => Err(e),
        };

        match result {
            Ok(terms) => {
                let terms: Vec<String> = terms
                    .into_iter()
                    .map(|term| term.trim().to_string())
                    .filter(|term| !term.is_empty())
                    .collect();
                info!("Generated image search terms: {:?}", terms);
                terms
            }
            Err(e) => {
                error!("Error generating image search terms: {}", e);
                Vec::new()
            }
        }
    }

    /// Looks up each term in order; failed or empty lookups are skipped.
    pub async fn fetch_images(&self, terms: &[String]) -> Vec<ImageResult> {
        let mut images = Vec::new();

        for term in terms {
            match self.images.search(term).await {
                Ok(Some(hit)) => {
                    info!("Fetched image for '{}'", term);
                    images.push(ImageResult {
                        attribution: hit.attribution(),
                        url: hit.url,
                        search_term: term.clone(),
                    });
                }
                Ok(None) => warn!("No image found for '{}'", term),
                Err(e) => error!("Error fetching image for attraction '{}': {}", term, e),
            }
        }

        images
    }
}

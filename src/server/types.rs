use crate::{
    flights::{FlightOffer, PricePoint},
    planner::Itinerary,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use crate::chat::ChatResponse;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TripDetailsRequest {
    pub query: Map<String, Value>,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TripDetailsResponse {
    pub itinerary: Itinerary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FlightPriceRequest {
    pub origin: String,
    pub destination: String,
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct FlightPricesResponse {
    pub flights: Vec<FlightOffer>,
}

#[derive(Debug, Serialize)]
pub struct PriceTrendResponse {
    pub trend: Vec<PricePoint>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOffer {
    pub id: String,
    pub airline: String,
    pub price: f64,
    pub currency: String,
    pub departure: String,
    pub arrival: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: String,
    #[serde(rename = "avgPrice")]
    pub avg_price: f64,
}

// Subset of the Amadeus flight-offers response.

#[derive(Debug, Deserialize)]
pub(crate) struct OffersResponse {
    #[serde(default)]
    pub data: Vec<Offer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Offer {
    pub id: String,
    #[serde(default)]
    pub validating_airline_codes: Vec<String>,
    pub price: OfferPrice,
    #[serde(default)]
    pub itineraries: Vec<OfferItinerary>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OfferPrice {
    pub total: String,
    pub currency: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OfferItinerary {
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Segment {
    pub departure: Endpoint,
    pub arrival: Endpoint,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Endpoint {
    pub at: String,
}

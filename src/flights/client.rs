use super::types::{FlightOffer, Offer, OffersResponse, PricePoint};
use crate::{Error, Result, config::FlightConfig};
use chrono::{Duration, NaiveDate};
use std::time::Duration as StdDuration;
use tracing::{debug, error, info};

const MAX_OFFERS: &str = "5";
const TREND_DAYS_EACH_SIDE: i64 = 3;

/// Client for the Amadeus flight-offers search API.
#[derive(Clone)]
pub struct FlightClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl FlightClient {
    pub fn new(config: FlightConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(StdDuration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url,
            api_key: config.api_key,
        })
    }

    /// Up to five offers for a one-adult trip on `date` (`YYYY-MM-DD`).
    pub async fn get_flight_prices(
        &self,
        origin: &str,
        destination: &str,
        date: &str,
    ) -> Result<Vec<FlightOffer>> {
        debug!("Fetching flight offers {} -> {} on {}", origin, destination, date);

        let response = self
            .client
            .get(&self.api_url)
            .bearer_auth(&self.api_key)
            .query(&[
                ("originLocationCode", origin),
                ("destinationLocationCode", destination),
                ("departureDate", date),
                ("adults", "1"),
                ("nonStop", "false"),
                ("max", MAX_OFFERS),
            ])
            .send()
            .await
            .map_err(|e| {
                error!("An error occurred while requesting flight offers: {}", e);
                Error::upstream(None, "An error occurred while fetching flight data")
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Flight API returned {}: {}", status, body);
            return Err(Error::upstream(
                Some(status.as_u16()),
                format!("Flight API returned {}", status),
            ));
        }

        let body: OffersResponse = response.json().await.map_err(|e| {
            Error::upstream(None, format!("Failed to decode flight offers: {}", e))
        })?;

        body.data.into_iter().map(FlightOffer::try_from).collect()
    }

    /// Average price per day for the week centred on `date`. Days without
    /// offers are left out; any failed lookup fails the whole trend.
    pub async fn get_price_trend(
        &self,
        origin: &str,
        destination: &str,
        date: &str,
    ) -> Result<Vec<PricePoint>> {
        let mut trend = Vec::new();

        for day in trend_dates(date)? {
            let offers = self.get_flight_prices(origin, destination, &day).await?;
            if let Some(avg_price) = average_price(&offers) {
                trend.push(PricePoint {
                    date: day,
                    avg_price,
                });
            }
        }

        info!(
            "Computed price trend {} -> {} with {} points",
            origin,
            destination,
            trend.len()
        );
        Ok(trend)
    }
}

/// The seven dates from three days before `date` to three days after.
pub fn trend_dates(date: &str) -> Result<Vec<String>> {
    let base = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| Error::validation(format!("Invalid date '{}', expected YYYY-MM-DD", date)))?;

    Ok((-TREND_DAYS_EACH_SIDE..=TREND_DAYS_EACH_SIDE)
        .map(|offset| (base + Duration::days(offset)).format("%Y-%m-%d").to_string())
        .collect())
}

fn average_price(offers: &[FlightOffer]) -> Option<f64> {
    if offers.is_empty() {
        return None;
    }
    Some(offers.iter().map(|o| o.price).sum::<f64>() / offers.len() as f64)
}

impl TryFrom<Offer> for FlightOffer {
    type Error = Error;

    fn try_from(offer: Offer) -> Result<Self> {
        let malformed =
            |what: &str| Error::upstream(None, format!("Flight offer {} is missing {}", offer.id, what));

        let airline = offer
            .validating_airline_codes
            .first()
            .cloned()
            .ok_or_else(|| malformed("a validating airline"))?;
        let price = offer
            .price
            .total
            .parse::<f64>()
            .map_err(|_| malformed("a numeric total price"))?;
        let itinerary = offer
            .itineraries
            .first()
            .ok_or_else(|| malformed("an itinerary"))?;
        let (first, last) = match (itinerary.segments.first(), itinerary.segments.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(malformed("flight segments")),
        };

        Ok(Self {
            airline,
            price,
            currency: offer.price.currency.clone(),
            departure: first.departure.at.clone(),
            arrival: last.arrival.at.clone(),
            duration: itinerary.duration.clone(),
            id: offer.id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_trend_dates_span_week() {
        let dates = trend_dates("2025-03-01").unwrap();
        assert_eq!(
            dates,
            vec![
                "2025-02-26",
                "2025-02-27",
                "2025-02-28",
                "2025-03-01",
                "2025-03-02",
                "2025-03-03",
                "2025-03-04",
            ]
        );
    }

    #[test]
    fn test_trend_dates_rejects_bad_format() {
        assert!(matches!(trend_dates("03/01/2025"), Err(Error::Validation(_))));
    }

    #[test]
    fn test_average_price() {
        assert_eq!(average_price(&[]), None);
    }

    #[test]
    fn test_offer_without_segments_is_malformed() {
        let offer: Offer = serde_json::from_value(serde_json::json!({
            "id": "1",
            "validatingAirlineCodes": ["AF"],
            "price": {"total": "120.50", "currency": "EUR"},
            "itineraries": [{"duration": "PT2H", "segments": []}]
        }))
        .unwrap();

        let err = FlightOffer::try_from(offer).unwrap_err();
        assert!(err.to_string().contains("flight segments"));
    }
}

use super::types::{
    ChatRequest, ChatResponse, ErrorResponse, FlightPriceRequest, FlightPricesResponse,
    PriceTrendResponse, TripDetailsRequest, TripDetailsResponse,
};
use crate::{
    Error,
    chat::ChatService,
    flights::FlightClient,
    images::PhotoDownloader,
    pdf,
    planner::{Itinerary, TripInput, TripPlanner},
};
use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<TripPlanner>,
    pub chat: Arc<ChatService>,
    pub flights: Arc<FlightClient>,
    pub photos: Arc<PhotoDownloader>,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::Validation(_) => StatusCode::BAD_REQUEST,
        Error::Upstream {
            status: Some(status),
            ..
        } => StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
        Error::Generation(_) | Error::RecoveryParse { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn api_error(request_id: Uuid, stage: &str, err: Error) -> ApiError {
    let status = status_for(&err);
    match err.candidate() {
        Some(candidate) => error!(%request_id, stage, %candidate, "Request failed: {}", err),
        None => error!(%request_id, stage, "Request failed: {}", err),
    }
    (
        status,
        Json(ErrorResponse {
            detail: err.to_string(),
        }),
    )
}

pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let request_id = Uuid::new_v4();
    info!(%request_id, "Received chat query");

    Json(
        state
            .chat
            .process_query(&request.query, request.token.as_deref())
            .await,
    )
}

async fn plan_trip(
    state: &AppState,
    request_id: Uuid,
    request: &TripDetailsRequest,
) -> Result<Itinerary, ApiError> {
    let input = TripInput::from_map(&request.query);
    info!(%request_id, ?input, "Received trip details input");

    input
        .validate()
        .map_err(|e| api_error(request_id, "validation", e))?;

    state
        .planner
        .plan(&input)
        .await
        .map_err(|e| api_error(request_id, "itinerary", e))
}

pub async fn trip_details(
    State(state): State<AppState>,
    Json(request): Json<TripDetailsRequest>,
) -> Result<Json<TripDetailsResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let itinerary = plan_trip(&state, request_id, &request).await?;

    info!(%request_id, images = itinerary.has_images(), "Trip details ready");
    Ok(Json(TripDetailsResponse {
        itinerary,
        token: request.token,
    }))
}

pub async fn download_trip_details(
    State(state): State<AppState>,
    Json(request): Json<TripDetailsRequest>,
) -> Result<Response, ApiError> {
    let request_id = Uuid::new_v4();
    let itinerary = plan_trip(&state, request_id, &request).await?;

    let bytes = pdf::export_itinerary(&itinerary, &state.photos)
        .await
        .map_err(|e| api_error(request_id, "pdf", e))?;

    info!(%request_id, size = bytes.len(), "Generated itinerary PDF");
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=trip_itinerary.pdf",
            ),
        ],
        bytes,
    )
        .into_response())
}

pub async fn flight_prices(
    State(state): State<AppState>,
    Json(request): Json<FlightPriceRequest>,
) -> Result<Json<FlightPricesResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        origin = %request.origin,
        destination = %request.destination,
        date = %request.date,
        "Received flight price request"
    );

    let flights = state
        .flights
        .get_flight_prices(&request.origin, &request.destination, &request.date)
        .await
        .map_err(|e| api_error(request_id, "flight_prices", e))?;

    Ok(Json(FlightPricesResponse { flights }))
}

pub async fn price_trend(
    State(state): State<AppState>,
    Json(request): Json<FlightPriceRequest>,
) -> Result<Json<PriceTrendResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        origin = %request.origin,
        destination = %request.destination,
        date = %request.date,
        "Received price trend request"
    );

    let trend = state
        .flights
        .get_price_trend(&request.origin, &request.destination, &request.date)
        .await
        .map_err(|e| api_error(request_id, "price_trend", e))?;

    Ok(Json(PriceTrendResponse { trend }))
}

pub mod handlers;
pub mod types;

use crate::{
    Error, Result,
    chat::ChatService,
    config::Config,
    flights::FlightClient,
    history::HistoryCodec,
    images::{PhotoDownloader, UnsplashClient},
    llm::OpenAiClient,
    planner::TripPlanner,
};
use axum::{Router, http::HeaderValue, routing::post};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Wires the production clients from configuration.
pub fn build_state(config: &Config) -> Result<AppState> {
    let llm = Arc::new(OpenAiClient::new(config.llm.clone())?);
    let images = Arc::new(UnsplashClient::new(config.images.clone())?);
    let flights = FlightClient::new(config.flights.clone())?;
    let photos = PhotoDownloader::new(config.images.timeout_secs)?;
    let codec = HistoryCodec::new(&config.auth);

    Ok(AppState {
        planner: Arc::new(TripPlanner::new(llm.clone(), images)),
        chat: Arc::new(ChatService::new(llm, codec, config.llm.system_prompt.clone())),
        flights: Arc::new(flights),
        photos: Arc::new(photos),
    })
}

pub fn router(state: AppState, allowed_origins: &[String]) -> Result<Router> {
    let origins = allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| Error::config(format!("Invalid allowed origin: '{}'", origin)))
        })
        .collect::<Result<Vec<_>>>()?;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    let api = Router::new()
        .route("/chat", post(handlers::chat))
        .route("/trip-details", post(handlers::trip_details))
        .route(
            "/trip-details/download",
            post(handlers::download_trip_details),
        )
        .route("/flights/prices", post(handlers::flight_prices))
        .route("/flights/price-trend", post(handlers::price_trend));

    Ok(Router::new()
        .nest("/api", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config)?;
    let app = router(state, &config.server.allowed_origins)?;

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

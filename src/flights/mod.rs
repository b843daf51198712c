mod client;
mod types;

pub use client::FlightClient;
pub use types::{FlightOffer, PricePoint};

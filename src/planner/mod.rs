mod input;
mod itinerary;
pub mod prompts;
pub mod recovery;
mod service;

pub use input::{NOT_SPECIFIED, TripInput};
pub use itinerary::{DayPlan, ImageResult, Itinerary};
pub use service::TripPlanner;

pub mod chat;
pub mod config;
pub mod error;
pub mod flights;
pub mod history;
pub mod images;
pub mod llm;
pub mod pdf;
pub mod planner;
pub mod server;

pub use error::{Error, Result};

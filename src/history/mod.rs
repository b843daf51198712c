mod token;
mod types;

pub use token::{HistoryClaims, HistoryCodec};
pub use types::Message;

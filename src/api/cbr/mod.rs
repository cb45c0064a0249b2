pub mod client;
pub mod models;

pub use client::CbrClient;
pub use models::{ApiError, DailyResponse, HistoryResponse};

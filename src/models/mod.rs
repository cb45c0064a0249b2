//! Data models for the dollar rate screen
//!
//! Each model is what the services hand back to the screen after the
//! upstream payload has been parsed and defaulted.

pub mod rate;
pub mod reminder;

pub use rate::{RateColor, RateRecord, DEFAULT_RATE};
pub use reminder::Reminder;

//! Rate models

use crate::api::cbr::models::HistoryRecord;

/// Value shown when the upstream document has no `<Value>`
pub const DEFAULT_RATE: &str = "00.0000";

/// Placeholder for a missing record id or date
pub const DEFAULT_FIELD: &str = "0";

/// One historical observation, values kept exactly as received (decimal comma)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateRecord {
    pub id: String,
    pub date: String,
    pub value: String,
}

impl From<HistoryRecord> for RateRecord {
    fn from(record: HistoryRecord) -> Self {
        Self {
            id: record.id.unwrap_or_else(|| DEFAULT_FIELD.to_string()),
            date: record.date.unwrap_or_else(|| DEFAULT_FIELD.to_string()),
            value: record.value.unwrap_or_else(|| DEFAULT_RATE.to_string()),
        }
    }
}

/// Color of the live rate label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateColor {
    /// Live rate is above the target
    Green,
    /// Live rate is at or below the target
    Red,
}

impl RateColor {
    /// ANSI escape sequence used by the terminal renderer
    pub fn ansi(&self) -> &'static str {
        match self {
            RateColor::Green => "\x1b[32m",
            RateColor::Red => "\x1b[31m",
        }
    }
}

//! Reminder models

use chrono::NaiveTime;

/// A local reminder repeating every day at `at`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub identifier: String,
    pub title: String,
    pub body: String,
    pub at: NaiveTime,
}

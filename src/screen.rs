//! The dollar rate screen
//!
//! Owns everything that is displayed: the live rate label and its color, the
//! previous month's history, the target rate text field and its validation
//! indicator. Fetches run as tokio tasks and report back over a channel, so
//! all state changes happen on the task that drives the screen.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::cbr::{ApiError, CbrClient};
use crate::db::{ClientRateStore, StoreError};
use crate::models::{RateColor, RateRecord, Reminder, DEFAULT_RATE};
use crate::services::{compare_service, current_rate_service, history_service};
use crate::services::reminder_service::ReminderScheduler;
use crate::utils::is_valid_rate;

/// Completion of a background fetch
#[derive(Debug)]
pub enum ScreenEvent {
    HistoryLoaded(Result<Vec<RateRecord>, ApiError>),
    CurrentRateLoaded(Result<String, ApiError>),
}

pub struct DollarRateScreen {
    client: Arc<CbrClient>,
    currency_code: String,
    rates: ClientRateStore,
    events: mpsc::UnboundedSender<ScreenEvent>,
    history: Vec<RateRecord>,
    current_rate: Option<String>,
    target_field: String,
    error_visible: bool,
    rate_color: Option<RateColor>,
    fetches: Vec<JoinHandle<()>>,
    reminders: ReminderScheduler,
}

impl DollarRateScreen {
    /// Build the screen and the receiver its fetches report to
    pub fn new(
        client: Arc<CbrClient>,
        currency_code: String,
        rates: ClientRateStore,
        reminder_time: NaiveTime,
    ) -> (Self, mpsc::UnboundedReceiver<ScreenEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let screen = Self {
            client,
            currency_code,
            rates,
            events,
            history: Vec::new(),
            current_rate: None,
            target_field: String::new(),
            error_visible: false,
            rate_color: None,
            fetches: Vec::new(),
            reminders: ReminderScheduler::new(reminder_time),
        };
        (screen, receiver)
    }

    /// Fill the text field from storage and start both fetches
    pub fn load(&mut self, today: NaiveDate) {
        self.load_target();
        self.start_fetches(today);
    }

    /// Read the stored target rate into the text field
    pub fn load_target(&mut self) {
        self.target_field = match self.rates.get() {
            Ok(rate) => rate.unwrap_or_default(),
            Err(e) => {
                warn!("Failed to read stored target rate: {}", e);
                String::new()
            }
        };
        self.error_visible = false;
        debug!("Target rate field: '{}'", self.target_field);
    }

    /// Launch the history and current rate fetches, replacing any in flight
    pub fn start_fetches(&mut self, today: NaiveDate) {
        self.cancel_fetches();

        let client = Arc::clone(&self.client);
        let code = self.currency_code.clone();
        let events = self.events.clone();
        self.fetches.push(tokio::spawn(async move {
            let result = history_service::fetch_last_month(&client, &code, today).await;
            // receiver gone means the screen was closed
            let _ = events.send(ScreenEvent::HistoryLoaded(result));
        }));

        let client = Arc::clone(&self.client);
        let code = self.currency_code.clone();
        let events = self.events.clone();
        self.fetches.push(tokio::spawn(async move {
            let result = current_rate_service::fetch_current_rate(&client, &code, today).await;
            let _ = events.send(ScreenEvent::CurrentRateLoaded(result));
        }));
    }

    fn cancel_fetches(&mut self) {
        for handle in self.fetches.drain(..) {
            handle.abort();
        }
    }

    /// Apply a finished fetch; failures keep the last displayed data
    pub fn apply(&mut self, event: ScreenEvent) {
        match event {
            ScreenEvent::HistoryLoaded(Ok(records)) => {
                self.history = records;
            }
            ScreenEvent::HistoryLoaded(Err(e)) => {
                warn!("Failed to fetch rate history: {}", e);
            }
            ScreenEvent::CurrentRateLoaded(Ok(rate)) => {
                self.current_rate = Some(rate);
                self.choose_color();
            }
            ScreenEvent::CurrentRateLoaded(Err(e)) => {
                warn!("Failed to fetch current rate: {}", e);
            }
        }
    }

    /// Recolor the label; an indeterminate comparison leaves it as is
    fn choose_color(&mut self) {
        let Some(current) = self.current_rate.as_deref() else {
            return;
        };
        if let Some(color) = compare_service::decide_color(current, &self.target_field) {
            self.rate_color = Some(color);
        }
    }

    /// Put `text` in the target field and persist it if it is a valid rate
    ///
    /// Returns `Ok(false)` when the input was rejected; the validation
    /// indicator is then visible and storage is untouched.
    pub fn save_target(&mut self, text: &str) -> Result<bool, StoreError> {
        self.target_field = text.to_string();

        if !is_valid_rate(text) {
            info!("Rejected target rate '{}'", text);
            self.error_visible = true;
            return Ok(false);
        }

        self.error_visible = false;
        self.rates.set(Some(text))?;
        info!("🎯 Target rate saved: {}", text);
        self.choose_color();
        Ok(true)
    }

    /// Schedule the daily reminder if the live rate is above the target right now
    pub fn schedule_notifications(&mut self) -> Option<Reminder> {
        let current = self.current_rate.as_deref().unwrap_or(DEFAULT_RATE);
        self.reminders.schedule(current, &self.target_field).cloned()
    }

    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    pub fn history(&self) -> &[RateRecord] {
        &self.history
    }

    pub fn current_rate(&self) -> Option<&str> {
        self.current_rate.as_deref()
    }

    pub fn target_field(&self) -> &str {
        &self.target_field
    }

    pub fn is_error_visible(&self) -> bool {
        self.error_visible
    }

    pub fn rate_color(&self) -> Option<RateColor> {
        self.rate_color
    }

    pub fn reminder(&self) -> Option<&Reminder> {
        self.reminders.scheduled()
    }

    /// Abort in-flight fetches and the pending reminder
    pub fn close(&mut self) {
        self.cancel_fetches();
        self.reminders.cancel();
    }
}

impl Drop for DollarRateScreen {
    fn drop(&mut self) {
        self.close();
    }
}

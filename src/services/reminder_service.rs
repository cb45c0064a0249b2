use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::models::Reminder;
use crate::services::compare_service;

/// Only one reminder exists at a time; scheduling again replaces it
pub const REMINDER_ID: &str = "dollar-rate-reminder";

const REMINDER_TITLE: &str = "Notification";
const REMINDER_BODY: &str = "Hurry up! The dollar rate is below your target!";

/// Build the daily reminder firing at `at` local time
pub fn build_reminder(at: NaiveTime) -> Reminder {
    Reminder {
        identifier: REMINDER_ID.to_string(),
        title: REMINDER_TITLE.to_string(),
        body: REMINDER_BODY.to_string(),
        at,
    }
}

/// Next occurrence of `at` strictly after `now`
pub fn next_fire_after(now: NaiveDateTime, at: NaiveTime) -> NaiveDateTime {
    let candidate = now.date().and_time(at);
    if candidate > now {
        candidate
    } else {
        candidate + Duration::days(1)
    }
}

/// Owns the pending daily reminder task
pub struct ReminderScheduler {
    at: NaiveTime,
    scheduled: Option<Reminder>,
    handle: Option<JoinHandle<()>>,
}

impl ReminderScheduler {
    pub fn new(at: NaiveTime) -> Self {
        Self {
            at,
            scheduled: None,
            handle: None,
        }
    }

    /// Compare once and, when the current rate is above the target, (re)schedule
    /// the daily reminder. The comparison is not repeated when the reminder fires.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, current: &str, target: &str) -> Option<&Reminder> {
        if !compare_service::is_above_target(current, target) {
            debug!("Reminder not scheduled: current={} target={}", current, target);
            return None;
        }

        self.cancel();

        let reminder = build_reminder(self.at);
        let task_reminder = reminder.clone();
        self.handle = Some(tokio::spawn(async move {
            loop {
                let now = Local::now().naive_local();
                let next = next_fire_after(now, task_reminder.at);
                let wait = (next - now).to_std().unwrap_or_default();
                debug!("Reminder '{}' fires at {}", task_reminder.identifier, next);
                tokio::time::sleep(wait).await;

                info!("🔔 Delivering reminder '{}'", task_reminder.identifier);
                println!("🔔 {}: {}", task_reminder.title, task_reminder.body);
            }
        }));

        info!("⏰ Daily reminder scheduled at {}", self.at.format("%H:%M"));
        self.scheduled = Some(reminder);
        self.scheduled.as_ref()
    }

    pub fn scheduled(&self) -> Option<&Reminder> {
        self.scheduled.as_ref()
    }

    /// Drop the pending reminder, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.scheduled = None;
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
    }

    fn datetime(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 12, d)
            .expect("valid date")
            .and_time(at(h, m))
    }

    #[test]
    fn test_next_fire_same_day() {
        assert_eq!(next_fire_after(datetime(1, 8, 30), at(10, 0)), datetime(1, 10, 0));
    }

    #[test]
    fn test_next_fire_next_day() {
        assert_eq!(next_fire_after(datetime(1, 10, 0), at(10, 0)), datetime(2, 10, 0));
        assert_eq!(next_fire_after(datetime(1, 18, 0), at(10, 0)), datetime(2, 10, 0));
    }

    #[test]
    fn test_next_fire_crosses_year() {
        let now = datetime(31, 23, 0);
        let expected = NaiveDate::from_ymd_opt(2022, 1, 1)
            .expect("valid date")
            .and_time(at(10, 0));
        assert_eq!(next_fire_after(now, at(10, 0)), expected);
    }

    #[tokio::test]
    async fn test_schedules_only_above_target() {
        let mut scheduler = ReminderScheduler::new(at(10, 0));

        assert!(scheduler.schedule("70,0000", "75,0000").is_none());
        assert!(scheduler.schedule("75,0000", "75,0000").is_none());
        assert!(scheduler.schedule("1x,00", "75,0000").is_none());
        assert!(scheduler.scheduled().is_none());

        let reminder = scheduler.schedule("80,0000", "75,0000").cloned();
        assert_eq!(reminder, Some(build_reminder(at(10, 0))));
        assert!(scheduler.scheduled().is_some());

        scheduler.cancel();
        assert!(scheduler.scheduled().is_none());
    }

    #[tokio::test]
    async fn test_failed_comparison_keeps_existing_reminder() {
        let mut scheduler = ReminderScheduler::new(at(10, 0));
        scheduler.schedule("80,0000", "75,0000");

        assert!(scheduler.schedule("70,0000", "75,0000").is_none());
        assert_eq!(scheduler.scheduled().map(|r| r.identifier.as_str()), Some(REMINDER_ID));
    }
}

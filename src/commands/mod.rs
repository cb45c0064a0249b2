use chrono::NaiveDate;
use tracing::{error, info};

use crate::screen::DollarRateScreen;
use crate::utils::Table;

const ANSI_RESET: &str = "\x1b[0m";

/// What the input loop should do after a command
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Handle one line of user input and return the text to print
pub fn handle_line(screen: &mut DollarRateScreen, line: &str, today: NaiveDate) -> (Flow, String) {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.is_empty() {
        return (Flow::Continue, String::new());
    }

    let command = parts[0];
    let args = &parts[1..];

    let output = match command {
        "$rate" => render_rate(screen),
        "$history" | "$hist" => render_history(screen),
        "$target" => save_target(screen, args),
        "$remind" | "$notify" => schedule_reminder(screen),
        "$refresh" => {
            screen.start_fetches(today);
            "🔄 Refreshing rates...".to_string()
        }
        "$help" => help(),
        "$quit" | "$exit" => return (Flow::Quit, "👋 Bye!".to_string()),
        _ => format!("❓ Unknown command '{}'. Type `$help` for the list of commands.", command),
    };

    (Flow::Continue, output)
}

/// Live rate label, colored against the target when a decision exists
pub fn render_rate(screen: &DollarRateScreen) -> String {
    let rate = screen.current_rate().unwrap_or("—");
    let label = match screen.rate_color() {
        Some(color) => format!("{}{}{}", color.ansi(), rate, ANSI_RESET),
        None => rate.to_string(),
    };

    let target = match screen.target_field() {
        "" => "not set".to_string(),
        target => target.to_string(),
    };

    let mut output = format!("💵 {}: {}\n🎯 Target: {}", screen.currency_code(), label, target);
    if screen.is_error_visible() {
        output.push_str("\n❌ Invalid rate. Use the format 75,1234");
    }
    if let Some(reminder) = screen.reminder() {
        output.push_str(&format!("\n⏰ Daily reminder at {}", reminder.at.format("%H:%M")));
    }
    output
}

pub fn render_history(screen: &DollarRateScreen) -> String {
    let mut table = Table::new(&["Date", "Value"]);
    for record in screen.history() {
        table.add_row(&[record.date.as_str(), record.value.as_str()]);
    }

    if table.is_empty() {
        return "📭 No rates for the previous month yet.".to_string();
    }
    table.render()
}

/// The whole argument text is the field content, so trailing words fail validation
fn save_target(screen: &mut DollarRateScreen, args: &[&str]) -> String {
    if args.is_empty() {
        return "Usage: `$target <rate>`, e.g. `$target 75,1234`".to_string();
    }
    let rate = args.join(" ");

    match screen.save_target(&rate) {
        Ok(true) => format!("✅ Target rate set to {}", rate),
        Ok(false) => "❌ Invalid rate. Use the format 75,1234".to_string(),
        Err(e) => {
            error!("Failed to store target rate: {}", e);
            format!("⚠️ Could not save target rate: {}", e)
        }
    }
}

fn schedule_reminder(screen: &mut DollarRateScreen) -> String {
    match screen.schedule_notifications() {
        Some(reminder) => {
            info!("Reminder '{}' scheduled", reminder.identifier);
            format!("⏰ Daily reminder set for {}", reminder.at.format("%H:%M"))
        }
        None => "No reminder scheduled: the current rate is not above your target.".to_string(),
    }
}

fn help() -> String {
    [
        "Commands:",
        "  $rate              show the current rate and your target",
        "  $history           show last month's rates",
        "  $target <rate>     set your target rate (e.g. 75,1234)",
        "  $remind            schedule a daily reminder if the rate is above target",
        "  $refresh           fetch rates again",
        "  $quit              exit",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::cbr::CbrClient;
    use crate::db::{ClientRateStore, MemoryStore};
    use crate::models::RateRecord;
    use crate::screen::ScreenEvent;
    use chrono::NaiveTime;
    use std::sync::Arc;
    use std::time::Duration;

    fn screen() -> (DollarRateScreen, ClientRateStore) {
        let rates = ClientRateStore::new(Arc::new(MemoryStore::new()));
        let client = CbrClient::with_base_url("http://127.0.0.1:1".to_string(), Duration::from_secs(1))
            .expect("client");
        let (screen, _events) = DollarRateScreen::new(
            Arc::new(client),
            "R01235".to_string(),
            rates.clone(),
            NaiveTime::from_hms_opt(10, 0, 0).expect("valid time"),
        );
        (screen, rates)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 1, 15).expect("valid date")
    }

    #[test]
    fn test_target_command() {
        let (mut screen, rates) = screen();

        let (flow, output) = handle_line(&mut screen, "$target 7,1234", today());
        assert_eq!(flow, Flow::Continue);
        assert!(output.contains("Invalid rate"));
        assert!(render_rate(&screen).contains("Invalid rate"));
        assert_eq!(rates.get().expect("get"), None);

        let (_, output) = handle_line(&mut screen, "$target 71,2345", today());
        assert!(output.contains("71,2345"));
        assert!(!render_rate(&screen).contains("Invalid rate"));
        assert_eq!(rates.get().expect("get").as_deref(), Some("71,2345"));
    }

    #[test]
    fn test_target_with_trailing_text_is_rejected() {
        let (mut screen, rates) = screen();

        let (_, output) = handle_line(&mut screen, "$target 75,1234 abc", today());

        assert!(output.contains("Invalid rate"));
        assert!(screen.is_error_visible());
        assert_eq!(screen.target_field(), "75,1234 abc");
        assert_eq!(rates.get().expect("get"), None);
    }

    #[test]
    fn test_target_without_argument() {
        let (mut screen, _) = screen();
        let (_, output) = handle_line(&mut screen, "$target", today());
        assert!(output.starts_with("Usage"));
    }

    #[test]
    fn test_rate_rendering() {
        let (mut screen, _) = screen();
        assert!(render_rate(&screen).contains("not set"));

        screen.save_target("75,0000").expect("save");
        screen.apply(ScreenEvent::CurrentRateLoaded(Ok("80,5000".to_string())));

        let output = render_rate(&screen);
        assert!(output.contains("R01235: \x1b[32m80,5000\x1b[0m"));
        assert!(output.contains("75,0000"));
        assert!(!output.contains("Daily reminder"));
    }

    #[tokio::test]
    async fn test_rate_rendering_shows_reminder() {
        let (mut screen, _) = screen();
        screen.save_target("75,0000").expect("save");
        screen.apply(ScreenEvent::CurrentRateLoaded(Ok("80,5000".to_string())));

        let (_, output) = handle_line(&mut screen, "$remind", today());
        assert!(output.contains("10:00"));

        assert!(render_rate(&screen).contains("⏰ Daily reminder at 10:00"));
    }

    #[test]
    fn test_history_rendering() {
        let (mut screen, _) = screen();
        assert!(render_history(&screen).contains("No rates"));

        screen.apply(ScreenEvent::HistoryLoaded(Ok(vec![RateRecord {
            id: "R01235".to_string(),
            date: "01.12.2020".to_string(),
            value: "76,9171".to_string(),
        }])));

        let output = render_history(&screen);
        assert!(output.contains("01.12.2020 | 76,9171"));
    }

    #[test]
    fn test_quit_and_unknown() {
        let (mut screen, _) = screen();
        assert_eq!(handle_line(&mut screen, "$quit", today()).0, Flow::Quit);
        assert_eq!(handle_line(&mut screen, "   ", today()), (Flow::Continue, String::new()));
        assert!(handle_line(&mut screen, "$nope", today()).1.contains("Unknown command"));
    }
}

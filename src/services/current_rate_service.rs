use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::api::cbr::{ApiError, CbrClient, DailyResponse};
use crate::models::DEFAULT_RATE;
use crate::utils::format_request_date;

/// Fetch today's rate of `currency_code` from the daily snapshot
pub async fn fetch_current_rate(
    client: &CbrClient,
    currency_code: &str,
    today: NaiveDate,
) -> Result<String, ApiError> {
    let date = format_request_date(today);
    debug!("Fetching daily snapshot for {}", date);

    let response = client.fetch_daily(&date).await?;
    let rate = select_rate(&response, currency_code);

    info!(
        "💵 Current rate for {} on {}: {}",
        currency_code,
        response.date.as_deref().unwrap_or("?"),
        rate
    );
    Ok(rate)
}

/// Value of the `<Valute>` whose `ID` equals `currency_code`
pub fn select_rate(response: &DailyResponse, currency_code: &str) -> String {
    let valute = response
        .valutes
        .iter()
        .find(|v| v.id.as_deref() == Some(currency_code));

    match valute.and_then(|v| v.value.clone()) {
        Some(value) => value,
        None => {
            warn!("No rate for {} in daily snapshot, using default", currency_code);
            DEFAULT_RATE.to_string()
        }
    }
}

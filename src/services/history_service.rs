use chrono::NaiveDate;
use tracing::{debug, info};

use crate::api::cbr::{ApiError, CbrClient, HistoryResponse};
use crate::models::RateRecord;
use crate::utils::{format_request_date, previous_month_range};

/// Fetch the rates of `currency_code` between `start` and `end` (inclusive)
pub async fn fetch_history(
    client: &CbrClient,
    currency_code: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<RateRecord>, ApiError> {
    let date_from = format_request_date(start);
    let date_to = format_request_date(end);
    debug!("Fetching {} history {} - {}", currency_code, date_from, date_to);

    let response = client.fetch_history(currency_code, &date_from, &date_to).await?;
    let records = to_records(response);

    info!("📈 Received {} history records for {}", records.len(), currency_code);
    Ok(records)
}

/// Fetch the whole previous month relative to `today`
pub async fn fetch_last_month(
    client: &CbrClient,
    currency_code: &str,
    today: NaiveDate,
) -> Result<Vec<RateRecord>, ApiError> {
    let (start, end) = previous_month_range(today);
    fetch_history(client, currency_code, start, end).await
}

/// One record per `<Record>`, document order, missing fields defaulted
pub fn to_records(response: HistoryResponse) -> Vec<RateRecord> {
    response.records.into_iter().map(RateRecord::from).collect()
}

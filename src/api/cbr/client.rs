use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::models::{ApiError, DailyResponse, HistoryResponse};

/// Central Bank of Russia XML API client
pub struct CbrClient {
    http_client: HttpClient,
    base_url: String,
}

impl CbrClient {
    pub const DEFAULT_BASE_URL: &'static str = "http://www.cbr.ru/scripts";

    /// Create a new client against `base_url` (the public endpoint or a test server)
    pub fn with_base_url(base_url: String, timeout: Duration) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::ClientError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Map a non-2xx status to an error, keeping the body for the log
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();

        match status_code {
            500..=599 => {
                warn!("Server error {}: {}", status_code, body_text);
                ApiError::ServerError(status_code, body_text)
            }
            _ => ApiError::HttpError(status_code, body_text),
        }
    }

    /// GET an XML document and deserialize it
    async fn get_xml<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!("GET {}", url);

        let response = self.http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        // `text()` decodes using the charset of the response (windows-1251 upstream)
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::RequestError(format!("Failed to read body: {}", e)))?;

        parse_xml(&body)
    }

    /// GET /XML_dynamic.asp
    ///
    /// Retrieves the daily rates of one currency between two dates.
    ///
    /// # Arguments
    /// * `currency_code` - CBR internal currency id (e.g. `R01235` for USD)
    /// * `date_from` - First day, `dd/mm/yyyy`
    /// * `date_to` - Last day, `dd/mm/yyyy`
    pub async fn fetch_history(
        &self,
        currency_code: &str,
        date_from: &str,
        date_to: &str,
    ) -> Result<HistoryResponse, ApiError> {
        let url = format!(
            "{}/XML_dynamic.asp?date_req1={}&date_req2={}&VAL_NM_RQ={}",
            self.base_url, date_from, date_to, currency_code
        );
        self.get_xml(&url).await
    }

    /// GET /XML_daily.asp
    ///
    /// Retrieves the snapshot of all quoted currencies for one day.
    ///
    /// # Arguments
    /// * `date` - Requested day, `dd/mm/yyyy`
    pub async fn fetch_daily(&self, date: &str) -> Result<DailyResponse, ApiError> {
        let url = format!("{}/XML_daily.asp?date_req={}", self.base_url, date);
        self.get_xml(&url).await
    }
}

/// Deserialize an upstream XML document
pub fn parse_xml<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    quick_xml::de::from_str(body)
        .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
}

#[cfg(test)]
/// Serve exactly one HTTP response on a local port and return its base URL
pub(crate) async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().expect("no local addr");

    tokio::spawn(async move {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let (mut socket, _) = listener.accept().await.expect("accept failed");
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.expect("read failed");
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let response = format!(
            "{}\r\nContent-Type: application/xml; charset=windows-1251\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.expect("write failed");
        socket.shutdown().await.ok();
    });

    format!("http://{}", addr)
}

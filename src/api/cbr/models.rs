use serde::Deserialize;
use thiserror::Error;

/// Response from `XML_dynamic.asp`
///
/// ```xml
/// <ValCurs ID="R01235" DateRange1="01.12.2020" DateRange2="31.12.2020" name="Foreign Currency Market Dynamic">
///     <Record Date="01.12.2020" Id="R01235">
///         <Nominal>1</Nominal>
///         <Value>76,9171</Value>
///     </Record>
/// </ValCurs>
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    #[serde(rename = "Record", default)]
    pub records: Vec<HistoryRecord>,
}

/// One `<Record>` of the dynamic response
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryRecord {
    #[serde(rename = "@Id")]
    pub id: Option<String>,
    #[serde(rename = "@Date")]
    pub date: Option<String>,
    #[serde(rename = "Value")]
    pub value: Option<String>,
}

/// Response from `XML_daily.asp`: one `<Valute>` per quoted currency
#[derive(Debug, Clone, Deserialize)]
pub struct DailyResponse {
    #[serde(rename = "@Date")]
    pub date: Option<String>,
    #[serde(rename = "Valute", default)]
    pub valutes: Vec<DailyValute>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyValute {
    #[serde(rename = "@ID")]
    pub id: Option<String>,
    #[serde(rename = "Value")]
    pub value: Option<String>,
}

/// Errors raised at the fetch boundary
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client construction failed
    #[error("Client error: {0}")]
    ClientError(String),
    /// Network/request error, including timeouts
    #[error("Request Error: {0}")]
    RequestError(String),
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Other non-2xx statuses
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Body is not the expected XML document
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
}

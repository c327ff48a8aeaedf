use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

/// A single PTAX quote. `quote_date` is the calendar date that actually
/// produced data, which may be earlier than the requested target date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub buy_rate: f64,
    pub sell_rate: f64,
    pub quote_date: NaiveDate,
    pub quoted_at: Option<String>,
}

/// Per-invocation fetch parameters.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub target_date: NaiveDate,
    pub max_back_days: u32,
    pub request_timeout: Duration,
    pub max_retries_per_date: u32,
    pub currency_code: String,
    pub api_base_url: String,
}

/// What the transport hands back for one HTTP attempt.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: content_type.into(),
            body: body.into(),
        }
    }
}

/// OData envelope returned by both PTAX endpoints.
#[derive(Debug, Deserialize)]
pub struct QuotePayload {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub value: Vec<QuoteEntry>,
}

/// `"value": null` reads the same as an empty array.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<QuoteEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<QuoteEntry>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteEntry {
    #[serde(rename = "cotacaoCompra")]
    pub buy_rate: f64,
    #[serde(rename = "cotacaoVenda")]
    pub sell_rate: f64,
    #[serde(rename = "dataHoraCotacao", default)]
    pub quoted_at: Option<String>,
}

impl QuoteEntry {
    pub fn into_quote(self, quote_date: NaiveDate) -> Quote {
        Quote {
            buy_rate: self.buy_rate,
            sell_rate: self.sell_rate,
            quote_date,
            quoted_at: self.quoted_at,
        }
    }
}

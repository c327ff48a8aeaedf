use chrono::NaiveDate;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Failure to obtain any HTTP response for a request.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl TransportError {
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(timeout)
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Http(err)
        }
    }
}

/// Last condition observed before the back-day window ran out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundReason {
    /// The server answered 200 with an empty `value` array.
    NoData { date: NaiveDate },
    /// The server kept answering 5xx after every retry.
    ServerUnavailable { date: NaiveDate, status: u16 },
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFoundReason::NoData { date } => {
                write!(f, "no quote published for {}", date.format("%m-%d-%Y"))
            }
            NotFoundReason::ServerUnavailable { date, status } => write!(
                f,
                "server kept answering {} for {}",
                status,
                date.format("%m-%d-%Y")
            ),
        }
    }
}

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("transport failure requesting {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("request rejected with status {status} at {url}")]
    RejectedStatus { status: u16, url: String },

    #[error("expected JSON, received Content-Type={content_type:?}, body={snippet:?}")]
    UnexpectedContentType { content_type: String, snippet: String },

    #[error("malformed quote payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("no quote found within {back_days} day(s) before {target_date}: {reason}")]
    QuoteNotFound {
        target_date: NaiveDate,
        back_days: u32,
        reason: NotFoundReason,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value {value:?} for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl QuoteError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            QuoteError::Transport { .. } | QuoteError::QuoteNotFound { .. } => ErrorSeverity::Medium,
            QuoteError::RejectedStatus { .. }
            | QuoteError::UnexpectedContentType { .. }
            | QuoteError::MalformedPayload(_) => ErrorSeverity::High,
            QuoteError::IoError(_)
            | QuoteError::ConfigError { .. }
            | QuoteError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            QuoteError::Transport { .. } => {
                "Check network connectivity or raise the request timeout"
            }
            QuoteError::RejectedStatus { .. } => {
                "Check the currency code and the API base URL"
            }
            QuoteError::UnexpectedContentType { .. } | QuoteError::MalformedPayload(_) => {
                "The service returned an unexpected payload; verify the API base URL points at the PTAX OData service"
            }
            QuoteError::QuoteNotFound { .. } => {
                "Try an earlier date or widen the back-day window"
            }
            QuoteError::IoError(_) => "Check that the file exists and is readable",
            QuoteError::ConfigError { .. } | QuoteError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            QuoteError::Transport { .. } => "Could not reach the quote service".to_string(),
            QuoteError::RejectedStatus { status, .. } => {
                format!("The quote service rejected the request (HTTP {})", status)
            }
            QuoteError::QuoteNotFound { target_date, back_days, .. } => format!(
                "No quote published between {} and the {} day(s) before it",
                target_date.format("%m-%d-%Y"),
                back_days
            ),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QuoteError>;

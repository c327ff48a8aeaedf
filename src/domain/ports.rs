use crate::domain::model::RawResponse;
use crate::utils::error::TransportError;
use async_trait::async_trait;
use std::time::Duration;

/// Minimal HTTP capability needed by the fetcher. Any response, whatever its
/// status, is `Ok`; `Err` means no response was obtained at all.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str, timeout: Duration) -> Result<RawResponse, TransportError>;
}

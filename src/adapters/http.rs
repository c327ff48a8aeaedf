use crate::core::payload::ERROR_BODY_MAX_BYTES;
use crate::domain::model::RawResponse;
use crate::domain::ports::HttpTransport;
use crate::utils::error::TransportError;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use std::time::Duration;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// [`HttpTransport`] backed by a single shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, timeout: Duration) -> Result<RawResponse, TransportError> {
        tracing::debug!("GET {} (timeout {:?})", url, timeout);
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(e, timeout))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = if status == 200 {
            response
                .bytes()
                .await
                .map_err(|e| TransportError::from_reqwest(e, timeout))?
                .to_vec()
        } else {
            read_error_body(response).await
        };

        tracing::debug!("Response status: {} ({} bytes)", status, body.len());
        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Read at most [`ERROR_BODY_MAX_BYTES`] of a non-200 body. The status is
/// what matters here, so a body that breaks off keeps whatever arrived.
async fn read_error_body(mut response: Response) -> Vec<u8> {
    let mut body = Vec::new();
    while body.len() < ERROR_BODY_MAX_BYTES {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                let take = chunk.len().min(ERROR_BODY_MAX_BYTES - body.len());
                body.extend_from_slice(&chunk[..take]);
            }
            Ok(None) => break,
            Err(e) => {
                tracing::debug!("Error body cut short after {} bytes: {}", body.len(), e);
                break;
            }
        }
    }
    body
}

pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::http::ReqwestTransport;
pub use app::report::{render_quote, PriceSelection};
pub use config::FetchSettings;
pub use crate::core::{backoff::Backoff, fetcher::QuoteFetcher, request::build_url};
pub use domain::model::{FetchConfig, Quote, RawResponse};
pub use domain::ports::HttpTransport;
pub use utils::error::{NotFoundReason, QuoteError, Result, TransportError};

/// Fetch one quote over HTTPS with the default backoff schedule.
pub async fn fetch_quote(config: &FetchConfig) -> Result<Quote> {
    let transport = ReqwestTransport::new().map_err(|source| QuoteError::Transport {
        url: config.api_base_url.clone(),
        source,
    })?;
    QuoteFetcher::new(transport).fetch_quote(config).await
}

use crate::core::backoff::Backoff;
use crate::core::payload::{error_body_snippet, parse_entries};
use crate::core::request::{build_url, PTAX_DATE_FORMAT};
use crate::domain::model::{FetchConfig, Quote};
use crate::domain::ports::HttpTransport;
use crate::utils::error::{NotFoundReason, QuoteError, Result};
use chrono::{Days, NaiveDate};
use std::time::Duration;

/// What to do after one HTTP attempt for a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptAction {
    /// 200: stop retrying and validate the body.
    Accept,
    /// 5xx with retries left.
    RetryAfter(Duration),
    /// 5xx with no retries left: give up on this date.
    Abandon,
    /// Anything else: the whole fetch fails.
    Reject,
}

pub fn decide_attempt(status: u16, attempt: u32, max_retries: u32, backoff: &Backoff) -> AttemptAction {
    match status {
        200 => AttemptAction::Accept,
        s if s >= 500 && attempt < max_retries => AttemptAction::RetryAfter(backoff.delay(attempt)),
        s if s >= 500 => AttemptAction::Abandon,
        _ => AttemptAction::Reject,
    }
}

/// How a single date ended, short of a fatal error.
#[derive(Debug, Clone, PartialEq)]
pub enum DateOutcome {
    Found(Quote),
    NoData,
    ServerUnavailable { status: u16 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    /// Trying `target_date - n` days.
    TryingDate(u32),
    Found(Quote),
    Exhausted(NotFoundReason),
}

/// Transition of the date-fallback loop after `date` (offset `offset`) ended with `outcome`.
pub fn advance(outcome: DateOutcome, offset: u32, date: NaiveDate, max_back_days: u32) -> FetchState {
    let reason = match outcome {
        DateOutcome::Found(quote) => return FetchState::Found(quote),
        DateOutcome::NoData => NotFoundReason::NoData { date },
        DateOutcome::ServerUnavailable { status } => NotFoundReason::ServerUnavailable { date, status },
    };

    if offset < max_back_days {
        FetchState::TryingDate(offset + 1)
    } else {
        FetchState::Exhausted(reason)
    }
}

/// Fetches one PTAX quote, retrying server errors with exponential backoff and
/// falling back to earlier dates when a date has no data or stays unavailable.
///
/// Dates and attempts run strictly one after another. Each request is bounded
/// by `request_timeout`, but the fetch as a whole is not: in the worst case it
/// takes `(max_back_days + 1) * (max_retries_per_date + 1)` timeouts plus the
/// backoff waits of every date (see [`QuoteFetcher::worst_case_duration`]).
/// Wrap the call in `tokio::time::timeout` to bound it.
pub struct QuoteFetcher<T: HttpTransport> {
    transport: T,
    backoff: Backoff,
}

impl<T: HttpTransport> QuoteFetcher<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            backoff: Backoff::default(),
        }
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn worst_case_duration(&self, config: &FetchConfig) -> Duration {
        let dates = config.max_back_days.saturating_add(1);
        let attempts = config.max_retries_per_date.saturating_add(1);
        let per_date = config
            .request_timeout
            .saturating_mul(attempts)
            .saturating_add(self.backoff.total_delay(config.max_retries_per_date));
        per_date.saturating_mul(dates)
    }

    pub async fn fetch_quote(&self, config: &FetchConfig) -> Result<Quote> {
        let mut state = FetchState::TryingDate(0);

        loop {
            state = match state {
                FetchState::TryingDate(offset) => {
                    let date = config
                        .target_date
                        .checked_sub_days(Days::new(offset.into()))
                        .ok_or_else(|| QuoteError::ConfigError {
                            message: format!(
                                "back-day window of {} days from {} leaves the supported date range",
                                config.max_back_days, config.target_date
                            ),
                        })?;
                    let outcome = self.fetch_date(config, date).await?;
                    advance(outcome, offset, date, config.max_back_days)
                }
                FetchState::Found(quote) => return Ok(quote),
                FetchState::Exhausted(reason) => {
                    return Err(QuoteError::QuoteNotFound {
                        target_date: config.target_date,
                        back_days: config.max_back_days,
                        reason,
                    })
                }
            };
        }
    }

    async fn fetch_date(&self, config: &FetchConfig, date: NaiveDate) -> Result<DateOutcome> {
        let url = build_url(&config.api_base_url, &config.currency_code, date);
        let day = date.format(PTAX_DATE_FORMAT).to_string();
        tracing::info!("Requesting quote: {}", url);

        let mut attempt = 0;
        let response = loop {
            let response = self
                .transport
                .get(&url, config.request_timeout)
                .await
                .map_err(|source| QuoteError::Transport {
                    url: url.clone(),
                    source,
                })?;

            match decide_attempt(response.status, attempt, config.max_retries_per_date, &self.backoff) {
                AttemptAction::Accept => break response,
                AttemptAction::RetryAfter(wait) => {
                    tracing::warn!(
                        "Server returned {} for {} (attempt {}/{}), retrying in {:?}; body={:?}",
                        response.status,
                        day,
                        attempt + 1,
                        config.max_retries_per_date,
                        wait,
                        error_body_snippet(&response.body)
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
                AttemptAction::Abandon => {
                    tracing::warn!(
                        "Server returned {} for {} after all retries, giving up on this date; body={:?}",
                        response.status,
                        day,
                        error_body_snippet(&response.body)
                    );
                    return Ok(DateOutcome::ServerUnavailable {
                        status: response.status,
                    });
                }
                AttemptAction::Reject => {
                    return Err(QuoteError::RejectedStatus {
                        status: response.status,
                        url,
                    })
                }
            }
        };

        let entries = parse_entries(&response)?;
        match entries.into_iter().next() {
            Some(entry) => Ok(DateOutcome::Found(entry.into_quote(date))),
            None => {
                tracing::debug!("No quote published for {}", day);
                Ok(DateOutcome::NoData)
            }
        }
    }
}

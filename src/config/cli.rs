use crate::app::report::PriceSelection;
use crate::config::FetchSettings;
use crate::utils::error::{QuoteError, Result};
use chrono::{Days, NaiveDate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "ptax-quote")]
#[command(about = "Fetch a BCB PTAX exchange quote, retrying server errors and falling back to earlier days")]
pub struct CliArgs {
    /// Base URL of the PTAX OData service (overrides BCB_API_BASE_URL)
    #[arg(long)]
    pub api: Option<String>,

    /// Per-request timeout in seconds (overrides BCB_TIMEOUT_SECONDS)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Retries per date on 5xx responses (overrides BCB_MAX_RETRIES)
    #[arg(long)]
    pub retries: Option<u32>,

    /// How many earlier days to try (overrides BCB_MAX_BACK_DAYS)
    #[arg(long)]
    pub backdays: Option<u32>,

    /// Currency code, e.g. USD, EUR
    #[arg(long)]
    pub currency: Option<String>,

    /// Which rate to print
    #[arg(long, value_enum, ignore_case = true, default_value_t = PriceSelection::Sell)]
    pub price: PriceSelection,

    /// Query the quote of N days ago (0 = today)
    #[arg(long = "days-ago", visible_alias = "daysago", default_value_t = 0)]
    pub days_ago: u64,

    /// Optional TOML file with default settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl CliArgs {
    /// Command-line values win over every other layer.
    pub fn apply_to(&self, settings: &mut FetchSettings) {
        if let Some(api) = &self.api {
            settings.api_base_url = api.clone();
        }
        if let Some(timeout) = self.timeout {
            settings.timeout_seconds = timeout;
        }
        if let Some(retries) = self.retries {
            settings.max_retries = retries;
        }
        if let Some(backdays) = self.backdays {
            settings.max_back_days = backdays;
        }
        if let Some(currency) = &self.currency {
            settings.currency = currency.clone();
        }
    }

    pub fn target_date(&self, today: NaiveDate) -> Result<NaiveDate> {
        today
            .checked_sub_days(Days::new(self.days_ago))
            .ok_or_else(|| QuoteError::InvalidConfigValueError {
                field: "days_ago".to_string(),
                value: self.days_ago.to_string(),
                reason: "Date falls outside the supported range".to_string(),
            })
    }
}

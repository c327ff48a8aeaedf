#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::FetchConfig;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://olinda.bcb.gov.br/olinda/servico/PTAX/versao/v1/odata/";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_MAX_BACK_DAYS: u32 = 5;
pub const DEFAULT_CURRENCY: &str = "USD";

pub const ENV_API_BASE_URL: &str = "BCB_API_BASE_URL";
pub const ENV_TIMEOUT_SECONDS: &str = "BCB_TIMEOUT_SECONDS";
pub const ENV_MAX_RETRIES: &str = "BCB_MAX_RETRIES";
pub const ENV_MAX_BACK_DAYS: &str = "BCB_MAX_BACK_DAYS";

/// Caller-overridable fetch settings.
///
/// Layers, lowest to highest precedence: built-in defaults, an optional TOML
/// file, `BCB_*` environment variables, command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchSettings {
    pub api_base_url: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub max_back_days: u32,
    pub currency: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            max_retries: DEFAULT_MAX_RETRIES,
            max_back_days: DEFAULT_MAX_BACK_DAYS,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl FetchSettings {
    /// Defaults, or the given TOML file, with the process environment applied on top.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut settings = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_env();
        Ok(settings)
    }

    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Apply `BCB_*` overrides read through `lookup`. Empty values are ignored,
    /// and so are numbers that fail to parse (with a warning).
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = read(ENV_API_BASE_URL) {
            self.api_base_url = url;
        }
        if let Some(value) = read(ENV_TIMEOUT_SECONDS) {
            override_number(ENV_TIMEOUT_SECONDS, &value, &mut self.timeout_seconds);
        }
        if let Some(value) = read(ENV_MAX_RETRIES) {
            override_number(ENV_MAX_RETRIES, &value, &mut self.max_retries);
        }
        if let Some(value) = read(ENV_MAX_BACK_DAYS) {
            override_number(ENV_MAX_BACK_DAYS, &value, &mut self.max_back_days);
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn to_fetch_config(&self, target_date: NaiveDate) -> FetchConfig {
        FetchConfig {
            target_date,
            max_back_days: self.max_back_days,
            request_timeout: self.request_timeout(),
            max_retries_per_date: self.max_retries,
            currency_code: self.currency.trim().to_string(),
            api_base_url: self.api_base_url.clone(),
        }
    }
}

fn override_number<T: FromStr>(key: &str, raw: &str, target: &mut T) {
    match raw.trim().parse() {
        Ok(parsed) => *target = parsed,
        Err(_) => tracing::warn!("Ignoring {}={:?}: not a valid non-negative integer", key, raw),
    }
}

impl Validate for FetchSettings {
    fn validate(&self) -> Result<()> {
        validate_url("api_base_url", &self.api_base_url)?;
        validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        validate_non_empty_string("currency", &self.currency)?;
        Ok(())
    }
}

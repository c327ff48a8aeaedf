use crate::config::FetchSettings;
use crate::utils::error::{QuoteError, Result};
use regex::{Captures, Regex};
use std::path::Path;

impl FetchSettings {
    /// Load settings from a TOML file. Missing keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QuoteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse settings from TOML, expanding `${VAR}` placeholders from the environment.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| QuoteError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }
}

/// Replace `${VAR}` with the variable's value; unknown variables are left as-is.
fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| QuoteError::ConfigError {
        message: format!("invalid placeholder pattern: {}", e),
    })?;

    let result = re.replace_all(content, |caps: &Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    });

    Ok(result.into_owned())
}

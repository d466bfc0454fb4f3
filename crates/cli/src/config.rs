//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `MENU_CURRENCY` - Currency used when printing prices (default: BRL)
//! - `MENU_LOG_FORMAT` - `text` or `json` log output on stderr (default: text)
//! - `RUST_LOG` - Log filter (default: `menu_cart=info,menu_cart_cli=info`)

use menu_cart_core::CurrencyCode;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Currency prices are printed in
    pub currency: CurrencyCode,
    /// Log output format
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unsupported value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let currency = match lookup("MENU_CURRENCY") {
            Some(value) => value
                .parse::<CurrencyCode>()
                .map_err(|e| ConfigError::InvalidEnvVar("MENU_CURRENCY".to_owned(), e))?,
            None => CurrencyCode::default(),
        };

        let log_format = match lookup("MENU_LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "MENU_LOG_FORMAT".to_owned(),
                    format!("expected `text` or `json`, got `{other}`"),
                ));
            }
        };

        Ok(Self {
            currency,
            log_format,
        })
    }
}

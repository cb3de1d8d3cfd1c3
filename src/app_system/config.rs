use std::path::PathBuf;
use std::time::Duration;

use super::ConfigError;
use crate::store::DEFAULT_CART_KEY;

pub const ENV_API_URL: &str = "CART_API_URL";
pub const ENV_STORAGE_DIR: &str = "CART_STORAGE_DIR";
pub const ENV_STORAGE_KEY: &str = "CART_STORAGE_KEY";
pub const ENV_HTTP_TIMEOUT_MS: &str = "CART_HTTP_TIMEOUT_MS";
pub const ENV_MAILBOX_SIZE: &str = "CART_MAILBOX_SIZE";

/// Settings for wiring the cart system.
#[derive(Debug, Clone, PartialEq)]
pub struct CartConfig {
    /// Base URL of the product/stock service. `None` runs against the in-process catalog.
    pub api_url: Option<String>,
    /// Directory holding the persisted cart blob.
    pub storage_dir: PathBuf,
    /// Key the cart is stored under.
    pub storage_key: String,
    pub request_timeout: Duration,
    pub mailbox_size: usize,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            storage_dir: PathBuf::from(".cart"),
            storage_key: DEFAULT_CART_KEY.to_string(),
            request_timeout: Duration::from_secs(10),
            mailbox_size: 32,
        }
    }
}

impl CartConfig {
    /// Defaults overridden by `CART_*` environment variables.
    ///
    /// # Errors
    /// `ConfigError::Invalid` when a numeric variable does not parse or is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`CartConfig::from_env`] but reads variables through `lookup`.
    ///
    /// # Errors
    /// `ConfigError::Invalid` when a numeric variable does not parse or is zero.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let read = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(url) = read(ENV_API_URL) {
            config.api_url = Some(url);
        }
        if let Some(dir) = read(ENV_STORAGE_DIR) {
            config.storage_dir = PathBuf::from(dir);
        }
        if let Some(key) = read(ENV_STORAGE_KEY) {
            config.storage_key = key;
        }
        if let Some(raw) = read(ENV_HTTP_TIMEOUT_MS) {
            config.request_timeout = Duration::from_millis(parse_positive(ENV_HTTP_TIMEOUT_MS, &raw)?);
        }
        if let Some(raw) = read(ENV_MAILBOX_SIZE) {
            let size = parse_positive(ENV_MAILBOX_SIZE, &raw)?;
            config.mailbox_size = usize::try_from(size).map_err(|e| ConfigError::Invalid {
                name: ENV_MAILBOX_SIZE,
                value: raw.clone(),
                reason: e.to_string(),
            })?;
        }
        Ok(config)
    }
}

fn parse_positive(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        name,
        value: raw.to_string(),
        reason,
    };
    match raw.parse::<u64>() {
        Ok(0) => Err(invalid("must be greater than zero".to_string())),
        Ok(value) => Ok(value),
        Err(e) => Err(invalid(e.to_string())),
    }
}

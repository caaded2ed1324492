//! Runtime configuration
//!
//! Values come from the process environment, after `.env` has been loaded with
//! dotenv. The API key is never part of the build; without one the client
//! talks to the public endpoint unauthenticated.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::{debug, warn};

use crate::api::coingecko::{ApiKey, ApiTier, CoinGeckoClient};
use crate::services::projection_service::{DEFAULT_HORIZON, DEFAULT_TAIL_WINDOW};
use crate::utils::CheckerError;

pub const DEFAULT_HISTORY_DAYS: u32 = 30;
pub const DEFAULT_CHART_WIDTH: u32 = 1024;
pub const DEFAULT_CHART_HEIGHT: u32 = 768;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<ApiKey>,
    /// Overrides the tier's default base URL
    pub base_url: Option<String>,
    pub history_days: u32,
    pub tail_window: usize,
    pub horizon: usize,
    pub request_timeout: Option<Duration>,
    pub chart_width: u32,
    pub chart_height: u32,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            history_days: DEFAULT_HISTORY_DAYS,
            tail_window: DEFAULT_TAIL_WINDOW,
            horizon: DEFAULT_HORIZON,
            request_timeout: None,
            chart_width: DEFAULT_CHART_WIDTH,
            chart_height: DEFAULT_CHART_HEIGHT,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load `.env` (if present) and read the process environment
    pub fn from_env() -> Result<Self, CheckerError> {
        if let Err(e) = dotenv::dotenv() {
            debug!("No .env file loaded: {}", e);
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CheckerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let tier = match non_empty("COINGECKO_API_TIER") {
            Some(raw) => ApiTier::parse(&raw).ok_or_else(|| {
                CheckerError::Config(format!(
                    "COINGECKO_API_TIER must be 'demo' or 'pro', got '{}'",
                    raw
                ))
            })?,
            None => ApiTier::Demo,
        };

        let api_key = non_empty("COINGECKO_API_KEY").map(|key| ApiKey { key, tier });
        if api_key.is_none() {
            warn!("COINGECKO_API_KEY not set, using the public endpoint without a key");
        }

        let defaults = Config::default();
        let config = Config {
            api_key,
            base_url: non_empty("COINGECKO_BASE_URL"),
            history_days: parse_var(&non_empty, "HISTORY_DAYS", defaults.history_days)?,
            tail_window: parse_var(&non_empty, "PROJECTION_TAIL_WINDOW", defaults.tail_window)?,
            horizon: parse_var(&non_empty, "PROJECTION_HORIZON", defaults.horizon)?,
            request_timeout: non_empty("REQUEST_TIMEOUT_SECS")
                .map(|raw| {
                    raw.parse::<u64>().map(Duration::from_secs).map_err(|_| {
                        CheckerError::Config(format!("REQUEST_TIMEOUT_SECS: invalid value '{}'", raw))
                    })
                })
                .transpose()?,
            chart_width: parse_var(&non_empty, "CHART_WIDTH", defaults.chart_width)?,
            chart_height: parse_var(&non_empty, "CHART_HEIGHT", defaults.chart_height)?,
            output_dir: non_empty("CHART_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject values the projection or the renderer cannot work with
    pub fn validate(&self) -> Result<(), CheckerError> {
        if self.history_days == 0 {
            return Err(CheckerError::Config("history days must be at least 1".to_string()));
        }
        if self.tail_window < 2 {
            return Err(CheckerError::Config(
                "projection tail window must be at least 2".to_string(),
            ));
        }
        if self.horizon == 0 {
            return Err(CheckerError::Config("projection horizon must be at least 1".to_string()));
        }
        if self.chart_width == 0 || self.chart_height == 0 {
            return Err(CheckerError::Config("chart dimensions must be non-zero".to_string()));
        }
        Ok(())
    }

    pub fn build_client(&self) -> Result<CoinGeckoClient, CheckerError> {
        let client = match &self.base_url {
            Some(base_url) => CoinGeckoClient::with_base_url(
                self.api_key.clone(),
                base_url.clone(),
                self.request_timeout,
            ),
            None => CoinGeckoClient::new(self.api_key.clone(), self.request_timeout),
        };
        client.map_err(|e| CheckerError::Config(e.to_string()))
    }
}

fn parse_var<T, F>(lookup: &F, key: &str, default: T) -> Result<T, CheckerError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .map_err(|_| CheckerError::Config(format!("{}: invalid value '{}'", key, raw))),
        None => Ok(default),
    }
}

use thiserror::Error;

use crate::api::coingecko::ApiError;

/// Errors surfaced by the price and history stages
#[derive(Debug, Error)]
pub enum CheckerError {
    /// Coin id is unknown to the data source
    #[error("coin '{0}' not found")]
    NotFound(String),
    /// Request failure or malformed response
    #[error("network error: {0}")]
    Network(String),
    /// Series cannot be projected (too short, non-positive prices, bad parameters)
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("chart rendering failed: {0}")]
    Render(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CheckerError {
    /// Map an API client error for a given coin onto the checker taxonomy
    pub fn from_api(coin_id: &str, err: ApiError) -> Self {
        match err {
            ApiError::NotFound(_) => CheckerError::NotFound(coin_id.to_string()),
            other => CheckerError::Network(other.to_string()),
        }
    }

    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidInput(_) => 2,
            Self::NotFound(_) => 3,
            Self::Network(_) => 4,
            Self::InvalidData(_) => 5,
            Self::Render(_) | Self::Io(_) | Self::Serialization(_) => 6,
            Self::Config(_) => 7,
        }
    }
}

/// Short user-facing message for an error, without transport details
///
/// Rate limits and transport failures collapse into a generic hint; everything
/// else keeps its own message.
pub fn user_message(err: &CheckerError) -> String {
    let error_msg = err.to_string();
    if error_msg.contains("429") || error_msg.contains("Rate Limited") {
        "⚠ Rate limited by the price API. Please try again in a moment.".to_string()
    } else if matches!(err, CheckerError::Network(_)) {
        "⚠ Network error while contacting the price API. Please try again.".to_string()
    } else {
        format!("❌ {}", error_msg)
    }
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Quote for one coin from GET /simple/price
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleQuote {
    pub usd: Option<f64>,
}

/// Full /simple/price response: coin id -> quote
///
/// Unknown ids are simply absent from the map.
pub type SimplePriceResponse = HashMap<String, SimpleQuote>;

/// Response from GET /coins/{id}/market_chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketChartResponse {
    /// `[timestamp_millis, price]` pairs in chronological order
    pub prices: Vec<(f64, f64)>,
    #[serde(default)]
    pub market_caps: Vec<(f64, f64)>,
    #[serde(default)]
    pub total_volumes: Vec<(f64, f64)>,
}

/// Error body returned by CoinGecko on 4xx responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
    pub status: Option<ErrorStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorStatus {
    pub error_code: Option<i32>,
    pub error_message: Option<String>,
}

impl ErrorResponse {
    /// Best human-readable message in the body, if any
    pub fn message(&self) -> Option<String> {
        self.error.clone().or_else(|| {
            self.status
                .as_ref()
                .and_then(|s| s.error_message.clone())
        })
    }
}

/// API key tier; decides the base URL and the header the key travels in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTier {
    Demo,
    Pro,
}

impl ApiTier {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "demo" | "free" => Some(ApiTier::Demo),
            "pro" => Some(ApiTier::Pro),
            _ => None,
        }
    }

    pub const fn header_name(&self) -> &'static str {
        match self {
            ApiTier::Demo => "x-cg-demo-api-key",
            ApiTier::Pro => "x-cg-pro-api-key",
        }
    }

    pub const fn default_base_url(&self) -> &'static str {
        match self {
            ApiTier::Demo => "https://api.coingecko.com/api/v3",
            ApiTier::Pro => "https://pro-api.coingecko.com/api/v3",
        }
    }
}

/// Comprehensive error type for API operations
#[derive(Debug, Clone)]
pub enum ApiError {
    /// 400 Bad Request
    BadRequest(String),
    /// 401/403, usually a missing or wrong API key
    Unauthorized(String),
    /// 404 Not Found (unknown coin id)
    NotFound(String),
    /// 429 Too Many Requests
    RateLimited { retry_after: Option<u64> },
    /// 5xx Server Error
    ServerError(u16, String),
    /// Other HTTP errors
    HttpError(u16, String),
    /// Network/request error
    RequestError(String),
    /// Deserialization error
    DeserializationError(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::RateLimited { retry_after } => match retry_after {
                Some(secs) => write!(f, "Rate Limited (429). Retry after {} s", secs),
                None => write!(f, "Rate Limited (429)"),
            },
            ApiError::ServerError(code, msg) => write!(f, "Server Error ({}): {}", code, msg),
            ApiError::HttpError(code, msg) => write!(f, "HTTP Error ({}): {}", code, msg),
            ApiError::RequestError(msg) => write!(f, "Request Error: {}", msg),
            ApiError::DeserializationError(msg) => write!(f, "Deserialization Error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

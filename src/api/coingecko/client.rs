use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, RETRY_AFTER};
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use super::models::{
    ApiError, ApiTier, ErrorResponse, MarketChartResponse, SimplePriceResponse,
};
use crate::api::MarketDataSource;
use crate::models::coin::is_valid_coin_id;

/// Quote currency for every request
pub const VS_CURRENCY: &str = "usd";

/// API key together with the tier it belongs to
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    pub key: String,
    pub tier: ApiTier,
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKey")
            .field("key", &"<redacted>")
            .field("tier", &self.tier)
            .finish()
    }
}

/// CoinGecko API client for spot prices and market charts
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    http_client: HttpClient,
    api_key: Option<ApiKey>,
    base_url: String,
}

impl CoinGeckoClient {
    /// Create a client against the tier's default base URL
    pub fn new(api_key: Option<ApiKey>, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let base_url = api_key
            .as_ref()
            .map(|k| k.tier)
            .unwrap_or(ApiTier::Demo)
            .default_base_url()
            .to_string();
        Self::with_base_url(api_key, base_url, timeout)
    }

    /// Create a new client with custom base URL (for proxies and testing)
    pub fn with_base_url(
        api_key: Option<ApiKey>,
        base_url: String,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let mut builder = HttpClient::builder()
            .user_agent(concat!("crypto-price-checker/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| ApiError::RequestError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create default headers, carrying the API key when one is configured
    fn create_headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(api_key) = &self.api_key {
            let value = HeaderValue::from_str(&api_key.key)
                .map_err(|e| ApiError::RequestError(format!("Invalid API key header: {}", e)))?;
            headers.insert(HeaderName::from_static(api_key.tier.header_name()), value);
        }

        Ok(headers)
    }

    fn check_coin_id(coin_id: &str) -> Result<(), ApiError> {
        if is_valid_coin_id(coin_id) {
            Ok(())
        } else {
            Err(ApiError::BadRequest(format!("invalid coin id '{}'", coin_id)))
        }
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok());
        let body_text = response.text().await.unwrap_or_default();
        classify_status(status, &body_text, retry_after)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let headers = self.create_headers()?;
        debug!("GET {} {:?}", url, query);

        let response = self
            .http_client
            .get(url)
            .headers(headers)
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::handle_error_response(response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }

    /// GET /simple/price?ids={coin}&vs_currencies=usd
    ///
    /// Returns `Ok(None)` when the coin is absent from the response, which is
    /// how the API reports ids it does not know.
    pub async fn get_simple_price(&self, coin_id: &str) -> Result<Option<f64>, ApiError> {
        Self::check_coin_id(coin_id)?;
        let url = format!("{}/simple/price", self.base_url);
        let body: SimplePriceResponse = self
            .get_json(&url, &[("ids", coin_id), ("vs_currencies", VS_CURRENCY)])
            .await?;

        Ok(body.get(coin_id).and_then(|quote| quote.usd))
    }

    /// GET /coins/{coin}/market_chart?vs_currency=usd&days={days}
    pub async fn get_market_chart(
        &self,
        coin_id: &str,
        days: u32,
    ) -> Result<MarketChartResponse, ApiError> {
        Self::check_coin_id(coin_id)?;
        let url = format!("{}/coins/{}/market_chart", self.base_url, coin_id);
        let days = days.to_string();
        self.get_json(&url, &[("vs_currency", VS_CURRENCY), ("days", days.as_str())])
            .await
    }
}

#[async_trait]
impl MarketDataSource for CoinGeckoClient {
    async fn spot_price(&self, coin_id: &str) -> Result<Option<f64>, ApiError> {
        self.get_simple_price(coin_id).await
    }

    async fn market_chart(&self, coin_id: &str, days: u32) -> Result<MarketChartResponse, ApiError> {
        self.get_market_chart(coin_id, days).await
    }
}

/// Map a non-success status and its body onto an [`ApiError`]
pub fn classify_status(status: u16, body_text: &str, retry_after: Option<u64>) -> ApiError {
    let message = serde_json::from_str::<ErrorResponse>(body_text)
        .ok()
        .and_then(|body| body.message())
        .unwrap_or_else(|| body_text.to_string());

    match status {
        400 => ApiError::BadRequest(message),
        401 | 403 => ApiError::Unauthorized(message),
        404 => ApiError::NotFound(message),
        429 => {
            warn!("Rate limited by CoinGecko, retry after {:?} s", retry_after);
            ApiError::RateLimited { retry_after }
        }
        500..=599 => {
            warn!("Server error {}: {}", status, message);
            ApiError::ServerError(status, message)
        }
        _ => ApiError::HttpError(status, message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_not_found() {
        let err = classify_status(404, r#"{"error":"coin not found"}"#, None);
        assert!(matches!(err, ApiError::NotFound(ref msg) if msg == "coin not found"));
    }

    #[test]
    fn test_classify_rate_limited() {
        let err = classify_status(429, "", Some(30));
        assert!(matches!(err, ApiError::RateLimited { retry_after: Some(30) }));
    }

    #[test]
    fn test_classify_unauthorized_and_server_errors() {
        assert!(matches!(classify_status(401, "bad key", None), ApiError::Unauthorized(_)));
        assert!(matches!(classify_status(403, "", None), ApiError::Unauthorized(_)));
        assert!(matches!(
            classify_status(503, "maintenance", None),
            ApiError::ServerError(503, ref m) if m == "maintenance"
        ));
        assert!(matches!(classify_status(418, "", None), ApiError::HttpError(418, _)));
    }

    #[test]
    fn test_base_url_follows_tier() {
        let client = CoinGeckoClient::new(None, None).unwrap();
        assert_eq!(client.base_url(), "https://api.coingecko.com/api/v3");

        let pro = ApiKey { key: "k".to_string(), tier: ApiTier::Pro };
        let client = CoinGeckoClient::new(Some(pro), None).unwrap();
        assert_eq!(client.base_url(), "https://pro-api.coingecko.com/api/v3");
    }

    #[test]
    fn test_custom_base_url_trims_trailing_slash() {
        let client =
            CoinGeckoClient::with_base_url(None, "http://localhost:8080/api/v3/".to_string(), None)
                .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api/v3");
    }

    #[test]
    fn test_headers_carry_key_for_tier() {
        let key = ApiKey { key: "CG-test".to_string(), tier: ApiTier::Demo };
        let client = CoinGeckoClient::new(Some(key), None).unwrap();
        let headers = client.create_headers().unwrap();

        assert_eq!(headers.get("x-cg-demo-api-key").unwrap(), "CG-test");
        assert!(headers.get("x-cg-pro-api-key").is_none());
    }

    #[test]
    fn test_api_key_debug_is_redacted() {
        let key = ApiKey { key: "CG-secret".to_string(), tier: ApiTier::Demo };
        let rendered = format!("{:?}", key);
        assert!(!rendered.contains("CG-secret"));
    }

    #[tokio::test]
    async fn test_invalid_coin_id_rejected_before_request() {
        let client = CoinGeckoClient::new(None, None).unwrap();
        let err = client.get_simple_price("Bitcoin&ids=eth").await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}

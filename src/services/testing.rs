//! In-memory [`MarketDataSource`] for service tests

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::coingecko::{ApiError, MarketChartResponse};
use crate::api::MarketDataSource;

/// 2024-01-01T00:00:00Z
pub const START_MS: f64 = 1_704_067_200_000.0;
pub const DAY_MS: f64 = 86_400_000.0;

#[derive(Debug, Clone, Default)]
pub struct FakeSource {
    prices: HashMap<String, f64>,
    histories: HashMap<String, Vec<(f64, f64)>>,
    price_error: Option<ApiError>,
    history_error: Option<ApiError>,
    delays: HashMap<String, Duration>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, coin_id: &str, price: f64) -> Self {
        self.prices.insert(coin_id.to_string(), price);
        self
    }

    /// Daily samples starting at [`START_MS`]
    pub fn with_history(mut self, coin_id: &str, prices: &[f64]) -> Self {
        let samples = prices
            .iter()
            .enumerate()
            .map(|(i, &p)| (START_MS + i as f64 * DAY_MS, p))
            .collect();
        self.histories.insert(coin_id.to_string(), samples);
        self
    }

    pub fn failing_price(mut self, err: ApiError) -> Self {
        self.price_error = Some(err);
        self
    }

    pub fn failing_history(mut self, err: ApiError) -> Self {
        self.history_error = Some(err);
        self
    }

    /// Delay both lookups for one coin
    pub fn with_delay(mut self, coin_id: &str, delay: Duration) -> Self {
        self.delays.insert(coin_id.to_string(), delay);
        self
    }

    async fn wait(&self, coin_id: &str) {
        if let Some(delay) = self.delays.get(coin_id) {
            tokio::time::sleep(*delay).await;
        }
    }
}

#[async_trait]
impl MarketDataSource for FakeSource {
    async fn spot_price(&self, coin_id: &str) -> Result<Option<f64>, ApiError> {
        self.wait(coin_id).await;
        if let Some(err) = &self.price_error {
            return Err(err.clone());
        }
        Ok(self.prices.get(coin_id).copied())
    }

    async fn market_chart(&self, coin_id: &str, _days: u32) -> Result<MarketChartResponse, ApiError> {
        self.wait(coin_id).await;
        if let Some(err) = &self.history_error {
            return Err(err.clone());
        }
        match self.histories.get(coin_id) {
            Some(prices) => Ok(MarketChartResponse {
                prices: prices.clone(),
                market_caps: Vec::new(),
                total_volumes: Vec::new(),
            }),
            None => Err(ApiError::NotFound("coin not found".to_string())),
        }
    }
}

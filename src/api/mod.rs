//! Price data sources
//!
//! [`MarketDataSource`] is the seam between the services and the network;
//! [`coingecko::CoinGeckoClient`] is the production implementation.

use async_trait::async_trait;

pub mod coingecko;

use coingecko::{ApiError, MarketChartResponse};

/// The two lookups a coin selection needs
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Latest USD price, `None` when the source does not know the coin
    async fn spot_price(&self, coin_id: &str) -> Result<Option<f64>, ApiError>;

    /// USD price history over the trailing `days`
    async fn market_chart(&self, coin_id: &str, days: u32) -> Result<MarketChartResponse, ApiError>;
}

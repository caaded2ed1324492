pub mod client;
pub mod models;

pub use client::{classify_status, ApiKey, CoinGeckoClient, VS_CURRENCY};
pub use models::{ApiError, ApiTier, MarketChartResponse, SimplePriceResponse, SimpleQuote};

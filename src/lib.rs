//! Crypto price checker
//!
//! Fetches a coin's spot price and trailing price history from CoinGecko,
//! projects a few periods forward by compounding the recent average growth,
//! and turns both into chart-ready data.

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use models::{PricePoint, PriceSeries, ProjectionSeries};
pub use services::chart_service::to_chart_series;
pub use services::projection_service::project;
pub use utils::CheckerError;

//! Data models shared by the services and the command-line front end
//!
//! Each model is plain data: series and projections going into the charts,
//! price lookup results, the coin catalog and the display state.

pub mod chart;
pub mod coin;
pub mod display;
pub mod price;

// Re-export commonly used types for convenience
pub use chart::{
    ChartData, ChartDataset, ChartSeries, PricePoint, PriceSeries, ProjectedPoint, ProjectionSeries,
};
pub use coin::{CoinOption, TopCoin, COIN_OPTIONS, TOP_COINS};
pub use display::DisplayState;
pub use price::{PriceOutcome, PriceResult, PriceStatus};

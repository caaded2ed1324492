use tracing::{info, warn};

use crate::api::coingecko::ApiError;
use crate::api::MarketDataSource;
use crate::models::{PriceOutcome, PriceResult};

/// Look up the spot price for a coin
///
/// Never fails: an unknown coin becomes [`PriceOutcome::NotAvailable`] and any
/// transport or parse problem becomes [`PriceOutcome::Error`].
pub async fn get_price<S>(source: &S, coin_id: &str) -> PriceResult
where
    S: MarketDataSource + ?Sized,
{
    let outcome = match source.spot_price(coin_id).await {
        Ok(Some(price)) if price.is_finite() && price > 0.0 => {
            info!("💹 {} = ${}", coin_id, price);
            PriceOutcome::Success(price)
        }
        Ok(Some(price)) => {
            warn!("Discarding unusable price {} for {}", price, coin_id);
            PriceOutcome::Error(format!("unusable price {}", price))
        }
        Ok(None) | Err(ApiError::NotFound(_)) => {
            warn!("Price not available for {}", coin_id);
            PriceOutcome::NotAvailable
        }
        Err(e) => {
            warn!("Price lookup for {} failed: {}", coin_id, e);
            PriceOutcome::Error(e.to_string())
        }
    };

    PriceResult {
        coin_id: coin_id.to_string(),
        outcome,
    }
}

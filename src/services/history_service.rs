use tracing::{info, warn};

use crate::api::coingecko::MarketChartResponse;
use crate::api::MarketDataSource;
use crate::models::{ChartData, PricePoint, PriceSeries, ProjectionSeries};
use crate::services::{chart_service, projection_service};
use crate::utils::CheckerError;

/// History stage output: the raw series, its projection and both charts
#[derive(Debug, Clone)]
pub struct HistoryResult {
    pub coin_id: String,
    pub series: PriceSeries,
    pub projection: ProjectionSeries,
    pub history_chart: ChartData,
    pub prediction_chart: ChartData,
}

/// Settings for one history lookup
#[derive(Debug, Clone, Copy)]
pub struct HistoryParams {
    pub days: u32,
    pub tail_window: usize,
    pub horizon: usize,
}

impl Default for HistoryParams {
    fn default() -> Self {
        Self {
            days: crate::config::DEFAULT_HISTORY_DAYS,
            tail_window: projection_service::DEFAULT_TAIL_WINDOW,
            horizon: projection_service::DEFAULT_HORIZON,
        }
    }
}

/// Convert market chart samples into a sorted series
///
/// Samples whose timestamp cannot be represented are dropped.
pub fn series_from_market_chart(response: &MarketChartResponse) -> PriceSeries {
    let points = response
        .prices
        .iter()
        .filter_map(|&(timestamp_ms, price)| {
            let point = if timestamp_ms.is_finite() {
                PricePoint::from_millis(timestamp_ms as i64, price)
            } else {
                None
            };
            if point.is_none() {
                warn!("Skipping sample with invalid timestamp {}", timestamp_ms);
            }
            point
        })
        .collect();
    PriceSeries::new(points)
}

/// Fetch the trailing price history for a coin
pub async fn fetch_history<S>(
    source: &S,
    coin_id: &str,
    days: u32,
) -> Result<PriceSeries, CheckerError>
where
    S: MarketDataSource + ?Sized,
{
    let response = source
        .market_chart(coin_id, days)
        .await
        .map_err(|e| CheckerError::from_api(coin_id, e))?;

    let series = series_from_market_chart(&response);
    info!("📈 Fetched {} price points for {} ({} days)", series.len(), coin_id, days);
    Ok(series)
}

/// Fetch history, project it forward and build both charts
pub async fn get_history<S>(
    source: &S,
    coin_id: &str,
    params: HistoryParams,
) -> Result<HistoryResult, CheckerError>
where
    S: MarketDataSource + ?Sized,
{
    let series = fetch_history(source, coin_id, params.days).await?;
    let projection = projection_service::project(&series, params.tail_window, params.horizon)?;

    Ok(HistoryResult {
        coin_id: coin_id.to_string(),
        history_chart: chart_service::history_chart(coin_id, &series, params.days),
        prediction_chart: chart_service::prediction_chart(coin_id, &projection),
        series,
        projection,
    })
}

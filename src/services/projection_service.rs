//! Short-horizon price projection
//!
//! The projection compounds the mean period-over-period growth of the last few
//! observations. It is a heuristic, not a forecast: a negative average growth
//! keeps shrinking the projected price and nothing clamps it at zero.

use crate::models::{PriceSeries, ProjectedPoint, ProjectionSeries};
use crate::utils::CheckerError;

/// Default number of trailing points used to estimate growth
pub const DEFAULT_TAIL_WINDOW: usize = 5;
/// Default number of projected periods
pub const DEFAULT_HORIZON: usize = 5;

/// Label for the i-th projected period (1-based)
pub fn projection_label(period: usize) -> String {
    format!("Day +{}", period)
}

/// Mean relative change between consecutive prices
///
/// Needs at least two prices, all finite and strictly positive. A zero or
/// negative divisor is reported instead of producing NaN or infinity.
pub fn average_growth(prices: &[f64]) -> Result<f64, CheckerError> {
    if prices.len() < 2 {
        return Err(CheckerError::InvalidData(format!(
            "need at least 2 price points to compute growth, got {}",
            prices.len()
        )));
    }

    if let Some((idx, bad)) = prices
        .iter()
        .enumerate()
        .find(|(_, p)| !p.is_finite() || **p <= 0.0)
    {
        return Err(CheckerError::InvalidData(format!(
            "price at tail position {} is not a positive number ({})",
            idx, bad
        )));
    }

    let total: f64 = prices
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) / pair[0])
        .sum();

    let avg = total / (prices.len() - 1) as f64;
    if !avg.is_finite() {
        return Err(CheckerError::InvalidData(format!(
            "average growth is not a finite number ({})",
            avg
        )));
    }

    Ok(avg)
}

/// Project `horizon` future prices from the trailing `tail_window` points
///
/// A series shorter than the tail window but with at least two points uses
/// all of its points.
pub fn project(
    series: &PriceSeries,
    tail_window: usize,
    horizon: usize,
) -> Result<ProjectionSeries, CheckerError> {
    if tail_window < 2 {
        return Err(CheckerError::InvalidData(format!(
            "tail window must be at least 2, got {}",
            tail_window
        )));
    }
    if horizon == 0 {
        return Err(CheckerError::InvalidData("horizon must be at least 1".to_string()));
    }

    let prices = series.prices();
    let tail = &prices[prices.len().saturating_sub(tail_window)..];
    let avg_growth = average_growth(tail)?;

    let mut last = match series.last() {
        Some(point) => point.price,
        None => return Err(CheckerError::InvalidData("empty price series".to_string())),
    };

    let mut points = Vec::with_capacity(horizon);
    for period in 1..=horizon {
        last *= 1.0 + avg_growth;
        if !last.is_finite() {
            return Err(CheckerError::InvalidData(format!(
                "projected price for {} overflows",
                projection_label(period)
            )));
        }
        points.push(ProjectedPoint {
            label: projection_label(period),
            price: last,
        });
    }

    tracing::debug!(
        "Projected {} periods from {} tail points (avg growth {:.6})",
        horizon,
        tail.len(),
        avg_growth
    );

    Ok(ProjectionSeries { avg_growth, points })
}

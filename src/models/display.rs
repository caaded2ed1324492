//! Display state derived from the latest selection

use serde::Serialize;

use super::chart::ChartData;
use super::price::PriceStatus;

/// Everything the presentation layer shows for the current selection
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayState {
    pub selected_coin: Option<String>,
    pub status: PriceStatus,
    pub price_text: String,
    pub history: Option<ChartData>,
    pub prediction: Option<ChartData>,
    pub history_error: Option<String>,
}

impl DisplayState {
    /// Both charts, or nothing; they are only shown together
    pub fn charts(&self) -> Option<(&ChartData, &ChartData)> {
        match (&self.history, &self.prediction) {
            (Some(history), Some(prediction)) => Some((history, prediction)),
            _ => None,
        }
    }
}

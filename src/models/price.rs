//! Price query models

use serde::Serialize;

/// Status flag shown next to the price line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceStatus {
    #[default]
    Idle,
    Loading,
    Success,
    #[serde(rename = "not available")]
    NotAvailable,
    Error,
}

impl PriceStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PriceStatus::Idle => "idle",
            PriceStatus::Loading => "loading",
            PriceStatus::Success => "success",
            PriceStatus::NotAvailable => "not available",
            PriceStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for PriceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a spot price lookup
#[derive(Debug, Clone, PartialEq)]
pub enum PriceOutcome {
    Success(f64),
    NotAvailable,
    Error(String),
}

/// Result struct for a price query
#[derive(Debug, Clone, PartialEq)]
pub struct PriceResult {
    pub coin_id: String,
    pub outcome: PriceOutcome,
}

impl PriceResult {
    pub fn status(&self) -> PriceStatus {
        match self.outcome {
            PriceOutcome::Success(_) => PriceStatus::Success,
            PriceOutcome::NotAvailable => PriceStatus::NotAvailable,
            PriceOutcome::Error(_) => PriceStatus::Error,
        }
    }

    /// Status-tagged line for display, e.g. `✅ 1 BITCOIN = $67000.5`
    pub fn display_text(&self) -> String {
        match self.outcome {
            PriceOutcome::Success(price) => {
                format!("✅ 1 {} = ${}", self.coin_id.to_uppercase(), price)
            }
            PriceOutcome::NotAvailable => "⚠ Price not available.".to_string(),
            PriceOutcome::Error(_) => "⚠ Error fetching data.".to_string(),
        }
    }
}

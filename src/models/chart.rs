//! Chart and series models

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

/// A single USD price observation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }

    /// Build a point from a `[timestamp_millis, price]` pair
    pub fn from_millis(timestamp_ms: i64, price: f64) -> Option<Self> {
        Utc.timestamp_millis_opt(timestamp_ms)
            .single()
            .map(|timestamp| Self { timestamp, price })
    }
}

/// Price observations in ascending timestamp order
///
/// Spacing between points is not assumed to be regular.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
        Self { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// One projected value, anchored only by its offset after the last observation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedPoint {
    pub label: String,
    pub price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectionSeries {
    pub avg_growth: f64,
    pub points: Vec<ProjectedPoint>,
}

impl ProjectionSeries {
    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.label.clone()).collect()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Parallel label/value sequences for a line chart
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// One line on a chart plus its display styling
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub background_color: String,
    pub fill: bool,
    pub tension: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_dash: Option<Vec<u32>>,
}

/// Chart-ready data handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

impl ChartData {
    /// The single dataset every chart in this crate carries
    pub fn primary(&self) -> Option<&ChartDataset> {
        self.datasets.first()
    }
}

use std::path::Path;

use plotters::prelude::*;

use crate::models::{ChartData, ChartDataset, ChartSeries, PriceSeries, ProjectionSeries};
use crate::utils::CheckerError;

const HISTORY_BORDER: &str = "#1e3c72";
const HISTORY_BACKGROUND: &str = "rgba(30,60,114,0.2)";
const PREDICTION_BORDER: &str = "#2a5298";
const PREDICTION_BACKGROUND: &str = "rgba(42,82,152,0.2)";
const LINE_TENSION: f64 = 0.3;

/// Short date label used on the history axis, e.g. "Jan 5" (UTC)
pub fn date_label(timestamp: &chrono::DateTime<chrono::Utc>) -> String {
    timestamp.format("%b %-d").to_string()
}

/// Map a price series to parallel label/value sequences, keeping order
pub fn to_chart_series(series: &PriceSeries) -> ChartSeries {
    let (labels, values) = series
        .points()
        .iter()
        .map(|p| (date_label(&p.timestamp), p.price))
        .unzip();
    ChartSeries { labels, values }
}

/// Chart data for the observed history
pub fn history_chart(coin_id: &str, series: &PriceSeries, days: u32) -> ChartData {
    let ChartSeries { labels, values } = to_chart_series(series);
    ChartData {
        labels,
        datasets: vec![ChartDataset {
            label: format!("{} Price (Past {} Days)", coin_id.to_uppercase(), days),
            data: values,
            border_color: HISTORY_BORDER.to_string(),
            background_color: HISTORY_BACKGROUND.to_string(),
            fill: true,
            tension: LINE_TENSION,
            border_dash: None,
        }],
    }
}

/// Chart data for the projection
pub fn prediction_chart(coin_id: &str, projection: &ProjectionSeries) -> ChartData {
    ChartData {
        labels: projection.labels(),
        datasets: vec![ChartDataset {
            label: format!(
                "{} Predicted (Next {} Days)",
                coin_id.to_uppercase(),
                projection.len()
            ),
            data: projection.prices(),
            border_color: PREDICTION_BORDER.to_string(),
            background_color: PREDICTION_BACKGROUND.to_string(),
            fill: true,
            tension: LINE_TENSION,
            border_dash: Some(vec![5, 5]),
        }],
    }
}

/// Parse `#rrggbb` into a plotters color
pub fn parse_hex_color(hex: &str) -> Option<RGBColor> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Y axis bounds with 10% padding, never below zero
pub fn value_range(values: &[f64]) -> (f64, f64) {
    let min_price = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max_price = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // Flat series still need a visible band
    let price_range = (max_price - min_price)
        .max(max_price.abs() * 0.01)
        .max(1e-8);
    let padding = price_range * 0.1;
    ((min_price - padding).max(0.0), max_price + padding)
}

/// Render one chart as a PNG line chart at `path`
pub fn render_line_chart(
    path: &Path,
    chart: &ChartData,
    width: u32,
    height: u32,
) -> Result<(), CheckerError> {
    let dataset = chart
        .primary()
        .ok_or_else(|| CheckerError::Render("chart has no dataset".to_string()))?;

    if dataset.data.len() < 2 {
        return Err(CheckerError::Render(
            "Not enough data to draw a chart (minimum 2 points required)".to_string(),
        ));
    }
    if dataset.data.iter().any(|v| !v.is_finite()) {
        return Err(CheckerError::Render("chart data contains non-finite values".to_string()));
    }

    let (y_min, y_max) = value_range(&dataset.data);
    let line_color = parse_hex_color(&dataset.border_color).unwrap_or(BLUE);
    let points: Vec<(f64, f64)> = dataset
        .data
        .iter()
        .enumerate()
        .map(|(i, &price)| (i as f64, price))
        .collect();
    let last_index = (points.len() - 1) as f64;

    {
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| CheckerError::Render(format!("Failed to fill canvas: {}", e)))?;

        let mut chart_ctx = ChartBuilder::on(&root)
            .caption(&dataset.label, ("sans-serif", 32.0).into_font())
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(0f64..last_index, y_min..y_max)
            .map_err(|e| CheckerError::Render(format!("Failed to build chart: {}", e)))?;

        let labels = &chart.labels;
        let label_formatter = |x: &f64| {
            let idx = x.round();
            if idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        };

        chart_ctx
            .configure_mesh()
            .x_labels(labels.len().min(10))
            .x_label_formatter(&label_formatter)
            .y_desc("Price (USD)")
            .draw()
            .map_err(|e| CheckerError::Render(format!("Failed to draw mesh: {}", e)))?;

        if dataset.fill {
            chart_ctx
                .draw_series(AreaSeries::new(
                    points.iter().copied(),
                    y_min,
                    line_color.mix(0.2),
                ))
                .map_err(|e| CheckerError::Render(format!("Failed to draw area: {}", e)))?;
        }

        chart_ctx
            .draw_series(LineSeries::new(
                points.iter().copied(),
                line_color.stroke_width(2),
            ))
            .map_err(|e| CheckerError::Render(format!("Failed to draw line: {}", e)))?;

        chart_ctx
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, line_color.filled())),
            )
            .map_err(|e| CheckerError::Render(format!("Failed to draw point: {}", e)))?;

        root.present()
            .map_err(|e| CheckerError::Render(format!("Failed to render chart: {}", e)))?;
    }

    tracing::debug!("Chart written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PricePoint, ProjectedPoint};
    use chrono::{Duration, TimeZone, Utc};

    fn series(prices: &[f64]) -> PriceSeries {
        let start = Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();
        PriceSeries::new(
            prices
                .iter()
                .enumerate()
                .map(|(i, &p)| PricePoint::new(start + Duration::days(i as i64), p))
                .collect(),
        )
    }

    #[test]
    fn test_chart_series_preserves_order_and_length() {
        let chart = to_chart_series(&series(&[1.0, 2.0, 3.0]));

        assert_eq!(chart.labels, vec!["Jan 5", "Jan 6", "Jan 7"]);
        assert_eq!(chart.values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_chart_series_sorts_unordered_input() {
        let t0 = Utc.with_ymd_and_hms(2024, 2, 28, 0, 0, 0).unwrap();
        let unordered = PriceSeries::new(vec![
            PricePoint::new(t0 + Duration::days(2), 30.0),
            PricePoint::new(t0, 10.0),
            PricePoint::new(t0 + Duration::hours(30), 20.0),
        ]);
        let chart = to_chart_series(&unordered);

        assert_eq!(chart.values, vec![10.0, 20.0, 30.0]);
        assert_eq!(chart.labels, vec!["Feb 28", "Feb 29", "Mar 1"]);
    }

    #[test]
    fn test_chart_series_empty() {
        let chart = to_chart_series(&PriceSeries::default());
        assert!(chart.labels.is_empty());
        assert!(chart.values.is_empty());
    }

    #[test]
    fn test_history_chart_styling() {
        let chart = history_chart("bitcoin", &series(&[1.0, 2.0]), 30);
        let dataset = chart.primary().unwrap();

        assert_eq!(dataset.label, "BITCOIN Price (Past 30 Days)");
        assert_eq!(dataset.border_color, "#1e3c72");
        assert!(dataset.fill);
        assert!(dataset.border_dash.is_none());
        assert_eq!(chart.labels.len(), dataset.data.len());
    }

    #[test]
    fn test_prediction_chart_styling() {
        let projection = ProjectionSeries {
            avg_growth: 0.1,
            points: vec![
                ProjectedPoint { label: "Day +1".to_string(), price: 110.0 },
                ProjectedPoint { label: "Day +2".to_string(), price: 121.0 },
            ],
        };
        let chart = prediction_chart("ethereum", &projection);
        let dataset = chart.primary().unwrap();

        assert_eq!(chart.labels, vec!["Day +1", "Day +2"]);
        assert_eq!(dataset.label, "ETHEREUM Predicted (Next 2 Days)");
        assert_eq!(dataset.data, vec![110.0, 121.0]);
        assert_eq!(dataset.border_dash, Some(vec![5, 5]));
    }

    #[test]
    fn test_chart_json_uses_camel_case() {
        let chart = history_chart("bitcoin", &series(&[1.0, 2.0]), 30);
        let json = serde_json::to_value(&chart).unwrap();

        let dataset = &json["datasets"][0];
        assert_eq!(dataset["borderColor"], "#1e3c72");
        assert_eq!(dataset["backgroundColor"], "rgba(30,60,114,0.2)");
        assert!(dataset.get("borderDash").is_none());
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#1e3c72"), Some(RGBColor(0x1e, 0x3c, 0x72)));
        assert_eq!(parse_hex_color("1e3c72"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
        assert_eq!(parse_hex_color("#fff"), None);
    }

    #[test]
    fn test_value_range_padding() {
        let (lo, hi) = value_range(&[100.0, 200.0]);
        assert!((lo - 90.0).abs() < 1e-9);
        assert!((hi - 210.0).abs() < 1e-9);

        let (lo, hi) = value_range(&[50.0, 50.0]);
        assert!(lo < 50.0 && hi > 50.0);

        let (lo, _) = value_range(&[0.5, 10.0]);
        assert_eq!(lo, 0.0);
    }

    #[test]
    fn test_render_rejects_single_point() {
        let chart = history_chart("bitcoin", &series(&[1.0]), 30);
        let path = std::env::temp_dir().join("crypto_checker_single_point.png");
        let err = render_line_chart(&path, &chart, 640, 480).unwrap_err();
        assert!(matches!(err, CheckerError::Render(_)));
    }

    #[test]
    fn test_render_writes_png_files() {
        let history = series(&[100.0, 102.0, 101.0, 105.0, 108.0, 110.0]);
        let projection = crate::services::projection_service::project(&history, 5, 5).unwrap();

        let dir = std::env::temp_dir().join(format!("crypto_checker_render_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        for (name, chart) in [
            ("history.png", history_chart("bitcoin", &history, 30)),
            ("prediction.png", prediction_chart("bitcoin", &projection)),
        ] {
            let path = dir.join(name);
            render_line_chart(&path, &chart, 640, 480).unwrap();

            let bytes = std::fs::read(&path).unwrap();
            assert!(bytes.starts_with(b"\x89PNG"), "{} is not a PNG", name);
        }

        std::fs::remove_dir_all(&dir).ok();
    }
}

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::cli::CheckArgs;
use crate::config::Config;
use crate::models::{ChartData, PriceOutcome};
use crate::services::{chart_service, SelectionCoordinator, SelectionReport};
use crate::utils::CheckerError;

pub async fn execute(config: &Config, args: &CheckArgs) -> Result<(), CheckerError> {
    let coin_id = super::parse_coin(&args.coin)?;
    info!("🔎 Check command for {}", coin_id);

    let client = Arc::new(config.build_client()?);
    let coordinator = SelectionCoordinator::new(client, super::history_params(config));

    let report = coordinator.select(&coin_id).await;
    let state = coordinator.snapshot().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        print!("{}", super::format_state(&state));
    }

    if !args.no_charts {
        if let Some((history, prediction)) = state.charts() {
            let written = write_charts(config, &coin_id, history, prediction)?;
            if !args.json {
                for path in written {
                    println!("🖼  {}", path.display());
                }
            }
        }
    }

    outcome_error(report)
}

/// Render both charts into the output directory
///
/// A chart that fails to render is skipped with a warning; only a missing
/// output directory is an error.
fn write_charts(
    config: &Config,
    coin_id: &str,
    history: &ChartData,
    prediction: &ChartData,
) -> Result<Vec<PathBuf>, CheckerError> {
    std::fs::create_dir_all(&config.output_dir)?;

    let mut written = Vec::new();
    for (suffix, chart) in [("history", history), ("prediction", prediction)] {
        let path = chart_path(&config.output_dir, coin_id, suffix);
        match chart_service::render_line_chart(&path, chart, config.chart_width, config.chart_height) {
            Ok(()) => written.push(path),
            Err(e) => {
                warn!("Skipping {} chart for {}: {}", suffix, coin_id, e);
                eprintln!("⚠ Could not draw the {} chart: {}", suffix, e);
            }
        }
    }
    Ok(written)
}

pub fn chart_path(dir: &Path, coin_id: &str, suffix: &str) -> PathBuf {
    dir.join(format!("{}-{}.png", coin_id, suffix))
}

/// Exit with an error only when neither stage produced anything useful
fn outcome_error(report: SelectionReport) -> Result<(), CheckerError> {
    let price_ok = matches!(report.price.outcome, PriceOutcome::Success(_));
    match report.history {
        Err(e) if !price_ok => Err(e),
        _ => Ok(()),
    }
}

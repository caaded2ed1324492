pub mod check;
pub mod coins;
pub mod price;
pub mod watch;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::models::{ChartData, DisplayState};
use crate::services::HistoryParams;
use crate::utils::{CheckerError, Table};

/// Dispatch the parsed command line
pub async fn run(cli: &Cli, config: Config) -> Result<(), CheckerError> {
    match &cli.command {
        Command::Check(args) => check::execute(&config, args).await,
        Command::Price(args) => price::execute(&config, args).await,
        Command::Coins => coins::execute(),
        Command::Watch(args) => watch::execute(&config, args).await,
    }
}

/// Parse user input into a coin id, or explain why it is not one
pub fn parse_coin(input: &str) -> Result<String, CheckerError> {
    crate::models::coin::resolve_coin_id(input).ok_or_else(|| {
        CheckerError::InvalidInput(format!(
            "'{}' is not a coin id (lowercase letters, digits and '-') or a known symbol",
            input.trim()
        ))
    })
}

pub fn history_params(config: &Config) -> HistoryParams {
    HistoryParams {
        days: config.history_days,
        tail_window: config.tail_window,
        horizon: config.horizon,
    }
}

/// Human-readable rendering of a display state
pub fn format_state(state: &DisplayState) -> String {
    let mut out = String::new();

    if let Some(coin) = &state.selected_coin {
        out.push_str(&format!("🪙 {}\n", coin));
    }
    out.push_str(&format!("{}  [{}]\n", state.price_text, state.status));

    match state.charts() {
        Some((history, prediction)) => {
            out.push('\n');
            out.push_str(&format_history_summary(history));
            out.push('\n');
            out.push_str(&format_prediction_table(prediction));
        }
        None => {
            if let Some(err) = &state.history_error {
                out.push_str(&format!("{}\n", err));
            }
        }
    }

    out
}

fn format_history_summary(history: &ChartData) -> String {
    let Some(dataset) = history.primary() else {
        return String::new();
    };
    let (Some(first_label), Some(last_label)) = (history.labels.first(), history.labels.last()) else {
        return format!("📉 {}: no data\n", dataset.label);
    };

    let low = dataset.data.iter().copied().fold(f64::INFINITY, f64::min);
    let high = dataset.data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let last = dataset.data.last().copied().unwrap_or_default();

    format!(
        "📉 {}\n   {} points, {} to {}, low ${:.4}, high ${:.4}, last ${:.4}\n",
        dataset.label,
        dataset.data.len(),
        first_label,
        last_label,
        low,
        high,
        last
    )
}

fn format_prediction_table(prediction: &ChartData) -> String {
    let Some(dataset) = prediction.primary() else {
        return String::new();
    };

    let mut table = Table::new(&["Period", "Price (USD)"]);
    for (label, price) in prediction.labels.iter().zip(&dataset.data) {
        table.add_row(&[label.clone(), format!("{:.4}", price)]);
    }

    format!("📈 {}\n{}", dataset.label, table.render())
}

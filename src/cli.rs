//! Command-line interface definitions.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `check` | Price, 30-day history and projection for one coin |
//! | `price` | Spot price only |
//! | `coins` | List the selectable coins |
//! | `watch` | Read coin ids from stdin and select each as it arrives |
//!
//! ```bash
//! crypto-checker check bitcoin --output-dir charts
//! crypto-checker check eth --json --no-charts
//! printf 'bitcoin\nsolana\n' | crypto-checker watch
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Config;
use crate::utils::CheckerError;

/// Crypto price checker with a naive short-horizon projection
#[derive(Debug, Parser)]
#[command(name = "crypto-checker", author, version, about)]
pub struct Cli {
    /// Days of history to fetch (overrides HISTORY_DAYS)
    #[arg(long, global = true)]
    pub days: Option<u32>,

    /// Trailing points used to estimate growth (overrides PROJECTION_TAIL_WINDOW)
    #[arg(long, global = true)]
    pub tail_window: Option<usize>,

    /// Number of projected periods (overrides PROJECTION_HORIZON)
    #[arg(long, global = true)]
    pub horizon: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch price and history, project forward and draw both charts
    Check(CheckArgs),
    /// Fetch the current price only
    Price(PriceArgs),
    /// List the selectable coins
    Coins,
    /// Select coins read from stdin, one per line
    Watch(WatchArgs),
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Coin id (e.g. bitcoin) or catalog symbol (e.g. BTC)
    pub coin: String,

    /// Print the display state as JSON instead of tables
    #[arg(long)]
    pub json: bool,

    /// Directory for the PNG charts (overrides CHART_OUTPUT_DIR)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Skip writing PNG charts
    #[arg(long)]
    pub no_charts: bool,
}

#[derive(Debug, Args)]
pub struct PriceArgs {
    /// Coin id (e.g. bitcoin) or catalog symbol (e.g. BTC)
    pub coin: String,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Print each display state as a JSON line
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the environment config
    pub fn apply_overrides(&self, config: &mut Config) -> Result<(), CheckerError> {
        if let Some(days) = self.days {
            config.history_days = days;
        }
        if let Some(tail_window) = self.tail_window {
            config.tail_window = tail_window;
        }
        if let Some(horizon) = self.horizon {
            config.horizon = horizon;
        }
        if let Command::Check(CheckArgs { output_dir: Some(dir), .. }) = &self.command {
            config.output_dir = dir.clone();
        }
        config
            .validate()
            .map_err(|e| CheckerError::InvalidInput(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check_with_globals() {
        let cli = Cli::try_parse_from([
            "crypto-checker",
            "check",
            "bitcoin",
            "--json",
            "--horizon",
            "7",
            "--output-dir",
            "/tmp/out",
        ])
        .unwrap();

        assert_eq!(cli.horizon, Some(7));
        match &cli.command {
            Command::Check(args) => {
                assert_eq!(args.coin, "bitcoin");
                assert!(args.json);
                assert!(!args.no_charts);
            }
            other => panic!("unexpected command {:?}", other),
        }

        let mut config = Config::default();
        cli.apply_overrides(&mut config).unwrap();
        assert_eq!(config.horizon, 7);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_parse_coins_and_watch() {
        let cli = Cli::try_parse_from(["crypto-checker", "coins"]).unwrap();
        assert!(matches!(cli.command, Command::Coins));

        let cli = Cli::try_parse_from(["crypto-checker", "--days", "7", "watch"]).unwrap();
        assert_eq!(cli.days, Some(7));
        assert!(matches!(cli.command, Command::Watch(WatchArgs { json: false })));
    }

    #[test]
    fn test_missing_coin_is_rejected() {
        assert!(Cli::try_parse_from(["crypto-checker", "price"]).is_err());
    }

    #[test]
    fn test_bad_override_is_invalid_input() {
        let cli = Cli::try_parse_from(["crypto-checker", "--tail-window", "1", "coins"]).unwrap();
        let err = cli.apply_overrides(&mut Config::default()).unwrap_err();
        assert!(matches!(err, CheckerError::InvalidInput(_)));
    }
}

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use crypto_price_checker::cli::Cli;
use crypto_price_checker::utils::user_message;
use crypto_price_checker::{commands, Config};

#[tokio::main]
async fn main() -> ExitCode {
    // Loaded before the subscriber so RUST_LOG in .env takes effect
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("crypto_price_checker=info,reqwest=warn")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("💰 Crypto Price Checker v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("{}", user_message(&e));
            return ExitCode::from(e.exit_code());
        }
    };

    if let Err(e) = cli.apply_overrides(&mut config) {
        eprintln!("{}", user_message(&e));
        return ExitCode::from(e.exit_code());
    }
    debug!("Configuration: {:?}", config);

    match commands::run(&cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", user_message(&e));
            ExitCode::from(e.exit_code())
        }
    }
}

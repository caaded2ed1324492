use crate::cli::PriceArgs;
use crate::config::Config;
use crate::models::PriceOutcome;
use crate::services::price_service;
use crate::utils::CheckerError;

pub async fn execute(config: &Config, args: &PriceArgs) -> Result<(), CheckerError> {
    let coin_id = super::parse_coin(&args.coin)?;
    tracing::info!("💹 Price command for {}", coin_id);

    let client = config.build_client()?;
    let result = price_service::get_price(&client, &coin_id).await;

    println!("{}  [{}]", result.display_text(), result.status());

    match result.outcome {
        PriceOutcome::Success(_) => Ok(()),
        PriceOutcome::NotAvailable => Err(CheckerError::NotFound(coin_id)),
        PriceOutcome::Error(reason) => Err(CheckerError::Network(reason)),
    }
}

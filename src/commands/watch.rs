use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::api::MarketDataSource;
use crate::cli::WatchArgs;
use crate::config::Config;
use crate::services::SelectionCoordinator;
use crate::utils::{user_message, CheckerError};

/// Select every coin read from stdin without waiting for earlier selections
///
/// Only results that are still current when they resolve are printed.
pub async fn execute(config: &Config, args: &WatchArgs) -> Result<(), CheckerError> {
    let client = Arc::new(config.build_client()?);
    let coordinator = Arc::new(SelectionCoordinator::new(client, super::history_params(config)));
    let mut tasks = JoinSet::new();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() || input.starts_with('#') {
            continue;
        }

        let coin_id = match super::parse_coin(input) {
            Ok(id) => id,
            Err(e) => {
                eprintln!("{}", user_message(&e));
                continue;
            }
        };

        let coordinator = Arc::clone(&coordinator);
        let json = args.json;
        tasks.spawn(async move {
            if let Some(output) = select_and_render(coordinator, coin_id, json).await {
                println!("{}", output);
            }
        });
    }

    info!("stdin closed, waiting for {} selection(s)", tasks.len());
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            warn!("Selection task failed: {}", e);
        }
    }
    Ok(())
}

/// Run one selection and render the display state it produced
///
/// Returns `None` when a newer selection superseded this one, either before
/// it finished or before its state could be snapshotted.
async fn select_and_render<S>(
    coordinator: Arc<SelectionCoordinator<S>>,
    coin_id: String,
    json: bool,
) -> Option<String>
where
    S: MarketDataSource + ?Sized,
{
    let report = coordinator.select(&coin_id).await;
    if report.is_stale() {
        return None;
    }

    let state = coordinator.snapshot().await;
    // A newer selection may have landed between finishing and snapshotting
    if !coordinator.is_current(report.token) {
        return None;
    }

    if json {
        match serde_json::to_string(&state) {
            Ok(line) => Some(line),
            Err(e) => {
                warn!("Failed to serialize display state: {}", e);
                None
            }
        }
    } else {
        Some(super::format_state(&state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::FakeSource;
    use crate::services::HistoryParams;
    use std::time::Duration;

    fn coordinator(source: FakeSource) -> Arc<SelectionCoordinator<FakeSource>> {
        Arc::new(SelectionCoordinator::new(Arc::new(source), HistoryParams::default()))
    }

    #[tokio::test]
    async fn test_current_selection_is_rendered() {
        let coord = coordinator(
            FakeSource::new()
                .with_price("ethereum", 3100.0)
                .with_history("ethereum", &[3000.0, 3050.0, 3100.0]),
        );

        let text = select_and_render(coord, "ethereum".to_string(), false)
            .await
            .unwrap();
        assert!(text.contains("✅ 1 ETHEREUM = $3100"));
        assert!(text.contains("Day +5"));
    }

    #[tokio::test]
    async fn test_json_output_is_one_line() {
        let coord = coordinator(FakeSource::new().with_price("bitcoin", 67000.0));

        let line = select_and_render(coord, "bitcoin".to_string(), true)
            .await
            .unwrap();
        assert!(!line.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["selected_coin"], "bitcoin");
        assert_eq!(value["status"], "success");
    }

    #[tokio::test]
    async fn test_superseded_selection_renders_nothing() {
        let coord = coordinator(
            FakeSource::new()
                .with_price("bitcoin", 67000.0)
                .with_history("bitcoin", &[100.0, 102.0, 101.0, 105.0, 108.0, 110.0])
                .with_delay("bitcoin", Duration::from_millis(200))
                .with_price("ethereum", 3100.0)
                .with_history("ethereum", &[3000.0, 3050.0, 3100.0]),
        );

        let slow = tokio::spawn(select_and_render(
            Arc::clone(&coord),
            "bitcoin".to_string(),
            false,
        ));
        tokio::time::sleep(Duration::from_millis(20)).await;

        let fast = select_and_render(Arc::clone(&coord), "ethereum".to_string(), false).await;
        assert!(fast.unwrap().contains("ETHEREUM"));

        assert_eq!(slow.await.unwrap(), None);
        assert_eq!(
            coord.snapshot().await.selected_coin.as_deref(),
            Some("ethereum")
        );
    }
}

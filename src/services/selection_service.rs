//! Coin selection flow
//!
//! Every selection gets a request token from a monotonically increasing
//! counter. The price stage and the history stage run concurrently and each
//! writes its own part of the [`DisplayState`] when it finishes, but only if
//! its token is still the newest one issued. A slow response for an older
//! selection is dropped instead of overwriting a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::api::MarketDataSource;
use crate::models::{DisplayState, PriceResult, PriceStatus};
use crate::services::history_service::{self, HistoryParams, HistoryResult};
use crate::services::price_service;
use crate::utils::{user_message, CheckerError};

/// What one selection produced, whether or not it reached the display
#[derive(Debug)]
pub struct SelectionReport {
    pub token: u64,
    pub coin_id: String,
    pub price: PriceResult,
    pub history: Result<HistoryResult, CheckerError>,
    pub price_applied: bool,
    pub history_applied: bool,
}

impl SelectionReport {
    /// True when a newer selection superseded this one before it finished
    pub fn is_stale(&self) -> bool {
        !(self.price_applied && self.history_applied)
    }
}

pub struct SelectionCoordinator<S: ?Sized> {
    source: Arc<S>,
    params: HistoryParams,
    latest_token: AtomicU64,
    state: RwLock<DisplayState>,
}

impl<S> SelectionCoordinator<S>
where
    S: MarketDataSource + ?Sized,
{
    pub fn new(source: Arc<S>, params: HistoryParams) -> Self {
        Self {
            source,
            params,
            latest_token: AtomicU64::new(0),
            state: RwLock::new(DisplayState::default()),
        }
    }

    pub fn latest_token(&self) -> u64 {
        self.latest_token.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.latest_token() == token
    }

    pub async fn snapshot(&self) -> DisplayState {
        self.state.read().await.clone()
    }

    /// Mutate the display state on behalf of `token`, unless it is stale
    async fn apply<F>(&self, token: u64, update: F) -> bool
    where
        F: FnOnce(&mut DisplayState),
    {
        let mut state = self.state.write().await;
        if !self.is_current(token) {
            debug!(
                "Discarding stale result for request {} (latest is {})",
                token,
                self.latest_token()
            );
            return false;
        }
        update(&mut state);
        true
    }

    /// Select a coin: fetch its price and history concurrently
    pub async fn select(&self, coin_id: &str) -> SelectionReport {
        let token = self.latest_token.fetch_add(1, Ordering::SeqCst) + 1;
        info!("🪙 Selection {} -> {}", token, coin_id);

        self.apply(token, |state| {
            state.selected_coin = Some(coin_id.to_string());
            state.status = PriceStatus::Loading;
        })
        .await;

        let price_stage = async {
            let result = price_service::get_price(self.source.as_ref(), coin_id).await;
            let applied = self
                .apply(token, |state| {
                    state.status = result.status();
                    state.price_text = result.display_text();
                })
                .await;
            (result, applied)
        };

        let history_stage = async {
            let result = history_service::get_history(self.source.as_ref(), coin_id, self.params).await;
            let applied = self
                .apply(token, |state| match &result {
                    Ok(history) => {
                        state.history = Some(history.history_chart.clone());
                        state.prediction = Some(history.prediction_chart.clone());
                        state.history_error = None;
                    }
                    Err(e) => {
                        state.history = None;
                        state.prediction = None;
                        state.history_error = Some(user_message(e));
                    }
                })
                .await;
            if let Err(e) = &result {
                warn!("History stage for {} failed: {}", coin_id, e);
            }
            (result, applied)
        };

        let ((price, price_applied), (history, history_applied)) =
            tokio::join!(price_stage, history_stage);

        if !(price_applied && history_applied) {
            info!("Selection {} ({}) was superseded", token, coin_id);
        }

        SelectionReport {
            token,
            coin_id: coin_id.to_string(),
            price,
            history,
            price_applied,
            history_applied,
        }
    }
}

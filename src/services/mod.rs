pub mod chart_service;
pub mod history_service;
pub mod price_service;
pub mod projection_service;
pub mod selection_service;

#[cfg(test)]
pub mod testing;

pub use history_service::{HistoryParams, HistoryResult};
pub use selection_service::{SelectionCoordinator, SelectionReport};

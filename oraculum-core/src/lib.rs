//! Oraculum Core: signal domain types and the client side of the WI API.
//!
//! This crate holds everything the dashboard needs that is not rendering:
//! - Signal classification against a sell/buy threshold pair
//! - Threshold clamping and persistence
//! - The seven-stop colour ramp used by score gauges
//! - Declarative fade/width transitions
//! - Request state machines with stale-response rejection
//! - Backtest ordering and per-signal summaries
//! - Wire types and a blocking HTTP client for `/api/v1/wi` and `/api/v1/backtest`

pub mod api;
pub mod backtest;
pub mod color;
pub mod config;
pub mod error;
pub mod request;
pub mod settings;
pub mod signal;
pub mod thresholds;
pub mod tickers;
pub mod transition;

pub use api::{BacktestQuery, BacktestResponse, BacktestRow, Benchmark, ScoreRow, SignalApi};
pub use backtest::{sort_by_performance, SignalSummary, SummaryGroup};
pub use color::{color_at, Rgb};
pub use error::{ApiError, StoreError};
pub use signal::{classify, Signal};
pub use thresholds::Thresholds;

#[cfg(test)]
mod tests {
    use super::*;

    /// Everything the worker thread hands back to the UI thread must be Send.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<ScoreRow>();
        require_sync::<ScoreRow>();
        require_send::<BacktestResponse>();
        require_sync::<BacktestResponse>();
        require_send::<ApiError>();
        require_sync::<ApiError>();
        require_send::<api::HttpClient>();
        require_sync::<api::HttpClient>();
    }
}

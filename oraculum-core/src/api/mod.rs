//! Client side of the external WI API.
//!
//! The [`SignalApi`] trait abstracts over the transport so the dashboard can be
//! driven by a fake in tests; [`HttpClient`] is the blocking reqwest implementation.

mod client;
mod types;

pub use client::HttpClient;
pub use types::{
    BacktestParams, BacktestQuery, BacktestResponse, BacktestRow, Benchmark, Components,
    ExportFormat, ScoreResponse, ScoreRow,
};

use crate::error::ApiError;

pub const WI_PATH: &str = "/api/v1/wi";
pub const BACKTEST_PATH: &str = "/api/v1/backtest";
pub const HEALTH_PATH: &str = "/";

/// Operations the dashboard needs from the score service.
pub trait SignalApi: Send + Sync {
    /// `GET /api/v1/wi` for the given symbols (an empty list is a legal request).
    fn scores(&self, tickers: &[String]) -> Result<Vec<ScoreRow>, ApiError>;

    /// `GET /api/v1/backtest` with `format=json`.
    fn backtest(&self, query: &BacktestQuery) -> Result<BacktestResponse, ApiError>;

    /// `GET /api/v1/backtest` with `format=csv`. The payload is opaque.
    fn export_csv(&self, query: &BacktestQuery) -> Result<Vec<u8>, ApiError>;

    /// Liveness probe against the API root.
    fn health(&self) -> Result<(), ApiError>;
}

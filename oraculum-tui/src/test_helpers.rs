//! Test helpers: a canned API and an app wired to in-memory channels.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};

use chrono::NaiveDate;
use oraculum_core::api::{BacktestQuery, BacktestResponse, ScoreRow, SignalApi};
use oraculum_core::settings::{MemoryStore, ThresholdStore};
use oraculum_core::{ApiError, Thresholds};

use crate::app::AppState;
use crate::worker::{WorkerCommand, WorkerResponse};

#[derive(Debug, Default, Clone)]
pub struct FakeApi {
    pub scores: Vec<ScoreRow>,
    pub backtest: BacktestResponse,
    pub csv: Vec<u8>,
    pub error: Option<ApiError>,
}

impl FakeApi {
    pub fn with_scores(scores: Vec<ScoreRow>) -> Self {
        Self {
            scores,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), ApiError> {
        match &self.error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

impl SignalApi for FakeApi {
    fn scores(&self, _tickers: &[String]) -> Result<Vec<ScoreRow>, ApiError> {
        self.check()?;
        Ok(self.scores.clone())
    }

    fn backtest(&self, _query: &BacktestQuery) -> Result<BacktestResponse, ApiError> {
        self.check()?;
        Ok(self.backtest.clone())
    }

    fn export_csv(&self, _query: &BacktestQuery) -> Result<Vec<u8>, ApiError> {
        self.check()?;
        Ok(self.csv.clone())
    }

    fn health(&self) -> Result<(), ApiError> {
        self.check()
    }
}

pub fn sample_query() -> BacktestQuery {
    BacktestQuery {
        tickers: vec!["AAPL".into(), "MSFT".into()],
        start: NaiveDate::from_ymd_opt(2025, 4, 19).unwrap(),
        end: NaiveDate::from_ymd_opt(2025, 10, 19).unwrap(),
        thresholds: Thresholds::default(),
    }
}

/// App plus the worker end of its command channel. Responses are fed in
/// directly with [`Harness::respond`].
pub struct Harness {
    pub app: AppState,
    pub commands: Receiver<WorkerCommand>,
}

impl Harness {
    /// Next command the app sent to the worker, if any.
    pub fn next_command(&self) -> Option<WorkerCommand> {
        self.commands.try_recv().ok()
    }

    /// Feed a response straight into the app.
    pub fn respond(&mut self, resp: WorkerResponse) {
        self.app.handle_worker_response(resp);
    }
}

pub fn harness(tickers: &str) -> Harness {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (_resp_tx, resp_rx) = mpsc::channel();
    let app = AppState::new(
        cmd_tx,
        resp_rx,
        ThresholdStore::new(Box::new(MemoryStore::new())),
        tickers.to_string(),
        PathBuf::from("."),
    );
    Harness {
        app,
        commands: cmd_rx,
    }
}

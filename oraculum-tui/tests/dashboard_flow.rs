//! Dashboard flows end to end: controller → worker thread → fake API → controller.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use oraculum_core::api::{BacktestQuery, BacktestResponse, BacktestRow, Benchmark, ScoreRow, SignalApi};
use oraculum_core::settings::{JsonFileStore, ThresholdStore};
use oraculum_core::{ApiError, Signal};
use oraculum_tui::app::AppState;
use oraculum_tui::worker::{spawn_worker, WorkerCommand};

#[derive(Default)]
struct CannedApi {
    scores: Vec<ScoreRow>,
    backtest: BacktestResponse,
    csv: Vec<u8>,
}

impl SignalApi for CannedApi {
    fn scores(&self, tickers: &[String]) -> Result<Vec<ScoreRow>, ApiError> {
        Ok(self
            .scores
            .iter()
            .filter(|r| tickers.contains(&r.ticker))
            .cloned()
            .collect())
    }

    fn backtest(&self, _query: &BacktestQuery) -> Result<BacktestResponse, ApiError> {
        Ok(self.backtest.clone())
    }

    fn export_csv(&self, _query: &BacktestQuery) -> Result<Vec<u8>, ApiError> {
        Ok(self.csv.clone())
    }

    fn health(&self) -> Result<(), ApiError> {
        Err(ApiError::Http { status: 503 })
    }
}

struct Dashboard {
    app: AppState,
    worker: Option<JoinHandle<()>>,
}

impl Dashboard {
    fn start(api: CannedApi, tickers: &str, settings: &Path, export_dir: PathBuf) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let worker = spawn_worker(cmd_rx, resp_tx, Arc::new(api)).unwrap();
        let store = ThresholdStore::new(Box::new(JsonFileStore::open(settings)));
        let app = AppState::new(cmd_tx, resp_rx, store, tickers.to_string(), export_dir);
        Self {
            app,
            worker: Some(worker),
        }
    }

    /// Pump worker responses until `done` holds.
    fn wait_for(&mut self, done: impl Fn(&AppState) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !done(&self.app) {
            assert!(Instant::now() < deadline, "timed out waiting for worker");
            std::thread::sleep(Duration::from_millis(5));
            self.app.drain_worker();
        }
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        let _ = self.app.worker_tx.send(WorkerCommand::Shutdown);
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}

#[test]
fn watchlist_scores_are_classified() {
    let dir = tempfile::tempdir().unwrap();
    let api = CannedApi {
        scores: vec![ScoreRow::new("AAPL", 75.0), ScoreRow::new("MSFT", 30.0)],
        ..CannedApi::default()
    };
    let mut dash = Dashboard::start(api, "AAPL, MSFT", &dir.path().join("settings.json"), dir.path().into());

    dash.app.load_watchlist();
    dash.wait_for(|app| !app.watchlist.request.is_loading());

    let app = &dash.app;
    let got: Vec<(String, Signal)> = app
        .watchlist
        .rows
        .iter()
        .map(|r| (r.ticker.clone(), app.signal_for(r)))
        .collect();
    assert_eq!(
        got,
        vec![("AAPL".to_string(), Signal::Buy), ("MSFT".to_string(), Signal::Sell)]
    );
}

#[test]
fn backtest_rows_come_back_sorted() {
    let dir = tempfile::tempdir().unwrap();
    let api = CannedApi {
        backtest: BacktestResponse {
            data: vec![
                BacktestRow::with_perf("B", Some(-2.0)),
                BacktestRow::with_perf("C", None),
                BacktestRow::with_perf("A", Some(5.0)),
            ],
            benchmark: Some(Benchmark { perf_pct: Some(1.25) }),
            params: None,
        },
        ..CannedApi::default()
    };
    let mut dash = Dashboard::start(api, "A,B,C", &dir.path().join("settings.json"), dir.path().into());

    dash.app.run_backtest();
    dash.wait_for(|app| !app.backtest.request.is_loading());

    let order: Vec<&str> = dash.app.backtest.rows.iter().map(|r| r.ticker.as_str()).collect();
    assert_eq!(order, vec!["A", "B", "C"]);
    assert!(dash.app.backtest.request.error().is_none());
}

#[test]
fn thresholds_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("settings.json");

    {
        let mut dash = Dashboard::start(CannedApi::default(), "", &settings, dir.path().into());
        assert_eq!(dash.app.set_buy(40.0), 41);
        dash.app.set_sell(12.6);
    }

    let dash = Dashboard::start(CannedApi::default(), "", &settings, dir.path().into());
    assert_eq!(dash.app.thresholds().sell(), 13);
    assert_eq!(dash.app.thresholds().buy(), 41);
}

#[test]
fn export_writes_csv_into_export_dir() {
    let dir = tempfile::tempdir().unwrap();
    let export_dir = dir.path().join("exports");
    let api = CannedApi {
        csv: b"ticker,perf_pct\nAAPL,3.2\n".to_vec(),
        ..CannedApi::default()
    };
    let mut dash = Dashboard::start(api, "AAPL", &dir.path().join("settings.json"), export_dir.clone());

    let query = dash.app.backtest_query().unwrap();
    dash.app.export_csv().expect("export should be enabled");
    dash.wait_for(|app| !app.backtest.export.is_loading());

    let expected = export_dir.join(query.export_file_name());
    assert_eq!(dash.app.backtest.last_export.as_deref(), Some(expected.as_path()));
    assert_eq!(std::fs::read(expected).unwrap(), b"ticker,perf_pct\nAAPL,3.2\n");
}

#[test]
fn unreachable_api_is_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let mut dash = Dashboard::start(CannedApi::default(), "", &dir.path().join("settings.json"), dir.path().into());

    dash.app.worker_tx.send(WorkerCommand::CheckHealth).unwrap();
    dash.wait_for(|app| app.api_reachable.is_some());

    assert_eq!(dash.app.api_reachable, Some(false));
    assert!(dash.app.error_history[0].message.contains("HTTP 503"));
}

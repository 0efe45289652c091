//! Background worker: all network I/O runs off the UI thread.
//!
//! Communication with the TUI main thread is via `mpsc` channels. Each request
//! runs on its own short-lived thread, so a slow backtest never holds up a
//! watch-list reload and vice versa.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn};

use oraculum_core::api::{BacktestQuery, BacktestResponse, ScoreRow, SignalApi};
use oraculum_core::request::RequestSeq;
use oraculum_core::ApiError;

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    FetchScores {
        seq: RequestSeq,
        tickers: Vec<String>,
    },
    RunBacktest {
        seq: RequestSeq,
        query: BacktestQuery,
    },
    ExportCsv {
        seq: RequestSeq,
        query: BacktestQuery,
        dir: PathBuf,
    },
    CheckHealth,
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    Scores {
        seq: RequestSeq,
        result: Result<Vec<ScoreRow>, ApiError>,
    },
    Backtest {
        seq: RequestSeq,
        result: Result<BacktestResponse, ApiError>,
    },
    Exported {
        seq: RequestSeq,
        result: Result<PathBuf, ApiError>,
    },
    Health {
        result: Result<(), ApiError>,
    },
}

/// Spawn the dispatcher thread.
pub fn spawn_worker(
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    api: Arc<dyn SignalApi>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("oraculum-worker".into())
        .spawn(move || worker_loop(rx, tx, api))
}

fn worker_loop(rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>, api: Arc<dyn SignalApi>) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(cmd) => dispatch(cmd, &tx, &api),
        }
    }
    debug!("worker stopped");
}

/// Run `cmd` on its own request thread. If no thread can be spawned the
/// command is settled with a transport error so its tracker never hangs.
fn dispatch(cmd: WorkerCommand, tx: &Sender<WorkerResponse>, api: &Arc<dyn SignalApi>) {
    let pending = Pending::of(&cmd);
    let request_tx = tx.clone();
    let api = Arc::clone(api);

    let spawned = thread::Builder::new()
        .name("oraculum-request".into())
        .spawn(move || {
            if let Some(resp) = execute(cmd, api.as_ref()) {
                let _ = request_tx.send(resp);
            }
        });

    if let Err(e) = spawned {
        warn!(error = %e, "could not spawn request thread");
        let err = ApiError::Transport(format!("request thread unavailable: {e}"));
        if let Some(resp) = pending.fail(err) {
            let _ = tx.send(resp);
        }
    }
}

/// Which response a command settles into, kept so it can be failed after
/// the command itself has been moved.
#[derive(Debug, Clone, Copy)]
enum Pending {
    Scores(RequestSeq),
    Backtest(RequestSeq),
    Export(RequestSeq),
    Health,
    Nothing,
}

impl Pending {
    fn of(cmd: &WorkerCommand) -> Self {
        match cmd {
            WorkerCommand::FetchScores { seq, .. } => Pending::Scores(*seq),
            WorkerCommand::RunBacktest { seq, .. } => Pending::Backtest(*seq),
            WorkerCommand::ExportCsv { seq, .. } => Pending::Export(*seq),
            WorkerCommand::CheckHealth => Pending::Health,
            WorkerCommand::Shutdown => Pending::Nothing,
        }
    }

    fn fail(self, err: ApiError) -> Option<WorkerResponse> {
        match self {
            Pending::Scores(seq) => Some(WorkerResponse::Scores { seq, result: Err(err) }),
            Pending::Backtest(seq) => Some(WorkerResponse::Backtest { seq, result: Err(err) }),
            Pending::Export(seq) => Some(WorkerResponse::Exported { seq, result: Err(err) }),
            Pending::Health => Some(WorkerResponse::Health { result: Err(err) }),
            Pending::Nothing => None,
        }
    }
}

/// Perform one command against the API. `Shutdown` yields no response.
pub fn execute(cmd: WorkerCommand, api: &dyn SignalApi) -> Option<WorkerResponse> {
    match cmd {
        WorkerCommand::FetchScores { seq, tickers } => {
            info!(seq, count = tickers.len(), "fetching scores");
            let result = api.scores(&tickers);
            log_outcome("scores", seq, &result);
            Some(WorkerResponse::Scores { seq, result })
        }
        WorkerCommand::RunBacktest { seq, query } => {
            info!(seq, start = %query.start, end = %query.end, "running backtest");
            let result = api.backtest(&query);
            log_outcome("backtest", seq, &result);
            Some(WorkerResponse::Backtest { seq, result })
        }
        WorkerCommand::ExportCsv { seq, query, dir } => {
            info!(seq, dir = %dir.display(), "exporting backtest CSV");
            let result = api
                .export_csv(&query)
                .and_then(|bytes| write_export(&dir, &query.export_file_name(), &bytes));
            log_outcome("export", seq, &result);
            Some(WorkerResponse::Exported { seq, result })
        }
        WorkerCommand::CheckHealth => Some(WorkerResponse::Health {
            result: api.health(),
        }),
        WorkerCommand::Shutdown => None,
    }
}

/// Store an export payload as-is. Returns the written path.
pub fn write_export(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ApiError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    std::fs::write(&path, bytes)?;
    Ok(path)
}

fn log_outcome<T>(op: &str, seq: RequestSeq, result: &Result<T, ApiError>) {
    match result {
        Ok(_) => debug!(op, seq, "request succeeded"),
        Err(e) => warn!(op, seq, error = %e, "request failed"),
    }
}

//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels and
//! every completion is checked against its operation's [`RequestTracker`]
//! before it touches any state.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::time::Instant;

use chrono::{Days, Months, NaiveDate, NaiveDateTime};
use tracing::{debug, info, warn};

use oraculum_core::api::{BacktestQuery, BacktestResponse, Benchmark, BacktestRow, ScoreRow};
use oraculum_core::request::{RequestSeq, RequestTracker, Settlement};
use oraculum_core::settings::ThresholdStore;
use oraculum_core::tickers::parse_tickers;
use oraculum_core::{sort_by_performance, ApiError, Signal, SignalSummary, Thresholds};

use crate::ui::widgets::gauge::GaugeState;
use crate::worker::{WorkerCommand, WorkerResponse};

/// Most recent errors kept for the history overlay.
pub const ERROR_HISTORY_CAP: usize = 50;

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Watchlist,
    Backtest,
    Help,
}

impl Panel {
    pub const COUNT: usize = 3;

    pub fn index(self) -> usize {
        match self {
            Panel::Watchlist => 0,
            Panel::Backtest => 1,
            Panel::Help => 2,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Watchlist),
            1 => Some(Panel::Backtest),
            2 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Watchlist => "Watchlist",
            Panel::Backtest => "Backtest",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % Self::COUNT).unwrap_or(Panel::Watchlist)
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + Self::COUNT - 1) % Self::COUNT)
            .unwrap_or(Panel::Watchlist)
    }
}

/// Editable controls in the top bar, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Tickers,
    Sell,
    Buy,
    Start,
    End,
}

impl Field {
    pub const ALL: [Field; 5] = [Field::Tickers, Field::Sell, Field::Buy, Field::Start, Field::End];

    pub fn label(self) -> &'static str {
        match self {
            Field::Tickers => "Tickers",
            Field::Sell => "SELL <",
            Field::Buy => "BUY ≥",
            Field::Start => "Start",
            Field::End => "End",
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Field {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Field {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Operation an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Watchlist,
    Backtest,
    Export,
    Settings,
    Health,
}

impl Operation {
    pub fn label(self) -> &'static str {
        match self {
            Operation::Watchlist => "WI",
            Operation::Backtest => "BT",
            Operation::Export => "CSV",
            Operation::Settings => "CFG",
            Operation::Health => "API",
        }
    }
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub operation: Operation,
    pub message: String,
}

/// Overlay shown above the active panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Edit(Field),
    ErrorHistory,
}

/// Watch-list panel state.
#[derive(Debug, Default)]
pub struct WatchlistState {
    pub rows: Vec<ScoreRow>,
    pub request: RequestTracker,
    /// One animation per row position.
    pub gauges: Vec<GaugeState>,
    pub scroll: usize,
}

impl WatchlistState {
    /// Replace the rows and move each gauge toward its new score. Gauges are
    /// matched by position; a position that did not exist before starts at
    /// its value without a transition.
    pub fn replace_rows(&mut self, rows: Vec<ScoreRow>, now: Instant) {
        self.gauges.truncate(rows.len());
        for (i, row) in rows.iter().enumerate() {
            match self.gauges.get_mut(i) {
                Some(gauge) => gauge.update(row.score(), now),
                None => self.gauges.push(GaugeState::new(row.score())),
            }
        }
        self.rows = rows;
        self.scroll = self.scroll.min(self.rows.len().saturating_sub(1));
    }

    /// Advance every gauge animation to `now`.
    pub fn tick(&mut self, now: Instant) {
        for gauge in &mut self.gauges {
            gauge.tick(now);
        }
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.gauges.iter().any(|g| g.is_animating(now))
    }
}

/// Backtest panel state.
#[derive(Debug)]
pub struct BacktestState {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub rows: Vec<BacktestRow>,
    pub benchmark: Option<Benchmark>,
    pub request: RequestTracker,
    pub export: RequestTracker,
    pub last_export: Option<PathBuf>,
    pub scroll: usize,
}

impl BacktestState {
    /// Window of the last six months ending `today`.
    pub fn ending(today: NaiveDate) -> Self {
        Self {
            start: today.checked_sub_months(Months::new(6)),
            end: Some(today),
            rows: Vec::new(),
            benchmark: None,
            request: RequestTracker::new(),
            export: RequestTracker::new(),
            last_export: None,
            scroll: 0,
        }
    }

    fn apply(&mut self, response: BacktestResponse) {
        let mut rows = response.data;
        sort_by_performance(&mut rows);
        self.rows = rows;
        self.benchmark = response.benchmark;
        self.scroll = 0;
    }
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub focus: Field,
    pub running: bool,

    // Controls
    pub tickers_text: String,
    thresholds: Thresholds,
    threshold_store: ThresholdStore,

    // Panel states
    pub watchlist: WatchlistState,
    pub backtest: BacktestState,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
    pub edit_buffer: String,
    pub api_reachable: Option<bool>,

    pub export_dir: PathBuf,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        threshold_store: ThresholdStore,
        tickers_text: String,
        export_dir: PathBuf,
    ) -> Self {
        let thresholds = threshold_store.load();
        let today = chrono::Local::now().date_naive();
        Self {
            active_panel: Panel::Watchlist,
            focus: Field::Tickers,
            running: true,
            tickers_text,
            thresholds,
            threshold_store,
            watchlist: WatchlistState::default(),
            backtest: BacktestState::ending(today),
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
            edit_buffer: String::new(),
            api_reachable: None,
            export_dir,
        }
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn tickers(&self) -> Vec<String> {
        parse_tickers(&self.tickers_text)
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Request fresh scores for the current ticker list.
    pub fn load_watchlist(&mut self) -> RequestSeq {
        let seq = self.watchlist.request.begin();
        let tickers = self.tickers();
        debug!(seq, count = tickers.len(), "load watch-list");
        self.send(WorkerCommand::FetchScores { seq, tickers });
        seq
    }

    /// Run a backtest over the current window. Without both dates the
    /// request fails on the spot.
    pub fn run_backtest(&mut self) -> RequestSeq {
        let seq = self.backtest.request.begin();
        match self.backtest_query() {
            Some(query) => self.send(WorkerCommand::RunBacktest { seq, query }),
            None => {
                let msg = "start and end dates are required";
                self.backtest.request.fail(seq, msg);
                self.push_error(Operation::Backtest, msg.to_string());
            }
        }
        seq
    }

    /// Export is offered only with both dates set and no backtest running.
    pub fn can_export(&self) -> bool {
        !self.backtest.request.is_loading()
            && self.backtest.start.is_some()
            && self.backtest.end.is_some()
    }

    /// Download the CSV for the current window into the export directory.
    pub fn export_csv(&mut self) -> Option<RequestSeq> {
        if !self.can_export() {
            self.set_warning("Export needs both dates and no backtest in progress");
            return None;
        }
        let query = self.backtest_query()?;
        let seq = self.backtest.export.begin();
        self.send(WorkerCommand::ExportCsv {
            seq,
            query,
            dir: self.export_dir.clone(),
        });
        self.set_status("Exporting CSV…");
        Some(seq)
    }

    pub fn backtest_query(&self) -> Option<BacktestQuery> {
        Some(BacktestQuery {
            tickers: self.tickers(),
            start: self.backtest.start?,
            end: self.backtest.end?,
            thresholds: self.thresholds,
        })
    }

    /// Propose a sell threshold. Returns the value actually stored.
    pub fn set_sell(&mut self, proposed: f64) -> u8 {
        let applied = self.thresholds.set_sell(proposed);
        self.persist_thresholds();
        applied
    }

    /// Propose a buy threshold. Returns the value actually stored.
    pub fn set_buy(&mut self, proposed: f64) -> u8 {
        let applied = self.thresholds.set_buy(proposed);
        self.persist_thresholds();
        applied
    }

    pub fn set_sell_text(&mut self, text: &str) -> u8 {
        let applied = self.thresholds.set_sell_text(text);
        self.persist_thresholds();
        applied
    }

    pub fn set_buy_text(&mut self, text: &str) -> u8 {
        let applied = self.thresholds.set_buy_text(text);
        self.persist_thresholds();
        applied
    }

    fn persist_thresholds(&mut self) {
        if let Err(e) = self.threshold_store.save(&self.thresholds) {
            warn!(error = %e, "could not save thresholds");
            self.push_error(Operation::Settings, format!("Saving thresholds failed: {e}"));
        }
    }

    /// Shift a backtest date by `days`. An unset date starts from today.
    pub fn nudge_date(&mut self, field: Field, days: i64) {
        let today = chrono::Local::now().date_naive();
        let slot = match field {
            Field::Start => &mut self.backtest.start,
            Field::End => &mut self.backtest.end,
            _ => return,
        };
        let base = slot.unwrap_or(today);
        let moved = if days >= 0 {
            base.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            base.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        if let Some(date) = moved {
            *slot = Some(date);
        }
    }

    /// Apply edited text to `field`. Thresholds coerce, dates must be
    /// `YYYY-MM-DD` or empty (which unsets the date).
    pub fn apply_edit(&mut self, field: Field, text: &str) {
        match field {
            Field::Tickers => self.tickers_text = text.to_string(),
            Field::Sell => {
                let v = self.set_sell_text(text);
                self.set_status(format!("SELL threshold {v}"));
            }
            Field::Buy => {
                let v = self.set_buy_text(text);
                self.set_status(format!("BUY threshold {v}"));
            }
            Field::Start | Field::End => {
                let text = text.trim();
                let date = if text.is_empty() {
                    None
                } else {
                    match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
                        Ok(d) => Some(d),
                        Err(_) => {
                            self.set_warning(format!("Not a date: {text} (expected YYYY-MM-DD)"));
                            return;
                        }
                    }
                };
                if field == Field::Start {
                    self.backtest.start = date;
                } else {
                    self.backtest.end = date;
                }
            }
        }
    }

    /// Current text of `field`, used to seed the edit prompt.
    pub fn field_text(&self, field: Field) -> String {
        let date = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();
        match field {
            Field::Tickers => self.tickers_text.clone(),
            Field::Sell => self.thresholds.sell().to_string(),
            Field::Buy => self.thresholds.buy().to_string(),
            Field::Start => date(self.backtest.start),
            Field::End => date(self.backtest.end),
        }
    }

    // ── Derived views ────────────────────────────────────────────────

    /// Signal of a watch-list row under the current thresholds.
    pub fn signal_for(&self, row: &ScoreRow) -> Signal {
        self.thresholds.classify(row.score())
    }

    pub fn summary(&self) -> SignalSummary {
        SignalSummary::from_rows(&self.backtest.rows)
    }

    // ── Worker responses ─────────────────────────────────────────────

    /// Drain everything the worker has sent so far.
    pub fn drain_worker(&mut self) {
        while let Ok(resp) = self.worker_rx.try_recv() {
            self.handle_worker_response(resp);
        }
    }

    pub fn handle_worker_response(&mut self, resp: WorkerResponse) {
        self.handle_worker_response_at(resp, Instant::now());
    }

    pub fn handle_worker_response_at(&mut self, resp: WorkerResponse, now: Instant) {
        match resp {
            WorkerResponse::Scores { seq, result } => match result {
                Ok(rows) => {
                    if self.watchlist.request.succeed(seq) == Settlement::Applied {
                        let count = rows.len();
                        self.watchlist.replace_rows(rows, now);
                        self.set_status(format!("Loaded {count} scores"));
                    } else {
                        debug!(seq, "dropping stale scores");
                    }
                }
                Err(e) => self.settle_failure(Operation::Watchlist, seq, e),
            },
            WorkerResponse::Backtest { seq, result } => match result {
                Ok(response) => {
                    if self.backtest.request.succeed(seq) == Settlement::Applied {
                        self.backtest.apply(response);
                        self.set_status(format!(
                            "Backtest complete: {} tickers",
                            self.backtest.rows.len()
                        ));
                    } else {
                        debug!(seq, "dropping stale backtest");
                    }
                }
                Err(e) => self.settle_failure(Operation::Backtest, seq, e),
            },
            WorkerResponse::Exported { seq, result } => match result {
                Ok(path) => {
                    if self.backtest.export.succeed(seq) == Settlement::Applied {
                        info!(path = %path.display(), "CSV exported");
                        self.set_status(format!("Exported {}", path.display()));
                        self.backtest.last_export = Some(path);
                    }
                }
                Err(e) => self.settle_failure(Operation::Export, seq, e),
            },
            WorkerResponse::Health { result } => match result {
                Ok(()) => {
                    self.api_reachable = Some(true);
                    info!("API reachable");
                }
                Err(e) => {
                    self.api_reachable = Some(false);
                    self.push_error(Operation::Health, format!("API unreachable: {e}"));
                }
            },
        }
    }

    fn settle_failure(&mut self, op: Operation, seq: RequestSeq, err: ApiError) {
        let message = err.to_string();
        let tracker = match op {
            Operation::Watchlist => &mut self.watchlist.request,
            Operation::Backtest => &mut self.backtest.request,
            Operation::Export => &mut self.backtest.export,
            Operation::Settings | Operation::Health => return,
        };
        if tracker.fail(seq, message.clone()) == Settlement::Applied {
            self.push_error(op, message);
        } else {
            debug!(seq, op = op.label(), "dropping stale failure");
        }
    }

    // ── Status ───────────────────────────────────────────────────────

    /// Push an error to the history, capping at [`ERROR_HISTORY_CAP`].
    pub fn push_error(&mut self, operation: Operation, message: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            operation,
            message: message.clone(),
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    fn send(&mut self, cmd: WorkerCommand) {
        if self.worker_tx.send(cmd).is_err() {
            warn!("worker channel closed");
            self.set_warning("Background worker is not running");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::harness;

    fn scores_of(h: &crate::test_helpers::Harness) -> Vec<String> {
        h.app.watchlist.rows.iter().map(|r| r.ticker.clone()).collect()
    }

    #[test]
    fn panel_cycle() {
        assert_eq!(Panel::Watchlist.next(), Panel::Backtest);
        assert_eq!(Panel::Help.next(), Panel::Watchlist);
        assert_eq!(Panel::Watchlist.prev(), Panel::Help);
        for i in 0..Panel::COUNT {
            assert_eq!(Panel::from_index(i).unwrap().index(), i);
        }
        assert!(Panel::from_index(Panel::COUNT).is_none());
    }

    #[test]
    fn field_focus_wraps() {
        assert_eq!(Field::End.next(), Field::Tickers);
        assert_eq!(Field::Tickers.prev(), Field::End);
    }

    #[test]
    fn load_sends_parsed_tickers() {
        let mut h = harness(" AAPL , ,MSFT,");
        let seq = h.app.load_watchlist();
        assert!(h.app.watchlist.request.is_loading());
        match h.next_command() {
            Some(WorkerCommand::FetchScores { seq: s, tickers }) => {
                assert_eq!(s, seq);
                assert_eq!(tickers, vec!["AAPL", "MSFT"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn scores_classified_with_current_thresholds() {
        let mut h = harness("AAPL,MSFT");
        let seq = h.app.load_watchlist();
        h.respond(WorkerResponse::Scores {
            seq,
            result: Ok(vec![ScoreRow::new("AAPL", 75.0), ScoreRow::new("MSFT", 30.0)]),
        });

        assert!(!h.app.watchlist.request.is_loading());
        let signals: Vec<Signal> = h.app.watchlist.rows.iter().map(|r| h.app.signal_for(r)).collect();
        assert_eq!(signals, vec![Signal::Buy, Signal::Sell]);
        assert_eq!(h.app.watchlist.gauges.len(), 2);
    }

    #[test]
    fn stale_scores_are_dropped() {
        let mut h = harness("AAPL");
        let first = h.app.load_watchlist();
        let second = h.app.load_watchlist();

        h.respond(WorkerResponse::Scores {
            seq: second,
            result: Ok(vec![ScoreRow::new("NEW", 50.0)]),
        });
        h.respond(WorkerResponse::Scores {
            seq: first,
            result: Ok(vec![ScoreRow::new("OLD", 50.0)]),
        });
        assert_eq!(scores_of(&h), vec!["NEW"]);
    }

    #[test]
    fn watchlist_failure_keeps_rows_and_records_error() {
        let mut h = harness("AAPL");
        let seq = h.app.load_watchlist();
        h.respond(WorkerResponse::Scores {
            seq,
            result: Ok(vec![ScoreRow::new("AAPL", 60.0)]),
        });

        let seq = h.app.load_watchlist();
        h.respond(WorkerResponse::Scores {
            seq,
            result: Err(ApiError::Http { status: 500 }),
        });
        assert_eq!(h.app.watchlist.request.error(), Some("HTTP 500"));
        assert_eq!(scores_of(&h), vec!["AAPL"]);
        assert_eq!(h.app.error_history[0].operation, Operation::Watchlist);
    }

    #[test]
    fn operations_fail_independently() {
        let mut h = harness("AAPL");
        let wl = h.app.load_watchlist();
        let bt = h.app.run_backtest();
        h.respond(WorkerResponse::Backtest {
            seq: bt,
            result: Err(ApiError::Transport("connection refused".into())),
        });

        assert!(h.app.watchlist.request.is_loading());
        assert_eq!(h.app.backtest.request.error(), Some("connection refused"));

        h.respond(WorkerResponse::Scores { seq: wl, result: Ok(vec![]) });
        assert!(h.app.watchlist.request.error().is_none());
        assert_eq!(h.app.backtest.request.error(), Some("connection refused"));
    }

    #[test]
    fn backtest_rows_sorted_and_benchmark_stored() {
        let mut h = harness("A,B,C");
        let seq = h.app.run_backtest();
        h.respond(WorkerResponse::Backtest {
            seq,
            result: Ok(BacktestResponse {
                data: vec![
                    BacktestRow::with_perf("B", Some(-2.0)),
                    BacktestRow::with_perf("C", None),
                    BacktestRow::with_perf("A", Some(5.0)),
                ],
                benchmark: Some(Benchmark { perf_pct: Some(3.1) }),
                params: None,
            }),
        });

        let order: Vec<&str> = h.app.backtest.rows.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(order, vec!["A", "B", "C"]);
        assert_eq!(h.app.backtest.benchmark.as_ref().unwrap().perf_pct, Some(3.1));
    }

    #[test]
    fn backtest_without_dates_fails_inline() {
        let mut h = harness("AAPL");
        h.app.backtest.start = None;
        h.app.run_backtest();
        assert!(h.next_command().is_none());
        assert!(h.app.backtest.request.error().is_some());
        assert!(!h.app.can_export());
    }

    #[test]
    fn export_disabled_while_backtest_loading() {
        let mut h = harness("AAPL");
        h.app.run_backtest();
        assert!(!h.app.can_export());
        let _ = h.next_command();
        assert!(h.app.export_csv().is_none());
        assert!(h.next_command().is_none());
    }

    #[test]
    fn export_sends_query_and_records_path() {
        let mut h = harness("AAPL");
        let seq = h.app.export_csv().expect("export enabled");
        match h.next_command() {
            Some(WorkerCommand::ExportCsv { query, .. }) => assert_eq!(query.tickers, vec!["AAPL"]),
            other => panic!("unexpected command {other:?}"),
        }
        h.respond(WorkerResponse::Exported {
            seq,
            result: Ok(PathBuf::from("backtest.csv")),
        });
        assert_eq!(h.app.backtest.last_export, Some(PathBuf::from("backtest.csv")));
    }

    #[test]
    fn buy_cannot_drop_to_sell() {
        let mut h = harness("");
        assert_eq!(h.app.set_buy(40.0), 41);
        assert_eq!(h.app.thresholds().sell(), 40);
        assert_eq!(h.app.set_sell_text("abc"), 0);
    }

    #[test]
    fn threshold_change_reclassifies_rows() {
        let mut h = harness("AAPL");
        let seq = h.app.load_watchlist();
        h.respond(WorkerResponse::Scores {
            seq,
            result: Ok(vec![ScoreRow::new("AAPL", 65.0)]),
        });
        let row = h.app.watchlist.rows[0].clone();
        assert_eq!(h.app.signal_for(&row), Signal::Hold);
        h.app.set_buy(60.0);
        assert_eq!(h.app.signal_for(&row), Signal::Buy);
    }

    #[test]
    fn date_edit_validates_and_unsets() {
        let mut h = harness("");
        h.app.apply_edit(Field::Start, "2024-01-31");
        assert_eq!(h.app.backtest.start, NaiveDate::from_ymd_opt(2024, 1, 31));

        h.app.apply_edit(Field::Start, "31/01/2024");
        assert_eq!(h.app.backtest.start, NaiveDate::from_ymd_opt(2024, 1, 31));
        assert_eq!(h.app.status_message.as_ref().unwrap().1, StatusLevel::Warning);

        h.app.apply_edit(Field::End, "  ");
        assert!(h.app.backtest.end.is_none());
    }

    #[test]
    fn nudge_date_moves_by_days() {
        let mut h = harness("");
        h.app.backtest.end = NaiveDate::from_ymd_opt(2024, 2, 28);
        h.app.nudge_date(Field::End, 2);
        assert_eq!(h.app.backtest.end, NaiveDate::from_ymd_opt(2024, 3, 1));
        h.app.nudge_date(Field::End, -1);
        assert_eq!(h.app.backtest.end, NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn default_window_is_six_months() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 31).unwrap();
        let bt = BacktestState::ending(today);
        assert_eq!(bt.start, NaiveDate::from_ymd_opt(2025, 2, 28));
        assert_eq!(bt.end, Some(today));
    }

    #[test]
    fn error_history_caps_at_50() {
        let mut h = harness("");
        for i in 0..60 {
            h.app.push_error(Operation::Watchlist, format!("error {i}"));
        }
        assert_eq!(h.app.error_history.len(), ERROR_HISTORY_CAP);
        assert_eq!(h.app.error_history[0].message, "error 59");
    }

    #[test]
    fn gauges_follow_row_positions() {
        let mut wl = WatchlistState::default();
        let now = Instant::now();
        wl.replace_rows(vec![ScoreRow::new("A", 10.0), ScoreRow::new("B", 20.0)], now);
        wl.replace_rows(vec![ScoreRow::new("A", 90.0)], now);
        assert_eq!(wl.gauges.len(), 1);
        assert!(wl.gauges[0].is_animating(now));
    }
}

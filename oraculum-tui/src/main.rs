//! Oraculum: terminal dashboard for WI scores, signals and backtests.
//!
//! Panels:
//! 1. Watchlist: score gauges with BUY/HOLD/SELL badges and components
//! 2. Backtest: results table, benchmark, per-signal summary, CSV export
//! 3. Help: keyboard shortcuts

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{error, info};

use oraculum_core::api::HttpClient;
use oraculum_core::config::{default_config_path, DashboardConfig};
use oraculum_core::settings::{JsonFileStore, ThresholdStore};
use oraculum_tui::app::AppState;
use oraculum_tui::worker::{self, WorkerCommand};
use oraculum_tui::{input, logging, ui};

/// Frame interval while a gauge is animating.
const ANIMATION_TICK: Duration = Duration::from_millis(16);
/// Input poll interval otherwise (~20 FPS).
const IDLE_TICK: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(
    name = "oraculum",
    about = "Oraculum: WI score dashboard with threshold signals and backtests"
)]
struct Cli {
    /// Path to a TOML config file. Defaults to <config dir>/oraculum/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL of the WI API, overriding the config file.
    #[arg(long)]
    api_url: Option<String>,

    /// Debug-level logging.
    #[arg(long, short, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config = DashboardConfig::load_or_default(&config_path)?;
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }

    let _log_guard = logging::init(&config.log_dir, cli.verbose)
        .with_context(|| format!("cannot set up logging in {}", config.log_dir.display()))?;
    info!(
        config = %config_path.display(),
        api = %config.api_base_url,
        "starting oraculum"
    );

    let client = HttpClient::new(&config.api_base_url, config.request_timeout())?;

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle = worker::spawn_worker(cmd_rx, resp_tx, Arc::new(client))?;

    let store = ThresholdStore::new(Box::new(JsonFileStore::open(&config.settings_path)));
    let mut app = AppState::new(
        cmd_tx.clone(),
        resp_rx,
        store,
        config.default_ticker_text(),
        config.export_dir.clone(),
    );

    // First watch-list load and reachability probe.
    app.load_watchlist();
    let _ = cmd_tx.send(WorkerCommand::CheckHealth);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);
    if let Err(e) = &result {
        error!(error = %e, "event loop failed");
    }

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("bye");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        let now = Instant::now();

        // 1. Drain worker responses (non-blocking)
        app.drain_worker();

        // 2. Advance animations, then render
        app.watchlist.tick(now);
        terminal.draw(|f| ui::draw(f, app, now))?;

        // 3. Poll for input events
        let tick = if app.watchlist.is_animating(now) {
            ANIMATION_TICK
        } else {
            IDLE_TICK
        };
        if event::poll(tick)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

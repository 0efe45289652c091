//! Oraculum TUI: terminal dashboard for WI scores and signal backtests.
//!
//! Panels:
//! 1. Watchlist: one gauge card per ticker, classified with the user's thresholds
//! 2. Backtest: signal at a start date against realized performance, CSV export
//! 3. Help: keyboard shortcuts
//!
//! Network I/O runs on the worker ([`worker`]); [`app::AppState`] owns all
//! UI state on the main thread.

pub mod app;
pub mod input;
pub mod logging;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::AppState;
pub use input::handle_key;

#[cfg(test)]
mod test_helpers;

//! Top-level UI layout: title, control bar, active panel, status bar.

pub mod backtest_panel;
pub mod control_bar;
pub mod help_panel;
pub mod overlays;
pub mod status_bar;
pub mod watchlist_panel;
pub mod widgets;

use std::time::Instant;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, Overlay, Panel};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_title(f, chunks[0], app);
    control_bar::render(f, chunks[1], app);
    draw_panel(f, chunks[2], app, now);
    status_bar::render(f, chunks[3], app);

    match &app.overlay {
        Overlay::Edit(field) => overlays::render_edit(f, chunks[2], *field, &app.edit_buffer),
        Overlay::ErrorHistory => overlays::render_error_history(f, chunks[2], app),
        Overlay::None => {}
    }
}

fn draw_title(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans = vec![Span::styled(" Oraculum – Wysocki Indicator ", theme::accent_bold())];
    match app.api_reachable {
        Some(true) => spans.push(Span::styled("● API", theme::perf_style(1.0))),
        Some(false) => spans.push(Span::styled("● API unreachable", theme::negative())),
        None => {}
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the active panel with its border.
fn draw_panel(f: &mut Frame, area: Rect, app: &AppState, now: Instant) {
    let panel = app.active_panel;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} [{}] ", panel.label(), panel.index() + 1))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match panel {
        Panel::Watchlist => watchlist_panel::render(f, inner, app, now),
        Panel::Backtest => backtest_panel::render(f, inner, app),
        Panel::Help => help_panel::render(f, inner, app),
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Two-decimal number or `-`.
pub fn fmt_opt(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".to_string())
}

/// Two-decimal percentage or `-`.
pub fn fmt_pct(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}%")).unwrap_or_else(|| "-".to_string())
}

//! Panel 1. Watchlist: one card per ticker with gauge, signal badge,
//! component scores and per-ticker error.

use std::time::Instant;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use oraculum_core::api::{Components, ScoreRow};
use oraculum_core::Signal;

use crate::app::AppState;
use crate::theme;
use crate::ui::widgets::gauge::{Gauge, GAUGE_HEIGHT};

const CARD_WIDTH: u16 = 44;
const CARD_HEIGHT: u16 = 8;
const GAUGE_WIDTH: u16 = 24;

pub fn render(f: &mut Frame, area: Rect, app: &AppState, now: Instant) {
    let wl = &app.watchlist;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let header = if wl.request.is_loading() {
        Line::from(Span::styled("Loading scores…", theme::warning()))
    } else if let Some(err) = wl.request.error() {
        Line::from(Span::styled(format!("Error: {err}"), theme::negative()))
    } else {
        Line::from(vec![
            Span::styled(format!("{} tickers", wl.rows.len()), theme::accent()),
            Span::styled("  [r]eload [PgUp/PgDn]scroll", theme::muted()),
        ])
    };
    f.render_widget(Paragraph::new(header), chunks[0]);

    if wl.rows.is_empty() {
        if !wl.request.is_loading() {
            f.render_widget(
                Paragraph::new(Span::styled("No scores yet. Press r to load.", theme::muted())),
                chunks[1],
            );
        }
        return;
    }

    let grid = chunks[1];
    let columns = (grid.width / CARD_WIDTH).max(1) as usize;
    let visible_rows = (grid.height / CARD_HEIGHT).max(1) as usize;
    let first = (wl.scroll / columns) * columns;
    let card_width = grid.width / columns as u16;

    for (slot, i) in (first..wl.rows.len()).take(columns * visible_rows).enumerate() {
        let col = (slot % columns) as u16;
        let row = (slot / columns) as u16;
        let y = grid.y + row * CARD_HEIGHT;
        if y + CARD_HEIGHT > grid.y + grid.height {
            break;
        }
        let card = Rect::new(grid.x + col * card_width, y, card_width, CARD_HEIGHT);
        render_card(f, card, app, i, now);
    }
}

fn render_card(f: &mut Frame, area: Rect, app: &AppState, index: usize, now: Instant) {
    let row = &app.watchlist.rows[index];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(GAUGE_WIDTH), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    if let Some(state) = app.watchlist.gauges.get(index) {
        let gauge_area = Rect { height: GAUGE_HEIGHT.min(cols[0].height), ..cols[0] };
        f.render_widget(Gauge::new(&row.ticker, state, now), gauge_area);
    }

    let signal = app.signal_for(row);
    f.render_widget(Paragraph::new(side_lines(row, signal)), cols[2]);
}

fn side_lines(row: &ScoreRow, signal: Signal) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!(" {} ", signal.label()),
        theme::signal_badge(signal),
    ))];
    if let Some(components) = &row.components {
        lines.extend(component_lines(components));
    }
    if let Some(err) = &row.error {
        lines.push(Line::from(Span::styled(format!("Error: {err}"), theme::negative())));
    }
    lines
}

fn component_lines(c: &Components) -> Vec<Line<'static>> {
    c.entries()
        .into_iter()
        .map(|(name, value)| {
            let value = value.map(|v| format!("{v}")).unwrap_or_default();
            Line::from(vec![
                Span::styled(format!("{name:<6}"), theme::muted()),
                Span::styled(format!("{value:>8}"), theme::text()),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_lines_include_badge_components_and_error() {
        let row = ScoreRow {
            ticker: "AAPL".into(),
            wi: Some(75.0),
            components: Some(Components {
                mom: Some(80.0),
                val: None,
                flow: Some(61.5),
                macro_: Some(40.0),
            }),
            error: Some("stale quote".into()),
        };
        let lines = side_lines(&row, Signal::Buy);
        assert_eq!(lines.len(), 6);
        assert!(lines[0].to_string().contains("BUY"));
        assert!(lines[3].to_string().contains("61.5"));
        assert!(lines[5].to_string().contains("stale quote"));
    }

    #[test]
    fn rows_without_components_show_only_badge() {
        let lines = side_lines(&ScoreRow::new("MSFT", 30.0), Signal::Sell);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].to_string().contains("SELL"));
    }
}

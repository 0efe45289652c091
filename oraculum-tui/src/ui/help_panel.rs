//! Panel 3. Help: keyboard shortcuts and what the numbers mean.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let th = app.thresholds();
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global Navigation");
    key(&mut lines, "1-3", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "PgUp / PgDn", "Scroll the watchlist or backtest table");
    key(&mut lines, "E", "Open error history overlay");
    key(&mut lines, "q / Ctrl+C", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Controls");
    key(&mut lines, "j / k", "Move focus: Tickers, SELL, BUY, Start, End");
    key(&mut lines, "h / l", "Threshold -1 / +1, or date -1 / +1 day");
    key(&mut lines, "Enter / e", "Edit the focused field (Esc cancels)");
    lines.push(Line::from(""));

    section(&mut lines, "Actions");
    key(&mut lines, "r", "Reload WI scores for the ticker list");
    key(&mut lines, "b", "Run the backtest over Start..End");
    key(&mut lines, "x", "Export the backtest as CSV");
    lines.push(Line::from(""));

    section(&mut lines, "Signals");
    key(&mut lines, "BUY", &format!("WI ≥ {}", th.buy()));
    key(&mut lines, "HOLD", &format!("{} ≤ WI < {}", th.sell(), th.buy()));
    key(&mut lines, "SELL", &format!("WI < {}", th.sell()));
    key(&mut lines, "", "SELL stays below BUY: each is clamped against the other");

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}

fn section(lines: &mut Vec<Line<'_>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'_>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>16}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}

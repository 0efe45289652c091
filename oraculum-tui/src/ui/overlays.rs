//! Overlay widgets: field edit prompt and error history.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, Field};
use crate::theme;
use crate::ui::centered_rect;

/// Single-line prompt for the focused control.
pub fn render_edit(f: &mut Frame, area: Rect, field: Field, buffer: &str) {
    let popup = centered_rect(60, 30, area);
    let popup = Rect {
        height: popup.height.clamp(3, 5).min(area.height),
        ..popup
    };
    f.render_widget(Clear, popup);

    let hint = match field {
        Field::Tickers => "comma-separated symbols",
        Field::Sell | Field::Buy => "0-100",
        Field::Start | Field::End => "YYYY-MM-DD, empty to clear",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(format!(" {} ({hint}) [Enter]apply [Esc]cancel ", field.label()))
        .title_style(theme::accent_bold());

    let line = Line::from(vec![
        Span::styled("> ", theme::accent()),
        Span::styled(buffer, theme::text()),
        Span::styled("_", theme::accent().add_modifier(Modifier::SLOW_BLINK)),
    ]);
    f.render_widget(Paragraph::new(line).block(block), popup);
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let visible_height = inner.height as usize;
    let lines: Vec<Line> = app
        .error_history
        .iter()
        .enumerate()
        .skip(app.error_scroll)
        .take(visible_height)
        .map(|(i, err)| {
            let style = if i == app.error_scroll {
                theme::negative().add_modifier(Modifier::BOLD)
            } else {
                theme::muted()
            };
            Line::from(vec![
                Span::styled(format!("[{}] ", err.timestamp.format("%H:%M:%S")), theme::muted()),
                Span::styled(format!("[{}] ", err.operation.label()), theme::warning()),
                Span::styled(err.message.as_str(), style),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

//! Control bar: ticker list, thresholds, backtest window and action hints.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, Field};
use crate::theme;

/// Longest ticker text shown before truncating.
const TICKERS_WIDTH: usize = 40;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(" Controls [j/k]focus [h/l]adjust [Enter]edit ")
        .title_style(theme::muted());

    let mut spans: Vec<Span> = Vec::new();
    for field in Field::ALL {
        let focused = field == app.focus;
        spans.push(Span::styled(format!("{} ", field.label()), theme::muted()));
        spans.push(Span::styled(
            display_value(app, field),
            value_style(focused),
        ));
        spans.push(Span::raw("  "));
    }

    spans.push(action(
        if app.watchlist.request.is_loading() { "[r] Loading…" } else { "[r]eload" },
        true,
    ));
    spans.push(Span::raw(" "));
    spans.push(action(
        if app.backtest.request.is_loading() { "[b] Running…" } else { "[b]acktest" },
        true,
    ));
    spans.push(Span::raw(" "));
    spans.push(action("[x]export CSV", app.can_export()));

    let para = Paragraph::new(Line::from(spans)).block(block);
    f.render_widget(para, area);
}

fn display_value(app: &AppState, field: Field) -> String {
    let text = app.field_text(field);
    match field {
        Field::Tickers if text.chars().count() > TICKERS_WIDTH => {
            let cut: String = text.chars().take(TICKERS_WIDTH - 1).collect();
            format!("{cut}…")
        }
        Field::Start | Field::End if text.is_empty() => "----------".to_string(),
        _ => text,
    }
}

fn value_style(focused: bool) -> Style {
    if focused {
        theme::accent_bold().add_modifier(Modifier::REVERSED)
    } else {
        theme::text()
    }
}

fn action(label: &str, enabled: bool) -> Span<'_> {
    if enabled {
        Span::styled(label, theme::accent())
    } else {
        Span::styled(label, theme::muted().add_modifier(Modifier::CROSSED_OUT))
    }
}

//! Panel 2. Backtest: benchmark, per-ticker results table, per-signal
//! summary cards, error banner and export status.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use oraculum_core::api::BacktestRow;
use oraculum_core::{Signal, SignalSummary};

use crate::app::AppState;
use crate::theme;
use crate::ui::{fmt_opt, fmt_pct};

/// Reference instrument the API benchmarks against.
const BENCHMARK_SYMBOL: &str = "SPY";

const FOOTNOTE: &str = "WI@Start is computed at the start date from prior history. \
                        Performance is (Close_end / Close_start - 1) × 100.";

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let bt = &app.backtest;
    let has_rows = !bt.rows.is_empty();
    let has_error = bt.request.error().is_some();

    let mut constraints = vec![Constraint::Length(1)];
    if has_rows {
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(3));
        constraints.push(Constraint::Length(4));
    } else {
        constraints.push(Constraint::Min(1));
    }
    if has_error {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Length(2));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);
    let mut next = 0;
    let mut take = || {
        let r = chunks[next];
        next += 1;
        r
    };

    f.render_widget(Paragraph::new(header_line(app)), take());

    if has_rows {
        f.render_widget(Paragraph::new(benchmark_line(app)), take());
        render_table(f, take(), &bt.rows, bt.scroll);
        render_summary(f, take(), &app.summary());
    } else {
        let hint = if bt.request.is_loading() {
            ""
        } else {
            "No backtest yet. Set the window and press b."
        };
        f.render_widget(Paragraph::new(Span::styled(hint, theme::muted())), take());
    }

    if let Some(err) = bt.request.error() {
        let banner = Paragraph::new(Span::styled(format!("Backtest error: {err}"), theme::negative()))
            .block(Block::default().borders(Borders::ALL).border_style(theme::negative()))
            .wrap(Wrap { trim: true });
        f.render_widget(banner, take());
    }

    f.render_widget(
        Paragraph::new(Span::styled(FOOTNOTE, theme::muted())).wrap(Wrap { trim: true }),
        take(),
    );
}

fn header_line(app: &AppState) -> Line<'static> {
    let bt = &app.backtest;
    let th = app.thresholds();
    let mut spans = vec![Span::styled(
        format!("Thresholds: SELL < {} · BUY ≥ {}", th.sell(), th.buy()),
        theme::muted(),
    )];
    if bt.request.is_loading() {
        spans.push(Span::styled("  Running backtest…", theme::warning()));
    }
    if bt.export.is_loading() {
        spans.push(Span::styled("  Exporting…", theme::warning()));
    } else if let Some(path) = &bt.last_export {
        spans.push(Span::styled(format!("  Last export: {}", path.display()), theme::accent()));
    }
    Line::from(spans)
}

fn benchmark_line(app: &AppState) -> Line<'static> {
    match &app.backtest.benchmark {
        Some(bm) => Line::from(vec![
            Span::styled(format!("Benchmark {BENCHMARK_SYMBOL} over the window: "), theme::muted()),
            Span::styled(fmt_pct(bm.perf_pct), theme::accent_bold()),
        ]),
        None => Line::from(""),
    }
}

fn render_table(f: &mut Frame, area: Rect, rows: &[BacktestRow], scroll: usize) {
    let header = Row::new(["Ticker", "WI@Start", "Signal", "Start", "End", "Perf %", "Note"])
        .style(theme::accent_bold());

    let body: Vec<Row> = rows.iter().skip(scroll).map(table_row).collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Min(10),
    ];
    let table = Table::new(body, widths)
        .header(header)
        .column_spacing(2)
        .block(Block::default().borders(Borders::ALL).border_style(theme::muted()));
    f.render_widget(table, area);
}

fn table_row(r: &BacktestRow) -> Row<'static> {
    let signal = match r.signal_start {
        Some(s) => Cell::from(Span::styled(format!(" {} ", s.label()), theme::signal_badge(s))),
        None => Cell::from("-"),
    };
    let perf = match r.perf_pct {
        Some(p) => Cell::from(Span::styled(fmt_pct(Some(p)), theme::perf_style(p))),
        None => Cell::from("-"),
    };
    let note = match &r.error {
        Some(msg) => Cell::from(Span::styled(format!("Error: {msg}"), theme::negative())),
        None => Cell::from(""),
    };
    Row::new(vec![
        Cell::from(r.ticker.clone()),
        Cell::from(fmt_opt(r.wi_start)),
        signal,
        Cell::from(fmt_opt(r.start_close)),
        Cell::from(fmt_opt(r.end_close)),
        perf,
        note,
    ])
    .style(theme::text())
}

fn render_summary(f: &mut Frame, area: Rect, summary: &SignalSummary) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    for (signal, card) in Signal::ALL.into_iter().zip(cards.iter()) {
        let group = summary.group(signal);
        let (fg, _) = theme::signal_colors(signal);
        let lines = vec![
            Line::from(Span::styled(
                format!("{} tickers", group.count),
                theme::text().add_modifier(ratatui::style::Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Avg: {}", fmt_pct(group.average())),
                theme::muted(),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(fg))
            .title(format!(" {} ", signal.label()))
            .title_style(Style::default().fg(fg));
        f.render_widget(Paragraph::new(lines).block(block), *card);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use crate::test_helpers::harness;
    use crate::worker::WorkerResponse;
    use oraculum_core::api::{BacktestResponse, Benchmark};
    use oraculum_core::ApiError;

    fn screen(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                render(f, area, app)
            })
            .unwrap();
        let buf = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf.cell((x, y)).unwrap().symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn results_table_and_summary() {
        let mut h = harness("AAPL,MSFT");
        let seq = h.app.run_backtest();
        let mut aapl = BacktestRow::with_perf("AAPL", Some(12.5));
        aapl.signal_start = Some(Signal::Buy);
        let mut msft = BacktestRow::with_perf("MSFT", None);
        msft.signal_start = Some(Signal::Hold);
        h.respond(WorkerResponse::Backtest {
            seq,
            result: Ok(BacktestResponse {
                data: vec![msft, aapl],
                benchmark: Some(Benchmark { perf_pct: Some(4.0) }),
                params: None,
            }),
        });

        let text = screen(&h.app);
        assert!(text.contains("Benchmark SPY over the window: 4.00%"));
        assert!(text.contains("12.50%"));
        assert!(text.contains("1 tickers"));
        assert!(text.contains("0 tickers"));
        let aapl_at = text.find("AAPL").unwrap();
        let msft_at = text.find("MSFT").unwrap();
        assert!(aapl_at < msft_at);
    }

    #[test]
    fn error_banner_is_shown() {
        let mut h = harness("AAPL");
        let seq = h.app.run_backtest();
        h.respond(WorkerResponse::Backtest {
            seq,
            result: Err(ApiError::Http { status: 502 }),
        });
        assert!(screen(&h.app).contains("Backtest error: HTTP 502"));
    }

    #[test]
    fn row_error_is_shown_next_to_dashes() {
        let mut h = harness("A,ZZZZ");
        let seq = h.app.run_backtest();
        let mut missing = BacktestRow::with_perf("ZZZZ", None);
        missing.error = Some("No data at start".into());
        h.respond(WorkerResponse::Backtest {
            seq,
            result: Ok(BacktestResponse {
                data: vec![BacktestRow::with_perf("A", Some(1.0)), missing],
                benchmark: None,
                params: None,
            }),
        });

        let text = screen(&h.app);
        let line = text.lines().find(|l| l.contains("ZZZZ")).unwrap();
        assert!(line.contains("Error: No data at start"));
        assert!(line.contains('-'));
        assert_eq!(text.matches("Error:").count(), 1);
    }
}

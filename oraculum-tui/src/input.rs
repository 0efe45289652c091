//! Keyboard input dispatch: overlays → global keys → control bar → panel scrolling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Field, Overlay, Panel};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.running = false;
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay.clone() {
        Overlay::Edit(field) => {
            handle_edit_overlay(app, field, key);
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('1') => app.active_panel = Panel::Watchlist,
        KeyCode::Char('2') => app.active_panel = Panel::Backtest,
        KeyCode::Char('3') => app.active_panel = Panel::Help,
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
        }
        KeyCode::BackTab => app.active_panel = app.active_panel.prev(),

        // 3. Control bar.
        KeyCode::Char('j') | KeyCode::Down => app.focus = app.focus.next(),
        KeyCode::Char('k') | KeyCode::Up => app.focus = app.focus.prev(),
        KeyCode::Char('h') | KeyCode::Left => nudge(app, -1),
        KeyCode::Char('l') | KeyCode::Right => nudge(app, 1),
        KeyCode::Enter | KeyCode::Char('e') => {
            app.edit_buffer = app.field_text(app.focus);
            app.overlay = Overlay::Edit(app.focus);
        }
        KeyCode::Char('r') => {
            app.load_watchlist();
            app.active_panel = Panel::Watchlist;
        }
        KeyCode::Char('b') => {
            if !app.backtest.request.is_loading() {
                app.run_backtest();
            }
            app.active_panel = Panel::Backtest;
        }
        KeyCode::Char('x') => {
            app.export_csv();
        }
        KeyCode::Char('E') => {
            app.overlay = Overlay::ErrorHistory;
            app.error_scroll = 0;
        }

        // 4. Panel scrolling.
        KeyCode::PageDown => scroll(app, 1),
        KeyCode::PageUp => scroll(app, -1),
        _ => {}
    }
}

/// ±1 on the focused threshold or ±1 day on the focused date.
fn nudge(app: &mut AppState, delta: i64) {
    let th = app.thresholds();
    match app.focus {
        Field::Sell => {
            app.set_sell(f64::from(th.sell()) + delta as f64);
        }
        Field::Buy => {
            app.set_buy(f64::from(th.buy()) + delta as f64);
        }
        Field::Start | Field::End => app.nudge_date(app.focus, delta),
        Field::Tickers => {}
    }
}

fn scroll(app: &mut AppState, delta: i64) {
    let (offset, len) = match app.active_panel {
        Panel::Watchlist => (&mut app.watchlist.scroll, app.watchlist.rows.len()),
        Panel::Backtest => (&mut app.backtest.scroll, app.backtest.rows.len()),
        Panel::Help => return,
    };
    if delta > 0 {
        if *offset + 1 < len {
            *offset += 1;
        }
    } else {
        *offset = offset.saturating_sub(1);
    }
}

fn handle_edit_overlay(app: &mut AppState, field: Field, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.overlay = Overlay::None;
            app.edit_buffer.clear();
        }
        KeyCode::Enter => {
            let text = std::mem::take(&mut app.edit_buffer);
            app.overlay = Overlay::None;
            app.apply_edit(field, &text);
        }
        KeyCode::Backspace => {
            app.edit_buffer.pop();
        }
        KeyCode::Char(c) => {
            app.edit_buffer.push(c);
        }
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('E') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

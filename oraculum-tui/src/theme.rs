//! Colour tokens and styles for the Oraculum TUI.
//!
//! Signal and performance colours follow the score ramp: dark green for
//! BUY/gains, amber for HOLD, dark red for SELL/losses. Chrome uses a muted
//! dark palette so the gauges carry most of the colour.

use oraculum_core::{Rgb, Signal};
use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Rgb(0, 200, 220);
pub const POSITIVE: Color = Color::Rgb(0x2e, 0x7d, 0x32);
pub const NEGATIVE: Color = Color::Rgb(0xc6, 0x28, 0x28);
pub const NEUTRAL_PERF: Color = Color::Rgb(0x55, 0x55, 0x55);
pub const WARNING: Color = Color::Rgb(0xef, 0x6c, 0x00);
pub const MUTED: Color = Color::Rgb(130, 140, 160);
pub const TEXT: Color = Color::White;
/// Solid overlay covering the unfilled part of a gauge track.
pub const TRACK_OVERLAY: Color = Color::Rgb(0x3a, 0x3a, 0x3a);

/// Background the readout fades into.
pub const FADE_TARGET: Rgb = Rgb(18, 18, 20);

pub fn rgb(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Badge style: `(foreground, background)` per signal.
pub fn signal_colors(signal: Signal) -> (Color, Color) {
    match signal {
        Signal::Buy => (Color::Rgb(0x2e, 0x7d, 0x32), Color::Rgb(0xe8, 0xf5, 0xe9)),
        Signal::Hold => (Color::Rgb(0xef, 0x6c, 0x00), Color::Rgb(0xff, 0xf8, 0xe1)),
        Signal::Sell => (Color::Rgb(0xc6, 0x28, 0x28), Color::Rgb(0xfd, 0xec, 0xea)),
    }
}

pub fn signal_badge(signal: Signal) -> Style {
    let (fg, bg) = signal_colors(signal);
    Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD)
}

/// Gains green, losses red, flat grey.
pub fn perf_color(value: f64) -> Color {
    if value > 0.0 {
        POSITIVE
    } else if value < 0.0 {
        NEGATIVE
    } else {
        NEUTRAL_PERF
    }
}

pub fn perf_style(value: f64) -> Style {
    Style::default()
        .fg(perf_color(value))
        .add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perf_colors() {
        assert_eq!(perf_color(1.5), POSITIVE);
        assert_eq!(perf_color(-0.01), NEGATIVE);
        assert_eq!(perf_color(0.0), NEUTRAL_PERF);
    }

    #[test]
    fn badge_colors_are_distinct() {
        let fgs: Vec<Color> = Signal::ALL.iter().map(|s| signal_colors(*s).0).collect();
        assert_ne!(fgs[0], fgs[1]);
        assert_ne!(fgs[1], fgs[2]);
    }

    #[test]
    fn rgb_conversion() {
        assert_eq!(rgb(Rgb(1, 2, 3)), Color::Rgb(1, 2, 3));
    }
}

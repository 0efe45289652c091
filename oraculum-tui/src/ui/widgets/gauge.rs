//! Score gauge: label, colour-ramped readout and a gradient track.
//!
//! Layout (4 rows):
//! - label
//! - rounded score, coloured with the ramp at the score, fading while it swaps
//! - track: every cell coloured with the ramp at its own position, the
//!   rightmost `100 - score` percent covered by a solid overlay
//! - `0` and `100` at the track ends

use std::time::Instant;

use oraculum_core::color::{clamp_score, color_at};
use oraculum_core::transition::{FadeSwap, TransitionSpec, Tween};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Paragraph, Widget},
};

use crate::theme;

/// Rows a gauge needs.
pub const GAUGE_HEIGHT: u16 = 4;

/// Animation state of one gauge.
#[derive(Debug, Clone)]
pub struct GaugeState {
    value: f64,
    readout: FadeSwap,
    overlay: Tween,
}

impl GaugeState {
    /// Show `value` straight away.
    pub fn new(value: f64) -> Self {
        let spec = TransitionSpec::default();
        let value = clamp_score(value);
        Self {
            value,
            readout: FadeSwap::new(value, spec),
            overlay: Tween::new(unfilled(value), spec),
        }
    }

    /// Move toward a new score. Repeating the current score is a no-op.
    pub fn update(&mut self, value: f64, now: Instant) {
        let value = clamp_score(value);
        if value == self.value {
            return;
        }
        self.value = value;
        self.readout.set_target(value, now);
        self.overlay.retarget(unfilled(value), now);
    }

    pub fn tick(&mut self, now: Instant) {
        self.readout.tick(now);
    }

    /// Target score, clamped into `[0, 100]`.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Number currently on screen.
    pub fn shown(&self) -> i64 {
        self.readout.shown()
    }

    pub fn opacity(&self, now: Instant) -> f64 {
        self.readout.opacity(now)
    }

    /// Width of the grey overlay in percent of the track.
    pub fn unfilled(&self, now: Instant) -> f64 {
        self.overlay.value(now)
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.readout.is_animating(now)
    }
}

fn unfilled(value: f64) -> f64 {
    100.0 - value
}

/// Gauge widget.
pub struct Gauge<'a> {
    label: &'a str,
    state: &'a GaugeState,
    now: Instant,
}

impl<'a> Gauge<'a> {
    pub fn new(label: &'a str, state: &'a GaugeState, now: Instant) -> Self {
        Self { label, state, now }
    }
}

impl<'a> Widget for Gauge<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        buf.set_stringn(area.x, area.y, self.label, area.width as usize, theme::muted());

        if area.height > 1 {
            let opacity = self.state.opacity(self.now);
            let color = color_at(self.state.value()).lerp(theme::FADE_TARGET, 1.0 - opacity);
            let mut style = Style::default().fg(theme::rgb(color)).add_modifier(Modifier::BOLD);
            if opacity < 0.5 {
                style = style.add_modifier(Modifier::DIM);
            }
            let readout = Paragraph::new(Line::styled(self.state.shown().to_string(), style))
                .alignment(Alignment::Center);
            readout.render(Rect::new(area.x, area.y + 1, area.width, 1), buf);
        }

        if area.height > 2 {
            render_track(
                Rect::new(area.x, area.y + 2, area.width, 1),
                buf,
                self.state.unfilled(self.now),
            );
        }

        if area.height > 3 {
            let y = area.y + 3;
            buf.set_string(area.x, y, "0", theme::muted());
            if area.width >= 3 {
                buf.set_string(area.x + area.width - 3, y, "100", theme::muted());
            }
        }
    }
}

/// Fixed gradient across the whole track, then the overlay on the right.
fn render_track(area: Rect, buf: &mut Buffer, unfilled_pct: f64) {
    let width = area.width;
    let covered = ((unfilled_pct.clamp(0.0, 100.0) / 100.0) * width as f64).round() as u16;
    let overlay_from = width.saturating_sub(covered);

    for x in 0..width {
        let bg = if x >= overlay_from {
            theme::TRACK_OVERLAY
        } else {
            let position = (x as f64 + 0.5) / width as f64 * 100.0;
            theme::rgb(color_at(position))
        };
        if let Some(cell) = buf.cell_mut((area.x + x, area.y)) {
            cell.set_symbol(" ").set_bg(bg);
        }
    }
}

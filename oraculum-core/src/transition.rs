//! Declarative transition contracts for the score gauge.
//!
//! Both transitions are driven by caller-supplied instants, so any renderer
//! (terminal frame loop, test, web) can evaluate them without a timer API.
//!
//! - [`FadeSwap`]: the numeric readout fades out, swaps to the new value at the
//!   midpoint, then fades back in. A newer target arriving before the midpoint
//!   replaces the pending swap, so a stale value is never displayed.
//! - [`Tween`]: a scalar (the unfilled-overlay width) that moves linearly
//!   toward its target; retargeting mid-flight starts from the current value.

use std::time::{Duration, Instant};

/// Total duration of the readout fade and the width tween.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

/// Timing of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionSpec {
    pub duration: Duration,
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
        }
    }
}

impl TransitionSpec {
    pub fn midpoint(&self) -> Duration {
        self.duration / 2
    }

    /// Fraction of the transition elapsed at `now`, in [0, 1].
    fn progress(&self, started: Instant, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

/// Integer readout with a fade-out / swap / fade-in transition.
#[derive(Debug, Clone)]
pub struct FadeSwap {
    spec: TransitionSpec,
    shown: i64,
    pending: Option<i64>,
    started: Option<Instant>,
}

impl FadeSwap {
    /// Start fully visible at `initial` with no transition in flight.
    pub fn new(initial: f64, spec: TransitionSpec) -> Self {
        Self {
            spec,
            shown: round_score(initial),
            pending: None,
            started: None,
        }
    }

    /// Value currently on screen.
    pub fn shown(&self) -> i64 {
        self.shown
    }

    /// Swap that has been scheduled but not applied yet.
    pub fn pending(&self) -> Option<i64> {
        self.pending
    }

    /// Begin a transition to `value`. A swap that has not reached the midpoint
    /// is superseded and never applied.
    pub fn set_target(&mut self, value: f64, now: Instant) {
        self.tick(now);
        self.pending = Some(round_score(value));
        self.started = Some(now);
    }

    /// Apply the pending swap once the midpoint has passed.
    pub fn tick(&mut self, now: Instant) {
        if let (Some(value), Some(started)) = (self.pending, self.started) {
            if now.saturating_duration_since(started) >= self.spec.midpoint() {
                self.shown = value;
                self.pending = None;
            }
        }
    }

    /// Readout opacity: 1 → 0 over the first half, 0 → 1 over the second.
    pub fn opacity(&self, now: Instant) -> f64 {
        let Some(started) = self.started else {
            return 1.0;
        };
        let p = self.spec.progress(started, now);
        if p >= 1.0 {
            1.0
        } else if p < 0.5 {
            1.0 - p * 2.0
        } else {
            (p - 0.5) * 2.0
        }
    }

    /// True while a fade is still running at `now`.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.started
            .map(|s| now.saturating_duration_since(s) < self.spec.duration)
            .unwrap_or(false)
    }
}

/// Linearly interpolated scalar.
#[derive(Debug, Clone)]
pub struct Tween {
    spec: TransitionSpec,
    from: f64,
    to: f64,
    started: Option<Instant>,
}

impl Tween {
    pub fn new(initial: f64, spec: TransitionSpec) -> Self {
        Self {
            spec,
            from: initial,
            to: initial,
            started: None,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    /// Move toward `to`, starting from wherever the tween is at `now`.
    pub fn retarget(&mut self, to: f64, now: Instant) {
        self.from = self.value(now);
        self.to = to;
        self.started = Some(now);
    }

    pub fn value(&self, now: Instant) -> f64 {
        match self.started {
            None => self.to,
            Some(started) => {
                let p = self.spec.progress(started, now);
                self.from + (self.to - self.from) * p
            }
        }
    }
}

fn round_score(value: f64) -> i64 {
    if value.is_finite() {
        value.round() as i64
    } else {
        0
    }
}

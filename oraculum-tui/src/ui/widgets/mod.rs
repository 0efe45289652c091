//! Reusable widgets.

pub mod gauge;

pub use gauge::{Gauge, GaugeState};

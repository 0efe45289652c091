//! Sell/buy threshold pair with the ordering invariant `sell < buy`.
//!
//! The only way to change a threshold is through a clamping setter, so there
//! is no rejection path: every input is coerced into a legal value.

use serde::{Deserialize, Serialize};

use crate::signal::{classify, Signal};

pub const DEFAULT_SELL: u8 = 40;
pub const DEFAULT_BUY: u8 = 70;

/// Upper bound of the score scale.
pub const SCORE_MAX: u8 = 100;

/// Threshold pair. Invariant: `0 <= sell < buy <= 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Thresholds {
    sell: u8,
    buy: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            sell: DEFAULT_SELL,
            buy: DEFAULT_BUY,
        }
    }
}

impl Thresholds {
    /// Build a pair, re-clamping values that violate the invariant.
    ///
    /// `sell` is clamped into `[0, 99]` first, then `buy` into `[sell+1, 100]`.
    pub fn sanitized(sell: f64, buy: f64) -> Self {
        let sell = clamp_round(sell, 0, SCORE_MAX - 1);
        let buy = clamp_round(buy, sell + 1, SCORE_MAX);
        Self { sell, buy }
    }

    pub fn sell(&self) -> u8 {
        self.sell
    }

    pub fn buy(&self) -> u8 {
        self.buy
    }

    /// Propose a new sell threshold; the result lies in `[0, buy-1]`.
    pub fn set_sell(&mut self, proposed: f64) -> u8 {
        self.sell = clamp_round(proposed, 0, self.buy - 1);
        self.sell
    }

    /// Propose a new buy threshold; the result lies in `[sell+1, 100]`.
    pub fn set_buy(&mut self, proposed: f64) -> u8 {
        self.buy = clamp_round(proposed, self.sell + 1, SCORE_MAX);
        self.buy
    }

    /// Same as [`set_sell`](Self::set_sell) with free-form text input.
    pub fn set_sell_text(&mut self, text: &str) -> u8 {
        self.set_sell(parse_number(text))
    }

    /// Same as [`set_buy`](Self::set_buy) with free-form text input.
    pub fn set_buy_text(&mut self, text: &str) -> u8 {
        self.set_buy(parse_number(text))
    }

    pub fn classify(&self, score: f64) -> Signal {
        classify(score, self.sell as f64, self.buy as f64)
    }
}

impl<'de> Deserialize<'de> for Thresholds {
    /// Missing fields fall back to the defaults; out-of-order values are re-clamped.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            sell: Option<f64>,
            #[serde(default)]
            buy: Option<f64>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(Thresholds::sanitized(
            raw.sell.unwrap_or(DEFAULT_SELL as f64),
            raw.buy.unwrap_or(DEFAULT_BUY as f64),
        ))
    }
}

/// Coerce free-form text to a number; anything unparsable is 0.
pub fn parse_number(text: &str) -> f64 {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn clamp_round(value: f64, lo: u8, hi: u8) -> u8 {
    let v = if value.is_finite() { value.round() } else { 0.0 };
    v.clamp(lo as f64, hi as f64) as u8
}

//! Categorical BUY/HOLD/SELL signal derived from a 0–100 score.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Classification of a score against a sell/buy threshold pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Hold,
    Sell,
}

impl Signal {
    /// Display order used by summaries and legends.
    pub const ALL: [Signal; 3] = [Signal::Buy, Signal::Hold, Signal::Sell];

    pub fn label(self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Hold => "HOLD",
            Signal::Sell => "SELL",
        }
    }

    /// Parse the wire label. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Signal> {
        match label.trim() {
            "BUY" => Some(Signal::Buy),
            "HOLD" => Some(Signal::Hold),
            "SELL" => Some(Signal::Sell),
            _ => None,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map an optional or non-finite score to a plain number. Missing and
/// non-finite values count as 0.
pub fn coerce_score(score: Option<f64>) -> f64 {
    match score {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Classify `score` against the thresholds.
///
/// Evaluated in order: `score >= buy` is BUY, `score < sell` is SELL,
/// anything else is HOLD. `sell < buy` is assumed, not checked.
pub fn classify(score: f64, sell: f64, buy: f64) -> Signal {
    let v = coerce_score(Some(score));
    if v >= buy {
        Signal::Buy
    } else if v < sell {
        Signal::Sell
    } else {
        Signal::Hold
    }
}

/// Lenient decoder for an optional signal label: unknown strings and
/// non-string values decode as `None` instead of failing the whole row.
pub(crate) fn lenient_signal<'de, D>(deserializer: D) -> Result<Option<Signal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(Signal::from_label))
}

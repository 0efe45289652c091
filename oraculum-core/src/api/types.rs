//! Wire types for the WI and backtest endpoints.
//!
//! Decoding is lenient: optional fields that are missing, `null`, or of the
//! wrong type become `None` instead of failing the response.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::signal::{coerce_score, lenient_signal, Signal};
use crate::thresholds::Thresholds;

/// Sub-scores the API reports alongside the composite WI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    #[serde(rename = "MOM", default, deserialize_with = "lenient_number")]
    pub mom: Option<f64>,
    #[serde(rename = "VAL", default, deserialize_with = "lenient_number")]
    pub val: Option<f64>,
    #[serde(rename = "FLOW", default, deserialize_with = "lenient_number")]
    pub flow: Option<f64>,
    #[serde(rename = "MACRO", default, deserialize_with = "lenient_number")]
    pub macro_: Option<f64>,
}

impl Components {
    /// `(label, value)` pairs in display order.
    pub fn entries(&self) -> [(&'static str, Option<f64>); 4] {
        [
            ("MOM", self.mom),
            ("VAL", self.val),
            ("FLOW", self.flow),
            ("MACRO", self.macro_),
        ]
    }
}

/// One ticker's score. The server's own `signal` field is ignored; the
/// dashboard always classifies with the user's thresholds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    #[serde(default)]
    pub ticker: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub wi: Option<f64>,
    #[serde(default)]
    pub components: Option<Components>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ScoreRow {
    pub fn new(ticker: impl Into<String>, wi: f64) -> Self {
        Self {
            ticker: ticker.into(),
            wi: Some(wi),
            ..Self::default()
        }
    }

    /// Score as a plain number; missing or non-numeric is 0.
    pub fn score(&self) -> f64 {
        coerce_score(self.wi)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<ScoreRow>,
}

/// One ticker's backtest outcome. `perf_pct = (end_close/start_close - 1) × 100`
/// is computed server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BacktestRow {
    #[serde(default)]
    pub ticker: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub wi_start: Option<f64>,
    #[serde(default, deserialize_with = "lenient_signal")]
    pub signal_start: Option<Signal>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub start_close: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub end_close: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub perf_pct: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

impl BacktestRow {
    pub fn with_perf(ticker: impl Into<String>, perf_pct: Option<f64>) -> Self {
        Self {
            ticker: ticker.into(),
            perf_pct,
            ..Self::default()
        }
    }
}

/// Reference instrument performance over the same window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    #[serde(default, deserialize_with = "lenient_number")]
    pub perf_pct: Option<f64>,
}

/// Parameters echoed back by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BacktestParams {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub sell_th: Option<i64>,
    #[serde(default)]
    pub buy_th: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BacktestResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<BacktestRow>,
    #[serde(default)]
    pub benchmark: Option<Benchmark>,
    #[serde(default)]
    pub params: Option<BacktestParams>,
}

/// Output format of the backtest endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

/// Everything a backtest request carries.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestQuery {
    pub tickers: Vec<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub thresholds: Thresholds,
}

impl BacktestQuery {
    /// Query parameters in wire order: repeated `tickers`, then the window,
    /// thresholds and output format.
    pub fn params(&self, format: ExportFormat) -> Vec<(&'static str, String)> {
        let mut params: Vec<(&'static str, String)> =
            self.tickers.iter().map(|t| ("tickers", t.clone())).collect();
        params.push(("start", self.start.format("%Y-%m-%d").to_string()));
        params.push(("end", self.end.format("%Y-%m-%d").to_string()));
        params.push(("sell_th", self.thresholds.sell().to_string()));
        params.push(("buy_th", self.thresholds.buy().to_string()));
        params.push(("format", format.as_str().to_string()));
        params
    }

    /// File name the API suggests for the CSV download.
    pub fn export_file_name(&self) -> String {
        format!(
            "backtest_{}_{}.csv",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// Accept numbers and numeric strings; everything else decodes as `None`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite()))
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

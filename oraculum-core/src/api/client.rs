//! Blocking HTTP implementation of [`SignalApi`].

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::Url;
use tracing::debug;

use super::types::{BacktestQuery, BacktestResponse, ExportFormat, ScoreResponse, ScoreRow};
use super::{SignalApi, BACKTEST_PATH, HEALTH_PATH, WI_PATH};
use crate::error::ApiError;

/// reqwest-backed API client. No retries: a request either succeeds or fails.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("oraculum/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path` with the given query parameters.
    pub fn url(&self, path: &str, params: &[(&str, String)]) -> Result<Url, ApiError> {
        let raw = format!("{}{}", self.base_url, path);
        if params.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, params.iter().map(|(k, v)| (*k, v.as_str())))
        }
        .map_err(|e| ApiError::Invalid(format!("bad API URL {raw}: {e}")))
    }

    /// WI endpoint URL with one `tickers` parameter per symbol.
    pub fn scores_url(&self, tickers: &[String]) -> Result<Url, ApiError> {
        let params: Vec<(&str, String)> =
            tickers.iter().map(|t| ("tickers", t.clone())).collect();
        self.url(WI_PATH, &params)
    }

    /// Backtest endpoint URL for the given output format.
    pub fn backtest_url(&self, query: &BacktestQuery, format: ExportFormat) -> Result<Url, ApiError> {
        self.url(BACKTEST_PATH, &query.params(format))
    }

    fn get(&self, url: Url) -> Result<Response, ApiError> {
        debug!(%url, "GET");
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }
        Ok(resp)
    }
}

impl SignalApi for HttpClient {
    fn scores(&self, tickers: &[String]) -> Result<Vec<ScoreRow>, ApiError> {
        let resp: ScoreResponse = self.get(self.scores_url(tickers)?)?.json()?;
        Ok(resp.data)
    }

    fn backtest(&self, query: &BacktestQuery) -> Result<BacktestResponse, ApiError> {
        let resp = self.get(self.backtest_url(query, ExportFormat::Json)?)?;
        Ok(resp.json()?)
    }

    fn export_csv(&self, query: &BacktestQuery) -> Result<Vec<u8>, ApiError> {
        let resp = self.get(self.backtest_url(query, ExportFormat::Csv)?)?;
        Ok(resp.bytes()?.to_vec())
    }

    fn health(&self) -> Result<(), ApiError> {
        self.get(self.url(HEALTH_PATH, &[])?)?;
        Ok(())
    }
}

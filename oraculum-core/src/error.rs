//! Structured error types.
//!
//! These are designed to be displayable inline in the dashboard, next to the
//! operation that failed.

use thiserror::Error;

/// Failure of a single API request. A request either fully succeeds or is
/// reported as one of these.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Non-2xx response.
    #[error("HTTP {status}")]
    Http { status: u16 },

    /// Connection refused, DNS failure, timeout, and similar.
    #[error("{0}")]
    Transport(String),

    /// 2xx response whose body is not the expected JSON document.
    #[error("invalid response: {0}")]
    Decode(String),

    /// Local I/O while storing an export.
    #[error("export failed: {0}")]
    Io(String),

    /// A precondition of the operation is not met (e.g. a date bound is unset).
    #[error("{0}")]
    Invalid(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => ApiError::Http {
                status: status.as_u16(),
            },
            None if e.is_decode() => ApiError::Decode(e.to_string()),
            None => ApiError::Transport(e.to_string()),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(e: std::io::Error) -> Self {
        ApiError::Io(e.to_string())
    }
}

/// Failure reading or writing the local settings store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_displays_status() {
        assert_eq!(ApiError::Http { status: 503 }.to_string(), "HTTP 503");
    }

    #[test]
    fn transport_error_is_verbatim() {
        let e = ApiError::Transport("connection refused".into());
        assert_eq!(e.to_string(), "connection refused");
    }
}

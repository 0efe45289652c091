//! Ticker list parsing.

/// Ticker list shown on first start.
pub const DEFAULT_TICKERS: [&str; 10] = [
    "APP", "NVDA", "MSFT", "AAPL", "META", "GOOGL", "JPM", "XOM", "LMT", "TSLA",
];

/// Split comma-separated text into trimmed, non-empty symbols, keeping order.
///
/// Duplicates are kept; the API answers once per requested symbol.
pub fn parse_tickers(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

pub fn default_ticker_text() -> String {
    DEFAULT_TICKERS.join(",")
}

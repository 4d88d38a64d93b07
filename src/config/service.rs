//! Stock data source configuration constants and types.

/// Defaults for the remote and local stock data sources
pub struct StockServiceConfig {
    /// Base URL of the stock price API. Symbols are appended as a path segment.
    pub api_url: &'static str,
    /// Local CSV file used by the offline source
    pub csv_path: &'static str,
    /// TCP connect timeout for the HTTP client (ms)
    pub connect_timeout_ms: u64,
    /// User agent sent with every API request
    pub user_agent: &'static str,
}

pub const STOCK_SERVICE: StockServiceConfig = StockServiceConfig {
    api_url: "https://ps-async.fekberg.com/api/stocks",
    csv_path: "StockPrices_Small.csv",
    connect_timeout_ms: 10_000,
    user_agent: concat!("stock-search/", env!("CARGO_PKG_VERSION")),
};

/// Attribution links shown in the status bar.
pub const DATA_ATTRIBUTION: [(&str, &str); 2] = [
    ("Data provided for free by IEX", "https://iextrading.com/developer/"),
    ("IEX's Terms of Use", "https://iextrading.com/api-exhibit-a/"),
];

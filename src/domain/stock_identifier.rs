use serde::{Deserialize, Serialize};
use std::fmt;

/// What the user typed into the search box: a ticker or a comma-separated list.
/// Only emptiness is checked; the rest is up to the data source.
#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
pub struct StockIdentifier(String);

impl StockIdentifier {
    /// Returns `None` when the (trimmed) input is empty.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    // Individual tickers, in the order typed. "msft, ,aapl" -> ["msft", "aapl"]
    pub fn symbols(&self) -> Vec<&str> {
        self.0
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn matches_symbol(&self, symbol: &str) -> bool {
        self.symbols()
            .iter()
            .any(|wanted| wanted.eq_ignore_ascii_case(symbol.trim()))
    }
}

impl fmt::Display for StockIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

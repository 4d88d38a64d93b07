use async_trait::async_trait;
use std::fmt;

use crate::domain::{PriceRecord, StockIdentifier};
use crate::engine::cancellation::CancellationToken;

/// Why a fetch produced no records.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The token was cancelled while the fetch was running
    Cancelled,
    /// Network, file or parse failure, with a message fit for the status bar
    Failed(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Cancelled => write!(f, "Fetch cancelled"),
            FetchError::Failed(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

pub type FetchResult = Result<Vec<PriceRecord>, FetchError>;

/// A source of stock prices.
///
/// Implementations must check `token` at least once per unit of data they produce and
/// return [`FetchError::Cancelled`] (not a failure) once it is cancelled.
#[async_trait]
pub trait StockFetchService: Send + Sync {
    async fn fetch(&self, identifier: &StockIdentifier, token: CancellationToken) -> FetchResult;

    /// A short name for this source (logging / status bar).
    fn signature(&self) -> &'static str;
}

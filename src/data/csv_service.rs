//! Stock prices from a local CSV export, read on a blocking worker.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::service::{FetchError, FetchResult, StockFetchService};
use crate::domain::price_record::de_trade_date;
use crate::domain::{PriceRecord, StockIdentifier};
use crate::engine::cancellation::CancellationToken;

/// One line of the CSV export.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CsvPriceRow {
    ticker: String,
    #[serde(deserialize_with = "de_trade_date")]
    trade_date: chrono::NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
    #[serde(default)]
    change: f64,
    #[serde(default)]
    change_percent: f64,
}

impl From<CsvPriceRow> for PriceRecord {
    fn from(row: CsvPriceRow) -> Self {
        PriceRecord {
            symbol: row.ticker,
            trade_date: row.trade_date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
            change: row.change,
            change_percent: row.change_percent,
        }
    }
}

pub struct CsvStockService {
    path: PathBuf,
}

impl CsvStockService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StockFetchService for CsvStockService {
    fn signature(&self) -> &'static str {
        "CSV file"
    }

    async fn fetch(&self, identifier: &StockIdentifier, token: CancellationToken) -> FetchResult {
        let path = self.path.clone();
        let identifier = identifier.clone();

        tokio::task::spawn_blocking(move || read_matching_rows(&path, &identifier, &token))
            .await
            .map_err(|e| FetchError::Failed(format!("CSV reader stopped unexpectedly: {}", e)))?
    }
}

fn read_matching_rows(
    path: &Path,
    identifier: &StockIdentifier,
    token: &CancellationToken,
) -> FetchResult {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| FetchError::Failed(format!("Could not open {}: {}", path.display(), e)))?;

    let mut records = Vec::new();
    let mut rows_read = 0usize;

    for row in reader.deserialize::<CsvPriceRow>() {
        if token.is_cancelled() {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_fetch_progress {
                log::info!("[csv] cancelled after {} rows", rows_read);
            }
            return Err(FetchError::Cancelled);
        }
        rows_read += 1;

        let row = row.map_err(|e| {
            FetchError::Failed(format!("Bad row in {}: {}", path.display(), e))
        })?;
        if identifier.matches_symbol(&row.ticker) {
            records.push(PriceRecord::from(row));
        }
    }

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_fetch_progress {
        log::info!(
            "[csv] {} of {} rows matched '{}'",
            records.len(),
            rows_read,
            identifier
        );
    }

    Ok(records)
}

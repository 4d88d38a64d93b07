// Core modules
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod ui;
pub mod utils;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

// Re-export commonly used types
pub use data::{CsvStockService, FetchError, HttpStockService, StockFetchService};
pub use domain::{PriceRecord, StockIdentifier};
pub use engine::{PresentationSink, SearchController};
pub use ui::StockSearchApp;
pub use utils::app_time;

use crate::config::STOCK_SERVICE;

// CLI argument parsing
use clap::{Parser, ValueEnum};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Remote stock price API
    Api,
    /// Local CSV export
    Csv,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Where prices come from
    #[arg(long, value_enum, default_value_t = DataSource::Api)]
    pub source: DataSource,

    /// Override the stock API base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Override the CSV file used by `--source csv`
    #[arg(long)]
    pub csv_path: Option<PathBuf>,

    /// Cancel a search automatically after this many milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Pre-fill the identifier box (takes precedence over the saved value)
    #[arg(long)]
    pub identifier: Option<String>,
}

impl Cli {
    pub fn search_timeout(&self) -> Option<Duration> {
        self.timeout_ms.filter(|ms| *ms > 0).map(Duration::from_millis)
    }
}

/// Picks the data source requested on the command line.
pub fn build_service(args: &Cli) -> Result<Arc<dyn StockFetchService>> {
    let service: Arc<dyn StockFetchService> = match args.source {
        DataSource::Api => {
            let url = args.api_url.as_deref().unwrap_or(STOCK_SERVICE.api_url);
            Arc::new(HttpStockService::new(url)?)
        }
        DataSource::Csv => {
            let path = args
                .csv_path
                .clone()
                .unwrap_or_else(|| PathBuf::from(STOCK_SERVICE.csv_path));
            let service = CsvStockService::new(path);
            if !service.path().exists() {
                log::warn!("Price file {} does not exist yet", service.path().display());
            }
            Arc::new(service)
        }
    };
    log::info!("Using {} as data source", service.signature());
    Ok(service)
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(
    cc: &eframe::CreationContext,
    controller: SearchController,
    initial_identifier: Option<String>,
) -> Box<dyn eframe::App> {
    Box::new(ui::StockSearchApp::new(cc, controller, initial_identifier))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_api_without_timeout() {
        let args = Cli::try_parse_from(["stock-search"]).unwrap();
        assert_eq!(args.source, DataSource::Api);
        assert_eq!(args.search_timeout(), None);
        assert!(args.identifier.is_none());
    }

    #[test]
    fn csv_source_with_timeout() {
        let args = Cli::try_parse_from([
            "stock-search",
            "--source",
            "csv",
            "--csv-path",
            "prices.csv",
            "--timeout-ms",
            "1500",
        ])
        .unwrap();
        assert_eq!(args.source, DataSource::Csv);
        assert_eq!(args.csv_path, Some(PathBuf::from("prices.csv")));
        assert_eq!(args.search_timeout(), Some(Duration::from_millis(1500)));

        let service = build_service(&args).unwrap();
        assert_eq!(service.signature(), "CSV file");
    }

    #[test]
    fn zero_timeout_means_none() {
        let args = Cli::try_parse_from(["stock-search", "--timeout-ms", "0"]).unwrap();
        assert_eq!(args.search_timeout(), None);
    }
}

// Stock data sources
pub mod csv_service;
pub mod http_service;
pub mod service;

// Re-export commonly used types
pub use csv_service::CsvStockService;
pub use http_service::HttpStockService;
pub use service::{FetchError, FetchResult, StockFetchService};

//! Configuration module for the stock search application.

mod debug; // Private: files use crate::config::DEBUG_FLAGS not crate::config::debug::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod persistence;
pub mod search;
pub mod service;

// Re-export commonly used items
pub use persistence::APP_STATE_PATH;
pub use search::SEARCH_TEXT;
pub use service::{STOCK_SERVICE, StockServiceConfig};

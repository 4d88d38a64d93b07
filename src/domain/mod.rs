// Domain types and value objects
pub mod price_record;
pub mod stock_identifier;

// Re-export commonly used types
pub use price_record::PriceRecord;
pub use stock_identifier::StockIdentifier;

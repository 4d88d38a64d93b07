//! User-facing text driven by the search controller.

pub struct SearchText {
    /// Button label while no search is running
    pub search_label: &'static str,
    /// Button label while a search is in flight
    pub cancel_label: &'static str,
    /// Notice shown when a running search is cancelled
    pub cancellation_notice: &'static str,
    /// Error shown when the identifier box is empty
    pub empty_identifier: &'static str,
}

pub const SEARCH_TEXT: SearchText = SearchText {
    search_label: "Search",
    cancel_label: "Cancel",
    cancellation_notice: "Cancellation requested",
    empty_identifier: "Please enter a stock identifier",
};

/// Status line published once a session ends, whatever the outcome.
pub fn loaded_message(identifier: &str, elapsed_ms: u128) -> String {
    format!("Loaded stocks for {} in {}ms", identifier, elapsed_ms)
}

use serde::{Deserialize, Serialize};

use crate::config::SEARCH_TEXT;
use crate::config::search::loaded_message;
use crate::domain::PriceRecord;
use crate::engine::PresentationSink;
use crate::utils::app_time::{AppInstant, now};

/// What survives a restart (eframe persistence).
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PersistedState {
    pub identifier: String,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            identifier: "MSFT".to_string(),
        }
    }
}

/// Everything the panels draw. Written only through [`PresentationSink`].
#[derive(Debug, Clone)]
pub struct UiStatus {
    pub button_label: String,
    pub progress_visible: bool,
    pub progress_indeterminate: bool,
    /// "Loaded stocks for ... in ...ms"
    pub status_message: Option<String>,
    /// Error or notice text from the latest outcome
    pub notes: Option<Note>,
    pub results: Vec<PriceRecord>,
    /// When the running search started, for the live stopwatch
    pub loading_since: Option<AppInstant>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Note {
    Error(String),
    Notice(String),
}

impl Default for UiStatus {
    fn default() -> Self {
        Self {
            button_label: SEARCH_TEXT.search_label.to_string(),
            progress_visible: false,
            progress_indeterminate: false,
            status_message: None,
            notes: None,
            results: Vec::new(),
            loading_since: None,
        }
    }
}

impl UiStatus {
    pub fn live_elapsed_ms(&self) -> Option<u128> {
        self.loading_since.map(|t| t.elapsed().as_millis())
    }
}

impl PresentationSink for UiStatus {
    fn before_loading(&mut self) {
        self.loading_since = Some(now());
        self.progress_indeterminate = true;
        self.notes = None;
    }

    fn after_loading(&mut self, identifier: &str, elapsed_ms: u128) {
        self.loading_since = None;
        self.progress_indeterminate = false;
        self.status_message = Some(loaded_message(identifier, elapsed_ms));
    }

    fn show_results(&mut self, records: Vec<PriceRecord>) {
        self.results = records;
    }

    fn show_error(&mut self, message: &str) {
        self.notes = Some(Note::Error(message.to_string()));
    }

    fn show_notice(&mut self, message: &str) {
        self.notes = Some(Note::Notice(message.to_string()));
    }

    fn set_button_label(&mut self, text: &str) {
        self.button_label = text.to_string();
    }

    fn set_progress_visible(&mut self, visible: bool) {
        self.progress_visible = visible;
    }
}

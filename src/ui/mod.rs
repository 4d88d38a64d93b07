// User interface components
pub mod app;
pub mod app_state;
pub mod config;
pub mod styles;
pub mod ui_render;
pub mod utils;

// Re-export main app
pub use app::StockSearchApp;
pub use app_state::{PersistedState, UiStatus};
pub use config::{UI_CONFIG, UI_TEXT};

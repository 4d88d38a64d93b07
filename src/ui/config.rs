use eframe::egui::Color32;

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub price_up: Color32,
    pub price_down: Color32,
    pub error: Color32,
    pub notice: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub identifier_box_width: f32,
    pub results_row_height: f32,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY, // This sets every label globally to this color
        heading: Color32::YELLOW,
        subsection_heading: Color32::ORANGE,
        central_panel: Color32::from_rgb(30, 30, 36),
        side_panel: Color32::from_rgb(25, 25, 25),
        price_up: Color32::from_rgb(130, 200, 140),
        price_down: Color32::from_rgb(230, 120, 120),
        error: Color32::from_rgb(255, 100, 100),
        notice: Color32::from_rgb(255, 215, 0),
    },
    identifier_box_width: 220.0,
    results_row_height: 18.0,
};

/// Static strings rendered by the panels
pub struct UiText {
    pub window_title: &'static str,
    pub identifier_label: &'static str,
    pub identifier_hint: &'static str,
    pub close_label: &'static str,
    pub results_heading: &'static str,
    pub no_results: &'static str,
    pub columns: [&'static str; 8],
}

pub const UI_TEXT: UiText = UiText {
    window_title: "Stock Analyzer",
    identifier_label: "Stock identifier",
    identifier_hint: "MSFT, AAPL",
    close_label: "Close",
    results_heading: "Prices",
    no_results: "No prices loaded",
    columns: ["Ticker", "Date", "Open", "High", "Low", "Close", "Volume", "Change %"],
};

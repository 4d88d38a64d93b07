use eframe::egui::{Color32, RichText, Ui};

use crate::ui::app_state::Note;
use crate::ui::config::UI_CONFIG;
use crate::ui::utils::change_color;

/// Semantic styling for the search window, called directly on `egui::Ui`.
pub trait UiStyleExt {
    /// Small gray text: empty-state hints, the running stopwatch.
    fn label_subdued(&mut self, text: impl Into<String>);

    /// "Source: Stock API" style pair. The label is subdued, the value colored.
    fn metric(&mut self, label: &str, value: &str, color: Color32);

    fn label_header(&mut self, text: impl Into<String>);

    /// Title cell of the results grid.
    fn column_header(&mut self, text: &str);

    /// Outcome text from the last search: failures in red, notices in gold.
    fn note(&mut self, note: &Note);

    /// Signed day change, green for up and red for down.
    fn price_change(&mut self, change: f64, change_percent: f64);
}

impl UiStyleExt for Ui {
    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(Color32::GRAY));
    }

    fn metric(&mut self, label: &str, value: &str, color: Color32) {
        self.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.label_subdued(format!("{}:", label));
            ui.label(RichText::new(value).small().color(color));
        });
    }

    fn label_header(&mut self, text: impl Into<String>) {
        let text = text.into().to_uppercase();
        self.heading(RichText::new(text).color(UI_CONFIG.colors.heading).monospace());
    }

    fn column_header(&mut self, text: &str) {
        self.label(
            RichText::new(text)
                .strong()
                .color(UI_CONFIG.colors.subsection_heading),
        );
    }

    fn note(&mut self, note: &Note) {
        match note {
            Note::Error(msg) => self.label(RichText::new(msg).color(UI_CONFIG.colors.error)),
            Note::Notice(msg) => {
                self.label(RichText::new(msg).small().color(UI_CONFIG.colors.notice))
            }
        };
    }

    fn price_change(&mut self, change: f64, change_percent: f64) {
        self.label(RichText::new(format!("{:+.2}%", change_percent)).color(change_color(change)));
    }
}

use eframe::egui::{
    Align, CentralPanel, Context, Frame, Grid, Key, Layout, Margin, RichText, ScrollArea,
    Spinner, TextEdit, TopBottomPanel, ViewportCommand,
};

use crate::config::service::DATA_ATTRIBUTION;
use crate::ui::app::StockSearchApp;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::utils::{format_price, format_volume};

impl StockSearchApp {
    pub(super) fn render_search_panel(&mut self, ctx: &Context) {
        let mut pressed = false;
        let mut close = false;

        TopBottomPanel::top("search_panel").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(UI_TEXT.identifier_label);

                let response = ui.add(
                    TextEdit::singleline(&mut self.persisted.identifier)
                        .hint_text(UI_TEXT.identifier_hint)
                        .desired_width(UI_CONFIG.identifier_box_width),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                    pressed = true;
                }

                if ui.button(self.status.button_label.as_str()).clicked() {
                    pressed = true;
                }

                if self.status.progress_visible {
                    // Indeterminate: we never know how much is left.
                    ui.add(Spinner::new());
                    if let Some(ms) = self.status.live_elapsed_ms() {
                        ui.label_subdued(format!("{}ms", ms));
                    }
                }

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.button(UI_TEXT.close_label).clicked() {
                        close = true;
                    }
                });
            });
            ui.add_space(6.0);
        });

        if pressed {
            self.handle_search_pressed();
        }
        // eframe then runs `on_exit`, which shuts the controller down.
        if close {
            ctx.send_viewport_cmd(ViewportCommand::Close);
        }
    }

    pub(super) fn render_status_panel(&mut self, ctx: &Context) {
        let status_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::symmetric(8, 4));

        TopBottomPanel::bottom("status_panel")
            .frame(status_frame)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if let Some(message) = &self.status.status_message {
                        ui.label(RichText::new(message).small());
                        ui.separator();
                    }

                    if let Some(note) = &self.status.notes {
                        ui.note(note);
                        ui.separator();
                    }

                    ui.metric(
                        "Source",
                        self.controller.service_signature(),
                        UI_CONFIG.colors.subsection_heading,
                    );

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        for (label, url) in DATA_ATTRIBUTION.iter().rev() {
                            ui.hyperlink_to(RichText::new(*label).small(), *url);
                        }
                    });
                });
            });
    }

    pub(super) fn render_results_panel(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.label_header(UI_TEXT.results_heading);
            ui.add_space(5.0);

            if self.status.results.is_empty() {
                ui.label_subdued(UI_TEXT.no_results);
                return;
            }

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    Grid::new("price_grid")
                        .striped(true)
                        .min_row_height(UI_CONFIG.results_row_height)
                        .show(ui, |ui| {
                            for column in UI_TEXT.columns {
                                ui.column_header(column);
                            }
                            ui.end_row();

                            for record in &self.status.results {
                                ui.label(&record.symbol);
                                ui.label(record.trade_date.format("%Y-%m-%d").to_string());
                                ui.label(format_price(record.open));
                                ui.label(format_price(record.high));
                                ui.label(format_price(record.low));
                                ui.label(format_price(record.close));
                                ui.label(format_volume(record.volume));
                                ui.price_change(record.change, record.change_percent);
                                ui.end_row();
                            }
                        });
                });
        });
    }
}

use eframe::{Frame, egui};

use crate::engine::SearchController;
use crate::ui::app_state::{PersistedState, UiStatus};
use crate::ui::utils::setup_custom_visuals;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

pub struct StockSearchApp {
    pub(super) controller: SearchController,
    pub(super) status: UiStatus,
    pub(super) persisted: PersistedState,
}

impl StockSearchApp {
    /// `initial_identifier` (from the command line) wins over the persisted one.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        controller: SearchController,
        initial_identifier: Option<String>,
    ) -> Self {
        let mut persisted: PersistedState = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_state_serde {
            log::info!("Restored UI state: {:?}", persisted);
        }

        if let Some(identifier) = initial_identifier {
            persisted.identifier = identifier;
        }

        Self {
            controller,
            status: UiStatus::default(),
            persisted,
        }
    }

    /// Search/Cancel button or Enter in the identifier box.
    pub(super) fn handle_search_pressed(&mut self) {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!(
                "[ui] {} pressed with '{}'",
                self.status.button_label,
                self.persisted.identifier
            );
        }

        self.controller
            .on_search_button_pressed(&self.persisted.identifier, &mut self.status);
    }
}

impl eframe::App for StockSearchApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.controller.shutdown();

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_shutdown {
            log::info!("Application shutdown complete.");
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_state_serde {
            log::info!("Saving UI state: {:?}", self.persisted);
        }
        eframe::set_value(storage, eframe::APP_KEY, &self.persisted);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);

        // Apply finished fetches before drawing; keep waking up while one is running.
        if self.controller.update(&mut self.status) {
            ctx.request_repaint();
        }

        self.render_search_panel(ctx);
        self.render_status_panel(ctx);
        self.render_results_panel(ctx);
    }
}

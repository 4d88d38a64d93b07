use eframe::egui::{Color32, Context, Visuals};

use crate::ui::config::UI_CONFIG;

/// Sets up custom visuals for the entire application
pub fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();

    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;

    // Make the widgets stand out a bit more
    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;

    ctx.set_visuals(visuals);
}

/// Share prices: always 2 decimals, with a dollar sign.
pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// 35329345 -> "35,329,345"
pub fn format_volume(volume: u64) -> String {
    let digits = volume.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn change_color(change: f64) -> Color32 {
    if change >= 0.0 {
        UI_CONFIG.colors.price_up
    } else {
        UI_CONFIG.colors.price_down
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_gets_thousands_separators() {
        assert_eq!(format_volume(0), "0");
        assert_eq!(format_volume(999), "999");
        assert_eq!(format_volume(1_000), "1,000");
        assert_eq!(format_volume(35_329_345), "35,329,345");
    }

    #[test]
    fn prices_use_two_decimals() {
        assert_eq!(format_price(101.126), "$101.13");
        assert_eq!(format_price(0.0), "$0.00");
    }
}

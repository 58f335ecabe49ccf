use eframe::egui::{self, Color32, RichText};

use crate::catalog::CategoryId;
use crate::filters::FilterStore;

use super::price_slider::{price_range_slider, PriceSliderState};

/// Draws the left-side filters panel: category menu and price slider.
/// Mutations go straight to the store, which refetches the listing.
pub fn draw_filters_panel(
    ctx: &egui::Context,
    store: &mut FilterStore,
    slider: &mut PriceSliderState,
) {
    egui::SidePanel::left("filters_panel")
        .frame(
            egui::Frame::none()
                .fill(egui::Color32::from_rgb(30, 30, 30))
                .inner_margin(10.0),
        )
        .resizable(false)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.label(RichText::new("Filters").strong());
            ui.separator();

            // CATEGORY
            ui.label(RichText::new("CATEGORY").weak());
            if let Some(err) = store.directory_error() {
                ui.colored_label(Color32::RED, err.to_string());
            }
            let entries: Vec<(CategoryId, String)> = store
                .directory()
                .iter()
                .map(|c| (c.id, c.name.clone()))
                .collect();
            let selected = store.criteria().category_id;
            for (id, name) in entries {
                if ui.selectable_label(selected == Some(id), name).clicked() {
                    store.set_category(id);
                }
            }

            ui.separator();

            // PRICE
            slider.sync(store.criteria().price_range);
            if let Some((lo, hi)) = price_range_slider(ui, "PRICE", slider) {
                // The widget snaps within bounds, so this only fails if the
                // slider constants and the criteria bounds ever diverge.
                if let Err(err) = store.set_price_range(lo, hi) {
                    log::warn!("price slider commit rejected: {err}");
                }
            }
        });
}

use eframe::egui::{self, Color32, RichText, Rounding, Stroke, Ui};

use crate::api::Product;

use super::ui_helpers::format_price;

/// Card width used by the listing grid (in logical pixels).
pub const CARD_WIDTH: f32 = 200.0;
const GRID_GAP: f32 = 12.0;

/// Lays the products out in as many fixed-width columns as fit.
pub fn draw_product_grid(ui: &mut Ui, products: &[Product]) {
    if products.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.label(RichText::new("No products match the current filters").weak());
        });
        return;
    }

    let avail_w = ui.available_width().floor();
    let mut cols = ((avail_w + GRID_GAP) / (CARD_WIDTH + GRID_GAP)).floor() as usize;
    if cols == 0 {
        cols = 1;
    }

    for row in products.chunks(cols) {
        ui.horizontal(|ui| {
            for product in row {
                product_card(ui, product);
            }
        });
        ui.add_space(GRID_GAP);
    }
}

fn product_card(ui: &mut Ui, product: &Product) {
    egui::Frame::none()
        .fill(Color32::from_rgb(36, 36, 36))
        .stroke(Stroke::new(1.0, Color32::from_gray(60)))
        .rounding(Rounding::same(6.0))
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.vertical(|ui| {
                ui.add(
                    egui::Label::new(RichText::new(&product.name).strong()).truncate(true),
                );
                ui.label(format_price(product.price));
            });
        });
}

// Entry point kept minimal: logging, window config and app start. All
// behavior lives in the app and filters modules.

use eframe::egui;

mod api;
mod app;
mod catalog;
mod filters;
mod views;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1080.0, 720.0])
            .with_resizable(true),
        ..Default::default()
    };

    let res = eframe::run_native(
        "Shop Browser",
        native_options,
        Box::new(|_cc| Box::new(app::ShopApp::default())),
    );
    if let Err(ref e) = res {
        log::error!("eframe::run_native failed: {e}");
    }
    res
}

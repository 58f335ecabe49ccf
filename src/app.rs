// Application shell: owns the filter store and draws the browsing view
// around it. All filter logic lives in the filters module; this file is
// wiring and layout only.

use std::sync::{Arc, OnceLock};

use eframe::{egui, App};

use crate::api::HttpProvider;
use crate::filters::FilterStore;
use crate::views;
use crate::views::filters::PriceSliderState;

static RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

/// Shared tokio runtime for all background fetches.
pub fn rt() -> &'static tokio::runtime::Runtime {
    RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("tokio runtime")
    })
}

pub struct ShopApp {
    store: FilterStore,
    slider: PriceSliderState,
    started: bool,
}

impl Default for ShopApp {
    fn default() -> Self {
        let api = Arc::new(HttpProvider::from_env());
        Self {
            store: FilterStore::new(api.clone(), api),
            slider: PriceSliderState::new(),
            started: false,
        }
    }
}

impl App for ShopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply results delivered by background fetches
        self.store.poll();

        // First frame: wire the repaint waker, then load categories and
        // the unfiltered listing
        if !self.started {
            self.started = true;
            let ctx2 = ctx.clone();
            self.store.set_waker(move || ctx2.request_repaint());
            self.store.start();
        }

        views::filters::draw_filters_panel(ctx, &mut self.store, &mut self.slider);

        egui::CentralPanel::default().show(ctx, |ui| {
            // Controlled search input: text comes from the criteria so
            // closing the search tag also empties the box. No debounce;
            // stale responses are dropped by request id.
            let mut query = self.store.criteria().search_key.clone();
            let resp = ui.add_sized(
                [ui.available_width(), 0.0],
                egui::TextEdit::singleline(&mut query).hint_text("Search..."),
            );
            if resp.changed() {
                self.store.set_search(query);
            }
            ui.add_space(8.0);

            let tags = self.store.tags();
            if let Some(kind) = views::tags_row::draw_active_filters(ui, &tags) {
                self.store.dismiss(kind);
            }
            if !tags.is_empty() {
                ui.add_space(8.0);
            }

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    if let Some(err) = self.store.last_error() {
                        ui.vertical_centered(|ui| {
                            ui.colored_label(egui::Color32::RED, format!("Error: {}", err));
                        });
                    } else if self.store.is_loading() && self.store.products().is_none() {
                        ui.add_space(24.0);
                        ui.vertical_centered(|ui| {
                            ui.add(egui::Spinner::new());
                            ui.label("Loading...");
                        });
                    } else if let Some(products) = self.store.products() {
                        views::products::draw_product_grid(ui, products);
                    }
                });
        });
    }
}

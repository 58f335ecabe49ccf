pub mod price_slider;
pub mod render;

pub use price_slider::{price_range_slider, PriceSliderState};
pub use render::draw_filters_panel;

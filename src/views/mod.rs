pub mod filters;
pub mod products;
pub mod tags_row;
pub mod ui_helpers;

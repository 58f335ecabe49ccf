use eframe::egui::{RichText, Ui};

use crate::filters::{FilterTag, TagKind};

/// Row of removable active-filter chips above the listing. Draws nothing
/// when no filter is active. Returns the kind whose chip was closed this
/// frame, if any.
pub fn draw_active_filters(ui: &mut Ui, tags: &[FilterTag]) -> Option<TagKind> {
    if tags.is_empty() {
        return None;
    }
    let mut dismissed: Option<TagKind> = None;
    ui.horizontal_wrapped(|ui| {
        ui.label(RichText::new("Filtering by:").weak());
        for tag in tags {
            if ui.button(format!("{} ×", tag.label)).clicked() {
                dismissed = Some(tag.kind);
            }
        }
    });
    dismissed
}

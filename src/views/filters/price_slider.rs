use eframe::egui::{self, pos2, Align2, Color32, FontId, Rect, RichText, Rounding, Sense, Stroke, Ui, Vec2};

use crate::filters::{PriceRange, PRICE_MAX, PRICE_MIN, PRICE_STEP};
use crate::views::ui_helpers::format_price;

/// Labeled tick marks drawn under the track.
pub const MARKS: [(u64, &str); 3] = [(0, "0"), (25_000_000, "25M"), (50_000_000, "50M")];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Thumb {
    Lo,
    Hi,
}

/// Displayed state of the two-thumb price slider. Holds only the range
/// currently shown; the committed filter value lives in the criteria.
/// While a drag is in progress `sync` is a no-op so the thumbs follow the
/// pointer instead of snapping back to the committed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceSliderState {
    lo: u64,
    hi: u64,
    active: Option<Thumb>,
}

impl Default for PriceSliderState {
    fn default() -> Self {
        Self {
            lo: PRICE_MIN,
            hi: PRICE_MAX,
            active: None,
        }
    }
}

impl PriceSliderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lo(&self) -> u64 {
        self.lo
    }

    pub fn hi(&self) -> u64 {
        self.hi
    }

    /// Aligns the displayed range with the committed filter value; a
    /// cleared filter resets the thumbs to the full bounds.
    pub fn sync(&mut self, range: Option<PriceRange>) {
        if self.active.is_some() {
            return;
        }
        match range {
            Some(r) => {
                self.lo = r.min;
                self.hi = r.max;
            }
            None => {
                self.lo = PRICE_MIN;
                self.hi = PRICE_MAX;
            }
        }
    }

    /// Moves the active thumb (picked by proximity on the first frame of
    /// the gesture) to the snapped value. Thumbs never cross.
    pub fn drag_to(&mut self, value: u64) {
        let thumb = match self.active {
            Some(t) => t,
            None => {
                let t = self.nearest(value);
                self.active = Some(t);
                t
            }
        };
        match thumb {
            Thumb::Lo => self.lo = snap(value).min(self.hi),
            Thumb::Hi => self.hi = snap(value).max(self.lo),
        }
    }

    /// Gesture completion: releases the active thumb and reports the range
    /// to commit.
    pub fn end_drag(&mut self) -> (u64, u64) {
        self.active = None;
        (self.lo, self.hi)
    }

    /// Single click on the track: moves the nearest thumb and commits in
    /// one step.
    pub fn click_at(&mut self, value: u64) -> (u64, u64) {
        match self.nearest(value) {
            Thumb::Lo => self.lo = snap(value).min(self.hi),
            Thumb::Hi => self.hi = snap(value).max(self.lo),
        }
        (self.lo, self.hi)
    }

    fn nearest(&self, value: u64) -> Thumb {
        let to_lo = self.lo.abs_diff(value);
        let to_hi = self.hi.abs_diff(value);
        if to_lo <= to_hi {
            Thumb::Lo
        } else {
            Thumb::Hi
        }
    }
}

fn snap(value: u64) -> u64 {
    let stepped = ((value + PRICE_STEP / 2) / PRICE_STEP) * PRICE_STEP;
    stepped.min(PRICE_MAX)
}

/// Two-thumb slider over the fixed price bounds.
/// Header row: name on the left, displayed range on the right.
/// Returns Some((lo, hi)) only on gesture completion (release or click),
/// never for intermediate drag frames.
pub fn price_range_slider(ui: &mut Ui, name: &str, state: &mut PriceSliderState) -> Option<(u64, u64)> {
    ui.horizontal(|ui| {
        ui.add(egui::Label::new(RichText::new(name).weak()).selectable(false));
        ui.with_layout(
            eframe::egui::Layout::right_to_left(eframe::egui::Align::Center),
            |ui| {
                ui.add(
                    egui::Label::new(
                        RichText::new(format!(
                            "{} - {}",
                            format_price(state.lo()),
                            format_price(state.hi())
                        ))
                        .small(),
                    )
                    .selectable(false),
                );
            },
        );
    });

    let available_width = ui.available_width();
    let height = 52.0f32;
    let rounding = Rounding::same(6.0);
    let border_color = Color32::from_gray(80);
    let container_bg = Color32::from_rgb(30, 30, 30);
    let track_bg = Color32::from_rgb(25, 25, 25);
    let track_border = Color32::from_gray(60);
    let thumb_fill = Color32::from_rgb(52, 52, 52);
    let thumb_outline = Color32::from_gray(50);
    let accent = Color32::from_rgb(210, 85, 85);
    let mark_color = Color32::from_gray(120);

    let (container_rect, _) =
        ui.allocate_exact_size(Vec2::new(available_width, height), Sense::hover());
    let painter = ui.painter();
    painter.rect(
        container_rect,
        rounding,
        container_bg,
        Stroke::new(1.0, border_color),
    );

    // Track in the upper half; the strip below is for mark labels
    let track_height = 8.0f32;
    let track_margin_h = 16.0f32;
    let track_y = container_rect.min.y + 16.0;
    let track_rect = Rect::from_min_max(
        pos2(container_rect.min.x + track_margin_h, track_y),
        pos2(container_rect.max.x - track_margin_h, track_y + track_height),
    );
    painter.rect(
        track_rect,
        Rounding::same(track_height * 0.5),
        track_bg,
        Stroke::new(1.0, track_border),
    );

    let value_to_x = |value: u64| -> f32 {
        let t = (value as f64 / PRICE_MAX as f64) as f32;
        egui::lerp(track_rect.left()..=track_rect.right(), t)
    };
    let x_to_value = |x: f32| -> u64 {
        let clamped = x.clamp(track_rect.left(), track_rect.right());
        let t = if track_rect.width() > 0.0 {
            (clamped - track_rect.left()) / track_rect.width()
        } else {
            0.0
        };
        (t as f64 * PRICE_MAX as f64).round() as u64
    };

    let id = ui.id().with("price_range_slider").with(name.to_string());
    let response = ui
        .interact(container_rect, id, Sense::click_and_drag())
        .on_hover_cursor(eframe::egui::CursorIcon::PointingHand);

    let mut committed: Option<(u64, u64)> = None;
    if response.dragged() {
        if let Some(pointer) = response.interact_pointer_pos() {
            state.drag_to(x_to_value(pointer.x));
        }
    }
    if response.drag_stopped() {
        committed = Some(state.end_drag());
    }
    if response.clicked() {
        if let Some(pointer) = response.interact_pointer_pos() {
            committed = Some(state.click_at(x_to_value(pointer.x)));
        }
    }

    // Accent span between the thumbs
    let lo_x = value_to_x(state.lo());
    let hi_x = value_to_x(state.hi());
    let active_rect = Rect::from_min_max(
        pos2(lo_x, track_rect.top()),
        pos2(hi_x, track_rect.bottom()),
    );
    painter.rect(
        active_rect,
        Rounding::same(track_height * 0.5),
        Color32::from_rgba_premultiplied(accent.r(), accent.g(), accent.b(), 26),
        Stroke::NONE,
    );

    // Thumbs
    let thumb_size = Vec2::new(14.0, 22.0);
    for x in [lo_x, hi_x] {
        let thumb_rect =
            Rect::from_center_size(pos2(x, track_rect.center().y), thumb_size);
        painter.rect(
            thumb_rect,
            Rounding::same(4.0),
            thumb_fill,
            Stroke::new(1.0, thumb_outline),
        );
    }

    // Labeled marks under the track
    for (value, label) in MARKS {
        let x = value_to_x(value);
        let y1 = track_rect.bottom() + 2.0;
        painter.line_segment(
            [pos2(x, y1), pos2(x, y1 + 4.0)],
            Stroke::new(1.0, mark_color),
        );
        painter.text(
            pos2(x, y1 + 6.0),
            Align2::CENTER_TOP,
            label,
            FontId::proportional(10.0),
            mark_color,
        );
    }

    committed
}

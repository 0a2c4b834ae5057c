//! Preview compositor — renders the split comparison into the UI.
//!
//! The visual state is a pure function of the two slots and the slider
//! position: dark full-bleed, light clipped to the span left of the split,
//! handle at the split. The clip edge and the handle offset are both
//! computed from the same `SplitSlider::split_x` value.

use eframe::egui;
use egui::{Color32, CursorIcon, FontId, Pos2, Rect, Sense, Stroke, pos2, vec2};

use crate::slider::SplitSlider;
use crate::slots::{SlotImage, SlotManager, Theme};

/// Preview aspect ratio (width / height).
const PREVIEW_ASPECT: f32 = 16.0 / 9.0;
/// Width of the pointer hit area around the handle, in points.
const HANDLE_HIT_WIDTH: f32 = 24.0;
/// Knob radius, in points.
const KNOB_RADIUS: f32 = 14.0;
/// Checkerboard cell size, in points.
const CHECKER_SIZE: f32 = 10.0;

/// Accent used for the knob dots (matches the app icon).
const ACCENT: Color32 = Color32::from_rgb(139, 92, 246);

/// What the preview surface should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewState {
    /// No slot populated — nothing to preview.
    Empty,
    /// Only the dark slot is populated.
    MissingLight,
    /// Only the light slot is populated.
    MissingDark,
    /// Both slots populated — full comparison with handle.
    Ready,
}

/// Rendering policy: which preview state applies.
pub fn preview_state(light_populated: bool, dark_populated: bool) -> PreviewState {
    match (light_populated, dark_populated) {
        (false, false) => PreviewState::Empty,
        (false, true) => PreviewState::MissingLight,
        (true, false) => PreviewState::MissingDark,
        (true, true) => PreviewState::Ready,
    }
}

/// UV sub-rectangle of a source texture that fills `rect` with "cover"
/// semantics (preserve source aspect, crop the overflow, centered).
pub fn cover_uv(src_w: u32, src_h: u32, rect: Rect) -> Rect {
    let dst_w = rect.width().round().max(1.0) as u32;
    let dst_h = rect.height().round().max(1.0) as u32;
    let (x, y, w, h) = crate::compose::cover_crop(src_w, src_h, dst_w, dst_h);
    if src_w == 0 || src_h == 0 {
        return Rect::from_min_max(Pos2::ZERO, pos2(1.0, 1.0));
    }
    Rect::from_min_max(
        pos2(x as f32 / src_w as f32, y as f32 / src_h as f32),
        pos2((x + w) as f32 / src_w as f32, (y + h) as f32 / src_h as f32),
    )
}

/// Draw the preview surface and run the slider interaction.
pub fn show_preview(
    ui: &mut egui::Ui,
    slots: &SlotManager,
    slider: &mut SplitSlider,
    show_checkerboard: bool,
) {
    let state = preview_state(
        slots.slot(Theme::Light).is_some(),
        slots.slot(Theme::Dark).is_some(),
    );

    // 16:9 surface spanning the available width.
    let width = ui.available_width();
    let (rect, _response) =
        ui.allocate_exact_size(vec2(width, width / PREVIEW_ASPECT), Sense::hover());
    if !ui.is_rect_visible(rect) {
        return;
    }
    let painter = ui.painter_at(rect);

    // Background: checkerboard (or flat) under everything.
    if show_checkerboard {
        draw_checkerboard(&painter, rect);
    } else {
        painter.rect_filled(rect, 0.0, Color32::from_gray(40));
    }

    match state {
        PreviewState::Empty => {
            slider.end_drag();
            draw_message(&painter, rect, &t!("preview.empty"));
        }
        PreviewState::MissingLight => {
            slider.end_drag();
            if let Some(dark) = slots.slot(Theme::Dark) {
                draw_cover_image(&painter, rect, dark);
            }
            draw_message(&painter, rect, &t!("preview.missing_light"));
        }
        PreviewState::MissingDark => {
            slider.end_drag();
            if let Some(light) = slots.slot(Theme::Light) {
                draw_cover_image(&painter, rect, light);
            }
            draw_message(&painter, rect, &t!("preview.missing_dark"));
        }
        PreviewState::Ready => {
            if let (Some(light), Some(dark)) =
                (slots.slot(Theme::Light), slots.slot(Theme::Dark))
            {
                show_comparison(ui, &painter, rect, light, dark, slider);
            }
        }
    }
}

/// The interactive comparison: both layers, clip, handle, drag.
fn show_comparison(
    ui: &egui::Ui,
    painter: &egui::Painter,
    rect: Rect,
    light: &SlotImage,
    dark: &SlotImage,
    slider: &mut SplitSlider,
) {
    // -- Interaction (state update before drawing, so the handle and the
    //    clip edge both reflect this frame's position) -------------------
    let pointer = ui.input(|i| i.pointer.interact_pos());
    let primary_pressed = ui.input(|i| i.pointer.primary_pressed());
    let released = ui.input(|i| i.pointer.any_released());

    // Hit test against the handle at its last-drawn position.
    let handle_hit = Rect::from_center_size(
        pos2(slider.split_x(rect), rect.center().y),
        vec2(HANDLE_HIT_WIDTH, rect.height()),
    );

    if primary_pressed
        && let Some(p) = pointer
        && handle_hit.contains(p)
    {
        slider.begin_drag();
    }

    if slider.is_dragging() {
        // Pointer is tracked globally while dragging — outrunning the
        // handle's hit area keeps the drag alive, and the clamp in the
        // controller pins positions outside the surface to the edges.
        if let Some(p) = pointer {
            slider.drag_to(p.x, rect);
        }
        ui.ctx().set_cursor_icon(CursorIcon::ResizeHorizontal);
        if released {
            slider.end_drag();
        }
    } else if pointer.is_some_and(|p| handle_hit.contains(p)) {
        ui.ctx().set_cursor_icon(CursorIcon::ResizeHorizontal);
    }

    // -- Layers ----------------------------------------------------------
    let split_x = slider.split_x(rect);

    // Dark: base layer, full bleed.
    draw_cover_image(painter, rect, dark);

    // Light: same geometry, visually restricted to the span left of the
    // split. A clip region, not a resize — the layer keeps its full-bleed
    // coordinates.
    if split_x > rect.left() {
        let clip = Rect::from_min_max(rect.min, pos2(split_x, rect.max.y));
        let clipped = painter.with_clip_rect(clip);
        draw_cover_image(&clipped, rect, light);
    }

    // -- Handle ----------------------------------------------------------
    draw_handle(painter, rect, split_x, slider.is_dragging());
}

/// Blit a slot texture into `rect` with cover semantics.
fn draw_cover_image(painter: &egui::Painter, rect: Rect, slot: &SlotImage) {
    let (w, h) = slot.dimensions();
    let uv = cover_uv(w, h, rect);
    painter.image(slot.texture_id(), rect, uv, Color32::WHITE);
}

/// Vertical divider line + knob, both at `split_x`.
fn draw_handle(painter: &egui::Painter, rect: Rect, split_x: f32, dragging: bool) {
    let line_color = Color32::from_rgba_unmultiplied(255, 255, 255, 230);
    painter.line_segment(
        [pos2(split_x, rect.top()), pos2(split_x, rect.bottom())],
        Stroke::new(2.0, line_color),
    );

    let center = pos2(split_x, rect.center().y);
    let radius = if dragging { KNOB_RADIUS + 2.0 } else { KNOB_RADIUS };
    painter.circle_filled(center, radius, Color32::from_rgba_unmultiplied(255, 255, 255, 235));
    painter.circle_stroke(center, radius, Stroke::new(1.0, Color32::from_gray(180)));

    // Three accent dots on the knob.
    for i in -1..=1 {
        painter.circle_filled(center + vec2(i as f32 * 5.0, 0.0), 1.5, ACCENT);
    }
}

/// Centered message chip over the preview surface.
fn draw_message(painter: &egui::Painter, rect: Rect, text: &str) {
    let font = FontId::proportional(15.0);
    let galley = painter.layout_no_wrap(text.to_string(), font, Color32::from_gray(230));
    let padding = vec2(16.0, 10.0);
    let chip = Rect::from_center_size(rect.center(), galley.size() + padding * 2.0);
    painter.rect_filled(chip, 8.0, Color32::from_black_alpha(170));
    painter.galley(chip.min + padding, galley);
}

/// Transparency checkerboard behind the preview (the images may carry
/// alpha). Light base rect, dark squares on top.
fn draw_checkerboard(painter: &egui::Painter, rect: Rect) {
    let light = Color32::from_gray(54);
    let dark = Color32::from_gray(44);
    painter.rect_filled(rect, 0.0, light);

    let cols = (rect.width() / CHECKER_SIZE).ceil() as i32;
    let rows = (rect.height() / CHECKER_SIZE).ceil() as i32;
    for y in 0..rows {
        for x in 0..cols {
            if (x + y) % 2 == 0 {
                continue; // light square — already painted
            }
            let cell = Rect::from_min_size(
                pos2(
                    rect.min.x + x as f32 * CHECKER_SIZE,
                    rect.min.y + y as f32 * CHECKER_SIZE,
                ),
                vec2(CHECKER_SIZE, CHECKER_SIZE),
            );
            let cell = cell.intersect(rect);
            if !cell.is_negative() {
                painter.rect_filled(cell, 0.0, dark);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_state_policy() {
        assert_eq!(preview_state(false, false), PreviewState::Empty);
        assert_eq!(preview_state(true, false), PreviewState::MissingDark);
        assert_eq!(preview_state(false, true), PreviewState::MissingLight);
        assert_eq!(preview_state(true, true), PreviewState::Ready);
    }

    #[test]
    fn test_cover_uv_matching_aspect_is_full_texture() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(160.0, 90.0));
        let uv = cover_uv(1600, 900, rect);
        assert_eq!(uv, Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)));
    }

    #[test]
    fn test_cover_uv_square_source_in_wide_rect_crops_vertically() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(160.0, 90.0));
        let uv = cover_uv(100, 100, rect);
        // Full width, vertical band centered
        assert_eq!(uv.min.x, 0.0);
        assert_eq!(uv.max.x, 1.0);
        assert!(uv.min.y > 0.0 && uv.max.y < 1.0);
        assert!((uv.center().y - 0.5).abs() < 0.02);
    }

    #[test]
    fn test_cover_uv_stays_in_unit_square() {
        for &(w, h) in &[(1u32, 1000u32), (1000, 1), (3, 7), (1920, 1080)] {
            let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(400.0, 225.0));
            let uv = cover_uv(w, h, rect);
            assert!(uv.min.x >= 0.0 && uv.min.y >= 0.0, "{w}x{h}");
            assert!(uv.max.x <= 1.0 && uv.max.y <= 1.0, "{w}x{h}");
        }
    }
}

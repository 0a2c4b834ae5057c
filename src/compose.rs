//! Pixel-level split compositor — produces the comparison as an actual
//! image for export, clipboard copy and the headless CLI.
//!
//! The output always has the dark image's dimensions (the base layer is
//! full-bleed); the light image is cover-cropped to those dimensions and
//! revealed over the columns left of the split, exactly like the preview.

use image::{Rgba, RgbaImage, imageops};
use rayon::prelude::*;

/// Width of the divider line marking the split, in output pixels.
const DIVIDER_WIDTH: u32 = 2;
const DIVIDER_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Centered crop region of a `src_w`×`src_h` source whose aspect ratio
/// matches `dst_w`×`dst_h` ("cover" semantics: fill the destination, crop
/// the overflow). Returns `(x, y, width, height)` in source pixels.
pub fn cover_crop(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> (u32, u32, u32, u32) {
    if src_w == 0 || src_h == 0 || dst_w == 0 || dst_h == 0 {
        return (0, 0, src_w, src_h);
    }

    // Compare aspects via cross-multiplication in u64 — no float drift.
    if (src_w as u64) * (dst_h as u64) > (src_h as u64) * (dst_w as u64) {
        // Source is wider than the destination: crop left/right.
        let crop_w = (((src_h as u64) * (dst_w as u64)) / (dst_h as u64)).max(1) as u32;
        let x = (src_w - crop_w.min(src_w)) / 2;
        (x, 0, crop_w.min(src_w), src_h)
    } else {
        // Source is taller (or equal): crop top/bottom.
        let crop_h = (((src_w as u64) * (dst_h as u64)) / (dst_w as u64)).max(1) as u32;
        let y = (src_h - crop_h.min(src_h)) / 2;
        (0, y, src_w, crop_h.min(src_h))
    }
}

/// Cover-crop `src` to the destination aspect, then scale to exactly
/// `dst_w`×`dst_h`. Identity when the source already matches.
fn cover_resize(src: &RgbaImage, dst_w: u32, dst_h: u32) -> RgbaImage {
    if src.dimensions() == (dst_w, dst_h) {
        return src.clone();
    }
    let (x, y, w, h) = cover_crop(src.width(), src.height(), dst_w, dst_h);
    let cropped = imageops::crop_imm(src, x, y, w, h).to_image();
    if cropped.dimensions() == (dst_w, dst_h) {
        return cropped;
    }
    imageops::resize(&cropped, dst_w, dst_h, imageops::FilterType::Triangle)
}

/// Compose the split comparison: dark full-bleed, light over the columns
/// in `[0, position%)`, divider line at the boundary.
///
/// `position` is a percent and is clamped to `[0, 100]`; at the extremes
/// the output is purely one image and no divider is drawn.
pub fn compose_split(light: &RgbaImage, dark: &RgbaImage, position: f32) -> RgbaImage {
    let (w, h) = dark.dimensions();
    let position = position.clamp(0.0, 100.0);
    let split_x = ((w as f32) * position / 100.0).round() as u32;
    let split_x = split_x.min(w);

    let mut out = dark.clone();
    if w == 0 || h == 0 {
        return out;
    }

    if split_x > 0 {
        let light_cover = cover_resize(light, w, h);
        let row_bytes = w as usize * 4;
        let split_bytes = split_x as usize * 4;

        let out_slice: &mut [u8] = &mut out;
        out_slice
            .par_chunks_exact_mut(row_bytes)
            .zip(light_cover.as_raw().par_chunks_exact(row_bytes))
            .for_each(|(dst_row, src_row)| {
                dst_row[..split_bytes].copy_from_slice(&src_row[..split_bytes]);
            });
    }

    // No divider at 0/100 — the output is a single image there.
    if split_x > 0 && split_x < w {
        let x0 = split_x.saturating_sub(DIVIDER_WIDTH / 2);
        let x1 = (x0 + DIVIDER_WIDTH).min(w);
        for y in 0..h {
            for x in x0..x1 {
                out.put_pixel(x, y, DIVIDER_COLOR);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, rgba: [u8; 4]) -> RgbaImage {
        let mut img = RgbaImage::new(w, h);
        for p in img.pixels_mut() {
            *p = Rgba(rgba);
        }
        img
    }

    const LIGHT: [u8; 4] = [240, 240, 240, 255];
    const DARK: [u8; 4] = [20, 20, 20, 255];

    #[test]
    fn test_position_zero_is_pure_dark() {
        let out = compose_split(&solid(8, 4, LIGHT), &solid(8, 4, DARK), 0.0);
        assert_eq!(out, solid(8, 4, DARK));
    }

    #[test]
    fn test_position_hundred_is_pure_light() {
        let out = compose_split(&solid(8, 4, LIGHT), &solid(8, 4, DARK), 100.0);
        assert_eq!(out, solid(8, 4, LIGHT));
    }

    #[test]
    fn test_split_column_boundary() {
        // 10 % of 400 columns → light in [0, 40), dark from 40 on
        let out = compose_split(&solid(400, 2, LIGHT), &solid(400, 2, DARK), 10.0);
        assert_eq!(out.get_pixel(0, 0).0, LIGHT);
        assert_eq!(out.get_pixel(38, 0).0, LIGHT);
        // columns 39..41 hold the divider
        assert_eq!(out.get_pixel(39, 0).0, [255, 255, 255, 255]);
        assert_eq!(out.get_pixel(40, 0).0, [255, 255, 255, 255]);
        assert_eq!(out.get_pixel(41, 0).0, DARK);
        assert_eq!(out.get_pixel(399, 1).0, DARK);
    }

    #[test]
    fn test_output_has_dark_dimensions() {
        let out = compose_split(&solid(100, 80, LIGHT), &solid(64, 32, DARK), 50.0);
        assert_eq!(out.dimensions(), (64, 32));
    }

    #[test]
    fn test_out_of_range_position_is_clamped() {
        let out = compose_split(&solid(8, 4, LIGHT), &solid(8, 4, DARK), 250.0);
        assert_eq!(out, solid(8, 4, LIGHT));
        let out = compose_split(&solid(8, 4, LIGHT), &solid(8, 4, DARK), -3.0);
        assert_eq!(out, solid(8, 4, DARK));
    }

    #[test]
    fn test_cover_crop_wide_source() {
        // 200×100 source into a square destination: crop left/right, centered
        assert_eq!(cover_crop(200, 100, 100, 100), (50, 0, 100, 100));
    }

    #[test]
    fn test_cover_crop_tall_source() {
        // 100×200 source into a square destination: crop top/bottom, centered
        assert_eq!(cover_crop(100, 200, 100, 100), (0, 50, 100, 100));
    }

    #[test]
    fn test_cover_crop_matching_aspect_is_full_frame() {
        assert_eq!(cover_crop(1920, 1080, 960, 540), (0, 0, 1920, 1080));
    }

    #[test]
    fn test_cover_crop_never_exceeds_source() {
        for &(sw, sh, dw, dh) in &[(3u32, 7u32, 16u32, 9u32), (7, 3, 9, 16), (1, 1, 1000, 1)] {
            let (x, y, w, h) = cover_crop(sw, sh, dw, dh);
            assert!(x + w <= sw, "{sw}x{sh} -> {dw}x{dh}");
            assert!(y + h <= sh, "{sw}x{sh} -> {dw}x{dh}");
            assert!(w >= 1 && h >= 1);
        }
    }
}

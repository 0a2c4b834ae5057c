//! Image slot state — one optional image per theme, plus the per-theme
//! validation error shown under the slot card.

use std::path::{Path, PathBuf};

use eframe::egui;
use egui::{ColorImage, TextureFilter, TextureOptions};
use image::RgbaImage;

use crate::io::{content_type_for, is_image_content_type, load_image};

/// The two display modes an image can belong to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Light, Theme::Dark];

    /// Stable lowercase key, used for texture names and CLI output.
    pub fn key(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Localised display label ("Light mode" / "Mode clair").
    pub fn label(&self) -> String {
        match self {
            Theme::Light => t!("slot.light"),
            Theme::Dark => t!("slot.dark"),
        }
    }
}

/// Why a selection attempt was rejected. Transient — recomputed on every
/// attempt, cleared on success or removal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotError {
    /// The candidate's declared content type is not `image/...`.
    InvalidType,
    /// The declared type was an image but the decoder rejected the data.
    Decode(String),
}

impl SlotError {
    /// Localised inline message for the slot card.
    pub fn display_message(&self) -> String {
        match self {
            SlotError::InvalidType => t!("slot.error.invalid_type"),
            SlotError::Decode(reason) => t!("slot.error.decode", error = reason),
        }
    }
}

/// A populated slot: the source file, its decoded pixels, and the texture
/// the preview draws. The texture handle is owned exclusively by this
/// struct — replacing or removing the slot drops it, which releases the
/// texture from egui's texture manager.
pub struct SlotImage {
    pub path: PathBuf,
    pub file_name: String,
    pub pixels: RgbaImage,
    texture: egui::TextureHandle,
}

impl SlotImage {
    fn create(ctx: &egui::Context, theme: Theme, path: &Path) -> Result<Self, SlotError> {
        let pixels = load_image(path).map_err(SlotError::Decode)?;

        let color_image = ColorImage::from_rgba_unmultiplied(
            [pixels.width() as usize, pixels.height() as usize],
            pixels.as_raw(),
        );
        let texture = ctx.load_texture(
            format!("slot_{}", theme.key()),
            color_image,
            TextureOptions {
                magnification: TextureFilter::Linear,
                minification: TextureFilter::Linear,
                ..Default::default()
            },
        );

        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            pixels,
            texture,
        })
    }

    pub fn texture_id(&self) -> egui::TextureId {
        self.texture.id()
    }

    /// Source dimensions in pixels (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }
}

/// Holds the two slots and their per-theme errors.
#[derive(Default)]
pub struct SlotManager {
    light: Option<SlotImage>,
    dark: Option<SlotImage>,
    light_error: Option<SlotError>,
    dark_error: Option<SlotError>,
}

impl SlotManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, theme: Theme) -> Option<&SlotImage> {
        match theme {
            Theme::Light => self.light.as_ref(),
            Theme::Dark => self.dark.as_ref(),
        }
    }

    pub fn error(&self, theme: Theme) -> Option<&SlotError> {
        match theme {
            Theme::Light => self.light_error.as_ref(),
            Theme::Dark => self.dark_error.as_ref(),
        }
    }

    pub fn any_populated(&self) -> bool {
        self.light.is_some() || self.dark.is_some()
    }

    pub fn both_populated(&self) -> bool {
        self.light.is_some() && self.dark.is_some()
    }

    /// Try to place `path` into the slot for `theme`.
    ///
    /// Accepted iff the declared content type is `image/...` and the file
    /// decodes. On rejection the existing slot (if any) is left untouched
    /// and the theme's error is set; the other theme is never affected.
    pub fn select_image(&mut self, ctx: &egui::Context, theme: Theme, path: &Path) {
        let declared = content_type_for(path);
        if !declared.is_some_and(is_image_content_type) {
            log_warn!(
                "rejected {} for {} slot: declared type {:?}",
                path.display(),
                theme.key(),
                declared
            );
            *self.error_mut(theme) = Some(SlotError::InvalidType);
            return;
        }

        match SlotImage::create(ctx, theme, path) {
            Ok(img) => {
                let (w, h) = img.dimensions();
                log_info!("{} slot <- {} ({}x{})", theme.key(), path.display(), w, h);
                // Old SlotImage (and its texture handle) dropped here.
                *self.slot_mut(theme) = Some(img);
                *self.error_mut(theme) = None;
            }
            Err(e) => {
                log_err!("decode failed for {}: {:?}", path.display(), e);
                *self.error_mut(theme) = Some(e);
            }
        }
    }

    /// Clear the slot and its error. Idempotent.
    pub fn remove_image(&mut self, theme: Theme) {
        if self.slot(theme).is_some() {
            log_info!("{} slot cleared", theme.key());
        }
        *self.slot_mut(theme) = None;
        *self.error_mut(theme) = None;
    }

    fn slot_mut(&mut self, theme: Theme) -> &mut Option<SlotImage> {
        match theme {
            Theme::Light => &mut self.light,
            Theme::Dark => &mut self.dark,
        }
    }

    fn error_mut(&mut self, theme: Theme) -> &mut Option<SlotError> {
        match theme {
            Theme::Light => &mut self.light_error,
            Theme::Dark => &mut self.dark_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Write a tiny valid PNG and return its path.
    fn temp_png(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        img.save(&path).unwrap();
        path
    }

    fn temp_file(name: &str, content: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_select_valid_image_populates_slot_and_clears_error() {
        crate::i18n::init();
        let ctx = egui::Context::default();
        let mut slots = SlotManager::new();
        let png = temp_png("themesplit_slots_valid.png");

        slots.select_image(&ctx, Theme::Light, &png);
        assert!(slots.slot(Theme::Light).is_some());
        assert!(slots.error(Theme::Light).is_none());
        // The other theme is untouched
        assert!(slots.slot(Theme::Dark).is_none());

        let _ = std::fs::remove_file(&png);
    }

    #[test]
    fn test_select_non_image_sets_error_and_keeps_slot() {
        crate::i18n::init();
        let ctx = egui::Context::default();
        let mut slots = SlotManager::new();
        let png = temp_png("themesplit_slots_keep.png");
        let txt = temp_file("themesplit_slots_reject.txt", b"not an image");

        slots.select_image(&ctx, Theme::Dark, &png);
        slots.select_image(&ctx, Theme::Dark, &txt);

        // Slot still holds the previously accepted image
        let slot = slots.slot(Theme::Dark).expect("slot should survive");
        assert!(slot.file_name.ends_with(".png"));
        assert_eq!(slots.error(Theme::Dark), Some(&SlotError::InvalidType));
        assert!(!slots.error(Theme::Dark).unwrap().display_message().is_empty());

        let _ = std::fs::remove_file(&png);
        let _ = std::fs::remove_file(&txt);
    }

    #[test]
    fn test_select_into_empty_slot_with_non_image_leaves_it_empty() {
        crate::i18n::init();
        let ctx = egui::Context::default();
        let mut slots = SlotManager::new();
        let txt = temp_file("themesplit_slots_empty_reject.txt", b"plain text");

        slots.select_image(&ctx, Theme::Dark, &txt);
        assert!(slots.slot(Theme::Dark).is_none());
        assert_eq!(slots.error(Theme::Dark), Some(&SlotError::InvalidType));

        let _ = std::fs::remove_file(&txt);
    }

    #[test]
    fn test_decode_failure_sets_error_and_keeps_slot_untouched() {
        crate::i18n::init();
        let ctx = egui::Context::default();
        let mut slots = SlotManager::new();
        let bad = temp_file("themesplit_slots_garbage.png", b"\x89PNG but not really");

        slots.select_image(&ctx, Theme::Light, &bad);
        assert!(slots.slot(Theme::Light).is_none());
        assert!(matches!(slots.error(Theme::Light), Some(SlotError::Decode(_))));

        let _ = std::fs::remove_file(&bad);
    }

    #[test]
    fn test_remove_is_idempotent_and_clears_error() {
        crate::i18n::init();
        let ctx = egui::Context::default();
        let mut slots = SlotManager::new();
        let png = temp_png("themesplit_slots_remove.png");
        let txt = temp_file("themesplit_slots_remove.txt", b"x");

        slots.select_image(&ctx, Theme::Light, &png);
        slots.select_image(&ctx, Theme::Light, &txt); // leaves slot, sets error

        slots.remove_image(Theme::Light);
        assert!(slots.slot(Theme::Light).is_none());
        assert!(slots.error(Theme::Light).is_none());

        // Removing again changes nothing
        slots.remove_image(Theme::Light);
        assert!(slots.slot(Theme::Light).is_none());
        assert!(slots.error(Theme::Light).is_none());

        let _ = std::fs::remove_file(&png);
        let _ = std::fs::remove_file(&txt);
    }

    #[test]
    fn test_populated_flags() {
        crate::i18n::init();
        let ctx = egui::Context::default();
        let mut slots = SlotManager::new();
        assert!(!slots.any_populated());
        assert!(!slots.both_populated());

        let png = temp_png("themesplit_slots_flags.png");
        slots.select_image(&ctx, Theme::Light, &png);
        assert!(slots.any_populated());
        assert!(!slots.both_populated());

        slots.select_image(&ctx, Theme::Dark, &png);
        assert!(slots.both_populated());

        let _ = std::fs::remove_file(&png);
    }
}

use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageError, RgbaImage};
use rfd::FileDialog;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Raster extensions offered in the open dialogs (lowercase).
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "webp", "bmp", "tga", "gif", "ico", "tiff", "tif",
];

// ============================================================================
// DECLARED CONTENT TYPE
// ============================================================================
//
// The filesystem carries no MIME header, so the declared content type of a
// candidate file is derived from its extension — the native equivalent of the
// `File.type` string a browser reports. A slot accepts a candidate iff this
// type starts with "image/".

/// Declared content type for a path, from its extension.
/// Returns `None` for unknown or missing extensions.
pub fn content_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    let content_type = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tga" => "image/x-tga",
        "gif" => "image/gif",
        "ico" => "image/vnd.microsoft.icon",
        "tiff" | "tif" => "image/tiff",
        "svg" => "image/svg+xml",
        "txt" | "md" | "log" => "text/plain",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        _ => return None,
    };
    Some(content_type)
}

/// True when a declared content type names an image.
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type.starts_with("image/")
}

// ============================================================================
// LOADING / SAVING
// ============================================================================

/// Decode an image file to 8-bit RGBA.
pub fn load_image(path: &Path) -> Result<RgbaImage, String> {
    let img = image::open(path).map_err(|e| e.to_string())?;
    Ok(img.to_rgba8())
}

/// Output formats for the exported comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveFormat {
    Png,
    Jpeg,
    Webp,
    Bmp,
}

impl SaveFormat {
    /// Canonical file extension for the format.
    pub fn extension(&self) -> &'static str {
        match self {
            SaveFormat::Png => "png",
            SaveFormat::Jpeg => "jpg",
            SaveFormat::Webp => "webp",
            SaveFormat::Bmp => "bmp",
        }
    }

    /// Parse a user-supplied format name. Unknown names map to PNG.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "jpeg" | "jpg" => SaveFormat::Jpeg,
            "webp" => SaveFormat::Webp,
            "bmp" => SaveFormat::Bmp,
            _ => SaveFormat::Png,
        }
    }

    /// Infer the format from a path's extension, defaulting to PNG.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        Self::from_name(&ext)
    }
}

/// Encode `image` and write it to `path` in the given format.
/// `quality` applies to JPEG only (1–100).
pub fn encode_and_write(
    image: &RgbaImage,
    path: &Path,
    format: SaveFormat,
    quality: u8,
) -> Result<(), ImageError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    match format {
        SaveFormat::Png => {
            let encoder = PngEncoder::new(&mut writer);
            #[allow(deprecated)]
            encoder.encode(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ColorType::Rgba8,
            )?;
        }
        SaveFormat::Jpeg => {
            // JPEG has no alpha channel
            let rgb_image = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            let mut encoder = JpegEncoder::new_with_quality(&mut writer, quality);
            encoder.encode(
                rgb_image.as_raw(),
                rgb_image.width(),
                rgb_image.height(),
                image::ColorType::Rgb8,
            )?;
        }
        SaveFormat::Webp => {
            let dyn_img = DynamicImage::ImageRgba8(image.clone());
            dyn_img.save(path)?;
        }
        SaveFormat::Bmp => {
            let mut encoder = BmpEncoder::new(&mut writer);
            encoder.encode(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ColorType::Rgba8,
            )?;
        }
    }

    Ok(())
}

// ============================================================================
// FILE HANDLER
// ============================================================================

/// Native file dialogs for picking slot images and exporting the comparison.
pub struct FileHandler {
    /// Directory of the most recently picked file, reused as the next
    /// dialog's starting point.
    pub last_dir: Option<PathBuf>,
}

impl Default for FileHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl FileHandler {
    pub fn new() -> Self {
        Self { last_dir: None }
    }

    /// Show a native open dialog filtered to image files.
    /// Returns the picked path without loading it.
    pub fn pick_image_path(&mut self, title: &str) -> Option<PathBuf> {
        let mut dialog = FileDialog::new()
            .set_title(title)
            .add_filter("Images", IMAGE_EXTENSIONS)
            .add_filter("All Files", &["*"]);
        if let Some(dir) = &self.last_dir {
            dialog = dialog.set_directory(dir);
        }
        let path = dialog.pick_file()?;
        self.last_dir = path.parent().map(Path::to_path_buf);
        Some(path)
    }

    /// Show a native save dialog for the exported comparison.
    /// The format is inferred from the extension the user picks.
    pub fn pick_export_path(&mut self, title: &str) -> Option<PathBuf> {
        let mut dialog = FileDialog::new()
            .set_title(title)
            .set_file_name("comparison.png")
            .add_filter("PNG", &["png"])
            .add_filter("JPEG", &["jpg", "jpeg"])
            .add_filter("WebP", &["webp"])
            .add_filter("BMP", &["bmp"]);
        if let Some(dir) = &self.last_dir {
            dialog = dialog.set_directory(dir);
        }
        let path = dialog.save_file()?;
        self.last_dir = path.parent().map(Path::to_path_buf);
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for_images() {
        assert_eq!(content_type_for(Path::new("a.png")), Some("image/png"));
        assert_eq!(content_type_for(Path::new("b.JPG")), Some("image/jpeg"));
        assert_eq!(content_type_for(Path::new("shot.webp")), Some("image/webp"));
    }

    #[test]
    fn test_content_type_for_non_images() {
        assert_eq!(content_type_for(Path::new("notes.txt")), Some("text/plain"));
        assert_eq!(content_type_for(Path::new("doc.pdf")), Some("application/pdf"));
        assert_eq!(content_type_for(Path::new("mystery.xyz")), None);
        assert_eq!(content_type_for(Path::new("no_extension")), None);
    }

    #[test]
    fn test_is_image_content_type() {
        assert!(is_image_content_type("image/png"));
        assert!(is_image_content_type("image/vnd.microsoft.icon"));
        assert!(!is_image_content_type("text/plain"));
        assert!(!is_image_content_type("application/octet-stream"));
    }

    #[test]
    fn test_save_format_parsing() {
        assert_eq!(SaveFormat::from_name("jpeg"), SaveFormat::Jpeg);
        assert_eq!(SaveFormat::from_name("JPG"), SaveFormat::Jpeg);
        assert_eq!(SaveFormat::from_name("webp"), SaveFormat::Webp);
        assert_eq!(SaveFormat::from_name("something"), SaveFormat::Png);
        assert_eq!(SaveFormat::from_path(Path::new("out.bmp")), SaveFormat::Bmp);
        assert_eq!(SaveFormat::from_path(Path::new("out")), SaveFormat::Png);
    }

    #[test]
    fn test_encode_and_load_round_trip() {
        let mut img = RgbaImage::new(4, 3);
        for p in img.pixels_mut() {
            *p = image::Rgba([10, 200, 30, 255]);
        }
        let path = std::env::temp_dir().join("themesplit_io_test.png");
        encode_and_write(&img, &path, SaveFormat::Png, 90).unwrap();
        let back = load_image(&path).unwrap();
        assert_eq!(back.dimensions(), (4, 3));
        assert_eq!(back.get_pixel(0, 0).0, [10, 200, 30, 255]);
        let _ = std::fs::remove_file(&path);
    }
}

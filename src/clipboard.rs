//! System clipboard — copy the composited comparison to the OS (arboard).

use image::RgbaImage;

/// Write an RGBA image to the system clipboard.
/// Returns false when the clipboard is unavailable or refuses the image.
pub fn copy_to_system_clipboard(img: &RgbaImage) -> bool {
    // arboard wants ImageData { width, height, bytes: Cow<[u8]> } in RGBA order.
    match arboard::Clipboard::new() {
        Ok(mut clip) => {
            let data = arboard::ImageData {
                width: img.width() as usize,
                height: img.height() as usize,
                bytes: std::borrow::Cow::Borrowed(img.as_raw()),
            };
            match clip.set_image(data) {
                Ok(()) => true,
                Err(e) => {
                    log_warn!("clipboard copy failed: {}", e);
                    false
                }
            }
        }
        Err(e) => {
            log_warn!("clipboard unavailable: {}", e);
            false
        }
    }
}

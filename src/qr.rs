use std::path::Path;

use eframe::egui::ColorImage;
use image::{ImageFormat, Rgba, RgbaImage};
use qrcode::types::QrError as EncodeError;
use qrcode::{Color, EcLevel, QrCode};
use thiserror::Error;
use tracing::debug;

/// pixels per QR module
pub const BOX_SIZE: u32 = 10;
/// light modules around the symbol
pub const BORDER: u32 = 5;

const DARK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const LIGHT: Rgba<u8> = Rgba([255, 255, 255, 255]);

#[derive(Error, Debug)]
pub enum QrError {
    #[error("{0}")]
    Encode(EncodeError),

    #[error("could not save QR image: {0}")]
    Save(#[from] image::ImageError),
}

/// rasterised QR symbol, black modules on white
pub struct QrBitmap {
    data: String,
    modules: u32,
    image: RgbaImage,
}

impl QrBitmap {
    /// text encoded in the symbol
    pub fn data(&self) -> &str {
        &self.data
    }

    /// modules per side, excluding the border
    pub fn modules(&self) -> u32 {
        self.modules
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// whether module (x, y) of the symbol is dark; border not included
    #[cfg(test)]
    pub fn is_dark(&self, x: u32, y: u32) -> bool {
        let px = (x + BORDER) * BOX_SIZE;
        let py = (y + BORDER) * BOX_SIZE;
        *self.image.get_pixel(px, py) == DARK
    }

    pub fn to_color_image(&self) -> ColorImage {
        let size = [self.image.width() as usize, self.image.height() as usize];
        ColorImage::from_rgba_unmultiplied(size, self.image.as_raw())
    }

    pub fn save_png(&self, path: &Path) -> Result<(), QrError> {
        self.image.save_with_format(path, ImageFormat::Png)?;
        debug!(path = %path.display(), "QR image saved");
        Ok(())
    }
}

/// Encode `link` at error correction level M in the smallest version that fits,
/// then draw it with fixed module and border sizes.
pub fn generate(link: &str) -> Result<QrBitmap, QrError> {
    profiling::scope!("qr_generate");
    let code = QrCode::with_error_correction_level(link.as_bytes(), EcLevel::M)
        .map_err(QrError::Encode)?;

    let modules = code.width() as u32;
    let side = (modules + 2 * BORDER) * BOX_SIZE;
    let mut image = RgbaImage::from_pixel(side, side, LIGHT);

    let colors = code.to_colors();
    for y in 0..modules {
        for x in 0..modules {
            if colors[(y * modules + x) as usize] != Color::Dark {
                continue;
            }
            let x0 = (x + BORDER) * BOX_SIZE;
            let y0 = (y + BORDER) * BOX_SIZE;
            for py in y0..y0 + BOX_SIZE {
                for px in x0..x0 + BOX_SIZE {
                    image.put_pixel(px, py, DARK);
                }
            }
        }
    }

    debug!(modules, side, version = ?code.version(), "QR code rendered");
    Ok(QrBitmap {
        data: link.to_owned(),
        modules,
        image,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmap_matches_encoded_modules() {
        let link = "https://file.io/abc123";
        let bitmap = generate(link).unwrap();
        assert_eq!(bitmap.data(), link);

        let code = QrCode::with_error_correction_level(link.as_bytes(), EcLevel::M).unwrap();
        let width = code.width() as u32;
        assert_eq!(bitmap.modules(), width);

        let colors = code.to_colors();
        for y in 0..width {
            for x in 0..width {
                let dark = colors[(y * width + x) as usize] == Color::Dark;
                assert_eq!(bitmap.is_dark(x, y), dark, "module ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_fixed_geometry() {
        let bitmap = generate("https://file.io/abc123").unwrap();
        let side = (bitmap.modules() + 2 * BORDER) * BOX_SIZE;
        assert_eq!(bitmap.image().dimensions(), (side, side));

        // border is white, finder pattern corner is black
        assert_eq!(*bitmap.image().get_pixel(0, 0), LIGHT);
        assert_eq!(*bitmap.image().get_pixel(BORDER * BOX_SIZE - 1, BORDER * BOX_SIZE - 1), LIGHT);
        assert_eq!(*bitmap.image().get_pixel(BORDER * BOX_SIZE, BORDER * BOX_SIZE), DARK);
        assert!(bitmap.is_dark(0, 0));
    }

    #[test]
    fn test_short_text_uses_version_one() {
        let bitmap = generate("hi").unwrap();
        assert_eq!(bitmap.modules(), 21);
        assert_eq!(bitmap.image().width(), 310);
    }

    #[test]
    fn test_oversized_text_fails() {
        let huge = "a".repeat(4000);
        assert!(matches!(generate(&huge), Err(QrError::Encode(_))));
    }

    #[test]
    fn test_color_image_size() {
        let bitmap = generate("https://file.io/abc123").unwrap();
        let img = bitmap.to_color_image();
        assert_eq!(img.size, [bitmap.image().width() as usize, bitmap.image().height() as usize]);
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qr.png");
        let bitmap = generate("https://file.io/abc123").unwrap();
        bitmap.save_png(&path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}

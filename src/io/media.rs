// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image file loading.
//!
//! This module decodes image files into RGBA pixels suitable for upload as
//! an egui texture, shrinking images the GPU cannot hold in one texture.

use anyhow::{Context, Result};
use image::imageops::FilterType;
use std::path::Path;

/// Extensions offered by the image file dialog.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "webp", "tif", "tiff"];

/// A decoded image, at native resolution unless shrunk by [`fit_texture`].
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    /// Unpremultiplied RGBA8, row major.
    pub pixels: Vec<u8>,
}

/// Decode an image file.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    load_image_from_memory(&bytes).with_context(|| format!("Unsupported image {}", path.display()))
}

/// Decode an image from memory, guessing the format from its contents.
pub fn load_image_from_memory(bytes: &[u8]) -> Result<LoadedImage> {
    let rgba = image::load_from_memory(bytes)
        .context("Failed to decode image data")?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(LoadedImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// Shrink `loaded` so that neither side exceeds `max_side`, keeping its
/// aspect ratio. Images that already fit are returned unchanged.
pub fn fit_texture(loaded: LoadedImage, max_side: usize) -> Result<LoadedImage> {
    let longest = loaded.width.max(loaded.height) as usize;
    if longest <= max_side {
        return Ok(loaded);
    }

    let factor = max_side as f64 / longest as f64;
    let limit = max_side.max(1) as u32;
    let width = ((loaded.width as f64 * factor) as u32).clamp(1, limit);
    let height = ((loaded.height as f64 * factor) as u32).clamp(1, limit);
    log::info!(
        "Downscaling {}x{} image to {}x{} for display (max texture side {})",
        loaded.width,
        loaded.height,
        width,
        height,
        max_side
    );

    let buffer = image::RgbaImage::from_raw(loaded.width, loaded.height, loaded.pixels)
        .context("Pixel buffer does not match image size")?;
    let resized = image::imageops::resize(&buffer, width, height, FilterType::Triangle);
    Ok(LoadedImage {
        width,
        height,
        pixels: resized.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_decodes_png_to_rgba() {
        let source = image::RgbImage::from_pixel(4, 3, image::Rgb([10, 20, 30]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(source)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let loaded = load_image_from_memory(&bytes).unwrap();
        assert_eq!((loaded.width, loaded.height), (4, 3));
        assert_eq!(loaded.pixels.len(), 4 * 3 * 4);
        assert_eq!(&loaded.pixels[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(load_image_from_memory(b"definitely not an image").is_err());
        assert!(load_image(Path::new("/no/such/image.png")).is_err());
    }

    fn solid(width: u32, height: u32) -> LoadedImage {
        LoadedImage {
            width,
            height,
            pixels: vec![200; (width * height * 4) as usize],
        }
    }

    #[test]
    fn test_fit_texture_keeps_small_images() {
        let fitted = fit_texture(solid(64, 32), 64).unwrap();
        assert_eq!((fitted.width, fitted.height), (64, 32));
        assert_eq!(fitted.pixels.len(), 64 * 32 * 4);
    }

    #[test]
    fn test_fit_texture_shrinks_longest_side() {
        let fitted = fit_texture(solid(400, 100), 64).unwrap();
        assert_eq!((fitted.width, fitted.height), (64, 16));
        assert_eq!(fitted.pixels.len(), 64 * 16 * 4);
        assert_eq!(&fitted.pixels[..4], &[200, 200, 200, 200]);

        let tall = fit_texture(solid(10, 3000), 100).unwrap();
        assert_eq!((tall.width, tall.height), (1, 100));
    }

    #[test]
    fn test_fit_texture_rejects_short_buffer() {
        let broken = LoadedImage {
            width: 100,
            height: 100,
            pixels: vec![0; 16],
        };
        assert!(fit_texture(broken, 10).is_err());
    }
}

// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides conversions from normalized center-size boxes to
//! pixel corner coordinates.

/// Convert a normalized `(x_center, y_center, width, height)` box to pixel
/// corners `(x_min, y_min, x_max, y_max)` for an image of the given size.
pub fn denormalize_center_box(
    x_center: f64,
    y_center: f64,
    width: f64,
    height: f64,
    image_width: u32,
    image_height: u32,
) -> (f64, f64, f64, f64) {
    let (w, h) = (image_width as f64, image_height as f64);
    (
        (x_center - width / 2.0) * w,
        (y_center - height / 2.0) * h,
        (x_center + width / 2.0) * w,
        (y_center + height / 2.0) * h,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_image_box() {
        let (x0, y0, x1, y1) = denormalize_center_box(0.5, 0.5, 1.0, 1.0, 1920, 1080);
        assert_eq!((x0, y0, x1, y1), (0.0, 0.0, 1920.0, 1080.0));
    }

    #[test]
    fn test_off_center_box() {
        let (x0, y0, x1, y1) = denormalize_center_box(0.25, 0.75, 0.5, 0.5, 100, 200);
        assert!((x0 - 0.0).abs() < 1e-9);
        assert!((y0 - 100.0).abs() < 1e-9);
        assert!((x1 - 50.0).abs() < 1e-9);
        assert!((y1 - 200.0).abs() < 1e-9);
    }
}

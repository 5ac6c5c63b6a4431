// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Canvas scene construction.
//!
//! [`build_scene`] describes one frame of the annotation canvas as a list of
//! primitives in image space, plus the viewport transform that maps them to
//! the canvas. It does no drawing itself, so the layout rules can be
//! checked without a GPU context; [`super::canvas`] paints the result.

use crate::config::ViewerSettings;
use crate::models::annotation::{Point, RectAnnotation};
use crate::models::viewport::Viewport;

/// Axis-aligned rectangle in image space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn from_min_size(min: Point, width: f32, height: f32) -> Self {
        Self {
            min,
            max: Point::new(min.x + width, min.y + height),
        }
    }
}

/// Fill/stroke colour slot, resolved against the settings when painting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    Box,
    LabelText,
}

/// One drawing primitive. Widths and sizes are in image space and shrink as
/// the zoom grows, so that they come out constant on screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Image { rect: Rect },
    StrokeRect { rect: Rect, width: f32, ink: Ink },
    FillRect { rect: Rect, ink: Ink },
    /// Text anchored at its left baseline
    Text { pos: Point, size: f32, text: String, ink: Ink },
}

/// A frame ready to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Canvas size, equal to the image's native size
    pub canvas_size: (f32, f32),
    pub viewport: Viewport,
    /// Primitives in draw order
    pub primitives: Vec<Primitive>,
}

/// Layout the canvas for the current image, annotations and viewport.
///
/// `measure(text, font_size)` returns the width of `text` in image units
/// when set at `font_size` image units.
pub fn build_scene(
    image_size: (u32, u32),
    annotations: &[RectAnnotation],
    viewport: &Viewport,
    settings: &ViewerSettings,
    measure: impl Fn(&str, f32) -> f32,
) -> Scene {
    let (w, h) = (image_size.0 as f32, image_size.1 as f32);
    let scale = viewport.scale;
    let stroke = settings.stroke_width / scale;
    let font = settings.font_size / scale;
    let label_height = settings.label_height / scale;
    let padding = settings.label_padding / scale;

    let mut primitives = Vec::with_capacity(1 + annotations.len() * 3);
    primitives.push(Primitive::Image {
        rect: Rect::from_min_size(Point::ZERO, w, h),
    });

    for ann in annotations {
        let min = Point::new(ann.x_min() as f32, ann.y_min() as f32);
        primitives.push(Primitive::StrokeRect {
            rect: Rect::from_min_size(min, ann.width() as f32, ann.height() as f32),
            width: stroke,
            ink: Ink::Box,
        });

        let label_width = measure(ann.label(), font) + 2.0 * padding;
        primitives.push(Primitive::FillRect {
            rect: Rect::from_min_size(
                Point::new(min.x, min.y - label_height),
                label_width,
                label_height,
            ),
            ink: Ink::Box,
        });
        primitives.push(Primitive::Text {
            pos: Point::new(min.x + padding, min.y - padding),
            size: font,
            text: ann.label().to_string(),
            ink: Ink::LabelText,
        });
    }

    Scene {
        canvas_size: (w, h),
        viewport: *viewport,
        primitives,
    }
}

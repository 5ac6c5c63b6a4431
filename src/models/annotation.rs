// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data structures.
//!
//! This module defines the labeled rectangles every annotation format is
//! reduced to, and the description of the image they belong to.

use crate::error::ParseError;
use std::ops::{Add, Sub};

/// A 2D point or displacement in canvas pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// An axis-aligned labeled box in source-image pixel coordinates.
///
/// Fields are private so the ordering invariant (`x_min <= x_max`,
/// `y_min <= y_max`, all finite) holds for every value in circulation.
#[derive(Debug, Clone, PartialEq)]
pub struct RectAnnotation {
    label: String,
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
}

impl RectAnnotation {
    /// Create an annotation from corner coordinates.
    pub fn new(
        label: impl Into<String>,
        x_min: f64,
        y_min: f64,
        x_max: f64,
        y_max: f64,
    ) -> Result<Self, ParseError> {
        let label = label.into();
        if ![x_min, y_min, x_max, y_max].iter().all(|v| v.is_finite()) {
            return Err(ParseError::invalid_box(label, "coordinates must be finite"));
        }
        if x_min > x_max || y_min > y_max {
            return Err(ParseError::invalid_box(
                label,
                format!("inverted corners ({x_min}, {y_min}) - ({x_max}, {y_max})"),
            ));
        }
        Ok(Self {
            label,
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Create an annotation from a top-left corner and a size.
    pub fn from_xywh(
        label: impl Into<String>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<Self, ParseError> {
        Self::new(label, x, y, x + width, y + height)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Corners as `(x_min, y_min, x_max, y_max)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        (self.x_min, self.y_min, self.x_max, self.y_max)
    }
}

/// The selected image as the parsers see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMeta {
    /// File name as selected by the user. May include directories.
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

impl ImageMeta {
    pub fn new(file_name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            file_name: file_name.into(),
            width,
            height,
        }
    }

    /// The final path component, accepting both `/` and `\` separators.
    pub fn base_name(&self) -> &str {
        self.file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.file_name)
    }
}

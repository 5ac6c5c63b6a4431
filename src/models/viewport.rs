// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pan and zoom state for the annotation canvas.
//!
//! [`Viewport`] holds the two controlled variables, [`PanZoom`] applies
//! pointer and slider events to it. Rendering composes the two as
//! translate-then-scale, so the offset lives in unscaled canvas pixels.

use super::annotation::Point;

/// Inclusive range the zoom slider may take.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleBounds {
    pub min: f32,
    pub max: f32,
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self { min: 0.1, max: 3.0 }
    }
}

impl ScaleBounds {
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// Current zoom and pan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub offset: Point,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Point::ZERO,
        }
    }
}

impl Viewport {
    /// Map a point in image space to canvas space.
    pub fn to_canvas(&self, p: Point) -> Point {
        Point::new(
            self.offset.x + p.x * self.scale,
            self.offset.y + p.y * self.scale,
        )
    }
}

/// Drag and slider handling on top of a [`Viewport`].
#[derive(Debug, Clone)]
pub struct PanZoom {
    viewport: Viewport,
    bounds: ScaleBounds,
    /// Pointer position minus offset at the moment the drag began.
    drag_start: Option<Point>,
}

impl PanZoom {
    pub fn new(bounds: ScaleBounds) -> Self {
        Self {
            viewport: Viewport::default(),
            bounds,
            drag_start: None,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn bounds(&self) -> ScaleBounds {
        self.bounds
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_start.is_some()
    }

    pub fn pointer_down(&mut self, pointer: Point) {
        self.drag_start = Some(pointer - self.viewport.offset);
    }

    pub fn pointer_move(&mut self, pointer: Point) {
        if let Some(start) = self.drag_start {
            self.viewport.offset = pointer - start;
        }
    }

    pub fn pointer_up(&mut self) {
        self.drag_start = None;
    }

    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    /// Set the zoom directly from the slider value.
    pub fn slider_change(&mut self, value: f32) {
        if !value.is_finite() {
            log::warn!("Ignoring non-finite zoom value {}", value);
            return;
        }
        self.viewport.scale = self.bounds.clamp(value);
        log::debug!("Zoom set to {:.2}", self.viewport.scale);
    }

    pub fn reset(&mut self) {
        self.viewport = Viewport::default();
        self.drag_start = None;
    }
}

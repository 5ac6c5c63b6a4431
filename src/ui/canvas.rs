// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for the image and its annotations.
//!
//! The canvas has the image's native size and is not resized to fit the
//! window; larger images scroll. Every frame the whole scene is repainted
//! through the viewport transform.

use super::scene::{build_scene, Ink, Primitive, Rect, Scene};
use crate::config::ViewerSettings;
use crate::models::annotation::{Point, RectAnnotation};
use crate::models::viewport::Viewport;

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    PointerLeave,
}

/// Display the canvas and report pointer interaction.
pub fn show(
    ui: &mut egui::Ui,
    texture: &egui::TextureHandle,
    image_size: (u32, u32),
    annotations: &[RectAnnotation],
    viewport: &Viewport,
    dragging: bool,
    settings: &ViewerSettings,
) -> CanvasAction {
    let mut action = CanvasAction::None;

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let size = egui::vec2(image_size.0 as f32, image_size.1 as f32);
            let (response, painter) = ui.allocate_painter(size, egui::Sense::drag());
            let origin = response.rect.min;

            let scene = build_scene(image_size, annotations, viewport, settings, |text, font_size| {
                // Measure at the on-screen size, then convert back to image units
                let galley = painter.layout_no_wrap(
                    text.to_owned(),
                    egui::FontId::proportional(font_size * viewport.scale),
                    egui::Color32::WHITE,
                );
                galley.size().x / viewport.scale
            });
            paint(&painter, origin, &scene, texture, settings);

            let local = |pos: egui::Pos2| Point::new(pos.x - origin.x, pos.y - origin.y);
            if response.drag_started() {
                if let Some(pos) = response.interact_pointer_pos() {
                    action = CanvasAction::PointerDown(local(pos));
                }
            } else if response.drag_stopped() {
                action = CanvasAction::PointerUp;
            } else if response.dragged() {
                let inside = ui
                    .ctx()
                    .pointer_latest_pos()
                    .is_some_and(|pos| response.rect.contains(pos));
                if !inside {
                    action = CanvasAction::PointerLeave;
                } else if let Some(pos) = response.interact_pointer_pos() {
                    action = CanvasAction::PointerMove(local(pos));
                }
            }

            let cursor = if dragging {
                egui::CursorIcon::Grabbing
            } else {
                egui::CursorIcon::Grab
            };
            response.on_hover_cursor(cursor);
        });

    action
}

/// Paint a scene with its origin at `origin`.
fn paint(
    painter: &egui::Painter,
    origin: egui::Pos2,
    scene: &Scene,
    texture: &egui::TextureHandle,
    settings: &ViewerSettings,
) {
    let vp = scene.viewport;
    let to_screen = |p: Point| {
        let c = vp.to_canvas(p);
        egui::pos2(origin.x + c.x, origin.y + c.y)
    };
    let to_screen_rect = |r: &Rect| egui::Rect::from_min_max(to_screen(r.min), to_screen(r.max));
    let color = |ink: Ink| {
        let [r, g, b] = match ink {
            Ink::Box => settings.box_color,
            Ink::LabelText => settings.label_text_color,
        };
        egui::Color32::from_rgb(r, g, b)
    };

    // Clear
    let canvas = egui::Rect::from_min_size(
        origin,
        egui::vec2(scene.canvas_size.0, scene.canvas_size.1),
    );
    painter.rect_filled(canvas, 0.0, egui::Color32::from_gray(40));

    for primitive in &scene.primitives {
        match primitive {
            Primitive::Image { rect } => {
                painter.image(
                    texture.id(),
                    to_screen_rect(rect),
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            Primitive::StrokeRect { rect, width, ink } => {
                painter.rect_stroke(
                    to_screen_rect(rect),
                    0.0,
                    egui::Stroke::new(width * vp.scale, color(*ink)),
                );
            }
            Primitive::FillRect { rect, ink } => {
                painter.rect_filled(to_screen_rect(rect), 0.0, color(*ink));
            }
            Primitive::Text { pos, size, text, ink } => {
                let galley = painter.layout_no_wrap(
                    text.clone(),
                    egui::FontId::proportional(size * vp.scale),
                    color(*ink),
                );
                let anchor = to_screen(*pos);
                let top = egui::pos2(anchor.x, anchor.y - baseline(&galley));
                painter.galley(top, galley, color(*ink));
            }
        }
    }
}

/// Distance from the top of a galley to the baseline of its first row.
fn baseline(galley: &egui::Galley) -> f32 {
    galley
        .rows
        .first()
        .and_then(|row| row.glyphs.first())
        .map_or(galley.size().y, |glyph| glyph.pos.y)
}

/// Placeholder shown before an image is chosen.
pub fn show_empty(ui: &mut egui::Ui, format_title: &str) {
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);
            ui.heading(
                egui::RichText::new(format_title)
                    .size(28.0)
                    .color(egui::Color32::from_gray(200)),
            );
            ui.add_space(10.0);
            ui.label(
                egui::RichText::new("Choose an image and an annotation file, then press Start")
                    .color(egui::Color32::from_gray(160)),
            );
        });
    });
}

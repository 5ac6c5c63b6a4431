// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with file pickers, the start button and the zoom controls.

use crate::config::ViewerSettings;
use crate::viewer::{StatusKind, ViewerPage};

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    PickImage,
    PickAnnotations,
    StartAnnotation,
    ResetView,
    Zoom(f32),
}

/// Display the toolbar for a viewer page.
pub fn show(
    ui: &mut egui::Ui,
    page: &ViewerPage,
    loading: bool,
    settings: &ViewerSettings,
) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if ui.button("📷 Choose Image...").clicked() {
            action = ToolbarAction::PickImage;
        }
        let annotation_label = format!("📄 Choose {} Annotations...", page.format().name());
        if ui.button(annotation_label).clicked() {
            action = ToolbarAction::PickAnnotations;
        }

        ui.separator();

        let start_text = if loading { "Processing..." } else { "Start Annotation" };
        if ui.add_enabled(!loading, egui::Button::new(start_text)).clicked() {
            action = ToolbarAction::StartAnnotation;
        }
        if ui.button("Reset View").clicked() {
            action = ToolbarAction::ResetView;
        }

        ui.separator();

        let bounds = page.pan_zoom().bounds();
        let mut scale = page.pan_zoom().viewport().scale;
        ui.label(format!("Zoom: {:.1}x", scale));
        let slider = egui::Slider::new(&mut scale, bounds.min..=bounds.max)
            .step_by(settings.scale_step)
            .show_value(false);
        if ui.add(slider).changed() {
            action = ToolbarAction::Zoom(scale);
        }
    });

    ui.horizontal(|ui| {
        if let Some(name) = page.image_file_name() {
            ui.label(egui::RichText::new(format!("Image: {name}")).weak());
        }
        if let Some(name) = page.annotation_file_name() {
            ui.label(egui::RichText::new(format!("Annotations: {name}")).weak());
        }
        if !page.annotations().is_empty() {
            ui.label(egui::RichText::new(format!("{} boxes", page.annotations().len())).weak());
        }
    });

    if let Some(status) = page.status() {
        let color = match status.kind {
            StatusKind::Success => egui::Color32::from_rgb(120, 200, 120),
            StatusKind::Error => egui::Color32::from_rgb(230, 110, 110),
            StatusKind::Info => egui::Color32::from_gray(200),
        };
        ui.label(egui::RichText::new(&status.text).color(color));
    }

    action
}

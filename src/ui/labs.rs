// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Format selector listing the available viewers.

use crate::io::Format;

/// Display the viewer list. Returns the format the user switched to.
pub fn show(ui: &mut egui::Ui, current: Format) -> Option<Format> {
    let mut selected = None;

    ui.heading("Viewers");
    ui.add_space(4.0);
    for format in Format::ALL {
        let response = ui
            .selectable_label(format == current, format.name())
            .on_hover_text(format.description());
        if response.clicked() && format != current {
            selected = Some(format);
        }
    }

    ui.add_space(8.0);
    ui.separator();
    ui.label(egui::RichText::new(current.description()).italics().weak());

    selected
}

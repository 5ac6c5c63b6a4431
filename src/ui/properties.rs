// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Side panel listing the parsed boxes and, for COCO files, the id search
//! and the structure browser.

use super::json_tree;
use crate::io::Format;
use crate::viewer::ViewerPage;

/// Result of properties panel interaction.
pub enum PropertiesAction {
    None,
    Search,
}

/// Display the properties panel. `search_query` is the text field contents.
pub fn show(
    ui: &mut egui::Ui,
    page: &ViewerPage,
    search_query: &mut String,
    max_items: usize,
) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.heading("Annotations");
            if page.annotations().is_empty() {
                ui.label(egui::RichText::new("No annotations loaded").weak());
            }
            for (i, ann) in page.annotations().iter().enumerate() {
                let (x_min, y_min, x_max, y_max) = ann.bounds();
                ui.label(format!(
                    "{}. {}  [{:.0}, {:.0}, {:.0}, {:.0}]",
                    i + 1,
                    ann.label(),
                    x_min,
                    y_min,
                    x_max,
                    y_max
                ));
            }

            if page.format() != Format::Coco {
                return;
            }

            ui.separator();
            ui.heading("Search by ID");
            ui.horizontal(|ui| {
                let field = ui.add(
                    egui::TextEdit::singleline(search_query)
                        .hint_text("Image ID")
                        .desired_width(120.0),
                );
                let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Search").clicked() || submitted {
                    action = PropertiesAction::Search;
                }
            });

            if let Some(results) = page.search_results() {
                match serde_json::to_value(results) {
                    Ok(value) => {
                        let id = egui::Id::new("search_results");
                        json_tree::show(ui, "results", &value, id, max_items)
                    }
                    Err(e) => log::error!("Failed to display search results: {}", e),
                }
            }

            if let Some(loaded) = page.dataset() {
                ui.separator();
                ui.heading("File Structure");
                json_tree::show(ui, "root", &loaded.json, egui::Id::new("dataset_root"), max_items);
            }
        });

    action
}

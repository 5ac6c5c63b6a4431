// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Collapsible JSON browser.
//!
//! Large COCO files hold hundreds of thousands of records, so each node
//! only lists its first `max_items` children.

use serde_json::Value;

/// Collapsed header text for a container, scalar text otherwise.
pub fn summary(value: &Value, max_items: usize) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("{s:?}"),
        Value::Array(items) => format!("Array[{}]", items.len()),
        Value::Object(map) if map.len() > max_items => {
            format!("Object (showing {}/{})", max_items, map.len())
        }
        Value::Object(_) => "Object".to_string(),
    }
}

/// Footer for a truncated container, if any children are hidden.
pub fn hidden_note(len: usize, max_items: usize) -> Option<String> {
    (len > max_items).then(|| format!("... {} more items not shown", len - max_items))
}

/// Show `value` as a tree. `id` must be unique among siblings.
pub fn show(ui: &mut egui::Ui, key: &str, value: &Value, id: egui::Id, max_items: usize) {
    let color = |value: &Value| match value {
        Value::Null | Value::Bool(_) => egui::Color32::from_rgb(120, 160, 230),
        Value::Number(_) => egui::Color32::from_rgb(120, 200, 120),
        _ => egui::Color32::from_rgb(220, 120, 120),
    };

    match value {
        Value::Array(items) => {
            egui::CollapsingHeader::new(format!("{key}: {}", summary(value, max_items)))
                .id_source(id)
                .show(ui, |ui| {
                    for (i, item) in items.iter().take(max_items).enumerate() {
                        show(ui, &i.to_string(), item, id.with(i), max_items);
                    }
                    if let Some(note) = hidden_note(items.len(), max_items) {
                        ui.label(egui::RichText::new(note).italics().weak());
                    }
                });
        }
        Value::Object(map) => {
            egui::CollapsingHeader::new(format!("{key}: {}", summary(value, max_items)))
                .id_source(id)
                .show(ui, |ui| {
                    for (k, v) in map.iter().take(max_items) {
                        show(ui, k, v, id.with(k), max_items);
                    }
                    if let Some(note) = hidden_note(map.len(), max_items) {
                        ui.label(egui::RichText::new(note).italics().weak());
                    }
                });
        }
        scalar => {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(format!("{key}:")).monospace());
                ui.label(
                    egui::RichText::new(summary(scalar, max_items))
                        .monospace()
                        .color(color(scalar)),
                );
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summaries() {
        assert_eq!(summary(&json!(null), 20), "null");
        assert_eq!(summary(&json!(3), 20), "3");
        assert_eq!(summary(&json!("a.jpg"), 20), "\"a.jpg\"");
        assert_eq!(summary(&json!([1, 2, 3]), 20), "Array[3]");
        assert_eq!(summary(&json!({"a": 1}), 20), "Object");
        assert_eq!(summary(&json!({"a": 1, "b": 2, "c": 3}), 2), "Object (showing 2/3)");
    }

    #[test]
    fn test_hidden_note() {
        assert_eq!(hidden_note(20, 20), None);
        assert_eq!(hidden_note(25, 20).as_deref(), Some("... 5 more items not shown"));
    }
}

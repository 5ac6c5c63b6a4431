// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Viewer settings.
//!
//! Settings are read from a YAML file, either the one passed with
//! `--config` or `settings.yaml` in the platform config directory
//! (`~/.config/annoview/` on Linux). Missing keys take their defaults, and
//! an unreadable file falls back to the defaults entirely.

use crate::models::viewport::ScaleBounds;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Appearance and behavior of the annotation viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    /// Box outline and label background color (RGB)
    pub box_color: [u8; 3],
    /// Label text color (RGB)
    pub label_text_color: [u8; 3],
    /// Outline width in screen pixels, constant across zoom levels
    pub stroke_width: f32,
    /// Label font size in screen pixels
    pub font_size: f32,
    /// Height of the label background in screen pixels
    pub label_height: f32,
    /// Gap between the label text and its background edge
    pub label_padding: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub scale_step: f64,
    /// Children shown per node in the COCO structure viewer
    pub json_preview_items: usize,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            box_color: [0, 255, 0],
            label_text_color: [0, 0, 0],
            stroke_width: 2.0,
            font_size: 16.0,
            label_height: 20.0,
            label_padding: 5.0,
            min_scale: 0.1,
            max_scale: 3.0,
            scale_step: 0.1,
            json_preview_items: 20,
            window_width: 1280.0,
            window_height: 860.0,
        }
    }
}

impl ViewerSettings {
    /// Default settings file location.
    pub fn settings_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("annoview")
            .join("settings.yaml")
    }

    /// Load settings, falling back to defaults on any failure.
    pub fn load(custom_path: Option<&Path>) -> Self {
        let path = match custom_path {
            Some(p) => {
                log::info!("Using custom settings path: {}", p.display());
                p.to_path_buf()
            }
            None => Self::settings_path(),
        };

        if !path.exists() {
            log::info!("Settings file not found at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::error!("{:#}", e);
                log::warn!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse settings file {}: {}", path.display(), e))
    }

    pub fn from_yaml(contents: &str) -> anyhow::Result<Self> {
        let settings: Self = serde_yaml::from_str(contents)?;
        settings.validated()
    }

    fn validated(self) -> anyhow::Result<Self> {
        if !(self.min_scale > 0.0 && self.min_scale <= 1.0 && self.max_scale >= 1.0) {
            anyhow::bail!(
                "scale range {}..{} must be positive and include 1.0",
                self.min_scale,
                self.max_scale
            );
        }
        if self.stroke_width <= 0.0 || self.font_size <= 0.0 || self.label_height <= 0.0 {
            anyhow::bail!("stroke_width, font_size and label_height must be positive");
        }
        if !(self.scale_step > 0.0 && self.scale_step.is_finite()) {
            anyhow::bail!("scale_step {} must be a positive number", self.scale_step);
        }
        if !(self.label_padding >= 0.0 && self.label_padding.is_finite()) {
            anyhow::bail!("label_padding {} must not be negative", self.label_padding);
        }
        Ok(self)
    }

    pub fn scale_bounds(&self) -> ScaleBounds {
        ScaleBounds {
            min: self.min_scale,
            max: self.max_scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let settings =
            ViewerSettings::from_yaml("stroke_width: 3.5\nbox_color: [255, 0, 0]\n").unwrap();
        assert_eq!(settings.stroke_width, 3.5);
        assert_eq!(settings.box_color, [255, 0, 0]);
        assert_eq!(settings.font_size, 16.0);
        assert_eq!(settings.scale_bounds(), ScaleBounds::default());
    }

    #[test]
    fn test_rejects_unusable_scale_range() {
        assert!(ViewerSettings::from_yaml("min_scale: 0.0").is_err());
        assert!(ViewerSettings::from_yaml("max_scale: 0.5").is_err());
        assert!(ViewerSettings::from_yaml("font_size: -1").is_err());
    }

    #[test]
    fn test_rejects_unusable_step_and_padding() {
        assert!(ViewerSettings::from_yaml("scale_step: 0").is_err());
        assert!(ViewerSettings::from_yaml("scale_step: -0.1").is_err());
        assert!(ViewerSettings::from_yaml("scale_step: .nan").is_err());
        assert!(ViewerSettings::from_yaml("label_padding: -2").is_err());

        let settings = ViewerSettings::from_yaml("scale_step: 0.25\nlabel_padding: 0").unwrap();
        assert_eq!(settings.scale_step, 0.25);
        assert_eq!(settings.label_padding, 0.0);
    }

    #[test]
    fn test_load_falls_back_to_defaults() {
        let missing = std::env::temp_dir().join("annoview-missing-settings.yaml");
        assert_eq!(ViewerSettings::load(Some(missing.as_path())), ViewerSettings::default());

        let broken =
            std::env::temp_dir().join(format!("annoview-broken-{}.yaml", std::process::id()));
        std::fs::write(&broken, "stroke_width: [not, a, number]").unwrap();
        assert_eq!(ViewerSettings::load(Some(broken.as_path())), ViewerSettings::default());
        let _ = std::fs::remove_file(&broken);
    }
}

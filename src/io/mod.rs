// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for images and annotation files.
//!
//! Each supported annotation format implements [`AnnotationParser`], which
//! reduces a raw payload to an ordered list of [`RectAnnotation`]s.

pub mod coco;
pub mod media;
pub mod voc;
pub mod yolo;

use crate::error::ParseError;
use crate::models::annotation::{ImageMeta, RectAnnotation};
use anyhow::{Context, Result};
use std::path::Path;

/// Converts an annotation payload into rectangles for one image.
pub trait AnnotationParser {
    fn parse(&self, raw: &str, image: &ImageMeta) -> Result<Vec<RectAnnotation>, ParseError>;
}

/// Supported annotation formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Coco,
    Voc,
    Yolo,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Coco, Format::Voc, Format::Yolo];

    pub fn title(&self) -> &'static str {
        match self {
            Format::Coco => "COCO Dataset Viewer",
            Format::Voc => "VOC Dataset Viewer",
            Format::Yolo => "YOLO Dataset Viewer",
        }
    }

    /// Short name used in menus.
    pub fn name(&self) -> &'static str {
        match self {
            Format::Coco => "COCO",
            Format::Voc => "Pascal VOC",
            Format::Yolo => "YOLO",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Format::Coco => "instances_*.json with images, annotations and categories",
            Format::Voc => "one XML file per image with <object>/<bndbox> entries",
            Format::Yolo => "one text file per image, `class x_center y_center width height`",
        }
    }

    /// Extensions accepted by the annotation file dialog.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Format::Coco => &["json"],
            Format::Voc => &["xml"],
            Format::Yolo => &["txt"],
        }
    }

    pub fn parser(&self) -> Box<dyn AnnotationParser> {
        match self {
            Format::Coco => Box::new(coco::CocoParser),
            Format::Voc => Box::new(voc::VocParser),
            Format::Yolo => Box::new(yolo::YoloParser),
        }
    }
}

/// Read an annotation file as UTF-8 text.
pub fn read_annotation_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read annotation file {}", path.display()))
}

/// The file name component of a path, for display and COCO matching.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

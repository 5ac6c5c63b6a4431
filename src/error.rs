// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Errors raised while turning an annotation file into rectangles.

/// Failure to parse an annotation payload.
///
/// The `Display` text is shown to the user verbatim in the status bar.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("invalid JSON: {0}")]
    Json(String),

    #[error("invalid XML: {0}")]
    Xml(String),

    #[error("missing <{element}> in object {index}")]
    MissingElement { element: &'static str, index: usize },

    #[error("<{element}> in object {index} is not a number: {value:?}")]
    InvalidNumber {
        element: &'static str,
        index: usize,
        value: String,
    },

    #[error("invalid bounding box for {label:?}: {reason}")]
    InvalidBox { label: String, reason: String },

    #[error("no annotations found for image {0:?}")]
    ImageNotFound(String),

    #[error("line {line}: {reason}")]
    YoloLine { line: usize, reason: String },
}

impl ParseError {
    pub fn invalid_box(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBox {
            label: label.into(),
            reason: reason.into(),
        }
    }

    pub fn yolo_line(line: usize, reason: impl Into<String>) -> Self {
        Self::YoloLine {
            line,
            reason: reason.into(),
        }
    }

    /// True for the "annotation file has nothing for this image" case, which
    /// is reported differently from a malformed file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ImageNotFound(_))
    }
}

// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! YOLO normalized text labels.
//!
//! One object per line: `class_index x_center y_center width height`, the
//! last four normalized to the image size. Labels are synthesized as
//! `"class N"`; no class-name file is read.

use super::AnnotationParser;
use crate::error::ParseError;
use crate::models::annotation::{ImageMeta, RectAnnotation};
use crate::util::geometry::denormalize_center_box;

/// Parser for YOLO `.txt` label files.
pub struct YoloParser;

impl AnnotationParser for YoloParser {
    fn parse(&self, raw: &str, image: &ImageMeta) -> Result<Vec<RectAnnotation>, ParseError> {
        raw.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| parse_line(line, idx + 1, image))
            .collect()
    }
}

fn parse_line(line: &str, line_no: usize, image: &ImageMeta) -> Result<RectAnnotation, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 5 {
        return Err(ParseError::yolo_line(
            line_no,
            format!("expected 5 values, got {}", tokens.len()),
        ));
    }

    let class_index: u32 = tokens[0].parse().map_err(|_| {
        ParseError::yolo_line(line_no, format!("class index {:?} is not an integer", tokens[0]))
    })?;

    let mut values = [0.0f64; 4];
    for (slot, (name, token)) in values
        .iter_mut()
        .zip(["x_center", "y_center", "width", "height"].iter().zip(&tokens[1..]))
    {
        *slot = token
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                ParseError::yolo_line(line_no, format!("{name} {token:?} is not a number"))
            })?;
    }
    let [x_center, y_center, width, height] = values;
    if width < 0.0 || height < 0.0 {
        return Err(ParseError::yolo_line(line_no, "width and height must not be negative"));
    }

    let (x_min, y_min, x_max, y_max) =
        denormalize_center_box(x_center, y_center, width, height, image.width, image.height);
    RectAnnotation::new(format!("class {class_index}"), x_min, y_min, x_max, y_max)
        .map_err(|e| ParseError::yolo_line(line_no, e.to_string()))
}

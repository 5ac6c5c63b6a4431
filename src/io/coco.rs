// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! COCO object-detection JSON.
//!
//! Format reference: <https://cocodataset.org/#format-data>. Only the
//! `bbox` of each annotation is used; segmentation and any other fields are
//! kept verbatim so the dataset can be browsed in the structure viewer.

use super::AnnotationParser;
use crate::error::ParseError;
use crate::models::annotation::{ImageMeta, RectAnnotation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Label used when an annotation references a category id that is not in
/// the category table.
pub const UNKNOWN_CATEGORY: &str = "unknown category";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CocoDataset {
    pub images: Vec<CocoImage>,
    pub annotations: Vec<CocoAnnotation>,
    pub categories: Vec<CocoCategory>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CocoImage {
    pub id: u64,
    pub file_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CocoAnnotation {
    pub image_id: u64,
    pub category_id: u64,
    pub bbox: Vec<f64>, // [x, y, width, height]
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CocoCategory {
    pub id: u64,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Records matching an id lookup.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResults {
    pub images: Vec<CocoImage>,
    pub annotations: Vec<CocoAnnotation>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.annotations.is_empty()
    }
}

impl CocoDataset {
    pub fn from_str(content: &str) -> Result<Self, ParseError> {
        serde_json::from_str(content).map_err(|e| ParseError::Json(e.to_string()))
    }

    pub fn from_value(value: &Value) -> Result<Self, ParseError> {
        Self::deserialize(value).map_err(|e| ParseError::Json(e.to_string()))
    }

    /// Category id to name.
    pub fn category_table(&self) -> HashMap<u64, &str> {
        self.categories
            .iter()
            .map(|cat| (cat.id, cat.name.as_str()))
            .collect()
    }

    pub fn find_image(&self, file_name: &str) -> Option<&CocoImage> {
        self.images.iter().find(|img| img.file_name == file_name)
    }

    /// Rectangles for the image with the given base file name, in file order.
    pub fn rectangles_for(&self, file_name: &str) -> Result<Vec<RectAnnotation>, ParseError> {
        let image = self
            .find_image(file_name)
            .ok_or_else(|| ParseError::ImageNotFound(file_name.to_string()))?;
        let categories = self.category_table();

        self.annotations
            .iter()
            .filter(|ann| ann.image_id == image.id)
            .map(|ann| {
                let label = categories
                    .get(&ann.category_id)
                    .copied()
                    .unwrap_or(UNKNOWN_CATEGORY);
                let [x, y, w, h] = <[f64; 4]>::try_from(ann.bbox.as_slice()).map_err(|_| {
                    ParseError::invalid_box(
                        label,
                        format!("expected 4 bbox values, got {}", ann.bbox.len()),
                    )
                })?;
                RectAnnotation::from_xywh(label, x, y, w, h)
            })
            .collect()
    }

    /// Image records with `id` and annotation records with `image_id == id`.
    pub fn search_by_id(&self, id: u64) -> SearchResults {
        SearchResults {
            images: self.images.iter().filter(|img| img.id == id).cloned().collect(),
            annotations: self
                .annotations
                .iter()
                .filter(|ann| ann.image_id == id)
                .cloned()
                .collect(),
        }
    }
}

/// Parser for COCO `instances_*.json` files.
pub struct CocoParser;

impl AnnotationParser for CocoParser {
    fn parse(&self, raw: &str, image: &ImageMeta) -> Result<Vec<RectAnnotation>, ParseError> {
        CocoDataset::from_str(raw)?.rectangles_for(image.base_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "info": {"year": 2017},
        "images": [
            {"id": 1, "file_name": "a.jpg", "width": 640, "height": 480},
            {"id": 2, "file_name": "b.jpg"}
        ],
        "categories": [
            {"id": 5, "name": "cat", "supercategory": "animal"},
            {"id": 6, "name": "dog"}
        ],
        "annotations": [
            {"id": 10, "image_id": 1, "category_id": 5, "bbox": [10, 10, 30, 40]},
            {"id": 11, "image_id": 2, "category_id": 6, "bbox": [0, 0, 5, 5]},
            {"id": 12, "image_id": 1, "category_id": 99, "bbox": [1.5, 2.5, 3, 4]},
            {"id": 13, "image_id": 1, "category_id": 6, "bbox": [100, 50, 20, 10]}
        ]
    }"#;

    #[test]
    fn test_single_match_scenario() {
        let raw = r#"{
            "images": [{"id": 1, "file_name": "a.jpg"}],
            "categories": [{"id": 5, "name": "cat"}],
            "annotations": [{"image_id": 1, "category_id": 5, "bbox": [10, 10, 30, 40]}]
        }"#;
        let rects = CocoParser
            .parse(raw, &ImageMeta::new("a.jpg", 100, 100))
            .unwrap();
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].label(), "cat");
        assert_eq!(rects[0].bounds(), (10.0, 10.0, 40.0, 50.0));
    }

    #[test]
    fn test_collects_annotations_in_file_order_with_fallback_label() {
        let rects = CocoParser
            .parse(SAMPLE, &ImageMeta::new("train2017/a.jpg", 640, 480))
            .unwrap();
        let labels: Vec<&str> = rects.iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec!["cat", UNKNOWN_CATEGORY, "dog"]);
        assert_eq!(rects[1].bounds(), (1.5, 2.5, 4.5, 6.5));
        assert_eq!(rects[2].bounds(), (100.0, 50.0, 120.0, 60.0));
    }

    #[test]
    fn test_parse_is_deterministic() {
        let image = ImageMeta::new("a.jpg", 640, 480);
        let first = CocoParser.parse(SAMPLE, &image).unwrap();
        let second = CocoParser.parse(SAMPLE, &image).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_image_is_not_found() {
        let err = CocoParser
            .parse(SAMPLE, &ImageMeta::new("zebra.jpg", 640, 480))
            .unwrap_err();
        assert_eq!(err, ParseError::ImageNotFound("zebra.jpg".into()));
    }

    #[test]
    fn test_malformed_json() {
        let err = CocoParser
            .parse("{ not json", &ImageMeta::new("a.jpg", 1, 1))
            .unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));

        // Valid JSON without the COCO arrays is also rejected
        let err = CocoParser
            .parse(r#"{"images": []}"#, &ImageMeta::new("a.jpg", 1, 1))
            .unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }

    #[test]
    fn test_bad_bbox_is_reported() {
        let raw = r#"{
            "images": [{"id": 1, "file_name": "a.jpg"}],
            "categories": [{"id": 5, "name": "cat"}],
            "annotations": [{"image_id": 1, "category_id": 5, "bbox": [10, 10, 30]}]
        }"#;
        let err = CocoParser
            .parse(raw, &ImageMeta::new("a.jpg", 1, 1))
            .unwrap_err();
        assert!(matches!(err, ParseError::InvalidBox { .. }));

        let raw = raw.replace("[10, 10, 30]", "[10, 10, -30, 5]");
        let err = CocoParser
            .parse(&raw, &ImageMeta::new("a.jpg", 1, 1))
            .unwrap_err();
        assert!(matches!(err, ParseError::InvalidBox { .. }));
    }

    #[test]
    fn test_search_by_id_keeps_extra_fields() {
        let dataset = CocoDataset::from_str(SAMPLE).unwrap();

        let results = dataset.search_by_id(1);
        assert_eq!(results.images.len(), 1);
        assert_eq!(results.annotations.len(), 3);
        assert_eq!(results.images[0].extra["width"], 640);

        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json["annotations"][0]["id"], 10);

        assert!(dataset.search_by_id(42).is_empty());
    }
}

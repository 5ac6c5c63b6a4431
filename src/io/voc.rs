// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pascal VOC XML annotations.
//!
//! Every `<object>` contributes one rectangle: its `<name>` is the label and
//! the `<bndbox>` corners are used as pixel coordinates unchanged.

use super::AnnotationParser;
use crate::error::ParseError;
use crate::models::annotation::{ImageMeta, RectAnnotation};
use roxmltree::{Document, Node};

/// Parser for Pascal VOC annotation files.
pub struct VocParser;

impl AnnotationParser for VocParser {
    fn parse(&self, raw: &str, _image: &ImageMeta) -> Result<Vec<RectAnnotation>, ParseError> {
        let doc = Document::parse(raw).map_err(|e| ParseError::Xml(e.to_string()))?;

        doc.descendants()
            .filter(|n| n.has_tag_name("object"))
            .enumerate()
            .map(|(index, object)| parse_object(object, index + 1))
            .collect()
    }
}

fn parse_object(object: Node, index: usize) -> Result<RectAnnotation, ParseError> {
    let label = first_descendant(object, "name", index)?
        .text()
        .unwrap_or_default()
        .trim()
        .to_string();
    let bndbox = first_descendant(object, "bndbox", index)?;

    let coord = |element: &'static str| -> Result<f64, ParseError> {
        let node = first_descendant(bndbox, element, index)?;
        let text = node.text().unwrap_or_default();
        parse_leading_int(text)
            .map(|v| v as f64)
            .ok_or_else(|| ParseError::InvalidNumber {
                element,
                index,
                value: text.to_string(),
            })
    };

    let (x_min, y_min) = (coord("xmin")?, coord("ymin")?);
    let (x_max, y_max) = (coord("xmax")?, coord("ymax")?);
    RectAnnotation::new(label, x_min, y_min, x_max, y_max)
}

fn first_descendant<'a, 'input>(
    node: Node<'a, 'input>,
    element: &'static str,
    index: usize,
) -> Result<Node<'a, 'input>, ParseError> {
    node.descendants()
        .skip(1)
        .find(|n| n.has_tag_name(element))
        .ok_or(ParseError::MissingElement { element, index })
}

/// Integer prefix of `text`, so `"48.7"` reads as 48. Annotation tools
/// disagree on whether VOC corners carry decimals.
fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim();
    let digits_end = text
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text[..digits_end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> ImageMeta {
        ImageMeta::new("000001.jpg", 353, 500)
    }

    const SAMPLE: &str = r#"<?xml version="1.0"?>
<annotation>
  <folder>VOC2007</folder>
  <filename>000001.jpg</filename>
  <size><width>353</width><height>500</height><depth>3</depth></size>
  <object>
    <name>dog</name>
    <pose>Left</pose>
    <bndbox>
      <xmin>10</xmin>
      <ymin>20</ymin>
      <xmax>110</xmax>
      <ymax>220</ymax>
    </bndbox>
  </object>
  <object>
    <name> person </name>
    <bndbox><xmin>8</xmin><ymin>12.9</ymin><xmax>352</xmax><ymax>498</ymax></bndbox>
  </object>
</annotation>"#;

    #[test]
    fn test_integer_passthrough() {
        let rects = VocParser.parse(SAMPLE, &image()).unwrap();
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].label(), "dog");
        assert_eq!(rects[0].bounds(), (10.0, 20.0, 110.0, 220.0));
        assert_eq!(rects[1].label(), "person");
        assert_eq!(rects[1].bounds(), (8.0, 12.0, 352.0, 498.0));
    }

    #[test]
    fn test_no_objects_is_empty() {
        let rects = VocParser
            .parse("<annotation><filename>a.jpg</filename></annotation>", &image())
            .unwrap();
        assert!(rects.is_empty());
    }

    #[test]
    fn test_malformed_xml() {
        let err = VocParser.parse("<annotation><object>", &image()).unwrap_err();
        assert!(matches!(err, ParseError::Xml(_)));
    }

    #[test]
    fn test_missing_elements() {
        let raw = "<annotation><object><name>dog</name></object></annotation>";
        assert_eq!(
            VocParser.parse(raw, &image()).unwrap_err(),
            ParseError::MissingElement { element: "bndbox", index: 1 }
        );

        let raw = "<annotation><object><name>dog</name><bndbox>\
                   <xmin>1</xmin><ymin>1</ymin><xmax>2</xmax>\
                   </bndbox></object></annotation>";
        assert_eq!(
            VocParser.parse(raw, &image()).unwrap_err(),
            ParseError::MissingElement { element: "ymax", index: 1 }
        );
    }

    #[test]
    fn test_non_numeric_corner() {
        let raw = "<annotation><object><name>dog</name><bndbox>\
                   <xmin>abc</xmin><ymin>1</ymin><xmax>2</xmax><ymax>2</ymax>\
                   </bndbox></object></annotation>";
        let err = VocParser.parse(raw, &image()).unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { element: "xmin", .. }));
    }

    #[test]
    fn test_leading_int() {
        assert_eq!(parse_leading_int(" 42 "), Some(42));
        assert_eq!(parse_leading_int("48.7"), Some(48));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("x1"), None);
        assert_eq!(parse_leading_int(""), None);
    }
}

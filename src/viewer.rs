// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! State of one dataset viewer page.
//!
//! A [`ViewerPage`] is the same for every annotation format; the format only
//! decides which parser runs on "Start Annotation" and whether the COCO
//! search and structure panels are shown. The page knows nothing about
//! egui, so its transitions can be tested directly.

use crate::error::ParseError;
use crate::io::coco::{CocoDataset, SearchResults};
use crate::io::Format;
use crate::models::annotation::{ImageMeta, Point, RectAnnotation};
use crate::models::viewport::{PanZoom, ScaleBounds};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
    Info,
}

/// Message shown under the toolbar.
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

impl Status {
    fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }

    fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }
}

/// The loaded COCO dataset, kept for drawing, search and browsing.
pub struct LoadedDataset {
    pub dataset: CocoDataset,
    /// Whole file as generic JSON for the structure viewer
    pub json: serde_json::Value,
}

impl LoadedDataset {
    pub fn from_text(text: &str) -> Result<Self, ParseError> {
        let json: serde_json::Value =
            serde_json::from_str(text).map_err(|e| ParseError::Json(e.to_string()))?;
        let dataset = CocoDataset::from_value(&json)?;
        Ok(Self { dataset, json })
    }
}

/// Contents of a selected annotation file, ready for "Start Annotation".
pub enum AnnotationContents {
    /// VOC or YOLO text, parsed on start
    Text(String),
    /// COCO dataset, parsed once when the file is read
    Coco(LoadedDataset),
}

impl AnnotationContents {
    /// Prepare file text for `format`. Runs on the loader thread, so the
    /// expensive COCO parse never blocks the UI.
    pub fn prepare(format: Format, text: String) -> Result<Self, ParseError> {
        match format {
            Format::Coco => LoadedDataset::from_text(&text).map(Self::Coco),
            Format::Voc | Format::Yolo => Ok(Self::Text(text)),
        }
    }
}

/// The selected annotation file. `contents` is `None` when it failed to
/// parse on selection.
struct AnnotationFile {
    name: String,
    contents: Option<AnnotationContents>,
}

pub struct ViewerPage {
    format: Format,
    image: Option<ImageMeta>,
    annotation_file: Option<AnnotationFile>,
    annotations: Vec<RectAnnotation>,
    pan_zoom: PanZoom,
    status: Option<Status>,
    search_results: Option<SearchResults>,
}

impl ViewerPage {
    pub fn new(format: Format, bounds: ScaleBounds) -> Self {
        Self {
            format,
            image: None,
            annotation_file: None,
            annotations: Vec::new(),
            pan_zoom: PanZoom::new(bounds),
            status: None,
            search_results: None,
        }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn image(&self) -> Option<&ImageMeta> {
        self.image.as_ref()
    }

    pub fn image_file_name(&self) -> Option<&str> {
        self.image.as_ref().map(|img| img.file_name.as_str())
    }

    pub fn annotation_file_name(&self) -> Option<&str> {
        self.annotation_file.as_ref().map(|f| f.name.as_str())
    }

    pub fn annotations(&self) -> &[RectAnnotation] {
        &self.annotations
    }

    pub fn pan_zoom(&self) -> &PanZoom {
        &self.pan_zoom
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn dataset(&self) -> Option<&LoadedDataset> {
        match self.annotation_file.as_ref()?.contents.as_ref()? {
            AnnotationContents::Coco(loaded) => Some(loaded),
            AnnotationContents::Text(_) => None,
        }
    }

    pub fn search_results(&self) -> Option<&SearchResults> {
        self.search_results.as_ref()
    }

    /// Replace the selected image.
    pub fn set_image(&mut self, image: ImageMeta) {
        log::info!(
            "Selected image {} ({}x{})",
            image.file_name,
            image.width,
            image.height
        );
        self.image = Some(image);
    }

    /// Replace the selected annotation file. Current boxes, status and
    /// search results are cleared.
    pub fn set_annotation_file(&mut self, name: impl Into<String>, contents: AnnotationContents) {
        let name = name.into();
        log::info!("Selected annotation file {}", name);
        self.clear_annotation_state();
        self.annotation_file = Some(AnnotationFile {
            name,
            contents: Some(contents),
        });
    }

    /// Record an annotation file that could not be parsed on selection.
    pub fn reject_annotation_file(&mut self, name: impl Into<String>, error: &ParseError) {
        let name = name.into();
        log::warn!("Failed to parse annotation file {}: {}", name, error);
        self.clear_annotation_state();
        let message = match error {
            ParseError::Json(e) => format!("Failed to parse JSON: {e}"),
            other => format!("Failed to parse {name}: {other}"),
        };
        self.status = Some(Status::error(message));
        self.annotation_file = Some(AnnotationFile {
            name,
            contents: None,
        });
    }

    fn clear_annotation_state(&mut self) {
        self.annotations.clear();
        self.status = None;
        self.search_results = None;
    }

    /// Draw the boxes of the selected file that belong to the selected image.
    pub fn start_annotation(&mut self) {
        let (Some(image), Some(file)) = (&self.image, &self.annotation_file) else {
            self.status = Some(Status::error(
                "Please choose both an image and an annotation file first.",
            ));
            return;
        };
        let Some(contents) = &file.contents else {
            self.status = Some(Status::error(format!(
                "Failed to process annotations: {} could not be parsed, choose another file.",
                file.name
            )));
            return;
        };

        let result = match contents {
            AnnotationContents::Coco(loaded) => loaded.dataset.rectangles_for(image.base_name()),
            AnnotationContents::Text(text) => self.format.parser().parse(text, image),
        };

        match result {
            Ok(annotations) => {
                log::info!(
                    "Parsed {} {} annotations for {}",
                    annotations.len(),
                    self.format.name(),
                    image.file_name
                );
                self.status = Some(Status::success(format!(
                    "Annotations loaded: {} boxes. \
                     Use the slider to zoom and drag the canvas to pan.",
                    annotations.len()
                )));
                self.annotations = annotations;
            }
            Err(e) if e.is_not_found() => {
                log::warn!("{}", e);
                self.status = Some(Status::error(format!("Not found: {e}")));
            }
            Err(e) => {
                log::warn!("Failed to parse {}: {}", file.name, e);
                self.status = Some(Status::error(format!("Failed to process annotations: {e}")));
            }
        }
    }

    /// Look up COCO image and annotation records by image id.
    pub fn search_by_id(&mut self, query: &str) {
        let query = query.trim();
        let outcome = self
            .dataset()
            .filter(|_| !query.is_empty())
            .map(|loaded| query.parse::<u64>().map(|id| (id, loaded.dataset.search_by_id(id))));
        let Some(outcome) = outcome else {
            self.status = Some(Status::error(
                "Please load a COCO annotation file and enter an image ID to search.",
            ));
            return;
        };
        let Ok((id, results)) = outcome else {
            self.status = Some(Status::error(format!("Invalid image ID: {query:?}")));
            self.search_results = None;
            return;
        };

        if results.is_empty() {
            self.status = Some(Status::info(format!("No records found for ID {id}")));
            self.search_results = None;
        } else {
            self.status = Some(Status::success(format!(
                "Found {} image(s) and {} annotation(s) for ID {id}",
                results.images.len(),
                results.annotations.len()
            )));
            self.search_results = Some(results);
        }
    }

    /// Record a failure that happened outside the page, e.g. a file read.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = Some(Status::error(message));
    }

    pub fn reset_view(&mut self) {
        self.pan_zoom.reset();
    }

    pub fn zoom(&mut self, scale: f32) {
        self.pan_zoom.slider_change(scale);
    }

    pub fn pointer_down(&mut self, pos: Point) {
        self.pan_zoom.pointer_down(pos);
    }

    pub fn pointer_move(&mut self, pos: Point) {
        self.pan_zoom.pointer_move(pos);
    }

    pub fn pointer_up(&mut self) {
        self.pan_zoom.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.pan_zoom.pointer_leave();
    }
}

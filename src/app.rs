// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module owns the active viewer page, loads files in the background
//! and routes toolbar, canvas and panel actions to the page.

use crate::config::ViewerSettings;
use crate::io::{self, media, Format};
use crate::models::annotation::ImageMeta;
use crate::error::ParseError;
use crate::io::media::LoadedImage;
use crate::ui::{canvas, labs, properties, toolbar};
use crate::viewer::{AnnotationContents, ViewerPage};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};

/// Result of background image loading operation.
struct LoadedImageData {
    /// Native size, used by the parsers and the canvas
    meta: ImageMeta,
    /// Pixels for the texture, possibly shrunk to fit the GPU
    texture: LoadedImage,
}

/// Result of background annotation file reading. The file was read; its
/// contents may still have failed to parse.
struct LoadedAnnotationFile {
    name: String,
    contents: Result<AnnotationContents, ParseError>,
}

/// Main application state.
pub struct ViewerApp {
    settings: ViewerSettings,

    /// The page for the selected format. Replaced when switching formats.
    page: ViewerPage,

    /// Texture of the selected image
    image_texture: Option<egui::TextureHandle>,

    /// Receiver for background image loading
    image_loader: Option<Receiver<Result<LoadedImageData, String>>>,

    /// Receiver for background annotation file reading
    annotation_loader: Option<Receiver<Result<LoadedAnnotationFile, String>>>,

    /// Contents of the COCO id search field
    search_query: String,

    /// Largest texture side the GPU accepts. Unknown until the first frame.
    max_texture_side: usize,
}

impl ViewerApp {
    /// Create the application showing the page for `format`.
    pub fn new(settings: ViewerSettings, format: Format) -> Self {
        let page = ViewerPage::new(format, settings.scale_bounds());
        Self {
            settings,
            page,
            image_texture: None,
            image_loader: None,
            annotation_loader: None,
            search_query: String::new(),
            max_texture_side: usize::MAX,
        }
    }

    /// Navigate to another viewer. All state of the current page is dropped,
    /// including loads still in flight.
    fn switch_format(&mut self, format: Format) {
        log::info!("Switching to {} viewer", format.name());
        self.page = ViewerPage::new(format, self.settings.scale_bounds());
        self.image_texture = None;
        self.image_loader = None;
        self.annotation_loader = None;
        self.search_query.clear();
    }

    fn is_loading(&self) -> bool {
        self.image_loader.is_some() || self.annotation_loader.is_some()
    }

    /// Decode an image file on a background thread. A newer selection
    /// replaces the receiver, so an older load can never overwrite it.
    pub fn load_image_file(&mut self, path: PathBuf) {
        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);
        let max_side = self.max_texture_side;

        std::thread::spawn(move || {
            let result = media::load_image(&path)
                .and_then(|loaded| {
                    log::info!(
                        "Loaded image: {} ({}x{})",
                        path.display(),
                        loaded.width,
                        loaded.height
                    );
                    let meta = ImageMeta::new(io::display_name(&path), loaded.width, loaded.height);
                    let texture = media::fit_texture(loaded, max_side)?;
                    Ok(LoadedImageData { meta, texture })
                })
                .map_err(|e| format!("{:#}", e));

            let _ = sender.send(result);
        });
    }

    /// Read and prepare an annotation file on a background thread. COCO
    /// files are fully parsed here.
    pub fn load_annotation_file(&mut self, path: PathBuf) {
        let (sender, receiver) = channel();
        self.annotation_loader = Some(receiver);
        let format = self.page.format();

        std::thread::spawn(move || {
            let result = io::read_annotation_file(&path)
                .map(|text| LoadedAnnotationFile {
                    name: io::display_name(&path),
                    contents: AnnotationContents::prepare(format, text),
                })
                .map_err(|e| format!("{:#}", e));

            let _ = sender.send(result);
        });
    }

    /// Hand finished background loads to the page.
    fn poll_loaders(&mut self, ctx: &egui::Context) {
        if let Some(ref receiver) = self.image_loader {
            if let Ok(result) = receiver.try_recv() {
                self.image_loader = None;
                // Loads started before the first frame did not know the limit
                let max_side = ctx.input(|i| i.max_texture_side);
                let result = result.and_then(|LoadedImageData { meta, texture }| {
                    media::fit_texture(texture, max_side)
                        .map(|texture| LoadedImageData { meta, texture })
                        .map_err(|e| format!("{:#}", e))
                });
                match result {
                    Ok(loaded) => {
                        let texture = loaded.texture;
                        let size = [texture.width as usize, texture.height as usize];
                        let color_image =
                            egui::ColorImage::from_rgba_unmultiplied(size, &texture.pixels);
                        self.image_texture = Some(ctx.load_texture(
                            "selected_image",
                            color_image,
                            egui::TextureOptions::LINEAR,
                        ));
                        self.page.set_image(loaded.meta);
                    }
                    Err(e) => {
                        log::error!("Failed to load image: {}", e);
                        self.page.fail(format!("Failed to load image: {e}"));
                    }
                }
            }
        }

        if let Some(ref receiver) = self.annotation_loader {
            if let Ok(result) = receiver.try_recv() {
                self.annotation_loader = None;
                match result {
                    Ok(file) => match file.contents {
                        Ok(contents) => self.page.set_annotation_file(file.name, contents),
                        Err(e) => self.page.reject_annotation_file(file.name, &e),
                    },
                    Err(e) => {
                        log::error!("Failed to read annotations: {}", e);
                        self.page.fail(format!("Failed to read annotation file: {e}"));
                    }
                }
            }
        }
    }

    fn pick_image(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", media::IMAGE_EXTENSIONS)
            .pick_file()
        {
            self.load_image_file(path);
        }
    }

    fn pick_annotations(&mut self) {
        let format = self.page.format();
        if let Some(path) = rfd::FileDialog::new()
            .add_filter(format.name(), format.extensions())
            .pick_file()
        {
            self.load_annotation_file(path);
        }
    }

    fn zoom_by(&mut self, steps: f32) {
        let scale = self.page.pan_zoom().viewport().scale;
        self.page.zoom(scale + steps * self.settings.scale_step as f32);
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.max_texture_side = ctx.input(|i| i.max_texture_side);
        self.poll_loaders(ctx);

        // Keep polling while a load is running
        if self.is_loading() {
            ctx.request_repaint();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        self.pick_image();
                        ui.close_menu();
                    }
                    if ui.button("Open Annotations...").clicked() {
                        self.pick_annotations();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    if ui.button("Zoom In").clicked() {
                        self.zoom_by(1.0);
                        ui.close_menu();
                    }
                    if ui.button("Zoom Out").clicked() {
                        self.zoom_by(-1.0);
                        ui.close_menu();
                    }
                    if ui.button("Reset View").clicked() {
                        self.page.reset_view();
                        ui.close_menu();
                    }
                });

                ui.menu_button("Viewer", |ui| {
                    for format in Format::ALL {
                        if ui.button(format.title()).clicked() {
                            if format != self.page.format() {
                                self.switch_format(format);
                            }
                            ui.close_menu();
                        }
                    }
                });
            });
        });

        // Viewer list (left side)
        let switch_to = egui::SidePanel::left("labs")
            .default_width(170.0)
            .show(ctx, |ui| labs::show(ui, self.page.format()))
            .inner;
        if let Some(format) = switch_to {
            self.switch_format(format);
        }

        // Toolbar
        let loading = self.is_loading();
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| toolbar::show(ui, &self.page, loading, &self.settings))
            .inner;

        match toolbar_action {
            toolbar::ToolbarAction::PickImage => self.pick_image(),
            toolbar::ToolbarAction::PickAnnotations => self.pick_annotations(),
            toolbar::ToolbarAction::StartAnnotation => self.page.start_annotation(),
            toolbar::ToolbarAction::ResetView => self.page.reset_view(),
            toolbar::ToolbarAction::Zoom(scale) => self.page.zoom(scale),
            toolbar::ToolbarAction::None => {}
        }

        // Properties panel (right side)
        let properties_action = egui::SidePanel::right("properties")
            .default_width(300.0)
            .show(ctx, |ui| {
                properties::show(
                    ui,
                    &self.page,
                    &mut self.search_query,
                    self.settings.json_preview_items,
                )
            })
            .inner;

        if let properties::PropertiesAction::Search = properties_action {
            self.page.search_by_id(&self.search_query);
        }

        // Main canvas (center)
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| match (&self.image_texture, self.page.image()) {
                (Some(texture), Some(image)) => canvas::show(
                    ui,
                    texture,
                    (image.width, image.height),
                    self.page.annotations(),
                    self.page.pan_zoom().viewport(),
                    self.page.pan_zoom().is_dragging(),
                    &self.settings,
                ),
                _ => {
                    canvas::show_empty(ui, self.page.format().title());
                    canvas::CanvasAction::None
                }
            })
            .inner;

        match canvas_action {
            canvas::CanvasAction::PointerDown(pos) => self.page.pointer_down(pos),
            canvas::CanvasAction::PointerMove(pos) => self.page.pointer_move(pos),
            canvas::CanvasAction::PointerUp => self.page.pointer_up(),
            canvas::CanvasAction::PointerLeave => self.page.pointer_leave(),
            canvas::CanvasAction::None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::time::Duration;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("annoview-{}-{}", std::process::id(), name))
    }

    fn write_png(name: &str, width: u32, height: u32) -> PathBuf {
        let path = temp_file(name);
        image::RgbaImage::from_pixel(width, height, image::Rgba([90, 120, 150, 255]))
            .save(&path)
            .unwrap();
        path
    }

    fn app(format: Format) -> ViewerApp {
        ViewerApp::new(ViewerSettings::default(), format)
    }

    fn wait_for_loads(app: &mut ViewerApp, ctx: &egui::Context) {
        for _ in 0..1000 {
            app.poll_loaders(ctx);
            if !app.is_loading() {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("background loads did not finish");
    }

    fn remove(paths: &[&Path]) {
        for path in paths {
            let _ = std::fs::remove_file(path);
        }
    }

    #[test]
    fn test_last_image_selection_wins() {
        let ctx = egui::Context::default();
        let slow = write_png("slow.png", 1600, 1600);
        let fast = write_png("fast.png", 8, 6);

        let mut app = app(Format::Yolo);
        app.load_image_file(slow.clone());
        app.load_image_file(fast.clone());
        wait_for_loads(&mut app, &ctx);

        // Give the first load time to finish, then poll again
        std::thread::sleep(Duration::from_millis(300));
        app.poll_loaders(&ctx);

        let image = app.page.image().unwrap();
        assert_eq!(image.file_name, io::display_name(&fast));
        assert_eq!((image.width, image.height), (8, 6));
        assert_eq!(app.image_texture.as_ref().unwrap().size(), [8, 6]);
        remove(&[&slow, &fast]);
    }

    #[test]
    fn test_switch_format_drops_loads_in_flight() {
        let ctx = egui::Context::default();
        let image = write_png("switch.png", 16, 16);
        let labels = temp_file("switch.txt");
        std::fs::write(&labels, "0 0.5 0.5 0.5 0.5\n").unwrap();

        let mut app = app(Format::Yolo);
        app.load_image_file(image.clone());
        app.load_annotation_file(labels.clone());
        app.switch_format(Format::Voc);
        assert!(!app.is_loading());

        std::thread::sleep(Duration::from_millis(300));
        app.poll_loaders(&ctx);

        assert_eq!(app.page.format(), Format::Voc);
        assert!(app.page.image().is_none());
        assert!(app.page.annotation_file_name().is_none());
        assert!(app.image_texture.is_none());
        remove(&[&image, &labels]);
    }

    #[test]
    fn test_coco_file_arrives_parsed() {
        let ctx = egui::Context::default();
        let path = temp_file("instances.json");
        std::fs::write(
            &path,
            r#"{"images": [{"id": 3, "file_name": "a.jpg"}],
                "categories": [{"id": 1, "name": "cat"}],
                "annotations": [{"image_id": 3, "category_id": 1, "bbox": [1, 2, 3, 4]}]}"#,
        )
        .unwrap();

        let mut app = app(Format::Coco);
        app.load_annotation_file(path.clone());
        wait_for_loads(&mut app, &ctx);

        let loaded = app.page.dataset().unwrap();
        assert_eq!(loaded.dataset.images.len(), 1);
        assert!(app.page.status().is_none());
        remove(&[&path]);
    }

    #[test]
    fn test_oversized_image_gets_smaller_texture() {
        let ctx = egui::Context::default();
        let max_side = ctx.input(|i| i.max_texture_side);
        let path = write_png("wide.png", max_side as u32 * 2, 4);

        let mut app = app(Format::Voc);
        app.load_image_file(path.clone());
        wait_for_loads(&mut app, &ctx);

        let image = app.page.image().unwrap();
        assert_eq!((image.width, image.height), (max_side as u32 * 2, 4));
        assert_eq!(app.image_texture.as_ref().unwrap().size(), [max_side, 2]);
        remove(&[&path]);
    }
}

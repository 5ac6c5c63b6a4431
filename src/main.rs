// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! annoview - object-detection dataset annotation viewer
//!
//! A cross-platform desktop application that draws COCO, Pascal VOC and
//! YOLO bounding-box annotations over their images, with pan and zoom.

mod app;
mod config;
mod error;
mod io;
mod models;
mod ui;
mod util;
mod viewer;

use anyhow::Result;
use app::ViewerApp;
use clap::Parser;
use config::ViewerSettings;
use io::Format;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "annoview", version, about)]
struct Cli {
    /// Viewer to open.
    #[arg(long, value_enum, default_value_t = Format::Coco)]
    format: Format,

    /// Image file to load at startup.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Annotation file to load at startup.
    #[arg(long)]
    annotations: Option<PathBuf>,

    /// Settings YAML file (defaults to the platform config directory).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();
    let settings = ViewerSettings::load(cli.config.as_deref());

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window_width, settings.window_height])
            .with_min_inner_size([800.0, 600.0])
            .with_title("annoview - Dataset Annotation Viewer"),
        ..Default::default()
    };

    let mut app = ViewerApp::new(settings, cli.format);
    if let Some(path) = cli.image {
        app.load_image_file(path);
    }
    if let Some(path) = cli.annotations {
        app.load_annotation_file(path);
    }

    // Run the application
    eframe::run_native("annoview", options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}

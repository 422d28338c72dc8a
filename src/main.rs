#![warn(clippy::all, rust_2018_idioms)]

use std::path::Path;

use raster_paint::PaintApp;
use raster_paint::config::{CONFIG_FILE, PaintConfig};

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = PaintConfig::load_or_default(Path::new(CONFIG_FILE));
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Raster Paint")
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Raster Paint",
        native_options,
        Box::new(move |cc| Ok(Box::new(PaintApp::new(cc, &config)))),
    )
}

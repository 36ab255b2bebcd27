//! Glass Form - desktop billing form for glass pane measurements.

mod app;
mod theme;

use app::FormApp;
use std::path::PathBuf;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Optional photo of a measurement sheet to read at startup
    let initial_image: Option<PathBuf> = std::env::args().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([800.0, 500.0])
            .with_title("Glass Price Calculator"),
        ..Default::default()
    };

    eframe::run_native(
        "Glass Price Calculator",
        options,
        Box::new(move |cc| Ok(Box::new(FormApp::new(cc, initial_image)))),
    )
}

#![warn(clippy::all, rust_2018_idioms)]

use eframe_hull::HullApp;

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([400.0, 300.0])
            .with_title("Hull editor"),
        ..Default::default()
    };

    eframe::run_native(
        "eframe_hull",
        native_options,
        Box::new(|cc| Ok(Box::new(HullApp::new(cc)))),
    )
}
